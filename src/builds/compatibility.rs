//! Known part mismatches (power draw, memory generation)
//!
//! Rules are checked in table order. A rule fires for every part whose name
//! contains its pattern, then each requirement looks up the build's part of
//! the required type.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Build, ComponentType};

static WATTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)W").expect("wattage pattern is valid"));

/// The minimum a checker needs to know about a part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRef {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
}

impl PartRef {
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        Self {
            component_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityWarning {
    /// Name of the part that triggered the rule
    pub component: String,
    pub issue: String,
    pub severity: Severity,
    pub suggestions: Vec<String>,
}

struct Requirement {
    component_type: ComponentType,
    /// Minimum PSU wattage
    min_value: Option<u32>,
    /// The required part's name must contain one of these
    values: &'static [&'static str],
    message: &'static str,
}

struct Rule {
    pattern: &'static str,
    requires: &'static [Requirement],
    suggestions: &'static [&'static str],
}

const fn min_psu(watts: u32, message: &'static str) -> Requirement {
    Requirement {
        component_type: ComponentType::Psu,
        min_value: Some(watts),
        values: &[],
        message,
    }
}

const fn needs_ddr5(message: &'static str) -> Requirement {
    Requirement {
        component_type: ComponentType::Ram,
        min_value: None,
        values: &["DDR5"],
        message,
    }
}

static RULES: &[Rule] = &[
    Rule {
        pattern: "RTX 4090",
        requires: &[min_psu(850, "The RTX 4090 needs at least an 850W power supply")],
        suggestions: &["Corsair RM850x 850W PSU", "Seasonic Prime TX-1000 1000W PSU"],
    },
    Rule {
        pattern: "RTX 4080",
        requires: &[min_psu(750, "The RTX 4080 needs at least a 750W power supply")],
        suggestions: &["Corsair RM750e 750W PSU", "be quiet! Pure Power 12 M 850W PSU"],
    },
    Rule {
        pattern: "RTX 4070 Ti",
        requires: &[min_psu(700, "The RTX 4070 Ti needs at least a 700W power supply")],
        suggestions: &["MSI MAG A750GL 750W PSU"],
    },
    Rule {
        pattern: "Core i9-14900K",
        requires: &[min_psu(750, "The Core i9-14900K can pull over 250W and needs at least a 750W power supply")],
        suggestions: &["Corsair RM850x 850W PSU"],
    },
    Rule {
        pattern: "Ryzen 9 79",
        requires: &[needs_ddr5("Ryzen 7000-series processors only support DDR5 memory")],
        suggestions: &["G.Skill Trident Z5 32GB DDR5-6000"],
    },
    Rule {
        pattern: "Ryzen 7 7",
        requires: &[needs_ddr5("Ryzen 7000-series processors only support DDR5 memory")],
        suggestions: &["G.Skill Flare X5 32GB DDR5-6000"],
    },
    Rule {
        pattern: "Ryzen 5 7",
        requires: &[needs_ddr5("Ryzen 7000-series processors only support DDR5 memory")],
        suggestions: &["Corsair Vengeance 16GB DDR5-5600"],
    },
];

/// Check a set of parts against the rule table.
pub fn check_compatibility(parts: &[PartRef]) -> Vec<CompatibilityWarning> {
    // last one wins if a type shows up twice
    let by_type: HashMap<ComponentType, &PartRef> =
        parts.iter().map(|p| (p.component_type, p)).collect();

    let mut warnings = Vec::new();

    for part in parts {
        for rule in RULES.iter().filter(|r| part.name.contains(r.pattern)) {
            for requirement in rule.requires {
                if let Some(warning) = check_requirement(part, rule, requirement, &by_type) {
                    warnings.push(warning);
                }
            }
        }
    }

    warnings
}

/// Check every part of a recommended build
pub fn check_build(build: &Build) -> Vec<CompatibilityWarning> {
    let parts: Vec<PartRef> = build
        .components
        .iter()
        .map(|c| PartRef::new(c.component_type, c.name.clone()))
        .collect();
    check_compatibility(&parts)
}

fn check_requirement(
    part: &PartRef,
    rule: &Rule,
    requirement: &Requirement,
    by_type: &HashMap<ComponentType, &PartRef>,
) -> Option<CompatibilityWarning> {
    let suggestions = || rule.suggestions.iter().map(|s| s.to_string()).collect();

    let Some(required) = by_type.get(&requirement.component_type) else {
        return Some(CompatibilityWarning {
            component: part.name.clone(),
            issue: format!("Missing {}", requirement.component_type),
            severity: Severity::Error,
            suggestions: suggestions(),
        });
    };

    if let Some(min_watts) = requirement.min_value {
        if requirement.component_type == ComponentType::Psu {
            let watts = WATTAGE
                .captures(&required.name)
                .and_then(|caps| caps[1].parse::<u32>().ok());
            if watts.is_some_and(|w| w < min_watts) {
                return Some(CompatibilityWarning {
                    component: part.name.clone(),
                    issue: requirement.message.to_string(),
                    severity: Severity::Warning,
                    suggestions: suggestions(),
                });
            }
        }
    }

    if !requirement.values.is_empty()
        && !requirement.values.iter().any(|v| required.name.contains(v))
    {
        return Some(CompatibilityWarning {
            component: part.name.clone(),
            issue: requirement.message.to_string(),
            severity: Severity::Warning,
            suggestions: suggestions(),
        });
    }

    None
}

/// Render a warning as a chat bullet
pub fn format_warning(warning: &CompatibilityWarning) -> String {
    let mut out = format!("⚠️ {}", warning.issue);

    if !warning.suggestions.is_empty() {
        out.push_str("\n   Suggested upgrades:");
        for (i, suggestion) in warning.suggestions.iter().enumerate() {
            out.push_str(&format!("\n   {}. {}", i + 1, suggestion));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::builds::{generate_build_recommendations, Tier};

    fn build_with_psu(psu: &str) -> Vec<PartRef> {
        vec![
            PartRef::new(ComponentType::Cpu, "AMD Ryzen 9 7950X3D"),
            PartRef::new(ComponentType::Gpu, "NVIDIA RTX 4090"),
            PartRef::new(ComponentType::Ram, "G.Skill Trident Z5 32GB DDR5-6400"),
            PartRef::new(ComponentType::Psu, psu),
        ]
    }

    #[test]
    fn test_underpowered_psu() {
        let warnings = check_compatibility(&build_with_psu("Corsair CX650 650W PSU"));

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert_eq!(warnings[0].component, "NVIDIA RTX 4090");
        assert!(warnings[0].issue.contains("850W"));
        assert!(!warnings[0].suggestions.is_empty());
    }

    #[test]
    fn test_adequate_psu() {
        let warnings = check_compatibility(&build_with_psu("Corsair RM850x 850W PSU"));
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_psu_without_wattage_is_not_flagged() {
        let warnings = check_compatibility(&build_with_psu("Mystery Brand PSU"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_required_part() {
        let parts = vec![PartRef::new(ComponentType::Gpu, "NVIDIA RTX 4080 Super")];
        let warnings = check_compatibility(&parts);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Error);
        assert_eq!(warnings[0].issue, "Missing PSU");
    }

    #[test]
    fn test_memory_generation() {
        let parts = vec![
            PartRef::new(ComponentType::Cpu, "AMD Ryzen 7 7800X3D"),
            PartRef::new(ComponentType::Ram, "Kingston Fury Beast 16GB DDR4-3200"),
        ];
        let warnings = check_compatibility(&parts);

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].issue.contains("DDR5"));
    }

    #[test]
    fn test_last_part_of_a_type_wins() {
        let parts = vec![
            PartRef::new(ComponentType::Cpu, "AMD Ryzen 5 7600"),
            PartRef::new(ComponentType::Ram, "Kingston Fury Beast 16GB DDR4-3200"),
            PartRef::new(ComponentType::Ram, "Corsair Vengeance 16GB DDR5-5600"),
        ];
        assert!(check_compatibility(&parts).is_empty());
    }

    #[test]
    fn test_unmatched_parts_produce_nothing() {
        let parts = vec![
            PartRef::new(ComponentType::Cpu, "Intel Core i5-13400"),
            PartRef::new(ComponentType::Gpu, "AMD Radeon RX 7600"),
        ];
        assert!(check_compatibility(&parts).is_empty());
    }

    #[test]
    fn test_recommended_builds_flag_missing_psu() {
        let builds = generate_build_recommendations("competitive-gamer", 2000);
        let featured = builds.iter().find(|b| b.id == Tier::Featured).unwrap();

        let warnings = check_build(featured);
        assert!(warnings
            .iter()
            .any(|w| w.severity == Severity::Error && w.issue == "Missing PSU"));
        // DDR5 is already paired with the AM5 CPU
        assert!(warnings.iter().all(|w| !w.issue.contains("DDR5")));
    }

    #[test]
    fn test_format_warning() {
        let warning = CompatibilityWarning {
            component: "NVIDIA RTX 4090".to_string(),
            issue: "The RTX 4090 needs at least an 850W power supply".to_string(),
            severity: Severity::Warning,
            suggestions: vec!["Corsair RM850x 850W PSU".to_string(), "Seasonic 1000W".to_string()],
        };

        let rendered = format_warning(&warning);
        assert!(rendered.starts_with("⚠️ The RTX 4090"));
        assert!(rendered.contains("Suggested upgrades:"));
        assert!(rendered.contains("1. Corsair RM850x 850W PSU"));
        assert!(rendered.contains("2. Seasonic 1000W"));

        let bare = CompatibilityWarning {
            suggestions: Vec::new(),
            ..warning
        };
        assert!(!format_warning(&bare).contains("Suggested upgrades"));
    }
}
