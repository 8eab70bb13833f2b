//! Tiered build recommendations
//!
//! Every request yields three builds (optimized, performance, featured).
//! Parts come from a fixed catalog keyed by tier and persona bucket; the
//! numeric tier budget is computed and handed to the selector, but the
//! current catalog does not use it, so a build's price is simply the sum of
//! its parts and may land outside its tier budget.

pub mod catalog;
pub mod compatibility;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use catalog::{CatalogSelector, ComponentSelector};
pub use compatibility::{check_build, check_compatibility, format_warning, CompatibilityWarning, PartRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "RAM")]
    Ram,
    Storage,
    Motherboard,
    #[serde(rename = "PSU")]
    Psu,
    Case,
    Cooling,
}

impl ComponentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Ram => "RAM",
            Self::Storage => "Storage",
            Self::Motherboard => "Motherboard",
            Self::Psu => "PSU",
            Self::Case => "Case",
            Self::Cooling => "Cooling",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A catalog part. Immutable at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub name: String,
    pub brand: String,
    /// Whole USD
    pub price: u64,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Optimized,
    Performance,
    Featured,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Optimized, Tier::Performance, Tier::Featured];

    pub fn title(self) -> &'static str {
        match self {
            Self::Optimized => "Optimized Build",
            Self::Performance => "Performance Build",
            Self::Featured => "Featured Build",
        }
    }

    /// Share of the user's budget this tier aims at
    pub fn budget_factor(self) -> f64 {
        match self {
            Self::Optimized => 0.9,
            Self::Performance => 1.0,
            Self::Featured => 1.25,
        }
    }

    pub fn budget_for(self, budget: u64) -> u64 {
        (budget as f64 * self.budget_factor()).round() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: Tier,
    pub title: String,
    /// Sum of component prices
    pub price: u64,
    pub description: String,
    pub components: Vec<Component>,
}

impl Build {
    fn assemble(tier: Tier, description: &str, components: Vec<Component>) -> Self {
        Self {
            id: tier,
            title: tier.title().to_string(),
            price: components.iter().map(|c| c.price).sum(),
            description: description.to_string(),
            components,
        }
    }
}

/// A build together with its compatibility findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedBuild {
    #[serde(flatten)]
    pub build: Build,
    pub warnings: Vec<CompatibilityWarning>,
}

/// Generate the three builds and run the compatibility checker on each
pub fn recommend(persona_id: &str, budget: u64) -> Vec<RecommendedBuild> {
    generate_build_recommendations(persona_id, budget)
        .into_iter()
        .map(|build| RecommendedBuild {
            warnings: check_build(&build),
            build,
        })
        .collect()
}

/// Three builds for the persona, in optimized, performance, featured order
pub fn generate_build_recommendations(persona_id: &str, budget: u64) -> [Build; 3] {
    generate_with(&CatalogSelector, persona_id, budget)
}

/// [`generate_build_recommendations`] with a custom parts selector
pub fn generate_with<S: ComponentSelector + ?Sized>(selector: &S, persona_id: &str, budget: u64) -> [Build; 3] {
    let descriptions = catalog::descriptions_for(persona_id);

    let builds = Tier::ALL.map(|tier| {
        let tier_budget = tier.budget_for(budget);
        let components = selector.select(tier, persona_id, tier_budget);
        let description = match tier {
            Tier::Optimized => descriptions.optimized,
            Tier::Performance => descriptions.performance,
            Tier::Featured => descriptions.featured,
        };
        Build::assemble(tier, description, components)
    });

    tracing::debug!(
        persona_id,
        budget,
        prices = ?builds.iter().map(|b| b.price).collect::<Vec<_>>(),
        "Generated build recommendations"
    );

    builds
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    #[test]
    fn test_three_builds_in_order() {
        let builds = generate_build_recommendations("competitive-gamer", 2000);

        let titles: Vec<_> = builds.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Optimized Build", "Performance Build", "Featured Build"]);

        let ids: Vec<_> = builds.iter().map(|b| b.id).collect();
        assert_eq!(ids, Tier::ALL);
    }

    #[test]
    fn test_price_is_sum_of_components() {
        for persona in ["competitive-gamer", "content-creator", "ai-ml", "student", "unknown"] {
            for build in generate_build_recommendations(persona, 1500) {
                let sum: u64 = build.components.iter().map(|c| c.price).sum();
                assert_eq!(build.price, sum, "{persona} {:?}", build.id);
            }
        }
    }

    #[test]
    fn test_each_build_has_core_four() {
        let expected: BTreeSet<_> = [
            ComponentType::Cpu,
            ComponentType::Gpu,
            ComponentType::Ram,
            ComponentType::Storage,
        ]
        .into_iter()
        .collect();

        for build in generate_build_recommendations("competitive-gamer", 2000) {
            assert_eq!(build.components.len(), 4);
            let types: BTreeSet<_> = build.components.iter().map(|c| c.component_type).collect();
            assert_eq!(types, expected);
        }
    }

    #[test]
    fn test_budget_does_not_change_parts() {
        let low = generate_build_recommendations("casual-gamer", 500);
        let high = generate_build_recommendations("casual-gamer", 10_000);
        assert_eq!(low, high);
    }

    #[test]
    fn test_tier_budgets() {
        assert_eq!(Tier::Optimized.budget_for(2000), 1800);
        assert_eq!(Tier::Performance.budget_for(2000), 2000);
        assert_eq!(Tier::Featured.budget_for(2000), 2500);
        assert_eq!(Tier::Optimized.budget_for(1001), 901);
    }

    #[test]
    fn test_selector_receives_tier_budgets() {
        struct Recording(std::sync::Mutex<Vec<(Tier, u64)>>);

        impl ComponentSelector for Recording {
            fn select(&self, tier: Tier, persona_id: &str, tier_budget: u64) -> Vec<Component> {
                self.0.lock().unwrap().push((tier, tier_budget));
                CatalogSelector.select(tier, persona_id, tier_budget)
            }
        }

        let selector = Recording(std::sync::Mutex::new(Vec::new()));
        generate_with(&selector, "student", 1000);

        assert_eq!(
            *selector.0.lock().unwrap(),
            vec![(Tier::Optimized, 900), (Tier::Performance, 1000), (Tier::Featured, 1250)]
        );
    }

    #[test]
    fn test_unknown_persona_falls_back() {
        let unknown = generate_build_recommendations("someone-new", 1500);
        let gamer = generate_build_recommendations("competitive-gamer", 1500);
        let workstation = generate_build_recommendations("workstation", 1500);

        // default parts, gamer descriptions
        for i in 0..3 {
            assert_eq!(unknown[i].components, workstation[i].components);
            assert_eq!(unknown[i].description, gamer[i].description);
        }
    }

    #[test]
    fn test_recommend_attaches_warnings() {
        let recommended = recommend("competitive-gamer", 2000);
        assert_eq!(recommended.len(), 3);

        // builds carry no PSU, so the RTX 4090 rule reports it missing
        let featured = &recommended[2];
        assert_eq!(featured.build.id, Tier::Featured);
        assert!(featured.warnings.iter().any(|w| w.issue == "Missing PSU"));

        let json = serde_json::to_value(featured).unwrap();
        assert_eq!(json["id"], "featured");
        assert_eq!(json["title"], "Featured Build");
        assert!(json["warnings"].is_array());
    }

    #[test]
    fn test_component_type_wire_names() {
        let json = serde_json::to_value(ComponentType::Psu).unwrap();
        assert_eq!(json, "PSU");
        let parsed: ComponentType = serde_json::from_str("\"Storage\"").unwrap();
        assert_eq!(parsed, ComponentType::Storage);
    }
}
