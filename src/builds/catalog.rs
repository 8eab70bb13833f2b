//! Static parts catalog and build descriptions
//!
//! Kept as plain data so the selection rule (tier × bucket → parts) can be
//! read straight off the tables.

use std::collections::BTreeMap;

use super::ComponentType::{Cpu, Gpu, Ram, Storage};
use super::{Component, ComponentType, Tier};

/// Personas grouped by the parts they share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Gaming,
    Creator,
    /// Only has its own parts list in the featured tier
    Ai,
    Default,
}

impl Bucket {
    pub fn for_persona(persona_id: &str) -> Self {
        match persona_id {
            "competitive-gamer" | "casual-gamer" | "streamer" => Self::Gaming,
            "content-creator" => Self::Creator,
            "ai-ml" => Self::Ai,
            _ => Self::Default,
        }
    }
}

/// Picks the parts for one tier. Implementations may ignore the budget.
pub trait ComponentSelector {
    fn select(&self, tier: Tier, persona_id: &str, tier_budget: u64) -> Vec<Component>;
}

/// Selects from the built-in parts table
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSelector;

impl ComponentSelector for CatalogSelector {
    fn select(&self, tier: Tier, persona_id: &str, _tier_budget: u64) -> Vec<Component> {
        let bucket = Bucket::for_persona(persona_id);
        let parts = PARTS
            .iter()
            .find(|entry| entry.tier == tier && entry.bucket == bucket)
            .or_else(|| {
                PARTS
                    .iter()
                    .find(|entry| entry.tier == tier && entry.bucket == Bucket::Default)
            })
            .map_or(&[][..], |entry| &entry.parts[..]);

        parts.iter().map(PartSpec::to_component).collect()
    }
}

struct PartSpec {
    component_type: ComponentType,
    name: &'static str,
    brand: &'static str,
    price: u64,
    specs: &'static [(&'static str, &'static str)],
}

impl PartSpec {
    fn to_component(&self) -> Component {
        Component {
            component_type: self.component_type,
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            price: self.price,
            specs: self
                .specs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

struct PartsEntry {
    tier: Tier,
    bucket: Bucket,
    parts: [PartSpec; 4],
}

const fn part(
    component_type: ComponentType,
    name: &'static str,
    brand: &'static str,
    price: u64,
    specs: &'static [(&'static str, &'static str)],
) -> PartSpec {
    PartSpec {
        component_type,
        name,
        brand,
        price,
        specs,
    }
}

static PARTS: [PartsEntry; 10] = [
    // Optimized
    PartsEntry {
        tier: Tier::Optimized,
        bucket: Bucket::Gaming,
        parts: [
            part(Cpu, "AMD Ryzen 5 7600", "AMD", 199, &[("cores", "6"), ("boost", "5.1 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4060", "NVIDIA", 299, &[("vram", "8GB GDDR6"), ("tdp", "115W")]),
            part(Ram, "Corsair Vengeance 16GB DDR5-5600", "Corsair", 59, &[("capacity", "16GB"), ("speed", "5600 MT/s")]),
            part(Storage, "WD Black SN770 1TB NVMe", "Western Digital", 69, &[("capacity", "1TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Optimized,
        bucket: Bucket::Creator,
        parts: [
            part(Cpu, "AMD Ryzen 7 7700", "AMD", 289, &[("cores", "8"), ("boost", "5.3 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4060 Ti 16GB", "NVIDIA", 449, &[("vram", "16GB GDDR6"), ("tdp", "165W")]),
            part(Ram, "G.Skill Flare X5 32GB DDR5-6000", "G.Skill", 109, &[("capacity", "32GB"), ("speed", "6000 MT/s")]),
            part(Storage, "Samsung 990 EVO 2TB NVMe", "Samsung", 149, &[("capacity", "2TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Optimized,
        bucket: Bucket::Default,
        parts: [
            part(Cpu, "Intel Core i5-13400", "Intel", 199, &[("cores", "10"), ("boost", "4.6 GHz"), ("socket", "LGA1700")]),
            part(Gpu, "AMD Radeon RX 7600", "AMD", 259, &[("vram", "8GB GDDR6"), ("tdp", "165W")]),
            part(Ram, "Kingston Fury Beast 16GB DDR4-3200", "Kingston", 39, &[("capacity", "16GB"), ("speed", "3200 MT/s")]),
            part(Storage, "Crucial P3 1TB NVMe", "Crucial", 59, &[("capacity", "1TB"), ("interface", "PCIe 3.0")]),
        ],
    },
    // Performance
    PartsEntry {
        tier: Tier::Performance,
        bucket: Bucket::Gaming,
        parts: [
            part(Cpu, "AMD Ryzen 7 7800X3D", "AMD", 449, &[("cores", "8"), ("boost", "5.0 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4070 Super", "NVIDIA", 599, &[("vram", "12GB GDDR6X"), ("tdp", "220W")]),
            part(Ram, "G.Skill Trident Z5 32GB DDR5-6000", "G.Skill", 119, &[("capacity", "32GB"), ("speed", "6000 MT/s")]),
            part(Storage, "Samsung 990 Pro 2TB NVMe", "Samsung", 179, &[("capacity", "2TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Performance,
        bucket: Bucket::Creator,
        parts: [
            part(Cpu, "AMD Ryzen 9 7900X", "AMD", 399, &[("cores", "12"), ("boost", "5.6 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4070 Ti Super", "NVIDIA", 799, &[("vram", "16GB GDDR6X"), ("tdp", "285W")]),
            part(Ram, "Corsair Vengeance 64GB DDR5-6000", "Corsair", 199, &[("capacity", "64GB"), ("speed", "6000 MT/s")]),
            part(Storage, "Samsung 990 Pro 2TB NVMe", "Samsung", 179, &[("capacity", "2TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Performance,
        bucket: Bucket::Default,
        parts: [
            part(Cpu, "Intel Core i7-14700K", "Intel", 399, &[("cores", "20"), ("boost", "5.6 GHz"), ("socket", "LGA1700")]),
            part(Gpu, "NVIDIA RTX 4070", "NVIDIA", 549, &[("vram", "12GB GDDR6X"), ("tdp", "200W")]),
            part(Ram, "Corsair Vengeance 32GB DDR5-5600", "Corsair", 99, &[("capacity", "32GB"), ("speed", "5600 MT/s")]),
            part(Storage, "WD Black SN850X 1TB NVMe", "Western Digital", 99, &[("capacity", "1TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    // Featured
    PartsEntry {
        tier: Tier::Featured,
        bucket: Bucket::Gaming,
        parts: [
            part(Cpu, "AMD Ryzen 9 7950X3D", "AMD", 649, &[("cores", "16"), ("boost", "5.7 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4090", "NVIDIA", 1799, &[("vram", "24GB GDDR6X"), ("tdp", "450W")]),
            part(Ram, "G.Skill Trident Z5 RGB 32GB DDR5-6400", "G.Skill", 149, &[("capacity", "32GB"), ("speed", "6400 MT/s")]),
            part(Storage, "Samsung 990 Pro 4TB NVMe", "Samsung", 319, &[("capacity", "4TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Featured,
        bucket: Bucket::Creator,
        parts: [
            part(Cpu, "AMD Ryzen 9 7950X", "AMD", 549, &[("cores", "16"), ("boost", "5.7 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4080 Super", "NVIDIA", 999, &[("vram", "16GB GDDR6X"), ("tdp", "320W")]),
            part(Ram, "Corsair Dominator 96GB DDR5-6000", "Corsair", 329, &[("capacity", "96GB"), ("speed", "6000 MT/s")]),
            part(Storage, "Samsung 990 Pro 4TB NVMe", "Samsung", 319, &[("capacity", "4TB"), ("interface", "PCIe 4.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Featured,
        bucket: Bucket::Ai,
        parts: [
            part(Cpu, "AMD Ryzen 9 7950X", "AMD", 549, &[("cores", "16"), ("boost", "5.7 GHz"), ("socket", "AM5")]),
            part(Gpu, "NVIDIA RTX 4090", "NVIDIA", 1799, &[("vram", "24GB GDDR6X"), ("tdp", "450W")]),
            part(Ram, "G.Skill Trident Z5 128GB DDR5-5600", "G.Skill", 399, &[("capacity", "128GB"), ("speed", "5600 MT/s")]),
            part(Storage, "Crucial T700 4TB NVMe", "Crucial", 449, &[("capacity", "4TB"), ("interface", "PCIe 5.0")]),
        ],
    },
    PartsEntry {
        tier: Tier::Featured,
        bucket: Bucket::Default,
        parts: [
            part(Cpu, "Intel Core i9-14900K", "Intel", 549, &[("cores", "24"), ("boost", "6.0 GHz"), ("socket", "LGA1700")]),
            part(Gpu, "NVIDIA RTX 4080 Super", "NVIDIA", 999, &[("vram", "16GB GDDR6X"), ("tdp", "320W")]),
            part(Ram, "Corsair Vengeance 64GB DDR5-6400", "Corsair", 219, &[("capacity", "64GB"), ("speed", "6400 MT/s")]),
            part(Storage, "WD Black SN850X 2TB NVMe", "Western Digital", 159, &[("capacity", "2TB"), ("interface", "PCIe 4.0")]),
        ],
    },
];

/// Copy for each tier of a persona's builds
pub struct TierDescriptions {
    pub optimized: &'static str,
    pub performance: &'static str,
    pub featured: &'static str,
}

const FALLBACK_DESCRIPTIONS: &str = "competitive-gamer";

static DESCRIPTIONS: [(&str, TierDescriptions); 7] = [
    (
        "competitive-gamer",
        TierDescriptions {
            optimized: "High refresh rate 1080p esports performance at a sensible price.",
            performance: "Top-tier frame rates at 1440p with the best gaming CPU around.",
            featured: "No-compromise 4K and 360Hz performance for serious competitors.",
        },
    ),
    (
        "casual-gamer",
        TierDescriptions {
            optimized: "Smooth 1080p gaming for popular titles without overspending.",
            performance: "Great 1440p visuals with room for the next few years of releases.",
            featured: "Maxed-out settings in everything, just because you can.",
        },
    ),
    (
        "streamer",
        TierDescriptions {
            optimized: "Game and stream at 1080p with hardware encoding doing the heavy lifting.",
            performance: "Clean 1440p streams while keeping in-game frame rates high.",
            featured: "Broadcast-quality 4K streaming with headroom for overlays and capture.",
        },
    ),
    (
        "content-creator",
        TierDescriptions {
            optimized: "Capable 1080p and light 4K editing with plenty of memory.",
            performance: "Fast 4K timelines and quick exports for regular creators.",
            featured: "Studio-class rendering power for 8K footage and heavy effects.",
        },
    ),
    (
        "workstation",
        TierDescriptions {
            optimized: "Reliable everyday productivity and fast compiles.",
            performance: "Serious multi-threaded throughput for development and CAD.",
            featured: "Flagship workstation power for simulation and large datasets.",
        },
    ),
    (
        "student",
        TierDescriptions {
            optimized: "Affordable all-rounder for coursework with some gaming on the side.",
            performance: "Handles demanding coursework software and modern games.",
            featured: "A machine that lasts well beyond graduation.",
        },
    ),
    (
        "ai-ml",
        TierDescriptions {
            optimized: "Entry point for local inference and small model experiments.",
            performance: "Comfortable fine-tuning of small models and fast inference.",
            featured: "24GB of VRAM and 128GB of memory for serious local AI work.",
        },
    ),
];

/// Descriptions for an exact persona id, falling back to the competitive
/// gamer copy for unknown ids.
pub fn descriptions_for(persona_id: &str) -> &'static TierDescriptions {
    DESCRIPTIONS
        .iter()
        .find(|(id, _)| *id == persona_id)
        .or_else(|| DESCRIPTIONS.iter().find(|(id, _)| *id == FALLBACK_DESCRIPTIONS))
        .map(|(_, descriptions)| descriptions)
        .unwrap_or(&DESCRIPTIONS[0].1)
}
