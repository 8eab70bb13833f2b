//! Built-in buyer personas
//!
//! Personas back both keyword detection in chat and the persona picker.
//! Detection scans [`DETECTABLE`] in order, so earlier personas win when a
//! message mentions several (e.g. "competitive" beats "casual").

use serde::Serialize;

/// A persona the picker can offer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PersonaProfile {
    pub id: &'static str,
    pub name: &'static str,
    /// Short line for the picker card
    pub tagline: &'static str,
    /// Lowercase substrings that identify this persona in chat
    #[serde(skip)]
    pub keywords: &'static [&'static str],
    /// What the assistant says when it spots this persona
    #[serde(skip)]
    pub pitch: &'static str,
}

pub const COMPETITIVE_GAMER: PersonaProfile = PersonaProfile {
    id: "competitive-gamer",
    name: "Competitive Gamer",
    tagline: "Maximum FPS for esports titles",
    keywords: &[
        "competitive",
        "esports",
        "valorant",
        "counter-strike",
        "cs2",
        "csgo",
        "fortnite",
        "apex",
        "overwatch",
        "high fps",
        "240hz",
        "144hz",
    ],
    pitch: "Sounds like you play to win! For competitive titles every frame counts, so these builds \
            prioritize high refresh rates and low latency.",
};

pub const CASUAL_GAMER: PersonaProfile = PersonaProfile {
    id: "casual-gamer",
    name: "Casual Gamer",
    tagline: "Smooth gaming without overspending",
    keywords: &[
        "casual",
        "minecraft",
        "indie",
        "stardew",
        "sims",
        "light gaming",
        "occasional",
    ],
    pitch: "A relaxed gaming setup it is! You'll get smooth gameplay in popular titles without \
            paying for headroom you won't use.",
};

pub const CONTENT_CREATOR: PersonaProfile = PersonaProfile {
    id: "content-creator",
    name: "Content Creator",
    tagline: "Fast renders and smooth timelines",
    keywords: &[
        "video editing",
        "editing",
        "youtube",
        "premiere",
        "davinci",
        "after effects",
        "content creat",
        "photoshop",
        "render",
    ],
    pitch: "A creator! Rendering and timeline scrubbing love cores and VRAM, so these builds lean \
            into multi-threaded CPUs and plenty of memory.",
};

pub const WORKSTATION: PersonaProfile = PersonaProfile {
    id: "workstation",
    name: "Professional Workstation",
    tagline: "Reliable power for demanding work",
    keywords: &[
        "programming",
        "coding",
        "developer",
        "3d modeling",
        "solidworks",
        "autocad",
        "blender",
        "spreadsheet",
        "office work",
    ],
    pitch: "A workstation build! These prioritize fast compiles, big datasets and stability for \
            long working sessions.",
};

pub const STUDENT: PersonaProfile = PersonaProfile {
    id: "student",
    name: "Student",
    tagline: "Affordable all-rounder for school and fun",
    keywords: &["student", "school", "college", "university", "homework", "dorm"],
    pitch: "Student life! These builds balance price with enough power for coursework and a bit \
            of gaming after class.",
};

pub const AI_ML: PersonaProfile = PersonaProfile {
    id: "ai-ml",
    name: "AI/ML Enthusiast",
    tagline: "VRAM and compute for local models",
    keywords: &[
        "machine learning",
        "deep learning",
        "ai/ml",
        "pytorch",
        "tensorflow",
        "llm",
        "stable diffusion",
        "neural",
    ],
    pitch: "Running models locally? VRAM is king for AI work, so these builds focus on GPU memory \
            and fast storage for datasets.",
};

pub const STREAMER: PersonaProfile = PersonaProfile {
    id: "streamer",
    name: "Streamer",
    tagline: "Game and broadcast at the same time",
    keywords: &["stream", "twitch", "obs", "broadcast"],
    pitch: "Going live! Streaming while gaming needs extra CPU headroom and a GPU with a good \
            hardware encoder.",
};

/// Personas chat detection looks for, in priority order
pub static DETECTABLE: [PersonaProfile; 6] = [
    COMPETITIVE_GAMER,
    CASUAL_GAMER,
    CONTENT_CREATOR,
    WORKSTATION,
    STUDENT,
    AI_ML,
];

/// Every persona the picker offers
pub static ALL: [PersonaProfile; 7] = [
    COMPETITIVE_GAMER,
    CASUAL_GAMER,
    STREAMER,
    CONTENT_CREATOR,
    WORKSTATION,
    STUDENT,
    AI_ML,
];

/// Look up a persona by id
pub fn find(id: &str) -> Option<&'static PersonaProfile> {
    ALL.iter().find(|p| p.id == id)
}
