//! Storybook configuration types. Loaded once, immutable afterwards.

use serde::{Deserialize, Serialize};

/// Narrative stage a milestone belongs to. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Inicio,
    Encuentro,
    Crecimiento,
    #[serde(rename = "Consolidación", alias = "Consolidacion")]
    Consolidacion,
    Presente,
    Futuro,
}

impl Stage {
    /// Display label, as shown in the navigation rail.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Inicio => "Inicio",
            Stage::Encuentro => "Encuentro",
            Stage::Crecimiento => "Crecimiento",
            Stage::Consolidacion => "Consolidación",
            Stage::Presente => "Presente",
            Stage::Futuro => "Futuro",
        }
    }
}

/// Colours applied while a milestone is the active section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub bg: String,
    pub accent: String,
    pub text: String,
    pub wave: String,
}

/// One narrative section of the story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MilestoneDef")]
pub struct Milestone {
    pub id: String,
    pub stage: Stage,
    pub date: String,
    pub title: String,
    pub description: String,
    pub phrase: String,
    pub images: Vec<String>,
    pub theme: Theme,
}

impl Milestone {
    /// The lead image, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Wire shape of a milestone: accepts `images: [...]` and/or a single `imageUrl`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MilestoneDef {
    id: String,
    stage: Stage,
    #[serde(default)]
    date: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    phrase: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    image_url: Option<String>,
    theme: Theme,
}

impl From<MilestoneDef> for Milestone {
    fn from(def: MilestoneDef) -> Self {
        let mut images = def.images;
        if let Some(url) = def.image_url {
            if !images.contains(&url) {
                images.insert(0, url);
            }
        }
        Self {
            id: def.id,
            stage: def.stage,
            date: def.date,
            title: def.title,
            description: def.description,
            phrase: def.phrase,
            images,
            theme: def.theme,
        }
    }
}

/// One timed lyric entry. `timestamp` is seconds from playback start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    pub timestamp: f64,
}

impl CaptionLine {
    pub fn new(text: impl Into<String>, timestamp: f64) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

/// Background track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub url: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub song: String,
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,
}

/// Text on the closed book cover and the inside of the cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default = "default_cover_hint")]
    pub hint: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub dedication: String,
}

impl Default for Cover {
    fn default() -> Self {
        Self {
            hint: default_cover_hint(),
            year: String::new(),
            dedication: String::new(),
        }
    }
}

/// Zoom layers of the encounter map. The final layer is always the
/// encounter milestone's own cover image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    #[serde(default)]
    pub space_image: Option<String>,
    #[serde(default)]
    pub region_image: Option<String>,
    #[serde(default)]
    pub caption: String,
}

/// Tunables with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fraction of a caption's window by which its text is fully typed.
    pub reveal_fraction: f64,
    /// Window length given to the final caption line.
    pub final_window_secs: f64,
    /// Per-character cadence of the phrase typewriter.
    pub typewriter_interval_ms: u64,
    /// Auto-advance period of the intro gallery; `None` means click-only.
    pub gallery_interval_ms: Option<u64>,
    pub lang: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_fraction: 0.8,
            final_window_secs: 5.0,
            typewriter_interval_ms: 60,
            gallery_interval_ms: None,
            lang: "es".to_string(),
        }
    }
}

/// The whole story: static configuration consumed by the engine and the page runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storybook {
    pub title: String,
    pub audio: Audio,
    pub gallery: Vec<String>,
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub captions: Vec<CaptionLine>,
    #[serde(default)]
    pub cover: Cover,
    #[serde(default)]
    pub encounter: EncounterConfig,
    #[serde(default)]
    pub settings: Settings,
}

/// Which arrangement a section renders with. Decided purely by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Intro,
    Encounter,
    Memory,
    Finale,
}

impl Layout {
    /// Layout of section `index` in a story of `count` sections.
    ///
    /// The finale check comes after intro/encounter so that a story with
    /// exactly those two sections never loses its opening.
    pub fn at(index: usize, count: usize) -> Layout {
        match index {
            0 => Layout::Intro,
            1 => Layout::Encounter,
            i if i + 1 == count => Layout::Finale,
            _ => Layout::Memory,
        }
    }

    /// Whether the per-section phrase typewriter belongs to this layout.
    pub fn shows_phrase(self) -> bool {
        matches!(self, Layout::Memory | Layout::Finale)
    }
}

impl Storybook {
    pub fn layout_at(&self, index: usize) -> Layout {
        Layout::at(index, self.milestones.len())
    }

    /// Theme of section `index`, falling back to the first section's theme.
    pub fn theme_at(&self, index: usize) -> Option<&Theme> {
        self.milestones
            .get(index)
            .or_else(|| self.milestones.first())
            .map(|m| &m.theme)
    }
}

fn default_true() -> bool {
    true
}

fn default_cover_hint() -> String {
    "Toca la mariposa para descubrir".to_string()
}
