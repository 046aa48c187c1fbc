//! Storybook configuration: data model, loading, and validation.
//!
//! - `model` — milestones, captions, themes, settings
//! - `validate` — structural rules and warnings

mod model;
mod validate;

#[cfg(test)]
pub(crate) mod testing;

use std::fs;
use std::path::Path;

pub use model::{
    Audio, CaptionLine, Cover, EncounterConfig, Layout, Milestone, Settings, Stage, Storybook,
    Theme,
};
pub use validate::{is_hex_color, validate, MIN_MILESTONES};

use crate::error::{Result, StoryError};

/// A storybook that passed validation, with any soft warnings.
#[derive(Debug, Clone)]
pub struct LoadedStory {
    pub storybook: Storybook,
    pub warnings: Vec<String>,
}

impl LoadedStory {
    /// Promote the first warning to an error.
    pub fn into_strict(self) -> Result<Storybook> {
        match self.warnings.into_iter().next() {
            Some(w) => Err(StoryError::strict(w)),
            None => Ok(self.storybook),
        }
    }
}

/// Parse and validate a storybook from JSON text.
pub fn parse(source: &str) -> Result<LoadedStory> {
    let storybook: Storybook = serde_json::from_str(source)?;
    let warnings = validate(&storybook)?;
    log::debug!(
        "parsed storybook '{}': {} milestones, {} captions",
        storybook.title,
        storybook.milestones.len(),
        storybook.captions.len()
    );
    Ok(LoadedStory {
        storybook,
        warnings,
    })
}

/// Read, parse, and validate a storybook file.
pub fn load(path: &Path) -> Result<LoadedStory> {
    let source = fs::read_to_string(path).map_err(|e| StoryError::from(e).with_path(path))?;
    parse(&source).map_err(|e| e.with_path(path))
}
