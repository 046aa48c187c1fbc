//! Structural checks on a parsed storybook.
//!
//! The engine assumes these hold (sorted captions, a fixed section
//! order) and never re-checks them, so every loader goes through here.

use std::collections::HashSet;

use super::model::{Milestone, Storybook, Theme};
use crate::error::{Result, StoryError};

/// Intro, encounter, and finale are positional; fewer sections cannot host them.
pub const MIN_MILESTONES: usize = 3;

/// Check hard rules and collect soft warnings.
///
/// Errors: too few milestones, duplicate ids, a milestone without images,
/// an empty gallery, negative or non-finite timestamps, captions out of order.
/// Warnings: colours that are not hex, empty caption text, an empty phrase on
/// a section that types it out, settings outside their useful range.
pub fn validate(story: &Storybook) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if story.milestones.len() < MIN_MILESTONES {
        return Err(StoryError::invalid(format!(
            "need at least {MIN_MILESTONES} milestones (intro, encounter, finale), found {}",
            story.milestones.len()
        )));
    }

    if story.gallery.is_empty() {
        return Err(StoryError::invalid("gallery must contain at least one image"));
    }

    let mut seen = HashSet::new();
    for (i, m) in story.milestones.iter().enumerate() {
        if !seen.insert(m.id.as_str()) {
            return Err(StoryError::invalid(format!(
                "duplicate milestone id '{}' at index {i}",
                m.id
            )));
        }
        if m.images.is_empty() {
            return Err(StoryError::invalid(format!(
                "milestone '{}' has no images",
                m.id
            )));
        }
        check_theme(m, &mut warnings);
        if story.layout_at(i).shows_phrase() && m.phrase.trim().is_empty() {
            warnings.push(format!("milestone '{}' has an empty phrase", m.id));
        }
    }

    let mut prev = f64::NEG_INFINITY;
    for (i, line) in story.captions.iter().enumerate() {
        if !line.timestamp.is_finite() || line.timestamp < 0.0 {
            return Err(StoryError::invalid(format!(
                "caption {i} has invalid timestamp {}",
                line.timestamp
            )));
        }
        if line.timestamp < prev {
            return Err(StoryError::invalid(format!(
                "caption {i} at {}s is earlier than the caption before it ({prev}s)",
                line.timestamp
            )));
        }
        if line.text.trim().is_empty() {
            warnings.push(format!("caption {i} at {}s has no text", line.timestamp));
        }
        prev = line.timestamp;
    }

    let s = &story.settings;
    if !(s.reveal_fraction > 0.0) {
        warnings.push(format!(
            "settings.reveal_fraction {} is not positive; captions reveal immediately",
            s.reveal_fraction
        ));
    } else if s.reveal_fraction > 1.0 {
        warnings.push(format!(
            "settings.reveal_fraction {} is above 1; captions never finish typing within their window",
            s.reveal_fraction
        ));
    }
    if !(s.final_window_secs > 0.0) {
        warnings.push(format!(
            "settings.final_window_secs {} is not positive; the last caption reveals immediately",
            s.final_window_secs
        ));
    }
    if s.typewriter_interval_ms == 0 {
        warnings.push("settings.typewriter_interval_ms is 0; phrases appear at once".to_string());
    }
    if s.gallery_interval_ms == Some(0) {
        return Err(StoryError::invalid("settings.gallery_interval_ms must be positive"));
    }

    Ok(warnings)
}

fn check_theme(m: &Milestone, warnings: &mut Vec<String>) {
    let Theme {
        bg,
        accent,
        text,
        wave,
    } = &m.theme;
    for (name, value) in [("bg", bg), ("accent", accent), ("text", text), ("wave", wave)] {
        if !is_hex_color(value) {
            warnings.push(format!(
                "milestone '{}': theme.{name} '{value}' is not a hex colour",
                m.id
            ));
        }
    }
}

/// `#rgb`, `#rgba`, `#rrggbb`, or `#rrggbbaa`.
pub fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}
