//! Generates the self-contained storybook page. No external assets beyond
//! the images and audio the storybook references.
//!
//! This module is split into:
//! - `html` — page skeleton and per-layout section markup
//! - `script` — inline runtime (scroll tracking, caption sync, timers)
//! - `css` — static stylesheet driven by theme variables
//! - `helpers` — escaping and formatting shared by the generators

mod css;
pub(crate) mod helpers;
mod html;
mod script;

pub(crate) use script::DEV_RELOAD_JS;

pub use helpers::format_time;
pub use html::{render_page, PageOptions};
