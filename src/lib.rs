pub mod engine;
pub mod error;
pub mod runtime;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod story;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::path::Path;

use error::Result;
use runtime::PageOptions;
use story::{LoadedStory, Storybook};

/// A rendered page plus the validation warnings of its storybook.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub html: String,
    pub warnings: Vec<String>,
    pub storybook: Storybook,
}

fn render(loaded: LoadedStory, strict: bool, options: &PageOptions) -> Result<CompileOutput> {
    let (storybook, warnings) = if strict {
        (loaded.into_strict()?, Vec::new())
    } else {
        (loaded.storybook, loaded.warnings)
    };
    let html = runtime::render_page(&storybook, options)?;
    Ok(CompileOutput {
        html,
        warnings,
        storybook,
    })
}

/// Compile storybook JSON text to a self-contained HTML page.
pub fn compile_page(source: &str) -> Result<String> {
    compile(source, false, &PageOptions::default()).map(|out| out.html)
}

/// Compile storybook JSON text, keeping warnings. With `strict`, the first
/// warning fails the compile.
pub fn compile(source: &str, strict: bool, options: &PageOptions) -> Result<CompileOutput> {
    render(story::parse(source)?, strict, options)
}

/// Compile a storybook file. Errors carry the file path.
pub fn compile_file(path: &Path, strict: bool, options: &PageOptions) -> Result<CompileOutput> {
    render(story::load(path)?, strict, options).map_err(|e| e.with_path(path))
}
