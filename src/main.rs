use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use storybook::engine::caption::{active_caption, caption_windows, CaptionTiming};
use storybook::engine::section::active_section;
use storybook::runtime::{format_time, PageOptions};
use storybook::story;

#[derive(Parser)]
#[command(name = "storybook", version)]
#[command(about = "Compile a milestone/caption story into a scroll-driven page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a storybook JSON file to a self-contained HTML page
    Build {
        /// Input storybook JSON file
        file: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short)]
        o: Option<PathBuf>,

        /// Strict mode: treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate a storybook file without producing output
    Check {
        /// Input storybook JSON file
        file: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Serve the page with reload-on-change
    Dev {
        /// Input storybook JSON file
        file: PathBuf,

        /// Server port
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },

    /// Show the caption active at a playback time
    Caption {
        /// Input storybook JSON file
        file: PathBuf,

        /// Playback clock in seconds
        #[arg(long, allow_negative_numbers = true)]
        at: f64,
    },

    /// Compute the active section for a scroll offset
    Section {
        /// Scroll offset in pixels
        #[arg(long, allow_negative_numbers = true)]
        offset: f64,

        /// Viewport height in pixels
        #[arg(long)]
        viewport: f64,

        /// Number of sections
        #[arg(long)]
        count: usize,
    },

    /// Print every caption's display and reveal window
    Timeline {
        /// Input storybook JSON file
        file: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// Load a storybook, printing its warnings to stderr.
fn load(file: &Path) -> anyhow::Result<story::Storybook> {
    let loaded = story::load(file)?;
    for w in &loaded.warnings {
        eprintln!("warning: {w}");
    }
    Ok(loaded.storybook)
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Build { file, o, strict } => {
            let out = storybook::compile_file(&file, strict, &PageOptions::default())?;
            for w in &out.warnings {
                eprintln!("warning: {w}");
            }
            match o {
                Some(out_path) => {
                    fs::write(&out_path, &out.html)
                        .with_context(|| format!("cannot write '{}'", out_path.display()))?;
                    eprintln!(
                        "wrote HTML to {} ({} bytes)",
                        out_path.display(),
                        out.html.len()
                    );
                }
                None => print!("{}", out.html),
            }
        }

        Commands::Check { file, strict } => {
            let loaded = story::load(&file)?;
            for w in &loaded.warnings {
                eprintln!("warning: {w}");
            }
            let warning_count = loaded.warnings.len();
            if strict && warning_count > 0 {
                loaded.into_strict()?;
            } else if warning_count > 0 {
                eprintln!("{}: {} warning(s)", file.display(), warning_count);
            } else {
                eprintln!("{}: ok", file.display());
            }
        }

        Commands::Dev { file, port } => {
            if !file.is_file() {
                bail!("'{}' is not a file", file.display());
            }
            storybook::server::run_dev_server(file, port)
                .map_err(|e| anyhow::anyhow!("dev server failed: {e}"))?;
        }

        Commands::Caption { file, at } => {
            let book = load(&file)?;
            let frame = active_caption(at, &book.captions, CaptionTiming::from(&book.settings));
            println!("{}\t{}", frame.index_or_minus_one(), frame.revealed);
        }

        Commands::Section {
            offset,
            viewport,
            count,
        } => {
            println!("{}", active_section(offset, viewport, count));
        }

        Commands::Timeline { file } => {
            let book = load(&file)?;
            let windows = caption_windows(&book.captions, CaptionTiming::from(&book.settings));
            for (w, line) in windows.iter().zip(&book.captions) {
                println!(
                    "{:>3}  {:>8} - {:>8}  typed by {:>8}  {}",
                    w.index,
                    format_time(w.start),
                    format_time(w.end),
                    format_time(w.reveal_end),
                    line.text
                );
            }
        }
    }
    Ok(())
}
