//! Full-page HTML generation. Produces a single self-contained file with
//! the stylesheet, markup for every section, and the inline runtime.

use super::css::{encounter_css, STORY_CSS};
use super::helpers::html_escape;
use super::script::generate_script;
use crate::error::Result;
use crate::story::{is_hex_color, Layout, Milestone, Storybook};

/// Knobs for page generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    /// Poll the dev server's revision endpoint and reload on change.
    pub dev_reload: bool,
}

const BUTTERFLY_SVG: &str = r#"<svg class="butterfly" viewBox="0 0 100 100" role="button" aria-label="Abrir"><path d="M50 50 C30 10 5 20 15 45 C20 55 35 55 50 50 Z M50 50 C70 10 95 20 85 45 C80 55 65 55 50 50 Z M50 50 C35 60 20 85 35 85 C45 85 48 65 50 50 Z M50 50 C65 60 80 85 65 85 C55 85 52 65 50 50 Z"/></svg>"#;

/// Render the complete page for a validated storybook.
pub fn render_page(story: &Storybook, options: &PageOptions) -> Result<String> {
    let title = html_escape(&story.title);
    let lang = html_escape(&story.settings.lang);
    let script = generate_script(story, options.dev_reload)?;

    let nav = story
        .milestones
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let active = if i == 0 { " class=\"active\"" } else { "" };
            format!(
                r#"<button{active} aria-label="{label}"><span class="dot"></span><span class="label">{label}</span></button>"#,
                label = html_escape(m.stage.label()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    let count = story.milestones.len();
    let sections = story
        .milestones
        .iter()
        .enumerate()
        .map(|(i, m)| render_section(story, i, m, Layout::at(i, count)))
        .collect::<Vec<_>>()
        .join("\n");

    let looping = if story.audio.looping { " loop" } else { "" };
    let encounter_css = encounter_css();

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{STORY_CSS}{encounter_css}</style>
</head>
<body>
<main id="story">
  <div id="glow"></div>
  <div id="paper"></div>
  <div id="waves"></div>
  <nav id="nav">
    {nav}
  </nav>
  <div id="player">
    <div class="meta"><span class="artist">{artist}</span><span class="song">{song}</span></div>
    <button id="play" aria-label="Play">&#9654;</button>
    <audio id="audio" src="{audio_url}" preload="auto"{looping}></audio>
  </div>
  <div id="caption" hidden>
    <div class="card">
      <span class="kicker">Nuestra canción</span>
      <p id="caption-text" class="handwriting"></p>
    </div>
  </div>
{sections}
</main>
<script>
{script}
</script>
</body>
</html>
"##,
        artist = html_escape(&story.audio.artist),
        song = html_escape(&story.audio.song),
        audio_url = html_escape(&story.audio.url),
    ))
}

fn render_section(story: &Storybook, index: usize, m: &Milestone, layout: Layout) -> String {
    let body = match layout {
        Layout::Intro => render_intro(story, m),
        Layout::Encounter => render_encounter(story, m),
        Layout::Memory => render_memory(m, index % 2 == 1),
        Layout::Finale => render_finale(m),
    };
    let state = if index == 0 { "page-active" } else { "page-hidden" };
    // anything but a hex colour could smuggle extra declarations into the style
    let style = if is_hex_color(&m.theme.accent) {
        format!(r#" style="--section-accent: {}""#, m.theme.accent)
    } else {
        String::new()
    };
    format!(
        r#"<section id="{id}" class="{state}" data-index="{index}"{style}>
  <div class="page-content">
{body}
  </div>
</section>"#,
        id = html_escape(&m.id),
    )
}

fn phrase_block() -> &'static str {
    r#"<div class="phrase handwriting"><span class="phrase-text"></span><span class="cursor"></span></div>"#
}

fn render_intro(story: &Storybook, m: &Milestone) -> String {
    let first = story.gallery.first().map(String::as_str).unwrap_or_default();
    format!(
        r#"    <div class="book">
      <div class="cover">
        <div class="front">
          <h1 class="handwriting">{title}</h1>
          <div class="butterflies">{BUTTERFLY_SVG}{BUTTERFLY_SVG}</div>
          <p class="hint">{hint}</p>
          <p class="year">{year}</p>
        </div>
        <div class="back"><p class="handwriting">{dedication}</p></div>
      </div>
      <div class="inside">
        <div class="gallery"><img id="gallery-img" src="{first}" alt=""></div>
        <div class="intro-text">
          <span class="stage-label">{stage}</span>
          <h2>{heading}</h2>
          <p>{description}</p>
        </div>
      </div>
    </div>"#,
        title = html_escape(&story.title),
        hint = html_escape(&story.cover.hint),
        year = html_escape(&story.cover.year),
        dedication = html_escape(&story.cover.dedication),
        first = html_escape(first),
        stage = html_escape(m.stage.label()),
        heading = html_escape(&m.title),
        description = html_escape(&m.description),
    )
}

fn render_encounter(story: &Storybook, m: &Milestone) -> String {
    let layer = |class: &str, src: Option<&str>| match src {
        Some(src) => format!(
            r#"<div class="layer {class}"><img src="{}" alt=""></div>"#,
            html_escape(src)
        ),
        None => format!(r#"<div class="layer {class}"></div>"#),
    };
    let caption = if story.encounter.caption.is_empty() {
        &m.title
    } else {
        &story.encounter.caption
    };
    format!(
        r#"    <div class="encounter">
      <div class="map">
        {space}
        {region}
        {meeting}
        <p class="map-caption handwriting">{caption}</p>
      </div>
      <div class="body">
        <span class="stage-label">{stage}</span>
        <p class="date">{date}</p>
        <h2>{title}</h2>
        <p>{description}</p>
      </div>
    </div>"#,
        space = layer("space", story.encounter.space_image.as_deref()),
        region = layer("region", story.encounter.region_image.as_deref()),
        meeting = layer("meeting", m.cover_image()),
        caption = html_escape(caption),
        stage = html_escape(m.stage.label()),
        date = html_escape(&m.date),
        title = html_escape(&m.title),
        description = html_escape(&m.description),
    )
}

fn render_memory(m: &Milestone, reverse: bool) -> String {
    let class = if reverse { "memory reverse" } else { "memory" };
    let photo = m.cover_image().map(html_escape).unwrap_or_default();
    format!(
        r#"    <div class="{class}">
      <div class="photo"><img src="{photo}" alt="{title}"></div>
      <div class="body">
        <span class="stage-label">{stage}</span>
        <p class="date">{date}</p>
        <h2>{title}</h2>
        <p>{description}</p>
        {phrase}
      </div>
    </div>"#,
        title = html_escape(&m.title),
        stage = html_escape(m.stage.label()),
        date = html_escape(&m.date),
        description = html_escape(&m.description),
        phrase = phrase_block(),
    )
}

fn render_finale(m: &Milestone) -> String {
    format!(
        r#"    <div class="finale">
      <span class="stage-label">{stage}</span>
      <h2 class="handwriting">{title}</h2>
      <p>{description}</p>
      {phrase}
      <button data-goto="0">Volver al inicio</button>
    </div>"#,
        stage = html_escape(m.stage.label()),
        title = html_escape(&m.title),
        description = html_escape(&m.description),
        phrase = phrase_block(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::testing::sample_story;

    fn page() -> String {
        render_page(&sample_story(), &PageOptions::default()).unwrap()
    }

    #[test]
    fn one_section_per_milestone() {
        let html = page();
        assert_eq!(html.matches("<section ").count(), 6);
        assert_eq!(html.matches(r#"<span class="dot">"#).count(), 6);
        assert!(html.contains(r#"<section id="intro" class="page-active""#));
        assert!(html.contains(r#"<section id="futuro" class="page-hidden""#));
    }

    #[test]
    fn layouts_by_position() {
        let html = page();
        assert_eq!(html.matches(r#"class="book""#).count(), 1);
        assert_eq!(html.matches(r#"class="encounter""#).count(), 1);
        assert_eq!(html.matches(r#"class="finale""#).count(), 1);
        // sections 2..=4 alternate, odd indices reversed
        assert_eq!(html.matches(r#"class="memory""#).count(), 2);
        assert_eq!(html.matches(r#"class="memory reverse""#).count(), 1);
    }

    #[test]
    fn user_text_is_escaped() {
        let mut story = sample_story();
        story.milestones[2].title = "<script>alert(1)</script>".to_string();
        let html = render_page(&story, &PageOptions::default()).unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn non_hex_accent_gets_no_inline_style() {
        let mut story = sample_story();
        story.milestones[1].theme.accent = "red; background:url(x)".to_string();
        let html = render_page(&story, &PageOptions::default()).unwrap();
        assert!(!html.contains("background:url(x)\""));
        assert!(html.contains(r#"<section id="encuentro" class="page-hidden" data-index="1">"#));
        assert_eq!(html.matches("style=\"--section-accent: #").count(), 5);
    }

    #[test]
    fn audio_loops_when_configured() {
        let html = page();
        assert!(html.contains(r#"<audio id="audio" src="song.mp3" preload="auto" loop>"#));
    }

    #[test]
    fn dev_reload_only_in_dev_pages() {
        assert!(!page().contains("__revision"));
        let dev = render_page(&sample_story(), &PageOptions { dev_reload: true }).unwrap();
        assert!(dev.contains("__revision"));
    }
}
