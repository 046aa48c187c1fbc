//! Inline JS for the generated page.
//!
//! The page embeds the validated storybook plus the precomputed caption
//! windows, and re-derives section and caption state from the scroll offset
//! and the audio clock on every notification, the same way the Rust engine does.

use serde::Serialize;

use super::helpers::json_for_script;
use crate::engine::caption::{caption_windows, CaptionTiming, CaptionWindow};
use crate::story::{Layout, Storybook};

/// Data handed to the page runtime.
#[derive(Serialize)]
struct PageData<'a> {
    story: &'a Storybook,
    layouts: Vec<Layout>,
    windows: Vec<CaptionWindow>,
}

const RUNTIME_JS: &str = r#"
// ── Section tracking ──────────────────────────────────────────────
function activeSection(offset, viewport, count) {
  if (!(count > 0) || !(viewport > 0) || !(offset > 0)) return 0;
  return Math.min(Math.round(offset / viewport), count - 1);
}

// ── Caption sync ──────────────────────────────────────────────────
function activeCaptionIndex(clock, captions) {
  if (!(clock >= 0)) return -1;
  let lo = 0, hi = captions.length;
  while (lo < hi) {
    const mid = (lo + hi) >> 1;
    if (captions[mid].timestamp <= clock) lo = mid + 1; else hi = mid;
  }
  return lo - 1;
}

function activeCaption(clock) {
  const captions = STORY.story.captions;
  const index = activeCaptionIndex(clock, captions);
  if (index < 0) return { index: -1, text: '' };
  const w = STORY.windows[index];
  const span = (w.end - w.start) * STORY.story.settings.reveal_fraction;
  const progress = span > 0 ? Math.min(Math.max((clock - w.start) / span, 0), 1) : 1;
  const chars = Array.from(captions[index].text);
  return { index, text: chars.slice(0, Math.floor(chars.length * progress)).join('') };
}

// ── Timers: at most one per purpose ───────────────────────────────
const timers = new Map();
function arm(purpose, periodMs, fn) {
  cancel(purpose);
  timers.set(purpose, setInterval(fn, Math.max(1, periodMs)));
}
function cancel(purpose) {
  const id = timers.get(purpose);
  if (id !== undefined) { clearInterval(id); timers.delete(purpose); }
}

// ── State ─────────────────────────────────────────────────────────
const state = { active: 0, pending: -1, playing: false, bookOpened: false, gallery: 0, clock: 0 };
const root = document.getElementById('story');
const sections = Array.from(root.querySelectorAll('section'));
const navButtons = Array.from(document.querySelectorAll('#nav button'));
const audio = document.getElementById('audio');
const player = document.getElementById('player');
const playBtn = document.getElementById('play');
const captionBox = document.getElementById('caption');
const captionText = document.getElementById('caption-text');
const glow = document.getElementById('glow');

function applyTheme() {
  const m = STORY.story.milestones[state.active] || STORY.story.milestones[0];
  root.style.setProperty('--bg', m.theme.bg);
  root.style.setProperty('--accent', m.theme.accent);
  root.style.setProperty('--text', m.theme.text);
  root.style.setProperty('--wave', m.theme.wave);
}

function renderSections() {
  sections.forEach((s, i) => {
    s.classList.toggle('page-active', i === state.active);
    s.classList.toggle('page-hidden', i !== state.active);
  });
  navButtons.forEach((b, i) => b.classList.toggle('active', i === state.active));
  const map = document.querySelector('.map');
  if (map) map.classList.toggle('active', state.active === 1);
  applyTheme();
}

function renderCaption() {
  const c = state.playing ? activeCaption(state.clock) : { index: -1, text: '' };
  captionBox.hidden = c.index < 0;
  captionText.textContent = c.text;
}

function renderPlayer() {
  player.classList.toggle('playing', state.playing);
  playBtn.innerHTML = state.playing ? '&#10074;&#10074;' : '&#9654;';
  playBtn.setAttribute('aria-label', state.playing ? 'Pause' : 'Play');
}

// ── Phrase typewriter ─────────────────────────────────────────────
function syncPhrase() {
  cancel('phrase_typewriter');
  document.querySelectorAll('.phrase-text').forEach(el => { el.textContent = ''; });
  const layout = STORY.layouts[state.active];
  if (state.playing || (layout !== 'memory' && layout !== 'finale')) return;
  const el = sections[state.active].querySelector('.phrase-text');
  if (!el) return;
  const chars = Array.from(STORY.story.milestones[state.active].phrase);
  let i = 0;
  arm('phrase_typewriter', STORY.story.settings.typewriter_interval_ms, () => {
    if (i >= chars.length) { cancel('phrase_typewriter'); return; }
    i += 1;
    el.textContent = chars.slice(0, i).join('');
  });
}

// ── Gallery ───────────────────────────────────────────────────────
const galleryImg = document.getElementById('gallery-img');
function showGallery() {
  if (!galleryImg) return;
  galleryImg.src = STORY.story.gallery[state.gallery];
  galleryImg.style.animation = 'none';
  void galleryImg.offsetWidth;
  galleryImg.style.animation = '';
}
function advanceGallery() {
  const n = STORY.story.gallery.length;
  if (n > 0) state.gallery = (state.gallery + 1) % n;
  showGallery();
}
function syncGallery() {
  const period = STORY.story.settings.gallery_interval_ms;
  if (period && state.bookOpened && state.active === 0) {
    if (!timers.has('gallery_advance')) arm('gallery_advance', period, advanceGallery);
  } else {
    cancel('gallery_advance');
  }
}

// ── Playback (optimistic: UI follows intent even if autoplay is blocked) ──
function togglePlay() {
  if (state.playing) {
    audio.pause();
    state.playing = false;
  } else {
    state.playing = true;
    const p = audio.play();
    if (p && p.catch) p.catch(e => console.warn('audio playback blocked', e));
  }
  renderPlayer();
  renderCaption();
  syncPhrase();
}

function openBook() {
  state.bookOpened = true;
  document.querySelector('.book').classList.add('opened');
  if (!state.playing) togglePlay();
  syncGallery();
}

// ── Listeners ─────────────────────────────────────────────────────
function onScroll() {
  const index = activeSection(root.scrollTop, root.clientHeight, sections.length);
  if (state.pending === index) state.pending = -1;
  if (index === state.active) return;
  state.active = index;
  renderSections();
  syncPhrase();
  syncGallery();
}

function scrollToSection(index) {
  index = Math.min(Math.max(index, 0), sections.length - 1);
  if (state.pending === index || (state.pending < 0 && state.active === index)) return;
  state.pending = index;
  root.scrollTo({ top: index * root.clientHeight, behavior: 'smooth' });
}

function onTime() { state.clock = audio.currentTime; renderCaption(); }
function onEnded() { state.playing = false; renderPlayer(); renderCaption(); syncPhrase(); }
function onPointer(e) {
  const x = (e.clientX / window.innerWidth) * 100;
  const y = (e.clientY / window.innerHeight) * 100;
  const m = STORY.story.milestones[state.active];
  glow.style.background = `radial-gradient(circle at ${x}% ${y}%, ${m.theme.accent}33 0%, transparent 70%)`;
}

root.addEventListener('scroll', onScroll, { passive: true });
root.addEventListener('scrollend', () => { state.pending = -1; });
root.addEventListener('mousemove', onPointer);
audio.addEventListener('timeupdate', onTime);
audio.addEventListener('ended', onEnded);
playBtn.addEventListener('click', togglePlay);
document.querySelectorAll('.butterfly').forEach(b => b.addEventListener('click', openBook));
const gallery = document.querySelector('.gallery');
if (gallery) gallery.addEventListener('click', e => { e.stopPropagation(); advanceGallery(); });
navButtons.forEach((b, i) => b.addEventListener('click', () => scrollToSection(i)));
document.querySelectorAll('[data-goto]').forEach(b =>
  b.addEventListener('click', () => scrollToSection(Number(b.dataset.goto))));
window.addEventListener('pagehide', () => {
  for (const purpose of Array.from(timers.keys())) cancel(purpose);
});

renderSections();
renderPlayer();
renderCaption();
syncPhrase();
"#;

pub(crate) const DEV_RELOAD_JS: &str = r#"
// ── Dev reload ────────────────────────────────────────────────────
(function poll(rev) {
  setTimeout(() => fetch('/__revision').then(r => r.text()).then(next => {
    if (rev !== null && next !== rev) location.reload(); else poll(next);
  }).catch(() => poll(rev)), 800);
})(null);
"#;

/// Full inline script: embedded data, runtime, optional dev reload.
pub(super) fn generate_script(story: &Storybook, dev_reload: bool) -> serde_json::Result<String> {
    let data = PageData {
        story,
        layouts: (0..story.milestones.len())
            .map(|i| story.layout_at(i))
            .collect(),
        windows: caption_windows(&story.captions, CaptionTiming::from(&story.settings)),
    };
    let mut js = String::with_capacity(RUNTIME_JS.len() + 4096);
    js.push_str("const STORY = ");
    js.push_str(&json_for_script(&data)?);
    js.push_str(";\n");
    js.push_str(RUNTIME_JS);
    if dev_reload {
        js.push_str(DEV_RELOAD_JS);
    }
    Ok(js)
}
