//! Stylesheet for the generated page.

use crate::engine::encounter::ENCOUNTER_LAYERS;

/// Static rules. Theme colours are applied at runtime through CSS variables
/// set on `#story` whenever the active section changes.
pub(super) const STORY_CSS: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { width: 100%; height: 100%; overflow: hidden; }
::-webkit-scrollbar { display: none; }

#story {
  --bg: #F7FBF2; --accent: #82A078; --text: #2D2926; --wave: #A8C69F;
  height: 100vh; overflow-y: auto; position: relative;
  scroll-snap-type: y mandatory; scroll-behavior: smooth;
  background: var(--bg); color: var(--text);
  transition: background-color 1s ease;
  perspective: 2500px;
  font-family: Georgia, 'Times New Roman', serif;
}
.handwriting { font-family: 'Caveat', 'Segoe Print', cursive; }

/* ── Ambient layers ─────────────────────────────── */
#glow {
  position: fixed; inset: 0; pointer-events: none; z-index: 0; opacity: 0.5;
  transition: opacity 1s;
}
#paper {
  position: fixed; inset: 0; pointer-events: none; z-index: 1; opacity: 0.04;
  background-image: radial-gradient(#000 0.5px, transparent 0.5px);
  background-size: 4px 4px;
}
#waves {
  position: fixed; left: 0; right: 0; bottom: 0; height: 18vh; pointer-events: none;
  z-index: 2; opacity: 0.35;
  background: radial-gradient(ellipse at 50% 120%, var(--wave) 0%, transparent 70%);
  transition: background 1s;
}

/* ── Navigation rail ────────────────────────────── */
#nav {
  position: fixed; left: 24px; top: 50%; transform: translateY(-50%); z-index: 50;
  display: flex; flex-direction: column; gap: 24px; align-items: center;
}
#nav button {
  position: relative; background: none; border: none; cursor: pointer;
  display: flex; align-items: center; justify-content: center;
}
#nav .dot {
  width: 12px; height: 12px; border-radius: 50%; border: 2px solid gray;
  opacity: 0.4; transition: all 0.5s;
}
#nav .label {
  position: absolute; left: 32px; white-space: nowrap; font-size: 10px;
  letter-spacing: 0.3em; text-transform: uppercase; font-weight: bold;
  color: var(--accent); opacity: 0; transform: translateX(-8px); transition: all 0.5s;
}
#nav button.active .dot {
  background: var(--accent); border-color: var(--accent); opacity: 1; transform: scale(1.5);
}
#nav button.active .label { opacity: 1; transform: translateX(0); }

/* ── Audio controller ───────────────────────────── */
#player {
  position: fixed; top: 24px; right: 24px; z-index: 50;
  display: flex; align-items: center; gap: 16px;
  background: rgba(255,255,255,0.9); padding: 8px 8px 8px 16px; border-radius: 999px;
  box-shadow: 0 20px 40px rgba(0,0,0,0.15);
}
#player .meta { display: flex; flex-direction: column; align-items: flex-end; }
#player .artist { font-size: 9px; letter-spacing: 0.2em; text-transform: uppercase; color: #999; }
#player .song { font-size: 12px; font-style: italic; color: #333; }
#play {
  width: 48px; height: 48px; border-radius: 50%; border: none; cursor: pointer;
  background: var(--accent); color: #fff; font-size: 18px;
}
#player.playing #play { animation: spin 3s linear infinite; }

/* ── Caption overlay ────────────────────────────── */
#caption {
  position: fixed; bottom: 40px; left: 50%; transform: translateX(-50%); z-index: 40;
  width: 100%; max-width: 36rem; padding: 0 24px; pointer-events: none;
}
#caption[hidden] { display: none; }
#caption .card {
  background: rgba(255,255,255,0.6); backdrop-filter: blur(12px); padding: 24px;
  border-radius: 16px; transform: rotate(-0.5deg);
}
#caption .kicker {
  display: block; text-align: center; font-size: 10px; letter-spacing: 0.3em;
  text-transform: uppercase; font-weight: bold; color: #777; margin-bottom: 12px;
}
#caption-text { font-size: 2.2rem; text-align: center; min-height: 3rem; color: var(--accent); }
.cursor { display: inline-block; width: 2px; height: 2rem; background: currentColor;
  margin-left: 4px; vertical-align: middle; animation: pulse 1s infinite; }

/* ── Sections ───────────────────────────────────── */
section {
  height: 100vh; width: 100%; scroll-snap-align: start; scroll-snap-stop: always;
  display: flex; align-items: center; justify-content: center; padding: 32px;
  position: relative; overflow: hidden;
  transform-style: preserve-3d; transform-origin: center top;
  transition: transform 1.2s cubic-bezier(0.645, 0.045, 0.355, 1);
}
section.page-hidden { pointer-events: none; }
.page-content {
  transition: transform 1.2s cubic-bezier(0.645, 0.045, 0.355, 1), opacity 1s ease;
  transform-style: preserve-3d; z-index: 10; max-width: 72rem; width: 100%;
}
.page-hidden .page-content { transform: rotateX(-10deg) translateY(30px) scale(0.96); opacity: 0; }
.page-active .page-content { transform: none; opacity: 1; }
.stage-label {
  font-size: 10px; letter-spacing: 0.4em; text-transform: uppercase; font-weight: 900;
  color: var(--section-accent);
}
.phrase { min-height: 80px; font-size: 2.2rem; text-align: center; color: var(--section-accent); }

/* ── Intro book ─────────────────────────────────── */
.book { position: relative; width: 100%; max-width: 64rem; height: 80vh; z-index: 20;
  transform-style: preserve-3d; transition: transform 1.8s cubic-bezier(0.645, 0.045, 0.355, 1); }
.book.opened { transform: translateX(20%); }
.cover {
  position: absolute; inset: 0; z-index: 40; background: #3d4b37; color: #fdfaf1;
  transform-origin: left; transform-style: preserve-3d; border-radius: 0 4px 4px 0;
  box-shadow: 20px 0 50px rgba(0,0,0,0.6);
  transition: transform 1.8s cubic-bezier(0.645, 0.045, 0.355, 1);
}
.book.opened .cover { transform: rotateY(-125deg); }
.cover .front, .cover .back {
  position: absolute; inset: 24px; backface-visibility: hidden;
  display: flex; flex-direction: column; align-items: center; justify-content: center;
  text-align: center; padding: 32px;
}
.cover .back { inset: 0; background: #f4f1ea; color: #999; transform: rotateY(180deg); }
.butterflies { display: flex; gap: 48px; margin: 24px 0 64px; }
.butterfly { width: 112px; height: 112px; fill: #fdfaf1; cursor: pointer; }
.butterfly:nth-child(1) { animation: butterfly-1 3s ease-in-out infinite; }
.butterfly:nth-child(2) { animation: butterfly-2 3.5s ease-in-out infinite; }
.inside {
  position: absolute; inset: 0; z-index: 30; background: #fcf8f0; display: flex;
  border: 1px solid #dcd0bc; overflow: hidden;
}
.gallery { width: 50%; padding: 24px; display: flex; align-items: center; justify-content: center; cursor: pointer; }
.gallery img { width: 100%; height: 100%; max-height: 450px; object-fit: cover;
  animation: photo-reveal 1s cubic-bezier(0.23, 1, 0.32, 1) forwards; }
.intro-text { width: 50%; padding: 64px; display: flex; flex-direction: column; justify-content: center; gap: 40px; }

/* ── Encounter map ──────────────────────────────── */
.encounter { display: grid; grid-template-columns: 1fr 1fr; gap: 48px; align-items: center; }
.map { position: relative; height: 500px; overflow: hidden; border-radius: 16px; background: #000; }
.map .layer { position: absolute; inset: 0; transition-property: transform, opacity; transition-timing-function: ease-in-out; }
.map .layer img { width: 100%; height: 100%; object-fit: cover; }
.map .map-caption { position: absolute; bottom: 24px; left: 24px; color: #fff; font-size: 1.8rem; }

/* ── Memory sections ────────────────────────────── */
.memory { display: flex; gap: 64px; align-items: center; }
.memory.reverse { flex-direction: row-reverse; }
.memory .photo { width: 50%; background: #fff; padding: 20px; transform: rotate(1deg); }
.memory .photo img { width: 100%; height: 480px; object-fit: cover; }
.memory .body { width: 50%; padding: 40px; border-left: 4px solid var(--section-accent); }

/* ── Finale ─────────────────────────────────────── */
.finale { text-align: center; max-width: 56rem; }
.finale h2 { font-size: 8rem; font-style: italic; }
.finale button {
  padding: 24px 64px; border-radius: 999px; border: 1px solid var(--section-accent);
  background: none; color: var(--section-accent); cursor: pointer;
  text-transform: uppercase; font-size: 12px; letter-spacing: 0.4em; font-weight: 900;
}

@keyframes spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }
@keyframes pulse { 50% { opacity: 0; } }
@keyframes photo-reveal {
  from { opacity: 0; transform: scale(1.1) rotate(2deg); filter: sepia(1); }
  to { opacity: 1; transform: scale(1) rotate(0); filter: sepia(0); }
}
@keyframes butterfly-1 {
  0%, 100% { transform: rotate(-15deg) scale(1); }
  50% { transform: rotate(-30deg) scale(1.15); filter: brightness(1.2); }
}
@keyframes butterfly-2 {
  0%, 100% { transform: rotate(15deg) scale(1); }
  50% { transform: rotate(30deg) scale(1.25); filter: brightness(1.2); }
}
"#;

/// Transition rules for the encounter map layers: resting state, the active
/// target, and each layer's own delay and duration.
pub(super) fn encounter_css() -> String {
    let mut css = String::new();
    for layer in &ENCOUNTER_LAYERS {
        css.push_str(&format!(
            ".map .layer.{name} {{ transform: scale({}); opacity: {}; transition-duration: {}ms; transition-delay: {}ms; }}\n",
            layer.rest.scale,
            layer.rest.opacity,
            layer.duration_ms,
            layer.delay_ms,
            name = layer.name,
        ));
        css.push_str(&format!(
            ".map.active .layer.{name} {{ transform: scale({}); opacity: {}; }}\n",
            layer.target.scale,
            layer.target.opacity,
            name = layer.name,
        ));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encounter_rules_follow_layer_table() {
        let css = encounter_css();
        assert!(css.contains(
            ".map .layer.space { transform: scale(1); opacity: 1; transition-duration: 4000ms; transition-delay: 0ms; }"
        ));
        assert!(css.contains(".map.active .layer.region { transform: scale(5); opacity: 1; }"));
        assert!(css.contains("transition-delay: 2500ms"));
    }
}
