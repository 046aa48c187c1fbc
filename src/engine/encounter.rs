//! Zoom sequence of the encounter map: space, then the region, then the
//! meeting photo, each layer easing in after its own delay.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLayer {
    pub name: &'static str,
    pub delay_ms: u64,
    pub duration_ms: u64,
    /// Resting state while the section is inactive.
    pub rest: LayerFrame,
    /// Final state once the section has been active long enough.
    pub target: LayerFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerFrame {
    pub scale: f64,
    pub opacity: f64,
}

impl LayerFrame {
    const fn new(scale: f64, opacity: f64) -> Self {
        Self { scale, opacity }
    }
}

pub const ENCOUNTER_LAYERS: [ZoomLayer; 3] = [
    ZoomLayer {
        name: "space",
        delay_ms: 0,
        duration_ms: 4_000,
        rest: LayerFrame::new(1.0, 1.0),
        target: LayerFrame::new(10.0, 0.0),
    },
    ZoomLayer {
        name: "region",
        delay_ms: 1_000,
        duration_ms: 3_000,
        rest: LayerFrame::new(0.0, 0.0),
        target: LayerFrame::new(5.0, 1.0),
    },
    ZoomLayer {
        name: "meeting",
        delay_ms: 2_500,
        duration_ms: 2_000,
        rest: LayerFrame::new(0.0, 0.0),
        target: LayerFrame::new(1.0, 1.0),
    },
];

/// CSS `ease-in-out` approximated by smoothstep.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// State of every layer `elapsed_ms` after the section became active.
pub fn encounter_frame(active: bool, elapsed_ms: u64) -> [LayerFrame; 3] {
    ENCOUNTER_LAYERS.map(|layer| {
        if !active {
            return layer.rest;
        }
        let t = if elapsed_ms <= layer.delay_ms {
            0.0
        } else if layer.duration_ms == 0 {
            1.0
        } else {
            (elapsed_ms - layer.delay_ms) as f64 / layer.duration_ms as f64
        };
        let e = ease_in_out(t);
        LayerFrame {
            scale: lerp(layer.rest.scale, layer.target.scale, e),
            opacity: lerp(layer.rest.opacity, layer.target.opacity, e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_rests() {
        let frame = encounter_frame(false, 10_000);
        assert_eq!(frame[0], LayerFrame::new(1.0, 1.0));
        assert_eq!(frame[2].opacity, 0.0);
    }

    #[test]
    fn layers_start_after_delay() {
        let frame = encounter_frame(true, 900);
        assert!(frame[0].scale > 1.0);
        assert_eq!(frame[1], ENCOUNTER_LAYERS[1].rest);
        assert_eq!(frame[2], ENCOUNTER_LAYERS[2].rest);
    }

    #[test]
    fn settles_on_meeting_photo() {
        let frame = encounter_frame(true, 4_500);
        assert_eq!(frame[0].opacity, 0.0);
        assert_eq!(frame[2], LayerFrame::new(1.0, 1.0));
    }
}
