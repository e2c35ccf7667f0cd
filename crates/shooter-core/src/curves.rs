//! Time-keyed curves sampled by the item, weapon and glow systems.
//!
//! Keys are `(time, value)` pairs sorted by time. Sampling is linear
//! between keys and holds the first/last value outside the keyed range.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A piecewise-linear scalar curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatCurve {
    keys: Vec<(f32, f32)>,
}

impl FloatCurve {
    /// Build a curve from keys; keys are sorted by time.
    pub fn new(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { keys }
    }

    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![(0.0, value)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sample the curve at `time`. An empty curve evaluates to 0.
    pub fn eval(&self, time: f32) -> f32 {
        let Some(&(first_t, first_v)) = self.keys.first() else {
            return 0.0;
        };
        if time <= first_t {
            return first_v;
        }
        for pair in self.keys.windows(2) {
            let (t0, v0) = pair[0];
            let (t1, v1) = pair[1];
            if time <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                let alpha = (time - t0) / span;
                return v0 + (v1 - v0) * alpha;
            }
        }
        self.keys.last().map(|&(_, v)| v).unwrap_or(first_v)
    }
}

/// Three scalar curves sampled together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorCurve {
    pub x: FloatCurve,
    pub y: FloatCurve,
    pub z: FloatCurve,
}

impl VectorCurve {
    pub fn new(x: FloatCurve, y: FloatCurve, z: FloatCurve) -> Self {
        Self { x, y, z }
    }

    pub fn eval(&self, time: f32) -> Vec3 {
        Vec3::new(self.x.eval(time), self.y.eval(time), self.z.eval(time))
    }
}

/// Vertical lift of an item flying to the character: overshoots, then settles.
pub fn default_item_z_curve() -> FloatCurve {
    FloatCurve::new(vec![(0.0, 0.0), (0.3, 1.6), (0.7, 1.0)])
}

/// Item size while flying to the character: shrinks into the hand.
pub fn default_item_scale_curve() -> FloatCurve {
    FloatCurve::new(vec![(0.0, 1.0), (0.45, 1.2), (0.7, 0.2)])
}

/// Idle glow pulse over one pulse period.
pub fn default_pulse_curve() -> VectorCurve {
    VectorCurve::new(
        FloatCurve::new(vec![(0.0, 0.2), (2.5, 1.0), (5.0, 0.2)]),
        FloatCurve::new(vec![(0.0, 1.0), (2.5, 0.5), (5.0, 1.0)]),
        FloatCurve::new(vec![(0.0, 0.5), (2.5, 1.0), (5.0, 0.5)]),
    )
}

/// Glow flare while the item is interpolating.
pub fn default_interp_pulse_curve() -> VectorCurve {
    VectorCurve::new(
        FloatCurve::new(vec![(0.0, 1.0), (0.35, 3.0), (0.7, 0.0)]),
        FloatCurve::new(vec![(0.0, 1.0), (0.7, 1.0)]),
        FloatCurve::new(vec![(0.0, 1.0), (0.7, 0.5)]),
    )
}

/// Pistol slide travel over one slide cycle (0 = closed, 1 = fully back).
pub fn default_slide_curve() -> FloatCurve {
    FloatCurve::new(vec![(0.0, 0.0), (0.05, 1.0), (0.2, 0.0)])
}
