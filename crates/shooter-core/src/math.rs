//! Scalar interpolation and angle helpers shared by every system.

/// Below this squared distance an interpolation snaps to its target.
const SNAP_DISTANCE_SQ: f32 = 1.0e-8;

/// Exponential approach of `current` toward `target`.
///
/// Moves `(target - current) * clamp(dt * speed, 0, 1)` per call. A
/// non-positive `speed` jumps straight to the target.
pub fn finterp_to(current: f32, target: f32, dt: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let distance = target - current;
    if distance * distance < SNAP_DISTANCE_SQ {
        return target;
    }
    current + distance * (dt * speed).clamp(0.0, 1.0)
}

/// Map `value` from `input` range onto `output` range, clamping to the output.
pub fn mapped_range_clamped(input: (f32, f32), output: (f32, f32), value: f32) -> f32 {
    let span = input.1 - input.0;
    if span.abs() <= f32::EPSILON {
        return if value < input.0 { output.0 } else { output.1 };
    }
    let alpha = ((value - input.0) / span).clamp(0.0, 1.0);
    output.0 + (output.1 - output.0) * alpha
}

/// Wrap an angle in degrees into (-180, 180].
pub fn normalize_axis(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}
