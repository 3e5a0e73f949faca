/// Easing and per-panel stagger curves for the unfold animation

/// Delay between consecutive staggered panels, in eased-progress units.
pub const STAGGER_DELAY: f32 = 0.015;

/// Fraction of the eased progress over which a staggered panel completes.
pub const STAGGER_DURATION: f32 = 0.6;

/// Cubic ease-in-out remapping of linear progress.
///
/// `e(0) = 0`, `e(0.5) = 0.5`, `e(1) = 1`, monotonic on [0, 1].
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Local progress for panel `phase` given the globally eased progress.
///
/// Each panel starts `STAGGER_DELAY` after its predecessor and runs over
/// `STAGGER_DURATION`, producing a peeling wave instead of simultaneous
/// motion. The clamped local value is re-eased with the same cubic curve.
pub fn staggered(eased: f32, phase: usize) -> f32 {
    let local = ((eased - phase as f32 * STAGGER_DELAY) / STAGGER_DURATION).clamp(0.0, 1.0);
    ease_in_out_cubic(local)
}
