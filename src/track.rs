use rand::Rng;

/// Angular offset of the marker's rest position from the track's zero
/// reference; stages anchor both the marker and the window draw to it.
pub const TOP_ANGLE: f64 = -90.0;

/// Minimum travel (degrees) between the marker's rest position and the near
/// edge of a hit window.
pub const MIN_WINDOW_LEAD: f64 = 120.0;

/// Wrap an angle, possibly negative or past a full turn, onto [0, 360).
pub fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Half-open membership test for the arc starting at `start` and spanning
/// `width` degrees in the direction of travel. Correct for arcs that cross
/// the 0/360 seam.
pub fn arc_contains(start: f64, width: f64, angle: f64) -> bool {
    wrap_degrees(angle - start) < width
}

/// Uniform draw in [min, max).
pub fn random_angle(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    rng.gen_range(min..max)
}

/// Draw a start angle that keeps a window of `width` degrees fully inside
/// the reachable arc: offset from the top, at least MIN_WINDOW_LEAD of
/// travel before the window begins, and the far edge never past the point
/// where wrapping would make it reachable with negative travel.
///
/// The source range [MIN_WINDOW_LEAD, 360 - width) is non-empty only for
/// width < 240; stage validation enforces that bound.
pub fn roll_window_start(rng: &mut impl Rng, width: f64) -> f64 {
    TOP_ANGLE + random_angle(rng, MIN_WINDOW_LEAD, 360.0 - width)
}
