//! Marker animation and timing judgment for one active stage.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::StageSpec;
use crate::session::DEFAULT_KEY;
use crate::track;

/// Degrees travelled per second at a speed multiplier of 1: one full
/// revolution per second.
pub const BASE_DEGREES_PER_SEC: f64 = 360.0;

/// Per-stage state. Rolled when a stage begins, discarded when it resolves;
/// nothing here survives into the next stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageState {
    pub window_start: f64,
    pub window_width: f64,
    pub speed_multiplier: f64,
    pub expected_key: String,
    /// Total degrees travelled since stage start. Monotonically increasing,
    /// never wrapped; the rendered position is `travelled mod 360`.
    pub travelled: f64,
}

impl StageState {
    /// Roll fresh stage geometry and an expected key. `keys` is the
    /// candidate pool the session validated at start.
    pub fn roll(spec: StageSpec, keys: &[String], rng: &mut impl Rng) -> Self {
        let expected_key = keys
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| DEFAULT_KEY.to_string());
        Self {
            window_start: track::roll_window_start(rng, spec.hit_window_degrees),
            window_width: spec.hit_window_degrees,
            speed_multiplier: spec.speed_multiplier,
            expected_key,
            travelled: track::TOP_ANGLE,
        }
    }

    /// Advance the marker by one tick of `dt_secs`. Speed scales with the
    /// stage multiplier and is independent of the tick rate.
    pub fn advance(&mut self, dt_secs: f64) {
        self.travelled += BASE_DEGREES_PER_SEC * self.speed_multiplier * dt_secs;
    }

    /// Rendered marker position on the track, in [0, 360).
    pub fn position(&self) -> f64 {
        track::wrap_degrees(self.travelled)
    }

    /// Whether `key` is the one this stage judges. Other keys, candidate or
    /// not, are no-ops for the caller.
    pub fn matches_key(&self, key: &str) -> bool {
        key.eq_ignore_ascii_case(&self.expected_key)
    }

    /// Whether the marker currently sits inside the hit window.
    pub fn in_window(&self) -> bool {
        track::arc_contains(self.window_start, self.window_width, self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(width: f64, mult: f64) -> StageSpec {
        StageSpec {
            hit_window_degrees: width,
            speed_multiplier: mult,
        }
    }

    fn fixed_stage(window_start: f64, window_width: f64, travelled: f64) -> StageState {
        StageState {
            window_start,
            window_width,
            speed_multiplier: 1.0,
            expected_key: "e".to_string(),
            travelled,
        }
    }

    #[test]
    fn test_roll_starts_marker_at_the_top() {
        let mut rng = StdRng::seed_from_u64(1);
        let stage = StageState::roll(spec(50.0, 1.0), &["e".to_string()], &mut rng);
        assert_eq!(stage.travelled, track::TOP_ANGLE);
        assert_eq!(stage.position(), 270.0);
    }

    #[test]
    fn test_roll_draws_key_from_candidates() {
        let keys = vec!["e".to_string(), "f".to_string(), "g".to_string()];
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let stage = StageState::roll(spec(40.0, 1.5), &keys, &mut rng);
            assert!(keys.contains(&stage.expected_key));
        }
    }

    #[test]
    fn test_roll_eventually_uses_every_candidate() {
        let keys = vec!["e".to_string(), "f".to_string()];
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(StageState::roll(spec(40.0, 1.0), &keys, &mut rng).expected_key);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_advance_scales_with_multiplier_and_dt() {
        let mut stage = fixed_stage(30.0, 50.0, 0.0);
        stage.advance(0.5);
        assert_eq!(stage.travelled, 180.0);

        let mut fast = fixed_stage(30.0, 50.0, 0.0);
        fast.speed_multiplier = 1.75;
        fast.advance(0.5);
        assert_eq!(fast.travelled, 315.0);
    }

    #[test]
    fn test_travelled_keeps_increasing_past_a_revolution() {
        let mut stage = fixed_stage(30.0, 50.0, 0.0);
        for _ in 0..100 {
            stage.advance(0.016);
        }
        assert!(stage.travelled > 360.0);
        assert!(stage.position() < 360.0);
        assert_eq!(stage.position(), track::wrap_degrees(stage.travelled));
    }

    #[test]
    fn test_in_window_boundaries() {
        assert!(fixed_stage(30.0, 50.0, 30.0).in_window());
        assert!(fixed_stage(30.0, 50.0, 55.0).in_window());
        assert!(!fixed_stage(30.0, 50.0, 80.0).in_window());
        assert!(!fixed_stage(30.0, 50.0, 29.0).in_window());
    }

    #[test]
    fn test_in_window_judges_rendered_position_not_travel() {
        // two revolutions plus a hit position
        assert!(fixed_stage(30.0, 50.0, 720.0 + 45.0).in_window());
        assert!(!fixed_stage(30.0, 50.0, 720.0 + 100.0).in_window());
    }

    #[test]
    fn test_matches_key_is_case_insensitive() {
        let stage = fixed_stage(30.0, 50.0, 0.0);
        assert!(stage.matches_key("e"));
        assert!(stage.matches_key("E"));
        assert!(!stage.matches_key("f"));
        assert!(!stage.matches_key(""));
    }
}
