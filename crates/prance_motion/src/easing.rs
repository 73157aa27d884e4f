//! Easing functions for segment progress

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing curve applied to a segment's normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bounce,
    Elastic,
}

impl Easing {
    /// Every supported curve, in declaration order
    pub const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Bounce,
        Easing::Elastic,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Input outside the unit interval is clamped first. The output may
    /// leave [0, 1] for the elastic curve.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Bounce => bounce_out(t),
            Easing::Elastic => elastic_out(t),
        }
    }

    /// Stable lowercase name, matching the serialized form
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "easeIn",
            Easing::EaseOut => "easeOut",
            Easing::EaseInOut => "easeInOut",
            Easing::Bounce => "bounce",
            Easing::Elastic => "elastic",
        }
    }
}

/// Classic four-segment bounce-out curve.
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Exponentially decaying sine. The endpoints are pinned because the
/// general formula does not land on them exactly.
fn elastic_out(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if t == 1.0 {
        return 1.0;
    }
    let c4 = (2.0 * PI) / 3.0;
    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{} at 0", easing.name());
            assert_eq!(easing.apply(1.0), 1.0, "{} at 1", easing.name());
        }
    }

    #[test]
    fn test_quadratic_curves() {
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        assert_eq!(Easing::EaseInOut.apply(0.75), 0.875);
    }

    #[test]
    fn test_bounce_is_continuous_at_segment_boundaries() {
        let eps = 1e-4;
        for boundary in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
            let before = Easing::Bounce.apply(boundary - eps);
            let after = Easing::Bounce.apply(boundary + eps);
            assert!((before - after).abs() < 1e-2, "jump at {boundary}");
        }
    }

    #[test]
    fn test_elastic_overshoots() {
        let max = (1..100)
            .map(|i| Easing::Elastic.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(max > 1.0);
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-0.5), 0.0);
        assert_eq!(Easing::Linear.apply(1.5), 1.0);
        assert_eq!(Easing::EaseOut.apply(f32::NAN), 0.0);
    }

    #[test]
    fn test_deterministic() {
        for easing in Easing::ALL {
            for i in 0..=20 {
                let t = i as f32 / 20.0;
                assert_eq!(easing.apply(t).to_bits(), easing.apply(t).to_bits());
            }
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Easing::EaseInOut).unwrap();
        assert_eq!(json, "\"easeInOut\"");
        let back: Easing = serde_json::from_str("\"elastic\"").unwrap();
        assert_eq!(back, Easing::Elastic);
    }
}
