//! Rating scale and final blend configuration types.
//!
//! Both are loaded from `scoring.yaml` and drive validation and blending
//! throughout the scoring path.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The inclusive bounds a rating must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScale {
    /// The lowest allowed rating.
    pub min: Decimal,
    /// The highest allowed rating.
    pub max: Decimal,
}

impl RatingScale {
    /// The conventional 1-to-5 scale.
    pub fn one_to_five() -> Self {
        Self {
            min: Decimal::ONE,
            max: Decimal::from(5),
        }
    }

    /// Validates that a rating lies within the scale.
    pub fn validate(&self, item_id: &str, rating: Decimal) -> EngineResult<()> {
        if rating < self.min || rating > self.max {
            return Err(EngineError::InvalidRating {
                item_id: item_id.to_string(),
                rating: rating.to_string(),
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }

    /// Clamps a value into the scale.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::one_to_five()
    }
}

/// The weights used to blend self and manager overall scores into the
/// final score. Must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalBlend {
    /// Weight of the self-evaluation overall score, as a percentage.
    pub self_weight: Decimal,
    /// Weight of the manager review overall score, as a percentage.
    pub manager_weight: Decimal,
}

impl FinalBlend {
    /// Validates that the blend weights sum to 100.
    pub fn validate(&self) -> EngineResult<()> {
        let total = self.self_weight + self.manager_weight;
        if total != Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidWeights {
                scope: "final blend".to_string(),
                actual: total.to_string(),
                expected: Decimal::ONE_HUNDRED.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for FinalBlend {
    fn default() -> Self {
        Self {
            self_weight: Decimal::from(30),
            manager_weight: Decimal::from(70),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_accepts_ratings_within_scale() {
        let scale = RatingScale::one_to_five();
        assert!(scale.validate("communication", dec("1")).is_ok());
        assert!(scale.validate("communication", dec("3.5")).is_ok());
        assert!(scale.validate("communication", dec("5")).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_scale_ratings() {
        let scale = RatingScale::one_to_five();

        match scale.validate("communication", dec("0.5")).unwrap_err() {
            EngineError::InvalidRating { item_id, rating, .. } => {
                assert_eq!(item_id, "communication");
                assert_eq!(rating, "0.5");
            }
            other => panic!("Expected InvalidRating, got {:?}", other),
        }

        assert!(scale.validate("communication", dec("5.1")).is_err());
    }

    #[test]
    fn test_clamp_pins_values_to_bounds() {
        let scale = RatingScale::one_to_five();
        assert_eq!(scale.clamp(dec("0.2")), dec("1"));
        assert_eq!(scale.clamp(dec("7")), dec("5"));
        assert_eq!(scale.clamp(dec("3.3")), dec("3.3"));
    }

    #[test]
    fn test_default_blend_is_manager_heavy() {
        let blend = FinalBlend::default();
        assert_eq!(blend.self_weight, dec("30"));
        assert_eq!(blend.manager_weight, dec("70"));
        assert!(blend.validate().is_ok());
    }

    #[test]
    fn test_blend_weights_must_sum_to_100() {
        let blend = FinalBlend {
            self_weight: dec("50"),
            manager_weight: dec("60"),
        };

        match blend.validate().unwrap_err() {
            EngineError::InvalidWeights { scope, actual, .. } => {
                assert_eq!(scope, "final blend");
                assert_eq!(actual, "110");
            }
            other => panic!("Expected InvalidWeights, got {:?}", other),
        }
    }
}
