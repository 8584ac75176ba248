//! Final score blending.
//!
//! The delivered final score blends the self and manager overall scores
//! with the configured weights (manager-heavy by default).

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::ScoreStep;

use super::scale::FinalBlend;

/// The result of blending the overall scores, including the audit step.
#[derive(Debug, Clone)]
pub struct FinalBlendResult {
    /// The blended final score, rounded to two decimal places.
    pub final_score: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: ScoreStep,
}

/// Blends the self and manager overall scores into the final score.
///
/// # Arguments
///
/// * `self_overall` - The overall score of the self-evaluation
/// * `manager_overall` - The overall score of the manager review
/// * `blend` - The blend weights (must sum to 100)
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `FinalBlendResult`, or `InvalidWeights` when the blend does
/// not sum to 100.
pub fn blend_final(
    self_overall: Decimal,
    manager_overall: Decimal,
    blend: &FinalBlend,
    step_number: u32,
) -> EngineResult<FinalBlendResult> {
    blend.validate()?;

    let final_score = ((self_overall * blend.self_weight
        + manager_overall * blend.manager_weight)
        / Decimal::ONE_HUNDRED)
        .round_dp(2);

    let audit_step = ScoreStep {
        step_number,
        rule_id: "final_blend".to_string(),
        rule_name: "Final Blend".to_string(),
        input: serde_json::json!({
            "self_overall": self_overall.to_string(),
            "manager_overall": manager_overall.to_string(),
            "self_weight": blend.self_weight.to_string(),
            "manager_weight": blend.manager_weight.to_string(),
        }),
        output: serde_json::json!({ "final_score": final_score.to_string() }),
        reasoning: format!(
            "Blended self {} ({}%) with manager {} ({}%): {}",
            self_overall, blend.self_weight, manager_overall, blend.manager_weight, final_score
        ),
    };

    Ok(FinalBlendResult {
        final_score,
        audit_step,
    })
}
