//! Section score calculation.
//!
//! A section score is the weighted average of its item ratings:
//! `sum(rating * item_weight) / 100`. Item weights within a section sum to
//! 100, so the section score stays on the rating scale.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Evaluation, EvaluationType, JobTemplate, ScoreLine, ScoreStep, SectionKind, SectionScore,
};

use super::scale::RatingScale;

/// The result of scoring a single section, including the audit step.
#[derive(Debug, Clone)]
pub struct SectionScoreResult {
    /// The weighted section score.
    pub section_score: SectionScore,
    /// The per-item breakdown behind the score.
    pub lines: Vec<ScoreLine>,
    /// The audit step recording this calculation.
    pub audit_step: ScoreStep,
}

/// Calculates the weighted score of one template section from an
/// evaluation's ratings.
///
/// # Arguments
///
/// * `source` - Which evaluation the ratings come from
/// * `section` - The section to score
/// * `template` - The job template defining items and weights
/// * `evaluation` - The evaluation holding the ratings
/// * `scale` - The rating scale ratings must fall within
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `SectionScoreResult`, or an error if:
/// - Any template item in the section has no rating (`MissingRating`)
/// - Any rating falls outside the scale (`InvalidRating`)
///
/// # Examples
///
/// ```
/// use evaluation_engine::models::SectionKind;
/// use evaluation_engine::scoring::{score_section, RatingScale};
/// ```
pub fn score_section(
    source: EvaluationType,
    section: SectionKind,
    template: &JobTemplate,
    evaluation: &Evaluation,
    scale: &RatingScale,
    step_number: u32,
) -> EngineResult<SectionScoreResult> {
    let items = template.items_for(section);
    let mut lines = Vec::with_capacity(items.len());
    let mut score = Decimal::ZERO;

    for (item_id, weight) in &items {
        let rating = evaluation
            .rating_for(section, item_id)
            .ok_or_else(|| EngineError::MissingRating {
                section: section.to_string(),
                item_id: item_id.to_string(),
            })?
            .rating;

        scale.validate(item_id, rating)?;

        let weighted_points = rating * *weight / Decimal::ONE_HUNDRED;
        score += weighted_points;

        lines.push(ScoreLine {
            source,
            section,
            item_id: item_id.to_string(),
            weight: *weight,
            rating,
            weighted_points,
        });
    }

    let section_weight = template.section_weights.weight_for(section);
    let audit_step = ScoreStep {
        step_number,
        rule_id: "section_score".to_string(),
        rule_name: "Section Score".to_string(),
        input: serde_json::json!({
            "source": source,
            "section": section,
            "item_count": items.len(),
            "ratings": lines
                .iter()
                .map(|l| serde_json::json!({
                    "item_id": l.item_id,
                    "rating": l.rating.to_string(),
                    "weight": l.weight.to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "score": score.to_string(),
            "section_weight": section_weight.to_string(),
        }),
        reasoning: format!(
            "Weighted average of {} rated {} items: {}",
            items.len(),
            section,
            score
        ),
    };

    Ok(SectionScoreResult {
        section_score: SectionScore {
            source,
            section,
            weight: section_weight,
            score,
        },
        lines,
        audit_step,
    })
}
