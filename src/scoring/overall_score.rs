//! Overall evaluation score calculation.
//!
//! The overall score combines section scores with the template's section
//! weights: `sum(section_score * section_weight) / 100`. Sections with a
//! zero weight and no items are skipped.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    Evaluation, EvaluationType, JobTemplate, ScoreLine, ScoreStep, SectionKind, SectionScore,
};

use super::scale::RatingScale;
use super::section_score::score_section;

/// The result of scoring a full evaluation against its template.
#[derive(Debug, Clone)]
pub struct EvaluationScoreResult {
    /// The overall score on the rating scale.
    pub overall: Decimal,
    /// Per-section scores.
    pub sections: Vec<SectionScore>,
    /// Per-item breakdown across all sections.
    pub lines: Vec<ScoreLine>,
    /// Audit steps for each section plus the overall combination.
    pub audit_steps: Vec<ScoreStep>,
}

/// Scores a complete evaluation: every non-empty section, combined by the
/// template's section weights.
///
/// # Arguments
///
/// * `source` - Which evaluation the ratings come from
/// * `template` - The job template defining sections, items, and weights
/// * `evaluation` - The evaluation holding the ratings
/// * `scale` - The rating scale ratings must fall within
/// * `start_step` - The first step number for audit trail sequencing
///
/// # Returns
///
/// Returns an `EvaluationScoreResult`, or an error if the template's
/// weights are invalid or any section fails to score.
pub fn score_evaluation(
    source: EvaluationType,
    template: &JobTemplate,
    evaluation: &Evaluation,
    scale: &RatingScale,
    start_step: u32,
) -> EngineResult<EvaluationScoreResult> {
    template.validate()?;

    let mut sections = Vec::new();
    let mut lines = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number = start_step;
    let mut overall = Decimal::ZERO;

    for section in SectionKind::ALL {
        if template.items_for(section).is_empty() {
            // validate() guarantees the weight is zero here
            continue;
        }

        let result = score_section(source, section, template, evaluation, scale, step_number)?;
        step_number += 1;

        overall += result.section_score.score * result.section_score.weight
            / Decimal::ONE_HUNDRED;
        sections.push(result.section_score);
        lines.extend(result.lines);
        audit_steps.push(result.audit_step);
    }

    audit_steps.push(ScoreStep {
        step_number,
        rule_id: "overall_score".to_string(),
        rule_name: "Overall Score".to_string(),
        input: serde_json::json!({
            "source": source,
            "sections": sections
                .iter()
                .map(|s| serde_json::json!({
                    "section": s.section,
                    "score": s.score.to_string(),
                    "weight": s.weight.to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
        output: serde_json::json!({ "overall": overall.to_string() }),
        reasoning: format!(
            "Combined {} section scores by section weight: {}",
            sections.len(),
            overall
        ),
    });

    Ok(EvaluationScoreResult {
        overall,
        sections,
        lines,
        audit_steps,
    })
}
