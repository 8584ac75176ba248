//! Evidence-based score pre-population.
//!
//! The growth evidence journal feeds the manager review: for each template
//! line item, the star ratings of entries recorded inside the period are
//! averaged into a suggested rating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    EvaluationPeriod, EvidenceEntry, JobTemplate, ScoreStep, SectionKind,
};

use super::scale::RatingScale;

/// A suggested rating for one template line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillSuggestion {
    /// The section the item belongs to.
    pub section: SectionKind,
    /// The template line item id.
    pub item_id: String,
    /// The suggested rating: the star average rounded to one decimal
    /// place and clamped to the rating scale.
    pub suggested_rating: Decimal,
    /// How many evidence entries contributed.
    pub evidence_count: u32,
}

/// The result of deriving suggestions from the evidence journal.
#[derive(Debug, Clone)]
pub struct PrefillResult {
    /// One suggestion per template item that has in-period evidence.
    pub suggestions: Vec<PrefillSuggestion>,
    /// The audit step recording this derivation.
    pub audit_step: ScoreStep,
}

/// Derives suggested ratings from the evidence journal.
///
/// Entries are considered when they were recorded inside the period, carry
/// a valid star rating, and reference an item present on the template.
/// Items without any qualifying evidence get no suggestion.
///
/// # Arguments
///
/// * `template` - The job template whose items are suggested for
/// * `entries` - The employee's evidence journal entries
/// * `period` - The evaluation period bounding the entries
/// * `scale` - The rating scale suggestions are clamped to
/// * `step_number` - The step number for audit trail sequencing
pub fn prefill_from_evidence(
    template: &JobTemplate,
    entries: &[EvidenceEntry],
    period: &EvaluationPeriod,
    scale: &RatingScale,
    step_number: u32,
) -> PrefillResult {
    let mut suggestions = Vec::new();
    let mut skipped: u32 = 0;

    for section in SectionKind::ALL {
        for (item_id, _) in template.items_for(section) {
            let stars: Vec<u8> = entries
                .iter()
                .filter(|e| {
                    e.section == section
                        && e.item_id == item_id
                        && period.contains_date(e.recorded_on)
                        && e.has_valid_stars()
                })
                .map(|e| e.stars)
                .collect();

            if stars.is_empty() {
                continue;
            }

            let total: u32 = stars.iter().map(|s| u32::from(*s)).sum();
            let average = Decimal::from(total) / Decimal::from(stars.len() as u32);
            let suggested = scale.clamp(average.round_dp(1));

            suggestions.push(PrefillSuggestion {
                section,
                item_id: item_id.to_string(),
                suggested_rating: suggested,
                evidence_count: stars.len() as u32,
            });
        }
    }

    for entry in entries {
        let on_template = template.contains_item(entry.section, &entry.item_id);
        if !on_template || !period.contains_date(entry.recorded_on) || !entry.has_valid_stars() {
            skipped += 1;
        }
    }

    let audit_step = ScoreStep {
        step_number,
        rule_id: "evidence_prefill".to_string(),
        rule_name: "Evidence Prefill".to_string(),
        input: serde_json::json!({
            "template_id": template.id,
            "period_id": period.id,
            "entry_count": entries.len(),
        }),
        output: serde_json::json!({
            "suggestion_count": suggestions.len(),
            "skipped_entries": skipped,
            "suggestions": suggestions
                .iter()
                .map(|s| serde_json::json!({
                    "section": s.section,
                    "item_id": s.item_id,
                    "suggested_rating": s.suggested_rating.to_string(),
                    "evidence_count": s.evidence_count,
                }))
                .collect::<Vec<_>>(),
        }),
        reasoning: format!(
            "Averaged {} journal entries into {} suggestions ({} entries out of scope)",
            entries.len() - skipped as usize,
            suggestions.len(),
            skipped
        ),
    };

    PrefillResult {
        suggestions,
        audit_step,
    }
}
