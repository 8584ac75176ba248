//! Score summary models.
//!
//! This module contains the [`ScoreSummary`] type and its associated
//! structures that capture all outputs of score aggregation: per-line
//! breakdowns, section scores, blended totals, and the score trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::evaluation::EvaluationType;
use super::template::SectionKind;

/// The weighted contribution of a single template line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    /// Which evaluation the rating came from.
    pub source: EvaluationType,
    /// The section the line item belongs to.
    pub section: SectionKind,
    /// The template line item id.
    pub item_id: String,
    /// The item weight within its section, as a percentage.
    pub weight: Decimal,
    /// The rating given to the item.
    pub rating: Decimal,
    /// The item's contribution to the section score (rating * weight / 100).
    pub weighted_points: Decimal,
}

/// The weighted score of one template section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Which evaluation the section was scored from.
    pub source: EvaluationType,
    /// The section.
    pub section: SectionKind,
    /// The section weight within the overall score, as a percentage.
    pub weight: Decimal,
    /// The section score on the rating scale.
    pub score: Decimal,
}

/// Aggregated totals for a score summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTotals {
    /// The employee's overall self-evaluation score.
    pub self_overall: Decimal,
    /// The manager's overall review score.
    pub manager_overall: Decimal,
    /// The blended final score.
    pub final_score: Decimal,
}

/// A single step in the score trace recording an aggregation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during score aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g. "low", "medium", "high").
    pub severity: String,
}

/// The complete trace of a score aggregation.
///
/// Records every decision made while scoring, so a delivered final score
/// can be explained line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTrace {
    /// The sequence of aggregation steps.
    pub steps: Vec<ScoreStep>,
    /// Any warnings generated during aggregation.
    pub warnings: Vec<ScoreWarning>,
    /// The total aggregation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of scoring a review cycle.
///
/// # Example
///
/// ```
/// use evaluation_engine::models::{ScoreSummary, ScoreTotals, ScoreTrace};
/// use chrono::Utc;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let summary = ScoreSummary {
///     summary_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "1.0.0".to_string(),
///     cycle_id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     period_id: "2026_h1".to_string(),
///     template_id: "software_engineer".to_string(),
///     lines: vec![],
///     sections: vec![],
///     totals: ScoreTotals {
///         self_overall: Decimal::ZERO,
///         manager_overall: Decimal::ZERO,
///         final_score: Decimal::ZERO,
///     },
///     trace: ScoreTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Unique identifier for this summary.
    pub summary_id: Uuid,
    /// When the summary was computed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that computed the summary.
    pub engine_version: String,
    /// The review cycle the summary belongs to.
    pub cycle_id: Uuid,
    /// The employee the summary is about.
    pub employee_id: String,
    /// The evaluation period.
    pub period_id: String,
    /// The job template scored against.
    pub template_id: String,
    /// Per-line breakdown from both evaluations.
    pub lines: Vec<ScoreLine>,
    /// Per-section scores from both evaluations.
    pub sections: Vec<SectionScore>,
    /// Overall and blended totals.
    pub totals: ScoreTotals,
    /// Complete trace of aggregation decisions.
    pub trace: ScoreTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_sample_line(points: &str) -> ScoreLine {
        ScoreLine {
            source: EvaluationType::ManagerReview,
            section: SectionKind::Kpis,
            item_id: "delivery_throughput".to_string(),
            weight: dec("60"),
            rating: dec("4"),
            weighted_points: dec(points),
        }
    }

    #[test]
    fn test_section_score_equals_sum_of_line_points() {
        let lines = vec![create_sample_line("2.4"), {
            let mut line = create_sample_line("1.2");
            line.item_id = "defect_rate".to_string();
            line.weight = dec("40");
            line.rating = dec("3");
            line
        }];

        let sum: Decimal = lines.iter().map(|l| l.weighted_points).sum();
        assert_eq!(sum, dec("3.6"));
    }

    #[test]
    fn test_score_line_serialization() {
        let line = create_sample_line("2.4");
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"source\":\"manager_review\""));
        assert!(json.contains("\"section\":\"kpis\""));
        assert!(json.contains("\"weighted_points\":\"2.4\""));
    }

    #[test]
    fn test_score_totals_deserialization() {
        let json = r#"{
            "self_overall": "4.1",
            "manager_overall": "3.7",
            "final_score": "3.82"
        }"#;

        let totals: ScoreTotals = serde_json::from_str(json).unwrap();
        assert_eq!(totals.self_overall, dec("4.1"));
        assert_eq!(totals.manager_overall, dec("3.7"));
        assert_eq!(totals.final_score, dec("3.82"));
    }

    #[test]
    fn test_score_step_serialization() {
        let step = ScoreStep {
            step_number: 1,
            rule_id: "section_score".to_string(),
            rule_name: "Section Score".to_string(),
            input: serde_json::json!({"section": "kpis"}),
            output: serde_json::json!({"score": "3.6"}),
            reasoning: "Weighted average of 2 rated items".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"section_score\""));
    }

    #[test]
    fn test_trace_steps_stay_ordered() {
        let trace = ScoreTrace {
            steps: (1..=3)
                .map(|n| ScoreStep {
                    step_number: n,
                    rule_id: "section_score".to_string(),
                    rule_name: "Section Score".to_string(),
                    input: serde_json::json!({}),
                    output: serde_json::json!({}),
                    reasoning: String::new(),
                })
                .collect(),
            warnings: vec![],
            duration_us: 42,
        };

        let step_numbers: Vec<u32> = trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(step_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_summary_serialization_round_trip() {
        let summary = ScoreSummary {
            summary_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-07-01T09:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            cycle_id: Uuid::nil(),
            employee_id: "emp_001".to_string(),
            period_id: "2026_h1".to_string(),
            template_id: "software_engineer".to_string(),
            lines: vec![create_sample_line("2.4")],
            sections: vec![SectionScore {
                source: EvaluationType::ManagerReview,
                section: SectionKind::Kpis,
                weight: dec("40"),
                score: dec("3.6"),
            }],
            totals: ScoreTotals {
                self_overall: dec("4.1"),
                manager_overall: dec("3.6"),
                final_score: dec("3.75"),
            },
            trace: ScoreTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 100,
            },
        };

        let json = serde_json::to_string(&summary).unwrap();
        let deserialized: ScoreSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, deserialized);
    }
}
