use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::plan::ExecutionPlan;

/// Lifecycle status of a submitted proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProposalStatus {
    Accepted,
    Rejected,
    Ignored,
    Pending,
}

/// A historical proposal record as stored in SQLite.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProposalHistoryRow {
    pub id: String,
    pub job_title: String,
    pub client_name: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub status: ProposalStatus,
    pub budget_proposed: f64,
    pub final_cost: Option<f64>,
    pub notes: Option<String>,
    pub quality_score: Option<f64>,
    pub win_probability: Option<f64>,
}

/// Generated proposal output returned to the caller and persisted alongside
/// the history row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalOutput {
    pub proposal_text: String,
    pub execution_plan: ExecutionPlan,
    pub reviewer_feedback: Vec<String>,
    /// 0.0 – 1.0
    pub quality_score: f64,
    /// 0.0 – 1.0
    pub estimated_win_probability: f64,
    pub recommendations: Vec<String>,
}

/// Aggregated success metrics over a trailing window.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessMetrics {
    pub total_proposals: i64,
    pub accepted_proposals: i64,
    /// Percentage, 0 – 100.
    pub win_rate: f64,
    pub average_quality_score: f64,
    pub average_budget: f64,
    pub total_revenue: f64,
    pub period_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ProposalStatus::Accepted).unwrap(),
            r#""accepted""#
        );
        let s: ProposalStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(s, ProposalStatus::Pending);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        assert!(serde_json::from_str::<ProposalStatus>(r#""shortlisted""#).is_err());
    }

    #[test]
    fn test_proposal_output_round_trips() {
        let output = ProposalOutput {
            proposal_text: "Dear client".to_string(),
            execution_plan: ExecutionPlan::from_tasks(vec![], vec![]),
            reviewer_feedback: vec!["tighten the opening".to_string()],
            quality_score: 0.82,
            estimated_win_probability: 0.64,
            recommendations: vec![],
        };
        let json = serde_json::to_string(&output).unwrap();
        let recovered: ProposalOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.proposal_text, "Dear client");
        assert!((recovered.quality_score - 0.82).abs() < f64::EPSILON);
    }
}
