//! Attempt reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Assessment, AssessmentSummary};
use crate::results::{AssessmentResult, PerformanceTier};
use crate::statistics::{compute_breakdown, Breakdown};

/// A graded attempt, ready to be saved or rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// When the attempt began, if it was run rather than graded directly.
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Summary of the assessment.
    pub assessment: AssessmentSummary,
    /// The graded result.
    pub result: AssessmentResult,
    /// Performance band for the result's percentage.
    pub tier: PerformanceTier,
    /// Points per difficulty and per question kind.
    #[serde(default)]
    pub breakdown: Breakdown,
}

impl AttemptReport {
    pub fn new(assessment: &Assessment, result: AssessmentResult) -> Self {
        let breakdown = compute_breakdown(assessment.questions(), &result);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            started_at: assessment.start_time(),
            assessment: assessment.summary(),
            tier: result.tier(),
            result,
            breakdown,
        }
    }

    /// Whether the attempt ran past the assessment's advisory time limit.
    pub fn over_time_limit(&self) -> bool {
        self.result.exceeded(self.assessment.time_limit)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
