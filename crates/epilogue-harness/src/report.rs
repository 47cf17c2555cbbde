//! Evidence report for a conformance run.

use serde::{Deserialize, Serialize};

use crate::runner::ScenarioResult;

/// Machine-readable record of one full conformance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Path of the fixture binary that was exercised.
    pub fixture: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl ConformanceReport {
    #[must_use]
    pub fn new(fixture: impl Into<String>, results: Vec<ScenarioResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        Self {
            fixture: fixture.into(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text summary, one verdict line per scenario.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            out.push_str(&result.verdict());
            out.push('\n');
        }
        out.push_str(&format!(
            "{}/{} scenarios passed against {}\n",
            self.passed, self.total, self.fixture
        ));
        out
    }
}
