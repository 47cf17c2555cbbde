//! Child-process execution engine for fixture scenarios.

use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scenarios::Scenario;

/// A scenario could not be executed at all (as opposed to failing).
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to spawn fixture `{fixture}`: {source}")]
    Spawn {
        fixture: String,
        source: std::io::Error,
    },
    #[error("fixture stdout was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Outcome of one scenario execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub expected_stdout: Vec<String>,
    pub actual_stdout: Vec<String>,
    pub expected_exit: i32,
    /// `None` when the child was killed by a signal.
    pub actual_exit: Option<i32>,
    /// Captured stderr, for diagnosing failures (panic messages land here).
    pub stderr: String,
}

impl ScenarioResult {
    /// One-line human-readable verdict.
    #[must_use]
    pub fn verdict(&self) -> String {
        if self.passed {
            format!("PASS {}", self.name)
        } else {
            format!(
                "FAIL {} (exit {:?}, expected {}): stdout {:?}, expected {:?}",
                self.name, self.actual_exit, self.expected_exit, self.actual_stdout,
                self.expected_stdout,
            )
        }
    }
}

/// Runs scenarios against a compiled fixture binary.
pub struct ScenarioRunner {
    fixture: PathBuf,
}

impl ScenarioRunner {
    pub fn new(fixture: impl Into<PathBuf>) -> Self {
        Self {
            fixture: fixture.into(),
        }
    }

    /// Execute one scenario in a child process and judge its output.
    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioResult, RunnerError> {
        let output = Command::new(&self.fixture)
            .arg(&scenario.name)
            .output()
            .map_err(|source| RunnerError::Spawn {
                fixture: self.fixture.display().to_string(),
                source,
            })?;

        let stdout = String::from_utf8(output.stdout)?;
        let actual_stdout: Vec<String> = stdout.lines().map(str::to_owned).collect();
        let actual_exit = output.status.code();
        let passed =
            actual_stdout == scenario.expected_stdout && actual_exit == Some(scenario.expected_exit);

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            passed,
            expected_stdout: scenario.expected_stdout.clone(),
            actual_stdout,
            expected_exit: scenario.expected_exit,
            actual_exit,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Execute a batch of scenarios in order.
    pub fn run_all(&self, scenarios: &[Scenario]) -> Result<Vec<ScenarioResult>, RunnerError> {
        scenarios.iter().map(|s| self.run(s)).collect()
    }
}
