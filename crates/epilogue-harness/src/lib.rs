//! Process-level conformance harness for the epilogue registry.
//!
//! Termination behavior can only be observed across a real process
//! boundary: each scenario is implemented by the `fixture` binary, executed
//! in a child process, and judged by its stdout line sequence and exit
//! code. The crate provides:
//!
//! - [`scenarios`]: the built-in scenario table (name, expectations)
//! - [`runner`]: child-process execution and comparison
//! - [`report`]: JSON evidence report plus a rendered summary
//! - `harness` binary: CLI over the above
//! - `fixture` binary: the scenario implementations themselves

#![forbid(unsafe_code)]

pub mod report;
pub mod runner;
pub mod scenarios;

pub use report::ConformanceReport;
pub use runner::{RunnerError, ScenarioResult, ScenarioRunner};
pub use scenarios::Scenario;
