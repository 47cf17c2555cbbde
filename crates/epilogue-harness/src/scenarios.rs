//! Built-in fixture scenarios.
//!
//! A scenario names a behavior the `fixture` binary implements and the
//! exact observable outcome it must produce. Expectations are exhaustive on
//! stdout: a line that must *not* appear (a skipped destructor, a silenced
//! handler) is checked by its absence from the full expected sequence.

use serde::{Deserialize, Serialize};

/// Expected observable outcome of one fixture scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier, passed as `argv[1]` to the fixture binary.
    pub name: String,
    /// What the scenario demonstrates.
    pub summary: String,
    /// Exact stdout lines the fixture must emit, in order.
    pub expected_stdout: Vec<String>,
    /// Expected child exit code.
    pub expected_exit: i32,
}

fn scenario(name: &str, summary: &str, expected_stdout: &[&str]) -> Scenario {
    Scenario {
        name: name.to_owned(),
        summary: summary.to_owned(),
        expected_stdout: expected_stdout.iter().map(|&s| s.to_owned()).collect(),
        expected_exit: 0,
    }
}

/// The built-in scenario table.
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![
        scenario(
            "exit_runs_handlers",
            "handlers fire on std::process::exit, in registration order",
            &["registered", "handler first", "handler second"],
        ),
        scenario(
            "return_runs_handlers",
            "handlers fire when main returns normally",
            &["handler only"],
        ),
        scenario(
            "exit_skips_drop",
            "std::process::exit skips Drop, but the termination hook still runs",
            &["handler ran"],
        ),
        scenario(
            "dedup_last_survivor",
            "among same-keyed handlers, only the last one removed fires",
            &["eager run: true", "handler two"],
        ),
        scenario(
            "unregister_silences",
            "a cancelled handler does not fire at exit",
            &["cancelled: true"],
        ),
        scenario(
            "eager_run_fires_once",
            "an eagerly-run handler does not fire a second time at exit",
            &["handler once", "exiting"],
        ),
        scenario(
            "revival_fires_again",
            "re_register revives a cancelled handler",
            &["handler phoenix"],
        ),
        scenario(
            "rekey_moves_dedup_group",
            "re_register moves a handler into another dedup group",
            &["eager run: true", "handler two"],
        ),
        scenario(
            "panic_isolated",
            "a panicking handler does not starve its successors or the exit code",
            &["handler survivor"],
        ),
        scenario(
            "ordered_sweep",
            "the termination sweep preserves registration order across many handlers",
            &[
                "handler one",
                "handler two",
                "handler three",
                "handler four",
                "handler five",
            ],
        ),
        scenario(
            "unregister_all_silences",
            "unregister_all empties the live set without invoking anything",
            &["remaining: 0"],
        ),
        scenario(
            "stale_handle_reports_false",
            "operations on a consumed handle are no-ops reporting false",
            &[
                "handler once",
                "first run: true",
                "second run: false",
                "unregister: false",
            ],
        ),
    ]
}
