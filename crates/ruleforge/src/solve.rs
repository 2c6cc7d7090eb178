//! Search entry point that hides the begin/step/end loop.

use ruleforge_config::SearchConfig;
use ruleforge_core::{Dataset, Result};
use ruleforge_solver::{BranchAndBound, SearchOutcome, TraceSink};
use tracing_subscriber::EnvFilter;

/// Largest node budget handed to a single `step` call by [`solve`].
pub const SOLVE_CHUNK: usize = 10_000;

/// Runs a search until the frontier is exhausted or the configured
/// `max_num_nodes` cap is reached.
///
/// A capped search ends early: the returned outcome keeps the arena,
/// frontier and equivalence map in [`SearchOutcome::retained`], and its
/// `exhausted` flag is false.
///
/// # Errors
///
/// Returns an error if the configuration is invalid. A trace file that
/// could not be written is reported in [`SearchOutcome::trace_error`].
pub fn solve<'a>(
    dataset: &'a Dataset,
    config: &SearchConfig,
    trace: TraceSink,
) -> Result<SearchOutcome<'a>> {
    let mut search = BranchAndBound::begin(dataset, config, trace)?;
    let cap = config.max_num_nodes;

    while search.num_nodes() < cap {
        let budget = (cap - search.num_nodes()).min(SOLVE_CHUNK);
        if !search.step(budget) {
            break;
        }
    }

    let exhausted = search.queue().is_empty();
    Ok(search.end(!exhausted))
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Safe to call multiple times - only the first call has effect, and an
/// already installed global subscriber is left alone.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
