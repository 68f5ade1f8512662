//! Macros for command timing

/// Trace command execution when `--verbose` is set
///
/// Usage:
/// ```ignore
/// trace_command!(cli, start, "discover_store");
/// ```
macro_rules! trace_command {
    ($cli:expr, $start:expr, $label:literal) => {
        if $cli.verbose {
            ::tracing::debug!(elapsed = ?$start.elapsed(), $label);
        }
    };
}

pub(crate) use trace_command;
