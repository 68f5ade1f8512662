//! Shared output helpers for commands

use serde::Serialize;

use crate::cli::Cli;
use obetrack_core::error::Result;
use obetrack_core::format::format_score;
use obetrack_core::scoring::RecalcSummary;
use obetrack_core::store::Store;

/// Dispatch on output format; the JSON branch returns a `Result`, the human
/// branch is a block.
///
/// ```rust,ignore
/// output_by_format_result!(cli.format,
///     json => print_json(&value),
///     human => { println!("..."); }
/// )?;
/// ```
macro_rules! output_by_format_result {
    ($format:expr, json => $json:expr, human => $human:block) => {
        match $format {
            ::obetrack_core::format::OutputFormat::Json => $json,
            ::obetrack_core::format::OutputFormat::Human => {
                $human;
                Ok(())
            }
        }
    };
}

pub(crate) use output_by_format_result;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Score rendered with the store's configured precision
pub fn score(store: &Store, value: f64) -> String {
    format_score(value, store.config().display.decimals)
}

/// Human line describing what a recalculation wrote
pub fn print_recalc_human(cli: &Cli, summary: Option<&RecalcSummary>) {
    if cli.quiet {
        return;
    }
    match summary {
        Some(s) => println!(
            "Recalculated {} course(s): {} LO score(s), {} PO score(s)",
            s.courses, s.lo_scores, s.po_scores
        ),
        None => println!("Automatic recalculation is off; run `obetrack recalc` to refresh scores"),
    }
}

/// JSON envelope for a mutation: `{"status": "ok", <key>: value, "recalculated": ...}`
pub fn mutation_json<T: Serialize>(
    key: &str,
    value: &T,
    summary: Option<&RecalcSummary>,
) -> Result<serde_json::Value> {
    let mut output = serde_json::json!({ "status": "ok" });
    output[key] = serde_json::to_value(value)?;
    output["recalculated"] = serde_json::to_value(summary)?;
    Ok(output)
}
