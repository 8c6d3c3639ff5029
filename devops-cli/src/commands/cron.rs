//! Cron command handler

use anyhow::Result;
use colored::*;

/// Print the crontab for a scan interval
pub fn handle_cron(millis: i64) -> Result<()> {
    let spec = devops_jenkins::millis_to_cron(millis);
    tracing::debug!(millis, spec, "classified scan interval");

    println!("{}", spec);
    if millis <= 0 {
        eprintln!(
            "{} non-positive interval {} scans as often as possible",
            "!".yellow().bold(),
            millis
        );
    }

    Ok(())
}
