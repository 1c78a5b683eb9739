//! Release report rendering

use std::io::Write;

use anyhow::Result;

use crate::links::LinkOutcome;
use crate::release::ReleaseReport;

/// Write the report as prettified JSON.
pub fn write_report_json(report: &ReleaseReport, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Write a short human-readable summary, one line per link target.
pub fn write_report_plain(report: &ReleaseReport, mut w: impl Write) -> Result<()> {
    writeln!(
        w,
        "{}: terminated {} running instance(s)",
        report.app_name, report.terminated
    )?;

    for link in &report.links {
        writeln!(w, "{:>8}  {}", outcome_label(link.outcome), link.target.display())?;
    }

    writeln!(w, "build ok: {}", report.build_command)?;
    Ok(())
}

fn outcome_label(outcome: LinkOutcome) -> &'static str {
    match outcome {
        LinkOutcome::Created => "linked",
        LinkOutcome::Healed => "healed",
        LinkOutcome::AlreadyPresent => "kept",
        LinkOutcome::LeftInPlace => "kept",
    }
}
