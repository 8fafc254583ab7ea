use colored::*;
use recon_common::candidate::Candidate;
use recon_common::config::{Config, NO_RESPONSE_DISPLAY_LIMIT};
use recon_common::error::UnreachableCause;
use recon_common::outcome::ProbeOutcome;
use recon_common::report::Report;
use recon_common::{success, warn};

use crate::terminal::throttle::NoResponseThrottle;
use crate::terminal::{colors, print};
use crate::rprint;

/// Prints a finished report: hits, rejections, capped "no response" lines, then a summary.
pub fn present<C, F>(report: &Report<C>, describe: F, cfg: &Config)
where
    C: Candidate,
    F: Fn(&C) -> String,
{
    render(report, describe, cfg, true);
}

/// Like [`present`], but only hits are listed. Misses still count in the summary.
pub fn present_hits<C, F>(report: &Report<C>, describe: F, cfg: &Config)
where
    C: Candidate,
    F: Fn(&C) -> String,
{
    render(report, describe, cfg, false);
}

fn render<C, F>(report: &Report<C>, describe: F, cfg: &Config, list_misses: bool)
where
    C: Candidate,
    F: Fn(&C) -> String,
{
    let list_misses = list_misses && cfg.quiet < 2;
    let mut throttle = NoResponseThrottle::new(NO_RESPONSE_DISPLAY_LIMIT);

    for finding in report.findings() {
        let name = describe(&finding.candidate);
        match &finding.outcome {
            ProbeOutcome::Success { .. } => {
                success!("{} - {}", name.color(colors::FOUND).bold(), finding.outcome);
            }
            ProbeOutcome::NotFound { .. } if list_misses => {
                print::print_status(format!("{}: {}", name, finding.outcome).color(colors::REJECTED).to_string());
            }
            ProbeOutcome::Unreachable { cause } if list_misses => {
                if *cause != UnreachableCause::Cancelled && throttle.admit() {
                    print::print_status(format!("{}: no response", name).color(colors::NO_RESPONSE).to_string());
                }
            }
            _ => {}
        }
    }

    if throttle.suppressed() > 0 {
        warn!("{} more unreachable candidates suppressed", throttle.suppressed());
    }

    let cancelled = report
        .unreachable()
        .filter(|(_, cause)| **cause == UnreachableCause::Cancelled)
        .count();
    if cancelled > 0 {
        warn!("Run was cancelled: {cancelled} candidates were not probed to completion");
    }

    summary(report, cfg);
}

fn summary<C: Candidate>(report: &Report<C>, cfg: &Config) {
    let counts = report.counts();
    let found: ColoredString = format!("{} found", counts.success).bold().green();
    let rejected: ColoredString = format!("{} rejected", counts.not_found).bold().yellow();
    let unreachable: ColoredString = format!("{} unreachable", counts.unreachable).bold().red();
    let elapsed: ColoredString = format!("{:.2}s", report.elapsed().as_secs_f64()).bold().yellow();
    let output = format!("{found}, {rejected}, {unreachable} in {elapsed}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            rprint!();
            success!("{}", output);
        }
    }
}
