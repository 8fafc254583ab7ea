use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

/// A span that shows a spinner for as long as it is entered or instrumenting a future.
pub fn run_span(activity: &str, subject: &str) -> Span {
    let span = info_span!("run", indicatif.pb_show = true);
    span.pb_set_message(
        &format!("{} {}...", activity, subject.color(colors::ACCENT).bold())
            .color(colors::TEXT_DEFAULT)
            .to_string(),
    );
    span
}
