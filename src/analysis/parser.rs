//! Metric extraction from ffmpeg diagnostic text
//!
//! ffmpeg's astats and ebur128 filters write their reports as human-readable
//! log lines. Each metric gets its own pattern, anchored to end-of-line so a
//! value is never read out of a longer line with trailing text. A line that
//! matches no pattern is ignored; a pattern that matches no line leaves its
//! field unset. The parser is pure and never fails.

use crate::types::{LoudnessMetrics, NoiseFloor};
use regex::Regex;
use std::sync::OnceLock;

/// Compiled pattern set, one rule per metric
struct Patterns {
    peak_level: Regex,
    rms_level: Regex,
    noise_floor: Regex,
    integrated: Regex,
    range: Regex,
    range_low: Regex,
    range_high: Regex,
    true_peak: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| Regex::new(pattern).expect("metric pattern is valid");
        Patterns {
            // astats overall statistics. Peak level may be positive on hot
            // masters; RMS and noise floor are only matched with a leading
            // minus, mirroring the upstream report format.
            peak_level: compile(r"Peak level dB:\s*(-?\d+(?:\.\d+)?)\s*$"),
            rms_level: compile(r"RMS level dB:\s*(-\d+(?:\.\d+)?)\s*$"),
            noise_floor: compile(r"Noise floor dB:\s*(-\d+(?:\.\d+)?|-inf)\s*$"),
            // ebur128 summary block
            integrated: compile(r"\bI:\s*(-\d+(?:\.\d+)?)\s*LUFS\s*$"),
            range: compile(r"\bLRA:\s*(\d+(?:\.\d+)?)\s*LU\s*$"),
            range_low: compile(r"\bLRA low:\s*(-\d+(?:\.\d+)?)\s*LUFS\s*$"),
            range_high: compile(r"\bLRA high:\s*(-\d+(?:\.\d+)?)\s*LUFS\s*$"),
            true_peak: compile(r"\bPeak:\s*(-?\d+(?:\.\d+)?)\s*dBFS\s*$"),
        }
    })
}

/// Round to 1 decimal place, half away from zero
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Extract the first capture of `re` in `line` as f64
fn capture_value(re: &Regex, line: &str) -> Option<f64> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse one diagnostic text blob into a metrics record
///
/// Scans line by line; the last match of each pattern wins. In this filter
/// configuration ffmpeg emits every field exactly once, so this is
/// equivalent to first-match-wins.
pub fn parse_diagnostics(name: &str, text: &str) -> LoudnessMetrics {
    let p = patterns();
    let mut metrics = LoudnessMetrics::named(name);

    for line in text.lines() {
        if let Some(v) = capture_value(&p.peak_level, line) {
            metrics.peak_level_db = Some(round1(v));
        }
        if let Some(v) = capture_value(&p.rms_level, line) {
            metrics.rms_level_db = Some(round1(v));
        }
        if let Some(caps) = p.noise_floor.captures(line) {
            if let Some(m) = caps.get(1) {
                metrics.noise_floor_db = if m.as_str() == "-inf" {
                    Some(NoiseFloor::NegativeInfinity)
                } else {
                    m.as_str().parse::<f64>().ok().map(|v| NoiseFloor::Db(round1(v)))
                };
            }
        }
        if let Some(v) = capture_value(&p.integrated, line) {
            metrics.integrated_loudness_lufs = Some(v);
        }
        if let Some(v) = capture_value(&p.range, line) {
            metrics.loudness_range_lu = Some(v);
        }
        if let Some(v) = capture_value(&p.range_low, line) {
            metrics.loudness_range_low_lufs = Some(v);
        }
        if let Some(v) = capture_value(&p.range_high, line) {
            metrics.loudness_range_high_lufs = Some(v);
        }
        if let Some(v) = capture_value(&p.true_peak, line) {
            metrics.true_peak_dbfs = Some(v);
        }
    }

    metrics
}
