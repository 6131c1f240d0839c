//! Timeline Line Parsing
//!
//! Recognises lines of the form
//! `JS: Timeline: Runtime: loadLibrary NativeScript  (1497350872497ms. - 1497350872526ms.)`
//! anywhere inside a log line

use once_cell::sync::Lazy;
use regex::Regex;
use timeline_core::Trace;

/// Name of the synthetic trace spanning every other trace.
pub const ROOT_TRACE_NAME: &str = "ALL";

static TIMELINE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Timeline:\s*(\d*.?\d*ms:\s*)?([^:]*:)?(.*)\((\d*.?\d*)ms\.?\s*-\s*(\d*.\d*)ms\.?\)")
        .expect("timeline pattern is valid")
});

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("number pattern is valid")
});

/// Parse the longest numeric prefix of `text`, or NaN if there is none.
///
/// Timestamps are captured loosely, so trailing junk is ignored rather than
/// rejected.
fn parse_leading_number(text: &str) -> f64 {
    LEADING_NUMBER
        .find(text)
        .and_then(|m| m.as_str().trim().parse().ok())
        .unwrap_or(f64::NAN)
}

/// Extract a trace from one log line.
///
/// Returns `None` for lines without a timeline record. The optional
/// `Domain:` prefix becomes the trace's domain; a blank domain is dropped.
pub fn parse_trace_line(line: &str) -> Option<Trace> {
    let captures = TIMELINE_LINE.captures(line)?;

    let domain = captures
        .get(2)
        .map(|m| m.as_str().trim().trim_end_matches(':').trim())
        .filter(|d| !d.is_empty());
    let name = captures.get(3).map_or("", |m| m.as_str()).trim();
    let from = parse_leading_number(captures.get(4).map_or("", |m| m.as_str()));
    let to = parse_leading_number(captures.get(5).map_or("", |m| m.as_str()));

    let trace = Trace::new(name, from, to);
    Some(match domain {
        Some(domain) => trace.with_domain(domain),
        None => trace,
    })
}

/// Append a root trace spanning all of `traces`. Does nothing for an empty list.
pub fn add_root_line(traces: &mut Vec<Trace>) {
    if traces.is_empty() {
        return;
    }
    let (from, to) = traces
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(from, to), trace| {
            (from.min(trace.from), to.max(trace.to))
        });
    traces.push(Trace::new(ROOT_TRACE_NAME, from, to));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_line() {
        let trace =
            parse_trace_line("JS: Timeline: Runtime: loadLibrary NativeScript  (1497350872497ms. - 1497350872526ms.)")
                .unwrap();
        assert_eq!(
            trace,
            Trace::new("loadLibrary NativeScript", 1497350872497.0, 1497350872526.0).with_domain("Runtime")
        );
    }

    #[test]
    fn test_parse_fractional_timestamps() {
        let trace = parse_trace_line(
            "JS: Timeline: Modules: NativeScriptRenderer.appendChild  (1497350886979.168ms. - 1497350886979.248ms.)",
        )
        .unwrap();
        assert_eq!(trace.domain.as_deref(), Some("Modules"));
        assert_eq!(trace.name, "NativeScriptRenderer.appendChild");
        assert_eq!(trace.from, 1497350886979.168);
        assert_eq!(trace.to, 1497350886979.248);
    }

    #[test]
    fn test_non_timeline_line() {
        assert_eq!(parse_trace_line("1:59:56 PM - Compilation complete. Watching for file changes."), None);
        assert_eq!(parse_trace_line(""), None);
    }

    #[test]
    fn test_line_without_domain() {
        let trace = parse_trace_line("Timeline: startup (10ms - 25ms)").unwrap();
        assert_eq!(trace, Trace::new("startup", 10.0, 25.0));
    }

    #[test]
    fn test_relative_timestamp_prefix_is_skipped() {
        let trace = parse_trace_line("Timeline: 12.5ms: Runtime: boot (100ms - 140ms)").unwrap();
        assert_eq!(trace.domain.as_deref(), Some("Runtime"));
        assert_eq!(trace.name, "boot");
        assert_eq!((trace.from, trace.to), (100.0, 140.0));
    }

    #[test]
    fn test_missing_start_is_nan() {
        let trace = parse_trace_line("Timeline: odd (ms - 5ms)").unwrap();
        assert!(trace.from.is_nan());
        assert_eq!(trace.to, 5.0);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(parse_leading_number("12.5"), 12.5);
        assert_eq!(parse_leading_number(".5x"), 0.5);
        assert_eq!(parse_leading_number("7."), 7.0);
        assert!(parse_leading_number("").is_nan());
        assert!(parse_leading_number("abc").is_nan());
    }

    #[test]
    fn test_root_line_single_trace() {
        let mut traces = vec![Trace::new("one", 10.0, 20.0)];
        add_root_line(&mut traces);
        assert_eq!(traces, vec![Trace::new("one", 10.0, 20.0), Trace::new("ALL", 10.0, 20.0)]);
    }

    #[test]
    fn test_root_line_multiple_traces() {
        let mut traces = vec![Trace::new("one", 10.0, 20.0), Trace::new("two", 15.0, 25.0)];
        add_root_line(&mut traces);
        assert_eq!(traces[2], Trace::new("ALL", 10.0, 25.0));
    }

    #[test]
    fn test_root_line_empty_is_noop() {
        let mut traces = Vec::new();
        add_root_line(&mut traces);
        assert!(traces.is_empty());
    }
}
