//! Timeline Log Extraction
//!
//! Pulls `Timeline:` records out of application log output and turns them
//! into traces for the chart

mod collector;
mod parser;

pub use collector::{collect_from_reader, TraceCollector};
pub use parser::{add_root_line, parse_trace_line, ROOT_TRACE_NAME};
