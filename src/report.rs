//! Reporters for the load report
//!
//! Ready-made callbacks for [`Loader::reporter`](crate::Loader::reporter).

use crate::registry::LoadReport;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::{self, Write};
use tracing::{error, info};

/// Message attached to every rendered report
pub const REPORT_MESSAGE: &str =
    "envconf: show environment variables used by configuration and whether they are set";

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(rename = "environment-variables")]
    environment_variables: &'a LoadReport,
    message: &'static str,
}

/// Write `report` as an indented JSON object followed by a newline.
pub fn write_json<W: Write>(mut writer: W, report: &LoadReport) -> io::Result<()> {
    let body = JsonReport {
        environment_variables: report,
        message: REPORT_MESSAGE,
    };
    let mut serializer =
        Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    body.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Render `report` as the JSON document written by [`write_json`].
pub fn render_json(report: &LoadReport) -> io::Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, report)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

/// Reporter writing the JSON report to `writer`.
///
/// Write failures are logged and never fail the load.
pub fn json_writer<W: Write>(writer: W) -> impl FnOnce(&LoadReport) {
    move |report| {
        if let Err(e) = write_json(writer, report) {
            error!(error = %e, "failed to write environment variable report");
        }
    }
}

/// Reporter emitting one `tracing` event per consulted variable.
pub fn log_with_tracing() -> impl FnOnce(&LoadReport) {
    |report| {
        for (key, set) in report {
            info!(key, set, "environment variable");
        }
        info!(
            total = report.len(),
            set = report.set_keys().count(),
            "{REPORT_MESSAGE}"
        );
    }
}
