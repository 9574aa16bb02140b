use anyhow::Result;
use std::io::Write;

use crate::report::ConversionReport;

/// Writes the conversion report as JSON, one document followed by a newline.
pub fn export_report(report: &ConversionReport, pretty: bool, output: &mut dyn Write) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    writeln!(output, "{json}")?;
    Ok(())
}
