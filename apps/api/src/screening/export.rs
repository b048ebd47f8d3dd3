//! Results exporter — serializes screened results to CSV for download.

use chrono::Utc;
use csv::{QuoteStyle, WriterBuilder};

use crate::screening::records::AnalysisResult;

/// Fixed header row. Written as-is; only data fields get quoted.
pub const CSV_HEADER: &str = "File Name,Candidate Name,Score,Reason";

/// A ready-to-download export: suggested filename plus full file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// Builds the CSV download for a results list, or `None` when there is
/// nothing to export. The filename embeds the current UTC date.
pub fn export_results(results: &[AnalysisResult]) -> anyhow::Result<Option<CsvExport>> {
    if results.is_empty() {
        return Ok(None);
    }
    Ok(Some(CsvExport {
        file_name: format!("resume_analysis_{}.csv", Utc::now().format("%Y-%m-%d")),
        content: to_csv(results)?,
    }))
}

/// Renders rows in list order under the fixed header. Every data field is
/// quoted, internal quotes doubled, rows joined by `\n` with no trailing
/// newline.
pub fn to_csv(results: &[AnalysisResult]) -> anyhow::Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    for row in results {
        writer.write_record([&row.file_name, &row.candidate_name, &row.score, &row.reason])?;
    }
    writer.flush()?;
    let rows = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("finishing CSV buffer: {e}"))?;
    let mut content = format!("{CSV_HEADER}\n{}", String::from_utf8(rows)?);
    if content.ends_with('\n') {
        content.pop();
    }
    Ok(content)
}
