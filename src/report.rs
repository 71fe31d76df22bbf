use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::models::{Dataset, ScoredStudent};

pub const REPORT_FILENAME: &str = "Comprehensive_Mental_Health_Report.csv";

pub const RISK_SCORE_COLUMN: &str = "Risk_Score";
pub const RISK_LEVEL_COLUMN: &str = "Risk_Level";

/// The final report table: every original column, in upload order, plus
/// Risk_Score and Risk_Level. Intermediate subscores never appear here.
#[derive(Debug, Clone)]
pub struct Report {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn build_report(dataset: &Dataset, scored: &[ScoredStudent]) -> Report {
    let mut headers = dataset.headers.clone();
    headers.push(RISK_SCORE_COLUMN.to_string());
    headers.push(RISK_LEVEL_COLUMN.to_string());

    let rows = dataset
        .rows
        .iter()
        .zip(scored.iter())
        .map(|(row, student)| {
            let mut cells: Vec<String> = row.iter().map(str::to_string).collect();
            // Pad short rows so the appended columns stay aligned.
            cells.resize(dataset.headers.len(), String::new());
            cells.push(student.risk_score.to_string());
            cells.push(student.risk_level.label().to_string());
            cells
        })
        .collect();

    Report { headers, rows }
}

/// Display ordering: highest risk first.
pub fn ranked(scored: &[ScoredStudent]) -> Vec<ScoredStudent> {
    let mut values = scored.to_vec();
    values.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    values
}

pub fn encode_csv(report: &Report) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&report.headers)?;
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush report bytes: {err}"))
}

/// Memo for the export encoding, keyed by report content. Re-encoding the
/// same report is pure, so a repeated request reuses the previous bytes.
#[derive(Debug, Default)]
pub struct ExportCache {
    entry: Option<(u64, Vec<u8>)>,
}

impl ExportCache {
    pub fn bytes_for(&mut self, report: &Report) -> anyhow::Result<&[u8]> {
        let key = fingerprint(report);
        let stale = !matches!(&self.entry, Some((cached, _)) if *cached == key);
        if stale {
            self.entry = Some((key, encode_csv(report)?));
        }
        Ok(self.entry.as_ref().map(|(_, bytes)| bytes.as_slice()).unwrap_or(&[]))
    }
}

fn fingerprint(report: &Report) -> u64 {
    let mut hasher = DefaultHasher::new();
    report.headers.hash(&mut hasher);
    report.rows.hash(&mut hasher);
    hasher.finish()
}
