use std::collections::HashSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

use crate::types::{HarvestReport, YearOutcome, YearTableRow};

/// Upstream limit of ids per artist lookup.
pub const MAX_IDS_PER_LOOKUP: usize = 50;

pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

pub fn delivery_file_name(kind: &str, year: i32, batch_index: Option<usize>, timestamp: &str) -> String {
    match batch_index {
        Some(index) => format!("{kind}_{year}_batch_{index}_{timestamp}.json"),
        None => format!("{kind}_{year}_{timestamp}.json"),
    }
}

/// Keeps the first `MAX_IDS_PER_LOOKUP` ids; the rest are dropped.
pub fn truncate_ids(ids: &[String]) -> &[String] {
    &ids[..ids.len().min(MAX_IDS_PER_LOOKUP)]
}

/// Removes duplicates while keeping first-seen order.
pub fn dedup_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

pub fn payload_digest(payload: &str) -> String {
    let hash = Sha256::digest(payload.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

/// Years of one cycle, newest first. Accepts the bounds in either order.
pub fn year_range(from: i32, to: i32) -> Vec<i32> {
    let (hi, lo) = if from >= to { (from, to) } else { (to, from) };
    (lo..=hi).rev().collect()
}

pub fn report_rows(report: &HarvestReport) -> Vec<YearTableRow> {
    report
        .years
        .iter()
        .map(|outcome| match outcome {
            YearOutcome::Delivered {
                year,
                entities,
                delivered,
                failed,
                unchanged,
            } => YearTableRow {
                year: *year,
                tracks: entities.to_string(),
                delivered: delivered.to_string(),
                failed: failed.to_string(),
                note: if *unchanged > 0 {
                    format!("{unchanged} unchanged")
                } else {
                    String::new()
                },
            },
            YearOutcome::Skipped { year, reason } => YearTableRow {
                year: *year,
                tracks: "-".to_string(),
                delivered: "-".to_string(),
                failed: "-".to_string(),
                note: reason.clone(),
            },
        })
        .collect()
}
