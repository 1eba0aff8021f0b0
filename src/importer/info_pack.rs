// ==========================================
// Info-pack text heuristics
// ==========================================
// The airline info pack is a PDF; PDF text extraction itself is an
// external collaborator consumed behind a trait. The heuristics below
// operate on extracted text: locate the "Inspiration and Example ideas"
// section, drop its point 4, keep the lines that mention alcohol.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde_json::{json, Value};
use std::path::Path;

const SECTION_TITLE: &str = "inspiration and example ideas";

/// Supplies extracted text for an info-pack file.
pub trait PdfTextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> ImportResult<String>;
}

/// Reads pre-extracted UTF-8 text (a `.txt` sidecar of the PDF).
/// A real PDF extractor plugs in through the same trait.
pub struct PlainTextExtractor;

impl PdfTextExtractor for PlainTextExtractor {
    fn extract_text(&self, path: &Path) -> ImportResult<String> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Keep the info-pack lines that describe alcohol handling.
///
/// Heuristics (inherited behavior): scope to the "Inspiration and Example
/// ideas" section when present, remove its point 4, then keep non-empty
/// lines containing "alcohol" (case-insensitive).
pub fn filter_alcohol_lines(text: &str) -> Vec<String> {
    let section = section_text(text);
    drop_point_four(&section)
        .into_iter()
        .filter(|line| line.to_lowercase().contains("alcohol"))
        .collect()
}

/// Substring from the section title onward; the whole text when the
/// title is absent.
fn section_text(text: &str) -> String {
    match text.to_lowercase().find(SECTION_TITLE) {
        Some(start) => text[start..].to_string(),
        None => text.to_string(),
    }
}

/// Trimmed, non-empty lines with numbered point 4 removed (everything
/// from a line starting "4." until the next "5."-"9." or two-digit
/// numbered point).
fn drop_point_four(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut skipping = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if skipping {
            if starts_next_point(line) {
                skipping = false;
            } else {
                continue;
            }
        } else if starts_point_four(line) {
            skipping = true;
            continue;
        }

        lines.push(line.to_string());
    }

    lines
}

fn starts_point_four(line: &str) -> bool {
    line.starts_with("4.")
}

fn starts_next_point(line: &str) -> bool {
    let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        1 => {
            line[1..].starts_with('.') && matches!(digits.as_bytes()[0], b'5'..=b'9')
        }
        2 => line[2..].starts_with('.'),
        _ => false,
    }
}

/// Turn one kept line into a storable record: tab- or comma-separated
/// lines become a parts array, anything else is kept as plain text.
/// Returns (data, raw_text).
pub fn line_to_record(line: &str) -> (Value, String) {
    let data = if line.contains('\t') {
        let parts: Vec<String> = line.split('\t').map(|p| p.trim().to_string()).collect();
        json!({ "parts": parts })
    } else if line.contains(',') {
        let parts: Vec<String> = line.split(',').map(|p| p.trim().to_string()).collect();
        json!({ "parts": parts })
    } else {
        json!({ "text": line })
    };
    (data, line.to_string())
}
