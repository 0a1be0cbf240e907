// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ImportError;
use crate::headers::field_for_header;
use alluvia_domain::{SampleDraft, SampleField};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::BTreeMap;
use std::io::Read;
use tracing::{debug, info};

/// Rows with fewer recognized, non-empty cells are discarded.
pub const MIN_MAPPED_CELLS: usize = 3;

/// Result of importing delimited text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    /// Usable rows in input order.
    pub samples: Vec<SampleDraft>,
    /// Data rows dropped for having too few recognized cells.
    pub discarded_rows: usize,
}

/// Reads delimited text from `reader` and converts it into sample drafts.
///
/// # Errors
///
/// Returns an error if the input cannot be read as UTF-8 text or the
/// delimited content cannot be parsed.
pub fn import_delimited<R: Read>(mut reader: R) -> Result<ImportOutcome, ImportError> {
    let mut text: String = String::new();
    reader.read_to_string(&mut text)?;
    import_str(&text)
}

/// Converts delimited text into sample drafts.
///
/// The first non-blank line holds the headers. It also picks the delimiter:
/// `;` when it contains one, `,` otherwise. Blank lines are ignored
/// everywhere.
///
/// # Errors
///
/// Returns an error if the delimited content cannot be parsed.
pub fn import_str(text: &str) -> Result<ImportOutcome, ImportError> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let Some(header_line) = lines.first() else {
        return Ok(ImportOutcome::default());
    };
    if lines.len() < 2 {
        debug!("Import input has no data rows");
        return Ok(ImportOutcome::default());
    }

    let delimiter: u8 = if header_line.contains(';') { b';' } else { b',' };
    let body: String = lines.join("\n");
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(body.as_bytes());

    let columns: Vec<Option<SampleField>> = reader.headers()?.iter().map(field_for_header).collect();
    debug!(
        recognized = columns.iter().flatten().count(),
        total = columns.len(),
        "Mapped import headers"
    );

    let mut outcome: ImportOutcome = ImportOutcome::default();
    for record in reader.records() {
        let record: StringRecord = record?;
        match draft_from_record(&record, &columns) {
            Some(draft) => outcome.samples.push(draft),
            None => outcome.discarded_rows += 1,
        }
    }

    info!(
        imported = outcome.samples.len(),
        discarded = outcome.discarded_rows,
        "Parsed delimited sample import"
    );
    Ok(outcome)
}

/// Builds a draft from the recognized, non-empty cells of one row.
///
/// When two columns map to the same field, the rightmost one wins.
fn draft_from_record(record: &StringRecord, columns: &[Option<SampleField>]) -> Option<SampleDraft> {
    let cells: BTreeMap<SampleField, String> = record
        .iter()
        .zip(columns)
        .filter_map(|(cell, column)| {
            let value: String = cell.replace('"', "").trim().to_string();
            (*column).zip((!value.is_empty()).then_some(value))
        })
        .collect();

    if cells.len() < MIN_MAPPED_CELLS {
        return None;
    }

    let mut draft: SampleDraft = SampleDraft::default();
    for (field, value) in cells {
        match field {
            SampleField::Line => draft.line = value,
            SampleField::Pit => draft.pit = value,
            SampleField::SterileDepth => draft.sterile_depth = parse_number(&value),
            SampleField::GravelDepth => draft.gravel_depth = parse_number(&value),
            SampleField::Area => draft.area = parse_number(&value),
            SampleField::Stones => draft.stones = parse_number(&value).trunc(),
            SampleField::Carats => draft.carats = parse_number(&value),
        }
    }
    Some(draft)
}

/// Parses the leading decimal of a cell, so `1.5m` reads as 1.5. A comma may
/// stand in for the decimal point. A cell with no leading number is 0.
fn parse_number(value: &str) -> f64 {
    let normalized: String = value.replacen(',', ".", 1);
    let prefix: &str = &normalized[..numeric_prefix_len(normalized.as_bytes())];
    prefix
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .unwrap_or(0.0)
}

/// Length of the longest `[+-]digits[.digits][e[+-]digits]` at the start of
/// `bytes`, or 0 when it holds no digit before the exponent.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };

    let mut end: usize = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole: usize = digits_from(end);
    end += whole;
    let mut fraction: usize = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        end += 1 + fraction;
    }
    if whole + fraction == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign: usize = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent: usize = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }
    end
}
