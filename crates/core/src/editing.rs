// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::{FieldValue, Sample, SampleField};
use serde::{Deserialize, Serialize};

/// How a bulk edit combines its value with each selected sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperation {
    /// Replace the field value.
    Set,
    /// Add to a number, or append to a label.
    Add,
}

/// One edit applied to every selected sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkEdit {
    pub field: SampleField,
    pub operation: BulkOperation,
    /// Raw input. Parsed as a number for numeric fields.
    pub value: String,
}

impl BulkEdit {
    #[must_use]
    pub fn new(field: SampleField, operation: BulkOperation, value: impl Into<String>) -> Self {
        Self {
            field,
            operation,
            value: value.into(),
        }
    }

    /// Parses the raw input for a numeric field.
    ///
    /// # Returns
    ///
    /// `None` for text fields, and for input that is not a finite number.
    fn number(&self) -> Option<f64> {
        if !self.field.is_numeric() {
            return None;
        }
        self.value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    /// Computes the edited copy of `sample`.
    ///
    /// # Returns
    ///
    /// `None` when a numeric field is given input that is not a number. The
    /// sample is then left as it is.
    #[must_use]
    pub fn apply_to(&self, sample: &Sample) -> Option<Sample> {
        let value: FieldValue = match sample.number(self.field) {
            Some(current) => {
                let input: f64 = self.number()?;
                match self.operation {
                    BulkOperation::Set => FieldValue::Number(input),
                    BulkOperation::Add => FieldValue::Number(current + input),
                }
            }
            None => {
                let current: &str = match self.field {
                    SampleField::Pit => &sample.pit,
                    _ => &sample.line,
                };
                match self.operation {
                    BulkOperation::Set => FieldValue::Text(self.value.clone()),
                    BulkOperation::Add => FieldValue::Text(format!("{current}{}", self.value)),
                }
            }
        };
        sample.with_field(self.field, value).ok()
    }
}
