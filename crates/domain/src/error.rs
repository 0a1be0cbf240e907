// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::SampleField;

/// Errors that can occur while interpreting or editing domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A sample field name was not recognized.
    UnknownSampleField(String),
    /// A unit system tag was not recognized.
    UnknownUnitSystem(String),
    /// A field edit carried a value of the wrong kind.
    InvalidFieldValue {
        /// The field being edited.
        field: SampleField,
        /// The kind of value the field accepts.
        expected: &'static str,
    },
    /// A swell or dilution factor was negative or not a number.
    NegativeFactor(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSampleField(name) => write!(f, "Unknown sample field '{name}'"),
            Self::UnknownUnitSystem(tag) => {
                write!(f, "Unknown unit system '{tag}'. Must be metric or imperial")
            }
            Self::InvalidFieldValue { field, expected } => {
                write!(f, "Field '{field}' expects a {expected} value")
            }
            Self::NegativeFactor(factor) => {
                write!(f, "Project factor '{factor}' must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for DomainError {}
