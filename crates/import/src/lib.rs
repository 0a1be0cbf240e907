// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delimited-text sample import.
//!
//! Field sheets arrive as comma or semicolon separated text with headers in
//! English, Portuguese or Spanish. This crate maps those headers onto sample
//! fields and turns each usable row into a [`SampleDraft`]. Identifiers are
//! assigned later by the workspace.
//!
//! [`SampleDraft`]: alluvia_domain::SampleDraft

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod delimited;
mod error;
mod headers;

#[cfg(test)]
mod tests;

pub use delimited::{ImportOutcome, MIN_MAPPED_CELLS, import_delimited, import_str};
pub use error::ImportError;
pub use headers::{field_for_header, normalize_header};
