// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors raised while reading delimited sample text.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input could not be read or was not valid UTF-8.
    #[error("Failed to read import input: {0}")]
    Read(#[from] std::io::Error),
    /// The delimited text could not be parsed.
    #[error("Malformed delimited text: {0}")]
    Malformed(#[from] csv::Error),
}
