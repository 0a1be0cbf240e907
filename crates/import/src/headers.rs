// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use alluvia_domain::SampleField;

/// Recognized column headers, already normalized.
const HEADER_SYNONYMS: &[(&str, SampleField)] = &[
    ("line", SampleField::Line),
    ("linha", SampleField::Line),
    ("linea", SampleField::Line),
    ("línea", SampleField::Line),
    ("pit", SampleField::Pit),
    ("poço", SampleField::Pit),
    ("pozo", SampleField::Pit),
    ("sterile (m)", SampleField::SterileDepth),
    ("sterile", SampleField::SterileDepth),
    ("esteril (m)", SampleField::SterileDepth),
    ("estéril (m)", SampleField::SterileDepth),
    ("esteril", SampleField::SterileDepth),
    ("estéril", SampleField::SterileDepth),
    ("gravel (m)", SampleField::GravelDepth),
    ("gravel", SampleField::GravelDepth),
    ("cascalho (m)", SampleField::GravelDepth),
    ("cascalho", SampleField::GravelDepth),
    ("grava (m)", SampleField::GravelDepth),
    ("grava", SampleField::GravelDepth),
    ("area (m²)", SampleField::Area),
    ("area", SampleField::Area),
    ("área (m²)", SampleField::Area),
    ("área", SampleField::Area),
    ("stones", SampleField::Stones),
    ("pedras", SampleField::Stones),
    ("piedras", SampleField::Stones),
    ("carats", SampleField::Carats),
    ("quilates", SampleField::Carats),
];

/// Normalizes a header for lookup: byte order mark and quotes removed,
/// whitespace trimmed, lowercased.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .replace('"', "")
        .trim()
        .to_lowercase()
}

/// Maps a raw header cell onto the sample field it names.
#[must_use]
pub fn field_for_header(header: &str) -> Option<SampleField> {
    let normalized: String = normalize_header(header);
    HEADER_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == normalized)
        .map(|(_, field)| *field)
}
