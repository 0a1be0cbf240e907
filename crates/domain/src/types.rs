// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Identifier of a sample, unique within a session.
pub type SampleId = u64;

/// Identity and geotechnical metadata of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Name of the project owner.
    pub user_name: String,
    /// Identifier of the mining block.
    pub block_id: String,
    /// Display name of the project. Mirrored by the project index.
    pub project_name: String,
    /// Free-text description.
    pub project_description: String,
    /// Project date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Swell factor applied to sterile (overburden) volumes.
    pub swell_factor_sterile: f64,
    /// Swell factor applied to gravel (ore) volumes.
    pub swell_factor_gravel: f64,
    /// Dilution factor, as a percentage of depth units.
    pub dilution_factor: f64,
}

/// Measurement system tag.
///
/// Stored with the project settings but never applied to stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Returns the string tag of this unit system.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(DomainError::UnknownUnitSystem(s.to_string())),
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-project presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// ISO currency code used for monetary display.
    pub default_currency: String,
    /// Unit system tag.
    pub unit_system: UnitSystem,
}

/// One field observation from a borehole or pit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: SampleId,
    pub line: String,
    pub pit: String,
    /// Thickness of the sterile layer.
    pub sterile_depth: f64,
    /// Thickness of the gravel layer.
    pub gravel_depth: f64,
    /// Sampled area.
    pub area: f64,
    /// Number of stones recovered.
    pub stones: f64,
    /// Carat weight recovered.
    pub carats: f64,
}

/// A sample that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleDraft {
    pub line: String,
    pub pit: String,
    pub sterile_depth: f64,
    pub gravel_depth: f64,
    pub area: f64,
    pub stones: f64,
    pub carats: f64,
}

impl Sample {
    /// Creates a blank sample: empty labels and zero measurements.
    #[must_use]
    pub fn blank(id: SampleId) -> Self {
        Self::from_draft(id, SampleDraft::default())
    }

    /// Promotes a draft into a sample with the given identifier.
    #[must_use]
    pub fn from_draft(id: SampleId, draft: SampleDraft) -> Self {
        Self {
            id,
            line: draft.line,
            pit: draft.pit,
            sterile_depth: draft.sterile_depth,
            gravel_depth: draft.gravel_depth,
            area: draft.area,
            stones: draft.stones,
            carats: draft.carats,
        }
    }

    /// Returns the numeric value of a field, or `None` for text fields.
    #[must_use]
    pub const fn number(&self, field: SampleField) -> Option<f64> {
        match field {
            SampleField::Line | SampleField::Pit => None,
            SampleField::SterileDepth => Some(self.sterile_depth),
            SampleField::GravelDepth => Some(self.gravel_depth),
            SampleField::Area => Some(self.area),
            SampleField::Stones => Some(self.stones),
            SampleField::Carats => Some(self.carats),
        }
    }

    /// Returns a copy of this sample with one field replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFieldValue` when a text field is given a
    /// number or a numeric field is given text.
    pub fn with_field(&self, field: SampleField, value: FieldValue) -> Result<Self, DomainError> {
        let mut updated: Self = self.clone();
        match (field, value) {
            (SampleField::Line, FieldValue::Text(text)) => updated.line = text,
            (SampleField::Pit, FieldValue::Text(text)) => updated.pit = text,
            (SampleField::SterileDepth, FieldValue::Number(n)) => updated.sterile_depth = n,
            (SampleField::GravelDepth, FieldValue::Number(n)) => updated.gravel_depth = n,
            (SampleField::Area, FieldValue::Number(n)) => updated.area = n,
            (SampleField::Stones, FieldValue::Number(n)) => updated.stones = n,
            (SampleField::Carats, FieldValue::Number(n)) => updated.carats = n,
            (field, _) => {
                return Err(DomainError::InvalidFieldValue {
                    field,
                    expected: if field.is_numeric() { "numeric" } else { "text" },
                });
            }
        }
        Ok(updated)
    }
}

/// The editable fields of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleField {
    Line,
    Pit,
    SterileDepth,
    GravelDepth,
    Area,
    Stones,
    Carats,
}

impl SampleField {
    /// All fields in table order.
    pub const ALL: [Self; 7] = [
        Self::Line,
        Self::Pit,
        Self::SterileDepth,
        Self::GravelDepth,
        Self::Area,
        Self::Stones,
        Self::Carats,
    ];

    /// Returns the camelCase name used in payloads.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Pit => "pit",
            Self::SterileDepth => "sterileDepth",
            Self::GravelDepth => "gravelDepth",
            Self::Area => "area",
            Self::Stones => "stones",
            Self::Carats => "carats",
        }
    }

    /// Returns whether the field holds a number.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::Line | Self::Pit)
    }
}

impl FromStr for SampleField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownSampleField(s.to_string()))
    }
}

impl std::fmt::Display for SampleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value written into a single sample field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

/// Unit prices, unit costs and recovery assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicParams {
    /// Price per carat.
    pub diamond_price: f64,
    /// Cost per cubic meter of sterile removed.
    pub sterile_removal_cost: f64,
    /// Cost per cubic meter of gravel per unit of distance.
    pub gravel_transport_cost: f64,
    /// Cost per cubic meter of gravel processed.
    pub processing_cost: f64,
    /// Haul distance to the plant.
    pub transport_distance: f64,
    /// Recovery rate, 0-100 by convention.
    pub recovery_rate: f64,
}

/// Identifier of a persisted project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new `ProjectId`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lightweight entry of the project index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectListItem {
    pub id: ProjectId,
    /// Mirrors `Project::project_name` of the stored payload.
    pub name: String,
}

/// The full persisted payload of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub project: Project,
    pub total_block_area: f64,
    pub samples: Vec<Sample>,
    pub economic_params: EconomicParams,
    #[serde(default)]
    pub settings: ProjectSettings,
}
