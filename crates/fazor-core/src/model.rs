//! Semantic phasor model.
//!
//! This module contains the resolved representation of a phasor diagram's
//! contents, after the raw declarative input has been validated and
//! normalized.
//!
//! # Pipeline Position
//!
//! ```text
//! Raw input (flat item lists, degrees, color strings)
//!     ↓ Group::from_items
//! Semantic Model (these types) - radians, parsed colors, explicit resultant
//!     ↓ layout
//! Placed arrows, wedges, bounds
//!     ↓ export
//! SVG / raster
//! ```
//!
//! The raw input marks two things positionally: the final bare string in a
//! group is the unit label, and the final 4-tuple is the resultant vector
//! (the chain's sum, always drawn from the origin). Both conventions are
//! made explicit here as the [`Group::unit`] and [`Group::resultant`]
//! fields.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{color::Color, label::Label};

/// Errors for structurally invalid group input.
///
/// Input is caller-supplied static data; these errors are raised immediately
/// at construction and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("group item list is empty")]
    EmptyGroup,

    #[error("group must end with a bare unit label string")]
    MissingUnit,

    #[error("unit label '{0}' appears before the end of the group")]
    UnitNotLast(String),

    #[error("group '{0}' has a unit label but no vectors")]
    NoVectors(String),

    #[error("{0}")]
    InvalidColor(String),
}

/// One raw item of a group's declarative input.
///
/// A group arrives as a flat ordered list mixing vector 4-tuples with a
/// single trailing unit label, e.g. in JSON:
///
/// ```json
/// [[3.0, 0.0, "U_R", "green"], [4.0, 90.0, "U_L", "blue"], [5.0, 53.13, "U", "pink"], "V"]
/// ```
///
/// The untagged representation lets serde distinguish the two shapes by
/// type alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupItem {
    /// `(magnitude, angle in degrees, label, color)`
    Entry(f32, f32, String, String),
    /// The trailing unit label.
    Unit(String),
}

/// A single phasor: a magnitude/angle pair with a label and a color.
///
/// Angles are stored in radians in the canonical `[0, 2π)` domain; input
/// arrives in degrees and is converted exactly once at construction. A
/// negative input magnitude is canonicalized to `(|m|, θ + π)`, which
/// preserves the described geometry while keeping magnitudes non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorEntry {
    magnitude: f32,
    angle: f32,
    label: Label,
    color: Color,
}

impl VectorEntry {
    /// Creates an entry from raw input values (angle in degrees).
    pub fn new(
        magnitude: f32,
        angle_degrees: f32,
        label: &str,
        color: &str,
    ) -> Result<Self, ModelError> {
        let (magnitude, angle_degrees) = if magnitude < 0.0 {
            (-magnitude, angle_degrees + 180.0)
        } else {
            (magnitude, angle_degrees)
        };

        let color = Color::new(color).map_err(ModelError::InvalidColor)?;

        Ok(Self {
            magnitude,
            angle: angle_degrees.to_radians().rem_euclid(TAU),
            label: Label::parse(label),
            color,
        })
    }

    /// Returns the magnitude (always non-negative).
    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Returns the angle in radians, in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Returns the angle converted back to degrees, in `[0, 360)`.
    pub fn angle_degrees(&self) -> f32 {
        self.angle.to_degrees()
    }

    /// Returns the formatted label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the entry color.
    pub fn color(&self) -> &Color {
        &self.color
    }
}

/// An ordered chain of same-unit phasors terminated by a resultant.
///
/// All chain entries are drawn tip-to-tail; the resultant represents their
/// vector sum and is always drawn from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    chain: Vec<VectorEntry>,
    resultant: VectorEntry,
    unit: Label,
}

impl Group {
    /// Builds a group from its flat declarative item list.
    ///
    /// The list must consist of one or more vector 4-tuples followed by a
    /// single bare unit label. The last tuple becomes the resultant.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the list is empty, does not end with a
    /// unit label, contains a unit label in a non-final position, or has no
    /// vectors at all.
    pub fn from_items(items: &[GroupItem]) -> Result<Self, ModelError> {
        let (last, body) = items.split_last().ok_or(ModelError::EmptyGroup)?;

        let GroupItem::Unit(unit) = last else {
            return Err(ModelError::MissingUnit);
        };

        let mut entries = Vec::with_capacity(body.len());
        for item in body {
            match item {
                GroupItem::Entry(magnitude, angle, label, color) => {
                    entries.push(VectorEntry::new(*magnitude, *angle, label, color)?);
                }
                GroupItem::Unit(stray) => {
                    return Err(ModelError::UnitNotLast(stray.clone()));
                }
            }
        }

        let resultant = entries.pop().ok_or_else(|| ModelError::NoVectors(unit.clone()))?;

        Ok(Self {
            chain: entries,
            resultant,
            unit: Label::parse(unit),
        })
    }

    /// Builds a list of groups from a list of item lists.
    pub fn from_list(lists: &[Vec<GroupItem>]) -> Result<Vec<Self>, ModelError> {
        log::debug!(groups = lists.len(); "Building groups from declarative input");
        lists.iter().map(|items| Self::from_items(items)).collect()
    }

    /// Returns the tip-to-tail chain entries (resultant excluded).
    pub fn chain(&self) -> &[VectorEntry] {
        &self.chain
    }

    /// Returns the resultant vector.
    pub fn resultant(&self) -> &VectorEntry {
        &self.resultant
    }

    /// Returns the group's unit label.
    pub fn unit(&self) -> &Label {
        &self.unit
    }

    /// Iterates over every entry in draw order: the chain, then the
    /// resultant.
    pub fn iter(&self) -> impl Iterator<Item = &VectorEntry> {
        self.chain.iter().chain(std::iter::once(&self.resultant))
    }

    /// Total number of entries, resultant included.
    pub fn len(&self) -> usize {
        self.chain.len() + 1
    }

    /// A group always holds at least its resultant.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the largest magnitude across chain and resultant.
    ///
    /// The per-group render scale is the reciprocal of this value, so the
    /// longest vector in every group draws with unit length.
    pub fn max_magnitude(&self) -> f32 {
        self.iter()
            .map(VectorEntry::magnitude)
            .fold(0.0_f32, f32::max)
    }
}

/// A phase-angle decoration between two groups' resultants.
///
/// Indices are 0-based positions into the diagram's group list; they are
/// validated when the diagram is assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleLink {
    a: usize,
    b: usize,
    color: Color,
}

impl AngleLink {
    pub fn new(a: usize, b: usize, color: Color) -> Self {
        Self { a, b, color }
    }

    /// Index of the first linked group.
    pub fn a(&self) -> usize {
        self.a
    }

    /// Index of the second linked group.
    pub fn b(&self) -> usize {
        self.b
    }

    /// Color for the wedge and its label.
    pub fn color(&self) -> &Color {
        &self.color
    }
}
