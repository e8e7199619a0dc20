//! Error types for Fazor operations.
//!
//! This module provides the main error type [`FazorError`] which wraps the
//! error conditions that can occur while assembling, laying out, and
//! exporting a phasor diagram.

use std::io;

use thiserror::Error;

use fazor_core::model::ModelError;

use crate::export::ExportError;

/// The main error type for Fazor operations.
///
/// Construction-time errors ([`Model`](Self::Model),
/// [`InvalidReference`](Self::InvalidReference)) are raised immediately and
/// never retried: the input is caller-supplied static data, not a transient
/// I/O failure. Rendering and export errors propagate unchanged.
#[derive(Debug, Error)]
pub enum FazorError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("angle link references group {index}, but the diagram has {groups} group(s)")]
    InvalidReference { index: usize, groups: usize },

    #[error(transparent)]
    Export(#[from] ExportError),
}
