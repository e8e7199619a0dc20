//! Fazor Core Types and Definitions
//!
//! This crate provides the foundational types for the Fazor phasor diagram
//! renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Labels**: Subscript-aware label formatting ([`label::Label`])
//! - **Model**: The semantic phasor model ([`model`] module)
//! - **Draw**: Layered SVG draw primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod label;
pub mod model;
