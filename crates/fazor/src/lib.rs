//! Fazor - phasor diagram rendering for electrical-engineering teaching
//! material.
//!
//! Groups of `(magnitude, angle, label, color)` vectors are laid out as
//! tip-to-tail chains with a resultant from the origin, scaled per group so
//! disparate physical quantities share one chart, then rendered to SVG and
//! optionally rasterized to PNG or JPEG.
//!
//! # Examples
//!
//! ```
//! use fazor::Diagram;
//! use fazor::model::{Group, GroupItem};
//!
//! let groups = Group::from_list(&[vec![
//!     GroupItem::Entry(3.0, 0.0, "U_R".to_string(), "green".to_string()),
//!     GroupItem::Entry(4.0, 90.0, "U_L".to_string(), "blue".to_string()),
//!     GroupItem::Entry(5.0, 53.13, "U".to_string(), "pink".to_string()),
//!     GroupItem::Unit("V".to_string()),
//! ]])?;
//!
//! let diagram = Diagram::new(groups, "RL series circuit");
//! let figure = diagram.render()?;
//! assert!(figure.svg().contains("<svg"));
//! # Ok::<(), fazor::FazorError>(())
//! ```

pub mod config;
pub mod input;

mod diagram;
mod error;
mod export;
mod layout;

pub use fazor_core::{color, draw, geometry, label, model};

pub use config::AppConfig;
pub use diagram::{Diagram, Figure};
pub use error::FazorError;
pub use export::{ExportError, ExportFormat};
pub use input::DiagramInput;
