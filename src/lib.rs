//! # dxfcore
//!
//! A pure Rust library for the DXF document model: paper-space layout
//! management, Bézier/B-spline curve tools and MULTILEADER rendering.
//!
//! The document model is held fully in memory. A [`CadDocument`] owns the
//! entity database, the symbol tables and the layout directory; entities
//! are added to layouts and referenced by handle.
//!
//! ## Example
//!
//! ```
//! use dxfcore::{CadDocument, Line, Vector3};
//!
//! let mut doc = CadDocument::new();
//! doc.new_layout("Details").unwrap();
//! doc.set_active_layout("Details").unwrap();
//! let handle = doc
//!     .add_entity("Details", Line::from_points(Vector3::ZERO, Vector3::UNIT_X))
//!     .unwrap();
//! assert!(doc.entity(handle).is_ok());
//! ```

pub mod bbox;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod layouts;
pub mod math;
pub mod notification;
pub mod objects;
pub mod render;
pub mod tables;
pub mod types;

pub use document::{CadDocument, EntityDb};
pub use entities::{
    Entity, EntityType, Hatch, Insert, Line, MText, MultiLeader, Spline, Viewport,
};
pub use error::{DxfError, Result};
pub use layouts::{Layouts, PaperSetup, PlotScale};
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use objects::{Layout, MLeaderStyle};
pub use types::{BoundingBox, Color, Handle, Vector2, Vector3};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
