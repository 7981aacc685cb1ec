//! # Easel Core
//!
//! Retained-mode 2D scene graph: a tree of drawable components with
//! inherited styling, coordinate-system mapping, and pointer-driven
//! interactive tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 easel-core                  │
//! ├──────────────────────┬──────────────────────┤
//! │  Component Tree      │  Styling             │
//! │  - Arena + handles   │  - Property store    │
//! │  - Parent/children   │  - Ancestor fallback │
//! │  - Geometry dispatch │  - Attribute bundles │
//! ├──────────────────────┼──────────────────────┤
//! │  Coordinates         │  Tools               │
//! │  - Logical↔physical  │  - Pointer routing   │
//! │  - Zoom ratio        │  - Hover/capture     │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Styling flows top-down: a property set on a group is visible on every
//! descendant until a descendant overrides it locally, and selecting a named
//! attribute bundle on a subtree root cascades the selection while each node
//! resolves its own values. Mutations are synchronous and single-threaded;
//! propagation completes before the triggering call returns. Rendering and
//! windowing are external collaborators: backends consume the tree through
//! [`Scene`] and the shape/attribute resolution it exposes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod attributes;
pub mod components;
pub mod coords;
pub mod event;
pub mod geometry;
pub mod hooks;
pub mod node;
pub mod properties;
pub mod scene;
pub mod tools;

pub use attributes::{AttributeBundle, AttributeSet, DEFAULT_BUNDLE};
pub use coords::{default_coordinate_system, CoordinateSystem, IdentityMap, ZoomPanMap};
pub use event::{PointerButton, PointerEvent, PointerKind};
pub use geometry::{Bounds, Point, Shape};
pub use hooks::ComponentHooks;
pub use node::{Node, NodeId, UpdateHook};
pub use properties::{keys, PropValue, PropertyStore};
pub use scene::{Scene, SceneError, SceneResult};
pub use tools::{ToolHandler, ToolHandlers, ToolLayer};

/// Easel core version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
