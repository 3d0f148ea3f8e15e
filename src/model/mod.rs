//! # Graph Model
//!
//! Two families of DTOs:
//! - raw elements (`RawNode`, `RawRelationship`, `PathBundle`) exactly as a
//!   Kuzu result row carries them, identified by `InternalId`;
//! - normalized items (`GraphNode`, `GraphEdge`) with derived string ids,
//!   which is what the renderer and the bindings see.
//!
//! This module is pure data without I/O or state.

pub mod node;
pub mod relationship;
pub mod path;
pub mod element;
pub mod graph;
pub mod value;
pub mod property_map;

pub use node::{InternalId, RawNode};
pub use relationship::RawRelationship;
pub use path::PathBundle;
pub use element::{ElementShape, RawElement};
pub use graph::{GraphData, GraphEdge, GraphNode, ItemRef, LABEL_KEY};
pub use value::Value;
pub use property_map::{PropertyMap, property_map, strip_nulls};
