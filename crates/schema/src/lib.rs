//! Typed schema graph.
//!
//! Game types are defined in XML, one type per file. A type composes
//! properties and behaviors from any number of mixin types and adds its own.
//! This crate indexes those definitions into a [`TypeGraph`], persists the
//! graph as a compact cache blob, and answers hierarchy queries.
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`TypeGraph`] | Node table, name index, children index and path tree. |
//! | [`TypeNode`] | One type: identity, traits, mixins, properties, behaviors. |
//! | [`PropertyValue`] | Closed sum over the value kinds with its binary codec. |
//! | [`SchemaOptions`] | Source-build settings (root prefix, minimize mode). |

mod error;
mod graph;
mod node;
pub mod value;

pub use error::{Result, SchemaError};
pub use graph::{SCHEMA_CACHE_FORMAT, SchemaOptions, TypeGraph};
pub use node::{Behavior, Property, TypeIndex, TypeNode};
pub use value::{AssocMap, Color, PropertyValue, ValueError, ValueKind};
