//! Foundation types for alike.
//!
//! This crate provides the dynamic value graph that the comparison engine
//! walks, and the capability that turns ordinary Rust values into it.
//!
//! # Key Types
//!
//! - [`Value`] — Cheap-to-clone handle: null, missing, leaf, list, set, map, record
//! - [`Node`] / [`NodeId`] — Shared, lockable storage with stable identity
//! - [`Scalar`] / [`Temporal`] — Leaf values
//! - [`Key`] — Mapping keys
//! - [`Record`] — Named, ordered members of a composite
//! - [`Describe`] — Capability for converting Rust values into a [`Value`]
//! - [`Kind`] / [`classify`] — Structural classification

pub mod describe;
pub mod error;
pub mod key;
pub mod kind;
pub mod node;
pub mod property;
pub mod record;
pub mod scalar;
pub mod temporal;
pub mod value;

pub use describe::Describe;
pub use error::{ValueError, ValueResult};
pub use key::{Key, ToKey};
pub use kind::{classify, Kind};
pub use node::{Node, NodeId};
pub use record::Record;
pub use scalar::Scalar;
pub use temporal::{Temporal, TemporalAxis, TimeUnit};
pub use value::Value;
