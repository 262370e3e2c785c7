//! Records mirrored from the LexiLearn API.
//!
//! Nothing here enforces invariants the server owns. These are transient copies, last write wins.

pub mod entity;

mod resource;
pub use resource::{Identified, Ref, ResourceType, ResourceTyped};
