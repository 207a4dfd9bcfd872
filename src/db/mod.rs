//! Database module: read access to the scene store.
//!
//! Layout:
//! - `models.rs`: records handed to the page templates
//! - `source.rs`: the `SceneSource` trait
//! - `mongo.rs`: MongoDB-backed source
//! - `memory.rs`: in-process source
//! - `actor.rs`: actor owning the single shared source

pub mod actor;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod source;

pub use actor::{StoreHandle, spawn};
pub use memory::MemorySource;
pub use models::{EncodedImage, ObjectAttribute, PersistentObject, SceneImage, Timestamp};
pub use mongo::{DocumentLayout, MongoSource};
pub use source::SceneSource;
