//! # Input Loading
//!
//! Reads the rooms and students JSON documents and turns them into validated
//! `core_types` records. Every check happens here, before the store is
//! touched, so a bad input never leaves a half-loaded database behind.

pub mod error;
pub mod loader;
pub mod records;

pub use error::IngestError;
pub use loader::{Dataset, JsonDataLoader, parse_rooms, parse_students};
pub use records::{RoomRecord, StudentRecord};
