//! Wire types for the hotel comparison backend.
//!
//! This crate contains the serde-serializable types exchanged with the
//! backend over JSON. These types represent the "protocol layer" - the
//! shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the backend: Field names match the backend's snake_case JSON
//! * Lenient on input: Extra keys the backend sends are ignored
//!
//! Session handling, best-deal selection and bookmark caching are built on
//! top of these types in `hotelcmp`.

pub mod auth;
pub mod bookmark;
pub mod error;
pub mod search;

pub use auth::*;
pub use bookmark::*;
pub use error::*;
pub use search::*;
