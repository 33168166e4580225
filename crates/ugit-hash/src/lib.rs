//! Object identity for the ugit implementation.
//!
//! This crate provides the `ObjectId` type, hash computation over
//! `kind‖0x00‖payload`, and hex encoding/decoding.

mod error;
pub mod hex;
mod oid;
pub mod hasher;

pub use error::HashError;
pub use oid::ObjectId;
