//! DevOps Core
//!
//! Core types for DevOps pipeline definitions.
//!
//! This crate contains:
//! - Domain types: Pipeline definitions, SCM sources, parameters
//! - DTOs: Loose JSON shapes exchanged with the management API, validated
//!   into domain types on the way in

pub mod domain;
pub mod dto;
pub mod error;

pub use error::{DefinitionError, Result};
