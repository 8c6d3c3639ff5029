//! Data Transfer Objects
//!
//! Loosely typed JSON shapes used by the management API. Every discriminator
//! is a plain string here and each optional payload is independent; the
//! conversions into domain types reject combinations that do not agree.

pub mod pipeline;
