//! Implementations of [crate::Sheet] for common types

pub mod collections;
pub mod datetime;
pub mod primitives;
