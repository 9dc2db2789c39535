//! Command implementations.

pub mod ask;
