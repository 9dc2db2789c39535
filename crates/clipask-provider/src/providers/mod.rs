//! Transport implementations.

pub mod openai;
pub mod openai_compat;
