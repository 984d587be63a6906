//! DTO modules that bridge services with templates.

pub mod item;
pub mod list;
pub mod stats;
