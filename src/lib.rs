// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod explore;
pub mod persistence;
pub use crate::core::engine::{JargonEngine, Scan};
pub use crate::error::{CatalogError, Result};
