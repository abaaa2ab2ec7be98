// src/core/mod.rs
pub mod builder;
pub mod catalog;
pub mod connections;
pub mod engine;
pub mod lemma;
pub mod normalizer;
pub mod search;
pub mod types;
