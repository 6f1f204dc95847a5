//! Core types for recette.

pub mod recipe;

pub use recipe::*;
