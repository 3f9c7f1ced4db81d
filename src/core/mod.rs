//! Core library components.
//!
//! This module contains the reusable logic for the encrypted store, the
//! protection layer, secret generation, and breach checks.

pub mod breach;
pub mod config;
pub mod constants;
pub mod document;
pub mod generator;
pub mod protect;
pub mod store;
pub mod types;
pub mod validation;
