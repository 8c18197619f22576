//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry lookup, parsing and solving into use-case APIs.
//! - Keep front ends decoupled from the typed model.

pub mod decay_service;
