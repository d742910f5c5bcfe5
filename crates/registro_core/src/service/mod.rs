//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls, derived views and export composition
//!   into use-case level APIs.
//! - Keep UI layers decoupled from storage and formatting details.

pub mod journal_service;
