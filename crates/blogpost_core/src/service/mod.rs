//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep caller layers decoupled from storage details.

pub mod blog_service;
