//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and persistence into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod medipal_service;
