//! ortho-completion
//!
//! Chat-completion invocation and treatment plan generation.

pub mod chat;
pub mod error;
pub mod extract;
pub mod openai;
pub mod plan;
pub mod prompt;
pub mod service;
