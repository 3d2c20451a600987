//! Anthropic Messages API client
//!
//! The convergence loop only sees the [`Generator`] trait; [`ClaudeClient`]
//! is the production implementation.

mod client;
pub mod pricing;
pub mod types;

use async_trait::async_trait;

pub use client::{ClaudeClient, ClaudeError, DEFAULT_API_URL};
pub use pricing::Model;
pub use types::{Generation, GenerationRequest, Message, Usage};

/// External text-generation capability.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<Generation, ClaudeError>;
}
