//! # ComponentAI Codegen
//!
//! The generation side of ComponentAI: from a plain-language description to a
//! self-contained HTML component.
//!
//! ## Features
//!
//! - **Prompt**: the fixed instruction template sent to the model
//! - **Client**: the `ModelClient` seam and the Gemini REST implementation
//! - **Extract**: pulling the first fenced code block out of a response
//! - **Pipeline**: single-flight orchestration with a deadline and cancellation
//!

// ============================================================================
// Modules
// ============================================================================

pub mod client;
pub mod extract;
pub mod pipeline;
pub mod prompt;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{GeminiClient, ModelClient};
pub use extract::{extract_code, has_fence};
pub use pipeline::{GenerationPipeline, GenerationRequest};
pub use prompt::{PromptOptions, build_prompt};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
