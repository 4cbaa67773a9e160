//! # notewise-llm
//!
//! Abstraction layer over hosted text-generation services. Supports
//! streaming delivery of response fragments in arrival order.

pub mod provider;
pub mod google;
pub mod mock;

pub use provider::{FinishReason, GenerateRequest, GenerateResponse, StreamChunk, TextProvider, TokenUsage};
pub use google::GoogleProvider;
pub use mock::MockProvider;
