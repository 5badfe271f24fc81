//! Language-model collaborator boundary.
//!
//! The core treats the model as an opaque request/response endpoint: a
//! system prompt plus history goes in, text comes out. The only provider
//! implemented speaks the OpenAI-compatible chat-completions protocol.

pub mod common;
pub mod openai;

pub use common::{ChatMessage, ChatRole, CompletionRequest, LanguageModel};
pub use openai::OpenAiProvider;
