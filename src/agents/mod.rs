//! Prompt generation.
//!
//! Two rendering paths: a per-person persona prompt and the
//! organization-wide HR-assistant prompt. Both are pure string builders;
//! data fetching happens in the services layer so the templates stay
//! deterministic and testable.

pub mod common;
pub mod hr_assistant;
pub mod persona;
