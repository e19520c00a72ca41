//! Messages, sampling settings and token accounting shared by the provider
//! and the agents.

mod generation;
mod message;
mod usage;

pub use generation::{FinishReason, GenerationSettings};
pub use message::*;
pub use usage::Usage;
