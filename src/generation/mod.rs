//! Text generation with a tool-call loop.

pub mod text;

pub use text::{generate_text, GenerateTextResult, GenerationStep, MAX_TOOL_ITERATIONS};
