//! Console presentation: rendering contract, input and display settings.

pub mod input;
pub mod render;
pub mod settings;

pub use input::{LineInput, StdinInput};
pub use render::{RenderSink, Renderer};
