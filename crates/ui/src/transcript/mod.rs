mod message;
mod renderer;
mod store;

pub use message::{Message, MessageKind, Role};
pub use renderer::{RenderOptions, TranscriptRenderer};
pub use store::Transcript;
