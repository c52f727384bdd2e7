//! Terminal shell for the dashboard assistant: transcript, request lifecycle,
//! response rendering and the resizable sidebar panel.

pub mod app;
pub mod components;
pub mod content;
pub mod controller;
pub mod event_handler;
pub mod layout;
pub mod state;
pub mod syntax;
pub mod theme;
pub mod transcript;

pub use app::{App, QueryEvent};
pub use content::{Content, Document, render_message};
pub use controller::{Dispatch, ERROR_PREFIX, Phase, RequestController, TurnId, failure_message};
pub use event_handler::{EventHandler, KeyAction};
pub use state::{AppState, ChatSession, InputState, ShellSettings, SidebarWidth};
pub use theme::{Theme, ThemePalette};
pub use transcript::{Message, MessageKind, Role, Transcript, TranscriptRenderer};
