//! Terminal UI for relaychat.
//!
//! Built with ratatui: a transcript view above an input field with
//! per-session history recall.

pub mod app;
pub mod error;
pub mod input;
pub mod outbox;
pub mod plain;
pub mod transcript_file;

pub use app::{install_panic_hook, restore_terminal, App};
pub use error::{TuiError, TuiResult};
pub use input::{InputAction, InputWidget};
pub use outbox::Outbox;
pub use plain::render_plain;
pub use transcript_file::Transcript;
