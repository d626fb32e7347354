//! Core types and utilities for the relaychat TUI.
//!
//! This crate provides foundational types shared across all TUI crates:
//! - Theme system with color definitions
//! - Localizable labels for system notices
//! - Event handling

pub mod event;
pub mod labels;
pub mod theme;

pub use event::{is_enter, is_quit, Event, EventHandler, EventLoopHandle};
pub use labels::Labels;
pub use theme::Theme;
