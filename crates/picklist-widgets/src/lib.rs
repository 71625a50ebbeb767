//! The **picklist** select control.
//!
//! A [`Select`] is a trigger showing the current choice plus a list of
//! options that opens below it. It is driven by the shared
//! [`picklist_core::Document`] listeners it registers when built, draws
//! through any [`picklist_core::Surface`], and publishes `"change"`,
//! `"open"` and `"close"` events to its subscribers.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | The public [`Select`] handle and its document wiring |
//! | [`controller`] | Selection state machine and queued notifications |
//! | [`router`] | Key and click routing into the controller |
//! | [`state`] | Open state and the presentation flags derived from it |
//! | [`terminal`] | [`TerminalSurface`](terminal::TerminalSurface), a ratatui renderer |
//! | [`config`] | [`SelectConfig`], optionally loaded from TOML |
//! | [`error`] | [`SelectError`] and [`ConfigError`] |

pub mod config;
pub mod controller;
pub mod error;
pub mod router;
pub mod select;
pub mod state;
pub mod terminal;

pub use config::{SelectConfig, DEFAULT_PLACEHOLDER};
pub use controller::{ItemRef, Selection, CHANGE, CLOSE, OPEN};
pub use error::{ConfigError, SelectError};
pub use select::Select;
pub use terminal::{SurfaceStyle, TerminalSurface};
