//! **picklist** -- a dropdown select control for [`ratatui`] applications.
//!
//! This is the umbrella crate that re-exports everything needed to put a
//! select control on screen from a single dependency:
//!
//! ```toml
//! [dependencies]
//! picklist = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`picklist_core`] are available at the crate root
//!   ([`Document`], [`EventEmitter`], [`Surface`], [`InputEvent`], etc.).
//! * The [`widgets`] module re-exports everything from [`picklist_widgets`],
//!   and the most used items ([`Select`], [`SelectConfig`],
//!   [`TerminalSurface`]) are also available at the root.
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use picklist::{Document, HostTarget, InputEvent, Select, TerminalSurface};
//!
//! let document = Document::new();
//! let select = Select::new(
//!     ["Apple", "Banana", "Cherry"],
//!     TerminalSurface::new(),
//!     &document,
//!     HostTarget::Body,
//! );
//! select.subscribe("change", |label| println!("picked {label}"));
//!
//! // In the event loop:
//! if let Some(input) = InputEvent::from_terminal(&event) {
//!     document.dispatch(&input);
//! }
//! terminal.draw(|frame| select.surface().render(frame, frame.area()))?;
//! ```

pub use picklist_core::*;
pub use picklist_widgets::{Select, SelectConfig, SelectError, TerminalSurface};
pub mod widgets {
    pub use picklist_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
