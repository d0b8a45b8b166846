//! Application layer: the org engine and its use cases
//!
//! This layer orchestrates domain logic: it owns engine state and history and
//! reads org chart literals from files.

pub mod engine;
pub mod error;
pub mod error_ext;
pub mod history;
pub mod loader;

pub use engine::OrgEngine;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use history::{History, HistoryEntry, MoveCommand};
pub use loader::{load_org, parse_org, render_org, OrgFormat};
