//! Domain layer: org tree, flat index and the reparent algorithm
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod index;
pub mod reparent;
pub mod tree_traits;

pub use arena::{EmployeeNode, OrgArena};
pub use builder::OrgBuilder;
pub use entities::{Employee, EmployeeId};
pub use error::{DomainError, DomainResult};
pub use index::FlatIndex;
pub use reparent::{find_supervisor, reparent, restore, Reparented};
pub use tree_traits::TreeNodeConvert;
