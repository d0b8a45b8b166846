//! orgchart: an organization chart engine.
//!
//! The org chart is a rooted tree of employees. [`application::OrgEngine`]
//! moves employees between supervisors and keeps a linear undo/redo history
//! of those moves.
//!
//! ```
//! # fn main() -> Result<(), orgchart::domain::DomainError> {
//! use orgchart::application::OrgEngine;
//! use orgchart::domain::Employee;
//!
//! let ceo = Employee::new(0, "CEO").with_subordinates(vec![
//!     Employee::new(1, "CTO").with_subordinates(vec![Employee::new(2, "Dev")]),
//!     Employee::new(3, "CFO"),
//! ]);
//! let mut engine = OrgEngine::new(&ceo)?;
//! engine.move_employee(1, 3)?; // Dev is promoted to report to the CEO
//! assert_eq!(engine.supervisor_of(2), Some(0));
//!
//! assert!(engine.undo());
//! assert_eq!(engine.supervisor_of(2), Some(1));
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
