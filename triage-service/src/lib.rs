//! Collaborators around the triage engine
//! 
//! - **History**: append-only log of encounter summaries with a
//!   "recent patients" replay window
//! - **Advisory assist**: optional second opinion from an external model,
//!   bounded by a timeout and kept apart from the authoritative record
//! - **Service**: wires configuration, engine, history, advisory and
//!   redacted logging into a single `triage` call

pub mod advisory;
pub mod error;
pub mod history;
pub mod service;

pub use advisory::*;
pub use error::*;
pub use history::*;
pub use service::*;
