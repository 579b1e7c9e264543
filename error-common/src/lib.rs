//! Common error handling utilities for the triage workspace
//! 
//! This crate provides the error taxonomy shared by the scoring engine and
//! its collaborators, the stable error codes surfaced to intake UIs, and a
//! small context type used when logging failures.
//! 
//! # Error Categories
//! 
//! - **OutOfRangeInput**: a reading, age or height outside its declared display domain
//! - **IncompleteAnswers**: a structured discriminator set with unanswered ids (strict mode only)
//! - **UnknownDiscriminator**: an id that is not part of the discriminator catalogue
//! - **MissingInput**: a required encounter field was never supplied
//! - **InvalidIdentifier**: a malformed patient health id
//! 
//! The engine never clamps or substitutes values. Callers receiving
//! `OutOfRangeInput` must block scoring and request corrected input.
//! 
//! # Example
//! 
//! ```rust
//! use error_common::{TriageError, ErrorContext, codes};
//! 
//! fn check_temperature(celsius: f64) -> Result<f64, TriageError> {
//!     if !(30.0..=43.0).contains(&celsius) {
//!         return Err(TriageError::out_of_range("temperature", celsius, 30.0, 43.0));
//!     }
//!     Ok(celsius)
//! }
//! 
//! let err = check_temperature(29.5).unwrap_err();
//! assert_eq!(err.code(), codes::validation::OUT_OF_RANGE);
//! 
//! let ctx = ErrorContext::new().with_field("temperature");
//! error_common::log_error(&ctx, &err);
//! ```

pub mod types;
pub mod context;
pub mod codes;

pub use types::*;
pub use context::*;
