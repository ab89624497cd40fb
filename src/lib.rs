//! check-node-types - keep `@types/node` in step with your Node.js target.
//!
//! Reads the Node.js version a project declares (`engines.node`,
//! `volta.node`, `.nvmrc`, or `.node-version`), compares its major version
//! with the `@types/node` dependency, and reports pass, fail, or warning
//! with a suggested fix.
//!
//! # Modules
//!
//! - [`checker`] - Declaration lookup and the reconciliation decision table
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`report`] - Human and JSON report formatters
//! - [`ui`] - Output modes and terminal styling
//! - [`version`] - Range and specifier normalization to major versions
//!
//! # Example
//!
//! ```
//! use check_node_types::version::{major_of_specifier, min_major_of_range};
//!
//! assert_eq!(min_major_of_range(">=18 <22"), Some(18));
//! assert_eq!(major_of_specifier("^20.11.0"), Some(20));
//! assert_eq!(major_of_specifier("latest"), None);
//! ```
//!
//! For file-based checks, see [`checker::reconcile`] and the integration
//! tests.

pub mod checker;
pub mod cli;
pub mod error;
pub mod report;
pub mod ui;
pub mod version;

pub use checker::{reconcile, CheckStatus, DeclarationSource, ReconciliationOutcome};
pub use error::{CheckError, Result};
