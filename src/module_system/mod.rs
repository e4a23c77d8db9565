//! CommonJS-style module system for the Apps Script shim.
//!
//! Fetched package code is organized into named modules through a minimal
//! `require` / `module.exports` pair:
//!
//! - a process-wide [`ModuleRegistry`] maps module keys to exported values,
//!   write-once per key;
//! - [`resolve_specifier`] turns an import specifier plus the importing
//!   module's own key into a canonical key (relative specifiers walk the
//!   importer's path segments);
//! - a [`ModuleScope`] is handed to the evaluation boundary for each package,
//!   binding `require` and the exports setter to that package's key.
//!
//! Module identity is always explicit. The registry never infers a caller's
//! key from the execution context; whoever evaluates a module says up front
//! which key it registers under.

mod registry;
mod resolver;
mod scope;

pub mod evaluator;

pub use evaluator::Evaluator;
pub use registry::ModuleRegistry;
pub use resolver::resolve_specifier;
pub use scope::ModuleScope;
