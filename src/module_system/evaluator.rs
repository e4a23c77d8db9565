//! Evaluation boundary for fetched package source

use crate::error::Result;
use crate::module_system::scope::ModuleScope;

/// The seam between the shim and whatever actually executes JavaScript.
///
/// gaspm never evaluates source text itself: on the platform that job
/// belongs to the Apps Script runtime, and an embedding host brings its own
/// engine. An implementation receives the raw source text and the scope the
/// module evaluates in; anything the source assigns to `module.exports` goes
/// through [`ModuleScope::set_exports`], and its `require()` calls go through
/// [`ModuleScope::require`].
///
/// No sandboxing is implied. Evaluation errors propagate to the installer,
/// which fails loudly rather than skipping the package.
pub trait Evaluator {
    /// Evaluate `source` inside `scope`.
    fn evaluate(&mut self, source: &str, scope: &mut ModuleScope<'_>) -> Result<()>;
}
