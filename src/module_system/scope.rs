//! Per-evaluation module scope

use serde_json::Value;

use crate::error::Result;
use crate::module_system::registry::ModuleRegistry;
use crate::module_system::resolver::resolve_specifier;

/// The `module` / `require` pair bound to one module evaluation.
///
/// A scope carries the key the module under evaluation registers under:
/// a package's declared name when the installer drives the evaluation, or
/// a `/`-prefixed file key for project-local modules. There is no ambient
/// "currently evaluating" state anywhere; the scope is the only carrier.
pub struct ModuleScope<'a> {
    registry: &'a mut ModuleRegistry,
    key: String,
}

impl<'a> ModuleScope<'a> {
    /// Create a scope that registers under `key`.
    pub fn new(registry: &'a mut ModuleRegistry, key: impl Into<String>) -> Self {
        Self {
            registry,
            key: key.into(),
        }
    }

    /// The key this scope registers under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The `module.exports =` setter: registers `value` under this scope's
    /// key. Write-once; a second assignment in the same scope (or a key
    /// collision with an earlier module) is a duplicate-registration error.
    pub fn set_exports(&mut self, value: Value) -> Result<()> {
        self.registry.register(&self.key, value)
    }

    /// The `require()` read: resolves `specifier` against this scope's key
    /// and returns the registered exports.
    pub fn require(&self, specifier: &str) -> Result<Value> {
        let key = resolve_specifier(specifier, &self.key)?;
        self.registry.lookup(&key).map(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaspmError;
    use serde_json::json;

    #[test]
    fn test_exports_register_under_scope_key() {
        let mut registry = ModuleRegistry::new();

        let mut scope = ModuleScope::new(&mut registry, "moment");
        scope.set_exports(json!({"now": true})).unwrap();

        assert_eq!(registry.lookup("moment").unwrap(), &json!({"now": true}));
    }

    #[test]
    fn test_second_export_in_scope_fails() {
        let mut registry = ModuleRegistry::new();
        let mut scope = ModuleScope::new(&mut registry, "pkg");

        scope.set_exports(json!(1)).unwrap();
        let err = scope.set_exports(json!(2)).unwrap_err();
        assert!(matches!(err, GaspmError::DuplicateModule(_)));
    }

    #[test]
    fn test_require_resolves_relative_to_scope() {
        let mut registry = ModuleRegistry::new();
        registry.register("/lib/util", json!("util")).unwrap();

        let scope = ModuleScope::new(&mut registry, "/lib/main");
        assert_eq!(scope.require("./util").unwrap(), json!("util"));

        let err = scope.require("./missing").unwrap_err();
        assert!(matches!(err, GaspmError::ModuleNotFound(_)));
    }

    #[test]
    fn test_require_package_name_ignores_scope() {
        let mut registry = ModuleRegistry::new();
        registry.register("lodash", json!(true)).unwrap();

        let scope = ModuleScope::new(&mut registry, "/deeply/nested/file");
        assert_eq!(scope.require("lodash").unwrap(), json!(true));
    }
}
