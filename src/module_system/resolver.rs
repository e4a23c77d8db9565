//! Module key resolution

use crate::error::{GaspmError, Result};

/// Resolve an import specifier to a canonical module key.
///
/// Non-relative specifiers (anything not starting with `.`) are package-style
/// keys and resolve to themselves. Relative specifiers are applied against
/// the importing module's own key: the importer's path segments minus its
/// final segment form the base, then each specifier segment is applied in
/// order (`..` pops one segment, `.` is a no-op, anything else pushes). The
/// result is joined with `/` and `/`-prefixed.
///
/// Popping above the root is an error, not a silent underflow.
pub fn resolve_specifier(specifier: &str, importer: &str) -> Result<String> {
    if !specifier.starts_with('.') {
        return Ok(specifier.to_string());
    }

    // Base directory: the importer's key minus its own filename
    let mut stack: Vec<&str> = importer.split('/').filter(|s| !s.is_empty()).collect();
    stack.pop();

    for segment in specifier.split('/') {
        match segment {
            ".." => {
                if stack.pop().is_none() {
                    return Err(GaspmError::Resolution {
                        specifier: specifier.to_string(),
                        importer: importer.to_string(),
                        reason: "relative path escapes the root".to_string(),
                    });
                }
            }
            "." | "" => {}
            other => stack.push(other),
        }
    }

    Ok(format!("/{}", stack.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_relative_is_verbatim() {
        assert_eq!(resolve_specifier("lodash", "/any/file").unwrap(), "lodash");
        assert_eq!(resolve_specifier("lodash", "/other").unwrap(), "lodash");
        assert_eq!(
            resolve_specifier("@scope/pkg", "/x/y").unwrap(),
            "@scope/pkg"
        );
    }

    #[test]
    fn test_sibling_import() {
        assert_eq!(
            resolve_specifier("./helper", "/lib/main").unwrap(),
            "/lib/helper"
        );
    }

    #[test]
    fn test_dot_is_noop_and_dotdot_pops_one() {
        // Importer /x/y/main has base directory /x/y
        assert_eq!(
            resolve_specifier("./a/../b", "/x/y/main").unwrap(),
            "/x/y/b"
        );
        assert_eq!(
            resolve_specifier("../shared/util", "/x/y/z").unwrap(),
            "/x/shared/util"
        );
    }

    #[test]
    fn test_pop_above_root_errors() {
        let err = resolve_specifier("../../x", "/top").unwrap_err();
        assert!(matches!(err, GaspmError::Resolution { .. }));

        // One level of parent from a root-level file already escapes
        let err = resolve_specifier("../x", "/top").unwrap_err();
        assert!(matches!(err, GaspmError::Resolution { .. }));
    }

    #[test]
    fn test_resolution_is_pure() {
        // Same inputs, same output; no state involved
        for _ in 0..2 {
            assert_eq!(
                resolve_specifier("./a/b/../c", "/p/q").unwrap(),
                "/p/a/c"
            );
        }
    }
}
