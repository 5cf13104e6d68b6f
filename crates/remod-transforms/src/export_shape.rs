//! Cross-file export-shape inference.
//!
//! Resolves a relative specifier to a sibling file and scans its text for the
//! statically observable export markers. This is a presence check, not a
//! parse: it answers "does this module have a default export" and "does it
//! have any named export" the same way a reviewer grepping the file would.
//! Resolution is total: a specifier that matches nothing on disk yields the
//! empty shape, identical to a file with no exports, so a missing sibling
//! never blocks a unit's transformation.

use remod_common::Host;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::path::{Component, Path, PathBuf};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportShape {
    pub has_default: bool,
    pub has_named: bool,
}

/// Suffixes tried, in order, after the exact path.
const FILE_SUFFIXES: &[&str] = &[".js", ".mjs", ".cjs"];

const INDEX_FILE: &str = "index.js";

/// Shared, per-run resolver with a cache keyed by resolved file path.
pub struct ShapeResolver<'a> {
    host: &'a dyn Host,
    cache: RefCell<FxHashMap<PathBuf, ExportShape>>,
}

impl<'a> ShapeResolver<'a> {
    pub fn new(host: &'a dyn Host) -> Self {
        ShapeResolver {
            host,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    /// Shape of the module `specifier` refers to, resolved against the unit
    /// at `from_path`. Never errors.
    pub fn resolve(&self, specifier: &str, from_path: &Path) -> ExportShape {
        let Some(file) = self.resolve_file(specifier, from_path) else {
            return ExportShape::default();
        };
        if let Some(shape) = self.cache.borrow().get(&file) {
            return *shape;
        }
        let shape = match self.host.read_text(&file) {
            Some(text) => shape_of(&text),
            None => ExportShape::default(),
        };
        self.cache.borrow_mut().insert(file, shape);
        shape
    }

    /// Resolve a relative specifier to an existing file: exact path, then
    /// each module-file suffix, then the directory index.
    pub fn resolve_file(&self, specifier: &str, from_path: &Path) -> Option<PathBuf> {
        if !specifier.starts_with('.') {
            return None;
        }
        let base = resolve_specifier(from_path, specifier);

        if self.is_file(&base) {
            return Some(base);
        }
        for suffix in FILE_SUFFIXES {
            let candidate = append_suffix(&base, suffix);
            if self.is_file(&candidate) {
                return Some(candidate);
            }
        }
        let index = base.join(INDEX_FILE);
        if self.is_file(&index) {
            return Some(index);
        }
        None
    }

    fn is_file(&self, path: &Path) -> bool {
        self.host.exists(path) && !self.host.is_dir(path)
    }
}

/// Join a relative specifier onto the directory of `from_path` and normalize
/// away `.` and `..` components, so host lookups see canonical keys.
pub fn resolve_specifier(from_path: &Path, specifier: &str) -> PathBuf {
    let dir = from_path.parent().unwrap_or_else(|| Path::new(""));
    normalize(&dir.join(specifier))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out
}

pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Textual presence scan for export markers.
fn shape_of(text: &str) -> ExportShape {
    let mut shape = ExportShape::default();
    for (pos, _) in text.match_indices("export") {
        let rest = &text[pos + "export".len()..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            continue; // no whitespace after the keyword
        }
        if let Some(after_default) = trimmed.strip_prefix("default") {
            if after_default.starts_with(char::is_whitespace) {
                shape.has_default = true;
            }
        }
        if trimmed.starts_with('{')
            || ["const", "function", "class", "let", "var", "async"]
                .iter()
                .any(|kw| {
                    trimmed
                        .strip_prefix(kw)
                        .is_some_and(|r| r.starts_with(|c: char| !is_ident_char(c)))
                })
        {
            shape.has_named = true;
        }
        if shape.has_default && shape.has_named {
            break;
        }
    }
    shape
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use remod_common::MemoryHost;

    #[test]
    fn shape_markers() {
        assert_eq!(
            shape_of("export default function () {}"),
            ExportShape {
                has_default: true,
                has_named: false
            }
        );
        assert_eq!(
            shape_of("export const a = 1;\nexport function b() {}"),
            ExportShape {
                has_default: false,
                has_named: true
            }
        );
        assert_eq!(
            shape_of("export { a, b };"),
            ExportShape {
                has_default: false,
                has_named: true
            }
        );
        assert_eq!(shape_of("module.exports = {};"), ExportShape::default());
        assert_eq!(
            shape_of("const exporter = 1;"),
            ExportShape::default(),
            "keyword must be followed by whitespace"
        );
    }

    #[test]
    fn resolution_order() {
        let mut host = MemoryHost::new();
        host.insert("/p/a.js", "export default 1;");
        host.insert("/p/b/index.js", "export const x = 1;");
        let resolver = ShapeResolver::new(&host);

        assert_eq!(
            resolver.resolve_file("./a", Path::new("/p/unit.js")),
            Some(PathBuf::from("/p/a.js"))
        );
        assert_eq!(
            resolver.resolve_file("./b", Path::new("/p/unit.js")),
            Some(PathBuf::from("/p/b/index.js"))
        );
        assert_eq!(resolver.resolve_file("./missing", Path::new("/p/unit.js")), None);
        assert_eq!(resolver.resolve_file("fs", Path::new("/p/unit.js")), None);
    }

    #[test]
    fn resolve_is_total() {
        let host = MemoryHost::new();
        let resolver = ShapeResolver::new(&host);
        assert_eq!(
            resolver.resolve("./nowhere", Path::new("/p/unit.js")),
            ExportShape::default()
        );
    }

    #[test]
    fn parent_segments_normalize() {
        let mut host = MemoryHost::new();
        host.insert("/p/models/index.js", "export class User {}");
        let resolver = ShapeResolver::new(&host);
        let shape = resolver.resolve("../models", Path::new("/p/api/unit.js"));
        assert!(shape.has_named);
        assert!(!shape.has_default);
    }

    #[test]
    fn shapes_are_cached_per_file() {
        let mut host = MemoryHost::new();
        host.insert("/p/a.js", "export default 1;");
        let resolver = ShapeResolver::new(&host);
        let first = resolver.resolve("./a", Path::new("/p/unit.js"));
        let second = resolver.resolve("./a.js", Path::new("/p/unit.js"));
        assert_eq!(first, second);
    }
}
