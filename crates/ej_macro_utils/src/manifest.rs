use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::{Ident, Span};
use toml_edit::{Document, Item, Table};

/// The dependency tables of the Cargo.toml that invoked a proc-macro.
///
/// Used to find the path under which a workspace crate is reachable from the
/// code a macro generates.
///
/// # Example
///
/// ```rust
/// # use ej_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("ej_mapper"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is a dependency, return `::crate_name`, or
///    `::alias` when it was renamed with `package = "crate_name"`.
/// 2. If the requested crate name begins with `ej_` and the facade `ej_core`
///    is a dependency (possibly renamed), return `::ej_core::short_name`
///    (e.g. `ej_mapper` -> `::ej_core::mapper`).
/// 3. Repeat steps 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::crate_name`.
///
/// A crate that refers to itself from generated code needs
/// `extern crate self as crate_name;` in its root for the fallback to resolve.
#[derive(Debug)]
pub struct Manifest {
    dependencies: Option<Table>,
    dev_dependencies: Option<Table>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "ej_core";
const CRATE_PREFIX: &str = "ej_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    fn modified_time(path: &PathBuf) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|m| m.modified()).ok()
    }

    /// Reads the manifest at `path`; unreadable manifests have no dependencies.
    fn load(path: &PathBuf) -> Self {
        let document = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| Document::parse(text).ok());

        let table = |key: &str| match document.as_ref().and_then(|d| d.get(key)) {
            Some(Item::Table(table)) => Some(table.clone()),
            _ => None,
        };

        Self {
            dependencies: table("dependencies"),
            dev_dependencies: table("dev-dependencies"),
            modified_time: Self::modified_time(path),
        }
    }

    /// The key under which `package` is listed in `deps`, honoring renames.
    fn dependency_key<'t>(deps: &'t Table, package: &'t str) -> Option<&'t str> {
        if deps.contains_key(package) {
            return Some(package);
        }
        deps.iter().find_map(|(key, item)| {
            let renamed = item.get("package").and_then(Item::as_str);
            (renamed == Some(package)).then_some(key)
        })
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if let Some(key) = Self::dependency_key(deps, name) {
            return parse_path(&format!("::{key}"));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        let facade = Self::dependency_key(deps, FACADE_NAME)?;
        parse_path(&format!("::{facade}::{module}"))
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from
    /// the caller's Cargo.toml. See the type documentation for the rules.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        [&self.dependencies, &self.dev_dependencies]
            .into_iter()
            .flatten()
            .find_map(|deps| Self::find_in_deps(deps, name))
            .or_else(|| parse_path(&format!("::{name}")))
            .unwrap_or_else(|| syn::Path::from(Ident::new(name, Span::call_site())))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file changes, so
    /// calling this once per macro invocation is cheap.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Self {
                dependencies: None,
                dev_dependencies: None,
                modified_time: None,
            });
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && manifest.modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Self::load(&path);
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

fn parse_path(path: &str) -> Option<syn::Path> {
    syn::parse_str(path).ok()
}

#[cfg(test)]
mod tests {
    use toml_edit::{Document, Item};

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        let document = Document::parse(text).unwrap();
        let table = |key: &str| match document.get(key) {
            Some(Item::Table(table)) => Some(table.clone()),
            _ => None,
        };
        Manifest {
            dependencies: table("dependencies"),
            dev_dependencies: table("dev-dependencies"),
            modified_time: None,
        }
    }

    fn resolve(manifest: &Manifest, name: &str) -> String {
        let path = manifest.get_crate_path(name);
        quote_path(&path)
    }

    fn quote_path(path: &syn::Path) -> String {
        let mut out = String::new();
        if path.leading_colon.is_some() {
            out.push_str("::");
        }
        let segments: Vec<_> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        out.push_str(&segments.join("::"));
        out
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nej_mapper = \"0.0.1\"\n");
        assert_eq!(resolve(&m, "ej_mapper"), "::ej_mapper");
    }

    #[test]
    fn through_the_facade() {
        let m = manifest("[dependencies]\nej_core = \"0.0.1\"\n");
        assert_eq!(resolve(&m, "ej_mapper"), "::ej_core::mapper");
    }

    #[test]
    fn renamed_facade() {
        let m = manifest("[dependencies]\njson = { package = \"ej_core\", version = \"0.0.1\" }\n");
        assert_eq!(resolve(&m, "ej_exclusion"), "::json::exclusion");
    }

    #[test]
    fn renamed_direct_dependency() {
        let m = manifest("[dependencies]\nmapper = { package = \"ej_mapper\" }\n");
        assert_eq!(resolve(&m, "ej_mapper"), "::mapper");
        assert_eq!(resolve(&m, "ej_node"), "::ej_node");
    }

    #[test]
    fn dev_dependencies_and_fallback() {
        let m = manifest("[dev-dependencies]\nej_core = \"0.0.1\"\n");
        assert_eq!(resolve(&m, "ej_node"), "::ej_core::node");
        assert_eq!(resolve(&manifest(""), "ej_node"), "::ej_node");
    }
}
