use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how generated code can name
/// another crate of the workspace.
///
/// # Example
///
/// ```
/// # use ark_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("ark_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. If `name` is listed in `dependencies`, return `::name`.
/// 2. If `name` begins with `ark_` and the facade `ark_core` is listed,
///    return `::ark_core::short_name` (e.g. `ark_reflect` -> `::ark_core::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to `::name`.
///
/// A crate naming itself in its own tests and doctests needs
/// `extern crate self as name;` at its root.
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "ark_core";
const CRATE_PREFIX: &str = "ark_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        Some(path)
    }

    #[inline(never)]
    fn load(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(name: &str) -> syn::Path {
        let ident = syn::Ident::new(name, Span::call_site());
        syn::Path {
            leading_colon: Some(Default::default()),
            segments: [syn::PathSegment::from(ident)].into_iter().collect(),
        }
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let short = name.strip_prefix(CRATE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::absolute(FACADE_NAME);
            path.segments
                .push(syn::Ident::new(short, Span::call_site()).into());
            return Some(path);
        }
        None
    }

    /// Returns a [`syn::Path`] naming the crate `name` from the caller.
    ///
    /// See the type documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(name);
        };

        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(name))
    }

    /// Runs `func` with the caller's manifest.
    ///
    /// Parsed manifests are cached per path and reloaded when the file changes.
    /// An unreadable manifest resolves every crate to its absolute path.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .ok();

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::load(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}
