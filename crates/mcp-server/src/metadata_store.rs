//! Decorator Metadata Store without decorators (spec §4.9 EXPANDED).
//!
//! Rust has no class decorators to accrue metadata onto at call time, so
//! there is no cross-module duplicate-key problem for `#[derive(Tool)]`
//! et al. to solve the way the original's decorator registry does: each
//! macro expansion is resolved at compile time, per crate. What remains
//! is the "collect every decorated type reachable from one binary
//! without the author listing them by hand" half of that job — this
//! keyring is the process-global linker-section-collection analogue,
//! populated by [`register`] calls `mcp-derive`-expanded code makes the
//! first time a derived type's builder method runs.

use std::sync::OnceLock;

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

/// One entry a derive macro contributes about the type it expanded on.
#[derive(Debug, Clone)]
pub struct MetadataEntry {
    pub type_name: &'static str,
    pub kind: &'static str,
    pub declared_name: Option<String>,
    pub declared_version: Option<String>,
}

/// Process-global keyring of every decorated type collected in this
/// binary. A plain `HashMap` behind a `RwLock` — there is no linker-
/// section magic available without an `inventory`-style crate in the
/// dependency stack to drive it, so registration happens through
/// [`register`] calls `mcp-derive`-expanded code makes from a
/// `#[ctor]`-free `static INIT: OnceLock<()>` guard at first access.
static KEYRING: Lazy<RwLock<HashMap<&'static str, MetadataEntry>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers (or overwrites) the metadata for `type_name`. Idempotent —
/// a type macro-expanding twice in the same binary (rare, but possible
/// across a workspace with duplicate crate versions) simply overwrites
/// its own entry with an identical one.
pub fn register(entry: MetadataEntry) {
    KEYRING.write().unwrap().insert(entry.type_name, entry);
}

pub fn lookup(type_name: &str) -> Option<MetadataEntry> {
    KEYRING.read().unwrap().get(type_name).cloned()
}

pub fn all() -> Vec<MetadataEntry> {
    KEYRING.read().unwrap().values().cloned().collect()
}

/// Smart defaults (spec §4.9): a missing `name` falls back to the
/// kebab-case of the struct name; a missing `version` falls back to the
/// crate's own `CARGO_PKG_VERSION`, read once and cached for the
/// process lifetime.
pub fn kebab_case(struct_name: &str) -> String {
    let mut out = String::with_capacity(struct_name.len() + 4);
    for (i, ch) in struct_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

static FALLBACK_VERSION: OnceLock<String> = OnceLock::new();

pub fn fallback_version() -> &'static str {
    FALLBACK_VERSION.get_or_init(|| {
        option_env!("CARGO_PKG_VERSION").unwrap_or("1.0.0").to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kebab_case_splits_on_capitals() {
        assert_eq!(kebab_case("WeatherTool"), "weather-tool");
        assert_eq!(kebab_case("Server"), "server");
    }

    #[test]
    fn registered_entry_round_trips() {
        register(MetadataEntry {
            type_name: "metadata_store::tests::Probe",
            kind: "tool",
            declared_name: Some("probe".into()),
            declared_version: None,
        });
        let entry = lookup("metadata_store::tests::Probe").unwrap();
        assert_eq!(entry.declared_name.as_deref(), Some("probe"));
        assert!(all().iter().any(|e| e.type_name == "metadata_store::tests::Probe"));
    }

    #[test]
    fn fallback_version_is_never_empty() {
        assert!(!fallback_version().is_empty());
    }
}
