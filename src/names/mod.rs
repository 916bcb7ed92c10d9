//! Candidate name normalization.
//!
//! Raw spellings from ballots and poll tables are resolved to canonical
//! identifiers through an explicit [`AliasTable`] plus rule-based
//! standardization. Nothing here holds global state: a [`NameNormalizer`] is
//! built once from its configuration and is immutable afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

pub mod defs;
pub mod mapping;

use defs::{builtin_aliases, builtin_fixups, builtin_nicknames};
use mapping::{collapse_whitespace, fold_key, standardize};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    /// folded alias -> canonical spelling
    entries: BTreeMap<String, String>,
    nicknames: Vec<String>,
    /// (contained name, replacement), applied in order after standardization
    fixups: Vec<(String, String)>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for def in builtin_aliases() {
            table.insert(def.alias, def.canonical);
        }
        table.nicknames = builtin_nicknames().iter().map(|s| s.to_string()).collect();
        table.fixups = builtin_fixups()
            .iter()
            .map(|def| (def.alias.to_string(), def.canonical.to_string()))
            .collect();
        table
    }

    /// Inserts or replaces an entry. Returns the canonical name previously
    /// stored for the alias, if any.
    pub fn insert(&mut self, alias: &str, canonical: &str) -> Option<String> {
        let key = fold_key(alias);
        if key.is_empty() {
            return None;
        }
        self.entries.insert(key, collapse_whitespace(canonical))
    }

    /// Layers `pairs` over the table. Entries from `pairs` override existing
    /// ones; a repeated alias inside `pairs` keeps its first occurrence.
    pub fn extend_from_pairs<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for (alias, canonical) in pairs {
            let key = fold_key(alias);
            if key.is_empty() {
                continue;
            }
            if let Some(first) = seen.get(&key) {
                if fold_key(first) != fold_key(canonical) {
                    tracing::warn!(
                        "alias {alias:?} maps to both {first:?} and {canonical:?}; keeping first"
                    );
                }
                continue;
            }
            seen.insert(key, canonical.to_string());
            self.insert(alias, canonical);
        }
    }

    /// Rewrites every target through the table until it reaches a name that
    /// is not itself an alias, so lookups never need more than one hop.
    pub fn flattened(mut self) -> Self {
        let snapshot = self.entries.clone();
        for target in self.entries.values_mut() {
            let mut hops = 0usize;
            while let Some(next) = snapshot.get(&fold_key(target)) {
                if fold_key(next) == fold_key(target) || hops >= snapshot.len() {
                    break;
                }
                *target = next.clone();
                hops += 1;
            }
        }
        self
    }

    pub fn lookup(&self, raw: &str) -> Option<&str> {
        self.entries.get(&fold_key(raw)).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nicknames(&self) -> &[String] {
        &self.nicknames
    }

    pub fn fixups(&self) -> &[(String, String)] {
        &self.fixups
    }

    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// The raw spelling is a known alias.
    Alias,
    /// The raw spelling already is a canonical identifier.
    Canonical,
    /// The standardized spelling is a known alias or canonical identifier.
    Standardized,
    /// Nothing matched; the raw spelling is used as the identifier.
    Unmapped,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Alias => "alias",
            Resolution::Canonical => "canonical",
            Resolution::Standardized => "standardized",
            Resolution::Unmapped => "unmapped",
        }
    }

    pub fn is_mapped(self) -> bool {
        self != Resolution::Unmapped
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub id: String,
    pub via: Resolution,
}

#[derive(Debug, Clone)]
pub struct NameNormalizer {
    aliases: AliasTable,
    /// folded canonical -> canonical spelling
    canonical: BTreeMap<String, String>,
}

impl NameNormalizer {
    pub fn new(aliases: AliasTable) -> Self {
        let aliases = aliases.flattened();
        let mut canonical = BTreeMap::new();
        for name in aliases.canonical_names() {
            canonical.insert(fold_key(name), name.to_string());
        }
        Self { aliases, canonical }
    }

    /// Registers additional canonical identifiers. Spellings that fold to an
    /// already registered identifier are ignored.
    pub fn with_canonical<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let spelled = collapse_whitespace(name.as_ref());
            let key = fold_key(&spelled);
            if key.is_empty() {
                continue;
            }
            self.canonical.entry(key).or_insert(spelled);
        }
        self
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn canonical_count(&self) -> usize {
        self.canonical.len()
    }

    /// Rule-based standard form, ignoring registered identifiers.
    pub fn standardize(&self, raw: &str) -> String {
        standardize(raw, self.aliases.nicknames(), self.aliases.fixups())
    }

    /// The identifier a name *defines* when it is taken as reference data:
    /// its alias target if one exists, else its standard form.
    pub fn canonical_form(&self, raw: &str) -> String {
        if let Some(target) = self.aliases.lookup(raw) {
            return target.to_string();
        }
        let standard = self.standardize(raw);
        if let Some(target) = self.aliases.lookup(&standard) {
            return target.to_string();
        }
        if standard.is_empty() {
            return collapse_whitespace(raw);
        }
        standard
    }

    pub fn resolve(&self, raw: &str) -> ResolvedName {
        if let Some(target) = self.aliases.lookup(raw) {
            return ResolvedName {
                id: target.to_string(),
                via: Resolution::Alias,
            };
        }
        if let Some(name) = self.canonical.get(&fold_key(raw)) {
            return ResolvedName {
                id: name.clone(),
                via: Resolution::Canonical,
            };
        }

        let standard = self.standardize(raw);
        if !standard.is_empty() {
            if let Some(target) = self.aliases.lookup(&standard) {
                return ResolvedName {
                    id: target.to_string(),
                    via: Resolution::Standardized,
                };
            }
            if let Some(name) = self.canonical.get(&fold_key(&standard)) {
                return ResolvedName {
                    id: name.clone(),
                    via: Resolution::Standardized,
                };
            }
        }

        ResolvedName {
            id: collapse_whitespace(raw),
            via: Resolution::Unmapped,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/names/tests.rs"]
mod tests;
