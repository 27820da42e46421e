use std::collections::HashMap;

/// Case-insensitive alias → canonical name lookup.
///
/// ASCII letters in keys are folded to lowercase on insert and on lookup;
/// the canonical target is returned exactly as it was registered.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias. The first registration of a name wins.
    pub fn insert(&mut self, alias: &str, target: &str) {
        self.entries
            .entry(fold(alias))
            .or_insert_with(|| target.to_string());
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries.get(&fold(name)).map(String::as_str)
    }

}

impl<A: AsRef<str>, T: AsRef<str>> FromIterator<(A, T)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (A, T)>>(iter: I) -> Self {
        let mut table = AliasTable::new();
        for (alias, target) in iter {
            table.insert(alias.as_ref(), target.as_ref());
        }
        table
    }
}

// ASCII only, the same folding as SQLite's NOCASE collation
fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}
