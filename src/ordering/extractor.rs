use crate::domain::{AliasTable, PrecedencePair};

const SEPARATOR: &str = ", ";

/// Resolve every name of a comma-separated observation through the alias table.
///
/// Tokens are trimmed and empty tokens dropped; a token is replaced only when
/// it matches an alias as a whole (case-insensitive). Order and duplicates
/// are kept.
pub fn normalize_input(raw: &str, aliases: &AliasTable) -> String {
    split_names(raw)
        .into_iter()
        .map(|name| resolve_name(name, aliases))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

fn resolve_name<'a>(name: &'a str, aliases: &'a AliasTable) -> &'a str {
    aliases.resolve(name).unwrap_or(name)
}

/// Expand an observation into every forward pair it implies.
///
/// Example: "A, B, C" -> (A,B), (A,C), (B,C)
pub fn extract_from_input(normalized: &str) -> Vec<PrecedencePair> {
    let names = split_names(normalized);
    if names.len() < 2 {
        return Vec::new();
    }

    let mut pairs = Vec::with_capacity(expected_pair_count(names.len()));
    for (i, predecessor) in names.iter().enumerate() {
        for successor in &names[i + 1..] {
            pairs.push(PrecedencePair::new(*predecessor, *successor));
        }
    }
    pairs
}

/// Trimmed, non-empty names in input order
pub fn split_names(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

pub fn expected_pair_count(names: usize) -> usize {
    names * names.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aliases(entries: &[(&str, &str)]) -> AliasTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_normalize_replaces_aliases() {
        let table = aliases(&[("Taka", "Takahiro"), ("Kazu", "Kazuyoshi")]);

        let result = normalize_input(" Taka ,  Kazu ", &table);

        assert_eq!(result, "Takahiro, Kazuyoshi");
    }

    #[test]
    fn test_normalize_keeps_unknown_names() {
        let result = normalize_input("A,B", &AliasTable::new());

        assert_eq!(result, "A, B");
    }

    #[test]
    fn test_normalize_alias_lookup_is_case_insensitive() {
        let table = aliases(&[("taka", "Takahiro")]);

        assert_eq!(normalize_input("TAKA, B", &table), "Takahiro, B");
    }

    #[test]
    fn test_normalize_never_substitutes_substrings() {
        let table = aliases(&[("Al", "Alice")]);

        assert_eq!(normalize_input("Alan, Al", &table), "Alan, Alice");
    }

    #[test]
    fn test_normalize_keeps_duplicates_and_drops_empty_tokens() {
        let result = normalize_input("A, , B,,A ,", &AliasTable::new());

        assert_eq!(result, "A, B, A");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_input("", &AliasTable::new()), "");
        assert_eq!(normalize_input("   ", &AliasTable::new()), "");
        assert_eq!(normalize_input(", ,,", &AliasTable::new()), "");
    }

    #[test]
    fn test_extract_generates_all_forward_pairs() {
        let pairs = extract_from_input("A, B, C");

        assert_eq!(
            pairs,
            vec![
                PrecedencePair::new("A", "B"),
                PrecedencePair::new("A", "C"),
                PrecedencePair::new("B", "C"),
            ]
        );
    }

    #[test]
    fn test_extract_single_player_yields_nothing() {
        assert!(extract_from_input("LonelyPlayer").is_empty());
        assert!(extract_from_input("").is_empty());
        assert!(extract_from_input(",,,").is_empty());
    }

    #[test]
    fn test_extract_passes_duplicate_names_through() {
        let pairs = extract_from_input("A, A");

        assert_eq!(pairs, vec![PrecedencePair::new("A", "A")]);
        assert!(pairs[0].is_self_loop());
    }

    #[test]
    fn test_normalize_then_extract() {
        let table = aliases(&[("b", "Bob")]);
        let normalized = normalize_input("alice, B", &table);

        assert_eq!(
            extract_from_input(&normalized),
            vec![PrecedencePair::new("alice", "Bob")]
        );
    }

    proptest! {
        #[test]
        fn prop_pair_count_is_n_choose_two(names in prop::collection::vec("[a-e]{1,3}", 0..12)) {
            let raw = names.join(",");
            let pairs = extract_from_input(&raw);
            let n = names.len();

            prop_assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
        }

        #[test]
        fn prop_normalize_is_idempotent(names in prop::collection::vec("[a-f]{1,2}", 0..8)) {
            // canonical targets are upper-case, so they never collide with the lowercase aliases
            let table = aliases(&[("a", "ALPHA"), ("bb", "BRAVO"), ("c", "CHARLIE")]);
            let raw = names.join(" , ");
            let once = normalize_input(&raw, &table);

            prop_assert_eq!(normalize_input(&once, &table), once.clone());
        }
    }
}
