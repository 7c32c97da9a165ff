//! Name-derivation helpers used by manifest parsing and by the adaptive
//! proxy synthesizer's default-key derivation.

/// Splits a comma-separated name list, trimming whitespace around each
/// token and dropping empty tokens.
pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derives a name from a registration key when a manifest line has no
/// `name=` prefix, by stripping a trailing `capability_simple_name` suffix
/// and lowercasing the remainder.
///
/// Returns `None` when the result would be empty.
pub fn derive_name_from_key(key: &str, capability_simple_name: &str) -> Option<String> {
    let simple = key.rsplit("::").next().unwrap_or(key);
    let stripped = simple.strip_suffix(capability_simple_name).unwrap_or(simple);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_ascii_lowercase())
    }
}

/// Derives the default adaptive lookup key for a capability by splitting
/// its simple name at uppercase boundaries, lowercasing, and joining with
/// `.`.
///
/// `"Transporter"` -> `"transporter"`, `"LoadBalance"` -> `"load.balance"`.
pub fn derive_adaptive_key(capability_simple_name: &str) -> String {
    let mut out = String::new();
    for (i, ch) in capability_simple_name.chars().enumerate() {
        if ch.is_uppercase() {
            if i != 0 {
                out.push('.');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Extracts the simple (last-segment) name from a Rust-style path or a
/// `dyn Trait` type name, e.g. `"dyn greetings::Greeter"` -> `"Greeter"`.
pub fn simple_type_name(type_name: &str) -> &str {
    type_name
        .trim_start_matches("dyn ")
        .rsplit("::")
        .next()
        .unwrap_or(type_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_names_trims_and_drops_empties() {
        assert_eq!(split_names(" en, fr ,,de"), vec!["en", "fr", "de"]);
    }

    #[test]
    fn derive_name_from_key_strips_capability_suffix() {
        assert_eq!(
            derive_name_from_key("pkg::EnglishGreeter", "Greeter"),
            Some("english".to_string())
        );
    }

    #[test]
    fn derive_name_from_key_rejects_empty_result() {
        assert_eq!(derive_name_from_key("pkg::Greeter", "Greeter"), None);
    }

    #[test]
    fn derive_adaptive_key_splits_at_uppercase_boundaries() {
        assert_eq!(derive_adaptive_key("Transporter"), "transporter");
        assert_eq!(derive_adaptive_key("LoadBalance"), "load.balance");
    }

    #[test]
    fn simple_type_name_strips_dyn_and_path() {
        assert_eq!(simple_type_name("dyn greetings::Greeter"), "Greeter");
        assert_eq!(simple_type_name("pkg::mod::Thing"), "Thing");
    }

    proptest::proptest! {
        /// Every derived key is lowercase and contains no uppercase letters,
        /// regardless of the capability name's capitalization pattern.
        #[test]
        fn derive_adaptive_key_is_always_lowercase(name in "[A-Z][A-Za-z]{0,12}") {
            let derived = derive_adaptive_key(&name);
            prop_assert_eq!(derived.clone(), derived.to_ascii_lowercase());
        }

        /// Splitting never drops or reorders non-empty, trimmed tokens.
        #[test]
        fn split_names_preserves_token_count_for_clean_input(
            tokens in proptest::collection::vec("[a-z]{1,8}", 1..6),
        ) {
            let joined = tokens.join(",");
            prop_assert_eq!(split_names(&joined), tokens);
        }
    }
}
