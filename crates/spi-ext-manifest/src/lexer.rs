//! Tokenizes a single manifest line once comments have been stripped.
//!
//! The grammar is small enough that one [`logos`] token enum covers it
//! entirely:
//! ```text
//! entry    := name_list? ('=' fqn)?
//! name_list:= NAME (',' NAME)*
//! NAME     := [A-Za-z0-9._:-]+
//! ```
//!
//! The registration-key side of an entry is a Rust path
//! (`some_crate::module::Type`), so `NAME` admits `:` alongside the
//! dotted/hyphenated tokens a plain alias name uses — both sides of
//! `=` share one token class.

use logos::Logos;

/// Tokens of the manifest entry grammar.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum Token {
    /// A `NAME` token: `[A-Za-z0-9._:-]+`.
    #[regex(r"[A-Za-z0-9._:-]+", |lex| lex.slice().to_string())]
    Name(String),

    /// The `,` separating a name list.
    #[token(",")]
    Comma,

    /// The `=` separating the name list from the registration key.
    #[token("=")]
    Equals,
}

/// Strips a `#`-to-end-of-line comment, returning the remainder unchanged
/// otherwise. Honors neither quoting nor escaping — manifest lines are not
/// expected to contain `#` in a key.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Tokenizes an already comment-stripped, non-empty line.
///
/// Returns `None` on the first character that cannot start a token; the
/// caller reports this as a [`crate::err::ManifestError::MalformedLine`].
pub fn tokenize(line: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    for result in Token::lexer(line) {
        tokens.push(result.ok()?);
    }
    Some(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comment_cuts_at_hash() {
        assert_eq!(strip_comment("en=pkg.English # default"), "en=pkg.English ");
        assert_eq!(strip_comment("no comment here"), "no comment here");
    }

    #[test]
    fn tokenize_splits_names_equals_and_key() {
        let tokens = tokenize("en,uk=pkg.EnglishGreeter").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Name("en".into()),
                Token::Comma,
                Token::Name("uk".into()),
                Token::Equals,
                Token::Name("pkg.EnglishGreeter".into()),
            ]
        );
    }

    #[test]
    fn tokenize_accepts_rust_path_registration_keys() {
        let tokens = tokenize("en=greetings::english::English").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Name("en".into()),
                Token::Equals,
                Token::Name("greetings::english::English".into()),
            ]
        );
    }

    #[test]
    fn tokenize_rejects_unknown_characters() {
        assert!(tokenize("en@uk=pkg.Greeter").is_none());
    }

    proptest::proptest! {
        /// Any string built entirely from the `NAME` character class
        /// tokenizes to exactly one `Name` token carrying it back unchanged.
        #[test]
        fn any_name_token_round_trips(name in "[A-Za-z0-9._:-]{1,32}") {
            let tokens = tokenize(&name).expect("name-only input always tokenizes");
            prop_assert_eq!(tokens, vec![Token::Name(name)]);
        }

        /// Inserting a single `@` (outside the `NAME` class) anywhere in an
        /// otherwise-valid name always makes the line untokenizable.
        #[test]
        fn an_at_sign_anywhere_breaks_tokenization(
            prefix in "[A-Za-z0-9._:-]{0,8}",
            suffix in "[A-Za-z0-9._:-]{0,8}",
        ) {
            let line = format!("{prefix}@{suffix}");
            prop_assert!(tokenize(&line).is_none());
        }
    }
}
