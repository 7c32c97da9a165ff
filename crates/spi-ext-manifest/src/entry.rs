//! Parses one comment-stripped manifest line into a [`ManifestEntry`].

use spi_ext_core::utils::derive_name_from_key;
use tracing::warn;

use crate::err::{ManifestError, Result};
use crate::lexer::{self, Token};
use crate::position::Span;

/// One parsed manifest line: the registration key it names, and every
/// alias that resolves to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Every name this line aliases to `key` — the left-hand side may be a
    /// comma-separated list, with every token aliasing the same class.
    pub names: Vec<String>,
    /// The registration key (Rust analogue of a fully-qualified class
    /// name).
    pub key: String,
    /// Where this entry came from, for diagnostics.
    pub span: Span,
}

/// Parses a single line already stripped of its trailing comment.
///
/// Returns `Ok(None)` for a blank line, or for a line whose derived name
/// turned out empty — rejected per-entry, not fatal for the resource.
pub fn parse_line(
    raw: &str,
    capability_simple_name: &str,
    span: Span,
) -> Result<Option<ManifestEntry>> {
    let stripped = lexer::strip_comment(raw).trim();
    if stripped.is_empty() {
        return Ok(None);
    }

    let tokens = lexer::tokenize(stripped).ok_or_else(|| ManifestError::MalformedLine {
        span: span.clone(),
        reason: format!("`{stripped}` contains characters outside [A-Za-z0-9._:-]"),
    })?;

    let eq_pos = tokens.iter().position(|t| *t == Token::Equals);

    match eq_pos {
        Some(idx) => {
            let names = parse_name_list(&tokens[..idx], &span)?;
            let key = parse_single_name(&tokens[idx + 1..], &span, "registration key")?;
            Ok(Some(ManifestEntry { names, key, span }))
        }
        None => {
            let key = parse_single_name(&tokens, &span, "registration key")?;
            match derive_name_from_key(&key, capability_simple_name) {
                Some(name) => Ok(Some(ManifestEntry {
                    names: vec![name],
                    key,
                    span,
                })),
                None => {
                    warn!(%span, %key, "manifest entry rejected: derived name is empty");
                    Ok(None)
                }
            }
        }
    }
}

fn parse_name_list(tokens: &[Token], span: &Span) -> Result<Vec<String>> {
    if tokens.is_empty() {
        return Err(ManifestError::MalformedLine {
            span: span.clone(),
            reason: "name list before `=` is empty".to_string(),
        });
    }
    let mut names = Vec::new();
    let mut expect_name = true;
    for token in tokens {
        match (expect_name, token) {
            (true, Token::Name(n)) => {
                names.push(n.clone());
                expect_name = false;
            }
            (false, Token::Comma) => {
                expect_name = true;
            }
            _ => {
                return Err(ManifestError::MalformedLine {
                    span: span.clone(),
                    reason: "name list must be NAME (',' NAME)*".to_string(),
                });
            }
        }
    }
    if expect_name {
        return Err(ManifestError::MalformedLine {
            span: span.clone(),
            reason: "trailing comma in name list".to_string(),
        });
    }
    Ok(names)
}

fn parse_single_name(tokens: &[Token], span: &Span, what: &str) -> Result<String> {
    match tokens {
        [Token::Name(n)] => Ok(n.clone()),
        [] => Err(ManifestError::MalformedLine {
            span: span.clone(),
            reason: format!("missing {what}"),
        }),
        _ => Err(ManifestError::MalformedLine {
            span: span.clone(),
            reason: format!("{what} must be a single NAME token"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{LineNo, Origin};

    fn span(line: usize) -> Span {
        Span {
            origin: Origin {
                directory: "internal-dubbo",
                resource: "Greeter".to_string(),
            },
            line: LineNo(line),
        }
    }

    #[test]
    fn parses_explicit_name_assignment() {
        let entry = parse_line("en=pkg.EnglishGreeter", "Greeter", span(1))
            .unwrap()
            .unwrap();
        assert_eq!(entry.names, vec!["en".to_string()]);
        assert_eq!(entry.key, "pkg.EnglishGreeter");
    }

    #[test]
    fn parses_comma_separated_aliases() {
        let entry = parse_line("en,uk = pkg.EnglishGreeter", "Greeter", span(1))
            .unwrap()
            .unwrap();
        assert_eq!(entry.names, vec!["en".to_string(), "uk".to_string()]);
    }

    #[test]
    fn derives_name_when_no_assignment() {
        let entry = parse_line("pkg.EnglishGreeter", "Greeter", span(1))
            .unwrap()
            .unwrap();
        assert_eq!(entry.names, vec!["english".to_string()]);
        assert_eq!(entry.key, "pkg.EnglishGreeter");
    }

    #[test]
    fn rejects_entry_whose_derived_name_is_empty() {
        let result = parse_line("pkg.Greeter", "Greeter", span(1)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn blank_and_comment_only_lines_are_ignored() {
        assert!(parse_line("", "Greeter", span(1)).unwrap().is_none());
        assert!(parse_line("   # just a comment", "Greeter", span(1))
            .unwrap()
            .is_none());
    }

    #[test]
    fn trailing_comma_is_malformed() {
        assert!(parse_line("en,=pkg.EnglishGreeter", "Greeter", span(1)).is_err());
    }

    #[test]
    fn multiple_keys_after_equals_is_malformed() {
        assert!(parse_line("en=pkg.One pkg.Two", "Greeter", span(1)).is_err());
    }
}
