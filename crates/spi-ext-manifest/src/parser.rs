//! Orchestrates manifest discovery across the three search directories,
//! merging their entries and catching name collisions.

use std::collections::HashMap;

use tracing::warn;

use crate::entry::{self, ManifestEntry};
use crate::err::{ManifestError, Result};
use crate::position::{LineNo, Origin, Span};
use crate::source::{ManifestSource, SEARCH_DIRECTORIES};

/// Reads and merges every manifest resource registered under
/// `capability_key` across [`SEARCH_DIRECTORIES`], in precedence order.
///
/// A name declared in an earlier directory wins silently over a later
/// directory. A name declared twice against a
/// *different* key within the same precedence tier, or redeclared at a
/// matching key from a later directory for a *different* key, is reported
/// via [`ManifestError::DuplicateName`].
pub fn read_manifest(
    source: &dyn ManifestSource,
    capability_key: &str,
    capability_simple_name: &str,
) -> Result<Vec<ManifestEntry>> {
    let mut by_name: HashMap<String, ManifestEntry> = HashMap::new();
    let mut merged = Vec::new();

    for &directory in &SEARCH_DIRECTORIES {
        let Some(text) = source.read(directory, capability_key)? else {
            continue;
        };
        let origin = Origin {
            directory,
            resource: capability_key.to_string(),
        };
        let entries = parse_resource(&text, &origin, capability_simple_name)?;

        for new_entry in entries {
            let mut is_new = false;
            for name in &new_entry.names {
                match by_name.get(name) {
                    Some(existing) if existing.key != new_entry.key => {
                        return Err(ManifestError::DuplicateName {
                            name: name.clone(),
                            first: existing.span.clone(),
                            first_key: existing.key.clone(),
                            second: new_entry.span.clone(),
                            second_key: new_entry.key.clone(),
                        });
                    }
                    Some(_) => {
                        // Same name, same key, lower-precedence directory: ignore.
                    }
                    None => {
                        by_name.insert(name.clone(), new_entry.clone());
                        is_new = true;
                    }
                }
            }
            if is_new {
                merged.push(new_entry);
            }
        }
    }

    Ok(merged)
}

/// Parses every line of one resource's text, skipping blank lines and
/// per-entry-rejected lines (logged, not fatal), and
/// rejecting in-resource duplicate names against differing keys.
fn parse_resource(
    text: &str,
    origin: &Origin,
    capability_simple_name: &str,
) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    let mut seen: HashMap<String, ManifestEntry> = HashMap::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let span = Span {
            origin: origin.clone(),
            line: LineNo(idx + 1),
        };
        let Some(parsed) = entry::parse_line(raw_line, capability_simple_name, span)? else {
            continue;
        };

        for name in &parsed.names {
            if let Some(existing) = seen.get(name) {
                if existing.key != parsed.key {
                    return Err(ManifestError::DuplicateName {
                        name: name.clone(),
                        first: existing.span.clone(),
                        first_key: existing.key.clone(),
                        second: parsed.span.clone(),
                        second_key: parsed.key.clone(),
                    });
                }
                warn!(name = %name, resource = %origin, "name redeclared with the same key, ignoring");
            } else {
                seen.insert(name.clone(), parsed.clone());
            }
        }
        entries.push(parsed);
    }

    Ok(entries)
}
