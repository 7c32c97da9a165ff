//! Activation selection: given a URL-like parameter bag,
//! a requested value list, and a group tag, compute the ordered sequence
//! of auto-activated extension names, then splice it into an explicit
//! request list that may suppress or relocate the auto-activated block.
//!
//! The activation comparator is: topological order from `before`/`after`
//! first, numeric `order` second, discovery order last.

use std::collections::HashMap;

use spi_ext_core::model::ActivateMeta;
use spi_ext_core::url::UrlLike;

/// One auto-activatable candidate: its resolved name, its metadata, and
/// the order its registration was discovered in (used as the final
/// tiebreak).
#[derive(Debug, Clone)]
pub struct ActivateCandidate {
    /// The extension's resolved name.
    pub name: String,
    /// Its `Activate` metadata.
    pub meta: ActivateMeta,
    /// Discovery (link/iteration) order, for stable tiebreaking.
    pub discovery_index: usize,
}

/// Whether `meta`'s group constraint admits `group` (empty matches any).
pub fn matches_group(meta: &ActivateMeta, group: &str) -> bool {
    meta.group.is_empty() || meta.group.contains(&group)
}

/// Whether `meta`'s value constraint is satisfied by `url` (empty
/// matches always; otherwise at least one declared key must carry a
/// non-empty value).
pub fn matches_value(meta: &ActivateMeta, url: &dyn UrlLike) -> bool {
    meta.value.is_empty()
        || meta
            .value
            .iter()
            .any(|key| !url.parameter_or(key, "").is_empty())
}

/// Topologically sorts `candidates` by `before`/`after`, breaking ties by
/// `(order, discovery_index)`. References to names not present among
/// `candidates` are ignored: a dangling before/after reference does not
/// constrain anything.
pub fn topo_sort(candidates: Vec<ActivateCandidate>) -> Vec<ActivateCandidate> {
    let index_of: HashMap<&str, usize> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let n = candidates.len();
    let mut in_degree = vec![0usize; n];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];

    for (i, candidate) in candidates.iter().enumerate() {
        for before in candidate.meta.before {
            if let Some(&j) = index_of.get(before) {
                adjacency[i].push(j);
                in_degree[j] += 1;
            }
        }
        for after in candidate.meta.after {
            if let Some(&j) = index_of.get(after) {
                adjacency[j].push(i);
                in_degree[i] += 1;
            }
        }
    }

    let mut remaining_in_degree = in_degree.clone();
    let mut emitted = vec![false; n];
    let mut ordered = Vec::with_capacity(n);

    for _ in 0..n {
        let next = (0..n)
            .filter(|&i| !emitted[i] && remaining_in_degree[i] == 0)
            .min_by_key(|&i| (candidates[i].meta.order, candidates[i].discovery_index));

        let Some(i) = next else {
            // A cycle among the remaining candidates: fall back to
            // (order, discovery_index) for whatever is left, in the
            // order encountered, rather than dropping entries.
            let mut rest: Vec<usize> = (0..n).filter(|&i| !emitted[i]).collect();
            rest.sort_by_key(|&i| (candidates[i].meta.order, candidates[i].discovery_index));
            for i in rest {
                ordered.push(i);
                emitted[i] = true;
            }
            break;
        };

        emitted[i] = true;
        ordered.push(i);
        for &j in &adjacency[i] {
            remaining_in_degree[j] = remaining_in_degree[j].saturating_sub(1);
        }
    }

    let mut candidates: Vec<Option<ActivateCandidate>> = candidates.into_iter().map(Some).collect();
    ordered
        .into_iter()
        .map(|i| candidates[i].take().expect("each index emitted once"))
        .collect()
}

/// Splices the auto-activated name list into an explicit request list.
///
/// `values` may contain:
/// - an ordinary name: resolved directly, independent of auto-activation.
/// - the literal `"default"`: replaced in place by the entire
///   auto-activated list, e.g. `[a, "default", b]`.
/// - a `-name`-prefixed entry: removes `name` from the auto-activated
///   list if present.
/// - the literal `"-default"`: suppresses the auto-activated list
///   entirely.
///
/// When `values` is empty, the result is just the auto-activated list.
pub fn splice(values: &[&str], auto: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        return auto;
    }

    let suppress_default = values.contains(&"-default");
    let excluded: Vec<&str> = values
        .iter()
        .filter_map(|v| v.strip_prefix('-'))
        .collect();

    let filtered_auto: Vec<String> = if suppress_default {
        Vec::new()
    } else {
        auto.into_iter()
            .filter(|name| !excluded.contains(&name.as_str()))
            .collect()
    };

    let mut spliced_default = false;
    let mut result = Vec::new();
    for &value in values {
        if value == "default" {
            result.extend(filtered_auto.iter().cloned());
            spliced_default = true;
        } else if value == "-default" || value.starts_with('-') {
            // handled via suppress_default / excluded above
        } else {
            result.push(value.to_string());
        }
    }

    if !spliced_default && !suppress_default {
        result.extend(filtered_auto);
    }

    result
}
