use std::collections::BTreeSet;

use crate::cache::MatchCache;
use crate::catalog::{CatalogDestination, SearchCandidate};
use crate::error::ApiError;
use crate::retry::with_retry;

/// How many search results to consider per track.
const SEARCH_LIMIT: u32 = 5;

fn ratio(a: &str, b: &str) -> u8 {
    (strsim::normalized_levenshtein(a, b) * 100.0).round() as u8
}

/// Token-set similarity on a 0-100 scale: case-insensitive, tolerant of word
/// reordering and of one string's tokens being a subset of the other's.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let common: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let base = common.join(" ");
    let joined = |extra: &[&str]| {
        let mut s = base.clone();
        if !base.is_empty() && !extra.is_empty() {
            s.push(' ');
        }
        s.push_str(&extra.join(" "));
        s
    };
    let with_a = joined(&only_a);
    let with_b = joined(&only_b);

    ratio(&base, &with_a)
        .max(ratio(&base, &with_b))
        .max(ratio(&with_a, &with_b))
}

/// Picks the candidate whose title scores strictly highest against the
/// descriptor. Ties keep the first-seen candidate; a candidate only wins by
/// scoring above zero.
pub fn best_match<'a>(
    descriptor: &str,
    candidates: &'a [SearchCandidate],
) -> Option<&'a SearchCandidate> {
    let mut best_score = 0;
    let mut best = None;
    for candidate in candidates {
        let score = token_set_ratio(&candidate.title, descriptor);
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }
    best
}

/// Resolves a descriptor to a destination item id: cached id if present,
/// otherwise the best-scoring search result. `Ok(None)` means no match, not
/// an error.
pub async fn resolve<D: CatalogDestination>(
    descriptor: &str,
    cache: &mut MatchCache,
    destination: &D,
) -> Result<Option<String>, ApiError> {
    if let Some(id) = cache.get(descriptor) {
        return Ok(Some(id.to_owned()));
    }

    let candidates = with_retry(|| destination.search(descriptor, SEARCH_LIMIT)).await?;
    match best_match(descriptor, &candidates) {
        Some(candidate) => {
            let id = candidate.id.clone();
            cache.insert(descriptor, id.clone());
            Ok(Some(id))
        }
        None => Ok(None),
    }
}
