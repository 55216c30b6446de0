use thiserror::Error;

use crate::models::{EntryStatus, LostFoundEntry};

/// Default search radius around the base entry, in meters
pub const DEFAULT_MATCH_RADIUS_M: f64 = 2000.0;

/// Default cap on candidates considered per match query
pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Symmetric, case-insensitive title containment check.
///
/// A candidate survives the filter when either title is absent/empty, or one
/// case-folded title contains the other, as a raw substring or word for
/// word ("black wallet" matches "black leather wallet"). Deliberately
/// permissive: in this domain a missed true match costs more than an extra
/// candidate, and a human confirms before anything is written.
pub fn titles_overlap(a: Option<&str>, b: Option<&str>) -> bool {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => (a, b),
        _ => return true,
    };

    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    words_contained(&a, &b) || words_contained(&b, &a)
}

/// True when every whitespace-separated word of `needle` appears in
/// `haystack` (and `needle` has at least one word)
fn words_contained(needle: &str, haystack: &str) -> bool {
    let haystack_words: std::collections::HashSet<&str> = haystack.split_whitespace().collect();
    let mut seen_any = false;
    for word in needle.split_whitespace() {
        if !haystack_words.contains(word) {
            return false;
        }
        seen_any = true;
    }
    seen_any
}

/// Reasons a pair of entries cannot have a match confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfirmError {
    #[error("an entry cannot be matched with itself")]
    SelfMatch,
    #[error("matched entries must be of opposite kinds")]
    SameKind,
    #[error("both entries must be open to confirm a match")]
    NotOpen,
}

/// Guard for confirming a match between two entries.
///
/// The pair must be two distinct entries of opposite kinds, both still
/// open. The store applies this under its row locks before writing the
/// matched status and cross-populating `matched_with_id`.
pub fn validate_match_pair(a: &LostFoundEntry, b: &LostFoundEntry) -> Result<(), ConfirmError> {
    if a.id == b.id {
        return Err(ConfirmError::SelfMatch);
    }
    if a.kind == b.kind {
        return Err(ConfirmError::SameKind);
    }
    if a.status != EntryStatus::Open || b.status != EntryStatus::Open {
        return Err(ConfirmError::NotOpen);
    }
    Ok(())
}

/// Lost-and-found matcher.
///
/// A stateless read-side query: proposes counterpart candidates for a base
/// entry, never writing `matched_with_id` or `status`. Confirmation is a
/// separate explicit action.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    radius_m: f64,
    candidate_limit: usize,
}

impl Matcher {
    pub fn new(radius_m: f64, candidate_limit: usize) -> Self {
        Self {
            radius_m,
            candidate_limit,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MATCH_RADIUS_M, DEFAULT_CANDIDATE_LIMIT)
    }

    /// Search radius passed to the store's near-query
    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Candidate cap passed to the store's near-query
    pub fn candidate_limit(&self) -> usize {
        self.candidate_limit
    }

    /// Filter nearest-first candidates down to plausible counterparts.
    ///
    /// The store already restricts by kind, status, and radius; the guards
    /// are re-applied here so the invariants hold regardless of what the
    /// store hands back. Input ordering (nearest-first) is preserved; no
    /// re-ranking by title similarity.
    pub fn filter_candidates(
        &self,
        base: &LostFoundEntry,
        candidates: Vec<LostFoundEntry>,
    ) -> Vec<LostFoundEntry> {
        let wanted_kind = base.kind.opposite();

        candidates
            .into_iter()
            .filter(|candidate| {
                candidate.id != base.id
                    && candidate.kind == wanted_kind
                    && candidate.status == EntryStatus::Open
                    && titles_overlap(base.title.as_deref(), candidate.title.as_deref())
            })
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
