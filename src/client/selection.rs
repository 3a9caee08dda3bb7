//! Candidate matching and trailer selection.

use crate::provider::Candidate;
use crate::types::TrailerListing;

/// Pick the candidate to resolve: an exact year match when a year was
/// supplied, otherwise (or failing that) the first candidate.
pub fn match_candidate(candidates: &[Candidate], year: Option<u16>) -> Option<&Candidate> {
    if let Some(y) = year {
        if let Some(exact) = candidates.iter().find(|c| c.year == Some(y)) {
            return Some(exact);
        }
    }
    candidates.first()
}

/// Pick the best listing: trailer, then teaser, then clip, then featurette.
/// Falls back to the first listing when none carries a known type.
pub fn select_trailer(listings: &[TrailerListing]) -> Option<&TrailerListing> {
    listings
        .iter()
        .enumerate()
        .filter_map(|(i, l)| l.kind.rank().map(|r| (r, i, l)))
        .min_by_key(|(rank, i, _)| (*rank, *i))
        .map(|(_, _, l)| l)
        .or_else(|| listings.first())
}
