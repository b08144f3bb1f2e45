use nextstep_core::types::ScoredMatch;

/// Orders matches by score (descending), breaking ties by catalog load order,
/// drops zero scores and keeps at most `limit`.
pub fn rank(mut matches: Vec<ScoredMatch>, limit: usize) -> Vec<ScoredMatch> {
    matches.retain(|m| m.score > 0.0);
    matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.ordinal.cmp(&b.ordinal)));
    matches.truncate(limit);
    matches
}

/// Number of matches with a positive score.
pub fn resources_found(matches: &[ScoredMatch]) -> usize {
    matches.iter().filter(|m| m.score > 0.0).count()
}
