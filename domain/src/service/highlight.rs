use crate::ScoredUnit;

/// Sentences shorter than this carry too little signal to serve as
/// evidence.
const MIN_EVIDENCE_WORDS: usize = 5;

/// Ranks scored sentences by how far their rating sits from the neutral
/// midpoint, most extreme first. Ties keep the original sentence order. The
/// full ranking is returned; callers apply their own cutoff.
pub fn select_highlights(units: &[ScoredUnit]) -> Vec<String> {
    let mut ranked: Vec<&ScoredUnit> = units
        .iter()
        .filter(|unit| unit.text.split_whitespace().count() >= MIN_EVIDENCE_WORDS)
        .collect();
    ranked.sort_by(|a, b| b.rating.confidence().total_cmp(&a.rating.confidence()));
    ranked.into_iter().map(|unit| unit.text.clone()).collect()
}
