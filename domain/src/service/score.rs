use crate::{Rating, SentimentDistribution};

/// Converts per-unit ratings into bucket proportions. An empty batch is not
/// an error; it degrades to the all-neutral fallback.
pub fn aggregate(ratings: &[Rating]) -> SentimentDistribution {
    if ratings.is_empty() {
        return SentimentDistribution::neutral_fallback();
    }

    let total = ratings.len() as f64;
    SentimentDistribution {
        positive: ratings.iter().filter(|r| r.is_positive()).count() as f64 / total,
        negative: ratings.iter().filter(|r| r.is_negative()).count() as f64 / total,
        neutral: ratings.iter().filter(|r| r.is_neutral()).count() as f64 / total,
    }
}

/// Arithmetic mean of each field across the given distributions. Each input
/// carries equal weight regardless of how many units produced it, so
/// segments with many sentences cannot dominate segments with few.
pub fn combine(distributions: &[SentimentDistribution]) -> SentimentDistribution {
    if distributions.is_empty() {
        return SentimentDistribution::neutral_fallback();
    }

    let count = distributions.len() as f64;
    SentimentDistribution {
        positive: distributions.iter().map(|d| d.positive).sum::<f64>() / count,
        negative: distributions.iter().map(|d| d.negative).sum::<f64>() / count,
        neutral: distributions.iter().map(|d| d.neutral).sum::<f64>() / count,
    }
}
