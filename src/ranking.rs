use approx::relative_eq;
use nalgebra::{DMatrix, RowDVector};

use crate::error::{ensure_dimension, RecommendError};

/// Marks a column that has already been ranked.
pub(crate) const EXHAUSTED: f64 = f64::NEG_INFINITY;

/// Scores closer than this, absolutely or relative to the larger magnitude, are ties.
pub const TIE_TOLERANCE: f64 = 1e-9;

/// Maps the preference vector into the latent space spanned by `reduced_basis` and back:
/// `preferences * basis * basis^T`.
pub fn project(
    preferences: &RowDVector<f64>,
    reduced_basis: &DMatrix<f64>,
) -> Result<Vec<f64>, RecommendError> {
    ensure_dimension("reduced basis rows", preferences.len(), reduced_basis.nrows())?;

    let latent = preferences * reduced_basis;
    let scores = latent * reduced_basis.transpose();

    Ok(scores.iter().copied().collect())
}

/// Orders column indices from highest to lowest score.
///
/// Runs a left-to-right max scan per position and overwrites the winner with
/// [`EXHAUSTED`] until no column is left. A column only replaces the current best when
/// it is greater by more than [`TIE_TOLERANCE`], so the lowest column wins among scores
/// that are equal up to rounding noise from the decomposition. Quadratic in the number
/// of columns.
pub fn rank_by_score(scores: &[f64]) -> Result<Vec<usize>, RecommendError> {
    if let Some((column, &value)) = scores.iter().enumerate().find(|(_, score)| !score.is_finite()) {
        return Err(RecommendError::NonFiniteScore { column, value });
    }

    let mut remaining = scores.to_vec();
    let mut ranked = Vec::with_capacity(remaining.len());

    while let Some(best) = next_best(&remaining) {
        ranked.push(best);
        remaining[best] = EXHAUSTED;
    }

    Ok(ranked)
}

fn next_best(scores: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (column, &score) in scores.iter().enumerate() {
        if score == EXHAUSTED {
            continue;
        }
        match best {
            Some(current) if !beats(score, scores[current]) => {}
            _ => best = Some(column),
        }
    }
    best
}

fn beats(score: f64, current: f64) -> bool {
    score > current
        && !relative_eq!(score, current, epsilon = TIE_TOLERANCE, max_relative = TIE_TOLERANCE)
}
