//! Occurrence rolls and difficulty sampling

use rand::Rng;

use crate::domain::value_objects::DifficultyLevel;

/// One Bernoulli trial: succeeds when the draw falls below `probability`
pub fn roll_occurrence<R: Rng>(probability: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < probability
}

/// Categorical draw over difficulty weights.
///
/// Zero, negative and non-finite weights are ignored; with nothing left the
/// result is medium. Weights need not sum to 1: a draw past the last
/// cumulative sum returns the last weighted difficulty.
pub fn sample_difficulty<R: Rng>(
    weights: &[(DifficultyLevel, f64)],
    rng: &mut R,
) -> DifficultyLevel {
    let candidates: Vec<(DifficultyLevel, f64)> = weights
        .iter()
        .copied()
        .filter(|(_, p)| p.is_finite() && *p > 0.0)
        .collect();

    let Some((last, _)) = candidates.last().copied() else {
        return DifficultyLevel::default();
    };

    let draw = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for (difficulty, p) in &candidates {
        cumulative += p;
        if cumulative > draw {
            return *difficulty;
        }
    }
    last
}
