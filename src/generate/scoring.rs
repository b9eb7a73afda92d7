use crate::foundation::core::RasterImage;

/// Ranks generated variants of one panel; higher is better.
pub trait VariantScorer: Send + Sync {
    fn score(&self, image: &RasterImage) -> f64;
}

/// Scores every variant equally, so the first one wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstVariant;

impl VariantScorer for FirstVariant {
    fn score(&self, _image: &RasterImage) -> f64 {
        0.0
    }
}

/// Index of the best-scoring variant; ties go to the earliest. `None` when `variants` is empty.
pub fn select_best<S: VariantScorer + ?Sized>(
    variants: &[RasterImage],
    scorer: &S,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, img) in variants.iter().enumerate() {
        let score = scorer.score(img);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/scoring.rs"]
mod tests;
