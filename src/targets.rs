//! Target-weight editing and normalization
//!
//! Weights are fractions that should sum to 1.0. Normalization is a
//! pure ratio operation, so a set entered as percentages (summing to
//! 100) normalizes to the same fractions as one entered as fractions.

use crate::types::PortfolioTarget;

/// Tolerance for the sum-to-one validity check.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Plain sum of the target weights, standard double precision.
pub fn total_weight(targets: &[PortfolioTarget]) -> f64 {
    targets.iter().map(|t| t.target_weight).sum()
}

/// `true` iff the weights sum to 1.0 within [`WEIGHT_TOLERANCE`].
pub fn is_valid(targets: &[PortfolioTarget]) -> bool {
    (total_weight(targets) - 1.0).abs() < WEIGHT_TOLERANCE
}

/// Rescale every weight by `1/total` so the set sums to 1.0, preserving
/// proportions. A zero (or negative) total is left untouched: the
/// distribution of an all-zero set is undefined, so the set stays
/// invalid rather than being guessed at.
pub fn normalize(targets: &mut [PortfolioTarget]) {
    let total = total_weight(targets);
    if total <= 0.0 {
        return;
    }
    for target in targets.iter_mut() {
        target.target_weight /= total;
    }
}

/// An owned editing set with the same operations, for building up a
/// target allocation before submitting it.
#[derive(Debug, Clone, Default)]
pub struct TargetWeightEditor {
    targets: Vec<PortfolioTarget>,
}

impl TargetWeightEditor {
    pub fn new(targets: Vec<PortfolioTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[PortfolioTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<PortfolioTarget> {
        self.targets
    }

    pub fn add(&mut self, target: PortfolioTarget) {
        self.targets.push(target);
    }

    /// Remove an entry by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        self.targets.len() != before
    }

    /// Set one entry's weight. Returns whether the entry was found.
    pub fn set_weight(&mut self, id: &str, weight: f64) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) => {
                target.target_weight = weight;
                true
            }
            None => false,
        }
    }

    pub fn total_weight(&self) -> f64 {
        total_weight(&self.targets)
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.targets)
    }

    pub fn normalize(&mut self) {
        normalize(&mut self.targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AssetClass;

    fn target(id: &str, weight: f64) -> PortfolioTarget {
        PortfolioTarget {
            id: id.to_string(),
            instrument_id: Some(format!("inst-{}", id)),
            asset_class: AssetClass::Equity,
            currency: None,
            target_weight: weight,
            min_weight: None,
            max_weight: None,
        }
    }

    #[test]
    fn sums_and_validates() {
        let targets = vec![target("1", 0.6), target("2", 0.4)];
        assert!((total_weight(&targets) - 1.0).abs() < 1e-12);
        assert!(is_valid(&targets));
    }

    #[test]
    fn incomplete_sum_is_invalid() {
        let targets = vec![target("1", 0.6), target("2", 0.3)];
        assert!((total_weight(&targets) - 0.9).abs() < 1e-12);
        assert!(!is_valid(&targets));
    }

    #[test]
    fn normalizes_percent_scale_input() {
        let mut targets = vec![target("1", 60.0), target("2", 40.0)];
        normalize(&mut targets);
        assert!((targets[0].target_weight - 0.6).abs() < 1e-4);
        assert!((targets[1].target_weight - 0.4).abs() < 1e-4);
        assert!((total_weight(&targets) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn all_zero_set_is_left_alone() {
        let mut targets = vec![target("1", 0.0), target("2", 0.0)];
        normalize(&mut targets);
        assert_eq!(targets[0].target_weight, 0.0);
        assert_eq!(targets[1].target_weight, 0.0);
        assert!(!is_valid(&targets));
    }

    #[test]
    fn empty_set_normalization_is_noop() {
        let mut targets: Vec<PortfolioTarget> = Vec::new();
        normalize(&mut targets);
        assert!(targets.is_empty());
    }

    #[test]
    fn editor_edits_and_normalizes() {
        let mut editor = TargetWeightEditor::new(vec![target("1", 0.5), target("2", 0.5)]);
        assert!(editor.is_valid());

        assert!(editor.set_weight("2", 1.5));
        assert!(!editor.is_valid());

        editor.normalize();
        assert!(editor.is_valid());
        assert!((editor.targets()[0].target_weight - 0.25).abs() < 1e-9);
        assert!((editor.targets()[1].target_weight - 0.75).abs() < 1e-9);

        assert!(editor.remove("1"));
        assert!(!editor.remove("missing"));
        assert!(!editor.set_weight("missing", 0.1));
    }
}
