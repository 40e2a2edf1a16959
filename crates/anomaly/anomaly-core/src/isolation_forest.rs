//! Isolation forest estimator for one-dimensional amounts.
//!
//! Each tree isolates points by splitting a random subsample at random
//! thresholds. Points that end up alone after few splits sit in sparse
//! regions and receive scores close to 1; points deep inside dense regions
//! score well below 0.5.

use anomaly_api::{Estimator, FittedModel, IsolationForestConfig, Result};
use rand::seq::index;
use rand::Rng;

use crate::threshold::{contamination_threshold, ensure_valid_amounts};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Average path length of an unsuccessful search in a binary search tree
/// holding `n` points. Used to normalise depths and to extend leaves that
/// were cut off by the height limit.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

// ============================================================================
// Isolation Tree
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        value: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single randomized partitioning tree.
#[derive(Debug, Clone)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    /// Grow a tree over `values`, stopping at `height_limit`.
    pub fn build<R: Rng + ?Sized>(values: Vec<f64>, height_limit: usize, rng: &mut R) -> Self {
        Self {
            root: grow(values, 0, height_limit, rng),
        }
    }

    /// Number of edges from the root to the leaf that receives `x`, plus the
    /// expected remaining depth of that leaf.
    pub fn path_length(&self, x: f64) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split { value, left, right } => {
                    node = if x < *value { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }

    /// Height of the tree in edges.
    pub fn height(&self) -> usize {
        fn height_of(node: &Node) -> usize {
            match node {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + height_of(left).max(height_of(right)),
            }
        }
        height_of(&self.root)
    }
}

fn grow<R: Rng + ?Sized>(values: Vec<f64>, depth: usize, limit: usize, rng: &mut R) -> Node {
    if values.len() <= 1 || depth >= limit {
        return Node::Leaf { size: values.len() };
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min >= max {
        return Node::Leaf { size: values.len() };
    }

    // Interpolate rather than take `max - min`, which overflows for amounts
    // near the ends of the f64 range.
    let t: f64 = rng.gen();
    let value = min * (1.0 - t) + max * t;

    let (left, right): (Vec<f64>, Vec<f64>) = values.into_iter().partition(|&v| v < value);
    Node::Split {
        value,
        left: Box::new(grow(left, depth + 1, limit, rng)),
        right: Box::new(grow(right, depth + 1, limit, rng)),
    }
}

// ============================================================================
// Isolation Forest
// ============================================================================

/// Isolation forest estimator.
#[derive(Debug, Clone, Default)]
pub struct IsolationForest {
    config: IsolationForestConfig,
}

impl IsolationForest {
    /// Create an estimator, validating the configuration up front.
    pub fn new(config: IsolationForestConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }
}

impl Estimator for IsolationForest {
    type Model = FittedForest;

    fn fit<R: Rng + ?Sized>(&self, data: &[f64], rng: &mut R) -> Result<FittedForest> {
        self.config.validate()?;
        ensure_valid_amounts(data)?;

        let subsample = self.config.max_samples.min(data.len());
        let height_limit = (subsample as f64).log2().ceil() as usize;

        let trees: Vec<IsolationTree> = (0..self.config.n_estimators)
            .map(|_| {
                let values = index::sample(rng, data.len(), subsample)
                    .into_iter()
                    .map(|i| data[i])
                    .collect();
                IsolationTree::build(values, height_limit, rng)
            })
            .collect();

        let mut model = FittedForest {
            trees,
            subsample,
            normaliser: average_path_length(subsample),
            threshold: f64::INFINITY,
        };
        let training_scores = model.score(data)?;
        model.threshold = contamination_threshold(&training_scores, self.config.contamination)?;

        tracing::debug!(
            trees = model.trees.len(),
            subsample,
            height_limit,
            threshold = model.threshold,
            "fitted isolation forest"
        );
        Ok(model)
    }

    fn name(&self) -> &'static str {
        "isolation_forest"
    }
}

/// A fitted isolation forest.
#[derive(Debug, Clone)]
pub struct FittedForest {
    trees: Vec<IsolationTree>,
    subsample: usize,
    normaliser: f64,
    threshold: f64,
}

impl FittedForest {
    pub fn trees(&self) -> &[IsolationTree] {
        &self.trees
    }

    /// Points drawn for each tree.
    pub fn subsample(&self) -> usize {
        self.subsample
    }

    /// Mean path length over the ensemble.
    pub fn mean_path_length(&self, x: f64) -> f64 {
        self.trees.iter().map(|t| t.path_length(x)).sum::<f64>() / self.trees.len() as f64
    }

    fn score_one(&self, x: f64) -> f64 {
        if self.normaliser == 0.0 {
            return 0.5;
        }
        2f64.powf(-self.mean_path_length(x) / self.normaliser)
    }
}

impl FittedModel for FittedForest {
    fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
        ensure_valid_amounts(data)?;
        Ok(data.iter().map(|&x| self.score_one(x)).collect())
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_api::{AnomalyError, Verdict};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn clustered_with_outliers() -> Vec<f64> {
        let mut data: Vec<f64> = (0..60).map(|i| 100.0 + (i % 12) as f64).collect();
        data.push(500.0);
        data.push(-300.0);
        data.push(900.0);
        data
    }

    #[test]
    fn test_average_path_length_known_values() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // 2 * (ln(255) + gamma) - 2 * 255 / 256
        let c256 = average_path_length(256);
        assert!((c256 - 10.244_770_920_8).abs() < 1e-6, "c(256) = {}", c256);
    }

    #[test]
    fn test_tree_respects_height_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        let values: Vec<f64> = (0..64).map(|i| i as f64).collect();
        let tree = IsolationTree::build(values, 6, &mut rng);
        assert!(tree.height() <= 6);
    }

    #[test]
    fn test_constant_values_form_single_leaf() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = IsolationTree::build(vec![3.0; 16], 4, &mut rng);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.path_length(3.0), average_path_length(16));
    }

    #[test]
    fn test_outliers_score_higher_than_cluster() {
        let data = clustered_with_outliers();
        let mut rng = StdRng::seed_from_u64(42);
        let model = IsolationForest::default().fit(&data, &mut rng).unwrap();
        let scores = model.score(&data).unwrap();

        let max_cluster = scores[..60].iter().cloned().fold(f64::MIN, f64::max);
        for &outlier in &scores[60..] {
            assert!(outlier > max_cluster, "{} <= {}", outlier, max_cluster);
        }
        assert!(scores.iter().all(|&s| s > 0.0 && s < 1.0));
    }

    #[test]
    fn test_classify_flags_outliers() {
        let data = clustered_with_outliers();
        let mut rng = StdRng::seed_from_u64(42);
        // round(0.05 * 63) = 3
        let model = IsolationForest::default().fit(&data, &mut rng).unwrap();
        let verdicts = model.classify(&data).unwrap();
        let flagged: Vec<usize> = verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == Verdict::Anomalous)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(flagged, vec![60, 61, 62]);
    }

    #[test]
    fn test_subsample_is_capped_by_input_size() {
        let data: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let model = IsolationForest::default().fit(&data, &mut rng).unwrap();
        assert_eq!(model.subsample(), 10);
        assert_eq!(model.trees().len(), 100);
    }

    #[test]
    fn test_single_point_scores_half() {
        let mut rng = StdRng::seed_from_u64(1);
        let model = IsolationForest::default().fit(&[42.0], &mut rng).unwrap();
        assert_eq!(model.score(&[42.0]).unwrap(), vec![0.5]);
        assert_eq!(model.classify(&[42.0]).unwrap(), vec![Verdict::Normal]);
    }

    #[test]
    fn test_extreme_magnitudes_do_not_overflow() {
        let data = vec![-f64::MAX, 0.0, 1.0, 2.0, f64::MAX];
        let mut rng = StdRng::seed_from_u64(3);
        let model = IsolationForest::default().fit(&data, &mut rng).unwrap();
        assert!(model.score(&data).unwrap().iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = IsolationForest::new(IsolationForestConfig::new(0.6)).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_fit_rejects_empty_and_nan() {
        let mut rng = StdRng::seed_from_u64(1);
        let forest = IsolationForest::default();
        assert!(matches!(forest.fit(&[], &mut rng), Err(AnomalyError::EmptyInput)));
        assert!(matches!(
            forest.fit(&[1.0, f64::NAN], &mut rng),
            Err(AnomalyError::InvalidData(_))
        ));
    }
}
