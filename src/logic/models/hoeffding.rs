//! Hoeffding Adaptive Tree
//!
//! Incremental decision tree over nominal attributes. Leaves accumulate
//! per-attribute class counts; once a leaf has seen `grace_period` records the
//! information gain of the best attribute is compared against the second best,
//! and the leaf splits when the difference beats the Hoeffding bound
//! `sqrt(ln(1/delta) / 2n)` (or the bound itself drops under the tie
//! threshold). Every split node carries an error-rate drift detector; a
//! subtree whose routed-instance error degrades is collapsed back to a fresh
//! leaf, which is what keeps the tree adaptive on non-stationary streams.
//!
//! Feature values are used as raw strings - numeric-looking columns split
//! multiway on their observed values, exactly as the unconverted CSV stream
//! is consumed.

use std::collections::HashMap;

use crate::logic::dataset::Label;

use super::drift::DriftDetector;
use super::{class_index, majority, OnlineClassifier};

// ============================================================================
// CONFIG
// ============================================================================

#[derive(Debug, Clone)]
pub struct HoeffdingConfig {
    /// Records a leaf absorbs between split evaluations
    pub grace_period: u64,
    /// Split confidence: one minus the probability the chosen attribute is
    /// truly the best
    pub delta: f64,
    /// Bound below which near-ties split anyway
    pub tie_threshold: f64,
}

impl Default for HoeffdingConfig {
    fn default() -> Self {
        Self {
            grace_period: 100,
            delta: 1e-5,
            tie_threshold: 0.05,
        }
    }
}

// ============================================================================
// TREE NODES
// ============================================================================

#[derive(Debug)]
enum Node {
    Leaf(LeafStats),
    Split(SplitNode),
}

#[derive(Debug, Default)]
struct LeafStats {
    /// Class counts `[normal, attack]`
    counts: [u64; 2],
    /// feature -> value -> class counts
    attr: HashMap<String, HashMap<String, [u64; 2]>>,
    since_eval: u64,
}

#[derive(Debug)]
struct SplitNode {
    feature: String,
    children: HashMap<String, Node>,
    /// Class counts at this node, kept current for unseen-value routing
    fallback: [u64; 2],
    drift: DriftDetector,
}

impl LeafStats {
    fn seeded(counts: [u64; 2]) -> Self {
        Self {
            counts,
            ..Default::default()
        }
    }

    fn record(&mut self, features: &HashMap<&str, &str>, label: Label) {
        let idx = class_index(label);
        self.counts[idx] += 1;
        self.since_eval += 1;
        for (feature, value) in features {
            self.attr
                .entry((*feature).to_string())
                .or_default()
                .entry((*value).to_string())
                .or_insert([0, 0])[idx] += 1;
        }
    }

    /// Best attribute to split on, if the Hoeffding bound allows one
    fn best_split(&self, config: &HoeffdingConfig) -> Option<String> {
        let n = (self.counts[0] + self.counts[1]) as f64;
        if n == 0.0 {
            return None;
        }

        let base = entropy(self.counts);
        let mut best_gain = 0.0;
        let mut second_gain = 0.0;
        let mut best: Option<&String> = None;

        for (feature, values) in &self.attr {
            if values.len() < 2 {
                continue;
            }
            let weighted: f64 = values
                .values()
                .map(|counts| {
                    let nv = (counts[0] + counts[1]) as f64;
                    nv / n * entropy(*counts)
                })
                .sum();
            let gain = base - weighted;

            // name tie-break keeps the choice deterministic across runs
            let improves = gain > best_gain
                || (gain == best_gain && best.map_or(false, |b| feature.as_str() < b.as_str()));
            if improves {
                second_gain = best_gain;
                best_gain = gain;
                best = Some(feature);
            } else if gain > second_gain {
                second_gain = gain;
            }
        }

        let best = best?;
        let epsilon = ((1.0 / config.delta).ln() / (2.0 * n)).sqrt();
        if best_gain - second_gain > epsilon || epsilon < config.tie_threshold {
            Some(best.clone())
        } else {
            None
        }
    }
}

impl SplitNode {
    /// Children start from the per-value class counts the leaf observed
    fn from_leaf(mut stats: LeafStats, feature: String) -> Self {
        let mut children = HashMap::new();
        if let Some(values) = stats.attr.remove(&feature) {
            for (value, counts) in values {
                children.insert(value, Node::Leaf(LeafStats::seeded(counts)));
            }
        }
        Self {
            feature,
            children,
            fallback: stats.counts,
            drift: DriftDetector::default(),
        }
    }
}

fn entropy(counts: [u64; 2]) -> f64 {
    let n = (counts[0] + counts[1]) as f64;
    if n == 0.0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|c| **c > 0)
        .map(|c| {
            let p = *c as f64 / n;
            -p * p.log2()
        })
        .sum()
}

// ============================================================================
// TREE
// ============================================================================

#[derive(Debug)]
pub struct HoeffdingAdaptiveTree {
    root: Node,
    config: HoeffdingConfig,
}

impl HoeffdingAdaptiveTree {
    pub fn new(config: HoeffdingConfig) -> Self {
        Self {
            root: Node::Leaf(LeafStats::default()),
            config,
        }
    }
}

impl Default for HoeffdingAdaptiveTree {
    fn default() -> Self {
        Self::new(HoeffdingConfig::default())
    }
}

fn feature_map<'a>(features: &'a [(String, String)]) -> HashMap<&'a str, &'a str> {
    features
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
}

fn predict_node(node: &Node, features: &HashMap<&str, &str>) -> Option<Label> {
    match node {
        Node::Leaf(leaf) => majority(leaf.counts),
        Node::Split(split) => {
            let routed = features
                .get(split.feature.as_str())
                .and_then(|value| split.children.get(*value));
            match routed {
                Some(child) => predict_node(child, features).or_else(|| majority(split.fallback)),
                None => majority(split.fallback),
            }
        }
    }
}

/// Descend, learn, and report whether the pre-update prediction on this
/// record was correct (the drift signal).
fn learn_node(
    node: &mut Node,
    features: &HashMap<&str, &str>,
    label: Label,
    config: &HoeffdingConfig,
) -> bool {
    let (correct, replacement) = match node {
        Node::Leaf(leaf) => {
            let correct = majority(leaf.counts) == Some(label);
            leaf.record(features, label);
            let mut replacement = None;
            if leaf.since_eval >= config.grace_period {
                leaf.since_eval = 0;
                if let Some(feature) = leaf.best_split(config) {
                    let stats = std::mem::take(leaf);
                    replacement = Some(Node::Split(SplitNode::from_leaf(stats, feature)));
                }
            }
            (correct, replacement)
        }
        Node::Split(split) => {
            let correct = match features.get(split.feature.as_str()) {
                Some(value) => {
                    let child = split
                        .children
                        .entry((*value).to_string())
                        .or_insert_with(|| Node::Leaf(LeafStats::default()));
                    learn_node(child, features, label, config)
                }
                None => majority(split.fallback) == Some(label),
            };
            split.fallback[class_index(label)] += 1;
            let replacement = if split.drift.update(!correct) {
                // degraded subtree: forget it and regrow
                Some(Node::Leaf(LeafStats::default()))
            } else {
                None
            };
            (correct, replacement)
        }
    };

    if let Some(fresh) = replacement {
        *node = fresh;
    }
    correct
}

impl OnlineClassifier for HoeffdingAdaptiveTree {
    fn predict_one(&mut self, features: &[(String, String)]) -> Option<Label> {
        let map = feature_map(features);
        predict_node(&self.root, &map)
    }

    fn learn_one(&mut self, features: &[(String, String)], label: Label) {
        let map = feature_map(features);
        learn_node(&mut self.root, &map, label, &self.config);
    }
}

// ============================================================================
// TESTS
// ============================================================================
