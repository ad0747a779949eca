//! Adaptive Random Forest
//!
//! Ensemble of Hoeffding adaptive trees combined by majority vote. Diversity
//! comes from two sources: online bagging (each member learns every record
//! `k ~ Poisson(6)` times) and a per-member random feature subspace of size
//! `ceil(sqrt(F))`, drawn once the first record reveals the column set.
//! Subtree-level drift recovery is inherited from the member trees.
//!
//! All randomness flows from one seeded RNG, so a run is reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::logic::dataset::Label;

use super::hoeffding::HoeffdingAdaptiveTree;
use super::{class_index, majority, OnlineClassifier};

/// Poisson rate for online bagging, the classic ARF setting
const BAG_LAMBDA: f64 = 6.0;

struct Member {
    tree: HoeffdingAdaptiveTree,
    /// Feature names this member is allowed to see; empty until the first
    /// record fixes the column set
    subspace: Vec<String>,
}

impl Member {
    fn project(&self, features: &[(String, String)]) -> Vec<(String, String)> {
        features
            .iter()
            .filter(|(name, _)| self.subspace.iter().any(|s| s == name))
            .cloned()
            .collect()
    }
}

pub struct AdaptiveRandomForest {
    members: Vec<Member>,
    rng: StdRng,
    initialized: bool,
}

impl AdaptiveRandomForest {
    pub fn new(n_models: usize, seed: u64) -> Self {
        assert!(n_models > 0, "forest needs at least one member");
        let members = (0..n_models)
            .map(|_| Member {
                tree: HoeffdingAdaptiveTree::default(),
                subspace: Vec::new(),
            })
            .collect();
        Self {
            members,
            rng: StdRng::seed_from_u64(seed),
            initialized: false,
        }
    }

    /// Draw each member's feature subspace from the first record's columns
    fn ensure_subspaces(&mut self, features: &[(String, String)]) {
        if self.initialized || features.is_empty() {
            return;
        }
        let names: Vec<&String> = features.iter().map(|(name, _)| name).collect();
        let size = (names.len() as f64).sqrt().ceil() as usize;
        let size = size.clamp(1, names.len());

        for member in &mut self.members {
            let mut pool: Vec<usize> = (0..names.len()).collect();
            let mut picked = Vec::with_capacity(size);
            for _ in 0..size {
                let at = self.rng.gen_range(0..pool.len());
                picked.push(names[pool.swap_remove(at)].clone());
            }
            member.subspace = picked;
        }
        self.initialized = true;
    }

    fn poisson(&mut self) -> u64 {
        // Knuth's method; lambda is small enough for the product form
        let threshold = (-BAG_LAMBDA).exp();
        let mut k = 0u64;
        let mut p = 1.0;
        loop {
            p *= self.rng.gen::<f64>();
            if p <= threshold {
                return k;
            }
            k += 1;
        }
    }
}

impl OnlineClassifier for AdaptiveRandomForest {
    fn predict_one(&mut self, features: &[(String, String)]) -> Option<Label> {
        self.ensure_subspaces(features);
        let mut votes = [0u64; 2];
        for member in &mut self.members {
            let projected = member.project(features);
            if let Some(label) = member.tree.predict_one(&projected) {
                votes[class_index(label)] += 1;
            }
        }
        majority(votes)
    }

    fn learn_one(&mut self, features: &[(String, String)], label: Label) {
        self.ensure_subspaces(features);
        for index in 0..self.members.len() {
            let weight = self.poisson();
            let projected = self.members[index].project(features);
            for _ in 0..weight {
                self.members[index].tree.learn_one(&projected, label);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(protocol: &str, service: &str) -> Vec<(String, String)> {
        vec![
            ("1".to_string(), protocol.to_string()),
            ("2".to_string(), service.to_string()),
            ("3".to_string(), "SF".to_string()),
        ]
    }

    #[test]
    fn test_cold_start_predicts_nothing() {
        let mut forest = AdaptiveRandomForest::new(10, 42);
        assert_eq!(forest.predict_one(&record("tcp", "http")), None);
    }

    #[test]
    fn test_learns_when_every_feature_is_informative() {
        let mut forest = AdaptiveRandomForest::new(10, 42);
        // attack and normal traffic disagree on every column, so every
        // member subspace carries signal
        for i in 0..600 {
            if i % 2 == 0 {
                forest.learn_one(&record("tcp", "http"), Label::Attack);
            } else {
                forest.learn_one(&record("udp", "dns"), Label::Normal);
            }
        }
        assert_eq!(forest.predict_one(&record("tcp", "http")), Some(Label::Attack));
        assert_eq!(forest.predict_one(&record("udp", "dns")), Some(Label::Normal));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let train = |seed: u64| {
            let mut forest = AdaptiveRandomForest::new(5, seed);
            for i in 0..400 {
                if i % 2 == 0 {
                    forest.learn_one(&record("tcp", "http"), Label::Attack);
                } else {
                    forest.learn_one(&record("udp", "dns"), Label::Normal);
                }
            }
            (0..20)
                .map(|_| forest.predict_one(&record("tcp", "http")))
                .collect::<Vec<_>>()
        };
        assert_eq!(train(7), train(7));
    }
}
