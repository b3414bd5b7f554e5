//! Candidate-plan enumeration.
//!
//! Yields the baseline first, then every subset of the intermediate models
//! of size K, K−1, …, 1. Within a size, subsets come out in lexicographic
//! order over the input list, so runs are reproducible. Total count is
//! `1 + Σ_{k=1..K} C(n, k)`; sizes above n yield nothing and are skipped.
//!
//! The iterator holds only an index vector; re-create it to restart.

use viewpick_core::ModelId;

use crate::config::Configuration;

pub struct Configurations {
    pool: Vec<ModelId>,
    /// Subset size currently being emitted; 0 once size-1 subsets are done.
    size: usize,
    /// Index combination to emit next, or `None` between sizes.
    indices: Option<Vec<usize>>,
    baseline_emitted: bool,
}

impl Configurations {
    pub fn new(intermediates: Vec<ModelId>, cap: usize) -> Self {
        Self {
            // Sizes above the pool would contribute nothing; start below them.
            size: cap.min(intermediates.len()),
            pool: intermediates,
            indices: None,
            baseline_emitted: false,
        }
    }

    fn current(&self) -> Configuration {
        let indices = self.indices.as_ref().expect("positioned on a combination");
        Configuration::Materialize(indices.iter().map(|&i| self.pool[i].clone()).collect())
    }

    /// Advance `indices` to the next k-combination of `n` in lexicographic
    /// order; false once exhausted.
    fn step(indices: &mut [usize], n: usize) -> bool {
        let k = indices.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if indices[i] != i + n - k {
                indices[i] += 1;
                for j in i + 1..k {
                    indices[j] = indices[j - 1] + 1;
                }
                return true;
            }
        }
        false
    }
}

impl Iterator for Configurations {
    type Item = Configuration;

    fn next(&mut self) -> Option<Configuration> {
        if !self.baseline_emitted {
            self.baseline_emitted = true;
            return Some(Configuration::Baseline);
        }

        loop {
            if self.size == 0 {
                return None;
            }

            match self.indices.as_mut() {
                None => {
                    // Open the current size with the first combination.
                    self.indices = Some((0..self.size).collect());
                    return Some(self.current());
                }
                Some(indices) => {
                    if Self::step(indices, self.pool.len()) {
                        return Some(self.current());
                    }
                    // This size is exhausted; move down one.
                    self.indices = None;
                    self.size -= 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(ids: &[&str]) -> Vec<ModelId> {
        ids.iter().map(|id| ModelId::from(*id)).collect()
    }

    fn members(config: &Configuration) -> Vec<&str> {
        config.members().iter().map(|m| m.as_str()).collect()
    }

    #[test]
    fn baseline_comes_first() {
        let mut configs = Configurations::new(pool(&["a", "b"]), 2);
        assert_eq!(configs.next(), Some(Configuration::Baseline));
    }

    #[test]
    fn sizes_descend_and_subsets_are_lexicographic() {
        let all: Vec<_> = Configurations::new(pool(&["a", "b", "c"]), 2).collect();
        let rendered: Vec<String> = all.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["none", "a, b", "a, c", "b, c", "a", "b", "c"]
        );
    }

    #[test]
    fn count_matches_binomial_sum() {
        // n = 5, K = 3: 1 + C(5,1) + C(5,2) + C(5,3) = 1 + 5 + 10 + 10 = 26.
        let all: Vec<_> =
            Configurations::new(pool(&["a", "b", "c", "d", "e"]), 3).collect();
        assert_eq!(all.len(), 26);

        // No duplicates, nothing over the cap.
        let mut seen = std::collections::HashSet::new();
        for config in &all {
            assert!(config.len() <= 3);
            assert!(seen.insert(config.clone()));
        }
    }

    #[test]
    fn cap_above_pool_size_skips_empty_sizes() {
        let all: Vec<_> = Configurations::new(pool(&["a", "b"]), 5).collect();
        let rendered: Vec<String> = all.iter().map(|c| c.to_string()).collect();
        assert_eq!(rendered, vec!["none", "a, b", "a", "b"]);
    }

    #[test]
    fn empty_pool_yields_only_the_baseline() {
        let all: Vec<_> = Configurations::new(vec![], 2).collect();
        assert_eq!(all, vec![Configuration::Baseline]);
    }

    #[test]
    fn restart_by_recreation_is_identical() {
        let first: Vec<_> = Configurations::new(pool(&["a", "b", "c"]), 2).collect();
        let second: Vec<_> = Configurations::new(pool(&["a", "b", "c"]), 2).collect();
        assert_eq!(first, second);
    }
}
