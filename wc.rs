use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::time::Instant;

use itertools::Itertools;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;
use tracing::debug;

use crate::config::Strategy;
use crate::types::{FrequencyTable, Token};

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Word counter running map and reduce on a dedicated, bounded rayon pool
pub struct Aggregator {
    pool: ThreadPool,
    strategy: Strategy,
}

impl Aggregator {
    /// Build a pool with `workers` threads, or one per available core when `None`.
    pub fn new(workers: Option<NonZeroUsize>, strategy: Strategy) -> Result<Self, AggregateError> {
        let workers = workers.map(NonZeroUsize::get).unwrap_or_else(default_workers);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("wordfreq-worker-{i}"))
            .build()?;
        Ok(Self { pool, strategy })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn aggregate(&self, tokens: &[Token]) -> FrequencyTable {
        match self.strategy {
            Strategy::Parallel => self.map_reduce(tokens),
            Strategy::Sequential => count_sequential(tokens),
        }
    }

    /// Map, shuffle and reduce; each stage finishes before the next begins.
    pub fn map_reduce(&self, tokens: &[Token]) -> FrequencyTable {
        let start = Instant::now();
        let mapped = self.pool.install(|| map_stage(tokens));
        debug!("map stage: {} pairs in {:.2?}", mapped.len(), start.elapsed());

        let start = Instant::now();
        let groups = shuffle_stage(mapped);
        debug!("shuffle stage: {} groups in {:.2?}", groups.len(), start.elapsed());

        let start = Instant::now();
        let table = self.pool.install(|| reduce_stage(groups));
        debug!("reduce stage: {} counts in {:.2?}", table.len(), start.elapsed());
        table
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn map_stage(tokens: &[Token]) -> Vec<(&str, usize)> {
    tokens.par_iter().map(|token| (token.as_str(), 1)).collect()
}

// keys are compared exactly; no case folding happens here
fn shuffle_stage(pairs: Vec<(&str, usize)>) -> HashMap<&str, Vec<usize>> {
    pairs.into_iter().into_group_map()
}

fn reduce_stage(groups: HashMap<&str, Vec<usize>>) -> FrequencyTable {
    let counts: HashMap<Token, usize> = groups
        .into_par_iter()
        .map(|(token, ones)| (token.to_string(), ones.into_iter().sum()))
        .collect();
    FrequencyTable::from(counts)
}

/// Single linear pass; same result as `Aggregator::map_reduce`.
pub fn count_sequential(tokens: &[Token]) -> FrequencyTable {
    let mut word_counts = HashMap::new();
    for token in tokens {
        *word_counts.entry(token.clone()).or_insert(0) += 1;
    }
    FrequencyTable::from(word_counts)
}
