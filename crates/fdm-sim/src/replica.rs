//! Independent Monte Carlo replicas of one configuration.
//!
//! Each replica is one complete run with its own seed, derived from a root
//! seed via [`SimRng::child_seed`].  Replicas share no state, so with the
//! `parallel` feature they run on Rayon's thread pool; results come back in
//! replica order either way.

use tracing::info;

use fdm_core::SimRng;
use fdm_hazard::{EventCalendar, FloodField};

use crate::{NoopObserver, Sim, SimObserver, SimResult, YearSummary};

/// Seeds of `n` replicas derived from `root_seed`.
pub fn replica_seeds(root_seed: u64, n: usize) -> Vec<u64> {
    let mut root = SimRng::new(root_seed);
    (0..n as u64).map(|i| root.child_seed(i)).collect()
}

/// Run `n` replicas and return the final-year summary of each.
///
/// `factory` receives the replica seed and must build a `Sim` whose
/// `SimConfig::seed` is that seed.
pub fn run_replicas<H, F>(root_seed: u64, n: usize, factory: F) -> SimResult<Vec<YearSummary>>
where
    H: FloodField + EventCalendar,
    F: Fn(u64) -> SimResult<Sim<H>> + Sync,
{
    let runs = run_replicas_observed(root_seed, n, |seed| Ok((factory(seed)?, NoopObserver)))?;
    Ok(runs.into_iter().map(|(summary, _)| summary).collect())
}

/// Like [`run_replicas`], with one observer per replica returned alongside
/// its final summary.
pub fn run_replicas_observed<H, O, F>(
    root_seed: u64,
    n:         usize,
    factory:   F,
) -> SimResult<Vec<(YearSummary, O)>>
where
    H: FloodField + EventCalendar,
    O: SimObserver + Send,
    F: Fn(u64) -> SimResult<(Sim<H>, O)> + Sync,
{
    let seeds = replica_seeds(root_seed, n);
    info!(replicas = n, root_seed, "running replicas");

    let run_one = |seed: u64| -> SimResult<(YearSummary, O)> {
        let (mut sim, mut observer) = factory(seed)?;
        let summary = sim.run(&mut observer)?;
        Ok((summary, observer))
    };

    #[cfg(not(feature = "parallel"))]
    {
        seeds.into_iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        seeds.into_par_iter().map(run_one).collect()
    }
}
