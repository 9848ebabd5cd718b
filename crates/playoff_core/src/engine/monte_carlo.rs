//! Monte Carlo Driver
//!
//! 시즌 잔여 일정을 N번 시뮬레이션하고 결과를 집계한다.
//!
//! - trial `i`의 RNG는 `derive_trial_seed(base, i)`로만 결정된다. 워커 수나
//!   스케줄링 순서와 무관하게 결과가 비트 단위로 같다.
//! - 워커별 [`Tally`]는 합산으로만 병합된다 (유일한 동기화 지점).
//! - 실패나 취소 시 부분 결과는 버린다. 퍼센트는 N이 확정되어야 의미가 있다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::aggregate::{SimulationSummary, Tally};
use super::config::{DraftScope, SimulationConfig};
use super::seeding::SeedingResolver;
use super::trial::TrialSimulator;
use super::win_prob::WinProbability;
use crate::error::{Result, SimError};
use crate::models::League;

/// Shared abort flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// SplitMix64 finalizer over `base + trial`.
///
/// Adjacent trial indices land on unrelated ChaCha seeds.
pub fn derive_trial_seed(base: u64, trial: u64) -> u64 {
    let mut z = base.wrapping_add(trial).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub struct MonteCarloDriver<'a, M: WinProbability + ?Sized> {
    league: &'a League,
    model: &'a M,
    config: SimulationConfig,
    cancel: CancelToken,
}

impl<'a, M: WinProbability + ?Sized> MonteCarloDriver<'a, M> {
    pub fn new(league: &'a League, model: &'a M, config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        config.seeding.validate_for(league)?;
        Ok(Self {
            league,
            model,
            config: config.clone(),
            cancel: CancelToken::new(),
        })
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every trial and returns the aggregate, or nothing.
    pub fn run(&self) -> Result<SimulationSummary> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let trials = self.config.trials;

        let simulator = TrialSimulator::new(self.league, self.model)?;
        let resolver = SeedingResolver::new(self.league, &self.config.seeding)?;
        let scope = self.config.seeding.draft_scope;
        let wildcard_slots = self.config.seeding.wildcard_slots;

        info!(
            teams = self.league.team_count(),
            scheduled = self.league.scheduled_games().len(),
            trials,
            seed,
            workers = ?self.config.workers,
            "Starting playoff simulation"
        );
        let started = Instant::now();

        let empty = || Tally::for_league(self.league, &resolver, wildcard_slots, scope);
        let work = || {
            (0..trials)
                .into_par_iter()
                .try_fold(empty, |mut tally, trial| {
                    if self.cancel.is_cancelled() {
                        return Err(SimError::Cancelled);
                    }
                    let mut rng = ChaCha8Rng::seed_from_u64(derive_trial_seed(seed, trial));
                    let standings = simulator.simulate(&mut rng);
                    let results = resolver.resolve_all(&standings, trial)?;
                    let mut fallback_used = results.iter().any(|r| r.fallback_used);

                    match scope {
                        DraftScope::League => {
                            let draft = resolver.league_draft_order(&results, &standings);
                            fallback_used |= draft.fallback_used;
                            tally.record(&results, Some(&draft.order), fallback_used);
                        }
                        DraftScope::Conference => tally.record(&results, None, fallback_used),
                    }
                    Ok(tally)
                })
                .try_reduce(empty, |a, b| Ok(a.merge(b)))
        };

        let result = match self.config.workers {
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?
                .install(work),
            None => work(),
        };

        let tally = match result {
            Ok(tally) => tally,
            Err(SimError::Cancelled) => {
                warn!(seed, "Simulation cancelled, partial results discarded");
                return Err(SimError::Cancelled);
            }
            Err(e) => return Err(e),
        };
        // 취소가 마지막 trial 이후에 들어온 경우도 취소로 본다
        if self.cancel.is_cancelled() {
            return Err(SimError::Cancelled);
        }

        let summary = tally.finalize(self.league, seed);
        if summary.fallback_trials > 0 {
            debug!(
                fallback_trials = summary.fallback_trials,
                "Some placements were decided by team name"
            );
        }
        info!(
            trials = summary.trials,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Playoff simulation complete"
        );
        Ok(summary)
    }
}
