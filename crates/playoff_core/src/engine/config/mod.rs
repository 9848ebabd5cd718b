//! # Simulation Configuration
//!
//! 한 번의 시뮬레이션 실행에 필요한 모든 파라미터.
//!
//! ## 사용법
//! ```rust
//! use playoff_core::engine::config::SimulationConfig;
//!
//! let config = SimulationConfig::default();
//! let quick = SimulationConfig::quick().with_seed(7);
//! assert!(quick.trials < config.trials);
//! ```

mod model_config;
mod seeding_config;

pub use model_config::{HomeField, ModelConfig, StrengthBasis};
pub use seeding_config::{DraftScope, SeedingConfig};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TRIALS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 시뮬레이션 반복 횟수 N (기본: 10,000)
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// 고정 시드, 없으면 엔트로피에서 뽑아 로그로 남김
    #[serde(default)]
    pub seed: Option<u64>,
    /// 워커 스레드 수, 없으면 전체 코어
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub seeding: SeedingConfig,
}

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            workers: None,
            model: ModelConfig::default(),
            seeding: SeedingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// NFL format: 4 divisions + 3 wildcards per conference, Elo model
    pub fn nfl() -> Self {
        Self {
            model: ModelConfig::nfl(),
            seeding: SeedingConfig::nfl(),
            ..Self::default()
        }
    }

    /// 1,000 trials, for previews and tests
    pub fn quick() -> Self {
        Self {
            trials: 1_000,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrialCount(self.trials));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkerCount);
        }
        self.model.validate()?;
        self.seeding.validate()
    }
}

// ========== Tests ==========
