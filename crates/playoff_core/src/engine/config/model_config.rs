//! Win-probability model configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a team's strength is read off its record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrengthBasis {
    /// Elo: `p = 1 / (1 + 10^(-diff / scale))`
    Rating { scale: f64 },
    /// log5 on the win percentage, regressed toward .500 by `prior_games`
    WinPct { prior_games: f64 },
}

impl Default for StrengthBasis {
    fn default() -> Self {
        StrengthBasis::Rating { scale: 400.0 }
    }
}

/// 홈 어드밴티지 (strength 단위로 차이에 더해짐)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomeField {
    pub enabled: bool,
    /// Rating 기준이면 rating 점수, WinPct 기준이면 logit 단위 (기본: 48.0)
    pub bonus: f64,
}

impl Default for HomeField {
    fn default() -> Self {
        Self {
            enabled: true,
            bonus: 48.0,
        }
    }
}

impl HomeField {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            bonus: 0.0,
        }
    }

    pub fn effective_bonus(&self) -> f64 {
        if self.enabled {
            self.bonus
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub basis: StrengthBasis,
    #[serde(default)]
    pub home_field: HomeField,
    /// 무승부 확률 (기본: 0.0, 리그가 무승부를 허용하지 않으면 0)
    #[serde(default)]
    pub tie_rate: f64,
    /// 상대 전력(SOS) 가중치, 같은 strength 단위 (기본: 0.0)
    #[serde(default)]
    pub sos_weight: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            basis: StrengthBasis::default(),
            home_field: HomeField::default(),
            tie_rate: 0.0,
            sos_weight: 0.0,
        }
    }
}

impl ModelConfig {
    /// Elo ratings, 48-point home edge, NFL-like tie frequency.
    pub fn nfl() -> Self {
        Self {
            tie_rate: 0.003,
            ..Self::default()
        }
    }

    /// Strength from current records only (no ratings needed).
    pub fn win_pct() -> Self {
        Self {
            basis: StrengthBasis::WinPct { prior_games: 2.0 },
            home_field: HomeField {
                enabled: true,
                bonus: 0.2,
            },
            tie_rate: 0.0,
            sos_weight: 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.basis {
            StrengthBasis::Rating { scale } => {
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(ConfigError::InvalidModelParameter {
                        name: "basis.scale",
                        value: scale,
                    });
                }
            }
            StrengthBasis::WinPct { prior_games } => {
                if !(prior_games.is_finite() && prior_games >= 0.0) {
                    return Err(ConfigError::InvalidModelParameter {
                        name: "basis.prior_games",
                        value: prior_games,
                    });
                }
            }
        }
        if !self.home_field.bonus.is_finite() {
            return Err(ConfigError::InvalidModelParameter {
                name: "home_field.bonus",
                value: self.home_field.bonus,
            });
        }
        if !(0.0..1.0).contains(&self.tie_rate) {
            return Err(ConfigError::InvalidModelParameter {
                name: "tie_rate",
                value: self.tie_rate,
            });
        }
        if !self.sos_weight.is_finite() {
            return Err(ConfigError::InvalidModelParameter {
                name: "sos_weight",
                value: self.sos_weight,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(ModelConfig::default().validate().is_ok());
        assert!(ModelConfig::nfl().validate().is_ok());
        assert!(ModelConfig::win_pct().validate().is_ok());
    }

    #[test]
    fn test_tie_rate_must_leave_room_for_decisions() {
        let cfg = ModelConfig {
            tie_rate: 1.0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidModelParameter { name: "tie_rate", .. })
        ));
    }

    #[test]
    fn test_disabled_home_field_has_no_bonus() {
        let mut home = HomeField::default();
        assert_eq!(home.effective_bonus(), 48.0);
        home.enabled = false;
        assert_eq!(home.effective_bonus(), 0.0);
    }

    #[test]
    fn test_basis_yaml_tag() {
        let cfg: ModelConfig =
            serde_yaml::from_str("basis:\n  kind: win_pct\n  prior_games: 4.0\ntie_rate: 0.01\n")
                .unwrap();
        assert_eq!(cfg.basis, StrengthBasis::WinPct { prior_games: 4.0 });
        assert!(cfg.home_field.enabled);
    }
}
