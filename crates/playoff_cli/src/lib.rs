//! Playoff Odds CLI Library
//!
//! CSV (teams / games) → `League` → `playoff_core` 시뮬레이션 → CSV / Markdown / JSON 리포트
//! + JSON 요약의 SHA256 fingerprint

pub mod loader;
pub mod report;

use anyhow::{Context, Result};
use playoff_core::SimulationConfig;
use std::fs;
use std::path::Path;

pub use loader::{load_games, load_league, load_teams, read_games, read_teams};
pub use report::{fingerprint, render, ReportFormat, RunMetadata};

/// 설정 파일 로드 (`.json`이면 JSON, 나머지는 YAML)
pub fn load_config(path: &Path) -> Result<SimulationConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        SimulationConfig::from_json_str(&raw)
    } else {
        SimulationConfig::from_yaml_str(&raw)
    };
    config.with_context(|| format!("Invalid config file: {}", path.display()))
}

/// 결과 파일 쓰기 (상위 디렉터리 자동 생성)
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use playoff_core::{DraftScope, TieBreaker};
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_yaml_config() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        file.write_all(
            b"trials: 2500\nseed: 77\nseeding:\n  wildcard_slots: 2\n  tie_breakers: [head_to_head, alphabetical]\n  draft_scope: conference\n",
        )?;

        let config = load_config(file.path())?;
        assert_eq!(config.trials, 2500);
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.seeding.wildcard_slots, 2);
        assert_eq!(
            config.seeding.tie_breakers,
            vec![TieBreaker::HeadToHead, TieBreaker::Alphabetical]
        );
        assert_eq!(config.seeding.draft_scope, DraftScope::Conference);
        Ok(())
    }

    #[test]
    fn test_load_json_config() -> Result<()> {
        let mut file = Builder::new().suffix(".json").tempfile()?;
        file.write_all(br#"{"trials": 300, "workers": 2}"#)?;

        let config = load_config(file.path())?;
        assert_eq!(config.trials, 300);
        assert_eq!(config.workers, Some(2));
        Ok(())
    }

    #[test]
    fn test_invalid_config_names_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"trials: 0\n")?;

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
        Ok(())
    }

    #[test]
    fn test_write_output_creates_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("reports").join("odds.md");
        write_output(&path, "# odds\n")?;
        assert_eq!(fs::read_to_string(&path)?, "# odds\n");
        Ok(())
    }
}
