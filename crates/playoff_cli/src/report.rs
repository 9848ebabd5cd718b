//! SimulationSummary → CSV / Markdown / JSON

use anyhow::{bail, Context, Result};
use playoff_core::{SimulationSummary, TeamSummary};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "md" | "markdown" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => bail!("Unknown report format '{}' (csv, markdown, json)", other),
        }
    }
}

/// 실행 메타데이터 (재현성 확인용)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// 재실행에 쓰는 base seed
    pub seed: u64,
    pub trials: u64,
    /// JSON 요약의 SHA256 (hex)
    pub fingerprint: String,
    /// 이름 순서 fallback이 개입한 trial 비율 (%)
    pub fallback_pct: f64,
    /// 생성 시각 (RFC3339)
    pub created_at: String,
}

impl RunMetadata {
    pub fn for_summary(summary: &SimulationSummary) -> Result<Self> {
        Ok(Self {
            seed: summary.seed,
            trials: summary.trials,
            fingerprint: fingerprint(summary)?,
            fallback_pct: summary.fallback_pct(),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// Same seed, schedule and config → same fingerprint.
pub fn fingerprint(summary: &SimulationSummary) -> Result<String> {
    let bytes = serde_json::to_vec(summary).context("Failed to serialize summary")?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Conference, then playoff odds (high first), then name.
fn sorted_teams(summary: &SimulationSummary) -> Vec<&TeamSummary> {
    let mut teams: Vec<&TeamSummary> = summary.teams.iter().collect();
    teams.sort_by(|a, b| {
        a.conference
            .cmp(&b.conference)
            .then(b.playoff_pct.total_cmp(&a.playoff_pct))
            .then_with(|| a.name.cmp(&b.name))
    });
    teams
}

fn fmt_pct(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn render(summary: &SimulationSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Csv => render_csv(summary),
        ReportFormat::Markdown => Ok(render_markdown(summary)),
        ReportFormat::Json => render_json(summary),
    }
}

pub fn render_csv(summary: &SimulationSummary) -> Result<String> {
    let seeds = summary.teams.iter().map(|t| t.seed_pct.len()).max().unwrap_or(0);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = [
        "team",
        "conference",
        "division",
        "record",
        "playoff_pct",
        "division_pct",
        "eliminated_pct",
        "expected_pick",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    header.extend((1..=seeds).map(|s| format!("seed_{}_pct", s)));
    writer.write_record(&header)?;

    for team in sorted_teams(summary) {
        let mut row = vec![
            team.name.clone(),
            team.conference.to_string(),
            team.division.clone(),
            team.record.to_string(),
            fmt_pct(team.playoff_pct),
            fmt_pct(team.division_title_pct),
            fmt_pct(team.eliminated_pct),
            team.expected_draft_pick
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default(),
        ];
        row.extend((0..seeds).map(|s| fmt_pct(team.seed_pct.get(s).copied().unwrap_or(0.0))));
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn render_markdown(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Playoff odds ({} trials, seed {})\n",
        summary.trials, summary.seed
    );

    let mut current = None;
    for team in sorted_teams(summary) {
        if current != Some(team.conference) {
            current = Some(team.conference);
            let _ = writeln!(out, "\n## Conference {}\n", team.conference);
            let _ = writeln!(out, "| Team | Div | Record | Playoffs | Division | Top seed | Exp. pick |");
            let _ = writeln!(out, "|---|---|---|---:|---:|---:|---:|");
        }
        let _ = writeln!(
            out,
            "| {} | {} | {} | {}% | {}% | {}% | {} |",
            team.name,
            team.division,
            team.record,
            fmt_pct(team.playoff_pct),
            fmt_pct(team.division_title_pct),
            fmt_pct(team.seed_pct.first().copied().unwrap_or(0.0)),
            team.expected_draft_pick
                .map(|p| format!("{:.1}", p))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    if summary.fallback_trials > 0 {
        let _ = writeln!(
            out,
            "\n_Name order decided at least one placement in {}% of trials._",
            fmt_pct(summary.fallback_pct())
        );
    }
    out
}

pub fn render_json(summary: &SimulationSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("Failed to serialize summary")
}
