//! CSV → League 로더
//!
//! teams.csv: `name,conference,division,wins,losses,ties,rating,opponent_strength`
//! games.csv: `home,away,week,result,neutral`
//!
//! - `week`는 파일에서 1부터 시작 (내부 `Week`는 0부터)
//! - `result`가 비어 있으면 예정 경기, `home` / `away` / `tie`면 종료 경기
//! - `ties`, `rating`, `opponent_strength`, `neutral`은 생략 가능

use anyhow::{anyhow, bail, Context, Result};
use playoff_core::{Conference, Game, League, Outcome, Team, Week};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct TeamRow {
    name: String,
    conference: String,
    division: String,
    wins: u32,
    losses: u32,
    #[serde(default)]
    ties: Option<u32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    opponent_strength: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GameRow {
    home: String,
    away: String,
    week: u16,
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    neutral: Option<bool>,
}

/// CSV 헤더 다음 줄이 2번째 줄
fn line_of(index: usize) -> usize {
    index + 2
}

pub fn read_teams<R: Read>(input: R) -> Result<Vec<Team>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut teams = Vec::new();

    for (i, row) in reader.deserialize::<TeamRow>().enumerate() {
        let row = row.with_context(|| format!("Invalid team row at line {}", line_of(i)))?;
        let conference = Conference::parse(&row.conference).ok_or_else(|| {
            anyhow!(
                "Line {}: unknown conference '{}' for team '{}'",
                line_of(i),
                row.conference,
                row.name
            )
        })?;

        let mut team = Team::new(row.name, conference, row.division).with_record(
            row.wins,
            row.losses,
            row.ties.unwrap_or(0),
        );
        if let Some(rating) = row.rating {
            team = team.with_rating(rating);
        }
        if let Some(strength) = row.opponent_strength {
            team = team.with_opponent_strength(strength);
        }
        teams.push(team);
    }
    Ok(teams)
}

pub fn read_games<R: Read>(input: R) -> Result<Vec<Game>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut games = Vec::new();

    for (i, row) in reader.deserialize::<GameRow>().enumerate() {
        let row = row.with_context(|| format!("Invalid game row at line {}", line_of(i)))?;
        let Some(week) = Week::from_display(row.week) else {
            bail!("Line {}: weeks start at 1, got {}", line_of(i), row.week);
        };

        let outcome = match row.result.as_deref().map(str::to_ascii_lowercase).as_deref() {
            None | Some("") => None,
            Some("home") => Some(Outcome::HomeWin),
            Some("away") => Some(Outcome::AwayWin),
            Some("tie") => Some(Outcome::Tie),
            Some(other) => bail!(
                "Line {}: result must be home, away, tie or empty, got '{}'",
                line_of(i),
                other
            ),
        };

        let mut game = match outcome {
            Some(outcome) => Game::completed(row.home, row.away, week, outcome),
            None => Game::scheduled(row.home, row.away, week),
        };
        if row.neutral.unwrap_or(false) {
            game = game.at_neutral_site();
        }
        games.push(game);
    }
    Ok(games)
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open teams file: {}", path.display()))?;
    read_teams(file).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_games(path: &Path) -> Result<Vec<Game>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open games file: {}", path.display()))?;
    read_games(file).with_context(|| format!("Failed to parse {}", path.display()))
}

/// 두 파일을 읽어 검증된 `League`를 만든다.
pub fn load_league(teams_path: &Path, games_path: &Path) -> Result<League> {
    let teams = load_teams(teams_path)?;
    let games = load_games(games_path)?;
    let league = League::new(teams, games).context("Schedule does not match team list")?;

    tracing::info!(
        teams = league.team_count(),
        completed = league.completed_games().len(),
        scheduled = league.scheduled_games().len(),
        "Loaded league"
    );
    Ok(league)
}
