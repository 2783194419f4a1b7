//! Command-line admin toolset for minigolf tournaments.
//!
//! Generates printable hole cards, team cards and blank scorecards as PDFs
//! with embedded QR codes, drives tournament control operations, shows
//! leaderboards and simulates whole tournaments against the live APIs.
//!
//! # Usage
//!
//! ```bash
//! # Generate hole cards for every course
//! cargo run -- hole-cards
//!
//! # Generate cards for one course, compact layout
//! cargo run -- hole-cards --course "Black Course" --page compact
//!
//! # Generate and email scorecards
//! cargo run -- scorecards --course "Red Course" --email
//!
//! # Show the team leaderboard, refreshing every 30 seconds
//! cargo run -- leaderboard "Summer Open" --watch 30
//!
//! # Simulate a 25-team tournament without pacing delays
//! cargo run -- simulate "Summer Open" --quick --seed 7
//! ```
//!
//! # Environment Variables
//!
//! - `MAIN_API_URL`: base URL of the main entity API
//! - `TOURNAMENT_API_URL`: base URL of the tournament API
//! - `SMTP_HOST` (plus credentials): enables `scorecards --email`
//!
//! See [`clubhouse::config`] for the full list.
//!
//! # Exit Codes
//!
//! `0` when every attempted record succeeded; `1` on fatal errors or when
//! a batch finished with skipped records or failed emails.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;

use clubhouse::application::BatchReport;
use clubhouse::application::services::{
    HoleCardRun, HoleCardService, LeaderboardRows, LeaderboardService, LeaderboardView,
    ScorecardRun, ScorecardService, SimulationOptions, SimulationService, TeamCardRun,
    TeamCardService,
};
use clubhouse::compose::PageTemplate;
use clubhouse::config::{self, Config};
use clubhouse::domain::sources::{ControlAck, CourseSource, RoundClose, TournamentControl};
use clubhouse::email::Mailer;
use clubhouse::error::AppError;
use clubhouse::infrastructure::http::{MainApi, TournamentApi};
use clubhouse::logging::init_tracing;

/// Tournament admin toolset.
#[derive(Parser)]
#[command(name = "clubhouse")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pin the batch timestamp (RFC 3339) so reruns are byte-identical
    #[arg(long, global = true, value_name = "RFC3339", value_parser = parse_generated_at)]
    generated_at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate printable hole cards with QR codes
    HoleCards {
        /// Limit to these course names (repeatable)
        #[arg(long = "course", value_name = "NAME")]
        courses: Vec<String>,

        /// List available courses and exit
        #[arg(long)]
        list: bool,

        /// Output folder (default: HOLE_CARDS_DIR)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Page layout: card (5x7) or compact (8.5x5.5)
        #[arg(long, default_value = "card")]
        page: PageTemplate,
    },

    /// Generate printable team cards with QR codes
    TeamCards {
        /// Limit to these team names (repeatable, case-insensitive)
        #[arg(long = "team", value_name = "NAME")]
        teams: Vec<String>,

        /// List available teams and exit
        #[arg(long)]
        list: bool,

        /// Output folder (default: TEAM_CARDS_DIR)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Page layout: card (5x7) or compact (8.5x5.5)
        #[arg(long, default_value = "card")]
        page: PageTemplate,
    },

    /// Generate blank scorecards for a course, optionally emailing them
    Scorecards {
        /// Course the scorecards are for
        #[arg(long, value_name = "NAME")]
        course: String,

        /// Limit to these team names (repeatable, case-insensitive)
        #[arg(long = "team", value_name = "NAME")]
        teams: Vec<String>,

        /// Output folder (default: SCORECARDS_DIR)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Email each scorecard to the team's registered addresses
        #[arg(long)]
        email: bool,

        /// Send every scorecard to this address instead of the rosters
        #[arg(long, value_name = "ADDR")]
        to: Option<String>,
    },

    /// Recompute and show a tournament leaderboard
    Leaderboard {
        /// Tournament name
        tournament: String,

        /// Show the player leaderboard instead of teams
        #[arg(long)]
        players: bool,

        /// Refresh every SECS seconds until interrupted
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },

    /// Start or end a tournament
    Tournament {
        #[command(subcommand)]
        action: TournamentAction,
    },

    /// Activate or close team and player rounds
    Round {
        #[command(subcommand)]
        action: RoundAction,
    },

    /// Record one score for a player
    Score {
        /// Player number
        #[arg(long, value_name = "N")]
        player: i64,

        /// Course name
        #[arg(long, value_name = "NAME")]
        course: String,

        /// Hole number
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..=18))]
        hole: i64,

        /// Stroke count
        #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..))]
        strokes: i64,
    },

    /// Simulate a whole tournament against the live APIs
    Simulate {
        /// Tournament name
        tournament: String,

        /// Number of teams in the field
        #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(i64).range(1..))]
        teams: i64,

        /// Skip the realistic pacing delays
        #[arg(long)]
        quick: bool,

        /// Seed for reproducible scores
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },

    /// Check connectivity to both APIs
    Health,
}

/// Tournament lifecycle subcommands.
#[derive(Subcommand)]
enum TournamentAction {
    /// Mark a tournament as running
    Start {
        /// Tournament name
        name: String,
    },

    /// Mark a tournament as finished
    End {
        /// Tournament name
        name: String,
    },
}

/// Round lifecycle subcommands.
#[derive(Subcommand)]
enum RoundAction {
    /// Activate a team's round in a tournament
    ActivateTeam {
        #[arg(long, value_name = "NAME")]
        tournament: String,

        /// Team number
        #[arg(long, value_name = "N")]
        team: i64,
    },

    /// Activate one player's round within a team's round
    ActivatePlayer {
        #[arg(long, value_name = "NAME")]
        tournament: String,

        /// Team number
        #[arg(long, value_name = "N")]
        team: i64,

        /// Player number
        #[arg(long, value_name = "N")]
        player: i64,
    },

    /// Close a team's round and print the final numbers
    EndTeam {
        #[arg(long, value_name = "NAME")]
        tournament: String,

        /// Team number
        #[arg(long, value_name = "N")]
        team: i64,
    },

    /// Close a player's round and print the final numbers
    EndPlayer {
        #[arg(long, value_name = "NAME")]
        tournament: String,

        /// Player number
        #[arg(long, value_name = "N")]
        player: i64,
    },
}

fn parse_generated_at(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|stamp| stamp.with_timezone(&Utc))
        .map_err(|e| format!("not an RFC 3339 timestamp: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e:#}", "Configuration error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    match run(cli, config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed command. Returns whether the run was fully clean.
async fn run(cli: Cli, config: Config) -> anyhow::Result<bool> {
    let main_api = Arc::new(MainApi::from_config(&config)?);
    let tournament_api = Arc::new(TournamentApi::from_config(&config)?);
    let generated_at = cli.generated_at.unwrap_or_else(Utc::now);

    match cli.command {
        Commands::HoleCards {
            courses,
            list,
            out,
            page,
        } => {
            let service =
                HoleCardService::new(Arc::clone(&main_api), Arc::clone(&tournament_api));
            if list {
                let names = service.available_courses().await?;
                print_name_list("Available courses", &names);
                return Ok(true);
            }

            println!("{}", "Generating hole cards".bright_blue().bold());
            let batch = HoleCardRun {
                courses,
                output_dir: out.unwrap_or_else(|| config.hole_cards_dir.clone()),
                template: page,
                generated_at,
            };
            let report = service.run(&batch).await?;
            print_batch_summary("hole cards", &report);
            Ok(report.is_clean())
        }

        Commands::TeamCards {
            teams,
            list,
            out,
            page,
        } => {
            let service =
                TeamCardService::new(Arc::clone(&main_api), Arc::clone(&tournament_api));
            if list {
                let names = service.available_teams().await?;
                print_name_list("Available teams", &names);
                return Ok(true);
            }

            println!("{}", "Generating team cards".bright_blue().bold());
            let batch = TeamCardRun {
                teams,
                output_dir: out.unwrap_or_else(|| config.team_cards_dir.clone()),
                template: page,
                generated_at,
            };
            let report = service.run(&batch).await?;
            print_batch_summary("team cards", &report);
            Ok(report.is_clean())
        }

        Commands::Scorecards {
            course,
            teams,
            out,
            email,
            to,
        } => {
            // --to on its own implies mailing.
            let email = email || to.is_some();
            let mailer = match &config.smtp {
                Some(smtp) if email => Some(Mailer::from_config(smtp)?),
                _ => None,
            };

            let service =
                ScorecardService::new(Arc::clone(&main_api), Arc::clone(&main_api), mailer);

            println!("{}", "Generating scorecards".bright_blue().bold());
            let batch = ScorecardRun {
                course,
                teams,
                output_dir: out.unwrap_or_else(|| config.scorecards_dir.clone()),
                email,
                to_override: to,
                generated_at,
            };
            let report = service.run(&batch).await?;
            print_batch_summary("scorecards", &report);
            Ok(report.is_clean())
        }

        Commands::Leaderboard {
            tournament,
            players,
            watch,
        } => {
            let service = LeaderboardService::new(Arc::clone(&tournament_api));
            match watch {
                Some(secs) => {
                    let interval = Duration::from_secs(secs.max(1));
                    loop {
                        let view = service.fetch(&tournament, players).await?;
                        print_leaderboard(&view);
                        tokio::time::sleep(interval).await;
                    }
                }
                None => {
                    let view = service.fetch(&tournament, players).await?;
                    print_leaderboard(&view);
                    Ok(true)
                }
            }
        }

        Commands::Tournament { action } => {
            handle_tournament(action, tournament_api.as_ref()).await?;
            Ok(true)
        }

        Commands::Round { action } => {
            handle_round(action, tournament_api.as_ref()).await?;
            Ok(true)
        }

        Commands::Score {
            player,
            course,
            hole,
            strokes,
        } => {
            let ack = tournament_api
                .record_score(player, &course, hole, strokes)
                .await?;
            print_ack(&ack);
            Ok(true)
        }

        Commands::Simulate {
            tournament,
            teams,
            quick,
            seed,
        } => {
            println!(
                "{}",
                format!("Simulating '{tournament}' with {teams} teams")
                    .bright_blue()
                    .bold()
            );
            let service =
                SimulationService::new(Arc::clone(&main_api), Arc::clone(&tournament_api));
            let options = SimulationOptions {
                tournament,
                teams,
                quick,
                seed,
            };
            let report = service.run(&options).await?;

            println!();
            if report.failed == 0 {
                println!(
                    "{}",
                    format!("✅ All {} teams completed their rounds", report.completed)
                        .green()
                        .bold()
                );
            } else {
                println!(
                    "{}",
                    format!(
                        "⚠️  {} teams completed, {} failed",
                        report.completed, report.failed
                    )
                    .yellow()
                    .bold()
                );
            }
            Ok(report.failed == 0)
        }

        Commands::Health => {
            println!("{}", "Checking API connectivity...".bright_blue());
            let mut healthy = true;

            match CourseSource::health(main_api.as_ref()).await {
                Ok(()) => println!(
                    "  Main API        {} ({})",
                    "✅ reachable".green(),
                    config.main_api_url
                ),
                Err(e) => {
                    healthy = false;
                    println!("  Main API        {} {e}", "❌".red());
                }
            }

            match TournamentControl::health(tournament_api.as_ref()).await {
                Ok(()) => println!(
                    "  Tournament API  {} ({})",
                    "✅ reachable".green(),
                    config.tournament_api_url
                ),
                Err(e) => {
                    healthy = false;
                    println!("  Tournament API  {} {e}", "❌".red());
                }
            }

            Ok(healthy)
        }
    }
}

/// Dispatches tournament lifecycle commands.
async fn handle_tournament(
    action: TournamentAction,
    control: &TournamentApi,
) -> Result<(), AppError> {
    match action {
        TournamentAction::Start { name } => {
            println!(
                "{}",
                format!("Starting tournament '{name}'").bright_blue().bold()
            );
            let ack = control.start_tournament(&name).await?;
            print_ack(&ack);
        }
        TournamentAction::End { name } => {
            println!(
                "{}",
                format!("Ending tournament '{name}'").bright_blue().bold()
            );
            let ack = control.end_tournament(&name).await?;
            print_ack(&ack);
        }
    }

    Ok(())
}

/// Dispatches round lifecycle commands.
async fn handle_round(action: RoundAction, control: &TournamentApi) -> Result<(), AppError> {
    match action {
        RoundAction::ActivateTeam { tournament, team } => {
            let ack = control.activate_team_round(&tournament, team).await?;
            print_ack(&ack);
        }
        RoundAction::ActivatePlayer {
            tournament,
            team,
            player,
        } => {
            let ack = control
                .activate_player_round(&tournament, team, player)
                .await?;
            print_ack(&ack);
        }
        RoundAction::EndTeam { tournament, team } => {
            let close = control.end_team_round(team, &tournament).await?;
            print_close(&close);
        }
        RoundAction::EndPlayer { tournament, player } => {
            let close = control.end_player_round(player, &tournament).await?;
            print_close(&close);
        }
    }

    Ok(())
}

fn print_ack(ack: &ControlAck) {
    match ack.affected_count {
        Some(count) => println!(
            "{} ({} rounds)",
            format!("✅ {}", ack.message).green().bold(),
            count
        ),
        None => println!("{}", format!("✅ {}", ack.message).green().bold()),
    }
}

fn print_close(close: &RoundClose) {
    println!("{}", format!("✅ {}", close.message).green().bold());
    println!(
        "  Total: {}  Average: {:.2}  Holes: {}",
        close.total.to_string().bright_white().bold(),
        close.average,
        close.holes_played
    );
}

fn print_name_list(title: &str, names: &[String]) {
    println!("{}", title.bright_blue().bold());
    println!();

    if names.is_empty() {
        println!("  {}", "None on file".yellow());
        return;
    }

    for name in names {
        println!("  {}", name.cyan());
    }

    println!();
    println!("  Total: {}", names.len().to_string().bright_white().bold());
}

/// Prints the outcome of one batch run.
///
/// # Output Format
///
/// ```text
/// Done: 36 hole cards generated, 1 skipped
///   holecards/hole_card_Black Course_hole_01.pdf
///   ...
/// ```
fn print_batch_summary(label: &str, report: &BatchReport) {
    println!();
    println!(
        "{} {} {} generated, {} skipped",
        "Done:".bright_white().bold(),
        report.succeeded.to_string().green().bold(),
        label,
        report.skipped.to_string().yellow()
    );

    for file in &report.files {
        println!("  {}", file.display().to_string().bright_black());
    }

    if report.emailed > 0 || report.email_failures > 0 {
        println!(
            "  Emails: {} sent, {} failed",
            report.emailed.to_string().green(),
            report.email_failures.to_string().red()
        );
    }
}

/// Prints a ranked leaderboard table.
fn print_leaderboard(view: &LeaderboardView) {
    println!();
    println!("{}", format!("🏆 {}", view.tournament).bright_blue().bold());
    println!(
        "  {}",
        format!(
            "Recomputed {} player rounds, {} team rounds",
            view.refresh.updated_player_rounds, view.refresh.updated_team_rounds
        )
        .bright_black()
    );
    println!();

    println!(
        "  {:<5} {:<30} {:>6} {:>8} {:>6}",
        "Rank".bright_white().bold(),
        "Name".bright_white().bold(),
        "Total".bright_white().bold(),
        "Avg".bright_white().bold(),
        "Holes".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    match &view.rows {
        LeaderboardRows::Teams(rows) => {
            if rows.is_empty() {
                println!("  {}", "No rounds recorded yet".yellow());
                return;
            }
            for row in rows {
                println!(
                    "  {:<5} {:<30} {:>6} {:>8.2} {:>6}",
                    format_rank(row.rank),
                    row.team_name.cyan(),
                    row.total,
                    row.average,
                    row.holes_played
                );
            }
        }
        LeaderboardRows::Players(rows) => {
            if rows.is_empty() {
                println!("  {}", "No rounds recorded yet".yellow());
                return;
            }
            for row in rows {
                println!(
                    "  {:<5} {:<30} {:>6} {:>8.2} {:>6}",
                    format_rank(row.rank),
                    row.player_name.cyan(),
                    row.total,
                    row.average,
                    row.holes_played
                );
            }
        }
    }
}

/// Unranked rows show a dash instead of rank zero.
fn format_rank(rank: i64) -> String {
    if rank < 1 {
        "-".to_string()
    } else {
        rank.to_string()
    }
}
