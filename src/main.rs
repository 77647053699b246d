//! Terminal word-scramble runner (default binary).
//!
//! Line-oriented: prints the scrambled word, reads guesses and `:` commands
//! from stdin, and shows the running timer in the terminal title.

use std::fmt::Display;
use std::io::{stdout, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use crossterm::{execute, terminal::SetTitle};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use word_scramble::client::{ClientConfig, HttpBackend};
use word_scramble::core::{Backend, GuessReport, RoundError};
use word_scramble::engine::{
    drain, EngineConfig, MemoryBackend, RoundEvent, RoundSummary, Session, TokioClock,
};
use word_scramble::input::{parse_command, PlayerCommand};
use word_scramble::types::{
    HintKind, LeaderboardEntry, MAX_GUESSES, MAX_LETTERS, MIN_LETTERS, POINTS_PER_LETTER, TIME_BONUS_TIERS,
};

#[derive(Parser)]
#[command(name = "word-scramble")]
#[command(about = "Unscramble the word before your guesses run out", long_about = None)]
struct Args {
    /// Name recorded on the leaderboard
    #[arg(short, long)]
    user: String,

    /// Word length for each round
    #[arg(short, long, default_value_t = 4)]
    letters: u8,

    /// Show the per-position code after each guess
    #[arg(long)]
    show_code: bool,

    /// Show the similarity percentage after each guess
    #[arg(long)]
    show_similarity: bool,

    /// Play against a built-in word instead of the scramble service (sets --letters)
    #[arg(long, value_name = "WORD")]
    offline: Option<String>,
}

type StdinLines = Lines<BufReader<Stdin>>;

enum RoundEnd {
    Finished,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let backend: Arc<dyn Backend> = match &args.offline {
        Some(word) => {
            let word = word.trim().to_lowercase();
            args.letters = u8::try_from(word.chars().count()).unwrap_or(u8::MAX);
            info!("[Runner] offline, {} letters", args.letters);
            Arc::new(MemoryBackend::new(&word))
        }
        None => {
            let config = ClientConfig::from_env();
            info!("[Runner] scramble service at {}", config.base_url);
            Arc::new(HttpBackend::new(&config))
        }
    };
    let (mut session, mut events) =
        Session::new(backend, Arc::new(TokioClock), EngineConfig::from_env());

    session
        .open()
        .await
        .context("could not open a session with the scramble service")?;

    let result = run(&mut session, &mut events, &args).await;

    // Always try to restore the terminal title.
    let _ = execute!(stdout(), SetTitle(""));
    session.shutdown().await;
    result
}

async fn run(
    session: &mut Session,
    events: &mut UnboundedReceiver<RoundEvent>,
    args: &Args,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_help();
    println!();
    print_leaderboard(&session.leaderboard().await);

    loop {
        let scrambled = session
            .start(args.letters, &args.user)
            .await
            .context("could not start a round")?;
        println!();
        println!("Unscramble: {}", scrambled.to_uppercase().bold());

        match play_round(session, events, &mut lines, args).await? {
            RoundEnd::Quit => return Ok(()),
            RoundEnd::Finished => {}
        }

        let summary = session.conclude().await?;
        drain(events);
        print_summary(&summary);

        print!("Another round? [Y/n] ");
        stdout().flush()?;
        match lines.next_line().await? {
            Some(answer) if !answer.trim().eq_ignore_ascii_case("n") => {}
            _ => return Ok(()),
        }
    }
}

async fn play_round(
    session: &mut Session,
    events: &mut UnboundedReceiver<RoundEvent>,
    lines: &mut StdinLines,
    args: &Args,
) -> Result<RoundEnd> {
    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                if let RoundEvent::Tick { elapsed_seconds } = event {
                    let _ = execute!(stdout(), SetTitle(format!("word-scramble {elapsed_seconds}s")));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(RoundEnd::Quit);
                };
                let Some(command) = parse_command(&line) else {
                    continue;
                };

                match command {
                    PlayerCommand::Quit => return Ok(RoundEnd::Quit),
                    PlayerCommand::Help => print_help(),
                    PlayerCommand::Leaderboard => print_leaderboard(&session.leaderboard().await),
                    PlayerCommand::Unknown(cmd) => {
                        println!("{}", format!("unknown command :{cmd} (try :help)").yellow());
                    }
                    PlayerCommand::Hint(kind) => show_hint(session, kind).await?,
                    PlayerCommand::Guess(word) => match session.submit_guess(&word).await {
                        Ok(report) => {
                            print_guess(&report, args);
                            if report.phase.is_terminal() {
                                return Ok(RoundEnd::Finished);
                            }
                        }
                        Err(err) => report_error(err)?,
                    },
                }
            }
        }
    }
}

async fn show_hint(session: &mut Session, kind: HintKind) -> Result<()> {
    match session.use_hint(kind).await {
        Ok(content) => {
            println!("{} hint (-{}): {}", kind, kind.cost(), content.cyan());
            Ok(())
        }
        Err(RoundError::CollaboratorUnavailable(err)) => {
            println!(
                "{} hint: {} ({}; not charged)",
                kind,
                kind.fallback_text(),
                err
            );
            Ok(())
        }
        Err(err) => report_error(err),
    }
}

/// Print a rejection the player can act on; anything else ends the game.
fn report_error(err: RoundError) -> Result<()> {
    match err {
        err if err.is_recoverable() => {
            println!("{}", err.to_string().yellow());
            Ok(())
        }
        RoundError::CollaboratorUnavailable(err) => {
            println!("{}", format!("{err}; try again").red());
            Ok(())
        }
        err => bail!(err),
    }
}

fn print_guess(report: &GuessReport, args: &Args) {
    let mut line = format!("{}. {}", report.guess_number, report.guess);
    if args.show_similarity {
        line.push_str(&format!(" [{}]", report.similarity));
    }
    if args.show_code {
        line.push_str(&format!(" {}", report.feedback));
    }
    println!("{line}");
}

fn print_summary(summary: &RoundSummary) {
    let outcome = &summary.outcome;
    println!();
    if outcome.solved {
        println!(
            "{} in {} guesses, {}s",
            "Solved".green().bold(),
            outcome.guess_count,
            outcome.elapsed_seconds
        );
    } else {
        println!("{} after {} guesses", "Out of guesses".red().bold(), outcome.guess_count);
    }

    if let Some(score) = outcome.score {
        println!(
            "Score: {} (word {} + time {} - hints {})",
            score.total, score.word_score, score.time_bonus, score.hint_penalty
        );
    }

    match &summary.solution {
        Ok(word) => println!("Solution: {}", word.as_str().bold()),
        Err(err) => println!("Solution unavailable: {err}"),
    }

    match &summary.accuracy {
        Ok(acc) => println!(
            "Accuracy: completion {:.1}%, round {:.1}%, game {:.1}%",
            acc.completion, acc.round_accuracy, acc.game_accuracy
        ),
        Err(err) => println!("Accuracy unavailable: {err}"),
    }

    if let Some(Err(err)) = &summary.leaderboard_update {
        println!("{}", format!("Score not recorded: {err}").red());
    }

    print_leaderboard(&summary.leaderboard);
}

fn print_leaderboard<E: Display>(listing: &Result<Vec<LeaderboardEntry>, E>) {
    match listing {
        Ok(entries) if entries.is_empty() => println!("Leaderboard is empty"),
        Ok(entries) => {
            println!("Leaderboard:");
            for entry in entries {
                println!("  {entry}");
            }
        }
        Err(err) => println!("Leaderboard unavailable: {err}"),
    }
}

fn print_help() {
    println!("Guess the word: {MIN_LETTERS}-{MAX_LETTERS} letters, {MAX_GUESSES} guesses per round.");
    println!("Scoring: {POINTS_PER_LETTER} points per letter plus a time bonus:");
    for (under, bonus) in TIME_BONUS_TIERS {
        println!("  under {under}s: +{bonus}");
    }
    println!("Hints cost points:");
    for kind in HintKind::ALL {
        println!("  :{} or :{} (-{})", kind_index(kind), kind, kind.cost());
    }
    println!(":board shows the leaderboard, :help shows this, :q quits");
}

fn kind_index(kind: HintKind) -> usize {
    HintKind::ALL.iter().position(|k| *k == kind).map_or(0, |i| i + 1)
}
