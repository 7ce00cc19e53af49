use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io};

use blackjack::{
    AutoPlayer, Chips, GameError, GameRules, PayoutRatio, RoundOutcome, Session, SessionSummary,
};

mod card_art;
mod line;
mod terminal;
mod tui_logger;

use line::LineTable;
use terminal::TerminalTable;
use tui_logger::TuiLogger;

#[derive(Parser)]
#[command(name = "blackjack-tui", about = "Blackjack against the house")]
struct Cli {
    /// Player bankroll at the start of every session
    #[arg(long, env = "BLACKJACK_PLAYER_BANKROLL", default_value_t = 100)]
    player_bankroll: Chips,

    /// House bankroll at the start of every session
    #[arg(long, env = "BLACKJACK_HOUSE_BANKROLL", default_value_t = 1000)]
    house_bankroll: Chips,

    /// Blackjack payout ratio (e.g. "3:2")
    #[arg(long, env = "BLACKJACK_PAYOUT", default_value = "3:2")]
    blackjack_payout: PayoutRatio,

    /// Seed for reproducible shuffles
    #[arg(long, env = "BLACKJACK_SEED")]
    seed: Option<u64>,

    #[arg(long, env = "BLACKJACK_LOG", default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Full-screen table (default)
    Play,
    /// Prompted play over stdin/stdout
    Line,
    /// Play basic strategy with a flat bet and report the results
    Simulate {
        #[arg(long, default_value_t = 1000)]
        rounds: u32,

        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(1..))]
        bet: Chips,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn rules(&self) -> Result<GameRules, blackjack::RulesError> {
        GameRules::new(self.player_bankroll, self.house_bankroll, self.blackjack_payout)
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

fn init_env_logger(level: LevelFilter) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let rules = cli.rules()?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => play(rules, cli.rng(), cli.log_level),
        Command::Line => {
            init_env_logger(cli.log_level);
            line(rules, cli.rng())
        }
        Command::Simulate { rounds, bet, json } => {
            init_env_logger(cli.log_level);
            simulate(rules, cli.rng(), rounds, bet, json)
        }
    }
}

fn play(rules: GameRules, rng: ChaCha8Rng, level: LevelFilter) -> Result<(), Box<dyn Error>> {
    let log_buffer = TuiLogger::install(level)?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut table = TerminalTable::new(terminal, log_buffer, "Blackjack".to_string());

    let mut session = Session::new(rules, rng);
    let res = session
        .run(&mut table)
        .and_then(|summary| table.pause(&summary_line(&summary)).map(|()| summary));

    // restore terminal
    disable_raw_mode()?;
    execute!(table.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    table.terminal_mut().show_cursor()?;

    match res {
        Ok(summary) => println!("{}", summary_line(&summary)),
        Err(GameError::Aborted) => println!("{}", summary_line(&session.summary())),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn line(rules: GameRules, rng: ChaCha8Rng) -> Result<(), Box<dyn Error>> {
    let mut table = LineTable::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(rules, rng);
    match session.run(&mut table) {
        Ok(_) => Ok(()),
        Err(GameError::Aborted) => {
            println!();
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn simulate(
    rules: GameRules,
    rng: ChaCha8Rng,
    rounds: u32,
    bet: Chips,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut player = AutoPlayer::new(bet, rounds);
    let mut session = Session::new(rules, rng);
    let summary = session.run(&mut player)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", summary_line(&summary));
    for outcome in RoundOutcome::ALL {
        let count = summary.outcomes.get(outcome);
        let share = if summary.rounds > 0 {
            100.0 * f64::from(count) / f64::from(summary.rounds)
        } else {
            0.0
        };
        println!("  {:<16} {:>7} ({share:5.1}%)", format!("{outcome:?}"), count);
    }
    let per_round = if summary.rounds > 0 {
        summary.player_net as f64 / f64::from(summary.rounds)
    } else {
        0.0
    };
    println!("  Player net {:+} ({per_round:+.3} per round)", summary.player_net);
    Ok(())
}

fn summary_line(summary: &SessionSummary) -> String {
    format!(
        "{} rounds over {} session(s). Player's money: ${}, Dealer's money: ${}",
        summary.rounds, summary.sessions, summary.bankrolls.player, summary.bankrolls.house
    )
}
