use anyhow::Context;
use clap::Parser;
use pairmatch_core::{GameEngine, HintOutcome, RandomDeckGenerator, SelectOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;
use web_time::Instant;

mod command;
mod render;
mod settings;

use command::{Command, USAGE};
use render::Printer;
use settings::HostConfig;

type Engine = GameEngine<RandomDeckGenerator, Printer>;

/// How often the engine clock catches up with real time while waiting for input.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(version, about = "Memory matching game in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board size: easy or medium
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Symbol set to deal from
    #[arg(short, long)]
    theme: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with engine settings and extra themes
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every state change as a JSON line instead of drawing the board
    #[arg(long)]
    json: bool,
}

fn level_filter(filter: log::LevelFilter) -> LevelFilter {
    match filter {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

/// Applies one command, returns `false` once the player wants to leave.
fn run_command(engine: &mut Engine, command: Command) -> bool {
    match command {
        Command::Flip(id) => match engine.select_card(id) {
            Ok(SelectOutcome::NoChange) => println!("Card {id} cannot be flipped right now"),
            Ok(_) => {}
            Err(err) => println!("{err}"),
        },
        Command::Hint => {
            if engine.use_hint() == HintOutcome::NoChange {
                println!("No hint available");
            }
        }
        Command::Reset => {
            if let Err(err) = engine.reset() {
                println!("Could not reset: {err}");
            }
        }
        Command::New { difficulty, theme } => {
            if let Err(err) = engine.start(&difficulty, &theme) {
                println!("Could not start {difficulty}/{theme}: {err}");
            }
        }
        Command::Wait(millis) => {
            let fired = engine.advance(millis);
            log::debug!("waited {} ms, {} actions fired", millis, fired);
        }
        Command::Show => match engine.snapshot() {
            Some(snapshot) => println!("{}\n", render::render_board(&snapshot)),
            None => println!("No game in progress"),
        },
        Command::Themes => {
            let names: Vec<&str> = engine.catalog().names().collect();
            println!("{}", names.join(", "));
        }
        Command::Help => println!("{USAGE}"),
        Command::Quit => return false,
    }
    true
}

enum Input {
    Line(String),
    Idle,
    Closed,
}

/// Waits briefly for the next line, then catches the engine clock up with real time.
fn poll_input(
    engine: &mut Engine,
    lines: &Receiver<io::Result<String>>,
    last: &mut Instant,
) -> anyhow::Result<Input> {
    let received = lines.recv_timeout(POLL_INTERVAL);

    // whole milliseconds only, the remainder carries over to the next round
    let elapsed = last.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
    engine.advance(elapsed);
    *last += Duration::from_millis(elapsed);

    Ok(match received {
        Ok(line) => Input::Line(line.context("Could not read input")?),
        Err(RecvTimeoutError::Timeout) => Input::Idle,
        Err(RecvTimeoutError::Disconnected) => Input::Closed,
    })
}

fn prompt(engine: &Engine) -> io::Result<()> {
    if engine.observer().is_json() {
        return Ok(());
    }
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(level_filter(args.verbose.log_level_filter()))
        .with_writer(io::stderr)
        .init();

    let config = HostConfig::load(args.config.as_deref())?;
    let catalog = config.catalog()?;
    let difficulty = args.difficulty.unwrap_or(config.difficulty);
    let theme = args.theme.unwrap_or(config.theme);
    let seed = args.seed.or(config.seed).unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let mut engine = GameEngine::with_parts(
        config.engine,
        catalog,
        RandomDeckGenerator::new(seed),
        Printer::new(args.json),
    );
    engine
        .start(&difficulty, &theme)
        .with_context(|| format!("Could not start {difficulty}/{theme}"))?;

    log::info!("Game started");

    let (lines_tx, lines_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if lines_tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut last = Instant::now();
    prompt(&engine)?;
    loop {
        let line = match poll_input(&mut engine, &lines_rx, &mut last)? {
            Input::Line(line) => line,
            Input::Idle => continue,
            Input::Closed => break,
        };

        match line.parse::<Command>() {
            Ok(command) => {
                if !run_command(&mut engine, command) {
                    break;
                }
            }
            Err(command::CommandError::Empty) => {}
            Err(err) => println!("{err}\n{USAGE}"),
        }
        prompt(&engine)?;
    }

    log::info!("Bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmatch_core::{CardState, EngineSettings, ThemeCatalog};

    #[test]
    fn hint_hides_while_waiting_for_input() {
        let settings = EngineSettings {
            hint_reveal_ms: 150,
            ..Default::default()
        };
        let mut engine = GameEngine::with_parts(
            settings,
            ThemeCatalog::builtin(),
            RandomDeckGenerator::new(4),
            Printer::new(true),
        );
        engine.start("easy", "animals").unwrap();
        let HintOutcome::Revealed([a, b]) = engine.use_hint() else {
            panic!("fresh board has a hint");
        };

        let (lines_tx, lines_rx) = mpsc::channel();
        let mut last = Instant::now();
        for _ in 0..5 {
            assert!(matches!(
                poll_input(&mut engine, &lines_rx, &mut last).unwrap(),
                Input::Idle
            ));
        }

        let session = engine.session().unwrap();
        assert_eq!(session.card(a).unwrap().state(), CardState::Hidden);
        assert_eq!(session.card(b).unwrap().state(), CardState::Hidden);
        assert!(engine.now() >= 400);

        lines_tx.send(Ok("hint".to_string())).unwrap();
        assert!(matches!(
            poll_input(&mut engine, &lines_rx, &mut last).unwrap(),
            Input::Line(line) if line == "hint"
        ));
        drop(lines_tx);
        assert!(matches!(
            poll_input(&mut engine, &lines_rx, &mut last).unwrap(),
            Input::Closed
        ));
    }
}
