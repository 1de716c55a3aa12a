use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use pizza_rhythm_core::{
    highlight_length, playback_cues, Feedback, GameConfig, GameSession, NoteFragment,
    PlaybackClock, PlaybackSchedule, RhythmError, Scheduler, Selection, CATALOG,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const PLAYBACK_TICK: Duration = Duration::from_millis(10);

fn main() -> pizza_rhythm_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli.game)?;

    match cli.command {
        Commands::Play { instant } => run_play(config, instant),
        Commands::Simulate { picks } => run_simulate(config, &picks),
        Commands::Render { picks, output } => run_render(config, &picks, &output),
        Commands::Catalog => run_catalog(),
    }
}

fn load_config(opts: &GameOpts) -> pizza_rhythm_core::Result<GameConfig> {
    let mut config = match &opts.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if opts.seed.is_some() {
        config.seed = opts.seed;
    }
    Ok(config)
}

fn run_play(config: GameConfig, instant: bool) -> pizza_rhythm_core::Result<()> {
    tracing::info!(instant, "starting interactive game");

    let mut game = GameSession::new(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", game.mission());
    print_deck(&game);

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "deck" | "d" => print_deck(&game),
            "reset" | "r" => {
                println!("{}", game.reset());
                println!("{}", game.mission());
                print_deck(&game);
            }
            "play" | "p" => match game.play() {
                Ok(schedule) => perform(&game, schedule, instant),
                Err(RhythmError::NotComplete { capacity, .. }) => {
                    println!("{}", Feedback::not_complete(capacity))
                }
                Err(err) => println!("{err}"),
            },
            input => {
                let selection = match input.parse::<usize>() {
                    Ok(number) if number >= 1 => game.select_card(number - 1),
                    Ok(_) => {
                        println!("cards are numbered from 1");
                        continue;
                    }
                    Err(_) => input.parse::<NoteFragment>().map(|fragment| game.select(fragment)),
                };
                match selection {
                    Ok(selection) => report_selection(&game, &selection),
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    Ok(())
}

fn report_selection(game: &GameSession, selection: &Selection) {
    match selection {
        Selection::Placed(placement) => {
            println!(
                "placed {} on beats {}..{} ({:.1}°..{:.1}°), {} of {} beats",
                placement.placed.fragment.display_name(),
                placement.placed.start,
                placement.placed.end,
                placement.span.start_deg,
                placement.span.end_deg,
                game.measure().accumulated(),
                game.measure().capacity(),
            );
            for cue in &placement.cues {
                tracing::debug!(
                    delay_ms = cue.delay.as_millis() as u64,
                    frequency = cue.frequency,
                    "tone cue"
                );
            }
            if let Some(feedback) = &placement.feedback {
                println!("{feedback}");
                println!("{}", game.mission());
            }
        }
        Selection::Rejected { feedback, .. } => println!("{feedback}"),
    }
}

fn print_deck(game: &GameSession) {
    for (index, card) in game.deck().cards().iter().enumerate() {
        let marker = if game.measure().fits(card) { ' ' } else { 'x' };
        println!(
            "{marker}{:>3}. {:<4} {:<22} {} beats",
            index + 1,
            card.symbol(),
            card.display_name(),
            card.duration(),
        );
    }
}

/// Walks the schedule against a wall clock, printing each slice as it sounds.
fn perform(game: &GameSession, schedule: PlaybackSchedule, instant: bool) {
    let playback = &game.config().playback;
    let end = schedule.total_duration() + playback.tail();
    let mut scheduler = Scheduler::new(schedule);
    let mut clock = PlaybackClock::default();

    loop {
        for entry in scheduler.tick(&clock) {
            let tones: Vec<String> = playback_cues(entry, playback)
                .iter()
                .map(|cue| format!("{} Hz", cue.frequency))
                .collect();
            println!(
                "  [{:>5} ms] slice {} {} {}",
                entry.offset.as_millis(),
                entry.index + 1,
                entry.placed.fragment.symbol(),
                if entry.silent {
                    "(rest)".to_string()
                } else {
                    tones.join(" + ")
                },
            );
            tracing::trace!(
                highlight_ms = highlight_length(entry, playback).as_millis() as u64,
                "slice highlighted"
            );
        }

        if clock.elapsed >= end {
            break;
        }
        let step = if instant {
            end - clock.elapsed
        } else {
            PLAYBACK_TICK.min(end - clock.elapsed)
        };
        if !instant {
            thread::sleep(step);
        }
        clock.advance(step);
    }
    tracing::info!("playback finished");
}

fn run_simulate(config: GameConfig, picks: &[NoteFragment]) -> pizza_rhythm_core::Result<()> {
    tracing::info!(picks = picks.len(), "simulating game");

    let mut game = GameSession::new(config)?;
    let moves: Vec<_> = picks
        .iter()
        .map(|fragment| match game.select(*fragment) {
            Selection::Placed(placement) => json!({
                "fragment": fragment,
                "outcome": "placed",
                "start_beat": placement.placed.start,
                "end_beat": placement.placed.end,
                "start_deg": placement.span.start_deg,
                "end_deg": placement.span.end_deg,
                "completed": placement.completed,
                "feedback": placement.feedback,
            }),
            Selection::Rejected {
                reason, feedback, ..
            } => json!({
                "fragment": fragment,
                "outcome": "rejected",
                "reason": reason,
                "feedback": feedback,
            }),
        })
        .collect();

    let schedule = game.play().ok().map(|schedule| {
        schedule
            .iter()
            .map(|entry| {
                json!({
                    "fragment": entry.placed.fragment,
                    "offset_ms": entry.offset.as_millis() as u64,
                    "length_ms": entry.length.as_millis() as u64,
                    "silent": entry.silent,
                    "tones": entry.tones(),
                })
            })
            .collect::<Vec<_>>()
    });

    let report = json!({
        "capacity_beats": game.measure().capacity(),
        "accumulated_beats": game.measure().accumulated(),
        "complete": game.measure().is_complete(),
        "moves": moves,
        "schedule": schedule,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_render(
    config: GameConfig,
    picks: &[NoteFragment],
    output: &PathBuf,
) -> pizza_rhythm_core::Result<()> {
    tracing::info!(?output, picks = picks.len(), "rendering pizza");

    let mut game = GameSession::new(config)?;
    for fragment in picks {
        if let Selection::Rejected { feedback, .. } = game.select(*fragment) {
            tracing::debug!(fragment = %fragment, %feedback, "skipping pick");
        }
    }

    let svg = game.renderer().draw(game.measure().placed(), None);
    std::fs::write(output, svg)?;
    Ok(())
}

fn run_catalog() -> pizza_rhythm_core::Result<()> {
    for fragment in CATALOG {
        println!(
            "{:<20} {:<4} {:>5} beats{}",
            fragment.id(),
            fragment.symbol(),
            fragment.duration(),
            if fragment.is_rest() { "  rest" } else { "" },
        );
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Build a 4/4 rhythm pizza from notes and rests", long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameOpts,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct GameOpts {
    /// JSON configuration file; missing fields use defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Seed for the deck shuffle, overriding the configuration.
    #[arg(short, long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively: pick cards by number or id, then `play`.
    Play {
        /// Print the playback without waiting between slices.
        #[arg(long)]
        instant: bool,
    },
    /// Apply a fixed sequence of picks and print a JSON report.
    Simulate {
        /// Comma separated fragment ids, e.g. `quarter,half,quarter-rest`.
        #[arg(value_delimiter = ',', required = true)]
        picks: Vec<NoteFragment>,
    },
    /// Apply a sequence of picks and write the pizza as SVG.
    Render {
        #[arg(value_delimiter = ',', required = true)]
        picks: Vec<NoteFragment>,
        /// Destination of the SVG document.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List every note and rest in the catalog.
    Catalog,
}
