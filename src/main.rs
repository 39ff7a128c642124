#![deny(
    unused_import_braces,
    unused_lifetimes,
    unreachable_pub,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_copy_implementations,
    deprecated_in_future,
    meta_variable_misuse,
    non_ascii_idents,
    rust_2018_compatibility,
    rust_2018_idioms,
    future_incompatible,
    nonstandard_style,
    clippy::all
)]
#![warn(variant_size_differences, let_underscore_drop)]

//! # Tic-Tac-Toe Robot
//!
//! A terminal driver for the game.

pub mod cli_options;
pub mod logger;

use crate::cli_options::CliOptions;
use anyhow::Context as _;
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use std::io::BufRead;
use tic_tac_toe_robot::{
    tic_tac_toe,
    Config,
    GameHandle,
    GameRegistry,
    RegistryError,
    TurnState,
    HUMAN_TEAM,
    ROBOT_TEAM,
};
use tracing::{
    info,
    warn,
};

/// Load the config, applying CLI overrides.
fn load_config(cli_options: &CliOptions) -> anyhow::Result<Config> {
    let mut config = match cli_options.config.as_deref() {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };

    if let Some(mode) = cli_options.mode {
        config.mode = mode;
    }

    for warning in config.validate() {
        warn!("{warning}");
    }

    Ok(config)
}

/// Print the board and what happens next.
fn print_game(registry: &GameRegistry, handle: GameHandle) -> anyhow::Result<()> {
    let board = registry.board(handle)?;
    println!("{board}");

    match registry.turn_state(handle)? {
        TurnState::HumanTurn => {
            println!("Your turn ({HUMAN_TEAM}). Enter a tile 0-8, 'reset', 'mode' or 'quit'.");
        }
        TurnState::RobotTurn => println!("Robot ({ROBOT_TEAM}) thinking..."),
        TurnState::Finished(outcome) => {
            println!("Game over: {outcome}");
            if let Some(line) = registry.winning_line(handle)? {
                println!("Winning line: {:?}", line.tile_indexes);
            }
            println!("Enter 'reset' to play again or 'quit'.");
        }
    }

    Ok(())
}

/// Play against the computer using stdin.
fn run_interactive(registry: &GameRegistry, handle: GameHandle) -> anyhow::Result<()> {
    print_game(registry, handle)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;

        match line.trim() {
            "" => continue,
            "quit" | "q" => break,
            "reset" => registry.reset(handle)?,
            "mode" => {
                let mode = registry.toggle_mode(handle)?;
                println!("Switched to {mode} mode. New game.");
            }
            input => {
                let index = match input.parse::<u8>() {
                    Ok(index) => index,
                    Err(_e) => {
                        println!("Unknown command '{input}'");
                        continue;
                    }
                };

                match registry.apply_human_move(handle, index) {
                    Ok(status) if !status.is_finished() => {
                        let robot_move = registry.apply_robot_move(handle)?;
                        println!("Robot plays {}", robot_move.index);
                    }
                    Ok(_status) => {}
                    Err(RegistryError::Game(e)) => {
                        println!("{e}");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        print_game(registry, handle)?;
    }

    Ok(())
}

/// Let the computer play both sides.
///
/// The human side uses the same mode as the computer.
fn run_self_play(
    registry: &GameRegistry,
    handle: GameHandle,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mode = registry.mode(handle)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match registry.turn_state(handle)? {
            TurnState::HumanTurn => {
                let board = registry.board(handle)?;
                let index = tic_tac_toe::select_move(board, HUMAN_TEAM, mode, &mut rng)
                    .context("no move left for the human side")?;
                registry.apply_human_move(handle, index)?;
                println!("{HUMAN_TEAM} plays {index}");
            }
            TurnState::RobotTurn => {
                let robot_move = registry.apply_robot_move(handle)?;
                println!("{ROBOT_TEAM} plays {}", robot_move.index);
            }
            TurnState::Finished(_outcome) => {
                print_game(registry, handle)?;
                return Ok(());
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // This needs to run first, it exits early on invalid options.
    let cli_options: CliOptions = argh::from_env();

    logger::setup().context("failed to initialize logger")?;

    let config = load_config(&cli_options).context("failed to load config")?;
    info!(mode = %config.mode, "loaded config");

    let registry = GameRegistry::from_config(&config);
    let handle = registry.new_game();

    if cli_options.self_play {
        run_self_play(&registry, handle, config.seed)?;
    } else {
        run_interactive(&registry, handle)?;
    }

    registry.remove_game(handle);
    info!("successful shutdown");

    Ok(())
}
