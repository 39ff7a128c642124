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
//! A human (X) against the computer (O).
//! The computer either searches the whole game tree or picks random tiles.

pub mod config;
pub mod game;
pub mod registry;

pub use crate::{
    config::{
        Config,
        ValidationWarning,
    },
    game::{
        Game,
        GameError,
        Outcome,
        RobotMove,
        TurnState,
        HUMAN_TEAM,
        ROBOT_TEAM,
    },
    registry::{
        GameHandle,
        GameRegistry,
        RegistryError,
        ShareGame,
    },
};
pub use tic_tac_toe;
