use std::path::PathBuf;
use tic_tac_toe::Mode;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "play tic-tac-toe against the computer")]
pub struct CliOptions {
    #[argh(option, description = "the path to the config")]
    pub config: Option<PathBuf>,

    #[argh(
        option,
        description = "how the computer plays, 'optimal' or 'random'. Overrides the config"
    )]
    pub mode: Option<Mode>,

    #[argh(switch, description = "let the computer play both sides")]
    pub self_play: bool,
}
