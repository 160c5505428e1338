use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "octi",
    about = "Redraw transit network maps onto an octilinear grid",
    version,
    after_help = "\
Typical workflow:
  octi inspect network.json
  octi draw network.json --grid-size 40 -o drawn.json

Piping (use - to read from stdin):
  cat network.json | octi draw - --grid-size 40 -o drawn.json

Use `octi <command> --help` for detailed usage of each command.

Enable tab completion:
  eval \"$(octi completions)\"     # add to ~/.bashrc or ~/.zshrc"
)]
pub struct Cli {
    /// Output file path (implies JSON output)
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Suppress informational messages on stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which embedding back-end to run.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum BackendArg {
    Heuristic,
    Ilp,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a transit graph's stops, lines, and bounding box
    #[command(after_help = "\
Examples:
  octi inspect network.json
  octi inspect - < network.json")]
    Inspect {
        /// Path to a transit graph JSON file, or - for stdin
        input: PathBuf,
    },

    /// Redraw a transit graph onto an octilinear grid
    #[command(after_help = "\
Examples:
  octi draw network.json --grid-size 40
  octi draw network.json --grid-size 40 --backend ilp -o drawn.json
  cat network.json | octi draw - --grid-size 40 -o drawn.json")]
    Draw(DrawArgs),

    /// Print shell completion scripts
    Completions {
        /// Shell to generate completions for (defaults to the current shell)
        shell: Option<clap_complete::Shell>,
    },
}

#[derive(clap::Args)]
pub struct DrawArgs {
    /// Path to a transit graph JSON file, or - for stdin
    pub input: PathBuf,

    /// World units per grid cell
    #[arg(long)]
    pub grid_size: f64,

    /// Extra cells of padding around the input bounding box
    #[arg(long, default_value = "2.0")]
    pub border_rad: f64,

    /// RNG seed; identical seed + input produce byte-identical drawings
    #[arg(long, default_value = "0")]
    pub seed: u64,

    /// Number of additional randomized-ordering attempts after the first
    #[arg(long, default_value = "10")]
    pub retries: usize,

    /// Maximum node-relocation sweeps
    #[arg(long, default_value = "100")]
    pub iters: usize,

    /// Which embedding back-end to run
    #[arg(long, value_enum, default_value = "heuristic")]
    pub backend: BackendArg,
}
