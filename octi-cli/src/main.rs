mod cli;
mod commands;
mod dispatch;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use output::OutputConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let out = OutputConfig {
        output: cli.output,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Inspect { input } => commands::inspect::inspect(&input, &out),
        Commands::Draw(args) => commands::draw::draw(&args, &out),
        Commands::Completions { shell } => {
            let shell = shell
                .or_else(clap_complete::Shell::from_env)
                .unwrap_or(clap_complete::Shell::Bash);
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "octi", &mut std::io::stdout());
            Ok(())
        }
    }
}
