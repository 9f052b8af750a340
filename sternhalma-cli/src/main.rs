//! Sternhalma CLI
//!
//! Commands:
//! - play: play one game of agent self-play
//! - bench: play a batch of games and report win statistics

use clap::{Parser, Subcommand};

mod bench_cmd;
mod play_cmd;

#[derive(Parser)]
#[command(name = "sternhalma")]
#[command(about = "Star-board strategy engine and agents")]
struct Cli {
    /// RNG seed for reproducible agent play
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play_cmd::PlayArgs),
    /// Play a batch of games and aggregate the results
    Bench(bench_cmd::BenchArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Bench(args) => bench_cmd::run(args, cli.seed),
    }
}
