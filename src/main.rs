#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "plistdoc", about = "Property-list document tree tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Materialize a serialized document tree and print it.
	Show(cmd::show::Args),
	/// Decode one root dictionary entry into a typed destination.
	Get(cmd::get::Args),
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Show(args) => cmd::show::run(args),
		Commands::Get(args) => cmd::get::run(args),
	}
}
