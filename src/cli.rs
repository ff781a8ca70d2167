use std::path::PathBuf;

use palc::{Parser, Subcommand};

/// Command line of the `zmonkey` binary.
#[derive(Parser)]
#[command(name = "zmonkey", after_long_help = "A tree-walk interpreter for the Monkey language.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

/// What to feed the interpreter.
#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a Monkey source file
	File { path: PathBuf },
	/// Start the interactive prompt
	Repl,
}
