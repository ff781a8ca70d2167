use palc::Parser;
use zmonkey::cli::*;

/// Logs go to stderr, and only when `RUST_LOG` asks for them.
fn init_tracing() {
	use tracing_subscriber::{EnvFilter, fmt, prelude::*};

	if std::env::var("RUST_LOG").is_ok() {
		tracing_subscriber::registry()
			.with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
			.with(EnvFilter::from_default_env())
			.init();
	}
}

fn main() {
	init_tracing();
	zmonkey::init_builtins();
	let monkey = zmonkey::Monkey;

	match Cli::parse().mode {
		Mode::File { path } => match monkey.run_file(&path) {
			Ok(_) => {}
			Err(zmonkey::MonkeyError::RuntimeError(e)) => {
				eprintln!("Error: {e}");
				std::process::exit(1);
			}
			Err(e) => {
				eprintln!("Failed run file: {e}");
				std::process::exit(1);
			}
		},
		Mode::Repl => monkey.run_prompt(),
	}
}
