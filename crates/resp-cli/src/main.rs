use clap::Parser;
use resp_cli::Cli;
use resp_cli::cli::run;
use resp_cli::cli::setup;
use tracing::debug;

fn main() {
	let args = Cli::parse();
	let result = setup(&args).and_then(|()| {
		debug!(?args, "Starting");
		run(&args)
	});
	if let Err(e) = result {
		eprintln!("{}", e);
		std::process::exit(1);
	}
}
