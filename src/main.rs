use clap::Parser;
use keyed_containers::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use keyed_containers::logger::initialize_logger;
use keyed_containers::{Error, Interpreter};
use std::path::PathBuf;

/// Run a command file against the containers and write the transcript.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Command file to execute.
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Transcript of echoed commands and their responses.
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

fn main() -> Result<(), Error> {
    initialize_logger();
    let args = Args::parse();
    Interpreter::new().run_files(&args.input, &args.output)
}
