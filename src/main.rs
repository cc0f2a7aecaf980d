use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rkdump::{list_dir, read_names, run_batch, run_single, Config, DumpError, Target};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_DESCRIBE"),
    ", built ",
    env!("VERGEN_BUILD_DATE"),
    ")"
);

/// Converts 8-bit memory images into script source for an emulator to preload.
///
/// With FILE, prints that image's declaration. Without it, reads image names
/// from stdin (one per line, up to a blank line) and prints a
/// `preloaded_files()` function returning all of them.
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about)]
struct Args {
    /// Image to convert
    file: Option<String>,

    /// Convert every file in DIR instead of names read from stdin
    #[arg(long, value_name = "DIR", conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Dialect of the generated source
    #[arg(long, value_enum, default_value_t = Target::Script)]
    target: Target,

    /// Variable the images are stored in
    #[arg(long, default_value = "files")]
    map_name: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip images that fail to convert instead of aborting
    #[arg(long)]
    keep_going: bool,

    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("rkdump: some images were skipped");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("rkdump: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns `Ok(false)` when `--keep-going` had to skip something.
fn run(args: &Args) -> Result<bool, DumpError> {
    let config = Config {
        target: args.target,
        map_name: args.map_name.clone(),
        keep_going: args.keep_going,
        base_dir: args.dir.clone(),
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| DumpError::Open {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let complete = if let Some(name) = &args.file {
        run_single(name, &config, &mut *out)?;
        true
    } else if let Some(dir) = &args.dir {
        let names = list_dir(dir)?;
        run_batch(names.into_iter().map(Ok), &config, &mut *out)?
            .skipped
            .is_empty()
    } else {
        run_batch(read_names(io::stdin().lock()), &config, &mut *out)?
            .skipped
            .is_empty()
    };

    out.flush()?;
    Ok(complete)
}
