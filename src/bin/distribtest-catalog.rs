//! Distribtest catalog inspection binary
//!
//! Prints the full release test matrix, either as names with labels or as
//! the generated jobspecs in JSON. Selecting, filtering and executing
//! targets is the job of the external driver; this tool only surfaces
//! what the catalog would hand it.

use anyhow::Context;
use clap::Parser;
use distribtest::exit_codes::{EXIT_CONFIG_ERROR, EXIT_ERROR, EXIT_PANIC, EXIT_SUCCESS};
use distribtest::{logger, targets};
use log::info;
use std::{panic, process};

const VERSION: &str = distribtest::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Dump the release distribtest matrix")]
struct Args {
    /// Print generated jobspecs as JSON lines instead of names and labels
    #[arg(long)]
    jobspecs: bool,

    /// Inner build parallelism, forwarded to the targets that honor it
    #[arg(long)]
    inner_jobs: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in catalog dump");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    let args = Args::parse();

    match args.log_level {
        Some(ref level) => logger::init_with_level(level),
        None => logger::init(),
    }

    match dump(&args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("catalog error: {e:#}");
            if e.downcast_ref::<distribtest::Error>().is_some() {
                EXIT_CONFIG_ERROR
            } else {
                EXIT_ERROR
            }
        }
    }
}

fn dump(args: &Args) -> anyhow::Result<()> {
    let catalog = targets();
    info!("catalog holds {} targets", catalog.len());

    for target in &catalog {
        if args.jobspecs {
            let jobspec = target.build_jobspec(args.inner_jobs)?;
            let line = serde_json::to_string(&jobspec)
                .with_context(|| format!("serializing jobspec for {target}"))?;
            println!("{line}");
        } else {
            println!("{} [{}]", target, target.labels().join(" "));
        }
    }

    Ok(())
}
