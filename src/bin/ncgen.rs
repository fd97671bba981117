//! ncgen command-line binary

use clap::{Parser, Subcommand};
use ncgen::{GenerateOptions, GeneratorConfig, exit_codes::*, generate_lists, generate_thumbnails};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = ncgen::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Generate Nintendo Channel download lists, info files and thumbnails")]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, json:<level>)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile every locale's download list and the info files it references
    Lists {
        /// Regenerate info files that already exist
        #[arg(long)]
        force: bool,
    },
    /// Compile the preview thumbnail pack
    Thumbnails,
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
            eprintln!("Fatal: Unhandled panic in ncgen");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("ncgen {}", ncgen::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return EXIT_INVALID_ARGS;
        }
        Err(e) => {
            let _ = e.print();
            return EXIT_SUCCESS;
        }
    };

    if let Some(ref level) = args.log_level {
        ncgen::logger::JsonLogger::init_with_level(level, "CLI --log-level");
    } else {
        ncgen::logger::JsonLogger::init();
    }

    let config = match GeneratorConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return exit_code_for(&e);
        }
    };

    let outcome = match args.command {
        Command::Lists { force } => {
            generate_lists(&config, &GenerateOptions { force_infos: force }).map(|_| ())
        }
        Command::Thumbnails => generate_thumbnails(&config).map(|_| ()),
    };

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log::error!("❌ Generation failed: {e}");
            // JSON mode already carried the error on the log stream
            if !ncgen::logger::is_json_logging() {
                eprintln!("Generation error: {}", e);
            }
            exit_code_for(&e)
        }
    }
}
