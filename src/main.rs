/*!
 * Command-line interface for promptfs
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use promptfs::config::{exit_code_for, Args, Config, OutputTarget};
use promptfs::report::{Reporter, ScanReport};
use promptfs::scanner::Scanner;
use promptfs::writer::PromptWriter;

fn main() -> ExitCode {
    // Parse command line arguments; usage errors exit 1, help and version 0
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(exit_code_for(&err));
        }
    };

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "promptfs", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    setup_logging(args.quiet, args.verbose);

    // Create configuration
    let config = Config::from_args(args);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run(config: Config) -> promptfs::Result<()> {
    // Validate configuration
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        log::warn!("Failed to set thread pool size: {}", e);
    }

    let to_stdout = config.output == OutputTarget::Stdout;
    let progress = if config.quiet || to_stdout {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    log::info!("Scanning directory: {}", config.target_dir.display());

    // Start timing both scan and write operations
    let start_time = Instant::now();

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let result = scanner.scan()?;

    progress.finish_and_clear();

    let writer = PromptWriter::new(config.clone());
    let summary = writer.write(&result)?;

    if let OutputTarget::File(path) = &config.output {
        if !config.quiet {
            let report = ScanReport {
                output_file: path.display().to_string(),
                duration: start_time.elapsed(),
                directories_listed: summary.directories,
                total_bytes: summary.total_bytes,
                file_details: summary.files,
            };
            Reporter::print_report(&report);
        }
    }

    Ok(())
}
