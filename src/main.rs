//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::process::ExitCode;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use prefixzip::tools::cli::{opts_init, Mode, Opts};
use prefixzip::{compress_file, decompress_file, PackError, Stats};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    // Available log levels are Error, Warn, Info, Debug, Trace. The cli narrows this down.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Logging unavailable: {}", e);
    }

    let opts = opts_init();

    match run(&opts) {
        Ok(stats) => {
            println!("Input size:  {} bytes", stats.input_size);
            println!("Output size: {} bytes", stats.output_size);
            println!("Ratio:       {:.2}%", stats.ratio());
            info!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // Failures are reported even with --quiet
            if log::max_level() == LevelFilter::Off {
                eprintln!("prefixzip: {}", e);
            }
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Figure out what we need to do and go do it.
fn run(opts: &Opts) -> Result<Stats, PackError> {
    if !opts.force_overwrite && opts.output.exists() {
        return Err(PackError::OutputExists {
            path: opts.output.clone(),
        });
    }
    match opts.op_mode {
        Mode::Zip => compress_file(&opts.input, &opts.output, opts.compress_algorithm()),
        Mode::Unzip => decompress_file(&opts.input, &opts.output, opts.algorithm),
    }
}
