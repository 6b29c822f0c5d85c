use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info};

use crate::prefix_coding::Algorithm;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Compress or Decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "prefixzip",
    version,
    about = "Compress files with Huffman or Shannon-Fano prefix codes",
    long_about = "
    Compresses a single file into a self describing container holding the code dictionary
    and the packed data. Containers start with HUFF (Huffman) or SFAN (Shannon-Fano), so
    decompression finds the algorithm on its own; naming one with -a makes it a check."
)]
pub struct Args {
    /// File to process
    #[clap(value_parser)]
    input: PathBuf,

    /// Where to write the result. Defaults to INPUT.huf / INPUT.sfn when compressing, and to
    /// INPUT without that extension when decompressing
    #[clap(value_parser)]
    output: Option<PathBuf>,

    /// Perform compression on the input file (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input file
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Coding algorithm. Compression defaults to huffman
    #[clap(short = 'a', long = "algorithm", value_enum)]
    algorithm: Option<Algorithm>,

    /// Overwrite the output file if it exists
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Be verbose (repeat for more, -vvv is trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output (overrides -v)
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Everything the binary needs to run one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Algorithm used to compress, or the one the container must carry when decompressing
    pub algorithm: Option<Algorithm>,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Opts {
    /// Algorithm for compression, falling back to Huffman.
    pub fn compress_algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or(Algorithm::Huffman)
    }
}

impl From<Args> for Opts {
    fn from(args: Args) -> Self {
        let op_mode = if args.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        let verbose = if args.quiet {
            Verbosity::Quiet
        } else {
            match args.verbose {
                0 => Verbosity::Warnings,
                1 => Verbosity::Info,
                2 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        let output = match args.output {
            Some(path) => path,
            None => default_output(&args.input, op_mode, args.algorithm),
        };
        Self {
            op_mode,
            algorithm: args.algorithm,
            input: args.input,
            output,
            force_overwrite: args.force,
            verbose,
        }
    }
}

/// Output name used when none is given on the command line.
fn default_output(input: &Path, op_mode: Mode, algorithm: Option<Algorithm>) -> PathBuf {
    match op_mode {
        Mode::Zip => {
            let ext = algorithm.unwrap_or(Algorithm::Huffman).extension();
            let mut name = input.as_os_str().to_owned();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        Mode::Unzip => {
            let ours = [Algorithm::Huffman, Algorithm::ShannonFano]
                .iter()
                .any(|a| input.extension().map_or(false, |ext| ext == a.extension()));
            if ours {
                input.with_extension("")
            } else {
                let mut name = input.as_os_str().to_owned();
                name.push(".out");
                PathBuf::from(name)
            }
        }
    }
}

/// Parse the command line, set the log level, and report what we are about to do.
pub fn opts_init() -> Opts {
    let opts = Opts::from(Args::parse());
    log::set_max_level(opts.verbose.level_filter());

    info!("Operational mode set to {}", opts.op_mode);
    info!(
        "Reading {}, writing {}",
        opts.input.display(),
        opts.output.display()
    );
    if let Some(algorithm) = opts.algorithm {
        info!("Algorithm set to {}", algorithm);
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    debug!("Verbosity set to {}", log::max_level());
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        Opts::from(Args::try_parse_from(args).unwrap())
    }

    #[test]
    fn defaults_test() {
        let opts = parse(&["prefixzip", "notes.txt"]);
        assert_eq!(opts.op_mode, Mode::Zip);
        assert_eq!(opts.compress_algorithm(), Algorithm::Huffman);
        assert_eq!(opts.output, PathBuf::from("notes.txt.huf"));
        assert_eq!(opts.verbose, Verbosity::Warnings);
        assert!(!opts.force_overwrite);
    }

    #[test]
    fn shannon_fano_test() {
        let opts = parse(&["prefixzip", "-z", "-a", "shannon-fano", "notes.txt"]);
        assert_eq!(opts.algorithm, Some(Algorithm::ShannonFano));
        assert_eq!(opts.output, PathBuf::from("notes.txt.sfn"));
    }

    #[test]
    fn decompress_test() {
        let opts = parse(&["prefixzip", "-d", "notes.txt.sfn"]);
        assert_eq!(opts.op_mode, Mode::Unzip);
        assert_eq!(opts.algorithm, None);
        assert_eq!(opts.output, PathBuf::from("notes.txt"));

        let opts = parse(&["prefixzip", "-d", "-f", "blob.bin", "restored.bin"]);
        assert_eq!(opts.output, PathBuf::from("restored.bin"));
        assert!(opts.force_overwrite);

        let opts = parse(&["prefixzip", "--decompress", "blob.bin"]);
        assert_eq!(opts.output, PathBuf::from("blob.bin.out"));
    }

    #[test]
    fn verbosity_test() {
        assert_eq!(parse(&["prefixzip", "-q", "x"]).verbose, Verbosity::Quiet);
        assert_eq!(parse(&["prefixzip", "-v", "x"]).verbose, Verbosity::Info);
        assert_eq!(parse(&["prefixzip", "-vvvvv", "x"]).verbose, Verbosity::Trace);
        assert_eq!(Verbosity::Debug.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn bad_args_test() {
        assert!(Args::try_parse_from(["prefixzip"]).is_err());
        assert!(Args::try_parse_from(["prefixzip", "-z", "-d", "x"]).is_err());
        assert!(Args::try_parse_from(["prefixzip", "-a", "lzw", "x"]).is_err());
    }
}
