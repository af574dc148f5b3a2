//! CLI argument parsing with clap

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Snapsort - file JPEG photos into month-named folders
///
/// Scans the top level of the input directory, reads the EXIF capture
/// date of every JPEG found there and moves each one into
/// <out>/<MonthName>/. Files of any other type are left in place and
/// listed in the end-of-run report.
#[derive(Parser, Debug)]
#[command(name = "snapsort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The input directory
    #[arg(long = "in", value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// The output directory
    #[arg(long = "out", value_name = "DIR", required = true)]
    pub output: PathBuf,

    /// Number of worker threads (0 = one per logical CPU)
    #[arg(short = 't', long, default_value_t = 0)]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Convert CLI arguments to Config
    pub fn to_config(&self) -> Config {
        Config {
            input_dir: self.input.clone(),
            output_dir: self.output.clone(),
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_is_required() {
        let parsed = Cli::try_parse_from(["snapsort", "--in", "/photos"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_in_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["snapsort", "--out", "/sorted"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("."));
        assert_eq!(cli.output, PathBuf::from("/sorted"));
        assert_eq!(cli.threads, 0);
    }

    #[test]
    fn test_to_config() {
        let cli =
            Cli::try_parse_from(["snapsort", "--in", "/a", "--out", "/b", "-t", "2"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.input_dir, PathBuf::from("/a"));
        assert_eq!(config.output_dir, PathBuf::from("/b"));
        assert_eq!(config.threads, 2);
    }
}
