//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How much of the run is spread across the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Everything in order on one worker
    Sequential,
    /// One task per year; its days run in order
    Year,
    /// One task per year/day; its parts run in order
    #[default]
    Day,
    /// One task per year/day/part; each part parses its own input
    Part,
}

/// Run Advent of Code solutions
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solutions", version)]
pub struct Args {
    /// Year to run (all years if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(2015..=2034))]
    pub year: Option<u16>,

    /// Day to run (all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solutions carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Read the puzzle input from a file instead of the cache or the site
    ///
    /// Requires --year and --day.
    #[arg(short, long, requires_all = ["year", "day"], conflicts_with = "submit")]
    pub input: Option<PathBuf>,

    /// Cache directory for puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc_solver")]
    pub cache_dir: PathBuf,

    /// Worker threads (defaults to available parallelism)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Submit answers to adventofcode.com
    #[arg(long)]
    pub submit: bool,

    /// Wait out throttled submissions and retry
    #[arg(long)]
    pub auto_retry: bool,

    /// Account id used to partition the input cache
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Only print answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aoc"]).unwrap();
        assert_eq!(args.parallelize_by, ParallelizeBy::Day);
        assert!(args.tags.is_empty());
        assert!(!args.submit);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_tags_split_on_comma() {
        let args = Args::try_parse_from(["aoc", "--tags", "grid,simulation"]).unwrap();
        assert_eq!(args.tags, vec!["grid", "simulation"]);
    }

    #[test]
    fn test_input_requires_year_and_day() {
        assert!(Args::try_parse_from(["aoc", "--input", "in.txt"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--input", "in.txt", "--year", "2015"]).is_err());
        let args =
            Args::try_parse_from(["aoc", "-i", "in.txt", "-y", "2015", "-d", "7"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Args::try_parse_from(["aoc", "--day", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--year", "2014"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--part", "3"]).is_err());
    }
}
