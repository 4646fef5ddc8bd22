//! Command-line arguments shared by the sweep runners.

use clap::Parser;
use std::path::PathBuf;

/// Problem sizes swept when `--sizes` is not given.
pub const DEFAULT_SIZES: [usize; 8] = [5, 10, 15, 20, 25, 30, 35, 40];

/// Defines the arguments common to every sweep over problem sizes.
#[derive(Parser, Debug, Clone)]
pub struct SweepArgs {
    /// Problem sizes (number of partitions) to sweep, comma separated.
    #[clap(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES.to_vec())]
    pub sizes: Vec<usize>,

    /// Directory the binaries run in; `output.txt` and `output2.txt` land here.
    #[clap(long, value_name = "PATH", default_value = ".")]
    pub working_dir: PathBuf,

    /// Path of the numerical driver, invoked as `driver <size> [alg]`.
    #[clap(long, value_name = "PATH", default_value = "./driver")]
    pub driver: PathBuf,
}

impl SweepArgs {
    /// Sizes in sweep order with zeros and duplicates removed.
    pub fn sizes(&self) -> Vec<usize> {
        let mut seen = Vec::with_capacity(self.sizes.len());
        for &n in &self.sizes {
            if n > 0 && !seen.contains(&n) {
                seen.push(n);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = SweepArgs::try_parse_from(["sweep"]).unwrap();
        assert_eq!(args.sizes(), DEFAULT_SIZES.to_vec());
        assert_eq!(args.driver, PathBuf::from("./driver"));
        assert_eq!(args.working_dir, PathBuf::from("."));
    }

    #[test]
    fn test_sizes_are_comma_separated_and_deduplicated() {
        let args = SweepArgs::try_parse_from(["sweep", "--sizes", "10,0,5,10"]).unwrap();
        assert_eq!(args.sizes(), vec![10, 5]);
    }
}
