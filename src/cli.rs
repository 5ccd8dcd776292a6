//! Command-line interface

use crate::simulation::ExperimentConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File where the generator matrix is stored
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Maximum weight of the error pattern searched on the information set
    #[arg(short, long, default_value = "2")]
    pub wmax: usize,

    /// Eb/N0 ratio in dB. Several values ("-n 1,2,3" or "-n 1 2 3") run one experiment each
    #[arg(
        short = 'n',
        long = "ebn0",
        value_delimiter = ',',
        num_args = 1..,
        allow_negative_numbers = true
    )]
    pub ebn0: Vec<f64>,

    /// Minimal count of word errors to wait for
    #[arg(short, long)]
    pub errors: Option<usize>,

    /// Count of words to transmit per experiment. With --errors, both must be satisfied
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Hard limit of words per experiment, applied even if the error count isn't reached
    #[arg(short = 'L', long)]
    pub tries_limit: Option<usize>,

    /// Base seed; experiment i uses seed + i
    #[arg(short, long, default_value = "42")]
    pub seed: u64,

    /// Show a progress spinner per experiment
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Path of the generator matrix once every required argument is present,
    /// otherwise a message naming the first one that is missing
    pub fn matrix_path(&self) -> Result<&Path, &'static str> {
        let Some(path) = self.file.as_deref() else {
            return Err("Generator matrix must be specified, but it isn't.");
        };
        if self.ebn0.is_empty() {
            Err("Channel noise (--ebn0) must be specified, but it isn't.")
        } else if self.errors.is_none() && self.count.is_none() {
            Err("At least one of --errors and --count must be provided.")
        } else {
            Ok(path)
        }
    }

    pub fn experiment_config(&self) -> ExperimentConfig {
        ExperimentConfig {
            min_errors: self.errors.unwrap_or(0),
            min_trials: self.count.unwrap_or(0),
            trial_limit: self.tries_limit.unwrap_or(usize::MAX),
            seed: self.seed,
        }
    }
}
