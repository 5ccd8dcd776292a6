//! Word-error-rate experiments
//!
//! Each Eb/N0 value gets its own blocking worker with a private RNG seeded
//! from the base seed and the worker index. Workers share the decoder
//! read-only and only ever fill their own result slot.

use crate::channel::{self, AwgnChannel, ChannelError};
use crate::decoder::{DecoderError, OsdDecoder};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use thiserror::Error;

const LOG_INTERVAL: usize = 10_000;
const PROGRESS_INTERVAL: usize = 1_000;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Decoding failed: {0}")]
    Decoder(#[from] DecoderError),
    #[error("Channel setup failed: {0}")]
    Channel(#[from] ChannelError),
    #[error("Worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Stop rules and seeding shared by every worker
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Keep going until at least this many word errors were seen
    pub min_errors: usize,
    /// Keep going until at least this many words were sent
    pub min_trials: usize,
    /// Never send more than this many words
    pub trial_limit: usize,
    /// Worker `i` seeds its RNG with `seed + i`
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            min_errors: 0,
            min_trials: 0,
            trial_limit: usize::MAX,
            seed: 42,
        }
    }
}

impl ExperimentConfig {
    fn should_continue(&self, trials: usize, errors: usize) -> bool {
        trials < self.trial_limit && (trials < self.min_trials || errors < self.min_errors)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    pub ebn0_db: f64,
    pub trials: usize,
    pub errors: usize,
}

impl ExperimentResult {
    /// Fraction of words decoded to the wrong codeword, 0 if nothing was sent
    pub fn word_error_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.errors as f64 / self.trials as f64
        }
    }
}

/// Run encode → transmit → decode cycles at a single noise level
pub fn run_experiment<R: Rng + ?Sized>(
    decoder: &OsdDecoder,
    ebn0_db: f64,
    config: &ExperimentConfig,
    rng: &mut R,
    progress: Option<&ProgressBar>,
) -> Result<ExperimentResult, SimulationError> {
    let k = decoder.message_len();
    let std_dev = channel::noise_std_dev(ebn0_db, k, decoder.codeword_len());
    let channel = AwgnChannel::new(0.0, std_dev)?;
    info!("Eb/N0 {} dB: noise standard deviation {:.5}", ebn0_db, std_dev);

    let mut trials = 0;
    let mut errors = 0;
    while config.should_continue(trials, errors) {
        let message = channel::random_message(k, rng);
        let codeword = decoder.encode(&message);
        let received = channel.transmit(&codeword, rng);

        if decoder.decode(&received)? != codeword {
            errors += 1;
        }
        trials += 1;

        if trials % LOG_INTERVAL == 0 {
            debug!("Eb/N0 {} dB: {} trials, {} errors", ebn0_db, trials, errors);
        }
        if let Some(bar) = progress.filter(|_| trials % PROGRESS_INTERVAL == 0) {
            bar.set_message(format!("Eb/N0 {ebn0_db} dB: {trials} words, {errors} errors"));
            bar.tick();
        }
    }

    if trials == config.trial_limit && errors < config.min_errors {
        warn!(
            "Eb/N0 {} dB: trial limit {} reached with only {} of {} errors",
            ebn0_db, config.trial_limit, errors, config.min_errors
        );
    }

    let result = ExperimentResult {
        ebn0_db,
        trials,
        errors,
    };
    if let Some(bar) = progress {
        bar.finish_with_message(format!(
            "Eb/N0 {ebn0_db} dB: WER {} ({errors}/{trials})",
            result.word_error_rate()
        ));
    }
    info!("Eb/N0 {} dB finished: {} errors in {} trials", ebn0_db, errors, trials);
    Ok(result)
}

fn spinner(multi: &MultiProgress) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    multi.add(ProgressBar::new_spinner().with_style(style))
}

/// Run one experiment per Eb/N0 value concurrently. Results come back in the
/// order of `ebn0_values`.
pub async fn run_all(
    decoder: Arc<OsdDecoder>,
    ebn0_values: &[f64],
    config: &ExperimentConfig,
    progress: Option<&MultiProgress>,
) -> Result<Vec<ExperimentResult>, SimulationError> {
    let handles: Vec<_> = ebn0_values
        .iter()
        .enumerate()
        .map(|(index, &ebn0_db)| {
            let decoder = Arc::clone(&decoder);
            let config = config.clone();
            let bar = progress.map(spinner);
            tokio::task::spawn_blocking(move || {
                let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(index as u64));
                run_experiment(&decoder, ebn0_db, &config, &mut rng, bar.as_ref())
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await??);
    }
    Ok(results)
}
