//! BPSK over an additive white Gaussian noise channel

use crate::linear_algebra::BinaryVector;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Invalid noise parameters: {0}")]
    InvalidNoise(#[from] NormalError),
}

/// Noise standard deviation for a rate `k / n` code at the given Eb/N0 in dB
pub fn noise_std_dev(ebn0_db: f64, k: usize, n: usize) -> f64 {
    (0.5 * n as f64 / k as f64 * 10f64.powf(-ebn0_db / 10.0)).sqrt()
}

/// Map each bit to a BPSK symbol: `true` → -1.0, `false` → +1.0
pub fn modulate(codeword: &BinaryVector) -> Vec<f64> {
    codeword
        .iter()
        .map(|bit| if bit { -1.0 } else { 1.0 })
        .collect()
}

/// Draw a uniformly random message of `len` bits
pub fn random_message<R: Rng + ?Sized>(len: usize, rng: &mut R) -> BinaryVector {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

/// AWGN channel with BPSK mapping
#[derive(Debug, Clone)]
pub struct AwgnChannel {
    noise: Normal<f64>,
    std_dev: f64,
}

impl AwgnChannel {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, ChannelError> {
        Ok(Self {
            noise: Normal::new(mean, std_dev)?,
            std_dev,
        })
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Modulate the codeword and add independent noise to every symbol
    pub fn transmit<R: Rng + ?Sized>(&self, codeword: &BinaryVector, rng: &mut R) -> Vec<f64> {
        modulate(codeword)
            .into_iter()
            .map(|symbol| symbol + self.noise.sample(rng))
            .collect()
    }
}
