//! Ordered Statistics Decoding of binary linear block codes
//!
//! The received soft word is split into hard decisions and reliabilities,
//! the positions are reordered most reliable first, the generator is brought
//! to systematic form on that order and every error pattern of weight up to
//! `max_weight` on the information set is re-encoded and scored.

use crate::combination::Combination;
use crate::linear_algebra::{BinaryMatrix, BinaryVector};
use crate::permutation::Permutation;
use log::trace;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DecoderError {
    #[error("Generator matrix has no rows")]
    EmptyGenerator,
    #[error("Generator matrix is rank deficient: rank {rank} of {rows} rows")]
    RankDeficiency { rank: usize, rows: usize },
    #[error("Received word has length {found}, expected {expected}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Best codeword found by the search together with its metric
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub codeword: BinaryVector,
    pub metric: f64,
}

/// Split a soft word into hard decisions (`sample < 0`) and reliabilities (`|sample|`)
pub fn decompose(received: &[f64]) -> (BinaryVector, Vec<f64>) {
    let alpha = received.iter().map(|&x| x < 0.0).collect();
    let beta = received.iter().map(|x| x.abs()).collect();
    (alpha, beta)
}

/// Sum of the reliabilities of every position where `candidate` disagrees with `alpha`
pub fn metric(alpha: &BinaryVector, beta: &[f64], candidate: &BinaryVector) -> f64 {
    debug_assert!(alpha.len() == beta.len() && beta.len() == candidate.len());
    (0..beta.len())
        .filter(|&i| alpha.get(i) != candidate.get(i))
        .map(|i| beta[i])
        .sum()
}

/// OSD decoder for a fixed generator matrix and search depth
#[derive(Debug, Clone)]
pub struct OsdDecoder {
    generator: BinaryMatrix,
    max_weight: usize,
}

impl OsdDecoder {
    /// Create a decoder for the `k × n` generator `generator`.
    ///
    /// # Errors
    /// Returns an error if the generator is empty or does not have full row
    /// rank. Rank does not change under column permutation, so a generator
    /// accepted here always yields a full information set while decoding.
    pub fn new(generator: BinaryMatrix, max_weight: usize) -> Result<Self, DecoderError> {
        if generator.is_empty() {
            return Err(DecoderError::EmptyGenerator);
        }

        let rank = generator.clone().gaussian_elimination().len();
        if rank != generator.rows() {
            return Err(DecoderError::RankDeficiency {
                rank,
                rows: generator.rows(),
            });
        }

        Ok(Self {
            generator,
            max_weight,
        })
    }

    pub fn generator(&self) -> &BinaryMatrix {
        &self.generator
    }

    /// Message length `k`
    pub fn message_len(&self) -> usize {
        self.generator.rows()
    }

    /// Codeword length `n`
    pub fn codeword_len(&self) -> usize {
        self.generator.cols()
    }

    pub fn max_weight(&self) -> usize {
        self.max_weight
    }

    /// Encode a `k`-bit message
    pub fn encode(&self, message: &BinaryVector) -> BinaryVector {
        message.mul(&self.generator)
    }

    /// Decode a soft received word into the most likely codeword found
    pub fn decode(&self, received: &[f64]) -> Result<BinaryVector, DecoderError> {
        self.decode_soft(received).map(|decoded| decoded.codeword)
    }

    /// Decode and also report the metric of the returned codeword
    pub fn decode_soft(&self, received: &[f64]) -> Result<Decoded, DecoderError> {
        let n = self.codeword_len();
        if received.len() != n {
            return Err(DecoderError::LengthMismatch {
                expected: n,
                found: received.len(),
            });
        }

        let (alpha, beta) = decompose(received);

        let inverted_pi = Permutation::by_descending(&beta);
        let pi = inverted_pi.invert();
        let alpha = pi.apply(&alpha);
        let beta = pi.apply(&beta[..]);

        let mut g_gamma = pi.apply(&self.generator);
        let information_set = g_gamma.gaussian_elimination();
        debug_assert_eq!(information_set.len(), self.message_len());

        let mut info_bits: BinaryVector =
            information_set.iter().map(|&col| alpha.get(col)).collect();

        let score = |bits: &BinaryVector| {
            let codeword = bits.mul(&g_gamma);
            let cost = metric(&alpha, &beta, &codeword);
            Decoded { codeword, metric: cost }
        };

        // Hard decisions on the information set, no flips
        let mut best = score(&info_bits);
        let k = info_bits.len();
        for w in 1..=self.max_weight.min(k) {
            let mut flips = Combination::new(w, k);
            loop {
                for &i in flips.current() {
                    info_bits.flip(i);
                }

                let candidate = score(&info_bits);
                if candidate.metric < best.metric {
                    trace!(
                        "weight {} pattern {:?} improves metric to {}",
                        w,
                        flips.current(),
                        candidate.metric
                    );
                    best = candidate;
                }

                for &i in flips.current() {
                    info_bits.flip(i);
                }

                if !flips.advance() {
                    break;
                }
            }
        }

        Ok(Decoded {
            codeword: inverted_pi.apply(&best.codeword),
            metric: best.metric,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hamming_7_4() -> BinaryMatrix {
        let rows = ["1101000", "0110100", "1110010", "1010001"];
        BinaryMatrix::from_rows(rows.iter().map(|r| r.parse().unwrap()).collect()).unwrap()
    }

    #[test]
    fn test_decompose() {
        let (alpha, beta) = decompose(&[-0.9, 0.8, 0.0, -0.1]);
        assert_eq!(alpha.to_string(), "1001");
        assert_eq!(beta, vec![0.9, 0.8, 0.0, 0.1]);
    }

    #[test]
    fn test_metric_sums_disagreements() {
        let alpha: BinaryVector = "1100".parse().unwrap();
        let candidate: BinaryVector = "1010".parse().unwrap();
        let beta = [0.5, 0.25, 2.0, 4.0];
        assert_eq!(metric(&alpha, &beta, &candidate), 2.25);
        assert_eq!(metric(&alpha, &beta, &alpha), 0.0);
    }

    #[test]
    fn test_decoder_creation() {
        let decoder = OsdDecoder::new(hamming_7_4(), 2).unwrap();
        assert_eq!(decoder.message_len(), 4);
        assert_eq!(decoder.codeword_len(), 7);
        assert_eq!(decoder.max_weight(), 2);

        assert_eq!(
            OsdDecoder::new(BinaryMatrix::new(0, 0), 1).unwrap_err(),
            DecoderError::EmptyGenerator
        );
    }

    #[test]
    fn test_rank_deficient_generator() {
        let rows = ["1010", "0101", "1111"];
        let g = BinaryMatrix::from_rows(rows.iter().map(|r| r.parse().unwrap()).collect()).unwrap();
        assert_eq!(
            OsdDecoder::new(g, 1).unwrap_err(),
            DecoderError::RankDeficiency { rank: 2, rows: 3 }
        );
    }

    #[test]
    fn test_length_mismatch() {
        let decoder = OsdDecoder::new(hamming_7_4(), 1).unwrap();
        assert_eq!(
            decoder.decode(&[1.0; 6]).unwrap_err(),
            DecoderError::LengthMismatch { expected: 7, found: 6 }
        );
    }

    #[test]
    fn test_single_row_scenario() {
        let g = BinaryMatrix::from_rows(vec!["110".parse().unwrap()]).unwrap();
        let decoder = OsdDecoder::new(g, 0).unwrap();
        let decoded = decoder.decode(&[-0.9, -0.8, 0.1]).unwrap();
        assert_eq!(decoded.to_string(), "110");
    }

    #[test]
    fn test_corrects_unreliable_error() {
        let decoder = OsdDecoder::new(hamming_7_4(), 1).unwrap();
        let codeword = decoder.encode(&"1010".parse().unwrap());
        assert_eq!(codeword.to_string(), "0011010");

        // Flip position 0 with a weak sample
        let mut received = crate::channel::modulate(&codeword);
        received[0] = -0.2;
        let decoded = decoder.decode_soft(&received).unwrap();
        assert_eq!(decoded.codeword, codeword);
        assert!((decoded.metric - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_weight_above_message_length_is_clamped() {
        let decoder = OsdDecoder::new(hamming_7_4(), 10).unwrap();
        let codeword = decoder.encode(&"0111".parse().unwrap());
        let received = crate::channel::modulate(&codeword);
        assert_eq!(decoder.decode(&received).unwrap(), codeword);
    }

    #[test]
    fn test_nan_samples_still_decode() {
        let decoder = OsdDecoder::new(hamming_7_4(), 2).unwrap();
        let codewords: Vec<BinaryVector> = (0..16u32)
            .map(|x| (0..4).map(|i| x >> i & 1 == 1).collect::<BinaryVector>())
            .map(|msg| decoder.encode(&msg))
            .collect();

        for nan_at in 0..7 {
            let mut received = [0.8, -0.3, 0.6, -1.1, 0.2, 0.9, -0.4];
            received[nan_at] = f64::NAN;
            received[(nan_at + 3) % 7] = -f64::NAN;

            let decoded = decoder.decode(&received).unwrap();
            assert!(codewords.contains(&decoded));
        }
    }

    #[test]
    fn test_full_search_is_maximum_likelihood() {
        let decoder = OsdDecoder::new(hamming_7_4(), 4).unwrap();
        let received = [0.3, -0.7, 0.1, -0.2, 0.9, -0.05, 0.4];
        let (alpha, beta) = decompose(&received);

        let best = (0..16u32)
            .map(|x| (0..4).map(|i| x >> i & 1 == 1).collect::<BinaryVector>())
            .map(|msg| metric(&alpha, &beta, &decoder.encode(&msg)))
            .fold(f64::INFINITY, f64::min);

        let decoded = decoder.decode_soft(&received).unwrap();
        assert!((decoded.metric - best).abs() < 1e-12);
        assert!((metric(&alpha, &beta, &decoded.codeword) - decoded.metric).abs() < 1e-12);
    }
}
