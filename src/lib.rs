//! osdsim: word-error-rate simulation of binary linear block codes
//! decoded with Ordered Statistics Decoding over a BPSK/AWGN channel

pub mod channel;
pub mod cli;
pub mod combination;
pub mod decoder;
pub mod linear_algebra;
pub mod matrix_file;
pub mod permutation;
pub mod simulation;

pub use crate::cli::Cli;
pub use crate::decoder::{DecoderError, OsdDecoder};
pub use crate::linear_algebra::{BinaryMatrix, BinaryVector};
pub use crate::matrix_file::read_matrix_file;
pub use crate::permutation::Permutation;
