// src/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),

    #[error("Packed color out of 24-bit range: {0:#x}")]
    PackedOutOfRange(u64),
}

/// Construction-time failures for a color ramp.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RampError {
    #[error("Color ramp needs at least 2 control points, got {0}")]
    TooFewStops(usize),

    #[error("Control point {index} has non-finite position {position}")]
    NonFinitePosition { index: usize, position: f32 },

    #[error("Color ramp must start at position 0, got {0}")]
    StartNotZero(f32),

    #[error("Color ramp must end at position 1, got {0}")]
    EndNotOne(f32),

    #[error("Control point positions must be strictly ascending: {previous} followed by {next} at index {index}")]
    NotAscending {
        index: usize,
        previous: f32,
        next: f32,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Band length mismatch: B08={b08}, B12={b12}, dataMask={data_mask}")]
    LengthMismatch {
        b08: usize,
        b12: usize,
        data_mask: usize,
    },
}
