use ruint::aliases::U256;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EccError {
    #[error("value {value} is not in field range 0 to {prime} - 1")]
    OutOfRange { value: U256, prime: U256 },

    #[error("cannot combine elements of F_{lhs} and F_{rhs}")]
    MismatchedField { lhs: U256, rhs: U256 },

    #[error("({x}, {y}) is not on the curve")]
    NotOnCurve { x: U256, y: U256 },

    #[error("points are not on the same curve")]
    MismatchedCurve,

    #[error("zero has no multiplicative inverse")]
    NotInvertible,

    #[error("the point at infinity has no SEC encoding")]
    InfinityEncoding,

    #[error("r or s is outside [1, N)")]
    InvalidSignatureRange,

    #[error("malformed SEC encoding: {0}")]
    Format(#[from] FormatError),

    #[error("malformed DER signature: {0}")]
    Der(#[from] DerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty buffer")]
    Empty,

    #[error("unknown marker byte 0x{0:02x}")]
    UnknownMarker(u8),

    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DerError {
    #[error("expected tag 0x{expected:02x}, got 0x{actual:02x}")]
    Tag { expected: u8, actual: u8 },

    #[error("length field does not match the buffer")]
    Length,

    #[error("integer is longer than 33 bytes")]
    IntegerTooLong,

    #[error("integer is negative")]
    Negative,

    #[error("integer has a redundant leading zero")]
    NonCanonical,

    #[error("unexpected end of input")]
    Truncated,
}
