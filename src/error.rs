#![forbid(unsafe_code)]
use thiserror::Error;

/// Reasons a well-formed configuration is rejected, in the order they are
/// checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Incompatibility {
    /// No compressor was selected.
    NoCompressors,

    /// Brotli is selected but its quality is unset or out of range.
    BrotliQuality(Option<i32>),

    /// The legacy format only carries bzip2 streams.
    LegacyRequiresBz2,

    /// BSDF2 does not allow uncompressed streams.
    Bsdf2Uncompressed,

    /// Endsley patches are written with exactly one compressor.
    EndsleyRequiresSingleCompressor(usize),
}

impl std::fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Incompatibility::*;
        match *self {
            NoCompressors => write!(f, "no compressor type is selected"),
            BrotliQuality(Some(q)) => write!(f, "brotli quality {} is out of range", q),
            BrotliQuality(None) => write!(f, "brotli quality is not set"),
            LegacyRequiresBz2 => write!(f, "legacy format only supports bz2 compression"),
            Bsdf2Uncompressed => write!(f, "bsdf2 format does not support nocompression"),
            EndsleyRequiresSingleCompressor(n) => {
                write!(f, "endsley format requires exactly one compressor, got {}", n)
            }
        }
    }
}

/// Errors of argument parsing and configuration validation.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Unknown token in a compressor list.
    #[error("unknown compressor type {0:?}")]
    InvalidCompressorName(String),

    /// Unknown patch format name.
    #[error("failed to parse bsdiff format {0:?}")]
    InvalidFormatName(String),

    /// Numeric option with malformed content.
    #[error("{0:?} is not a number")]
    NotANumber(String),

    /// Minimum length below zero.
    #[error("minimum length must be non-negative, got {0}")]
    NegativeValue(i64),

    /// Numeric option outside of its closed interval.
    #[error("{value} is not in range [{min}, {max}]")]
    OutOfRange { value: i64, min: i32, max: i32 },

    /// Option the parser does not know.
    #[error("unrecognized option {0:?}")]
    UnrecognizedOption(String),

    /// Option given without its required argument.
    #[error("option {0:?} requires an argument")]
    MissingValue(String),

    /// Any other malformed command line.
    #[error("{0}")]
    Usage(String),

    /// Well-formed configuration rejected by the compatibility rules.
    #[error("incompatible configuration: {0}")]
    IncompatibleConfiguration(Incompatibility),
}

pub type Result<T> = std::result::Result<T, Error>;
