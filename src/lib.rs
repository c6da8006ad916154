/*!
Patch format and compressor negotiation for bsdiff-style delta writers.

Turns `--format`, `--type`, `--minlen` and `--brotli_quality` options into a
`BsdiffArguments` value, and decides whether the chosen patch format can carry
streams of the chosen compressors.
*/

pub mod arguments;
pub mod compressor;
pub mod error;
pub mod format;
mod utils;

pub use arguments::{
    parse_command_line, parse_min_length, parse_quality, BsdiffArguments, ParsedCommandLine,
    Warning, USAGE,
};
pub use compressor::{
    compress_smallest, new_compressor, parse_compressor_types, Compressor, CompressorType,
    BROTLI_MAX_QUALITY, BROTLI_MIN_QUALITY,
};
pub use error::{Error, Incompatibility};
pub use format::{parse_bsdiff_format, BsdiffFormat};
