#![forbid(unsafe_code)]
use super::arguments::BsdiffArguments;
use super::error::{Error, Result};
use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Lowest brotli quality.
pub const BROTLI_MIN_QUALITY: i32 = 0;

/// Highest brotli quality, also the default when brotli is selected.
pub const BROTLI_MAX_QUALITY: i32 = 11;

/// Brotli sliding window size (log2).
pub const BROTLI_DEFAULT_LGWIN: u32 = 22;

/// Internal buffer size of the brotli encoder.
const BROTLI_BUFFER_SIZE: usize = 4096;

/// Compression algorithm of a patch stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CompressorType {
    /// Stored verbatim.
    NoCompression,

    /// bzip2 at the best level.
    BZ2,

    /// brotli at the configured quality.
    Brotli,
}

impl CompressorType {
    /// All compressor types in catalog order.
    pub const ALL: [CompressorType; 3] = [
        CompressorType::NoCompression,
        CompressorType::BZ2,
        CompressorType::Brotli,
    ];

    /// Canonical lower case name.
    pub fn as_str(self) -> &'static str {
        match self {
            CompressorType::NoCompression => "nocompression",
            CompressorType::BZ2 => "bz2",
            CompressorType::Brotli => "brotli",
        }
    }
}

impl fmt::Display for CompressorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressorType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.to_ascii_lowercase();
        CompressorType::ALL
            .iter()
            .copied()
            .find(|ty| ty.as_str() == name)
            .ok_or_else(|| Error::InvalidCompressorName(s.to_owned()))
    }
}

/// Parses a `:` separated list of compressor names.
///
/// Any unknown token, including an empty one, fails the whole list.
/// Duplicates collapse.
pub fn parse_compressor_types(expr: &str) -> Result<BTreeSet<CompressorType>> {
    expr.split(':').map(CompressorType::from_str).collect()
}

/// Streaming compressor of one patch stream.
pub trait Compressor {
    /// The algorithm behind this compressor.
    fn compressor_type(&self) -> CompressorType;

    /// Feed more data.
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Finish the stream and return the compressed bytes.
    fn finish(self: Box<Self>) -> io::Result<Vec<u8>>;
}

/// Passthrough compressor.
pub struct NoCompressor {
    buf: Vec<u8>,
}

impl NoCompressor {
    pub fn new() -> Self {
        NoCompressor { buf: Vec::new() }
    }
}

impl Default for NoCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for NoCompressor {
    fn compressor_type(&self) -> CompressorType {
        CompressorType::NoCompression
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(buf);
        Ok(())
    }

    fn finish(self: Box<Self>) -> io::Result<Vec<u8>> {
        Ok(self.buf)
    }
}

/// bzip2 compressor using the best level.
pub struct Bz2Compressor {
    enc: BzEncoder<Vec<u8>>,
}

impl Bz2Compressor {
    pub fn new() -> Self {
        Bz2Compressor {
            enc: BzEncoder::new(Vec::new(), Compression::Best),
        }
    }
}

impl Default for Bz2Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for Bz2Compressor {
    fn compressor_type(&self) -> CompressorType {
        CompressorType::BZ2
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.enc.write_all(buf)
    }

    fn finish(self: Box<Self>) -> io::Result<Vec<u8>> {
        self.enc.finish()
    }
}

/// brotli compressor.
pub struct BrotliCompressor {
    enc: brotli::CompressorWriter<Vec<u8>>,
}

impl BrotliCompressor {
    /// Creates a compressor of the given quality, clamped into
    /// `[BROTLI_MIN_QUALITY, BROTLI_MAX_QUALITY]`.
    pub fn new(quality: i32) -> Self {
        let quality = quality.max(BROTLI_MIN_QUALITY).min(BROTLI_MAX_QUALITY) as u32;
        BrotliCompressor {
            enc: brotli::CompressorWriter::new(
                Vec::new(),
                BROTLI_BUFFER_SIZE,
                quality,
                BROTLI_DEFAULT_LGWIN,
            ),
        }
    }
}

impl Compressor for BrotliCompressor {
    fn compressor_type(&self) -> CompressorType {
        CompressorType::Brotli
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.enc.write_all(buf)
    }

    fn finish(mut self: Box<Self>) -> io::Result<Vec<u8>> {
        self.enc.flush()?;
        Ok(self.enc.into_inner())
    }
}

/// Creates a compressor of the given type. Unset brotli quality means the
/// highest one.
pub fn new_compressor(ty: CompressorType, brotli_quality: Option<i32>) -> Box<dyn Compressor> {
    match ty {
        CompressorType::NoCompression => Box::new(NoCompressor::new()),
        CompressorType::BZ2 => Box::new(Bz2Compressor::new()),
        CompressorType::Brotli => {
            Box::new(BrotliCompressor::new(brotli_quality.unwrap_or(BROTLI_MAX_QUALITY)))
        }
    }
}

/// Compresses `data` with every selected compressor and keeps the smallest
/// output. Ties go to the earlier compressor in catalog order.
pub fn compress_smallest(args: &BsdiffArguments, data: &[u8]) -> io::Result<(CompressorType, Vec<u8>)> {
    let mut best: Option<(CompressorType, Vec<u8>)> = None;
    for mut compressor in args.compressors() {
        let ty = compressor.compressor_type();
        compressor.write(data)?;
        let out = compressor.finish()?;
        log::debug!("{} compressed {} bytes into {}", ty, data.len(), out.len());
        if best.as_ref().map_or(true, |(_, b)| out.len() < b.len()) {
            best = Some((ty, out));
        }
    }
    best.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no compressor type is selected"))
}
