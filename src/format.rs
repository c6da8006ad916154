#![forbid(unsafe_code)]
use super::compressor::CompressorType;
use super::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Patch container format.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BsdiffFormat {
    /// The original bsdiff 4.x container, bzip2 only.
    Legacy,

    /// Container with per-stream compressor selection.
    Bsdf2,

    /// Single compressor container with a plain control stream.
    Endsley,
}

/// Accepted names of each format, canonical name first.
const FORMAT_NAMES: &[(&str, BsdiffFormat)] = &[
    ("legacy", BsdiffFormat::Legacy),
    ("bsdiff40", BsdiffFormat::Legacy),
    ("bsdf2", BsdiffFormat::Bsdf2),
    ("endsley", BsdiffFormat::Endsley),
];

impl BsdiffFormat {
    /// All formats in catalog order.
    pub const ALL: [BsdiffFormat; 3] = [BsdiffFormat::Legacy, BsdiffFormat::Bsdf2, BsdiffFormat::Endsley];

    /// Canonical lower case name.
    pub fn as_str(self) -> &'static str {
        match self {
            BsdiffFormat::Legacy => "legacy",
            BsdiffFormat::Bsdf2 => "bsdf2",
            BsdiffFormat::Endsley => "endsley",
        }
    }

    /// Every name the parser accepts for this format.
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        FORMAT_NAMES
            .iter()
            .filter(move |&&(_, fmt)| fmt == self)
            .map(|&(name, _)| name)
    }

    /// Magic bytes at the start of a patch in this format.
    pub fn magic(self) -> &'static [u8] {
        match self {
            BsdiffFormat::Legacy => b"BSDIFF40",
            BsdiffFormat::Bsdf2 => b"BSDF2",
            BsdiffFormat::Endsley => b"ENDSLEY/BSDIFF43",
        }
    }

    /// Whether the format may carry streams of the given compressor.
    pub fn supports(self, ty: CompressorType) -> bool {
        match self {
            BsdiffFormat::Legacy => ty == CompressorType::BZ2,
            BsdiffFormat::Bsdf2 => ty != CompressorType::NoCompression,
            BsdiffFormat::Endsley => true,
        }
    }

    /// Max count of compressors selectable at once, `None` if unbounded.
    pub fn max_compressors(self) -> Option<usize> {
        match self {
            BsdiffFormat::Legacy | BsdiffFormat::Endsley => Some(1),
            BsdiffFormat::Bsdf2 => None,
        }
    }
}

impl Default for BsdiffFormat {
    fn default() -> Self {
        BsdiffFormat::Legacy
    }
}

impl fmt::Display for BsdiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BsdiffFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_bsdiff_format(s)
    }
}

/// Parses a format name case-insensitively.
pub fn parse_bsdiff_format(expr: &str) -> Result<BsdiffFormat> {
    let name = expr.to_ascii_lowercase();
    FORMAT_NAMES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map(|&(_, fmt)| fmt)
        .ok_or_else(|| Error::InvalidFormatName(expr.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_parses() {
        for &fmt in BsdiffFormat::ALL.iter() {
            for alias in fmt.aliases() {
                assert_eq!(parse_bsdiff_format(alias), Ok(fmt));
                assert_eq!(parse_bsdiff_format(&alias.to_ascii_uppercase()), Ok(fmt));
            }
            assert_eq!(fmt.as_str().parse::<BsdiffFormat>(), Ok(fmt));
        }
        assert_eq!(parse_bsdiff_format("BSDIFF40"), Ok(BsdiffFormat::Legacy));
        assert_eq!(parse_bsdiff_format("Legacy"), Ok(BsdiffFormat::Legacy));
    }

    #[test]
    fn unknown_format() {
        for bad in ["", "bsdiff", "bsdf2 ", "bsdiff43"].iter() {
            assert_eq!(parse_bsdiff_format(bad), Err(Error::InvalidFormatName(bad.to_string())));
        }
    }

    #[test]
    fn compatibility_matrix() {
        use CompressorType::*;
        assert!(BsdiffFormat::Legacy.supports(BZ2));
        assert!(!BsdiffFormat::Legacy.supports(Brotli));
        assert!(!BsdiffFormat::Bsdf2.supports(NoCompression));
        assert!(BsdiffFormat::Bsdf2.supports(Brotli));
        assert!(CompressorType::ALL.iter().all(|&ty| BsdiffFormat::Endsley.supports(ty)));
        assert_eq!(BsdiffFormat::Bsdf2.max_compressors(), None);
        assert_eq!(BsdiffFormat::Endsley.max_compressors(), Some(1));
        assert_eq!(BsdiffFormat::Legacy.magic(), b"BSDIFF40");
    }
}
