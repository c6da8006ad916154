#![forbid(unsafe_code)]
use super::compressor::*;
use super::error::{Error, Incompatibility, Result};
use super::format::{parse_bsdiff_format, BsdiffFormat};
use super::utils::scan_int;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::collections::BTreeSet;
use std::convert::TryFrom;
use std::ffi::OsString;
use std::fmt;


/// Usage of the options understood by `parse_command_line`.
pub const USAGE: &str = "\
options:
  --format=<legacy|bsdiff40|bsdf2|endsley>
        format of the patch (default: legacy)
  --type=<nocompression|bz2|brotli>[:...]
        compressors of the patch streams, several are only allowed by bsdf2
        (default: bz2)
  --minlen=<LEN>
        minimum match length for the diff algorithm (default: 0)
  --brotli_quality=<0-11>
        quality of the brotli compressor (default: 11)
";

/// Validated input of a patch writer.
///
/// Build it with `Default`, `new` or `parse_command_line`, then check it with
/// `validate` before handing it to a writer:
/// ```
/// use std::collections::BTreeSet;
/// use bsdiff_args::{BsdiffArguments, BsdiffFormat, CompressorType};
///
/// let types: BTreeSet<_> = vec![CompressorType::Brotli].into_iter().collect();
/// let args = BsdiffArguments::new(BsdiffFormat::Bsdf2, types, Some(9));
/// assert!(args.is_valid());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BsdiffArguments {
    format: BsdiffFormat,
    compressor_types: BTreeSet<CompressorType>,
    brotli_quality: Option<i32>,
    min_length: usize,
}

impl Default for BsdiffArguments {
    fn default() -> Self {
        let mut compressor_types = BTreeSet::new();
        compressor_types.insert(CompressorType::BZ2);
        BsdiffArguments {
            format: BsdiffFormat::Legacy,
            compressor_types,
            brotli_quality: None,
            min_length: 0,
        }
    }
}

impl BsdiffArguments {
    /// Create arguments with zero minimum match length.
    pub fn new(
        format: BsdiffFormat,
        compressor_types: BTreeSet<CompressorType>,
        brotli_quality: Option<i32>,
    ) -> Self {
        BsdiffArguments {
            format,
            compressor_types,
            brotli_quality,
            min_length: 0,
        }
    }

    /// Set the minimum match length.
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn format(&self) -> BsdiffFormat {
        self.format
    }

    pub fn compressor_types(&self) -> &BTreeSet<CompressorType> {
        &self.compressor_types
    }

    /// Brotli quality, `None` if never set.
    pub fn brotli_quality(&self) -> Option<i32> {
        self.brotli_quality
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// One fresh compressor per selected type, in catalog order.
    pub fn compressors(&self) -> Vec<Box<dyn Compressor>> {
        self.compressor_types
            .iter()
            .map(|&ty| new_compressor(ty, self.brotli_quality))
            .collect()
    }

    /// Check the format/compressor compatibility rules.
    ///
    /// The first violated rule is reported, checking the compressor set,
    /// then the brotli quality, then the format specific rule.
    pub fn validate(&self) -> Result<()> {
        let n = self.compressor_types.len();
        if n == 0 {
            return incompatible(Incompatibility::NoCompressors);
        }

        if self.compressor_types.contains(&CompressorType::Brotli) {
            match self.brotli_quality {
                Some(q) if (BROTLI_MIN_QUALITY..=BROTLI_MAX_QUALITY).contains(&q) => (),
                q => return incompatible(Incompatibility::BrotliQuality(q)),
            }
        }

        match self.format {
            BsdiffFormat::Legacy => {
                if n != 1 || !self.compressor_types.contains(&CompressorType::BZ2) {
                    return incompatible(Incompatibility::LegacyRequiresBz2);
                }
            }
            BsdiffFormat::Bsdf2 => {
                if self.compressor_types.contains(&CompressorType::NoCompression) {
                    return incompatible(Incompatibility::Bsdf2Uncompressed);
                }
            }
            BsdiffFormat::Endsley => {
                if n != 1 {
                    return incompatible(Incompatibility::EndsleyRequiresSingleCompressor(n));
                }
            }
        }
        Ok(())
    }

    /// Whether `validate` passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[inline]
fn incompatible(why: Incompatibility) -> Result<()> {
    Err(Error::IncompatibleConfiguration(why))
}

/// Non-fatal findings of `parse_command_line`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Warning {
    /// Brotli quality was given but brotli is not selected.
    UnusedBrotliQuality(i32),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Warning::UnusedBrotliQuality(q) => {
                write!(f, "brotli quality {} is ignored since brotli is not selected", q)
            }
        }
    }
}

/// Outcome of `parse_command_line`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedCommandLine {
    pub arguments: BsdiffArguments,
    pub warnings: Vec<Warning>,
}

/// Parses a non-negative minimum match length.
pub fn parse_min_length(expr: &str) -> Result<usize> {
    let n = scan_int(expr)?;
    if n < 0 {
        return Err(Error::NegativeValue(n));
    }
    usize::try_from(n).map_err(|_| Error::NotANumber(expr.to_owned()))
}

/// Parses an integer in `[min, max]`.
pub fn parse_quality(expr: &str, min: i32, max: i32) -> Result<i32> {
    let n = scan_int(expr)?;
    if n < i64::from(min) || n > i64::from(max) {
        return Err(Error::OutOfRange { value: n, min, max });
    }
    Ok(n as i32)
}

fn parse_brotli_quality(expr: &str) -> Result<i32> {
    parse_quality(expr, BROTLI_MIN_QUALITY, BROTLI_MAX_QUALITY)
}

#[derive(Parser, Debug)]
#[command(
    name = "bsdiff",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
struct RawArguments {
    #[arg(long = "format", value_name = "FORMAT", allow_hyphen_values = true, value_parser = parse_bsdiff_format)]
    format: Option<BsdiffFormat>,

    #[arg(long = "minlen", value_name = "LEN", allow_hyphen_values = true, value_parser = parse_min_length)]
    min_length: Option<usize>,

    #[arg(long = "type", value_name = "TYPES", allow_hyphen_values = true, value_parser = parse_compressor_types)]
    compressor_types: Option<BTreeSet<CompressorType>>,

    #[arg(long = "brotli_quality", value_name = "QUALITY", allow_hyphen_values = true, value_parser = parse_brotli_quality)]
    brotli_quality: Option<i32>,
}

/// Parses `--format`, `--type`, `--minlen` and `--brotli_quality` options
/// (without the program name) into arguments.
///
/// The result is not validated, see `BsdiffArguments::validate`.
/// ```
/// use bsdiff_args::{parse_command_line, BsdiffFormat};
///
/// let parsed = parse_command_line(&["--format=bsdf2", "--type=brotli:bz2"]).unwrap();
/// assert_eq!(parsed.arguments.format(), BsdiffFormat::Bsdf2);
/// assert_eq!(parsed.arguments.brotli_quality(), Some(11));
/// assert!(parsed.arguments.is_valid());
/// ```
pub fn parse_command_line<I, T>(tokens: I) -> Result<ParsedCommandLine>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let raw = RawArguments::try_parse_from(tokens).map_err(from_clap_error)?;
    let mut arguments = BsdiffArguments::default();

    if let Some(format) = raw.format {
        log::debug!("format: {}", format);
        arguments.format = format;
    }
    if let Some(min_length) = raw.min_length {
        log::debug!("minimum length: {}", min_length);
        arguments.min_length = min_length;
    }
    if let Some(types) = raw.compressor_types {
        log::debug!("compressor types: {:?}", types);
        arguments.compressor_types = types;
    }
    if let Some(quality) = raw.brotli_quality {
        log::debug!("brotli quality: {}", quality);
        arguments.brotli_quality = Some(quality);
    }

    let mut warnings = Vec::new();
    let brotli = arguments.compressor_types.contains(&CompressorType::Brotli);
    if brotli && arguments.format != BsdiffFormat::Legacy && arguments.brotli_quality.is_none() {
        log::debug!("brotli quality defaults to {}", BROTLI_MAX_QUALITY);
        arguments.brotli_quality = Some(BROTLI_MAX_QUALITY);
    }
    if let (false, Some(quality)) = (brotli, arguments.brotli_quality) {
        let warning = Warning::UnusedBrotliQuality(quality);
        log::warn!("{}", warning);
        warnings.push(warning);
    }

    Ok(ParsedCommandLine { arguments, warnings })
}

/// Maps clap failures onto our error kinds, keeping value parser errors as is.
fn from_clap_error(err: clap::Error) -> Error {
    match err.kind() {
        ErrorKind::ValueValidation => std::error::Error::source(&err)
            .and_then(|e| e.downcast_ref::<Error>())
            .cloned()
            .unwrap_or_else(|| Error::Usage(clap_message(&err))),
        ErrorKind::UnknownArgument => match clap_context(&err, ContextKind::InvalidArg) {
            Some(arg) if arg.starts_with('-') => Error::UnrecognizedOption(arg),
            Some(arg) => Error::Usage(format!("unexpected argument {:?}", arg)),
            None => Error::Usage(clap_message(&err)),
        },
        // clap renders the arg as `--type <TYPES>`, keep the option name only.
        ErrorKind::InvalidValue | ErrorKind::NoEquals => match clap_context(&err, ContextKind::InvalidArg) {
            Some(arg) => Error::MissingValue(arg.split(' ').next().unwrap_or_default().to_owned()),
            None => Error::Usage(clap_message(&err)),
        },
        _ => Error::Usage(clap_message(&err)),
    }
}

fn clap_context(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn clap_message(err: &clap::Error) -> String {
    let msg = err.to_string();
    msg.trim().trim_start_matches("error: ").to_owned()
}
