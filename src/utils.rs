#![forbid(unsafe_code)]
use super::error::{Error, Result};

/// Scans a base-10 integer the way `strtol` does, except that trailing bytes
/// are rejected.
///
/// Leading whitespace and a single sign are accepted. Overflow is reported as
/// `NotANumber`, like an `ERANGE` from `strtol`.
#[inline]
pub fn scan_int(expr: &str) -> Result<i64> {
    expr.trim_start()
        .parse::<i64>()
        .map_err(|_| Error::NotANumber(expr.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_like_strtol() {
        assert_eq!(scan_int("42"), Ok(42));
        assert_eq!(scan_int("+7"), Ok(7));
        assert_eq!(scan_int("-3"), Ok(-3));
        assert_eq!(scan_int("  19"), Ok(19));
        for bad in ["", "-", "12a", "0x10", "1 ", "99999999999999999999"].iter() {
            assert_eq!(scan_int(bad), Err(Error::NotANumber(bad.to_string())));
        }
    }
}
