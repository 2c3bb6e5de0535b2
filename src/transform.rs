//! The two shapes of caller-supplied line transformation.
//!
//! A transformation receives one line without its delimiter and returns
//! the line to write, also without a delimiter. An empty result skips the
//! line; an error stops the run.

use crate::error::BoxError;

/// Transformation over decoded text lines.
pub trait LineTransform {
    fn transform(&mut self, line: &str) -> Result<String, BoxError>;
}

/// Transformation over raw byte lines.
pub trait ByteTransform {
    fn transform(&mut self, line: &[u8]) -> Result<Vec<u8>, BoxError>;
}

impl<F, E> LineTransform for F
where
    F: FnMut(&str) -> Result<String, E>,
    E: Into<BoxError>,
{
    fn transform(&mut self, line: &str) -> Result<String, BoxError> {
        self(line).map_err(Into::into)
    }
}

impl<F, E> ByteTransform for F
where
    F: FnMut(&[u8]) -> Result<Vec<u8>, E>,
    E: Into<BoxError>,
{
    fn transform(&mut self, line: &[u8]) -> Result<Vec<u8>, BoxError> {
        self(line).map_err(Into::into)
    }
}

/// Passes every line through unchanged.
pub fn identity(line: &str) -> Result<String, BoxError> {
    Ok(line.to_string())
}

/// Passes every byte line through unchanged.
pub fn identity_bytes(line: &[u8]) -> Result<Vec<u8>, BoxError> {
    Ok(line.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_line_transform() {
        let mut upper = |line: &str| -> Result<String, String> { Ok(line.to_uppercase()) };
        assert_eq!(LineTransform::transform(&mut upper, "abc").unwrap(), "ABC");
    }

    #[test]
    fn test_closure_error_is_boxed() {
        let mut fail = |_: &[u8]| -> Result<Vec<u8>, &str> { Err("mayday") };
        let err = ByteTransform::transform(&mut fail, b"abc").unwrap_err();
        assert_eq!(err.to_string(), "mayday");
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity("foo fighters").unwrap(), "foo fighters");
        assert_eq!(identity_bytes(b"foo").unwrap(), b"foo");
    }
}
