//! Splits a byte stream into `\n`-delimited lines.

use std::io::{self, BufRead};

const DELIMITER: u8 = b'\n';

/// Lazy iterator over the lines of a reader.
///
/// The delimiter is stripped from each line; a trailing `\r` is kept. A
/// final segment without a delimiter is still yielded. After a read error
/// has been yielded the iterator is exhausted.
pub struct Lines<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut line = Vec::new();
        match self.reader.read_until(DELIMITER, &mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if line.last() == Some(&DELIMITER) {
                    line.pop();
                }
                Some(Ok(line))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for Lines<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    fn split(input: &str) -> Vec<String> {
        Lines::new(input.as_bytes())
            .map(|l| String::from_utf8(l.unwrap()).unwrap())
            .collect()
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("reading failed here"))
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(split("").is_empty());
    }

    #[test]
    fn test_trailing_delimiter() {
        assert_eq!(split("foo fighters\narctic monkeys\n"), ["foo fighters", "arctic monkeys"]);
    }

    #[test]
    fn test_missing_trailing_delimiter() {
        assert_eq!(split("foo fighters\nlime cordiale"), ["foo fighters", "lime cordiale"]);
    }

    #[test]
    fn test_blank_lines_are_lines() {
        assert_eq!(split("\n\na\n"), ["", "", "a"]);
    }

    #[test]
    fn test_carriage_return_kept() {
        assert_eq!(split("a\r\nb\r\n"), ["a\r", "b\r"]);
    }

    #[test]
    fn test_read_error_stops_iteration() {
        let mut lines = Lines::new(BufReader::new(FailingReader));
        let err = lines.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "reading failed here");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_error_after_lines() {
        let reader = BufReader::with_capacity(4, "abc\nde".as_bytes().chain(FailingReader));
        let mut lines = Lines::new(reader);
        assert_eq!(lines.next().unwrap().unwrap(), b"abc");
        assert!(lines.next().unwrap().is_err());
        assert!(lines.next().is_none());
    }
}
