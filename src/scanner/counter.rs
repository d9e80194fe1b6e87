//! Line and token counting for a single file.

use std::fs;
use std::io;
use std::path::Path;

use crate::tree::Metrics;

/// Count lines and estimate tokens for `path`.
///
/// `size_bytes` is the size reported by the file's metadata and is carried
/// through unchanged. Tokens are the byte length of the contents divided by
/// `chars_per_token`, rounded up.
pub fn count_file_metrics(
    path: &Path,
    size_bytes: u64,
    chars_per_token: f64,
    include_blank_lines: bool,
) -> io::Result<Metrics> {
    let bytes = fs::read(path)?;
    Ok(count_bytes(&bytes, size_bytes, chars_per_token, include_blank_lines))
}

pub fn count_bytes(
    bytes: &[u8],
    size_bytes: u64,
    chars_per_token: f64,
    include_blank_lines: bool,
) -> Metrics {
    let text = String::from_utf8_lossy(bytes);
    let lines = text
        .lines()
        .filter(|line| include_blank_lines || !line.trim().is_empty())
        .count() as u64;

    Metrics::new(lines, estimate_tokens(bytes.len() as u64, chars_per_token), size_bytes)
}

pub fn estimate_tokens(byte_count: u64, chars_per_token: f64) -> u64 {
    if byte_count == 0 {
        return 0;
    }
    (byte_count as f64 / chars_per_token).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(0, 4.0), 0);
        assert_eq!(estimate_tokens(1, 4.0), 1);
        assert_eq!(estimate_tokens(40, 4.0), 10);
        assert_eq!(estimate_tokens(41, 4.0), 11);
        assert_eq!(estimate_tokens(10, 2.5), 4);
    }

    #[test]
    fn test_blank_lines_skipped_by_default() {
        let content = b"a = 1\n\n   \nb = 2\n\t\nc = 3";
        let m = count_bytes(content, content.len() as u64, 4.0, false);
        assert_eq!(m.lines, 3);

        let m = count_bytes(content, content.len() as u64, 4.0, true);
        assert_eq!(m.lines, 6);
    }

    #[test]
    fn test_crlf_lines() {
        let content = b"one\r\ntwo\r\n\r\n";
        let m = count_bytes(content, content.len() as u64, 4.0, false);
        assert_eq!(m.lines, 2);
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let content = [b'x', 0xff, 0xfe, b'\n', b'y'];
        let m = count_bytes(&content, 5, 4.0, false);
        assert_eq!(m.lines, 2);
        assert_eq!(m.tokens, 2);
        assert_eq!(m.size_bytes, 5);
    }

    #[test]
    fn test_count_file_metrics() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.py");
        std::fs::write(&path, "abc\n".repeat(10)).unwrap();

        let m = count_file_metrics(&path, 40, 4.0, false).unwrap();
        assert_eq!(m, Metrics::new(10, 10, 40));
    }

    #[test]
    fn test_count_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = count_file_metrics(&dir.path().join("nope.py"), 0, 4.0, false);
        assert!(result.is_err());
    }
}
