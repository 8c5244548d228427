use anyhow::{Context, Result, bail};
use std::fs;

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

/// Reads a batch file of requests, one per line.
///
/// Blank lines and lines starting with `#` are dropped; the remaining lines
/// are trimmed and returned in file order.
pub struct BatchFileReader;

impl BatchFileReader {
    pub fn read_lines(path: &str) -> Result<Vec<String>> {
        let contents = Self::read_file(path)?;
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    fn read_file(path: &str) -> Result<String> {
        let metadata =
            fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

        let size = metadata.len() as usize;
        if size > MAX_INPUT_SIZE {
            bail!(
                "Input file ({:.1} MB) exceeds maximum allowed size (1 MB).\n\n\
                 Consider splitting the file into smaller parts.",
                size as f64 / 1024.0 / 1024.0
            );
        }

        let bytes = fs::read(path).with_context(|| format!("Failed to read file: {path}"))?;
        String::from_utf8(bytes).with_context(|| format!("Input file is not valid UTF-8: {path}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_lines_skips_blank_and_comments() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            "# reviews\nI love this!\n\n   \n  # indented comment\n  meh, it's fine  \nthis is awful\n"
        )
        .unwrap();

        let lines = BatchFileReader::read_lines(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(lines, vec!["I love this!", "meh, it's fine", "this is awful"]);
    }

    #[test]
    fn test_read_lines_unicode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "最高の一日でした 😀\r\nterrible").unwrap();

        let lines = BatchFileReader::read_lines(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(lines, vec!["最高の一日でした 😀", "terrible"]);
    }

    #[test]
    fn test_read_empty_file() {
        let temp_file = NamedTempFile::new().unwrap();

        let lines = BatchFileReader::read_lines(temp_file.path().to_str().unwrap()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = BatchFileReader::read_lines("/nonexistent/path/to/file.txt");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to access"));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0xff, 0xfe, b'\n']).unwrap();

        let result = BatchFileReader::read_lines(temp_file.path().to_str().unwrap());
        assert!(result.unwrap_err().to_string().contains("UTF-8"));
    }

    #[test]
    fn test_read_file_exceeds_max_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large_file.txt");
        fs::write(&file_path, "x".repeat(MAX_INPUT_SIZE + 1)).unwrap();

        let result = BatchFileReader::read_lines(file_path.to_str().unwrap());
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }
}
