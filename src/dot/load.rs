use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads a graph file produced by the analysis tool.
///
/// Only failing to open or read the file is an error; bytes that are not
/// valid UTF-8 are replaced rather than rejected.
pub fn read_graph_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read call graph file {}", path.display()))?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => String::from_utf8_lossy(error.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "\"a\" [label=\"main\"];").expect("write");

        let text = read_graph_source(file.path()).expect("readable");
        assert!(text.contains("label=\"main\""));
    }

    #[test]
    fn missing_file_error_names_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.dot");

        let error = read_graph_source(&path).expect_err("file does not exist");
        assert!(format!("{error:#}").contains("missing.dot"));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"\"a\" [label=\"m\xffain\"];\n").expect("write");

        let text = read_graph_source(file.path()).expect("readable");
        assert!(text.contains('\u{fffd}'));
    }
}
