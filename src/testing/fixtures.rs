use std::io::Write;

use tempfile::NamedTempFile;

/// Temporary file holding `contents`, removed when dropped.
pub fn text_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}
