use std::fs;
use std::path::Path;

/// Whether two paths resolve to the same existing file.
///
/// Paths that do not exist yet never match. Hard links to the same inode
/// under different names are not detected.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

pub fn validate_path_str(input: &str, must_exist: bool, must_be_file: bool) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if must_exist && !p.exists() {
        return Err(format!("Path does not exist: {}", p.display()));
    }
    if must_be_file && p.exists() && !p.is_file() {
        return Err("Expected a file path, not a directory".into());
    }
    if !must_exist {
        let parent = p.parent().filter(|d| !d.as_os_str().is_empty());
        if parent.is_some_and(|d| !d.is_dir()) {
            return Err(format!("Directory does not exist: {}", parent.unwrap_or(p).display()));
        }
    }
    Ok(())
}
