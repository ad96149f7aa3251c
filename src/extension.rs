//! Extension filter parsing and matching.
//!
//! Works on names only; nothing here touches the filesystem.

use std::borrow::Cow;
use std::path::Path;

use crate::types::ExtensionFilter;

/// Separator accepted inside a single `--ext` token ("jpg,png").
const TOKEN_SEPARATOR: char = ',';

/// Normalize raw extension tokens into canonical dot-prefixed extensions.
///
/// Each token may hold several comma-separated entries. Entries are trimmed,
/// empty ones dropped, and a leading `.` added when missing. Input order is
/// kept and duplicates are not removed. Case is left untouched.
///
/// # Examples
/// - `["jpg", " .png, txt "]` → `[".jpg", ".png", ".txt"]`
/// - `[""]` → `[]`
pub fn normalize_extensions<S: AsRef<str>>(raw: &[S]) -> ExtensionFilter {
    let extensions = raw
        .iter()
        .flat_map(|token| token.as_ref().split(TOKEN_SEPARATOR))
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{}", ext)
            }
        })
        .collect();

    ExtensionFilter(extensions)
}

/// Extension of a path's base name: from the last `.` to the end, or "" if none.
///
/// Unlike `Path::extension`, the dot is included and a leading-dot name
/// such as ".bashrc" yields ".bashrc". Names that are not valid UTF-8 are
/// read lossily; the replacement character never hides a `.` or an ASCII suffix.
pub fn file_extension(path: &Path) -> Cow<'_, str> {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return Cow::Borrowed(""),
    };

    match name {
        Cow::Borrowed(name) => match name.rfind('.') {
            Some(pos) => Cow::Borrowed(&name[pos..]),
            None => Cow::Borrowed(""),
        },
        Cow::Owned(name) => match name.rfind('.') {
            Some(pos) => Cow::Owned(name[pos..].to_string()),
            None => Cow::Borrowed(""),
        },
    }
}

impl ExtensionFilter {
    /// True when no extensions were given (every file matches).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact, case-sensitive match against the path's extension.
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return true;
        }

        let ext = file_extension(path);
        self.0.iter().any(|e| e.as_str() == ext.as_ref())
    }

    /// Human-readable list for the progress header (".jpg, .png").
    pub fn summary(&self) -> String {
        self.0.join(", ")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(filter: &ExtensionFilter) -> Vec<&str> {
        filter.0.iter().map(String::as_str).collect()
    }

    // --- normalize_extensions ---

    #[test]
    fn test_normalize_mixed_tokens() {
        let filter = normalize_extensions(&["jpg", " .png, txt "]);
        assert_eq!(exts(&filter), vec![".jpg", ".png", ".txt"]);
    }

    #[test]
    fn test_normalize_empty_token_dropped() {
        assert!(normalize_extensions(&[""]).is_empty());
        assert!(normalize_extensions(&[" , ,"]).is_empty());
        assert!(normalize_extensions::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_normalize_keeps_order_and_duplicates() {
        let filter = normalize_extensions(&["png,jpg", "png"]);
        assert_eq!(exts(&filter), vec![".png", ".jpg", ".png"]);
    }

    #[test]
    fn test_normalize_preserves_case() {
        let filter = normalize_extensions(&["JPG", ".jpg"]);
        assert_eq!(exts(&filter), vec![".JPG", ".jpg"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_extensions(&["jpg, .png", "tar.gz", " pdf"]);
        let twice = normalize_extensions(&once.0[..]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_accepts_owned_strings() {
        let raw = vec![String::from("md"), String::from("rs,toml")];
        let filter = normalize_extensions(&raw[..]);
        assert_eq!(exts(&filter), vec![".md", ".rs", ".toml"]);
    }

    // --- file_extension ---

    #[test]
    fn test_file_extension_last_dot() {
        assert_eq!(file_extension(Path::new("dir/archive.tar.gz")), ".gz");
        assert_eq!(file_extension(Path::new("photo.jpg")), ".jpg");
    }

    #[test]
    fn test_file_extension_none() {
        assert_eq!(file_extension(Path::new("Makefile")), "");
        assert_eq!(file_extension(Path::new("some.dir/README")), "");
    }

    #[test]
    fn test_file_extension_dotfile() {
        assert_eq!(file_extension(Path::new("home/.bashrc")), ".bashrc");
    }

    #[test]
    fn test_file_extension_trailing_dot() {
        assert_eq!(file_extension(Path::new("weird.")), ".");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_extension() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"photos/caf\xe9.jpg"));
        assert_eq!(file_extension(path), ".jpg");
        assert!(normalize_extensions(&["jpg"]).matches(path));

        let no_ext = Path::new(OsStr::from_bytes(b"caf\xe9"));
        assert_eq!(file_extension(no_ext), "");
    }

    // --- matches ---

    #[test]
    fn test_matches_case_sensitive() {
        let filter = normalize_extensions(&["jpg"]);
        assert!(filter.matches(Path::new("a.jpg")));
        assert!(!filter.matches(Path::new("b.JPG")));
        assert!(!filter.matches(Path::new("c.png")));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ExtensionFilter::default();
        assert!(filter.matches(Path::new("a.jpg")));
        assert!(filter.matches(Path::new("Makefile")));
    }

    #[test]
    fn test_matches_no_wildcards() {
        let filter = normalize_extensions(&["*"]);
        assert!(!filter.matches(Path::new("a.jpg")));
    }

    #[test]
    fn test_summary() {
        let filter = normalize_extensions(&["jpg,png"]);
        assert_eq!(filter.summary(), ".jpg, .png");
    }
}
