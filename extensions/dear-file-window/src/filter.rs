/// Extension filter parsed from a semicolon-separated pattern list.
///
/// - `"txt;png"` keeps `*.txt` and `*.png` (case-insensitive)
/// - `"*"` or `""` keeps every file, including files without an extension
///
/// Patterns are plain extensions; a leading dot is tolerated (`".txt"`).
/// Empty segments such as the trailing one in `"txt;"` are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionFilter {
    matchers: Vec<ExtensionMatcher>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ExtensionMatcher {
    Any,
    /// Lower-case extension without dot
    Extension(String),
}

impl ExtensionFilter {
    /// Parse a pattern list like `"txt;png"`.
    pub fn parse(patterns: &str) -> Self {
        if patterns.trim().is_empty() {
            return Self::any();
        }
        let mut matchers = Vec::new();
        for token in patterns.split(';') {
            let t = token.trim();
            if t.is_empty() {
                continue;
            }
            let m = if t == "*" {
                ExtensionMatcher::Any
            } else {
                ExtensionMatcher::Extension(t.trim_start_matches('.').to_lowercase())
            };
            if !matchers.contains(&m) {
                matchers.push(m);
            }
        }
        Self { matchers }
    }

    /// Filter that keeps every file.
    pub fn any() -> Self {
        Self {
            matchers: vec![ExtensionMatcher::Any],
        }
    }

    /// Returns `true` if this filter keeps every file.
    pub fn matches_all(&self) -> bool {
        self.matchers.contains(&ExtensionMatcher::Any)
    }

    /// Returns `true` if `name` passes the filter.
    pub fn matches(&self, name: &str) -> bool {
        let ext = extension_lower(name);
        self.matchers.iter().any(|m| match m {
            ExtensionMatcher::Any => true,
            ExtensionMatcher::Extension(want) => ext.as_deref() == Some(want.as_str()),
        })
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::any()
    }
}

impl From<&str> for ExtensionFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Text after the last dot, lower-cased. `None` when the name has no dot.
fn extension_lower(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_extensions_match_case_insensitively() {
        let f = ExtensionFilter::parse("txt;png");
        assert!(f.matches("notes.txt"));
        assert!(f.matches("NOTES.TXT"));
        assert!(f.matches("shot.Png"));
        assert!(!f.matches("archive.tar.gz"));
        assert!(!f.matches("txt"));
        assert!(!f.matches("readme"));
    }

    #[test]
    fn pattern_case_and_leading_dot_are_normalized() {
        let f = ExtensionFilter::parse(".TXT");
        assert!(f.matches("a.txt"));
        assert!(!f.matches("a.md"));
    }

    #[test]
    fn only_last_extension_counts() {
        let f = ExtensionFilter::parse("gz");
        assert!(f.matches("archive.tar.gz"));
        assert!(!ExtensionFilter::parse("tar").matches("archive.tar.gz"));
    }

    #[test]
    fn wildcard_and_empty_match_everything() {
        for f in [ExtensionFilter::parse("*"), ExtensionFilter::parse("")] {
            assert!(f.matches_all());
            assert!(f.matches("Makefile"));
            assert!(f.matches("a.b"));
        }
        assert!(ExtensionFilter::parse("txt;*").matches("Makefile"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let f = ExtensionFilter::parse("txt;;");
        assert!(!f.matches_all());
        assert!(f.matches("a.txt"));
        assert!(!f.matches("Makefile"));
    }

    #[test]
    fn dotfile_extension_is_the_name() {
        let f = ExtensionFilter::parse("bashrc");
        assert!(f.matches(".bashrc"));
    }
}
