use crate::core::field::FileRef;
use globset::{GlobBuilder, GlobMatcher};

#[derive(Debug, Clone)]
enum AcceptEntry {
    Exact(String),
    Mime(String),
    Pattern(GlobMatcher),
    Extension(GlobMatcher),
}

/// Parsed `accept` attribute of a file field: a comma-separated list of
/// entries, each trimmed.
///
/// [`AcceptFilter::exact`] keeps every entry verbatim and matches the file's
/// MIME type against them case-sensitively, empty entries included.
/// [`AcceptFilter::html`] reads the list the way a browser does: exact MIME
/// type (any case), `type/*` wildcard or `.ext` file extension, with blank
/// entries dropped.
#[derive(Debug, Clone)]
pub struct AcceptFilter {
    entries: Vec<AcceptEntry>,
}

impl AcceptFilter {
    pub fn parse(accept: &str, html: bool) -> Self {
        if html {
            Self::html(accept)
        } else {
            Self::exact(accept)
        }
    }

    pub fn exact(accept: &str) -> Self {
        let entries = accept
            .split(',')
            .map(|entry| AcceptEntry::Exact(entry.trim().to_string()))
            .collect();
        Self { entries }
    }

    pub fn html(accept: &str) -> Self {
        let entries = accept
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_html_entry)
            .collect();
        Self { entries }
    }

    pub fn accepts(&self, file: &FileRef) -> bool {
        self.entries.iter().any(|entry| match entry {
            AcceptEntry::Exact(mime) => *mime == file.mime,
            AcceptEntry::Mime(mime) => mime.eq_ignore_ascii_case(&file.mime),
            AcceptEntry::Pattern(glob) => glob.is_match(&file.mime),
            AcceptEntry::Extension(glob) => glob.is_match(&file.name),
        })
    }
}

fn parse_html_entry(entry: &str) -> AcceptEntry {
    if entry.starts_with('.') {
        return case_insensitive_glob(&format!("*{entry}"))
            .map(AcceptEntry::Extension)
            .unwrap_or_else(|| AcceptEntry::Mime(entry.to_string()));
    }
    if entry.contains('*') {
        return case_insensitive_glob(entry)
            .map(AcceptEntry::Pattern)
            .unwrap_or_else(|| AcceptEntry::Mime(entry.to_string()));
    }
    AcceptEntry::Mime(entry.to_string())
}

fn case_insensitive_glob(pattern: &str) -> Option<GlobMatcher> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()
        .map(|glob| glob.compile_matcher())
}

#[cfg(test)]
mod tests {
    use super::AcceptFilter;
    use crate::core::field::FileRef;

    #[test]
    fn exact_list_is_trimmed() {
        let filter = AcceptFilter::exact("image/png, application/pdf");
        assert!(filter.accepts(&FileRef::new("a.pdf", "application/pdf")));
        assert!(filter.accepts(&FileRef::new("a.png", "image/png")));
        assert!(!filter.accepts(&FileRef::new("a.gif", "image/gif")));
    }

    #[test]
    fn exact_list_takes_entries_literally() {
        let png = FileRef::new("a.png", "image/png");
        assert!(!AcceptFilter::exact("image/*").accepts(&png));
        assert!(!AcceptFilter::exact("IMAGE/PNG").accepts(&png));
        assert!(!AcceptFilter::exact(".png").accepts(&png));
        assert!(!AcceptFilter::exact(",").accepts(&FileRef::new("x", "text/plain")));
    }

    #[test]
    fn html_wildcard_matches_subtypes() {
        let filter = AcceptFilter::html("image/*");
        assert!(filter.accepts(&FileRef::new("a.gif", "image/gif")));
        assert!(!filter.accepts(&FileRef::new("a.txt", "text/plain")));
    }

    #[test]
    fn html_mime_ignores_case() {
        assert!(AcceptFilter::html("IMAGE/PNG").accepts(&FileRef::new("a.png", "image/png")));
    }

    #[test]
    fn html_extension_matches_file_name() {
        let filter = AcceptFilter::html(".pdf");
        assert!(filter.accepts(&FileRef::new("Report.PDF", "application/octet-stream")));
        assert!(!filter.accepts(&FileRef::new("report.doc", "application/msword")));
    }

    #[test]
    fn html_blank_entries_are_dropped() {
        let filter = AcceptFilter::html(" , image/png");
        assert!(filter.accepts(&FileRef::new("a.png", "image/png")));
        assert!(!filter.accepts(&FileRef::new("x", "text/plain")));
    }

    #[test]
    fn parse_picks_mode() {
        let png = FileRef::new("a.png", "image/png");
        assert!(!AcceptFilter::parse("image/*", false).accepts(&png));
        assert!(AcceptFilter::parse("image/*", true).accepts(&png));
    }
}
