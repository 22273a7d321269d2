//! Services layer - content lifecycle and session management
//!
//! Services implement the behavior of the admin surfaces on top of the
//! hosted store clients: list+filter, upload-then-insert creation,
//! optional-reupload updates, remove-blob-then-delete-row deletion, and
//! the login/logout/presence operations of the session manager.

pub mod berita;
pub mod galeri;
pub mod session;

pub use berita::{BeritaService, BeritaServiceError, CreateBeritaInput, UpdateBeritaInput};
pub use galeri::{CreateGaleriInput, GaleriService, GaleriServiceError, UpdateGaleriInput};
pub use session::{SessionService, SessionServiceError};

/// Case-insensitive substring match over an optional title.
///
/// An empty (or whitespace-only) query matches every row; a non-empty
/// query never matches a row without a title. Only titles are searched -
/// bodies are not.
pub fn title_matches(title: Option<&str>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }
    match title {
        Some(title) => title.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(title_matches(Some("Alpha News"), ""));
        assert!(title_matches(Some("Alpha News"), "   "));
        assert!(title_matches(None, ""));
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        assert!(title_matches(Some("Alpha News"), "al"));
        assert!(title_matches(Some("Alpha News"), "ALPHA"));
        assert!(title_matches(Some("alpha news"), "News"));
        // the substring may sit anywhere in the title, not only at a
        // word start
        assert!(title_matches(Some("Beta Gallery"), "al"));
        assert!(!title_matches(Some("Beta Gallery"), "alpha"));
    }

    #[test]
    fn test_missing_title_never_matches_a_query() {
        assert!(!title_matches(None, "a"));
    }

    #[test]
    fn test_filter_selects_only_titles_containing_the_query() {
        let titles = ["Alpha News", "Beta Photos", "Gamma"];
        let matched: Vec<&str> = titles
            .iter()
            .copied()
            .filter(|t| title_matches(Some(t), "al"))
            .collect();
        assert_eq!(matched, vec!["Alpha News"]);
    }
}
