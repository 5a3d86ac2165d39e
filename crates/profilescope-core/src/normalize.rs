/// Profile URL prefixes stripped from user input
const PROFILE_PREFIXES: [&str; 2] = ["https://github.com/", "http://github.com/"];

/// Turn whatever the user typed or pasted into a bare account identifier
///
/// `https://github.com/octocat` and `  octocat  ` both become `octocat`.
/// Input without a known prefix comes back trimmed and otherwise unchanged.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    let bare = PROFILE_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(|rest| rest.trim_end_matches('/'))
        .unwrap_or(trimmed);

    bare.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_https_prefix() {
        assert_eq!(normalize("https://github.com/octocat"), "octocat");
    }

    #[test]
    fn test_strips_http_prefix_and_trailing_slash() {
        assert_eq!(normalize("http://github.com/rust-lang/"), "rust-lang");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  octocat  "), "octocat");
        assert_eq!(normalize("\thttps://github.com/octocat \n"), "octocat");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("https://github.com/"), "");
    }

    #[test]
    fn test_other_hosts_untouched() {
        assert_eq!(
            normalize("https://gitlab.com/octocat"),
            "https://gitlab.com/octocat"
        );
    }
}
