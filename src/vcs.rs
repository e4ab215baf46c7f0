//! VCS hosts and canonical repository references

use serde::Serialize;

use crate::normalize::normalize;

/// VCS hosting service of a repository URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    GitHub,
    GitLab,
    Bitbucket,
    Unknown,
}

impl VcsKind {
    pub const KNOWN: [VcsKind; 3] = [VcsKind::GitHub, VcsKind::GitLab, VcsKind::Bitbucket];

    /// Host substring identifying this kind
    pub fn host(&self) -> Option<&'static str> {
        match self {
            VcsKind::GitHub => Some("github.com"),
            VcsKind::GitLab => Some("gitlab.com"),
            VcsKind::Bitbucket => Some("bitbucket.org"),
            VcsKind::Unknown => None,
        }
    }

    /// Detect the host by case-insensitive substring match
    pub fn detect(url: &str) -> VcsKind {
        let lower = url.to_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.host().is_some_and(|host| lower.contains(host)))
            .unwrap_or(VcsKind::Unknown)
    }

    pub fn is_known(&self) -> bool {
        *self != VcsKind::Unknown
    }
}

/// Returns true if the URL mentions one of the known VCS hosts
pub fn is_vcs_url(url: &str) -> bool {
    VcsKind::detect(url).is_known()
}

/// Characters that never appear in an owner or repository path
const PATH_TERMINATORS: &[char] = &['?', '#', '"', '\'', '<', '>', '(', ')', '*', '`'];

/// A repository on a known VCS host, in canonical `https://host/path` form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReference {
    pub url: String,
    pub kind: VcsKind,
}

impl RepoReference {
    /// Build a reference from any URL found in metadata or scraped from a page
    ///
    /// Returns `None` for unknown hosts and for URLs that do not name a
    /// repository (e.g. `https://github.com/sponsors`).
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        let kind = VcsKind::detect(&normalized);
        let host = kind.host()?;

        let start = normalized.to_ascii_lowercase().find(host)? + host.len();
        let path = normalized[start..].trim_start_matches([':', '/']);
        // Markup or prose around a URL found in free text ends the path
        let path = path
            .split(|c: char| c.is_whitespace() || PATH_TERMINATORS.contains(&c))
            .next()
            .unwrap_or(path);

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match kind {
            // Subgroups are allowed; `/-/` starts GitLab's UI routes
            VcsKind::GitLab => {
                if let Some(marker) = segments.iter().position(|s| *s == "-") {
                    segments.truncate(marker);
                }
            }
            _ => segments.truncate(2),
        }

        if segments.len() < 2 {
            return None;
        }

        let last = segments.len() - 1;
        segments[last] = segments[last].strip_suffix(".git").unwrap_or(segments[last]);
        if segments[last].is_empty() {
            return None;
        }

        Some(Self {
            url: format!("https://{}/{}", host, segments.join("/")),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://github.com/o/r", VcsKind::GitHub)]
    #[case("HTTPS://GitHub.com/o/r", VcsKind::GitHub)]
    #[case("git@gitlab.com:o/r.git", VcsKind::GitLab)]
    #[case("https://bitbucket.org/o/r", VcsKind::Bitbucket)]
    #[case("https://sourceforge.net/projects/r", VcsKind::Unknown)]
    #[case("https://bitbucket.com/o/r", VcsKind::Unknown)]
    fn detect_returns_expected(#[case] url: &str, #[case] expected: VcsKind) {
        assert_eq!(VcsKind::detect(url), expected);
    }

    #[rstest]
    #[case("git+https://github.com/lodash/lodash.git", "https://github.com/lodash/lodash")]
    #[case("https://github.com/psf/requests/issues", "https://github.com/psf/requests")]
    #[case("git://github.com/o/r.git", "https://github.com/o/r")]
    #[case("scm:git:git@github.com:o/r.git", "https://github.com/o/r")]
    #[case("https://github.com/o/r/", "https://github.com/o/r")]
    #[case("https://github.com/o/r?tab=readme", "https://github.com/o/r")]
    #[case(
        "https://gitlab.com/group/sub/r/-/tree/main",
        "https://gitlab.com/group/sub/r"
    )]
    #[case("scm:hg:http://bitbucket.org/o/r", "https://bitbucket.org/o/r")]
    #[case(r#"https://github.com/psf/black"><img src="logo.png">"#, "https://github.com/psf/black")]
    #[case("https://github.com/o/r'>docs</a>", "https://github.com/o/r")]
    #[case("https://gitlab.com/group/r<br>", "https://gitlab.com/group/r")]
    fn parse_canonicalizes_repository_url(#[case] raw: &str, #[case] expected: &str) {
        let reference = RepoReference::parse(raw).unwrap();
        assert_eq!(reference.url, expected);
    }

    #[rstest]
    #[case("https://example.com/o/r")]
    #[case("https://github.com/sponsors")]
    #[case("https://github.com/")]
    #[case("https://gitlab.com/o/-/issues")]
    fn parse_rejects_non_repository_urls(#[case] raw: &str) {
        assert_eq!(RepoReference::parse(raw), None);
    }
}
