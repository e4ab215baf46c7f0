//! npm repository extraction

use serde_json::Value;

use crate::extractor::{ReferenceExtractor, RepoSource};
use crate::package::Ecosystem;
use crate::registry::RegistryMetadata;

/// Extractor for npm version documents
///
/// Reads `repository.url` (or a bare `repository` string); the homepage is
/// only a fallback page.
pub struct NpmExtractor;

impl NpmExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Clean an npm repository URL: strip `git+` and `.git`, expand
    /// shorthands (`github:o/r`, `o/r`) and upgrade `git://`/`ssh://git@`
    pub fn clean_repository_url(raw: &str) -> String {
        let url = raw.trim();
        let url = url.strip_prefix("git+").unwrap_or(url);
        let url = url.strip_suffix(".git").unwrap_or(url);

        if let Some(rest) = url.strip_prefix("git://") {
            return format!("https://{}", rest);
        }
        if let Some(rest) = url.strip_prefix("ssh://git@") {
            return format!("https://{}", rest.replacen(':', "/", 1));
        }

        for (prefix, host) in [
            ("github:", "github.com"),
            ("gitlab:", "gitlab.com"),
            ("bitbucket:", "bitbucket.org"),
        ] {
            if let Some(path) = url.strip_prefix(prefix) {
                return format!("https://{}/{}", host, path);
            }
        }

        // `owner/repo` shorthand means GitHub
        if !url.contains(':') && url.split('/').filter(|s| !s.is_empty()).count() == 2 {
            return format!("https://github.com/{}", url);
        }

        url.to_string()
    }
}

impl Default for NpmExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceExtractor for NpmExtractor {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Npm
    }

    fn extract(&self, metadata: &RegistryMetadata) -> Vec<RepoSource> {
        let repository = match metadata.document.get("repository") {
            Some(Value::String(url)) => Some(url.as_str()),
            Some(Value::Object(_)) => metadata.str_at("/repository/url"),
            _ => None,
        };

        repository
            .map(Self::clean_repository_url)
            .and_then(|url| RepoSource::direct(&url))
            .into_iter()
            .collect()
    }

    fn fallback_pages(&self, metadata: &RegistryMetadata) -> Vec<String> {
        metadata
            .str_at("/homepage")
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("git+https://github.com/lodash/lodash.git", "https://github.com/lodash/lodash")]
    #[case("git://github.com/request/request.git", "https://github.com/request/request")]
    #[case("git+ssh://git@github.com/o/r.git", "https://github.com/o/r")]
    #[case("github:expressjs/express", "https://github.com/expressjs/express")]
    #[case("gitlab:group/project", "https://gitlab.com/group/project")]
    #[case("bitbucket:o/r", "https://bitbucket.org/o/r")]
    #[case("expressjs/express", "https://github.com/expressjs/express")]
    #[case("https://example.com/o/r", "https://example.com/o/r")]
    fn clean_repository_url_returns_expected(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(NpmExtractor::clean_repository_url(raw), expected);
    }

    #[test]
    fn extract_reads_repository_object() {
        let metadata = RegistryMetadata::new(
            "https://registry.npmjs.org/lodash/4.17.21",
            json!({"repository": {"type": "git", "url": "git+https://github.com/lodash/lodash.git"}}),
        );

        assert_eq!(
            NpmExtractor::new().extract(&metadata),
            vec![RepoSource::Direct("https://github.com/lodash/lodash".to_string())]
        );
    }

    #[test]
    fn extract_reads_repository_shorthand_string() {
        let metadata = RegistryMetadata::new(
            "https://registry.npmjs.org/x/1.0.0",
            json!({"repository": "github:o/r"}),
        );

        assert_eq!(
            NpmExtractor::new().extract(&metadata),
            vec![RepoSource::Direct("https://github.com/o/r".to_string())]
        );
    }

    #[test]
    fn extract_ignores_non_vcs_repository() {
        let metadata = RegistryMetadata::new(
            "https://registry.npmjs.org/x/1.0.0",
            json!({
                "repository": {"url": "https://git.example.com/o/r.git"},
                "homepage": "https://x.example.com"
            }),
        );
        let extractor = NpmExtractor::new();

        assert!(extractor.extract(&metadata).is_empty());
        assert_eq!(
            extractor.fallback_pages(&metadata),
            vec!["https://x.example.com".to_string()]
        );
    }
}
