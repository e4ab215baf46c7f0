//! Release page URL conventions per VCS host

use crate::vcs::VcsKind;

/// Kind of page a candidate URL points at, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CandidateKind {
    Release,
    Tag,
    CommitTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseUrlCandidate {
    pub url: String,
    pub kind: CandidateKind,
}

/// Build the candidate URLs for `version`, highest priority first
pub fn candidates(repo_url: &str, kind: VcsKind, version: &str) -> Vec<ReleaseUrlCandidate> {
    let repo_url = repo_url.trim_end_matches('/');
    let tag_path = match kind {
        VcsKind::GitLab => "-/tags",
        _ => "tags",
    };

    vec![
        ReleaseUrlCandidate {
            url: format!("{}/releases/tag/{}", repo_url, version),
            kind: CandidateKind::Release,
        },
        ReleaseUrlCandidate {
            url: format!("{}/{}/{}", repo_url, tag_path, version),
            kind: CandidateKind::Tag,
        },
        ReleaseUrlCandidate {
            url: format!("{}/commits/tag/{}", repo_url, version),
            kind: CandidateKind::CommitTag,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_for_github_follow_priority_order() {
        let result = candidates("https://github.com/o/r/", VcsKind::GitHub, "1.2.3");

        assert_eq!(
            result,
            vec![
                ReleaseUrlCandidate {
                    url: "https://github.com/o/r/releases/tag/1.2.3".to_string(),
                    kind: CandidateKind::Release,
                },
                ReleaseUrlCandidate {
                    url: "https://github.com/o/r/tags/1.2.3".to_string(),
                    kind: CandidateKind::Tag,
                },
                ReleaseUrlCandidate {
                    url: "https://github.com/o/r/commits/tag/1.2.3".to_string(),
                    kind: CandidateKind::CommitTag,
                },
            ]
        );
    }

    #[test]
    fn candidates_for_gitlab_use_dash_tag_route() {
        let result = candidates("https://gitlab.com/g/p", VcsKind::GitLab, "v2.0");

        assert_eq!(result[1].url, "https://gitlab.com/g/p/-/tags/v2.0");
        assert_eq!(result[1].kind, CandidateKind::Tag);
    }

    #[test]
    fn candidates_for_bitbucket_use_plain_tag_route() {
        let result = candidates("https://bitbucket.org/o/r", VcsKind::Bitbucket, "1.0");

        assert_eq!(result[1].url, "https://bitbucket.org/o/r/tags/1.0");
    }
}
