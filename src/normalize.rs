//! SCM URL normalization
//!
//! Rewrites connection strings found in package metadata (`scm:git:`,
//! `git@host:owner/repo`, `scm:hg:http://...`) into plain `https://` URLs.
//! Pure string transform; `normalize(normalize(x)) == normalize(x)`.

const SCM_GIT_PREFIX: &str = "scm:git:";
const SCM_HG_PREFIX: &str = "scm:hg:";
const SSH_PREFIX: &str = "git@";

/// Normalize an SCM URL into canonical HTTPS form
pub fn normalize(scm_url: &str) -> String {
    let mut url = scm_url.trim().to_string();

    // `scm:hg:` comes from old Bitbucket Mercurial projects
    while let Some(rest) = url
        .strip_prefix(SCM_GIT_PREFIX)
        .or_else(|| url.strip_prefix(SCM_HG_PREFIX))
    {
        url = rest.trim().to_string();
    }

    // git@host:owner/repo -> https://host/owner/repo
    if let Some(rest) = url.strip_prefix(SSH_PREFIX) {
        url = format!("https://{}", rest.replacen(':', "/", 1));
    }

    if let Some(rest) = url.strip_prefix("http://") {
        url = format!("https://{}", rest);
    } else if let Some(rest) = url.strip_prefix("https///") {
        url = format!("https://{}", rest);
    }

    collapse_slash_runs(&url).trim().to_string()
}

/// Collapse every run of three or more slashes into a single slash
fn collapse_slash_runs(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    let mut run = 0;

    for c in url.chars() {
        if c == '/' {
            run += 1;
            continue;
        }
        push_run(&mut result, run);
        run = 0;
        result.push(c);
    }
    push_run(&mut result, run);

    result
}

fn push_run(result: &mut String, run: usize) {
    match run {
        0 => {}
        1 | 2 => result.push_str(&"/".repeat(run)),
        _ => result.push('/'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("git@github.com:o/r.git", "https://github.com/o/r.git")]
    #[case("scm:git:https://github.com/o/r", "https://github.com/o/r")]
    #[case("scm:git:git@github.com:o/r.git", "https://github.com/o/r.git")]
    #[case("scm:hg:http://bitbucket.org/o/r", "https://bitbucket.org/o/r")]
    #[case("http://github.com/o/r", "https://github.com/o/r")]
    #[case("https///github.com/o/r", "https://github.com/o/r")]
    #[case("https://github.com///o/r", "https://github.com/o/r")]
    #[case("  https://gitlab.com/o/r  ", "https://gitlab.com/o/r")]
    #[case("scm:git:git://github.com/o/r.git", "git://github.com/o/r.git")]
    #[case("https://github.com/o/r", "https://github.com/o/r")]
    #[case("scm:git: http://github.com/o/r", "https://github.com/o/r")]
    #[case("scm:hg:git@bitbucket.org:o/r", "https://bitbucket.org/o/r")]
    fn normalize_returns_expected(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[rstest]
    #[case("git@github.com:o/r.git")]
    #[case("scm:git:https://github.com/o/r")]
    #[case("scm:hg:http://bitbucket.org/o/r")]
    #[case("scm:git:git@gitlab.com:group/sub/r.git")]
    #[case("https///github.com////o/r")]
    #[case("http://bitbucket.org/o/r/")]
    #[case("scm:git: http://github.com/o/r")]
    #[case("scm:hg:git@bitbucket.org:o/r")]
    fn normalize_is_idempotent(#[case] input: &str) {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn collapse_slash_runs_keeps_scheme_separator() {
        assert_eq!(collapse_slash_runs("https://a////b/c"), "https://a/b/c");
    }
}
