use regex::Regex;

/// Glob-style path denylist.
///
/// `*` matches any run of characters, `/` included; everything else is
/// literal. Patterns are anchored at both ends, so `/checkout` excludes only
/// `/checkout` while `/admin/*` excludes everything below `/admin/`.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    patterns: Vec<Regex>,
}

impl ExcludeMatcher {
    pub fn new<S: AsRef<str>>(globs: &[S]) -> Result<Self, regex::Error> {
        let patterns = globs
            .iter()
            .map(|glob| Regex::new(&glob_to_regex(glob.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

fn glob_to_regex(glob: &str) -> String {
    let body = glob
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    format!("^{}$", body)
}
