use serde::Serialize;

/// Paths staged for the next commit, relative to the repository root.
///
/// Built once per hook invocation from `git diff --cached`. Paths always use
/// `/` separators, exactly as git prints them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StagedFileSet {
    paths: Vec<String>,
}

impl StagedFileSet {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    /// Parses the NUL-separated output of `git diff --name-only -z`.
    pub fn from_nul_separated(raw: &str) -> Self {
        let paths = raw
            .split('\0')
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Self { paths }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FromIterator<String> for StagedFileSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
