//! # Trigger Filter Module
//!
//! This module decides whether the pipeline runs at all: a pull request
//! activates the matrix only when at least one of its changed paths
//! matches one of the declared glob patterns.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// A compiled set of activation patterns. The pattern set is fixed at
/// construction; there is no runtime mutation.
#[derive(Debug)]
pub struct PathFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl PathFilter {
    /// Compiles the given glob patterns into a filter. Patterns follow
    /// gitignore-style globbing, so `docker/**` covers everything below
    /// `docker/` and `requirements.txt` matches that exact file.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut stored = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid trigger pattern: '{}'", pattern))?;
            builder.add(glob);
            stored.push(pattern.to_string());
        }
        let set = builder.build().context("Failed to compile trigger patterns")?;
        Ok(Self { set, patterns: stored })
    }

    /// Whether a single changed path matches any activation pattern.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        self.set.is_match(path.as_ref())
    }

    /// Whether the pipeline should run for the given set of changed paths.
    /// An empty change set never triggers.
    pub fn should_trigger<P: AsRef<Path>>(&self, changed: &[P]) -> bool {
        changed.iter().any(|p| self.matches(p))
    }

    /// The first changed path that activates the pipeline, together with
    /// the pattern that matched it. Used for trigger diagnostics.
    pub fn first_match<'a, P: AsRef<Path>>(&self, changed: &'a [P]) -> Option<(&'a Path, &str)> {
        for path in changed {
            let path = path.as_ref();
            if let Some(idx) = self.set.matches(path).into_iter().next() {
                return Some((path, &self.patterns[idx]));
            }
        }
        None
    }

    /// The declared patterns, in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
