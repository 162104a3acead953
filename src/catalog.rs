//! In-memory option catalog used by the demo application.
//!
//! Searches are case-insensitive substring matches on label and value. A
//! configurable latency and failure trigger make the loading and error
//! states easy to see.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{AppError, Result};
use crate::selector::{FetchError, FetchFuture, OptionSource, QueryState, SelectOption};

/// Maximum number of options returned per search.
const DEFAULT_LIMIT: usize = 20;

/// Languages offered when no catalog file is given.
const BUILTIN: &[(&str, &str)] = &[
    ("rust", "Rust"),
    ("go", "Go"),
    ("zig", "Zig"),
    ("c", "C"),
    ("cpp", "C++"),
    ("csharp", "C#"),
    ("java", "Java"),
    ("kotlin", "Kotlin"),
    ("scala", "Scala"),
    ("clojure", "Clojure"),
    ("haskell", "Haskell"),
    ("ocaml", "OCaml"),
    ("fsharp", "F#"),
    ("elixir", "Elixir"),
    ("erlang", "Erlang"),
    ("gleam", "Gleam"),
    ("python", "Python"),
    ("ruby", "Ruby"),
    ("perl", "Perl"),
    ("php", "PHP"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("swift", "Swift"),
    ("objc", "Objective-C"),
    ("dart", "Dart"),
    ("lua", "Lua"),
    ("julia", "Julia"),
    ("nim", "Nim"),
    ("crystal", "Crystal"),
    ("racket", "Racket"),
];

/// Shown but not selectable.
const BUILTIN_RETIRED: &[(&str, &str)] = &[("cobol", "COBOL"), ("fortran77", "FORTRAN 77")];

/// A searchable set of options.
#[derive(Debug, Clone)]
pub struct Catalog {
    options: Arc<Vec<SelectOption>>,
    latency: Duration,
    /// Queries containing this text fail.
    fail_on: Option<String>,
    limit: usize,
}

impl Catalog {
    /// Create a catalog over the given options.
    pub fn from_options(options: Vec<SelectOption>) -> Self {
        Self {
            options: Arc::new(options),
            latency: Duration::ZERO,
            fail_on: None,
            limit: DEFAULT_LIMIT,
        }
    }

    /// The built-in language catalog.
    pub fn builtin() -> Self {
        let options = BUILTIN
            .iter()
            .map(|(value, label)| SelectOption::new(*value, *label))
            .chain(
                BUILTIN_RETIRED
                    .iter()
                    .map(|(value, label)| SelectOption::new(*value, *label).disabled()),
            )
            .collect();
        Self::from_options(options)
    }

    /// Load a catalog from a JSON array of options.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let options: Vec<SelectOption> =
            serde_json::from_str(&contents).map_err(|e| AppError::catalog(e.to_string()))?;
        debug!(path = %path.display(), options = options.len(), "Loaded catalog");
        Ok(Self::from_options(options))
    }

    /// Delay every search by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every search whose query contains `trigger`.
    pub fn with_failure_trigger(mut self, trigger: Option<String>) -> Self {
        self.fail_on = trigger.filter(|t| !t.is_empty());
        self
    }

    /// Number of options in the catalog.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Options matching `query`, in catalog order.
    pub fn search(&self, query: &str) -> Vec<SelectOption> {
        let needle = query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|option| {
                needle.is_empty()
                    || option.label.to_lowercase().contains(&needle)
                    || option.value.to_lowercase().contains(&needle)
            })
            .take(self.limit)
            .cloned()
            .collect()
    }

    fn should_fail(&self, query: &str) -> bool {
        self.fail_on
            .as_deref()
            .map(|trigger| query.contains(trigger))
            .unwrap_or(false)
    }
}

impl OptionSource for Catalog {
    fn fetch(&self, query: QueryState) -> FetchFuture {
        let latency = self.latency;
        let failed = self.should_fail(&query.input_value);
        let options = self.search(&query.input_value);
        debug!(query = %query.input_value, matches = options.len(), failed, "Catalog search");

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            if failed {
                return Err(FetchError::new(format!(
                    "Catalog unavailable for \"{}\"",
                    query.input_value
                )));
            }
            Ok(options)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_has_disabled_entries() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), BUILTIN.len() + BUILTIN_RETIRED.len());
        assert!(catalog.search("cobol")[0].disabled);
        assert!(!catalog.search("rust")[0].disabled);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let results = catalog.search("SCRIPT");
        let values: Vec<&str> = results.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["javascript", "typescript"]);
    }

    #[test]
    fn test_search_matches_value() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search("cpp")[0].label, "C++");
    }

    #[test]
    fn test_empty_query_is_limited() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search("").len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_search_no_matches() {
        assert!(Catalog::builtin().search("qqqq").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_trigger() {
        let catalog = Catalog::builtin().with_failure_trigger(Some("!".to_string()));

        let err = catalog.fetch(QueryState::new("ru!")).await.unwrap_err();
        assert!(err.message().contains("ru!"));

        let options = catalog.fetch(QueryState::new("ru")).await.unwrap();
        assert!(options.iter().any(|o| o.value == "rust"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_latency() {
        let catalog = Catalog::builtin().with_latency(Duration::from_millis(200));
        let start = tokio::time::Instant::now();
        catalog.fetch(QueryState::new("go")).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn test_empty_failure_trigger_is_ignored() {
        let catalog = Catalog::builtin().with_failure_trigger(Some(String::new()));
        assert!(!catalog.should_fail("anything"));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"label": "Alpha", "value": "a"}, {"label": "Beta", "value": "b", "disabled": true}]"#,
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.search("beta")[0].disabled);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let err = Catalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
