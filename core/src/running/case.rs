use std::path::PathBuf;

use serde::Deserialize;

/// One configured server/client run to be scored.
///
/// `name` is used for progress reporting only; uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestCase {
    pub name: String,

    /// Extra arguments appended to the server's base arguments.
    #[serde(default)]
    pub server_args: String,

    /// Extra arguments appended to the client's base arguments.
    #[serde(default)]
    pub client_args: String,

    /// Optional per-case config file, carried for the caller's benefit.
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Baseline score used for the relative-performance report and for the
    /// missing-score penalty.
    pub reference_score: f64,
}

impl TestCase {
    pub fn new(name: impl Into<String>, reference_score: f64) -> Self {
        Self {
            name: name.into(),
            server_args: String::new(),
            client_args: String::new(),
            config_file: None,
            reference_score,
        }
    }
}
