use std::path::PathBuf;

use clap::ValueEnum;

use crate::correlate::MatchPolicy;
use crate::metric::MetricKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Table,
}

/// Everything one digest run needs.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub paths: Vec<PathBuf>,
    pub metric: MetricKind,
    pub policy: MatchPolicy,
    /// Collapse each situation to its best action; `false` dumps every bucket.
    pub collapse: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    /// Delete sources that are empty or carry no usable events.
    pub prune_empty: bool,
    /// Count each action timestamp at most once across sources.
    pub dedup: bool,
    /// Worker threads for digesting sources; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        DigestConfig {
            paths: Vec::new(),
            metric: MetricKind::default(),
            policy: MatchPolicy::default(),
            collapse: true,
            format: OutputFormat::default(),
            output: None,
            prune_empty: false,
            dedup: true,
            threads: None,
        }
    }
}

impl DigestConfig {
    pub fn with_paths<P: Into<PathBuf>>(paths: impl IntoIterator<Item = P>) -> DigestConfig {
        DigestConfig {
            paths: paths.into_iter().map(Into::into).collect(),
            ..DigestConfig::default()
        }
    }
}
