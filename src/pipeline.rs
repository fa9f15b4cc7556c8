//! Digest driver: each source is read, decoded and correlated on its own
//! worker; the resulting contributions are folded into one aggregator in
//! source order.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::aggregate::{Aggregator, Contribution};
use crate::config::DigestConfig;
use crate::correlate::Correlator;
use crate::error::{DigestError, DigestResult};
use crate::logline::parse_event_line;
use crate::payload::decode;
use crate::source::{collect_sources, prune, LineStats, SourceReport, SourceStatus};
use crate::store::EventStore;

#[derive(Debug, Clone)]
pub struct SourceDigest {
    pub report: SourceReport,
    pub contributions: Vec<Contribution>,
}

#[derive(Debug, Clone)]
pub struct DigestOutcome {
    pub aggregator: Aggregator,
    pub reports: Vec<SourceReport>,
}

impl DigestOutcome {
    pub fn prunable(&self) -> impl Iterator<Item = &SourceReport> + '_ {
        self.reports.iter().filter(|r| r.status.is_prunable())
    }
}

/// Tokenizes and decodes every line; undecodable records are counted and skipped.
pub fn digest_text(text: &str) -> (EventStore, LineStats) {
    let mut store = EventStore::new();
    let mut stats = LineStats::default();
    for (n, line) in text.lines().enumerate() {
        stats.lines += 1;
        let Some(event) = parse_event_line(line) else {
            continue;
        };
        if !event.kind.is_tracked() {
            continue;
        }
        stats.events += 1;
        match decode(&event) {
            Ok(Some(decoded)) => {
                stats.decoded += 1;
                store.insert(decoded);
            }
            Ok(None) => {}
            Err(e) => {
                stats.rejected += 1;
                log::debug!("line {}: {} rejected: {}", n + 1, event.kind, e);
            }
        }
    }
    (store, stats)
}

pub fn correlate(store: &EventStore, config: &DigestConfig) -> Vec<Contribution> {
    Correlator::new(store, config.metric.strategy())
        .with_policy(config.policy)
        .contributions()
}

pub fn digest_source(path: &Path, config: &DigestConfig) -> DigestResult<SourceDigest> {
    let bytes = fs::read(path).map_err(|source| DigestError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let (mut report, contributions) = if bytes.is_empty() {
        (SourceReport::empty(path), Vec::new())
    } else {
        let text = String::from_utf8_lossy(&bytes);
        let (store, stats) = digest_text(&text);
        let status = if store.is_empty() {
            SourceStatus::NoUsableEvents
        } else {
            SourceStatus::Digested
        };
        let contributions = correlate(&store, config);
        let report = SourceReport {
            path: path.to_path_buf(),
            status,
            stats,
            actions: store.action_count(),
            settlements: store.settlement_count(),
            contributions: contributions.len(),
            pruned: false,
        };
        (report, contributions)
    };

    if report.status.is_prunable() {
        if config.prune_empty {
            log::warn!("deleting {} ({})", path.display(), report.status);
            match prune(path) {
                Ok(()) => report.pruned = true,
                Err(e) => log::warn!("{}", e),
            }
        } else {
            log::warn!("{}: {}", path.display(), report.status);
        }
    } else {
        log::debug!(
            "{}: {} actions, {} settlements, {} correlated, {} rejected",
            path.display(),
            report.actions,
            report.settlements,
            report.contributions,
            report.stats.rejected,
        );
    }

    Ok(SourceDigest {
        report,
        contributions,
    })
}

fn digest_all(sources: &[std::path::PathBuf], config: &DigestConfig) -> DigestResult<Vec<SourceDigest>> {
    sources
        .par_iter()
        .map(|path| digest_source(path, config))
        .collect()
}

pub fn run(config: &DigestConfig) -> DigestResult<DigestOutcome> {
    let start = Instant::now();
    let sources = collect_sources(&config.paths)?;
    log::info!("digesting {} log files ({} metric)", sources.len(), config.metric);

    let digests = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(|| digest_all(&sources, config))?,
        None => digest_all(&sources, config)?,
    };

    // Single owner of the buckets; source order keeps the fold deterministic.
    let mut aggregator = if config.dedup {
        Aggregator::with_dedup()
    } else {
        Aggregator::new()
    };
    let mut reports = Vec::with_capacity(digests.len());
    let mut accepted = 0;
    for digest in digests {
        accepted += aggregator.absorb(digest.contributions);
        reports.push(digest.report);
    }

    log::info!(
        "{} contributions into {} buckets in {:.1}s",
        accepted,
        aggregator.len(),
        start.elapsed().as_secs_f64(),
    );

    Ok(DigestOutcome { aggregator, reports })
}
