//! Polling change detector.
//!
//! One recurring timer drives all work: each tick checks the modification
//! signal of every open document and runs a reload cycle for the ones whose
//! signal advanced. Reload cycles are strictly sequential process-wide
//! (single-flight); documents changed while a cycle is in flight are picked
//! up by the next tick, never queued.
//!
//! The poller owns the only mutable shared state in the system: the
//! per-document signal baselines and the self-trigger suppression set. Both
//! live on the single scheduling task, so no lock is involved.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use crossbeam::channel::Receiver;
use rustc_hash::FxHashMap;

use crate::host::NotebookHost;
use crate::logger::status_unchanged;
use crate::reload::cycle::{ReloadError, ReloadOutcome, reload_cycle};

/// Cadence of the shutdown-signal check between ticks
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// What one tick did
#[derive(Debug, Default)]
pub struct TickSummary {
    /// Documents whose signal was checked (suppressed ones are skipped).
    pub checked: usize,
    /// Documents that received a replace-range edit.
    pub reloaded: usize,
    /// Documents whose reload cycle failed.
    pub failed: usize,
}

/// Polling change detector and reload driver
pub struct Poller<H> {
    host: H,
    suppression_window: Duration,
    /// Last observed modification signal per open document.
    signals: FxHashMap<PathBuf, SystemTime>,
    /// Documents inside their self-trigger suppression window.
    suppressed: FxHashMap<PathBuf, Instant>,
    /// Process-wide single-flight flag.
    in_flight: bool,
}

impl<H: NotebookHost> Poller<H> {
    pub fn new(host: H, suppression_window: Duration) -> Self {
        Self {
            host,
            suppression_window,
            signals: FxHashMap::default(),
            suppressed: FxHashMap::default(),
            in_flight: false,
        }
    }

    /// Run the poll loop until the shutdown channel fires.
    ///
    /// An in-flight reload is never interrupted; shutdown is observed
    /// between ticks only.
    pub async fn run(mut self, interval: Duration, shutdown: Receiver<()>) {
        let mut last_tick: Option<Instant> = None;

        loop {
            if shutdown.try_recv().is_ok() {
                crate::debug!("poll"; "shutdown signal received");
                break;
            }

            if last_tick.is_none_or(|t| t.elapsed() >= interval) {
                let summary = self.tick().await;
                last_tick = Some(Instant::now());

                if summary.checked > 0 && summary.reloaded == 0 && summary.failed == 0 {
                    status_unchanged(&format!(
                        "checked {} notebook{}",
                        summary.checked,
                        if summary.checked == 1 { "" } else { "s" }
                    ));
                }
            }

            tokio::time::sleep(SHUTDOWN_POLL).await;
        }
    }

    /// Check every open document once and reload the changed ones.
    pub async fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();

        if self.in_flight {
            return summary;
        }

        let open = self.host.open_documents();

        // Closed documents lose their baseline and suppression state.
        self.signals.retain(|doc, _| open.contains(doc));
        self.suppressed.retain(|doc, _| open.contains(doc));

        for doc in open {
            if self.is_suppressed(&doc) {
                continue;
            }
            summary.checked += 1;

            let signal = match self.host.stat(&doc).await {
                Ok(signal) => signal,
                Err(err) => {
                    // Transient; retried automatically next tick.
                    crate::debug!("poll"; "{}: stat failed: {}", doc.display(), err);
                    continue;
                }
            };

            let changed = match self.signals.get(&doc) {
                // First observation primes the baseline. The live content
                // is already current, so no reload.
                None => {
                    self.signals.insert(doc.clone(), signal);
                    false
                }
                Some(last) => *last != signal,
            };
            if !changed {
                continue;
            }

            self.in_flight = true;
            let outcome = reload_cycle(&mut self.host, &doc).await;
            self.in_flight = false;

            if outcome.commits_signal() {
                self.signals.insert(doc.clone(), signal);
            }
            if outcome.applied() {
                self.suppressed.insert(doc.clone(), Instant::now());
                summary.reloaded += 1;
            } else if matches!(outcome, ReloadOutcome::Failed(_)) {
                summary.failed += 1;
            }

            log_outcome(&doc, &outcome);
        }

        summary
    }

    fn is_suppressed(&mut self, doc: &Path) -> bool {
        match self.suppressed.get(doc) {
            Some(applied_at) if applied_at.elapsed() < self.suppression_window => true,
            Some(_) => {
                self.suppressed.remove(doc);
                false
            }
            None => false,
        }
    }
}

fn log_outcome(doc: &Path, outcome: &ReloadOutcome) {
    let name = doc
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.display().to_string());

    match outcome {
        ReloadOutcome::Applied { range, replaced } => {
            crate::log!("reload"; "{}: replaced cells [{}..{}) -> {} cells (ok)",
                name, range.start, range.old_end, replaced);
        }
        ReloadOutcome::Failed(ReloadError::Apply { range }) => {
            crate::log!("reload"; "{}: replaced cells [{}..{}) -> {} cells (FAIL)",
                name, range.start, range.old_end, range.inserted());
        }
        ReloadOutcome::Failed(err) => {
            crate::log!("error"; "{}: {}", name, err);
        }
        ReloadOutcome::Clean => {
            crate::debug!("reload"; "{}: no cell changes", name);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
