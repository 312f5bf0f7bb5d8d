//! `watch` command - keep in-memory notebook mirrors reconciled with disk.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::config::Config;
use crate::host::MirrorHost;
use crate::logger::status_clear;
use crate::reload::poller::Poller;

pub fn run(paths: &[PathBuf], interval: Option<u64>, config: &Config) -> Result<()> {
    let mut watch = config.watch.clone();
    if let Some(ms) = interval {
        watch.polling_interval_ms = ms;
        watch.clamp_with_hints();
    }

    if !watch.enabled {
        crate::log!("watch"; "watching is disabled in {}", config.config_path.display());
        return Ok(());
    }

    // Ctrl+C stops the timer; an in-flight reload is allowed to finish.
    let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .map_err(|err| anyhow!("failed to set Ctrl+C handler: {}", err))?;

    // One task drives everything; reconciliation is sequential by
    // construction.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut host = MirrorHost::new();
        for path in paths {
            host.open(path.clone())
                .await
                .with_context(|| format!("cannot watch {}", path.display()))?;
        }

        crate::log!("watch"; "watching {} notebook{} (interval {}ms)",
            host.len(),
            if host.len() == 1 { "" } else { "s" },
            watch.polling_interval_ms);

        Poller::new(host, watch.suppression_window())
            .run(watch.polling_interval(), shutdown_rx)
            .await;

        status_clear();
        crate::log!("watch"; "stopped");
        Ok(())
    })
}
