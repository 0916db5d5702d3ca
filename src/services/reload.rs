// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Debounced reaction to realtime change events.
//!
//! The backend emits bursts of change events (one per changed row). Each
//! burst should trigger exactly one full reload, so events feed a
//! cancellable delayed task: every new event resets the quiet window, and
//! the reload runs once the window expires. Dropping the debouncer cancels
//! the pending reload.

use std::future::Future;
use std::time::Duration;

use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::models::ChangeEvent;

/// Coalesces change notifications into single reloads.
pub struct ReloadDebouncer {
    tx: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl ReloadDebouncer {
    /// Spawn the debounce task. `on_reload` runs once per quiet period.
    pub fn spawn<F, Fut>(window: Duration, mut on_reload: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();

        let task = tokio::spawn(async move {
            while rx.recv().await.is_some() {
                // An event arrived; wait for the window to go quiet.
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(window) => {
                            on_reload().await;
                            break;
                        }
                        more = rx.recv() => {
                            if more.is_none() {
                                // Sender gone mid-burst: nothing left to reload for.
                                return;
                            }
                            // Window resets.
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Record one upstream change event.
    pub fn notify(&self) {
        // Send only fails once the task is gone, which means shutdown.
        let _ = self.tx.send(());
    }
}

impl Drop for ReloadDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drain a realtime change feed into the debouncer.
///
/// Event payloads are only logged, never inspected: a change event means
/// "state moved, refetch", not "here is the new state".
pub async fn pump_events<S>(events: S, debouncer: &ReloadDebouncer)
where
    S: Stream<Item = ChangeEvent>,
{
    futures_util::pin_mut!(events);
    while let Some(event) = events.next().await {
        tracing::debug!(
            table = %event.table,
            kind = ?event.event_type,
            "Realtime change event"
        );
        debouncer.notify();
    }
    tracing::debug!("Realtime feed closed");
}
