// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Debounced actions - coalesce bursts of triggers into one execution

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

/// Runs an async action once a burst of triggers has gone quiet
///
/// Every [`trigger`](Self::trigger) restarts the delay. When the delay elapses
/// without a new trigger, the action runs with the most recent value.
/// Dropping the debouncer cancels a pending run; [`flush`](Self::flush) runs
/// it immediately instead.
pub struct Debouncer<T> {
    tx: Option<mpsc::UnboundedSender<T>>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce worker on the current tokio runtime
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let worker = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                let mut coalesced = 0usize;
                let closed = loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => {
                                pending = value;
                                coalesced += 1;
                            }
                            None => break true,
                        },
                        () = tokio::time::sleep(delay) => break false,
                    }
                };

                trace!("Debounce window closed after {} coalesced triggers", coalesced);
                action(pending).await;

                if closed {
                    return;
                }
            }
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Schedule the action with `value`, restarting the delay
    pub fn trigger(&self, value: T) {
        let sent = self.tx.as_ref().is_some_and(|tx| tx.send(value).is_ok());
        if !sent {
            warn!("Debounce worker has stopped; trigger ignored");
        }
    }

    /// Run any pending action now and wait for the worker to finish
    pub async fn flush(mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            if let Err(e) = worker.await {
                warn!("Debounce worker failed: {}", e);
            }
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<AtomicUsize>, Arc<Mutex<Vec<u32>>>) {
        (Arc::new(AtomicUsize::new(0)), Arc::new(Mutex::new(Vec::new())))
    }

    fn debouncer(
        delay: Duration,
        calls: &Arc<AtomicUsize>,
        seen: &Arc<Mutex<Vec<u32>>>,
    ) -> Debouncer<u32> {
        let calls = Arc::clone(calls);
        let seen = Arc::clone(seen);
        Debouncer::new(delay, move |value| {
            let calls = Arc::clone(&calls);
            let seen = Arc::clone(&seen);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(value);
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once_with_last_value() {
        let (calls, seen) = recorder();
        let debouncer = debouncer(Duration::from_millis(150), &calls, &seen);

        for i in 1..=5 {
            debouncer.trigger(i);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_run_separately() {
        let (calls, seen) = recorder();
        let debouncer = debouncer(Duration::from_millis(150), &calls, &seen);

        debouncer.trigger(1);
        debouncer.trigger(2);
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.trigger(3);
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_runs_before_delay() {
        let (calls, seen) = recorder();
        let debouncer = debouncer(Duration::from_millis(150), &calls, &seen);

        debouncer.trigger(1);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_runs_pending_action() {
        let (calls, seen) = recorder();
        let debouncer = debouncer(Duration::from_secs(60), &calls, &seen);

        debouncer.trigger(7);
        debouncer.flush().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_action() {
        let (calls, seen) = recorder();
        let debouncer = debouncer(Duration::from_millis(150), &calls, &seen);

        debouncer.trigger(1);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
