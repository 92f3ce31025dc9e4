// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Arrival selection notifications between flight search and destination panels

use crate::types::Airport;
use tokio::sync::broadcast;
use tracing::debug;

/// Default number of buffered notifications per subscriber
pub const DEFAULT_CAPACITY: usize = 16;

/// A flight search succeeded and this is the arrival airport
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalSelected {
    /// Resolved arrival airport
    pub airport: Airport,
}

/// Publisher side of the arrival channel
#[derive(Debug, Clone)]
pub struct ArrivalEvents {
    tx: broadcast::Sender<ArrivalSelected>,
}

impl Default for ArrivalEvents {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ArrivalEvents {
    /// Create a channel buffering `capacity` notifications per subscriber
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Notify all subscribers; returns how many received it
    pub fn publish(&self, airport: Airport) -> usize {
        match self.tx.send(ArrivalSelected { airport }) {
            Ok(n) => n,
            Err(_) => {
                debug!("Arrival selected with no subscribers");
                0
            }
        }
    }

    /// Start receiving notifications published from now on
    #[must_use]
    pub fn subscribe(&self) -> ArrivalReceiver {
        ArrivalReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Subscriber side of the arrival channel
#[derive(Debug)]
pub struct ArrivalReceiver {
    rx: broadcast::Receiver<ArrivalSelected>,
}

impl ArrivalReceiver {
    /// Wait for the next notification; `None` once every publisher is gone
    ///
    /// A subscriber that fell behind skips the notifications it missed.
    pub async fn next(&mut self) -> Option<ArrivalSelected> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!("Arrival subscriber skipped {} notifications", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next notification if one is already queued
    pub fn try_next(&mut self) -> Option<ArrivalSelected> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let events = ArrivalEvents::default();
        assert_eq!(events.publish(Airport::new("Zürich", "ZRH")), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let events = ArrivalEvents::default();
        let mut a = events.subscribe();
        let mut b = events.subscribe();

        assert_eq!(events.publish(Airport::new("Zürich", "ZRH")), 2);

        assert_eq!(a.next().await.unwrap().airport.code, "ZRH");
        assert_eq!(b.next().await.unwrap().airport.code, "ZRH");
    }

    #[tokio::test]
    async fn test_closed_when_publisher_dropped() {
        let events = ArrivalEvents::default();
        let mut rx = events.subscribe();
        drop(events);
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_lagging_subscriber_keeps_newest() {
        let events = ArrivalEvents::new(2);
        let mut rx = events.subscribe();

        for code in ["AAA", "BBB", "CCC", "DDD"] {
            events.publish(Airport::new(code, code));
        }

        assert_eq!(rx.next().await.unwrap().airport.code, "CCC");
        assert_eq!(rx.next().await.unwrap().airport.code, "DDD");
        assert!(rx.try_next().is_none());
    }
}
