//! Pull-based live refresh
//!
//! A background thread calls [`Dashboard::view`] immediately and then once
//! per interval, handing each result to a callback. The store has no push
//! mechanism; every viewer polls on its own schedule.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use crate::dashboard::{Dashboard, DashboardView, ViewOptions};
use crate::error::Result;

/// Handle to a running refresh loop. Dropping it stops the loop.
pub struct RefreshLoop {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshLoop {
    /// Start polling `dashboard` every `interval`.
    ///
    /// The callback may return `ControlFlow::Break(())` to end the loop.
    pub fn spawn<F>(dashboard: Dashboard, options: ViewOptions, interval: Duration, mut on_view: F) -> Self
    where
        F: FnMut(Result<DashboardView>) -> ControlFlow<()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut ticks: u64 = 0;
            loop {
                let view = dashboard.view(&options);
                if let Err(err) = &view {
                    warn!(%err, "refresh failed");
                }
                ticks += 1;
                if on_view(view).is_break() {
                    break;
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested or handle dropped
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!(ticks, "refresh loop stopped");
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Stop the loop and wait for the current tick to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Block until the callback ends the loop.
    ///
    /// Returns `false` if the loop thread panicked.
    pub fn wait(mut self) -> bool {
        self.handle.take().map_or(true, join)
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            join(handle);
        }
    }
}

fn join(handle: JoinHandle<()>) -> bool {
    match handle.join() {
        Ok(()) => true,
        Err(_) => {
            warn!("refresh loop panicked");
            false
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use impoll_store::SqliteValueStore;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(SqliteValueStore::open_in_memory().unwrap()))
    }

    #[test]
    fn test_loop_sees_new_submissions() {
        let dash = dashboard();
        let (tx, rx) = mpsc::channel();
        let refresh = RefreshLoop::spawn(
            dash.clone(),
            ViewOptions::default(),
            Duration::from_millis(10),
            move |view| {
                let total = view.map(|v| v.total).unwrap_or(usize::MAX);
                if tx.send(total).is_err() {
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            },
        );

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 0);
        dash.submit_value(3.0).unwrap();

        let saw_value = (0..500)
            .filter_map(|_| rx.recv_timeout(Duration::from_secs(5)).ok())
            .any(|total| total == 1);
        assert!(saw_value);
        refresh.stop();
    }

    #[test]
    fn test_callback_can_end_loop() {
        let mut calls = 0;
        let (tx, rx) = mpsc::channel();
        let refresh = RefreshLoop::spawn(
            dashboard(),
            ViewOptions::default(),
            Duration::from_millis(1),
            move |_| {
                calls += 1;
                let _ = tx.send(calls);
                if calls == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );
        assert!(refresh.wait());
        assert_eq!(rx.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_panicking_callback_is_reported() {
        let refresh = RefreshLoop::spawn(
            dashboard(),
            ViewOptions::default(),
            Duration::from_millis(1),
            |_| panic!("renderer crashed"),
        );
        assert!(!refresh.wait());
    }

    #[test]
    fn test_drop_stops_long_interval_loop() {
        let refresh = RefreshLoop::spawn(
            dashboard(),
            ViewOptions::default(),
            Duration::from_secs(3600),
            |_| ControlFlow::Continue(()),
        );
        // Returns promptly instead of waiting out the hour
        drop(refresh);
    }
}
