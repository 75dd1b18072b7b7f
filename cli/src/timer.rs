use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Whole-tick counter for one round, advanced by a background thread.
///
/// Every timer owns its own counter. Stopping or dropping it joins the thread, so nothing from a
/// finished round keeps counting.
#[derive(Debug)]
pub(crate) struct RoundTimer {
    elapsed: Arc<AtomicU64>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RoundTimer {
    pub(crate) const TICK: Duration = Duration::from_secs(1);

    pub(crate) fn start() -> io::Result<Self> {
        Self::with_tick(Self::TICK)
    }

    pub(crate) fn with_tick(tick: Duration) -> io::Result<Self> {
        let elapsed = Arc::new(AtomicU64::new(0));
        let (stop, stopped) = mpsc::channel::<()>();

        let counter = Arc::clone(&elapsed);
        let handle = thread::Builder::new()
            .name("round-timer".into())
            .spawn(move || {
                // Any message or a dropped sender ends the loop.
                while let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(tick) {
                    counter.fetch_add(1, Ordering::Relaxed);
                }
            })?;
        log::trace!("Round timer started, tick {:?}", tick);

        Ok(Self {
            elapsed,
            stop: Some(stop),
            handle: Some(handle),
        })
    }

    pub(crate) fn elapsed_secs(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    /// Freeze the counter and return its final value.
    pub(crate) fn stop(mut self) -> u64 {
        self.shutdown();
        self.elapsed_secs()
    }

    fn shutdown(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("Round timer thread panicked");
            }
            log::trace!("Round timer stopped at {}", self.elapsed_secs());
        }
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks_and_freezes_on_stop() {
        let timer = RoundTimer::with_tick(Duration::from_millis(5)).unwrap();
        thread::sleep(Duration::from_millis(100));
        let frozen = timer.stop();
        assert!(frozen > 0);
    }

    #[test]
    fn each_timer_starts_from_zero() {
        let first = RoundTimer::with_tick(Duration::from_millis(1)).unwrap();
        thread::sleep(Duration::from_millis(20));
        drop(first);

        let second = RoundTimer::with_tick(Duration::from_secs(60)).unwrap();
        assert_eq!(second.elapsed_secs(), 0);
        assert_eq!(second.stop(), 0);
    }
}
