//! # Poller
//!
//! Samples a gamepad at a fixed rate, converts each sample, and writes the
//! resulting state to a [`StateSink`].
//!
//! A failed sample (a pad briefly unplugged, a read interrupted) skips the
//! frame. The first failure after a good sample is logged at `warn`, repeats
//! at `debug`, and recovery at `info`. A failed write ends the loop, since
//! nobody is listening anymore.

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::input::GamepadSource;
use crate::mapping::ControllerLayout;
use crate::output::StateSink;

/// Number of frames between status log messages
const LOG_INTERVAL_FRAMES: u64 = 300;

/// Drives sampling, conversion and output.
pub struct Poller<S, W: Write> {
    source: S,
    layout: Arc<ControllerLayout>,
    sink: StateSink<W>,
    frames_sampled: u64,
    samples_failed: u64,
    failing_since: Option<u64>,
    outages: u64,
}

impl<S: GamepadSource, W: Write> Poller<S, W> {
    pub fn new(source: S, layout: Arc<ControllerLayout>, sink: StateSink<W>) -> Self {
        Self {
            source,
            layout,
            sink,
            frames_sampled: 0,
            samples_failed: 0,
            failing_since: None,
            outages: 0,
        }
    }

    /// Samples, converts and emits one frame.
    ///
    /// Returns `Ok(true)` if a line was written, `Ok(false)` if the frame was
    /// skipped (unchanged or unreadable).
    ///
    /// # Errors
    ///
    /// Returns an error only when writing to the sink fails.
    pub fn tick(&mut self) -> Result<bool> {
        let raw = match self.source.sample() {
            Ok(raw) => raw,
            Err(e) => {
                if self.failing_since.is_none() {
                    warn!("Failed to sample gamepad, skipping frames until it recovers: {}", e);
                    self.failing_since = Some(self.samples_failed);
                    self.outages += 1;
                } else {
                    debug!("Failed to sample gamepad: {}", e);
                }
                self.samples_failed += 1;
                return Ok(false);
            }
        };
        self.frames_sampled += 1;

        if let Some(first_failed) = self.failing_since.take() {
            info!(
                "Gamepad readable again after {} failed samples",
                self.samples_failed - first_failed
            );
        }

        let state = self.layout.convert(&raw);
        self.sink.emit(self.layout.target(), &state)
    }

    /// Ticks at `rate_hz` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns the first sink write error.
    pub async fn run<F>(&mut self, rate_hz: u32, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let period = Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Polling gamepad at {}Hz", rate_hz);

        tokio::pin!(shutdown);
        let mut last_log_count: u64 = 0;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick()?;

                    if self.frames_sampled - last_log_count >= LOG_INTERVAL_FRAMES {
                        debug!(
                            "Sampled {} frames, wrote {}, {} failed samples",
                            self.frames_sampled,
                            self.sink.frames_written(),
                            self.samples_failed
                        );
                        last_log_count = self.frames_sampled;
                    }
                }

                _ = &mut shutdown => {
                    info!(
                        "Stopping after {} frames ({} written)",
                        self.frames_sampled,
                        self.sink.frames_written()
                    );
                    break;
                }
            }
        }

        Ok(())
    }

    /// Frames successfully sampled so far.
    pub fn frames_sampled(&self) -> u64 {
        self.frames_sampled
    }

    /// Samples that failed so far.
    pub fn samples_failed(&self) -> u64 {
        self.samples_failed
    }

    /// Times sampling went from working to failing.
    pub fn outages(&self) -> u64 {
        self.outages
    }

    /// Whether the most recent sample failed.
    pub fn is_failing(&self) -> bool {
        self.failing_since.is_some()
    }

    pub fn sink(&self) -> &StateSink<W> {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GamepadViewerError;
    use crate::input::{MockGamepadSource, RawButton, RawInputState};
    use std::io;

    fn sample(a_pressed: bool) -> RawInputState {
        RawInputState::new(vec![RawButton::digital(a_pressed)], vec![0.0; 4])
    }

    fn poller(source: MockGamepadSource, only_changes: bool) -> Poller<MockGamepadSource, Vec<u8>> {
        Poller::new(
            source,
            Arc::new(ControllerLayout::xbox()),
            StateSink::new(Vec::new(), only_changes),
        )
    }

    fn written_lines(poller: &Poller<MockGamepadSource, Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(poller.sink().get_ref().clone())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_tick_converts_and_writes() {
        let mut source = MockGamepadSource::new();
        source.expect_sample().times(1).returning(|| Ok(sample(true)));

        let mut poller = poller(source, false);
        assert!(poller.tick().unwrap());

        let lines = written_lines(&poller);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["buttons"]["A"], true);
        assert_eq!(lines[0]["target"], "xbox");
        assert_eq!(poller.frames_sampled(), 1);
    }

    #[test]
    fn test_tick_skips_failed_sample() {
        let mut source = MockGamepadSource::new();
        source
            .expect_sample()
            .times(1)
            .returning(|| Err(GamepadViewerError::Controller("unplugged".to_string())));

        let mut poller = poller(source, false);
        assert!(!poller.tick().unwrap());
        assert_eq!(poller.samples_failed(), 1);
        assert_eq!(poller.frames_sampled(), 0);
        assert!(written_lines(&poller).is_empty());
    }

    #[test]
    fn test_outage_counted_once_until_recovery() {
        let mut source = MockGamepadSource::new();
        let mut calls = 0;
        source.expect_sample().times(6).returning(move || {
            calls += 1;
            match calls {
                2 | 3 | 4 | 6 => Err(GamepadViewerError::Controller("unplugged".to_string())),
                _ => Ok(sample(false)),
            }
        });

        let mut poller = poller(source, false);
        assert!(poller.tick().unwrap());
        assert!(!poller.is_failing());

        for _ in 0..3 {
            assert!(!poller.tick().unwrap());
        }
        assert!(poller.is_failing());
        assert_eq!(poller.outages(), 1);

        assert!(poller.tick().unwrap());
        assert!(!poller.is_failing());

        assert!(!poller.tick().unwrap());
        assert_eq!(poller.outages(), 2);
        assert_eq!(poller.samples_failed(), 4);
        assert_eq!(poller.frames_sampled(), 2);
    }

    #[test]
    fn test_tick_only_changes() {
        let mut source = MockGamepadSource::new();
        let mut calls = 0;
        source.expect_sample().times(3).returning(move || {
            calls += 1;
            Ok(sample(calls == 3))
        });

        let mut poller = poller(source, true);
        assert!(poller.tick().unwrap());
        assert!(!poller.tick().unwrap());
        assert!(poller.tick().unwrap());
        assert_eq!(written_lines(&poller).len(), 2);
    }

    #[test]
    fn test_tick_propagates_write_error() {
        struct BrokenPipe;

        impl Write for BrokenPipe {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut source = MockGamepadSource::new();
        source.expect_sample().returning(|| Ok(sample(false)));

        let mut poller = Poller::new(
            source,
            Arc::new(ControllerLayout::xbox()),
            StateSink::new(BrokenPipe, false),
        );
        assert!(poller.tick().is_err());
    }

    #[test]
    fn test_run_until_shutdown() {
        let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
        let mut stop_tx = Some(stop_tx);

        let mut source = MockGamepadSource::new();
        let mut calls = 0;
        source.expect_sample().returning(move || {
            calls += 1;
            if calls == 3 {
                if let Some(tx) = stop_tx.take() {
                    let _ = tx.send(());
                }
            }
            Ok(sample(calls % 2 == 0))
        });

        let mut poller = poller(source, false);
        tokio_test::block_on(poller.run(1000, async {
            let _ = stop_rx.await;
        }))
        .unwrap();

        assert!(poller.frames_sampled() >= 3);
        assert_eq!(written_lines(&poller).len() as u64, poller.frames_sampled());
    }
}
