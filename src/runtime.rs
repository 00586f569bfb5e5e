use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::events::HostEvent;

/// Unified event type consumed by the overlay loop
#[derive(Clone, Debug)]
pub enum OverlayEvent {
    Key(KeyEvent),
    Host(HostEvent),
    Resize,
    Tick,
}

/// Source of overlay events (keyboard, host messages, resize)
pub trait OverlayEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<OverlayEvent, RecvTimeoutError>;
}

/// Production event source using crossterm. Host events are injected through
/// the same channel as key presses, so the two are totally ordered and a key
/// arriving after a cancellation is seen after it.
pub struct CrosstermEventSource {
    tx: Sender<OverlayEvent>,
    rx: Receiver<OverlayEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        let key_tx = tx.clone();
        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(OverlayEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(OverlayEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    /// Sender for the host side of the transport; clone per producer.
    pub fn host_sender(&self) -> Sender<OverlayEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<OverlayEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<OverlayEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<OverlayEvent>) -> Self {
        Self { rx }
    }
}

impl OverlayEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<OverlayEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the overlay one event/tick at a time
pub struct Runner<E: OverlayEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: OverlayEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Tick interval, exposed so callers can derive the advance delta.
    pub fn tick_interval(&self) -> Duration {
        self.ticker.interval()
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> OverlayEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                OverlayEvent::Tick
            }
        }
    }
}
