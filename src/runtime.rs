//! Threaded driver for one [`ActuatorSequencer`].
//!
//! Each device gets a dedicated worker thread.  The worker sleeps on an
//! `async-io-mini` reactor timer until the next absolute deadline, or until
//! the wake signal fires (new trigger, shutdown).  All access to the
//! sequencer goes through one mutex; the logical state is mirrored in an
//! atomic so `query_state()` never touches the lock.
//!
//! ```text
//!  caller thread                       worker thread
//!  ─────────────                       ─────────────
//!  trigger() ──lock──▶ A->1, schedule
//!            ──signal──────────────▶  wake ─┐
//!                                           ▼
//!  query_state() ◀── AtomicBool ◀──── service(now) ──lock──▶ due steps
//!                                           │
//!                                           ├──▶ observer (lock released)
//!                                           ▼
//!                                    Timer::at(next deadline) | wake
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::digital::{OutputPin, PinState};
use futures_lite::future;
use log::{error, info};

use crate::app::ports::{EventSink, StateObserver};
use crate::app::sequencer::{ActuatorSequencer, ServiceOutcome, TriggerOutcome};
use crate::error::InitError;

/// Worker stack size.  The worker only services steps and logs.
const WORKER_STACK_KB: usize = 32;

struct Inner<P> {
    sequencer: ActuatorSequencer<P>,
    sink: Box<dyn EventSink + Send>,
}

struct Shared<P> {
    inner: Mutex<Inner<P>>,
    active: AtomicBool,
    stopping: AtomicBool,
    wake: Signal<CriticalSectionRawMutex, ()>,
}

impl<P: OutputPin> Shared<P> {
    fn lock(&self) -> MutexGuard<'_, Inner<P>> {
        // Every step is a single write; a poisoned lock still guards a
        // consistent sequencer.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn trigger(&self, now: Instant) -> TriggerOutcome {
        let mut inner = self.lock();
        let Inner { sequencer, sink } = &mut *inner;
        let outcome = sequencer.trigger(now, &mut **sink);
        self.active.store(sequencer.is_active(), Ordering::Release);
        outcome
    }

    fn service(&self, now: Instant) -> ServiceOutcome {
        let mut inner = self.lock();
        let Inner { sequencer, sink } = &mut *inner;
        let outcome = sequencer.service(now, &mut **sink);
        self.active.store(sequencer.is_active(), Ordering::Release);
        outcome
    }

    fn shutdown(&self) {
        let mut inner = self.lock();
        let Inner { sequencer, sink } = &mut *inner;
        sequencer.shutdown(&mut **sink);
        self.active.store(false, Ordering::Release);
    }
}

/// Owner of a running sequencer and its worker thread.
///
/// Dropping the handle shuts the worker down; pending steps are cancelled
/// and both relays released before the lines are dropped.
pub struct SequencerHandle<P: OutputPin> {
    shared: Arc<Shared<P>>,
    worker: Option<JoinHandle<()>>,
}

impl<P: OutputPin + Send + 'static> SequencerHandle<P> {
    /// Move `sequencer` onto its own worker thread.
    pub fn spawn(
        sequencer: ActuatorSequencer<P>,
        observer: impl StateObserver + Send + 'static,
        sink: impl EventSink + Send + 'static,
    ) -> Result<Self, InitError> {
        let thread_name = format!("seq-{}", sequencer.name());
        let shared = Arc::new(Shared {
            active: AtomicBool::new(sequencer.is_active()),
            inner: Mutex::new(Inner {
                sequencer,
                sink: Box::new(sink),
            }),
            stopping: AtomicBool::new(false),
            wake: Signal::new(),
        });

        let worker = thread::Builder::new()
            .name(thread_name.clone())
            .stack_size(WORKER_STACK_KB * 1024)
            .spawn({
                let shared = shared.clone();
                move || run_worker(&shared, observer)
            })
            .map_err(|e| {
                error!("Spawning '{}' failed: {}", thread_name, e);
                InitError::WorkerSpawn
            })?;

        info!("Spawned '{}' (stack={}KB)", thread_name, WORKER_STACK_KB);
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }
}

impl<P: OutputPin> SequencerHandle<P> {
    /// Start the pulse sequence.  Returns once line A is asserted and the
    /// remaining steps are scheduled; never waits for them.
    pub fn trigger(&self) -> TriggerOutcome {
        let outcome = self.shared.trigger(Instant::now());
        if outcome == TriggerOutcome::Started {
            self.shared.wake.signal(());
        }
        outcome
    }

    /// Current logical state.  Lock-free.
    pub fn query_state(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Last confirmed levels of lines A and B.
    pub fn line_levels(&self) -> (PinState, PinState) {
        self.shared.lock().sequencer.line_levels()
    }

    /// Stop the worker, cancel pending steps and release both relays.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.shared.stopping.store(true, Ordering::Release);
        self.shared.wake.signal(());
        if worker.join().is_err() {
            error!("Sequencer worker panicked; releasing relays from caller");
            self.shared.shutdown();
        }
    }
}

impl<P: OutputPin> Drop for SequencerHandle<P> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker<P: OutputPin>(shared: &Shared<P>, mut observer: impl StateObserver) {
    future::block_on(async {
        loop {
            let outcome = shared.service(Instant::now());
            if let Some(is_active) = outcome.state_changed {
                observer.notify_state_changed(is_active);
            }

            if shared.stopping.load(Ordering::Acquire) {
                break;
            }

            match outcome.next_deadline {
                Some(deadline) => {
                    future::or(shared.wake.wait(), async {
                        async_io_mini::Timer::at(deadline).await;
                    })
                    .await;
                }
                None => shared.wake.wait().await,
            }
        }
    });

    shared.shutdown();
}
