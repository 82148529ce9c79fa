//! Single ordered delivery path from every control surface to the endpoint.
//!
//! `dispatch` never blocks on the endpoint: it hands the action to a
//! dedicated delivery thread over a `crossbeam_channel`. That thread owns
//! the pending queue and the attached endpoint, so acceptance order is the
//! delivery order for every origin, and attach/detach are ordered with
//! respect to dispatches without any locking on the caller side.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::error::{RecBarError, RecBarResult, ResultExt};

use super::{Action, ActionBus, ActionKind, ActionOrigin, ControlEndpoint};

/// How long `flush` waits for the delivery thread to catch up
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Messages consumed by the delivery thread.
enum RouterMessage {
    Dispatch(Action),
    Attach(Arc<dyn ControlEndpoint>),
    Detach,
    Flush(Sender<()>),
    Shutdown,
}

/// Counters shared between the handle and the delivery thread.
#[derive(Debug, Default)]
struct RouterStats {
    pending: AtomicUsize,
    delivered: AtomicU64,
    attached: AtomicBool,
}

/// Cloneable handle to the router. Safe to use from any thread.
#[derive(Clone)]
pub struct ActionRouter {
    tx: Sender<RouterMessage>,
    bus: Arc<ActionBus>,
    stats: Arc<RouterStats>,
    /// Set once by `shutdown`; senders hold the read side while sending
    closed: Arc<RwLock<bool>>,
    worker: Arc<Mutex<Option<JoinHandle<Vec<Action>>>>>,
}

impl ActionRouter {
    /// Spawn the delivery thread with no endpoint attached.
    pub fn new(bus: Arc<ActionBus>) -> RecBarResult<Self> {
        let (tx, rx) = unbounded::<RouterMessage>();
        let stats = Arc::new(RouterStats::default());

        let worker_bus = Arc::clone(&bus);
        let worker_stats = Arc::clone(&stats);
        let handle = std::thread::Builder::new()
            .name("recbar-router".to_string())
            .spawn(move || run_delivery_loop(rx, worker_bus, worker_stats))
            .context("failed to spawn router thread")?;

        Ok(Self {
            tx,
            bus,
            stats,
            closed: Arc::new(RwLock::new(false)),
            worker: Arc::new(Mutex::new(Some(handle))),
        })
    }

    /// Accept one user intent. Returns immediately.
    ///
    /// With no endpoint attached the action is queued and replayed, in
    /// order, on the next attach.
    pub fn dispatch(&self, action: Action) -> RecBarResult<()> {
        log::debug!(
            "[ROUTER] Dispatch {} from {} ({})",
            action.kind,
            action.origin,
            action.id
        );
        self.send(RouterMessage::Dispatch(action))
    }

    /// Dispatch by wire name. Unknown names are rejected and never queued.
    pub fn dispatch_named(&self, origin: ActionOrigin, name: &str) -> RecBarResult<()> {
        match name.parse::<ActionKind>() {
            Ok(kind) => self.dispatch(Action::new(kind, origin)),
            Err(e) => {
                log::warn!("[ROUTER] Ignoring action from {}: {}", origin, e);
                Err(e)
            },
        }
    }

    /// Make `endpoint` the delivery target and replay anything pending.
    pub fn attach(&self, endpoint: Arc<dyn ControlEndpoint>) -> RecBarResult<()> {
        log::info!("[ROUTER] Attaching endpoint '{}'", endpoint.name());
        self.send(RouterMessage::Attach(endpoint))
    }

    /// Stop delivering; subsequent actions queue until the next attach.
    pub fn detach(&self) -> RecBarResult<()> {
        log::info!("[ROUTER] Detaching endpoint");
        self.send(RouterMessage::Detach)
    }

    /// Block until every message sent before this call has been processed.
    pub fn flush(&self) -> RecBarResult<()> {
        let (ack_tx, ack_rx) = bounded::<()>(1);
        self.send(RouterMessage::Flush(ack_tx))?;
        ack_rx
            .recv_timeout(FLUSH_TIMEOUT)
            .context("router flush did not complete")
    }

    /// Stop the delivery thread after it drains its inbox.
    ///
    /// Every later call on any clone fails with `RouterClosed`. Actions
    /// still waiting for an endpoint are returned undelivered, in order.
    /// Only the first call returns them.
    pub fn shutdown(&self) -> Vec<Action> {
        {
            let mut closed = self.closed.write();
            if !*closed {
                *closed = true;
                let _ = self.tx.send(RouterMessage::Shutdown);
            }
        }
        let Some(handle) = self.worker.lock().take() else {
            return Vec::new();
        };
        match handle.join() {
            Ok(undelivered) => undelivered,
            Err(_) => {
                log::error!("[ROUTER] Delivery thread panicked");
                Vec::new()
            },
        }
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Actions accepted but not yet delivered
    pub fn pending_count(&self) -> usize {
        self.stats.pending.load(Ordering::Acquire)
    }

    pub fn delivered_count(&self) -> u64 {
        self.stats.delivered.load(Ordering::Acquire)
    }

    pub fn is_attached(&self) -> bool {
        self.stats.attached.load(Ordering::Acquire)
    }

    pub fn bus(&self) -> &Arc<ActionBus> {
        &self.bus
    }

    fn send(&self, msg: RouterMessage) -> RecBarResult<()> {
        // Holding the read side orders this send before any Shutdown.
        let closed = self.closed.read();
        if *closed {
            return Err(RecBarError::RouterClosed);
        }
        self.tx.send(msg).map_err(|_| RecBarError::RouterClosed)
    }
}

fn run_delivery_loop(
    rx: Receiver<RouterMessage>,
    bus: Arc<ActionBus>,
    stats: Arc<RouterStats>,
) -> Vec<Action> {
    let mut endpoint: Option<Arc<dyn ControlEndpoint>> = None;
    let mut pending: VecDeque<Action> = VecDeque::new();

    for msg in rx.iter() {
        match msg {
            RouterMessage::Dispatch(action) => {
                bus.publish(&action);
                pending.push_back(action);
                drain(&mut endpoint, &mut pending, &stats);
            },
            RouterMessage::Attach(ep) => {
                if !pending.is_empty() {
                    log::info!(
                        "[ROUTER] Replaying {} queued action(s) to '{}'",
                        pending.len(),
                        ep.name()
                    );
                }
                endpoint = Some(ep);
                drain(&mut endpoint, &mut pending, &stats);
            },
            RouterMessage::Detach => {
                endpoint = None;
            },
            RouterMessage::Flush(ack) => {
                let _ = ack.send(());
            },
            RouterMessage::Shutdown => break,
        }
        stats.pending.store(pending.len(), Ordering::Release);
        stats.attached.store(endpoint.is_some(), Ordering::Release);
    }

    // Anything still in the inbox was accepted before the close.
    for msg in rx.try_iter() {
        match msg {
            RouterMessage::Dispatch(action) => {
                bus.publish(&action);
                pending.push_back(action);
            },
            RouterMessage::Flush(ack) => {
                let _ = ack.send(());
            },
            RouterMessage::Attach(_) | RouterMessage::Detach | RouterMessage::Shutdown => {},
        }
    }

    stats.attached.store(false, Ordering::Release);
    stats.pending.store(pending.len(), Ordering::Release);
    if !pending.is_empty() {
        log::warn!(
            "[ROUTER] Shut down with {} undelivered action(s)",
            pending.len()
        );
    }
    log::debug!("[ROUTER] Delivery thread exited");
    pending.into()
}

/// Deliver from the head of the queue until it is empty or delivery fails.
fn drain(
    endpoint: &mut Option<Arc<dyn ControlEndpoint>>,
    pending: &mut VecDeque<Action>,
    stats: &RouterStats,
) {
    while let Some(ep) = endpoint.as_ref().map(Arc::clone) {
        let Some(action) = pending.pop_front() else {
            break;
        };
        let result = panic::catch_unwind(AssertUnwindSafe(|| ep.deliver(&action)))
            .unwrap_or_else(|_| {
                Err(RecBarError::Delivery(format!("endpoint '{}' panicked", ep.name())))
            });
        match result {
            Ok(()) => {
                stats.delivered.fetch_add(1, Ordering::AcqRel);
            },
            Err(e) => {
                log::warn!(
                    "[ROUTER] '{}' rejected {} ({}): {}; detaching until next attach",
                    ep.name(),
                    action.kind,
                    action.id,
                    e
                );
                pending.push_front(action);
                *endpoint = None;
            },
        }
    }
}
