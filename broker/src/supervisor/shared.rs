use super::event::ManualResetEvent;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tucano_integration::collection::ClearableLifoQueue;
use tucano_model::Position;

/// The broker's two-state machine (§4.5). `Idle` means no reconciliation is in flight;
/// `Provisioning` means the trader is (or is about to be) reconciling a desired snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerState {
    Idle,
    Provisioning,
}

/// Everything the observer, trader and restarter tasks share: the state machine, the
/// manual-reset event `E`, the semaphore `S` guarding restarter-cancel and trader phase 3, and
/// the coalescing `newest` queue `Q₂`. Ownership stays with the supervisor; only these fields
/// cross task boundaries.
#[derive(Debug)]
pub struct Shared {
    pub state: Mutex<BrokerState>,
    pub event: ManualResetEvent,
    /// Guards the two mutually exclusive regions: the restarter's cancel-and-replace sequence,
    /// and the trader's phase-3 order-submission loop.
    pub exclusive: Mutex<()>,
    pub newest: Arc<ClearableLifoQueue<Position>>,
    pub restart_count: AtomicUsize,
}

impl Shared {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(BrokerState::Idle),
            event: ManualResetEvent::new(),
            exclusive: Mutex::new(()),
            newest: ClearableLifoQueue::new(),
            restart_count: AtomicUsize::new(0),
        })
    }

    pub fn restart_count(&self) -> usize {
        self.restart_count.load(Ordering::SeqCst)
    }
}
