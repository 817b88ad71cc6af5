pub mod event;
pub mod reconcile;
pub mod shared;

use crate::error::BrokerError;
use reconcile::Reconciler;
use shared::{BrokerState, Shared};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tucano_integration::collection::ClearableLifoQueue;
use tucano_model::Position;

fn generate_request_id() -> String {
    use rand::Rng;
    let value: u32 = rand::rng().random();
    format!("{value:08x}")
}

/// Observer (§4.5): forever reads one desired snapshot from the candidate queue — itself a
/// coalescing LIFO queue, per §3's "Positions flow from synthesiser to broker via a LIFO queue
/// with coalescing" — transitions `Idle -> Provisioning` or sets `E` if already `Provisioning`,
/// then pushes onto `Q₂`. Infallible except for cancellation — it never inspects the
/// reconciliation outcome.
async fn run_observer(candidates: Arc<ClearableLifoQueue<Position>>, shared: Arc<Shared>) {
    loop {
        let desired = candidates.pop().await;
        {
            let mut state = shared.state.lock().await;
            match *state {
                BrokerState::Idle => *state = BrokerState::Provisioning,
                BrokerState::Provisioning => shared.event.set(),
            }
        }
        shared.newest.push(desired).await;
    }
}

/// Trader (§4.5): forever reads the freshest `Q₂` entry, clears the rest, and runs one
/// reconciliation under a fresh request id. Returns (ending the task) only when a
/// reconciliation fails — the restarter is responsible for replacing it.
async fn run_trader(shared: Arc<Shared>, reconciler: Arc<Reconciler>) -> BrokerError {
    loop {
        let desired = shared.newest.pop().await;
        shared.newest.clear().await;
        let request_id = generate_request_id();

        let outcome = reconciler
            .reconcile(&shared, &request_id, &desired)
            .instrument(tracing::info_span!("trader", request_id = %request_id))
            .await;

        *shared.state.lock().await = BrokerState::Idle;

        if let Err(error) = outcome {
            return error;
        }
    }
}

fn spawn_trader(shared: Arc<Shared>, reconciler: Arc<Reconciler>) -> JoinHandle<BrokerError> {
    tokio::spawn(run_trader(shared, reconciler))
}

/// Restarter (§4.5): forever waits for `E`, then under the exclusive region `S` cancels the
/// current trader task and spawns its replacement. The only task that clears `E`.
async fn run_restarter(shared: Arc<Shared>, reconciler: Arc<Reconciler>, trader: Arc<Mutex<JoinHandle<BrokerError>>>) {
    loop {
        shared.event.wait().await;
        let _exclusive = shared.exclusive.lock().await;

        let mut handle = trader.lock().await;
        handle.abort();
        *handle = spawn_trader(Arc::clone(&shared), Arc::clone(&reconciler));
        drop(handle);

        shared.restart_count.fetch_add(1, Ordering::SeqCst);
        shared.event.reset();
    }
}

/// Owns the observer/trader/restarter trio and the state they share. Dropping this does not
/// stop the tasks — call [`Supervisor::shutdown`] for a clean teardown.
pub struct Supervisor {
    shared: Arc<Shared>,
    observer: JoinHandle<()>,
    restarter: JoinHandle<()>,
    trader: Arc<Mutex<JoinHandle<BrokerError>>>,
}

impl Supervisor {
    pub fn spawn(reconciler: Reconciler, candidates: Arc<ClearableLifoQueue<Position>>) -> Self {
        let shared = Shared::new();
        let reconciler = Arc::new(reconciler);

        let trader = Arc::new(Mutex::new(spawn_trader(Arc::clone(&shared), Arc::clone(&reconciler))));
        let observer = tokio::spawn(run_observer(candidates, Arc::clone(&shared)));
        let restarter = tokio::spawn(run_restarter(Arc::clone(&shared), reconciler, Arc::clone(&trader)));

        Self {
            shared,
            observer,
            restarter,
            trader,
        }
    }

    /// Number of times the restarter has replaced the trader task (introspection only, §4.5).
    pub fn restart_count(&self) -> usize {
        self.shared.restart_count()
    }

    pub async fn shutdown(self) {
        self.observer.abort();
        self.restarter.abort();
        self.trader.lock().await.abort();
    }
}
