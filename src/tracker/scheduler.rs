use chrono::Duration;
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use utoipa::ToSchema;
use uuid::Uuid;

const MIN_PERIOD: std::time::Duration = std::time::Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, strum_macros::Display)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Debug)]
struct WorkerHandle {
    session_id: Uuid,
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Drives a recurring tick for at most one session at a time.
///
/// `stop` waits for the worker task to exit, so once it returns no further
/// tick can run. Dropping the scheduler closes the stop channel, which also
/// ends the worker.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    worker: Option<WorkerHandle>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SchedulerState {
        match self.worker {
            Some(_) => SchedulerState::Running,
            None => SchedulerState::Stopped,
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.worker.as_ref().map(|w| w.session_id)
    }

    /// Starts ticking for `session_id`, first tick immediately.
    pub async fn start<F>(&mut self, session_id: Uuid, interval: Duration, on_tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        if let Some(previous) = self.session_id() {
            log::info!("Session {} superseded by {}", previous, session_id);
            self.stop().await;
        }

        let period = interval
            .to_std()
            .map(|d| d.max(MIN_PERIOD))
            .unwrap_or(MIN_PERIOD);
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_ticks(period, stop_rx, on_tick));

        log::debug!("Update worker for session {} armed ({:?})", session_id, period);
        self.worker = Some(WorkerHandle {
            session_id,
            stop_tx,
            join,
        });
    }

    pub async fn stop(&mut self) -> bool {
        let Some(WorkerHandle {
            session_id,
            stop_tx,
            join,
        }) = self.worker.take()
        else {
            return false;
        };

        let _ = stop_tx.send(());
        if let Err(e) = join.await {
            log::error!("Update worker for session {} failed: {}", session_id, e);
        }
        log::debug!("Update worker for session {} stopped", session_id);
        true
    }
}

async fn run_ticks<F>(period: std::time::Duration, mut stop_rx: oneshot::Receiver<()>, mut on_tick: F)
where
    F: FnMut(),
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            // A dropped sender ends the worker too.
            _ = &mut stop_rx => break,
            _ = ticker.tick() => on_tick(),
        }
    }
}
