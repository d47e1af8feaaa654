use std::sync::{Arc, Mutex as StdMutex};

use serde::Serialize;

use super::error::TrackerError;
use super::observer::TelemetryObserver;
use super::scheduler::{SchedulerState, UpdateScheduler};
use super::session::{SessionHandle, TrackingSession};
use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::predict::Propagator;
use crate::telemetry::{PathPoint, PathSampler, TelemetryRecord, TelemetrySampler};
use crate::tle::OrbitalElementRecord;

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub enum TrackerMode {
    Idle,
    Running { session: SessionHandle },
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TrackerStatus {
    pub mode: TrackerMode,
    pub scheduler: SchedulerState,
    pub last_sample: Option<TelemetryRecord>,
    pub trajectory: Vec<PathPoint>,
    pub missed_ticks: u64,
}

#[derive(Debug, Default)]
struct Shared {
    session: Option<TrackingSession>,
}

pub struct Tracker {
    config: TrackerConfig,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn TelemetryObserver>,
    shared: Arc<StdMutex<Shared>>,
    scheduler: UpdateScheduler,
}

impl Tracker {
    pub fn new(
        config: TrackerConfig,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn TelemetryObserver>,
    ) -> Self {
        Self {
            config,
            clock,
            observer,
            shared: Arc::new(StdMutex::new(Shared::default())),
            scheduler: UpdateScheduler::new(),
        }
    }

    pub fn session(&self) -> Option<SessionHandle> {
        let locked = self.shared.lock().unwrap();
        locked.session.as_ref().map(|s| s.handle.clone())
    }

    pub fn status(&self) -> TrackerStatus {
        let locked = self.shared.lock().unwrap();
        match &locked.session {
            Some(session) => TrackerStatus {
                mode: TrackerMode::Running {
                    session: session.handle.clone(),
                },
                scheduler: self.scheduler.state(),
                last_sample: session.telemetry.clone(),
                trajectory: session.path.points.clone(),
                missed_ticks: session.missed_ticks,
            },
            None => TrackerStatus {
                mode: TrackerMode::Idle,
                scheduler: self.scheduler.state(),
                last_sample: None,
                trajectory: Vec::new(),
                missed_ticks: 0,
            },
        }
    }

    /// Parses `tle`, replaces any running session and starts periodic updates.
    ///
    /// On error the currently running session, if any, is left untouched.
    pub async fn start_tracking(&mut self, tle: &str) -> Result<SessionHandle, TrackerError> {
        let record = Arc::new(OrbitalElementRecord::parse(tle)?);
        let propagator = Arc::new(Propagator::new(
            record.clone(),
            self.config.max_epoch_offset,
        )?);

        if self.scheduler.stop().await {
            log::info!("Stopped previous session before loading {}", record.name());
        }

        let now = self.clock.now();
        let path = PathSampler::new(self.config.path).sample(&propagator, now);
        let handle = SessionHandle::new(&record, now);

        {
            let mut locked = self.shared.lock().unwrap();
            locked.session = Some(TrackingSession {
                handle: handle.clone(),
                record: record.clone(),
                telemetry: None,
                path: path.clone(),
                missed_ticks: 0,
            });
        }
        self.observer.on_path(&handle, &path);

        let tick = Tick {
            sampler: TelemetrySampler::new(propagator),
            clock: self.clock.clone(),
            observer: self.observer.clone(),
            shared: self.shared.clone(),
            handle: handle.clone(),
        };
        self.scheduler
            .start(handle.id, self.config.tick_interval, move || tick.run())
            .await;

        log::info!(
            "Tracking {} (NORAD {}), session {}, element epoch {}",
            handle.name,
            handle.catalog_id,
            handle.id,
            record.epoch()
        );
        Ok(handle)
    }

    pub async fn stop_tracking(&mut self, handle: &SessionHandle) -> bool {
        let current = self.session().map(|s| s.id);
        if current != Some(handle.id) {
            log::debug!("Ignoring stop for inactive session {}", handle.id);
            return false;
        }
        self.stop().await
    }

    pub async fn stop(&mut self) -> bool {
        let stopped = self.scheduler.stop().await;
        let session = self.shared.lock().unwrap().session.take();

        if let Some(session) = &session {
            log::info!(
                "Stopped tracking {} (session {})",
                session.handle.name,
                session.handle.id
            );
        }
        stopped || session.is_some()
    }
}

struct Tick {
    sampler: TelemetrySampler,
    clock: Arc<dyn Clock>,
    observer: Arc<dyn TelemetryObserver>,
    shared: Arc<StdMutex<Shared>>,
    handle: SessionHandle,
}

impl Tick {
    fn run(&self) {
        let now = self.clock.now();
        let result = self.sampler.sample(now);

        {
            let mut locked = self.shared.lock().unwrap();
            let Some(session) = locked
                .session
                .as_mut()
                .filter(|s| s.handle.id == self.handle.id)
            else {
                return;
            };

            match &result {
                Ok(telemetry) => session.telemetry = Some(telemetry.clone()),
                Err(e) => {
                    session.missed_ticks += 1;
                    log::warn!(
                        "No telemetry for {} at {} (keeping last sample): {}",
                        self.handle.name,
                        now,
                        e
                    );
                }
            }
        }

        if let Ok(telemetry) = result {
            self.observer.on_telemetry(&self.handle, &telemetry);
        }
    }
}
