use super::SessionHandle;
use crate::telemetry::{PathSample, TelemetryRecord};

/// Receives tracker output. Calls for one session never overlap.
pub trait TelemetryObserver: Send + Sync {
    fn on_path(&self, _session: &SessionHandle, _path: &PathSample) {}

    fn on_telemetry(&self, session: &SessionHandle, telemetry: &TelemetryRecord);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl TelemetryObserver for LogObserver {
    fn on_path(&self, session: &SessionHandle, path: &PathSample) {
        log::info!("Path for {} ready ({} points)", session.name, path.len());
    }

    fn on_telemetry(&self, session: &SessionHandle, t: &TelemetryRecord) {
        log::debug!(
            "{}: lat {:.4} lon {:.4} alt {:.2} km speed {:.3} km/s",
            session.name,
            t.latitude_deg,
            t.longitude_deg,
            t.altitude_km,
            t.speed_km_s
        );
    }
}
