//! Per-city lookup counter and its Prometheus text exposition

use metrics::{Recorder, counter, describe_counter, with_local_recorder};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

pub const CITY_VIEWS_COUNTER: &str = "city_views_total";

/// Counts lookups per city for the scrape endpoint
pub trait CityCounter: Send + Sync {
    fn increment(&self, city: &str);

    /// Current samples in the Prometheus text format
    fn render(&self) -> String;
}

/// Counter backed by a recorder owned by this instance rather than the
/// process-global `metrics` recorder
pub struct PrometheusCityCounter {
    recorder: PrometheusRecorder,
    handle: PrometheusHandle,
}

impl PrometheusCityCounter {
    #[must_use]
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        with_local_recorder(&recorder as &dyn Recorder, || {
            describe_counter!(
                CITY_VIEWS_COUNTER,
                "Number of times each city has been looked at"
            );
        });
        Self { recorder, handle }
    }
}

impl Default for PrometheusCityCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl CityCounter for PrometheusCityCounter {
    fn increment(&self, city: &str) {
        with_local_recorder(&self.recorder as &dyn Recorder, || {
            counter!(CITY_VIEWS_COUNTER, "city" => city.to_string()).increment(1);
        });
    }

    fn render(&self) -> String {
        self.handle.render()
    }
}
