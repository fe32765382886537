use prometheus::{Histogram, HistogramOpts, IntCounter, Registry};
use std::time::Duration;

use crate::transformer::{DeobfuscationError, TransformOutput};

pub struct Metrics {
    pub transforms_total: IntCounter,
    pub transform_failures_total: IntCounter,
    pub transform_timeouts_total: IntCounter,
    pub identifiers_renamed_total: IntCounter,
    pub numbers_renamed_total: IntCounter,
    pub transform_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let transforms_total = IntCounter::new("transforms_total", "Number of transform requests")?;
        let transform_failures_total =
            IntCounter::new("transform_failures_total", "Transforms that ended in an error")?;
        let transform_timeouts_total =
            IntCounter::new("transform_timeouts_total", "Transforms abandoned after the timeout")?;
        let identifiers_renamed_total =
            IntCounter::new("identifiers_renamed_total", "Identifiers given a new name")?;
        let numbers_renamed_total =
            IntCounter::new("numbers_renamed_total", "Numeric literals replaced")?;
        let transform_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "transform_duration_seconds",
            "Wall time of a transform including the timeout race",
        ))?;

        registry.register(Box::new(transforms_total.clone()))?;
        registry.register(Box::new(transform_failures_total.clone()))?;
        registry.register(Box::new(transform_timeouts_total.clone()))?;
        registry.register(Box::new(identifiers_renamed_total.clone()))?;
        registry.register(Box::new(numbers_renamed_total.clone()))?;
        registry.register(Box::new(transform_duration_seconds.clone()))?;

        Ok(Self {
            transforms_total,
            transform_failures_total,
            transform_timeouts_total,
            identifiers_renamed_total,
            numbers_renamed_total,
            transform_duration_seconds,
        })
    }

    pub fn record(&self, result: &Result<TransformOutput, DeobfuscationError>, elapsed: Duration) {
        self.transforms_total.inc();
        self.transform_duration_seconds.observe(elapsed.as_secs_f64());
        match result {
            Ok(output) => {
                self.identifiers_renamed_total.inc_by(output.mappings.len() as u64);
                self.numbers_renamed_total.inc_by(output.numeric_mappings.len() as u64);
            }
            Err(DeobfuscationError::Timeout) => {
                self.transform_failures_total.inc();
                self.transform_timeouts_total.inc();
            }
            Err(_) => self.transform_failures_total.inc(),
        }
    }
}
