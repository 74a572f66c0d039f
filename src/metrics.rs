//! Run statistics for the insurance cost predictor.

use crate::models::inference::PredictionResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Metrics collector for prediction runs
pub struct PredictionMetrics {
    /// Predictions completed
    pub predictions_served: AtomicU64,
    /// Applicants rejected or predictions that failed
    pub failures: AtomicU64,
    /// Prediction times (in microseconds)
    prediction_times: RwLock<Vec<u64>>,
    /// Relative disagreement between the two models per prediction
    model_spreads: RwLock<Vec<f64>>,
    /// Sum of averaged predictions, for the mean quoted cost
    average_cost_sum: RwLock<f64>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PredictionMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            predictions_served: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            prediction_times: RwLock::new(Vec::with_capacity(64)),
            model_spreads: RwLock::new(Vec::with_capacity(64)),
            average_cost_sum: RwLock::new(0.0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed prediction
    pub fn record_prediction(&self, elapsed: Duration, result: &PredictionResult) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);

        if let Ok(mut times) = self.prediction_times.write() {
            times.push(elapsed.as_micros() as u64);
            // Keep only last 10000 for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }

        if let Ok(mut spreads) = self.model_spreads.write() {
            spreads.push(model_spread(result.random_forest, result.gradient_boosting));
            if spreads.len() > 10000 {
                spreads.drain(0..5000);
            }
        }

        if let Ok(mut sum) = self.average_cost_sum.write() {
            *sum += result.average;
        }
    }

    /// Record a rejected applicant or failed prediction
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get prediction time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let mut sorted: Vec<u64> = match self.prediction_times.read() {
            Ok(times) => times.clone(),
            Err(_) => return ProcessingStats::default(),
        };
        if sorted.is_empty() {
            return ProcessingStats::default();
        }
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[((count as f64 * 0.95) as usize).min(count - 1)],
            max_us: sorted[count - 1],
        }
    }

    /// Average relative spread between the two models (0 = identical)
    pub fn get_avg_spread(&self) -> f64 {
        match self.model_spreads.read() {
            Ok(spreads) if !spreads.is_empty() => {
                spreads.iter().sum::<f64>() / spreads.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Mean of the averaged predictions served so far
    pub fn get_mean_quoted_cost(&self) -> f64 {
        let served = self.predictions_served.load(Ordering::Relaxed);
        if served == 0 {
            return 0.0;
        }
        self.average_cost_sum
            .read()
            .map(|sum| *sum / served as f64)
            .unwrap_or(0.0)
    }

    /// Get current throughput (predictions per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.predictions_served.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        let served = self.predictions_served.load(Ordering::Relaxed);
        let failures = self.failures.load(Ordering::Relaxed);
        let processing = self.get_processing_stats();

        info!(
            predictions = served,
            failures = failures,
            throughput = format!("{:.1}/s", self.get_throughput()),
            mean_quoted_cost = format!("{:.2}", self.get_mean_quoted_cost()),
            "Prediction run summary"
        );
        info!(
            mean_us = processing.mean_us,
            p50_us = processing.p50_us,
            p95_us = processing.p95_us,
            max_us = processing.max_us,
            model_spread = format!("{:.1}%", self.get_avg_spread() * 100.0),
            "Prediction latency"
        );
    }
}

impl Default for PredictionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative disagreement `|a - b| / max(|a|, |b|)`, zero when both are zero
pub fn model_spread(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub max_us: u64,
}
