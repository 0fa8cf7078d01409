//! Simulated system telemetry
//!
//! Response time is measured by the caller. CPU, memory and connection
//! counts are synthetic.

use std::time::Duration;

use rand::Rng;

use super::types::NewSystemMetrics;

const CPU_RANGE: (f64, f64) = (15.0, 45.0);
const MEMORY_RANGE: (f64, f64) = (40.0, 70.0);
const CONNECTION_RANGE: (u32, u32) = (1, 50);

/// Build a metrics sample for one handled request
pub fn simulated_sample(elapsed: Duration) -> NewSystemMetrics {
    let mut rng = rand::thread_rng();
    NewSystemMetrics {
        cpu_usage: rng.gen_range(CPU_RANGE.0..CPU_RANGE.1),
        memory_usage: rng.gen_range(MEMORY_RANGE.0..MEMORY_RANGE.1),
        response_time: elapsed.as_secs_f64(),
        active_connections: rng.gen_range(CONNECTION_RANGE.0..=CONNECTION_RANGE.1),
    }
}
