//! Background scheduled tasks.
//!
//! Call `spawn_all` once during startup.

use crate::services::GenerationService;
use chrono::Utc;

/// Spawn all background tasks. Detaches via `tokio::spawn`; does not block.
pub fn spawn_all(generation_service: GenerationService, interval_secs: u64) {
    // benefit generation cycle; a covered period makes the run a no-op
    {
        let svc = generation_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run_generation_cycle(Utc::now()).await {
                    Ok(report) => log::info!(
                        "Generation cycle {:?}: {} activated, {} leveled, {} skipped, {} failed",
                        report.status,
                        report.activated_benefits,
                        report.leveling.leveled,
                        report.leveling.skipped,
                        report.leveling.failed
                    ),
                    Err(e) => log::error!("Generation cycle aborted: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(interval_secs)).await;
            }
        });
    }
}
