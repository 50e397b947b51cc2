use crate::sync::sync_job::SyncJob;
use std::thread;
use std::time::Duration;

/// Decides when the next cycle starts.
pub trait Schedule {
    /// Blocks until the next cycle is due. `false` stops the loop.
    fn wait(&mut self) -> bool;
}

pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Schedule for FixedInterval {
    fn wait(&mut self) -> bool {
        log::info!("Next sync in {} seconds", self.interval.as_secs());

        thread::sleep(self.interval);

        true
    }
}

/// Runs full cycles back to back, waiting on `schedule` after each one.
/// Returns the number of completed cycles once the schedule stops.
pub fn run(job: &SyncJob, schedule: &mut dyn Schedule) -> usize {
    let mut cycles = 0;

    loop {
        job.execute();
        cycles += 1;

        if !schedule.wait() {
            return cycles;
        }
    }
}
