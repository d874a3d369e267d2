//! Cooperative process scheduler
//!
//! Bookkeeping for spawned processes: the live set, processes spawned since
//! the last sweep, pending kill requests and statistics. The interpreter
//! drives it one tick at a time; see `Interpreter::tick`.

pub mod process;

pub use process::{Process, ProcessHandle, ProcessId, ProcessState};

use crate::frontend::core::parser::ast::RoutineDecl;
use crate::runtime::environment::Environment;
use tracing::debug;

/// Scheduler statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Ticks driven so far.
    pub ticks: u64,
    /// Processes ever spawned.
    pub spawned: u64,
    /// Processes finished or killed and dropped.
    pub retired: u64,
    /// Processes currently in the live set.
    pub live: usize,
}

/// Process queue owned by one interpreter
#[derive(Debug, Default)]
pub struct Scheduler {
    live: Vec<Process>,
    spawned: Vec<Process>,
    kill_requests: Vec<ProcessId>,
    next_id: u64,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a process for `decl` and queue it. It joins the live set at
    /// the next tick boundary.
    pub fn spawn(
        &mut self,
        decl: &RoutineDecl,
        env: Environment,
    ) -> ProcessId {
        self.next_id += 1;
        let id = ProcessId(self.next_id);
        debug!("Spawning {} '{}'", id, decl.name);
        self.spawned.push(Process::new(id, decl, env));
        self.stats.spawned += 1;
        id
    }

    /// Request that a process stop. Applied at the next tick boundary.
    pub fn kill(
        &mut self,
        id: ProcessId,
    ) {
        self.kill_requests.push(id);
    }

    pub fn kill_requests_mut(&mut self) -> &mut Vec<ProcessId> {
        &mut self.kill_requests
    }

    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            live: self.live.len(),
            ..self.stats
        }
    }

    /// Live plus not yet admitted processes
    pub fn process_count(&self) -> usize {
        self.live.len() + self.spawned.len()
    }

    pub fn is_idle(&self) -> bool {
        self.process_count() == 0
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.live.iter().chain(self.spawned.iter())
    }

    pub fn get(
        &self,
        id: ProcessId,
    ) -> Option<&Process> {
        self.processes().find(|p| p.id() == id)
    }

    /// Begin a sweep: admit queued processes, apply kills, and hand the live
    /// set to the caller
    pub(crate) fn begin_tick(&mut self) -> Vec<Process> {
        self.admit_spawned();
        self.apply_kills();
        self.retire();
        std::mem::take(&mut self.live)
    }

    /// End a sweep: take the live set back, admit processes spawned during
    /// it, apply kills and drop finished processes
    pub(crate) fn end_tick(
        &mut self,
        swept: Vec<Process>,
    ) {
        let mut live = swept;
        live.append(&mut self.live);
        self.live = live;
        self.admit_spawned();
        self.apply_kills();
        self.retire();
        self.stats.ticks += 1;
    }

    fn admit_spawned(&mut self) {
        self.live.append(&mut self.spawned);
    }

    fn apply_kills(&mut self) {
        if self.kill_requests.is_empty() {
            return;
        }
        for id in self.kill_requests.drain(..) {
            match self.live.iter_mut().find(|p| p.id() == id) {
                Some(process) => {
                    debug!("Killing {} '{}'", id, process.name());
                    process.kill();
                }
                None => debug!("Kill request for unknown {}", id),
            }
        }
    }

    fn retire(&mut self) {
        let before = self.live.len();
        self.live.retain(|p| !p.is_done());
        self.stats.retired += (before - self.live.len()) as u64;
    }
}

#[cfg(test)]
mod tests;
