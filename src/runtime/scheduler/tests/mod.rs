//! Scheduler unit tests
//!
//! Process identifiers, body partitioning and tick bookkeeping

use crate::frontend::core::parser::ast::{RoutineDecl, StmtKind};
use crate::frontend::Compiler;
use crate::runtime::environment::Environment;
use crate::runtime::literal::Literal;
use crate::runtime::scheduler::{Process, ProcessId, ProcessState, Scheduler, SchedulerStats};
use std::rc::Rc;

/// First process declaration of a program
fn process_decl(source: &str) -> Rc<RoutineDecl> {
    let program = Compiler::new().compile(source).unwrap();
    let StmtKind::Program(program) = &program.kind else {
        panic!("expected program");
    };
    program
        .declarations
        .iter()
        .find_map(|decl| match &decl.kind {
            StmtKind::ProcessDecl(decl) => Some(Rc::clone(decl)),
            _ => None,
        })
        .unwrap()
}

const WALKER: &str = "program t;
process walker(int x)
begin
    int speed = 2;
    print(speed);
    loop begin
        x += speed;
        if (x > 10) break;
    end
    print(x);
end
begin
end.";

const ONESHOT: &str = "program t;
process oneshot()
begin
    print(1);
    print(2);
end
begin
end.";

#[cfg(test)]
mod process_id_tests {
    use super::*;

    #[test]
    fn test_process_id_conversions() {
        let id = ProcessId::from(7u64);
        assert_eq!(id.inner(), 7);
        assert_eq!(u64::from(id), 7);
        assert_eq!(Literal::from(id), Literal::Int(7));
    }

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId(3).to_string(), "Process(3)");
    }

    #[test]
    fn test_process_state_order() {
        assert!(ProcessState::Init < ProcessState::Loop);
        assert!(ProcessState::Loop < ProcessState::Final);
        assert!(ProcessState::Final < ProcessState::Done);
        assert_eq!(ProcessState::Final.to_string(), "FINAL");
    }
}

#[cfg(test)]
mod process_tests {
    use super::*;

    #[test]
    fn test_partition_around_loop() {
        let decl = process_decl(WALKER);
        let process = Process::new(ProcessId(1), &decl, Environment::new());
        assert_eq!(process.name(), "walker");
        assert_eq!(process.state(), ProcessState::Init);
        assert!(process.has_loop());
        assert_eq!(process.steps(), 0);
        assert!(!process.is_done());
    }

    #[test]
    fn test_no_loop_means_no_loop_segment() {
        let decl = process_decl(ONESHOT);
        let process = Process::new(ProcessId(1), &decl, Environment::new());
        assert!(!process.has_loop());
    }

    #[test]
    fn test_handle_reads_and_writes_process_scope() {
        let decl = process_decl(ONESHOT);
        let env = Environment::new();
        env.define("hp", Literal::Int(3));
        let process = Process::new(ProcessId(2), &decl, env.clone());

        let handle = process.handle();
        assert_eq!(handle.id(), ProcessId(2));
        assert_eq!(handle.name(), "oneshot");
        assert_eq!(handle.get("hp"), Some(Literal::Int(3)));

        handle.set("hp", Literal::Int(9));
        handle.set("fresh", Literal::Bool(true));
        assert_eq!(env.get("hp"), Some(Literal::Int(9)));
        assert_eq!(env.get("fresh"), Some(Literal::Bool(true)));
    }

    #[test]
    fn test_kill_marks_done() {
        let decl = process_decl(ONESHOT);
        let mut process = Process::new(ProcessId(1), &decl, Environment::new());
        process.kill();
        assert!(process.is_done());
        assert!(process.is_killed());
    }
}

#[cfg(test)]
mod scheduler_tests {
    use super::*;

    #[test]
    fn test_new_scheduler_is_idle() {
        let scheduler = Scheduler::new();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.stats(), SchedulerStats::default());
    }

    #[test]
    fn test_ids_start_at_one() {
        let decl = process_decl(ONESHOT);
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.spawn(&decl, Environment::new()), ProcessId(1));
        assert_eq!(scheduler.spawn(&decl, Environment::new()), ProcessId(2));
        assert_eq!(scheduler.process_count(), 2);
        assert_eq!(scheduler.stats().spawned, 2);
        // not admitted before the first tick
        assert_eq!(scheduler.stats().live, 0);
        assert!(scheduler.get(ProcessId(2)).is_some());
        assert!(scheduler.get(ProcessId(3)).is_none());
    }

    #[test]
    fn test_tick_boundaries() {
        let decl = process_decl(ONESHOT);
        let mut scheduler = Scheduler::new();
        scheduler.spawn(&decl, Environment::new());

        let live = scheduler.begin_tick();
        assert_eq!(live.len(), 1);
        // spawned mid-sweep, admitted by end_tick
        scheduler.spawn(&decl, Environment::new());
        scheduler.end_tick(live);

        let stats = scheduler.stats();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.live, 2);
        assert_eq!(stats.retired, 0);
    }

    #[test]
    fn test_kill_applies_at_boundary() {
        let decl = process_decl(ONESHOT);
        let mut scheduler = Scheduler::new();
        let id = scheduler.spawn(&decl, Environment::new());
        scheduler.kill(id);
        scheduler.kill(ProcessId(99));
        assert_eq!(scheduler.process_count(), 1);

        let live = scheduler.begin_tick();
        assert!(live.is_empty());
        scheduler.end_tick(live);
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.stats().retired, 1);
    }
}
