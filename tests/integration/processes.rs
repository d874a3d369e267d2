use super::{run_program, start};
use procscript::runtime::ProcessState;

const COUNTER: &str = "program counter_demo;
process counter(int limit)
begin
    int n = 0;
    loop begin
        n++;
        if (n == limit) break;
    end
    print(\"counted \" + n);
end
begin
    counter(3);
end.";

#[test]
fn test_counter_done_after_three_loop_ticks() {
    let (mut interp, output) = start(COUNTER);

    interp.tick().unwrap();
    let process = interp.scheduler().processes().next().unwrap();
    assert_eq!(process.state(), ProcessState::Loop);

    interp.tick().unwrap();
    interp.tick().unwrap();
    assert_eq!(interp.scheduler().process_count(), 1);

    interp.tick().unwrap();
    assert!(interp.scheduler().is_idle());
    assert_eq!(output.lines(), vec!["counted 3"]);
}

#[test]
fn test_process_without_loop_done_after_one_tick() {
    let source = "program t;
process once()
begin
    print(\"once\");
end
begin
    once();
end.";
    let (mut interp, output) = start(source);
    let stats = interp.tick().unwrap();
    assert_eq!(stats.retired, 1);
    assert_eq!(stats.live, 0);
    assert_eq!(output.lines(), vec!["once"]);
}

#[test]
fn test_processes_interleave() {
    let source = "program t;
process actor(string name, int steps)
begin
    int i = 0;
    loop begin
        i++;
        print(name + i);
        if (i == steps) break;
    end
end
begin
    actor(\"a\", 2);
    actor(\"b\", 3);
end.";
    assert_eq!(run_program(source), vec!["a1", "b1", "a2", "b2", "b3"]);
}

#[test]
fn test_processes_share_globals() {
    let source = "program t;
int score = 0;
process scorer(int points)
begin
    loop begin
        score += points;
        if (score >= 10) break;
    end
end
begin
    scorer(2);
    scorer(3);
end.";
    let (mut interp, _) = start(source);
    let ticks = interp.run_until_idle(100).unwrap();
    // 5, 10 on tick 3 stops the second scorer; 12 on tick 4 stops the first
    assert_eq!(ticks, 4);
    assert_eq!(
        interp.globals().get("score"),
        Some(procscript::Literal::Int(12))
    );
}

#[test]
fn test_spawn_and_kill_from_script() {
    let source = "program t;
int victim = 0;
process target()
begin
    loop begin
        print(\"alive\");
    end
end
process hunter()
begin
    loop begin
        kill(victim);
        break;
    end
end
begin
    victim = target();
    hunter();
end.";
    // tick 1 runs both INITs; on tick 2 target prints and hunter kills it
    assert_eq!(run_program(source), vec!["alive"]);
}
