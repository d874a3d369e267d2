use super::{run_program, statements};
use procscript::runtime::{ExecutionContext, NativeRegistry};
use procscript::{Interpreter, Literal};

fn native_clamp(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    let (value, low, high) = (ctx.get_int(0), ctx.get_int(1), ctx.get_int(2));
    if low > high {
        ctx.error("empty range");
        return ctx.as_int(value);
    }
    ctx.as_int(value.clamp(low, high))
}

fn native_hp(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    match ctx.current_process() {
        Some(process) => process.get("hp").unwrap_or(Literal::Int(-1)),
        None => ctx.as_int(-1),
    }
}

#[test]
fn test_builtins_from_script() {
    let out = run_program(&statements(
        "print(sqrt(16));
print(min(4, 2, 9));
print(lower(\"LOUD\"));
print(str(1.5) + \"!\");
print(to_int(\"12\") + 1);
print(to_float(3) / 2);",
    ));
    assert_eq!(out, vec!["4.0", "2", "loud", "1.5!", "13", "1.5"]);
}

#[test]
fn test_rand_respects_bounds() {
    let out = run_program(&statements(
        "int ok = 0;
for (int i = 0; i < 50; i++) begin
    int r = rand(3, 5);
    if (r >= 3 and r <= 5) ok++;
end
print(ok);",
    ));
    assert_eq!(out, vec!["50"]);
}

#[test]
fn test_host_registered_natives() {
    let mut interp = Interpreter::new();
    let output = interp.capture_output();
    interp
        .natives_mut()
        .register_with_arity("clamp", 3, native_clamp);
    interp.natives_mut().register_with_arity("hp", 0, native_hp);

    let source = "program t;
process unit()
begin
    int hp = 40;
    print(hp());
end
begin
    print(clamp(15, 0, 10));
    print(hp());
    unit();
end.";
    interp.execute_source(source).unwrap();
    interp.run_until_idle(10).unwrap();
    assert_eq!(output.lines(), vec!["10", "-1", "40"]);
}

#[test]
fn test_registry_is_per_interpreter() {
    let mut a = Interpreter::new();
    a.natives_mut().register("only_here", native_hp);
    let b = Interpreter::new();
    assert!(a.natives().contains("only_here"));
    assert!(!b.natives().contains("only_here"));
    assert_eq!(b.natives().len(), NativeRegistry::with_stdlib().len());
}
