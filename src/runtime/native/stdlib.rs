//! Built-in natives

use super::{ExecutionContext, NativeRegistry};
use crate::runtime::literal::{CmpOp, Literal};
use crate::runtime::scheduler::ProcessId;

/// Register every built-in native
pub fn register_all(registry: &mut NativeRegistry) {
    // math
    registry.register_with_arity("abs", 1, native_abs);
    registry.register_with_arity("sqrt", 1, native_sqrt);
    registry.register_with_arity("sin", 1, native_sin);
    registry.register_with_arity("cos", 1, native_cos);
    registry.register("min", native_min);
    registry.register("max", native_max);
    registry.register("rand", native_rand);

    // strings and conversions
    registry.register_with_arity("len", 1, native_len);
    registry.register_with_arity("upper", 1, native_upper);
    registry.register_with_arity("lower", 1, native_lower);
    registry.register_with_arity("str", 1, native_str);
    registry.register_with_arity("to_int", 1, native_to_int);
    registry.register_with_arity("to_float", 1, native_to_float);

    // processes
    registry.register_with_arity("pid", 0, native_pid);
    registry.register_with_arity("pname", 0, native_pname);
    registry.register_with_arity("kill", 1, native_kill);

    registry.register("log", native_log);
}

// === math ===

fn native_abs(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    match ctx.arg(0) {
        Some(Literal::Int(n)) => ctx.as_int(n.wrapping_abs()),
        Some(Literal::Float(n)) => ctx.as_float(n.abs()),
        Some(Literal::Byte(n)) => ctx.as_byte(*n),
        Some(other) => {
            ctx.warn(&format!("expects a number, got {}", other.describe()));
            other.clone()
        }
        None => ctx.as_int(0),
    }
}

fn native_sqrt(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    let x = ctx.get_float(0);
    if x < 0.0 {
        ctx.warn(&format!("square root of negative number {}", x));
    }
    ctx.as_float(x.sqrt())
}

fn native_sin(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_float(ctx.get_float(0).sin())
}

fn native_cos(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_float(ctx.get_float(0).cos())
}

/// Smallest or largest argument; the winner keeps its own kind
fn extremum(
    ctx: &mut ExecutionContext<'_>,
    argc: usize,
    op: CmpOp,
) -> Literal {
    let Some(mut best) = ctx.arg(0).cloned() else {
        ctx.warn("expects at least one argument");
        return ctx.as_int(0);
    };
    for index in 1..argc {
        let Some(candidate) = ctx.arg(index) else {
            break;
        };
        match candidate.compare(op, &best) {
            Ok(true) => best = candidate.clone(),
            Ok(false) => {}
            Err(_) => ctx.warn(&format!(
                "cannot compare {} with {}",
                candidate.describe(),
                best.describe()
            )),
        }
    }
    best
}

fn native_min(
    ctx: &mut ExecutionContext<'_>,
    argc: usize,
) -> Literal {
    extremum(ctx, argc, CmpOp::Lt)
}

fn native_max(
    ctx: &mut ExecutionContext<'_>,
    argc: usize,
) -> Literal {
    extremum(ctx, argc, CmpOp::Gt)
}

/// `rand()` is a FLOAT in [0, 1); `rand(a, b)` is an INT in [a, b], or a
/// FLOAT in [a, b) when either bound is a float
fn native_rand(
    ctx: &mut ExecutionContext<'_>,
    argc: usize,
) -> Literal {
    match argc {
        0 => {
            let x = ctx.random_float(0.0, 1.0);
            ctx.as_float(x)
        }
        2 => {
            let floats = matches!(ctx.arg(0), Some(Literal::Float(_)))
                || matches!(ctx.arg(1), Some(Literal::Float(_)));
            if floats {
                let (low, high) = (ctx.get_float(0), ctx.get_float(1));
                let x = ctx.random_float(low, high);
                ctx.as_float(x)
            } else {
                let (low, high) = (ctx.get_int(0), ctx.get_int(1));
                let n = ctx.random_range(low, high);
                ctx.as_int(n)
            }
        }
        _ => {
            ctx.warn(&format!("expects 0 or 2 arguments, got {}", argc));
            ctx.as_int(0)
        }
    }
}

// === strings and conversions ===

fn native_len(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_int(ctx.get_string(0).chars().count() as i64)
}

fn native_upper(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_string(ctx.get_string(0).to_uppercase())
}

fn native_lower(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_string(ctx.get_string(0).to_lowercase())
}

fn native_str(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_string(ctx.get_string(0))
}

/// Conversion to INT; strings are parsed
fn native_to_int(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    match ctx.arg(0) {
        Some(Literal::Str(s)) => {
            let text = s.trim();
            match text
                .parse::<i64>()
                .or_else(|_| text.parse::<f64>().map(|f| f as i64))
            {
                Ok(n) => ctx.as_int(n),
                Err(_) => {
                    ctx.warn(&format!("cannot parse \"{}\" as int", s));
                    ctx.as_int(0)
                }
            }
        }
        _ => ctx.as_int(ctx.get_int(0)),
    }
}

/// Conversion to FLOAT; strings are parsed
fn native_to_float(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    match ctx.arg(0) {
        Some(Literal::Str(s)) => match s.trim().parse::<f64>() {
            Ok(x) => ctx.as_float(x),
            Err(_) => {
                ctx.warn(&format!("cannot parse \"{}\" as float", s));
                ctx.as_float(0.0)
            }
        },
        _ => ctx.as_float(ctx.get_float(0)),
    }
}

// === processes ===

/// Id of the calling process, or -1 outside a process
fn native_pid(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    match ctx.current_process() {
        Some(process) => process.id().into(),
        None => ctx.as_int(-1),
    }
}

/// Declared name of the calling process, or "" outside a process
fn native_pname(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    let name = ctx
        .current_process()
        .map(|p| p.name().to_string())
        .unwrap_or_default();
    ctx.as_string(name)
}

fn native_kill(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    let id = ctx.get_int(0);
    if id <= 0 {
        ctx.warn(&format!("invalid process id {}", id));
        return ctx.as_bool(false);
    }
    ctx.kill(ProcessId(id as u64));
    ctx.as_bool(true)
}

/// Log the arguments, space separated, at info level
fn native_log(
    ctx: &mut ExecutionContext<'_>,
    argc: usize,
) -> Literal {
    let message = (0..argc)
        .map(|i| ctx.get_string(i))
        .collect::<Vec<_>>()
        .join(" ");
    ctx.info(&message);
    ctx.as_string(message)
}
