//! Native registry and built-in native tests

use crate::runtime::literal::Literal;
use crate::runtime::native::{ExecutionContext, NativeRegistry};
use crate::runtime::scheduler::ProcessId;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Call a built-in native outside any process
fn call(
    name: &str,
    args: &[Literal],
) -> Literal {
    let registry = NativeRegistry::with_stdlib();
    let native = registry.get(name).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut kills = Vec::new();
    let mut ctx = ExecutionContext::new(name, 1, args, &mut rng, None, &mut kills);
    (native.func)(&mut ctx, args.len())
}

fn echo_first(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.arg(0).cloned().unwrap_or(Literal::Int(0))
}

fn constant(
    ctx: &mut ExecutionContext<'_>,
    _argc: usize,
) -> Literal {
    ctx.as_int(7)
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn test_stdlib_names() {
        let registry = NativeRegistry::with_stdlib();
        for name in [
            "abs", "sqrt", "sin", "cos", "min", "max", "rand", "len", "upper", "lower", "str",
            "to_int", "to_float", "pid", "pname", "kill", "log",
        ] {
            assert!(registry.contains(name), "missing native {}", name);
        }
        assert_eq!(registry.len(), 17);
        assert_eq!(registry.names().first(), Some(&"abs"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = NativeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("abs").is_none());
    }

    #[test]
    fn test_register_and_replace() {
        let mut registry = NativeRegistry::new();
        registry.register("f", echo_first);
        assert_eq!(registry.get("f").unwrap().arity, None);

        registry.register_with_arity("f", 0, constant);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("f").unwrap().arity, Some(0));
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = NativeRegistry::with_stdlib();
        let b = NativeRegistry::with_stdlib();
        a.register("extra", constant);
        assert!(a.contains("extra"));
        assert!(!b.contains("extra"));
    }
}

#[cfg(test)]
mod context_tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let args = [
            Literal::Float(2.9),
            Literal::from("text"),
            Literal::Int(300),
            Literal::Bool(true),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let mut kills = Vec::new();
        let ctx = ExecutionContext::new("t", 3, &args, &mut rng, None, &mut kills);

        assert_eq!(ctx.arg_count(), 4);
        assert_eq!(ctx.get_int(0), 2);
        assert_eq!(ctx.get_float(2), 300.0);
        assert_eq!(ctx.get_byte(2), 44);
        assert_eq!(ctx.get_string(0), "2.9");
        assert!(ctx.get_bool(3));
        // unconvertible and out of range fall back to defaults
        assert_eq!(ctx.get_int(1), 0);
        assert_eq!(ctx.get_float(9), 0.0);
        assert_eq!(ctx.get_string(9), "");
        assert!(!ctx.get_bool(9));
        assert_eq!(ctx.name(), "t");
        assert_eq!(ctx.line(), 3);
        assert!(ctx.current_process().is_none());
    }

    #[test]
    fn test_random_range_is_inclusive_and_ordered() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut kills = Vec::new();
        let mut ctx = ExecutionContext::new("t", 1, &[], &mut rng, None, &mut kills);
        for _ in 0..200 {
            let n = ctx.random_range(5, 1);
            assert!((1..=5).contains(&n));
        }
        assert_eq!(ctx.random_range(3, 3), 3);
        assert_eq!(ctx.random_float(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_random_float_non_finite_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut kills = Vec::new();
        let mut ctx = ExecutionContext::new("t", 1, &[], &mut rng, None, &mut kills);
        assert_eq!(ctx.random_float(f64::NAN, 1.0), 0.0);
        assert_eq!(ctx.random_float(0.0, f64::NAN), 0.0);
        assert_eq!(ctx.random_float(0.0, f64::INFINITY), 0.0);
        assert_eq!(ctx.random_float(f64::NEG_INFINITY, 1.0), f64::NEG_INFINITY);
        assert_eq!(ctx.random_float(-f64::MAX, f64::MAX), -f64::MAX);
        let x = ctx.random_float(3.0, 1.0);
        assert!((1.0..3.0).contains(&x));
    }

    #[test]
    fn test_kill_requests() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut kills = Vec::new();
        {
            let mut ctx = ExecutionContext::new("kill", 1, &[], &mut rng, None, &mut kills);
            ctx.kill(ProcessId(4));
        }
        assert_eq!(kills, vec![ProcessId(4)]);
    }
}

#[cfg(test)]
mod stdlib_tests {
    use super::*;

    #[test]
    fn test_math() {
        assert_eq!(call("abs", &[Literal::Int(-4)]), Literal::Int(4));
        assert_eq!(call("abs", &[Literal::Float(-1.5)]), Literal::Float(1.5));
        assert_eq!(call("sqrt", &[Literal::Int(9)]), Literal::Float(3.0));
        assert_eq!(call("sin", &[Literal::Int(0)]), Literal::Float(0.0));
        assert_eq!(call("cos", &[Literal::Int(0)]), Literal::Float(1.0));
    }

    #[test]
    fn test_min_max_keep_winner_kind() {
        let args = [Literal::Int(3), Literal::Float(1.5), Literal::Int(8)];
        assert_eq!(call("min", &args), Literal::Float(1.5));
        assert_eq!(call("max", &args), Literal::Int(8));
        assert_eq!(call("max", &[]), Literal::Int(0));
    }

    #[test]
    fn test_rand() {
        match call("rand", &[]) {
            Literal::Float(x) => assert!((0.0..1.0).contains(&x)),
            other => panic!("expected float, got {:?}", other),
        }
        match call("rand", &[Literal::Int(1), Literal::Int(6)]) {
            Literal::Int(n) => assert!((1..=6).contains(&n)),
            other => panic!("expected int, got {:?}", other),
        }
        assert!(matches!(
            call("rand", &[Literal::Int(1), Literal::Float(2.0)]),
            Literal::Float(_)
        ));
        assert_eq!(call("rand", &[Literal::Int(1)]), Literal::Int(0));
    }

    #[test]
    fn test_rand_non_finite_float_bounds() {
        assert_eq!(
            call("rand", &[Literal::Float(0.0), Literal::Float(f64::INFINITY)]),
            Literal::Float(0.0)
        );
        assert_eq!(
            call("rand", &[Literal::Float(f64::NAN), Literal::Float(1.0)]),
            Literal::Float(0.0)
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(call("len", &[Literal::from("héllo")]), Literal::Int(5));
        assert_eq!(call("len", &[Literal::Int(1234)]), Literal::Int(4));
        assert_eq!(call("upper", &[Literal::from("aB")]), Literal::from("AB"));
        assert_eq!(call("lower", &[Literal::from("aB")]), Literal::from("ab"));
        assert_eq!(call("str", &[Literal::Float(2.0)]), Literal::from("2.0"));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(call("to_int", &[Literal::from(" 42 ")]), Literal::Int(42));
        assert_eq!(call("to_int", &[Literal::from("2.7")]), Literal::Int(2));
        assert_eq!(call("to_int", &[Literal::from("x")]), Literal::Int(0));
        assert_eq!(call("to_int", &[Literal::Float(-3.9)]), Literal::Int(-3));
        assert_eq!(call("to_float", &[Literal::from("0.5")]), Literal::Float(0.5));
        assert_eq!(call("to_float", &[Literal::Bool(true)]), Literal::Float(1.0));
    }

    #[test]
    fn test_process_natives_outside_process() {
        assert_eq!(call("pid", &[]), Literal::Int(-1));
        assert_eq!(call("pname", &[]), Literal::from(""));
        assert_eq!(call("kill", &[Literal::Int(0)]), Literal::Bool(false));
        assert_eq!(call("kill", &[Literal::Int(3)]), Literal::Bool(true));
    }

    #[test]
    fn test_log_joins_arguments() {
        let args = [Literal::from("hp"), Literal::Int(3), Literal::Bool(true)];
        assert_eq!(call("log", &args), Literal::from("hp 3 true"));
    }
}
