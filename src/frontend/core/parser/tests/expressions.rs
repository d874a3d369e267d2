//! Expression parsing tests: precedence ladder, associativity, call forms

use super::sexpr;

#[test]
fn test_additive_is_left_associative() {
    assert_eq!(sexpr("5 - 2 + 3"), "(+ (- 5 2) 3)");
}

#[test]
fn test_power_is_left_associative() {
    assert_eq!(sexpr("2 ^ 3 ^ 2"), "(^ (^ 2 3) 2)");
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(sexpr("7 % 4 - 1"), "(- (% 7 4) 1)");
}

#[test]
fn test_power_binds_tighter_than_multiplicative() {
    assert_eq!(sexpr("2 * 3 ^ 2"), "(* 2 (^ 3 2))");
}

#[test]
fn test_unary_binds_tighter_than_power() {
    assert_eq!(sexpr("-x ^ 2"), "(^ (- x) 2)");
    assert_eq!(sexpr("not a == b"), "(== (! a) b)");
}

#[test]
fn test_logical_ladder() {
    assert_eq!(sexpr("a or b and c"), "(or a (and b c))");
    assert_eq!(sexpr("a and b xor c"), "(and a (xor b c))");
    assert_eq!(sexpr("true and (false or true)"), "(and true (group (or false true)))");
}

#[test]
fn test_comparison_below_equality() {
    assert_eq!(sexpr("1 < 2 == true"), "(== (< 1 2) true)");
    assert_eq!(sexpr("a != b >= c"), "(!= a (>= b c))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(sexpr("a = b = 3"), "(= a (= b 3))");
}

#[test]
fn test_assignment_is_lowest() {
    assert_eq!(sexpr("a = 1 + 2 or c"), "(= a (or (+ 1 2) c))");
}

#[test]
fn test_compound_assignment_desugars() {
    assert_eq!(sexpr("a += 5"), "(= a (+ a 5))");
    assert_eq!(sexpr("a -= 1"), "(= a (- a 1))");
    assert_eq!(sexpr("a *= b + 1"), "(= a (* a (+ b 1)))");
    assert_eq!(sexpr("a /= 2"), "(= a (/ a 2))");
}

#[test]
fn test_increment_and_decrement() {
    assert_eq!(sexpr("++x"), "(++ x)");
    assert_eq!(sexpr("--x"), "(-- x)");
    assert_eq!(sexpr("x++"), "(post++ x)");
    assert_eq!(sexpr("x-- + 1"), "(+ (post-- x) 1)");
}

#[test]
fn test_literals() {
    assert_eq!(sexpr("42"), "42");
    assert_eq!(sexpr("2.5"), "2.5");
    assert_eq!(sexpr("\"hi\" + 1"), "(+ \"hi\" 1)");
    assert_eq!(sexpr("false"), "false");
    assert_eq!(sexpr("now"), "now");
}

#[test]
fn test_native_calls() {
    assert_eq!(sexpr("abs(-3)"), "(native abs (- 3))");
    assert_eq!(sexpr("min(1, 2 + 3)"), "(native min 1 (+ 2 3))");
    assert_eq!(sexpr("rand()"), "(native rand)");
}

#[test]
fn test_nested_calls_and_groups() {
    assert_eq!(
        sexpr("max(abs(a), (b))"),
        "(native max (native abs a) (group b))"
    );
}
