//! Runtime literal values
//!
//! [`Literal`] is the only value type of the language. Operators follow one
//! explicit promotion rule: in a mixed numeric operation the right operand is
//! converted to the **left** operand's kind before the operation, and the
//! result has the left operand's kind. `1 + 2.5` is therefore the INT `3`,
//! while `2.5 + 1` is the FLOAT `3.5`.

use serde::Serialize;
use std::fmt;

/// Kind tag of a [`Literal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LiteralKind {
    Int,
    Float,
    Byte,
    String,
    Bool,
}

impl LiteralKind {
    /// Language-level type name
    pub fn name(self) -> &'static str {
        match self {
            LiteralKind::Int => "int",
            LiteralKind::Float => "float",
            LiteralKind::Byte => "byte",
            LiteralKind::String => "string",
            LiteralKind::Bool => "bool",
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, LiteralKind::Int | LiteralKind::Float | LiteralKind::Byte)
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tagged runtime value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Byte(u8),
    Str(String),
    Bool(bool),
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
            ArithOp::Pow => "^",
        }
    }
}

/// Ordering operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }

    fn holds(self, ordering: Option<std::cmp::Ordering>) -> bool {
        use std::cmp::Ordering::*;
        match (self, ordering) {
            (_, None) => false,
            (CmpOp::Lt, Some(o)) => o == Less,
            (CmpOp::Le, Some(o)) => o != Greater,
            (CmpOp::Gt, Some(o)) => o == Greater,
            (CmpOp::Ge, Some(o)) => o != Less,
        }
    }
}

/// Why an operator could not produce a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    /// No rule for this operand combination
    Unsupported,
    /// Right-hand side of `/` or `%` is zero after conversion
    DivisionByZero,
}

impl Literal {
    /// Default literal for a declared type (used when a declaration has no
    /// initializer, and as the parameter default)
    pub fn default_for(kind: LiteralKind) -> Literal {
        match kind {
            LiteralKind::Int => Literal::Int(0),
            LiteralKind::Float => Literal::Float(0.0),
            LiteralKind::Byte => Literal::Byte(0),
            LiteralKind::String => Literal::Str(String::new()),
            LiteralKind::Bool => Literal::Bool(false),
        }
    }

    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Int(_) => LiteralKind::Int,
            Literal::Float(_) => LiteralKind::Float,
            Literal::Byte(_) => LiteralKind::Byte,
            Literal::Str(_) => LiteralKind::String,
            Literal::Bool(_) => LiteralKind::Bool,
        }
    }

    /// Truthiness: nonzero numeric, non-empty string, or the boolean itself
    pub fn is_truthy(&self) -> bool {
        match self {
            Literal::Int(n) => *n != 0,
            Literal::Float(n) => *n != 0.0,
            Literal::Byte(n) => *n != 0,
            Literal::Str(s) => !s.is_empty(),
            Literal::Bool(b) => *b,
        }
    }

    /// Numeric view as i64 (floats truncate, booleans are 0/1)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Literal::Int(n) => Some(*n),
            Literal::Float(n) => Some(*n as i64),
            Literal::Byte(n) => Some(i64::from(*n)),
            Literal::Bool(b) => Some(i64::from(*b)),
            Literal::Str(_) => None,
        }
    }

    /// Numeric view as f64 (booleans are 0/1)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(n) => Some(*n as f64),
            Literal::Float(n) => Some(*n),
            Literal::Byte(n) => Some(f64::from(*n)),
            Literal::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Literal::Str(_) => None,
        }
    }

    /// Numeric view as u8 (ints wrap, floats saturate)
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Literal::Int(n) => Some(*n as u8),
            Literal::Float(n) => Some(*n as u8),
            Literal::Byte(n) => Some(*n),
            Literal::Bool(b) => Some(u8::from(*b)),
            Literal::Str(_) => None,
        }
    }

    /// Explicit conversion into another kind.
    ///
    /// Numeric and boolean kinds convert freely among themselves; a string
    /// only converts to a string. `None` marks an unsupported conversion.
    pub fn convert(
        &self,
        target: LiteralKind,
    ) -> Option<Literal> {
        if self.kind() == target {
            return Some(self.clone());
        }
        match target {
            LiteralKind::Int => self.as_i64().map(Literal::Int),
            LiteralKind::Float => self.as_f64().map(Literal::Float),
            LiteralKind::Byte => self.as_u8().map(Literal::Byte),
            LiteralKind::Bool => match self {
                Literal::Str(_) => None,
                other => Some(Literal::Bool(other.is_truthy())),
            },
            LiteralKind::String => None,
        }
    }

    /// Overwrite this literal with a value of the same kind. Returns false,
    /// leaving `self` unchanged, on a kind mismatch.
    pub fn assign(
        &mut self,
        value: &Literal,
    ) -> bool {
        if value.kind() != self.kind() {
            return false;
        }
        *self = value.clone();
        true
    }

    /// Apply an arithmetic operator under the left-kind promotion rule.
    ///
    /// A STRING on the left supports only `+`, which appends the right
    /// operand's display text. A numeric left side requires a numeric right
    /// side.
    pub fn arithmetic(
        &self,
        op: ArithOp,
        rhs: &Literal,
    ) -> Result<Literal, OpError> {
        if let Literal::Str(s) = self {
            return match op {
                ArithOp::Add => Ok(Literal::Str(format!("{}{}", s, rhs))),
                _ => Err(OpError::Unsupported),
            };
        }
        if !self.kind().is_numeric() || !rhs.kind().is_numeric() {
            return Err(OpError::Unsupported);
        }

        match self {
            Literal::Int(l) => {
                let l = *l;
                let r = rhs.as_i64().ok_or(OpError::Unsupported)?;
                let value = match op {
                    ArithOp::Add => l.wrapping_add(r),
                    ArithOp::Sub => l.wrapping_sub(r),
                    ArithOp::Mul => l.wrapping_mul(r),
                    ArithOp::Div | ArithOp::Mod if r == 0 => return Err(OpError::DivisionByZero),
                    ArithOp::Div => l.wrapping_div(r),
                    ArithOp::Mod => l.wrapping_rem(r),
                    ArithOp::Pow => (l as f64).powf(rhs.as_f64().unwrap_or_default()) as i64,
                };
                Ok(Literal::Int(value))
            }
            Literal::Float(l) => {
                let l = *l;
                let r = rhs.as_f64().ok_or(OpError::Unsupported)?;
                let value = match op {
                    ArithOp::Add => l + r,
                    ArithOp::Sub => l - r,
                    ArithOp::Mul => l * r,
                    ArithOp::Div | ArithOp::Mod if r == 0.0 => return Err(OpError::DivisionByZero),
                    ArithOp::Div => l / r,
                    ArithOp::Mod => l % r,
                    ArithOp::Pow => l.powf(r),
                };
                Ok(Literal::Float(value))
            }
            Literal::Byte(l) => {
                let l = *l;
                let r = rhs.as_u8().ok_or(OpError::Unsupported)?;
                let value = match op {
                    ArithOp::Add => l.wrapping_add(r),
                    ArithOp::Sub => l.wrapping_sub(r),
                    ArithOp::Mul => l.wrapping_mul(r),
                    ArithOp::Div | ArithOp::Mod if r == 0 => return Err(OpError::DivisionByZero),
                    ArithOp::Div => l / r,
                    ArithOp::Mod => l % r,
                    ArithOp::Pow => f64::from(l).powf(rhs.as_f64().unwrap_or_default()) as u8,
                };
                Ok(Literal::Byte(value))
            }
            Literal::Str(_) | Literal::Bool(_) => Err(OpError::Unsupported),
        }
    }

    /// Left side of a numeric comparison. A BYTE widens to the right
    /// operand's kind so the right side is never wrapped into a byte.
    fn comparison_operand(
        &self,
        rhs: &Literal,
    ) -> Literal {
        match self {
            Literal::Byte(_) if rhs.kind() != LiteralKind::Byte => {
                self.convert(rhs.kind()).unwrap_or_else(|| self.clone())
            }
            _ => self.clone(),
        }
    }

    /// Ordering comparison. Numeric pairs compare after converting the right
    /// side to the left kind (a BYTE left side widens instead); strings
    /// compare lexicographically.
    pub fn compare(
        &self,
        op: CmpOp,
        rhs: &Literal,
    ) -> Result<bool, OpError> {
        let ordering = match (self, rhs) {
            (Literal::Str(l), Literal::Str(r)) => Some(l.cmp(r)),
            (l, r) if l.kind().is_numeric() && r.kind().is_numeric() => {
                let l = l.comparison_operand(r);
                let r = r.convert(l.kind()).ok_or(OpError::Unsupported)?;
                match (&l, &r) {
                    (Literal::Int(a), Literal::Int(b)) => Some(a.cmp(b)),
                    (Literal::Byte(a), Literal::Byte(b)) => Some(a.cmp(b)),
                    (Literal::Float(a), Literal::Float(b)) => a.partial_cmp(b),
                    _ => return Err(OpError::Unsupported),
                }
            }
            _ => return Err(OpError::Unsupported),
        };
        Ok(op.holds(ordering))
    }

    /// `==` semantics: booleans and strings compare directly, numeric pairs
    /// compare in the left operand's kind (a BYTE left side widens), anything
    /// else is unsupported.
    pub fn equals(
        &self,
        rhs: &Literal,
    ) -> Result<bool, OpError> {
        match (self, rhs) {
            (Literal::Bool(a), Literal::Bool(b)) => Ok(a == b),
            (Literal::Str(a), Literal::Str(b)) => Ok(a == b),
            (l, r) if l.kind().is_numeric() && r.kind().is_numeric() => {
                let l = l.comparison_operand(r);
                let r = r.convert(l.kind()).ok_or(OpError::Unsupported)?;
                Ok(l == r)
            }
            _ => Err(OpError::Unsupported),
        }
    }

    /// Equality used by `switch`: like [`Literal::equals`] but mismatched
    /// kinds simply do not match.
    pub fn matches(
        &self,
        rhs: &Literal,
    ) -> bool {
        self.equals(rhs).unwrap_or(false)
    }

    /// Unary minus
    pub fn negate(&self) -> Result<Literal, OpError> {
        match self {
            Literal::Int(n) => Ok(Literal::Int(n.wrapping_neg())),
            Literal::Float(n) => Ok(Literal::Float(-n)),
            Literal::Byte(n) => Ok(Literal::Byte(n.wrapping_neg())),
            Literal::Str(_) | Literal::Bool(_) => Err(OpError::Unsupported),
        }
    }

    /// `!` / `not`: booleans invert, numerics test for zero
    pub fn not(&self) -> Result<Literal, OpError> {
        match self {
            Literal::Bool(b) => Ok(Literal::Bool(!b)),
            Literal::Str(_) => Err(OpError::Unsupported),
            numeric => Ok(Literal::Bool(!numeric.is_truthy())),
        }
    }

    /// Add `delta` (±1) keeping the kind, for `++` / `--`
    pub fn step(
        &self,
        delta: i8,
    ) -> Result<Literal, OpError> {
        match self {
            Literal::Int(n) => Ok(Literal::Int(n.wrapping_add(i64::from(delta)))),
            Literal::Float(n) => Ok(Literal::Float(n + f64::from(delta))),
            Literal::Byte(n) => Ok(Literal::Byte(n.wrapping_add_signed(delta))),
            Literal::Str(_) | Literal::Bool(_) => Err(OpError::Unsupported),
        }
    }

    /// Value plus kind, for diagnostics: `INT: 3`
    pub fn describe(&self) -> String {
        format!("{}: {}", self.kind().name().to_uppercase(), self)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 => {
                write!(f, "{:.1}", n)
            }
            Literal::Float(n) => write!(f, "{}", n),
            Literal::Byte(n) => write!(f, "{}", n),
            Literal::Str(s) => f.write_str(s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Int(n)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Float(n)
    }
}

impl From<u8> for Literal {
    fn from(n: u8) -> Self {
        Literal::Byte(n)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_left_kind_wins() {
        assert_eq!(
            Literal::Int(1).arithmetic(ArithOp::Add, &Literal::Float(2.5)),
            Ok(Literal::Int(3))
        );
        assert_eq!(
            Literal::Float(2.5).arithmetic(ArithOp::Add, &Literal::Int(1)),
            Ok(Literal::Float(3.5))
        );
        assert_eq!(
            Literal::Byte(250).arithmetic(ArithOp::Add, &Literal::Int(10)),
            Ok(Literal::Byte(4))
        );
    }

    #[test]
    fn test_string_concatenation() {
        let s = Literal::from("hp: ");
        assert_eq!(
            s.arithmetic(ArithOp::Add, &Literal::Int(7)),
            Ok(Literal::from("hp: 7"))
        );
        assert_eq!(
            s.arithmetic(ArithOp::Add, &Literal::Float(1.0)),
            Ok(Literal::from("hp: 1.0"))
        );
        assert_eq!(
            s.arithmetic(ArithOp::Sub, &Literal::Int(7)),
            Err(OpError::Unsupported)
        );
    }

    #[test]
    fn test_numeric_left_with_string_right() {
        assert_eq!(
            Literal::Int(1).arithmetic(ArithOp::Add, &Literal::from("x")),
            Err(OpError::Unsupported)
        );
        assert_eq!(
            Literal::Bool(true).arithmetic(ArithOp::Add, &Literal::Int(1)),
            Err(OpError::Unsupported)
        );
    }

    #[test]
    fn test_division_by_zero_after_conversion() {
        assert_eq!(
            Literal::Int(5).arithmetic(ArithOp::Div, &Literal::Float(0.5)),
            Err(OpError::DivisionByZero)
        );
        assert_eq!(
            Literal::Float(5.0).arithmetic(ArithOp::Mod, &Literal::Int(0)),
            Err(OpError::DivisionByZero)
        );
    }

    #[test]
    fn test_float_modulus_is_fmod() {
        assert_eq!(
            Literal::Float(7.5).arithmetic(ArithOp::Mod, &Literal::Int(2)),
            Ok(Literal::Float(1.5))
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(
            Literal::Int(2).arithmetic(ArithOp::Pow, &Literal::Int(3)),
            Ok(Literal::Int(8))
        );
        assert_eq!(
            Literal::Float(4.0).arithmetic(ArithOp::Pow, &Literal::Float(0.5)),
            Ok(Literal::Float(2.0))
        );
    }

    #[test]
    fn test_compare_uses_left_kind() {
        // 2.5 becomes 2 on an INT left side
        assert_eq!(
            Literal::Int(2).compare(CmpOp::Lt, &Literal::Float(2.5)),
            Ok(false)
        );
        assert_eq!(
            Literal::Float(2.0).compare(CmpOp::Lt, &Literal::Int(3)),
            Ok(true)
        );
        assert_eq!(
            Literal::from("abc").compare(CmpOp::Lt, &Literal::from("abd")),
            Ok(true)
        );
        assert_eq!(
            Literal::Bool(true).compare(CmpOp::Gt, &Literal::Int(0)),
            Err(OpError::Unsupported)
        );
    }

    #[test]
    fn test_equals() {
        assert_eq!(Literal::Int(3).equals(&Literal::Float(3.9)), Ok(true));
        assert_eq!(Literal::Float(3.9).equals(&Literal::Int(3)), Ok(false));
        assert_eq!(Literal::from("a").equals(&Literal::from("a")), Ok(true));
        assert_eq!(
            Literal::from("1").equals(&Literal::Int(1)),
            Err(OpError::Unsupported)
        );
        assert!(!Literal::from("1").matches(&Literal::Int(1)));
    }

    #[test]
    fn test_byte_left_side_widens_for_comparison() {
        assert_eq!(
            Literal::Byte(5).compare(CmpOp::Lt, &Literal::Int(256)),
            Ok(true)
        );
        assert_eq!(
            Literal::Byte(5).compare(CmpOp::Gt, &Literal::Int(-1)),
            Ok(true)
        );
        assert_eq!(
            Literal::Byte(5).compare(CmpOp::Lt, &Literal::Float(5.5)),
            Ok(true)
        );
        assert_eq!(Literal::Byte(44).equals(&Literal::Int(300)), Ok(false));
        assert_eq!(Literal::Byte(44).equals(&Literal::Int(44)), Ok(true));
        assert_eq!(Literal::Byte(3).equals(&Literal::Byte(3)), Ok(true));
        assert!(!Literal::Byte(44).matches(&Literal::Int(300)));
    }

    #[test]
    fn test_assign_requires_matching_kind() {
        let mut slot = Literal::Int(0);
        assert!(slot.assign(&Literal::Int(9)));
        assert_eq!(slot, Literal::Int(9));
        assert!(!slot.assign(&Literal::Float(9.7)));
        assert_eq!(slot, Literal::Int(9));

        let mut flag = Literal::Bool(false);
        assert!(!flag.assign(&Literal::Int(2)));
        assert_eq!(flag, Literal::Bool(false));

        let mut small = Literal::Byte(1);
        assert!(!small.assign(&Literal::Int(7)));
        assert!(small.assign(&Literal::Byte(7)));
        assert_eq!(small, Literal::Byte(7));

        let mut name = Literal::from("a");
        assert!(!name.assign(&Literal::Int(1)));
        assert_eq!(name, Literal::from("a"));

        let mut count = Literal::Int(4);
        assert!(!count.assign(&Literal::from("5")));
        assert_eq!(count, Literal::Int(4));
    }

    #[test]
    fn test_unary_ops() {
        assert_eq!(Literal::Int(3).negate(), Ok(Literal::Int(-3)));
        assert_eq!(Literal::Bool(true).negate(), Err(OpError::Unsupported));
        assert_eq!(Literal::Int(0).not(), Ok(Literal::Bool(true)));
        assert_eq!(Literal::Bool(true).not(), Ok(Literal::Bool(false)));
        assert_eq!(Literal::from("").not(), Err(OpError::Unsupported));
        assert_eq!(Literal::Byte(0).step(-1), Ok(Literal::Byte(255)));
        assert_eq!(Literal::Float(1.5).step(1), Ok(Literal::Float(2.5)));
    }

    #[test]
    fn test_truthiness() {
        assert!(Literal::Int(-1).is_truthy());
        assert!(!Literal::Float(0.0).is_truthy());
        assert!(!Literal::from("").is_truthy());
        assert!(Literal::from("0").is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::Float(3.0).to_string(), "3.0");
        assert_eq!(Literal::Float(0.25).to_string(), "0.25");
        assert_eq!(Literal::Bool(true).to_string(), "true");
        assert_eq!(Literal::Byte(7).describe(), "BYTE: 7");
    }

    fn numeric() -> impl Strategy<Value = Literal> {
        prop_oneof![
            (-1000i64..1000).prop_map(Literal::Int),
            (-1000.0f64..1000.0).prop_map(Literal::Float),
            any::<u8>().prop_map(Literal::Byte),
        ]
    }

    fn arith_op() -> impl Strategy<Value = ArithOp> {
        prop_oneof![
            Just(ArithOp::Add),
            Just(ArithOp::Sub),
            Just(ArithOp::Mul),
            Just(ArithOp::Div),
            Just(ArithOp::Mod),
            Just(ArithOp::Pow),
        ]
    }

    proptest! {
        #[test]
        fn prop_result_kind_is_left_kind(l in numeric(), r in numeric(), op in arith_op()) {
            if let Ok(value) = l.arithmetic(op, &r) {
                prop_assert_eq!(value.kind(), l.kind());
            }
        }

        #[test]
        fn prop_zero_divisor_is_reported(l in numeric(), op in prop_oneof![Just(ArithOp::Div), Just(ArithOp::Mod)]) {
            for zero in [Literal::Int(0), Literal::Float(0.0), Literal::Byte(0)] {
                prop_assert_eq!(l.arithmetic(op, &zero), Err(OpError::DivisionByZero));
            }
        }
    }
}
