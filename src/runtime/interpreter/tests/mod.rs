//! Interpreter tests module
//!
//! - programs: expressions, scoping and control flow
//! - calls: procedures, functions and natives
//! - processes: spawning and ticking


use crate::runtime::errors::ScriptError;
use crate::runtime::interpreter::{Interpreter, SharedBuffer};

/// Wrap statements in a minimal program. The first body line is line 3.
pub(super) fn program(body: &str) -> String {
    format!("program t;\nbegin\n{}\nend.", body)
}

/// Run `source` with a seeded interpreter, capturing prints
pub(super) fn run_source(source: &str) -> Result<(Interpreter, SharedBuffer), ScriptError> {
    let mut interp = Interpreter::new().with_seed(7);
    let output = interp.capture_output();
    interp.execute_source(source)?;
    Ok((interp, output))
}

/// Printed lines of a main block
pub(super) fn output_of(body: &str) -> Vec<String> {
    let (_, output) = run_source(&program(body)).unwrap();
    output.lines()
}

/// Error of a main block that must fail
pub(super) fn error_of(body: &str) -> ScriptError {
    match run_source(&program(body)) {
        Ok(_) => panic!("expected an error running:\n{}", body),
        Err(e) => e,
    }
}
