use super::statements;
use procscript::frontend::lexer::LexError;
use procscript::frontend::parser::ParseError;
use procscript::runtime::RuntimeError;
use procscript::{Interpreter, ScriptError};

fn script_error(source: &str) -> ScriptError {
    Interpreter::new()
        .execute_source(source)
        .expect_err("script should fail")
}

#[test]
fn test_undeclared_procedure_names_callee_and_line() {
    let err = script_error(&statements("print(1);\n\nlaunch(3);"));
    assert_eq!(err.line(), 5);
    assert!(matches!(
        &err,
        ScriptError::Runtime(RuntimeError::UndefinedCallee { name, .. }) if name == "launch"
    ));
    let message = err.to_string();
    assert!(message.contains("launch"));
    assert!(message.contains("line: 5"));
}

#[test]
fn test_statements_before_error_have_run() {
    let mut interp = Interpreter::new();
    let output = interp.capture_output();
    let result = interp.execute_source(&statements("print(\"before\");\nmissing();\nprint(\"after\");"));
    assert!(result.is_err());
    assert_eq!(output.lines(), vec!["before"]);
}

#[test]
fn test_lex_errors() {
    assert!(matches!(
        script_error("program t;\nbegin\nprint(\"open);\nend."),
        ScriptError::Lex(LexError::UnterminatedString { line: 3 })
    ));
    assert!(matches!(
        script_error(&statements("print(1 @ 2);")),
        ScriptError::Lex(LexError::UnexpectedChar { ch: '@', line: 3 })
    ));
}

#[test]
fn test_parse_error_discards_program() {
    let mut interp = Interpreter::new();
    let output = interp.capture_output();
    let err = interp
        .execute_source(&statements("print(1);\nint = 4;\nprint(2);"))
        .unwrap_err();
    assert!(matches!(err, ScriptError::Parse(_)));
    assert_eq!(err.line(), 4);
    // nothing ran
    assert!(output.lines().is_empty());
}

#[test]
fn test_parse_error_display() {
    let err = script_error("program t;\nbegin\nprint(1)\nend.");
    match err {
        ScriptError::Parse(e) => {
            assert_eq!(e.line(), 4);
            assert!(e.to_string().ends_with("at line: 4"));
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_error_type_is_public() {
    let err = ParseError::message("custom", 9);
    assert_eq!(err.line(), 9);
}

#[test]
fn test_invalid_increment_target_is_parse_error() {
    assert!(matches!(
        script_error(&statements("(1 + 2)++;")),
        ScriptError::Parse(_)
    ));
}

#[test]
fn test_recoverable_errors_do_not_stop_the_run() {
    let mut interp = Interpreter::new();
    let output = interp.capture_output();
    interp
        .execute_source(&statements(
            "print(-\"s\");\nprint(true < 1);\nprint(1 / 0);\nprint(unknown);\nprint(\"end\");",
        ))
        .unwrap();
    assert_eq!(output.lines(), vec!["s", "false", "1", "0", "end"]);
}

#[test]
fn test_anyhow_context_on_run() {
    let err = procscript::run(&statements("nope();")).unwrap_err();
    assert!(err.downcast_ref::<ScriptError>().is_some());
}
