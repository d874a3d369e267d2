use procscript::frontend::lexer::{tokenize, LexError, TokenKind};
use procscript::frontend::parser::AstPrinter;
use procscript::frontend::Compiler;

#[test]
fn test_lexemes_are_preserved() {
    let tokens = tokenize("int speed = 2.5; speed += 1;").unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(
        &lexemes[..9],
        &["int", "speed", "=", "2.5", ";", "speed", "+=", "1", ";"][..]
    );
}

#[test]
fn test_routine_names_are_classified() {
    let tokens = tokenize("process mover() begin end mover();").unwrap();
    let movers: Vec<&TokenKind> = tokens
        .iter()
        .filter(|t| t.lexeme == "mover")
        .map(|t| &t.kind)
        .collect();
    assert_eq!(movers.len(), 2);
    assert!(movers.iter().all(|k| matches!(k, TokenKind::IdProcess(_))));
}

#[test]
fn test_tokens_serialize_to_json() {
    let tokens = tokenize("print(1);").unwrap();
    let json = serde_json::to_string(&tokens).unwrap();
    assert!(json.contains("\"lexeme\":\"print\""));
    assert!(json.contains("KwPrint"));
}

#[test]
fn test_unbalanced_source_is_rejected() {
    assert!(matches!(
        tokenize("begin print(1);"),
        Err(LexError::Unbalanced { .. })
    ));
}

#[test]
fn test_ast_printer_output() {
    let program = Compiler::new()
        .compile("program p;\nbegin\nprint(1 + 2 * 3);\nend.")
        .unwrap();
    let printed = AstPrinter::new().print(&program);
    assert!(printed.starts_with("(program p"));
    assert!(printed.contains("(print (+ 1 (* 2 3)))"));
}
