use super::{run_program, statements};
use procscript::util::config::RuntimeConfig;
use std::io::Write;

#[test]
fn test_expression_scenarios() {
    assert_eq!(run_program(&statements("print(5 - 2 + 3);")), vec!["6"]);
    assert_eq!(run_program(&statements("print(2 ^ 3);")), vec!["8"]);
    assert_eq!(
        run_program(&statements("print(true and (false or true));")),
        vec!["true"]
    );
    assert_eq!(
        run_program(&statements("int a = 10;\na += 5;\nprint(a);")),
        vec!["15"]
    );
}

#[test]
fn test_promotion_and_division() {
    let out = run_program(&statements(
        "print(1 + 2.5);\nprint(2.5 + 1);\nprint(10 / 0);\nprint(7 % 3);\nprint(7.5 % 2);",
    ));
    assert_eq!(out, vec!["3", "3.5", "10", "1", "1.5"]);
}

#[test]
fn test_case_insensitive_keywords() {
    let source = "PROGRAM Shout;\nBEGIN\n    Print(1 + 1);\nEND.";
    assert_eq!(run_program(source), vec!["2"]);
}

#[test]
fn test_comments_are_ignored() {
    let source = "program c; // header
/* a block
   comment */
begin
    print(1); // trailing
end.";
    assert_eq!(run_program(source), vec!["1"]);
}

#[test]
fn test_full_program() {
    let source = "program inventory;
int total = 0;

procedure add(int amount)
begin
    total += amount;
end

function average(int count) : float
begin
    if (count == 0) return 0.0;
    return to_float(total) / count;
end

begin
    for (int i = 1; i <= 4; i++) add(i * 10);
    print(\"total: \" + total);
    print(average(4));
    string label = \"items\";
    switch (len(label)) begin
        case 4: print(\"four\");
        case 5: print(\"five\");
        default: print(\"many\");
    end
end.";
    assert_eq!(run_program(source), vec!["total: 100", "25.0", "five"]);
}

#[test]
fn test_run_and_run_file() {
    procscript::run(&statements("int x = 1;")).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", statements("print(1);")).unwrap();
    procscript::run_file(file.path()).unwrap();
}

#[test]
fn test_run_file_missing() {
    let err = procscript::run_file(std::path::Path::new("/definitely/not/here.ps")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read file"));
}

#[test]
fn test_run_with_config() {
    let config = RuntimeConfig {
        max_ticks: 3,
        rng_seed: Some(5),
        ..Default::default()
    };
    let source = "program t;
process forever()
begin
    loop begin end
end
begin
    forever();
end.";
    procscript::run_with_config(source, &config).unwrap();
    procscript::run_with_ticks(source, 2).unwrap();
}
