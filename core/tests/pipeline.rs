//! End-to-end runs through every stage: tokens, statements, bytecode, VM.

use pretty_assertions::assert_eq;
use stackc_core::{
    Variables,
    ast::Node,
    compiler::{BytecodeCompiler, CodeGenerator},
    lexer::{self, TokenKind},
    parser::{self, SyntaxErrorKind},
    vm::{Instruction, Label, RuntimeError, VM},
};

fn run(source: &str) -> Result<Variables, RuntimeError> {
    let parsed = parser::parse(lexer::tokenize(source).unwrap());
    assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
    VM::execute(&BytecodeCompiler::compile_statements(&parsed.statements))
}

fn vars(pairs: &[(&str, f64)]) -> Variables {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[test]
fn test_reference_programs() {
    assert_eq!(run("x = 3 + 4 * (2 - 1);"), Ok(vars(&[("x", 7.0)])));
    assert_eq!(run("y = 2 ^ 3 ^ 2;"), Ok(vars(&[("y", 512.0)])));
    assert_eq!(run("z = (1 == 1) || (1 == 2);"), Ok(vars(&[("z", 1.0)])));
    assert_eq!(
        run("a = 10; if (a > 5) b = 1; else b = 0;"),
        Ok(vars(&[("a", 10.0), ("b", 1.0)]))
    );
    assert_eq!(
        run("a = 3; if (a > 5) b = 1; else b = 0;"),
        Ok(vars(&[("a", 3.0), ("b", 0.0)]))
    );
}

#[test]
fn test_reference_failures() {
    assert_eq!(
        run("x = 5 / 0;"),
        Err(RuntimeError::DivisionByZero { pc: 2 })
    );
    assert_eq!(
        run("x = y + 1;"),
        Err(RuntimeError::UndefinedVariable {
            name: "y".to_string(),
            pc: 0
        })
    );
}

#[test]
fn test_token_stream_ends_once() {
    let tokens = lexer::tokenize("if (a >= 1) b = !true;").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds.last(), Some(&TokenKind::End));
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::End).count(), 1);
    assert_eq!(tokens.len(), 12);
}

#[test]
fn test_if_else_lowering() {
    use Instruction as I;

    let parsed = parser::parse(lexer::tokenize("a = 10; if (a > 5) b = 1; else b = 0;").unwrap());
    let mut generator = CodeGenerator::new();
    let instructions: Vec<_> = parsed
        .statements
        .iter()
        .flat_map(|s| generator.generate(s))
        .collect();

    assert_eq!(
        instructions,
        vec![
            I::PushNumber(10.0),
            I::Store("a".to_string()),
            I::PushVar("a".to_string()),
            I::PushNumber(5.0),
            I::Gt,
            I::JumpIfFalse(Label::new("else_0")),
            I::PushNumber(1.0),
            I::Store("b".to_string()),
            I::Jump(Label::new("end_0")),
            I::Label(Label::new("else_0")),
            I::PushNumber(0.0),
            I::Store("b".to_string()),
            I::Label(Label::new("end_0")),
        ]
    );
}

#[test]
fn test_error_isolation() {
    let parsed = parser::parse(lexer::tokenize("a = 1; b = ; c = 3;").unwrap());

    assert_eq!(parsed.errors.len(), 1);
    assert!(matches!(
        parsed.errors[0].kind,
        SyntaxErrorKind::UnexpectedToken { .. }
    ));
    assert_eq!(
        parsed.statements,
        vec![
            Node::assign("a", Node::Number(1.0)),
            Node::assign("c", Node::Number(3.0)),
        ]
    );

    // The well-formed statements still run.
    let code = BytecodeCompiler::compile_statements(&parsed.statements);
    assert_eq!(
        VM::execute(&code),
        Ok(vars(&[("a", 1.0), ("c", 3.0)]))
    );
}

#[test]
fn test_error_isolation_among_three_statements() {
    let parsed = parser::parse(lexer::tokenize("a = 1; b = ; c = 3; d = 4;").unwrap());

    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].column, 12);
    assert_eq!(parsed.statements.len(), 3);

    let code = BytecodeCompiler::compile_statements(&parsed.statements);
    assert_eq!(
        VM::execute(&code),
        Ok(vars(&[("a", 1.0), ("c", 3.0), ("d", 4.0)]))
    );
}

#[test]
fn test_reexecution_is_idempotent() {
    let parsed = parser::parse(lexer::tokenize("n = 1; n = n * 2; if (n > 1) m = n;").unwrap());
    let code = BytecodeCompiler::compile_statements(&parsed.statements);

    let first = VM::execute(&code);
    assert_eq!(first, Ok(vars(&[("m", 2.0), ("n", 2.0)])));
    assert_eq!(VM::execute(&code), first);
}
