#![allow(dead_code)]

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use stackc::{Engine, EngineOptions, EvaluatorOptions, Variables, render_error_to_string_no_color};

pub static ENGINE: Lazy<Engine> = Lazy::new(|| Engine::new(EngineOptions::default()));

/// Run `input` on the VM and on the AST evaluator; both must produce
/// `expected`.
pub fn assert_variables(input: &str, expected: &Variables) {
    let program = ENGINE
        .compile(input)
        .unwrap_or_else(|e| panic!("{}", render_error_to_string_no_color(&e)));

    let vm = program.run().unwrap();
    assert_eq!(&vm, expected, "VM result for {:?}", input);

    let tree = program.evaluate(EvaluatorOptions::default()).unwrap();
    assert_eq!(&tree, expected, "evaluator result for {:?}", input);
}

/// Compilation or execution must fail, and the rendered error must contain
/// every fragment.
pub fn assert_error(input: &str, fragments: &[&str]) {
    let err = match ENGINE.compile(input) {
        Ok(program) => program.run().expect_err("expected the program to fail"),
        Err(e) => e,
    };
    let rendered = render_error_to_string_no_color(&err);
    for fragment in fragments {
        assert!(
            rendered.contains(fragment),
            "missing {:?} in:\n{}",
            fragment,
            rendered
        );
    }
}

macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        variables: { $($var:ident => $value:expr),* $(,)? } $(,)?
    ) => {
        #[test]
        fn $name() {
            #[allow(unused_mut)]
            let mut expected = stackc::Variables::new();
            $(expected.insert(stringify!($var).to_string(), $value as f64);)*
            $crate::cases::assert_variables($input, &expected);
        }
    };
    (
        name: $name:ident,
        input: $input:expr,
        error: [ $($fragment:expr),* $(,)? ] $(,)?
    ) => {
        #[test]
        fn $name() {
            $crate::cases::assert_error($input, &[$($fragment),*]);
        }
    };
}
