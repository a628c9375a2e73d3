#[macro_use]
mod cases;

test_case! {
    name: precedence_of_multiplication,
    input: "x = 3 + 4 * (2 - 1);",
    variables: { x => 7 },
}

test_case! {
    name: power_is_right_associative,
    input: "y = 2 ^ 3 ^ 2;",
    variables: { y => 512 },
}

test_case! {
    name: double_star_is_power,
    input: "y = 2 ** 3 ** 2;",
    variables: { y => 512 },
}

test_case! {
    name: subtraction_is_left_associative,
    input: "d = 10 - 4 - 3;",
    variables: { d => 3 },
}

test_case! {
    name: division_is_left_associative,
    input: "q = 100 / 10 / 5;",
    variables: { q => 2 },
}

test_case! {
    name: fractional_results,
    input: "h = 7 / 2; f = 0.25 * 2;",
    variables: { f => 0.5, h => 3.5 },
}

test_case! {
    name: modulo,
    input: "m = 17 % 5; n = 2 + 9 % 4 * 3;",
    variables: { m => 2, n => 5 },
}

test_case! {
    name: unary_minus_binds_looser_than_power,
    input: "a = -2 ^ 2; b = (-2) ^ 2; c = --3;",
    variables: { a => -4, b => 4, c => 3 },
}

test_case! {
    name: variables_feed_later_statements,
    input: "a = 2; b = a * a; a = a + b; c = a - b;",
    variables: { a => 6, b => 4, c => 2 },
}

test_case! {
    name: semicolons_are_optional,
    input: "a = 1 b = a + 1",
    variables: { a => 1, b => 2 },
}

test_case! {
    name: comments_are_skipped,
    input: "// setup\na = 1; /* block\ncomment */ b = a + 1;",
    variables: { a => 1, b => 2 },
}

test_case! {
    name: empty_program,
    input: "",
    variables: {},
}

test_case! {
    name: only_semicolons,
    input: ";;;",
    variables: {},
}
