use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap_or_else(|e| panic!("lexing failed for {:?}: {}", source, e))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_assignment() {
    use TokenKind::*;
    assert_eq!(
        kinds("x = 3 + 4;"),
        vec![
            Identifier,
            Assign,
            Number,
            Operator(super::Operator::Plus),
            Number,
            Semicolon,
            End
        ]
    );
}

#[test]
fn test_empty_source_is_just_end() {
    let tokens = tokenize("").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::End);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 1);
}

#[test]
fn test_keywords_and_booleans() {
    use TokenKind::*;
    assert_eq!(
        kinds("if else true false iffy elsewhere"),
        vec![If, Else, Boolean, Boolean, Identifier, Identifier, End]
    );
}

#[test]
fn test_two_character_operators_win() {
    let ops: Vec<_> = tokenize("== != <= >= && || ** = < > ! * ^ %")
        .unwrap()
        .into_iter()
        .filter_map(|t| match t.kind {
            TokenKind::Operator(op) => Some(op.as_str()),
            TokenKind::Assign => Some("="),
            _ => None,
        })
        .collect();
    assert_eq!(
        ops,
        vec![
            "==", "!=", "<=", ">=", "&&", "||", "**", "=", "<", ">", "!", "*", "^", "%"
        ]
    );
}

#[test]
fn test_numbers_keep_their_lexeme() {
    let tokens = tokenize("12 3.25 007").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["12", "3.25", "007", ""]);
}

#[test]
fn test_positions() {
    let tokens = tokenize("a = 1;\n  bb = 22;").unwrap();
    let positions: Vec<_> = tokens
        .iter()
        .map(|t| (t.offset(), t.line, t.column))
        .collect();
    assert_eq!(
        positions,
        vec![
            (0, 1, 1),
            (2, 1, 3),
            (4, 1, 5),
            (5, 1, 6),
            (9, 2, 3),
            (12, 2, 6),
            (14, 2, 8),
            (16, 2, 10),
            (17, 2, 11),
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    use TokenKind::*;
    let source = "// leading\nx = 1 /* inline\n comment */ + 2; // trailing";
    assert_eq!(
        kinds(source),
        vec![
            Identifier,
            Assign,
            Number,
            Operator(super::Operator::Plus),
            Number,
            Semicolon,
            End
        ]
    );

    let tokens = tokenize(source).unwrap();
    let plus = &tokens[3];
    assert_eq!((plus.line, plus.column), (3, 13));
}

#[test]
fn test_unterminated_block_comment() {
    let err = tokenize("x = 1; /* never closed").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    assert_eq!((err.line, err.column), (1, 8));
    assert_eq!(err.span, Span::new(7, 9));
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("L002"));
}

#[test]
fn test_block_comment_edges() {
    use TokenKind::*;
    assert_eq!(kinds("/* c */ a = 1;"), vec![Identifier, Assign, Number, Semicolon, End]);
    assert_eq!(kinds("a /** doc **/ = 1"), vec![Identifier, Assign, Number, End]);
    assert_eq!(kinds("/**/"), vec![End]);
    assert_eq!(
        kinds("a = 4 / 2; /* c */"),
        vec![
            Identifier,
            Assign,
            Number,
            Operator(super::Operator::Slash),
            Number,
            Semicolon,
            End
        ]
    );
    // The first `*/` closes the comment.
    assert_eq!(kinds("/* a */ b /* c */"), vec![Identifier, End]);

    let err = tokenize("a = 1; /*/").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
}

#[test]
fn test_single_ampersand_is_an_error() {
    let err = tokenize("a = b & c").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('&'));
    assert_eq!(err.span.0.start, 6);
    assert_eq!(err.column, 7);
}

#[test]
fn test_trailing_decimal_point_is_an_error() {
    let err = tokenize("x = 1.;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('.'));
    assert_eq!(err.column, 6);
}

#[test]
fn test_unknown_character() {
    let err = tokenize("x = 1 # 2").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('#'));
    assert_eq!(err.to_string(), "unexpected character '#' at line 1, column 7");
}

#[test]
fn test_lexer_stops_after_error() {
    let results: Vec<_> = Lexer::new("a @ b").collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_token_display() {
    let tokens = tokenize("\n  foo").unwrap();
    assert_eq!(tokens[0].to_string(), "IDENTIFIER(foo) at 3 [line:2,col:3]");
}
