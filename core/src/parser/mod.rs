pub mod error;
pub mod parser;

pub use error::{SyntaxError, SyntaxErrorKind};
pub use parser::{
    DEFAULT_MAX_DEPTH, ParseOutcome, Parser, ParserOptions, parse, parse_with_max_depth,
};
