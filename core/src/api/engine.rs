//! The compilation engine.

use super::{CompiledProgram, EngineOptions, Error};
use crate::{compiler::BytecodeCompiler, lexer, parser::Parser};

/// Compiles source text into runnable programs.
///
/// # Example
///
/// ```
/// use stackc_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default());
/// let program = engine.compile("x = 3 + 4 * (2 - 1);").unwrap();
/// let variables = program.run().unwrap();
/// assert_eq!(variables["x"], 7.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Lex, parse and compile `source`.
    ///
    /// Fails with [`Error::Compilation`] carrying the lexical error, or one
    /// diagnostic per statement that did not parse.
    pub fn compile(&self, source: &str) -> Result<CompiledProgram, Error> {
        let compilation_error = |diagnostics| Error::Compilation {
            diagnostics,
            source: source.to_string(),
        };

        let tokens = lexer::tokenize(source).map_err(|e| compilation_error(vec![e.to_diagnostic()]))?;
        let parsed = Parser::with_options(tokens, self.options.parser.clone()).parse_statements();
        if !parsed.is_ok() {
            return Err(compilation_error(
                parsed.errors.iter().map(|e| e.to_diagnostic()).collect(),
            ));
        }

        let code = BytecodeCompiler::compile_statements(&parsed.statements);
        Ok(CompiledProgram::new(source, parsed.statements, code))
    }
}
