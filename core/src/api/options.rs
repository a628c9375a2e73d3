//! Configuration options for the engine.

use crate::parser::ParserOptions;

/// Configuration options for the engine.
///
/// # Example
///
/// ```
/// use stackc_core::api::EngineOptions;
/// use stackc_core::parser::ParserOptions;
///
/// let options = EngineOptions {
///     parser: ParserOptions { max_depth: 64 },
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Options passed to the parser for every compilation.
    pub parser: ParserOptions,
}
