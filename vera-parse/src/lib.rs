#![forbid(unsafe_code)]

mod error;
mod parser;

use vera_lex::Lexer;

pub use error::ParseError;
pub use parser::Parser;

/// Lex and parse a whole source file, attaching the source text so
/// diagnostics render with labeled spans.
pub fn parse_source(src: &str) -> miette::Result<vera_ast::Program> {
    let tokens = Lexer::new(src)
        .lex()
        .map_err(|e| miette::Report::new(e).with_source_code(src.to_string()))?;
    let mut parser = Parser::new(&tokens);
    parser
        .parse_program()
        .map_err(|e| miette::Report::new(e).with_source_code(src.to_string()))
}
