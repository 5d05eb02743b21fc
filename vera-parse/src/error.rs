#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;
use vera_ast::Span;

#[derive(Debug, Error, Diagnostic)]
#[error("parse error: {message}")]
#[diagnostic(code(vera::parse))]
pub struct ParseError {
    pub message: String,
    #[label]
    pub span: Span,
}
