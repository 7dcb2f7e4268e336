//! Filter parsing and evaluation module
//!
//! This module handles parsing filter strings like
//! `last_name ~ smith and ( city = austin or city = 'round rock' )`,
//! evaluating them against records and rendering them in canonical form.

mod ast;
pub mod cache;
mod evaluator;
#[cfg(feature = "python")]
mod handle;
mod lexer;
pub mod parser;
mod render;


pub use ast::*;
pub use cache::*;
pub use evaluator::*;
#[cfg(feature = "python")]
pub use handle::*;
pub use lexer::*;
pub use parser::*;
pub use render::*;
