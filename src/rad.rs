//! Main module for rad library functionality

pub mod ast;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod testing;
