//! A small interactive shell: single commands or two-stage pipelines of
//! external programs, with `<` / `>` redirection.
//!
//! The core is three pieces used in order: [`tokenizer`] splits a line into
//! words, [`parser::build`] turns it into a [`PipelineRequest`], and the
//! [`executor`] forks, wires and waits for the child processes.

pub mod ast;
pub mod builtins;
pub mod config;
pub mod error;
pub mod executor;
pub mod parser;
pub mod prompt;
pub mod repl;
pub mod tokenizer;

pub use ast::{CommandSpec, PipelineRequest, RedirectKind};
pub use error::{ShellError, SpawnError, SyntaxError};
pub use executor::{run, run_piped, DefaultExecutor, Executor, ProcessResult};
pub use parser::build;
pub use tokenizer::{tokenize, Token};
