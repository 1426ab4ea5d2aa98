//! `lext_core` is the core library for lext (lexical templates). It compiles a
//! compact pattern of named choice sets and named rules, then expands one rule
//! into a randomized string that is reproducible from a 32-bit seed.
//!
//! ## Pattern Language
//!
//! ```text
//! # comments run to the end of the line
//! adjective (quick, lazy, sleepy)
//! animal (fox, dog, cat)
//! phrase <the @adjective @animal>
//! sentence <@phrase jumps over @phrase>
//! ```
//!
//! - `name (a, b, c)` declares a **container**: a set of literal entries.
//!   Entries are trimmed and empty entries are dropped.
//! - `name <...>` declares a **generator**: literal text mixed with
//!   `@variables` that name other generators or containers.
//! - Names may only contain ASCII letters, digits and `_`.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Pattern text
//!   → Lexer (definition scanning: names, entries, bodies, comments)
//!   → Template (validated containers and generators, with limits)
//!   → Generator selection (by name, or drawn from the seed)
//!   → Resolver (sequence scanning of the body, recursive expansion)
//!   → Cursor (bounded writes into the caller's buffer)
//! ```
//!
//! ## Key Types
//!
//! - [`generate`]: Expand a pattern into a caller-owned buffer.
//! - [`generate_string`]: Expand a pattern into an owned `String`.
//! - [`GenerateOptions`]: Generator name, seed, strictness and limits.
//! - [`Seed`]: The xorshift state; reuse it across calls for a reproducible
//!   stream of results.
//! - [`Template`]: A compiled pattern, for inspection.
//! - [`LextConfig`]: Configuration loaded from `lext.toml`.
//!
//! ## Quick Start
//!
//! ```rust
//! use lext_core::GenerateOptions;
//! use lext_core::Seed;
//! use lext_core::generate_string;
//!
//! let mut seed = Seed::new(1234);
//! let pattern = "word (World, Hello) hello <@word @word>";
//!
//! let first = generate_string(pattern, 64, GenerateOptions::default().seed(&mut seed)).unwrap();
//! assert_eq!(first, "Hello World");
//! ```

pub use config::*;
pub use cursor::*;
pub use engine::*;
pub use error::*;
pub use lexer::LexemeKind;
pub use lexer::Segment;
pub use random::*;
pub use template::*;
pub use tokens::Token;

pub mod config;
mod cursor;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod lexer;
mod random;
mod resolver;
mod template;
pub mod tokens;

#[cfg(test)]
mod __fixtures;
