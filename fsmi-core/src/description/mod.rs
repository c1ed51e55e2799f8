//! Textual finite-state machine descriptions.
//!
//! # Grammar
//!
//! ```text
//!     description ::= (line NEWLINE)*;
//!     line ::= (definition)? ("//" COMMENT)?;
//!     definition ::= ("+" | "-") STATE ":" (group? (";" group?)*)?;
//!     group ::= symbol ("," symbol)* "->" STATE;
//!     symbol ::= CHARACTER | "*";
//! ```
//!
//! Spaces and tabs are insignificant. The first definition is the start state.

pub use self::{
    alphabet::{parse_alphabet, Alphabet, AlphabetError},
    error::{DescriptionError, DescriptionErrorKind, DescriptionResult},
    parser::Parser,
};

mod alphabet;
mod error;
mod parser;
