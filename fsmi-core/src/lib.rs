//! Deterministic finite-state machines read from a small textual description
//! language. The machines can be simulated, minimized and exported to the
//! graphviz dot language.
//!
//! ```
//! use fsmi_core::{Parser, Simulatable, Simulate};
//!
//! let dfa = Parser::new("+A: a->B; b->A\n-B: a->A; b->B").parse()?;
//! assert!(dfa.to_simulator().run("aab"));
//! assert_eq!(dfa.minimize()?.state_count(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use description::{
    parse_alphabet, Alphabet, AlphabetError, DescriptionError, DescriptionErrorKind,
    DescriptionResult, Parser,
};
pub use fsm::{
    Dfa, DfaBuilder, DfaSimulator, Input, MinimizeError, Simulatable, Simulate, StateId,
    Transitions, INITIAL_ANCHOR_NAME, UNDEFINED_STATE_NAME, WILDCARD,
};

mod description;
mod fsm;
