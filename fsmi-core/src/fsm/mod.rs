pub use self::{
    dfa::{
        minimize::MinimizeError,
        model::{
            Dfa, DfaBuilder, Input, Transitions, INITIAL_ANCHOR_NAME, UNDEFINED_STATE_NAME,
            WILDCARD,
        },
        sim::DfaSimulator,
    },
    traits::{Simulatable, Simulate},
};

/// Index of a state in its finite-state machine.
pub type StateId = usize;

mod dfa;
mod traits;
