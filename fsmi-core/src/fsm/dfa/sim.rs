use super::{
    super::{
        traits::{Simulatable, Simulate},
        StateId,
    },
    model::Dfa,
};
use log::trace;

impl Dfa {
    /// Returns the state reached from `state_id` on `input`.
    ///
    /// The explicit transition is taken first, then the wildcard. When neither
    /// exists the sink is returned. The sink only steps to itself.
    pub fn step(&self, state_id: StateId, input: char) -> StateId {
        self.transitions(state_id)
            .get(input)
            .unwrap_or(self.sink)
    }

    /// Applies [`step`](Self::step) for every character of `input`, in order,
    /// starting from `state_id` and returns the state reached.
    pub fn run(&self, state_id: StateId, input: &str) -> StateId {
        input
            .chars()
            .fold(state_id, |state_id, c| self.step(state_id, c))
    }
}

/// Simulator of a [`Dfa`] that keeps track of the current state.
#[derive(Debug, Clone)]
pub struct DfaSimulator<'a> {
    /// Dfa we are simulating.
    dfa: &'a Dfa,
    /// State the simulator is currently in.
    current_state: StateId,
}

impl<'a> DfaSimulator<'a> {
    /// Creates a simulator positioned at the start state of `dfa`.
    pub fn new(dfa: &'a Dfa) -> Self {
        Self {
            dfa,
            current_state: dfa.start_state(),
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    /// Moves the simulator back to the start state.
    pub fn reset(&mut self) {
        self.current_state = self.dfa.start_state();
    }

    /// Converts the simulated DFA to dot language, marking the current state.
    pub fn to_dot(&self, name: &str) -> String {
        self.dfa.to_dot(name, Some(self.current_state))
    }
}

impl Simulatable for Dfa {
    type Simulator<'a> = DfaSimulator<'a>;

    fn to_simulator(&self) -> DfaSimulator<'_> {
        DfaSimulator::new(self)
    }
}

impl Simulate for DfaSimulator<'_> {
    fn is_accepting(&self) -> bool {
        self.dfa.accepts(self.current_state)
    }

    fn feed(&mut self, input: char) -> bool {
        let next_state = self.dfa.step(self.current_state, input);

        trace!(
            "{} --{}--> {}",
            self.dfa.state_name(self.current_state),
            input,
            self.dfa.state_name(next_state)
        );

        self.current_state = next_state;
        self.is_accepting()
    }
}
