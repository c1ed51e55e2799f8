use super::super::StateId;
use std::collections::{BTreeMap, HashMap};

/// Symbol used in descriptions for a transition taken on any symbol that is
/// not explicitly mapped by the state.
pub const WILDCARD: char = '*';

/// Name of the sink state entered when the transition function is undefined.
pub const UNDEFINED_STATE_NAME: &str = "_undefined_";

/// Name of the invisible node with an edge into the start state in exported
/// graphs.
pub const INITIAL_ANCHOR_NAME: &str = "_dummy_for_initial_state_";

/// Deterministic finite-state machine.
///
/// The states are stored in canonical order: the order in which they were
/// first added to the [`DfaBuilder`]. The position of a state is its
/// [`StateId`]. The sink state is always the last state and is not part of the
/// canonical order of the user defined states.
#[derive(Debug, Clone)]
pub struct Dfa {
    pub(super) start_state: StateId,
    pub(super) states: Vec<State>,
    pub(super) sink: StateId,
    names: HashMap<String, StateId>,
}

/// A state in the DFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct State {
    /// Id of the state used by other states as a pointer.
    pub(super) id: StateId,
    /// Name of the state as written in the description.
    pub(super) name: String,
    /// Whether the state is final (accepting).
    pub(super) fin: bool,
    /// Outgoing transitions of the state.
    pub(super) transitions: Transitions,
}

/// Input a transition is taken on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Input {
    /// A single symbol.
    Symbol(char),
    /// Any symbol that is not explicitly mapped by the state.
    Wildcard,
}

/// Transition table of a single state.
///
/// Explicit symbols always take precedence over the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transitions {
    pub(super) explicit: BTreeMap<char, StateId>,
    pub(super) wildcard: Option<StateId>,
}

impl Transitions {
    /// Returns the destination for `input`: the explicit mapping first, the
    /// wildcard otherwise.
    pub fn get(&self, input: char) -> Option<StateId> {
        self.explicit.get(&input).copied().or(self.wildcard)
    }

    /// Returns the destination of the explicit mapping of `input`, ignoring the
    /// wildcard.
    pub fn get_explicit(&self, input: char) -> Option<StateId> {
        self.explicit.get(&input).copied()
    }

    /// Returns the destination of the wildcard transition, if any.
    pub fn wildcard(&self) -> Option<StateId> {
        self.wildcard
    }

    /// Returns an iterator over the explicitly mapped symbols in ascending
    /// order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.explicit.keys().copied()
    }

    /// Returns an iterator over all transitions, explicit symbols in ascending
    /// order followed by the wildcard.
    pub fn iter(&self) -> impl Iterator<Item = (Input, StateId)> + '_ {
        self.explicit
            .iter()
            .map(|(symbol, dest)| (Input::Symbol(*symbol), *dest))
            .chain(self.wildcard.map(|dest| (Input::Wildcard, dest)))
    }

    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.wildcard.is_none()
    }

    /// Inserts a transition and returns the previous destination for the same
    /// input.
    fn insert(&mut self, input: Input, dest: StateId) -> Option<StateId> {
        match input {
            Input::Symbol(symbol) => self.explicit.insert(symbol, dest),
            Input::Wildcard => self.wildcard.replace(dest),
        }
    }
}

impl Dfa {
    /// Creates a builder which is used to construct a DFA. The first state
    /// added to the builder is the start state.
    pub fn builder() -> DfaBuilder {
        DfaBuilder::new()
    }

    /// Returns the id of the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Returns the id of the sink state (`_undefined_`).
    pub fn sink(&self) -> StateId {
        self.sink
    }

    /// Returns the number of user defined states, excluding the sink.
    pub fn state_count(&self) -> usize {
        self.sink
    }

    /// Returns an iterator over the ids of the user defined states in
    /// canonical order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> {
        0..self.sink
    }

    /// Returns the id of the state called `name`. The sink can not be looked up
    /// by name.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Returns the name of a state.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist in the DFA.
    pub fn state_name(&self, state_id: StateId) -> &str {
        &self.get_state(state_id).name
    }

    /// Returns the transition table of a state.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist in the DFA.
    pub fn transitions(&self, state_id: StateId) -> &Transitions {
        &self.get_state(state_id).transitions
    }

    /// Returns whether the state is accepting. The sink never accepts.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist in the DFA.
    pub fn accepts(&self, state_id: StateId) -> bool {
        self.get_state(state_id).fin
    }

    /// Returns a read-only reference to the `State` in the DFA.
    ///
    /// # Panics
    ///
    /// When the [`StateId`] does not exist in the DFA.
    pub(super) fn get_state(&self, state_id: StateId) -> &State {
        self.states
            .get(state_id)
            .expect("requested state does not exist")
    }

    /// Returns an iterator over the user defined states in canonical order.
    pub(super) fn user_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states[..self.sink].iter()
    }
}

impl State {
    /// Creates a new [`State`] with the given id and whether it is final. No
    /// transitions are created.
    fn with_id(id: StateId, name: String, fin: bool) -> Self {
        Self {
            id,
            name,
            fin,
            transitions: Transitions::default(),
        }
    }
}

/// Builder struct for the [`Dfa`].
#[derive(Debug, Default)]
pub struct DfaBuilder {
    states: Vec<State>,
    names: HashMap<String, StateId>,
}

impl DfaBuilder {
    /// Creates a new empty [`DfaBuilder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next [`StateId`] a [`State`] should have. If the state is
    /// not created, the id will not be taken.
    fn new_state_id(&self) -> StateId {
        self.states.len()
    }

    /// Adds a state called `name`, or updates whether it is final when a state
    /// with that name already exists. A redefined state keeps its id and its
    /// transitions.
    pub fn add_state(&mut self, name: impl Into<String>, fin: bool) -> StateId {
        let name = name.into();

        if let Some(&id) = self.names.get(&name) {
            self.states[id].fin = fin;
            return id;
        }

        let id = self.new_state_id();
        self.names.insert(name.clone(), id);
        self.states.push(State::with_id(id, name, fin));
        id
    }

    /// Adds a state called `name`. See [`add_state`](Self::add_state).
    pub fn with_state(mut self, name: impl Into<String>, fin: bool) -> Self {
        self.add_state(name, fin);
        self
    }

    /// Returns the id of an already added state.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Creates a transition between two states using their [`StateId`]s and
    /// returns the destination it replaced, if any.
    ///
    /// # Panics
    ///
    /// When `start` is an invalid [`StateId`].
    pub fn add_transition(&mut self, start: StateId, input: Input, end: StateId) -> Option<StateId> {
        self.states
            .get_mut(start)
            .expect("state does not exist")
            .transitions
            .insert(input, end)
    }

    /// Creates a transition between two states using their names.
    ///
    /// # Panics
    ///
    /// When either state has not been added.
    pub fn with_transition(mut self, start: &str, input: Input, end: &str) -> Self {
        let start = self.state_id(start).expect("start state does not exist");
        let end = self.state_id(end).expect("end state does not exist");
        self.add_transition(start, input, end);
        self
    }

    /// Builds the [`Dfa`], checks whether all transitions are valid and
    /// materializes the sink state.
    ///
    /// # Panics
    ///
    /// When no state was added or a transition points to a state that does
    /// not exist.
    pub fn build(mut self) -> Dfa {
        if self.states.is_empty() {
            panic!("start state is not a valid state");
        }

        let state_count = self.states.len();
        if self
            .states
            .iter()
            .flat_map(|State { transitions, .. }| transitions.iter())
            .any(|(_, dest)| dest >= state_count)
        {
            panic!("one or more destination states found that do not exist");
        }

        let sink = self.new_state_id();
        self.states
            .push(State::with_id(sink, UNDEFINED_STATE_NAME.to_string(), false));

        Dfa {
            start_state: 0,
            states: self.states,
            sink,
            names: self.names,
        }
    }
}
