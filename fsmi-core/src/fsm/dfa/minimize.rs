use super::{
    super::StateId,
    model::{Dfa, State},
};
use log::debug;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Reasons a [`Dfa`] can not be minimized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MinimizeError {
    /// A reachable state still has a wildcard transition.
    #[error(
        "state `{state}` has a wildcard transition; minimization requires a total transition \
         function, supply an alphabet to expand wildcards"
    )]
    WildcardWithoutAlphabet { state: String },

    /// `state` has a transition on `symbol`, `other` does not.
    #[error(
        "state `{state}` has a transition on `{symbol}` but state `{other}` does not; \
         minimization requires a total transition function, supply an alphabet"
    )]
    PartialTransition {
        state: String,
        other: String,
        symbol: char,
    },
}

impl Dfa {
    /// Returns the minimal DFA recognizing the same language as `self`.
    ///
    /// Unreachable states are dropped. The remaining states are partitioned in
    /// equivalence classes by marking distinguishable pairs until a fixpoint is
    /// reached (Moore's table-filling algorithm). Every class is replaced by the
    /// member that comes first in canonical order.
    ///
    /// # Fails
    ///
    /// When a reachable state has a wildcard transition, or when two compared
    /// states do not both define a transition on a symbol.
    pub fn minimize(&self) -> Result<Dfa, MinimizeError> {
        let reachable = self.reachable_states();

        if let Some(State { name, .. }) = reachable
            .iter()
            .map(|state_id| self.get_state(*state_id))
            .find(|State { transitions, .. }| transitions.wildcard().is_some())
        {
            return Err(MinimizeError::WildcardWithoutAlphabet {
                state: name.clone(),
            });
        }

        // Position of every reachable state in `reachable`.
        let index = reachable
            .iter()
            .enumerate()
            .map(|(i, state_id)| (*state_id, i))
            .collect::<HashMap<_, _>>();

        let distinguishable = self.distinguishable_pairs(&reachable, &index)?;

        // The first indistinguishable state in canonical order represents the
        // class. At the fixpoint indistinguishability is an equivalence relation,
        // so this is the same state for every member of the class.
        let representatives = (0..reachable.len())
            .map(|i| {
                (0..=i)
                    .find(|&k| !distinguishable[k][i])
                    .unwrap_or(i)
            })
            .collect::<Vec<_>>();

        let minimized = self.rebuild(&reachable, &index, &representatives);

        debug!(
            "minimized {} states ({} reachable) into {} states",
            self.state_count(),
            reachable.len(),
            minimized.state_count()
        );

        Ok(minimized)
    }

    /// Returns the ids of all states reachable from the start state in
    /// canonical order.
    fn reachable_states(&self) -> Vec<StateId> {
        let mut not_visited = VecDeque::from([self.start_state]);
        let mut result = BTreeSet::from([self.start_state]);

        while let Some(state_id) = not_visited.pop_front() {
            for (_, dest) in self.transitions(state_id).iter() {
                if result.insert(dest) {
                    not_visited.push_back(dest)
                }
            }
        }

        result.into_iter().collect()
    }

    /// Computes the table of distinguishable pairs over `states`, indexed by the
    /// position of the states in the slice. `index` maps every state to that
    /// position.
    fn distinguishable_pairs(
        &self,
        states: &[StateId],
        index: &HashMap<StateId, usize>,
    ) -> Result<Vec<Vec<bool>>, MinimizeError> {
        let n = states.len();
        let mut table = vec![vec![false; n]; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let differ = self.accepts(states[i]) != self.accepts(states[j]);
                table[i][j] = differ;
                table[j][i] = differ;
            }
        }

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = false;

            for i in 0..n {
                for j in (i + 1)..n {
                    if table[i][j] {
                        continue;
                    }

                    let (s, t) = (self.get_state(states[i]), self.get_state(states[j]));
                    let symbols = s
                        .transitions
                        .symbols()
                        .chain(t.transitions.symbols())
                        .collect::<BTreeSet<_>>();

                    let mut distinguished = false;
                    for symbol in symbols {
                        let (q, r) = match (
                            s.transitions.get_explicit(symbol),
                            t.transitions.get_explicit(symbol),
                        ) {
                            (Some(q), Some(r)) => (index[&q], index[&r]),
                            (Some(_), None) => return Err(partial_transition(s, t, symbol)),
                            (None, _) => return Err(partial_transition(t, s, symbol)),
                        };

                        distinguished |= q != r && table[q][r];
                    }

                    if distinguished {
                        table[i][j] = true;
                        table[j][i] = true;
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        debug!("distinguishable pairs reached a fixpoint after {} passes", passes);

        Ok(table)
    }

    /// Builds the DFA containing only the representatives of `states`.
    fn rebuild(
        &self,
        states: &[StateId],
        index: &HashMap<StateId, usize>,
        representatives: &[usize],
    ) -> Dfa {
        let mut builder = Dfa::builder();
        let mut new_ids = HashMap::new();

        // The start state comes first in canonical order, so it represents its
        // class and becomes the start state of the new DFA.
        for (i, state_id) in states.iter().enumerate() {
            if representatives[i] == i {
                let State { name, fin, .. } = self.get_state(*state_id);
                new_ids.insert(i, builder.add_state(name.clone(), *fin));
            }
        }

        for (i, state_id) in states.iter().enumerate() {
            if representatives[i] != i {
                continue;
            }

            for (input, dest) in self.transitions(*state_id).iter() {
                let dest = new_ids[&representatives[index[&dest]]];
                builder.add_transition(new_ids[&i], input, dest);
            }
        }

        builder.build()
    }
}

fn partial_transition(state: &State, other: &State, symbol: char) -> MinimizeError {
    MinimizeError::PartialTransition {
        state: state.name.clone(),
        other: other.name.clone(),
        symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        super::model::{Dfa, Input},
        MinimizeError,
    };

    fn names(dfa: &Dfa) -> Vec<&str> {
        dfa.state_ids().map(|id| dfa.state_name(id)).collect()
    }

    #[test]
    fn merges_equivalent_states() {
        // B and C behave the same on every input.
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("B", true)
            .with_state("C", true)
            .with_transition("A", Input::Symbol('0'), "B")
            .with_transition("A", Input::Symbol('1'), "C")
            .with_transition("B", Input::Symbol('0'), "B")
            .with_transition("B", Input::Symbol('1'), "C")
            .with_transition("C", Input::Symbol('0'), "C")
            .with_transition("C", Input::Symbol('1'), "B")
            .build();

        let min = dfa.minimize().unwrap();

        assert_eq!(names(&min), ["A", "B"]);
        assert_eq!(min.step(0, '0'), 1);
        assert_eq!(min.step(0, '1'), 1);
        assert_eq!(min.step(1, '0'), 1);
        assert_eq!(min.step(1, '1'), 1);
        assert!(min.accepts(1));
        assert!(!min.accepts(0));
    }

    #[test]
    fn representative_is_earliest_state() {
        let dfa = Dfa::builder()
            .with_state("S", false)
            .with_state("Z", true)
            .with_state("Y", true)
            .with_transition("S", Input::Symbol('a'), "Y")
            .with_transition("S", Input::Symbol('b'), "Z")
            .with_transition("Z", Input::Symbol('a'), "Y")
            .with_transition("Z", Input::Symbol('b'), "Z")
            .with_transition("Y", Input::Symbol('a'), "Y")
            .with_transition("Y", Input::Symbol('b'), "Z")
            .build();

        let min = dfa.minimize().unwrap();

        // Z and Y are equivalent; Z is defined first.
        assert_eq!(names(&min), ["S", "Z"]);
        assert_eq!(min.state_id("Y"), None);
        assert_eq!(min.step(0, 'a'), 1);
    }

    #[test]
    fn drops_unreachable_states() {
        let dfa = Dfa::builder()
            .with_state("A", true)
            .with_state("Lost", false)
            .with_transition("A", Input::Symbol('a'), "A")
            .with_transition("Lost", Input::Symbol('a'), "A")
            .build();

        let min = dfa.minimize().unwrap();

        assert_eq!(names(&min), ["A"]);
        assert_eq!(min.sink(), 1);
    }

    #[test]
    fn merges_around_unreachable_states() {
        // Lost shifts the positions of B and C; B and C are equivalent.
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("Lost", true)
            .with_state("B", true)
            .with_state("C", true)
            .with_transition("A", Input::Symbol('a'), "C")
            .with_transition("A", Input::Symbol('b'), "A")
            .with_transition("Lost", Input::Symbol('a'), "A")
            .with_transition("Lost", Input::Symbol('b'), "Lost")
            .with_transition("B", Input::Symbol('a'), "C")
            .with_transition("B", Input::Symbol('b'), "A")
            .with_transition("C", Input::Symbol('a'), "B")
            .with_transition("C", Input::Symbol('b'), "A")
            .build();

        let min = dfa.minimize().unwrap();

        assert_eq!(names(&min), ["A", "B"]);
        assert_eq!(min.step(0, 'a'), 1);
        assert_eq!(min.step(0, 'b'), 0);
        assert_eq!(min.step(1, 'a'), 1);
        assert_eq!(min.step(1, 'b'), 0);
    }

    #[test]
    fn distinguishes_through_successors() {
        // Strings over {a} whose length is a multiple of three.
        let dfa = Dfa::builder()
            .with_state("0", true)
            .with_state("1", false)
            .with_state("2", false)
            .with_transition("0", Input::Symbol('a'), "1")
            .with_transition("1", Input::Symbol('a'), "2")
            .with_transition("2", Input::Symbol('a'), "0")
            .build();

        let min = dfa.minimize().unwrap();

        assert_eq!(min.state_count(), 3);
        assert!(min.accepts(min.run(min.start_state(), "aaa")));
        assert!(!min.accepts(min.run(min.start_state(), "aa")));
    }

    #[test]
    fn wildcard_requires_alphabet() {
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("B", true)
            .with_transition("A", Input::Wildcard, "B")
            .build();

        assert_eq!(
            dfa.minimize().unwrap_err(),
            MinimizeError::WildcardWithoutAlphabet {
                state: "A".to_string()
            }
        );
    }

    #[test]
    fn partial_transition_function() {
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("B", false)
            .with_transition("A", Input::Symbol('a'), "B")
            .with_transition("A", Input::Symbol('b'), "A")
            .with_transition("B", Input::Symbol('a'), "B")
            .build();

        let err = dfa.minimize().unwrap_err();
        assert_eq!(
            err,
            MinimizeError::PartialTransition {
                state: "A".to_string(),
                other: "B".to_string(),
                symbol: 'b',
            }
        );
        assert!(err.to_string().contains("supply an alphabet"));
    }

    #[test]
    fn pairs_with_different_acceptance_are_not_compared() {
        // A and B differ in acceptance, so B missing `b` is never looked at.
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("B", true)
            .with_transition("A", Input::Symbol('a'), "B")
            .with_transition("A", Input::Symbol('b'), "A")
            .with_transition("B", Input::Symbol('a'), "B")
            .build();

        let min = dfa.minimize().unwrap();
        assert_eq!(min.state_count(), 2);
        assert_eq!(min.step(1, 'b'), min.sink());
    }

    #[test]
    fn minimize_is_idempotent() {
        let dfa = Dfa::builder()
            .with_state("A", false)
            .with_state("B", false)
            .with_state("C", true)
            .with_state("D", true)
            .with_transition("A", Input::Symbol('x'), "B")
            .with_transition("B", Input::Symbol('x'), "C")
            .with_transition("C", Input::Symbol('x'), "D")
            .with_transition("D", Input::Symbol('x'), "C")
            .build();

        let once = dfa.minimize().unwrap();
        let twice = once.minimize().unwrap();

        assert_eq!(names(&once), ["A", "B", "C"]);
        assert_eq!(names(&once), names(&twice));
        for id in once.state_ids() {
            assert_eq!(once.transitions(id), twice.transitions(id));
            assert_eq!(once.accepts(id), twice.accepts(id));
        }
    }
}
