use super::{
    super::StateId,
    model::{Dfa, Input, State, INITIAL_ANCHOR_NAME, WILDCARD},
};

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot("fsm", None))
    }
}

impl Dfa {
    /// Converts the DFA to dot language using the [grahviz](https://graphviz.org/docs/layouts/dot/)
    /// dot language format.
    ///
    /// When `highlight` is given, that state is marked. The sink state is only
    /// drawn when it is the highlighted state.
    pub fn to_dot(&self, name: &str, highlight: Option<StateId>) -> String {
        format!(
            "digraph {} {{\n\
                \trankdir = LR;\n\
            \n\
                {}\
                \t{INITIAL_ANCHOR_NAME} [shape = point, width = 0, style = invisible];\n\
                \t{INITIAL_ANCHOR_NAME} -> {};\n\
            \n\
                {}\
            }}\n",
            quote(name),
            self.node_dot(highlight)
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
            quote(self.state_name(self.start_state)),
            self.transition_dot()
                .map(|l| format!("\t{}\n", l))
                .collect::<String>(),
        )
    }

    fn node_dot(&self, highlight: Option<StateId>) -> impl Iterator<Item = String> + '_ {
        let sink = (highlight == Some(self.sink)).then(|| self.get_state(self.sink));

        self.user_states()
            .chain(sink)
            .map(move |State { id, name, fin, .. }| {
                format!(
                    "{} [shape = {}{}];",
                    quote(name),
                    if *fin { "doublecircle" } else { "circle" },
                    if highlight == Some(*id) {
                        ", color = red"
                    } else {
                        ""
                    }
                )
            })
    }

    /// Converts the transitions to the dot format and returns an iterator over it.
    fn transition_dot(&self) -> impl Iterator<Item = String> + '_ {
        self.user_states().flat_map(move |State { name, transitions, .. }| {
            transitions.iter().map(move |(input, dest)| {
                let label = match input {
                    Input::Symbol(symbol) => symbol,
                    Input::Wildcard => WILDCARD,
                };

                format!(
                    "{} -> {} [label = {}];",
                    quote(name),
                    quote(self.state_name(dest)),
                    quote(&label.to_string())
                )
            })
        })
    }
}

/// Quotes an identifier for the dot language.
fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::super::model::{Dfa, Input};

    fn dfa() -> Dfa {
        Dfa::builder()
            .with_state("A", true)
            .with_state("B", false)
            .with_transition("A", Input::Symbol('a'), "B")
            .with_transition("A", Input::Wildcard, "A")
            .build()
    }

    #[test]
    fn to_dot() {
        let expected = "digraph \"fsm\" {\n\
                \trankdir = LR;\n\
                \n\
                \t\"A\" [shape = doublecircle];\n\
                \t\"B\" [shape = circle];\n\
                \t_dummy_for_initial_state_ [shape = point, width = 0, style = invisible];\n\
                \t_dummy_for_initial_state_ -> \"A\";\n\
                \n\
                \t\"A\" -> \"B\" [label = \"a\"];\n\
                \t\"A\" -> \"A\" [label = \"*\"];\n\
            }\n";

        assert_eq!(dfa().to_dot("fsm", None), expected);
        assert_eq!(dfa().to_string(), expected);
    }

    #[test]
    fn highlight_current_state() {
        let dot = dfa().to_dot("fsm_final", Some(1));

        assert!(dot.starts_with("digraph \"fsm_final\" {"));
        assert!(dot.contains("\t\"B\" [shape = circle, color = red];\n"));
        assert!(dot.contains("\t\"A\" [shape = doublecircle];\n"));
        assert!(!dot.contains("_undefined_"));
    }

    #[test]
    fn sink_only_drawn_when_highlighted() {
        let dfa = dfa();

        assert!(!dfa.to_dot("fsm", None).contains("_undefined_"));
        assert!(dfa
            .to_dot("fsm", Some(dfa.sink()))
            .contains("\t\"_undefined_\" [shape = circle, color = red];\n"));
    }

    #[test]
    fn quotes_names() {
        let dfa = Dfa::builder()
            .with_state("say\"hi\"", false)
            .with_transition("say\"hi\"", Input::Symbol('\\'), "say\"hi\"")
            .build();

        assert!(dfa
            .to_dot("fsm", None)
            .contains(r#""say\"hi\"" -> "say\"hi\"" [label = "\\"];"#));
    }
}
