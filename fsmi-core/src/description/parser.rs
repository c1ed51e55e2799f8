//! Line based parser for finite-state machine descriptions.

use super::{
    alphabet::Alphabet,
    error::{DescriptionError, DescriptionErrorKind, DescriptionResult},
};
use crate::fsm::{Dfa, Input, INITIAL_ANCHOR_NAME, UNDEFINED_STATE_NAME, WILDCARD};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Marker starting a line comment.
const COMMENT: &str = "//";

/// File name used in errors when none is given.
const DEFAULT_FILE_NAME: &str = "<input>";

/// Finite-state machine description parser.
pub struct Parser<'a> {
    /// Description being parsed.
    source: &'a str,
    /// Name of the file the description was read from.
    file_name: String,
    /// Symbols wildcards are expanded to. Without an alphabet wildcards are kept.
    alphabet: Option<&'a Alphabet>,
}

/// A single state definition line.
#[derive(Debug)]
struct Definition {
    line: usize,
    name: String,
    fin: bool,
    /// Transitions in the order they are written, with the destination names.
    transitions: Vec<(Input, String)>,
}

impl<'a> Parser<'a> {
    /// Creates a new description parser from the `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: DEFAULT_FILE_NAME.to_string(),
            alphabet: None,
        }
    }

    /// Sets the file name reported in errors.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Expands wildcards into explicit transitions for every symbol of the
    /// `alphabet` the state does not map explicitly.
    pub fn with_alphabet(mut self, alphabet: &'a Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Parses the description into a [`Dfa`].
    ///
    /// A state defined more than once keeps the position of its first
    /// definition but takes the acceptance and transitions of its last one.
    ///
    /// # Fails
    ///
    /// When a line is malformed, a state defines a symbol twice or after the
    /// wildcard, a transition points to an undefined state or no state is
    /// defined at all.
    pub fn parse(&self) -> DescriptionResult<Dfa> {
        let definitions = self
            .source
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                self.definition(i + 1, line)
                    .map_err(|kind| self.error(i + 1, kind))
                    .transpose()
            })
            .collect::<DescriptionResult<Vec<_>>>()?;

        if definitions.is_empty() {
            return Err(self.error(self.source.lines().count().max(1), DescriptionErrorKind::Empty));
        }

        // Index of the definition of every state that is kept.
        let mut last = HashMap::new();
        for (i, Definition { line, name, .. }) in definitions.iter().enumerate() {
            if let Some(previous) = last.insert(name.as_str(), i) {
                warn!(
                    "{}:{}: state `{}` is redefined, the definition on line {} is discarded",
                    self.file_name, line, name, definitions[previous].line
                );
            }
        }

        let mut builder = Dfa::builder();
        let ids = definitions
            .iter()
            .map(|Definition { name, fin, .. }| builder.add_state(name.as_str(), *fin))
            .collect::<Vec<_>>();

        for (i, Definition {
            line,
            name,
            transitions,
            ..
        }) in definitions.iter().enumerate()
        {
            if last[name.as_str()] != i {
                continue;
            }

            for (input, dest) in transitions {
                let dest = builder.state_id(dest).ok_or_else(|| {
                    self.error(*line, DescriptionErrorKind::UndefinedState(dest.clone()))
                })?;
                builder.add_transition(ids[i], *input, dest);
            }
        }

        let dfa = builder.build();
        debug!(
            "{}: parsed {} states, start state `{}`",
            self.file_name,
            dfa.state_count(),
            dfa.state_name(dfa.start_state())
        );

        Ok(dfa)
    }

    /// Parses a single line. Returns `None` for lines without a definition.
    fn definition(
        &self,
        line: usize,
        source: &str,
    ) -> Result<Option<Definition>, DescriptionErrorKind> {
        let source = source
            .split_once(COMMENT)
            .map_or(source, |(definition, _)| definition);
        let source = source
            .chars()
            .filter(|c| !matches!(c, ' ' | '\t'))
            .collect::<String>();

        let mut chars = source.chars();
        let fin = match chars.next() {
            None => return Ok(None),
            Some('+') => true,
            Some('-') => false,
            Some(c) => return Err(DescriptionErrorKind::MissingMarker(c)),
        };

        let mut parts = chars.as_str().split(':');
        let (name, groups) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(groups), None) => (name, groups),
            (_, None, _) => return Err(DescriptionErrorKind::MissingColon),
            _ => return Err(DescriptionErrorKind::ExtraColon),
        };

        if name.is_empty() {
            return Err(DescriptionErrorKind::EmptyStateName);
        }
        if name == UNDEFINED_STATE_NAME || name == INITIAL_ANCHOR_NAME {
            return Err(DescriptionErrorKind::ReservedStateName(name.to_string()));
        }

        Ok(Some(Definition {
            line,
            name: name.to_string(),
            fin,
            transitions: self.transitions(groups)?,
        }))
    }

    /// Parses the `;` separated transition groups of a state.
    fn transitions(&self, groups: &str) -> Result<Vec<(Input, String)>, DescriptionErrorKind> {
        let mut transitions = Vec::new();
        let mut symbols = HashSet::new();
        let mut wildcard = None;

        for group in groups.split(';').filter(|group| !group.is_empty()) {
            let mut arrow = group.split("->");
            let (symbol_list, dest) = match (arrow.next(), arrow.next(), arrow.next()) {
                (Some(symbol_list), Some(dest), None) => (symbol_list, dest),
                _ => return Err(DescriptionErrorKind::MalformedArrow(group.to_string())),
            };

            if dest.is_empty() {
                return Err(DescriptionErrorKind::EmptyDestination(group.to_string()));
            }

            for symbol in symbol_list.split(',') {
                let mut chars = symbol.chars();
                let symbol = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(DescriptionErrorKind::MalformedSymbol(symbol.to_string())),
                };

                if wildcard.is_some() {
                    return Err(DescriptionErrorKind::SymbolAfterWildcard(symbol));
                }

                if symbol == WILDCARD {
                    wildcard = Some(dest);
                    continue;
                }

                if !symbols.insert(symbol) {
                    return Err(DescriptionErrorKind::DuplicateSymbol(symbol));
                }
                transitions.push((Input::Symbol(symbol), dest.to_string()));
            }
        }

        match (wildcard, self.alphabet) {
            (Some(dest), Some(alphabet)) => transitions.extend(
                alphabet
                    .iter()
                    .filter(|symbol| !symbols.contains(*symbol))
                    .map(|symbol| (Input::Symbol(*symbol), dest.to_string())),
            ),
            (Some(dest), None) => transitions.push((Input::Wildcard, dest.to_string())),
            (None, _) => (),
        }

        Ok(transitions)
    }

    fn error(&self, line: usize, kind: DescriptionErrorKind) -> DescriptionError {
        DescriptionError {
            file: self.file_name.clone(),
            line,
            kind,
        }
    }
}
