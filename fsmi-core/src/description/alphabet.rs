use crate::fsm::WILDCARD;
use std::collections::BTreeSet;

/// Finite set of symbols wildcards are expanded to.
pub type Alphabet = BTreeSet<char>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("expected a single character symbol in the alphabet, found `{0}`")]
    MalformedSymbol(String),
    #[error("the wildcard `*` can not be part of the alphabet")]
    Wildcard,
}

/// Parses a comma-separated list of symbols (e.g., `a,b,c`). Spaces and tabs
/// are ignored, as are empty entries.
pub fn parse_alphabet(list: &str) -> Result<Alphabet, AlphabetError> {
    list.split(',')
        .map(|symbol| {
            symbol
                .chars()
                .filter(|c| !matches!(c, ' ' | '\t'))
                .collect::<String>()
        })
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| {
            let mut chars = symbol.chars();
            match (chars.next(), chars.next()) {
                (Some(WILDCARD), None) => Err(AlphabetError::Wildcard),
                (Some(c), None) => Ok(c),
                _ => Err(AlphabetError::MalformedSymbol(symbol)),
            }
        })
        .collect()
}
