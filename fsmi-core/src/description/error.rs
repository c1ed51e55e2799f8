/// Whether reading a description succeeded.
pub type DescriptionResult<T> = core::result::Result<T, DescriptionError>;

/// Error in a finite-state machine description, located by file name and
/// 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{file}:{line}: {kind}")]
pub struct DescriptionError {
    pub file: String,
    pub line: usize,
    pub kind: DescriptionErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptionErrorKind {
    #[error("expected `+` or `-` at the start of the state definition, found `{0}`")]
    MissingMarker(char),
    #[error("expected `:` after the state name")]
    MissingColon,
    #[error("expected a single `:` in the state definition")]
    ExtraColon,
    #[error("expected a state name before `:`")]
    EmptyStateName,
    #[error("state name `{0}` is reserved")]
    ReservedStateName(String),
    #[error("expected `<symbols> -> <state>`, found `{0}`")]
    MalformedArrow(String),
    #[error("expected a destination state after `->` in `{0}`")]
    EmptyDestination(String),
    #[error("expected a single character symbol, found `{0}`")]
    MalformedSymbol(String),
    #[error("symbol `{0}` is defined more than once")]
    DuplicateSymbol(char),
    #[error("symbol `{0}` is defined after the wildcard")]
    SymbolAfterWildcard(char),
    #[error("transition to undefined state `{0}`")]
    UndefinedState(String),
    #[error("the description does not define any state")]
    Empty,
}
