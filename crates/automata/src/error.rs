use thiserror::Error;

use crate::StateId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("Automaton must have at least one state")]
    NoStates,
    #[error("Start state {start} is out of range for an automaton with {states} states")]
    StartOutOfRange { start: StateId, states: usize },
    #[error("State {state} is out of range for an automaton with {states} states")]
    StateOutOfRange { state: StateId, states: usize },
    // symbol is kept as its debug rendering so the error stays independent of the alphabet
    #[error("Transition from state {origin} on {symbol} has {count} destinations, expected one")]
    NonDeterministic {
        origin: StateId,
        symbol: String,
        count: usize,
    },
    #[error("DFA transition from state {origin} is labelled with epsilon")]
    EpsilonTransition { origin: StateId },
    #[error("Subset construction exceeded the limit of {limit} states")]
    StateLimitExceeded { limit: usize },
}
