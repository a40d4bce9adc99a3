use std::{borrow::Cow, collections::BTreeSet, fmt::Debug, hash::Hash};

use bit_set::BitSet;

use crate::{error::AutomatonError, StateId};

pub type StateSet = BitSet;

/// An input token an automaton can consume.
///
/// `is_epsilon` lets an alphabet reserve a value for non-consuming moves, the
/// empty string for textual tokens. Such labels are normalized to epsilon at
/// construction and never show up in a vocabulary.
pub trait Symbol: Clone + Ord + Hash + Debug {
    fn is_epsilon(&self) -> bool {
        false
    }
}

impl Symbol for char {}
impl Symbol for u8 {}
impl Symbol for u32 {}

impl Symbol for &str {
    fn is_epsilon(&self) -> bool {
        self.is_empty()
    }
}

impl Symbol for String {
    fn is_epsilon(&self) -> bool {
        self.is_empty()
    }
}

/// Read-only view shared by [`Nfa`](crate::Nfa) and [`Dfa`](crate::Dfa).
///
/// Queries about undefined transitions, including ones from out of range
/// states, answer with an empty set rather than failing.
pub trait FiniteAutomaton {
    type Label: Symbol;

    fn states(&self) -> usize;
    fn start(&self) -> StateId;
    fn finals(&self) -> &StateSet;

    fn is_final(&self, state: StateId) -> bool {
        self.finals().contains(state)
    }

    fn transitions_from(&self, state: StateId, symbol: &Self::Label) -> Cow<'_, StateSet>;
    fn epsilon_transitions(&self, state: StateId) -> Cow<'_, StateSet>;
    fn vocabulary(&self) -> &BTreeSet<Self::Label>;
}

pub fn vocabulary<A: FiniteAutomaton>(automaton: &A) -> &BTreeSet<A::Label> {
    automaton.vocabulary()
}

pub(crate) fn check_state(state: StateId, states: usize) -> Result<(), AutomatonError> {
    if state < states {
        Ok(())
    } else {
        Err(AutomatonError::StateOutOfRange { state, states })
    }
}

pub(crate) fn check_start(start: StateId, states: usize) -> Result<(), AutomatonError> {
    if states == 0 {
        Err(AutomatonError::NoStates)
    } else if start >= states {
        Err(AutomatonError::StartOutOfRange { start, states })
    } else {
        Ok(())
    }
}
