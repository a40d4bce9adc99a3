use std::collections::VecDeque;

use crate::{automaton::FiniteAutomaton, StateId, StateSet};

/// Pending states of a closure computation. The pop order only affects how the
/// fixpoint is reached, never the resulting set.
pub trait Worklist: Default {
    fn push(&mut self, state: StateId);
    fn pop(&mut self) -> Option<StateId>;
}

// depth first
impl Worklist for Vec<StateId> {
    fn push(&mut self, state: StateId) {
        Vec::push(self, state)
    }

    fn pop(&mut self) -> Option<StateId> {
        Vec::pop(self)
    }
}

// breadth first
impl Worklist for VecDeque<StateId> {
    fn push(&mut self, state: StateId) {
        self.push_back(state)
    }

    fn pop(&mut self) -> Option<StateId> {
        self.pop_front()
    }
}

/// Union of the non-epsilon destinations of every state in `states` on `symbol`.
pub fn move_on<A>(automaton: &A, states: &StateSet, symbol: &A::Label) -> StateSet
where
    A: FiniteAutomaton + ?Sized,
{
    let mut result = StateSet::with_capacity(automaton.states());
    for state in states.iter() {
        result.union_with(&automaton.transitions_from(state, symbol));
    }

    result
}

pub fn epsilon_closure<A>(automaton: &A, states: &StateSet) -> StateSet
where
    A: FiniteAutomaton + ?Sized,
{
    epsilon_closure_with::<Vec<StateId>, A>(automaton, states)
}

/// Worklist fixpoint: a state is queued only the first time it enters the
/// closure, so epsilon cycles terminate.
pub fn epsilon_closure_with<W, A>(automaton: &A, states: &StateSet) -> StateSet
where
    W: Worklist,
    A: FiniteAutomaton + ?Sized,
{
    let mut closure = states.clone();
    let mut pending = W::default();
    for state in states.iter() {
        pending.push(state);
    }

    while let Some(state) = pending.pop() {
        for next in automaton.epsilon_transitions(state).iter() {
            if closure.insert(next) {
                pending.push(next);
            }
        }
    }

    closure
}
