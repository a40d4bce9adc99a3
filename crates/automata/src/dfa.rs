use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, BTreeSet, VecDeque},
};

use crate::{
    automaton::{FiniteAutomaton, StateSet, Symbol},
    error::AutomatonError,
    minimize::minimize,
    nfa::{Nfa, NfaNode},
    StateId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DfaNode<S> {
    pub(crate) transitions: BTreeMap<S, StateId>,
}

impl<S> DfaNode<S> {
    pub(crate) fn new() -> Self {
        DfaNode {
            transitions: BTreeMap::new(),
        }
    }
}

/// A deterministic automaton: at most one destination per state and symbol,
/// no epsilon moves. Missing transitions lead to an implicit dead state, so
/// the table may be partial.
///
/// Recognition is stateless; the current state is threaded through [`Dfa::step`]
/// and nothing is kept between calls to [`Dfa::recognize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<S> {
    pub(crate) nodes: Vec<DfaNode<S>>,
    pub(crate) start: StateId,
    pub(crate) finals: StateSet,
    pub(crate) vocabulary: BTreeSet<S>,
}

impl<S: Symbol> Dfa<S> {
    /// Same input shape as [`Nfa::new`], but every entry must name exactly one
    /// destination and carry a non-epsilon label.
    pub fn new<T, D>(
        states: usize,
        finals: impl IntoIterator<Item = StateId>,
        transitions: T,
        start: StateId,
    ) -> Result<Self, AutomatonError>
    where
        T: IntoIterator<Item = ((StateId, Option<S>), D)>,
        D: IntoIterator<Item = StateId>,
    {
        // labels are checked before merging, an epsilon entry with no
        // destinations would otherwise leave nothing behind to reject
        let mut entries = Vec::new();
        for ((origin, label), destinations) in transitions {
            match label {
                Some(symbol) if !symbol.is_epsilon() => {
                    entries.push(((origin, Some(symbol)), destinations))
                }
                _ => return Err(AutomatonError::EpsilonTransition { origin }),
            }
        }

        Nfa::new(states, finals, entries, start).and_then(Dfa::try_from)
    }

    /// Builds a DFA from a `(origin, symbol) -> destination` table.
    pub fn from_table(
        states: usize,
        finals: impl IntoIterator<Item = StateId>,
        transitions: impl IntoIterator<Item = ((StateId, S), StateId)>,
        start: StateId,
    ) -> Result<Self, AutomatonError> {
        Self::new(
            states,
            finals,
            transitions
                .into_iter()
                .map(|((origin, symbol), destination)| ((origin, Some(symbol)), [destination])),
            start,
        )
    }

    pub(crate) fn from_nodes(nodes: Vec<DfaNode<S>>, start: StateId, finals: StateSet) -> Self {
        let vocabulary = nodes
            .iter()
            .flat_map(|node| node.transitions.keys().cloned())
            .collect();

        Dfa {
            nodes,
            start,
            finals,
            vocabulary,
        }
    }

    /// The destination of `state` on `symbol`, `None` if undefined.
    pub fn step(&self, state: StateId, symbol: &S) -> Option<StateId> {
        self.nodes.get(state)?.transitions.get(symbol).copied()
    }

    /// Runs the automaton from its start state. An undefined transition rejects
    /// immediately, otherwise the input is accepted iff the last state is final.
    pub fn recognize<I>(&self, input: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut state = self.start;
        for symbol in input {
            match self.step(state, symbol.borrow()) {
                Some(next) => state = next,
                None => return false,
            }
        }

        self.finals.contains(state)
    }

    /// Every transition as `(origin, symbol, destination)`.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &S, StateId)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(origin, node)| {
            node.transitions
                .iter()
                .map(move |(symbol, destination)| (origin, symbol, *destination))
        })
    }

    /// States reachable from the start state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states());
        let mut queue: VecDeque<StateId> = VecDeque::new();
        reached.insert(self.start);
        queue.push_back(self.start);

        while let Some(state) = queue.pop_front() {
            for next in self.nodes[state].transitions.values() {
                if reached.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }

        reached
    }

    /// A copy with every unreachable state dropped. Surviving states keep
    /// their relative order.
    pub fn without_unreachable(&self) -> Dfa<S> {
        let reached = self.reachable_states();
        let mut renumber: Vec<Option<StateId>> = vec![None; self.states()];
        for (new_id, old_id) in reached.iter().enumerate() {
            renumber[old_id] = Some(new_id);
        }

        let nodes: Vec<DfaNode<S>> = reached
            .iter()
            .map(|old_id| DfaNode {
                transitions: self.nodes[old_id]
                    .transitions
                    .iter()
                    .filter_map(|(symbol, next)| renumber[*next].map(|next| (symbol.clone(), next)))
                    .collect(),
            })
            .collect();

        let finals: StateSet = self
            .finals
            .iter()
            .filter_map(|state| renumber[state])
            .collect();

        // the start state is always reachable
        let start = renumber[self.start].unwrap_or_default();
        Dfa::from_nodes(nodes, start, finals)
    }

    pub fn to_nfa(&self) -> Nfa<S> {
        let states = self.states();
        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let mut nfa_node = NfaNode::new();
                for (symbol, destination) in &node.transitions {
                    let mut targets = StateSet::with_capacity(states);
                    targets.insert(*destination);
                    nfa_node.transitions.insert(symbol.clone(), targets);
                }
                nfa_node
            })
            .collect();

        Nfa::from_nodes(nodes, self.start, self.finals.clone())
    }

    pub fn minimize(&self) -> Dfa<S> {
        minimize(self)
    }
}

impl<S: Symbol> TryFrom<Nfa<S>> for Dfa<S> {
    type Error = AutomatonError;

    fn try_from(nfa: Nfa<S>) -> Result<Self, Self::Error> {
        let mut nodes: Vec<DfaNode<S>> = Vec::with_capacity(nfa.nodes.len());

        for (origin, nfa_node) in nfa.nodes.into_iter().enumerate() {
            if !nfa_node.epsilon.is_empty() {
                return Err(AutomatonError::EpsilonTransition { origin });
            }

            let mut node = DfaNode::new();
            for (symbol, targets) in nfa_node.transitions {
                let mut iter = targets.iter();
                match (iter.next(), iter.next()) {
                    (Some(destination), None) => {
                        node.transitions.insert(symbol, destination);
                    }
                    _ => {
                        return Err(AutomatonError::NonDeterministic {
                            origin,
                            symbol: format!("{symbol:?}"),
                            count: targets.len(),
                        })
                    }
                }
            }
            nodes.push(node);
        }

        Ok(Dfa {
            nodes,
            start: nfa.start,
            finals: nfa.finals,
            vocabulary: nfa.vocabulary,
        })
    }
}

impl<S: Symbol> FiniteAutomaton for Dfa<S> {
    type Label = S;

    fn states(&self) -> usize {
        self.nodes.len()
    }

    fn start(&self) -> StateId {
        self.start
    }

    fn finals(&self) -> &StateSet {
        &self.finals
    }

    fn transitions_from(&self, state: StateId, symbol: &S) -> Cow<'_, StateSet> {
        let mut targets = StateSet::new();
        if let Some(destination) = self.step(state, symbol) {
            targets.insert(destination);
        }
        Cow::Owned(targets)
    }

    fn epsilon_transitions(&self, _state: StateId) -> Cow<'_, StateSet> {
        Cow::Owned(StateSet::new())
    }

    fn vocabulary(&self) -> &BTreeSet<S> {
        &self.vocabulary
    }
}
