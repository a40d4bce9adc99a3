use std::{
    borrow::{Borrow, Cow},
    collections::{BTreeMap, BTreeSet},
};

use crate::{
    automaton::{check_start, check_state, FiniteAutomaton, StateSet, Symbol},
    closure::{epsilon_closure, move_on},
    error::AutomatonError,
    subset::nfa_to_dfa,
    Dfa, StateId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NfaNode<S> {
    pub(crate) epsilon: StateSet,
    pub(crate) transitions: BTreeMap<S, StateSet>,
}

impl<S> NfaNode<S> {
    pub(crate) fn new() -> Self {
        NfaNode {
            epsilon: StateSet::new(),
            transitions: BTreeMap::new(),
        }
    }
}

/// A nondeterministic automaton with epsilon moves.
///
/// States are `0..states()`, each transition maps an origin and a label to a set
/// of destinations. The vocabulary is derived from the labels and never holds
/// epsilon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<S> {
    pub(crate) nodes: Vec<NfaNode<S>>,
    pub(crate) start: StateId,
    pub(crate) finals: StateSet,
    pub(crate) vocabulary: BTreeSet<S>,
}

impl<S: Symbol> Nfa<S> {
    /// Builds an automaton from `((origin, label), destinations)` entries.
    ///
    /// A `None` label, or a symbol for which `is_epsilon` holds, is an epsilon
    /// move. Entries repeating the same origin and label are merged. A label
    /// whose entries name no destination defines nothing and stays out of the
    /// vocabulary.
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
        check_start(start, states)?;

        let mut final_set = StateSet::with_capacity(states);
        for state in finals {
            check_state(state, states)?;
            final_set.insert(state);
        }

        let mut nodes: Vec<NfaNode<S>> = (0..states).map(|_| NfaNode::new()).collect();
        for ((origin, label), destinations) in transitions {
            check_state(origin, states)?;

            let node = &mut nodes[origin];
            let targets = match label.filter(|symbol| !symbol.is_epsilon()) {
                Some(symbol) => node
                    .transitions
                    .entry(symbol)
                    .or_insert_with(|| StateSet::with_capacity(states)),
                None => &mut node.epsilon,
            };

            for destination in destinations {
                check_state(destination, states)?;
                targets.insert(destination);
            }
        }

        Ok(Self::from_nodes(nodes, start, final_set))
    }

    /// Two states joined by a single transition on `symbol`, accepting exactly that symbol.
    pub fn symbol(symbol: S) -> Self {
        let mut nodes = vec![NfaNode::new(), NfaNode::new()];
        let mut target = StateSet::with_capacity(2);
        target.insert(1);

        if symbol.is_epsilon() {
            nodes[0].epsilon = target;
        } else {
            nodes[0].transitions.insert(symbol, target);
        }

        Self::from_nodes(nodes, 0, [1].into_iter().collect())
    }

    /// Accepts only the empty string.
    pub fn epsilon() -> Self {
        let mut nodes = vec![NfaNode::new(), NfaNode::new()];
        nodes[0].epsilon.insert(1);

        Self::from_nodes(nodes, 0, [1].into_iter().collect())
    }

    // nodes must already reference valid states only
    pub(crate) fn from_nodes(nodes: Vec<NfaNode<S>>, start: StateId, finals: StateSet) -> Self {
        let vocabulary = nodes
            .iter()
            .flat_map(|node| {
                node.transitions
                    .iter()
                    .filter(|(_, targets)| !targets.is_empty())
                    .map(|(symbol, _)| symbol.clone())
            })
            .collect();

        Nfa {
            nodes,
            start,
            finals,
            vocabulary,
        }
    }

    /// Every transition as `(origin, label, destinations)`, epsilon moves carry a `None` label.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Option<&S>, &StateSet)> + '_ {
        self.nodes.iter().enumerate().flat_map(|(origin, node)| {
            let epsilon = (!node.epsilon.is_empty()).then_some((origin, None, &node.epsilon));
            epsilon.into_iter().chain(
                node.transitions
                    .iter()
                    .filter(|(_, targets)| !targets.is_empty())
                    .map(move |(symbol, targets)| (origin, Some(symbol), targets)),
            )
        })
    }

    /// Simulates the automaton on `input` by tracking the epsilon-closed set of live states.
    pub fn recognize<I>(&self, input: I) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut current = StateSet::with_capacity(self.states());
        current.insert(self.start);
        current = epsilon_closure(self, &current);

        for symbol in input {
            current = epsilon_closure(self, &move_on(self, &current, symbol.borrow()));
            if current.is_empty() {
                return false;
            }
        }

        !current.is_disjoint(&self.finals)
    }

    pub fn to_dfa(&self) -> Dfa<S> {
        nfa_to_dfa(self)
    }
}

impl<S: Symbol> FiniteAutomaton for Nfa<S> {
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
        match self
            .nodes
            .get(state)
            .and_then(|node| node.transitions.get(symbol))
        {
            Some(targets) => Cow::Borrowed(targets),
            None => Cow::Owned(StateSet::new()),
        }
    }

    fn epsilon_transitions(&self, state: StateId) -> Cow<'_, StateSet> {
        match self.nodes.get(state) {
            Some(node) => Cow::Borrowed(&node.epsilon),
            None => Cow::Owned(StateSet::new()),
        }
    }

    fn vocabulary(&self) -> &BTreeSet<S> {
        &self.vocabulary
    }
}

impl<S: Symbol> From<&Dfa<S>> for Nfa<S> {
    fn from(dfa: &Dfa<S>) -> Self {
        dfa.to_nfa()
    }
}
