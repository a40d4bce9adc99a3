use std::collections::{btree_map::Entry, HashMap, VecDeque};

use tracing::{debug, trace};

use crate::{
    automaton::{FiniteAutomaton, StateSet, Symbol},
    closure::{epsilon_closure, move_on},
    dfa::{Dfa, DfaNode},
    error::AutomatonError,
    nfa::Nfa,
    StateId,
};

#[derive(Debug, Clone, Default)]
pub struct SubsetOptions {
    /// Abort once this many DFA states have been discovered. The construction
    /// can produce up to 2^n subsets for an NFA with n states.
    pub state_limit: Option<usize>,
}

/// Converts an NFA to an equivalent DFA using subset construction.
///
/// DFA state 0 is the epsilon closure of the NFA start state. A subset with no
/// destination on some symbol gets no transition for it, so the result is a
/// partial DFA.
pub fn nfa_to_dfa<S: Symbol>(nfa: &Nfa<S>) -> Dfa<S> {
    match nfa_to_dfa_with(nfa, &SubsetOptions::default()) {
        Ok(dfa) => dfa,
        Err(err) => unreachable!("unbounded subset construction failed: {err}"),
    }
}

struct Registry<S> {
    // sorted members -> id, the key is canonical whatever order the closure was built in
    ids: HashMap<Vec<StateId>, StateId>,
    subsets: Vec<StateSet>,
    nodes: Vec<DfaNode<S>>,
    finals: StateSet,
    state_limit: Option<usize>,
}

impl<S: Symbol> Registry<S> {
    /// Returns the id of `configuration` and whether it was seen for the first time.
    fn intern(
        &mut self,
        configuration: StateSet,
        accepting: &StateSet,
    ) -> Result<(StateId, bool), AutomatonError> {
        let key: Vec<StateId> = configuration.iter().collect();
        if let Some(&id) = self.ids.get(&key) {
            return Ok((id, false));
        }

        let id = self.subsets.len();
        if let Some(limit) = self.state_limit {
            if id >= limit {
                return Err(AutomatonError::StateLimitExceeded { limit });
            }
        }

        if !configuration.is_disjoint(accepting) {
            self.finals.insert(id);
        }
        trace!(id, states = ?key, "new dfa state");

        self.ids.insert(key, id);
        self.subsets.push(configuration);
        self.nodes.push(DfaNode::new());
        Ok((id, true))
    }
}

pub fn nfa_to_dfa_with<S: Symbol>(
    nfa: &Nfa<S>,
    options: &SubsetOptions,
) -> Result<Dfa<S>, AutomatonError> {
    let mut registry = Registry {
        ids: HashMap::new(),
        subsets: Vec::new(),
        nodes: Vec::new(),
        finals: StateSet::new(),
        state_limit: options.state_limit,
    };

    let mut initial_configuration = StateSet::with_capacity(nfa.states());
    initial_configuration.insert(nfa.start());
    let initial_configuration = epsilon_closure(nfa, &initial_configuration);

    let (initial_id, _) = registry.intern(initial_configuration, nfa.finals())?;
    let mut work_queue: VecDeque<StateId> = VecDeque::new();
    work_queue.push_back(initial_id);

    while let Some(id) = work_queue.pop_front() {
        for symbol in nfa.vocabulary() {
            let target = epsilon_closure(nfa, &move_on(nfa, &registry.subsets[id], symbol));
            if target.is_empty() {
                continue;
            }

            let (target_id, discovered) = registry.intern(target, nfa.finals())?;
            if discovered {
                work_queue.push_back(target_id);
            }

            match registry.nodes[id].transitions.entry(symbol.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(target_id);
                }
                Entry::Occupied(entry) => {
                    assert_eq!(
                        *entry.get(),
                        target_id,
                        "subset construction produced two targets for state {} on {:?}",
                        id,
                        symbol
                    );
                }
            }
        }
    }

    debug!(
        nfa_states = nfa.states(),
        dfa_states = registry.nodes.len(),
        "subset construction finished"
    );

    Ok(Dfa::from_nodes(registry.nodes, initial_id, registry.finals))
}
