use tracing::{debug, trace};

use crate::{
    automaton::{FiniteAutomaton, StateSet, Symbol},
    dfa::{Dfa, DfaNode},
    disjoint_set::DisjointSet,
    StateId,
};

#[derive(Debug, Clone, Default)]
pub struct MinimizeOptions {
    /// Start with every accepting state in a class of its own, so no two
    /// accepting states are ever merged. Useful when accepting states are
    /// tagged externally, e.g. with lexer token priorities.
    pub separate_finals: bool,
}

pub fn minimize<S: Symbol>(dfa: &Dfa<S>) -> Dfa<S> {
    minimize_with(dfa, &MinimizeOptions::default())
}

/// Collapses indistinguishable states into one.
///
/// Each class of the final partition becomes one state, numbered by the
/// class's smallest member. Unreachable states are not pruned; use
/// [`Dfa::without_unreachable`] first for that.
pub fn minimize_with<S: Symbol>(dfa: &Dfa<S>, options: &MinimizeOptions) -> Dfa<S> {
    let mut partition = state_partition(dfa, options);
    let groups = partition.groups();

    let mut class_of: Vec<StateId> = vec![0; dfa.states()];
    for (class, group) in groups.iter().enumerate() {
        for &state in group {
            class_of[state] = class;
        }
    }

    let nodes: Vec<DfaNode<S>> = partition
        .representatives()
        .into_iter()
        .map(|representative| DfaNode {
            transitions: dfa.nodes[representative]
                .transitions
                .iter()
                .map(|(symbol, next)| (symbol.clone(), class_of[*next]))
                .collect(),
        })
        .collect();

    let finals: StateSet = dfa.finals().iter().map(|state| class_of[state]).collect();

    debug!(
        states = dfa.states(),
        minimized = nodes.len(),
        "dfa minimized"
    );

    Dfa::from_nodes(nodes, class_of[dfa.start()], finals)
}

/// Moore's partition refinement.
///
/// Starts from the accepting / non-accepting split and refines it round by
/// round until the number of classes stops growing. Each round is computed
/// against the previous round's partition only.
pub fn state_partition<S: Symbol>(dfa: &Dfa<S>, options: &MinimizeOptions) -> DisjointSet {
    let vocabulary: Vec<&S> = dfa.vocabulary().iter().collect();
    let mut partition = initial_partition(dfa, options);
    let mut round = 0;

    loop {
        let refined = refine(dfa, &vocabulary, &mut partition);
        round += 1;
        trace!(round, classes = refined.len(), "refinement round");

        if refined.len() == partition.len() {
            debug!(rounds = round, classes = partition.len(), "partition stable");
            return partition;
        }
        partition = refined;
    }
}

fn initial_partition<S: Symbol>(dfa: &Dfa<S>, options: &MinimizeOptions) -> DisjointSet {
    let mut partition = DisjointSet::new(dfa.states());

    let (finals, non_finals): (Vec<StateId>, Vec<StateId>) =
        (0..dfa.states()).partition(|state| dfa.is_final(*state));

    partition.merge(&non_finals);
    if !options.separate_finals {
        partition.merge(&finals);
    }

    partition
}

// splits every class of `previous` into subgroups of states that agree, for
// every symbol, on the class their transition leads to
fn refine<S: Symbol>(dfa: &Dfa<S>, vocabulary: &[&S], previous: &mut DisjointSet) -> DisjointSet {
    let class_of: Vec<usize> = (0..dfa.states()).map(|state| previous.find(state)).collect();
    let mut next = DisjointSet::new(dfa.states());

    for class in previous.groups() {
        let mut leaders: Vec<StateId> = Vec::new();

        for state in class {
            let leader = leaders
                .iter()
                .copied()
                .find(|&leader| indistinguishable(dfa, vocabulary, &class_of, state, leader));

            match leader {
                Some(leader) => {
                    next.union(leader, state);
                }
                None => leaders.push(state),
            }
        }
    }

    next
}

// an undefined transition behaves like a move into a sink class of its own
fn indistinguishable<S: Symbol>(
    dfa: &Dfa<S>,
    vocabulary: &[&S],
    class_of: &[usize],
    a: StateId,
    b: StateId,
) -> bool {
    vocabulary.iter().all(|symbol| {
        let a_class = dfa.step(a, symbol).map(|next| class_of[next]);
        let b_class = dfa.step(b, symbol).map(|next| class_of[next]);
        a_class == b_class
    })
}
