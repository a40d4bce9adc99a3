// Thompson-style composition. Every operator lays its operands out side by side
// in a fresh state space and bridges them with epsilon moves, the inputs are
// only read.

use crate::{
    automaton::{FiniteAutomaton, StateSet, Symbol},
    nfa::{Nfa, NfaNode},
    StateId,
};

// copies `automaton` into `nodes`, renumbering every state by `offset`
fn append_shifted<S: Symbol>(nodes: &mut Vec<NfaNode<S>>, automaton: &Nfa<S>, offset: usize) {
    let shift = |targets: &StateSet| -> StateSet { targets.iter().map(|t| t + offset).collect() };

    for node in &automaton.nodes {
        nodes.push(NfaNode {
            epsilon: shift(&node.epsilon),
            transitions: node
                .transitions
                .iter()
                .map(|(symbol, targets)| (symbol.clone(), shift(targets)))
                .collect(),
        });
    }
}

fn add_epsilon<S>(nodes: &mut [NfaNode<S>], origin: StateId, destination: StateId) {
    nodes[origin].epsilon.insert(destination);
}

fn single(state: StateId) -> StateSet {
    let mut set = StateSet::new();
    set.insert(state);
    set
}

/// Accepts what either `a1` or `a2` accepts.
///
/// Layout: fresh start `0`, `a1` from `1`, `a2` from `1 + |a1|`, fresh final last.
pub fn union<S: Symbol>(a1: &Nfa<S>, a2: &Nfa<S>) -> Nfa<S> {
    let start = 0;
    let d1 = 1;
    let d2 = d1 + a1.states();
    let end = d2 + a2.states();

    let mut nodes: Vec<NfaNode<S>> = Vec::with_capacity(end + 1);
    nodes.push(NfaNode::new());
    append_shifted(&mut nodes, a1, d1);
    append_shifted(&mut nodes, a2, d2);
    nodes.push(NfaNode::new());

    add_epsilon(&mut nodes, start, a1.start() + d1);
    add_epsilon(&mut nodes, start, a2.start() + d2);
    for accept in a1.finals().iter() {
        add_epsilon(&mut nodes, accept + d1, end);
    }
    for accept in a2.finals().iter() {
        add_epsilon(&mut nodes, accept + d2, end);
    }

    Nfa::from_nodes(nodes, start, single(end))
}

/// Accepts `w1 w2` whenever `a1` accepts `w1` and `a2` accepts `w2`.
///
/// `a1` keeps its numbering and start state, `a2` follows at `|a1|`, and one
/// fresh final state comes last.
pub fn concatenate<S: Symbol>(a1: &Nfa<S>, a2: &Nfa<S>) -> Nfa<S> {
    let d2 = a1.states();
    let end = d2 + a2.states();

    let mut nodes: Vec<NfaNode<S>> = Vec::with_capacity(end + 1);
    append_shifted(&mut nodes, a1, 0);
    append_shifted(&mut nodes, a2, d2);
    nodes.push(NfaNode::new());

    for accept in a1.finals().iter() {
        add_epsilon(&mut nodes, accept, a2.start() + d2);
    }
    for accept in a2.finals().iter() {
        add_epsilon(&mut nodes, accept + d2, end);
    }

    Nfa::from_nodes(nodes, a1.start(), single(end))
}

/// Kleene star: zero or more repetitions of what `a` accepts.
///
/// Layout: fresh start `0`, `a` from `1`, fresh final last. The start reaches
/// the final directly for the empty string, and every final of `a` loops back
/// to its start as well as exiting to the new final.
pub fn closure_star<S: Symbol>(a: &Nfa<S>) -> Nfa<S> {
    let start = 0;
    let d1 = 1;
    let end = d1 + a.states();
    let inner_start = a.start() + d1;

    let mut nodes: Vec<NfaNode<S>> = Vec::with_capacity(end + 1);
    nodes.push(NfaNode::new());
    append_shifted(&mut nodes, a, d1);
    nodes.push(NfaNode::new());

    add_epsilon(&mut nodes, start, inner_start);
    add_epsilon(&mut nodes, start, end);
    for accept in a.finals().iter() {
        add_epsilon(&mut nodes, accept + d1, inner_start);
        add_epsilon(&mut nodes, accept + d1, end);
    }

    Nfa::from_nodes(nodes, start, single(end))
}
