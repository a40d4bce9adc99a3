mod automaton;
mod closure;
mod compose;
mod dfa;
mod disjoint_set;
mod error;
mod minimize;
mod nfa;
mod subset;


// states are plain indices, same as the scanner's FA nodes
pub type StateId = usize;

pub use automaton::{vocabulary, FiniteAutomaton, StateSet, Symbol};
pub use closure::{epsilon_closure, epsilon_closure_with, move_on, Worklist};
pub use compose::{closure_star, concatenate, union};
pub use dfa::Dfa;
pub use disjoint_set::DisjointSet;
pub use error::AutomatonError;
pub use minimize::{minimize, minimize_with, state_partition, MinimizeOptions};
pub use nfa::Nfa;
pub use subset::{nfa_to_dfa, nfa_to_dfa_with, SubsetOptions};
