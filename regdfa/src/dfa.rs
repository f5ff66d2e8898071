//! Subset construction
//!
//! Converts a Thompson NFA into a DFA whose states stand for sets of NFA
//! states. The table is an insertion-ordered map keyed by those sets: the
//! position of an entry is its DFA state ID, so IDs follow discovery order
//! and a set is never materialized twice.

use crate::alphabet::Alphabet;
use crate::error::{ConversionError, Result};
use crate::nfa::{Machine, StateId};
use indexmap::IndexMap;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A DFA state ID
pub type DfaStateId = usize;

/// A set of NFA states
pub type Subset = BTreeSet<StateId>;

/// A DFA state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaState {
    pub id: DfaStateId,
    pub is_start: bool,
    pub is_final: bool,
    /// The NFA states this state stands for
    pub origin: Subset,
    /// At most one target per symbol; a missing symbol has no transition
    pub transitions: BTreeMap<char, DfaStateId>,
}

/// A DFA produced by subset construction
#[derive(Debug, Clone)]
pub struct Dfa {
    table: IndexMap<Subset, DfaState>,
    start: DfaStateId,
    alphabet: Vec<char>,
}

impl Dfa {
    /// Run subset construction over `nfa`
    ///
    /// Subsets are explored breadth first, symbols in ascending order, so
    /// the same NFA always produces the same numbering.
    pub fn from_nfa(nfa: &Machine, alphabet: &Alphabet) -> Result<Self> {
        let nfa_start = nfa.start().ok_or(ConversionError::EmptyAutomaton)?;

        let mut dfa = Dfa {
            table: IndexMap::new(),
            start: 0,
            alphabet: alphabet.symbols().collect(),
        };

        let seed = nfa.epsilon_closure(&BTreeSet::from([nfa_start]));
        dfa.start = dfa.materialize(seed, true);

        let mut queue = VecDeque::from([dfa.start]);
        while let Some(current) = queue.pop_front() {
            let subset = match dfa.table.get_index(current) {
                Some((subset, _)) => subset.clone(),
                None => continue,
            };

            let is_final = subset.iter().any(|&id| nfa.is_final(id));
            let mut transitions = BTreeMap::new();

            for symbol in alphabet.symbols() {
                let moved = nfa.move_on(&subset, symbol);
                if moved.is_empty() {
                    continue;
                }

                let target_set = nfa.epsilon_closure(&moved);
                let target = match dfa.table.get_index_of(&target_set) {
                    Some(existing) => existing,
                    None => {
                        let created = dfa.materialize(target_set, false);
                        queue.push_back(created);
                        created
                    }
                };
                trace!("D{} --{}--> D{}", current, symbol, target);
                transitions.insert(symbol, target);
            }

            if let Some((_, state)) = dfa.table.get_index_mut(current) {
                state.is_final = is_final;
                state.transitions = transitions;
            }
        }

        debug!(
            "subset construction: {} NFA states -> {} DFA states, {} final",
            nfa.len(),
            dfa.len(),
            dfa.final_states().len()
        );
        Ok(dfa)
    }

    /// Record a new DFA state for `subset` and return its ID
    fn materialize(&mut self, subset: Subset, is_start: bool) -> DfaStateId {
        let id = self.table.len();
        trace!("D{} = {:?}", id, subset);
        self.table.insert(
            subset.clone(),
            DfaState {
                id,
                is_start,
                is_final: false,
                origin: subset,
                transitions: BTreeMap::new(),
            },
        );
        id
    }

    pub fn start(&self) -> DfaStateId {
        self.start
    }

    pub fn state(&self, id: DfaStateId) -> Option<&DfaState> {
        self.table.get_index(id).map(|(_, state)| state)
    }

    /// All states in ID order
    pub fn states(&self) -> impl Iterator<Item = &DfaState> {
        self.table.values()
    }

    /// The DFA state standing for exactly `subset`, if it was reached
    pub fn lookup(&self, subset: &Subset) -> Option<&DfaState> {
        self.table.get(subset)
    }

    pub fn origin_of(&self, id: DfaStateId) -> Option<&Subset> {
        self.table.get_index(id).map(|(subset, _)| subset)
    }

    pub fn final_states(&self) -> Vec<DfaStateId> {
        self.states()
            .filter(|state| state.is_final)
            .map(|state| state.id)
            .collect()
    }

    /// The target of `(from, symbol)`, if there is one
    pub fn transition(&self, from: DfaStateId, symbol: char) -> Option<DfaStateId> {
        self.state(from)
            .and_then(|state| state.transitions.get(&symbol))
            .copied()
    }

    /// Every `(from, symbol, to)` triple, by source state then symbol
    pub fn transitions(&self) -> impl Iterator<Item = (DfaStateId, char, DfaStateId)> + '_ {
        self.states().flat_map(|state| {
            state
                .transitions
                .iter()
                .map(move |(&symbol, &to)| (state.id, symbol, to))
        })
    }

    /// The alphabet in display order
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
