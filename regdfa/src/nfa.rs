//! NFA (Nondeterministic Finite Automaton) construction
//!
//! This module implements Thompson's construction over a postfix
//! expression. Every fragment is a [`Machine`] that owns its states;
//! the composition operators take their operands by value, so a fragment
//! that has been combined into a larger one can no longer be touched.

use crate::alphabet::{Alphabet, CONCAT, STAR, UNION};
use crate::error::{Arity, ConversionError, Result};
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An NFA state ID
pub type StateId = usize;

/// The label on an NFA edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Consumes one alphabet symbol
    Symbol(char),
    /// Consumes nothing
    Epsilon,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(c) => write!(f, "{}", c),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}

/// An outgoing edge of an NFA state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub target: StateId,
    pub label: Label,
}

/// An NFA state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaState {
    pub id: StateId,
    pub is_start: bool,
    pub is_final: bool,
    /// Outgoing edges in the order they were added
    pub edges: Vec<Edge>,
}

impl NfaState {
    fn new(id: StateId) -> Self {
        NfaState {
            id,
            is_start: false,
            is_final: false,
            edges: Vec::new(),
        }
    }
}

/// Hands out state IDs for one conversion run
///
/// IDs only ever increase, so two fragments built from the same generator
/// can be merged without renumbering.
#[derive(Debug, Default)]
pub struct StateIdGen {
    next: StateId,
}

impl StateIdGen {
    pub fn new() -> Self {
        StateIdGen { next: 0 }
    }

    /// Allocate the next unused ID
    pub fn fresh(&mut self) -> StateId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// How many IDs have been handed out
    pub fn issued(&self) -> usize {
        self.next
    }
}

/// An NFA fragment with one start state and one final state
///
/// A completed NFA is just the last fragment left after Thompson's
/// construction. `Machine::new()` is the empty machine, which has no start
/// state and cannot be converted.
#[derive(Debug, Default)]
pub struct Machine {
    states: BTreeMap<StateId, NfaState>,
    start: StateId,
    accept: StateId,
}

impl Machine {
    /// Create an empty machine
    pub fn new() -> Self {
        Machine {
            states: BTreeMap::new(),
            start: 0,
            accept: 0,
        }
    }

    /// A fragment with a fresh start and a fresh final state, unconnected
    fn with_endpoints(ids: &mut StateIdGen) -> Self {
        let start = ids.fresh();
        let accept = ids.fresh();

        let mut machine = Machine::new();
        machine.states.insert(
            start,
            NfaState {
                is_start: true,
                ..NfaState::new(start)
            },
        );
        machine.states.insert(
            accept,
            NfaState {
                is_final: true,
                ..NfaState::new(accept)
            },
        );
        machine.start = start;
        machine.accept = accept;
        machine
    }

    /// Add an edge; both ends must already belong to this machine
    fn connect(&mut self, from: StateId, to: StateId, label: Label) {
        debug_assert!(self.states.contains_key(&to));
        if let Some(state) = self.states.get_mut(&from) {
            state.edges.push(Edge { target: to, label });
        }
    }

    /// Clear the start and final flags so the endpoints become interior states
    fn demote_endpoints(&mut self) {
        if let Some(state) = self.states.get_mut(&self.start) {
            state.is_start = false;
        }
        if let Some(state) = self.states.get_mut(&self.accept) {
            state.is_final = false;
        }
    }

    /// Take over every state of `other`
    fn absorb(&mut self, other: Machine) {
        self.states.extend(other.states);
    }

    /// Fragment matching exactly one `symbol`
    pub fn symbol(ids: &mut StateIdGen, symbol: char) -> Self {
        let mut machine = Machine::with_endpoints(ids);
        machine.connect(machine.start, machine.accept, Label::Symbol(symbol));
        machine
    }

    /// Kleene closure of `self`
    pub fn closure(mut self, ids: &mut StateIdGen) -> Self {
        let (inner_start, inner_accept) = (self.start, self.accept);
        self.demote_endpoints();

        let mut machine = Machine::with_endpoints(ids);
        let (start, accept) = (machine.start, machine.accept);
        machine.absorb(self);

        machine.connect(start, inner_start, Label::Epsilon);
        machine.connect(start, accept, Label::Epsilon);
        machine.connect(inner_accept, accept, Label::Epsilon);
        machine.connect(inner_accept, inner_start, Label::Epsilon);
        machine
    }

    /// Union of `self` (left) and `right`
    pub fn union(mut self, mut right: Machine, ids: &mut StateIdGen) -> Self {
        let (left_start, left_accept) = (self.start, self.accept);
        let (right_start, right_accept) = (right.start, right.accept);
        self.demote_endpoints();
        right.demote_endpoints();

        let mut machine = Machine::with_endpoints(ids);
        let (start, accept) = (machine.start, machine.accept);
        machine.absorb(self);
        machine.absorb(right);

        machine.connect(start, left_start, Label::Epsilon);
        machine.connect(start, right_start, Label::Epsilon);
        machine.connect(left_accept, accept, Label::Epsilon);
        machine.connect(right_accept, accept, Label::Epsilon);
        machine
    }

    /// Concatenation of `self` (left) and `right`
    ///
    /// The right start state is merged into the left final state: its
    /// outgoing edges move over and the state itself is dropped. No new
    /// state is allocated.
    pub fn concat(mut self, mut right: Machine) -> Self {
        let joint = self.accept;
        let moved = right
            .states
            .remove(&right.start)
            .map(|state| state.edges)
            .unwrap_or_default();

        if let Some(state) = self.states.get_mut(&joint) {
            state.is_final = false;
            state.edges.extend(moved);
        }

        self.accept = right.accept;
        self.absorb(right);
        self
    }

    /// Build an NFA from a postfix expression
    ///
    /// Symbols push a one-edge fragment; `*` wraps the top fragment; `+` and
    /// `.` pop the right operand, then the left one, and push the combined
    /// fragment. Exactly one fragment must remain at the end.
    pub fn from_postfix(alphabet: &Alphabet, postfix: &str, ids: &mut StateIdGen) -> Result<Self> {
        let mut stack: Vec<Machine> = Vec::new();

        for (position, ch) in postfix.chars().enumerate() {
            match ch {
                STAR => {
                    let inner = pop_operand(&mut stack, ch, position)?;
                    stack.push(inner.closure(ids));
                }
                UNION => {
                    let right = pop_operand(&mut stack, ch, position)?;
                    let left = pop_operand(&mut stack, ch, position)?;
                    stack.push(left.union(right, ids));
                }
                CONCAT => {
                    let right = pop_operand(&mut stack, ch, position)?;
                    let left = pop_operand(&mut stack, ch, position)?;
                    stack.push(left.concat(right));
                }
                symbol if alphabet.contains(symbol) => {
                    stack.push(Machine::symbol(ids, symbol));
                }
                other => {
                    return Err(ConversionError::MalformedPostfix(Arity::UnexpectedSymbol {
                        ch: other,
                        position,
                    }));
                }
            }
            trace!("after '{}': {} fragment(s) on the stack", ch, stack.len());
        }

        if stack.len() > 1 {
            return Err(ConversionError::MalformedPostfix(Arity::UnjoinedOperands {
                count: stack.len(),
            }));
        }
        let machine = stack
            .pop()
            .ok_or(ConversionError::MalformedPostfix(Arity::NoOperands))?;

        debug!(
            "built NFA for {:?}: {} states, start {}, final {}",
            postfix,
            machine.len(),
            machine.start,
            machine.accept
        );
        Ok(machine)
    }

    /// The start state, or `None` for the empty machine
    pub fn start(&self) -> Option<StateId> {
        self.states.get(&self.start).map(|state| state.id)
    }

    /// The final state, or `None` for the empty machine
    pub fn accept(&self) -> Option<StateId> {
        self.states.get(&self.accept).map(|state| state.id)
    }

    pub fn state(&self, id: StateId) -> Option<&NfaState> {
        self.states.get(&id)
    }

    /// All states in ascending ID order
    pub fn states(&self) -> impl Iterator<Item = &NfaState> {
        self.states.values()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether `id` is a final state of this machine
    pub fn is_final(&self, id: StateId) -> bool {
        self.states.get(&id).is_some_and(|state| state.is_final)
    }

    /// Compute epsilon closure of a set of states
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<_> = states.iter().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(state) = self.states.get(&id) else {
                continue;
            };
            for edge in &state.edges {
                if edge.label == Label::Epsilon && closure.insert(edge.target) {
                    stack.push(edge.target);
                }
            }
        }

        closure
    }

    /// States reachable from `states` by one edge labeled `symbol`
    pub fn move_on(&self, states: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        states
            .iter()
            .filter_map(|id| self.states.get(id))
            .flat_map(|state| &state.edges)
            .filter(|edge| edge.label == Label::Symbol(symbol))
            .map(|edge| edge.target)
            .collect()
    }
}

fn pop_operand(stack: &mut Vec<Machine>, op: char, position: usize) -> Result<Machine> {
    stack
        .pop()
        .ok_or(ConversionError::MalformedPostfix(Arity::MissingOperand { op, position }))
}
