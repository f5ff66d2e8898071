//! Plain-text and Graphviz renderings of the constructed automata

use regdfa::{Dfa, Machine};

/// List every NFA state with its outgoing edges
pub fn nfa_listing(nfa: &Machine) -> String {
    let mut out = String::new();

    let endpoint = |id: Option<usize>| id.map_or_else(|| "-".to_string(), |id| id.to_string());
    out.push_str(&format!("Start State: {}\n", endpoint(nfa.start())));
    out.push_str(&format!("Final State: {}\n\n", endpoint(nfa.accept())));

    for state in nfa.states() {
        out.push_str(&format!("State {}", state.id));
        if state.is_start {
            out.push_str(" (start)");
        }
        if state.is_final {
            out.push_str(" (final)");
        }
        out.push('\n');

        if state.edges.is_empty() {
            out.push_str("  no outgoing edges\n");
        }
        for edge in &state.edges {
            out.push_str(&format!("  {} --{}--> {}\n", state.id, edge.label, edge.target));
        }
    }

    out
}

const CELL: usize = 7;

/// The DFA transition table, final states marked with `*`
pub fn dfa_table(dfa: &Dfa) -> String {
    let mut out = String::new();

    let finals: Vec<String> = dfa.final_states().iter().map(|id| id.to_string()).collect();
    out.push_str(&format!("Start State: {}\n", dfa.start()));
    out.push_str(&format!("Final States: {{ {} }}\n\n", finals.join(", ")));

    out.push_str(&format!("{:>width$} |", "State", width = CELL));
    for symbol in dfa.alphabet() {
        out.push_str(&format!(" {:>width$} |", symbol, width = CELL));
    }
    out.push('\n');

    out.push_str(&format!("{}+", "-".repeat(CELL + 1)));
    for _ in dfa.alphabet() {
        out.push_str(&format!("{}+", "-".repeat(CELL + 2)));
    }
    out.push('\n');

    for state in dfa.states() {
        let label = format!("{}{}", if state.is_final { "*" } else { "" }, state.id);
        out.push_str(&format!("{:>width$} |", label, width = CELL));
        for &symbol in dfa.alphabet() {
            let cell = dfa
                .transition(state.id, symbol)
                .map_or_else(|| "-".to_string(), |to| to.to_string());
            out.push_str(&format!(" {:>width$} |", cell, width = CELL));
        }
        out.push('\n');
    }

    out.push_str("\n(* denotes final state)\n");
    out
}

/// A Graphviz digraph of the DFA
pub fn dfa_dot(dfa: &Dfa) -> String {
    let mut out = String::from("digraph dfa {\n    rankdir = LR;\n");
    out.push_str("    __start [shape = point];\n");

    for state in dfa.states() {
        let shape = if state.is_final { "doublecircle" } else { "circle" };
        out.push_str(&format!("    q{} [shape = {}];\n", state.id, shape));
    }

    out.push_str(&format!("    __start -> q{};\n", dfa.start()));
    for (from, symbol, to) in dfa.transitions() {
        out.push_str(&format!(
            "    q{} -> q{} [label = \"{}\"];\n",
            from,
            to,
            escape_label(symbol)
        ));
    }

    out.push_str("}\n");
    out
}

/// Escape a symbol for use inside a quoted DOT string
fn escape_label(symbol: char) -> String {
    match symbol {
        '"' | '\\' => format!("\\{}", symbol),
        _ => symbol.to_string(),
    }
}
