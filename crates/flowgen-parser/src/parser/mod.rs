mod base;
mod node;
mod node_access;
mod node_arena;
mod node_rewrite;
mod state;
mod state_statements;
mod state_statements_class_members;
mod state_types;

pub use base::{NodeIndex, NodeList};
pub use node::{ModifierFlags, Node, NodeArena, NodeData, NodeFlags};
pub use state::ParserState;

#[cfg(test)]
#[path = "tests/state_type_tests.rs"]
mod state_type_tests;

#[cfg(test)]
#[path = "tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "tests/node_rewrite_tests.rs"]
mod node_rewrite_tests;
