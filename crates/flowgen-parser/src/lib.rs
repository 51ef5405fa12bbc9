//! Parser and syntax tree for TypeScript declaration files.
//!
//! The tree lives in a [`parser::NodeArena`]; nodes refer to each other by
//! [`parser::NodeIndex`]. Several files (and rewritten copies of their
//! statements) can share one arena.

pub mod parser;

pub use parser::{
    ModifierFlags, Node, NodeArena, NodeData, NodeFlags, NodeIndex, NodeList, ParserState,
};
