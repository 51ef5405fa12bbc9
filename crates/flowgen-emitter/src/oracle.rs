//! The queries the printer asks of a parsed and bound program.
//!
//! Everything type-dependent in the translation (qualifying a reference,
//! deciding whether a name is the library's `Partial` or a local one, whether
//! an intersection member is a class) goes through [`TypeChecker`]. The
//! reference implementation is [`flowgen_binder::Program`].

use flowgen_binder::{Program, Symbol, SymbolId};
use flowgen_common::Position;
use flowgen_parser::{NodeArena, NodeData, NodeIndex};

pub trait TypeChecker {
    fn arena(&self) -> &NodeArena;

    /// Symbol referenced or declared at `node`.
    fn symbol_at_location(&self, node: NodeIndex) -> Option<SymbolId>;

    fn symbol(&self, id: SymbolId) -> Option<&Symbol>;

    fn parent_node(&self, node: NodeIndex) -> NodeIndex;

    /// Follow import aliases to the declaration they name.
    fn resolve_alias(&self, id: SymbolId) -> SymbolId;

    /// Whether a type reference (or heritage expression) names a class.
    fn is_class_reference(&self, type_node: NodeIndex) -> bool;

    /// Whether `id` is declared by the embedded standard library.
    fn is_lib_symbol(&self, id: SymbolId) -> bool;

    fn file_name(&self, node: NodeIndex) -> &str;

    /// Zero-based line and column of `node`'s start.
    fn position_of(&self, node: NodeIndex) -> Option<Position>;
}

impl TypeChecker for Program {
    fn arena(&self) -> &NodeArena {
        Program::arena(self)
    }

    fn symbol_at_location(&self, node: NodeIndex) -> Option<SymbolId> {
        Program::symbol_at_location(self, node)
    }

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        Program::symbol(self, id)
    }

    fn parent_node(&self, node: NodeIndex) -> NodeIndex {
        Program::parent_node(self, node)
    }

    fn resolve_alias(&self, id: SymbolId) -> SymbolId {
        Program::resolve_alias(self, id)
    }

    fn is_class_reference(&self, type_node: NodeIndex) -> bool {
        let name = match Program::arena(self).data(type_node) {
            Some(NodeData::TypeReference { type_name, .. }) => *type_name,
            Some(NodeData::ExpressionWithTypeArguments { expression, .. }) => *expression,
            Some(NodeData::ParenthesizedType { type_node }) => {
                return TypeChecker::is_class_reference(self, *type_node);
            }
            _ => return false,
        };
        Program::symbol_at_location(self, name).is_some_and(|id| Program::is_class_reference(self, id))
    }

    fn is_lib_symbol(&self, id: SymbolId) -> bool {
        Program::is_lib_symbol(self, id)
    }

    fn file_name(&self, node: NodeIndex) -> &str {
        self.file_name_of(node)
    }

    fn position_of(&self, node: NodeIndex) -> Option<Position> {
        Program::position_of(self, node)
    }
}
