//! Desugar `import X = ...` declarations.
//!
//! ```typescript
//! import fs = require("fs");   // import * as fs from "fs";
//! export import B = A.B;       // export declare var B: typeof A.B;
//! ```

use flowgen_parser::{NodeArena, NodeData, NodeFlags, NodeIndex, NodeList};
use std::convert::Infallible;

pub(crate) fn desugar(arena: &mut NodeArena, root: NodeIndex) -> NodeIndex {
    let Ok(root) = arena.rewrite::<Infallible>(root, &mut |arena, index| {
        let Some(node) = arena.get(index) else {
            return Ok(None);
        };
        let NodeData::ImportEqualsDeclaration {
            is_type_only,
            name,
            module_reference,
        } = node.data
        else {
            return Ok(None);
        };
        let (flags, modifiers) = (node.flags, node.modifiers);

        match arena.data(module_reference) {
            Some(NodeData::ExternalModuleReference { expression }) => {
                let specifier = *expression;
                let namespace = arena.add_synthesized(index, NodeData::NamespaceImport { name });
                let clause = arena.add_synthesized(
                    index,
                    NodeData::ImportClause {
                        is_type_only,
                        name: NodeIndex::NONE,
                        named_bindings: namespace,
                    },
                );
                Ok(Some(arena.add_rewritten(
                    index,
                    flags | NodeFlags::SYNTHESIZED,
                    Default::default(),
                    NodeData::ImportDeclaration {
                        import_clause: clause,
                        module_specifier: specifier,
                    },
                )))
            }
            Some(NodeData::Identifier { .. } | NodeData::QualifiedName { .. }) => {
                let query = arena.add_synthesized(
                    module_reference,
                    NodeData::TypeQuery {
                        expr_name: module_reference,
                        type_arguments: None,
                    },
                );
                let declaration = arena.add_synthesized(
                    index,
                    NodeData::VariableDeclaration {
                        name,
                        type_node: query,
                        initializer: NodeIndex::NONE,
                    },
                );
                Ok(Some(arena.add_rewritten(
                    index,
                    flags | NodeFlags::SYNTHESIZED,
                    modifiers,
                    NodeData::VariableStatement {
                        declarations: NodeList::from_vec(vec![declaration]),
                    },
                )))
            }
            // Left for the printer to report.
            _ => Ok(None),
        }
    });
    root
}
