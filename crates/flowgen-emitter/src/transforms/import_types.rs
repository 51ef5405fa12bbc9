//! Replace `import("m")` types with references through a namespace import.
//!
//! ```typescript
//! type C = import("react").ComponentType<{}>;
//! type M = typeof import("./mod");
//! ```
//!
//! becomes
//!
//! ```typescript
//! import * as $Flowgen$Import$react from "react";
//! import * as $Flowgen$Import$_2e__2f_mod from "./mod";
//! type C = $Flowgen$Import$react.ComponentType<{}>;
//! type M = typeof $Flowgen$Import$_2e__2f_mod;
//! ```

use crate::compiler::CompileError;
use flowgen_parser::{ModifierFlags, NodeArena, NodeData, NodeFlags, NodeIndex, NodeList};
use indexmap::IndexMap;
use std::fmt::Write;

const IMPORT_PREFIX: &str = "$Flowgen$Import$";

/// Identifier bound to the namespace import of `specifier`.
///
/// ASCII letters and digits are kept; every other character is written as
/// `_<hex>_`, so distinct specifiers never share an identifier.
pub fn import_identifier(specifier: &str) -> String {
    let mut out = String::with_capacity(IMPORT_PREFIX.len() + specifier.len());
    out.push_str(IMPORT_PREFIX);
    for ch in specifier.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else {
            let _ = write!(out, "_{:x}_", ch as u32);
        }
    }
    out
}

fn module_specifier(arena: &NodeArena, argument: NodeIndex) -> Option<String> {
    match arena.data(argument)? {
        NodeData::LiteralType { literal } => arena.string_literal_text(*literal).map(str::to_string),
        NodeData::StringLiteral { text } => Some(text.clone()),
        _ => None,
    }
}

/// `A.B` rooted at `root`: `root.A.B`.
fn prefix_entity(arena: &mut NodeArena, entity: NodeIndex, root: &str) -> NodeIndex {
    match arena.data(entity) {
        Some(NodeData::QualifiedName { left, right }) => {
            let (left, right) = (*left, *right);
            let left = prefix_entity(arena, left, root);
            arena.add_synthesized(entity, NodeData::QualifiedName { left, right })
        }
        _ => {
            let left = arena.add_identifier(entity, root);
            arena.add_synthesized(entity, NodeData::QualifiedName { left, right: entity })
        }
    }
}

pub(crate) fn eliminate(arena: &mut NodeArena, root: NodeIndex) -> Result<NodeIndex, CompileError> {
    // specifier -> first import type naming it
    let mut imports: IndexMap<String, NodeIndex> = IndexMap::new();

    let rewritten = arena.rewrite(root, &mut |arena, index| {
        let Some(NodeData::ImportType {
            is_type_of,
            argument,
            qualifier,
            type_arguments,
        }) = arena.data(index).cloned()
        else {
            return Ok(None);
        };
        let Some(specifier) = module_specifier(arena, argument) else {
            return Err(CompileError::UnexpectedInput {
                description: format!(
                    "import type argument must be a string literal, found {}",
                    arena.kind_name(argument)
                ),
            });
        };
        let identifier = import_identifier(&specifier);
        imports.entry(specifier).or_insert(index);

        if qualifier.is_none() {
            if type_arguments.is_some() {
                return Err(CompileError::ImpossibleSyntax {
                    description: "type arguments on a module import type".to_string(),
                });
            }
            let expr_name = arena.add_identifier(index, identifier);
            return Ok(Some(arena.add_synthesized(
                index,
                NodeData::TypeQuery {
                    expr_name,
                    type_arguments: None,
                },
            )));
        }

        let entity = prefix_entity(arena, qualifier, &identifier);
        let data = if is_type_of {
            NodeData::TypeQuery {
                expr_name: entity,
                type_arguments,
            }
        } else {
            NodeData::TypeReference {
                type_name: entity,
                type_arguments,
            }
        };
        Ok(Some(arena.add_synthesized(index, data)))
    })?;

    if imports.is_empty() {
        return Ok(rewritten);
    }
    let Some(NodeData::SourceFile {
        file_name,
        statements,
    }) = arena.data(rewritten).cloned()
    else {
        return Ok(rewritten);
    };

    let mut prepended = NodeList::new();
    for (specifier, like) in imports {
        let name = arena.add_identifier(like, import_identifier(&specifier));
        let namespace = arena.add_synthesized(like, NodeData::NamespaceImport { name });
        let clause = arena.add_synthesized(
            like,
            NodeData::ImportClause {
                is_type_only: false,
                name: NodeIndex::NONE,
                named_bindings: namespace,
            },
        );
        let module_specifier = arena.add_synthesized(like, NodeData::StringLiteral { text: specifier });
        prepended.push(arena.add_synthesized(
            like,
            NodeData::ImportDeclaration {
                import_clause: clause,
                module_specifier,
            },
        ));
    }
    for statement in statements.iter() {
        prepended.push(statement);
    }
    Ok(arena.add_rewritten(
        rewritten,
        NodeFlags::SYNTHESIZED,
        ModifierFlags::empty(),
        NodeData::SourceFile {
            file_name,
            statements: prepended,
        },
    ))
}
