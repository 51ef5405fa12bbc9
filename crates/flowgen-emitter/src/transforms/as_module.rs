//! Wrap a whole file in `declare module '<name>' { ... }`.

use flowgen_parser::{ModifierFlags, NodeArena, NodeData, NodeFlags, NodeIndex, NodeList};

/// Files that already declare a top-level module or namespace are returned
/// unchanged. Wrapped statements keep only their `declare` modifier.
pub(crate) fn wrap(arena: &mut NodeArena, root: NodeIndex, module_name: &str) -> NodeIndex {
    let Some(NodeData::SourceFile {
        file_name,
        statements,
    }) = arena.data(root)
    else {
        return root;
    };
    let (file_name, statements) = (file_name.clone(), statements.clone());
    if statements
        .iter()
        .any(|s| matches!(arena.data(s), Some(NodeData::ModuleDeclaration { .. })))
    {
        return root;
    }

    let mut wrapped = NodeList::new();
    for statement in statements.iter() {
        let Some(node) = arena.get(statement) else {
            continue;
        };
        let (flags, modifiers, data) = (
            node.flags,
            node.modifiers & ModifierFlags::DECLARE,
            node.data.clone(),
        );
        wrapped.push(arena.add_rewritten(statement, flags, modifiers, data));
    }

    let name = arena.add_synthesized(
        root,
        NodeData::StringLiteral {
            text: module_name.to_string(),
        },
    );
    let body = arena.add_synthesized(root, NodeData::ModuleBlock { statements: wrapped });
    let module = arena.add_rewritten(
        root,
        NodeFlags::SYNTHESIZED,
        ModifierFlags::DECLARE,
        NodeData::ModuleDeclaration { name, body },
    );
    arena.add_rewritten(
        root,
        NodeFlags::SYNTHESIZED,
        ModifierFlags::empty(),
        NodeData::SourceFile {
            file_name,
            statements: NodeList::from_vec(vec![module]),
        },
    )
}
