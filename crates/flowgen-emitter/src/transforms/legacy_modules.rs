//! `module Foo {}` is the pre-2015 spelling of `namespace Foo {}`.
//!
//! ```typescript
//! declare module Foo { const a: number; }   // becomes a namespace
//! declare module "foo" { const a: number; } // stays an ambient module
//! ```

use flowgen_parser::{NodeArena, NodeData, NodeFlags, NodeIndex};
use std::convert::Infallible;

/// Flag every identifier-named module declaration as a namespace.
pub(crate) fn normalize(arena: &mut NodeArena, root: NodeIndex) -> NodeIndex {
    let Ok(root) = arena.rewrite::<Infallible>(root, &mut |arena, index| {
        let Some(node) = arena.get(index) else {
            return Ok(None);
        };
        let NodeData::ModuleDeclaration { name, .. } = &node.data else {
            return Ok(None);
        };
        if node.flags.contains(NodeFlags::NAMESPACE)
            || !matches!(arena.data(*name), Some(NodeData::Identifier { .. }))
        {
            return Ok(None);
        }
        let (flags, modifiers, data) = (
            node.flags | NodeFlags::NAMESPACE,
            node.modifiers,
            node.data.clone(),
        );
        Ok(Some(arena.add_rewritten(index, flags, modifiers, data)))
    });
    root
}
