use crate::parser::{NodeArena, NodeData, NodeIndex, ParserState};
use std::convert::Infallible;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.d.ts".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser.into_arena(), root)
}

#[test]
fn rewrite_without_changes_keeps_indices() {
    let (mut arena, root) = parse("type A = { a: string };\n");
    let before = arena.len();
    let out = arena
        .rewrite::<Infallible>(root, &mut |_, _| Ok(None))
        .unwrap();
    assert_eq!(out, root);
    assert_eq!(arena.len(), before);
}

#[test]
fn rewrite_copies_ancestors_of_replaced_node() {
    let (mut arena, root) = parse("type A = Array<number>;\n");
    let original_statement = arena.statements(root)[0];
    let out = arena
        .rewrite::<Infallible>(root, &mut |arena, node| {
            if let Some(NodeData::KeywordType { .. }) = arena.data(node) {
                let text = arena.add_identifier(node, "Replaced");
                let reference = arena.add_synthesized(
                    node,
                    NodeData::TypeReference {
                        type_name: text,
                        type_arguments: None,
                    },
                );
                return Ok(Some(reference));
            }
            Ok(None)
        })
        .unwrap();
    assert_ne!(out, root);
    let statement = arena.statements(out)[0];
    assert_ne!(statement, original_statement);
    // The parsed tree is untouched.
    assert_eq!(arena.statements(root)[0], original_statement);

    let Some(NodeData::TypeAliasDeclaration { type_node, .. }) = arena.data(statement) else {
        panic!("expected alias");
    };
    let Some(NodeData::TypeReference { type_arguments, .. }) = arena.data(*type_node) else {
        panic!("expected reference");
    };
    let argument = type_arguments.as_ref().unwrap().first().unwrap();
    assert_eq!(
        arena.entity_name_text(match arena.data(argument) {
            Some(NodeData::TypeReference { type_name, .. }) => *type_name,
            _ => NodeIndex::NONE,
        }),
        Some("Replaced".to_string())
    );
}

#[test]
fn rewrite_stops_on_error() {
    let (mut arena, root) = parse("declare const a: string;\ndeclare const b: number;\n");
    let mut seen = 0;
    let result = arena.rewrite(root, &mut |arena, node| {
        if let Some(NodeData::KeywordType { .. }) = arena.data(node) {
            seen += 1;
            return Err("stop");
        }
        Ok(None)
    });
    assert_eq!(result, Err("stop"));
    assert_eq!(seen, 1);
}

fn nested_object_type(depth: usize) -> String {
    format!(
        "type T = {}string{};\n",
        "{ a: ".repeat(depth),
        " }".repeat(depth)
    )
}

#[test]
fn rewrite_survives_deep_nesting() {
    // The parser recurses without growing the stack; give it room.
    let handle = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let (mut arena, root) = parse(&nested_object_type(900));
            let mut replaced = 0;
            let out = arena
                .rewrite::<Infallible>(root, &mut |arena, node| {
                    if let Some(NodeData::KeywordType { .. }) = arena.data(node) {
                        replaced += 1;
                        let name = arena.add_identifier(node, "Leaf");
                        let reference = arena.add_synthesized(
                            node,
                            NodeData::TypeReference {
                                type_name: name,
                                type_arguments: None,
                            },
                        );
                        return Ok(Some(reference));
                    }
                    Ok(None)
                })
                .unwrap();
            (replaced, out != root)
        })
        .unwrap();
    assert_eq!(handle.join().unwrap(), (1, true));
}
