//! Library utility types and their Flow counterparts.
//!
//! Only references that resolve to the embedded library's declaration are
//! rewritten; a local `type Omit = ...` prints literally.

use super::{Printer, quote};
use flowgen_parser::{NodeData, NodeIndex};

/// Names with a one-to-one Flow spelling. Type arguments pass through.
const RENAMED: &[(&str, &str)] = &[
    ("NonNullable", "$NonMaybeType"),
    ("Readonly", "$ReadOnly"),
    ("ReadonlyArray", "$ReadOnlyArray"),
    ("ReadonlyMap", "$ReadOnlyMap"),
    ("ReadonlySet", "$ReadOnlySet"),
    ("RegExpMatchArray", "RegExp$matchResult"),
];

/// Names rewritten by a generator over their type arguments.
const GENERATED: &[&str] = &["Omit", "Parameters", "Partial", "Record", "ReturnType"];

/// Whether `name` has an entry in the substitution table.
pub fn is_substituted_name(name: &str) -> bool {
    RENAMED.iter().any(|(from, _)| *from == name) || GENERATED.contains(&name)
}

impl<'a> Printer<'a> {
    /// Flow text for the library type `name` applied to `arguments`, or
    /// `None` when the name has no entry or the arity does not fit.
    pub(crate) fn substitute(&mut self, name: &str, arguments: &[NodeIndex]) -> Option<String> {
        if let Some((_, flow)) = RENAMED.iter().find(|(from, _)| *from == name) {
            return Some(format!("{flow}{}", self.type_arguments(arguments)));
        }
        let printed = match (name, arguments) {
            ("Partial", [object]) => {
                let object = self.print_type(*object);
                let rest = Self::object_type(&[], self.options().inexact);
                format!("$Rest<{object}, {rest}>")
            }
            ("ReturnType", [function]) => format!(
                "$Call<<R>((...args: any[]) => R) => R, {}>",
                self.print_type(*function)
            ),
            ("Parameters", [function]) => format!(
                "$Call<<A: $ReadOnlyArray<mixed>>((...args: A) => mixed) => A, {}>",
                self.print_type(*function)
            ),
            ("Record", [key, value]) => {
                let value = self.print_type(*value);
                let exact = !self.options().inexact;
                self.record_type(*key, &value, exact)
            }
            ("Omit", [object, keys]) => {
                let object = self.print_type(*object);
                let keys = self.record_type(*keys, "any", true);
                format!("$Diff<{object}, {keys}>")
            }
            _ => return None,
        };
        Some(printed)
    }

    /// `Record<K, V>` as an object type: one field per literal key, otherwise
    /// an indexer.
    pub(crate) fn record_type(&mut self, key: NodeIndex, value: &str, exact: bool) -> String {
        let members = match self.literal_keys(key) {
            Some(keys) => keys
                .into_iter()
                .map(|key| format!("{key}: {value}"))
                .collect::<Vec<_>>(),
            None => vec![format!("[key: {}]: {value}", self.print_type(key))],
        };
        Self::object_type(&members, !exact)
    }

    /// Printed property names when `key` is a literal or a union of
    /// literals only.
    fn literal_keys(&self, key: NodeIndex) -> Option<Vec<String>> {
        let arena = self.arena();
        match arena.data(key)? {
            NodeData::ParenthesizedType { type_node } => self.literal_keys(*type_node),
            NodeData::LiteralType { literal } => match arena.data(*literal)? {
                NodeData::StringLiteral { text } => Some(vec![property_key(text)]),
                NodeData::NumericLiteral { text } => Some(vec![text.clone()]),
                _ => None,
            },
            NodeData::UnionType { types } => {
                let mut keys = Vec::with_capacity(types.len());
                for member in types.iter() {
                    keys.extend(self.literal_keys(member)?);
                }
                Some(keys)
            }
            _ => None,
        }
    }
}

/// A string used as an object key: bare when it is an identifier.
pub(crate) fn property_key(text: &str) -> String {
    let mut chars = text.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        text.to_string()
    } else {
        quote(text)
    }
}
