//! Import and export statements.
//!
//! Inside `declare module` blocks Flow only accepts type-level imports, so
//! default and namespace imports become `import typeof` and named imports
//! become `import type`. Enum bindings always go through `import typeof`
//! since a Flow enum lowering is a value.

use super::qualifier::react_rename;
use super::statements::PrintScope;
use super::{Printer, quote_single};
use flowgen_binder::symbol_flags;
use flowgen_parser::{NodeData, NodeIndex, NodeList};

/// Named bindings of one import, split by how Flow imports them.
#[derive(Default)]
struct ImportGroups {
    values: Vec<String>,
    types: Vec<String>,
    typeofs: Vec<String>,
}

impl<'a> Printer<'a> {
    pub(crate) fn print_import(&mut self, node: NodeIndex, scope: &PrintScope) -> String {
        let arena = self.arena();
        let Some(NodeData::ImportDeclaration {
            import_clause,
            module_specifier,
        }) = arena.data(node)
        else {
            return String::new();
        };
        let specifier = arena.string_literal_text(*module_specifier).unwrap_or_default();
        let from = quote_single(specifier);
        let Some(NodeData::ImportClause {
            is_type_only,
            name,
            named_bindings,
        }) = arena.data(*import_clause)
        else {
            // Side-effect import; meaningless inside a module declaration.
            return if scope.in_module {
                String::new()
            } else {
                format!("import {from};")
            };
        };
        let type_level = *is_type_only || scope.in_module;
        let default = arena.identifier_text(*name);
        let mut lines = Vec::new();

        let namespace = match arena.data(*named_bindings) {
            Some(NodeData::NamespaceImport { name }) => arena.identifier_text(*name),
            _ => None,
        };
        let groups = match arena.data(*named_bindings) {
            Some(NodeData::NamedImports { elements }) => {
                self.import_groups(elements, specifier, type_level)
            }
            _ => ImportGroups::default(),
        };

        if type_level {
            let keyword = if *is_type_only && !scope.in_module {
                "type"
            } else {
                "typeof"
            };
            match (default, namespace) {
                (Some(d), Some(ns)) => lines.push(format!("import typeof {d}, * as {ns} from {from};")),
                (Some(d), None) => lines.push(format!("import {keyword} {d} from {from};")),
                (None, Some(ns)) => lines.push(format!("import typeof * as {ns} from {from};")),
                (None, None) => {}
            }
        } else {
            let mut head = Vec::new();
            if let Some(d) = default {
                head.push(d.to_string());
            }
            if let Some(ns) = namespace {
                head.push(format!("* as {ns}"));
            }
            if !groups.values.is_empty() {
                head.push(format!("{{ {} }}", groups.values.join(", ")));
            }
            if !head.is_empty() {
                lines.push(format!("import {} from {from};", head.join(", ")));
            }
        }
        if !groups.types.is_empty() {
            lines.push(format!("import type {{ {} }} from {from};", groups.types.join(", ")));
        }
        if !groups.typeofs.is_empty() {
            lines.push(format!("import typeof {{ {} }} from {from};", groups.typeofs.join(", ")));
        }
        lines.join("\n")
    }

    fn import_groups(&self, elements: &NodeList, specifier: &str, type_level: bool) -> ImportGroups {
        let arena = self.arena();
        let mut groups = ImportGroups::default();
        for element in elements.iter() {
            let Some(NodeData::ImportSpecifier {
                is_type_only,
                property_name,
                name,
            }) = arena.data(element)
            else {
                continue;
            };
            let Some(local) = arena.identifier_text(*name) else {
                continue;
            };
            let text = if specifier == "react" {
                match arena.identifier_text(*property_name) {
                    Some(imported) => {
                        format!("{} as {local}", react_rename(imported).unwrap_or(imported))
                    }
                    None => react_rename(local).unwrap_or(local).to_string(),
                }
            } else {
                match arena.identifier_text(*property_name) {
                    Some(imported) => format!("{imported} as {local}"),
                    None => local.to_string(),
                }
            };
            if type_level && self.binds_enum(element) {
                groups.typeofs.push(text);
            } else if type_level || *is_type_only {
                groups.types.push(text);
            } else {
                groups.values.push(text);
            }
        }
        groups
    }

    fn binds_enum(&self, specifier: NodeIndex) -> bool {
        let checker = self.checker();
        checker
            .symbol_at_location(specifier)
            .map(|id| checker.resolve_alias(id))
            .and_then(|id| checker.symbol(id))
            .is_some_and(|symbol| symbol.has_any_flags(symbol_flags::ENUM))
    }

    // =========================================================================
    // Exports
    // =========================================================================

    pub(crate) fn print_export(&mut self, node: NodeIndex, scope: &PrintScope) -> String {
        let arena = self.arena();
        let Some(NodeData::ExportDeclaration {
            is_type_only,
            export_clause,
            module_specifier,
        }) = arena.data(node)
        else {
            return String::new();
        };
        let from = arena
            .string_literal_text(*module_specifier)
            .map(|m| format!(" from {}", quote_single(m)))
            .unwrap_or_default();
        match arena.data(*export_clause) {
            None => format!("declare export *{from};"),
            Some(NodeData::NamespaceExport { name }) => format!(
                "declare export * as {}{from};",
                arena.identifier_text(*name).unwrap_or_default()
            ),
            Some(NodeData::NamedExports { elements }) => {
                let mut values = Vec::new();
                let mut types = Vec::new();
                for element in elements.iter() {
                    let Some(NodeData::ExportSpecifier {
                        is_type_only: inline_type,
                        property_name,
                        name,
                    }) = arena.data(element)
                    else {
                        continue;
                    };
                    let Some(exported) = arena.identifier_text(*name) else {
                        continue;
                    };
                    let text = match arena.identifier_text(*property_name) {
                        Some(local) => format!("{local} as {exported}"),
                        None => exported.to_string(),
                    };
                    if *is_type_only || *inline_type || self.exports_type_only(element) {
                        types.push(text);
                    } else {
                        values.push(text);
                    }
                }
                let mut lines = Vec::new();
                if !types.is_empty() {
                    let keyword = if scope.in_module { "declare export type" } else { "export type" };
                    lines.push(format!("{keyword} {{ {} }}{from};", types.join(", ")));
                }
                if !values.is_empty() {
                    lines.push(format!("declare export {{ {} }}{from};", values.join(", ")));
                }
                lines.join("\n")
            }
            Some(_) => String::new(),
        }
    }

    /// Whether an export specifier names something with no value side.
    fn exports_type_only(&self, specifier: NodeIndex) -> bool {
        let checker = self.checker();
        let Some(id) = checker.symbol_at_location(specifier) else {
            return false;
        };
        checker.symbol(checker.resolve_alias(id)).is_some_and(|symbol| {
            symbol.has_any_flags(symbol_flags::TYPE) && !symbol.has_any_flags(symbol_flags::VALUE)
        })
    }

    /// `export = X` and `export default X`.
    pub(crate) fn print_export_assignment(&mut self, node: NodeIndex) -> String {
        let arena = self.arena();
        let Some(NodeData::ExportAssignment {
            is_export_equals,
            expression,
        }) = arena.data(node)
        else {
            return String::new();
        };
        let value = match arena.data(*expression) {
            Some(NodeData::Identifier { .. } | NodeData::PropertyAccessExpression { .. }) => {
                format!("typeof {}", self.print_entity(*expression, true))
            }
            Some(_) => self.print_literal(*expression),
            None => "any".to_string(),
        };
        if *is_export_equals {
            format!("declare module.exports: {value};")
        } else {
            format!("declare export default {value};")
        }
    }
}
