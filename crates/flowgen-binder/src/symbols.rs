//! Symbols, symbol tables and the symbol arena.

use flowgen_parser::NodeIndex;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

/// Symbol flags describing what a name declares.
pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PROPERTY: u32 = 1 << 2;
    pub const ENUM_MEMBER: u32 = 1 << 3;
    pub const FUNCTION: u32 = 1 << 4;
    pub const CLASS: u32 = 1 << 5;
    pub const INTERFACE: u32 = 1 << 6;
    pub const CONST_ENUM: u32 = 1 << 7;
    pub const REGULAR_ENUM: u32 = 1 << 8;
    /// Namespace or module that contains values.
    pub const VALUE_MODULE: u32 = 1 << 9;
    /// Namespace that only contains types.
    pub const NAMESPACE_MODULE: u32 = 1 << 10;
    pub const TYPE_LITERAL: u32 = 1 << 11;
    pub const METHOD: u32 = 1 << 12;
    pub const CONSTRUCTOR: u32 = 1 << 13;
    pub const GET_ACCESSOR: u32 = 1 << 14;
    pub const SET_ACCESSOR: u32 = 1 << 15;
    pub const SIGNATURE: u32 = 1 << 16;
    pub const TYPE_PARAMETER: u32 = 1 << 17;
    pub const TYPE_ALIAS: u32 = 1 << 18;
    /// Import binding or re-export; see `Symbol::import_module`.
    pub const ALIAS: u32 = 1 << 19;
    /// Symbol of an external module file.
    pub const SOURCE_FILE: u32 = 1 << 20;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const ENUM: u32 = REGULAR_ENUM | CONST_ENUM;
    pub const MODULE: u32 = VALUE_MODULE | NAMESPACE_MODULE;
    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;
    pub const CLASS_MEMBER: u32 = METHOD | ACCESSOR | PROPERTY;
    pub const VALUE: u32 = VARIABLE
        | PROPERTY
        | ENUM_MEMBER
        | FUNCTION
        | CLASS
        | ENUM
        | VALUE_MODULE
        | METHOD
        | ACCESSOR;
    pub const TYPE: u32 =
        CLASS | INTERFACE | ENUM | ENUM_MEMBER | TYPE_LITERAL | TYPE_PARAMETER | TYPE_ALIAS;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered name -> symbol map. Declaration order is kept so output is stable.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    table: IndexMap<String, SymbolId, FxBuildHasher>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    pub fn set(&mut self, name: String, id: SymbolId) {
        self.table.insert(name, id);
    }

    pub fn has(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.table.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub flags: u32,
    pub declarations: SmallVec<[NodeIndex; 2]>,
    pub value_declaration: NodeIndex,
    pub parent: Option<SymbolId>,
    /// Namespace exports, enum members and module exports.
    pub exports: SymbolTable,
    /// Class, interface and type literal members.
    pub members: SymbolTable,
    /// Non-exported bindings of a module block, such as its imports.
    pub locals: SymbolTable,
    /// Declared in the embedded library file.
    pub is_lib: bool,
    /// Alias declared by `import type` / `export type`, or a type-only specifier.
    pub is_type_only: bool,
    /// Module specifier an alias imports from.
    pub import_module: Option<String>,
    /// Exported name an alias refers to; `None` imports the whole module.
    pub import_name: Option<String>,
    /// Local entity an alias refers to (`export { a as b }`, `import X = A.B`).
    pub alias_target: NodeIndex,
    /// `export * from "m"` specifiers of a module symbol.
    pub export_stars: Vec<String>,
    /// File the symbol was declared in.
    pub file: usize,
}

impl Symbol {
    pub fn new(id: SymbolId, flags: u32, name: String) -> Self {
        Symbol {
            id,
            name,
            flags,
            declarations: SmallVec::new(),
            value_declaration: NodeIndex::NONE,
            parent: None,
            exports: SymbolTable::new(),
            members: SymbolTable::new(),
            locals: SymbolTable::new(),
            is_lib: false,
            is_type_only: false,
            import_module: None,
            import_name: None,
            alias_target: NodeIndex::NONE,
            export_stars: Vec::new(),
            file: 0,
        }
    }

    #[inline]
    pub fn has_any_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }

    #[inline]
    pub fn first_declaration(&self) -> NodeIndex {
        self.declarations.first().copied().unwrap_or(NodeIndex::NONE)
    }
}

#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, flags: u32, name: String) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol::new(id, flags, name));
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
