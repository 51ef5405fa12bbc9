//! Program: every parsed file in one arena, bound together.
//!
//! A [`ProgramBuilder`] parses the embedded library and the user files into a
//! shared [`NodeArena`]. Callers may replace file roots with rewritten trees
//! before [`ProgramBuilder::build`] binds everything into a [`Program`].

use crate::lib_loader::{LIB_FILE_NAME, LIB_SOURCE};
use crate::state::BinderState;
use crate::symbols::{Symbol, SymbolArena, SymbolId, SymbolTable};
use flowgen_common::diagnostics::Diagnostic;
use flowgen_common::position::{LineMap, Position};
use flowgen_parser::{NodeArena, NodeData, NodeIndex, ParserState};
use rustc_hash::FxHashMap;
use tracing::{debug, info_span};

#[derive(Debug, Clone)]
pub struct SourceFileInfo {
    pub file_name: String,
    pub text: String,
    pub root: NodeIndex,
    pub line_map: LineMap,
    pub is_external_module: bool,
    pub is_lib: bool,
    /// Symbol of an external module file.
    pub symbol: Option<SymbolId>,
    /// Top-level declarations of an external module file.
    pub locals: SymbolTable,
    /// Syntax errors reported while parsing.
    pub parse_diagnostics: Vec<Diagnostic>,
}

pub struct ProgramBuilder {
    arena: NodeArena,
    files: Vec<SourceFileInfo>,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    /// Start a program with the library file already parsed.
    pub fn new() -> Self {
        let mut builder = ProgramBuilder {
            arena: NodeArena::new(),
            files: Vec::new(),
        };
        builder.parse_file(LIB_FILE_NAME.to_string(), LIB_SOURCE.to_string(), true);
        builder
    }

    /// Parse a user file; returns its file index.
    pub fn add_source_file(&mut self, file_name: impl Into<String>, text: impl Into<String>) -> usize {
        self.parse_file(file_name.into(), text.into(), false)
    }

    fn parse_file(&mut self, file_name: String, text: String, is_lib: bool) -> usize {
        let _span = info_span!("parse", file = %file_name).entered();
        let arena = std::mem::take(&mut self.arena);
        let mut parser = ParserState::with_arena(arena, file_name.clone(), text.clone());
        let root = parser.parse_source_file();
        let parse_diagnostics = parser.take_diagnostics();
        self.arena = parser.into_arena();
        debug!(
            file = %file_name,
            nodes = self.arena.len(),
            errors = parse_diagnostics.len(),
            "parsed"
        );
        self.files.push(SourceFileInfo {
            line_map: LineMap::build(&text),
            file_name,
            text,
            root,
            is_external_module: false,
            is_lib,
            symbol: None,
            locals: SymbolTable::new(),
            parse_diagnostics,
        });
        self.files.len() - 1
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn file(&self, file: usize) -> Option<&SourceFileInfo> {
        self.files.get(file)
    }

    /// Indices of the user (non-library) files.
    pub fn user_files(&self) -> impl Iterator<Item = usize> + '_ {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_lib)
            .map(|(i, _)| i)
    }

    /// Replace the root of a file with a rewritten tree.
    pub fn set_file_root(&mut self, file: usize, root: NodeIndex) {
        if let Some(info) = self.files.get_mut(file) {
            info.root = root;
        }
    }

    pub fn build(self) -> Program {
        let _span = info_span!("bind").entered();
        let ProgramBuilder { arena, mut files } = self;

        let (symbols, globals, ambient_modules, node_symbols) = {
            let mut binder = BinderState::new(&arena, files.len());
            for (index, file) in files.iter_mut().enumerate() {
                file.is_external_module =
                    !file.is_lib && BinderState::is_external_module(&arena, file.root);
                binder.bind_source_file(
                    index,
                    &file.file_name,
                    file.root,
                    file.is_external_module,
                    file.is_lib,
                );
            }
            for (index, file) in files.iter_mut().enumerate() {
                file.symbol = binder.file_symbols[index];
                file.locals = std::mem::take(&mut binder.file_locals[index]);
            }
            (
                binder.symbols,
                binder.globals,
                binder.ambient_modules,
                binder.node_symbols,
            )
        };

        let mut parents = vec![NodeIndex::NONE; arena.len()];
        let mut file_by_root = FxHashMap::default();
        let mut file_by_name = FxHashMap::default();
        for (index, file) in files.iter().enumerate() {
            link_parents(&arena, file.root, &mut parents);
            file_by_root.insert(file.root.0, index);
            file_by_name.insert(normalize_path(&file.file_name), index);
        }

        debug!(
            files = files.len(),
            symbols = symbols.len(),
            globals = globals.len(),
            "program bound"
        );
        Program {
            arena,
            files,
            symbols,
            globals,
            ambient_modules,
            node_symbols,
            parents,
            file_by_root,
            file_by_name,
        }
    }
}

fn link_parents(arena: &NodeArena, root: NodeIndex, parents: &mut [NodeIndex]) {
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        for child in arena.children(index) {
            if let Some(slot) = parents.get_mut(child.0 as usize) {
                *slot = index;
            }
            stack.push(child);
        }
    }
}

/// Collapse `.` and `..` segments of a `/`-separated path.
pub(crate) fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }
    let joined = segments.join("/");
    if absolute { format!("/{joined}") } else { joined }
}

pub struct Program {
    pub(crate) arena: NodeArena,
    pub(crate) files: Vec<SourceFileInfo>,
    pub(crate) symbols: SymbolArena,
    pub(crate) globals: SymbolTable,
    pub(crate) ambient_modules: FxHashMap<String, SymbolId>,
    pub(crate) node_symbols: FxHashMap<u32, SymbolId>,
    pub(crate) parents: Vec<NodeIndex>,
    pub(crate) file_by_root: FxHashMap<u32, usize>,
    pub(crate) file_by_name: FxHashMap<String, usize>,
}

impl Program {
    /// Parse and bind a single in-memory file. Returns the program and the
    /// file's index.
    pub fn from_source(file_name: impl Into<String>, text: impl Into<String>) -> (Program, usize) {
        let mut builder = ProgramBuilder::new();
        let file = builder.add_source_file(file_name, text);
        (builder.build(), file)
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn files(&self) -> &[SourceFileInfo] {
        &self.files
    }

    pub fn file(&self, file: usize) -> Option<&SourceFileInfo> {
        self.files.get(file)
    }

    pub fn user_files(&self) -> impl Iterator<Item = usize> + '_ {
        self.files
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.is_lib)
            .map(|(i, _)| i)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn globals(&self) -> &SymbolTable {
        &self.globals
    }

    pub fn ambient_module(&self, specifier: &str) -> Option<SymbolId> {
        self.ambient_modules.get(specifier).copied()
    }

    /// Symbol declared by a declaration node (or its name).
    pub fn node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    pub fn parent_node(&self, node: NodeIndex) -> NodeIndex {
        if node.is_none() {
            return NodeIndex::NONE;
        }
        self.parents
            .get(node.0 as usize)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    /// Index of the file containing `node`.
    pub fn file_of(&self, node: NodeIndex) -> Option<usize> {
        let mut current = node;
        while current.is_some() {
            if let Some(NodeData::SourceFile { .. }) = self.arena.data(current) {
                return self.file_by_root.get(&current.0).copied();
            }
            current = self.parent_node(current);
        }
        None
    }

    pub fn file_name_of(&self, node: NodeIndex) -> &str {
        self.file_of(node)
            .and_then(|f| self.files.get(f))
            .map(|f| f.file_name.as_str())
            .unwrap_or("")
    }

    /// Zero-based line/column of `node`'s start.
    pub fn position_of(&self, node: NodeIndex) -> Option<Position> {
        let file = self.files.get(self.file_of(node)?)?;
        let pos = self.arena.get(node)?.pos;
        Some(file.line_map.offset_to_position(pos, &file.text))
    }

    pub fn is_lib_symbol(&self, id: SymbolId) -> bool {
        self.symbols.get(id).is_some_and(|s| s.is_lib)
    }

    /// Parse errors of all user files.
    pub fn parse_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.files
            .iter()
            .filter(|f| !f.is_lib)
            .flat_map(|f| f.parse_diagnostics.iter())
    }
}
