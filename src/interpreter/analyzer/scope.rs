use std::collections::HashMap;

/// Maximum identifier length for variables, functions and labels.
pub const IDENTIFIER_LEN_MAX: usize = 15;

/// Scope id of the global scope, always present.
pub const GLOBAL_SCOPE: usize = 0;

/// The declared kind of a variable symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A scalar holding a number or a string.
    Scalar,
    /// An array.
    Array,
}

/// One declared variable or parameter.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Scalar or array.
    pub kind: SymbolKind,
    /// Line of the declaration.
    pub line: usize,
}

/// A single lexical scope: the global scope or one function body.
#[derive(Debug, Default)]
struct Scope {
    /// Parent scope id; kept for diagnostics, not for lookup chaining.
    #[allow(dead_code)]
    parent: Option<usize>,
    symbols: HashMap<String, Symbol>,
}

/// An arena of scope records indexed by integer id.
///
/// The arena owns every scope flatly, avoiding graph-shaped ownership;
/// callers hold plain `usize` ids. Resolution tries the named scope, then
/// falls back to the global scope, which matches a language whose functions
/// cannot nest.
#[derive(Debug)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// Creates an arena holding only the global scope.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    /// Appends a fresh scope and returns its id.
    pub fn push_scope(&mut self, parent: usize) -> usize {
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        self.scopes.len() - 1
    }

    /// Declares a symbol in the given scope, replacing nothing.
    ///
    /// Callers are expected to reject duplicates via [`Self::lookup_local`]
    /// first.
    pub fn declare(&mut self, scope: usize, name: &str, symbol: Symbol) {
        self.scopes[scope].symbols.insert(name.to_string(), symbol);
    }

    /// Looks a name up in exactly one scope.
    #[must_use]
    pub fn lookup_local(&self, scope: usize, name: &str) -> Option<&Symbol> {
        self.scopes[scope].symbols.get(name)
    }

    /// Resolves a name from a scope: local first, then the global scope.
    #[must_use]
    pub fn resolve(&self, scope: usize, name: &str) -> Option<&Symbol> {
        self.lookup_local(scope, name)
            .or_else(|| self.lookup_local(GLOBAL_SCOPE, name))
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

/// One declared jump label.
#[derive(Debug, Clone)]
pub struct LabelInfo {
    /// The scope (global or a function's) the label was declared in.
    pub scope: usize,
    /// Line of the declaration.
    pub line: usize,
}

/// All labels of a program, keyed by name.
///
/// Label names are unique program-wide; the owning scope is recorded so a
/// `goto` can be rejected when it crosses a function boundary.
#[derive(Debug, Default)]
pub struct LabelTable {
    labels: HashMap<String, LabelInfo>,
}

impl LabelTable {
    /// Looks up a label by name, anywhere in the program.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&LabelInfo> {
        self.labels.get(name)
    }

    /// Records a label declaration.
    pub fn declare(&mut self, name: &str, info: LabelInfo) {
        self.labels.insert(name.to_string(), info);
    }
}
