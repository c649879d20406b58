//! Binding scopes and redeclaration checking.
//!
//! Scopes live in an arena and refer to their parent by [`ScopeId`], so the
//! tracker can be cloned and inspected after a parse. Every conflict is
//! detected when the offending name is declared: a `var` is recorded in each
//! frame between its block and its var scope, which lets a later lexical
//! declaration in any of those frames see it.
//!
//! | Declared | Conflicts with (same frame) |
//! |----------|-----------------------------|
//! | Lexical  | lexical, function, var |
//! | Function | lexical; also var unless the frame treats functions as var |
//! | Var      | lexical (except a simple catch parameter) and, in block frames, functions; checked in every frame up to the var scope |
//!
//! Sloppy block-level functions are additionally hoisted to the enclosing
//! var scope ("annex B"). Candidates travel upward as blocks close and are
//! committed when the var scope closes, unless a lexical binding of the same
//! name sits in between. A dropped candidate is never an error.

use bitflags::bitflags;
use rustc_hash::FxHashMap;
use std::fmt;
use tracing::trace;

bitflags! {
    /// What kind of construct opened a scope.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScopeFlags: u8 {
        /// The program
        const TOP = 1 << 0;
        /// A function (including arrows)
        const FUNCTION = 1 << 1;
        /// An arrow function
        const ARROW = 1 << 2;
        /// A catch clause whose parameter is a plain identifier
        const SIMPLE_CATCH = 1 << 3;
        /// A class static block
        const STATIC_BLOCK = 1 << 4;
    }
}

impl ScopeFlags {
    /// Scopes that own `var` bindings.
    pub const VAR: ScopeFlags = ScopeFlags::TOP
        .union(ScopeFlags::FUNCTION)
        .union(ScopeFlags::STATIC_BLOCK);
}

/// Index of a frame in the scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The program scope.
    pub const TOP: ScopeId = ScopeId(0);

    /// Position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a name was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// `var`, and strict or top-level functions where functions act as var
    Var,
    /// `let`, `const`, `class`, imports, destructured catch parameters
    Lexical,
    /// A sloppy-mode function declaration in a block or function body
    Function,
    /// The identifier parameter of a catch clause
    SimpleCatch,
    /// A formal parameter
    Param,
    /// A `var` in a `for (var x of ...)` head
    ForOfVar,
}

/// One recorded declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// The declaring construct
    pub kind: BindingKind,
    /// Byte offset of the bound identifier
    pub offset: usize,
}

/// A redeclaration found by [`ScopeTracker::declare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeConflict {
    /// The redeclared name
    pub name: String,
    /// Offset of the rejected declaration
    pub offset: usize,
    /// The earlier declaration it clashes with
    pub previous: Binding,
}

impl fmt::Display for ScopeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier '{}' has already been declared", self.name)
    }
}

impl std::error::Error for ScopeConflict {}

/// One scope record.
#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    /// Construct that opened the scope
    pub flags: ScopeFlags,
    /// Enclosing scope
    pub parent: Option<ScopeId>,
    /// `var`-like names visible in this frame
    pub var: FxHashMap<String, Binding>,
    /// Lexically declared names
    pub lexical: FxHashMap<String, Binding>,
    /// Sloppy-mode function declarations
    pub functions: FxHashMap<String, Binding>,
    /// Block functions hoisted into this var scope
    pub hoisted_functions: FxHashMap<String, Binding>,
    /// Hoisting candidates still travelling towards the var scope
    pub pending_hoists: Vec<(String, Binding)>,
    /// Name of the simple catch parameter, for SIMPLE_CATCH frames
    pub catch_param: Option<String>,
}

impl ScopeFrame {
    fn new(flags: ScopeFlags, parent: Option<ScopeId>) -> Self {
        Self {
            flags,
            parent,
            ..Self::default()
        }
    }

    /// Returns true if `var` declarations stop at this frame.
    pub fn is_var_scope(&self) -> bool {
        self.flags.intersects(ScopeFlags::VAR)
    }

    /// Returns true if `name` is bound in this frame in any way.
    pub fn declares(&self, name: &str) -> bool {
        self.var.contains_key(name)
            || self.lexical.contains_key(name)
            || self.functions.contains_key(name)
    }

    fn lexical_blocks_var(&self, name: &str) -> Option<Binding> {
        let binding = *self.lexical.get(name)?;
        if self.flags.contains(ScopeFlags::SIMPLE_CATCH)
            && self.catch_param.as_deref() == Some(name)
        {
            return None;
        }
        Some(binding)
    }
}

/// Tracks declared names across nested scopes.
#[derive(Debug, Clone)]
pub struct ScopeTracker {
    frames: Vec<ScopeFrame>,
    stack: Vec<ScopeId>,
    module: bool,
    annex_b: bool,
}

impl ScopeTracker {
    /// Creates a tracker holding only the program scope.
    ///
    /// `annex_b` enables block-function hoisting; it is off when web
    /// compatibility is disabled.
    pub fn new(module: bool, annex_b: bool) -> Self {
        Self {
            frames: vec![ScopeFrame::new(ScopeFlags::TOP, None)],
            stack: vec![ScopeId::TOP],
            module,
            annex_b,
        }
    }

    /// Opens a scope nested in the current one.
    pub fn push_scope(&mut self, flags: ScopeFlags) -> ScopeId {
        let id = ScopeId(self.frames.len());
        self.frames.push(ScopeFrame::new(flags, Some(self.current())));
        self.stack.push(id);
        trace!(scope = id.0, ?flags, "push scope");
        id
    }

    /// Closes the current scope.
    ///
    /// Block scopes forward their annex-B candidates to the parent; a var
    /// scope commits the candidates that reached it.
    pub fn pop_scope(&mut self) -> ScopeId {
        // The program scope is closed by `finish`.
        if self.stack.len() == 1 {
            return ScopeId::TOP;
        }
        let id = match self.stack.pop() {
            Some(id) => id,
            None => return ScopeId::TOP,
        };
        trace!(scope = id.0, "pop scope");
        if self.annex_b {
            self.settle_hoists(id);
        }
        id
    }

    /// Closes the program scope once the whole program has been read.
    pub fn finish(&mut self) {
        if self.annex_b {
            self.settle_hoists(ScopeId::TOP);
        }
    }

    fn settle_hoists(&mut self, id: ScopeId) {
        let frame = &mut self.frames[id.0];
        let mut candidates = std::mem::take(&mut frame.pending_hoists);
        // Names hoisted from nested blocks must not cross a lexical binding
        // of this frame. The frame's own functions are not lexical here.
        candidates.retain(|(name, _)| frame.lexical_blocks_var(name).is_none());

        if frame.is_var_scope() {
            for (name, binding) in candidates {
                frame.hoisted_functions.entry(name).or_insert(binding);
            }
            return;
        }

        candidates.extend(
            frame
                .functions
                .iter()
                .filter(|(_, b)| b.kind == BindingKind::Function)
                .map(|(name, b)| (name.clone(), *b)),
        );
        if let Some(parent) = frame.parent {
            self.frames[parent.0].pending_hoists.extend(candidates);
        }
    }

    /// The innermost open scope.
    pub fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId::TOP)
    }

    /// The frame with the given id.
    pub fn frame(&self, id: ScopeId) -> &ScopeFrame {
        &self.frames[id.0]
    }

    /// Marks the current scope as a catch clause with a simple parameter.
    pub fn set_catch_param(&mut self, name: &str) {
        let id = self.current();
        let frame = &mut self.frames[id.0];
        frame.flags |= ScopeFlags::SIMPLE_CATCH;
        frame.catch_param = Some(name.to_string());
    }

    /// Returns true if top-level function declarations in `frame` act as var.
    fn treats_functions_as_var(&self, frame: &ScopeFrame) -> bool {
        frame.flags.contains(ScopeFlags::FUNCTION)
            || (!self.module && frame.flags.contains(ScopeFlags::TOP))
    }

    /// Returns true if a function declared in the current scope acts as var.
    pub fn functions_act_as_var(&self) -> bool {
        self.treats_functions_as_var(self.frame(self.current()))
    }

    /// Records a declaration of `name` in the current scope.
    pub fn declare(
        &mut self,
        name: &str,
        kind: BindingKind,
        offset: usize,
    ) -> Result<(), ScopeConflict> {
        let binding = Binding { kind, offset };
        let conflict = |previous: Binding| ScopeConflict {
            name: name.to_string(),
            offset,
            previous,
        };
        let current = self.current();

        match kind {
            BindingKind::Lexical => {
                let frame = &self.frames[current.0];
                let previous = frame
                    .lexical
                    .get(name)
                    .or_else(|| frame.functions.get(name))
                    .or_else(|| frame.var.get(name));
                if let Some(previous) = previous {
                    return Err(conflict(*previous));
                }
                self.frames[current.0]
                    .lexical
                    .insert(name.to_string(), binding);
            }
            BindingKind::SimpleCatch => {
                self.frames[current.0]
                    .lexical
                    .insert(name.to_string(), binding);
            }
            BindingKind::Function => {
                let frame = &self.frames[current.0];
                let mut previous = frame.lexical.get(name);
                if !self.treats_functions_as_var(frame) {
                    previous = previous.or_else(|| frame.var.get(name));
                }
                if let Some(previous) = previous {
                    return Err(conflict(*previous));
                }
                self.frames[current.0]
                    .functions
                    .entry(name.to_string())
                    .or_insert(binding);
            }
            BindingKind::Var | BindingKind::Param | BindingKind::ForOfVar => {
                let mut id = current;
                loop {
                    let frame = &self.frames[id.0];
                    if let Some(previous) = frame.lexical_blocks_var(name) {
                        return Err(conflict(previous));
                    }
                    if kind == BindingKind::ForOfVar
                        && frame.catch_param.as_deref() == Some(name)
                    {
                        if let Some(previous) = frame.lexical.get(name) {
                            return Err(conflict(*previous));
                        }
                    }
                    if !self.treats_functions_as_var(frame) {
                        if let Some(previous) = frame.functions.get(name) {
                            return Err(conflict(*previous));
                        }
                    }
                    let is_var_scope = frame.is_var_scope();
                    let parent = frame.parent;
                    self.frames[id.0]
                        .var
                        .entry(name.to_string())
                        .or_insert(binding);
                    match parent {
                        Some(parent) if !is_var_scope => id = parent,
                        _ => break,
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns true if the program scope binds `name`.
    pub fn is_top_level_declared(&self, name: &str) -> bool {
        self.frames[ScopeId::TOP.0].declares(name)
    }

    /// Names hoisted into the given var scope by annex-B semantics.
    pub fn hoisted_functions(&self, id: ScopeId) -> impl Iterator<Item = &str> {
        self.frames[id.0].hoisted_functions.keys().map(String::as_str)
    }

    /// Number of frames ever opened, including closed ones.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false: the program scope exists from the start.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BindingKind::*;

    fn script() -> ScopeTracker {
        ScopeTracker::new(false, true)
    }

    fn block(t: &mut ScopeTracker) -> ScopeId {
        t.push_scope(ScopeFlags::empty())
    }

    #[test]
    fn test_let_after_var_conflicts() {
        let mut t = script();
        t.declare("a", Var, 4).unwrap();
        let err = t.declare("a", Lexical, 11).unwrap_err();
        assert_eq!(err.name, "a");
        assert_eq!(err.previous.offset, 4);
    }

    #[test]
    fn test_var_after_let_conflicts() {
        let mut t = script();
        t.declare("a", Lexical, 4).unwrap();
        assert!(t.declare("a", Var, 11).is_err());
    }

    #[test]
    fn test_var_redeclaration_is_fine() {
        let mut t = script();
        t.declare("foo", Var, 4).unwrap();
        t.declare("foo", Var, 15).unwrap();
    }

    #[test]
    fn test_var_escapes_block() {
        // { var a; } let a;
        let mut t = script();
        block(&mut t);
        t.declare("a", Var, 6).unwrap();
        t.pop_scope();
        assert!(t.declare("a", Lexical, 15).is_err());
    }

    #[test]
    fn test_block_let_then_outer_var() {
        // { let a; } var a;
        let mut t = script();
        block(&mut t);
        t.declare("a", Lexical, 6).unwrap();
        t.pop_scope();
        t.declare("a", Var, 15).unwrap();
    }

    #[test]
    fn test_var_crosses_block_let() {
        // { let a; { var a; } }
        let mut t = script();
        block(&mut t);
        t.declare("a", Lexical, 6).unwrap();
        block(&mut t);
        assert!(t.declare("a", Var, 17).is_err());
    }

    #[test]
    fn test_var_stops_at_function() {
        // let a; function f() { var a; }
        let mut t = script();
        t.declare("a", Lexical, 4).unwrap();
        t.push_scope(ScopeFlags::FUNCTION);
        t.declare("a", Var, 26).unwrap();
    }

    #[test]
    fn test_simple_catch_allows_var() {
        let mut t = script();
        t.push_scope(ScopeFlags::empty());
        t.set_catch_param("e");
        t.declare("e", SimpleCatch, 14).unwrap();
        t.declare("e", Var, 23).unwrap();
        assert!(t.declare("e", Lexical, 30).is_err());
    }

    #[test]
    fn test_simple_catch_rejects_for_of_var() {
        let mut t = script();
        t.push_scope(ScopeFlags::empty());
        t.set_catch_param("e");
        t.declare("e", SimpleCatch, 14).unwrap();
        block(&mut t);
        assert!(t.declare("e", ForOfVar, 30).is_err());
    }

    #[test]
    fn test_destructured_catch_rejects_var() {
        let mut t = script();
        t.push_scope(ScopeFlags::empty());
        t.declare("e", Lexical, 15).unwrap();
        assert!(t.declare("e", Var, 25).is_err());
    }

    #[test]
    fn test_sloppy_block_functions_may_repeat() {
        let mut t = script();
        block(&mut t);
        t.declare("f", Function, 11).unwrap();
        t.declare("f", Function, 29).unwrap();
        assert!(t.declare("f", Lexical, 40).is_err());
    }

    #[test]
    fn test_block_function_conflicts_with_var() {
        // { var f; function f() {} }
        let mut t = script();
        block(&mut t);
        t.declare("f", Var, 6).unwrap();
        assert!(t.declare("f", Function, 18).is_err());
    }

    #[test]
    fn test_top_level_function_acts_as_var_in_scripts() {
        let mut t = script();
        t.declare("f", Function, 9).unwrap();
        t.declare("f", Var, 20).unwrap();
        assert!(t.declare("f", Lexical, 30).is_err());
    }

    #[test]
    fn test_module_top_level_function_is_lexical() {
        let mut t = ScopeTracker::new(true, false);
        t.declare("f", Function, 9).unwrap();
        assert!(t.declare("f", Var, 20).is_err());
    }

    #[test]
    fn test_param_conflicts_with_body_let() {
        let mut t = script();
        t.push_scope(ScopeFlags::FUNCTION);
        t.declare("a", Param, 11).unwrap();
        assert!(t.declare("a", Lexical, 20).is_err());
        t.declare("a", Var, 20).unwrap();
    }

    #[test]
    fn test_annex_b_hoisting() {
        // function g() { { function f() {} } }
        let mut t = script();
        let g = t.push_scope(ScopeFlags::FUNCTION);
        block(&mut t);
        t.declare("f", Function, 26).unwrap();
        t.pop_scope();
        t.pop_scope();
        assert_eq!(t.hoisted_functions(g).collect::<Vec<_>>(), vec!["f"]);
    }

    #[test]
    fn test_annex_b_skipped_across_lexical() {
        // function g() { let f; { function f() {} } }
        let mut t = script();
        let g = t.push_scope(ScopeFlags::FUNCTION);
        t.declare("f", Lexical, 19).unwrap();
        block(&mut t);
        t.declare("f", Function, 33).unwrap();
        t.pop_scope();
        t.pop_scope();
        assert_eq!(t.hoisted_functions(g).count(), 0);
    }

    #[test]
    fn test_annex_b_skipped_for_later_lexical() {
        // { function f() {} } let f;
        let mut t = script();
        block(&mut t);
        t.declare("f", Function, 11).unwrap();
        t.pop_scope();
        t.declare("f", Lexical, 25).unwrap();
        t.finish();
        assert_eq!(t.hoisted_functions(ScopeId::TOP).count(), 0);
    }

    #[test]
    fn test_annex_b_top_level_commit() {
        let mut t = script();
        block(&mut t);
        t.declare("f", Function, 2).unwrap();
        t.pop_scope();
        assert_eq!(t.hoisted_functions(ScopeId::TOP).count(), 0);
        t.finish();
        assert_eq!(t.hoisted_functions(ScopeId::TOP).collect::<Vec<_>>(), vec!["f"]);
    }

    #[test]
    fn test_annex_b_disabled() {
        let mut t = ScopeTracker::new(false, false);
        let g = t.push_scope(ScopeFlags::FUNCTION);
        block(&mut t);
        t.declare("f", Function, 26).unwrap();
        t.pop_scope();
        t.pop_scope();
        assert_eq!(t.hoisted_functions(g).count(), 0);
    }

    #[test]
    fn test_arena_keeps_closed_frames() {
        let mut t = script();
        let id = block(&mut t);
        t.declare("x", Lexical, 0).unwrap();
        assert_eq!(t.pop_scope(), id);
        assert_eq!(t.current(), ScopeId::TOP);
        assert_eq!(t.len(), 2);
        assert_eq!(t.frame(id).parent, Some(ScopeId::TOP));
        assert!(t.frame(id).lexical.contains_key("x"));
    }
}
