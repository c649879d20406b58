//! The grammar context threaded through every production.
//!
//! A [`Context`] is a small `Copy` value. Productions take it by value and
//! hand modified copies to their children, so leaving a construct never
//! needs to restore anything.

use bitflags::bitflags;

bitflags! {
    /// Ambient grammar mode for one production.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Context: u16 {
        /// Strict mode code
        const STRICT = 1 << 0;
        /// Module goal
        const MODULE = 1 << 1;
        /// Inside a function body: `return` is allowed
        const IN_FUNCTION = 1 << 2;
        /// Inside a loop body: `continue` is allowed
        const IN_ITERATION = 1 << 3;
        /// Inside a switch: unlabelled `break` is allowed
        const IN_SWITCH = 1 << 4;
        /// `await` is an operator (async function or module top level)
        const IN_ASYNC = 1 << 5;
        /// `yield` is an operator
        const IN_GENERATOR = 1 << 6;
        /// `in` is not a binary operator (for-statement heads)
        const DISALLOW_IN = 1 << 7;
        /// `super.x` is allowed
        const ALLOW_SUPER_PROPERTY = 1 << 8;
        /// `super()` is allowed
        const ALLOW_SUPER_CALL = 1 << 9;
        /// `new.target` is allowed
        const ALLOW_NEW_TARGET = 1 << 10;
        /// Inside a class field initializer
        const IN_CLASS_FIELD_INIT = 1 << 11;
        /// Inside a class static block
        const IN_STATIC_BLOCK = 1 << 12;
    }
}

/// Flags that only make sense inside the function that set them.
const FUNCTION_LOCAL: Context = Context::IN_FUNCTION
    .union(Context::IN_ITERATION)
    .union(Context::IN_SWITCH)
    .union(Context::IN_ASYNC)
    .union(Context::IN_GENERATOR)
    .union(Context::DISALLOW_IN)
    .union(Context::ALLOW_SUPER_PROPERTY)
    .union(Context::ALLOW_SUPER_CALL)
    .union(Context::ALLOW_NEW_TARGET)
    .union(Context::IN_CLASS_FIELD_INIT)
    .union(Context::IN_STATIC_BLOCK);

impl Context {
    /// The context for the top of a program.
    pub fn program(module: bool, strict: bool) -> Self {
        let mut ctx = Context::empty();
        if module {
            ctx |= Context::MODULE | Context::STRICT | Context::IN_ASYNC;
        }
        if strict {
            ctx |= Context::STRICT;
        }
        ctx
    }

    /// Returns true in strict mode code.
    pub fn is_strict(self) -> bool {
        self.contains(Context::STRICT)
    }

    /// Returns true for the module goal.
    pub fn is_module(self) -> bool {
        self.contains(Context::MODULE)
    }

    /// Returns true where `await` is an operator.
    pub fn is_async(self) -> bool {
        self.contains(Context::IN_ASYNC)
    }

    /// Returns true where `yield` is an operator.
    pub fn is_generator(self) -> bool {
        self.contains(Context::IN_GENERATOR)
    }

    /// Returns a copy with `flag` set or cleared.
    pub fn with(self, flag: Context, on: bool) -> Self {
        let mut ctx = self;
        ctx.set(flag, on);
        ctx
    }

    /// Returns a copy with `flag` cleared.
    pub fn without(self, flag: Context) -> Self {
        self.difference(flag)
    }

    /// The context for the parameters and body of an ordinary function or
    /// method. Only the strict and module bits survive.
    pub fn function(self, is_async: bool, generator: bool) -> Self {
        self.difference(FUNCTION_LOCAL)
            .union(Context::IN_FUNCTION | Context::ALLOW_NEW_TARGET)
            .with(Context::IN_ASYNC, is_async)
            .with(Context::IN_GENERATOR, generator)
    }

    /// The context for the parameters and body of an arrow function.
    ///
    /// Arrows see the `super`, `new.target` and class-initializer state of
    /// the code around them.
    pub fn arrow(self, is_async: bool) -> Self {
        let inherited = self.intersection(
            Context::ALLOW_SUPER_PROPERTY
                | Context::ALLOW_SUPER_CALL
                | Context::ALLOW_NEW_TARGET
                | Context::IN_CLASS_FIELD_INIT
                | Context::IN_STATIC_BLOCK,
        );
        self.difference(FUNCTION_LOCAL)
            .union(inherited)
            .union(Context::IN_FUNCTION)
            .with(Context::IN_ASYNC, is_async)
    }

    /// The context for a class body: always strict.
    pub fn class_body(self) -> Self {
        self | Context::STRICT
    }

    /// The context for a class field initializer.
    pub fn field_init(self) -> Self {
        self.difference(FUNCTION_LOCAL)
            | Context::ALLOW_SUPER_PROPERTY
            | Context::ALLOW_NEW_TARGET
            | Context::IN_CLASS_FIELD_INIT
    }

    /// The context for a class static block.
    pub fn static_block(self) -> Self {
        self.difference(FUNCTION_LOCAL)
            | Context::ALLOW_SUPER_PROPERTY
            | Context::ALLOW_NEW_TARGET
            | Context::IN_STATIC_BLOCK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_context() {
        let script = Context::program(false, false);
        assert!(!script.is_strict());
        assert!(!script.is_async());

        let module = Context::program(true, false);
        assert!(module.is_strict());
        assert!(module.is_module());
        assert!(module.is_async());
    }

    #[test]
    fn test_function_resets_local_flags() {
        let outer = Context::program(false, true)
            | Context::IN_ITERATION
            | Context::IN_GENERATOR
            | Context::DISALLOW_IN;
        let inner = outer.function(true, false);
        assert!(inner.is_strict());
        assert!(inner.is_async());
        assert!(!inner.is_generator());
        assert!(!inner.contains(Context::IN_ITERATION));
        assert!(!inner.contains(Context::DISALLOW_IN));
        assert!(inner.contains(Context::IN_FUNCTION));
        assert!(inner.contains(Context::ALLOW_NEW_TARGET));
    }

    #[test]
    fn test_arrow_inherits_super() {
        let method = Context::program(false, false).function(false, true)
            | Context::ALLOW_SUPER_PROPERTY;
        let arrow = method.arrow(false);
        assert!(arrow.contains(Context::ALLOW_SUPER_PROPERTY));
        assert!(arrow.contains(Context::ALLOW_NEW_TARGET));
        assert!(!arrow.is_generator());
    }

    #[test]
    fn test_top_level_arrow_has_no_new_target() {
        let arrow = Context::program(false, false).arrow(false);
        assert!(!arrow.contains(Context::ALLOW_NEW_TARGET));
        assert!(arrow.contains(Context::IN_FUNCTION));
    }

    #[test]
    fn test_class_initializers() {
        let ctx = Context::program(false, false).class_body();
        assert!(ctx.is_strict());
        let init = ctx.field_init();
        assert!(init.contains(Context::IN_CLASS_FIELD_INIT));
        assert!(!init.contains(Context::IN_FUNCTION));
        let block = ctx.static_block();
        assert!(block.contains(Context::IN_STATIC_BLOCK));
        assert!(!block.is_async());
    }
}
