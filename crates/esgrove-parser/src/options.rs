//! Parser configuration.

/// Default nesting limit for recursive productions.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Thread stack size that fits [`DEFAULT_MAX_DEPTH`] in unoptimized builds.
pub const PARSER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Options recognised by the parser.
///
/// With the `serde` feature this deserializes from camelCase keys
/// (`module`, `strictByDefault`, `trackSourceLocations`,
/// `webCompatDisabled`, `maxDepth`); missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ParseOptions {
    /// Parse with the module goal (implies strict mode)
    pub module: bool,
    /// Treat script code as strict from the first token
    pub strict_by_default: bool,
    /// Attach `loc` line/column pairs to every node
    pub track_source_locations: bool,
    /// Disable the legacy web-compatibility leniencies
    pub web_compat_disabled: bool,
    /// Maximum nesting depth before the parse is rejected
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            module: false,
            strict_by_default: false,
            track_source_locations: false,
            web_compat_disabled: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Options for a sloppy-mode script.
    pub fn script() -> Self {
        Self::default()
    }

    /// Options for an ES module.
    pub fn module() -> Self {
        Self {
            module: true,
            ..Self::default()
        }
    }

    /// Sets the module goal.
    pub fn with_module(mut self, module: bool) -> Self {
        self.module = module;
        self
    }

    /// Starts script code in strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict_by_default = strict;
        self
    }

    /// Enables `loc` tracking.
    pub fn with_locations(mut self, track: bool) -> Self {
        self.track_source_locations = track;
        self
    }

    /// Disables the web-compatibility leniencies.
    pub fn with_web_compat_disabled(mut self, disabled: bool) -> Self {
        self.web_compat_disabled = disabled;
        self
    }

    /// Sets the nesting limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Returns true if legacy web-compatibility grammar is accepted.
    pub fn web_compat(&self) -> bool {
        !self.web_compat_disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ParseOptions::default();
        assert!(!opts.module);
        assert!(!opts.strict_by_default);
        assert!(opts.web_compat());
        assert_eq!(opts.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder_chain() {
        let opts = ParseOptions::module()
            .with_locations(true)
            .with_web_compat_disabled(true)
            .with_max_depth(32);
        assert!(opts.module);
        assert!(opts.track_source_locations);
        assert!(!opts.web_compat());
        assert_eq!(opts.max_depth, 32);
    }
}
