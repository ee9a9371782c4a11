//! Syntax kinds for the Rowan-based bracket tree
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! PDDL is bracket-delimited, so the token inventory is small and the tree
//! has a single composite kind: the bracketed group.

/// All syntax kinds (tokens and nodes) in PDDL
///
/// Tokens are leaves (brackets, keywords, comments, atoms).
/// Nodes are composite (bracketed groups and the document root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved but not semantically meaningful)
    // =========================================================================
    /// A run of spaces, tabs, and newlines. Multi-line runs are kept as one
    /// token so blank-line counting downstream sees them whole.
    WHITESPACE = 0,
    /// `; ...` to end of line
    COMMENT,

    // =========================================================================
    // STRUCTURAL TOKENS
    // =========================================================================
    /// `(`
    OPEN_BRACKET,
    /// `(` fused with an immediately following keyword or operator name,
    /// e.g. `(:action`, `(and`, `(=`
    OPEN_BRACKET_OP,
    /// `)`
    CLOSE_BRACKET,
    /// A standalone section keyword, e.g. `:parameters`, `:effect`
    KEYWORD,
    /// Any other word: names, variables (`?x`), numbers, operators
    ATOM,
    /// Unlexable input (kept in the tree so the text round-trips)
    ERROR,

    // =========================================================================
    // NODES
    // =========================================================================
    /// One bracketed expression
    GROUP,
    /// The document root
    DOCUMENT,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this token opens a group
    pub fn is_open_bracket(self) -> bool {
        matches!(self, Self::OPEN_BRACKET | Self::OPEN_BRACKET_OP)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PddlLanguage {}

impl rowan::Language for PddlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<PddlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<PddlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<PddlLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<PddlLanguage>;
