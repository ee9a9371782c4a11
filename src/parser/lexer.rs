//! Logos-based lexer for PDDL
//!
//! Fast tokenization using the logos crate, with a one-token-lookahead fusing
//! pass that turns `(` followed directly by a keyword or operator name into a
//! single operator-bracket token (`(:action`, `(and`, `(=`). Downstream code
//! can then pattern-match on operator brackets without re-inspecting
//! neighbors.
//!
//! Every character of the input lands in exactly one token, so concatenating
//! token texts in order reproduces the input byte for byte.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use once_cell::sync::Lazy;
use rowan::TextSize;
use rustc_hash::FxHashSet;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// End offset of this token (start of the next)
    pub fn end_offset(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Operator names that fuse with a directly preceding `(`.
///
/// Word boundaries come for free: atoms are maximal-munch, so `(attack`
/// lexes as `(` + atom `attack` and never fuses via the `at` entry.
static OPERATOR_NAMES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // logic
        "and", "or", "not", "imply", "when", "forall", "exists", "either",
        // comparison and arithmetic
        "=", ">", "<", ">=", "<=", "+", "-", "*", "/",
        // effects
        "assign", "increase", "decrease", "scale-up", "scale-down",
        // temporal qualification and timed initial literals
        "at", "over",
        // trajectory constraints
        "always", "sometime", "within", "at-most-once", "sometime-after",
        "sometime-before", "always-within", "hold-during", "hold-after",
        "name", "named-condition", "after", "strictly-after",
        // metric
        "minimize", "maximize",
        // headers and special init constructs
        "define", "domain", "problem", "supply-demand",
    ]
    .into_iter()
    .collect()
});

/// Raw logos token enum - maps to SyntaxKind after the fusing pass
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    /// Runs of blanks and newlines, kept as one token
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    /// `;` to end of line
    #[regex(r";[^\n]*")]
    Comment,

    /// Section keywords: `:requirements`, `:parameters`, `:effect`, ...
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*", priority = 10)]
    Keyword,

    #[token("(")]
    OpenBracket,

    #[token(")")]
    CloseBracket,

    /// Everything else: names, `?variables`, numbers, operators
    #[regex(r"[^\s();]+", priority = 1)]
    Atom,
}

impl From<RawToken> for SyntaxKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Whitespace => SyntaxKind::WHITESPACE,
            RawToken::Comment => SyntaxKind::COMMENT,
            RawToken::Keyword => SyntaxKind::KEYWORD,
            RawToken::OpenBracket => SyntaxKind::OPEN_BRACKET,
            RawToken::CloseBracket => SyntaxKind::CLOSE_BRACKET,
            RawToken::Atom => SyntaxKind::ATOM,
        }
    }
}

/// A raw lexeme before fusing: kind plus byte range
#[derive(Debug, Clone, Copy)]
struct RawPiece {
    kind: SyntaxKind,
    start: usize,
    end: usize,
}

/// Lexer wrapping the logos-generated tokenizer with the fusing pass
pub struct Lexer<'a> {
    input: &'a str,
    inner: logos::Lexer<'a, RawToken>,
    peeked: Option<RawPiece>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            inner: RawToken::lexer(input),
            peeked: None,
        }
    }

    fn next_raw(&mut self) -> Option<RawPiece> {
        let raw = self.inner.next()?;
        let span = self.inner.span();
        let kind = match raw {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        Some(RawPiece {
            kind,
            start: span.start,
            end: span.end,
        })
    }

    fn token(&self, kind: SyntaxKind, start: usize, end: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.input[start..end],
            offset: TextSize::new(start as u32),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = match self.peeked.take() {
            Some(p) => p,
            None => self.next_raw()?,
        };

        if piece.kind == SyntaxKind::OPEN_BRACKET {
            if let Some(next) = self.next_raw() {
                let fuses = next.start == piece.end
                    && match next.kind {
                        SyntaxKind::KEYWORD => true,
                        SyntaxKind::ATOM => {
                            OPERATOR_NAMES.contains(&self.input[next.start..next.end])
                        }
                        _ => false,
                    };
                if fuses {
                    return Some(self.token(SyntaxKind::OPEN_BRACKET_OP, piece.start, next.end));
                }
                self.peeked = Some(next);
            }
        }

        Some(self.token(piece.kind, piece.start, piece.end))
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            "(define (domain d) (:predicates (at ?l - location)))",
            "; comment\n(:action a :effect (not (p)))",
            "((( unbalanced",
            ")))",
            "",
            "  \n\n\t ",
        ];
        for input in inputs {
            let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
            assert_eq!(rebuilt, input, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn test_fuses_section_keyword() {
        let tokens = tokenize("(:action fly)");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_BRACKET_OP);
        assert_eq!(tokens[0].text, "(:action");
    }

    #[test]
    fn test_fuses_operator_name() {
        let tokens = tokenize("(and (not (p)))");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_BRACKET_OP);
        assert_eq!(tokens[0].text, "(and");
        assert_eq!(tokens[2].text, "(not");
    }

    #[test]
    fn test_fuses_comparison() {
        let tokens = tokenize("(= ?duration 5)");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_BRACKET_OP);
        assert_eq!(tokens[0].text, "(=");
    }

    #[test]
    fn test_no_fuse_on_plain_name() {
        let tokens = tokenize("(attack ?p)");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_BRACKET);
        assert_eq!(tokens[1].kind, SyntaxKind::ATOM);
        assert_eq!(tokens[1].text, "attack");
    }

    #[test]
    fn test_no_fuse_across_whitespace() {
        let tokens = tokenize("( and )");
        assert_eq!(tokens[0].kind, SyntaxKind::OPEN_BRACKET);
        assert_eq!(tokens[2].kind, SyntaxKind::ATOM);
    }

    #[test]
    fn test_comment_runs_to_end_of_line() {
        let tokens = tokenize("; a (b) ;; c\n(d)");
        assert_eq!(tokens[0].kind, SyntaxKind::COMMENT);
        assert_eq!(tokens[0].text, "; a (b) ;; c");
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
    }

    #[test]
    fn test_whitespace_runs_stay_whole() {
        let tokens = tokenize("a \n\n\t b");
        assert_eq!(
            kinds("a \n\n\t b"),
            vec![SyntaxKind::ATOM, SyntaxKind::WHITESPACE, SyntaxKind::ATOM]
        );
        assert_eq!(tokens[1].text, " \n\n\t ");
    }

    #[test]
    fn test_standalone_keyword() {
        let tokens = tokenize(":precondition");
        assert_eq!(tokens[0].kind, SyntaxKind::KEYWORD);
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let tokens = tokenize("(a b)");
        let offsets: Vec<u32> = tokens.iter().map(|t| t.offset.into()).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    }
}
