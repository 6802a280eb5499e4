//! logos-based CSS selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. ` > ` as Child beats ` ` as Descendant)
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering mirrors the grammar's alternation order:
//! - `:first-child` matches one [`TokenKind::Pseudo`], not `:` + an ident
//! - ` > ` matches [`TokenKind::Child`], not two `Descendant`s around `>`
//! - `*=` matches [`TokenKind::AttributeModifier`], not `Star` + a stray `=`
//!
//! The grammar is permissive and non-validating: characters matching no
//! pattern (e.g. the closing `]` of an attribute selector) are absorbed
//! without producing a token, and tokens whose stripped content is empty
//! are dropped. Tokenization never fails.

use logos::Logos;

/// Lexical category of a selector token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Universal selector: `*`.
    #[token("*")]
    Star,

    /// Pseudo-class introducer: `:checked`, `:nth-child`, `:first-child`.
    #[regex(r":[\w-]*")]
    Pseudo,

    /// Parenthesized pseudo-class argument: `(2)`, `("hi")`.
    #[regex(r#"\(+["']*[\w \t-]*["']*\)"#)]
    PseudoSpecifier,

    /// Type selector: `div`, `p`, `my-element`.
    #[regex(r"[\w-]+")]
    Element,

    /// Child combinator: `>` with optional surrounding whitespace.
    #[regex(r"\s*>\s*")]
    Child,

    /// ID selector: `#main`.
    #[regex(r"#[\w-]+")]
    Id,

    /// Class selector: `.primary`.
    #[regex(r"\.\w+")]
    Class,

    /// Adjacent-sibling combinator: `+` with optional surrounding whitespace.
    #[regex(r"\s*\+\s*")]
    Sibling,

    /// Attribute selector opener and name: `[href`.
    #[regex(r"\[[\w-]+")]
    Attribute,

    /// Attribute comparison operator ending in `=`: `=`, `~=`, `$=`.
    #[regex(r"[~$^*|!]?=")]
    AttributeModifier,

    /// Quoted attribute value: `"x"` or `'x'`.
    #[regex(r#""[^"]*"|'[^']*'"#)]
    AttributeValue,

    /// Descendant combinator: a run of whitespace.
    #[regex(r"\s+")]
    Descendant,
}

/// One selector token: its lexical kind plus the matched text with the
/// kind's introducer delimiters stripped.
///
/// Quotes stay in the content where the grammar captures them
/// ([`TokenKind::PseudoSpecifier`], [`TokenKind::AttributeValue`]); the
/// translator emits them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub content: String,
}

/// Tokenize a CSS selector into an ordered sequence of [`Token`]s.
///
/// Total over arbitrary input: unmatched characters are absorbed without a
/// token (logos error tokens are filtered), and empty-content tokens are
/// dropped. The result preserves the left-to-right order of matches and may
/// be empty, but tokenization itself never fails.
pub fn tokenize(selector: &str) -> Vec<Token> {
    TokenKind::lexer(selector)
        .spanned()
        .filter_map(|(result, span)| {
            let kind = result.ok()?;
            let content = strip_delimiters(kind, &selector[span]);
            (!content.is_empty()).then(|| Token {
                kind,
                content: content.to_string(),
            })
        })
        .collect()
}

/// Strip a kind's introducer delimiters from its matched text.
///
/// `:`, `#`, `.`, and `[` are single-byte markers; pseudo specifiers lose
/// their parentheses but keep any quotes.
fn strip_delimiters(kind: TokenKind, raw: &str) -> &str {
    match kind {
        TokenKind::Pseudo | TokenKind::Id | TokenKind::Class | TokenKind::Attribute => &raw[1..],
        TokenKind::PseudoSpecifier => {
            let inner = raw.trim_start_matches('(');
            inner.strip_suffix(')').unwrap_or(inner)
        }
        _ => raw,
    }
}
