//! CSS-token-to-XPath translator.
//!
//! Consumes the token stream from [`crate::css::tokenizer`] in a single
//! pass with up to two tokens of lookahead, assembling the expression in a
//! [`PathBuffer`]. Postfix selectors (`:first-child`, `:nth-child`,
//! attribute-value tests) attach to the most recent path step by rewriting
//! it in place rather than opening a new step.

use crate::css::tokenizer::{tokenize, Token, TokenKind};

/// Errors from strict translation.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// A non-empty selector that tokenized to nothing at all.
    #[error("selector `{0}` contains no recognizable tokens")]
    Malformed(String),
}

/// Ordered buffer of XPath fragments.
///
/// Concatenating the fragments in order yields the final expression. The
/// buffer is seeded with the root-descendant marker `//` at index 0; the
/// marker is never rewritten, so the finished expression always starts with
/// `//`. Later tokens may append new fragments or rewrite the most recent
/// step in place.
#[derive(Debug)]
struct PathBuffer {
    fragments: Vec<String>,
}

impl PathBuffer {
    fn new() -> Self {
        Self {
            fragments: vec![String::from("//")],
        }
    }

    /// Append a new fragment.
    fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// The most recent step, or `""` when only the marker has been emitted.
    fn last_step(&self) -> &str {
        match self.fragments.as_slice() {
            [_marker, .., last] => last.as_str(),
            _ => "",
        }
    }

    /// Replace the most recent step with `f(step)`. When no step has been
    /// emitted yet, the result is appended after the marker instead.
    fn rewrite_last_step(&mut self, f: impl FnOnce(&str) -> String) {
        if self.fragments.len() > 1 {
            let last = self.fragments.len() - 1;
            self.fragments[last] = f(&self.fragments[last]);
        } else {
            let fragment = f("");
            self.fragments.push(fragment);
        }
    }

    /// Join all fragments into the final expression.
    fn finish(self) -> String {
        self.fragments.concat()
    }
}

/// Translate a CSS selector into an equivalent XPath expression.
///
/// Total over arbitrary input: unsupported or malformed selector syntax
/// degrades to best-effort output rather than an error, and no validity
/// check is performed on the resulting XPath. The output always starts
/// with `//`; the empty selector yields `"//"` alone.
pub fn translate_selector(css: &str) -> String {
    translate(&tokenize(css))
}

/// Strict variant of [`translate_selector`].
///
/// Returns [`TranslateError::Malformed`] when a non-empty selector contains
/// no recognizable token at all, instead of silently yielding `"//"`.
pub fn translate_selector_strict(css: &str) -> Result<String, TranslateError> {
    let tokens = tokenize(css);
    if tokens.is_empty() && !css.is_empty() {
        return Err(TranslateError::Malformed(css.to_string()));
    }
    Ok(translate(&tokens))
}

/// Translate a token sequence into an XPath expression string.
///
/// Single pass, dispatched on the current token's kind with lookahead of at
/// most two tokens. The previous token's kind decides whether id and class
/// selectors synthesize a `*` step prefix; it is updated after every token,
/// whether or not the token emitted a fragment.
pub fn translate(tokens: &[Token]) -> String {
    let mut xpath = PathBuffer::new();
    let mut prev_kind: Option<TokenKind> = None;

    for (i, token) in tokens.iter().enumerate() {
        let next = tokens.get(i + 1);

        match token.kind {
            TokenKind::Star | TokenKind::Element => xpath.push(token.content.clone()),
            TokenKind::Pseudo => translate_pseudo(&mut xpath, token, next),
            TokenKind::Child => xpath.push("/"),
            TokenKind::Id => {
                xpath.push(format!(
                    "{}[@id='{}']",
                    universal_prefix(prev_kind),
                    token.content
                ));
            }
            TokenKind::Class => {
                xpath.push(format!(
                    r#"{}[contains(concat(" ",@class," "),concat(" ","{}"," "))]"#,
                    universal_prefix(prev_kind),
                    token.content
                ));
            }
            TokenKind::Sibling => xpath.push("/following-sibling::*[1]/self::"),
            TokenKind::Attribute => {
                // Modifier and value only ever apply as a pair; a lone
                // modifier (unquoted value) degrades to the presence test.
                let modifier = next.filter(|t| t.kind == TokenKind::AttributeModifier);
                let value = tokens
                    .get(i + 2)
                    .filter(|t| t.kind == TokenKind::AttributeValue);
                match modifier.zip(value) {
                    None => xpath.push(format!("[@{}]", token.content)),
                    Some((modifier, value)) => {
                        translate_attribute_test(&mut xpath, &token.content, modifier, value);
                    }
                }
            }
            TokenKind::Descendant => xpath.push("//"),
            // Consumed via lookahead from Pseudo and Attribute.
            TokenKind::PseudoSpecifier
            | TokenKind::AttributeModifier
            | TokenKind::AttributeValue => {}
        }

        prev_kind = Some(token.kind);
    }

    xpath.finish()
}

/// `*` when the previous token was not an element name, so bare id and
/// class selectors still produce a full path step.
fn universal_prefix(prev_kind: Option<TokenKind>) -> &'static str {
    if prev_kind == Some(TokenKind::Element) {
        ""
    } else {
        "*"
    }
}

/// Emit the fragment for one pseudo-class, peeking at the following token
/// for an optional specifier.
fn translate_pseudo(xpath: &mut PathBuffer, token: &Token, next: Option<&Token>) {
    let specifier = next
        .filter(|t| t.kind == TokenKind::PseudoSpecifier)
        .map(|t| t.content.as_str())
        .unwrap_or_default();

    match token.content.as_str() {
        // Predicate deliberately left unterminated; see DESIGN.md.
        "disabled" | "checked" | "selected" => xpath.push(format!("[@{}", token.content)),
        "text" => xpath.push(r#"[@type="text"]"#),
        "contains" => {
            if !specifier.is_empty() {
                xpath.push(format!("[contains(text(),{specifier})]"));
            }
        }
        "first-child" => xpath.rewrite_last_step(|step| format!("*[1]/self::{step}")),
        "nth-child" => {
            if !specifier.is_empty() {
                if xpath.last_step().ends_with(']') {
                    xpath.rewrite_last_step(|step| {
                        step.replace(']', &format!(" and position() = {specifier}]"))
                    });
                } else {
                    xpath.push(format!("[{specifier}]"));
                }
            }
        }
        "nth-of-type" => {
            if !specifier.is_empty() {
                xpath.push(format!("[{specifier}]"));
            }
        }
        _ => {}
    }
}

/// Emit the fragment for one attribute comparison.
///
/// The value's own quotes are carried into the output verbatim, and the
/// `$=` suffix test subtracts the character length of the attribute *name*,
/// not the value's.
fn translate_attribute_test(xpath: &mut PathBuffer, name: &str, modifier: &Token, value: &Token) {
    match modifier.content.as_str() {
        "=" => xpath.push(format!("[@{name}={}]", value.content)),
        "~=" => xpath.push(format!(
            r#"[contains(concat(" ",@{name}," "),concat(" ","{}"," "))]"#,
            value.content
        )),
        "$=" => xpath.push(format!(
            r#"[substring(@{name},string-length(@{name})-{})="{}"]"#,
            name.chars().count(),
            value.content
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── PathBuffer ───────────────────────────────────────────────────

    #[test]
    fn buffer_seeded_with_root_marker() {
        assert_eq!(PathBuffer::new().finish(), "//");
    }

    #[test]
    fn buffer_concatenates_in_order() {
        let mut buffer = PathBuffer::new();
        buffer.push("div");
        buffer.push("/");
        buffer.push("p");
        assert_eq!(buffer.finish(), "//div/p");
    }

    #[test]
    fn buffer_last_step_ignores_marker() {
        let mut buffer = PathBuffer::new();
        assert_eq!(buffer.last_step(), "");
        buffer.push("li");
        assert_eq!(buffer.last_step(), "li");
    }

    #[test]
    fn buffer_rewrite_edits_step_in_place() {
        let mut buffer = PathBuffer::new();
        buffer.push("p");
        buffer.rewrite_last_step(|step| format!("*[1]/self::{step}"));
        assert_eq!(buffer.finish(), "//*[1]/self::p");
    }

    #[test]
    fn buffer_rewrite_without_step_keeps_marker_intact() {
        let mut buffer = PathBuffer::new();
        buffer.rewrite_last_step(|step| format!("*[1]/self::{step}"));
        assert_eq!(buffer.finish(), "//*[1]/self::");
    }

    // ── Pseudo-class dispatch ────────────────────────────────────────

    #[test]
    fn boolean_pseudo_leaves_predicate_open() {
        assert_eq!(translate_selector("input:checked"), "//input[@checked");
        assert_eq!(translate_selector("option:selected"), "//option[@selected");
        assert_eq!(translate_selector("input:disabled"), "//input[@disabled");
    }

    #[test]
    fn text_pseudo_expands_to_type_test() {
        assert_eq!(
            translate_selector("input:text"),
            r#"//input[@type="text"]"#
        );
    }

    #[test]
    fn first_child_rewrites_previous_step() {
        assert_eq!(translate_selector("p:first-child"), "//*[1]/self::p");
    }

    #[test]
    fn nth_child_on_bare_element_appends_predicate() {
        assert_eq!(translate_selector("li:nth-child(2)"), "//li[2]");
    }

    #[test]
    fn nth_child_merges_into_existing_predicate() {
        assert_eq!(
            translate_selector(".item:nth-child(3)"),
            r#"//*[contains(concat(" ",@class," "),concat(" ","item"," ")) and position() = 3]"#
        );
    }

    #[test]
    fn nth_of_type_appends_predicate() {
        assert_eq!(translate_selector("p:nth-of-type(2)"), "//p[2]");
    }

    #[test]
    fn missing_specifier_emits_nothing() {
        assert_eq!(translate_selector("a:contains"), "//a");
        assert_eq!(translate_selector("a:contains()"), "//a");
        assert_eq!(translate_selector("li:nth-child"), "//li");
        assert_eq!(translate_selector("li:nth-of-type()"), "//li");
    }

    #[test]
    fn unknown_pseudo_emits_nothing() {
        assert_eq!(translate_selector("a:hover"), "//a");
    }

    /// Fragment emission is skipped but the previous-kind state still
    /// advances, so a following class selector sees `Pseudo`, not
    /// `Element`, and synthesizes its `*` prefix.
    #[test]
    fn skipped_pseudo_still_updates_previous_kind() {
        assert_eq!(
            translate_selector("div:hover.note"),
            r#"//div*[contains(concat(" ",@class," "),concat(" ","note"," "))]"#
        );
    }

    // ── Id and class prefixing ───────────────────────────────────────

    #[test]
    fn id_after_element_attaches_directly() {
        assert_eq!(translate_selector("div#main"), "//div[@id='main']");
    }

    #[test]
    fn id_after_star_gets_universal_prefix() {
        assert_eq!(translate_selector("*#main"), "//**[@id='main']");
    }

    #[test]
    fn class_after_descendant_gets_universal_prefix() {
        assert_eq!(
            translate_selector("div .note"),
            r#"//div//*[contains(concat(" ",@class," "),concat(" ","note"," "))]"#
        );
    }

    // ── Attribute tests ──────────────────────────────────────────────

    #[test]
    fn attribute_word_match_mirrors_class_shape() {
        assert_eq!(
            translate_selector(r#"div[class~="btn"]"#),
            r#"//div[contains(concat(" ",@class," "),concat(" ",""btn""," "))]"#
        );
    }

    #[test]
    fn attribute_suffix_subtracts_name_length() {
        // `href` is four characters; the subtracted length is the name's,
        // not the value's.
        assert_eq!(
            translate_selector(r#"a[href$=".pdf"]"#),
            r#"//a[substring(@href,string-length(@href)-4)="".pdf""]"#
        );
    }

    #[test]
    fn unsupported_modifier_emits_nothing() {
        assert_eq!(translate_selector(r#"a[href*="x"]"#), "//a");
        assert_eq!(translate_selector(r#"a[href^="x"]"#), "//a");
    }

    #[test]
    fn unquoted_value_degrades_to_presence_test() {
        assert_eq!(translate_selector("a[href=x]"), "//a[@href]x");
    }

    #[test]
    fn consecutive_presence_tests() {
        assert_eq!(translate_selector("a[href][target]"), "//a[@href][@target]");
    }

    // ── Translator state and edge cases ──────────────────────────────

    #[test]
    fn empty_token_sequence_yields_marker() {
        assert_eq!(translate(&[]), "//");
    }

    #[test]
    fn leading_first_child_keeps_root_marker() {
        assert_eq!(translate_selector(":first-child"), "//*[1]/self::");
    }

    #[test]
    fn sibling_combinator() {
        assert_eq!(
            translate_selector("h1 + p"),
            "//h1/following-sibling::*[1]/self::p"
        );
    }

    #[test]
    fn strict_rejects_tokenless_input() {
        assert!(matches!(
            translate_selector_strict("]"),
            Err(TranslateError::Malformed(_))
        ));
    }

    #[test]
    fn strict_accepts_empty_and_ordinary_input() {
        assert_eq!(translate_selector_strict("").unwrap(), "//");
        assert_eq!(translate_selector_strict("div").unwrap(), "//div");
    }
}
