//! CSS3 selector to XPath 1.0 translation.
//!
//! Selectors are parsed into a small AST and emitted as XPath rooted at
//! `descendant-or-self::`, so they can be evaluated from the document root.
//! Only static CSS3 is understood: pseudo-elements, namespace prefixes and
//! vendor extensions are rejected.

use std::cmp::Ordering;

use crate::{Result, ScrapeError};

type ParseResult<T> = std::result::Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    Adjacent,
    /// `a ~ b`
    Sibling,
}

/// A compound selector: an optional type plus filters, e.g. `p.note[title]`.
#[derive(Debug, Clone, PartialEq)]
struct Compound {
    /// `None` for `*` or an omitted type
    element: Option<String>,
    filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
enum Filter {
    Id(String),
    Class(String),
    Attribute { name: String, matcher: Option<(AttributeOp, String)> },
    Pseudo(PseudoClass),
    Not(Compound),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeOp {
    /// `[attr=value]`
    Exact,
    /// `[attr~=value]`
    Includes,
    /// `[attr|=value]`
    DashMatch,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
    /// `[attr*=value]`
    Substring,
}

#[derive(Debug, Clone, PartialEq)]
enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    Empty,
    Root,
    NthChild(Nth),
    NthLastChild(Nth),
    NthOfType(Nth),
    NthLastOfType(Nth),
    /// Language range, matched against the nearest `lang` attribute
    Lang(String),
    /// User-interaction states that never hold in a static document
    Never,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Nth {
    a: i64,
    b: i64,
}

impl Nth {
    /// Parse from string like "2n+1", "odd", "even", "3"
    fn parse(s: &str) -> Option<Self> {
        let s: String = s.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self { a: 2, b: 1 }),
            "even" => return Some(Self { a: 2, b: 0 }),
            _ => {}
        }

        if let Ok(b) = s.parse::<i32>() {
            return Some(Self { a: 0, b: i64::from(b) });
        }

        let (a_str, rest) = s.split_once('n')?;
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse::<i32>().ok()?,
        };
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with(['+', '-']) {
            rest.parse::<i32>().ok()?
        } else {
            return None;
        };

        Some(Self { a: i64::from(a), b: i64::from(b) })
    }
}

/// A complex selector: compounds joined by combinators.
#[derive(Debug)]
struct Selector {
    head: Compound,
    tail: Vec<(Combinator, Compound)>,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> ParseResult<()> {
        if self.eat(expected) { Ok(()) } else { Err(format!("expected '{}', {}", expected, self.describe())) }
    }

    fn describe(&self) -> String {
        match self.peek() {
            Some(c) => format!("found '{}' at position {}", c, self.pos),
            None => "found end of selector".to_string(),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_group(&mut self) -> ParseResult<Vec<Selector>> {
        let mut selectors = vec![self.parse_selector()?];
        while self.eat(',') {
            selectors.push(self.parse_selector()?);
        }
        Ok(selectors)
    }

    fn parse_selector(&mut self) -> ParseResult<Selector> {
        self.skip_whitespace();
        let head = self.parse_compound()?;
        let mut tail = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::Adjacent,
                Some('~') => Combinator::Sibling,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(format!("unexpected '{}' at position {}", c, self.pos)),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            tail.push((combinator, self.parse_compound()?));
        }

        Ok(Selector { head, tail })
    }

    fn parse_compound(&mut self) -> ParseResult<Compound> {
        let start = self.pos;
        let element = if self.eat('*') {
            None
        } else if self.at_identifier() {
            Some(self.parse_name()?)
        } else {
            None
        };

        if self.peek() == Some('|') {
            return Err("namespace prefixes are not supported".to_string());
        }

        let mut filters = Vec::new();
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    filters.push(Filter::Id(self.parse_name()?));
                }
                Some('.') => {
                    self.pos += 1;
                    filters.push(Filter::Class(self.parse_identifier()?));
                }
                Some('[') => {
                    self.pos += 1;
                    filters.push(self.parse_attribute()?);
                }
                Some(':') => {
                    self.pos += 1;
                    filters.push(self.parse_pseudo()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(format!("expected selector, {}", self.describe()));
        }

        Ok(Compound { element, filters })
    }

    fn parse_attribute(&mut self) -> ParseResult<Filter> {
        self.skip_whitespace();
        let name = self.parse_identifier()?;
        if self.peek() == Some('|') && self.peek_at(1) != Some('=') {
            return Err("namespace prefixes are not supported".to_string());
        }
        self.skip_whitespace();

        if self.eat(']') {
            return Ok(Filter::Attribute { name, matcher: None });
        }

        let op = match self.bump() {
            Some('=') => AttributeOp::Exact,
            Some(c) => {
                let op = match c {
                    '~' => AttributeOp::Includes,
                    '|' => AttributeOp::DashMatch,
                    '^' => AttributeOp::Prefix,
                    '$' => AttributeOp::Suffix,
                    '*' => AttributeOp::Substring,
                    _ => return Err(format!("unexpected '{}' in attribute selector", c)),
                };
                self.expect('=')?;
                op
            }
            None => return Err("unterminated attribute selector".to_string()),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(quote)?
            }
            _ if self.at_identifier() => self.parse_name()?,
            _ => return Err(format!("expected attribute value, {}", self.describe())),
        };
        self.skip_whitespace();
        self.expect(']')?;

        Ok(Filter::Attribute { name, matcher: Some((op, value)) })
    }

    fn parse_pseudo(&mut self) -> ParseResult<Filter> {
        if self.peek() == Some(':') {
            return Err("pseudo-elements are not supported".to_string());
        }
        let name = self.parse_identifier()?.to_ascii_lowercase();

        if self.eat('(') {
            self.skip_whitespace();
            let filter = match name.as_str() {
                "not" => {
                    let inner = self.parse_compound()?;
                    if inner.filters.iter().any(|f| matches!(f, Filter::Not(_))) {
                        return Err(":not() cannot be nested".to_string());
                    }
                    Filter::Not(inner)
                }
                "nth-child" => Filter::Pseudo(PseudoClass::NthChild(self.parse_nth()?)),
                "nth-last-child" => Filter::Pseudo(PseudoClass::NthLastChild(self.parse_nth()?)),
                "nth-of-type" => Filter::Pseudo(PseudoClass::NthOfType(self.parse_nth()?)),
                "nth-last-of-type" => Filter::Pseudo(PseudoClass::NthLastOfType(self.parse_nth()?)),
                "lang" => Filter::Pseudo(PseudoClass::Lang(self.parse_lang()?)),
                _ => return Err(format!("unknown function :{}()", name)),
            };
            self.skip_whitespace();
            self.expect(')')?;
            return Ok(filter);
        }

        let pseudo = match name.as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "empty" => PseudoClass::Empty,
            "root" => PseudoClass::Root,
            "link" | "visited" | "hover" | "active" | "focus" | "target" | "enabled" | "disabled" | "checked" => {
                PseudoClass::Never
            }
            "before" | "after" | "first-line" | "first-letter" => {
                return Err(format!("pseudo-element :{} is not supported", name));
            }
            _ => return Err(format!("unknown pseudo-class :{}", name)),
        };

        Ok(Filter::Pseudo(pseudo))
    }

    fn parse_nth(&mut self) -> ParseResult<Nth> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        Nth::parse(&raw).ok_or_else(|| format!("invalid nth expression '{}'", raw.trim()))
    }

    fn parse_lang(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.parse_string(quote)
            }
            _ => self.parse_identifier(),
        }
    }

    fn at_identifier(&self) -> bool {
        match self.peek() {
            Some('-') => matches!(self.peek_at(1), Some(c) if is_name_start(c) || c == '-' || c == '\\'),
            Some('\\') => true,
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        if !self.at_identifier() {
            return Err(format!("expected identifier, {}", self.describe()));
        }
        self.parse_name()
    }

    /// Reads name characters. Unlike identifiers, names may start with a digit
    /// (`#1st` is a valid id selector).
    fn parse_name(&mut self) -> ParseResult<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                name.push(self.parse_escape()?);
            } else if is_name_char(c) {
                self.pos += 1;
                name.push(c);
            } else {
                break;
            }
        }

        if name.is_empty() { Err(format!("expected name, {}", self.describe())) } else { Ok(name) }
    }

    /// Decodes the escape following a backslash: up to six hex digits and one
    /// optional whitespace character, or any single literal character.
    fn parse_escape(&mut self) -> ParseResult<char> {
        let start = self.pos;
        while self.pos - start < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.pos += 1;
        }

        if self.pos == start {
            return self.bump().ok_or_else(|| "unterminated escape at end of selector".to_string());
        }

        let hex: String = self.chars[start..self.pos].iter().collect();
        if self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }

        let code = u32::from_str_radix(&hex, 16).map_err(|e| e.to_string())?;
        Ok(char::from_u32(code).filter(|&c| c != '\0').unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn parse_string(&mut self, quote: char) -> ParseResult<String> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err("unterminated string".to_string()),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.peek() {
                    Some('\n') => self.pos += 1,
                    Some(_) => value.push(self.parse_escape()?),
                    None => return Err("unterminated string".to_string()),
                },
                Some(c) => value.push(c),
            }
        }
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Quotes a string as an XPath literal. XPath has no escapes, so a value
/// holding both quote kinds is split into a `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

fn contains_word(attribute: &str, word: &str) -> String {
    format!(
        "{attribute} and contains(concat(' ', normalize-space({attribute}), ' '), {})",
        xpath_literal(&format!(" {} ", word))
    )
}

fn attribute_condition(name: &str, op: AttributeOp, value: &str) -> String {
    let attribute = format!("@{}", name);
    let literal = xpath_literal(value);

    match op {
        AttributeOp::Exact => format!("{attribute} = {literal}"),
        AttributeOp::Includes if value.is_empty() || value.contains(char::is_whitespace) => "0".to_string(),
        AttributeOp::Includes => contains_word(&attribute, value),
        AttributeOp::DashMatch => format!(
            "{attribute} and ({attribute} = {literal} or starts-with({attribute}, {}))",
            xpath_literal(&format!("{}-", value))
        ),
        _ if value.is_empty() => "0".to_string(),
        AttributeOp::Prefix => format!("{attribute} and starts-with({attribute}, {literal})"),
        AttributeOp::Suffix => format!(
            "{attribute} and substring({attribute}, string-length({attribute}) - {}) = {literal}",
            value.chars().count() - 1
        ),
        AttributeOp::Substring => format!("{attribute} and contains({attribute}, {literal})"),
    }
}

/// Builds the condition for an An+B position. `count` evaluates to the
/// number of siblings before (or after) the element, its index minus one.
fn nth_condition(count: &str, nth: Nth) -> String {
    let offset = nth.b - 1;
    if nth.a == 0 {
        return format!("{count} = {offset}");
    }

    let mut conditions = Vec::new();
    if nth.a > 0 {
        if offset > 0 {
            conditions.push(format!("{count} >= {offset}"));
        }
        if nth.a != 1 {
            let shifted = match offset.cmp(&0) {
                Ordering::Greater => format!("({count} - {offset})"),
                Ordering::Less => format!("({count} + {})", -offset),
                Ordering::Equal => count.to_string(),
            };
            conditions.push(format!("{shifted} mod {} = 0", nth.a));
        }
    } else {
        conditions.push(format!("{count} <= {offset}"));
        if nth.a != -1 {
            conditions.push(format!("({offset} - {count}) mod {} = 0", -nth.a));
        }
    }

    if conditions.is_empty() { "true()".to_string() } else { conditions.join(" and ") }
}

fn pseudo_condition(pseudo: &PseudoClass, element: Option<&str>) -> ParseResult<String> {
    let of_type = |pseudo_name: &str| {
        element.ok_or_else(|| format!("*:{} requires an element name", pseudo_name))
    };

    Ok(match pseudo {
        PseudoClass::FirstChild => "count(preceding-sibling::*) = 0".to_string(),
        PseudoClass::LastChild => "count(following-sibling::*) = 0".to_string(),
        PseudoClass::OnlyChild => "count(preceding-sibling::*) = 0 and count(following-sibling::*) = 0".to_string(),
        PseudoClass::FirstOfType => format!("count(preceding-sibling::{}) = 0", of_type("first-of-type")?),
        PseudoClass::LastOfType => format!("count(following-sibling::{}) = 0", of_type("last-of-type")?),
        PseudoClass::OnlyOfType => {
            let name = of_type("only-of-type")?;
            format!("count(preceding-sibling::{name}) = 0 and count(following-sibling::{name}) = 0")
        }
        PseudoClass::Empty => "not(*) and not(text())".to_string(),
        PseudoClass::Root => "not(parent::*)".to_string(),
        PseudoClass::NthChild(nth) => nth_condition("count(preceding-sibling::*)", *nth),
        PseudoClass::NthLastChild(nth) => nth_condition("count(following-sibling::*)", *nth),
        PseudoClass::NthOfType(nth) => {
            nth_condition(&format!("count(preceding-sibling::{})", of_type("nth-of-type")?), *nth)
        }
        PseudoClass::NthLastOfType(nth) => {
            nth_condition(&format!("count(following-sibling::{})", of_type("nth-last-of-type")?), *nth)
        }
        PseudoClass::Lang(range) => format!(
            "ancestor-or-self::*[@lang][1][starts-with(concat(translate(@lang, \
             'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), '-'), {})]",
            xpath_literal(&format!("{}-", range.to_ascii_lowercase()))
        ),
        PseudoClass::Never => "0".to_string(),
    })
}

fn filter_condition(filter: &Filter, element: Option<&str>) -> ParseResult<String> {
    Ok(match filter {
        Filter::Id(id) => format!("@id = {}", xpath_literal(id)),
        Filter::Class(class) => contains_word("@class", class),
        Filter::Attribute { name, matcher: None } => format!("@{}", name),
        Filter::Attribute { name, matcher: Some((op, value)) } => attribute_condition(name, *op, value),
        Filter::Pseudo(pseudo) => pseudo_condition(pseudo, element)?,
        Filter::Not(inner) => {
            let element = inner.element.as_deref().or(element);
            let mut conditions = Vec::new();
            if let Some(name) = &inner.element {
                conditions.push(format!("name() = {}", xpath_literal(name)));
            }
            for inner_filter in &inner.filters {
                conditions.push(filter_condition(inner_filter, element)?);
            }

            if conditions.is_empty() { "0".to_string() } else { format!("not({})", conditions.join(" and ")) }
        }
    })
}

fn push_compound(path: &mut String, compound: &Compound) -> ParseResult<()> {
    let element = compound.element.as_deref();
    path.push_str(element.unwrap_or("*"));
    for filter in &compound.filters {
        path.push('[');
        path.push_str(&filter_condition(filter, element)?);
        path.push(']');
    }
    Ok(())
}

fn selector_to_xpath(selector: &Selector) -> ParseResult<String> {
    let mut path = String::from("descendant-or-self::");
    push_compound(&mut path, &selector.head)?;

    for (combinator, compound) in &selector.tail {
        path.push_str(match combinator {
            Combinator::Descendant => "/descendant-or-self::*/",
            Combinator::Child => "/",
            Combinator::Adjacent => "/following-sibling::*[1]/self::",
            Combinator::Sibling => "/following-sibling::",
        });
        push_compound(&mut path, compound)?;
    }

    Ok(path)
}

/// Translates a CSS3 selector (or comma-separated group) into XPath.
///
/// # Errors
///
/// Returns [`ScrapeError::CssConversion`] naming the selector and the cause
/// for grammar errors and for constructs with no XPath counterpart.
///
/// # Example
///
/// ```rust
/// use scrape_core::css_to_xpath;
///
/// assert_eq!(css_to_xpath("div > p").unwrap(), "descendant-or-self::div/p");
/// assert!(css_to_xpath("p::first-line").is_err());
/// ```
pub fn css_to_xpath(css: &str) -> Result<String> {
    let fail = |reason: String| ScrapeError::CssConversion { selector: css.to_string(), reason };

    let selectors = Parser::new(css).parse_group().map_err(fail)?;
    let paths = selectors
        .iter()
        .map(selector_to_xpath)
        .collect::<ParseResult<Vec<_>>>()
        .map_err(fail)?;

    Ok(paths.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use crate::render::text_content;
    use rstest::rstest;

    const CLASS_WIKITABLE: &str = "@class and contains(concat(' ', normalize-space(@class), ' '), ' wikitable ')";

    #[rstest]
    #[case("a", "descendant-or-self::a")]
    #[case("*", "descendant-or-self::*")]
    #[case("div p", "descendant-or-self::div/descendant-or-self::*/p")]
    #[case("div > p", "descendant-or-self::div/p")]
    #[case("div>p", "descendant-or-self::div/p")]
    #[case("h1 + p", "descendant-or-self::h1/following-sibling::*[1]/self::p")]
    #[case("h1 ~ p", "descendant-or-self::h1/following-sibling::p")]
    #[case("#main", "descendant-or-self::*[@id = 'main']")]
    #[case("h1, h2", "descendant-or-self::h1 | descendant-or-self::h2")]
    #[case("a[href]", "descendant-or-self::a[@href]")]
    #[case("a[href='x']", "descendant-or-self::a[@href = 'x']")]
    #[case("a[href=x]", "descendant-or-self::a[@href = 'x']")]
    #[case("a[title*=\"it's\"]", "descendant-or-self::a[@title and contains(@title, \"it's\")]")]
    #[case("a[href^=http]", "descendant-or-self::a[@href and starts-with(@href, 'http')]")]
    #[case("a[href$='.pdf']", "descendant-or-self::a[@href and substring(@href, string-length(@href) - 3) = '.pdf']")]
    #[case("a[href^='']", "descendant-or-self::a[0]")]
    #[case("p[lang|=en]", "descendant-or-self::p[@lang and (@lang = 'en' or starts-with(@lang, 'en-'))]")]
    #[case("li:first-child", "descendant-or-self::li[count(preceding-sibling::*) = 0]")]
    #[case("li:last-child", "descendant-or-self::li[count(following-sibling::*) = 0]")]
    #[case("p:first-of-type", "descendant-or-self::p[count(preceding-sibling::p) = 0]")]
    #[case(":root", "descendant-or-self::*[not(parent::*)]")]
    #[case("a:hover", "descendant-or-self::a[0]")]
    #[case("p:not(.note)", "descendant-or-self::p[not(@class and contains(concat(' ', normalize-space(@class), ' '), ' note '))]")]
    #[case("#a\\:b", "descendant-or-self::*[@id = 'a:b']")]
    #[case("#\\31 23", "descendant-or-self::*[@id = '123']")]
    #[case(
        "p:lang(EN)",
        "descendant-or-self::p[ancestor-or-self::*[@lang][1][starts-with(concat(translate(@lang, \
         'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), '-'), 'en-')]]"
    )]
    fn test_translation(#[case] css: &str, #[case] expected: &str) {
        assert_eq!(css_to_xpath(css).unwrap(), expected);
    }

    #[test]
    fn test_wikitable_translation() {
        let xpath = css_to_xpath("table.wikitable > tbody > tr > td > b > a").unwrap();
        assert_eq!(xpath, format!("descendant-or-self::table[{}]/tbody/tr/td/b/a", CLASS_WIKITABLE));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("p::before")]
    #[case("p:before")]
    #[case("p:unknown")]
    #[case("p:contains('x')")]
    #[case("svg|rect")]
    #[case("div >")]
    #[case("div,")]
    #[case("a[href")]
    #[case("a[href='x]")]
    #[case("a[href%=x]")]
    #[case("*:first-of-type")]
    #[case("li:nth-child(foo)")]
    #[case("p:not(:not(a))")]
    #[case("div )")]
    fn test_translation_errors(#[case] css: &str) {
        assert!(matches!(css_to_xpath(css), Err(ScrapeError::CssConversion { .. })), "{css}");
    }

    #[rstest]
    #[case("odd", Nth { a: 2, b: 1 })]
    #[case("even", Nth { a: 2, b: 0 })]
    #[case("3", Nth { a: 0, b: 3 })]
    #[case("n", Nth { a: 1, b: 0 })]
    #[case("-n+3", Nth { a: -1, b: 3 })]
    #[case(" 2n + 1 ", Nth { a: 2, b: 1 })]
    #[case("+5", Nth { a: 0, b: 5 })]
    #[case("3n-2", Nth { a: 3, b: -2 })]
    fn test_nth_parse(#[case] input: &str, #[case] expected: Nth) {
        assert_eq!(Nth::parse(input), Some(expected));
    }

    #[test]
    fn test_nth_parse_invalid() {
        assert_eq!(Nth::parse("2n1"), None);
        assert_eq!(Nth::parse(""), None);
        assert_eq!(Nth::parse("abc"), None);
    }

    #[test]
    fn test_xpath_literal_quotes() {
        assert_eq!(xpath_literal("plain"), "'plain'");
        assert_eq!(xpath_literal("it's"), "\"it's\"");
        assert_eq!(xpath_literal("it's \"x\""), "concat('it', \"'\", 's \"x\"')");
    }

    const LIST: &str = r#"
        <html><body>
            <ul id="items">
                <li class="a first">1</li>
                <li class="b">2</li>
                <li class="a">3</li>
                <li>4</li>
                <li lang="en-GB">5</li>
                <li data-kind="red apple">6</li>
            </ul>
            <p></p>
            <h2>Title</h2><p>After title</p><p>Later</p>
        </body></html>
    "#;

    fn select(css: &str) -> Vec<String> {
        let doc = Document::parse_html(LIST).unwrap();
        let xpath = css_to_xpath(css).unwrap();
        doc.evaluate(&xpath).unwrap().iter().map(|m| text_content(m).trim().to_string()).collect()
    }

    #[rstest]
    #[case("li.a", &["1", "3"])]
    #[case("#items > li:nth-child(2n+1)", &["1", "3", "5"])]
    #[case("li:nth-child(even)", &["2", "4", "6"])]
    #[case("li:nth-child(-n+2)", &["1", "2"])]
    #[case("li:nth-child(3n+2)", &["2", "5"])]
    #[case("li:nth-last-child(1)", &["6"])]
    #[case("li:nth-of-type(4)", &["4"])]
    #[case("li:last-of-type", &["6"])]
    #[case("li:not(.a)", &["2", "4", "5", "6"])]
    #[case("li[lang|=en]", &["5"])]
    #[case("li[data-kind~=apple]", &["6"])]
    #[case("li[class$=st]", &["1"])]
    #[case("h2 + p", &["After title"])]
    #[case("h2 ~ p", &["After title", "Later"])]
    #[case("p:empty", &[""])]
    #[case("li.b, h2", &["2", "Title"])]
    #[case("li:lang(en)", &["5"])]
    #[case("li:lang('en-gb')", &["5"])]
    #[case("li:lang(fr)", &[])]
    fn test_translated_selection(#[case] css: &str, #[case] expected: &[&str]) {
        assert_eq!(select(css), expected);
    }
}
