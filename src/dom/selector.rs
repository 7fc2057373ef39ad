//! A small CSS selector engine covering the selectors slide documents use:
//! type, `*`, `.class`, `#id`, `[attr]`, `[attr=value]`, compounds of these,
//! descendant (` `) and child (`>`) combinators, and comma-separated lists.

use super::snapshot::NodeRef;
use crate::errors::{ConversionError, Result};

#[derive(Debug, Clone, PartialEq)]
struct AttrSelector {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrSelector>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Combinator {
    Descendant,
    Child,
}

/// One complex selector: compounds joined by combinators, left to right.
/// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
struct Complex {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(Vec<Complex>);

fn invalid(selector: &str, reason: &str) -> ConversionError {
    ConversionError::InvalidConfig(format!("unsupported selector '{selector}': {reason}"))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl SelectorList {
    pub fn parse(selector: &str) -> Result<Self> {
        let mut list = Vec::new();
        for part in split_top_level(selector) {
            let part = part.trim();
            if part.is_empty() {
                return Err(invalid(selector, "empty selector in list"));
            }
            list.push(parse_complex(part).map_err(|reason| invalid(selector, &reason))?);
        }
        if list.is_empty() {
            return Err(invalid(selector, "empty selector"));
        }
        Ok(SelectorList(list))
    }

    pub fn matches(&self, node: NodeRef<'_>) -> bool {
        node.is_element() && self.0.iter().any(|c| c.matches(node))
    }
}

/// Splits on commas outside of `[...]` and quotes.
fn split_top_level(selector: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in selector.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&selector[start..]);
    parts
}

fn parse_complex(input: &str) -> std::result::Result<Complex, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut pending: Option<Combinator> = None;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            if !compounds.is_empty() && pending.is_none() {
                pending = Some(Combinator::Descendant);
            }
            i += 1;
            continue;
        }
        if c == '>' {
            if compounds.is_empty() {
                return Err("selector starts with a combinator".to_string());
            }
            pending = Some(Combinator::Child);
            i += 1;
            continue;
        }
        let (compound, next) = parse_compound(&chars, i)?;
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(compound);
        pending = None;
        i = next;
    }

    if compounds.is_empty() {
        return Err("empty selector".to_string());
    }
    if pending == Some(Combinator::Child) {
        return Err("selector ends with a combinator".to_string());
    }
    Ok(Complex {
        compounds,
        combinators,
    })
}

fn read_ident(chars: &[char], mut i: usize) -> (String, usize) {
    let start = i;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

fn parse_compound(chars: &[char], mut i: usize) -> std::result::Result<(Compound, usize), String> {
    let mut compound = Compound::default();
    let start = i;

    while i < chars.len() {
        match chars[i] {
            '*' if i == start => i += 1,
            '.' => {
                let (name, next) = read_ident(chars, i + 1);
                if name.is_empty() {
                    return Err("empty class name".to_string());
                }
                compound.classes.push(name);
                i = next;
            }
            '#' => {
                let (name, next) = read_ident(chars, i + 1);
                if name.is_empty() {
                    return Err("empty id".to_string());
                }
                compound.id = Some(name);
                i = next;
            }
            '[' => {
                let close = chars[i..]
                    .iter()
                    .position(|c| *c == ']')
                    .map(|p| p + i)
                    .ok_or_else(|| "unterminated attribute selector".to_string())?;
                let body: String = chars[i + 1..close].iter().collect();
                compound.attrs.push(parse_attr(&body)?);
                i = close + 1;
            }
            c if is_ident_char(c) && i == start => {
                let (name, next) = read_ident(chars, i);
                compound.tag = Some(name.to_ascii_lowercase());
                i = next;
            }
            c if c.is_whitespace() || c == '>' => break,
            c => return Err(format!("unexpected character '{c}'")),
        }
    }
    Ok((compound, i))
}

fn parse_attr(body: &str) -> std::result::Result<AttrSelector, String> {
    match body.split_once('=') {
        None => {
            let name = body.trim();
            if name.is_empty() {
                return Err("empty attribute name".to_string());
            }
            Ok(AttrSelector {
                name: name.to_string(),
                value: None,
            })
        }
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() || name.ends_with(['~', '|', '^', '$', '*']) {
                return Err(format!("unsupported attribute operator in '[{body}]'"));
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Ok(AttrSelector {
                name: name.to_string(),
                value: Some(value.to_string()),
            })
        }
    }
}

impl Compound {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if node.tag_name() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.element_id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| node.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match (&a.value, node.attr(&a.name)) {
            (None, found) => found.is_some(),
            (Some(expected), Some(found)) => expected == found,
            (Some(_), None) => false,
        })
    }
}

impl Complex {
    fn matches(&self, node: NodeRef<'_>) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(n - 1, node),
        }
    }

    fn matches_at(&self, index: usize, node: NodeRef<'_>) -> bool {
        if !self.compounds[index].matches(node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => node
                .parent()
                .map(|p| self.matches_at(index - 1, p))
                .unwrap_or(false),
            Combinator::Descendant => node.ancestors().any(|a| self.matches_at(index - 1, a)),
        }
    }
}
