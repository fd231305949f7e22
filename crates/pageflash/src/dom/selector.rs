//! CSS selector subset used by page scripts.
//!
//! Supported: selector groups (`a, b`), descendant (`a b`) and child
//! (`a > b`) combinators, and compound steps built from `*`, `tag`, `#id`,
//! `.class`, `[attr]` and `[attr="value"]`.

use super::DomError;

/// A parsed selector: one or more alternative chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub(super) groups: Vec<Vec<SelectorPart>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct SelectorStep {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum AttrCondition {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SelectorPart {
    pub step: SelectorStep,
    /// Relation to the previous (left) part; `None` for the first part.
    pub combinator: Option<Combinator>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// ```
    /// use pageflash::dom::Selector;
    ///
    /// assert!(Selector::parse(".feature-card, .stat-card").is_ok());
    /// assert!(Selector::parse("nav ul").is_ok());
    /// assert!(Selector::parse(r#"input[type="file"]"#).is_ok());
    /// assert!(Selector::parse("a >").is_err());
    /// ```
    pub fn parse(selector: &str) -> Result<Self, DomError> {
        let groups = split_groups(selector)?
            .iter()
            .map(|group| parse_chain(group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }
}

fn unsupported(selector: &str) -> DomError {
    DomError::Selector(selector.to_string())
}

fn split_groups(selector: &str) -> Result<Vec<String>, DomError> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;

    for ch in selector.chars() {
        match ch {
            '[' if !in_brackets => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if in_brackets => {
                in_brackets = false;
                current.push(ch);
            }
            ',' if !in_brackets => {
                let trimmed = current.trim();
                if trimmed.is_empty() {
                    return Err(unsupported(selector));
                }
                groups.push(trimmed.to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }

    let trimmed = current.trim();
    if in_brackets || trimmed.is_empty() {
        return Err(unsupported(selector));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

fn tokenize(selector: &str) -> Result<Vec<String>, DomError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut in_quotes = false;

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in selector.chars() {
        match ch {
            '"' if in_brackets => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '[' if !in_quotes => {
                in_brackets = true;
                current.push(ch);
            }
            ']' if !in_quotes => {
                if !in_brackets {
                    return Err(unsupported(selector));
                }
                in_brackets = false;
                current.push(ch);
            }
            '>' if !in_brackets => {
                flush(&mut current, &mut tokens);
                tokens.push(">".to_string());
            }
            ch if ch.is_ascii_whitespace() && !in_brackets => {
                flush(&mut current, &mut tokens);
            }
            _ => current.push(ch),
        }
    }

    if in_brackets || in_quotes {
        return Err(unsupported(selector));
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn parse_chain(selector: &str) -> Result<Vec<SelectorPart>, DomError> {
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(selector)? {
        if token == ">" {
            if pending.is_some() || parts.is_empty() {
                return Err(unsupported(selector));
            }
            pending = Some(Combinator::Child);
            continue;
        }

        let step = parse_step(&token).ok_or_else(|| unsupported(selector))?;
        let combinator = if parts.is_empty() {
            None
        } else {
            Some(pending.take().unwrap_or(Combinator::Descendant))
        };
        parts.push(SelectorPart { step, combinator });
    }

    if parts.is_empty() || pending.is_some() {
        return Err(unsupported(selector));
    }
    Ok(parts)
}

fn parse_step(part: &str) -> Option<SelectorStep> {
    let mut step = SelectorStep::default();
    let mut universal = false;
    let mut rest = part;

    while let Some(ch) = rest.chars().next() {
        match ch {
            '*' => {
                if universal || step.tag.is_some() {
                    return None;
                }
                universal = true;
                rest = &rest[1..];
            }
            '#' => {
                let (ident, next) = take_ident(&rest[1..])?;
                if step.id.replace(ident).is_some() {
                    return None;
                }
                rest = next;
            }
            '.' => {
                let (ident, next) = take_ident(&rest[1..])?;
                step.classes.push(ident);
                rest = next;
            }
            '[' => {
                let end = rest.find(']')?;
                step.attrs.push(parse_attr(&rest[1..end])?);
                rest = &rest[end + 1..];
            }
            _ => {
                if universal || step.tag.is_some() || step.id.is_some() || !step.classes.is_empty()
                {
                    return None;
                }
                let (ident, next) = take_ident(rest)?;
                step.tag = Some(ident.to_ascii_lowercase());
                rest = next;
            }
        }
    }

    Some(step)
}

fn take_ident(input: &str) -> Option<(String, &str)> {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    Some((input[..end].to_string(), &input[end..]))
}

fn parse_attr(inner: &str) -> Option<AttrCondition> {
    match inner.split_once('=') {
        None => {
            let (name, rest) = take_ident(inner.trim())?;
            rest.is_empty().then_some(AttrCondition::Exists(name))
        }
        Some((name, value)) => {
            let (name, rest) = take_ident(name.trim())?;
            if !rest.is_empty() {
                return None;
            }
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Some(AttrCondition::Equals(name, unquoted.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_step(selector: &str) -> SelectorStep {
        let parsed = Selector::parse(selector).unwrap();
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.groups[0].len(), 1);
        parsed.groups[0][0].step.clone()
    }

    #[test]
    fn test_parse_class() {
        let step = single_step(".flash-message");
        assert_eq!(step.classes, vec!["flash-message".to_string()]);
        assert!(step.tag.is_none());
    }

    #[test]
    fn test_parse_compound() {
        let step = single_step("div.flash-message.flash-success#first");
        assert_eq!(step.tag.as_deref(), Some("div"));
        assert_eq!(step.id.as_deref(), Some("first"));
        assert_eq!(step.classes.len(), 2);
    }

    #[test]
    fn test_parse_attr_conditions() {
        let step = single_step(r#"input[type="file"][required]"#);
        assert_eq!(step.tag.as_deref(), Some("input"));
        assert_eq!(
            step.attrs,
            vec![
                AttrCondition::Equals("type".into(), "file".into()),
                AttrCondition::Exists("required".into()),
            ]
        );
    }

    #[test]
    fn test_parse_descendant_and_child() {
        let parsed = Selector::parse(".hero h1, nav > ul").unwrap();
        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(parsed.groups[0][1].combinator, Some(Combinator::Descendant));
        assert_eq!(parsed.groups[1][1].combinator, Some(Combinator::Child));
    }

    #[test]
    fn test_comma_inside_attribute_value() {
        let parsed = Selector::parse(r#"[data-x="a,b"]"#).unwrap();
        assert_eq!(parsed.groups.len(), 1);
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", " , .a", "a >", "> a", "[type", ".", "div span.", "a*"] {
            assert!(Selector::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
