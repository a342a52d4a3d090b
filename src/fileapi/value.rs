use std::fmt;
use thiserror::Error;

/// A value read from a text file by `read`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),    // A plain word
    Quoted(String), // Quotes stripped
    List(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Str,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "floating-point number",
            ValueKind::Str => "string",
            ValueKind::List => "list",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read {token:?} as {expected}")]
pub struct ParseValueError {
    pub token: String,
    pub expected: ValueKind,
}

impl ParseValueError {
    fn new(token: &str, expected: ValueKind) -> Self {
        ParseValueError {
            token: token.to_owned(),
            expected,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{:?}", x), // Keeps the ".0" of integral floats
            Value::Str(s) => f.write_str(s),
            // No escapes exist, so a string holding both quote characters
            // does not read back unchanged.
            Value::Quoted(s) if s.contains('"') => write!(f, "'{}'", s),
            Value::Quoted(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("}")
            }
        }
    }
}

pub fn parse_int(token: &str) -> Result<i64, ParseValueError> {
    token
        .parse::<i64>()
        .map_err(|_| ParseValueError::new(token, ValueKind::Int))
}

pub fn parse_float(token: &str) -> Result<f64, ParseValueError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseValueError::new(token, ValueKind::Float))
}

// Returns the text between matching single or double quotes, if the token is quoted.
pub fn unquote(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if (first == '"' || first == '\'') && token.len() >= 2 && token.ends_with(first) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Parses a brace-delimited list such as `{1, 2.5, "a b", {3}}`.
/// Elements are split at top-level commas and parsed with `parse_value`.
pub fn parse_list(token: &str) -> Result<Vec<Value>, ParseValueError> {
    let inner = token
        .strip_prefix('{')
        .and_then(|t| t.strip_suffix('}'))
        .ok_or_else(|| ParseValueError::new(token, ValueKind::List))?;

    let mut items = Vec::new();
    if inner.trim().is_empty() {
        return Ok(items);
    }

    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut item_start = 0;
    for (i, c) in inner.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| ParseValueError::new(token, ValueKind::List))?
            }
            (None, ',') if depth == 0 => {
                items.push(parse_value(inner[item_start..i].trim()));
                item_start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return Err(ParseValueError::new(token, ValueKind::List));
    }
    items.push(parse_value(inner[item_start..].trim()));
    Ok(items)
}

/// Interprets a token: integer, then float, then quoted string, then list,
/// otherwise the token itself as a plain string. Never fails.
pub fn parse_value(token: &str) -> Value {
    if let Ok(x) = parse_int(token) {
        return Value::Int(x);
    }
    if let Ok(x) = parse_float(token) {
        return Value::Float(x);
    }
    if let Some(s) = unquote(token) {
        return Value::Quoted(s.to_owned());
    }
    if token.starts_with('{') {
        if let Ok(items) = parse_list(token) {
            return Value::List(items);
        }
    }
    Value::Str(token.to_owned())
}
