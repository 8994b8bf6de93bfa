//! Static decoder for PHP lang files.
//!
//! Laravel-style lang files are PHP scripts that `return` an array literal:
//!
//! ```php
//! <?php
//!
//! return [
//!     'welcome' => 'Welcome, :name',
//!     'nav' => ['home' => 'Home'],
//! ];
//! ```
//!
//! Nothing is executed. The file is parsed with tree-sitter and the syntax
//! tree is read as data: only literals (strings, numbers, booleans, `null`,
//! nested arrays) and string concatenation are accepted; anything requiring
//! evaluation is reported as an error.

use std::{fmt, iter::Peekable, str::Chars};

use serde_json::{Map, Number, Value};
use tree_sitter::{Node, Parser};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhpParseError {
    /// 1-based line of the offending node.
    pub line: usize,
    pub message: String,
}

impl PhpParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for PhpParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}", self.message, self.line)
    }
}

impl std::error::Error for PhpParseError {}

type ParseResult<T> = Result<T, PhpParseError>;

/// Decode the array returned by a PHP lang file.
pub fn parse_php(content: &str) -> ParseResult<Value> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
        .map_err(|e| PhpParseError::new(1, format!("failed to load the PHP grammar: {}", e)))?;
    let tree = parser
        .parse(content, None)
        .ok_or_else(|| PhpParseError::new(1, "PHP parser returned no syntax tree"))?;

    let root = tree.root_node();
    let decoder = Decoder { source: content };
    if let Some(node) = first_syntax_error(root) {
        return Err(decoder.syntax_error(node));
    }
    decoder.file(root)
}

/// First `ERROR` or `MISSING` node in document order. A missing `;` is
/// tolerated: PHP allows the last statement to end at `?>` or end of file.
fn first_syntax_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || (node.is_missing() && node.kind() != ";") {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    node.children(&mut cursor).find_map(first_syntax_error)
}

/// Named children, skipping comments.
fn operands(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// The first anonymous token of `node`, e.g. the operator of an expression.
fn operator<'t>(node: Node<'t>) -> Option<&'static str> {
    let mut cursor = node.walk();
    let found: Option<Node<'t>> = node
        .children(&mut cursor)
        .find(|child| !child.is_named() && child.kind() != "comment");
    found.map(|child| child.kind())
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

struct Decoder<'a> {
    source: &'a str,
}

impl<'a> Decoder<'a> {
    fn file(&self, root: Node<'_>) -> ParseResult<Value> {
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "php_tag" | "text" | "text_interpolation" | "comment" | "declare_statement"
                | "namespace_definition" | "namespace_use_declaration" => {}
                "return_statement" => return self.returned(node),
                _ => {
                    return Err(self.error(
                        node,
                        format!("unsupported statement `{}`", self.leading_word(node)),
                    ));
                }
            }
        }
        Err(PhpParseError::new(
            root.end_position().row + 1,
            "expected a `return` statement",
        ))
    }

    fn returned(&self, node: Node<'_>) -> ParseResult<Value> {
        match operands(node).first() {
            Some(expr) => self.value(*expr),
            None => Err(self.error(node, "expected a value after `return`")),
        }
    }

    // ============================================================
    // Expressions
    // ============================================================

    fn value(&self, node: Node<'_>) -> ParseResult<Value> {
        match node.kind() {
            "array_creation_expression" => self.array(node),
            "string" | "encapsed_string" => self.string(node).map(Value::String),
            "integer" | "float" => self.number(node).map(Value::Number),
            "boolean" | "null" | "name" | "qualified_name" => self.constant(node),
            "parenthesized_expression" => match operands(node).as_slice() {
                [inner] => self.value(*inner),
                _ => Err(self.unsupported(node)),
            },
            "unary_op_expression" => self.unary(node),
            "binary_expression" => self.concat(node),
            "variable_name" => Err(self.error(node, "variables are not supported in lang files")),
            "heredoc" | "nowdoc" => Err(self.error(node, "heredoc strings are not supported")),
            _ => Err(self.unsupported(node)),
        }
    }

    fn constant(&self, node: Node<'_>) -> ParseResult<Value> {
        let text = self.text(node);
        if text.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else if text.eq_ignore_ascii_case("null") {
            Ok(Value::Null)
        } else {
            Err(self.unsupported(node))
        }
    }

    fn unary(&self, node: Node<'_>) -> ParseResult<Value> {
        let [operand] = operands(node)[..] else {
            return Err(self.unsupported(node));
        };
        match (operator(node), self.value(operand)?) {
            (Some("+"), value @ Value::Number(_)) => Ok(value),
            (Some("-"), Value::Number(n)) => {
                let negated = match n.as_i64() {
                    Some(i) => i.checked_neg().map(Number::from),
                    None => n.as_f64().and_then(|f| Number::from_f64(-f)),
                };
                negated
                    .map(Value::Number)
                    .ok_or_else(|| self.error(node, format!("invalid number `{}`", self.text(node))))
            }
            _ => Err(self.unsupported(node)),
        }
    }

    fn concat(&self, node: Node<'_>) -> ParseResult<Value> {
        let op = operator(node).unwrap_or_default();
        if op != "." {
            return Err(self.error(
                node,
                format!("unsupported operator `{}` (only `.` concatenation is allowed)", op),
            ));
        }
        let [left, right] = operands(node)[..] else {
            return Err(self.unsupported(node));
        };
        let mut joined = self.concat_operand(left, self.value(left)?)?;
        joined.push_str(&self.concat_operand(right, self.value(right)?)?);
        Ok(Value::String(joined))
    }

    /// `[...]` or `array(...)`. Unkeyed entries continue from the highest
    /// integer key seen so far.
    fn array(&self, node: Node<'_>) -> ParseResult<Value> {
        let mut map = Map::new();
        let mut next_index: i64 = 0;

        for element in operands(node) {
            if element.kind() != "array_element_initializer" {
                return Err(self.unsupported(element));
            }
            let (key, value) = match operands(element)[..] {
                [value] => (next_index.to_string(), self.value(value)?),
                [key, value] => (self.array_key(key, self.value(key)?)?, self.value(value)?),
                _ => return Err(self.error(element, "unsupported array element")),
            };

            if let Ok(index) = key.parse::<i64>()
                && index.to_string() == key
            {
                next_index = next_index.max(index.saturating_add(1));
            }
            map.insert(key, value);
        }

        Ok(Value::Object(map))
    }

    /// PHP casts array keys: bools and floats become integers, null becomes "".
    fn array_key(&self, node: Node<'_>, key: Value) -> ParseResult<String> {
        match key {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => i.to_string(),
                None => (n.as_f64().unwrap_or_default().trunc() as i64).to_string(),
            }),
            Value::Bool(b) => Ok(if b { "1" } else { "0" }.to_string()),
            Value::Null => Ok(String::new()),
            Value::Array(_) | Value::Object(_) => {
                Err(self.error(node, "arrays cannot be used as keys"))
            }
        }
    }

    fn concat_operand(&self, node: Node<'_>, value: Value) -> ParseResult<String> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(true) => Ok("1".to_string()),
            Value::Bool(false) | Value::Null => Ok(String::new()),
            Value::Array(_) | Value::Object(_) => {
                Err(self.error(node, "arrays cannot be concatenated"))
            }
        }
    }

    // ============================================================
    // Literals
    // ============================================================

    fn string(&self, node: Node<'_>) -> ParseResult<String> {
        let text = self.text(node);
        let text = text.strip_prefix(['b', 'B']).unwrap_or(text);
        let quote = if node.kind() == "string" { '\'' } else { '"' };
        let Some(body) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        else {
            return Err(self.error(node, "unterminated string"));
        };

        if quote == '\'' {
            Ok(unescape_single_quoted(body))
        } else {
            unescape_double_quoted(body).map_err(|message| self.error(node, message))
        }
    }

    fn number(&self, node: Node<'_>) -> ParseResult<Number> {
        let text: String = self.text(node).chars().filter(|c| *c != '_').collect();
        let number = if node.kind() == "float" {
            text.parse::<f64>().ok().and_then(Number::from_f64)
        } else {
            parse_integer(&text).map(Number::from)
        };
        number.ok_or_else(|| self.error(node, format!("invalid number `{}`", text)))
    }

    // ============================================================
    // Errors
    // ============================================================

    fn text(&self, node: Node<'_>) -> &'a str {
        self.source.get(node.byte_range()).unwrap_or_default()
    }

    /// The first identifier-like word of a node, for error messages.
    fn leading_word(&self, node: Node<'_>) -> &'a str {
        self.text(node)
            .split(|c: char| !(c == '_' || c == '$' || c == '\\' || c.is_alphanumeric()))
            .find(|word| !word.is_empty())
            .unwrap_or_else(|| node.kind())
    }

    fn error(&self, node: Node<'_>, message: impl Into<String>) -> PhpParseError {
        PhpParseError::new(line_of(node), message)
    }

    fn unsupported(&self, node: Node<'_>) -> PhpParseError {
        self.error(
            node,
            format!(
                "unsupported expression `{}` (only literal values can be read)",
                self.leading_word(node)
            ),
        )
    }

    fn syntax_error(&self, node: Node<'_>) -> PhpParseError {
        if node.is_missing() {
            return self.error(node, format!("missing `{}`", node.kind()));
        }
        let snippet: String = self
            .text(node)
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default()
            .chars()
            .take(24)
            .collect();
        if snippet.is_empty() {
            self.error(node, "syntax error")
        } else {
            self.error(node, format!("syntax error near `{}`", snippet))
        }
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    let lower = text.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        i64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}

/// Only `\'` and `\\` are escapes in single-quoted strings.
fn unescape_single_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next @ ('\'' | '\\'))) => {
                chars.next();
                out.push(next);
            }
            _ => out.push(c),
        }
    }
    out
}

fn unescape_double_quoted(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' if chars.peek().is_some_and(|&n| is_ident_start(n) || n == '{') => {
                return Err("variable interpolation is not supported".to_string());
            }
            '\\' => unescape_sequence(&mut chars, &mut out)?,
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escape sequences in double-quoted strings. The backslash has been consumed.
fn unescape_sequence(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), String> {
    let Some(&c) = chars.peek() else {
        out.push('\\');
        return Ok(());
    };
    let simple = match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'v' => Some('\u{0b}'),
        'e' => Some('\u{1b}'),
        'f' => Some('\u{0c}'),
        '\\' => Some('\\'),
        '$' => Some('$'),
        '"' => Some('"'),
        _ => None,
    };
    if let Some(ch) = simple {
        chars.next();
        out.push(ch);
        return Ok(());
    }

    let second = {
        let mut ahead = chars.clone();
        ahead.next();
        ahead.peek().copied()
    };
    match c {
        '0'..='7' => {
            let digits = take_digits(chars, 3, 8);
            let code = u32::from_str_radix(&digits, 8).unwrap_or_default() & 0xff;
            out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
        }
        'x' if second.is_some_and(|c| c.is_ascii_hexdigit()) => {
            chars.next();
            let digits = take_digits(chars, 2, 16);
            let code = u32::from_str_radix(&digits, 16).unwrap_or_default();
            out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
        }
        'u' if second == Some('{') => {
            chars.next();
            chars.next();
            let digits = take_digits(chars, 6, 16);
            if chars.next() != Some('}') {
                return Err("malformed `\\u{...}` escape".to_string());
            }
            let ch = u32::from_str_radix(&digits, 16)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| "invalid unicode escape".to_string())?;
            out.push(ch);
        }
        _ => out.push('\\'),
    }
    Ok(())
}

fn take_digits(chars: &mut Peekable<Chars<'_>>, max: usize, radix: u32) -> String {
    let mut digits = String::new();
    while digits.len() < max {
        match chars.peek() {
            Some(&c) if c.is_digit(radix) => {
                digits.push(c);
                chars.next();
            }
            _ => break,
        }
    }
    digits
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}
