use log::debug;
use thiserror::Error;

use crate::models::graph::{ GraphData, GraphPoint };
use crate::solver::normalizer::strip_delimiters;

/// Function names understood by the evaluator
const FUNCTIONS: &[&str] = &[
    "sqrt", "abs", "exp", "ln", "sin", "cos", "tan", "asin", "acos", "atan",
    "sinh", "cosh", "tanh", "floor", "ceil", "round", "signum",
];
const CONSTANTS: &[&str] = &["pi", "e"];

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("No expression to graph")]
    Empty,

    #[error("Could not parse expression '{expression}': {message}")]
    Parse { expression: String, message: String },

    #[error("Invalid range: {min} > {max}")]
    InvalidRange { min: i32, max: i32 },
}

/// Integer x positions to sample, inclusive at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphRange {
    pub min: i32,
    pub max: i32,
}

impl Default for GraphRange {
    fn default() -> Self {
        Self { min: -10, max: 10 }
    }
}

/// Evaluate the right-hand side of `equation` at every integer x in `range`.
///
/// Points where the expression is undefined or not finite get `y: None`.
pub fn sample_graph(equation: &str, range: GraphRange) -> Result<GraphData, GraphError> {
    if range.min > range.max {
        return Err(GraphError::InvalidRange {
            min: range.min,
            max: range.max,
        });
    }

    let expression = to_infix(equation)?;
    let parse_error = |e: meval::Error| GraphError::Parse {
        expression: expression.clone(),
        message: e.to_string(),
    };
    let parsed: meval::Expr = expression.parse().map_err(parse_error)?;
    let f = parsed.bind("x").map_err(parse_error)?;

    let points = (range.min..=range.max)
        .map(|x| {
            let x = f64::from(x);
            let y = f(x);
            GraphPoint {
                x,
                y: if y.is_finite() { Some(y) } else { None },
            }
        })
        .collect();

    debug!("Sampled {} over [{}, {}]", expression, range.min, range.max);
    Ok(GraphData { expression, points })
}

/// Turn a delimited LaTeX equation into an infix expression in `x`
pub fn to_infix(equation: &str) -> Result<String, GraphError> {
    let inner = strip_delimiters(equation);
    let rhs = inner.rsplit('=').next().unwrap_or(inner).trim();
    if rhs.is_empty() {
        return Err(GraphError::Empty);
    }
    let plain = translate_latex(rhs).map_err(|message| GraphError::Parse {
        expression: rhs.to_string(),
        message,
    })?;
    Ok(insert_implicit_multiplication(&plain))
}

fn translate_latex(src: &str) -> Result<String, String> {
    let mut out = String::new();
    let mut rest = src;

    while let Some(c) = rest.chars().next() {
        if c != '\\' {
            match c {
                '{' => out.push('('),
                '}' => out.push(')'),
                '·' | '×' => out.push('*'),
                '÷' => out.push('/'),
                '−' => out.push('-'),
                _ => out.push(c),
            }
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let name_len = rest[1..].bytes().take_while(u8::is_ascii_alphabetic).count();
        if name_len == 0 {
            // Spacing commands such as "\," or "\ "
            let skipped = rest[1..].chars().next().map_or(0, char::len_utf8);
            rest = &rest[1 + skipped..];
            continue;
        }
        let name = &rest[1..1 + name_len];
        rest = &rest[1 + name_len..];

        match name {
            "frac" | "dfrac" => {
                let (num, after) = take_group(rest)?;
                let (den, after) = take_group(after)?;
                out.push_str(&format!("(({})/({}))", translate_latex(num)?, translate_latex(den)?));
                rest = after;
            }
            "sqrt" => {
                let (arg, after) = take_group(rest)?;
                out.push_str(&format!("sqrt({})", translate_latex(arg)?));
                rest = after;
            }
            "cdot" | "times" => out.push('*'),
            "div" => out.push('/'),
            "left" | "right" => {}
            _ => out.push_str(name),
        }
    }

    Ok(out)
}

/// Split `{...}` off the front of `s`, returning its contents and the remainder
fn take_group(s: &str) -> Result<(&str, &str), String> {
    let s = s.trim_start();
    if !s.starts_with('{') {
        return Err("expected '{'".to_string());
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '{' => {
                depth += 1;
            }
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&s[1..i], &s[i + 1..]));
                }
            }
            _ => {}
        }
    }
    Err("unbalanced braces".to_string())
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(String),
    Function(String),
    /// Variable or constant
    Value(String),
    Open,
    Close,
    Other(char),
}

impl Token {
    fn ends_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Value(_) | Token::Close)
    }

    fn starts_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Value(_) | Token::Function(_) | Token::Open)
    }

    fn text(&self) -> String {
        match self {
            Token::Number(s) | Token::Function(s) | Token::Value(s) => s.clone(),
            Token::Open => "(".to_string(),
            Token::Close => ")".to_string(),
            Token::Other(c) => c.to_string(),
        }
    }
}

fn tokenize(expr: &str) -> Vec<Token> {
    let chars: Vec<char> = expr.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            tokens.push(Token::Number(chars[start..i].iter().collect()));
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            if FUNCTIONS.contains(&word.as_str()) {
                tokens.push(Token::Function(word));
            } else if CONSTANTS.contains(&word.as_str()) {
                tokens.push(Token::Value(word));
            } else {
                // "xy" reads as x*y
                tokens.extend(word.chars().map(|ch| Token::Value(ch.to_string())));
            }
        } else {
            i += 1;
            match c {
                '(' => tokens.push(Token::Open),
                ')' => tokens.push(Token::Close),
                c if c.is_whitespace() => {}
                c => tokens.push(Token::Other(c)),
            }
        }
    }

    tokens
}

/// Make juxtaposition explicit: `2x(x+1)` becomes `2*x*(x+1)`.
///
/// A function written without parentheses takes the operand that follows it,
/// so `sin 2x` becomes `sin(2*x)` and `ln sin x` becomes `ln(sin(x))`.
fn insert_implicit_multiplication(expr: &str) -> String {
    let tokens = tokenize(expr);
    let mut out = String::new();
    let mut depth = 0usize;
    // Paren depth at which each bare function argument was opened
    let mut bare_args: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 && tokens[i - 1].ends_value() && token.starts_value() {
            out.push('*');
        }
        out.push_str(&token.text());

        let next = tokens.get(i + 1);
        match token {
            Token::Function(_) if next != Some(&Token::Open) => {
                out.push('(');
                bare_args.push(depth);
            }
            Token::Open => {
                depth += 1;
            }
            Token::Close => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }

        let continues_operand = matches!(
            next,
            Some(Token::Number(_) | Token::Value(_) | Token::Other('^'))
        );
        if token.ends_value() && !continues_operand {
            while bare_args.last() == Some(&depth) {
                bare_args.pop();
                out.push(')');
            }
        }
    }

    out.push_str(&")".repeat(bare_args.len()));
    out
}
