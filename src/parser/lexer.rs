//! Minimal Groovy tokenizer for Jenkinsfiles.
//!
//! Only distinguishes what stage and `sh` extraction needs: words, string
//! literals, braces, parentheses and colons. Comments are dropped, so braces
//! or `stage(...)` calls inside comments and strings never reach the parser.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Str(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Colon,
    Other(char),
}

impl Token {
    pub fn is_word(&self, word: &str) -> bool {
        matches!(self, Self::Word(w) if w == word)
    }

    pub fn is_word_ignore_case(&self, word: &str) -> bool {
        matches!(self, Self::Word(w) if w.eq_ignore_ascii_case(word))
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '/' if chars.get(i + 1) == Some(&'/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            '\'' | '"' => {
                let (literal, next) = read_string(&chars, i);
                tokens.push(Token::Str(literal));
                i = next;
            }
            '{' => {
                tokens.push(Token::LBrace);
                i += 1;
            }
            '}' => {
                tokens.push(Token::RBrace);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            c if is_word_char(c) => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Word(chars[start..i].iter().collect()));
            }
            other => {
                tokens.push(Token::Other(other));
                i += 1;
            }
        }
    }

    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Reads the string literal starting at `start`, returning its text and the
/// index just past the closing quote.
fn read_string(chars: &[char], start: usize) -> (String, usize) {
    let quote = chars[start];
    let triple = chars.get(start + 1) == Some(&quote) && chars.get(start + 2) == Some(&quote);

    if triple {
        let (raw, next) = read_until_triple(chars, start + 3, quote);
        (strip_indent(&raw), next)
    } else {
        read_single_line(chars, start + 1, quote)
    }
}

fn read_until_triple(chars: &[char], mut i: usize, quote: char) -> (String, usize) {
    let mut text = String::new();

    while i < chars.len() {
        if chars[i] == quote && chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote) {
            return (text, i + 3);
        }
        i = push_char(chars, i, &mut text);
    }

    (text, i)
}

/// Single and double quoted literals end at the closing quote or, when
/// unterminated, at the end of the line.
fn read_single_line(chars: &[char], mut i: usize, quote: char) -> (String, usize) {
    let mut text = String::new();

    while i < chars.len() {
        match chars[i] {
            c if c == quote => return (text, i + 1),
            '\n' => return (text, i),
            '$' if quote == '"' && chars.get(i + 1) == Some(&'{') => {
                i = push_interpolation(chars, i, &mut text);
            }
            _ => i = push_char(chars, i, &mut text),
        }
    }

    (text, i)
}

/// Copies a `${...}` interpolation verbatim, quotes inside it included.
fn push_interpolation(chars: &[char], mut i: usize, text: &mut String) -> usize {
    let mut depth = 0usize;

    while i < chars.len() {
        let c = chars[i];
        text.push(c);
        i += 1;
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    break;
                }
            }
            '\n' => break,
            _ => {}
        }
    }

    i
}

fn push_char(chars: &[char], i: usize, text: &mut String) -> usize {
    match (chars[i], chars.get(i + 1)) {
        ('\\', Some(&next @ ('\\' | '\'' | '"' | '$'))) => {
            text.push(next);
            i + 2
        }
        ('\\', Some(&next)) => {
            text.push('\\');
            text.push(next);
            i + 2
        }
        (c, _) => {
            text.push(c);
            i + 1
        }
    }
}

/// Drops the newline after the opening quotes, a trailing blank line and the
/// indentation shared by all non-blank lines.
fn strip_indent(raw: &str) -> String {
    let body = raw
        .strip_prefix("\r\n")
        .or_else(|| raw.strip_prefix('\n'))
        .unwrap_or(raw);

    let mut lines: Vec<&str> = body.lines().collect();
    if lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let margin = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line.get(margin..).unwrap_or_else(|| line.trim_start())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
