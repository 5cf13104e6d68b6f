//! Single-pass JavaScript tokenizer.
//!
//! Produces a flat token list with byte spans. Comments, whitespace, and a
//! leading shebang line are trivia: they are skipped, but every token records
//! whether a line break occurred before it so the statement splitter can apply
//! its semicolon-insertion heuristic.
//!
//! Regex literals are detected with a previous-token heuristic (a `/` after a
//! token that cannot end an expression starts a regex). That is the standard
//! bounded approximation for lexing JS without a parse; a misread degrades to
//! an unrecognized statement, never to corrupted output.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident,
    /// String literal; `value` is the cooked (unescaped) contents.
    Str { value: String },
    Num,
    Template,
    Regex,
    /// Punctuation, including multi-character operators.
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub newline_before: bool,
}

impl Token {
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }

    pub fn is_ident(&self, src: &str, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(src) == name
    }

    pub fn is_punct(&self, src: &str, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text(src) == p
    }
}

/// Multi-character operators, longest first so the scanner can greedy-match.
const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "<<=", ">>=", ">>>", "...", "&&=", "||=", "??=", "=>", "==", "!=",
    "<=", ">=", "&&", "||", "??", "?.", "**", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<",
    ">>", "++", "--",
];

/// Keywords after which a `/` begins a regex literal rather than division.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "in", "of", "new", "delete", "void", "throw", "case", "do",
    "else", "yield", "await",
];

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// Tokenize `src`. Never fails: unrecognized characters become one-character
/// punctuation tokens.
pub fn tokenize(src: &str) -> Vec<Token> {
    let bytes = src.as_bytes();
    let mut tokens: Vec<Token> = Vec::new();
    let mut i = 0usize;
    let mut newline_before = false;

    // Shebang line is trivia.
    if src.starts_with("#!") {
        i = src.find('\n').map_or(src.len(), |n| n + 1);
        newline_before = true;
    }

    while i < src.len() {
        let c = src[i..].chars().next().unwrap();

        // Whitespace
        if c.is_whitespace() {
            if c == '\n' {
                newline_before = true;
            }
            i += c.len_utf8();
            continue;
        }

        // Comments
        if c == '/' && bytes.get(i + 1) == Some(&b'/') {
            i = src[i..].find('\n').map_or(src.len(), |n| i + n);
            continue;
        }
        if c == '/' && bytes.get(i + 1) == Some(&b'*') {
            let close = src[i + 2..].find("*/").map_or(src.len(), |n| i + 2 + n + 2);
            if src[i..close.min(src.len())].contains('\n') {
                newline_before = true;
            }
            i = close;
            continue;
        }

        let start = i;
        let kind;

        if is_ident_start(c) {
            let mut j = i;
            while j < src.len() {
                let ch = src[j..].chars().next().unwrap();
                if !is_ident_continue(ch) {
                    break;
                }
                j += ch.len_utf8();
            }
            i = j;
            kind = TokenKind::Ident;
        } else if c == '"' || c == '\'' {
            let (end, value) = scan_string(src, i, c);
            i = end;
            kind = TokenKind::Str { value };
        } else if c == '`' {
            i = scan_template(src, i);
            kind = TokenKind::Template;
        } else if c.is_ascii_digit() || (c == '.' && next_is_digit(src, i + 1)) {
            i = scan_number(src, i);
            kind = TokenKind::Num;
        } else if c == '/' && regex_allowed(src, &tokens) {
            i = scan_regex(src, i);
            kind = TokenKind::Regex;
        } else {
            let rest = &src[i..];
            if let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) {
                i += op.len();
            } else {
                i += c.len_utf8();
            }
            kind = TokenKind::Punct;
        }

        tokens.push(Token {
            kind,
            start,
            end: i,
            newline_before,
        });
        newline_before = false;
    }

    tokens
}

fn next_is_digit(src: &str, i: usize) -> bool {
    src[i.min(src.len())..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn scan_string(src: &str, start: usize, quote: char) -> (usize, String) {
    let mut value = String::new();
    let mut chars = src[start + 1..].char_indices();
    while let Some((off, c)) = chars.next() {
        let at = start + 1 + off;
        match c {
            '\\' => {
                if let Some((_, esc)) = chars.next() {
                    value.push(match esc {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                } else {
                    return (src.len(), value);
                }
            }
            c if c == quote => return (at + c.len_utf8(), value),
            '\n' => return (at, value), // unterminated
            c => value.push(c),
        }
    }
    (src.len(), value)
}

fn scan_template(src: &str, start: usize) -> usize {
    let mut i = start + 1;
    let mut brace_depth = 0usize;
    while i < src.len() {
        let c = src[i..].chars().next().unwrap();
        match c {
            '\\' => {
                i += 1;
                if let Some(n) = src[i..].chars().next() {
                    i += n.len_utf8();
                }
                continue;
            }
            '$' if brace_depth == 0 && src[i..].starts_with("${") => {
                brace_depth = 1;
                i += 2;
                continue;
            }
            '{' if brace_depth > 0 => brace_depth += 1,
            '}' if brace_depth > 0 => brace_depth -= 1,
            '\'' | '"' if brace_depth > 0 => {
                let (end, _) = scan_string(src, i, c);
                i = end;
                continue;
            }
            '`' if brace_depth == 0 => return i + 1,
            _ => {}
        }
        i += c.len_utf8();
    }
    src.len()
}

fn scan_number(src: &str, start: usize) -> usize {
    let mut i = start;
    let mut prev_exp = false;
    while i < src.len() {
        let c = src[i..].chars().next().unwrap();
        let continues = c.is_ascii_alphanumeric()
            || c == '.'
            || c == '_'
            || (prev_exp && (c == '+' || c == '-'));
        if !continues {
            break;
        }
        prev_exp = c == 'e' || c == 'E';
        i += c.len_utf8();
    }
    i
}

fn scan_regex(src: &str, start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;
    while i < src.len() {
        let c = src[i..].chars().next().unwrap();
        match c {
            '\\' => {
                i += 1;
                if let Some(n) = src[i..].chars().next() {
                    i += n.len_utf8();
                }
                continue;
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                i += 1;
                // Flags
                while i < src.len() {
                    let f = src[i..].chars().next().unwrap();
                    if !f.is_ascii_alphabetic() {
                        break;
                    }
                    i += f.len_utf8();
                }
                return i;
            }
            '\n' => return i, // not a regex after all; give up at the line end
            _ => {}
        }
        i += c.len_utf8();
    }
    src.len()
}

fn regex_allowed(src: &str, tokens: &[Token]) -> bool {
    match tokens.last() {
        None => true,
        Some(t) => match t.kind {
            TokenKind::Ident => REGEX_PRECEDING_KEYWORDS.contains(&t.text(src)),
            TokenKind::Punct => !matches!(t.text(src), ")" | "]" | "}" | "++" | "--"),
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<String> {
        tokenize(src).iter().map(|t| t.text(src).to_string()).collect()
    }

    #[test]
    fn basic_statement() {
        assert_eq!(
            texts("const lib = require('./lib');"),
            vec!["const", "lib", "=", "require", "(", "'./lib'", ")", ";"]
        );
    }

    #[test]
    fn string_value_is_cooked() {
        let src = r#"x = "a\'b""#;
        let tokens = tokenize(src);
        let TokenKind::Str { value } = &tokens[2].kind else {
            panic!("expected string token");
        };
        assert_eq!(value, "a'b");
    }

    #[test]
    fn comments_and_shebang_are_trivia() {
        let src = "#!/usr/bin/env node\n// hi\n/* block */ let x = 1;";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].text(src), "let");
        assert!(tokens[0].newline_before);
    }

    #[test]
    fn newline_before_flag() {
        let tokens = tokenize("a\nb");
        assert!(!tokens[0].newline_before);
        assert!(tokens[1].newline_before);
    }

    #[test]
    fn template_with_interpolation() {
        let src = "`a ${ { b: `c` } } d` + 1";
        let tokens = tokenize(src);
        assert_eq!(tokens[0].kind, TokenKind::Template);
        assert_eq!(tokens[1].text(src), "+");
    }

    #[test]
    fn regex_vs_division() {
        let src = "x = a / b;";
        let tokens = tokenize(src);
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Regex));

        let src = "x = /ab[/]c/g.test(y);";
        let tokens = tokenize(src);
        assert_eq!(tokens[2].kind, TokenKind::Regex);
        assert_eq!(tokens[2].text(src), "/ab[/]c/g");
    }

    #[test]
    fn multichar_operators() {
        assert_eq!(texts("a === b ?? c?.d"), vec!["a", "===", "b", "??", "c", "?.", "d"]);
    }
}
