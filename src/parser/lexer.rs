//! Tokens of the pre-processed Jenkinsfile

use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"([ \t\r\n\f]+|//[^\n]*|/\*([^*]|\*+[^*/])*\*+/)")]
pub enum Token {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    /// Single- or double-quoted string, quotes removed
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    #[regex(r"'([^'\\]|\\.)*'", |lex| unquote(lex.slice()))]
    Str(String),

    /// Backtick raw string produced by the preprocessor
    #[regex(r"`[^`]*`", |lex| unquote(lex.slice()))]
    Raw(String),

    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    // Kept as text so tokens stay hashable
    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice().to_string())]
    Float(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::Colon => write!(f, "':'"),
            Token::Equals => write!(f, "'='"),
            Token::Ident(name) => write!(f, "identifier '{}'", name),
            Token::Str(_) => write!(f, "string"),
            Token::Raw(_) => write!(f, "block body"),
            Token::Int(i) => write!(f, "integer {}", i),
            Token::Float(s) => write!(f, "number {}", s),
        }
    }
}

/// Strip the delimiters and resolve `\\`, `\'` and `\"`.
///
/// Other escapes such as `\$` are shell-relevant and kept as written.
fn unquote(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next @ ('\\' | '\'' | '"')) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }

    out
}

/// Tokenize the whole text, failing at the first unrecognized character
pub fn tokenize(text: &str) -> Result<Vec<(Token, Range<usize>)>, Range<usize>> {
    Token::lexer(text)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(span),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        tokenize(text)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_punctuation_and_idents() {
        assert_eq!(
            tokens("stage('a') { }"),
            vec![
                Token::Ident("stage".to_string()),
                Token::LParen,
                Token::Str("a".to_string()),
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let text = "// line comment\nagent /* block\n comment */ any";
        assert_eq!(
            tokens(text),
            vec![Token::Ident("agent".to_string()), Token::Ident("any".to_string())]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(tokens(r"'it\'s'"), vec![Token::Str("it's".to_string())]);
        assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::Str("say \"hi\"".to_string())]);
        assert_eq!(tokens(r"'a\\b'"), vec![Token::Str("a\\b".to_string())]);
        assert_eq!(tokens(r"'echo \$HOME'"), vec![Token::Str("echo \\$HOME".to_string())]);
    }

    #[test]
    fn test_numbers_and_raw() {
        assert_eq!(
            tokens("3 -2 1.5 `body`"),
            vec![
                Token::Int(3),
                Token::Int(-2),
                Token::Float("1.5".to_string()),
                Token::Raw("body".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_character_fails() {
        assert_eq!(tokenize("agent any\n#"), Err(10..11));
    }
}
