use std::collections::HashMap;
use std::fmt;
use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenType {
    Number,             // 1234
    Identifier,         // names
    // -------- //
    Let,                // let
    Const,              // const
    Static,             // static (reserved)
    Exostatic,          // exostatic (reserved)
    // -------- //
    BinaryOperator,     // + - * / %
    Equals,             // =
    Comma,              // ,
    Colon,              // :
    Semicolon,          // ;
    OpenParen,          // (
    CloseParen,         // )
    OpenBrace,          // {
    CloseBrace,         // }
    OpenBracket,        // [
    CloseBracket,       // ]
    Dot,                // .
    EOF,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = {
        let mut keywords = HashMap::new();
        keywords.insert("let", TokenType::Let);
        keywords.insert("const", TokenType::Const);
        keywords.insert("static", TokenType::Static);
        keywords.insert("exostatic", TokenType::Exostatic);
        keywords
    };
}

/// Returns the keyword kind for `word`, or `None` for a plain identifier.
pub fn keyword(word: &str) -> Option<TokenType> {
    KEYWORDS.get(word).copied()
}

pub const EOF_TEXT: &str = "EndOfFile";

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(token_type: TokenType, text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            token_type,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Number => write!(f, "number"),
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::Let => write!(f, "'let'"),
            TokenType::Const => write!(f, "'const'"),
            TokenType::Static => write!(f, "'static'"),
            TokenType::Exostatic => write!(f, "'exostatic'"),
            TokenType::BinaryOperator => write!(f, "operator"),
            TokenType::Equals => write!(f, "'='"),
            TokenType::Comma => write!(f, "','"),
            TokenType::Colon => write!(f, "':'"),
            TokenType::Semicolon => write!(f, "';'"),
            TokenType::OpenParen => write!(f, "'('"),
            TokenType::CloseParen => write!(f, "')'"),
            TokenType::OpenBrace => write!(f, "'{{'"),
            TokenType::CloseBrace => write!(f, "'}}'"),
            TokenType::OpenBracket => write!(f, "'['"),
            TokenType::CloseBracket => write!(f, "']'"),
            TokenType::Dot => write!(f, "'.'"),
            TokenType::EOF => write!(f, "end of input"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::EOF => write!(f, "{}", TokenType::EOF),
            TokenType::Number | TokenType::Identifier | TokenType::BinaryOperator => {
                write!(f, "{} '{}'", self.token_type, self.text)
            }
            other => write!(f, "{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_keywords() {
        assert_eq!(keyword("let"), Some(TokenType::Let));
        assert_eq!(keyword("const"), Some(TokenType::Const));
        assert_eq!(keyword("static"), Some(TokenType::Static));
        assert_eq!(keyword("exostatic"), Some(TokenType::Exostatic));
        assert_eq!(keyword("lets"), None);
        assert_eq!(keyword("Let"), None);
    }

    #[test]
    fn tokens_describe_themselves_for_diagnostics() {
        assert_eq!(Token::new(TokenType::Identifier, "x", 1, 1).to_string(), "identifier 'x'");
        assert_eq!(Token::new(TokenType::CloseBrace, "}", 1, 1).to_string(), "'}'");
        assert_eq!(Token::new(TokenType::EOF, EOF_TEXT, 1, 1).to_string(), "end of input");
    }
}
