use log::trace;
use crate::language::token::{self, Token, TokenType, EOF_TEXT};
use crate::language::error::Result;
use crate::lexer_error;

pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

fn is_skippable(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub fn consume(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if is_skippable(ch) {
                self.consume();
            } else {
                break;
            }
        }
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if accept(ch) {
                text.push(ch);
                self.consume();
            } else {
                break;
            }
        }

        text
    }

    fn single(&mut self, token_type: TokenType, ch: char, line: usize, column: usize) -> Result<Token> {
        self.consume();
        Ok(Token::new(token_type, ch.to_string(), line, column))
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;

        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenType::EOF, EOF_TEXT, line, column));
        };

        match ch {
            '(' => self.single(TokenType::OpenParen, ch, line, column),
            ')' => self.single(TokenType::CloseParen, ch, line, column),
            '{' => self.single(TokenType::OpenBrace, ch, line, column),
            '}' => self.single(TokenType::CloseBrace, ch, line, column),
            '[' => self.single(TokenType::OpenBracket, ch, line, column),
            ']' => self.single(TokenType::CloseBracket, ch, line, column),
            '=' => self.single(TokenType::Equals, ch, line, column),
            ';' => self.single(TokenType::Semicolon, ch, line, column),
            ':' => self.single(TokenType::Colon, ch, line, column),
            ',' => self.single(TokenType::Comma, ch, line, column),
            '.' => self.single(TokenType::Dot, ch, line, column),
            '+' | '-' | '*' | '/' | '%' => self.single(TokenType::BinaryOperator, ch, line, column),
            _ if ch.is_ascii_digit() => {
                let number = self.read_while(|c| c.is_ascii_digit());
                Ok(Token::new(TokenType::Number, number, line, column))
            }
            _ if ch.is_ascii_alphabetic() => {
                let word = self.read_while(|c| c.is_ascii_alphabetic());
                let token_type = token::keyword(&word).unwrap_or(TokenType::Identifier);
                Ok(Token::new(token_type, word, line, column))
            }
            _ => lexer_error!(
                format!("Unrecognized character found in source: '{}' (U+{:04X})", ch.escape_debug(), ch as u32),
                line,
                column
            ),
        }
    }

    /// Consumes the whole input. The result always ends with exactly one EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::with_capacity(self.input.len() / 2 + 1);

        loop {
            let token = self.next_token()?;
            trace!("Token {:?} '{}' at {}:{}", token.token_type, token.text, token.line, token.column);

            let done = token.is(TokenType::EOF);
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn kinds_and_text(source: &str) -> Vec<(TokenType, String)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.token_type, t.text))
            .collect()
    }

    #[test]
    fn tokenizes_a_declaration() {
        let expected = vec![
            (TokenType::Let, "let"),
            (TokenType::Identifier, "x"),
            (TokenType::Equals, "="),
            (TokenType::OpenParen, "("),
            (TokenType::Number, "5"),
            (TokenType::BinaryOperator, "+"),
            (TokenType::Number, "10"),
            (TokenType::CloseParen, ")"),
            (TokenType::Semicolon, ";"),
            (TokenType::EOF, "EndOfFile"),
        ]
        .into_iter()
        .map(|(k, t)| (k, t.to_string()))
        .collect::<Vec<_>>();

        assert_eq!(kinds_and_text("let x = (5 + 10);"), expected);
    }

    #[test]
    fn empty_and_blank_input_yield_only_eof() {
        assert_eq!(kinds_and_text(""), vec![(TokenType::EOF, EOF_TEXT.to_string())]);
        assert_eq!(kinds_and_text(" \t\r\n "), vec![(TokenType::EOF, EOF_TEXT.to_string())]);
    }

    #[test]
    fn runs_are_maximal() {
        assert_eq!(
            kinds_and_text("123abc"),
            vec![
                (TokenType::Number, "123".to_string()),
                (TokenType::Identifier, "abc".to_string()),
                (TokenType::EOF, EOF_TEXT.to_string()),
            ]
        );
        assert_eq!(
            kinds_and_text("constant const"),
            vec![
                (TokenType::Identifier, "constant".to_string()),
                (TokenType::Const, "const".to_string()),
                (TokenType::EOF, EOF_TEXT.to_string()),
            ]
        );
    }

    #[test]
    fn every_punctuation_character_is_a_token() {
        let kinds: Vec<TokenType> = kinds_and_text("(){}[]:;,.=+-*/%")
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenType::OpenParen,
                TokenType::CloseParen,
                TokenType::OpenBrace,
                TokenType::CloseBrace,
                TokenType::OpenBracket,
                TokenType::CloseBracket,
                TokenType::Colon,
                TokenType::Semicolon,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Equals,
                TokenType::BinaryOperator,
                TokenType::BinaryOperator,
                TokenType::BinaryOperator,
                TokenType::BinaryOperator,
                TokenType::BinaryOperator,
                TokenType::EOF,
            ]
        );
    }

    #[test]
    fn tracks_line_and_column() {
        let tokens = tokenize("let a\n  = 1").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 5));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5));
    }

    #[test]
    fn rejects_unknown_characters() {
        let error = tokenize("let x = 1 # 2").unwrap_err();
        assert_eq!(error.kind, ErrorKind::Lexer);
        assert_eq!((error.line, error.column), (Some(1), Some(11)));
        assert!(error.message.contains("'#'"), "{}", error.message);

        assert_eq!(tokenize("x_y").unwrap_err().kind, ErrorKind::Lexer);
        assert_eq!(tokenize("é").unwrap_err().kind, ErrorKind::Lexer);
        assert_eq!(tokenize("1.5").unwrap()[1].token_type, TokenType::Dot);
    }
}
