use log::{debug, info, trace};
use crate::language::ast::{AstNode, Property};
use crate::language::error::{Error, ErrorKind, Result};
use crate::language::lexer::Lexer;
use crate::language::operators::BinaryOperator;
use crate::language::token::{Token, TokenType, EOF_TEXT};
use crate::parser_error;

/// Recursive-descent parser with one token of lookahead.
///
/// Each binary precedence tier has its own method that delegates to the next
/// tighter tier for its operands:
///
/// ```text
/// assignment -> object -> additive -> multiplicative -> call -> member -> primary
/// ```
///
/// The first violated expectation aborts the whole parse.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(|t| t.is(TokenType::EOF)) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column + t.text.len()));
            tokens.push(Token::new(TokenType::EOF, EOF_TEXT, line, column));
        }

        Parser {
            tokens,
            current: 0,
        }
    }

    pub fn parse(&mut self) -> Result<AstNode> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.statement()?);
        }

        debug!("Parsed {} statement(s)", statements.len());
        Ok(AstNode::Program(statements))
    }

    fn is_at_end(&self) -> bool {
        self.peek().is(TokenType::EOF)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().is(token_type)
    }

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) && !self.is_at_end() {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, token_type: TokenType, error_message: &str) -> Result<&Token> {
        if self.check(token_type) && !self.is_at_end() {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("{}: expected {}", error_message, token_type)))
        }
    }

    fn unexpected(&self, message: &str) -> Error {
        let found = self.peek();
        Error {
            kind: ErrorKind::Parser,
            message: format!("{}, found {}", message, found),
            line: Some(found.line),
            column: Some(found.column),
        }
    }

    /// Consumes the next token when it is one of the operators accepted by `tier`.
    fn match_operator(&mut self, tier: fn(&BinaryOperator) -> bool) -> Option<BinaryOperator> {
        if !self.check(TokenType::BinaryOperator) {
            return None;
        }
        let operator = BinaryOperator::from_symbol(&self.peek().text)?;
        if tier(&operator) {
            self.advance();
            Some(operator)
        } else {
            None
        }
    }

    fn statement(&mut self) -> Result<AstNode> {
        if self.check(TokenType::Let) || self.check(TokenType::Const) {
            self.var_declaration()
        } else {
            self.expression_statement()
        }
    }

    fn var_declaration(&mut self) -> Result<AstNode> {
        let constant = self.advance().is(TokenType::Const);
        let name = self
            .consume(TokenType::Identifier, "Expected identifier name following 'let' or 'const'")?
            .text
            .clone();

        let initializer = if self.match_token(TokenType::Equals) {
            Some(Box::new(self.expression()?))
        } else if constant {
            return Err(self.unexpected(&format!(
                "Constant '{}' must be initialised at its declaration: expected {}",
                name,
                TokenType::Equals
            )));
        } else {
            None
        };

        self.match_token(TokenType::Semicolon);

        trace!("Variable declaration '{}' (constant: {})", name, constant);
        Ok(AstNode::VariableDeclaration {
            name,
            constant,
            initializer,
        })
    }

    fn expression_statement(&mut self) -> Result<AstNode> {
        let expr = self.expression()?;
        self.match_token(TokenType::Semicolon);
        Ok(AstNode::ExpressionStatement(Box::new(expr)))
    }

    fn expression(&mut self) -> Result<AstNode> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<AstNode> {
        let target = self.object_expression()?;

        if self.match_token(TokenType::Equals) {
            let (line, column) = (self.previous().line, self.previous().column);
            let value = self.assignment()?;

            if !target.is_assignable() {
                return parser_error!(
                    format!("Invalid assignment target: {} cannot be assigned to", target.kind_name()),
                    line,
                    column
                );
            }

            return Ok(AstNode::AssignmentExpression {
                target: Box::new(target),
                value: Box::new(value),
            });
        }

        Ok(target)
    }

    fn object_expression(&mut self) -> Result<AstNode> {
        if !self.match_token(TokenType::OpenBrace) {
            return self.additive();
        }

        let mut properties = Vec::new();

        while !self.is_at_end() && !self.check(TokenType::CloseBrace) {
            let key = self.consume(TokenType::Identifier, "Object literal key expected")?.text.clone();

            // { key, ... } and { key } are shorthand for { key: key }
            if self.match_token(TokenType::Comma) || self.check(TokenType::CloseBrace) {
                properties.push(Property { key, value: None });
                continue;
            }

            self.consume(TokenType::Colon, "Missing colon following identifier in object literal")?;
            let value = self.expression()?;
            properties.push(Property {
                key,
                value: Some(Box::new(value)),
            });

            if !self.check(TokenType::CloseBrace) {
                self.consume(TokenType::Comma, "Expected comma or closing brace following property")?;
            }
        }

        self.consume(TokenType::CloseBrace, "Object literal missing closing brace")?;

        Ok(AstNode::ObjectLiteral(properties))
    }

    fn additive(&mut self) -> Result<AstNode> {
        let mut expr = self.multiplicative()?;

        while let Some(operator) = self.match_operator(BinaryOperator::is_additive) {
            let right = self.multiplicative()?;
            expr = AstNode::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<AstNode> {
        let mut expr = self.call_member()?;

        while let Some(operator) = self.match_operator(|op| !op.is_additive()) {
            let right = self.call_member()?;
            expr = AstNode::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn call_member(&mut self) -> Result<AstNode> {
        let mut expr = self.member()?;

        while self.match_token(TokenType::OpenParen) {
            let args = self.arguments()?;
            expr = AstNode::CallExpression {
                callee: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    fn member(&mut self) -> Result<AstNode> {
        let mut expr = self.primary()?;

        loop {
            if self.match_token(TokenType::Dot) {
                if !self.check(TokenType::Identifier) {
                    let found = self.peek();
                    return parser_error!(
                        format!(
                            "Cannot use dot operator without right hand side being an identifier, found {}",
                            found
                        ),
                        found.line,
                        found.column
                    );
                }
                let property = AstNode::identifier(self.advance().text.clone());

                expr = AstNode::MemberExpression {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: false,
                };
            } else if self.match_token(TokenType::OpenBracket) {
                let property = self.expression()?;
                self.consume(TokenType::CloseBracket, "Missing closing bracket in computed member expression")?;

                expr = AstNode::MemberExpression {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: true,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<AstNode> {
        if self.match_token(TokenType::Identifier) {
            Ok(AstNode::Identifier(self.previous().text.clone()))
        } else if self.match_token(TokenType::Number) {
            let token = self.previous();
            match token.text.parse::<f64>() {
                Ok(value) => Ok(AstNode::NumericLiteral(value)),
                Err(_) => parser_error!(
                    format!("Invalid numeric literal '{}'", token.text),
                    token.line,
                    token.column
                ),
            }
        } else if self.match_token(TokenType::OpenParen) {
            let expr = self.expression()?;
            self.consume(TokenType::CloseParen, "Unexpected token inside parenthesised expression")?;
            Ok(expr)
        } else {
            Err(self.unexpected("Unexpected token found during parsing: expected an expression"))
        }
    }

    fn arguments(&mut self) -> Result<Vec<AstNode>> {
        let mut args = Vec::new();

        if !self.check(TokenType::CloseParen) {
            args.push(self.expression()?);

            while self.match_token(TokenType::Comma) {
                args.push(self.expression()?);
            }
        }

        self.consume(TokenType::CloseParen, "Missing closing parenthesis after argument list")?;

        Ok(args)
    }
}

pub fn parse(tokens: Vec<Token>) -> Result<AstNode> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses `input`, logging the outcome of each stage.
pub fn parse_source(input: &str) -> Result<AstNode> {
    debug!("Parsing source ({} bytes)", input.len());

    let mut lexer = Lexer::new(input);
    let tokens = match lexer.tokenize() {
        Ok(tokens) => {
            info!("Tokenization produced {} tokens", tokens.len());
            tokens
        },
        Err(e) => {
            debug!("Tokenization failed: {}", e);
            return Err(e);
        }
    };

    match parse(tokens) {
        Ok(ast) => {
            info!("Parsing succeeded");
            Ok(ast)
        },
        Err(e) => {
            debug!("Parsing failed: {}", e);
            Err(e)
        }
    }
}
