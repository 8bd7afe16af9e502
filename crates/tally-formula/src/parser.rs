//! Expression parser
//!
//! A recursive descent parser for arithmetic expressions with proper operator
//! precedence. Input is the text produced by [`crate::build_expression`]:
//! numeric literals, `+ - * / ^`, parentheses and bare identifiers left over
//! from unresolved tags.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Deepest nesting of parentheses, unary prefixes and exponents
pub const MAX_NESTING: usize = 256;

/// Tallest expression tree accepted, so a long flat sum still parses
pub const MAX_HEIGHT: usize = 1024;

/// Parse an expression string into an AST
///
/// # Example
/// ```rust
/// use tally_formula::parse_expression;
///
/// let ast = parse_expression("1+2").unwrap();
/// let ast = parse_expression("(2+100)*-3").unwrap();
/// let ast = parse_expression("2^3^2").unwrap();
/// assert!(parse_expression("(1+2").is_err());
/// ```
pub fn parse_expression(expression: &str) -> FormulaResult<FormulaExpr> {
    let mut parser = ExpressionParser::new(expression);
    let (expr, _) = parser.parse_additive()?;

    // Make sure we consumed all input
    if parser.current_token() != &Token::Eof {
        return Err(FormulaError::Parse(format!(
            "Unexpected {} after expression",
            parser.current_token().describe()
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    LeftParen,
    RightParen,

    /// Character outside the grammar
    Invalid(char),
    /// Malformed numeric literal
    BadNumber(String),

    Eof,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::Plus => "'+'".into(),
            Token::Minus => "'-'".into(),
            Token::Star => "'*'".into(),
            Token::Slash => "'/'".into(),
            Token::Caret => "'^'".into(),
            Token::LeftParen => "'('".into(),
            Token::RightParen => "')'".into(),
            Token::Invalid(c) => format!("character '{}'", c),
            Token::BadNumber(s) => format!("malformed number '{}'", s),
            Token::Eof => "end of expression".into(),
        }
    }
}

/// Expression parser
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
    current_token: Token,
    /// Open parentheses, unary prefixes and exponents being parsed
    depth: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            current_token: Token::Eof,
            depth: 0,
        };
        parser.advance_token();
        parser
    }

    // === Token scanning ===

    fn advance_token(&mut self) {
        self.current_token = self.scan_token();
    }

    fn scan_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Token::Eof;
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return token;
        }

        if c.is_ascii_digit()
            || (c == '.' && self.peek_char_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.scan_number();
        }

        if c.is_alphabetic() || c == '_' {
            return self.scan_identifier();
        }

        self.advance();
        Token::Invalid(c)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        // Integer part
        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part, only when digits actually follow
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_char_at(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self
                .peek_char_at(digits_at)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.skip_digits();
            }
        }

        let text = &self.input[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::BadNumber(text.to_string()),
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> Token {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token();
        token
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume();
            Ok(())
        } else {
            Err(FormulaError::Parse(format!(
                "Expected {}, got {}",
                expected.describe(),
                self.current_token().describe()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -        (left)
    // 2. Multiplication/Division: *, /     (left)
    // 3. Unary: -, +                       (prefix)
    // 4. Exponentiation: ^                 (right, exponent may carry a sign)
    // 5. Primary: numbers, identifiers, parentheses

    fn parse_additive(&mut self) -> FormulaResult<Parsed> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Parsed> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume();
            let right = self.parse_unary()?;
            left = binary(op, left, right)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<Parsed> {
        let op = match self.current_token() {
            Token::Minus => UnaryOperator::Negate,
            Token::Plus => UnaryOperator::Plus,
            _ => return self.parse_exponent(),
        };

        self.consume();
        let (operand, height) = self.nested(Self::parse_unary)?;
        check_height(height + 1)?;
        Ok((
            FormulaExpr::UnaryOp {
                op,
                operand: Box::new(operand),
            },
            height + 1,
        ))
    }

    fn parse_exponent(&mut self) -> FormulaResult<Parsed> {
        let left = self.parse_primary()?;

        if matches!(self.current_token(), Token::Caret) {
            self.consume();
            // Right associative; `2^-1` is allowed
            let right = self.nested(Self::parse_unary)?;
            return binary(BinaryOperator::Power, left, right);
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<Parsed> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume();
                Ok((FormulaExpr::Number(n), 1))
            }

            Token::Identifier(name) => {
                self.consume();
                Ok((FormulaExpr::Identifier(name), 1))
            }

            Token::LeftParen => {
                self.consume();
                if matches!(self.current_token(), Token::RightParen) {
                    return Err(FormulaError::Parse("Empty parentheses".into()));
                }
                let expr = self.nested(Self::parse_additive)?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            other => Err(FormulaError::Parse(format!(
                "Expected operand, got {}",
                other.describe()
            ))),
        }
    }

    /// Run `parse` one nesting level deeper
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> FormulaResult<Parsed>,
    ) -> FormulaResult<Parsed> {
        if self.depth >= MAX_NESTING {
            return Err(too_deep());
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}

/// Parsed subtree and its height
type Parsed = (FormulaExpr, usize);

fn binary(op: BinaryOperator, left: Parsed, right: Parsed) -> FormulaResult<Parsed> {
    let height = 1 + left.1.max(right.1);
    check_height(height)?;
    Ok((
        FormulaExpr::BinaryOp {
            op,
            left: Box::new(left.0),
            right: Box::new(right.0),
        },
        height,
    ))
}

fn check_height(height: usize) -> FormulaResult<()> {
    if height > MAX_HEIGHT {
        return Err(too_deep());
    }
    Ok(())
}

fn too_deep() -> FormulaError {
    FormulaError::Parse("Expression nested too deeply".into())
}
