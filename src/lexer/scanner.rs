//! Scanner for Juno source code.

use crate::error::LexerError;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// The scanner transforms source code into a stream of tokens.
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    start_pos: usize,
    start_line: usize,
    start_column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            start_pos: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Scan all tokens from the source. The returned stream always ends
    /// with a single Eof token.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace_and_comments();
        self.mark_start();

        let Some((_, c)) = self.advance() else {
            return Ok(Token::eof(self.current_pos, self.line, self.column));
        };

        match c {
            '(' => Ok(self.make_token(TokenKind::LeftParen)),
            ')' => Ok(self.make_token(TokenKind::RightParen)),
            '{' => Ok(self.make_token(TokenKind::LeftBrace)),
            '}' => Ok(self.make_token(TokenKind::RightBrace)),
            ',' => Ok(self.make_token(TokenKind::Comma)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            ':' => Ok(self.make_token(TokenKind::Colon)),

            '+' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::PlusEqual))
                } else {
                    Ok(self.make_token(TokenKind::Plus))
                }
            }
            '-' => {
                if self.match_char('>') {
                    Ok(self.make_token(TokenKind::Arrow))
                } else if self.match_char('=') {
                    Ok(self.make_token(TokenKind::MinusEqual))
                } else {
                    Ok(self.make_token(TokenKind::Minus))
                }
            }
            '*' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::StarEqual))
                } else {
                    Ok(self.make_token(TokenKind::Star))
                }
            }
            '/' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::SlashEqual))
                } else {
                    Ok(self.make_token(TokenKind::Slash))
                }
            }
            '=' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::EqualEqual))
                } else {
                    Ok(self.make_token(TokenKind::Equal))
                }
            }
            '!' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::BangEqual))
                } else {
                    Err(LexerError::unexpected_char(c, self.current_span()))
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::LessEqual))
                } else {
                    Ok(self.make_token(TokenKind::Less))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::GreaterEqual))
                } else {
                    Ok(self.make_token(TokenKind::Greater))
                }
            }

            '"' => self.scan_string(),

            '@' => self.scan_special(),

            c if c.is_ascii_digit() => self.scan_number(c),

            c if c.is_alphabetic() || c == '_' => self.scan_identifier(c),

            _ => Err(LexerError::unexpected_char(c, self.current_span())),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while self.peek().is_some() && self.peek() != Some('\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_string(&mut self) -> Result<Token, LexerError> {
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    return Err(LexerError::unterminated_string(self.current_span()));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\n') => {
                    // Strings may span lines; keep position tracking honest.
                    value.push('\n');
                    self.advance();
                    self.line += 1;
                    self.column = 1;
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }

        Ok(self.make_token(TokenKind::Str(value)))
    }

    fn scan_number(&mut self, first: char) -> Result<Token, LexerError> {
        let mut value = String::from(first);
        let mut is_decimal = false;

        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    value.push(c);
                    self.advance();
                }
                Some('.') if !is_decimal && self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                    is_decimal = true;
                    value.push('.');
                    self.advance();
                }
                _ => break,
            }
        }

        let parsed: f64 = value
            .parse()
            .map_err(|_| LexerError::invalid_number(value.clone(), self.current_span()))?;

        Ok(self.make_token(TokenKind::Number(parsed)))
    }

    fn scan_identifier(&mut self, first: char) -> Result<Token, LexerError> {
        let mut value = String::from(first);

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&value).unwrap_or(TokenKind::Identifier(value));
        Ok(self.make_token(kind))
    }

    /// Scan an @-annotation. The lexeme keeps its '@'; validation of the
    /// name is the parser's job.
    fn scan_special(&mut self) -> Result<Token, LexerError> {
        let mut value = String::from('@');

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if value.len() == 1 {
            return Err(LexerError::unexpected_char('@', self.current_span()));
        }

        Ok(self.make_token(TokenKind::Special(value)))
    }

    // ===== Cursor helpers =====

    fn mark_start(&mut self) {
        self.start_pos = self.current_pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((pos, c)) = next {
            self.current_pos = pos + c.len_utf8();
            self.column += 1;
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&mut self) -> Option<char> {
        let mut lookahead = self.source[self.current_pos..].chars();
        lookahead.next();
        lookahead.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(
                self.start_pos,
                self.current_pos,
                self.start_line,
                self.start_column,
            ),
        )
    }

    fn current_span(&self) -> Span {
        Span::new(
            self.start_pos,
            self.current_pos,
            self.start_line,
            self.start_column,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .scan_tokens()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_let_declaration() {
        let kinds = scan("let x: int = 10;");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Identifier("x".to_string()),
                TokenKind::Colon,
                TokenKind::Identifier("int".to_string()),
                TokenKind::Equal,
                TokenKind::Number(10.0),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_compound_operators() {
        let kinds = scan("+= -= *= /= == != <= >= ->");
        assert_eq!(
            kinds,
            vec![
                TokenKind::PlusEqual,
                TokenKind::MinusEqual,
                TokenKind::StarEqual,
                TokenKind::SlashEqual,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_special_annotations() {
        let kinds = scan("@comptime let x = 1; @profile { }");
        assert_eq!(kinds[0], TokenKind::Special("@comptime".to_string()));
        assert_eq!(kinds[6], TokenKind::Special("@profile".to_string()));
    }

    #[test]
    fn test_string_literal() {
        let kinds = scan("let s = \"hi there\";");
        assert_eq!(kinds[3], TokenKind::Str("hi there".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let result = Scanner::new("\"oops").scan_tokens();
        assert!(matches!(result, Err(LexerError::UnterminatedString(_))));
    }

    #[test]
    fn test_line_comment() {
        let kinds = scan("let x = 1; // trailing comment\nx;");
        assert!(kinds.contains(&TokenKind::Identifier("x".to_string())));
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));
    }

    #[test]
    fn test_decimal_number() {
        let kinds = scan("3.14;");
        assert_eq!(kinds[0], TokenKind::Number(3.14));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = Scanner::new("let x = 1;\nlet y = 2;").scan_tokens().unwrap();
        let second_let = &tokens[5];
        assert_eq!(second_let.kind, TokenKind::Let);
        assert_eq!(second_let.span.line, 2);
        assert_eq!(second_let.span.column, 1);
    }

    #[test]
    fn test_keywords() {
        let kinds = scan("fn extern return if else true false");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Fn,
                TokenKind::Extern,
                TokenKind::Return,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let result = Scanner::new("let x = #;").scan_tokens();
        assert!(matches!(result, Err(LexerError::UnexpectedChar('#', _))));
    }
}
