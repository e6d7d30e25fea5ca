use crate::error::{ScanError, ScanErrorKind};
use crate::reporter::ErrorSink;
use crate::token::{Literal, Token, TokenType};

/// Scans `source` to completion. Lexical errors go to `errors`; the returned
/// sequence always ends with an `Eof` token.
pub fn scan(source: &str, errors: &mut dyn ErrorSink) -> Vec<Token> {
    Scanner::new(source).scan_tokens(errors)
}

pub struct Scanner<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
        }
    }

    pub fn scan_tokens(mut self, errors: &mut dyn ErrorSink) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token(errors);
        }

        self.tokens.push(Token::eof(self.line));
        self.tokens
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self, errors: &mut dyn ErrorSink) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let kind = if self.match_char('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.add_token(kind);
            }
            '/' => {
                if self.match_char('/') {
                    // Line comment: stop before the newline so it still bumps `line`.
                    while self.peek() != Some('\n') && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            '0'..='9' => self.number(),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
            '"' => self.string(errors),
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            _ => errors.report(ScanError::new(self.line, ScanErrorKind::UnexpectedCharacter(c))),
        }
    }

    /// Consumes one whole character. Callers check `is_at_end` first.
    fn advance(&mut self) -> char {
        let c = self.peek().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.advance();
        true
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn add_token(&mut self, kind: TokenType) {
        self.add_token_with_literal(kind, None);
    }

    fn add_token_with_literal(&mut self, kind: TokenType, literal: Option<Literal>) {
        let lexeme = &self.source[self.start..self.current];
        self.tokens.push(Token::new(kind, lexeme, literal, self.start_line));
    }

    fn number(&mut self) {
        self.consume_digits();

        // A trailing '.' without a digit after it is left for the next token.
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        let lexeme = &self.source[self.start..self.current];
        // Digits with an optional fraction always parse; overlong runs become inf.
        let value = lexeme.parse::<f64>().unwrap_or(f64::INFINITY);
        self.add_token_with_literal(TokenType::Number, Some(Literal::Number(value)));
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn string(&mut self, errors: &mut dyn ErrorSink) {
        while self.peek() != Some('"') && !self.is_at_end() {
            if self.peek() == Some('\n') {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            errors.report(ScanError::new(self.start_line, ScanErrorKind::UnterminatedString));
            return;
        }

        // The closing quote.
        self.advance();

        // No escape processing: the literal is the raw text between the quotes.
        let value = &self.source[self.start + 1..self.current - 1];
        self.add_token_with_literal(TokenType::String, Some(Literal::String(value.to_string())));
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let kind = TokenType::keyword(text).unwrap_or(TokenType::Identifier);
        self.add_token(kind);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::Reporter;
    use crate::token::TokenType::*;

    fn scan_with_errors(source: &str) -> (Vec<Token>, Vec<ScanError>) {
        let mut reporter = Reporter::new();
        let tokens = scan(source, &mut reporter);
        (tokens, reporter.take())
    }

    /// Scans input that must not report anything.
    fn scan_clean(source: &str) -> Vec<Token> {
        let (tokens, errors) = scan_with_errors(source);
        assert!(errors.is_empty(), "{:?}: {:?}", source, errors);
        tokens
    }

    fn scan_kinds(source: &str) -> Vec<TokenType> {
        scan_clean(source).into_iter().map(|t| t.kind).collect()
    }

    fn lines(tokens: &[Token]) -> Vec<usize> {
        tokens.iter().map(|t| t.line).collect()
    }

    fn number(lexeme: &str, value: f64, line: usize) -> Token {
        Token::new(Number, lexeme, Some(Literal::Number(value)), line)
    }

    fn string(lexeme: &str, value: &str, line: usize) -> Token {
        Token::new(String, lexeme, Some(Literal::String(value.into())), line)
    }

    fn plain(kind: TokenType, lexeme: &str, line: usize) -> Token {
        Token::new(kind, lexeme, None, line)
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(scan_clean(""), vec![Token::eof(1)]);
    }

    #[test]
    fn test_punctuation_keeps_exact_lexemes() {
        let tokens = scan_clean("(){},.+-*/;");
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        let expected = ["(", ")", "{", "}", ",", ".", "+", "-", "*", "/", ";", ""];
        assert_eq!(lexemes, expected);
        assert!(tokens.iter().all(|t| t.literal.is_none() && t.line == 1));
        assert_eq!(tokens[6].kind, Plus);
        assert_eq!(tokens[9].kind, Slash);
        assert_eq!(tokens[10].kind, Semicolon);
    }

    #[test]
    fn test_whitespace_only_moves_the_line() {
        let tokens = scan_clean(" \t\r\n( \n\n) ");
        let expected = vec![
            plain(LeftParen, "(", 2),
            plain(RightParen, ")", 4),
            Token::eof(4),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_unexpected_char() {
        let (tokens, errors) = scan_with_errors("@");
        let expected = ScanError::new(1, ScanErrorKind::UnexpectedCharacter('@'));
        assert_eq!(tokens, vec![Token::eof(1)]);
        assert_eq!(errors, vec![expected]);
    }

    #[test]
    fn test_unexpected_chars_do_not_stop_scanning() {
        let (tokens, errors) = scan_with_errors("1 # 2\n$ 3");
        assert_eq!(lines(&tokens), vec![1, 1, 2, 2]);
        assert_eq!(tokens[2].lexeme, "3");

        let reported: Vec<_> = errors.iter().map(|e| (e.line, e.kind)).collect();
        let expected = vec![
            (1, ScanErrorKind::UnexpectedCharacter('#')),
            (2, ScanErrorKind::UnexpectedCharacter('$')),
        ];
        assert_eq!(reported, expected);
    }

    #[test]
    fn test_non_ascii_is_unexpected() {
        let (tokens, errors) = scan_with_errors("é+");
        let expected = ScanError::new(1, ScanErrorKind::UnexpectedCharacter('é'));
        assert_eq!(tokens, vec![plain(Plus, "+", 1), Token::eof(1)]);
        assert_eq!(errors, vec![expected]);
    }

    #[test]
    fn test_operators_prefer_two_characters() {
        let tokens = scan_clean("!= ! ==\n= <= <\n>= >");
        let names: Vec<_> = tokens.iter().map(|t| t.kind.name()).collect();
        let expected = [
            "BANG_EQUAL",
            "BANG",
            "EQUAL_EQUAL",
            "EQUAL",
            "LESS_EQUAL",
            "LESS",
            "GREATER_EQUAL",
            "GREATER",
            "EOF",
        ];
        assert_eq!(names, expected);
        assert_eq!(lines(&tokens), vec![1, 1, 1, 2, 2, 2, 3, 3, 3]);
        assert_eq!(tokens[0].lexeme, "!=");
        assert_eq!(tokens[6].lexeme, ">=");
    }

    #[test]
    fn test_two_char_tokens_without_spaces() {
        assert_eq!(scan_kinds("!==="), vec![BangEqual, EqualEqual, Eof]);
        assert_eq!(scan_kinds("<=>"), vec![LessEqual, Greater, Eof]);
    }

    #[test]
    fn test_comment_to_end_of_line() {
        assert_eq!(scan_kinds("// all of this ( is ignored"), vec![Eof]);
        let kinds = scan_kinds("1 / 2 // half");
        assert_eq!(kinds, vec![Number, Slash, Number, Eof]);

        let tokens = scan_clean("// comment\n1");
        assert_eq!(tokens, vec![number("1", 1.0, 2), Token::eof(2)]);
    }

    #[test]
    fn test_non_ascii_comment_is_skipped() {
        let tokens = scan_clean("// ünïcode\n1");
        assert_eq!(tokens, vec![number("1", 1.0, 2), Token::eof(2)]);
    }

    #[test]
    fn test_number_literals_and_lines() {
        let tokens = scan_clean("42\n3.25 007");
        let expected = vec![
            number("42", 42.0, 1),
            number("3.25", 3.25, 2),
            number("007", 7.0, 2),
            Token::eof(2),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_overlong_number_does_not_fail() {
        let source = "9".repeat(400);
        let tokens = scan_clean(&source);
        let expected = vec![number(&source, f64::INFINITY, 1), Token::eof(1)];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        let tokens = scan_clean("12.");
        let expected = vec![number("12", 12.0, 1), plain(Dot, ".", 1), Token::eof(1)];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_leading_minus_is_an_operator() {
        assert_eq!(scan_kinds("-5"), vec![Minus, Number, Eof]);
    }

    #[test]
    fn test_string_literal_is_text_between_quotes() {
        let tokens = scan_clean("\"hello world\";");
        let expected = vec![
            string("\"hello world\"", "hello world", 1),
            plain(Semicolon, ";", 1),
            Token::eof(1),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_empty_string_literal() {
        let tokens = scan_clean("\"\"");
        assert_eq!(tokens, vec![string("\"\"", "", 1), Token::eof(1)]);
    }

    #[test]
    fn test_non_ascii_string_passes_through() {
        let tokens = scan_clean("\"héllo\"");
        let expected = vec![string("\"héllo\"", "héllo", 1), Token::eof(1)];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_string_ending_in_multibyte_char() {
        let tokens = scan_clean("\"aé\" x");
        let expected = vec![
            string("\"aé\"", "aé", 1),
            plain(Identifier, "x", 1),
            Token::eof(1),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_string_escapes_are_raw() {
        let tokens = scan_clean(r#""a\nb""#);
        assert_eq!(tokens[0], string(r#""a\nb""#, r"a\nb", 1));
    }

    #[test]
    fn test_multiline_string_keeps_opening_line() {
        let tokens = scan_clean("\"one\r\ntwo\" x");
        assert_eq!(tokens[0], string("\"one\r\ntwo\"", "one\r\ntwo", 1));
        assert_eq!(tokens[1], plain(Identifier, "x", 2));
        assert_eq!(tokens[2], Token::eof(2));
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, errors) = scan_with_errors("x\n\"hello\nworld");
        let expected = ScanError::new(2, ScanErrorKind::UnterminatedString);
        assert_eq!(tokens, vec![plain(Identifier, "x", 1), Token::eof(3)]);
        assert_eq!(errors, vec![expected]);
    }

    #[test]
    fn test_declaration_mixes_keywords_and_identifiers() {
        let tokens = scan_clean("var foo_1 = true;");
        let expected = vec![
            plain(Var, "var", 1),
            plain(Identifier, "foo_1", 1),
            plain(Equal, "=", 1),
            plain(True, "true", 1),
            plain(Semicolon, ";", 1),
            Token::eof(1),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_keyword_prefixes_are_identifiers() {
        let tokens = scan_clean("orchid android _var var_ Var nil0");
        assert!(tokens[..6].iter().all(|t| t.kind == Identifier));
        assert_eq!(tokens[5].lexeme, "nil0");
    }

    #[test]
    fn test_all_keywords() {
        let words = "and class else false fun for if nil or print return super this true var while";
        let tokens = scan_clean(words);
        for (token, word) in tokens.iter().zip(words.split(' ')) {
            assert_eq!(Some(token.kind), TokenType::keyword(word));
            assert_eq!(token.lexeme, word);
        }
        assert_eq!(tokens.len(), 17);
    }
}
