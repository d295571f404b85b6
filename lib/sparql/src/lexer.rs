use crate::error::{snippet_at, ParseError, ParseErrorKind};
use std::fmt;

/// A lexical token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub column: u32,
    pub offset: usize,
}

/// The token vocabulary of the SPARQL dialect.
///
/// Keywords are not distinguished from other bare words here: SPARQL keywords
/// are case-insensitive and context-dependent, so the parser matches `Word`
/// contents instead. Numeric literals are unsigned; signs are operator tokens
/// the parser folds in term position.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Word(String),
    Iri(String),
    PrefixedName { prefix: String, local: String },
    Variable(String),
    BlankNodeLabel(String),
    String(String),
    LangTag(String),
    Integer(i64),
    Double(f64),
    Dot,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    QuotedTripleOpen,
    QuotedTripleClose,
    Star,
    Slash,
    Pipe,
    Caret,
    CaretCaret,
    Question,
    Plus,
    Minus,
    Bang,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    AndAnd,
    OrOr,
    Eof,
}

impl TokenKind {
    /// Whether this word token equals `keyword`, ignoring ASCII case.
    #[must_use]
    pub fn is_word(&self, keyword: &str) -> bool {
        match self {
            TokenKind::Word(word) => word.eq_ignore_ascii_case(keyword),
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(word) => write!(f, "`{word}`"),
            TokenKind::Iri(iri) => write!(f, "`<{iri}>`"),
            TokenKind::PrefixedName { prefix, local } => write!(f, "`{prefix}:{local}`"),
            TokenKind::Variable(name) => write!(f, "`?{name}`"),
            TokenKind::BlankNodeLabel(label) => write!(f, "`_:{label}`"),
            TokenKind::String(_) => f.write_str("string literal"),
            TokenKind::LangTag(tag) => write!(f, "`@{tag}`"),
            TokenKind::Integer(value) => write!(f, "`{value}`"),
            TokenKind::Double(value) => write!(f, "`{value}`"),
            TokenKind::Dot => f.write_str("`.`"),
            TokenKind::Semicolon => f.write_str("`;`"),
            TokenKind::Comma => f.write_str("`,`"),
            TokenKind::LBrace => f.write_str("`{`"),
            TokenKind::RBrace => f.write_str("`}`"),
            TokenKind::LParen => f.write_str("`(`"),
            TokenKind::RParen => f.write_str("`)`"),
            TokenKind::LBracket => f.write_str("`[`"),
            TokenKind::RBracket => f.write_str("`]`"),
            TokenKind::QuotedTripleOpen => f.write_str("`<<`"),
            TokenKind::QuotedTripleClose => f.write_str("`>>`"),
            TokenKind::Star => f.write_str("`*`"),
            TokenKind::Slash => f.write_str("`/`"),
            TokenKind::Pipe => f.write_str("`|`"),
            TokenKind::Caret => f.write_str("`^`"),
            TokenKind::CaretCaret => f.write_str("`^^`"),
            TokenKind::Question => f.write_str("`?`"),
            TokenKind::Plus => f.write_str("`+`"),
            TokenKind::Minus => f.write_str("`-`"),
            TokenKind::Bang => f.write_str("`!`"),
            TokenKind::Equal => f.write_str("`=`"),
            TokenKind::NotEqual => f.write_str("`!=`"),
            TokenKind::Less => f.write_str("`<`"),
            TokenKind::LessEqual => f.write_str("`<=`"),
            TokenKind::Greater => f.write_str("`>`"),
            TokenKind::GreaterEqual => f.write_str("`>=`"),
            TokenKind::AndAnd => f.write_str("`&&`"),
            TokenKind::OrOr => f.write_str("`||`"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

/// A pull-based tokenizer over UTF-8 source text.
///
/// The parser drives it one token at a time; whitespace and `#` comments are
/// consumed between tokens and never surface.
pub struct Lexer<'input> {
    source: &'input str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'input> Lexer<'input> {
    pub fn new(source: &'input str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn source(&self) -> &'input str {
        self.source
    }

    fn rest(&self) -> &'input str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error_at(
        &self,
        kind: ParseErrorKind,
        message: impl Into<String>,
        line: u32,
        column: u32,
        offset: usize,
    ) -> ParseError {
        ParseError::new(kind, message, line, column, snippet_at(self.source, offset))
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Produces the next token, or `Eof` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();
        let line = self.line;
        let column = self.column;
        let offset = self.offset;

        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
                column,
                offset,
            });
        };

        let kind = match c {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '=' => self.single(TokenKind::Equal),
            '.' => {
                if self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                    self.lex_number(line, column, offset)?
                } else {
                    self.single(TokenKind::Dot)
                }
            }
            '|' => {
                self.bump();
                if self.peek() == Some('|') {
                    self.bump();
                    TokenKind::OrOr
                } else {
                    TokenKind::Pipe
                }
            }
            '&' => {
                self.bump();
                if self.peek() == Some('&') {
                    self.bump();
                    TokenKind::AndAnd
                } else {
                    return Err(self.error_at(
                        ParseErrorKind::ExpectedToken("a token".into()),
                        "unexpected character `&`",
                        line,
                        column,
                        offset,
                    ));
                }
            }
            '^' => {
                self.bump();
                if self.peek() == Some('^') {
                    self.bump();
                    TokenKind::CaretCaret
                } else {
                    TokenKind::Caret
                }
            }
            '!' => {
                self.bump();
                if self.peek() == Some('=') {
                    self.bump();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            '<' => self.lex_angle()?,
            '>' => {
                self.bump();
                match self.peek() {
                    Some('>') => {
                        self.bump();
                        TokenKind::QuotedTripleClose
                    }
                    Some('=') => {
                        self.bump();
                        TokenKind::GreaterEqual
                    }
                    _ => TokenKind::Greater,
                }
            }
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '?' | '$' => {
                self.bump();
                let name = self.take_while(|c| c.is_alphanumeric() || c == '_');
                if name.is_empty() {
                    if c == '?' {
                        TokenKind::Question
                    } else {
                        return Err(self.error_at(
                            ParseErrorKind::ExpectedToken("a variable name".into()),
                            "`$` must start a variable",
                            line,
                            column,
                            offset,
                        ));
                    }
                } else {
                    TokenKind::Variable(name)
                }
            }
            '@' => {
                self.bump();
                let tag = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-');
                if tag.is_empty() || !tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
                    return Err(self.error_at(
                        ParseErrorKind::ExpectedToken("a language tag".into()),
                        "`@` must start a language tag",
                        line,
                        column,
                        offset,
                    ));
                }
                TokenKind::LangTag(tag)
            }
            '_' => {
                self.bump();
                if self.peek() != Some(':') {
                    return Err(self.error_at(
                        ParseErrorKind::ExpectedToken("a blank node label".into()),
                        "`_` must start a blank node label `_:name`",
                        line,
                        column,
                        offset,
                    ));
                }
                self.bump();
                let label = self.take_local_name();
                if label.is_empty() {
                    return Err(self.error_at(
                        ParseErrorKind::ExpectedToken("a blank node label".into()),
                        "blank node label is empty",
                        line,
                        column,
                        offset,
                    ));
                }
                TokenKind::BlankNodeLabel(label)
            }
            '"' | '\'' => self.lex_string(line, column, offset)?,
            ':' => {
                self.bump();
                let local = self.take_local_name();
                TokenKind::PrefixedName {
                    prefix: String::new(),
                    local,
                }
            }
            c if c.is_ascii_digit() => self.lex_number(line, column, offset)?,
            c if c.is_alphabetic() => {
                let word = self.take_while(|c| c.is_alphanumeric() || c == '_');
                if self.peek() == Some(':') {
                    self.bump();
                    let local = self.take_local_name();
                    TokenKind::PrefixedName {
                        prefix: word,
                        local,
                    }
                } else {
                    TokenKind::Word(word)
                }
            }
            c => {
                return Err(self.error_at(
                    ParseErrorKind::ExpectedToken("a token".into()),
                    format!("unexpected character `{c}`"),
                    line,
                    column,
                    offset,
                ));
            }
        };

        Ok(Token {
            kind,
            line,
            column,
            offset,
        })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let start = self.offset;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        self.source[start..self.offset].to_owned()
    }

    /// Consumes a prefixed-name local part. Dots are allowed inside but a
    /// trailing run of dots belongs to the surrounding triple syntax, so it
    /// is left unconsumed.
    fn take_local_name(&mut self) -> String {
        let start = self.offset;
        let mut end = self.offset;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                self.bump();
                if c != '.' {
                    end = self.offset;
                }
            } else {
                break;
            }
        }
        // Give back any trailing dots.
        while self.offset > end {
            self.offset -= 1;
            self.column -= 1;
        }
        self.source[start..end].to_owned()
    }

    /// `<` either opens an IRI or is a comparison/quoted-triple operator. It
    /// is an IRI exactly when every character up to the next `>` is IRI-safe.
    fn lex_angle(&mut self) -> Result<TokenKind, ParseError> {
        let mut end = None;
        for (i, c) in self.rest().char_indices().skip(1) {
            match c {
                '>' => {
                    end = Some(i);
                    break;
                }
                '<' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => break,
                c if u32::from(c) <= 0x20 => break,
                _ => {}
            }
        }

        if let Some(end) = end {
            let iri = self.source[self.offset + 1..self.offset + end].to_owned();
            let target = self.offset + end + 1;
            while self.offset < target {
                self.bump();
            }
            return Ok(TokenKind::Iri(iri));
        }

        self.bump();
        Ok(match self.peek() {
            Some('<') => {
                self.bump();
                TokenKind::QuotedTripleOpen
            }
            Some('=') => {
                self.bump();
                TokenKind::LessEqual
            }
            _ => TokenKind::Less,
        })
    }

    fn lex_number(
        &mut self,
        line: u32,
        column: u32,
        offset: usize,
    ) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        let mut is_double = false;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
            is_double = true;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_ok = match self.peek_second() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => {
                    let mut chars = self.rest().chars();
                    chars.next();
                    chars.next();
                    chars.next().is_some_and(|c| c.is_ascii_digit())
                }
                _ => false,
            };
            if exponent_ok {
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.bump();
                }
                is_double = true;
            }
        }

        let text = &self.source[start..self.offset];
        if is_double {
            let value: f64 = text.parse().map_err(|_| {
                self.error_at(
                    ParseErrorKind::NumericOutOfRange,
                    format!("`{text}` is not a valid double"),
                    line,
                    column,
                    offset,
                )
            })?;
            if !value.is_finite() {
                return Err(self.error_at(
                    ParseErrorKind::NumericOutOfRange,
                    format!("`{text}` overflows a double"),
                    line,
                    column,
                    offset,
                ));
            }
            Ok(TokenKind::Double(value))
        } else {
            let value: i64 = text.parse().map_err(|_| {
                self.error_at(
                    ParseErrorKind::NumericOutOfRange,
                    format!("`{text}` overflows a 64-bit integer"),
                    line,
                    column,
                    offset,
                )
            })?;
            Ok(TokenKind::Integer(value))
        }
    }

    fn lex_string(
        &mut self,
        line: u32,
        column: u32,
        offset: usize,
    ) -> Result<TokenKind, ParseError> {
        let quote = match self.bump() {
            Some(c) => c,
            None => {
                return Err(self.error_at(
                    ParseErrorKind::UnterminatedString,
                    "string literal is not terminated",
                    line,
                    column,
                    offset,
                ))
            }
        };

        let mut long = false;
        if self.peek() == Some(quote) {
            self.bump();
            if self.peek() == Some(quote) {
                self.bump();
                long = true;
            } else {
                // Empty short string.
                return Ok(TokenKind::String(String::new()));
            }
        }

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(self.error_at(
                        ParseErrorKind::UnterminatedString,
                        "string literal is not terminated",
                        line,
                        column,
                        offset,
                    ));
                }
                Some('\n') if !long => {
                    return Err(self.error_at(
                        ParseErrorKind::UnterminatedString,
                        "string literal runs to end of line",
                        line,
                        column,
                        offset,
                    ));
                }
                Some(c) if c == quote => {
                    if !long {
                        self.bump();
                        break;
                    }
                    let mut quotes = 0;
                    while self.peek() == Some(quote) && quotes < 3 {
                        self.bump();
                        quotes += 1;
                    }
                    if quotes == 3 {
                        break;
                    }
                    for _ in 0..quotes {
                        value.push(quote);
                    }
                }
                Some('\\') => {
                    value.push(self.lex_escape()?);
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
        Ok(TokenKind::String(value))
    }

    fn lex_escape(&mut self) -> Result<char, ParseError> {
        let line = self.line;
        let column = self.column;
        let offset = self.offset;
        self.bump(); // backslash
        let Some(c) = self.bump() else {
            return Err(self.error_at(
                ParseErrorKind::UnterminatedString,
                "string literal ends inside an escape",
                line,
                column,
                offset,
            ));
        };
        match c {
            't' => Ok('\t'),
            'b' => Ok('\u{8}'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            'f' => Ok('\u{c}'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            '\\' => Ok('\\'),
            '/' => Ok('/'),
            'u' => self.lex_unicode_escape(4, line, column, offset),
            'U' => self.lex_unicode_escape(8, line, column, offset),
            c => Err(self.error_at(
                ParseErrorKind::InvalidEscape,
                format!("unknown escape `\\{c}`"),
                line,
                column,
                offset,
            )),
        }
    }

    fn lex_unicode_escape(
        &mut self,
        digits: u32,
        line: u32,
        column: u32,
        offset: usize,
    ) -> Result<char, ParseError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| {
                    self.error_at(
                        ParseErrorKind::InvalidEscape,
                        format!("unicode escape needs {digits} hex digits"),
                        line,
                        column,
                        offset,
                    )
                })?;
            self.bump();
            value = value * 16 + digit;
        }
        if (0xD800..=0xDFFF).contains(&value) {
            return Err(self.error_at(
                ParseErrorKind::InvalidEscape,
                format!("U+{value:04X} is a surrogate"),
                line,
                column,
                offset,
            ));
        }
        char::from_u32(value).ok_or_else(|| {
            self.error_at(
                ParseErrorKind::InvalidEscape,
                format!("U+{value:X} is not a valid code point"),
                line,
                column,
                offset,
            )
        })
    }
}
