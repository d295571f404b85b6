use super::Parser;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use omniql_model::{Expression, Literal};

/// Keywords that terminate expression-adjacent constructs and therefore can
/// never begin a function call.
const RESERVED_WORDS: &[&str] = &[
    "SELECT", "CONSTRUCT", "ASK", "DESCRIBE", "WHERE", "FROM", "GROUP", "HAVING", "ORDER",
    "LIMIT", "OFFSET", "VALUES", "BY", "AS", "ASC", "DESC", "DISTINCT", "REDUCED", "OPTIONAL",
    "UNION", "MINUS", "FILTER", "BIND", "SERVICE", "SILENT", "GRAPH", "LATERAL", "INSERT",
    "DELETE", "LOAD", "CLEAR", "CREATE", "DROP", "COPY", "MOVE", "ADD", "WITH", "USING", "TO",
    "INTO", "DATA", "UNDEF", "PREFIX", "BASE", "VERSION",
];

impl Parser<'_> {
    /// Whether the current token could begin a function call.
    pub(super) fn at_call_start(&self) -> bool {
        match &self.current.kind {
            TokenKind::Word(word) => {
                !word.eq_ignore_ascii_case("true")
                    && !word.eq_ignore_ascii_case("false")
                    && !RESERVED_WORDS
                        .iter()
                        .any(|reserved| word.eq_ignore_ascii_case(reserved))
            }
            _ => false,
        }
    }

    /// Entry point: `||`-separated disjunction.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_and_expression()?;
        while self.eat(&TokenKind::OrOr)? {
            expression = expression.or(self.parse_and_expression()?);
        }
        Ok(expression)
    }

    fn parse_and_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_relational_expression()?;
        while self.eat(&TokenKind::AndAnd)? {
            expression = expression.and(self.parse_relational_expression()?);
        }
        Ok(expression)
    }

    fn parse_relational_expression(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_additive_expression()?;

        if self.eat(&TokenKind::Equal)? {
            return Ok(expression.equal(self.parse_additive_expression()?));
        }
        if self.eat(&TokenKind::NotEqual)? {
            return Ok(expression.not_equal(self.parse_additive_expression()?));
        }
        if self.eat(&TokenKind::Less)? {
            return Ok(expression.less_than(self.parse_additive_expression()?));
        }
        if self.eat(&TokenKind::LessEqual)? {
            return Ok(expression.less_or_equal(self.parse_additive_expression()?));
        }
        if self.eat(&TokenKind::Greater)? {
            return Ok(expression.greater_than(self.parse_additive_expression()?));
        }
        if self.eat(&TokenKind::GreaterEqual)? {
            return Ok(expression.greater_or_equal(self.parse_additive_expression()?));
        }
        if self.at_word("IN") {
            self.advance()?;
            return Ok(expression.in_list(self.parse_expression_list()?));
        }
        if self.at_word("NOT") {
            self.advance()?;
            self.expect_word("IN")?;
            return Ok(expression.in_list(self.parse_expression_list()?).not());
        }

        Ok(expression)
    }

    fn parse_additive_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_multiplicative_expression()?;
        loop {
            if self.eat(&TokenKind::Plus)? {
                expression = expression.add(self.parse_multiplicative_expression()?);
            } else if self.eat(&TokenKind::Minus)? {
                expression = expression.sub(self.parse_multiplicative_expression()?);
            } else {
                return Ok(expression);
            }
        }
    }

    fn parse_multiplicative_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_unary_expression()?;
        loop {
            if self.eat(&TokenKind::Star)? {
                expression = expression.mul(self.parse_unary_expression()?);
            } else if self.eat(&TokenKind::Slash)? {
                expression = expression.div(self.parse_unary_expression()?);
            } else {
                return Ok(expression);
            }
        }
    }

    fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        if self.eat(&TokenKind::Bang)? {
            return Ok(self.parse_unary_expression()?.not());
        }
        if self.eat(&TokenKind::Minus)? {
            return Ok(self.parse_unary_expression()?.negate());
        }
        if self.eat(&TokenKind::Plus)? {
            return self.parse_unary_expression();
        }
        self.parse_primary_expression()
    }

    /// A primary expression: literal, variable, parenthesized expression or
    /// function call. IRIs and prefixed names act as function names when
    /// followed by an argument list and as IRI literals otherwise.
    pub(super) fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind.clone() {
            TokenKind::LParen => {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                Ok(expression)
            }
            TokenKind::Variable(name) => {
                self.advance()?;
                Ok(Expression::Variable(name))
            }
            TokenKind::Integer(value) => {
                self.advance()?;
                Ok(Expression::Literal(Literal::Int(value)))
            }
            TokenKind::Double(value) => {
                self.advance()?;
                Ok(Expression::Literal(Literal::Double(value)))
            }
            TokenKind::String(value) => {
                self.advance()?;
                Ok(Expression::Literal(self.parse_literal_suffix(value)?))
            }
            TokenKind::Word(word) => {
                if word.eq_ignore_ascii_case("true") {
                    self.advance()?;
                    return Ok(Expression::Literal(Literal::Boolean(true)));
                }
                if word.eq_ignore_ascii_case("false") {
                    self.advance()?;
                    return Ok(Expression::Literal(Literal::Boolean(false)));
                }
                self.advance()?;
                self.parse_call_arguments(word)
            }
            TokenKind::Iri(iri) => {
                self.advance()?;
                if self.current.kind == TokenKind::LParen {
                    self.parse_call_arguments(iri)
                } else {
                    Ok(Expression::Literal(Literal::Iri(iri)))
                }
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                let iri = self.resolve_prefixed(&prefix, &local)?;
                if self.current.kind == TokenKind::LParen {
                    self.parse_call_arguments(iri)
                } else {
                    Ok(Expression::Literal(Literal::Iri(iri)))
                }
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("an expression".into()),
                format!("expected an expression, found {kind}"),
            )),
        }
    }

    /// Argument list of a call whose name was just consumed. `COUNT(*)` gets
    /// an empty argument list; `DISTINCT` inside aggregate arguments is
    /// represented as a nested `DISTINCT(…)` call.
    fn parse_call_arguments(&mut self, name: String) -> Result<Expression, ParseError> {
        self.expect(
            &TokenKind::LParen,
            ParseErrorKind::ExpectedToken("`(`".into()),
        )?;

        if self.eat(&TokenKind::Star)? {
            self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
            return Ok(Expression::call(name, Vec::new()));
        }
        if self.eat(&TokenKind::RParen)? {
            return Ok(Expression::call(name, Vec::new()));
        }

        let mut distinct = false;
        if self.at_word("DISTINCT") {
            self.advance()?;
            distinct = true;
        }

        let mut args = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma)? {
            args.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;

        if distinct {
            args = vec![Expression::call("DISTINCT", args)];
        }
        Ok(Expression::call(name, args))
    }

    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        self.expect(
            &TokenKind::LParen,
            ParseErrorKind::ExpectedToken("`(`".into()),
        )?;
        if self.eat(&TokenKind::RParen)? {
            return Ok(Vec::new());
        }
        let mut list = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma)? {
            list.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
        Ok(list)
    }

    /// Attaches a language tag or datatype to a just-consumed string literal.
    pub(super) fn parse_literal_suffix(&mut self, value: String) -> Result<Literal, ParseError> {
        match self.current.kind.clone() {
            TokenKind::LangTag(language) => {
                self.advance()?;
                Ok(Literal::LangString {
                    value,
                    language,
                })
            }
            TokenKind::CaretCaret => {
                self.advance()?;
                let datatype = self.expect_iri()?;
                Ok(Literal::Typed {
                    value,
                    datatype,
                })
            }
            _ => Ok(Literal::String(value)),
        }
    }
}
