mod expression;
mod pattern;
mod update;

use crate::error::{snippet_at, ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::query::{
    AskQuery, ConstructQuery, DatasetClause, DescribeQuery, OrderKey, Projection, ProjectionItem,
    QueryStatement, SelectQuery,
};
use crate::GraphPattern;
use omniql_model::{Expression, Term};

/// Recursive-descent parser with one token of lookahead.
///
/// The parser owns its lexer and pulls tokens on demand. All state is local
/// to one invocation; errors are fatal and carry the position of the token
/// they were detected at.
pub(crate) struct Parser<'input> {
    lexer: Lexer<'input>,
    current: Token,
    prologue: crate::query::Prologue,
    blank_counter: u32,
}

impl<'input> Parser<'input> {
    pub(crate) fn new(source: &'input str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            prologue: crate::query::Prologue::new(),
            blank_counter: 0,
        })
    }

    /// Parses a complete statement and checks nothing follows it.
    pub(crate) fn parse_statement(&mut self) -> Result<QueryStatement, ParseError> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error(ParseErrorKind::EmptyInput, "input contains no tokens"));
        }
        self.parse_prologue()?;

        let statement = match &self.current.kind {
            TokenKind::Word(word) => match word.to_ascii_uppercase().as_str() {
                "SELECT" => QueryStatement::Select(self.parse_select_query()?),
                "CONSTRUCT" => QueryStatement::Construct(self.parse_construct_query()?),
                "ASK" => QueryStatement::Ask(self.parse_ask_query()?),
                "DESCRIBE" => QueryStatement::Describe(self.parse_describe_query()?),
                "INSERT" | "DELETE" | "WITH" | "LOAD" | "CLEAR" | "CREATE" | "DROP" | "COPY"
                | "MOVE" | "ADD" => QueryStatement::Update(self.parse_update_operation()?),
                _ => {
                    return Err(self.error(
                        ParseErrorKind::UnknownQueryForm,
                        format!("`{word}` does not start a query or update"),
                    ));
                }
            },
            kind => {
                return Err(self.error(
                    ParseErrorKind::UnknownQueryForm,
                    format!("{kind} does not start a query or update"),
                ));
            }
        };

        self.expect_end()?;
        Ok(statement)
    }

    /// Parses a statement that must be a SELECT query.
    pub(crate) fn parse_select_statement(&mut self) -> Result<SelectQuery, ParseError> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error(ParseErrorKind::EmptyInput, "input contains no tokens"));
        }
        self.parse_prologue()?;
        if !self.at_word("SELECT") {
            return Err(self.error(
                ParseErrorKind::ExpectedToken("`SELECT`".into()),
                format!("expected `SELECT`, found {}", self.current.kind),
            ));
        }
        let query = self.parse_select_query()?;
        self.expect_end()?;
        Ok(query)
    }

    // ----- token plumbing ---------------------------------------------------

    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(
            kind,
            message,
            self.current.line,
            self.current.column,
            snippet_at(self.lexer.source(), self.current.offset),
        )
    }

    fn at_word(&self, keyword: &str) -> bool {
        self.current.kind.is_word(keyword)
    }

    fn eat_word(&mut self, keyword: &str) -> Result<bool, ParseError> {
        if self.at_word(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_word(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.eat_word(keyword)? {
            Ok(())
        } else {
            Err(self.error(
                ParseErrorKind::ExpectedToken(format!("`{keyword}`")),
                format!("expected `{keyword}`, found {}", self.current.kind),
            ))
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if &self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &TokenKind, error_kind: ParseErrorKind) -> Result<(), ParseError> {
        if self.eat(kind)? {
            Ok(())
        } else {
            Err(self.error(
                error_kind,
                format!("expected {kind}, found {}", self.current.kind),
            ))
        }
    }

    fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.current.kind == TokenKind::Eof {
            Ok(())
        } else {
            Err(self.error(
                ParseErrorKind::UnexpectedTrailingInput,
                format!("{} after a complete statement", self.current.kind),
            ))
        }
    }

    fn expect_variable(&mut self) -> Result<String, ParseError> {
        match &self.current.kind {
            TokenKind::Variable(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(name)
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a variable".into()),
                format!("expected a variable, found {kind}"),
            )),
        }
    }

    /// An IRI or prefixed name, resolved to its full form.
    pub(crate) fn expect_iri(&mut self) -> Result<String, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(iri)
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                self.resolve_prefixed(&prefix, &local)
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedIri,
                format!("expected an IRI, found {kind}"),
            )),
        }
    }

    pub(crate) fn resolve_prefixed(
        &self,
        prefix: &str,
        local: &str,
    ) -> Result<String, ParseError> {
        self.prologue.resolve(prefix, local).ok_or_else(|| {
            self.error(
                ParseErrorKind::ExpectedToken("a declared prefix".into()),
                format!("prefix `{prefix}:` is not declared"),
            )
        })
    }

    pub(crate) fn fresh_blank_label(&mut self) -> String {
        let label = format!("b{}", self.blank_counter);
        self.blank_counter += 1;
        label
    }

    // ----- prologue ---------------------------------------------------------

    fn parse_prologue(&mut self) -> Result<(), ParseError> {
        loop {
            if self.eat_word("BASE")? {
                match self.current.kind.clone() {
                    TokenKind::Iri(iri) => {
                        self.advance()?;
                        self.prologue.base = Some(iri);
                    }
                    kind => {
                        return Err(self.error(
                            ParseErrorKind::ExpectedIri,
                            format!("BASE requires an IRI, found {kind}"),
                        ));
                    }
                }
            } else if self.eat_word("PREFIX")? {
                let prefix = match self.current.kind.clone() {
                    TokenKind::PrefixedName { prefix, local } if local.is_empty() => {
                        self.advance()?;
                        prefix
                    }
                    kind => {
                        return Err(self.error(
                            ParseErrorKind::ExpectedToken("a prefix declaration".into()),
                            format!("PREFIX requires `name:`, found {kind}"),
                        ));
                    }
                };
                match self.current.kind.clone() {
                    TokenKind::Iri(iri) => {
                        self.advance()?;
                        self.prologue.prefixes.insert(prefix, iri);
                    }
                    kind => {
                        return Err(self.error(
                            ParseErrorKind::ExpectedIri,
                            format!("PREFIX requires an IRI, found {kind}"),
                        ));
                    }
                }
            } else if self.at_word("VERSION") {
                self.advance()?;
                match self.current.kind.clone() {
                    TokenKind::String(version) => {
                        self.advance()?;
                        self.prologue.version = Some(version);
                    }
                    kind => {
                        return Err(self.error(
                            ParseErrorKind::ExpectedVersionString,
                            format!("VERSION requires a quoted string, found {kind}"),
                        ));
                    }
                }
            } else {
                return Ok(());
            }
        }
    }

    // ----- SELECT -----------------------------------------------------------

    fn parse_select_query(&mut self) -> Result<SelectQuery, ParseError> {
        self.expect_word("SELECT")?;

        let mut distinct = false;
        let mut reduced = false;
        if self.eat_word("DISTINCT")? {
            distinct = true;
        } else if self.eat_word("REDUCED")? {
            reduced = true;
        }

        let projection = self.parse_projection()?;
        let datasets = self.parse_dataset_clauses()?;

        self.eat_word("WHERE")?;
        let mut source = self
            .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;

        // A skipped (lenient) projection falls back to the variables the
        // pattern binds; a pattern binding none projects everything.
        let projection = match projection {
            Some(projection) => projection,
            None => {
                let variables = source.variables();
                if variables.is_empty() {
                    Projection::All
                } else {
                    Projection::Items(
                        variables.into_iter().map(ProjectionItem::variable).collect(),
                    )
                }
            }
        };

        let group_by = self.parse_group_by()?;
        let having = self.parse_having()?;
        let order_by = self.parse_order_by()?;
        let (limit, offset) = self.parse_limit_offset()?;

        if self.eat_word("VALUES")? {
            let values = self.parse_values_block()?;
            source = GraphPattern::group(vec![source, GraphPattern::Values(values)]);
        }

        let mut query = SelectQuery::new(std::mem::take(&mut self.prologue), projection, source);
        query.datasets = datasets;
        query.group_by = group_by;
        query.having = having;
        query.order_by = order_by;
        query.limit = limit;
        query.offset = offset;
        query.distinct = distinct;
        query.reduced = reduced;
        Ok(query)
    }

    /// Parses the projection. `None` means the lenient rule applied: the
    /// tokens after `SELECT` could not begin a projection item and were
    /// skipped, leaving the projection to be inferred from the pattern.
    fn parse_projection(&mut self) -> Result<Option<Projection>, ParseError> {
        if self.eat(&TokenKind::Star)? {
            return Ok(Some(Projection::All));
        }

        let mut items = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Variable(name) => {
                    self.advance()?;
                    items.push(ProjectionItem::variable(name));
                }
                TokenKind::LParen => {
                    self.advance()?;
                    let expression = self.parse_expression()?;
                    self.expect_word("AS")?;
                    let alias = self.expect_variable()?;
                    self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                    items.push(ProjectionItem::aliased(expression, alias));
                }
                _ => break,
            }
        }

        if !items.is_empty() {
            return Ok(Some(Projection::Items(items)));
        }

        // Lenient rule: skip whatever cannot begin a projection item and let
        // the caller infer the projection from the WHERE pattern.
        loop {
            match &self.current.kind {
                TokenKind::Eof | TokenKind::LBrace => break,
                TokenKind::Word(word)
                    if [
                        "WHERE", "FROM", "GROUP", "HAVING", "ORDER", "LIMIT", "OFFSET", "VALUES",
                    ]
                    .iter()
                    .any(|k| word.eq_ignore_ascii_case(k)) =>
                {
                    break;
                }
                _ => {
                    self.advance()?;
                }
            }
        }
        Ok(None)
    }

    pub(crate) fn parse_dataset_clauses(&mut self) -> Result<Vec<DatasetClause>, ParseError> {
        let mut datasets = Vec::new();
        while self.eat_word("FROM")? {
            let named = self.eat_word("NAMED")?;
            let iri = self.expect_iri()?;
            datasets.push(DatasetClause { iri, named });
        }
        Ok(datasets)
    }

    fn parse_group_by(&mut self) -> Result<Vec<Expression>, ParseError> {
        if !self.eat_word("GROUP")? {
            return Ok(Vec::new());
        }
        self.expect_word("BY")?;

        let mut conditions = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Variable(name) => {
                    self.advance()?;
                    conditions.push(Expression::Variable(name));
                }
                TokenKind::LParen => {
                    self.advance()?;
                    let expression = self.parse_expression()?;
                    // `(expr AS ?v)` is accepted; the alias carries no extra
                    // information for grouping and is dropped.
                    if self.eat_word("AS")? {
                        self.expect_variable()?;
                    }
                    self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                    conditions.push(expression);
                }
                TokenKind::Word(_) if self.at_call_start() => {
                    conditions.push(self.parse_primary_expression()?);
                }
                _ => break,
            }
        }

        if conditions.is_empty() {
            return Err(self.error(
                ParseErrorKind::ExpectedToken("a grouping condition".into()),
                format!("GROUP BY requires a condition, found {}", self.current.kind),
            ));
        }
        Ok(conditions)
    }

    fn parse_having(&mut self) -> Result<Option<Expression>, ParseError> {
        if !self.eat_word("HAVING")? {
            return Ok(None);
        }
        let mut condition = self.parse_constraint()?;
        while self.current.kind == TokenKind::LParen || self.at_call_start() {
            condition = condition.and(self.parse_constraint()?);
        }
        Ok(Some(condition))
    }

    /// A constraint as used by FILTER and HAVING: a parenthesized expression
    /// or a function call.
    pub(crate) fn parse_constraint(&mut self) -> Result<Expression, ParseError> {
        match &self.current.kind {
            TokenKind::LParen => {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                Ok(expression)
            }
            TokenKind::Word(_) | TokenKind::Iri(_) | TokenKind::PrefixedName { .. } => {
                self.parse_primary_expression()
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a constraint".into()),
                format!("expected `(` or a function call, found {kind}"),
            )),
        }
    }

    fn parse_order_by(&mut self) -> Result<Vec<OrderKey>, ParseError> {
        if !self.eat_word("ORDER")? {
            return Ok(Vec::new());
        }
        self.expect_word("BY")?;

        let mut keys = Vec::new();
        loop {
            if self.at_word("ASC") || self.at_word("DESC") {
                let descending = self.at_word("DESC");
                self.advance()?;
                self.expect(
                    &TokenKind::LParen,
                    ParseErrorKind::ExpectedToken("`(`".into()),
                )?;
                let expression = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                keys.push(OrderKey {
                    expression,
                    descending,
                });
            } else if let TokenKind::Variable(name) = self.current.kind.clone() {
                self.advance()?;
                keys.push(OrderKey::ascending(Expression::Variable(name)));
            } else if self.current.kind == TokenKind::LParen {
                self.advance()?;
                let expression = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                keys.push(OrderKey::ascending(expression));
            } else if self.at_call_start() {
                keys.push(OrderKey::ascending(self.parse_primary_expression()?));
            } else {
                break;
            }
        }

        if keys.is_empty() {
            return Err(self.error(
                ParseErrorKind::ExpectedToken("an ordering key".into()),
                format!("ORDER BY requires a key, found {}", self.current.kind),
            ));
        }
        Ok(keys)
    }

    fn parse_limit_offset(&mut self) -> Result<(Option<u64>, u64), ParseError> {
        let mut limit = None;
        let mut offset = 0;
        loop {
            if self.eat_word("LIMIT")? {
                limit = Some(self.expect_unsigned()?);
            } else if self.eat_word("OFFSET")? {
                offset = self.expect_unsigned()?;
            } else {
                return Ok((limit, offset));
            }
        }
    }

    fn expect_unsigned(&mut self) -> Result<u64, ParseError> {
        match self.current.kind {
            TokenKind::Integer(value) => {
                let value = u64::try_from(value).map_err(|_| {
                    self.error(
                        ParseErrorKind::ExpectedToken("a non-negative integer".into()),
                        format!("`{value}` is negative"),
                    )
                })?;
                self.advance()?;
                Ok(value)
            }
            ref kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a non-negative integer".into()),
                format!("expected an integer, found {kind}"),
            )),
        }
    }

    // ----- CONSTRUCT / ASK / DESCRIBE --------------------------------------

    fn parse_construct_query(&mut self) -> Result<ConstructQuery, ParseError> {
        self.expect_word("CONSTRUCT")?;

        let (template, datasets, source) = if self.current.kind == TokenKind::LBrace {
            let template = self.parse_construct_template()?;
            let datasets = self.parse_dataset_clauses()?;
            if !self.eat_word("WHERE")? {
                return Err(self.error(
                    ParseErrorKind::MalformedConstruct,
                    "CONSTRUCT template must be followed by WHERE",
                ));
            }
            let source = self
                .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;
            (template, datasets, source)
        } else {
            let datasets = self.parse_dataset_clauses()?;
            if !self.eat_word("WHERE")? {
                return Err(self.error(
                    ParseErrorKind::MalformedConstruct,
                    "CONSTRUCT requires a template or a WHERE clause",
                ));
            }
            let source = self
                .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;
            // Shorthand form: the pattern's triples double as the template.
            let template = source.basic_triples();
            (template, datasets, source)
        };

        let order_by = self.parse_order_by()?;
        let (limit, offset) = self.parse_limit_offset()?;

        Ok(ConstructQuery {
            prologue: std::mem::take(&mut self.prologue),
            template,
            datasets,
            source,
            order_by,
            limit,
            offset,
        })
    }

    fn parse_ask_query(&mut self) -> Result<AskQuery, ParseError> {
        self.expect_word("ASK")?;
        let datasets = self.parse_dataset_clauses()?;
        self.eat_word("WHERE")?;
        let source = self
            .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;
        Ok(AskQuery {
            prologue: std::mem::take(&mut self.prologue),
            datasets,
            source,
        })
    }

    fn parse_describe_query(&mut self) -> Result<DescribeQuery, ParseError> {
        self.expect_word("DESCRIBE")?;

        let mut targets = Vec::new();
        if !self.eat(&TokenKind::Star)? {
            loop {
                match self.current.kind.clone() {
                    TokenKind::Variable(name) => {
                        self.advance()?;
                        targets.push(Term::Variable(name));
                    }
                    TokenKind::Iri(iri) => {
                        self.advance()?;
                        targets.push(Term::Iri(iri));
                    }
                    TokenKind::PrefixedName { prefix, local } => {
                        self.advance()?;
                        let iri = self.resolve_prefixed(&prefix, &local)?;
                        targets.push(Term::Iri(iri));
                    }
                    _ => break,
                }
            }
            if targets.is_empty() {
                return Err(self.error(
                    ParseErrorKind::ExpectedToken("`*`, a variable or an IRI".into()),
                    format!("DESCRIBE requires a target, found {}", self.current.kind),
                ));
            }
        }

        let datasets = self.parse_dataset_clauses()?;
        let source = if self.at_word("WHERE") || self.current.kind == TokenKind::LBrace {
            self.eat_word("WHERE")?;
            Some(self.parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?)
        } else {
            None
        };

        Ok(DescribeQuery {
            prologue: std::mem::take(&mut self.prologue),
            targets,
            datasets,
            source,
        })
    }
}
