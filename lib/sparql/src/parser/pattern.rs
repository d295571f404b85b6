use super::Parser;
use crate::algebra::{GraphPattern, ValuesBlock};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use omniql_model::{vocab, Literal, PropertyPath, Term, TriplePattern};

/// A parsed verb position: either a plain term (variable or IRI) or a
/// non-trivial property path.
enum Verb {
    Term(Term),
    Path(PropertyPath),
}

impl Parser<'_> {
    /// Parses `{ … }`. `missing_open` selects the error kind when the
    /// current token is not `{` (LATERAL demands `ExpectedLBrace`).
    pub(super) fn parse_group_graph_pattern(
        &mut self,
        missing_open: ParseErrorKind,
    ) -> Result<GraphPattern, ParseError> {
        if self.current.kind != TokenKind::LBrace {
            return Err(self.error(
                missing_open,
                format!("expected `{{`, found {}", self.current.kind),
            ));
        }
        self.advance()?;

        let mut elements: Vec<GraphPattern> = Vec::new();
        let mut filters = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace => {
                    self.advance()?;
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error(
                        ParseErrorKind::UnclosedBrace,
                        "group pattern is not closed",
                    ));
                }
                TokenKind::Dot => {
                    self.advance()?;
                }
                TokenKind::LBrace => {
                    let first = self.parse_group_graph_pattern(
                        ParseErrorKind::ExpectedToken("`{`".into()),
                    )?;
                    let combined = self.parse_union_tail(first)?;
                    elements.push(combined);
                }
                TokenKind::Word(word) => match word.to_ascii_uppercase().as_str() {
                    "OPTIONAL" => {
                        self.advance()?;
                        let inner = self.parse_group_graph_pattern(
                            ParseErrorKind::ExpectedToken("`{`".into()),
                        )?;
                        elements.push(GraphPattern::Optional(Box::new(inner)));
                    }
                    "MINUS" => {
                        self.advance()?;
                        let right = self.parse_group_graph_pattern(
                            ParseErrorKind::ExpectedToken("`{`".into()),
                        )?;
                        let left = GraphPattern::group(std::mem::take(&mut elements));
                        elements.push(GraphPattern::Minus(Box::new(left), Box::new(right)));
                    }
                    "FILTER" => {
                        self.advance()?;
                        filters.push(self.parse_constraint()?);
                    }
                    "BIND" => {
                        self.advance()?;
                        self.expect(
                            &TokenKind::LParen,
                            ParseErrorKind::ExpectedToken("`(`".into()),
                        )?;
                        let expression = self.parse_expression()?;
                        self.expect_word("AS")?;
                        let variable = self.expect_variable()?;
                        self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                        let inner = GraphPattern::group(std::mem::take(&mut elements));
                        elements.push(GraphPattern::Bind {
                            expression,
                            variable,
                            inner: Box::new(inner),
                        });
                    }
                    "VALUES" => {
                        self.advance()?;
                        elements.push(GraphPattern::Values(self.parse_values_block()?));
                    }
                    "SERVICE" => {
                        self.advance()?;
                        let silent = self.eat_word("SILENT")?;
                        let name = self.parse_graph_name()?;
                        let inner = self.parse_group_graph_pattern(
                            ParseErrorKind::ExpectedToken("`{`".into()),
                        )?;
                        elements.push(GraphPattern::Service {
                            name,
                            silent,
                            inner: Box::new(inner),
                        });
                    }
                    "LATERAL" => {
                        self.advance()?;
                        let inner =
                            self.parse_group_graph_pattern(ParseErrorKind::ExpectedLBrace)?;
                        elements.push(GraphPattern::Lateral(Box::new(inner)));
                    }
                    "GRAPH" => {
                        self.advance()?;
                        let name = self.parse_graph_name()?;
                        let inner = self.parse_group_graph_pattern(
                            ParseErrorKind::ExpectedToken("`{`".into()),
                        )?;
                        elements.push(GraphPattern::Graph {
                            name,
                            inner: Box::new(inner),
                        });
                    }
                    _ if self.can_start_triples() => {
                        elements.extend(self.parse_triples_block()?);
                    }
                    _ => {
                        return Err(self.error(
                            ParseErrorKind::ExpectedToken("a graph pattern element".into()),
                            format!("`{word}` cannot appear in a group pattern"),
                        ));
                    }
                },
                _ if self.can_start_triples() => {
                    elements.extend(self.parse_triples_block()?);
                }
                kind => {
                    return Err(self.error(
                        ParseErrorKind::ExpectedToken("a graph pattern element".into()),
                        format!("{kind} cannot appear in a group pattern"),
                    ));
                }
            }
        }

        let mut result = GraphPattern::group(elements);
        for condition in filters {
            result = GraphPattern::Filter {
                condition,
                inner: Box::new(result),
            };
        }
        Ok(result)
    }

    /// Folds `… UNION { … } UNION { … }` left-associatively.
    fn parse_union_tail(&mut self, first: GraphPattern) -> Result<GraphPattern, ParseError> {
        let mut pattern = first;
        while self.eat_word("UNION")? {
            let next = self
                .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;
            pattern = GraphPattern::Union(Box::new(pattern), Box::new(next));
        }
        Ok(pattern)
    }

    /// The graph/service name position: an IRI or a variable.
    fn parse_graph_name(&mut self) -> Result<Term, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Variable(name) => {
                self.advance()?;
                Ok(Term::Variable(name))
            }
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(Term::Iri(iri))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                Ok(Term::Iri(self.resolve_prefixed(&prefix, &local)?))
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedIri,
                format!("expected an IRI or variable, found {kind}"),
            )),
        }
    }

    pub(super) fn can_start_triples(&self) -> bool {
        match &self.current.kind {
            TokenKind::Variable(_)
            | TokenKind::Iri(_)
            | TokenKind::PrefixedName { .. }
            | TokenKind::BlankNodeLabel(_)
            | TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Double(_)
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::LBracket
            | TokenKind::LParen
            | TokenKind::QuotedTripleOpen => true,
            TokenKind::Word(word) => {
                word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false")
            }
            _ => false,
        }
    }

    fn can_start_verb(&self) -> bool {
        match &self.current.kind {
            TokenKind::Variable(_)
            | TokenKind::Iri(_)
            | TokenKind::PrefixedName { .. }
            | TokenKind::Caret
            | TokenKind::Bang
            | TokenKind::LParen => true,
            TokenKind::Word(word) => word.eq_ignore_ascii_case("a"),
            _ => false,
        }
    }

    /// One `.`-chained run of triple patterns. Plain triples accumulate into
    /// a single basic block; path verbs produce dedicated path patterns.
    fn parse_triples_block(&mut self) -> Result<Vec<GraphPattern>, ParseError> {
        let mut triples = Vec::new();
        let mut paths = Vec::new();
        loop {
            self.parse_triples_same_subject(&mut triples, &mut paths)?;
            if self.current.kind == TokenKind::Dot {
                self.advance()?;
                if self.can_start_triples() {
                    continue;
                }
            }
            break;
        }

        let mut out = Vec::new();
        if !triples.is_empty() {
            out.push(GraphPattern::Basic(triples));
        }
        out.extend(paths);
        Ok(out)
    }

    /// One subject with its predicate-object list.
    pub(super) fn parse_triples_same_subject(
        &mut self,
        triples: &mut Vec<TriplePattern>,
        paths: &mut Vec<GraphPattern>,
    ) -> Result<(), ParseError> {
        let is_compound = matches!(
            self.current.kind,
            TokenKind::LBracket | TokenKind::LParen
        );
        let subject = self.parse_term(triples, paths)?;

        if self.can_start_verb() {
            self.parse_predicate_object_list(&subject, triples, paths)?;
        } else if !is_compound {
            return Err(self.error(
                ParseErrorKind::ExpectedToken("a predicate".into()),
                format!("expected a predicate, found {}", self.current.kind),
            ));
        }
        Ok(())
    }

    fn parse_predicate_object_list(
        &mut self,
        subject: &Term,
        triples: &mut Vec<TriplePattern>,
        paths: &mut Vec<GraphPattern>,
    ) -> Result<(), ParseError> {
        loop {
            let verb = self.parse_verb()?;
            loop {
                let object = self.parse_term(triples, paths)?;
                match &verb {
                    Verb::Term(term) => triples.push(TriplePattern::new(
                        subject.clone(),
                        term.clone(),
                        object,
                    )),
                    Verb::Path(path) => paths.push(GraphPattern::Path {
                        subject: subject.clone(),
                        path: path.clone(),
                        object,
                    }),
                }
                if !self.eat(&TokenKind::Comma)? {
                    break;
                }
            }

            if self.current.kind == TokenKind::Semicolon {
                while self.eat(&TokenKind::Semicolon)? {}
                if self.can_start_verb() {
                    continue;
                }
            }
            return Ok(());
        }
    }

    fn parse_verb(&mut self) -> Result<Verb, ParseError> {
        if let TokenKind::Variable(name) = self.current.kind.clone() {
            self.advance()?;
            return Ok(Verb::Term(Term::Variable(name)));
        }
        let path = self.parse_path()?;
        match path.as_trivial_iri() {
            Some(iri) => Ok(Verb::Term(Term::Iri(iri.to_owned()))),
            None => Ok(Verb::Path(path)),
        }
    }

    // ----- property paths ---------------------------------------------------

    fn parse_path(&mut self) -> Result<PropertyPath, ParseError> {
        let mut path = self.parse_path_sequence()?;
        while self.eat(&TokenKind::Pipe)? {
            path = path.or(self.parse_path_sequence()?);
        }
        Ok(path)
    }

    fn parse_path_sequence(&mut self) -> Result<PropertyPath, ParseError> {
        let mut path = self.parse_path_elt_or_inverse()?;
        while self.eat(&TokenKind::Slash)? {
            path = path.then(self.parse_path_elt_or_inverse()?);
        }
        Ok(path)
    }

    fn parse_path_elt_or_inverse(&mut self) -> Result<PropertyPath, ParseError> {
        if self.eat(&TokenKind::Caret)? {
            Ok(self.parse_path_elt()?.inverse())
        } else {
            self.parse_path_elt()
        }
    }

    fn parse_path_elt(&mut self) -> Result<PropertyPath, ParseError> {
        let path = self.parse_path_primary()?;
        if self.eat(&TokenKind::Star)? {
            Ok(path.zero_or_more())
        } else if self.eat(&TokenKind::Plus)? {
            Ok(path.one_or_more())
        } else if self.eat(&TokenKind::Question)? {
            Ok(path.zero_or_one())
        } else {
            Ok(path)
        }
    }

    fn parse_path_primary(&mut self) -> Result<PropertyPath, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(PropertyPath::Iri(iri))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                Ok(PropertyPath::Iri(self.resolve_prefixed(&prefix, &local)?))
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("a") => {
                self.advance()?;
                Ok(PropertyPath::Iri(vocab::rdf::TYPE.to_owned()))
            }
            TokenKind::Bang => {
                self.advance()?;
                self.parse_negated_path()
            }
            TokenKind::LParen => {
                self.advance()?;
                let path = self.parse_path()?;
                self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
                Ok(path)
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a predicate or property path".into()),
                format!("expected a property path, found {kind}"),
            )),
        }
    }

    fn parse_negated_path(&mut self) -> Result<PropertyPath, ParseError> {
        if self.eat(&TokenKind::LParen)? {
            let mut iris = Vec::new();
            if self.current.kind != TokenKind::RParen {
                loop {
                    iris.push(self.parse_negated_path_iri()?);
                    if !self.eat(&TokenKind::Pipe)? {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RParen, ParseErrorKind::UnclosedParen)?;
            Ok(PropertyPath::Negated(iris))
        } else {
            Ok(PropertyPath::Negated(vec![self.parse_negated_path_iri()?]))
        }
    }

    fn parse_negated_path_iri(&mut self) -> Result<String, ParseError> {
        if self.at_word("a") {
            self.advance()?;
            return Ok(vocab::rdf::TYPE.to_owned());
        }
        self.expect_iri()
    }

    // ----- terms ------------------------------------------------------------

    /// A term in subject or object position. Blank-node property lists and
    /// collections allocate fresh blank nodes and append their triples.
    pub(super) fn parse_term(
        &mut self,
        triples: &mut Vec<TriplePattern>,
        paths: &mut Vec<GraphPattern>,
    ) -> Result<Term, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Variable(name) => {
                self.advance()?;
                Ok(Term::Variable(name))
            }
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(Term::Iri(iri))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                Ok(Term::Iri(self.resolve_prefixed(&prefix, &local)?))
            }
            TokenKind::BlankNodeLabel(label) => {
                self.advance()?;
                Ok(Term::BlankNode(label))
            }
            TokenKind::String(value) => {
                self.advance()?;
                Ok(Term::Literal(self.parse_literal_suffix(value)?))
            }
            TokenKind::Integer(value) => {
                self.advance()?;
                Ok(Term::Literal(Literal::Int(value)))
            }
            TokenKind::Double(value) => {
                self.advance()?;
                Ok(Term::Literal(Literal::Double(value)))
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_signed_number(false)
            }
            TokenKind::Minus => {
                self.advance()?;
                self.parse_signed_number(true)
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("true") => {
                self.advance()?;
                Ok(Term::Literal(Literal::Boolean(true)))
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("false") => {
                self.advance()?;
                Ok(Term::Literal(Literal::Boolean(false)))
            }
            TokenKind::LBracket => {
                self.advance()?;
                let term = Term::BlankNode(self.fresh_blank_label());
                if self.eat(&TokenKind::RBracket)? {
                    return Ok(term);
                }
                self.parse_predicate_object_list(&term, triples, paths)?;
                if self.eat(&TokenKind::RBracket)? {
                    Ok(term)
                } else {
                    Err(self.error(
                        ParseErrorKind::UnclosedBracket,
                        "blank node property list is not closed",
                    ))
                }
            }
            TokenKind::LParen => {
                self.advance()?;
                self.parse_collection(triples, paths)
            }
            TokenKind::QuotedTripleOpen => {
                self.advance()?;
                self.parse_quoted_triple(triples, paths)
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("an RDF term".into()),
                format!("expected an RDF term, found {kind}"),
            )),
        }
    }

    fn parse_signed_number(&mut self, negative: bool) -> Result<Term, ParseError> {
        match self.current.kind {
            TokenKind::Integer(value) => {
                self.advance()?;
                Ok(Term::Literal(Literal::Int(if negative {
                    -value
                } else {
                    value
                })))
            }
            TokenKind::Double(value) => {
                self.advance()?;
                Ok(Term::Literal(Literal::Double(if negative {
                    -value
                } else {
                    value
                })))
            }
            ref kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a numeric literal".into()),
                format!("expected a number after the sign, found {kind}"),
            )),
        }
    }

    /// `( a b c )` desugared to an `rdf:first`/`rdf:rest` chain.
    fn parse_collection(
        &mut self,
        triples: &mut Vec<TriplePattern>,
        paths: &mut Vec<GraphPattern>,
    ) -> Result<Term, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.eat(&TokenKind::RParen)? {
                break;
            }
            if !self.can_start_triples() {
                return Err(self.error(
                    ParseErrorKind::UnclosedParen,
                    "collection is not closed",
                ));
            }
            items.push(self.parse_term(triples, paths)?);
        }

        let mut head = Term::Iri(vocab::rdf::NIL.to_owned());
        for item in items.into_iter().rev() {
            let cell = Term::BlankNode(self.fresh_blank_label());
            triples.push(TriplePattern::new(
                cell.clone(),
                Term::Iri(vocab::rdf::FIRST.to_owned()),
                item,
            ));
            triples.push(TriplePattern::new(
                cell.clone(),
                Term::Iri(vocab::rdf::REST.to_owned()),
                head,
            ));
            head = cell;
        }
        Ok(head)
    }

    /// `<< s p o >>`. The opening token has been consumed.
    fn parse_quoted_triple(
        &mut self,
        triples: &mut Vec<TriplePattern>,
        paths: &mut Vec<GraphPattern>,
    ) -> Result<Term, ParseError> {
        let subject = self.parse_term(triples, paths)?;
        let predicate = self.parse_quoted_verb()?;
        let object = self.parse_term(triples, paths)?;
        if self.eat(&TokenKind::QuotedTripleClose)? {
            Ok(Term::quoted_triple(TriplePattern::new(
                subject, predicate, object,
            )))
        } else {
            Err(self.error(
                ParseErrorKind::UnclosedQuotedTriple,
                "quoted triple is not closed",
            ))
        }
    }

    /// Inside quoted triples the verb is a plain term, never a path.
    fn parse_quoted_verb(&mut self) -> Result<Term, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Variable(name) => {
                self.advance()?;
                Ok(Term::Variable(name))
            }
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(Term::Iri(iri))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                Ok(Term::Iri(self.resolve_prefixed(&prefix, &local)?))
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("a") => {
                self.advance()?;
                Ok(Term::Iri(vocab::rdf::TYPE.to_owned()))
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a predicate".into()),
                format!("expected a predicate, found {kind}"),
            )),
        }
    }

    // ----- VALUES -----------------------------------------------------------

    pub(super) fn parse_values_block(&mut self) -> Result<ValuesBlock, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Variable(name) => {
                self.advance()?;
                let variables = vec![name];
                self.expect(
                    &TokenKind::LBrace,
                    ParseErrorKind::ExpectedToken("`{`".into()),
                )?;
                let mut rows = Vec::new();
                loop {
                    match &self.current.kind {
                        TokenKind::RBrace => {
                            self.advance()?;
                            break;
                        }
                        TokenKind::Eof => {
                            return Err(self.error(
                                ParseErrorKind::UnclosedBrace,
                                "VALUES block is not closed",
                            ));
                        }
                        _ => rows.push(vec![self.parse_data_entry()?]),
                    }
                }
                Ok(ValuesBlock { variables, rows })
            }
            TokenKind::LParen => {
                self.advance()?;
                let mut variables = Vec::new();
                loop {
                    match self.current.kind.clone() {
                        TokenKind::Variable(name) => {
                            self.advance()?;
                            variables.push(name);
                        }
                        TokenKind::RParen => {
                            self.advance()?;
                            break;
                        }
                        TokenKind::Eof => {
                            return Err(self.error(
                                ParseErrorKind::UnclosedParen,
                                "VALUES variable list is not closed",
                            ));
                        }
                        kind => {
                            return Err(self.error(
                                ParseErrorKind::ExpectedToken("a variable".into()),
                                format!("expected a variable, found {kind}"),
                            ));
                        }
                    }
                }

                self.expect(
                    &TokenKind::LBrace,
                    ParseErrorKind::ExpectedToken("`{`".into()),
                )?;
                let mut rows = Vec::new();
                loop {
                    match &self.current.kind {
                        TokenKind::RBrace => {
                            self.advance()?;
                            break;
                        }
                        TokenKind::Eof => {
                            return Err(self.error(
                                ParseErrorKind::UnclosedBrace,
                                "VALUES block is not closed",
                            ));
                        }
                        TokenKind::LParen => {
                            self.advance()?;
                            let mut row = Vec::new();
                            loop {
                                match &self.current.kind {
                                    TokenKind::RParen => {
                                        self.advance()?;
                                        break;
                                    }
                                    TokenKind::Eof => {
                                        return Err(self.error(
                                            ParseErrorKind::UnclosedParen,
                                            "VALUES row is not closed",
                                        ));
                                    }
                                    _ => row.push(self.parse_data_entry()?),
                                }
                            }
                            if row.len() != variables.len() {
                                return Err(self.error(
                                    ParseErrorKind::ExpectedToken(format!(
                                        "{} values in the row",
                                        variables.len()
                                    )),
                                    format!(
                                        "VALUES row has {} entries for {} variables",
                                        row.len(),
                                        variables.len()
                                    ),
                                ));
                            }
                            rows.push(row);
                        }
                        kind => {
                            return Err(self.error(
                                ParseErrorKind::ExpectedToken("`(`".into()),
                                format!("expected a VALUES row, found {kind}"),
                            ));
                        }
                    }
                }
                Ok(ValuesBlock { variables, rows })
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a variable or `(`".into()),
                format!("expected VALUES variables, found {kind}"),
            )),
        }
    }

    /// One data entry in a VALUES row: a ground term or `UNDEF`.
    fn parse_data_entry(&mut self) -> Result<Option<Term>, ParseError> {
        if self.at_word("UNDEF") {
            self.advance()?;
            return Ok(None);
        }
        match self.current.kind.clone() {
            TokenKind::Iri(iri) => {
                self.advance()?;
                Ok(Some(Term::Iri(iri)))
            }
            TokenKind::PrefixedName { prefix, local } => {
                self.advance()?;
                Ok(Some(Term::Iri(self.resolve_prefixed(&prefix, &local)?)))
            }
            TokenKind::String(value) => {
                self.advance()?;
                Ok(Some(Term::Literal(self.parse_literal_suffix(value)?)))
            }
            TokenKind::Integer(value) => {
                self.advance()?;
                Ok(Some(Term::Literal(Literal::Int(value))))
            }
            TokenKind::Double(value) => {
                self.advance()?;
                Ok(Some(Term::Literal(Literal::Double(value))))
            }
            TokenKind::Plus => {
                self.advance()?;
                self.parse_signed_number(false).map(Some)
            }
            TokenKind::Minus => {
                self.advance()?;
                self.parse_signed_number(true).map(Some)
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("true") => {
                self.advance()?;
                Ok(Some(Term::Literal(Literal::Boolean(true))))
            }
            TokenKind::Word(word) if word.eq_ignore_ascii_case("false") => {
                self.advance()?;
                Ok(Some(Term::Literal(Literal::Boolean(false))))
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedToken("a ground term or UNDEF".into()),
                format!("expected a data value, found {kind}"),
            )),
        }
    }

    // ----- CONSTRUCT template ----------------------------------------------

    /// `{ triples }` with plain verbs only.
    pub(super) fn parse_construct_template(
        &mut self,
    ) -> Result<Vec<TriplePattern>, ParseError> {
        self.expect(
            &TokenKind::LBrace,
            ParseErrorKind::ExpectedToken("`{`".into()),
        )?;
        let mut triples = Vec::new();
        let mut paths = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace => {
                    self.advance()?;
                    break;
                }
                TokenKind::Eof => {
                    return Err(self.error(
                        ParseErrorKind::UnclosedBrace,
                        "CONSTRUCT template is not closed",
                    ));
                }
                TokenKind::Dot => {
                    self.advance()?;
                }
                _ => self.parse_triples_same_subject(&mut triples, &mut paths)?,
            }
        }
        if !paths.is_empty() {
            return Err(self.error(
                ParseErrorKind::MalformedConstruct,
                "property paths are not allowed in a CONSTRUCT template",
            ));
        }
        Ok(triples)
    }
}
