use super::Parser;
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::TokenKind;
use crate::update::{GraphOrDefault, GraphTarget, UpdateOperation};
use omniql_model::{Quad, Term};

impl Parser<'_> {
    pub(super) fn parse_update_operation(&mut self) -> Result<UpdateOperation, ParseError> {
        if self.eat_word("LOAD")? {
            return self.parse_load();
        }
        if self.eat_word("CLEAR")? {
            let silent = self.eat_word("SILENT")?;
            let target = self.parse_graph_target()?;
            return Ok(UpdateOperation::Clear { target, silent });
        }
        if self.eat_word("CREATE")? {
            let silent = self.eat_word("SILENT")?;
            self.expect_word("GRAPH")?;
            let graph = self.expect_iri()?;
            return Ok(UpdateOperation::Create { graph, silent });
        }
        if self.eat_word("DROP")? {
            let silent = self.eat_word("SILENT")?;
            let target = self.parse_graph_target()?;
            return Ok(UpdateOperation::Drop { target, silent });
        }
        if self.eat_word("COPY")? {
            let (from, to, silent) = self.parse_graph_pair()?;
            return Ok(UpdateOperation::Copy { from, to, silent });
        }
        if self.eat_word("MOVE")? {
            let (from, to, silent) = self.parse_graph_pair()?;
            return Ok(UpdateOperation::Move { from, to, silent });
        }
        if self.eat_word("ADD")? {
            let (from, to, silent) = self.parse_graph_pair()?;
            return Ok(UpdateOperation::Add { from, to, silent });
        }

        let with = if self.eat_word("WITH")? {
            Some(self.expect_iri()?)
        } else {
            None
        };

        if self.eat_word("INSERT")? {
            if with.is_none() && self.eat_word("DATA")? {
                let quads = self.parse_quad_block()?;
                return Ok(UpdateOperation::InsertData { quads });
            }
            let insert = self.parse_quad_template()?;
            return self.parse_modify_tail(with, None, Some(insert));
        }

        if self.eat_word("DELETE")? {
            if with.is_none() && self.eat_word("DATA")? {
                let quads = self.parse_quad_block()?;
                return Ok(UpdateOperation::DeleteData { quads });
            }
            if self.at_word("WHERE") {
                self.advance()?;
                let pattern = self.parse_quad_block()?;
                return Ok(UpdateOperation::DeleteWhere { pattern });
            }
            let delete = self.parse_quad_template()?;
            let insert = if self.eat_word("INSERT")? {
                Some(self.parse_quad_template()?)
            } else {
                None
            };
            return self.parse_modify_tail(with, Some(delete), insert);
        }

        Err(self.error(
            ParseErrorKind::ExpectedToken("`INSERT` or `DELETE`".into()),
            format!("expected an update operation, found {}", self.current.kind),
        ))
    }

    fn parse_load(&mut self) -> Result<UpdateOperation, ParseError> {
        let silent = self.eat_word("SILENT")?;
        let source = self.expect_iri()?;
        let into = if self.eat_word("INTO")? {
            self.expect_word("GRAPH")?;
            Some(self.expect_iri()?)
        } else {
            None
        };
        Ok(UpdateOperation::Load {
            source,
            into,
            silent,
        })
    }

    fn parse_graph_target(&mut self) -> Result<GraphTarget, ParseError> {
        if self.eat_word("DEFAULT")? {
            return Ok(GraphTarget::Default);
        }
        if self.eat_word("NAMED")? {
            return Ok(GraphTarget::Named);
        }
        if self.eat_word("ALL")? {
            return Ok(GraphTarget::All);
        }
        if self.eat_word("GRAPH")? {
            return Ok(GraphTarget::Graph(self.expect_iri()?));
        }
        Err(self.error(
            ParseErrorKind::ExpectedIri,
            format!(
                "expected GRAPH <iri>, DEFAULT, NAMED or ALL, found {}",
                self.current.kind
            ),
        ))
    }

    fn parse_graph_pair(
        &mut self,
    ) -> Result<(GraphOrDefault, GraphOrDefault, bool), ParseError> {
        let silent = self.eat_word("SILENT")?;
        let from = self.parse_graph_or_default()?;
        self.expect_word("TO")?;
        let to = self.parse_graph_or_default()?;
        Ok((from, to, silent))
    }

    fn parse_graph_or_default(&mut self) -> Result<GraphOrDefault, ParseError> {
        if self.eat_word("DEFAULT")? {
            return Ok(GraphOrDefault::Default);
        }
        self.eat_word("GRAPH")?;
        match self.current.kind.clone() {
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } => {
                Ok(GraphOrDefault::Graph(self.expect_iri()?))
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedIri,
                format!("expected a graph IRI or DEFAULT, found {kind}"),
            )),
        }
    }

    fn parse_modify_tail(
        &mut self,
        with: Option<String>,
        delete: Option<Vec<Quad>>,
        insert: Option<Vec<Quad>>,
    ) -> Result<UpdateOperation, ParseError> {
        let mut using = Vec::new();
        while self.eat_word("USING")? {
            let named = self.eat_word("NAMED")?;
            let iri = self.expect_iri()?;
            using.push(crate::query::DatasetClause { iri, named });
        }

        if !self.eat_word("WHERE")? {
            return Err(self.error(
                ParseErrorKind::ExpectedWhere,
                format!(
                    "DELETE/INSERT templates require a WHERE clause, found {}",
                    self.current.kind
                ),
            ));
        }
        let pattern = self
            .parse_group_graph_pattern(ParseErrorKind::ExpectedToken("`{`".into()))?;

        Ok(UpdateOperation::Modify {
            with,
            delete,
            insert,
            using,
            pattern,
        })
    }

    /// `{ quads }` where quads are triples optionally wrapped in
    /// `GRAPH <g> { … }`.
    fn parse_quad_block(&mut self) -> Result<Vec<Quad>, ParseError> {
        self.expect(
            &TokenKind::LBrace,
            ParseErrorKind::ExpectedToken("`{`".into()),
        )?;

        let mut quads = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::RBrace => {
                    self.advance()?;
                    return Ok(quads);
                }
                TokenKind::Eof => {
                    return Err(self.error(
                        ParseErrorKind::UnclosedBrace,
                        "quad block is not closed",
                    ));
                }
                TokenKind::Dot => {
                    self.advance()?;
                }
                TokenKind::Word(word) if word.eq_ignore_ascii_case("GRAPH") => {
                    self.advance()?;
                    let graph = self.parse_quad_graph_name()?;
                    self.expect(
                        &TokenKind::LBrace,
                        ParseErrorKind::ExpectedToken("`{`".into()),
                    )?;
                    loop {
                        match &self.current.kind {
                            TokenKind::RBrace => {
                                self.advance()?;
                                break;
                            }
                            TokenKind::Eof => {
                                return Err(self.error(
                                    ParseErrorKind::UnclosedBrace,
                                    "GRAPH block is not closed",
                                ));
                            }
                            TokenKind::Dot => {
                                self.advance()?;
                            }
                            _ => self.parse_quads_into(&mut quads, Some(graph.clone()))?,
                        }
                    }
                }
                _ => self.parse_quads_into(&mut quads, None)?,
            }
        }
    }

    fn parse_quad_graph_name(&mut self) -> Result<Term, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Variable(name) => {
                self.advance()?;
                Ok(Term::Variable(name))
            }
            TokenKind::Iri(_) | TokenKind::PrefixedName { .. } => {
                Ok(Term::Iri(self.expect_iri()?))
            }
            kind => Err(self.error(
                ParseErrorKind::ExpectedIri,
                format!("expected a graph name, found {kind}"),
            )),
        }
    }

    /// One same-subject run converted into quads under `graph`.
    fn parse_quads_into(
        &mut self,
        quads: &mut Vec<Quad>,
        graph: Option<Term>,
    ) -> Result<(), ParseError> {
        let mut triples = Vec::new();
        let mut paths = Vec::new();
        self.parse_triples_same_subject(&mut triples, &mut paths)?;
        if !paths.is_empty() {
            return Err(self.error(
                ParseErrorKind::ExpectedToken("a predicate".into()),
                "property paths are not allowed in update templates",
            ));
        }
        quads.extend(
            triples
                .into_iter()
                .map(|triple| Quad::from_triple(triple, graph.clone())),
        );
        Ok(())
    }

    fn parse_quad_template(&mut self) -> Result<Vec<Quad>, ParseError> {
        self.parse_quad_block()
    }
}
