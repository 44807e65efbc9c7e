use pest::iterators::Pair;
use pest::Parser;

use crate::ast::errors::*;
use crate::ast::*;

#[derive(pest_derive::Parser)]
#[grammar = "ast/grammar.pest"]
pub struct PseudoParser;

/// Keyword tokens are atomic (and therefore visible) pairs; the builders
/// skip them when reading a rule's children positionally.
fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_procedure
            | Rule::kw_begin
            | Rule::kw_end
            | Rule::kw_endif
            | Rule::kw_for
            | Rule::kw_to
            | Rule::kw_step
            | Rule::kw_do
            | Rule::kw_while
            | Rule::kw_repeat
            | Rule::kw_until
            | Rule::kw_if
            | Rule::kw_then
            | Rule::kw_else
            | Rule::kw_call
            | Rule::kw_return
    )
}

/// Builds the arena-based AST from parsed pest pairs.
struct AstBuilder {
    program: Program,
}

impl AstBuilder {
    fn new() -> Self {
        Self {
            program: Program::new(),
        }
    }

    fn build_program(mut self, pair: Pair<Rule>) -> Results<Program> {
        let mut errors = Vec::new();

        for item in pair.into_inner() {
            if item.as_rule() == Rule::procedure_declaration {
                if let Err(mut errs) = self.build_procedure(item) {
                    errors.append(&mut errs);
                }
            }
        }

        if self.program.root_procedures.is_empty() && errors.is_empty() {
            errors.push(SpannedError {
                error: AnalyzeError::NoProcedures,
                span: None,
            });
        }

        if errors.is_empty() {
            Ok(self.program)
        } else {
            Err(errors)
        }
    }

    fn build_procedure(&mut self, pair: Pair<Rule>) -> Results<()> {
        let span = Span::from_pest(pair.as_span());
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));

        let name_pair = inner.next().unwrap();
        let name = name_pair.as_str().to_string();

        if self.program.procedure_map.contains_key(&name) {
            return Err(vec![SpannedError {
                error: AnalyzeError::DuplicateProcedure(name),
                span: Some(span),
            }]);
        }

        let mut parameter_ids = Vec::new();
        let mut body = Vec::new();

        for item in inner {
            match item.as_rule() {
                Rule::parameter_list => {
                    for param_pair in item.into_inner() {
                        let param_span = Span::from_pest(param_pair.as_span());
                        let param = ParameterDecl {
                            name: param_pair.as_str().to_string(),
                            span: param_span,
                        };
                        parameter_ids.push(self.program.parameters.alloc(param));
                    }
                }
                Rule::block => {
                    body = self.build_statements(item)?;
                }
                _ => {}
            }
        }

        let procedure = Procedure {
            name: name.clone(),
            parameters: parameter_ids,
            body,
            span,
        };
        let id = self.program.procedures.alloc(procedure);
        self.program.procedure_map.insert(name, id);
        self.program.root_procedures.push(id);
        Ok(())
    }

    /// Collects the `statement` children of a block-like pair.
    fn build_statements(&mut self, pair: Pair<Rule>) -> Results<Vec<StatementId>> {
        let mut ids = Vec::new();
        for item in pair.into_inner() {
            if item.as_rule() == Rule::statement {
                ids.push(self.build_statement(item)?);
            }
        }
        Ok(ids)
    }

    fn build_statement(&mut self, pair: Pair<Rule>) -> Result<StatementId, Vec<SpannedError>> {
        let span = Span::from_pest(pair.as_span());
        let inner = pair.into_inner().next().unwrap();

        let kind = match inner.as_rule() {
            Rule::assignment_statement => StatementKind::Assign(self.build_assignment(inner)?),
            Rule::for_statement => StatementKind::For(self.build_for(inner)?),
            Rule::while_statement => StatementKind::While(self.build_while(inner)?),
            Rule::repeat_statement => StatementKind::Repeat(self.build_repeat(inner)?),
            Rule::if_statement => StatementKind::If(self.build_if(inner)?),
            Rule::call_statement => StatementKind::Call(self.build_call(inner)?),
            Rule::return_statement => StatementKind::Return(self.build_return(inner)?),
            Rule::empty_statement => StatementKind::Empty,
            _ => {
                return Err(vec![SpannedError {
                    error: AnalyzeError::Syntax(format!(
                        "unknown statement: {:?}",
                        inner.as_rule()
                    )),
                    span: Some(span),
                }]);
            }
        };

        Ok(self.program.statements.alloc(Spanned { node: kind, span }))
    }

    fn build_assignment(&mut self, pair: Pair<Rule>) -> Result<AssignStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner();
        let target = self.build_lvalue(inner.next().unwrap())?;
        let value = self.build_expression(inner.next().unwrap())?;
        Ok(AssignStatement { target, value })
    }

    fn build_lvalue(&mut self, pair: Pair<Rule>) -> Result<LValue, Vec<SpannedError>> {
        let mut inner = pair.into_inner();
        let name = inner.next().unwrap().as_str().to_string();
        let mut indexes = Vec::new();
        for index_pair in inner {
            let expr_pair = index_pair.into_inner().next().unwrap();
            indexes.push(self.build_expression(expr_pair)?);
        }
        Ok(LValue { name, indexes })
    }

    fn build_for(&mut self, pair: Pair<Rule>) -> Result<ForStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));
        let var = inner.next().unwrap().as_str().to_string();
        let start = self.build_expression(inner.next().unwrap())?;
        let end = self.build_expression(inner.next().unwrap())?;

        let mut step = None;
        let mut body = Vec::new();
        for item in inner {
            match item.as_rule() {
                // A third expression can only be the STEP clause.
                Rule::expression => step = Some(self.build_expression(item)?),
                Rule::statement => body.push(self.build_statement(item)?),
                _ => {}
            }
        }

        Ok(ForStatement {
            var,
            start,
            end,
            step,
            body,
        })
    }

    fn build_while(&mut self, pair: Pair<Rule>) -> Result<WhileStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));
        let condition = self.build_expression(inner.next().unwrap())?;
        let mut body = Vec::new();
        for item in inner {
            if item.as_rule() == Rule::statement {
                body.push(self.build_statement(item)?);
            }
        }
        Ok(WhileStatement { condition, body })
    }

    fn build_repeat(&mut self, pair: Pair<Rule>) -> Result<RepeatStatement, Vec<SpannedError>> {
        let mut body = Vec::new();
        let mut condition = None;
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::statement => body.push(self.build_statement(item)?),
                Rule::expression => condition = Some(self.build_expression(item)?),
                _ => {}
            }
        }
        let condition = condition.ok_or_else(|| {
            vec![SpannedError {
                error: AnalyzeError::Syntax("REPEAT without UNTIL condition".into()),
                span: None,
            }]
        })?;
        Ok(RepeatStatement { body, condition })
    }

    fn build_if(&mut self, pair: Pair<Rule>) -> Result<IfStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));
        let condition = self.build_expression(inner.next().unwrap())?;

        let mut then_branch = Vec::new();
        let mut else_branch = None;
        for item in inner {
            match item.as_rule() {
                Rule::statement => then_branch.push(self.build_statement(item)?),
                Rule::else_clause => {
                    let mut stmts = Vec::new();
                    for else_item in item.into_inner() {
                        if else_item.as_rule() == Rule::statement {
                            stmts.push(self.build_statement(else_item)?);
                        }
                    }
                    else_branch = Some(stmts);
                }
                _ => {}
            }
        }

        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn build_call(&mut self, pair: Pair<Rule>) -> Result<CallStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));
        let name = inner.next().unwrap().as_str().to_string();
        let args = match inner.next() {
            Some(list) => self.build_argument_list(list)?,
            None => Vec::new(),
        };
        Ok(CallStatement { name, args })
    }

    fn build_return(&mut self, pair: Pair<Rule>) -> Result<ReturnStatement, Vec<SpannedError>> {
        let mut inner = pair.into_inner().filter(|p| !is_keyword(p.as_rule()));
        let value = match inner.next() {
            Some(expr_pair) => Some(self.build_expression(expr_pair)?),
            None => None,
        };
        Ok(ReturnStatement { value })
    }

    fn build_argument_list(
        &mut self,
        pair: Pair<Rule>,
    ) -> Result<Vec<ExpressionId>, Vec<SpannedError>> {
        let mut args = Vec::new();
        for item in pair.into_inner() {
            args.push(self.build_expression(item)?);
        }
        Ok(args)
    }

    fn build_expression(&mut self, pair: Pair<Rule>) -> Result<ExpressionId, Vec<SpannedError>> {
        let span = Span::from_pest(pair.as_span());

        let kind = match pair.as_rule() {
            Rule::expression => {
                let inner = pair.into_inner().next().unwrap();
                return self.build_expression(inner);
            }
            Rule::logic_or => return self.build_binary_chain(pair),
            Rule::logic_and => return self.build_binary_chain(pair),
            Rule::comparison => return self.build_binary_chain(pair),
            Rule::addition => return self.build_binary_chain(pair),
            Rule::multiplication => return self.build_binary_chain(pair),
            Rule::unary => return self.build_unary(pair),
            Rule::primary => {
                let inner = pair.into_inner().next().unwrap();
                return self.build_expression(inner);
            }
            Rule::call_expr => {
                let mut inner = pair.into_inner();
                let name = inner.next().unwrap().as_str().to_string();
                let args = match inner.next() {
                    Some(list) => self.build_argument_list(list)?,
                    None => Vec::new(),
                };
                ExpressionKind::Call { name, args }
            }
            Rule::array_access => {
                let mut inner = pair.into_inner();
                let array = inner.next().unwrap().as_str().to_string();
                let mut indexes = Vec::new();
                for index_pair in inner {
                    let expr_pair = index_pair.into_inner().next().unwrap();
                    indexes.push(self.build_expression(expr_pair)?);
                }
                ExpressionKind::ArrayAccess { array, indexes }
            }
            Rule::identifier => ExpressionKind::Ident(pair.as_str().to_string()),
            Rule::number => {
                let value = pair.as_str().parse().map_err(|_| {
                    vec![SpannedError {
                        error: AnalyzeError::Syntax(format!("invalid number: {}", pair.as_str())),
                        span: Some(span.clone()),
                    }]
                })?;
                ExpressionKind::Number(value)
            }
            _ => {
                return Err(vec![SpannedError {
                    error: AnalyzeError::Syntax(format!(
                        "unknown expression rule: {:?}",
                        pair.as_rule()
                    )),
                    span: Some(span),
                }]);
            }
        };

        Ok(self.program.expressions.alloc(Spanned { node: kind, span }))
    }

    /// Left-folds `operand (op operand)*` chains into binary nodes.
    fn build_binary_chain(&mut self, pair: Pair<Rule>) -> Result<ExpressionId, Vec<SpannedError>> {
        let span = Span::from_pest(pair.as_span());
        let mut inner = pair.into_inner();
        let mut left = self.build_expression(inner.next().unwrap())?;

        while let Some(op_pair) = inner.next() {
            let right = self.build_expression(inner.next().unwrap())?;
            let op = parse_binary_op(op_pair.as_str()).ok_or_else(|| {
                vec![SpannedError {
                    error: AnalyzeError::Syntax(format!("unknown operator: {}", op_pair.as_str())),
                    span: Some(span.clone()),
                }]
            })?;
            let expr = Spanned {
                node: ExpressionKind::BinaryOp { left, op, right },
                span: span.clone(),
            };
            left = self.program.expressions.alloc(expr);
        }

        Ok(left)
    }

    fn build_unary(&mut self, pair: Pair<Rule>) -> Result<ExpressionId, Vec<SpannedError>> {
        let span = Span::from_pest(pair.as_span());
        let mut inner = pair.into_inner();
        let first = inner.next().unwrap();

        if first.as_rule() == Rule::unary_op {
            let op = match first.as_str() {
                "-" => UnaryOp::Neg,
                _ => UnaryOp::Not,
            };
            let operand = self.build_expression(inner.next().unwrap())?;
            let expr = Spanned {
                node: ExpressionKind::UnaryOp { op, expr: operand },
                span,
            };
            Ok(self.program.expressions.alloc(expr))
        } else {
            self.build_expression(first)
        }
    }
}

fn parse_binary_op(s: &str) -> Option<BinaryOp> {
    let op = match s {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "=" => BinaryOp::Eq,
        "!=" | "<>" | "≠" => BinaryOp::Neq,
        "<" => BinaryOp::Lt,
        "<=" => BinaryOp::Lte,
        ">" => BinaryOp::Gt,
        ">=" => BinaryOp::Gte,
        "||" => BinaryOp::Or,
        "&&" => BinaryOp::And,
        _ => match s.to_ascii_lowercase().as_str() {
            "mod" => BinaryOp::Mod,
            "and" => BinaryOp::And,
            "or" => BinaryOp::Or,
            _ => return None,
        },
    };
    Some(op)
}

/// Parses (after normalization) and builds the arena AST. Procedure names are
/// collected into `procedure_map` here; call resolution happens in a later
/// pass so forward references between procedures are fine.
pub fn parse_program(source: &str) -> Results<Program> {
    let normalized = normalize_source(source);

    let pairs = PseudoParser::parse(Rule::program, &normalized).map_err(|e| {
        let (line, column) = match e.line_col {
            pest::error::LineColLocation::Pos((l, c)) => (l, c),
            pest::error::LineColLocation::Span((l, c), _) => (l, c),
        };
        vec![SpannedError {
            error: AnalyzeError::Syntax(format!(
                "at line {}, column {}: {}",
                line,
                column,
                e.variant.message()
            )),
            span: None,
        }]
    })?;

    let program_pair = pairs.into_iter().next().ok_or_else(|| {
        vec![SpannedError {
            error: AnalyzeError::NoProcedures,
            span: None,
        }]
    })?;

    AstBuilder::new().build_program(program_pair)
}
