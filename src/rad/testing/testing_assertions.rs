//! Fluent assertion API for AST nodes

use super::testing_matchers::TextMatch;
use crate::rad::ast::{
    Argument, AssignOp, AstNode, Block, ClauseBody, DomainBlock, DomainItem, ElifClause,
    Expression, ExpressionKind, Fixity, FieldModifier, MapKey, Modifier, Parameter,
    SortDirection, SourceFile, Statement, StatementKind, StringLiteral, StringPart,
    SubscriptIndex, SwitchClause, UnaryOp, BinaryOp, QuoteKind,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parsed source file
pub fn assert_ast(file: &SourceFile) -> SourceFileAssertion<'_> {
    SourceFileAssertion { file }
}

/// Create an assertion builder for a single expression
pub fn assert_expression(expression: &Expression) -> ExpressionAssertion<'_> {
    ExpressionAssertion {
        expression,
        context: "expression".to_string(),
    }
}

// ============================================================================
// Source File and Block Assertions
// ============================================================================

pub struct SourceFileAssertion<'a> {
    file: &'a SourceFile,
}

impl<'a> SourceFileAssertion<'a> {
    /// Assert the number of top-level statements
    pub fn statement_count(self, expected: usize) -> Self {
        assert_statement_count(&self.file.statements, expected, "file");
        self
    }

    /// Assert on a top-level statement by index
    pub fn statement<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        assertion(statement_at(&self.file.statements, index, "statements"));
        self
    }
}

pub struct BlockAssertion<'a> {
    block: &'a Block,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn statement_count(self, expected: usize) -> Self {
        assert_statement_count(&self.block.statements, expected, &self.context);
        self
    }

    pub fn statement<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        let context = format!("{}.statements", self.context);
        assertion(statement_at(&self.block.statements, index, &context));
        self
    }
}

fn assert_statement_count(statements: &[Statement], expected: usize, context: &str) {
    let actual = statements.len();
    assert_eq!(
        actual,
        expected,
        "{}: Expected {} statements, found {}: [{}]",
        context,
        expected,
        actual,
        summarize_statements(statements)
    );
}

fn statement_at<'a>(statements: &'a [Statement], index: usize, context: &str) -> StatementAssertion<'a> {
    assert!(
        index < statements.len(),
        "{}: statement index {} out of bounds ({} statements)",
        context,
        index,
        statements.len()
    );
    StatementAssertion {
        statement: &statements[index],
        context: format!("{context}[{index}]"),
    }
}

fn block<'a>(block: &'a Block, context: String) -> BlockAssertion<'a> {
    BlockAssertion { block, context }
}

// ============================================================================
// Statement Assertions
// ============================================================================

pub struct StatementAssertion<'a> {
    statement: &'a Statement,
    context: String,
}

impl<'a> StatementAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.statement.node_type()
        )
    }

    fn child_context(&self, field: &str) -> String {
        format!("{}.{}", self.context, field)
    }

    /// Assert the statement kind by name (`"If"`, `"Pass"`, ...)
    pub fn node_type(self, expected: &str) -> Self {
        assert_eq!(
            self.statement.node_type(),
            expected,
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.statement.node_type()
        );
        self
    }

    /// Assert where the statement starts (1-based line and column)
    pub fn starts_at(self, line: usize, column: usize) -> Self {
        let start = self.statement.span.start;
        assert_eq!(
            (start.line, start.column),
            (line, column),
            "{}: Expected statement to start at {}:{}, but it starts at {}",
            self.context,
            line,
            column,
            start
        );
        self
    }

    pub fn assert_assignment(self) -> AssignmentAssertion<'a> {
        match &self.statement.kind {
            StatementKind::Assignment(assignment) => AssignmentAssertion {
                target: &assignment.target,
                operator: assignment.operator,
                value: &assignment.value,
                catch: assignment.catch.as_ref(),
                context: self.context,
            },
            _ => self.mismatch("Assignment"),
        }
    }

    pub fn assert_expression_statement(self) -> ExpressionStatementAssertion<'a> {
        match &self.statement.kind {
            StatementKind::Expression(statement) => ExpressionStatementAssertion {
                expression: &statement.expression,
                catch: statement.catch.as_ref(),
                context: self.context,
            },
            _ => self.mismatch("ExpressionStatement"),
        }
    }

    /// Assert on the value of a `return`; fails for a bare `return`
    pub fn return_value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match &self.statement.kind {
            StatementKind::Return(Some(value)) => {
                assertion(expression(value, self.child_context("value")))
            }
            StatementKind::Return(None) => {
                panic!("{}: Expected a return value, found bare return", self.context)
            }
            _ => self.mismatch("Return"),
        }
        self
    }

    /// Assert the number of values of a `yield`
    pub fn yield_count(self, expected: usize) -> Self {
        match &self.statement.kind {
            StatementKind::Yield(values) => assert_eq!(
                values.len(),
                expected,
                "{}: Expected {} yielded values, found {}",
                self.context,
                expected,
                values.len()
            ),
            _ => self.mismatch("Yield"),
        }
        self
    }

    /// Assert on the target of a `del`
    pub fn delete_target<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match &self.statement.kind {
            StatementKind::Delete(target) => {
                assertion(expression(target, self.child_context("target")))
            }
            _ => self.mismatch("Delete"),
        }
        self
    }

    pub fn assert_if(self) -> IfAssertion<'a> {
        match &self.statement.kind {
            StatementKind::If(statement) => IfAssertion {
                condition: &statement.condition,
                body: &statement.body,
                elif_clauses: &statement.elif_clauses,
                else_body: statement.else_body.as_ref(),
                context: self.context,
            },
            _ => self.mismatch("If"),
        }
    }

    pub fn assert_for(self) -> ForAssertion<'a> {
        match &self.statement.kind {
            StatementKind::For(statement) => ForAssertion {
                pattern: statement.pattern.to_string(),
                iterable: &statement.iterable,
                body: &statement.body,
                context: self.context,
            },
            _ => self.mismatch("For"),
        }
    }

    pub fn assert_while(self) -> WhileAssertion<'a> {
        match &self.statement.kind {
            StatementKind::While(statement) => WhileAssertion {
                condition: &statement.condition,
                body: &statement.body,
                context: self.context,
            },
            _ => self.mismatch("While"),
        }
    }

    pub fn assert_function(self) -> FunctionAssertion<'a> {
        match &self.statement.kind {
            StatementKind::FunctionDefinition(definition) => FunctionAssertion {
                name: &definition.name,
                parameters: ParametersAssertion {
                    parameters: &definition.parameters,
                    context: format!("{}.parameters", self.context),
                },
                return_type: definition.return_type.as_ref().map(ToString::to_string),
                body: &definition.body,
                context: self.context,
            },
            _ => self.mismatch("FunctionDefinition"),
        }
    }

    pub fn assert_args_block(self) -> ParametersAssertion<'a> {
        match &self.statement.kind {
            StatementKind::ArgsBlock(parameters) => ParametersAssertion {
                parameters,
                context: self.context,
            },
            _ => self.mismatch("ArgsBlock"),
        }
    }

    pub fn assert_switch(self) -> SwitchAssertion<'a> {
        match &self.statement.kind {
            StatementKind::Switch(statement) => SwitchAssertion {
                subject: &statement.subject,
                clauses: &statement.clauses,
                context: self.context,
            },
            _ => self.mismatch("Switch"),
        }
    }

    /// Assert this is a `defer` block and return assertions on its body
    pub fn assert_defer(self) -> BlockAssertion<'a> {
        match &self.statement.kind {
            StatementKind::Defer(body) => block(body, self.child_context("body")),
            _ => self.mismatch("Defer"),
        }
    }

    /// Assert this is an `errdefer` block and return assertions on its body
    pub fn assert_errdefer(self) -> BlockAssertion<'a> {
        match &self.statement.kind {
            StatementKind::ErrorDefer(body) => block(body, self.child_context("body")),
            _ => self.mismatch("ErrorDefer"),
        }
    }

    /// Assert this is a `rad`, `request` or `display` block; check which one
    /// with [`StatementAssertion::node_type`]
    pub fn assert_domain_block(self) -> DomainBlockAssertion<'a> {
        match &self.statement.kind {
            StatementKind::RadBlock(domain)
            | StatementKind::RequestBlock(domain)
            | StatementKind::DisplayBlock(domain) => DomainBlockAssertion {
                domain,
                context: self.context,
            },
            _ => self.mismatch("RadBlock, RequestBlock or DisplayBlock"),
        }
    }
}

// ============================================================================
// Simple Statement Assertions
// ============================================================================

pub struct AssignmentAssertion<'a> {
    target: &'a Expression,
    operator: AssignOp,
    value: &'a Expression,
    catch: Option<&'a Block>,
    context: String,
}

impl<'a> AssignmentAssertion<'a> {
    pub fn target<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(self.target, format!("{}.target", self.context)));
        self
    }

    pub fn operator(self, expected: AssignOp) -> Self {
        assert_eq!(
            self.operator, expected,
            "{}: Expected operator {}, found {}",
            self.context, expected, self.operator
        );
        self
    }

    pub fn value<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(self.value, format!("{}.value", self.context)));
        self
    }

    pub fn no_catch(self) -> Self {
        assert!(
            self.catch.is_none(),
            "{}: Expected no catch block",
            self.context
        );
        self
    }

    pub fn catch<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let catch = self
            .catch
            .unwrap_or_else(|| panic!("{}: Expected a catch block", self.context));
        assertion(block(catch, format!("{}.catch", self.context)));
        self
    }
}

pub struct ExpressionStatementAssertion<'a> {
    expression: &'a Expression,
    catch: Option<&'a Block>,
    context: String,
}

impl<'a> ExpressionStatementAssertion<'a> {
    pub fn expression<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(
            self.expression,
            format!("{}.expression", self.context),
        ));
        self
    }

    pub fn no_catch(self) -> Self {
        assert!(
            self.catch.is_none(),
            "{}: Expected no catch block",
            self.context
        );
        self
    }

    pub fn catch<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let catch = self
            .catch
            .unwrap_or_else(|| panic!("{}: Expected a catch block", self.context));
        assertion(block(catch, format!("{}.catch", self.context)));
        self
    }
}

// ============================================================================
// Compound Statement Assertions
// ============================================================================

pub struct IfAssertion<'a> {
    condition: &'a Expression,
    body: &'a Block,
    elif_clauses: &'a [ElifClause],
    else_body: Option<&'a Block>,
    context: String,
}

impl<'a> IfAssertion<'a> {
    pub fn condition<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(
            self.condition,
            format!("{}.condition", self.context),
        ));
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assertion(block(self.body, format!("{}.body", self.context)));
        self
    }

    pub fn elif_count(self, expected: usize) -> Self {
        assert_eq!(
            self.elif_clauses.len(),
            expected,
            "{}: Expected {} else-if clauses, found {}",
            self.context,
            expected,
            self.elif_clauses.len()
        );
        self
    }

    /// Assert on an `else if` clause's condition and body
    pub fn elif<C, B>(self, index: usize, condition: C, body: B) -> Self
    where
        C: FnOnce(ExpressionAssertion<'a>),
        B: FnOnce(BlockAssertion<'a>),
    {
        assert!(
            index < self.elif_clauses.len(),
            "{}: else-if index {} out of bounds ({} clauses)",
            self.context,
            index,
            self.elif_clauses.len()
        );
        let clause = &self.elif_clauses[index];
        let context = format!("{}.elif[{}]", self.context, index);
        condition(expression(&clause.condition, format!("{context}.condition")));
        body(block(&clause.body, format!("{context}.body")));
        self
    }

    pub fn no_else(self) -> Self {
        assert!(
            self.else_body.is_none(),
            "{}: Expected no else clause",
            self.context
        );
        self
    }

    pub fn else_body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let else_body = self
            .else_body
            .unwrap_or_else(|| panic!("{}: Expected an else clause", self.context));
        assertion(block(else_body, format!("{}.else", self.context)));
        self
    }
}

pub struct ForAssertion<'a> {
    pattern: String,
    iterable: &'a Expression,
    body: &'a Block,
    context: String,
}

impl<'a> ForAssertion<'a> {
    /// Assert the loop pattern as written, e.g. `"k, v"`
    pub fn pattern(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.pattern, &self.context);
        self
    }

    pub fn iterable<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(
            self.iterable,
            format!("{}.iterable", self.context),
        ));
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assertion(block(self.body, format!("{}.body", self.context)));
        self
    }
}

pub struct WhileAssertion<'a> {
    condition: &'a Expression,
    body: &'a Block,
    context: String,
}

impl<'a> WhileAssertion<'a> {
    pub fn condition<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(
            self.condition,
            format!("{}.condition", self.context),
        ));
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assertion(block(self.body, format!("{}.body", self.context)));
        self
    }
}

pub struct FunctionAssertion<'a> {
    name: &'a str,
    parameters: ParametersAssertion<'a>,
    return_type: Option<String>,
    body: &'a Block,
    context: String,
}

impl<'a> FunctionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(self.name, &self.context);
        self
    }

    pub fn parameters<F>(self, assertion: F) -> Self
    where
        F: FnOnce(&ParametersAssertion<'a>),
    {
        assertion(&self.parameters);
        self
    }

    /// Assert the declared return type as written, e.g. `Some("int?")`
    pub fn return_type(self, expected: Option<&str>) -> Self {
        assert_eq!(
            self.return_type.as_deref(),
            expected,
            "{}: Expected return type {:?}, found {:?}",
            self.context,
            expected,
            self.return_type
        );
        self
    }

    pub fn body<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        assertion(block(self.body, format!("{}.body", self.context)));
        self
    }
}

/// Assertions over a parameter list or the declarations of an `args` block
pub struct ParametersAssertion<'a> {
    parameters: &'a [Parameter],
    context: String,
}

impl<'a> ParametersAssertion<'a> {
    pub fn count(&self, expected: usize) -> &Self {
        let names: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            self.parameters.len(),
            expected,
            "{}: Expected {} parameters, found {}: [{}]",
            self.context,
            expected,
            self.parameters.len(),
            names.join(", ")
        );
        self
    }

    pub fn parameter<F>(&self, index: usize, assertion: F) -> &Self
    where
        F: FnOnce(ParameterAssertion<'a>),
    {
        assert!(
            index < self.parameters.len(),
            "{}: parameter index {} out of bounds ({} parameters)",
            self.context,
            index,
            self.parameters.len()
        );
        assertion(ParameterAssertion {
            parameter: &self.parameters[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }
}

pub struct ParameterAssertion<'a> {
    parameter: &'a Parameter,
    context: String,
}

impl<'a> ParameterAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.parameter.name, &self.context);
        self
    }

    /// Assert the type annotation as written, e.g. `Some("str|int")`
    pub fn type_annotation(self, expected: Option<&str>) -> Self {
        let actual = self.parameter.ty.as_ref().map(ToString::to_string);
        assert_eq!(
            actual.as_deref(),
            expected,
            "{}: Expected type {:?}, found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn no_default(self) -> Self {
        assert!(
            self.parameter.default.is_none(),
            "{}: Expected no default value",
            self.context
        );
        self
    }

    pub fn default<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let default = self
            .parameter
            .default
            .as_ref()
            .unwrap_or_else(|| panic!("{}: Expected a default value", self.context));
        assertion(expression(default, format!("{}.default", self.context)));
        self
    }
}

pub struct SwitchAssertion<'a> {
    subject: &'a Expression,
    clauses: &'a [SwitchClause],
    context: String,
}

impl<'a> SwitchAssertion<'a> {
    pub fn subject<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(expression(self.subject, format!("{}.subject", self.context)));
        self
    }

    pub fn clause_count(self, expected: usize) -> Self {
        assert_eq!(
            self.clauses.len(),
            expected,
            "{}: Expected {} clauses, found {}",
            self.context,
            expected,
            self.clauses.len()
        );
        self
    }

    pub fn clause<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SwitchClauseAssertion<'a>),
    {
        assert!(
            index < self.clauses.len(),
            "{}: clause index {} out of bounds ({} clauses)",
            self.context,
            index,
            self.clauses.len()
        );
        assertion(SwitchClauseAssertion {
            clause: &self.clauses[index],
            context: format!("{}.clauses[{}]", self.context, index),
        });
        self
    }
}

pub struct SwitchClauseAssertion<'a> {
    clause: &'a SwitchClause,
    context: String,
}

impl<'a> SwitchClauseAssertion<'a> {
    pub fn is_default(self) -> Self {
        assert!(
            self.clause.is_default(),
            "{}: Expected a default clause",
            self.context
        );
        self
    }

    pub fn pattern<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let pattern = self
            .clause
            .pattern
            .as_ref()
            .unwrap_or_else(|| panic!("{}: Expected a case clause, found default", self.context));
        assertion(expression(pattern, format!("{}.pattern", self.context)));
        self
    }

    /// Assert an arrow body `-> a, b` with this many values
    pub fn arrow_count(self, expected: usize) -> Self {
        match &self.clause.body {
            ClauseBody::Arrow(values) => assert_eq!(
                values.len(),
                expected,
                "{}: Expected {} arrow values, found {}",
                self.context,
                expected,
                values.len()
            ),
            ClauseBody::Block(_) => {
                panic!("{}: Expected an arrow body, found a block", self.context)
            }
        }
        self
    }

    pub fn arrow_value<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match &self.clause.body {
            ClauseBody::Arrow(values) => {
                let value = values.get(index).unwrap_or_else(|| {
                    panic!("{}: arrow value index {} out of bounds", self.context, index)
                });
                assertion(expression(value, format!("{}.arrow[{}]", self.context, index)));
            }
            ClauseBody::Block(_) => {
                panic!("{}: Expected an arrow body, found a block", self.context)
            }
        }
        self
    }

    pub fn block<F>(self, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        match &self.clause.body {
            ClauseBody::Block(body) => assertion(block(body, format!("{}.body", self.context))),
            ClauseBody::Arrow(_) => {
                panic!("{}: Expected a block body, found an arrow", self.context)
            }
        }
        self
    }
}

// ============================================================================
// Domain Block Assertions
// ============================================================================

pub struct DomainBlockAssertion<'a> {
    domain: &'a DomainBlock,
    context: String,
}

impl<'a> DomainBlockAssertion<'a> {
    pub fn source<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let source = self
            .domain
            .source
            .as_ref()
            .unwrap_or_else(|| panic!("{}: Expected a source expression", self.context));
        assertion(expression(source, format!("{}.source", self.context)));
        self
    }

    pub fn no_source(self) -> Self {
        assert!(
            self.domain.source.is_none(),
            "{}: Expected no source expression",
            self.context
        );
        self
    }

    /// Assert the fields selected by all `fields` clauses, in order
    pub fn fields(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.domain.fields(),
            expected,
            "{}: Expected fields {:?}",
            self.context,
            expected
        );
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        let summary: Vec<&str> = self.domain.body.iter().map(AstNode::node_type).collect();
        assert_eq!(
            self.domain.body.len(),
            expected,
            "{}: Expected {} items, found {}: [{}]",
            self.context,
            expected,
            self.domain.body.len(),
            summary.join(", ")
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(DomainItemAssertion<'a>),
    {
        assert!(
            index < self.domain.body.len(),
            "{}: item index {} out of bounds ({} items)",
            self.context,
            index,
            self.domain.body.len()
        );
        assertion(DomainItemAssertion {
            item: &self.domain.body[index],
            context: format!("{}.body[{}]", self.context, index),
        });
        self
    }
}

pub struct DomainItemAssertion<'a> {
    item: &'a DomainItem,
    context: String,
}

impl<'a> DomainItemAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.item.node_type()
        )
    }

    pub fn fields(self, expected: &[&str]) -> Self {
        match self.item {
            DomainItem::Fields(names) => assert_eq!(
                names, expected,
                "{}: Expected fields {:?}",
                self.context, expected
            ),
            _ => self.mismatch("Fields"),
        }
        self
    }

    pub fn sort(self, field: Option<&str>, direction: Option<SortDirection>) -> Self {
        match self.item {
            DomainItem::Sort(sort) => {
                assert_eq!(
                    sort.field.as_deref(),
                    field,
                    "{}: Unexpected sort field",
                    self.context
                );
                assert_eq!(
                    sort.direction, direction,
                    "{}: Unexpected sort direction",
                    self.context
                );
            }
            _ => self.mismatch("Sort"),
        }
        self
    }

    pub fn assert_modifier(self) -> FieldModifierAssertion<'a> {
        match self.item {
            DomainItem::Modifier(modifier) => FieldModifierAssertion {
                modifier,
                context: self.context,
            },
            _ => self.mismatch("FieldModifier"),
        }
    }

    pub fn statement<F>(self, assertion: F) -> Self
    where
        F: FnOnce(StatementAssertion<'a>),
    {
        match self.item {
            DomainItem::Statement(statement) => assertion(StatementAssertion {
                statement,
                context: self.context.clone(),
            }),
            _ => self.mismatch("Statement"),
        }
        self
    }
}

pub struct FieldModifierAssertion<'a> {
    modifier: &'a FieldModifier,
    context: String,
}

impl<'a> FieldModifierAssertion<'a> {
    pub fn fields(self, expected: &[&str]) -> Self {
        assert_eq!(
            self.modifier.fields, expected,
            "{}: Expected modifier fields {:?}",
            self.context, expected
        );
        self
    }

    pub fn modifier_count(self, expected: usize) -> Self {
        assert_eq!(
            self.modifier.modifiers.len(),
            expected,
            "{}: Expected {} modifiers, found {}",
            self.context,
            expected,
            self.modifier.modifiers.len()
        );
        self
    }

    fn modifier_at(&self, index: usize) -> &'a Modifier {
        self.modifier
            .modifiers
            .get(index)
            .unwrap_or_else(|| panic!("{}: modifier index {} out of bounds", self.context, index))
    }

    pub fn filter<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.modifier_at(index) {
            Modifier::Filter(value) => {
                assertion(expression(value, format!("{}.filter", self.context)))
            }
            other => panic!("{}: Expected filter, found {:?}", self.context, other),
        }
        self
    }

    pub fn map<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.modifier_at(index) {
            Modifier::Map(value) => assertion(expression(value, format!("{}.map", self.context))),
            other => panic!("{}: Expected map, found {:?}", self.context, other),
        }
        self
    }

    /// Assert a `color` modifier; `condition` is checked only when present
    pub fn color<F, C>(self, index: usize, color: F, condition: Option<C>) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
        C: FnOnce(ExpressionAssertion<'a>),
    {
        match self.modifier_at(index) {
            Modifier::Color(value, actual_condition) => {
                color(expression(value, format!("{}.color", self.context)));
                match (condition, actual_condition) {
                    (Some(assertion), Some(actual)) => assertion(expression(
                        actual,
                        format!("{}.color_condition", self.context),
                    )),
                    (None, None) => {}
                    (Some(_), None) => {
                        panic!("{}: Expected a color condition", self.context)
                    }
                    (None, Some(_)) => {
                        panic!("{}: Expected no color condition", self.context)
                    }
                }
            }
            other => panic!("{}: Expected color, found {:?}", self.context, other),
        }
        self
    }
}

// ============================================================================
// Expression Assertions
// ============================================================================

fn expression(expression: &Expression, context: String) -> ExpressionAssertion<'_> {
    ExpressionAssertion {
        expression,
        context,
    }
}

pub struct ExpressionAssertion<'a> {
    expression: &'a Expression,
    context: String,
}

impl<'a> ExpressionAssertion<'a> {
    fn mismatch(&self, expected: &str) -> ! {
        panic!(
            "{}: Expected {}, found {} {}",
            self.context,
            expected,
            self.expression.node_type(),
            self.expression.display_label()
        )
    }

    fn child(&self, expression: &'a Expression, field: &str) -> ExpressionAssertion<'a> {
        ExpressionAssertion {
            expression,
            context: format!("{}.{}", self.context, field),
        }
    }

    /// Assert the expression kind by name (`"Binary"`, `"Call"`, ...)
    pub fn node_type(self, expected: &str) -> Self {
        if self.expression.node_type() != expected {
            self.mismatch(expected);
        }
        self
    }

    pub fn identifier(self, expected: &str) -> Self {
        match &self.expression.kind {
            ExpressionKind::Identifier(name) => {
                TextMatch::Exact(expected.to_string()).assert(name, &self.context)
            }
            _ => self.mismatch("Identifier"),
        }
        self
    }

    pub fn integer(self, expected: i64) -> Self {
        match &self.expression.kind {
            ExpressionKind::Integer(value) => assert_eq!(
                *value, expected,
                "{}: Expected integer {}, found {}",
                self.context, expected, value
            ),
            _ => self.mismatch("Integer"),
        }
        self
    }

    pub fn float(self, expected: f64) -> Self {
        match &self.expression.kind {
            ExpressionKind::Float(value) => assert!(
                (value - expected).abs() < f64::EPSILON,
                "{}: Expected float {}, found {}",
                self.context,
                expected,
                value
            ),
            _ => self.mismatch("Float"),
        }
        self
    }

    pub fn boolean(self, expected: bool) -> Self {
        match &self.expression.kind {
            ExpressionKind::Boolean(value) => assert_eq!(
                *value, expected,
                "{}: Expected {}, found {}",
                self.context, expected, value
            ),
            _ => self.mismatch("Boolean"),
        }
        self
    }

    pub fn null(self) -> Self {
        if !matches!(self.expression.kind, ExpressionKind::Null) {
            self.mismatch("Null");
        }
        self
    }

    /// Assert a string literal without interpolations and its decoded text
    pub fn string(self, expected: &str) -> Self {
        match &self.expression.kind {
            ExpressionKind::String(literal) => {
                let text = literal.as_plain_text().unwrap_or_else(|| {
                    panic!("{}: Expected a plain string, found interpolations", self.context)
                });
                TextMatch::Exact(expected.to_string()).assert(&text, &self.context);
            }
            _ => self.mismatch("String"),
        }
        self
    }

    pub fn assert_string(self) -> StringAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::String(literal) => StringAssertion {
                literal,
                context: self.context,
            },
            _ => self.mismatch("String"),
        }
    }

    pub fn assert_binary(self, op: BinaryOp) -> BinaryAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Binary {
                op: actual,
                left,
                right,
            } => {
                assert_eq!(
                    *actual, op,
                    "{}: Expected operator {}, found {}",
                    self.context, op, actual
                );
                BinaryAssertion {
                    left: self.child(left, "left"),
                    right: self.child(right, "right"),
                }
            }
            _ => self.mismatch(&format!("Binary {op}")),
        }
    }

    /// Assert a unary operation and return assertions on its operand
    pub fn unary(self, op: UnaryOp, fixity: Fixity) -> ExpressionAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Unary {
                op: actual_op,
                fixity: actual_fixity,
                operand,
            } => {
                assert_eq!(
                    (*actual_op, *actual_fixity),
                    (op, fixity),
                    "{}: Unexpected unary operator",
                    self.context
                );
                self.child(operand, "operand")
            }
            _ => self.mismatch(&format!("Unary {op}")),
        }
    }

    pub fn assert_ternary(self) -> TernaryAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Ternary {
                condition,
                then_branch,
                else_branch,
            } => TernaryAssertion {
                condition: self.child(condition, "condition"),
                then_branch: self.child(then_branch, "then"),
                else_branch: self.child(else_branch, "else"),
            },
            _ => self.mismatch("Ternary"),
        }
    }

    /// Assert a parenthesized expression and return assertions on the inside
    pub fn parenthesized(self) -> ExpressionAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Parenthesized(inner) => self.child(inner, "inner"),
            _ => self.mismatch("Parenthesized"),
        }
    }

    pub fn assert_call(self) -> CallAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Call { callee, arguments } => CallAssertion {
                callee: self.child(callee, "callee"),
                arguments,
                context: self.context,
            },
            _ => self.mismatch("Call"),
        }
    }

    pub fn assert_subscript(self) -> SubscriptAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Subscript { target, index } => SubscriptAssertion {
                target: self.child(target, "target"),
                index,
                context: self.context,
            },
            _ => self.mismatch("Subscript"),
        }
    }

    /// Assert attribute access `.name` and return assertions on the object
    pub fn attribute(self, name: &str) -> ExpressionAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Attribute {
                object,
                name: actual,
            } => {
                TextMatch::Exact(name.to_string()).assert(actual, &self.context);
                self.child(object, "object")
            }
            _ => self.mismatch("Attribute"),
        }
    }

    pub fn assert_list(self) -> ListAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::List(items) => ListAssertion {
                items,
                context: self.context,
            },
            _ => self.mismatch("List"),
        }
    }

    pub fn assert_map(self) -> MapAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::Map(entries) => MapAssertion {
                entries,
                context: self.context,
            },
            _ => self.mismatch("Map"),
        }
    }

    pub fn assert_comprehension(self) -> ComprehensionAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::ListComprehension {
                output,
                pattern,
                source,
                filter,
            } => ComprehensionAssertion {
                output: self.child(output, "output"),
                pattern: pattern.to_string(),
                source: self.child(source, "source"),
                filter: filter.as_deref().map(|filter| self.child(filter, "filter")),
                context: self.context,
            },
            _ => self.mismatch("ListComprehension"),
        }
    }

    pub fn assert_anonymous_function(self) -> AnonymousFunctionAssertion<'a> {
        match &self.expression.kind {
            ExpressionKind::AnonymousFunction { parameters, body } => AnonymousFunctionAssertion {
                parameters: ParametersAssertion {
                    parameters,
                    context: format!("{}.parameters", self.context),
                },
                body: self.child(body, "body"),
            },
            _ => self.mismatch("AnonymousFunction"),
        }
    }
}

pub struct BinaryAssertion<'a> {
    left: ExpressionAssertion<'a>,
    right: ExpressionAssertion<'a>,
}

impl<'a> BinaryAssertion<'a> {
    /// Run assertions on both operands
    pub fn operands<L, R>(self, left: L, right: R)
    where
        L: FnOnce(ExpressionAssertion<'a>),
        R: FnOnce(ExpressionAssertion<'a>),
    {
        left(self.left);
        right(self.right);
    }
}

pub struct TernaryAssertion<'a> {
    condition: ExpressionAssertion<'a>,
    then_branch: ExpressionAssertion<'a>,
    else_branch: ExpressionAssertion<'a>,
}

impl<'a> TernaryAssertion<'a> {
    pub fn branches<C, T, E>(self, condition: C, then_branch: T, else_branch: E)
    where
        C: FnOnce(ExpressionAssertion<'a>),
        T: FnOnce(ExpressionAssertion<'a>),
        E: FnOnce(ExpressionAssertion<'a>),
    {
        condition(self.condition);
        then_branch(self.then_branch);
        else_branch(self.else_branch);
    }
}

pub struct CallAssertion<'a> {
    callee: ExpressionAssertion<'a>,
    arguments: &'a [Argument],
    context: String,
}

impl<'a> CallAssertion<'a> {
    pub fn callee<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(ExpressionAssertion {
            expression: self.callee.expression,
            context: self.callee.context.clone(),
        });
        self
    }

    pub fn argument_count(self, expected: usize) -> Self {
        assert_eq!(
            self.arguments.len(),
            expected,
            "{}: Expected {} arguments, found {}",
            self.context,
            expected,
            self.arguments.len()
        );
        self
    }

    pub fn positional<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.arguments.get(index) {
            Some(Argument::Positional(value)) => {
                assertion(expression(value, format!("{}.args[{}]", self.context, index)))
            }
            other => panic!(
                "{}: Expected positional argument at {}, found {:?}",
                self.context, index, other
            ),
        }
        self
    }

    pub fn keyword<F>(self, index: usize, name: &str, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.arguments.get(index) {
            Some(Argument::Keyword {
                name: actual,
                value,
            }) => {
                TextMatch::Exact(name.to_string()).assert(actual, &self.context);
                assertion(expression(value, format!("{}.{}", self.context, name)));
            }
            other => panic!(
                "{}: Expected keyword argument at {}, found {:?}",
                self.context, index, other
            ),
        }
        self
    }
}

pub struct SubscriptAssertion<'a> {
    target: ExpressionAssertion<'a>,
    index: &'a SubscriptIndex,
    context: String,
}

impl<'a> SubscriptAssertion<'a> {
    pub fn target<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(ExpressionAssertion {
            expression: self.target.expression,
            context: self.target.context.clone(),
        });
        self
    }

    pub fn index<F>(self, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.index {
            SubscriptIndex::Index(index) => {
                assertion(expression(index, format!("{}.index", self.context)))
            }
            SubscriptIndex::Slice { .. } => {
                panic!("{}: Expected an index, found a slice", self.context)
            }
        }
        self
    }

    /// Assert a slice and which of its bounds are present
    pub fn slice(self, has_start: bool, has_end: bool) -> Self {
        match self.index {
            SubscriptIndex::Slice { start, end } => assert_eq!(
                (start.is_some(), end.is_some()),
                (has_start, has_end),
                "{}: Unexpected slice bounds",
                self.context
            ),
            SubscriptIndex::Index(_) => {
                panic!("{}: Expected a slice, found an index", self.context)
            }
        }
        self
    }
}

pub struct ListAssertion<'a> {
    items: &'a [Expression],
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.items.len(),
            expected,
            "{}: Expected {} items, found {}",
            self.context,
            expected,
            self.items.len()
        );
        self
    }

    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let item = self
            .items
            .get(index)
            .unwrap_or_else(|| panic!("{}: item index {} out of bounds", self.context, index));
        assertion(expression(item, format!("{}[{}]", self.context, index)));
        self
    }
}

pub struct MapAssertion<'a> {
    entries: &'a [crate::rad::ast::MapEntry],
    context: String,
}

impl<'a> MapAssertion<'a> {
    pub fn entry_count(self, expected: usize) -> Self {
        assert_eq!(
            self.entries.len(),
            expected,
            "{}: Expected {} entries, found {}",
            self.context,
            expected,
            self.entries.len()
        );
        self
    }

    /// Assert the key text of an entry and run assertions on its value
    pub fn entry<F>(self, index: usize, key: &str, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        let entry = self
            .entries
            .get(index)
            .unwrap_or_else(|| panic!("{}: entry index {} out of bounds", self.context, index));
        let actual = entry.key.text().unwrap_or_default();
        TextMatch::Exact(key.to_string()).assert(&actual, &self.context);
        assertion(expression(&entry.value, format!("{}[{}]", self.context, key)));
        self
    }

    /// Assert whether an entry's key was written as a bare identifier
    pub fn identifier_key(self, index: usize, expected: bool) -> Self {
        let is_identifier = matches!(
            self.entries.get(index).map(|entry| &entry.key),
            Some(MapKey::Identifier(_))
        );
        assert_eq!(
            is_identifier, expected,
            "{}: Unexpected key form for entry {}",
            self.context, index
        );
        self
    }
}

pub struct ComprehensionAssertion<'a> {
    output: ExpressionAssertion<'a>,
    pattern: String,
    source: ExpressionAssertion<'a>,
    filter: Option<ExpressionAssertion<'a>>,
    context: String,
}

impl<'a> ComprehensionAssertion<'a> {
    pub fn pattern(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.pattern, &self.context);
        self
    }

    /// Run assertions on the output, source and (if expected) filter
    pub fn parts<O, S, F>(self, output: O, source: S, filter: Option<F>)
    where
        O: FnOnce(ExpressionAssertion<'a>),
        S: FnOnce(ExpressionAssertion<'a>),
        F: FnOnce(ExpressionAssertion<'a>),
    {
        output(self.output);
        source(self.source);
        match (filter, self.filter) {
            (Some(assertion), Some(actual)) => assertion(actual),
            (None, None) => {}
            (Some(_), None) => panic!("{}: Expected a filter clause", self.context),
            (None, Some(_)) => panic!("{}: Expected no filter clause", self.context),
        }
    }
}

pub struct AnonymousFunctionAssertion<'a> {
    parameters: ParametersAssertion<'a>,
    body: ExpressionAssertion<'a>,
}

impl<'a> AnonymousFunctionAssertion<'a> {
    pub fn parameters<F>(self, assertion: F) -> Self
    where
        F: FnOnce(&ParametersAssertion<'a>),
    {
        assertion(&self.parameters);
        self
    }

    pub fn body<F>(self, assertion: F)
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        assertion(self.body);
    }
}

// ============================================================================
// String Assertions
// ============================================================================

pub struct StringAssertion<'a> {
    literal: &'a StringLiteral,
    context: String,
}

impl<'a> StringAssertion<'a> {
    pub fn quote(self, expected: QuoteKind) -> Self {
        assert_eq!(
            self.literal.quote, expected,
            "{}: Unexpected quote style",
            self.context
        );
        self
    }

    pub fn part_count(self, expected: usize) -> Self {
        assert_eq!(
            self.literal.parts.len(),
            expected,
            "{}: Expected {} string parts, found {}",
            self.context,
            expected,
            self.literal.parts.len()
        );
        self
    }

    fn part(&self, index: usize) -> &'a StringPart {
        self.literal
            .parts
            .get(index)
            .unwrap_or_else(|| panic!("{}: part index {} out of bounds", self.context, index))
    }

    pub fn text(self, index: usize, expected: &str) -> Self {
        self.text_matches(index, TextMatch::Exact(expected.to_string()))
    }

    pub fn text_starts_with(self, index: usize, prefix: &str) -> Self {
        self.text_matches(index, TextMatch::StartsWith(prefix.to_string()))
    }

    pub fn text_contains(self, index: usize, substring: &str) -> Self {
        self.text_matches(index, TextMatch::Contains(substring.to_string()))
    }

    fn text_matches(self, index: usize, matcher: TextMatch) -> Self {
        match self.part(index) {
            StringPart::Text(text) => matcher.assert(text, &self.context),
            StringPart::Interpolation { .. } => panic!(
                "{}: Expected text at part {}, found interpolation",
                self.context, index
            ),
        }
        self
    }

    /// Assert an interpolation part, its format specifier, and its expression
    pub fn interpolation<F>(self, index: usize, format: Option<&str>, assertion: F) -> Self
    where
        F: FnOnce(ExpressionAssertion<'a>),
    {
        match self.part(index) {
            StringPart::Interpolation {
                expression: value,
                format: actual,
            } => {
                assert_eq!(
                    actual.as_deref(),
                    format,
                    "{}: Unexpected format specifier",
                    self.context
                );
                assertion(expression(
                    value,
                    format!("{}.parts[{}]", self.context, index),
                ));
            }
            StringPart::Text(text) => panic!(
                "{}: Expected interpolation at part {}, found text {:?}",
                self.context, index, text
            ),
        }
        self
    }
}

fn summarize_statements(statements: &[Statement]) -> String {
    statements
        .iter()
        .map(AstNode::node_type)
        .collect::<Vec<_>>()
        .join(", ")
}
