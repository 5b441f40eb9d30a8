//! SQL Parser implementation.

use tracing::{debug, trace};

use super::error::{ParseError, ParseErrorKind};
use super::pratt::{infix_binding_power, token_to_compare_op, token_to_logical_op};
use super::tree::build_node;
use crate::ast::{
    Assignment, Ast, ColumnRef, DeleteAst, Expr, InsertAst, JoinClause, JoinKind, Leaf, Limit,
    SelectAst, SetFunctionArg, SetFunctionCall, SortDirection, TableRef, UpdateAst,
};
use crate::lexer::{Keyword, Operator, Position, Punct, Token, TokenKind};

/// Aggregate functions accepted in select lists and predicates.
const SET_FUNCTIONS: [&str; 5] = ["count", "max", "min", "sum", "avg"];

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of subqueries and parenthesized groups.
    pub max_depth: usize,
    /// Maximum number of AND/OR connectives in one statement.
    ///
    /// Each connective adds a level to the expression tree, so this bounds
    /// the depth of long flat predicates.
    pub max_connectives: usize,
}

impl ParserConfig {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 50;

    /// Default connective limit.
    pub const DEFAULT_MAX_CONNECTIVES: usize = 1000;

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the connective limit.
    #[must_use]
    pub const fn with_max_connectives(mut self, max_connectives: usize) -> Self {
        self.max_connectives = max_connectives;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_connectives: Self::DEFAULT_MAX_CONNECTIVES,
        }
    }
}

/// Parses one statement from a token stream with the default settings.
///
/// # Errors
///
/// Returns a `ParseError` if the tokens do not form a supported statement.
pub fn parse_statement(tokens: Vec<Token>) -> Result<Ast, ParseError> {
    Parser::new(tokens).parse_statement()
}

/// SQL Parser.
///
/// Consumes a token stream left to right with one token of lookahead, two
/// where `NOT IN` has to be told apart from a stray `NOT`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    connectives: usize,
    config: ParserConfig,
}

impl Parser {
    /// Creates a new parser over `tokens`.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a new parser with explicit settings.
    ///
    /// An end-of-input token is appended when the stream lacks one.
    #[must_use]
    pub fn with_config(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let position = tokens.last().map_or_else(Position::default, |last| {
                last.text.chars().fold(last.position(), Position::advance)
            });
            tokens.push(Token::new(TokenKind::EndOfInput, "", position));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            connectives: 0,
            config,
        }
    }

    /// Parses a single SQL statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid SQL statement.
    pub fn parse_statement(&mut self) -> Result<Ast, ParseError> {
        let token = self.current().clone();
        let ast = match token.kind {
            TokenKind::Keyword(Keyword::Select) => Ast::Select(self.parse_select()?),
            TokenKind::Keyword(Keyword::Insert) => Ast::Insert(self.parse_insert()?),
            TokenKind::Keyword(Keyword::Update) => Ast::Update(self.parse_update()?),
            TokenKind::Keyword(Keyword::Delete) => Ast::Delete(self.parse_delete()?),
            TokenKind::Keyword(Keyword::With) => {
                return Err(ParseError::not_supported("WITH", &token));
            }
            _ => return Err(ParseError::nothing_to_do(self.end_of_input())),
        };

        self.consume_punct(Punct::Semicolon);
        if !self.current().is_eof() {
            return Err(ParseError::unexpected("end of statement", self.current()));
        }

        debug!(statement = ast.kind(), "parsed statement");
        Ok(ast)
    }

    /// Parses a SELECT statement.
    fn parse_select(&mut self) -> Result<SelectAst, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let mut select = SelectAst {
            distinct: self.consume_keyword(Keyword::Distinct),
            ..SelectAst::default()
        };

        self.parse_select_list(&mut select)?;

        if self.consume_keyword(Keyword::From) {
            self.parse_from(&mut select)?;
        }

        if self.consume_keyword(Keyword::Where) {
            select.where_expr = Some(self.parse_predicate()?);
        }

        if self.consume_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            select.group_by = self.parse_name_list()?;
        }

        if self.check_keyword(Keyword::Having) {
            return Err(ParseError::not_supported("HAVING", self.current()));
        }

        if self.consume_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            select.sort_order = self.parse_sort_order()?;
        }

        if self.consume_keyword(Keyword::Limit) {
            select.limit = Some(self.parse_limit()?);
        }

        if self.check_keyword(Keyword::Union) {
            return Err(ParseError::not_supported("UNION", self.current()));
        }

        Ok(select)
    }

    /// Parses the select list into plain columns and set functions.
    fn parse_select_list(&mut self, select: &mut SelectAst) -> Result<(), ParseError> {
        if self.check_operator(Operator::Star) {
            self.advance();
            if self.check_punct(Punct::Comma) {
                return Err(ParseError::expected_columns(self.current()));
            }
            return Ok(());
        }

        loop {
            let start = self.current().clone();

            if self.starts_set_function() {
                let mut call = self.parse_set_function()?;
                call.alias = self.parse_column_alias(&start)?;
                select.set_functions.push(call);
            } else {
                let expr = if start.kind == TokenKind::Identifier {
                    Leaf::Ident(self.parse_dotted_name()?)
                } else if self.is_value_start() {
                    self.parse_value_leaf()?
                } else {
                    return Err(ParseError::expected_columns(&start));
                };
                let alias = self.parse_column_alias(&start)?;
                select.columns.push(ColumnRef { expr, alias });
            }

            if !self.consume_punct(Punct::Comma) {
                break;
            }
        }

        Ok(())
    }

    /// Parses `AS name` or a bare alias after a select-list entry.
    ///
    /// A bare alias glued to the value (`1a`) is not an alias; the error
    /// points at the start of the entry.
    fn parse_column_alias(&mut self, start: &Token) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) {
            return self.expect_identifier().map(Some);
        }
        if self.current().kind != TokenKind::Identifier {
            return Ok(None);
        }
        if self
            .previous()
            .is_some_and(|previous| previous.is_adjacent_to(self.current()))
        {
            return Err(ParseError::expected_columns(start));
        }
        self.expect_identifier().map(Some)
    }

    fn starts_set_function(&self) -> bool {
        self.current().kind == TokenKind::Identifier
            && self.peek(1).kind == TokenKind::Punctuation(Punct::LeftParen)
    }

    /// Parses `name(DISTINCT? arg[, arg]*)`.
    fn parse_set_function(&mut self) -> Result<SetFunctionCall, ParseError> {
        let name_token = self.advance();
        let name = name_token.text.to_ascii_lowercase();
        if !SET_FUNCTIONS.contains(&name.as_str()) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidSetFunction,
                format!("Unknown set function '{}'", name_token.text),
                &name_token,
            ));
        }

        self.expect_punct(Punct::LeftParen)?;
        let distinct = self.consume_keyword(Keyword::Distinct);

        let mut args = Vec::new();
        if !self.check_punct(Punct::RightParen) {
            loop {
                if self.check_operator(Operator::Star) {
                    self.advance();
                    args.push(String::from("*"));
                } else {
                    args.push(self.parse_dotted_name()?);
                }
                if !self.consume_punct(Punct::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(Punct::RightParen)?;

        if self.check_keyword(Keyword::Over) {
            return Err(ParseError::not_supported("OVER", self.current()));
        }

        let arg = if name == "count" {
            SetFunctionArg::List(args)
        } else {
            let single = if args.len() == 1 {
                args.pop().filter(|column| column != "*")
            } else {
                None
            };
            match single {
                Some(column) => SetFunctionArg::Single(column),
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidSetFunction,
                        format!("{name}() takes exactly one column"),
                        &name_token,
                    ));
                }
            }
        };

        Ok(SetFunctionCall {
            name,
            distinct,
            arg,
            alias: None,
        })
    }

    /// Parses the FROM list: the first table, then comma and keyword joins.
    fn parse_from(&mut self, select: &mut SelectAst) -> Result<(), ParseError> {
        select.tables.push(self.parse_table_ref()?);

        loop {
            let join_kind = if self.consume_punct(Punct::Comma) {
                JoinKind::Cross
            } else if let Some(kind) = self.parse_join_kind()? {
                kind
            } else {
                break;
            };

            let table = self.parse_table_ref()?;

            let condition = if join_kind.takes_condition() {
                if self.check_keyword(Keyword::Using) {
                    return Err(ParseError::not_supported("USING", self.current()));
                }
                self.expect_keyword(Keyword::On)?;
                Some(self.parse_predicate()?)
            } else {
                None
            };

            select.joins.push(JoinClause {
                table: table.name.clone(),
                alias: table.alias.clone(),
                join_kind,
                condition,
            });
            select.tables.push(table);
        }

        Ok(())
    }

    /// Parses a table name with an optional alias.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        if self.check_punct(Punct::LeftParen) {
            return Err(ParseError::not_supported("Subquery in FROM", self.current()));
        }
        let name = self.expect_identifier()?;
        let alias = self.parse_table_alias()?;
        Ok(TableRef { name, alias })
    }

    /// Parses an optional table alias (`AS name` or just `name`).
    fn parse_table_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.consume_keyword(Keyword::As) || self.current().kind == TokenKind::Identifier {
            return self.expect_identifier().map(Some);
        }
        Ok(None)
    }

    /// Parses the keywords introducing a join, if present.
    fn parse_join_kind(&mut self) -> Result<Option<JoinKind>, ParseError> {
        let kind = match self.current().as_keyword() {
            Some(Keyword::Join | Keyword::Inner) => JoinKind::Inner,
            Some(Keyword::Left) => JoinKind::LeftOuter,
            Some(Keyword::Right) => JoinKind::Right,
            Some(Keyword::Full) => JoinKind::Full,
            Some(Keyword::Cross) => JoinKind::CrossJoin,
            Some(Keyword::Natural) => JoinKind::Natural,
            _ => return Ok(None),
        };

        let first = self.advance();
        if first.as_keyword() != Some(Keyword::Join) {
            if matches!(kind, JoinKind::LeftOuter | JoinKind::Right | JoinKind::Full) {
                self.consume_keyword(Keyword::Outer);
            }
            self.expect_keyword(Keyword::Join)?;
        }

        Ok(Some(kind))
    }

    /// Parses a WHERE or ON predicate.
    ///
    /// A predicate that is a single parenthesized group keeps no subclause
    /// node of its own.
    fn parse_predicate(&mut self) -> Result<Expr, ParseError> {
        Ok(self.parse_expression(0)?.without_outer_subclause())
    }

    /// Parses comparisons joined by AND/OR using Pratt parsing.
    fn parse_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_comparison()?;

        loop {
            let Some(op) = token_to_logical_op(&self.current().kind) else {
                break;
            };
            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }

            let op_token = self.advance();
            self.count_connective(&op_token)?;
            let rhs = self.parse_expression(r_bp)?;
            lhs = build_node(lhs, &op_token, false, rhs)?;
        }

        Ok(lhs)
    }

    /// Parses `operand [op operand]`.
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;
        let token = self.current().clone();

        match token.kind {
            TokenKind::Keyword(Keyword::Is) => {
                self.advance();
                let negated = self.consume_keyword(Keyword::Not);
                self.expect_keyword(Keyword::Null)?;
                build_node(left, &token, negated, Expr::null())
            }
            TokenKind::Keyword(Keyword::Not) => {
                if self.peek(1).as_keyword() != Some(Keyword::In) {
                    return Err(negation_error(&token));
                }
                self.advance();
                let op_token = self.advance();
                let right = self.parse_in_target()?;
                build_node(left, &op_token, true, right)
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                let right = self.parse_in_target()?;
                build_node(left, &token, false, right)
            }
            _ if token_to_compare_op(&token.kind).is_some() => {
                self.advance();
                let right = self.parse_operand()?;
                build_node(left, &token, false, right)
            }
            _ => Ok(left),
        }
    }

    /// Parses the right side of IN: a subquery or a value list.
    fn parse_in_target(&mut self) -> Result<Expr, ParseError> {
        if self.starts_subquery() {
            return Ok(Expr::Leaf(Leaf::Command(Box::new(self.parse_subquery()?))));
        }

        self.expect_punct(Punct::LeftParen)?;
        let mut values = vec![self.parse_value_leaf()?];
        while self.consume_punct(Punct::Comma) {
            values.push(self.parse_value_leaf()?);
        }
        self.expect_punct(Punct::RightParen)?;

        Ok(Expr::Leaf(Leaf::ValueList(values)))
    }

    /// Parses a primary: column, literal, set function, subquery or group.
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Identifier if self.starts_set_function() => {
                Ok(Expr::Leaf(Leaf::SetFunction(self.parse_set_function()?)))
            }
            TokenKind::Identifier => Ok(Expr::Leaf(Leaf::Ident(self.parse_dotted_name()?))),
            TokenKind::Punctuation(Punct::LeftParen) if !self.starts_subquery() => {
                self.enter_nesting(&token)?;
                self.advance();
                let inner = self.parse_expression(0)?;
                self.expect_punct(Punct::RightParen)?;
                self.leave_nesting();
                Ok(inner.grouped())
            }
            TokenKind::Keyword(Keyword::Not) => Err(negation_error(&token)),
            TokenKind::Keyword(Keyword::Exists) => Err(ParseError::not_supported("EXISTS", &token)),
            _ if self.is_value_start() => Ok(Expr::Leaf(self.parse_value_leaf()?)),
            _ => Err(ParseError::unexpected("an expression", &token)),
        }
    }

    fn is_value_start(&self) -> bool {
        match self.current().kind {
            TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::Keyword(Keyword::Null) => true,
            TokenKind::Operator(Operator::Minus) => matches!(
                self.peek(1).kind,
                TokenKind::IntLiteral | TokenKind::FloatLiteral
            ),
            TokenKind::Punctuation(Punct::LeftParen) => self.starts_subquery(),
            _ => false,
        }
    }

    /// Parses a literal, NULL or scalar subquery.
    fn parse_value_leaf(&mut self) -> Result<Leaf, ParseError> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::IntLiteral | TokenKind::FloatLiteral => {
                self.advance();
                number_leaf(&token, false)
            }
            TokenKind::Operator(Operator::Minus)
                if matches!(
                    self.peek(1).kind,
                    TokenKind::IntLiteral | TokenKind::FloatLiteral
                ) =>
            {
                self.advance();
                let number = self.advance();
                number_leaf(&number, true)
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Leaf::TextVal(token.string_value().unwrap_or_default()))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Leaf::Null)
            }
            TokenKind::Punctuation(Punct::LeftParen) if self.starts_subquery() => {
                Ok(Leaf::Command(Box::new(self.parse_subquery()?)))
            }
            _ => Err(ParseError::unexpected("a value", &token)),
        }
    }

    fn starts_subquery(&self) -> bool {
        self.check_punct(Punct::LeftParen) && self.peek(1).as_keyword() == Some(Keyword::Select)
    }

    /// Parses `( SELECT ... )`.
    fn parse_subquery(&mut self) -> Result<SelectAst, ParseError> {
        let open = self.expect_punct(Punct::LeftParen)?;
        self.enter_nesting(&open)?;
        let select = self.parse_select()?;
        self.expect_punct(Punct::RightParen)?;
        self.leave_nesting();
        trace!(depth = self.depth, "parsed subquery");
        Ok(select)
    }

    /// Parses a comma-separated list of column names.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.parse_dotted_name()?];
        while self.consume_punct(Punct::Comma) {
            names.push(self.parse_dotted_name()?);
        }
        Ok(names)
    }

    /// Parses the ORDER BY list.
    fn parse_sort_order(&mut self) -> Result<Vec<(String, SortDirection)>, ParseError> {
        let mut order = Vec::new();
        loop {
            let name = self.parse_dotted_name()?;
            let direction = if self.consume_keyword(Keyword::Desc) {
                SortDirection::Desc
            } else {
                self.consume_keyword(Keyword::Asc);
                SortDirection::Asc
            };
            order.push((name, direction));

            if !self.consume_punct(Punct::Comma) {
                break;
            }
        }
        Ok(order)
    }

    /// Parses `n`, `o, n` or `n OFFSET o`.
    fn parse_limit(&mut self) -> Result<Limit, ParseError> {
        let first = self.parse_row_count()?;

        if self.consume_punct(Punct::Comma) {
            let length = self.parse_row_count()?;
            return Ok(Limit::new(first, length));
        }
        if self.consume_keyword(Keyword::Offset) {
            let offset = self.parse_row_count()?;
            return Ok(Limit::new(offset, first));
        }

        Ok(Limit::new(0, first))
    }

    fn parse_row_count(&mut self) -> Result<u32, ParseError> {
        let token = self.current().clone();
        if token.is_eof() {
            return Err(ParseError::unexpected("a row count", &token));
        }
        if token.kind == TokenKind::IntLiteral {
            if let Ok(count) = token.text.parse::<u32>() {
                self.advance();
                return Ok(count);
            }
        }
        Err(ParseError::new(
            ParseErrorKind::InvalidLimit,
            format!("Invalid row count '{}'", token.text),
            &token,
        ))
    }

    /// Parses an INSERT statement.
    fn parse_insert(&mut self) -> Result<InsertAst, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;

        let table = self.expect_identifier()?;

        // Column list (optional)
        let mut columns = Vec::new();
        if self.consume_punct(Punct::LeftParen) {
            columns.push(self.expect_identifier()?);
            while self.consume_punct(Punct::Comma) {
                columns.push(self.expect_identifier()?);
            }
            self.expect_punct(Punct::RightParen)?;
        }

        self.expect_keyword(Keyword::Values)?;

        let mut values = Vec::new();
        loop {
            self.expect_punct(Punct::LeftParen)?;
            let mut row = vec![self.parse_value_leaf()?];
            while self.consume_punct(Punct::Comma) {
                row.push(self.parse_value_leaf()?);
            }
            self.expect_punct(Punct::RightParen)?;
            values.push(row);

            if !self.consume_punct(Punct::Comma) {
                break;
            }
        }

        Ok(InsertAst {
            table,
            columns,
            values,
        })
    }

    /// Parses an UPDATE statement.
    fn parse_update(&mut self) -> Result<UpdateAst, ParseError> {
        self.expect_keyword(Keyword::Update)?;

        let table = self.expect_identifier()?;
        let alias = self.parse_table_alias()?;

        self.expect_keyword(Keyword::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.parse_dotted_name()?;
            self.expect_operator(Operator::Eq)?;
            let value = if self.current().kind == TokenKind::Identifier {
                Leaf::Ident(self.parse_dotted_name()?)
            } else {
                self.parse_value_leaf()?
            };
            assignments.push(Assignment { column, value });

            if !self.consume_punct(Punct::Comma) {
                break;
            }
        }

        let where_expr = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(UpdateAst {
            table,
            alias,
            assignments,
            where_expr,
        })
    }

    /// Parses a DELETE statement.
    fn parse_delete(&mut self) -> Result<DeleteAst, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;

        let table = self.expect_identifier()?;

        let where_expr = if self.consume_keyword(Keyword::Where) {
            Some(self.parse_predicate()?)
        } else {
            None
        };

        Ok(DeleteAst { table, where_expr })
    }

    /// Parses `name` or `qualifier.name`.
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_identifier()?;
        while self.consume_punct(Punct::Dot) {
            name.push('.');
            name.push_str(&self.expect_identifier()?);
        }
        Ok(name)
    }

    fn enter_nesting(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::TooDeeplyNested,
                format!(
                    "Statement is nested deeper than {} levels",
                    self.config.max_depth
                ),
                token,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn count_connective(&mut self, token: &Token) -> Result<(), ParseError> {
        if self.connectives >= self.config.max_connectives {
            return Err(ParseError::new(
                ParseErrorKind::TooDeeplyNested,
                format!(
                    "Statement has more than {} AND/OR connectives",
                    self.config.max_connectives
                ),
                token,
            ));
        }
        self.connectives += 1;
        Ok(())
    }

    fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // Token stream helpers

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek(&self, offset: usize) -> &Token {
        self.tokens
            .get(self.pos + offset)
            .unwrap_or_else(|| self.end_of_input())
    }

    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|index| &self.tokens[index])
    }

    fn end_of_input(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    /// Consumes and returns the current token; the end of input is sticky.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().kind == TokenKind::Keyword(keyword)
    }

    fn check_punct(&self, punct: Punct) -> bool {
        self.current().kind == TokenKind::Punctuation(punct)
    }

    fn check_operator(&self, operator: Operator) -> bool {
        self.current().kind == TokenKind::Operator(operator)
    }

    fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        let found = self.check_keyword(keyword);
        if found {
            self.advance();
        }
        found
    }

    fn consume_punct(&mut self, punct: Punct) -> bool {
        let found = self.check_punct(punct);
        if found {
            self.advance();
        }
        found
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), self.current()))
        }
    }

    fn expect_punct(&mut self, punct: Punct) -> Result<Token, ParseError> {
        if self.check_punct(punct) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(punct_text(punct), self.current()))
        }
    }

    fn expect_operator(&mut self, operator: Operator) -> Result<Token, ParseError> {
        if self.check_operator(operator) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(
                &format!("'{}'", operator.as_str()),
                self.current(),
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if self.current().kind == TokenKind::Identifier {
            Ok(self.advance().text)
        } else {
            Err(ParseError::unexpected("an identifier", self.current()))
        }
    }
}

fn negation_error(token: &Token) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnsupportedNegation,
        "NOT is only supported as IS NOT or NOT IN",
        token,
    )
}

fn number_leaf(token: &Token, negative: bool) -> Result<Leaf, ParseError> {
    let text = if negative {
        format!("-{}", token.text)
    } else {
        token.text.clone()
    };
    if token.kind == TokenKind::FloatLiteral {
        return Ok(Leaf::FloatVal(text));
    }
    text.parse::<i64>().map(Leaf::IntVal).map_err(|_| {
        ParseError::new(
            ParseErrorKind::UnexpectedToken,
            format!("Integer literal {text} is out of range"),
            token,
        )
    })
}

const fn punct_text(punct: Punct) -> &'static str {
    match punct {
        Punct::LeftParen => "'('",
        Punct::RightParen => "')'",
        Punct::Comma => "','",
        Punct::Dot => "'.'",
        Punct::Semicolon => "';'",
        Punct::Unknown(_) => "a delimiter",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CompareOp, LogicalOp};
    use crate::lexer::tokenize;

    fn parse(sql: &str) -> Result<Ast, ParseError> {
        Parser::new(tokenize(sql)?).parse_statement()
    }

    fn parse_select(sql: &str) -> SelectAst {
        match parse(sql).unwrap() {
            Ast::Select(select) => select,
            other => panic!("Expected SELECT statement, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_select() {
        let select = parse_select("SELECT id, name FROM users");
        assert_eq!(select.columns.len(), 2);
        assert_eq!(select.tables, vec![TableRef::new("users")]);
    }

    #[test]
    fn test_select_star_has_no_columns() {
        let select = parse_select("select * from dog where cat <> 4");
        assert!(select.columns.is_empty());
        assert!(select.set_functions.is_empty());
        assert_eq!(
            select.where_expr,
            Some(Expr::ident("cat").not_eq(Expr::int(4)))
        );
    }

    #[test]
    fn test_bare_alias() {
        let select = parse_select("SELECT 1 a");
        assert_eq!(
            select.columns,
            vec![ColumnRef::with_alias(Leaf::IntVal(1), "a")]
        );
    }

    #[test]
    fn test_glued_alias_is_rejected() {
        let err = parse("SELECT 1a").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedColumnsOrSetFunction);
        assert_eq!((err.line, err.column), (1, 8));
        assert_eq!(err.offending_text, "1");
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let select = parse_select("SELECT * FROM t WHERE a = 1 AND b = 2 OR c = 3");
        let Some(Expr::Logical { left, op, .. }) = select.where_expr else {
            panic!("Expected logical expression");
        };
        assert_eq!(op, LogicalOp::Or);
        assert!(matches!(
            *left,
            Expr::Logical {
                op: LogicalOp::And,
                ..
            }
        ));
    }

    #[test]
    fn test_and_chain_accumulates_left() {
        let select = parse_select("SELECT * FROM t WHERE a = 1 AND b = 2 AND c = 3");
        let expected = Expr::ident("a")
            .eq(Expr::int(1))
            .and(Expr::ident("b").eq(Expr::int(2)))
            .and(Expr::ident("c").eq(Expr::int(3)));
        assert_eq!(select.where_expr, Some(expected));
    }

    #[test]
    fn test_not_in_sets_flag() {
        let select = parse_select("SELECT * FROM t WHERE a NOT IN (1, 2)");
        assert_eq!(
            select.where_expr,
            Some(Expr::ident("a").not_in_list(vec![Leaf::IntVal(1), Leaf::IntVal(2)]))
        );
    }

    #[test]
    fn test_is_not_null() {
        let select = parse_select("SELECT * FROM t WHERE a IS NOT NULL");
        assert!(matches!(
            select.where_expr,
            Some(Expr::Comparison {
                op: CompareOp::Is,
                negated: true,
                ..
            })
        ));
    }

    #[test]
    fn test_bare_not_is_rejected() {
        let err = parse("SELECT * FROM t WHERE NOT (a = 1)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnsupportedNegation);
    }

    #[test]
    fn test_inner_join() {
        let select = parse_select("select a, d from b inner join c on b.a = c.a");
        assert_eq!(select.tables.len(), 2);
        assert_eq!(select.joins.len(), 1);
        assert_eq!(select.joins[0].join_kind, JoinKind::Inner);
        assert_eq!(
            select.joins[0].condition,
            Some(Expr::ident("b.a").eq(Expr::ident("c.a")))
        );
    }

    #[test]
    fn test_set_functions() {
        let select = parse_select("SELECT COUNT(*), max(price) AS top FROM orders");
        assert_eq!(select.set_functions.len(), 2);
        assert_eq!(select.set_functions[0], SetFunctionCall::count_all());
        assert_eq!(
            select.set_functions[1],
            SetFunctionCall::single("max", "price").with_alias("top")
        );
    }

    #[test]
    fn test_limit_forms() {
        assert_eq!(parse_select("SELECT a FROM t LIMIT 5").limit, Some(Limit::new(0, 5)));
        assert_eq!(parse_select("SELECT a FROM t LIMIT 2, 5").limit, Some(Limit::new(2, 5)));
        assert_eq!(
            parse_select("SELECT a FROM t LIMIT 5 OFFSET 2").limit,
            Some(Limit::new(2, 5))
        );
    }

    #[test]
    fn test_insert_values() {
        let ast = parse("INSERT INTO users (name, email) VALUES ('Alice', 'alice@example.com')")
            .unwrap();
        let Ast::Insert(insert) = ast else {
            panic!("Expected INSERT statement");
        };
        assert_eq!(insert.table, "users");
        assert_eq!(insert.columns, vec!["name", "email"]);
        assert_eq!(insert.values.len(), 1);
    }

    #[test]
    fn test_update() {
        let ast = parse("UPDATE users SET name = 'Bob' WHERE id = 1").unwrap();
        let Ast::Update(update) = ast else {
            panic!("Expected UPDATE statement");
        };
        assert_eq!(update.table, "users");
        assert_eq!(update.assignments.len(), 1);
        assert!(update.where_expr.is_some());
    }

    #[test]
    fn test_delete() {
        let ast = parse("DELETE FROM users WHERE id = 1").unwrap();
        let Ast::Delete(delete) = ast else {
            panic!("Expected DELETE statement");
        };
        assert_eq!(delete.table, "users");
        assert!(delete.where_expr.is_some());
    }

    #[test]
    fn test_nothing_to_do() {
        let err = parse("-- Test Comment").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NothingToDo);
        assert_eq!((err.line, err.column), (1, 16));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert!(parse("SELECT a FROM t;").is_ok());
        let err = parse("SELECT a FROM t; SELECT b FROM t").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_depth_limit() {
        let config = ParserConfig::default().with_max_depth(2);
        let sql = "SELECT * FROM t WHERE ((a = 1))";
        assert!(Parser::with_config(tokenize(sql).unwrap(), config)
            .parse_statement()
            .is_ok());

        let sql = "SELECT * FROM t WHERE (((a = 1)))";
        let err = Parser::with_config(tokenize(sql).unwrap(), config)
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested);
    }

    #[test]
    fn test_connective_limit() {
        let config = ParserConfig::default().with_max_connectives(2);
        let sql = "SELECT * FROM t WHERE a = 1 AND b = 2 OR c = 3";
        assert!(Parser::with_config(tokenize(sql).unwrap(), config)
            .parse_statement()
            .is_ok());

        let sql = "SELECT * FROM t WHERE a = 1 AND b IN (SELECT b FROM u WHERE c = 1 OR d = 2)";
        let err = Parser::with_config(tokenize(sql).unwrap(), config)
            .parse_statement()
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TooDeeplyNested);
        assert_eq!(err.message, "Statement has more than 2 AND/OR connectives");
        assert_eq!(err.offending_text, "OR");
    }

    #[test]
    fn test_missing_end_of_input_is_appended() {
        let mut tokens = tokenize("SELECT a FROM t").unwrap();
        tokens.pop();
        assert!(parse_statement(tokens).is_ok());
    }
}
