//! Dependency extractor (C2): walks a parsed statement and emits the set of
//! external table/view references it reads from, masking out locally bound
//! CTE names.
//!
//! Implemented as a small AST visitor, per the Design Note in the
//! specification: node kinds are matched directly rather than through a
//! trait-based visitor, since the set of kinds requiring custom handling is
//! small and fixed (query, WITH, set operation, join, aliased relation,
//! table subquery, VALUES, UNNEST, EXISTS, IN-subquery, scalar subquery).

use crate::parser::normalize_ident;
use crate::reference::TableReference;
use sqlparser::ast::{
    CaseWhen, Cte, Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr,
    Join, ObjectName, ObjectNamePart, Query, Select, SelectItem, SetExpr, Statement, TableFactor,
    TableWithJoins,
};
use std::collections::HashSet;

/// Extracts the set of external dependencies from a single parsed
/// statement. Views are always defined by a query body; statements of any
/// other kind contribute no dependencies.
pub fn extract_dependencies(stmt: &Statement) -> Vec<TableReference> {
    let mut ctx = ExtractContext::default();
    if let Statement::Query(query) = stmt {
        ctx.walk_query(query);
    }
    ctx.out
}

#[derive(Default)]
struct ExtractContext {
    /// One frame per enclosing `WITH` clause, each holding the (already
    /// case-normalized) names bound at that level.
    cte_scopes: Vec<HashSet<String>>,
    seen: HashSet<String>,
    out: Vec<TableReference>,
}

impl ExtractContext {
    fn walk_query(&mut self, query: &Query) {
        if let Some(with) = &query.with {
            // Rule 2: collect every CTE name at this level before recursing
            // into any CTE body, so siblings and the outer body can see them.
            let level: HashSet<String> = with
                .cte_tables
                .iter()
                .map(|cte: &Cte| normalize_ident(&cte.alias.name))
                .collect();
            self.cte_scopes.push(level);
            for cte in &with.cte_tables {
                self.walk_query(&cte.query);
            }
            self.walk_set_expr(&query.body);
            self.cte_scopes.pop();
        } else {
            self.walk_set_expr(&query.body);
        }
    }

    fn walk_set_expr(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => self.walk_select(select),
            SetExpr::Query(query) => self.walk_query(query),
            SetExpr::SetOperation { left, right, .. } => {
                self.walk_set_expr(left);
                self.walk_set_expr(right);
            }
            SetExpr::Values(values) => {
                // Rule 7: VALUES never contributes a table reference, but its
                // rows may still hold scalar subqueries.
                for row in &values.rows {
                    for expr in row {
                        self.walk_expr(expr);
                    }
                }
            }
            SetExpr::Table(table) => {
                if let Some(name) = &table.table_name {
                    self.register(&ObjectName(vec![ObjectNamePart::Identifier(
                        sqlparser::ast::Ident::new(name.clone()),
                    )]));
                }
            }
            SetExpr::Insert(_) | SetExpr::Update(_) | SetExpr::Delete(_) | SetExpr::Merge(_) => {}
        }
    }

    fn walk_select(&mut self, select: &Select) {
        for twj in &select.from {
            self.walk_table_with_joins(twj);
        }
        if let Some(selection) = &select.selection {
            self.walk_expr(selection);
        }
        for item in &select.projection {
            self.walk_select_item(item);
        }
        if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
            for expr in exprs {
                self.walk_expr(expr);
            }
        }
        if let Some(having) = &select.having {
            self.walk_expr(having);
        }
    }

    fn walk_select_item(&mut self, item: &SelectItem) {
        match item {
            SelectItem::UnnamedExpr(expr) => self.walk_expr(expr),
            SelectItem::ExprWithAlias { expr, .. } => self.walk_expr(expr),
            SelectItem::QualifiedWildcard(..) | SelectItem::Wildcard(..) => {}
        }
    }

    fn walk_table_with_joins(&mut self, twj: &TableWithJoins) {
        self.walk_table_factor(&twj.relation);
        for join in &twj.joins {
            self.walk_join(join);
        }
    }

    fn walk_join(&mut self, join: &Join) {
        self.walk_table_factor(&join.relation);
        if let Some(expr) = join_constraint_expr(&join.join_operator) {
            self.walk_expr(expr);
        }
    }

    fn walk_table_factor(&mut self, tf: &TableFactor) {
        match tf {
            TableFactor::Table { name, .. } => self.register(name),
            TableFactor::Derived { subquery, .. } => self.walk_query(subquery),
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.walk_table_with_joins(table_with_joins),
            TableFactor::UNNEST { array_exprs, .. } => {
                // Rule 7: UNNEST never contributes a table reference, but its
                // array expressions may hold scalar subqueries.
                for expr in array_exprs {
                    self.walk_expr(expr);
                }
            }
            TableFactor::TableFunction { .. }
            | TableFactor::Function { .. }
            | TableFactor::Pivot { .. }
            | TableFactor::Unpivot { .. }
            | TableFactor::MatchRecognize { .. }
            | TableFactor::JsonTable { .. }
            | TableFactor::OpenJsonTable { .. }
            | TableFactor::XmlTable { .. }
            | TableFactor::SemanticView { .. } => {}
        }
    }

    fn walk_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Subquery(query) => self.walk_query(query),
            Expr::Exists { subquery, .. } => self.walk_query(subquery),
            Expr::InSubquery {
                expr, subquery, ..
            } => {
                self.walk_expr(expr);
                self.walk_query(subquery);
            }
            Expr::InList { expr, list, .. } => {
                self.walk_expr(expr);
                for item in list {
                    self.walk_expr(item);
                }
            }
            Expr::BinaryOp { left, right, .. } => {
                self.walk_expr(left);
                self.walk_expr(right);
            }
            Expr::UnaryOp { expr, .. } => self.walk_expr(expr),
            Expr::Nested(expr) => self.walk_expr(expr),
            Expr::Cast { expr, .. } => self.walk_expr(expr),
            Expr::Case {
                operand,
                conditions,
                else_result,
                ..
            } => {
                if let Some(operand) = operand {
                    self.walk_expr(operand);
                }
                for CaseWhen { condition, result } in conditions {
                    self.walk_expr(condition);
                    self.walk_expr(result);
                }
                if let Some(else_result) = else_result {
                    self.walk_expr(else_result);
                }
            }
            Expr::Between {
                expr, low, high, ..
            } => {
                self.walk_expr(expr);
                self.walk_expr(low);
                self.walk_expr(high);
            }
            Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
                self.walk_expr(expr);
                self.walk_expr(pattern);
            }
            Expr::IsNull(expr) | Expr::IsNotNull(expr) => self.walk_expr(expr),
            Expr::Tuple(exprs) => {
                for expr in exprs {
                    self.walk_expr(expr);
                }
            }
            Expr::AnyOp { left, right, .. } | Expr::AllOp { left, right, .. } => {
                self.walk_expr(left);
                self.walk_expr(right);
            }
            Expr::Function(func) => self.walk_function(func),
            _ => {}
        }
    }

    fn walk_function(&mut self, func: &Function) {
        if let FunctionArguments::List(list) = &func.args {
            for arg in &list.args {
                let expr = match arg {
                    FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => Some(expr),
                    FunctionArg::Named {
                        arg: FunctionArgExpr::Expr(expr),
                        ..
                    } => Some(expr),
                    _ => None,
                };
                if let Some(expr) = expr {
                    self.walk_expr(expr);
                }
            }
        }
    }

    /// Rules 1, 9: register a table reference unless its simple name is
    /// masked by an enclosing CTE scope, deduping on the canonical name.
    fn register(&mut self, name: &ObjectName) {
        let parts: Vec<String> = name
            .0
            .iter()
            .map(|part| match part {
                ObjectNamePart::Identifier(ident) => normalize_ident(ident),
                #[allow(unreachable_patterns)]
                other => other.to_string(),
            })
            .collect();
        if parts.is_empty() {
            return;
        }
        let simple_name = parts.last().unwrap();
        let masked = self
            .cte_scopes
            .iter()
            .any(|scope| scope.contains(simple_name));
        if masked {
            return;
        }

        let reference = TableReference::from_parts(&parts);
        let canonical = reference.fully_qualified_name();
        if self.seen.insert(canonical) {
            self.out.push(reference);
        }
    }
}

fn join_constraint_expr(operator: &sqlparser::ast::JoinOperator) -> Option<&Expr> {
    use sqlparser::ast::{JoinConstraint, JoinOperator};
    let constraint = match operator {
        JoinOperator::Inner(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c) => c,
        _ => return None,
    };
    match constraint {
        JoinConstraint::On(expr) => Some(expr),
        _ => None,
    }
}
