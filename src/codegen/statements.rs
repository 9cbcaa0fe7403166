use super::{GenerateError, SwiftCode, braces, lines, placeholder_of};
use crate::ast::{
    AnyNode, BlockStatement, BreakStatement, ContinueStatement, DoWhileStatement,
    ExpressionStatement, ForInStatement, ForOfStatement, ForStatement, Identifier, IfStatement,
    LabeledStatement, Node, ReturnStatement, SwitchCase, SwitchStatement, ThrowStatement,
    TryStatement, WhileStatement,
};
use crate::literal;
use crate::types::TypeContext;

type Generated = Result<String, GenerateError>;

/// A loop or `if` body as a braced block, whatever statement the source used.
fn body_block(body: &AnyNode, cx: &TypeContext<'_>) -> Generated {
    match body.node() {
        Node::BlockStatement(block) => block.swift_code(cx),
        _ => Ok(braces(&body.swift_code(cx)?)),
    }
}

fn body_statements(body: &AnyNode) -> &[AnyNode] {
    match body.node() {
        Node::BlockStatement(block) => &block.body,
        _ => std::slice::from_ref(body),
    }
}

/// An expression in statement position; comma sequences become one line each.
fn expression_lines(expression: &AnyNode, cx: &TypeContext<'_>) -> Generated {
    match expression.node() {
        Node::SequenceExpression(sequence) => lines(&sequence.expressions, cx),
        _ => expression.swift_code(cx),
    }
}

fn jump(keyword: &str, label: Option<&Identifier>) -> String {
    match label {
        Some(label) => format!("{keyword} {}", label.name),
        None => keyword.to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONTROL FLOW SEARCH
// ————————————————————————————————————————————————————————————————————————————

/// Whether `hit` matches `node` or any statement nested in it. Function and
/// class bodies are not entered; `hit` is told whether a nested loop was.
fn search(node: &Node, in_loop: bool, hit: &dyn Fn(&Node, bool) -> bool) -> bool {
    if hit(node, in_loop) {
        return true;
    }
    match node {
        Node::BlockStatement(block) => search_all(&block.body, in_loop, hit),
        Node::IfStatement(statement) => {
            search(&statement.consequent, in_loop, hit)
                || statement.alternate.as_ref().is_some_and(|alternate| search(alternate, in_loop, hit))
        }
        Node::LabeledStatement(statement) => search(&statement.body, in_loop, hit),
        Node::WithStatement(statement) => search(&statement.body, in_loop, hit),
        Node::WhileStatement(statement) => search(&statement.body, true, hit),
        Node::DoWhileStatement(statement) => search(&statement.body, true, hit),
        Node::ForStatement(statement) => search(&statement.body, true, hit),
        Node::ForInStatement(statement) => search(&statement.body, true, hit),
        Node::ForOfStatement(statement) => search(&statement.body, true, hit),
        Node::SwitchStatement(statement) => {
            statement.cases.iter().any(|case| search_all(&case.consequent, in_loop, hit))
        }
        Node::TryStatement(statement) => {
            search_all(&statement.block.body, in_loop, hit)
                || statement.handler.as_ref().is_some_and(|handler| search_all(&handler.body.body, in_loop, hit))
                || statement.finalizer.as_ref().is_some_and(|finalizer| search_all(&finalizer.body, in_loop, hit))
        }
        _ => false,
    }
}

fn search_all(nodes: &[AnyNode], in_loop: bool, hit: &dyn Fn(&Node, bool) -> bool) -> bool {
    nodes.iter().any(|node| search(node, in_loop, hit))
}

/// Whether a function body hands back a value somewhere.
pub fn returns_value(body: &[AnyNode]) -> bool {
    search_all(body, false, &|node, _| {
        matches!(node, Node::ReturnStatement(ReturnStatement { argument: Some(_) }))
    })
}

/// Whether a loop body can skip to its next iteration. Labeled continues in
/// inner loops count since they may target this loop.
pub fn contains_continue(body: &Node) -> bool {
    search(body, false, &|node, in_loop| {
        matches!(node, Node::ContinueStatement(statement) if !in_loop || statement.label.is_some())
    })
}

// ————————————————————————————————————————————————————————————————————————————
// STATEMENTS
// ————————————————————————————————————————————————————————————————————————————

impl SwiftCode for BlockStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(braces(&lines(&self.body, cx)?))
    }
}

impl SwiftCode for ExpressionStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        if let Some(directive) = &self.directive {
            return Ok(format!("// {directive}"));
        }
        expression_lines(&self.expression, cx)
    }
}

impl SwiftCode for IfStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let mut code = format!("if {} {}", self.test.swift_code(cx)?, body_block(&self.consequent, cx)?);
        if let Some(alternate) = &self.alternate {
            let rendered = match alternate.node() {
                Node::IfStatement(chained) => chained.swift_code(cx)?,
                _ => body_block(alternate, cx)?,
            };
            code.push_str(&format!(" else {rendered}"));
        }
        Ok(code)
    }
}

impl SwiftCode for WhileStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("while {} {}", self.test.swift_code(cx)?, body_block(&self.body, cx)?))
    }
}

impl SwiftCode for DoWhileStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("repeat {} while {}", body_block(&self.body, cx)?, self.test.swift_code(cx)?))
    }
}

/// `for (init; test; update) body` runs as a `while` inside a `do` scope so
/// the loop bindings end with the loop. A body that can `continue` gets its
/// update as a `defer` so skipped iterations still step.
impl SwiftCode for ForStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let test = match &self.test {
            Some(test) => test.swift_code(cx)?,
            None => String::from("true"),
        };
        let update = match &self.update {
            Some(update) => expression_lines(update, cx)?,
            None => String::new(),
        };
        let body = lines(body_statements(&self.body), cx)?;
        let looped = if update.is_empty() {
            body
        } else if contains_continue(&self.body) {
            [format!("defer {}", braces(&update)), body]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            [body, update].into_iter().filter(|part| !part.is_empty()).collect::<Vec<_>>().join("\n")
        };
        let mut scope = Vec::new();
        if let Some(init) = &self.init {
            scope.push(expression_lines(init, cx)?);
        }
        scope.push(format!("while {test} {}", braces(&looped)));
        Ok(format!("do {}", braces(&scope.join("\n"))))
    }
}

impl SwiftCode for ForInStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let Some(binding) = self.binding() else {
            return Err(GenerateError::unsupported(
                "for-in binding",
                format!("{:?} (expected one declared identifier)", self.left),
            ));
        };
        Ok(format!(
            "for {} in JST.keys({}) {}",
            literal::identifier(&binding.name),
            self.right.swift_code(cx)?,
            body_block(&self.body, cx)?,
        ))
    }
}

impl SwiftCode for ForOfStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let Some(binding) = self.binding() else {
            return Err(GenerateError::unsupported(
                "for-of binding",
                format!("{:?} (expected one declared identifier)", self.left),
            ));
        };
        Ok(format!(
            "for {} in JST.values({}) {}",
            literal::identifier(&binding.name),
            self.right.swift_code(cx)?,
            body_block(&self.body, cx)?,
        ))
    }
}

impl SwiftCode for BreakStatement {
    fn swift_code(&self, _: &TypeContext<'_>) -> Generated {
        Ok(jump("break", self.label.as_ref()))
    }
}

impl SwiftCode for ContinueStatement {
    fn swift_code(&self, _: &TypeContext<'_>) -> Generated {
        Ok(jump("continue", self.label.as_ref()))
    }
}

impl SwiftCode for LabeledStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("{}: {}", self.label.name, self.body.swift_code(cx)?))
    }
}

impl SwiftCode for ReturnStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        match &self.argument {
            Some(argument) => Ok(format!("return {}", argument.swift_code(cx)?)),
            None => Ok(String::from("return")),
        }
    }
}

impl SwiftCode for ThrowStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("throw {}", self.argument.swift_code(cx)?))
    }
}

/// The finalizer runs on every exit from the `do` body as a leading `defer`.
impl SwiftCode for TryStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let mut body = Vec::new();
        if let Some(finalizer) = &self.finalizer {
            body.push(format!("defer {}", finalizer.swift_code(cx)?));
        }
        let block = lines(&self.block.body, cx)?;
        if !block.is_empty() {
            body.push(block);
        }
        let mut code = format!("do {}", braces(&body.join("\n")));
        if let Some(handler) = &self.handler {
            let clause = match handler.param.as_ref().map(|param| param.node()) {
                None => String::from("catch"),
                Some(Node::Identifier(identifier)) => {
                    format!("catch let {}", literal::identifier(&identifier.name))
                }
                Some(other) => {
                    return Err(GenerateError::unsupported("catch parameter", other.type_name()));
                }
            };
            code.push_str(&format!(" {clause} {}", handler.body.swift_code(cx)?));
        }
        Ok(code)
    }
}

/// Swift cases do not fall through and a switch must be exhaustive.
fn ends_in_jump(case: &SwitchCase) -> bool {
    matches!(
        case.consequent.last().map(|statement| statement.node()),
        Some(
            Node::BreakStatement(_)
                | Node::ContinueStatement(_)
                | Node::ReturnStatement(_)
                | Node::ThrowStatement(_)
        )
    )
}

/// Swift wants `default` last. A default written earlier moves down when
/// nothing falls into or out of it; otherwise the switch is a placeholder.
impl SwiftCode for SwitchStatement {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let default = self.cases.iter().position(|case| case.test.is_none());
        if let Some(ix) = default.filter(|ix| ix + 1 < self.cases.len()) {
            let entered_alone = ix == 0 || !self.cases[ix - 1].consequent.is_empty();
            if !entered_alone || !ends_in_jump(&self.cases[ix]) {
                return Ok(placeholder_of("SwitchStatement", self));
            }
        }
        let mut cases = self
            .cases
            .iter()
            .filter(|case| case.test.is_some())
            .map(|case| case.swift_code(cx))
            .collect::<Result<Vec<_>, _>>()?;
        match default {
            Some(ix) => cases.push(self.cases[ix].swift_code(cx)?),
            None => cases.push(String::from("default:\nbreak")),
        }
        Ok(format!("switch {} {}", self.discriminant.swift_code(cx)?, braces(&cases.join("\n"))))
    }
}

impl SwiftCode for SwitchCase {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let body = lines(&self.consequent, cx)?;
        match &self.test {
            Some(test) => {
                let body = if body.is_empty() { String::from("fallthrough") } else { body };
                Ok(format!("case {}:\n{body}", test.swift_code(cx)?))
            }
            None => {
                let body = if body.is_empty() { String::from("break") } else { body };
                Ok(format!("default:\n{body}"))
            }
        }
    }
}
