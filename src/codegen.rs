//! Swift text from the node model.
//!
//! Every construct renders through [`SwiftCode`], threading a [`TypeContext`]
//! so bindings, parameters and return types can be annotated from hints.
//! Constructs without a rendering degrade to a placeholder in the output;
//! shapes that have a rendering but cannot be expressed safely are errors.
pub mod declarations;
pub mod expressions;
pub mod statements;

use std::fmt;

use thiserror::Error;

use crate::ast::{AnyNode, Node};
use crate::types::TypeContext;

pub use statements::{contains_continue, returns_value};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("unsupported {construct}: {detail}")]
    Unsupported { construct: &'static str, detail: String },
}

pub trait SwiftCode {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Result<String, GenerateError>;
}

impl GenerateError {
    pub(crate) fn unsupported(construct: &'static str, detail: impl Into<String>) -> Self {
        Self::Unsupported { construct, detail: detail.into() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DISPATCH
// ————————————————————————————————————————————————————————————————————————————

impl SwiftCode for Node {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Result<String, GenerateError> {
        match self {
            // expressions
            Self::Identifier(node) => node.swift_code(cx),
            Self::Literal(node) => node.swift_code(cx),
            Self::ThisExpression(_) => Ok(String::from("self")),
            Self::Super(_) => Ok(String::from("super")),
            Self::ArrayExpression(node) => node.swift_code(cx),
            Self::ObjectExpression(node) => node.swift_code(cx),
            Self::Property(node) => node.swift_code(cx),
            Self::FunctionExpression(node) => node.swift_code(cx),
            Self::ArrowFunctionExpression(node) => node.swift_code(cx),
            Self::TemplateLiteral(node) => node.swift_code(cx),
            Self::TemplateElement(node) => node.swift_code(cx),
            Self::MemberExpression(node) => node.swift_code(cx),
            Self::CallExpression(node) => node.swift_code(cx),
            Self::NewExpression(node) => node.swift_code(cx),
            Self::UpdateExpression(node) => node.swift_code(cx),
            Self::AwaitExpression(node) => node.swift_code(cx),
            Self::UnaryExpression(node) => node.swift_code(cx),
            Self::BinaryExpression(node) => node.swift_code(cx),
            Self::LogicalExpression(node) => node.swift_code(cx),
            Self::ConditionalExpression(node) => node.swift_code(cx),
            Self::AssignmentExpression(node) => node.swift_code(cx),
            // statements
            Self::BlockStatement(node) => node.swift_code(cx),
            Self::BreakStatement(node) => node.swift_code(cx),
            Self::ContinueStatement(node) => node.swift_code(cx),
            Self::DoWhileStatement(node) => node.swift_code(cx),
            Self::EmptyStatement(_) => Ok(String::new()),
            Self::ExpressionStatement(node) => node.swift_code(cx),
            Self::ForStatement(node) => node.swift_code(cx),
            Self::ForInStatement(node) => node.swift_code(cx),
            Self::ForOfStatement(node) => node.swift_code(cx),
            Self::IfStatement(node) => node.swift_code(cx),
            Self::LabeledStatement(node) => node.swift_code(cx),
            Self::ReturnStatement(node) => node.swift_code(cx),
            Self::SwitchStatement(node) => node.swift_code(cx),
            Self::SwitchCase(node) => node.swift_code(cx),
            Self::ThrowStatement(node) => node.swift_code(cx),
            Self::TryStatement(node) => node.swift_code(cx),
            Self::WhileStatement(node) => node.swift_code(cx),
            // declarations
            Self::Program(node) => node.swift_code(cx),
            Self::VariableDeclaration(node) => node.swift_code(cx),
            Self::VariableDeclarator(node) => node.swift_code(cx),
            Self::ArrayPattern(node) => node.swift_code(cx),
            Self::AssignmentPattern(node) => node.swift_code(cx),
            Self::FunctionDeclaration(node) => node.swift_code(cx),
            Self::ClassDeclaration(node) => node.swift_code(cx),
            Self::ClassBody(node) => node.swift_code(cx),
            Self::MethodDefinition(node) => node.swift_code(cx),
            Self::ExportDefaultDeclaration(node) => node.swift_code(cx),
            Self::ExportNamedDeclaration(node) => node.swift_code(cx),
            Self::CatchClause(_)
            | Self::ClassExpression(_)
            | Self::DebuggerStatement(_)
            | Self::ExportAllDeclaration(_)
            | Self::ExportSpecifier(_)
            | Self::Import(_)
            | Self::ImportSpecifier(_)
            | Self::MetaProperty(_)
            | Self::ObjectPattern(_)
            | Self::RestElement(_)
            | Self::SequenceExpression(_)
            | Self::SpreadElement(_)
            | Self::TaggedTemplateExpression(_)
            | Self::WithStatement(_)
            | Self::YieldExpression(_) => Ok(placeholder(self)),
        }
    }
}

impl SwiftCode for AnyNode {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Result<String, GenerateError> {
        self.node().swift_code(cx)
    }
}

impl<T: SwiftCode> SwiftCode for Option<T> {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Result<String, GenerateError> {
        match self {
            Some(node) => node.swift_code(cx),
            None => Ok(String::new()),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Marker for a construct with no Swift rendering. Not valid Swift on purpose.
pub fn placeholder(node: &Node) -> String {
    placeholder_of(node.type_name(), node)
}

pub(crate) fn placeholder_of(type_name: &str, value: &dyn fmt::Debug) -> String {
    log::warn!("no Swift rendering for {type_name}; emitting a placeholder");
    let debug = format!("{value:?}").replace("/*", "/ *").replace("*/", "* /");
    format!("«{type_name}» /* {debug} */")
}

/// Render each node and join the results with `separator`.
pub(crate) fn join<'n, T: SwiftCode + 'n>(
    nodes: impl IntoIterator<Item = &'n T>,
    separator: &str,
    cx: &TypeContext<'_>,
) -> Result<String, GenerateError> {
    let parts = nodes
        .into_iter()
        .map(|node| node.swift_code(cx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parts.join(separator))
}

/// Render statements one per line, dropping the ones that render to nothing.
pub(crate) fn lines<'n, T: SwiftCode + 'n>(
    statements: impl IntoIterator<Item = &'n T>,
    cx: &TypeContext<'_>,
) -> Result<String, GenerateError> {
    let mut out = Vec::new();
    for statement in statements {
        let code = statement.swift_code(cx)?;
        if !code.is_empty() {
            out.push(code);
        }
    }
    Ok(out.join("\n"))
}

/// `{ ... }` around already rendered statements.
pub(crate) fn braces(body: &str) -> String {
    if body.is_empty() {
        String::from("{\n}")
    } else {
        format!("{{\n{body}\n}}")
    }
}

/// Type text for a slot: the hint, or `/* path */ Any` when none resolves.
pub(crate) fn annotation(cx: &TypeContext<'_>) -> String {
    cx.resolve().unwrap_or_else(|| format!("/* {} */ Any", cx.path_text()))
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::decode::decode_node;
    use crate::types::{TypeHints, TypeRecords};
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use test_log::test;

    /// Render `node` from an empty root path with the given hints.
    pub(crate) fn render_with(node: Value, hints: Value) -> (String, TypeRecords) {
        let node = decode_node(&node).unwrap();
        let hints: TypeHints = serde_json::from_value(hints).unwrap();
        let records = RefCell::new(TypeRecords::new());
        let code = node.swift_code(&TypeContext::root(&hints, &records)).unwrap();
        (code, records.into_inner())
    }

    pub(crate) fn render(node: Value) -> String {
        render_with(node, json!({})).0
    }

    pub(crate) fn id(name: &str) -> Value {
        json!({"type": "Identifier", "name": name})
    }

    pub(crate) fn num(value: i64) -> Value {
        json!({"type": "Literal", "value": value, "raw": value.to_string()})
    }

    pub(crate) fn block(body: Vec<Value>) -> Value {
        json!({"type": "BlockStatement", "body": body})
    }

    pub(crate) fn stmt(expression: Value) -> Value {
        json!({"type": "ExpressionStatement", "expression": expression})
    }

    pub(crate) fn call(callee: &str, arguments: Vec<Value>) -> Value {
        json!({"type": "CallExpression", "callee": id(callee), "arguments": arguments})
    }

    #[test]
    fn unrendered_constructs_become_marked_placeholders() {
        let code = render(json!({"type": "DebuggerStatement"}));
        assert!(code.starts_with("«DebuggerStatement» /* "), "{code}");
        assert!(code.ends_with(" */"), "{code}");
    }

    #[test]
    fn placeholder_comments_cannot_close_early() {
        let code = render(json!({
            "type": "YieldExpression",
            "argument": {"type": "Literal", "value": "*/ oops /*", "raw": "'*/ oops /*'"},
            "delegate": false,
        }));
        assert_eq!(code.matches("*/").count(), 1, "{code}");
        assert_eq!(code.matches("/*").count(), 1, "{code}");
    }

    #[test]
    fn missing_hints_annotate_with_the_path() {
        let hints = TypeHints::default();
        let records = RefCell::new(TypeRecords::new());
        let cx = TypeContext::root(&hints, &records).descend("f").descend("x");
        assert_eq!(annotation(&cx), "/* f, x */ Any");
    }
}
