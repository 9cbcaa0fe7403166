use super::{AnyNode, Identifier, Node, VariableDeclaration};
use crate::decode::impl_decode;

#[derive(Clone, Debug, PartialEq)]
pub struct BlockStatement {
    pub body: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BreakStatement {
    pub label: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContinueStatement {
    pub label: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DebuggerStatement {}

#[derive(Clone, Debug, PartialEq)]
pub struct DoWhileStatement {
    pub body: AnyNode,
    pub test: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmptyStatement {}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionStatement {
    pub expression: AnyNode,
    /// Set for prologue directives such as `"use strict"`.
    pub directive: Option<String>,
}

/// `init` is an expression, a `VariableDeclaration`, or absent.
#[derive(Clone, Debug, PartialEq)]
pub struct ForStatement {
    pub init: Option<AnyNode>,
    pub test: Option<AnyNode>,
    pub update: Option<AnyNode>,
    pub body: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForInStatement {
    pub left: AnyNode,
    pub right: AnyNode,
    pub body: AnyNode,
    pub each: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForOfStatement {
    pub left: AnyNode,
    pub right: AnyNode,
    pub body: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStatement {
    pub test: AnyNode,
    pub consequent: AnyNode,
    pub alternate: Option<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabeledStatement {
    pub label: Identifier,
    pub body: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReturnStatement {
    pub argument: Option<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStatement {
    pub discriminant: AnyNode,
    pub cases: Vec<SwitchCase>,
}

/// `test` is absent for `default:`.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub test: Option<AnyNode>,
    pub consequent: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThrowStatement {
    pub argument: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TryStatement {
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchClause {
    /// Absent for `catch { }` (optional catch binding).
    pub param: Option<AnyNode>,
    pub body: BlockStatement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStatement {
    pub test: AnyNode,
    pub body: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WithStatement {
    pub object: AnyNode,
    pub body: AnyNode,
}

impl ForInStatement {
    /// The identifier bound by `for (let k in ...)`, when that is the shape.
    pub fn binding(&self) -> Option<&Identifier> {
        single_binding(&self.left)
    }
}

impl ForOfStatement {
    pub fn binding(&self) -> Option<&Identifier> {
        single_binding(&self.left)
    }
}

fn single_binding(left: &AnyNode) -> Option<&Identifier> {
    let Node::VariableDeclaration(VariableDeclaration { declarations, .. }) = left.node() else {
        return None;
    };
    match declarations.as_slice() {
        [declarator] => match declarator.id.node() {
            Node::Identifier(identifier) => Some(identifier),
            _ => None,
        },
        _ => None,
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECODING
// ————————————————————————————————————————————————————————————————————————————

impl_decode!(BlockStatement { body: "body" });
impl_decode!(BreakStatement { label: "label" });
impl_decode!(ContinueStatement { label: "label" });
impl_decode!(DebuggerStatement {});
impl_decode!(DoWhileStatement { body: "body", test: "test" });
impl_decode!(EmptyStatement {});
impl_decode!(ExpressionStatement { expression: "expression", directive: "directive" });
impl_decode!(ForStatement { init: "init", test: "test", update: "update", body: "body" });
impl_decode!(ForInStatement { left: "left", right: "right", body: "body", each: "each" or false });
impl_decode!(ForOfStatement { left: "left", right: "right", body: "body" });
impl_decode!(IfStatement { test: "test", consequent: "consequent", alternate: "alternate" });
impl_decode!(LabeledStatement { label: "label", body: "body" });
impl_decode!(ReturnStatement { argument: "argument" });
impl_decode!(SwitchStatement { discriminant: "discriminant", cases: "cases" });
impl_decode!(SwitchCase { test: "test", consequent: "consequent" });
impl_decode!(ThrowStatement { argument: "argument" });
impl_decode!(TryStatement { block: "block", handler: "handler", finalizer: "finalizer" });
impl_decode!(CatchClause { param: "param", body: "body" });
impl_decode!(WhileStatement { test: "test", body: "body" });
impl_decode!(WithStatement { object: "object", body: "body" });
