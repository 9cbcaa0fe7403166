use super::{AnyNode, BlockStatement, FunctionExpression, Identifier, Literal};
use crate::decode::{impl_decode, impl_decode_enum};

#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    /// `script` or `module`
    pub source_type: String,
    pub body: Vec<AnyNode>,
}

// ---------------------------------- Bindings ------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub declarations: Vec<VariableDeclarator>,
    pub kind: VariableKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

/// `id` is an `Identifier` or a binding pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarator {
    pub id: AnyNode,
    pub init: Option<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPattern {
    pub elements: Vec<Option<AnyNode>>,
}

/// Properties are `Property` or `RestElement`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RestElement {
    pub argument: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentPattern {
    pub left: AnyNode,
    pub right: AnyNode,
}

// --------------------------------- Functions ------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDeclaration {
    pub id: Option<Identifier>,
    pub params: Vec<AnyNode>,
    pub body: BlockStatement,
    pub generator: bool,
    pub is_async: bool,
    pub expression: bool,
}

// ---------------------------------- Classes -------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub struct ClassDeclaration {
    pub id: Option<Identifier>,
    pub super_class: Option<AnyNode>,
    pub body: ClassBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassExpression {
    pub id: Option<Identifier>,
    pub super_class: Option<AnyNode>,
    pub body: ClassBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassBody {
    pub body: Vec<MethodDefinition>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDefinition {
    pub key: Option<AnyNode>,
    pub computed: bool,
    pub value: Option<FunctionExpression>,
    pub kind: MethodKind,
    pub is_static: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Constructor,
    Get,
    Set,
}

// ---------------------------------- Modules -------------------------------- //

#[derive(Clone, Debug, PartialEq)]
pub struct ImportSpecifier {
    pub local: Identifier,
    pub imported: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportAllDeclaration {
    pub source: Literal,
}

/// `declaration` is a class, a function, or any expression.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDefaultDeclaration {
    pub declaration: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportNamedDeclaration {
    pub declaration: Option<AnyNode>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<Literal>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportSpecifier {
    pub exported: Identifier,
    pub local: Identifier,
}

// ————————————————————————————————————————————————————————————————————————————
// DECODING
// ————————————————————————————————————————————————————————————————————————————

impl_decode!(Program { source_type: "sourceType" or String::from("script"), body: "body" });
impl_decode!(VariableDeclaration { declarations: "declarations", kind: "kind" });
impl_decode_enum!(VariableKind { Var = "var", Let = "let", Const = "const" });
impl_decode!(VariableDeclarator { id: "id", init: "init" });
impl_decode!(ArrayPattern { elements: "elements" });
impl_decode!(ObjectPattern { properties: "properties" });
impl_decode!(RestElement { argument: "argument" });
impl_decode!(AssignmentPattern { left: "left", right: "right" });
impl_decode!(FunctionDeclaration {
    id: "id",
    params: "params",
    body: "body",
    generator: "generator" or false,
    is_async: "async" or false,
    expression: "expression" or false,
});
impl_decode!(ClassDeclaration { id: "id", super_class: "superClass", body: "body" });
impl_decode!(ClassExpression { id: "id", super_class: "superClass", body: "body" });
impl_decode!(ClassBody { body: "body" });
impl_decode!(MethodDefinition {
    key: "key",
    computed: "computed" or false,
    value: "value",
    kind: "kind",
    is_static: "static" or false,
});
impl_decode_enum!(MethodKind {
    Method = "method",
    Constructor = "constructor",
    Get = "get",
    Set = "set",
});
impl_decode!(ImportSpecifier { local: "local", imported: "imported" });
impl_decode!(ExportAllDeclaration { source: "source" });
impl_decode!(ExportDefaultDeclaration { declaration: "declaration" });
impl_decode!(ExportNamedDeclaration { declaration: "declaration", specifiers: "specifiers", source: "source" });
impl_decode!(ExportSpecifier { exported: "exported", local: "local" });
