use super::{AnyNode, BlockStatement};
use crate::decode::{impl_decode, impl_decode_enum};
use crate::scalar::ScalarValue;

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Literal {
    /// bool | number | string | null, or an empty map for regular expressions
    pub value: ScalarValue,
    pub raw: String,
    pub regex: Option<LiteralRegex>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LiteralRegex {
    pub pattern: String,
    pub flags: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThisExpression {}

#[derive(Clone, Debug, PartialEq)]
pub struct Super {}

/// `null` elements are holes (`[a, , b]`).
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<Option<AnyNode>>,
}

/// Properties are `Property` or `SpreadElement`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectExpression {
    pub properties: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: AnyNode,
    pub computed: bool,
    pub value: Option<AnyNode>,
    pub kind: PropertyKind,
    pub method: bool,
    pub shorthand: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionExpression {
    pub id: Option<Identifier>,
    pub params: Vec<AnyNode>,
    pub body: BlockStatement,
    pub generator: bool,
    pub is_async: bool,
    pub expression: bool,
}

/// `body` is a `BlockStatement` or, for `x => x + 1`, an expression.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowFunctionExpression {
    pub id: Option<Identifier>,
    pub params: Vec<AnyNode>,
    pub body: AnyNode,
    pub generator: bool,
    pub is_async: bool,
    pub expression: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TaggedTemplateExpression {
    pub tag: AnyNode,
    pub quasi: TemplateLiteral,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemplateElement {
    pub value: TemplateElementValue,
    pub tail: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemplateElementValue {
    /// `None` for tagged templates holding an invalid escape.
    pub cooked: Option<String>,
    pub raw: String,
}

/// `quasis.len() == expressions.len() + 1` for well-formed input.
#[derive(Clone, Debug, PartialEq)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpression {
    pub computed: bool,
    pub object: AnyNode,
    pub property: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MetaProperty {
    pub meta: Identifier,
    pub property: Identifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub callee: AnyNode,
    pub arguments: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewExpression {
    pub callee: AnyNode,
    pub arguments: Vec<AnyNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Import {}

#[derive(Clone, Debug, PartialEq)]
pub struct SpreadElement {
    pub argument: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub argument: AnyNode,
    pub prefix: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AwaitExpression {
    pub argument: AnyNode,
}

/// `operator` is one of `+ - ~ ! delete void typeof`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpression {
    pub operator: String,
    pub argument: AnyNode,
    pub prefix: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpression {
    pub operator: String,
    pub left: AnyNode,
    pub right: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogicalExpression {
    pub operator: String,
    pub left: AnyNode,
    pub right: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalExpression {
    pub test: AnyNode,
    pub consequent: AnyNode,
    pub alternate: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct YieldExpression {
    pub argument: Option<AnyNode>,
    pub delegate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentExpression {
    pub operator: String,
    pub left: AnyNode,
    pub right: AnyNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SequenceExpression {
    pub expressions: Vec<AnyNode>,
}

// ————————————————————————————————————————————————————————————————————————————
// DECODING
// ————————————————————————————————————————————————————————————————————————————

impl_decode!(Identifier { name: "name" });
impl_decode!(Literal { value: "value", raw: "raw", regex: "regex" });
impl_decode!(LiteralRegex { pattern: "pattern", flags: "flags" });
impl_decode!(ThisExpression {});
impl_decode!(Super {});
impl_decode!(ArrayExpression { elements: "elements" });
impl_decode!(ObjectExpression { properties: "properties" });
impl_decode!(Property {
    key: "key",
    computed: "computed",
    value: "value",
    kind: "kind",
    method: "method" or false,
    shorthand: "shorthand" or false,
});
impl_decode_enum!(PropertyKind { Init = "init", Get = "get", Set = "set" });
impl_decode!(FunctionExpression {
    id: "id",
    params: "params",
    body: "body",
    generator: "generator" or false,
    is_async: "async" or false,
    expression: "expression" or false,
});
impl_decode!(ArrowFunctionExpression {
    id: "id",
    params: "params",
    body: "body",
    generator: "generator" or false,
    is_async: "async" or false,
    expression: "expression" or false,
});
impl_decode!(TaggedTemplateExpression { tag: "tag", quasi: "quasi" });
impl_decode!(TemplateElement { value: "value", tail: "tail" or false });
impl_decode!(TemplateElementValue { cooked: "cooked", raw: "raw" });
impl_decode!(TemplateLiteral { quasis: "quasis", expressions: "expressions" });
impl_decode!(MemberExpression { computed: "computed", object: "object", property: "property" });
impl_decode!(MetaProperty { meta: "meta", property: "property" });
impl_decode!(CallExpression { callee: "callee", arguments: "arguments" });
impl_decode!(NewExpression { callee: "callee", arguments: "arguments" });
impl_decode!(Import {});
impl_decode!(SpreadElement { argument: "argument" });
impl_decode!(UpdateExpression { operator: "operator", argument: "argument", prefix: "prefix" });
impl_decode_enum!(UpdateOperator { Increment = "++", Decrement = "--" });
impl_decode!(AwaitExpression { argument: "argument" });
impl_decode!(UnaryExpression { operator: "operator", argument: "argument", prefix: "prefix" or true });
impl_decode!(BinaryExpression { operator: "operator", left: "left", right: "right" });
impl_decode!(LogicalExpression { operator: "operator", left: "left", right: "right" });
impl_decode!(ConditionalExpression { test: "test", consequent: "consequent", alternate: "alternate" });
impl_decode!(YieldExpression { argument: "argument", delegate: "delegate" or false });
impl_decode!(AssignmentExpression { operator: "operator", left: "left", right: "right" });
impl_decode!(SequenceExpression { expressions: "expressions" });
