//! ESTree node model.
//!
//! One struct per discriminator, gathered under the closed [`Node`] sum type.
//! Children that the schema types as "any expression" / "any statement" are
//! held through [`AnyNode`]; children with a fixed shape (a function body, a
//! class body, ...) are held as the concrete struct and decoded directly.
pub mod declarations;
pub mod expressions;
pub mod statements;

use std::fmt;
use std::ops::Deref;

use crate::decode::{Cursor, Decode, DecodeError};

pub use declarations::*;
pub use expressions::*;
pub use statements::*;

macro_rules! node_kinds {
    ($($variant:ident),* $(,)?) => {
        /// Every syntax construct the decoder knows about.
        #[derive(Clone, PartialEq)]
        pub enum Node {
            $($variant($variant),)*
        }

        /// The closed discriminator registry, one entry per [`Node`] variant.
        pub const NODE_TYPES: &[&str] = &[$(stringify!($variant)),*];

        impl Node {
            /// The discriminator this node was decoded from.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)*
                }
            }

            /// Decode `cursor` as the variant registered under `discriminator`.
            /// `None` means the discriminator is not registered.
            pub(crate) fn decode_variant(
                discriminator: &str,
                cursor: &Cursor<'_>,
            ) -> Option<Result<Self, DecodeError>> {
                match discriminator {
                    $(stringify!($variant) => Some($variant::decode(cursor).map(Self::$variant)),)*
                    _ => None,
                }
            }
        }

        impl fmt::Debug for Node {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant(node) => node.fmt(f),)*
                }
            }
        }

        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self { Self::$variant(node) }
            }
        )*
    };
}

node_kinds! {
    ArrayExpression,
    ArrayPattern,
    ArrowFunctionExpression,
    AssignmentExpression,
    AssignmentPattern,
    AwaitExpression,
    BinaryExpression,
    BlockStatement,
    BreakStatement,
    CallExpression,
    CatchClause,
    ClassBody,
    ClassDeclaration,
    ClassExpression,
    ConditionalExpression,
    ContinueStatement,
    DebuggerStatement,
    DoWhileStatement,
    EmptyStatement,
    ExportAllDeclaration,
    ExportDefaultDeclaration,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExpressionStatement,
    ForInStatement,
    ForOfStatement,
    ForStatement,
    FunctionDeclaration,
    FunctionExpression,
    Identifier,
    IfStatement,
    Import,
    ImportSpecifier,
    LabeledStatement,
    Literal,
    LogicalExpression,
    MemberExpression,
    MetaProperty,
    MethodDefinition,
    NewExpression,
    ObjectExpression,
    ObjectPattern,
    Program,
    Property,
    RestElement,
    ReturnStatement,
    SequenceExpression,
    SpreadElement,
    Super,
    SwitchCase,
    SwitchStatement,
    TaggedTemplateExpression,
    TemplateElement,
    TemplateLiteral,
    ThisExpression,
    ThrowStatement,
    TryStatement,
    UnaryExpression,
    UpdateExpression,
    VariableDeclaration,
    VariableDeclarator,
    WhileStatement,
    WithStatement,
    YieldExpression,
}

impl Node {
    /// The name this node contributes to a type path, if it names anything.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Self::Identifier(identifier) => Some(&identifier.name),
            _ => None,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INDIRECT HANDLE
// ————————————————————————————————————————————————————————————————————————————

/// Owns exactly one node of any kind. Decoding goes through the discriminator.
#[derive(Clone, PartialEq)]
pub struct AnyNode(Box<Node>);

impl AnyNode {
    pub fn new(node: impl Into<Node>) -> Self {
        Self(Box::new(node.into()))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    pub fn into_node(self) -> Node {
        *self.0
    }
}

impl Deref for AnyNode {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.0
    }
}

impl fmt::Debug for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Decode for AnyNode {
    fn decode(cursor: &Cursor<'_>) -> Result<Self, DecodeError> {
        let discriminator: String = cursor.field("type")?;
        match Node::decode_variant(&discriminator, cursor) {
            Some(node) => node.map(|node| Self(Box::new(node))),
            None => Err(DecodeError::UnknownDiscriminator {
                discriminator,
                path: cursor.path().clone(),
            }),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
