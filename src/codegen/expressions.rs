use super::{GenerateError, SwiftCode, braces, join, lines, placeholder_of};
use crate::ast::{
    AnyNode, ArrayExpression, ArrowFunctionExpression, AssignmentExpression, AwaitExpression,
    BinaryExpression, CallExpression, ConditionalExpression, FunctionExpression, Identifier,
    Literal, LogicalExpression, MemberExpression, NewExpression, Node, ObjectExpression, Property,
    PropertyKind, TemplateElement, TemplateLiteral, UnaryExpression, UpdateExpression,
    UpdateOperator,
};
use crate::literal;
use crate::scalar::ScalarValue;
use crate::types::TypeContext;

type Generated = Result<String, GenerateError>;

/// Operands that are themselves operator expressions keep their grouping.
fn operand(node: &AnyNode, cx: &TypeContext<'_>) -> Generated {
    let code = node.swift_code(cx)?;
    Ok(match node.node() {
        Node::AssignmentExpression(_)
        | Node::BinaryExpression(_)
        | Node::ConditionalExpression(_)
        | Node::LogicalExpression(_) => format!("({code})"),
        _ => code,
    })
}

fn binary(operator: &str, left: &AnyNode, right: &AnyNode, cx: &TypeContext<'_>) -> Generated {
    let left = operand(left, cx)?;
    let right = operand(right, cx)?;
    Ok(match operator {
        "===" => format!("{left} == {right}"),
        "!==" => format!("{left} != {right}"),
        "instanceof" => format!("{left} is {right}"),
        "in" => format!("JST.contains({left}, {right})"),
        _ => format!("{left} {operator} {right}"),
    })
}

/// Closure parameters are bare names; Swift infers their types. A default or
/// a rest element keeps only its name.
fn closure_parameter(param: &AnyNode) -> String {
    let bound = match param.node() {
        Node::AssignmentPattern(pattern) => pattern.left.node().identifier_name(),
        Node::RestElement(rest) => rest.argument.node().identifier_name(),
        other => other.identifier_name(),
    };
    match bound {
        Some(name) => literal::identifier(name),
        None => placeholder_of(param.type_name(), param),
    }
}

fn closure(params: &[AnyNode], body: &str) -> String {
    if params.is_empty() {
        return braces(body);
    }
    let params = params.iter().map(closure_parameter).collect::<Vec<_>>();
    format!("{{ {} in\n{body}\n}}", params.join(", "))
}

// ---------------------------------- Atoms ---------------------------------- //

impl SwiftCode for Identifier {
    fn swift_code(&self, _: &TypeContext<'_>) -> Generated {
        Ok(literal::identifier(&self.name))
    }
}

impl SwiftCode for Literal {
    fn swift_code(&self, _: &TypeContext<'_>) -> Generated {
        if self.regex.is_some() {
            return Ok(placeholder_of("Literal", self));
        }
        Ok(match &self.value {
            ScalarValue::Null => String::from("nil"),
            ScalarValue::String(text) => literal::quote(text),
            _ => self.raw.clone(),
        })
    }
}

impl SwiftCode for ArrayExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let elements = self
            .elements
            .iter()
            .map(|element| match element {
                Some(element) => element.swift_code(cx),
                None => Ok(String::from("nil")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("[{}]", elements.join(", ")))
    }
}

impl SwiftCode for ObjectExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        if self.properties.is_empty() {
            return Ok(String::from("[:]"));
        }
        Ok(format!("[{}]", join(&self.properties, ", ", cx)?))
    }
}

/// One `key : value` dictionary entry. Values are typed under a plain key;
/// a computed key names no path segment.
impl SwiftCode for Property {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        if self.kind != PropertyKind::Init {
            return Ok(placeholder_of("Property", self));
        }
        let key = match self.key.node() {
            Node::Identifier(identifier) if !self.computed => literal::quote(&identifier.name),
            _ => self.key.swift_code(cx)?,
        };
        let value = match &self.value {
            Some(value) if !self.computed => value.swift_code(&cx.descend(&self.key))?,
            Some(value) => value.swift_code(cx)?,
            None => self.key.swift_code(cx)?,
        };
        Ok(format!("{key} : {value}"))
    }
}

// --------------------------------- Closures -------------------------------- //

impl SwiftCode for FunctionExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let cx = match &self.id {
            Some(id) => cx.descend(id),
            None => cx.clone(),
        };
        Ok(closure(&self.params, &lines(&self.body.body, &cx)?))
    }
}

impl SwiftCode for ArrowFunctionExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        match self.body.node() {
            Node::BlockStatement(block) => Ok(closure(&self.params, &lines(&block.body, cx)?)),
            _ => {
                let body = self.body.swift_code(cx)?;
                if self.params.is_empty() {
                    return Ok(format!("{{ {body} }}"));
                }
                let params = self.params.iter().map(closure_parameter).collect::<Vec<_>>();
                Ok(format!("{{ {} in {body} }}", params.join(", ")))
            }
        }
    }
}

// --------------------------------- Templates ------------------------------- //

fn template_text(element: &TemplateElement) -> &str {
    element.value.cooked.as_deref().unwrap_or(&element.value.raw)
}

impl SwiftCode for TemplateLiteral {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let mut text = String::new();
        for (ix, quasi) in self.quasis.iter().enumerate() {
            text.push_str(&literal::escape(template_text(quasi)));
            if let Some(expression) = self.expressions.get(ix) {
                text.push_str(&format!("\\({})", expression.swift_code(cx)?));
            }
        }
        Ok(literal::wrap(&text))
    }
}

impl SwiftCode for TemplateElement {
    fn swift_code(&self, _: &TypeContext<'_>) -> Generated {
        Ok(literal::quote(template_text(self)))
    }
}

// ---------------------------- Access and calls ----------------------------- //

impl SwiftCode for MemberExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let object = operand(&self.object, cx)?;
        if self.computed {
            Ok(format!("{object}[{}]", self.property.swift_code(cx)?))
        } else {
            Ok(format!("{object}.{}", self.property.swift_code(cx)?))
        }
    }
}

impl SwiftCode for CallExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("{}({})", operand(&self.callee, cx)?, join(&self.arguments, ", ", cx)?))
    }
}

/// Swift constructs instances by calling the type.
impl SwiftCode for NewExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("{}({})", operand(&self.callee, cx)?, join(&self.arguments, ", ", cx)?))
    }
}

impl SwiftCode for AwaitExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("await {}", operand(&self.argument, cx)?))
    }
}

// --------------------------------- Operators ------------------------------- //

/// `x++` has no Swift equivalent with the same result value; the shim takes
/// the operand by reference and returns the old or new value.
impl SwiftCode for UpdateExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let sign = match self.operator {
            UpdateOperator::Increment => '+',
            UpdateOperator::Decrement => '-',
        };
        let argument = self.argument.swift_code(cx)?;
        Ok(format!("JST.update({sign}, {}, 1, &{argument})", self.prefix))
    }
}

impl SwiftCode for UnaryExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        match self.operator.as_str() {
            "typeof" => Ok(format!("type(of: {})", self.argument.swift_code(cx)?)),
            "!" | "-" | "+" | "~" => {
                let argument = match self.argument.node() {
                    // `- -x` must not fuse into `--x`
                    Node::UnaryExpression(_) | Node::UpdateExpression(_) => {
                        format!("({})", self.argument.swift_code(cx)?)
                    }
                    _ => operand(&self.argument, cx)?,
                };
                Ok(format!("{}{argument}", self.operator))
            }
            _ => Ok(placeholder_of("UnaryExpression", self)),
        }
    }
}

impl SwiftCode for BinaryExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        binary(&self.operator, &self.left, &self.right, cx)
    }
}

impl SwiftCode for LogicalExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        binary(&self.operator, &self.left, &self.right, cx)
    }
}

impl SwiftCode for ConditionalExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!(
            "{} ? {} : {}",
            operand(&self.test, cx)?,
            operand(&self.consequent, cx)?,
            operand(&self.alternate, cx)?,
        ))
    }
}

impl SwiftCode for AssignmentExpression {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!(
            "{} {} {}",
            self.left.swift_code(cx)?,
            self.operator,
            operand(&self.right, cx)?,
        ))
    }
}
