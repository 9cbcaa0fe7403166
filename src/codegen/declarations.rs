use super::{GenerateError, SwiftCode, annotation, braces, lines, placeholder_of, returns_value};
use crate::ast::{
    AnyNode, ArrayPattern, AssignmentPattern, BlockStatement, ClassBody, ClassDeclaration,
    ExportDefaultDeclaration, ExportNamedDeclaration, FunctionDeclaration, Literal,
    MethodDefinition, MethodKind, Node, Program, VariableDeclaration, VariableDeclarator, VariableKind,
};
use crate::literal;
use crate::scalar::ScalarValue;
use crate::types::{GENERIC_SEGMENT, INITIALIZER_SEGMENT, PREFIX_SEGMENT, RETURN_SEGMENT, TypeContext};

type Generated = Result<String, GenerateError>;

impl SwiftCode for Program {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        lines(&self.body, cx)
    }
}

// ---------------------------------- Bindings ------------------------------- //

impl SwiftCode for VariableDeclaration {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let keyword = match self.kind {
            VariableKind::Const => "let",
            VariableKind::Var | VariableKind::Let => "var",
        };
        let declarators = self
            .declarations
            .iter()
            .map(|declarator| Ok(format!("{keyword} {}", declarator.swift_code(cx)?)))
            .collect::<Result<Vec<_>, GenerateError>>()?;
        Ok(declarators.join("\n"))
    }
}

/// `name : T = init`, dropping whichever half is unknown. With neither, the
/// binding becomes an optional `Any` so it still compiles.
impl SwiftCode for VariableDeclarator {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let Node::Identifier(identifier) = self.id.node() else {
            let pattern = self.id.swift_code(cx)?;
            return match &self.init {
                Some(init) => Ok(format!("{pattern} = {}", init.swift_code(cx)?)),
                None => Ok(pattern),
            };
        };
        let cx = cx.descend(identifier);
        let name = literal::identifier(&identifier.name);
        let resolved = cx.resolve();
        let init = self.init.as_ref().map(|init| init.swift_code(&cx)).transpose()?;
        Ok(match (resolved, init) {
            (Some(ty), Some(init)) => format!("{name} : {ty} = {init}"),
            (Some(ty), None) => format!("{name} : {ty}"),
            (None, Some(init)) => format!("{name} /* {} */ = {init}", cx.path_text()),
            (None, None) => format!("{name} : /* {} */ Any? = nil", cx.path_text()),
        })
    }
}

/// Destructures as a tuple; holes bind nothing.
impl SwiftCode for ArrayPattern {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let elements = self
            .elements
            .iter()
            .map(|element| match element {
                Some(element) => element.swift_code(cx),
                None => Ok(String::from("_")),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("({})", elements.join(", ")))
    }
}

impl SwiftCode for AssignmentPattern {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(format!("{} = {}", self.left.swift_code(cx)?, self.right.swift_code(cx)?))
    }
}

// --------------------------------- Functions ------------------------------- //

/// `_ name: T`, with `= default` or a variadic `T...` for the other accepted shapes.
fn parameter(param: &AnyNode, cx: &TypeContext<'_>) -> Generated {
    let unsupported = |shape: &Node| {
        GenerateError::unsupported("function parameter", format!("{} in [{}]", shape.type_name(), cx.path_text()))
    };
    match param.node() {
        Node::Identifier(identifier) => Ok(format!(
            "_ {}: {}",
            literal::identifier(&identifier.name),
            annotation(&cx.descend(identifier)),
        )),
        Node::AssignmentPattern(pattern) => {
            let Node::Identifier(identifier) = pattern.left.node() else {
                return Err(unsupported(pattern.left.node()));
            };
            let cx = cx.descend(identifier);
            Ok(format!(
                "_ {}: {} = {}",
                literal::identifier(&identifier.name),
                annotation(&cx),
                pattern.right.swift_code(&cx)?,
            ))
        }
        Node::RestElement(rest) => {
            let Node::Identifier(identifier) = rest.argument.node() else {
                return Err(unsupported(rest.argument.node()));
            };
            Ok(format!(
                "_ {}: {}...",
                literal::identifier(&identifier.name),
                annotation(&cx.descend(identifier)),
            ))
        }
        other => Err(unsupported(other)),
    }
}

/// Everything after the function name: `<G>(params) async -> R { body }`.
/// Without a hint, a return type is only written when the body returns a value.
fn signature(
    params: &[AnyNode],
    body: &BlockStatement,
    is_async: bool,
    with_return: bool,
    cx: &TypeContext<'_>,
) -> Generated {
    let generic = cx
        .descend(GENERIC_SEGMENT)
        .resolve()
        .map(|generic| format!("<{generic}>"))
        .unwrap_or_default();
    let params = params
        .iter()
        .map(|param| parameter(param, cx))
        .collect::<Result<Vec<_>, _>>()?;
    let effects = if is_async { " async" } else { "" };
    let returns = if with_return {
        let return_cx = cx.descend(RETURN_SEGMENT);
        match return_cx.resolve() {
            Some(ty) => format!(" -> {ty}"),
            None if returns_value(&body.body) => format!(" -> /* {} */ Any", return_cx.path_text()),
            None => String::new(),
        }
    } else {
        String::new()
    };
    Ok(format!("{generic}({}){effects}{returns} {}", params.join(", "), body.swift_code(cx)?))
}

impl SwiftCode for FunctionDeclaration {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let Some(id) = &self.id else {
            return Err(GenerateError::unsupported("function declaration", "no name"));
        };
        let cx = cx.descend(id);
        Ok(format!(
            "func {}{}",
            literal::identifier(&id.name),
            signature(&self.params, &self.body, self.is_async, true, &cx)?,
        ))
    }
}

// ---------------------------------- Classes -------------------------------- //

impl SwiftCode for ClassDeclaration {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let Some(id) = &self.id else {
            return Err(GenerateError::unsupported("class declaration", "no name"));
        };
        let cx = cx.descend(id);
        let inheritance = match &self.super_class {
            Some(super_class) => format!(": {}", super_class.swift_code(&cx)?),
            None => String::new(),
        };
        Ok(format!("class {}{inheritance} {}", literal::identifier(&id.name), self.body.swift_code(&cx)?))
    }
}

impl SwiftCode for ClassBody {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        Ok(braces(&lines(&self.body, cx)?))
    }
}

/// `@prefix` (`override`, `required`, ...) then `static`.
fn member_head(cx: &TypeContext<'_>, is_static: bool) -> String {
    let mut head = String::new();
    if let Some(prefix) = cx.descend(PREFIX_SEGMENT).resolve() {
        head.push_str(&prefix);
        head.push(' ');
    }
    if is_static {
        head.push_str("static ");
    }
    head
}

/// A method key Swift can spell as a name: an identifier, or a string
/// literal holding one.
fn method_name(key: &AnyNode, computed: bool) -> Option<&str> {
    match key.node() {
        Node::Identifier(identifier) if !computed => Some(&identifier.name),
        Node::Literal(Literal { value: ScalarValue::String(name), .. }) if !computed => {
            let mut chars = name.chars();
            let leads = chars.next().is_some_and(|c| c == '_' || c.is_alphabetic());
            (leads && chars.all(|c| c == '_' || c.is_alphanumeric())).then_some(name.as_str())
        }
        _ => None,
    }
}

/// Members resolve under `Class → member`; the constructor under `Class → init`.
impl SwiftCode for MethodDefinition {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        let (Some(key), Some(value)) = (&self.key, &self.value) else {
            return Err(GenerateError::unsupported("method", "missing key or value"));
        };
        match self.kind {
            MethodKind::Constructor => {
                let cx = cx.descend(INITIALIZER_SEGMENT);
                Ok(format!(
                    "{}init{}",
                    member_head(&cx, self.is_static),
                    signature(&value.params, &value.body, value.is_async, false, &cx)?,
                ))
            }
            MethodKind::Method => {
                let Some(name) = method_name(key, self.computed) else {
                    return Ok(placeholder_of("MethodDefinition", self));
                };
                let cx = cx.descend(name);
                Ok(format!(
                    "{}func {}{}",
                    member_head(&cx, self.is_static),
                    literal::identifier(name),
                    signature(&value.params, &value.body, value.is_async, true, &cx)?,
                ))
            }
            MethodKind::Get | MethodKind::Set => Ok(placeholder_of("MethodDefinition", self)),
        }
    }
}

// ---------------------------------- Modules -------------------------------- //

impl SwiftCode for ExportDefaultDeclaration {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        self.declaration.swift_code(cx)
    }
}

impl SwiftCode for ExportNamedDeclaration {
    fn swift_code(&self, cx: &TypeContext<'_>) -> Generated {
        match &self.declaration {
            Some(declaration) => declaration.swift_code(cx),
            None => Ok(placeholder_of("ExportNamedDeclaration", self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::codegen::tests::{block, id, num, render, render_with};
    use crate::codegen::{GenerateError, SwiftCode};
    use crate::decode::decode_node;
    use crate::types::{TypeContext, TypeHints, TypeRecords};
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use test_log::test;

    fn declaration(kind: &str, name: &str, init: Option<Value>) -> Value {
        json!({
            "type": "VariableDeclaration", "kind": kind,
            "declarations": [{"type": "VariableDeclarator", "id": id(name), "init": init}],
        })
    }

    fn function(name: &str, params: Vec<Value>, body: Vec<Value>) -> Value {
        json!({"type": "FunctionDeclaration", "id": id(name), "params": params, "body": block(body)})
    }

    fn ret(argument: Value) -> Value {
        json!({"type": "ReturnStatement", "argument": argument})
    }

    fn generate_error(node: Value) -> GenerateError {
        let node = decode_node(&node).unwrap();
        let hints = TypeHints::default();
        let records = RefCell::new(TypeRecords::new());
        node.swift_code(&TypeContext::root(&hints, &records)).unwrap_err()
    }

    #[test]
    fn unknown_bindings_become_optional_any() {
        let (code, records) = render_with(declaration("var", "x", None), json!({}));
        assert_eq!(code, "var x : /* x */ Any? = nil");
        assert_eq!(serde_json::to_value(&records).unwrap(), json!({"x": null}));
    }

    #[test]
    fn declarators_use_whatever_is_known() {
        let hints = json!({"a": "Int", "b": "String"});
        assert_eq!(render_with(declaration("const", "a", Some(num(1))), hints.clone()).0, "let a : Int = 1");
        assert_eq!(render_with(declaration("let", "b", None), hints.clone()).0, "var b : String");
        assert_eq!(render_with(declaration("let", "c", Some(num(2))), hints).0, "var c /* c */ = 2");
    }

    #[test]
    fn hinted_parameters_are_annotated() {
        let (code, _) = render_with(function("f", vec![id("x")], vec![]), json!({"f": {"x": "Int"}}));
        assert_eq!(code, "func f(_ x: Int) {\n}");
    }

    #[test]
    fn hint_output_reproduces_the_same_code() {
        let node = function("f", vec![id("x"), id("y")], vec![ret(id("x"))]);
        let (first, records) = render_with(node.clone(), json!({"f": {"x": "Int"}}));
        assert!(first.contains("x: Int"), "{first}");

        let recorded = serde_json::to_value(&records).unwrap();
        assert_eq!(recorded, json!({"f": {"x": "Int", "y": null, "@generic": null, "@return": null}}));
        let (second, records_again) = render_with(node, recorded);
        assert_eq!(first, second);
        assert_eq!(records, records_again);
    }

    #[test]
    fn return_types_only_when_needed() {
        let code = render(function("f", vec![], vec![ret(num(1))]));
        assert_eq!(code, "func f() -> /* f, @return */ Any {\nreturn 1\n}");
        let code = render(function("g", vec![], vec![ret(Value::Null)]));
        assert_eq!(code, "func g() {\nreturn\n}");
        let (code, _) = render_with(
            function("h", vec![id("x")], vec![ret(id("x"))]),
            json!({"h": {"x": "T", "@generic": "T", "@return": "T"}}),
        );
        assert_eq!(code, "func h<T>(_ x: T) -> T {\nreturn x\n}");
    }

    #[test]
    fn defaults_and_rest_parameters() {
        let params = vec![
            json!({"type": "AssignmentPattern", "left": id("n"), "right": num(10)}),
            json!({"type": "RestElement", "argument": id("rest")}),
        ];
        let (code, _) = render_with(function("f", params, vec![]), json!({"f": {"n": "Int", "rest": "Any"}}));
        assert_eq!(code, "func f(_ n: Int = 10, _ rest: Any...) {\n}");
    }

    #[test]
    fn destructured_parameters_are_refused() {
        let error = generate_error(function("f", vec![json!({"type": "ObjectPattern", "properties": []})], vec![]));
        assert!(matches!(error, GenerateError::Unsupported { construct: "function parameter", .. }), "{error}");
    }

    #[test]
    fn anonymous_declarations_are_refused() {
        let error = generate_error(json!({
            "type": "FunctionDeclaration", "id": null, "params": [], "body": block(vec![]),
        }));
        assert!(matches!(error, GenerateError::Unsupported { construct: "function declaration", .. }));
    }

    #[test]
    fn classes_key_members_by_class_name() {
        let method = |name: &str, kind: &str, params: Vec<Value>, body: Vec<Value>| {
            json!({
                "type": "MethodDefinition", "key": id(name), "computed": false, "kind": kind, "static": false,
                "value": {"type": "FunctionExpression", "id": null, "params": params, "body": block(body)},
            })
        };
        let class = json!({
            "type": "ClassDeclaration",
            "id": id("Stack"),
            "superClass": id("Base"),
            "body": {"type": "ClassBody", "body": [
                method("constructor", "constructor", vec![id("size")], vec![]),
                method("push", "method", vec![id("item")], vec![]),
            ]},
        });
        let hints = json!({"Stack": {"init": {"size": "Int"}, "push": {"item": "String", "@prefix": "override"}}});
        let (code, records) = render_with(class, hints);
        assert_eq!(
            code,
            "class Stack: Base {\ninit(_ size: Int) {\n}\noverride func push(_ item: String) {\n}\n}"
        );
        let recorded = serde_json::to_value(&records).unwrap();
        assert_eq!(recorded["Stack"]["init"]["size"], json!("Int"));
        assert_eq!(recorded["Stack"]["push"]["@return"], Value::Null);
    }

    #[test]
    fn subclass_initializers_take_a_prefix() {
        let class = json!({
            "type": "ClassDeclaration",
            "id": id("Sub"),
            "superClass": id("Base"),
            "body": {"type": "ClassBody", "body": [{
                "type": "MethodDefinition", "key": id("constructor"), "computed": false,
                "kind": "constructor", "static": false,
                "value": {"type": "FunctionExpression", "id": null, "params": [], "body": block(vec![])},
            }]},
        });
        let (code, records) = render_with(class.clone(), json!({"Sub": {"init": {"@prefix": "override"}}}));
        assert_eq!(code, "class Sub: Base {\noverride init() {\n}\n}");
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!({"Sub": {"init": {"@prefix": "override", "@generic": null}}})
        );

        let (code, _) = render_with(class, json!({}));
        assert_eq!(code, "class Sub: Base {\ninit() {\n}\n}");
    }

    #[test]
    fn string_keyed_methods_use_the_string_as_name() {
        let method = |key: Value| {
            json!({
                "type": "MethodDefinition", "key": key, "computed": false, "kind": "method", "static": true,
                "value": {"type": "FunctionExpression", "id": null, "params": [], "body": block(vec![])},
            })
        };
        let class = json!({
            "type": "ClassDeclaration",
            "id": id("Box"),
            "superClass": null,
            "body": {"type": "ClassBody", "body": [
                method(json!({"type": "Literal", "value": "open", "raw": "'open'"})),
                method(json!({"type": "Literal", "value": "is-open", "raw": "'is-open'"})),
            ]},
        });
        let (code, records) = render_with(class, json!({}));
        let members = code.lines().collect::<Vec<_>>();
        assert_eq!(members[..3], ["class Box {", "static func open() {", "}"]);
        assert!(members[3].starts_with("«MethodDefinition» /* "), "{code}");
        assert!(serde_json::to_value(&records).unwrap()["Box"].get("open").is_some());
    }

    #[test]
    fn exports_emit_their_declaration() {
        let code = render(json!({
            "type": "ExportNamedDeclaration",
            "declaration": declaration("const", "answer", Some(num(42))),
            "specifiers": [],
            "source": null,
        }));
        assert_eq!(code, "let answer /* answer */ = 42");
    }

    #[test]
    fn array_patterns_destructure_as_tuples() {
        let code = render(json!({
            "type": "VariableDeclaration", "kind": "let",
            "declarations": [{
                "type": "VariableDeclarator",
                "id": {"type": "ArrayPattern", "elements": [id("a"), null, id("b")]},
                "init": id("pair"),
            }],
        }));
        assert_eq!(code, "var (a, _, b) = pair");
    }
}
