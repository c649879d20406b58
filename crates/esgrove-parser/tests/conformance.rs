//! Concrete parse scenarios
//!
//! Literal inputs and the top-level result each must produce.

use esgrove_parser::ast::*;
use esgrove_parser::{Error, ErrorKind, ParseOptions, parse, parse_module, parse_script};

fn parse_ok(src: &str) -> Program {
    parse_script(src).unwrap_or_else(|e| panic!("{:?} should parse: {}", src, e))
}

fn parse_err(src: &str) -> Error {
    match parse_script(src) {
        Ok(program) => panic!("{:?} should fail, got {:?}", src, program),
        Err(e) => e,
    }
}

fn kind_of(src: &str) -> ErrorKind {
    parse_err(src).kind().expect("syntax error")
}

fn first_declarator(program: &Program) -> &VariableDeclarator {
    match &program.body[0] {
        Statement::VariableDeclaration(decl) => &decl.declarations[0],
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_simple_var_declaration() {
    let program = parse_ok("var x = 1;");
    assert_eq!(program.body.len(), 1);
    let Statement::VariableDeclaration(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.kind, VariableKind::Var);
    assert_eq!(decl.declarations.len(), 1);

    let declarator = &decl.declarations[0];
    assert!(matches!(&declarator.id, Pattern::Identifier(id) if id.name == "x"));
    assert!(matches!(
        &declarator.init,
        Some(Expression::Literal(Literal { value: LiteralValue::Number(n), .. })) if *n == 1.0
    ));
}

#[test]
fn test_object_pattern_with_rest() {
    let program = parse_ok("var {a, ...rest} = obj;");
    let Pattern::Object(object) = &first_declarator(&program).id else {
        panic!("expected an object pattern");
    };
    assert_eq!(object.properties.len(), 2);
    match &object.properties[0] {
        ObjectPatternMember::Property(prop) => {
            assert!(prop.shorthand);
            assert!(matches!(&prop.value, Pattern::Identifier(id) if id.name == "a"));
        }
        other => panic!("expected a property, got {:?}", other),
    }
    match &object.properties[1] {
        ObjectPatternMember::Rest(rest) => {
            assert!(matches!(rest.argument.as_ref(), Pattern::Identifier(id) if id.name == "rest"));
        }
        other => panic!("expected a rest element, got {:?}", other),
    }
}

#[test]
fn test_var_then_let_conflicts() {
    assert_eq!(kind_of("var a; let a;"), ErrorKind::DuplicateBinding);
}

#[test]
fn test_block_var_escapes_to_outer_let() {
    assert_eq!(kind_of("{ var a; } let a;"), ErrorKind::DuplicateBinding);
}

#[test]
fn test_await_binds_tighter_than_multiply() {
    let program = parse_ok("async function f(){ let y = await x * x; }");
    let Statement::FunctionDeclaration(func) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(func.is_async);
    assert!(!func.generator);

    let Statement::VariableDeclaration(decl) = &func.body.body[0] else {
        panic!("expected a let declaration");
    };
    assert_eq!(decl.kind, VariableKind::Let);
    let Some(Expression::Binary(binary)) = &decl.declarations[0].init else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.operator, BinaryOperator::Multiply);
    let Expression::Await(await_expr) = binary.left.as_ref() else {
        panic!("expected await on the left");
    };
    assert!(matches!(await_expr.argument.as_ref(), Expression::Identifier(id) if id.name == "x"));
    assert!(matches!(binary.right.as_ref(), Expression::Identifier(id) if id.name == "x"));
}

#[test]
fn test_array_pattern_trailing_comma() {
    let program = parse_ok("var [a,] = [];");
    let Pattern::Array(array) = &first_declarator(&program).id else {
        panic!("expected an array pattern");
    };
    assert_eq!(array.elements.len(), 1);
    assert!(matches!(&array.elements[0], Some(Pattern::Identifier(id)) if id.name == "a"));

    let program = parse_ok("var [a,,] = [];");
    let Pattern::Array(array) = &first_declarator(&program).id else {
        panic!("expected an array pattern");
    };
    assert_eq!(array.elements.len(), 2);
    assert!(array.elements[1].is_none());
}

#[test]
fn test_redeclaration_examples() {
    assert_eq!(kind_of("var foo=1; let foo=1;"), ErrorKind::DuplicateBinding);
    parse_ok("var foo=1; var foo=2;");
    parse_ok("{ let a; } var a;");
}

#[test]
fn test_array_assignment_is_a_pattern() {
    let program = parse_ok("[a] = []");
    let Statement::Expression(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Assignment(assign) = &stmt.expression else {
        panic!("expected an assignment");
    };
    assert_eq!(assign.operator, AssignmentOperator::Assign);
    let Pattern::Array(array) = assign.left.as_ref() else {
        panic!("expected an array pattern target");
    };
    assert_eq!(array.elements.len(), 1);

    let program = parse_ok("var [a] = []");
    assert!(matches!(first_declarator(&program).id, Pattern::Array(_)));
}

#[test]
fn test_update_expression_is_not_a_target() {
    assert_eq!(kind_of("var [a--] = []"), ErrorKind::InvalidTarget);
    assert_eq!(kind_of("[a--] = []"), ErrorKind::InvalidTarget);
    assert_eq!(kind_of("({a: b++} = {})"), ErrorKind::InvalidTarget);
    assert_eq!(kind_of("a + b = c"), ErrorKind::InvalidTarget);
}

#[test]
fn test_rest_element_placement() {
    assert!(parse_script("var [...a, b] = x;").is_err());
    parse_ok("var [...a] = x;");
    assert!(parse_script("var [...a,] = x;").is_err());
    assert!(parse_script("[...a, b] = x;").is_err());
    assert!(parse_script("[...a,] = x;").is_err());
    assert!(parse_script("var {...a, b} = x;").is_err());
    assert!(parse_script("var [...a = 1] = x;").is_err());
    parse_ok("[...a.b] = x;");
}

#[test]
fn test_use_strict_applies_to_earlier_bindings() {
    assert_eq!(
        kind_of(r#"function foo() { "use strict"; var eval; }"#),
        ErrorKind::StrictModeViolation
    );
    assert_eq!(
        kind_of(r#"function eval() { "use strict"; }"#),
        ErrorKind::StrictModeViolation
    );
    assert_eq!(
        kind_of(r#"function f(a, a) { "use strict"; }"#),
        ErrorKind::DuplicateBinding
    );
    assert!(parse_script(r#"function f(a = 1) { "use strict"; }"#).is_err());
    assert!(parse_script(r#"function f() { "\01"; "use strict"; }"#).is_err());
    parse_ok(r#"function f(a, a) {}"#);
    parse_ok(r#"function foo() { var eval; }"#);
}

#[test]
fn test_nested_block_function_scopes() {
    assert_eq!(
        kind_of("{ function x() { var a, a; let a; } let a; }"),
        ErrorKind::DuplicateBinding
    );
    parse_ok("{ function x() { var a, a; } let a; }");
}

#[test]
fn test_await_yield_as_identifiers() {
    parse_ok("var await = 1; await + 1;");
    parse_ok("var yield = 1;");
    assert!(parse_script("async function f() { var await; }").is_err());
    assert!(parse_script("function* g() { var yield; }").is_err());
    assert!(parse_module("var await;").is_err());
    assert!(parse("'use strict'; var yield;", ParseOptions::script()).is_err());
}

#[test]
fn test_sloppy_only_constructs() {
    parse_ok("with (obj) { x; }");
    parse_ok("var x = 010;");
    parse_ok("delete x;");
    assert_eq!(kind_of("'use strict'; with (obj) {}"), ErrorKind::StrictModeViolation);
    assert_eq!(kind_of("'use strict'; var x = 010;"), ErrorKind::StrictModeViolation);
    assert_eq!(kind_of("'use strict'; delete x;"), ErrorKind::StrictModeViolation);
}

#[test]
fn test_asi() {
    let program = parse_ok("a\nb");
    assert_eq!(program.body.len(), 2);
    let program = parse_ok("a\n++b");
    assert_eq!(program.body.len(), 2);
    let program = parse_ok("return_ = 1\n(function(){})()");
    assert_eq!(program.body.len(), 1);
    assert_eq!(kind_of("a b"), ErrorKind::AsiFailure);
    assert!(parse_script("function f() { return\n1; }").is_ok());
    assert!(parse_script("throw\nerr;").is_err());
}

#[test]
fn test_regex_and_division() {
    let program = parse_ok("a = b / c / d; e = /re/g.test(f);");
    assert_eq!(program.body.len(), 2);
    let Statement::Expression(stmt) = &program.body[1] else {
        panic!("expected an expression statement");
    };
    let Expression::Assignment(assign) = &stmt.expression else {
        panic!("expected an assignment");
    };
    assert!(matches!(assign.right.as_ref(), Expression::Call(_)));
}

#[test]
fn test_template_rescanning() {
    let program = parse_ok("`a${b}c${ {d: 1}.d }e`");
    let Statement::Expression(stmt) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    let Expression::Template(template) = &stmt.expression else {
        panic!("expected a template literal");
    };
    assert_eq!(template.quasis.len(), 3);
    assert_eq!(template.expressions.len(), 2);
    assert!(template.quasis[2].tail);
}

#[test]
fn test_errors_carry_positions() {
    let err = parse_err("let a;\n  let a;");
    let syntax = err.as_syntax().expect("syntax error");
    assert_eq!(syntax.kind, ErrorKind::DuplicateBinding);
    assert_eq!((syntax.line, syntax.column), (2, 6));
    assert_eq!(syntax.offset, 13);
}

#[test]
fn test_first_error_aborts() {
    // Only the first of two problems is reported.
    let err = parse_err("let a; let a; let b; let b;");
    assert_eq!(err.as_syntax().map(|e| e.offset), Some(11));
}

#[test]
fn test_source_locations() {
    let program = parse("var x;\nlet y;", ParseOptions::script().with_locations(true)).unwrap();
    let span = program.body[1].span();
    let loc = span.loc.expect("loc");
    assert_eq!((loc.start.line, loc.start.column), (2, 0));
    assert_eq!((loc.end.line, loc.end.column), (2, 6));

    let program = parse_ok("var x;");
    assert!(program.body[0].span().loc.is_none());
}
