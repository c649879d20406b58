//! Redeclaration table
//!
//! Every pair of declaration forms that may or may not share a name.

use esgrove_parser::{ErrorKind, ParseOptions, Parser, parse, parse_module, parse_script};

fn assert_ok(src: &str) {
    if let Err(e) = parse_script(src) {
        panic!("{:?} should parse: {}", src, e);
    }
}

fn assert_dup(src: &str) {
    match parse_script(src) {
        Ok(_) => panic!("{:?} should be a redeclaration", src),
        Err(e) => assert_eq!(e.kind(), Some(ErrorKind::DuplicateBinding), "{:?}: {}", src, e),
    }
}

#[test]
fn test_same_scope_pairs() {
    for src in [
        "let a; let a;",
        "let a; const a = 1;",
        "const a = 1; var a;",
        "let a; var a;",
        "var a; let a;",
        "class a {} let a;",
        "let a; class a {}",
        "let a; function a() {}",
        "function a() {} let a;",
        "let a, a;",
    ] {
        assert_dup(src);
    }
    for src in [
        "var a; var a;",
        "var a; function a() {}",
        "function a() {} var a;",
        "function a() {} function a() {}",
    ] {
        assert_ok(src);
    }
}

#[test]
fn test_var_crossing_blocks() {
    assert_dup("{ var a; } let a;");
    assert_dup("let a; { var a; }");
    assert_dup("{ let a; { var a; } }");
    assert_dup("{ { var a; } let a; }");
    assert_ok("{ let a; } var a;");
    assert_ok("var a; { let a; }");
    assert_ok("{ let a; } { var a; }");
}

#[test]
fn test_var_and_block_functions() {
    assert_dup("{ function a() {} var a; }");
    assert_dup("{ var a; function a() {} }");
    assert_ok("{ function a() {} } var a;");
    assert_ok("function f() { function a() {} var a; }");
}

#[test]
fn test_sloppy_block_function_duplicates() {
    assert_ok("{ function a() {} function a() {} }");
    assert!(parse_script("'use strict'; { function a() {} function a() {} }").is_err());
    let options = ParseOptions::script().with_web_compat_disabled(true);
    assert!(parse("{ function a() {} function a() {} }", options).is_err());
    assert!(parse_script("{ async function a() {} function a() {} }").is_err());
    assert!(parse_script("{ function* a() {} function a() {} }").is_err());
}

#[test]
fn test_block_function_hoisting() {
    let mut parser = Parser::new("{ function f() {} } { let g; { function g() {} } }");
    parser.parse_program().expect("should parse");
    let hoisted: Vec<_> = parser
        .scopes()
        .hoisted_functions(esgrove_parser::parser::ScopeId::TOP)
        .collect();
    // `g` meets a lexical `g` on the way up and is not hoisted.
    assert_eq!(hoisted, vec!["f"]);

    // A dropped hoist is never an error.
    assert_ok("let f; { function f() {} }");
    assert_ok("{ function f() {} } let g;");
}

#[test]
fn test_parameters() {
    assert_ok("function f(a, a) {}");
    assert_dup("function f(a, [a]) {}");
    assert_dup("function f(a, a = 1) {}");
    assert_dup("function f(a, ...a) {}");
    assert_dup("(a, a) => 1;");
    assert!(parse_script("'use strict'; function f(a, a) {}").is_err());
    assert!(parse_script("({ m(a, a) {} });").is_err());
    assert_dup("function f(a) { let a; }");
    assert_ok("function f(a) { var a; }");
    assert_ok("function f(a) { function a() {} }");
    assert_ok("function f(a) { { let a; } }");
}

#[test]
fn test_catch_parameters() {
    assert_ok("try {} catch (e) { var e; }");
    assert_dup("try {} catch (e) { let e; }");
    assert_dup("try {} catch ([e]) { var e; }");
    assert_dup("try {} catch ({e}) { var e; }");
    assert_dup("try {} catch ([e, e]) {}");
    assert!(parse_script("try {} catch (e) { for (var e of []) {} }").is_err());
    assert_ok("try {} catch (e) { for (var e in {}) {} }");
    assert_ok("try {} catch (e) { for (var e;;) { break; } }");
}

#[test]
fn test_for_heads() {
    assert_ok("for (let i = 0;;) { let i; break; }");
    assert_dup("for (let i;;) { var i; }");
    assert_ok("let i; for (let i of []) {}");
    assert_dup("for (const [a, a] of []) {}");
}

#[test]
fn test_switch_cases_share_a_scope() {
    assert_dup("switch (x) { case 1: let a; case 2: let a; }");
    assert_dup("switch (x) { case 1: let a; default: var a; }");
    assert_ok("switch (x) { case 1: var a; case 2: var a; }");
}

#[test]
fn test_function_scopes_are_independent() {
    assert_ok("let a; function f() { var a; }");
    assert_ok("var a; function f() { let a; }");
    assert_ok("let a; (function a() { let a; });");
    assert_ok("let a; () => { var a; };");
    assert_ok("let a; class C { static { var a; } }");
}

#[test]
fn test_module_top_level() {
    assert!(parse_module("function a() {} function a() {}").is_err());
    assert!(parse_module("function a() {} var a;").is_err());
    assert!(parse_module("var a; var a;").is_ok());
    assert!(parse_module("import a from 'a'; var a;").is_err());
}

#[test]
fn test_conflict_reported_at_second_declaration() {
    let err = parse_script("let value;\nvar value;").unwrap_err();
    let syntax = err.as_syntax().expect("syntax error");
    assert_eq!((syntax.line, syntax.column), (2, 4));
    assert!(syntax.message.contains("value"));
}
