//! Abstract Syntax Tree (AST) definitions for ECMAScript.
//!
//! The node set follows ESTree. Every node carries a [`Span`] with byte
//! offsets and, when location tracking is requested, a line/column pair.
//! A node exclusively owns its children; the tree is never shared or cyclic.
//!
//! With the `serde` feature the tree serializes to ESTree JSON: each node
//! struct writes its own `type` tag and the wrapper enums are untagged.

mod operators;

pub use crate::lexer::{Position, SourceLocation, Span};
pub use operators::{
    AssignmentOperator, BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator,
};

/// Whether a program was parsed as a script or a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum SourceType {
    /// Script goal
    Script,
    /// Module goal
    Module,
}

/// A complete program.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "camelCase")
)]
pub struct Program {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Script or module
    pub source_type: SourceType,
    /// The top-level statements
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct Identifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The name of the identifier, with escapes decoded
    pub name: String,
}

/// A private class member name (`#name`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct PrivateIdentifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The name without the leading `#`
    pub name: String,
}

/// The value of a literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum LiteralValue {
    /// String literal
    String(String),
    /// Numeric literal
    Number(f64),
    /// true / false
    Boolean(bool),
    /// null
    Null,
    /// Regular expression literal
    RegExp(RegExpLiteral),
    /// BigInt literal in decimal digits
    BigInt(String),
}

/// The body and flags of a regular expression literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegExpLiteral {
    /// Pattern text between the slashes
    pub pattern: String,
    /// Flag characters
    pub flags: String,
}

/// A literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct Literal {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Cooked value
    pub value: LiteralValue,
    /// Source text of the literal
    pub raw: String,
}

impl Literal {
    /// Returns the string value if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// =========================================================================
// Statements
// =========================================================================

/// A statement or module declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Statement {
    /// Expression statement (also used for directives)
    Expression(ExpressionStatement),
    /// Block statement { ... }
    Block(BlockStatement),
    /// Empty statement (;)
    Empty(EmptyStatement),
    /// Debugger statement
    Debugger(DebuggerStatement),
    /// With statement (sloppy mode only)
    With(WithStatement),
    /// Return statement
    Return(ReturnStatement),
    /// Labeled statement
    Labeled(LabeledStatement),
    /// Break statement
    Break(BreakStatement),
    /// Continue statement
    Continue(ContinueStatement),
    /// If statement
    If(IfStatement),
    /// Switch statement
    Switch(SwitchStatement),
    /// Throw statement
    Throw(ThrowStatement),
    /// Try statement
    Try(TryStatement),
    /// While statement
    While(WhileStatement),
    /// Do-while statement
    DoWhile(DoWhileStatement),
    /// For statement
    For(ForStatement),
    /// For-in statement
    ForIn(ForInStatement),
    /// For-of statement
    ForOf(ForOfStatement),
    /// Variable declaration (var, let, const)
    VariableDeclaration(VariableDeclaration),
    /// Function declaration
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::function_declaration"))]
    FunctionDeclaration(Function),
    /// Class declaration
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::class_declaration"))]
    ClassDeclaration(Class),
    /// import declaration
    Import(ImportDeclaration),
    /// export { ... } / export declaration
    ExportNamed(ExportNamedDeclaration),
    /// export default ...
    ExportDefault(ExportDefaultDeclaration),
    /// export * from ...
    ExportAll(ExportAllDeclaration),
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ExpressionStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The expression
    pub expression: Expression,
    /// Raw directive text for directive prologue entries
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub directive: Option<String>,
}

/// A block statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct BlockStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The statements in the block
    pub body: Vec<Statement>,
}

/// An empty statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct EmptyStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
}

/// A debugger statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct DebuggerStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
}

/// A with statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct WithStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The scope object
    pub object: Expression,
    /// The body
    pub body: Box<Statement>,
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ReturnStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The returned value
    pub argument: Option<Expression>,
}

/// A labeled statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct LabeledStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The label
    pub label: Identifier,
    /// The labeled body
    pub body: Box<Statement>,
}

/// A break statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct BreakStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Optional target label
    pub label: Option<Identifier>,
}

/// A continue statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ContinueStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Optional target label
    pub label: Option<Identifier>,
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct IfStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The condition
    pub test: Expression,
    /// The then branch
    pub consequent: Box<Statement>,
    /// The optional else branch
    pub alternate: Option<Box<Statement>>,
}

/// A switch statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct SwitchStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The value being switched on
    pub discriminant: Expression,
    /// The case clauses
    pub cases: Vec<SwitchCase>,
}

/// A case (or default) clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct SwitchCase {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The case test (None for default)
    pub test: Option<Expression>,
    /// The case body
    pub consequent: Vec<Statement>,
}

/// A throw statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ThrowStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The thrown value
    pub argument: Expression,
}

/// A try statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct TryStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The try block
    pub block: BlockStatement,
    /// The catch clause
    pub handler: Option<CatchClause>,
    /// The finally block
    pub finalizer: Option<BlockStatement>,
}

/// A catch clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct CatchClause {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The catch binding (optional since ES2019)
    pub param: Option<Pattern>,
    /// The catch body
    pub body: BlockStatement,
}

/// A while statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct WhileStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The condition
    pub test: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A do-while statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct DoWhileStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The loop body
    pub body: Box<Statement>,
    /// The condition
    pub test: Expression,
}

/// A for statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ForStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The initializer
    pub init: Option<ForInit>,
    /// The condition
    pub test: Option<Expression>,
    /// The update expression
    pub update: Option<Expression>,
    /// The loop body
    pub body: Box<Statement>,
}

/// For loop initializer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ForInit {
    /// Variable declaration
    VariableDeclaration(VariableDeclaration),
    /// Expression
    Expression(Expression),
}

/// The left-hand side of a for-in or for-of loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ForTarget {
    /// `for (var x of ...)`
    VariableDeclaration(VariableDeclaration),
    /// `for (x.y of ...)`, `for ([a, b] of ...)`
    Pattern(Pattern),
}

/// A for-in statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ForInStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Loop binding or target
    pub left: ForTarget,
    /// The object iterated over
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A for-of statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ForOfStatement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// `for await (...)`
    #[cfg_attr(feature = "serde", serde(rename = "await"))]
    pub is_await: bool,
    /// Loop binding or target
    pub left: ForTarget,
    /// The iterable
    pub right: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// Variable declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum VariableKind {
    /// var declaration
    Var,
    /// let declaration
    Let,
    /// const declaration
    Const,
}

/// A variable declaration statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct VariableDeclaration {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The kind of declaration
    pub kind: VariableKind,
    /// The declarators
    pub declarations: Vec<VariableDeclarator>,
}

/// A single variable declarator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct VariableDeclarator {
    /// The binding target
    pub id: Pattern,
    /// Optional initializer expression
    pub init: Option<Expression>,
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
}

// =========================================================================
// Functions and classes
// =========================================================================

/// A function declaration, expression or method value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Function {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The function name
    pub id: Option<Identifier>,
    /// The parameters
    pub params: Vec<Pattern>,
    /// The function body
    pub body: BlockStatement,
    /// Whether this is an async function
    #[cfg_attr(feature = "serde", serde(rename = "async"))]
    pub is_async: bool,
    /// Whether this is a generator function
    pub generator: bool,
}

/// An arrow function expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ArrowFunctionExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The parameters
    pub params: Vec<Pattern>,
    /// Expression or block body
    pub body: ArrowBody,
    /// Whether this is an async arrow
    #[cfg_attr(feature = "serde", serde(rename = "async"))]
    pub is_async: bool,
    /// True when the body is a bare expression
    pub expression: bool,
}

/// Arrow function body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ArrowBody {
    /// `x => x + 1`
    Expression(Box<Expression>),
    /// `x => { ... }`
    Block(BlockStatement),
}

/// A class declaration or expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Class {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The class name
    pub id: Option<Identifier>,
    /// The `extends` clause
    pub super_class: Option<Box<Expression>>,
    /// The class body
    pub body: ClassBody,
}

/// The body of a class.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ClassBody {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Methods, fields and static blocks
    pub body: Vec<ClassElement>,
}

/// A member of a class body.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ClassElement {
    /// Method, getter, setter or constructor
    Method(MethodDefinition),
    /// Field
    Property(PropertyDefinition),
    /// `static { ... }`
    StaticBlock(StaticBlock),
}

/// Kind of a class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum MethodKind {
    /// The class constructor
    Constructor,
    /// A plain method
    Method,
    /// A getter
    Get,
    /// A setter
    Set,
}

/// A class method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct MethodDefinition {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Method name
    pub key: Box<Expression>,
    /// Whether the key is `[computed]`
    pub computed: bool,
    /// `static` member
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub is_static: bool,
    /// Method kind
    pub kind: MethodKind,
    /// The method's function
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::function_expression"))]
    pub value: Function,
}

/// A class field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct PropertyDefinition {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Field name
    pub key: Box<Expression>,
    /// Whether the key is `[computed]`
    pub computed: bool,
    /// `static` member
    #[cfg_attr(feature = "serde", serde(rename = "static"))]
    pub is_static: bool,
    /// Initializer
    pub value: Option<Box<Expression>>,
}

/// A class static initialization block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct StaticBlock {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The block body
    pub body: Vec<Statement>,
}

// =========================================================================
// Modules
// =========================================================================

/// A name in an import or export clause: an identifier or a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ModuleExportName {
    /// `export { a }`
    Identifier(Identifier),
    /// `export { "a-b" as c } from "m"`
    String(Literal),
}

impl ModuleExportName {
    /// The name as a string.
    pub fn name(&self) -> &str {
        match self {
            ModuleExportName::Identifier(id) => &id.name,
            ModuleExportName::String(lit) => lit.as_str().unwrap_or_default(),
        }
    }

    /// Source range.
    pub fn span(&self) -> Span {
        match self {
            ModuleExportName::Identifier(id) => id.span,
            ModuleExportName::String(lit) => lit.span,
        }
    }
}

/// An import attribute (`with { type: "json" }`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportAttribute {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Attribute key
    pub key: ModuleExportName,
    /// Attribute value
    pub value: Literal,
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportDeclaration {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Imported bindings
    pub specifiers: Vec<ImportClause>,
    /// Module specifier
    pub source: Literal,
    /// Import attributes
    pub attributes: Vec<ImportAttribute>,
}

/// One binding of an import declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ImportClause {
    /// `import { a as b }`
    Named(ImportSpecifier),
    /// `import a`
    Default(ImportDefaultSpecifier),
    /// `import * as ns`
    Namespace(ImportNamespaceSpecifier),
}

impl ImportClause {
    /// The local binding introduced by this clause.
    pub fn local(&self) -> &Identifier {
        match self {
            ImportClause::Named(s) => &s.local,
            ImportClause::Default(s) => &s.local,
            ImportClause::Namespace(s) => &s.local,
        }
    }
}

/// `import { imported as local }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportSpecifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Name exported by the module
    pub imported: ModuleExportName,
    /// Local binding
    pub local: Identifier,
}

/// `import local from "m"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportDefaultSpecifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Local binding
    pub local: Identifier,
}

/// `import * as local from "m"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportNamespaceSpecifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Local binding
    pub local: Identifier,
}

/// `export { local as exported }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ExportSpecifier {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Local (or re-exported) name
    pub local: ModuleExportName,
    /// Name visible to importers
    pub exported: ModuleExportName,
}

/// A named export.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ExportNamedDeclaration {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// `export var/let/const/function/class ...`
    pub declaration: Option<Box<Statement>>,
    /// `export { ... }`
    pub specifiers: Vec<ExportSpecifier>,
    /// `from "m"`
    pub source: Option<Literal>,
    /// Import attributes on a re-export
    pub attributes: Vec<ImportAttribute>,
}

/// The exported value of `export default`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ExportDefaultKind {
    /// `export default function ...`
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::function_declaration"))]
    Function(Function),
    /// `export default class ...`
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::class_declaration"))]
    Class(Class),
    /// `export default expr;`
    Expression(Expression),
}

/// `export default ...`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ExportDefaultDeclaration {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The exported value
    pub declaration: ExportDefaultKind,
}

/// `export * from "m"` / `export * as ns from "m"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ExportAllDeclaration {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// `as ns`
    pub exported: Option<ModuleExportName>,
    /// Module specifier
    pub source: Literal,
    /// Import attributes
    pub attributes: Vec<ImportAttribute>,
}

// =========================================================================
// Expressions
// =========================================================================

/// An expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),
    /// `#x` on the left of `in`, or a private member key
    PrivateIdentifier(PrivateIdentifier),
    /// Literal value
    Literal(Literal),
    /// this
    This(ThisExpression),
    /// Array literal
    Array(ArrayExpression),
    /// Object literal
    Object(ObjectExpression),
    /// Function expression
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::function_expression"))]
    Function(Function),
    /// Arrow function
    Arrow(ArrowFunctionExpression),
    /// Class expression
    #[cfg_attr(feature = "serde", serde(serialize_with = "tagged::class_expression"))]
    Class(Class),
    /// Template literal
    Template(TemplateLiteral),
    /// Tagged template
    TaggedTemplate(TaggedTemplateExpression),
    /// Member access (a.b, a[b], a.#b)
    Member(MemberExpression),
    /// super
    Super(SuperExpression),
    /// new.target / import.meta
    MetaProperty(MetaProperty),
    /// new expression
    New(NewExpression),
    /// Function call
    Call(CallExpression),
    /// ++x, x--
    Update(UpdateExpression),
    /// await x
    Await(AwaitExpression),
    /// Unary operation
    Unary(UnaryExpression),
    /// Binary operation
    Binary(BinaryExpression),
    /// &&, ||, ??
    Logical(LogicalExpression),
    /// a ? b : c
    Conditional(ConditionalExpression),
    /// yield / yield*
    Yield(YieldExpression),
    /// Assignment
    Assignment(AssignmentExpression),
    /// Comma-separated expressions
    Sequence(SequenceExpression),
    /// Optional chain wrapper
    Chain(ChainExpression),
    /// Dynamic import()
    Import(ImportExpression),
}

/// `this`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ThisExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
}

/// `super` in a member access or call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Super")
)]
pub struct SuperExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
}

/// An array element or call argument that may be spread.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ExpressionOrSpread {
    /// Plain expression
    Expression(Expression),
    /// `...expr`
    Spread(SpreadElement),
}

impl ExpressionOrSpread {
    /// Source range.
    pub fn span(&self) -> Span {
        match self {
            ExpressionOrSpread::Expression(e) => e.span(),
            ExpressionOrSpread::Spread(s) => s.span,
        }
    }
}

/// `...argument`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct SpreadElement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The spread value
    pub argument: Box<Expression>,
}

/// An array literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ArrayExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Elements; `None` marks a hole
    pub elements: Vec<Option<ExpressionOrSpread>>,
}

/// An object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ObjectExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Properties and spreads
    pub properties: Vec<ObjectMember>,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ObjectMember {
    /// `key: value`, shorthand, method, getter or setter
    Property(Property),
    /// `...expr`
    Spread(SpreadElement),
}

/// Kind of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum PropertyKind {
    /// Data property
    Init,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// An object literal property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct Property {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Property key
    pub key: Box<Expression>,
    /// Property value
    pub value: Box<Expression>,
    /// Property kind
    pub kind: PropertyKind,
    /// `{ m() {} }`
    pub method: bool,
    /// `{ a }`
    pub shorthand: bool,
    /// `{ [k]: v }`
    pub computed: bool,
}

/// A template literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct TemplateLiteral {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Literal spans; one more than `expressions`
    pub quasis: Vec<TemplateElement>,
    /// Substitutions
    pub expressions: Vec<Expression>,
}

/// Cooked and raw text of a template span.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TemplateValue {
    /// Cooked text; `None` for an invalid escape in a tagged template
    pub cooked: Option<String>,
    /// Raw text with line endings normalised
    pub raw: String,
}

/// One literal span of a template.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct TemplateElement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Text
    pub value: TemplateValue,
    /// Last span of the template
    pub tail: bool,
}

/// tag`template`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct TaggedTemplateExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The tag function
    pub tag: Box<Expression>,
    /// The template
    pub quasi: TemplateLiteral,
}

/// A member access.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct MemberExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The object
    pub object: Box<Expression>,
    /// Identifier, private name, or computed expression
    pub property: Box<Expression>,
    /// `a[b]`
    pub computed: bool,
    /// `a?.b`
    pub optional: bool,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct MetaProperty {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// `new` or `import`
    pub meta: Identifier,
    /// `target` or `meta`
    pub property: Identifier,
}

/// A new expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct NewExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The constructor
    pub callee: Box<Expression>,
    /// Arguments
    pub arguments: Vec<ExpressionOrSpread>,
}

/// A function call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct CallExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The function being called
    pub callee: Box<Expression>,
    /// Arguments
    pub arguments: Vec<ExpressionOrSpread>,
    /// `f?.()`
    pub optional: bool,
}

/// ++x, x++, --x, x--
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct UpdateExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Increment or decrement
    pub operator: UpdateOperator,
    /// Operator before the operand
    pub prefix: bool,
    /// The target
    pub argument: Box<Expression>,
}

/// await expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct AwaitExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The awaited value
    pub argument: Box<Expression>,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct UnaryExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The operator
    pub operator: UnaryOperator,
    /// Always true
    pub prefix: bool,
    /// The operand
    pub argument: Box<Expression>,
}

/// A binary operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct BinaryExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The operator
    pub operator: BinaryOperator,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
}

/// A short-circuiting operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct LogicalExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The operator
    pub operator: LogicalOperator,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
}

/// test ? consequent : alternate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ConditionalExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The condition
    pub test: Box<Expression>,
    /// Value when true
    pub consequent: Box<Expression>,
    /// Value when false
    pub alternate: Box<Expression>,
}

/// yield expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct YieldExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The yielded value
    pub argument: Option<Box<Expression>>,
    /// `yield*`
    pub delegate: bool,
}

/// An assignment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct AssignmentExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The operator
    pub operator: AssignmentOperator,
    /// The assignment target
    pub left: Box<Pattern>,
    /// The assigned value
    pub right: Box<Expression>,
}

/// a, b, c
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct SequenceExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The expressions
    pub expressions: Vec<Expression>,
}

/// Wrapper around a member/call chain containing `?.`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ChainExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The chain
    pub expression: Box<Expression>,
}

/// import(source, options)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ImportExpression {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Module specifier
    pub source: Box<Expression>,
    /// Options argument
    pub options: Option<Box<Expression>>,
}

// =========================================================================
// Patterns
// =========================================================================

/// A binding or assignment target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Pattern {
    /// Simple name
    Identifier(Identifier),
    /// Member expression (assignment targets only)
    Member(MemberExpression),
    /// `[a, b]`
    Array(ArrayPattern),
    /// `{a, b}`
    Object(ObjectPattern),
    /// `a = default`
    Assignment(AssignmentPattern),
    /// `...rest`
    Rest(RestElement),
}

/// `[a, , b]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ArrayPattern {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Elements; `None` marks an elision
    pub elements: Vec<Option<Pattern>>,
}

/// `{a, b: c, ...rest}`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct ObjectPattern {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Properties and a trailing rest element
    pub properties: Vec<ObjectPatternMember>,
}

/// A member of an object pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ObjectPatternMember {
    /// `key: target` or shorthand
    Property(AssignmentProperty),
    /// `...rest`
    Rest(RestElement),
}

/// A property of an object pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename = "Property")
)]
pub struct AssignmentProperty {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// Property key
    pub key: Box<Expression>,
    /// Target
    pub value: Pattern,
    /// Always `init`
    pub kind: PropertyKind,
    /// Always false
    pub method: bool,
    /// `{ a }` or `{ a = 1 }`
    pub shorthand: bool,
    /// `{ [k]: v }`
    pub computed: bool,
}

/// `left = right` in a pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct AssignmentPattern {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The target
    pub left: Box<Pattern>,
    /// The default value
    pub right: Box<Expression>,
}

/// `...argument` in a pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub struct RestElement {
    /// Source range
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: Span,
    /// The target
    pub argument: Box<Pattern>,
}

// =========================================================================
// Span accessors
// =========================================================================

impl Statement {
    /// Source range of the statement.
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(s) => s.span,
            Statement::Block(s) => s.span,
            Statement::Empty(s) => s.span,
            Statement::Debugger(s) => s.span,
            Statement::With(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::Labeled(s) => s.span,
            Statement::Break(s) => s.span,
            Statement::Continue(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::Throw(s) => s.span,
            Statement::Try(s) => s.span,
            Statement::While(s) => s.span,
            Statement::DoWhile(s) => s.span,
            Statement::For(s) => s.span,
            Statement::ForIn(s) => s.span,
            Statement::ForOf(s) => s.span,
            Statement::VariableDeclaration(s) => s.span,
            Statement::FunctionDeclaration(s) => s.span,
            Statement::ClassDeclaration(s) => s.span,
            Statement::Import(s) => s.span,
            Statement::ExportNamed(s) => s.span,
            Statement::ExportDefault(s) => s.span,
            Statement::ExportAll(s) => s.span,
        }
    }
}

impl Expression {
    /// Source range of the expression.
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(e) => e.span,
            Expression::PrivateIdentifier(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::This(e) => e.span,
            Expression::Array(e) => e.span,
            Expression::Object(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Arrow(e) => e.span,
            Expression::Class(e) => e.span,
            Expression::Template(e) => e.span,
            Expression::TaggedTemplate(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Super(e) => e.span,
            Expression::MetaProperty(e) => e.span,
            Expression::New(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Update(e) => e.span,
            Expression::Await(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Logical(e) => e.span,
            Expression::Conditional(e) => e.span,
            Expression::Yield(e) => e.span,
            Expression::Assignment(e) => e.span,
            Expression::Sequence(e) => e.span,
            Expression::Chain(e) => e.span,
            Expression::Import(e) => e.span,
        }
    }
}

impl Pattern {
    /// Source range of the pattern.
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(p) => p.span,
            Pattern::Member(p) => p.span,
            Pattern::Array(p) => p.span,
            Pattern::Object(p) => p.span,
            Pattern::Assignment(p) => p.span,
            Pattern::Rest(p) => p.span,
        }
    }
}

/// ESTree `type` tags for nodes whose struct is shared between a
/// declaration and an expression position.
#[cfg(feature = "serde")]
mod tagged {
    use super::{Class, Function};
    use serde::{Serialize, Serializer};

    #[derive(Serialize)]
    struct Tagged<'a, T: Serialize> {
        #[serde(rename = "type")]
        node_type: &'static str,
        #[serde(flatten)]
        node: &'a T,
    }

    fn tag<T: Serialize, S: Serializer>(
        node_type: &'static str,
        node: &T,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        Tagged { node_type, node }.serialize(serializer)
    }

    pub fn function_declaration<S: Serializer>(node: &Function, s: S) -> Result<S::Ok, S::Error> {
        tag("FunctionDeclaration", node, s)
    }

    pub fn function_expression<S: Serializer>(node: &Function, s: S) -> Result<S::Ok, S::Error> {
        tag("FunctionExpression", node, s)
    }

    pub fn class_declaration<S: Serializer>(node: &Class, s: S) -> Result<S::Ok, S::Error> {
        tag("ClassDeclaration", node, s)
    }

    pub fn class_expression<S: Serializer>(node: &Class, s: S) -> Result<S::Ok, S::Error> {
        tag("ClassExpression", node, s)
    }
}
