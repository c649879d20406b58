//! Import and export declarations.

use rustc_hash::FxHashSet;

use super::classes::ClassRole;
use super::context::Context;
use super::functions::FunctionRole;
use super::parser::Parser;
use super::patterns::BindTarget;
use super::scope::BindingKind;
use super::statements::{StatementSlot, bound_names_of};
use crate::ast::*;
use crate::error::{ErrorKind, Result};
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// `import ...;` at module top level.
    pub(super) fn parse_import(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;

        let specifiers = if matches!(self.current.kind, TokenKind::String(_)) {
            Vec::new()
        } else {
            let specifiers = self.parse_import_specifiers(ctx)?;
            self.expect_contextual("from")?;
            specifiers
        };
        let source = self.parse_module_source(ctx)?;
        let attributes = self.parse_with_clause(ctx)?;
        self.semicolon()?;

        Ok(Statement::Import(ImportDeclaration {
            span: self.finish(start),
            specifiers,
            source,
            attributes,
        }))
    }

    fn declare_import(&mut self, ctx: Context, local: &Identifier) -> Result<()> {
        let target = BindTarget::Declare(BindingKind::Lexical);
        self.check_pattern(ctx, &Pattern::Identifier(local.clone()), target, None)
    }

    fn parse_import_specifiers(&mut self, ctx: Context) -> Result<Vec<ImportClause>> {
        let mut specifiers = Vec::new();

        if matches!(self.current.kind, TokenKind::Identifier(_)) {
            let start = self.start();
            let local = self.parse_identifier(ctx)?;
            self.declare_import(ctx, &local)?;
            specifiers.push(ImportClause::Default(ImportDefaultSpecifier {
                span: self.finish(start),
                local,
            }));
            if !self.eat(&TokenKind::Comma)? {
                return Ok(specifiers);
            }
        }

        if self.check(&TokenKind::Star) {
            let start = self.start();
            self.advance()?;
            self.expect_contextual("as")?;
            let local = self.parse_identifier(ctx)?;
            self.declare_import(ctx, &local)?;
            specifiers.push(ImportClause::Namespace(ImportNamespaceSpecifier {
                span: self.finish(start),
                local,
            }));
            return Ok(specifiers);
        }

        self.expect(&TokenKind::LeftBrace)?;
        let mut first = true;
        while !self.eat(&TokenKind::RightBrace)? {
            if !first {
                self.expect(&TokenKind::Comma)?;
                if self.eat(&TokenKind::RightBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.start();
            let imported = self.parse_module_export_name(ctx)?;
            let local = if self.eat_contextual("as")? {
                self.parse_identifier(ctx)?
            } else {
                match &imported {
                    ModuleExportName::Identifier(id) => {
                        self.check_unreserved(ctx, &id.name, id.span.start)?;
                        id.clone()
                    }
                    ModuleExportName::String(_) => return Err(self.unexpected()),
                }
            };
            self.declare_import(ctx, &local)?;
            specifiers.push(ImportClause::Named(ImportSpecifier {
                span: self.finish(start),
                imported,
                local,
            }));
        }
        Ok(specifiers)
    }

    /// The string after `from`.
    fn parse_module_source(&mut self, ctx: Context) -> Result<Literal> {
        if !matches!(self.current.kind, TokenKind::String(_)) {
            return Err(self.unexpected());
        }
        self.parse_literal(ctx)
    }

    /// An identifier name or a string in an import/export list.
    fn parse_module_export_name(&mut self, ctx: Context) -> Result<ModuleExportName> {
        if matches!(self.current.kind, TokenKind::String(_)) {
            return Ok(ModuleExportName::String(self.parse_literal(ctx)?));
        }
        Ok(ModuleExportName::Identifier(self.parse_identifier_name()?))
    }

    /// `with { type: "json" }`
    fn parse_with_clause(&mut self, ctx: Context) -> Result<Vec<ImportAttribute>> {
        let mut attributes = Vec::new();
        if !self.eat(&TokenKind::With)? {
            return Ok(attributes);
        }
        self.expect(&TokenKind::LeftBrace)?;
        let mut seen = FxHashSet::default();
        let mut first = true;
        while !self.eat(&TokenKind::RightBrace)? {
            if !first {
                self.expect(&TokenKind::Comma)?;
                if self.eat(&TokenKind::RightBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.start();
            let key = self.parse_module_export_name(ctx)?;
            if !seen.insert(key.name().to_string()) {
                return Err(self.raise(
                    ErrorKind::EarlyError,
                    key.span().start,
                    format!("Duplicate attribute key '{}'", key.name()),
                ));
            }
            self.expect(&TokenKind::Colon)?;
            if !matches!(self.current.kind, TokenKind::String(_)) {
                return Err(self.unexpected());
            }
            let value = self.parse_literal(ctx)?;
            attributes.push(ImportAttribute {
                span: self.finish(start),
                key,
                value,
            });
        }
        Ok(attributes)
    }

    /// Records an exported name, rejecting duplicates.
    fn check_export(&mut self, name: &str, offset: usize) -> Result<()> {
        if !self.exports.insert(name.to_string()) {
            return Err(self.raise(
                ErrorKind::EarlyError,
                offset,
                format!("Duplicate export '{}'", name),
            ));
        }
        Ok(())
    }

    /// `export ...` at module top level.
    pub(super) fn parse_export(&mut self, ctx: Context) -> Result<Statement> {
        let start = self.start();
        self.advance()?;

        if self.eat(&TokenKind::Star)? {
            let exported = if self.eat_contextual("as")? {
                let name = self.parse_module_export_name(ctx)?;
                self.check_export(name.name(), name.span().start)?;
                Some(name)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_source(ctx)?;
            let attributes = self.parse_with_clause(ctx)?;
            self.semicolon()?;
            return Ok(Statement::ExportAll(ExportAllDeclaration {
                span: self.finish(start),
                exported,
                source,
                attributes,
            }));
        }

        if self.check(&TokenKind::Default) {
            self.check_export("default", self.current.span.start)?;
            self.advance()?;
            let declaration = self.parse_export_default(ctx)?;
            return Ok(Statement::ExportDefault(ExportDefaultDeclaration {
                span: self.finish(start),
                declaration,
            }));
        }

        if self.starts_exported_declaration()? {
            let declaration = self.parse_statement(ctx, StatementSlot::TopLevel)?;
            let mut names = Vec::new();
            match &declaration {
                Statement::VariableDeclaration(decl) => {
                    for declarator in &decl.declarations {
                        bound_names_of(&declarator.id, &mut names);
                    }
                }
                Statement::FunctionDeclaration(Function { id: Some(id), .. })
                | Statement::ClassDeclaration(Class { id: Some(id), .. }) => {
                    names.push((id.name.clone(), id.span.start));
                }
                _ => {}
            }
            for (name, offset) in names {
                self.check_export(&name, offset)?;
            }
            return Ok(Statement::ExportNamed(ExportNamedDeclaration {
                span: self.finish(start),
                declaration: Some(Box::new(declaration)),
                specifiers: Vec::new(),
                source: None,
                attributes: Vec::new(),
            }));
        }

        let specifiers = self.parse_export_specifiers(ctx)?;
        let (source, attributes) = if self.eat_contextual("from")? {
            let source = self.parse_module_source(ctx)?;
            (Some(source), self.parse_with_clause(ctx)?)
        } else {
            for spec in &specifiers {
                match &spec.local {
                    ModuleExportName::String(lit) => {
                        return Err(self.raise(
                            ErrorKind::EarlyError,
                            lit.span.start,
                            "A string literal cannot be used as an exported binding without `from`",
                        ));
                    }
                    ModuleExportName::Identifier(id) => {
                        self.check_unreserved(ctx, &id.name, id.span.start)?;
                        self.local_exports.push((id.name.clone(), id.span.start));
                    }
                }
            }
            (None, Vec::new())
        };
        self.semicolon()?;

        Ok(Statement::ExportNamed(ExportNamedDeclaration {
            span: self.finish(start),
            declaration: None,
            specifiers,
            source,
            attributes,
        }))
    }

    fn starts_exported_declaration(&self) -> Result<bool> {
        if matches!(
            self.current.kind,
            TokenKind::Var | TokenKind::Const | TokenKind::Function | TokenKind::Class
        ) {
            return Ok(true);
        }
        Ok(self.is_let(StatementSlot::TopLevel)? || self.is_async_function()?)
    }

    fn parse_export_default(&mut self, ctx: Context) -> Result<ExportDefaultKind> {
        let start = self.start();
        if self.check(&TokenKind::Function) || self.is_async_function()? {
            let is_async = !self.check(&TokenKind::Function);
            if is_async {
                self.advance()?;
            }
            self.advance()?;
            let func = self.parse_function(ctx, start, FunctionRole::DefaultExport, is_async)?;
            return Ok(ExportDefaultKind::Function(func));
        }
        if self.check(&TokenKind::Class) {
            let class = self.parse_class(ctx, start, ClassRole::DefaultExport)?;
            return Ok(ExportDefaultKind::Class(class));
        }
        let expression = self.parse_maybe_assign(ctx, None)?;
        self.semicolon()?;
        Ok(ExportDefaultKind::Expression(expression))
    }

    fn parse_export_specifiers(&mut self, ctx: Context) -> Result<Vec<ExportSpecifier>> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut specifiers = Vec::new();
        let mut first = true;
        while !self.eat(&TokenKind::RightBrace)? {
            if !first {
                self.expect(&TokenKind::Comma)?;
                if self.eat(&TokenKind::RightBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.start();
            let local = self.parse_module_export_name(ctx)?;
            let exported = if self.eat_contextual("as")? {
                self.parse_module_export_name(ctx)?
            } else {
                local.clone()
            };
            self.check_export(exported.name(), exported.span().start)?;
            specifiers.push(ExportSpecifier {
                span: self.finish(start),
                local,
                exported,
            });
        }
        Ok(specifiers)
    }
}
