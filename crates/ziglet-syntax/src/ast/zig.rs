//! Typed nodes of Zig source files.

use std::borrow::Cow;

use text_size::TextRange;

use super::{AstNode, child, children, node_after, string, token};
use crate::zig::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_nodes! {
    SourceFile => SOURCE_FILE,
    TestDecl => TEST_DECL,
    ComptimeDecl => COMPTIME_DECL,
    UsingnamespaceDecl => USINGNAMESPACE_DECL,
    FnDecl => FN_DECL,
    VarDecl => VAR_DECL,
    ContainerField => CONTAINER_FIELD,
    ParamList => PARAM_LIST,
    Param => PARAM,
    AlignClause => ALIGN_CLAUSE,
    AddrspaceClause => ADDRSPACE_CLAUSE,
    LinksectionClause => LINKSECTION_CLAUSE,
    CallconvClause => CALLCONV_CLAUSE,
    Block => BLOCK,
    Label => LABEL,
    ExprStmt => EXPR_STMT,
    AssignExpr => ASSIGN_EXPR,
    DeferStmt => DEFER_STMT,
    SuspendStmt => SUSPEND_STMT,
    ComptimeExpr => COMPTIME_EXPR,
    NosuspendExpr => NOSUSPEND_EXPR,
    IfExpr => IF_EXPR,
    ElseBranch => ELSE_BRANCH,
    WhileExpr => WHILE_EXPR,
    WhileContinue => WHILE_CONTINUE,
    ForExpr => FOR_EXPR,
    ForInput => FOR_INPUT,
    SwitchExpr => SWITCH_EXPR,
    SwitchProng => SWITCH_PRONG,
    SwitchCase => SWITCH_CASE,
    Payload => PAYLOAD,
    BreakExpr => BREAK_EXPR,
    ContinueExpr => CONTINUE_EXPR,
    ReturnExpr => RETURN_EXPR,
    ResumeExpr => RESUME_EXPR,
    BinaryExpr => BINARY_EXPR,
    PrefixExpr => PREFIX_EXPR,
    ErrorUnionExpr => ERROR_UNION_EXPR,
    ParenExpr => PAREN_EXPR,
    CallExpr => CALL_EXPR,
    ArgList => ARG_LIST,
    FieldExpr => FIELD_EXPR,
    DerefExpr => DEREF_EXPR,
    UnwrapExpr => UNWRAP_EXPR,
    IndexExpr => INDEX_EXPR,
    SliceExpr => SLICE_EXPR,
    InitExpr => INIT_EXPR,
    InitList => INIT_LIST,
    FieldInit => FIELD_INIT,
    EnumLiteral => ENUM_LITERAL,
    ErrorValue => ERROR_VALUE,
    ErrorSetDecl => ERROR_SET_DECL,
    BuiltinCall => BUILTIN_CALL,
    AsmExpr => ASM_EXPR,
    Identifier => IDENT,
    StringLiteral => STRING_LITERAL,
    Literal => LITERAL,
    PtrType => PTR_TYPE,
    SliceType => SLICE_TYPE,
    ArrayType => ARRAY_TYPE,
    OptionalType => OPTIONAL_TYPE,
    AnyframeType => ANYFRAME_TYPE,
    FnType => FN_TYPE,
    ContainerDecl => CONTAINER_DECL,
    Error => ERROR,
}

/// Text of the `///` comments directly preceding a declaration, one line
/// per comment, markers stripped.
fn doc_comments(node: SyntaxNode<'_>) -> Option<String> {
    let lines: Vec<_> = node
        .tokens()
        .take_while(|token| token.is_trivia())
        .filter(|token| token.kind() == SyntaxKind::DOC_COMMENT)
        .map(|token| token.text().trim_start_matches("///").trim_end())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Whether the node has a direct child token of `kind`.
fn has_token(node: SyntaxNode<'_>, kind: SyntaxKind) -> bool {
    token(node, kind).is_some()
}

impl<'a> SourceFile<'a> {
    pub fn members(self) -> impl Iterator<Item = AnyNode<'a>> + 'a {
        self.0.children().filter_map(AnyNode::cast)
    }

    pub fn fn_decls(self) -> impl Iterator<Item = FnDecl<'a>> + 'a {
        children(self.0)
    }

    pub fn var_decls(self) -> impl Iterator<Item = VarDecl<'a>> + 'a {
        children(self.0)
    }

    pub fn test_decls(self) -> impl Iterator<Item = TestDecl<'a>> + 'a {
        children(self.0)
    }

    pub fn fields(self) -> impl Iterator<Item = ContainerField<'a>> + 'a {
        children(self.0)
    }

    /// Text of the `//!` comments of the file, markers stripped.
    pub fn container_doc_comments(self) -> Option<String> {
        let lines: Vec<_> = self
            .0
            .tokens()
            .filter(|token| token.kind() == SyntaxKind::CONTAINER_DOC_COMMENT)
            .map(|token| token.text().trim_start_matches("//!").trim_end())
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }
}

impl<'a> TestDecl<'a> {
    /// `test "name"` or `test ident`; `None` for anonymous tests.
    pub fn name(self) -> Option<Cow<'a, str>> {
        if let Some(literal) = child::<StringLiteral<'a>>(self.0) {
            return Some(Cow::Owned(literal.content()));
        }
        child::<Identifier<'a>>(self.0).map(Identifier::value)
    }

    pub fn body(self) -> Option<Block<'a>> {
        child(self.0)
    }
}

impl<'a> FnDecl<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }

    pub fn param_list(self) -> Option<ParamList<'a>> {
        child(self.0)
    }

    /// Return type expression, the node following the parameter list.
    pub fn return_type(self) -> Option<SyntaxNode<'a>> {
        let params = self.param_list()?.0;
        self.0.children().skip_while(|it| *it != params).skip(1).find(|it| {
            !matches!(
                it.kind(),
                SyntaxKind::ALIGN_CLAUSE
                    | SyntaxKind::ADDRSPACE_CLAUSE
                    | SyntaxKind::LINKSECTION_CLAUSE
                    | SyntaxKind::CALLCONV_CLAUSE
                    | SyntaxKind::BLOCK
            )
        })
    }

    /// `None` for prototypes terminated by `;`.
    pub fn body(self) -> Option<Block<'a>> {
        children(self.0).last()
    }

    pub fn is_pub(self) -> bool {
        has_token(self.0, SyntaxKind::PUB_KW)
    }

    pub fn is_extern(self) -> bool {
        has_token(self.0, SyntaxKind::EXTERN_KW)
    }

    pub fn is_export(self) -> bool {
        has_token(self.0, SyntaxKind::EXPORT_KW)
    }

    pub fn doc_comments(self) -> Option<String> {
        doc_comments(self.0)
    }
}

impl<'a> VarDecl<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }

    pub fn is_const(self) -> bool {
        has_token(self.0, SyntaxKind::CONST_KW)
    }

    pub fn is_pub(self) -> bool {
        has_token(self.0, SyntaxKind::PUB_KW)
    }

    pub fn type_expr(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, SyntaxKind::COLON)
    }

    pub fn initializer(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, SyntaxKind::EQ)
    }

    pub fn doc_comments(self) -> Option<String> {
        doc_comments(self.0)
    }
}

impl<'a> ContainerField<'a> {
    /// `None` for tuple fields, which only carry a type.
    pub fn name(self) -> Option<Identifier<'a>> {
        token(self.0, SyntaxKind::COLON)?;
        self.0.children().next().and_then(Identifier::cast)
    }

    pub fn type_expr(self) -> Option<SyntaxNode<'a>> {
        match token(self.0, SyntaxKind::COLON) {
            Some(_) => node_after(self.0, SyntaxKind::COLON),
            None => self.0.children().next(),
        }
    }

    pub fn default_value(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, SyntaxKind::EQ)
    }

    pub fn doc_comments(self) -> Option<String> {
        doc_comments(self.0)
    }
}

impl<'a> ParamList<'a> {
    pub fn params(self) -> impl Iterator<Item = Param<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Param<'a> {
    /// `None` for unnamed parameters such as `anytype` or `fn (u8) void`.
    pub fn name(self) -> Option<Identifier<'a>> {
        token(self.0, SyntaxKind::COLON)?;
        self.0.children().next().and_then(Identifier::cast)
    }

    pub fn type_expr(self) -> Option<SyntaxNode<'a>> {
        match token(self.0, SyntaxKind::COLON) {
            Some(_) => node_after(self.0, SyntaxKind::COLON),
            None => self.0.children().next(),
        }
    }

    pub fn is_comptime(self) -> bool {
        has_token(self.0, SyntaxKind::COMPTIME_KW)
    }
}

impl<'a> Block<'a> {
    pub fn label(self) -> Option<Label<'a>> {
        child(self.0)
    }

    pub fn statements(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children().filter(|node| node.kind() != SyntaxKind::LABEL)
    }
}

impl<'a> Label<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }
}

impl<'a> BinaryExpr<'a> {
    pub fn lhs(self) -> Option<SyntaxNode<'a>> {
        self.0.children().next()
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|token| !token.is_trivia())
    }

    pub fn rhs(self) -> Option<SyntaxNode<'a>> {
        self.0.children().nth(1)
    }
}

impl<'a> PrefixExpr<'a> {
    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|token| !token.is_trivia())
    }

    pub fn expr(self) -> Option<SyntaxNode<'a>> {
        self.0.children().next()
    }
}

impl<'a> CallExpr<'a> {
    pub fn callee(self) -> Option<SyntaxNode<'a>> {
        self.0.children().next()
    }

    pub fn args(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        child::<ArgList<'a>>(self.0).into_iter().flat_map(|args| args.0.children())
    }
}

impl<'a> FieldExpr<'a> {
    pub fn receiver(self) -> Option<SyntaxNode<'a>> {
        self.0.children().next()
    }

    pub fn field(self) -> Option<Identifier<'a>> {
        children(self.0).last()
    }
}

impl<'a> BuiltinCall<'a> {
    /// Builtin name without the leading `@`.
    pub fn name(self) -> Option<&'a str> {
        let builtin = token(self.0, SyntaxKind::BUILTIN)?;
        Some(builtin.text().trim_start_matches('@'))
    }

    pub fn args(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        child::<ArgList<'a>>(self.0).into_iter().flat_map(|args| args.0.children())
    }
}

impl<'a> InitList<'a> {
    pub fn field_inits(self) -> impl Iterator<Item = FieldInit<'a>> + 'a {
        children(self.0)
    }

    pub fn is_anonymous(self) -> bool {
        self.0.parent().is_none_or(|parent| parent.kind() != SyntaxKind::INIT_EXPR)
    }
}

impl<'a> FieldInit<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }

    pub fn value(self) -> Option<SyntaxNode<'a>> {
        node_after(self.0, SyntaxKind::EQ)
    }
}

impl<'a> EnumLiteral<'a> {
    pub fn name(self) -> Option<Identifier<'a>> {
        child(self.0)
    }
}

impl<'a> ErrorSetDecl<'a> {
    pub fn names(self) -> impl Iterator<Item = Identifier<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> ContainerDecl<'a> {
    /// `STRUCT_KW`, `ENUM_KW`, `UNION_KW` or `OPAQUE_KW`.
    pub fn keyword(self) -> Option<SyntaxToken<'a>> {
        self.0.children_with_tokens().filter_map(|it| it.into_token()).find(|token| {
            matches!(
                token.kind(),
                SyntaxKind::STRUCT_KW
                    | SyntaxKind::ENUM_KW
                    | SyntaxKind::UNION_KW
                    | SyntaxKind::OPAQUE_KW
            )
        })
    }

    pub fn members(self) -> impl Iterator<Item = AnyNode<'a>> + 'a {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::CONTAINER_FIELD
            | SyntaxKind::FN_DECL
            | SyntaxKind::VAR_DECL
            | SyntaxKind::TEST_DECL
            | SyntaxKind::COMPTIME_DECL
            | SyntaxKind::USINGNAMESPACE_DECL => AnyNode::cast(node),
            _ => None,
        })
    }

    pub fn fields(self) -> impl Iterator<Item = ContainerField<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Identifier<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        token(self.0, SyntaxKind::IDENTIFIER)
    }

    /// Raw identifier text, `@"..."` form included.
    pub fn text(self) -> &'a str {
        self.token().map_or("", |token| token.text())
    }

    /// Name with the `@"..."` quoting removed and escapes decoded.
    pub fn value(self) -> Cow<'a, str> {
        string::identifier_value(self.text())
    }
}

impl<'a> StringLiteral<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|token| {
                matches!(
                    token.kind(),
                    SyntaxKind::STRING_LITERAL_SINGLE | SyntaxKind::STRING_LITERAL_MULTI
                )
            })
    }

    pub fn is_multiline(self) -> bool {
        self.token().is_some_and(|token| token.kind() == SyntaxKind::STRING_LITERAL_MULTI)
    }

    /// Document ranges of the literal's content, one per line for `\\`
    /// literals and one without the quotes otherwise. Blank and comment lines
    /// between `\\` lines are not part of the content.
    pub fn content_ranges(self) -> Vec<TextRange> {
        let Some(token) = self.token() else {
            return Vec::new();
        };
        if !self.is_multiline() {
            return vec![string::quoted_content_range(token.text(), token.text_range(), '"')];
        }
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|token| token.kind() == SyntaxKind::STRING_LITERAL_MULTI)
            .flat_map(|token| string::multiline_content_ranges(token.text(), token.text_range()))
            .collect()
    }

    /// Literal value: joined lines for `\\` literals, decoded text otherwise.
    pub fn content(self) -> String {
        let source = self.0.tree().text();
        let ranges = self.content_ranges();
        if self.is_multiline() {
            string::multiline_content(source, &ranges)
        } else {
            ranges
                .first()
                .map(|&range| super::unescape(&source[range]).into_owned())
                .unwrap_or_default()
        }
    }
}

/// The token carried by a `LITERAL` node.
#[derive(Clone, Copy, Debug)]
pub enum LiteralKind<'a> {
    Integer(SyntaxToken<'a>),
    Float(SyntaxToken<'a>),
    Char(SyntaxToken<'a>),
    Unreachable(SyntaxToken<'a>),
}

impl<'a> Literal<'a> {
    pub fn kind(self) -> Option<LiteralKind<'a>> {
        self.0.children_with_tokens().filter_map(|it| it.into_token()).find_map(|token| {
            match token.kind() {
                SyntaxKind::INTEGER => Some(LiteralKind::Integer(token)),
                SyntaxKind::FLOAT => Some(LiteralKind::Float(token)),
                SyntaxKind::CHAR_LITERAL => Some(LiteralKind::Char(token)),
                SyntaxKind::UNREACHABLE_KW => Some(LiteralKind::Unreachable(token)),
                _ => None,
            }
        })
    }

    /// Decoded value of a char literal.
    pub fn char_value(self) -> Option<char> {
        let Some(LiteralKind::Char(token)) = self.kind() else {
            return None;
        };
        let range = string::quoted_content_range(token.text(), token.text_range(), '\'');
        let content = &self.0.tree().text()[range];
        let value = string::unescape(content);
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}
