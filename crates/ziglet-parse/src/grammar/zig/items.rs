use ziglet_syntax::zig::SyntaxKind::*;
use ziglet_syntax::zig::SyntaxSet;

use super::{Parser, delimited, exprs, name, recovery, stmts, types};

pub(crate) fn source_file(p: &mut Parser<'_>) {
    let m = p.start();
    container_members(p, false);
    p.finish_eof();
    m.complete(p, SOURCE_FILE);
}

/// Members of a container body. `nested` members stop at the closing `}`.
pub(super) fn container_members(p: &mut Parser<'_>, nested: bool) {
    while !p.at_eof() && !(nested && p.at(RIGHT_BRACE)) {
        let start = p.pos();
        container_member(p);
        if p.pos() == start {
            p.err_and_bump("expected a declaration");
        }
    }
}

fn container_member(p: &mut Parser<'_>) {
    match p.peek_kind() {
        TEST_KW => test_decl(p),
        COMPTIME_KW if p.nth_at(1, LEFT_BRACE) => {
            let m = p.start();
            p.advance();
            stmts::block(p);
            m.complete(p, COMPTIME_DECL);
        }
        PUB_KW | USINGNAMESPACE_KW | EXPORT_KW | EXTERN_KW | INLINE_KW | NOINLINE_KW
        | THREADLOCAL_KW | FN_KW | CONST_KW | VAR_KW => decl(p),
        IDENTIFIER | COMPTIME_KW => container_field(p),
        RIGHT_BRACE => p.err_and_bump("unmatched `}`"),
        _ => p.err_and_bump("expected a declaration"),
    }
}

fn test_decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();

    match p.peek_kind() {
        STRING_LITERAL_SINGLE => {
            let m = p.start();
            p.advance();
            m.complete(p, STRING_LITERAL);
        }
        IDENTIFIER => name(p, &SyntaxSet::EMPTY),
        _ => {}
    }

    stmts::block(p);
    m.complete(p, TEST_DECL);
}

fn decl(p: &mut Parser<'_>) {
    let m = p.start();
    p.eat(PUB_KW);

    if p.eat(USINGNAMESPACE_KW) {
        exprs::expr(p);
        p.expect(SEMICOLON);
        m.complete(p, USINGNAMESPACE_DECL);
        return;
    }

    match p.peek_kind() {
        EXPORT_KW | INLINE_KW | NOINLINE_KW => p.advance(),
        EXTERN_KW => {
            p.advance();
            if p.at(STRING_LITERAL_SINGLE) {
                let m = p.start();
                p.advance();
                m.complete(p, STRING_LITERAL);
            }
        }
        _ => {}
    }

    if p.at(FN_KW) {
        fn_proto(p);
        if p.at(LEFT_BRACE) {
            stmts::block(p);
        } else {
            p.expect(SEMICOLON);
        }
        m.complete(p, FN_DECL);
        return;
    }

    p.eat(THREADLOCAL_KW);
    if p.at(CONST_KW) || p.at(VAR_KW) {
        var_decl_body(p);
        m.complete(p, VAR_DECL);
    } else {
        p.error("expected `fn`, `const` or `var`");
        m.complete(p, ERROR);
    }
}

/// `fn name(params) clauses ReturnType`, shared by declarations and `FN_TYPE`.
pub(super) fn fn_proto(p: &mut Parser<'_>) {
    debug_assert!(p.at(FN_KW));
    p.advance();

    if p.at(IDENTIFIER) {
        name(p, &SyntaxSet::EMPTY);
    }

    if p.at(LEFT_PAREN) {
        param_list(p);
    } else {
        p.error("expected function parameters");
    }

    clauses(p, true);
    p.eat(BANG);

    if p.at(LEFT_BRACE) || p.at(SEMICOLON) {
        p.error("expected a return type");
    } else {
        types::type_expr(p);
    }
}

fn param_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected a parameter, found `,`", param);
    m.complete(p, PARAM_LIST);
}

fn param(p: &mut Parser<'_>) -> bool {
    let m = p.start();

    if !p.eat(NOALIAS_KW) {
        p.eat(COMPTIME_KW);
    }

    if p.at(IDENTIFIER) && p.nth_at(1, COLON) {
        name(p, &SyntaxSet::EMPTY);
        p.advance();
    }

    match p.peek_kind() {
        ANYTYPE_KW | ELLIPSIS => p.advance(),
        _ => _ = types::type_expr(p),
    }

    m.complete(p, PARAM);
    true
}

/// `align(..)`, `addrspace(..)`, `linksection(..)` and, for functions,
/// `callconv(..)`, in any order.
pub(super) fn clauses(p: &mut Parser<'_>, function: bool) {
    loop {
        let kind = match p.peek_kind() {
            ALIGN_KW => {
                align_clause(p);
                continue;
            }
            ADDRSPACE_KW => ADDRSPACE_CLAUSE,
            LINKSECTION_KW => LINKSECTION_CLAUSE,
            CALLCONV_KW if function => CALLCONV_CLAUSE,
            _ => break,
        };

        let m = p.start();
        p.advance();
        p.expect(LEFT_PAREN);
        exprs::expr(p);
        p.expect(RIGHT_PAREN);
        m.complete(p, kind);
    }
}

/// `align(expr)` or, inside pointer types, `align(expr:bit:bit)`.
pub(super) fn align_clause(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(LEFT_PAREN);
    exprs::expr(p);
    if p.eat(COLON) {
        exprs::expr(p);
        p.expect(COLON);
        exprs::expr(p);
    }
    p.expect(RIGHT_PAREN);
    m.complete(p, ALIGN_CLAUSE);
}

/// `const`/`var` through the terminating `;`, without the wrapping node.
pub(super) fn var_decl_body(p: &mut Parser<'_>) {
    p.advance();
    name(p, &recovery().union(&SyntaxSet::new([COLON, EQ])));

    if p.eat(COLON) {
        types::type_expr(p);
    }

    clauses(p, false);

    if p.eat(EQ) {
        exprs::expr(p);
    }

    p.expect(SEMICOLON);
}

fn container_field(p: &mut Parser<'_>) {
    let m = p.start();
    p.eat(COMPTIME_KW);

    if p.at(IDENTIFIER) && p.nth_at(1, COLON) {
        name(p, &SyntaxSet::EMPTY);
        p.advance();
    }

    types::type_expr(p);

    if p.at(ALIGN_KW) {
        align_clause(p);
    }

    if p.eat(EQ) {
        exprs::expr(p);
    }

    if !p.eat(COMMA) && !p.at(RIGHT_BRACE) && !p.at_eof() {
        p.error("expected `,` after a field");
    }

    m.complete(p, CONTAINER_FIELD);
}
