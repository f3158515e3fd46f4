use ziglet_syntax::zig::SyntaxKind::{self, *};
use ziglet_syntax::zig::SyntaxSet;

use super::{CompletedMarker, Parser, delimited, name, recovery, stmts, types};
use crate::parser::Marker;

/// Tokens that may start an expression; decides whether `break` and
/// `return` carry an operand.
fn expr_first() -> SyntaxSet {
    SyntaxSet::new([
        IDENTIFIER,
        BUILTIN,
        INTEGER,
        FLOAT,
        CHAR_LITERAL,
        STRING_LITERAL_SINGLE,
        STRING_LITERAL_MULTI,
        LEFT_PAREN,
        LEFT_BRACKET,
        DOT,
        BANG,
        MINUS,
        MINUS_PERCENT,
        TILDE,
        AMP,
        STAR,
        STAR2,
        QUESTION,
        TRY_KW,
        AWAIT_KW,
        IF_KW,
        SWITCH_KW,
        WHILE_KW,
        FOR_KW,
        INLINE_KW,
        COMPTIME_KW,
        NOSUSPEND_KW,
        BREAK_KW,
        CONTINUE_KW,
        RETURN_KW,
        RESUME_KW,
        FN_KW,
        ERROR_KW,
        STRUCT_KW,
        ENUM_KW,
        UNION_KW,
        OPAQUE_KW,
        PACKED_KW,
        EXTERN_KW,
        UNREACHABLE_KW,
        ANYFRAME_KW,
        ASM_KW,
    ])
}

pub(super) fn assign_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = expr(p)?;

    if !p.peek_kind().is_assign_op() {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    expr(p);
    Some(m.complete(p, ASSIGN_EXPR))
}

pub(super) fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.enter() {
        return None;
    }
    let expr = binary_expr(p, 1);
    p.leave();
    expr
}

fn infix_precedence(kind: SyntaxKind) -> Option<u8> {
    let precedence = match kind {
        OR_KW => 1,
        AND_KW => 2,
        EQ2 | BANG_EQ | LT | GT | LT_EQ | GT_EQ => 3,
        AMP | CARET | PIPE | ORELSE_KW | CATCH_KW => 4,
        SHL | SHR | SHL_PIPE => 5,
        PLUS | MINUS | PLUS2 | PLUS_PERCENT | MINUS_PERCENT | PLUS_PIPE | MINUS_PIPE => 6,
        PIPE2 | STAR | SLASH | PERCENT | STAR2 | STAR_PERCENT | STAR_PIPE => 7,
        _ => return None,
    };
    Some(precedence)
}

const COMPARISON: u8 = 3;

fn binary_expr(p: &mut Parser<'_>, min_precedence: u8) -> Option<CompletedMarker> {
    let mut lhs = prefix_expr(p)?;
    let mut compared = false;

    while let Some(precedence) =
        infix_precedence(p.peek_kind()).filter(|&precedence| precedence >= min_precedence)
    {
        if precedence == COMPARISON {
            if compared {
                p.error("comparison operators cannot be chained");
            }
            compared = true;
        }

        let m = lhs.precede(p);
        let op = p.peek_kind();
        p.advance();
        if op == CATCH_KW {
            payload(p);
        }
        binary_expr(p, precedence + 1);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn prefix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.enter() {
        return None;
    }

    let expr = match p.peek_kind() {
        BANG | MINUS | TILDE | MINUS_PERCENT | AMP | TRY_KW | AWAIT_KW => {
            let m = p.start();
            p.advance();
            prefix_expr(p);
            Some(m.complete(p, PREFIX_EXPR))
        }
        _ => primary_expr(p),
    };

    p.leave();
    expr
}

fn primary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    match p.peek_kind() {
        ASM_KW => Some(asm_expr(p)),
        IF_KW => Some(if_expr(p)),
        BREAK_KW => {
            let m = p.start();
            p.advance();
            jump_label(p);
            if p.at_set(&expr_first()) {
                expr(p);
            }
            Some(m.complete(p, BREAK_EXPR))
        }
        CONTINUE_KW => {
            let m = p.start();
            p.advance();
            if jump_label(p) && p.at_set(&expr_first()) {
                expr(p);
            }
            Some(m.complete(p, CONTINUE_EXPR))
        }
        RETURN_KW => {
            let m = p.start();
            p.advance();
            if p.at_set(&expr_first()) {
                expr(p);
            }
            Some(m.complete(p, RETURN_EXPR))
        }
        COMPTIME_KW | NOSUSPEND_KW | RESUME_KW => {
            let kind = match p.peek_kind() {
                COMPTIME_KW => COMPTIME_EXPR,
                NOSUSPEND_KW => NOSUSPEND_EXPR,
                _ => RESUME_EXPR,
            };
            let m = p.start();
            p.advance();
            expr(p);
            Some(m.complete(p, kind))
        }
        IDENTIFIER
            if p.nth_at(1, COLON)
                && matches!(p.nth_kind(2), LEFT_BRACE | WHILE_KW | FOR_KW | INLINE_KW) =>
        {
            let m = p.start();
            label(p);
            if p.at(LEFT_BRACE) {
                stmts::block_body(p);
                Some(m.complete(p, BLOCK))
            } else {
                Some(loop_expr(p, m))
            }
        }
        INLINE_KW | WHILE_KW | FOR_KW => {
            let m = p.start();
            Some(loop_expr(p, m))
        }
        LEFT_BRACE => {
            let m = p.start();
            stmts::block_body(p);
            Some(m.complete(p, BLOCK))
        }
        _ => curly_suffix_expr(p),
    }
}

/// `name:` in front of a block or loop.
fn label(p: &mut Parser<'_>) {
    let m = p.start();
    name(p, &SyntaxSet::EMPTY);
    p.expect(COLON);
    m.complete(p, LABEL);
}

/// `:name` after `break` or `continue`.
fn jump_label(p: &mut Parser<'_>) -> bool {
    if !(p.at(COLON) && p.nth_at(1, IDENTIFIER)) {
        return false;
    }

    let m = p.start();
    p.advance();
    name(p, &SyntaxSet::EMPTY);
    m.complete(p, LABEL);
    true
}

/// `T{ ... }` initializers.
fn curly_suffix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let ty = types::type_expr(p)?;

    if !p.at(LEFT_BRACE) {
        return Some(ty);
    }

    let m = ty.precede(p);
    let list = p.start();
    init_list(p, list);
    Some(m.complete(p, INIT_EXPR))
}

/// `{ .a = x, .b = y }` or `{ x, y }`. `m` was started before an optional
/// leading `.`.
pub(super) fn init_list(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.eat(DOT);
    delimited(p, LEFT_BRACE, RIGHT_BRACE, COMMA, "expected an initializer, found `,`", |p| {
        if p.at(DOT) && p.nth_at(1, IDENTIFIER) && p.nth_at(2, EQ) {
            let m = p.start();
            p.advance();
            name(p, &SyntaxSet::EMPTY);
            p.advance();
            expr(p);
            m.complete(p, FIELD_INIT);
        } else {
            expr(p);
        }
        true
    });
    m.complete(p, INIT_LIST)
}

pub(super) fn arg_list(p: &mut Parser<'_>) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected an argument, found `,`", |p| {
        expr(p);
        true
    });
    m.complete(p, ARG_LIST);
}

/// `|a, *b|` captures.
pub(super) fn payload(p: &mut Parser<'_>) {
    if !p.at(PIPE) {
        return;
    }

    let m = p.start();
    p.advance();
    let recovery = recovery().union(&SyntaxSet::new([PIPE]));
    loop {
        p.eat(STAR);
        name(p, &recovery);
        if !p.eat(COMMA) {
            break;
        }
    }
    p.expect(PIPE);
    m.complete(p, PAYLOAD);
}

fn else_branch(p: &mut Parser<'_>) {
    if !p.at(ELSE_KW) {
        return;
    }

    let m = p.start();
    p.advance();
    payload(p);
    assign_expr(p);
    m.complete(p, ELSE_BRANCH);
}

fn condition(p: &mut Parser<'_>) {
    p.expect(LEFT_PAREN);
    expr(p);
    p.expect(RIGHT_PAREN);
}

pub(super) fn if_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    condition(p);
    payload(p);
    assign_expr(p);
    else_branch(p);
    m.complete(p, IF_EXPR)
}

/// `inline? (while | for)`, with `m` started before an optional label.
fn loop_expr(p: &mut Parser<'_>, m: Marker) -> CompletedMarker {
    p.eat(INLINE_KW);

    match p.peek_kind() {
        WHILE_KW => {
            p.advance();
            condition(p);
            payload(p);
            if p.at(COLON) {
                let cont = p.start();
                p.advance();
                p.expect(LEFT_PAREN);
                assign_expr(p);
                p.expect(RIGHT_PAREN);
                cont.complete(p, WHILE_CONTINUE);
            }
            assign_expr(p);
            else_branch(p);
            m.complete(p, WHILE_EXPR)
        }
        FOR_KW => {
            p.advance();
            delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected a for input, found `,`", |p| {
                let m = p.start();
                expr(p);
                if p.eat(DOT2) && !p.at(RIGHT_PAREN) && !p.at(COMMA) {
                    expr(p);
                }
                m.complete(p, FOR_INPUT);
                true
            });
            if p.at(PIPE) {
                payload(p);
            } else {
                p.error("expected a capture after the for inputs");
            }
            assign_expr(p);
            else_branch(p);
            m.complete(p, FOR_EXPR)
        }
        _ => {
            p.error("expected `while` or `for`");
            m.complete(p, ERROR)
        }
    }
}

pub(super) fn switch_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    condition(p);
    delimited(p, LEFT_BRACE, RIGHT_BRACE, COMMA, "expected a switch prong, found `,`", |p| {
        switch_prong(p);
        true
    });
    m.complete(p, SWITCH_EXPR)
}

fn switch_prong(p: &mut Parser<'_>) {
    let m = p.start();
    p.eat(INLINE_KW);

    let case = p.start();
    if !p.eat(ELSE_KW) {
        loop {
            expr(p);
            if p.eat(ELLIPSIS) {
                expr(p);
            }
            if !p.eat(COMMA) || p.at(FAT_ARROW) {
                break;
            }
        }
    }
    case.complete(p, SWITCH_CASE);

    p.expect(FAT_ARROW);
    payload(p);
    assign_expr(p);
    m.complete(p, SWITCH_PRONG);
}

/// `asm volatile (...)`; the operands are kept as raw tokens.
fn asm_expr(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();
    p.eat(VOLATILE_KW);

    if p.at(LEFT_PAREN) {
        let mut depth = 0usize;
        while !p.at_eof() {
            match p.peek_kind() {
                LEFT_PAREN => depth += 1,
                RIGHT_PAREN => depth -= 1,
                _ => {}
            }
            p.advance();
            if depth == 0 {
                break;
            }
        }
        if depth != 0 {
            p.error("unclosed `(` in inline assembly");
        }
    } else {
        p.error("expected `(` after `asm`");
    }

    m.complete(p, ASM_EXPR)
}
