//! Token and node kinds of Zig source files.

use ziglet_tree::Kind;

pub type SyntaxTree = ziglet_tree::SyntaxTree<SyntaxKind>;
pub type SyntaxNode<'a> = ziglet_tree::SyntaxNode<'a, SyntaxKind>;
pub type SyntaxToken<'a> = ziglet_tree::SyntaxToken<'a, SyntaxKind>;
pub type SyntaxElement<'a> = ziglet_tree::SyntaxElement<'a, SyntaxKind>;
pub type SyntaxSet = ziglet_tree::SyntaxSet<SyntaxKind>;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    DOT,
    DOT2,
    ELLIPSIS,
    DOT_STAR,
    COMMA,
    SEMICOLON,
    COLON,
    EQ,
    EQ2,
    FAT_ARROW,
    BANG,
    BANG_EQ,
    LT,
    LT_EQ,
    SHL,
    SHL_EQ,
    SHL_PIPE,
    SHL_PIPE_EQ,
    GT,
    GT_EQ,
    SHR,
    SHR_EQ,
    PLUS,
    PLUS_EQ,
    PLUS2,
    PLUS_PERCENT,
    PLUS_PERCENT_EQ,
    PLUS_PIPE,
    PLUS_PIPE_EQ,
    MINUS,
    MINUS_EQ,
    ARROW,
    MINUS_PERCENT,
    MINUS_PERCENT_EQ,
    MINUS_PIPE,
    MINUS_PIPE_EQ,
    STAR,
    STAR_EQ,
    STAR2,
    STAR_PERCENT,
    STAR_PERCENT_EQ,
    STAR_PIPE,
    STAR_PIPE_EQ,
    SLASH,
    SLASH_EQ,
    PERCENT,
    PERCENT_EQ,
    AMP,
    AMP_EQ,
    PIPE,
    PIPE_EQ,
    PIPE2,
    CARET,
    CARET_EQ,
    TILDE,
    QUESTION,

    ADDRSPACE_KW,
    ALIGN_KW,
    ALLOWZERO_KW,
    AND_KW,
    ANYFRAME_KW,
    ANYTYPE_KW,
    ASM_KW,
    ASYNC_KW,
    AWAIT_KW,
    BREAK_KW,
    CALLCONV_KW,
    CATCH_KW,
    COMPTIME_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFER_KW,
    ELSE_KW,
    ENUM_KW,
    ERRDEFER_KW,
    ERROR_KW,
    EXPORT_KW,
    EXTERN_KW,
    FN_KW,
    FOR_KW,
    IF_KW,
    INLINE_KW,
    LINKSECTION_KW,
    NOALIAS_KW,
    NOINLINE_KW,
    NOSUSPEND_KW,
    OPAQUE_KW,
    OR_KW,
    ORELSE_KW,
    PACKED_KW,
    PUB_KW,
    RESUME_KW,
    RETURN_KW,
    STRUCT_KW,
    SUSPEND_KW,
    SWITCH_KW,
    TEST_KW,
    THREADLOCAL_KW,
    TRY_KW,
    UNION_KW,
    UNREACHABLE_KW,
    USINGNAMESPACE_KW,
    VAR_KW,
    VOLATILE_KW,
    WHILE_KW,

    IDENTIFIER,
    BUILTIN,
    INTEGER,
    FLOAT,
    CHAR_LITERAL,
    STRING_LITERAL_SINGLE,
    STRING_LITERAL_MULTI,

    LINE_COMMENT,
    DOC_COMMENT,
    CONTAINER_DOC_COMMENT,
    WHITESPACE,

    /// Sub-tokens of single-line string and char literals.
    STRING_TEXT,
    VALID_ESCAPE,
    INVALID_CHARACTER_ESCAPE,
    INVALID_UNICODE_ESCAPE,

    BAD_CHARACTER,
    EOF,

    SOURCE_FILE,
    TEST_DECL,
    COMPTIME_DECL,
    USINGNAMESPACE_DECL,
    FN_DECL,
    VAR_DECL,
    CONTAINER_FIELD,
    PARAM_LIST,
    PARAM,
    ALIGN_CLAUSE,
    ADDRSPACE_CLAUSE,
    LINKSECTION_CLAUSE,
    CALLCONV_CLAUSE,

    BLOCK,
    LABEL,
    EXPR_STMT,
    ASSIGN_EXPR,
    DEFER_STMT,
    SUSPEND_STMT,
    COMPTIME_EXPR,
    NOSUSPEND_EXPR,

    IF_EXPR,
    ELSE_BRANCH,
    WHILE_EXPR,
    WHILE_CONTINUE,
    FOR_EXPR,
    FOR_INPUT,
    SWITCH_EXPR,
    SWITCH_PRONG,
    SWITCH_CASE,
    PAYLOAD,
    BREAK_EXPR,
    CONTINUE_EXPR,
    RETURN_EXPR,
    RESUME_EXPR,

    BINARY_EXPR,
    PREFIX_EXPR,
    ERROR_UNION_EXPR,
    PAREN_EXPR,
    CALL_EXPR,
    ARG_LIST,
    FIELD_EXPR,
    DEREF_EXPR,
    UNWRAP_EXPR,
    INDEX_EXPR,
    SLICE_EXPR,
    INIT_EXPR,
    INIT_LIST,
    FIELD_INIT,
    ENUM_LITERAL,
    ERROR_VALUE,
    ERROR_SET_DECL,
    BUILTIN_CALL,
    ASM_EXPR,
    IDENT,
    STRING_LITERAL,
    LITERAL,

    PTR_TYPE,
    SLICE_TYPE,
    ARRAY_TYPE,
    OPTIONAL_TYPE,
    ANYFRAME_TYPE,
    FN_TYPE,
    CONTAINER_DECL,

    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl Kind for SyntaxKind {
    const TOMBSTONE: Self = TOMBSTONE;

    fn into_raw(self) -> u16 {
        self as u16
    }

    fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | LINE_COMMENT | DOC_COMMENT | CONTAINER_DOC_COMMENT)
    }
}

const KEYWORDS: [(&str, SyntaxKind); 49] = [
    ("addrspace", ADDRSPACE_KW),
    ("align", ALIGN_KW),
    ("allowzero", ALLOWZERO_KW),
    ("and", AND_KW),
    ("anyframe", ANYFRAME_KW),
    ("anytype", ANYTYPE_KW),
    ("asm", ASM_KW),
    ("async", ASYNC_KW),
    ("await", AWAIT_KW),
    ("break", BREAK_KW),
    ("callconv", CALLCONV_KW),
    ("catch", CATCH_KW),
    ("comptime", COMPTIME_KW),
    ("const", CONST_KW),
    ("continue", CONTINUE_KW),
    ("defer", DEFER_KW),
    ("else", ELSE_KW),
    ("enum", ENUM_KW),
    ("errdefer", ERRDEFER_KW),
    ("error", ERROR_KW),
    ("export", EXPORT_KW),
    ("extern", EXTERN_KW),
    ("fn", FN_KW),
    ("for", FOR_KW),
    ("if", IF_KW),
    ("inline", INLINE_KW),
    ("linksection", LINKSECTION_KW),
    ("noalias", NOALIAS_KW),
    ("noinline", NOINLINE_KW),
    ("nosuspend", NOSUSPEND_KW),
    ("opaque", OPAQUE_KW),
    ("or", OR_KW),
    ("orelse", ORELSE_KW),
    ("packed", PACKED_KW),
    ("pub", PUB_KW),
    ("resume", RESUME_KW),
    ("return", RETURN_KW),
    ("struct", STRUCT_KW),
    ("suspend", SUSPEND_KW),
    ("switch", SWITCH_KW),
    ("test", TEST_KW),
    ("threadlocal", THREADLOCAL_KW),
    ("try", TRY_KW),
    ("union", UNION_KW),
    ("unreachable", UNREACHABLE_KW),
    ("usingnamespace", USINGNAMESPACE_KW),
    ("var", VAR_KW),
    ("volatile", VOLATILE_KW),
    ("while", WHILE_KW),
];

impl SyntaxKind {
    /// Keyword lookup for an identifier-shaped word.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let index = KEYWORDS.binary_search_by(|(keyword, _)| keyword.cmp(&word)).ok()?;
        Some(KEYWORDS[index].1)
    }

    /// Source text of punctuation and keywords.
    pub fn text(self) -> Option<&'static str> {
        if self.is_keyword() {
            return Some(KEYWORDS[self as usize - ADDRSPACE_KW as usize].0);
        }
        let text = match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            DOT => ".",
            DOT2 => "..",
            ELLIPSIS => "...",
            DOT_STAR => ".*",
            COMMA => ",",
            SEMICOLON => ";",
            COLON => ":",
            EQ => "=",
            EQ2 => "==",
            FAT_ARROW => "=>",
            BANG => "!",
            BANG_EQ => "!=",
            LT => "<",
            LT_EQ => "<=",
            SHL => "<<",
            SHL_EQ => "<<=",
            SHL_PIPE => "<<|",
            SHL_PIPE_EQ => "<<|=",
            GT => ">",
            GT_EQ => ">=",
            SHR => ">>",
            SHR_EQ => ">>=",
            PLUS => "+",
            PLUS_EQ => "+=",
            PLUS2 => "++",
            PLUS_PERCENT => "+%",
            PLUS_PERCENT_EQ => "+%=",
            PLUS_PIPE => "+|",
            PLUS_PIPE_EQ => "+|=",
            MINUS => "-",
            MINUS_EQ => "-=",
            ARROW => "->",
            MINUS_PERCENT => "-%",
            MINUS_PERCENT_EQ => "-%=",
            MINUS_PIPE => "-|",
            MINUS_PIPE_EQ => "-|=",
            STAR => "*",
            STAR_EQ => "*=",
            STAR2 => "**",
            STAR_PERCENT => "*%",
            STAR_PERCENT_EQ => "*%=",
            STAR_PIPE => "*|",
            STAR_PIPE_EQ => "*|=",
            SLASH => "/",
            SLASH_EQ => "/=",
            PERCENT => "%",
            PERCENT_EQ => "%=",
            AMP => "&",
            AMP_EQ => "&=",
            PIPE => "|",
            PIPE_EQ => "|=",
            PIPE2 => "||",
            CARET => "^",
            CARET_EQ => "^=",
            TILDE => "~",
            QUESTION => "?",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        (ADDRSPACE_KW..=WHILE_KW).contains(&self)
    }

    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            EQ | STAR_EQ
                | STAR_PIPE_EQ
                | SLASH_EQ
                | PERCENT_EQ
                | PLUS_EQ
                | PLUS_PIPE_EQ
                | MINUS_EQ
                | MINUS_PIPE_EQ
                | SHL_EQ
                | SHL_PIPE_EQ
                | SHR_EQ
                | AMP_EQ
                | CARET_EQ
                | PIPE_EQ
                | STAR_PERCENT_EQ
                | PLUS_PERCENT_EQ
                | MINUS_PERCENT_EQ
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kinds_fit_in_syntax_set() {
        assert!(EOF.into_raw() < 256);
        let set = SyntaxSet::new([EOF, LEFT_PAREN, WHILE_KW]);
        assert!(set.contains(EOF));
        assert!(set.contains(WHILE_KW));
        assert!(!set.contains(IF_KW));
    }

    #[test]
    fn keyword_table_follows_declaration_order() {
        for (index, (word, kind)) in KEYWORDS.iter().enumerate() {
            assert_eq!(*kind as usize, ADDRSPACE_KW as usize + index);
            assert_eq!(kind.text(), Some(*word));
        }
        assert_eq!(KEYWORDS.len(), WHILE_KW as usize - ADDRSPACE_KW as usize + 1);
        assert_eq!(SHL_PIPE_EQ.text(), Some("<<|="));
        assert_eq!(IDENTIFIER.text(), None);
    }

    #[test]
    fn keyword_classification() {
        assert_eq!(SyntaxKind::from_keyword("usingnamespace"), Some(USINGNAMESPACE_KW));
        assert_eq!(SyntaxKind::from_keyword("true"), None);
        assert!(ORELSE_KW.is_keyword());
        assert!(!IDENTIFIER.is_keyword());
        assert!(DOC_COMMENT.is_trivia());
        assert!(!STRING_LITERAL_MULTI.is_trivia());
    }
}
