use crate::ast::TokenKind;

// Operator tiers, lowest binding first. `between` is absent:
// the parser recognizes it only to reject it.

/// Logical disjunction tier (`or`)
pub const OR_OPERATORS: &[TokenKind] = &[TokenKind::Or];

/// Logical conjunction tier (`and`)
pub const AND_OPERATORS: &[TokenKind] = &[TokenKind::And];

/// Equality tier (`=`, `<>`, `is`, `in`, `like`)
pub const EQUALITY_OPERATORS: &[TokenKind] = &[
    TokenKind::Different,
    TokenKind::Equal,
    TokenKind::Is,
    TokenKind::In,
    TokenKind::Like,
];

/// Comparison tier (`>`, `>=`, `<`, `<=`)
pub const COMPARISON_OPERATORS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];

/// Prefix operators (`not`, `-`)
pub const UNARY_OPERATORS: &[TokenKind] = &[TokenKind::Not, TokenKind::Minus];

/// SQL spelling of an infix operator, if it has one.
///
/// `in` and the `..` range marker are absent: the generator renders them
/// structurally (`x in (a, b)` / `x between a and b`).
pub fn sql_binary_spelling(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::And => Some("and"),
        TokenKind::Or => Some("or"),
        TokenKind::Equal => Some("="),
        TokenKind::Different => Some("<>"),
        TokenKind::Less => Some("<"),
        TokenKind::LessEqual => Some("<="),
        TokenKind::Greater => Some(">"),
        TokenKind::GreaterEqual => Some(">="),
        TokenKind::Is => Some("is"),
        TokenKind::Like => Some("like"),
        _ => None,
    }
}

/// SQL prefix for a unary operator, including any trailing space.
pub fn sql_unary_prefix(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Minus => Some("-"),
        TokenKind::Not => Some("not "),
        _ => None,
    }
}
