//! Operator enums shared by expression nodes.

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UnaryOperator {
    /// -
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Minus,
    /// +
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Plus,
    /// !
    #[cfg_attr(feature = "serde", serde(rename = "!"))]
    Not,
    /// ~
    #[cfg_attr(feature = "serde", serde(rename = "~"))]
    BitwiseNot,
    /// typeof
    #[cfg_attr(feature = "serde", serde(rename = "typeof"))]
    Typeof,
    /// void
    #[cfg_attr(feature = "serde", serde(rename = "void"))]
    Void,
    /// delete
    #[cfg_attr(feature = "serde", serde(rename = "delete"))]
    Delete,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    /// ==
    #[cfg_attr(feature = "serde", serde(rename = "=="))]
    Equal,
    /// !=
    #[cfg_attr(feature = "serde", serde(rename = "!="))]
    NotEqual,
    /// ===
    #[cfg_attr(feature = "serde", serde(rename = "==="))]
    StrictEqual,
    /// !==
    #[cfg_attr(feature = "serde", serde(rename = "!=="))]
    StrictNotEqual,
    /// <
    #[cfg_attr(feature = "serde", serde(rename = "<"))]
    LessThan,
    /// <=
    #[cfg_attr(feature = "serde", serde(rename = "<="))]
    LessThanEqual,
    /// >
    #[cfg_attr(feature = "serde", serde(rename = ">"))]
    GreaterThan,
    /// >=
    #[cfg_attr(feature = "serde", serde(rename = ">="))]
    GreaterThanEqual,
    /// <<
    #[cfg_attr(feature = "serde", serde(rename = "<<"))]
    LeftShift,
    /// >>
    #[cfg_attr(feature = "serde", serde(rename = ">>"))]
    RightShift,
    /// >>>
    #[cfg_attr(feature = "serde", serde(rename = ">>>"))]
    UnsignedRightShift,
    /// +
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Add,
    /// -
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Subtract,
    /// *
    #[cfg_attr(feature = "serde", serde(rename = "*"))]
    Multiply,
    /// /
    #[cfg_attr(feature = "serde", serde(rename = "/"))]
    Divide,
    /// %
    #[cfg_attr(feature = "serde", serde(rename = "%"))]
    Modulo,
    /// **
    #[cfg_attr(feature = "serde", serde(rename = "**"))]
    Exponent,
    /// |
    #[cfg_attr(feature = "serde", serde(rename = "|"))]
    BitwiseOr,
    /// ^
    #[cfg_attr(feature = "serde", serde(rename = "^"))]
    BitwiseXor,
    /// &
    #[cfg_attr(feature = "serde", serde(rename = "&"))]
    BitwiseAnd,
    /// in
    #[cfg_attr(feature = "serde", serde(rename = "in"))]
    In,
    /// instanceof
    #[cfg_attr(feature = "serde", serde(rename = "instanceof"))]
    Instanceof,
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LogicalOperator {
    /// ||
    #[cfg_attr(feature = "serde", serde(rename = "||"))]
    Or,
    /// &&
    #[cfg_attr(feature = "serde", serde(rename = "&&"))]
    And,
    /// ??
    #[cfg_attr(feature = "serde", serde(rename = "??"))]
    NullishCoalescing,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AssignmentOperator {
    /// =
    #[cfg_attr(feature = "serde", serde(rename = "="))]
    Assign,
    /// +=
    #[cfg_attr(feature = "serde", serde(rename = "+="))]
    AddAssign,
    /// -=
    #[cfg_attr(feature = "serde", serde(rename = "-="))]
    SubtractAssign,
    /// *=
    #[cfg_attr(feature = "serde", serde(rename = "*="))]
    MultiplyAssign,
    /// /=
    #[cfg_attr(feature = "serde", serde(rename = "/="))]
    DivideAssign,
    /// %=
    #[cfg_attr(feature = "serde", serde(rename = "%="))]
    ModuloAssign,
    /// **=
    #[cfg_attr(feature = "serde", serde(rename = "**="))]
    ExponentAssign,
    /// <<=
    #[cfg_attr(feature = "serde", serde(rename = "<<="))]
    LeftShiftAssign,
    /// >>=
    #[cfg_attr(feature = "serde", serde(rename = ">>="))]
    RightShiftAssign,
    /// >>>=
    #[cfg_attr(feature = "serde", serde(rename = ">>>="))]
    UnsignedRightShiftAssign,
    /// &=
    #[cfg_attr(feature = "serde", serde(rename = "&="))]
    BitwiseAndAssign,
    /// |=
    #[cfg_attr(feature = "serde", serde(rename = "|="))]
    BitwiseOrAssign,
    /// ^=
    #[cfg_attr(feature = "serde", serde(rename = "^="))]
    BitwiseXorAssign,
    /// &&=
    #[cfg_attr(feature = "serde", serde(rename = "&&="))]
    AndAssign,
    /// ||=
    #[cfg_attr(feature = "serde", serde(rename = "||="))]
    OrAssign,
    /// ??=
    #[cfg_attr(feature = "serde", serde(rename = "??="))]
    NullishAssign,
}

impl AssignmentOperator {
    /// Returns true for `&&=`, `||=` and `??=`.
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            AssignmentOperator::AndAssign
                | AssignmentOperator::OrAssign
                | AssignmentOperator::NullishAssign
        )
    }
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum UpdateOperator {
    /// ++
    #[cfg_attr(feature = "serde", serde(rename = "++"))]
    Increment,
    /// --
    #[cfg_attr(feature = "serde", serde(rename = "--"))]
    Decrement,
}
