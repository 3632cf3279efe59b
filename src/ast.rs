use std::{fmt, str::FromStr};

use crate::{error::ConfigError, interpreter::value::core::Number};

/// Direction in which same-precedence binary operators combine.
///
/// Written `lr` and `rl` in textual operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    #[default]
    LeftToRight,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    RightToLeft,
}

impl FromStr for Associativity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lr" => Ok(Self::LeftToRight),
            "rl" => Ok(Self::RightToLeft),
            _ => Err(ConfigError::UnknownAssociativity { found: s.to_string() }),
        }
    }
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftToRight => write!(f, "lr"),
            Self::RightToLeft => write!(f, "rl"),
        }
    }
}

/// Which side of its operand a unary operator is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Written before the operand, like `-x`.
    Prefix,
    /// Written after the operand, like `x!`.
    Postfix,
}

impl FromStr for Side {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prefix" => Ok(Self::Prefix),
            "postfix" => Ok(Self::Postfix),
            _ => Err(ConfigError::UnknownSide { found: s.to_string() }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "prefix"),
            Self::Postfix => write!(f, "postfix"),
        }
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Operator nodes hold the operator *token*, never the callable behind it:
/// the callable is looked up in the grammar at evaluation time, and names are
/// resolved against the bindings of each evaluation. A parsed tree can
/// therefore be evaluated any number of times with different bindings.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal {
        /// The literal value, integer or real as written.
        value:    Number,
        /// Byte offset in the source text.
        position: usize,
    },
    /// Reference to a bound value by name.
    Identifier {
        /// Name of the binding.
        name:     String,
        /// Byte offset in the source text.
        position: usize,
    },
    /// Function call expression (e.g. `sin(x)`).
    FunctionCall {
        /// Name of the function binding.
        name:      String,
        /// Arguments, in source order. Never empty.
        arguments: Vec<Self>,
        /// Byte offset in the source text.
        position:  usize,
    },
    /// A prefix or postfix operation.
    UnaryOp {
        /// The operator token.
        op:       String,
        /// Whether the operator precedes or follows its operand.
        side:     Side,
        /// The operand expression.
        operand:  Box<Self>,
        /// Byte offset of the operator.
        position: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// The operator token.
        op:            String,
        /// The group the operator belongs to.
        associativity: Associativity,
        /// The precedence level it was parsed at.
        precedence:    i64,
        /// Left operand.
        left:          Box<Self>,
        /// Right operand.
        right:         Box<Self>,
        /// Byte offset of the operator.
        position:      usize,
    },
}

/// Renders the tree fully parenthesised in prefix form.
///
/// ```text
/// 9-3-2     =>  (- (- 9 3) 2)
/// P 1 S     =>  (P (S 1))
/// f(x, 2)   =>  (f x 2)
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "({name}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                write!(f, ")")
            },
            Self::UnaryOp { op, operand, .. } => write!(f, "({op} {operand})"),
            Self::BinaryOp { op, left, right, .. } => write!(f, "({op} {left} {right})"),
        }
    }
}
