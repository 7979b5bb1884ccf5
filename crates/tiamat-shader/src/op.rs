use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use crate::types::VarType;
use crate::var::Var;

// ── BinOp ─────────────────────────────────────────────────────────────────

/// Binary operator of a [`Operand::Binop`] node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    /// The operator's source symbol, for backends that emit text.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

// ── Operand ───────────────────────────────────────────────────────────────

/// A typed expression node in the shader tree.
///
/// Trees are built once (via [`Builder`](crate::builder::Builder) sugar and
/// the operator impls below) and are read-only afterward. Named variables
/// keep their identity across clones because they sit behind `Arc`s inside
/// [`Var`].
#[derive(Debug, Clone)]
pub enum Operand {
    Var(Var),
    Binop {
        left: Box<Operand>,
        op: BinOp,
        right: Box<Operand>,
    },
    IntLit(i32),
    FloatLit(f32),
    BoolLit(bool),
    /// Vector constructor: explicit type + ordered component operands.
    Vector {
        ty: VarType,
        ops: Vec<Operand>,
    },
    /// Named component selection, e.g. `"xyz"`.
    Swizzle {
        base: Box<Operand>,
        select: String,
    },
    /// Indexed access, used for matrix column selection.
    ArrayAccess {
        base: Box<Operand>,
        index: Box<Operand>,
    },
    /// Intrinsic or user function call.
    Func {
        name: String,
        args: Vec<Operand>,
    },
}

impl Operand {
    /// The node's value type.
    ///
    /// Binops take the left operand's type; function calls are `Float1`;
    /// a swizzle narrows (or widens) the base to the selector's length;
    /// array access on a matrix yields the column vector type.
    pub fn ty(&self) -> VarType {
        match self {
            Operand::Var(v) => v.ty(),
            Operand::Binop { left, .. } => left.ty(),
            Operand::IntLit(_) => VarType::Int1,
            Operand::FloatLit(_) => VarType::Float1,
            Operand::BoolLit(_) => VarType::Bool1,
            Operand::Vector { ty, .. } => *ty,
            Operand::Swizzle { base, select } => {
                VarType::of(base.ty().kind(), select.len() as u32)
            }
            Operand::ArrayAccess { base, .. } => column_type(base.ty()),
            Operand::Func { .. } => VarType::Float1,
        }
    }

    pub fn binop(left: Operand, op: BinOp, right: Operand) -> Operand {
        Operand::Binop { left: Box::new(left), op, right: Box::new(right) }
    }

    // ── component access ──────────────────────────────────────────────────

    /// Selects components by name. Valid selectors are 1 to 4 characters
    /// from `xyzw` / `rgba`; anything else is a precondition violation.
    pub fn swizzle(&self, select: &str) -> Operand {
        let valid = (1..=4).contains(&select.len())
            && select.chars().all(|c| matches!(c, 'x' | 'y' | 'z' | 'w' | 'r' | 'g' | 'b' | 'a'));
        assert!(valid, "invalid swizzle selector {select:?}");
        Operand::Swizzle { base: Box::new(self.clone()), select: select.to_owned() }
    }

    /// Positional component access.
    ///
    /// On a matrix operand this selects a column via array access; on
    /// anything else indices 0..=3 map to `x`/`y`/`z`/`w` and larger
    /// indices panic.
    pub fn at(&self, index: u32) -> Operand {
        if self.ty().is_matrix() {
            return Operand::ArrayAccess {
                base: Box::new(self.clone()),
                index: Box::new(Operand::IntLit(index as i32)),
            };
        }
        match index {
            0 => self.x(),
            1 => self.y(),
            2 => self.z(),
            3 => self.w(),
            n => panic!("component index {n} out of range for {:?}", self.ty()),
        }
    }

    pub fn x(&self) -> Operand {
        self.swizzle("x")
    }

    pub fn y(&self) -> Operand {
        self.swizzle("y")
    }

    pub fn z(&self) -> Operand {
        self.swizzle("z")
    }

    pub fn w(&self) -> Operand {
        self.swizzle("w")
    }

    // r/g/b/a are color-channel synonyms for x/y/z/w.

    pub fn r(&self) -> Operand {
        self.swizzle("x")
    }

    pub fn g(&self) -> Operand {
        self.swizzle("y")
    }

    pub fn b(&self) -> Operand {
        self.swizzle("z")
    }

    pub fn a(&self) -> Operand {
        self.swizzle("w")
    }

    // ── comparisons ───────────────────────────────────────────────────────

    pub fn eq(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Eq, rhs.into())
    }

    pub fn ne(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Ne, rhs.into())
    }

    pub fn lt(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Lt, rhs.into())
    }

    pub fn le(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Le, rhs.into())
    }

    pub fn gt(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Gt, rhs.into())
    }

    pub fn ge(&self, rhs: impl Into<Operand>) -> Operand {
        Operand::binop(self.clone(), BinOp::Ge, rhs.into())
    }
}

/// Column type of an indexed operand: square float matrices index to their
/// column vector, everything else keeps its own type.
fn column_type(ty: VarType) -> VarType {
    if !ty.is_matrix() {
        return ty;
    }
    match ty.element_count() {
        4 => VarType::Float2,
        9 => VarType::Float3,
        16 => VarType::Float4,
        _ => ty,
    }
}

// ── literal conversions ───────────────────────────────────────────────────

impl From<i32> for Operand {
    fn from(value: i32) -> Operand {
        Operand::IntLit(value)
    }
}

impl From<f32> for Operand {
    fn from(value: f32) -> Operand {
        Operand::FloatLit(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Operand {
        Operand::BoolLit(value)
    }
}

impl From<Var> for Operand {
    fn from(value: Var) -> Operand {
        Operand::Var(value)
    }
}

// ── arithmetic ────────────────────────────────────────────────────────────

impl<R: Into<Operand>> Add<R> for Operand {
    type Output = Operand;
    fn add(self, rhs: R) -> Operand {
        Operand::binop(self, BinOp::Add, rhs.into())
    }
}

impl<R: Into<Operand>> Sub<R> for Operand {
    type Output = Operand;
    fn sub(self, rhs: R) -> Operand {
        Operand::binop(self, BinOp::Sub, rhs.into())
    }
}

impl<R: Into<Operand>> Mul<R> for Operand {
    type Output = Operand;
    fn mul(self, rhs: R) -> Operand {
        Operand::binop(self, BinOp::Mul, rhs.into())
    }
}

impl<R: Into<Operand>> Div<R> for Operand {
    type Output = Operand;
    fn div(self, rhs: R) -> Operand {
        Operand::binop(self, BinOp::Div, rhs.into())
    }
}

impl<R: Into<Operand>> Rem<R> for Operand {
    type Output = Operand;
    fn rem(self, rhs: R) -> Operand {
        Operand::binop(self, BinOp::Rem, rhs.into())
    }
}

impl Neg for Operand {
    type Output = Operand;
    /// Negation desugars to `0.0 - x`.
    fn neg(self) -> Operand {
        Operand::from(0.0f32) - self
    }
}
