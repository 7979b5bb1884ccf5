//! Fluent construction grammar for one shader stage.
//!
//! A [`Builder`] accumulates an ordered statement list; nested blocks
//! (`if_`/`else_`) each run against a fresh child builder so their
//! statements land in the right branch. Expression sugar (vector
//! constructors, intrinsics, the operator impls on
//! [`Operand`](crate::op::Operand)) is pure and never touches builder state.

use crate::op::Operand;
use crate::stm::Stm;
use crate::types::{ShaderStage, VarType};
use crate::var::{Temp, Var};

// ── Builder ───────────────────────────────────────────────────────────────

/// Temp ids below this are reserved for built-in singletons.
const FIRST_TEMP_ID: u32 = 3;

pub struct Builder {
    stage: ShaderStage,
    stms: Vec<Stm>,
    next_temp_id: u32,
}

impl Builder {
    pub fn new(stage: ShaderStage) -> Self {
        Self { stage, stms: Vec::new(), next_temp_id: FIRST_TEMP_ID }
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Appends `target ← source`.
    pub fn set(&mut self, target: impl Into<Operand>, source: impl Into<Operand>) {
        self.stms.push(Stm::Set { target: target.into(), source: source.into() });
    }

    /// Appends a pixel discard.
    pub fn discard(&mut self) {
        self.stms.push(Stm::Discard);
    }

    /// The stage's primary output value (position or color, `Float4`).
    pub fn output(&self) -> Operand {
        Operand::Var(Var::Output)
    }

    /// A fresh intermediate variable. Ids count up per builder instance,
    /// so temps from different builders may share an id.
    pub fn temp(&mut self, ty: VarType) -> Operand {
        let id = self.next_temp_id;
        self.next_temp_id += 1;
        Temp::new(id, ty).operand()
    }

    /// Appends a conditional whose true branch is built by `body` against a
    /// fresh child builder. The returned handle attaches an optional else
    /// branch to that exact statement.
    pub fn if_(
        &mut self,
        cond: impl Into<Operand>,
        body: impl FnOnce(&mut Builder),
    ) -> IfBuilder<'_> {
        let mut child = Builder::new(self.stage);
        body(&mut child);
        self.stms.push(Stm::If {
            cond: cond.into(),
            then_body: Box::new(child.finish()),
            else_body: None,
        });
        let index = self.stms.len() - 1;
        IfBuilder { owner: self, index }
    }

    /// The accumulated statements as one block.
    pub fn finish(self) -> Stm {
        Stm::Stms(self.stms)
    }
}

/// Handle returned by [`Builder::if_`], bound to the conditional it created.
///
/// `else_` consumes the handle, so a second else-attachment on the same
/// conditional is a compile error rather than a silent overwrite.
pub struct IfBuilder<'b> {
    owner: &'b mut Builder,
    index: usize,
}

impl IfBuilder<'_> {
    pub fn else_(self, body: impl FnOnce(&mut Builder)) {
        let mut child = Builder::new(self.owner.stage);
        body(&mut child);
        let block = child.finish();
        match &mut self.owner.stms[self.index] {
            Stm::If { else_body, .. } => *else_body = Some(Box::new(block)),
            _ => unreachable!("if handle bound to a non-if statement"),
        }
    }
}

// ── vector constructors ───────────────────────────────────────────────────

/// Assembles component operands into a vector of the given type.
///
/// The components' element counts must sum to the target type's element
/// count (so `vec4(xyz, w)` is as valid as `vec4(x, y, z, w)`); a mismatch
/// is a precondition violation.
pub fn vector(ty: VarType, ops: &[Operand]) -> Operand {
    let span: u32 = ops.iter().map(|op| op.ty().element_count()).sum();
    assert!(
        span == ty.element_count(),
        "vector constructor for {ty:?} needs {} components, got {} operands spanning {span}",
        ty.element_count(),
        ops.len(),
    );
    Operand::Vector { ty, ops: ops.to_vec() }
}

pub fn vec1(ops: &[Operand]) -> Operand {
    vector(VarType::Float1, ops)
}

pub fn vec2(ops: &[Operand]) -> Operand {
    vector(VarType::Float2, ops)
}

pub fn vec3(ops: &[Operand]) -> Operand {
    vector(VarType::Float3, ops)
}

pub fn vec4(ops: &[Operand]) -> Operand {
    vector(VarType::Float4, ops)
}

// ── intrinsic calls ───────────────────────────────────────────────────────
//
// Thin wrappers producing Func nodes. No arity or type checking happens at
// this layer; a backend compiler owns that.

/// A call to an arbitrarily named intrinsic or user function.
pub fn func(name: impl Into<String>, args: &[Operand]) -> Operand {
    Operand::Func { name: name.into(), args: args.to_vec() }
}

macro_rules! intrinsics {
    ($($name:ident($($arg:ident),+);)+) => {
        $(pub fn $name($($arg: impl Into<Operand>),+) -> Operand {
            func(stringify!($name), &[$($arg.into()),+])
        })+
    };
}

intrinsics! {
    // trigonometric
    sin(v); cos(v); tan(v);
    asin(v); acos(v); atan(v);
    radians(v); degrees(v);
    // exponential
    pow(base, exponent); exp(v); exp2(v); log(v); log2(v);
    sqrt(v); inversesqrt(v);
    // common
    abs(v); sign(v); ceil(v); floor(v); fract(v);
    clamp(v, lo, hi); min(a, b); max(a, b);
    mix(a, b, amount); step(edge, v); smoothstep(lo, hi, v);
    // geometric
    length(v); distance(a, b); dot(a, b); cross(a, b);
    normalize(v); faceforward(n, i, nref); reflect(i, n); refract(i, n, eta);
}

/// `mod(a, b)`. Underscored to avoid the Rust keyword.
pub fn mod_(a: impl Into<Operand>, b: impl Into<Operand>) -> Operand {
    func("mod", &[a.into(), b.into()])
}

/// `texture2D(sampler, coords)`.
pub fn texture2d(sampler: impl Into<Operand>, coords: impl Into<Operand>) -> Operand {
    func("texture2D", &[sampler.into(), coords.into()])
}
