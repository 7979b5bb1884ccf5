use crate::op::Operand;

/// A typed imperative action node in the shader body.
///
/// Trees are built by a [`Builder`](crate::builder::Builder) and read-only
/// afterward; the only post-construction mutation is the one-time
/// else-branch attachment performed through the builder's if handle.
#[derive(Debug, Clone)]
pub enum Stm {
    /// Ordered statement sequence. Itself a statement, which is what makes
    /// nesting (branch bodies, appended shaders) possible.
    Stms(Vec<Stm>),
    /// `target ← source`.
    Set { target: Operand, source: Operand },
    /// Fragment-stage pixel discard.
    Discard,
    If {
        cond: Operand,
        then_body: Box<Stm>,
        else_body: Option<Box<Stm>>,
    },
}
