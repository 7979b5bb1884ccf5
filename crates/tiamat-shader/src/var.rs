use std::any::Any;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::op::Operand;
use crate::types::VarType;

// ── payload ───────────────────────────────────────────────────────────────

/// Opaque data a backend can attach to a variable.
pub type Payload = Arc<dyn Any + Send + Sync>;

/// Mutable payload slot shared by all named variables.
///
/// Backends use this to stash per-variable bookkeeping (e.g. a location or
/// binding handle) on an otherwise immutable tree. The slot is lock-guarded
/// so fully built shaders stay safe for concurrent readers.
#[derive(Default)]
pub struct PayloadSlot(RwLock<Option<Payload>>);

impl PayloadSlot {
    pub fn get(&self) -> Option<Payload> {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, payload: Payload) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(payload);
    }

    pub fn clear(&self) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for PayloadSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.get().is_some() { "set" } else { "empty" };
        write!(f, "PayloadSlot({state})")
    }
}

// ── Attribute ─────────────────────────────────────────────────────────────

/// Per-vertex shader input bound from a vertex buffer.
///
/// `offset` is an optional explicit byte offset; when unset the vertex
/// layout calculator assigns one. Inactive attributes are layout
/// placeholders: they keep their name and type for shape compatibility but
/// declare no slot of their own.
pub struct Attribute {
    name: String,
    ty: VarType,
    normalized: bool,
    offset: Option<u32>,
    active: bool,
    payload: PayloadSlot,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: VarType, normalized: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            ty,
            normalized,
            offset: None,
            active: true,
            payload: PayloadSlot::default(),
        })
    }

    /// An attribute pre-placed at an explicit byte offset.
    pub fn with_offset(
        name: impl Into<String>,
        ty: VarType,
        normalized: bool,
        offset: u32,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            ty,
            normalized,
            offset: Some(offset),
            active: true,
            payload: PayloadSlot::default(),
        })
    }

    /// A new inactive attribute with the same name, type and normalization.
    ///
    /// The result is a distinct node (new identity) with no explicit offset.
    pub fn inactive(&self) -> Arc<Self> {
        Arc::new(Self {
            name: self.name.clone(),
            ty: self.ty,
            normalized: self.normalized,
            offset: None,
            active: false,
            payload: PayloadSlot::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }

    pub fn normalized(&self) -> bool {
        self.normalized
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn payload(&self) -> &PayloadSlot {
        &self.payload
    }

    pub fn operand(self: &Arc<Self>) -> Operand {
        Operand::Var(Var::Attribute(self.clone()))
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribute({})", self.name)
    }
}

// ── Varying ───────────────────────────────────────────────────────────────

/// Value interpolated from the vertex stage to the fragment stage.
pub struct Varying {
    name: String,
    ty: VarType,
    payload: PayloadSlot,
}

impl Varying {
    pub fn new(name: impl Into<String>, ty: VarType) -> Arc<Self> {
        Arc::new(Self { name: name.into(), ty, payload: PayloadSlot::default() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }

    pub fn payload(&self) -> &PayloadSlot {
        &self.payload
    }

    pub fn operand(self: &Arc<Self>) -> Operand {
        Operand::Var(Var::Varying(self.clone()))
    }
}

impl fmt::Debug for Varying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Varying({})", self.name)
    }
}

// ── Uniform ───────────────────────────────────────────────────────────────

/// Externally bound constant value for a draw call.
pub struct Uniform {
    name: String,
    ty: VarType,
    payload: PayloadSlot,
}

impl Uniform {
    pub fn new(name: impl Into<String>, ty: VarType) -> Arc<Self> {
        Arc::new(Self { name: name.into(), ty, payload: PayloadSlot::default() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }

    pub fn payload(&self) -> &PayloadSlot {
        &self.payload
    }

    pub fn operand(self: &Arc<Self>) -> Operand {
        Operand::Var(Var::Uniform(self.clone()))
    }
}

impl fmt::Debug for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform({})", self.name)
    }
}

// ── Temp ──────────────────────────────────────────────────────────────────

/// Compiler-generated intermediate variable.
///
/// Ids are assigned by a [`Builder`](crate::builder::Builder) and are unique
/// within that builder only, not across builders.
pub struct Temp {
    id: u32,
    name: String,
    ty: VarType,
    payload: PayloadSlot,
}

impl Temp {
    pub fn new(id: u32, ty: VarType) -> Arc<Self> {
        Arc::new(Self { id, name: format!("temp{id}"), ty, payload: PayloadSlot::default() })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }

    pub fn payload(&self) -> &PayloadSlot {
        &self.payload
    }

    pub fn operand(self: &Arc<Self>) -> Operand {
        Operand::Var(Var::Temp(self.clone()))
    }
}

impl fmt::Debug for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Temp({})", self.name)
    }
}

// ── Var ───────────────────────────────────────────────────────────────────

/// The closed set of variable operands.
///
/// Named variables are held behind `Arc`; identity (for deduplication in
/// derived sets) is `Arc` pointer identity, not the name. `Output` is the
/// stage's single well-known output value: position for the vertex stage,
/// color for the fragment stage, always a 4-component float.
#[derive(Clone)]
pub enum Var {
    Attribute(Arc<Attribute>),
    Varying(Arc<Varying>),
    Uniform(Arc<Uniform>),
    Temp(Arc<Temp>),
    Output,
}

impl Var {
    pub fn name(&self) -> &str {
        match self {
            Var::Attribute(a) => a.name(),
            Var::Varying(v) => v.name(),
            Var::Uniform(u) => u.name(),
            Var::Temp(t) => t.name(),
            Var::Output => "out",
        }
    }

    pub fn ty(&self) -> VarType {
        match self {
            Var::Attribute(a) => a.ty(),
            Var::Varying(v) => v.ty(),
            Var::Uniform(u) => u.ty(),
            Var::Temp(t) => t.ty(),
            Var::Output => VarType::Float4,
        }
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Attribute(a) => a.fmt(f),
            Var::Varying(v) => v.fmt(f),
            Var::Uniform(u) => u.fmt(f),
            Var::Temp(t) => t.fmt(f),
            Var::Output => write!(f, "Output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_is_a_distinct_node() {
        let a = Attribute::with_offset("a_pos", VarType::Float2, false, 8);
        let i = a.inactive();
        assert!(!Arc::ptr_eq(&a, &i));
        assert!(!i.is_active());
        assert_eq!(i.offset(), None);
        assert_eq!(i.name(), "a_pos");
        assert_eq!(i.ty(), VarType::Float2);
    }

    #[test]
    fn payload_set_get_clear() {
        let u = Uniform::new("u_mat", VarType::Mat4);
        assert!(u.payload().get().is_none());
        u.payload().set(Arc::new(7u32));
        let got = u.payload().get().unwrap();
        assert_eq!(*got.downcast::<u32>().unwrap(), 7);
        u.payload().clear();
        assert!(u.payload().get().is_none());
    }

    #[test]
    fn output_is_float4_named_out() {
        assert_eq!(Var::Output.ty(), VarType::Float4);
        assert_eq!(Var::Output.name(), "out");
    }

    #[test]
    fn temp_name_derives_from_id() {
        let t = Temp::new(3, VarType::Float1);
        assert_eq!(t.name(), "temp3");
        assert_eq!(t.id(), 3);
    }

    #[test]
    fn debug_rendering() {
        let a = Attribute::new("a_uv", VarType::Float2, false);
        assert_eq!(format!("{a:?}"), "Attribute(a_uv)");
        assert_eq!(format!("{:?}", Var::Output), "Output");
    }
}
