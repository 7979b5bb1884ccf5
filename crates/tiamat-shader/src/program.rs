use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::builder::Builder;
use crate::stm::Stm;
use crate::types::ShaderStage;
use crate::var::{Attribute, Uniform};
use crate::visit::{collect_attributes, collect_uniforms};

// ── Shader ────────────────────────────────────────────────────────────────

/// One stage's root statement tree.
///
/// The referenced uniform and attribute sets are derived lazily on first
/// access and cached for the shader's lifetime. `OnceLock` makes the
/// memoization compute-then-publish, so concurrent first readers are safe.
pub struct Shader {
    stage: ShaderStage,
    body: Stm,
    uniforms: OnceLock<Vec<Arc<Uniform>>>,
    attributes: OnceLock<Vec<Arc<Attribute>>>,
}

impl Shader {
    pub fn new(stage: ShaderStage, body: Stm) -> Self {
        Self { stage, body, uniforms: OnceLock::new(), attributes: OnceLock::new() }
    }

    /// Builds a vertex-stage shader with a fresh [`Builder`].
    pub fn vertex(build: impl FnOnce(&mut Builder)) -> Self {
        Self::from_builder(ShaderStage::Vertex, build)
    }

    /// Builds a fragment-stage shader with a fresh [`Builder`].
    pub fn fragment(build: impl FnOnce(&mut Builder)) -> Self {
        Self::from_builder(ShaderStage::Fragment, build)
    }

    fn from_builder(stage: ShaderStage, build: impl FnOnce(&mut Builder)) -> Self {
        let mut builder = Builder::new(stage);
        build(&mut builder);
        Self::new(stage, builder.finish())
    }

    /// A new shader whose body is this one's followed by extra statements
    /// built against a fresh builder for the same stage.
    pub fn appending(&self, build: impl FnOnce(&mut Builder)) -> Self {
        let mut builder = Builder::new(self.stage);
        build(&mut builder);
        Self::new(self.stage, Stm::Stms(vec![self.body.clone(), builder.finish()]))
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn body(&self) -> &Stm {
        &self.body
    }

    /// Deduplicated uniforms referenced by the tree, in first-encounter
    /// order. Memoized.
    pub fn uniforms(&self) -> &[Arc<Uniform>] {
        self.uniforms.get_or_init(|| collect_uniforms(&self.body))
    }

    /// Deduplicated attributes referenced by the tree, in first-encounter
    /// order. Memoized.
    pub fn attributes(&self) -> &[Arc<Attribute>] {
        self.attributes.get_or_init(|| collect_attributes(&self.body))
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shader({:?})", self.stage)
    }
}

// ── Program ───────────────────────────────────────────────────────────────

/// A linkable vertex + fragment shader pair.
///
/// Construction never fails; cross-stage consistency (varyings matching,
/// outputs feeding inputs) is the backend compiler's concern. The program
/// owns no GPU resources.
pub struct Program {
    name: String,
    vertex: Shader,
    fragment: Shader,
    uniforms: OnceLock<Vec<Arc<Uniform>>>,
    attributes: OnceLock<Vec<Arc<Attribute>>>,
}

impl Program {
    pub fn new(vertex: Shader, fragment: Shader) -> Self {
        Self::named("program", vertex, fragment)
    }

    pub fn named(name: impl Into<String>, vertex: Shader, fragment: Shader) -> Self {
        debug_assert_eq!(vertex.stage(), ShaderStage::Vertex);
        debug_assert_eq!(fragment.stage(), ShaderStage::Fragment);
        Self {
            name: name.into(),
            vertex,
            fragment,
            uniforms: OnceLock::new(),
            attributes: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &Shader {
        &self.vertex
    }

    pub fn fragment(&self) -> &Shader {
        &self.fragment
    }

    /// Order-preserving union of the two stages' uniform sets: vertex
    /// entries first, then fragment entries not already present.
    pub fn uniforms(&self) -> &[Arc<Uniform>] {
        self.uniforms
            .get_or_init(|| union_by_identity(self.vertex.uniforms(), self.fragment.uniforms()))
    }

    /// Order-preserving union of the two stages' attribute sets.
    pub fn attributes(&self) -> &[Arc<Attribute>] {
        self.attributes
            .get_or_init(|| union_by_identity(self.vertex.attributes(), self.fragment.attributes()))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let attributes: Vec<&str> = self.attributes().iter().map(|a| a.name()).collect();
        let uniforms: Vec<&str> = self.uniforms().iter().map(|u| u.name()).collect();
        write!(
            f,
            "Program(name={}, attributes={attributes:?}, uniforms={uniforms:?})",
            self.name
        )
    }
}

fn union_by_identity<T: ?Sized>(first: &[Arc<T>], second: &[Arc<T>]) -> Vec<Arc<T>> {
    let mut out: Vec<Arc<T>> = first.to_vec();
    for item in second {
        if !out.iter().any(|seen| Arc::ptr_eq(seen, item)) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VarType;
    use crate::var::Varying;

    fn sample_program() -> (Program, Arc<Uniform>, Arc<Uniform>, Arc<Uniform>) {
        let proj = Uniform::new("u_proj", VarType::Mat4);
        let shared = Uniform::new("u_shared", VarType::Float4);
        let tint = Uniform::new("u_tint", VarType::Float4);
        let pos = Attribute::new("a_pos", VarType::Float2, false);
        let v_col = Varying::new("v_col", VarType::Float4);

        let proj2 = proj.clone();
        let shared2 = shared.clone();
        let pos2 = pos.clone();
        let v_col2 = v_col.clone();
        let vertex = Shader::vertex(move |b| {
            b.set(v_col2.operand(), shared2.operand());
            let out = b.output();
            b.set(out, proj2.operand().at(0) + pos2.operand().x());
        });

        let shared3 = shared.clone();
        let tint2 = tint.clone();
        let fragment = Shader::fragment(move |b| {
            let out = b.output();
            b.set(out, v_col.operand() * (shared3.operand() + tint2.operand()));
        });

        (Program::new(vertex, fragment), proj, shared, tint)
    }

    #[test]
    fn shader_sets_are_memoized_and_stable() {
        let u = Uniform::new("u_a", VarType::Float1);
        let u2 = u.clone();
        let shader = Shader::fragment(move |b| {
            let out = b.output();
            b.set(out, u2.operand() + u2.operand());
        });

        let first: Vec<_> = shader.uniforms().to_vec();
        let second: Vec<_> = shader.uniforms().to_vec();
        assert_eq!(first.len(), 1);
        assert_eq!(first.len(), second.len());
        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert!(Arc::ptr_eq(&first[0], &u));
    }

    #[test]
    fn program_union_is_vertex_first_without_duplicates() {
        let (program, proj, shared, tint) = sample_program();
        let uniforms = program.uniforms();
        let names: Vec<&str> = uniforms.iter().map(|u| u.name()).collect();
        assert_eq!(names, ["u_shared", "u_proj", "u_tint"]);
        assert!(Arc::ptr_eq(&uniforms[0], &shared));
        assert!(Arc::ptr_eq(&uniforms[1], &proj));
        assert!(Arc::ptr_eq(&uniforms[2], &tint));
    }

    #[test]
    fn program_attributes_come_from_the_vertex_stage() {
        let (program, ..) = sample_program();
        let names: Vec<&str> = program.attributes().iter().map(|a| a.name()).collect();
        assert_eq!(names, ["a_pos"]);
    }

    #[test]
    fn appending_keeps_existing_statements() {
        let base_u = Uniform::new("u_base", VarType::Float4);
        let extra_u = Uniform::new("u_extra", VarType::Float4);

        let base_u2 = base_u.clone();
        let base = Shader::fragment(move |b| {
            let out = b.output();
            b.set(out, base_u2.operand());
        });
        let extra_u2 = extra_u.clone();
        let extended = base.appending(move |b| {
            let out = b.output();
            b.set(out, extra_u2.operand());
        });

        let names: Vec<&str> = extended.uniforms().iter().map(|u| u.name()).collect();
        assert_eq!(names, ["u_base", "u_extra"]);
        assert_eq!(extended.stage(), ShaderStage::Fragment);
    }

    #[test]
    fn display_lists_names() {
        let (program, ..) = sample_program();
        let text = format!("{program}");
        assert!(text.contains("name=program"));
        assert!(text.contains("u_shared"));
        assert!(text.contains("a_pos"));
    }
}
