//! Generic traversal over the statement/operand tree.
//!
//! [`Visit`] exposes one hook per variant; every hook defaults to the
//! matching `walk_*` free function, so an analysis only overrides the nodes
//! it cares about. The walks match exhaustively over the closed enums: a
//! new variant is a compile error here, never a runtime "unknown node".
//!
//! Extending the crate with a new analysis means writing a new `Visit`
//! impl (see the collectors at the bottom), not touching the tree types.

use std::sync::Arc;

use crate::op::Operand;
use crate::stm::Stm;
use crate::var::{Attribute, Temp, Uniform, Var, Varying};

// ── Visit ─────────────────────────────────────────────────────────────────

pub trait Visit {
    fn visit_stm(&mut self, stm: &Stm) {
        walk_stm(self, stm);
    }

    fn visit_operand(&mut self, op: &Operand) {
        walk_operand(self, op);
    }

    fn visit_var(&mut self, var: &Var) {
        walk_var(self, var);
    }

    fn visit_attribute(&mut self, _attribute: &Arc<Attribute>) {}
    fn visit_varying(&mut self, _varying: &Arc<Varying>) {}
    fn visit_uniform(&mut self, _uniform: &Arc<Uniform>) {}
    fn visit_temp(&mut self, _temp: &Arc<Temp>) {}
    fn visit_output(&mut self) {}

    fn visit_int_lit(&mut self, _value: i32) {}
    fn visit_float_lit(&mut self, _value: f32) {}
    fn visit_bool_lit(&mut self, _value: bool) {}
}

// ── default walks ─────────────────────────────────────────────────────────

pub fn walk_stm<V: Visit + ?Sized>(v: &mut V, stm: &Stm) {
    match stm {
        Stm::Stms(stms) => {
            for s in stms {
                v.visit_stm(s);
            }
        }
        // source first, then target
        Stm::Set { target, source } => {
            v.visit_operand(source);
            v.visit_operand(target);
        }
        Stm::Discard => {}
        Stm::If { cond, then_body, else_body } => {
            v.visit_operand(cond);
            v.visit_stm(then_body);
            if let Some(fbody) = else_body {
                v.visit_stm(fbody);
            }
        }
    }
}

pub fn walk_operand<V: Visit + ?Sized>(v: &mut V, op: &Operand) {
    match op {
        Operand::Var(var) => v.visit_var(var),
        Operand::Binop { left, right, .. } => {
            v.visit_operand(left);
            v.visit_operand(right);
        }
        Operand::IntLit(value) => v.visit_int_lit(*value),
        Operand::FloatLit(value) => v.visit_float_lit(*value),
        Operand::BoolLit(value) => v.visit_bool_lit(*value),
        Operand::Vector { ops, .. } => {
            for o in ops {
                v.visit_operand(o);
            }
        }
        Operand::Swizzle { base, .. } => v.visit_operand(base),
        Operand::ArrayAccess { base, index } => {
            v.visit_operand(base);
            v.visit_operand(index);
        }
        Operand::Func { args, .. } => {
            for a in args {
                v.visit_operand(a);
            }
        }
    }
}

pub fn walk_var<V: Visit + ?Sized>(v: &mut V, var: &Var) {
    match var {
        Var::Attribute(a) => v.visit_attribute(a),
        Var::Varying(vy) => v.visit_varying(vy),
        Var::Uniform(u) => v.visit_uniform(u),
        Var::Temp(t) => v.visit_temp(t),
        Var::Output => v.visit_output(),
    }
}

// ── collectors ────────────────────────────────────────────────────────────

struct UniformCollector {
    found: Vec<Arc<Uniform>>,
}

impl Visit for UniformCollector {
    fn visit_uniform(&mut self, uniform: &Arc<Uniform>) {
        if !self.found.iter().any(|seen| Arc::ptr_eq(seen, uniform)) {
            self.found.push(uniform.clone());
        }
    }
}

struct AttributeCollector {
    found: Vec<Arc<Attribute>>,
}

impl Visit for AttributeCollector {
    fn visit_attribute(&mut self, attribute: &Arc<Attribute>) {
        if !self.found.iter().any(|seen| Arc::ptr_eq(seen, attribute)) {
            self.found.push(attribute.clone());
        }
    }
}

/// Every uniform referenced in the tree, once each, in first-encounter
/// order. Deduplication is by node identity, not by name.
pub fn collect_uniforms(stm: &Stm) -> Vec<Arc<Uniform>> {
    let mut collector = UniformCollector { found: Vec::new() };
    collector.visit_stm(stm);
    collector.found
}

/// Every attribute referenced in the tree, once each, in first-encounter
/// order. Deduplication is by node identity, not by name.
pub fn collect_attributes(stm: &Stm) -> Vec<Arc<Attribute>> {
    let mut collector = AttributeCollector { found: Vec::new() };
    collector.visit_stm(stm);
    collector.found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::types::{ShaderStage, VarType};

    #[test]
    fn collects_each_uniform_once_in_encounter_order() {
        let a = Uniform::new("u_a", VarType::Float1);
        let c = Uniform::new("u_b", VarType::Float1);

        let mut b = Builder::new(ShaderStage::Fragment);
        let t = b.temp(VarType::Float1);
        b.set(t.clone(), a.operand() + c.operand());
        let out = b.output();
        b.set(out, t * a.operand());

        let uniforms = collect_uniforms(&b.finish());
        assert_eq!(uniforms.len(), 2);
        assert!(Arc::ptr_eq(&uniforms[0], &a));
        assert!(Arc::ptr_eq(&uniforms[1], &c));
    }

    #[test]
    fn dedup_is_by_identity_not_name() {
        let first = Uniform::new("u_same", VarType::Float1);
        let second = Uniform::new("u_same", VarType::Float1);

        let mut b = Builder::new(ShaderStage::Vertex);
        let out = b.output();
        b.set(out, first.operand() + second.operand());

        let uniforms = collect_uniforms(&b.finish());
        assert_eq!(uniforms.len(), 2);
    }

    #[test]
    fn descends_into_both_branches() {
        let cond = Uniform::new("u_flag", VarType::Bool1);
        let only_then = Uniform::new("u_then", VarType::Float4);
        let only_else = Uniform::new("u_else", VarType::Float4);

        let mut b = Builder::new(ShaderStage::Fragment);
        b.if_(cond.operand(), |b| {
            let out = b.output();
            b.set(out, only_then.operand());
        })
        .else_(|b| {
            let out = b.output();
            b.set(out, only_else.operand());
        });

        let uniforms = collect_uniforms(&b.finish());
        let names: Vec<&str> = uniforms.iter().map(|u| u.name()).collect();
        assert_eq!(names, ["u_flag", "u_then", "u_else"]);
    }

    #[test]
    fn attributes_found_through_swizzles_and_calls() {
        let pos = Attribute::new("a_pos", VarType::Float3, false);
        let uv = Attribute::new("a_uv", VarType::Float2, false);

        let mut b = Builder::new(ShaderStage::Vertex);
        let out = b.output();
        b.set(
            out,
            crate::builder::vec4(&[
                crate::builder::normalize(pos.operand()).swizzle("xyz"),
                uv.operand().x(),
            ]),
        );

        let attributes = collect_attributes(&b.finish());
        assert_eq!(attributes.len(), 2);
        assert!(Arc::ptr_eq(&attributes[0], &pos));
        assert!(Arc::ptr_eq(&attributes[1], &uv));
    }
}
