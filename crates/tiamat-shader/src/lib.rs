//! Typed shader-construction DSL and vertex-buffer layout calculator.
//!
//! Vertex and fragment programs are described as typed expression/statement
//! trees, independent of any backend shading language. A rendering backend
//! consumes the finished [`Program`] (translating the tree to its own
//! source or bytecode) and the [`VertexLayout`] (stride + per-attribute
//! offsets); this crate never emits backend text, binds GPU resources, or
//! touches a window.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`types`] | `VarKind`, `VarType`, `ShaderStage` |
//! | [`var`] | `Attribute`, `Varying`, `Uniform`, `Temp`, `Var` |
//! | [`op`] | `Operand`, `BinOp`, component/arithmetic sugar |
//! | [`stm`] | `Stm` |
//! | [`builder`] | `Builder`, vector constructors, intrinsic calls |
//! | [`visit`] | `Visit` trait, default walks, uniform/attribute collectors |
//! | [`program`] | `Shader`, `Program` |
//! | [`layout`] | `VertexLayout` |
//! | [`error`] | `LayoutError` |
//!
//! # Quick start
//!
//! ```rust
//! use tiamat_shader::builder::vec4;
//! use tiamat_shader::{Attribute, Program, Shader, Uniform, VarType, VertexLayout};
//!
//! let pos = Attribute::new("a_pos", VarType::Float2, false);
//! let tint = Uniform::new("u_tint", VarType::Float4);
//!
//! let vertex = Shader::vertex(|b| {
//!     let out = b.output();
//!     b.set(out, vec4(&[pos.operand(), 0.0f32.into(), 1.0f32.into()]));
//! });
//! let fragment = Shader::fragment(|b| {
//!     let out = b.output();
//!     b.set(out, tint.operand());
//! });
//!
//! let program = Program::new(vertex, fragment);
//! assert_eq!(program.uniforms().len(), 1);
//!
//! let layout = VertexLayout::new(program.attributes().to_vec());
//! assert_eq!(layout.total_size(), 8);
//! ```

pub mod builder;
pub mod error;
pub mod layout;
pub mod op;
pub mod program;
pub mod stm;
pub mod types;
pub mod var;
pub mod visit;

pub use builder::Builder;
pub use error::LayoutError;
pub use layout::VertexLayout;
pub use op::{BinOp, Operand};
pub use program::{Program, Shader};
pub use stm::Stm;
pub use types::{ShaderStage, VarKind, VarType};
pub use var::{Attribute, Temp, Uniform, Var, Varying};
pub use visit::Visit;
