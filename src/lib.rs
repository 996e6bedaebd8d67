//! Move-only RAII wrapper around an OpenGL shader program.
//!
//! [`ShaderProgram`] compiles a vertex and fragment shader pair, links
//! them into one program object, exposes typed uniform setters, and
//! deletes the program when dropped. All driver traffic goes through
//! [`GlowContext`], a thin newtype over [`glow::Context`] that is passed
//! in explicitly so the dependency stays visible and fakeable.
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use glow_program::{GlowContext, ProgramError, ShaderProgram};
//!
//! const VERTEX: &str = "#version 300 es
//! in vec4 position;
//! void main() { gl_Position = position; }
//! ";
//! const FRAGMENT: &str = "#version 300 es
//! precision mediump float;
//! out vec4 color;
//! void main() { color = vec4(1.0); }
//! ";
//!
//! fn setup(gl: glow::Context) -> Result<ShaderProgram, ProgramError> {
//!     let gl = Rc::new(GlowContext::from(gl));
//!     let program = ShaderProgram::new(Rc::clone(&gl), VERTEX, FRAGMENT)?;
//!     program.activate();
//!     program.set_uniform("view", vek::Mat4::<f32>::identity());
//!     Ok(program)
//! }
//! ```
//!
//! Construction comes in two flavors: [`ShaderProgram::new`] turns
//! compile and link failures into a [`ProgramError`] naming the failed
//! stage, while [`ShaderProgram::new_lenient`] only logs them and hands
//! back the program object anyway, for callers that prefer a black
//! screen over an aborted startup.

mod program;
mod wrapper;

pub use program::{ProgramError, ShaderProgram, ShaderStage, ToUniformValue, UniformValue};
pub use wrapper::GlowContext;
