use std::fmt;
use std::rc::Rc;

use glow::{NativeProgram, NativeShader};
use thiserror::Error;
use vek::Mat4;

use crate::wrapper::GlowContext;

/// Info logs are reported with the same bound the usual 512-byte
/// stack buffer gives: 511 characters plus the terminator.
const MAX_LOG_LEN: usize = 511;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    fn object_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    /// The driver could not even hand out an object. Fatal in both
    /// construction modes, since there is no handle to continue with.
    #[error("cannot create {0} object: {1}")]
    Allocate(&'static str, String),
    #[error("error in {stage} shader compilation: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("error in program linking: {log}")]
    Link { log: String },
}

/// A uniform value in one of the four transmitted shapes. Booleans go
/// over the wire as 0/1 integers, matrices as 16 column-major floats.
pub enum UniformValue {
    Bool(bool),
    SignedInt(i32),
    Float(f32),
    Mat4([f32; 16]),
}

pub trait ToUniformValue {
    fn to_uniform_value(self) -> UniformValue;
}

impl ToUniformValue for UniformValue {
    fn to_uniform_value(self) -> UniformValue {
        self
    }
}

impl ToUniformValue for bool {
    fn to_uniform_value(self) -> UniformValue {
        UniformValue::Bool(self)
    }
}

impl ToUniformValue for i32 {
    fn to_uniform_value(self) -> UniformValue {
        UniformValue::SignedInt(self)
    }
}

impl ToUniformValue for f32 {
    fn to_uniform_value(self) -> UniformValue {
        UniformValue::Float(self)
    }
}

impl ToUniformValue for [f32; 16] {
    fn to_uniform_value(self) -> UniformValue {
        UniformValue::Mat4(self)
    }
}

impl ToUniformValue for Mat4<f32> {
    fn to_uniform_value(self) -> UniformValue {
        UniformValue::Mat4(self.into_col_array())
    }
}

/// Owns one linked program object on one GL context.
///
/// Ownership is unique and move-only: there is no `Clone`, and the handle
/// is released exactly once when the owning value is dropped. All methods
/// must run on the thread the context is current on; holding the context
/// as an `Rc` already pins the type to that thread.
#[derive(Debug)]
pub struct ShaderProgram {
    program: NativeProgram,
    gl: Rc<GlowContext>,
}

impl ShaderProgram {
    /// Compiles `vertex` and `fragment`, links them, and returns the
    /// program. The first compile or link failure aborts construction
    /// with the stage name and the driver's (clipped) info log; nothing
    /// leaks on the error path.
    pub fn new(gl: Rc<GlowContext>, vertex: &str, fragment: &str) -> Result<Self, ProgramError> {
        let (program, diagnostics) = unsafe { Self::build(&gl, vertex, fragment)? };
        if let Some(error) = diagnostics.into_iter().next() {
            unsafe { gl.delete_program(program) };
            return Err(error);
        }
        Ok(Self { program, gl })
    }

    /// Compatibility constructor: compile and link failures are written
    /// to the log, stage-prefixed, and construction still completes with
    /// whatever program object the driver produced. Rendering with such
    /// a program typically draws nothing. Only object allocation failure
    /// is an error, since there is no handle to carry on with.
    pub fn new_lenient(
        gl: Rc<GlowContext>,
        vertex: &str,
        fragment: &str,
    ) -> Result<Self, ProgramError> {
        let (program, diagnostics) = unsafe { Self::build(&gl, vertex, fragment)? };
        for error in &diagnostics {
            log::error!("{error}");
        }
        Ok(Self { program, gl })
    }

    /// Makes this program current for subsequent draw calls.
    pub fn activate(&self) {
        unsafe {
            self.gl.use_program(Some(self.program));
        }
    }

    /// Sets a named uniform. The location is resolved on every call; a
    /// name the linked program does not expose resolves to nothing and
    /// the call is silently a no-op, matching what the driver does with
    /// an unknown location.
    pub fn set_uniform(&self, name: &str, value: impl ToUniformValue) {
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        let Some(location) = location else {
            return;
        };
        let location = Some(&location);
        unsafe {
            match value.to_uniform_value() {
                UniformValue::Bool(b) => self.gl.uniform_1_i32(location, b as i32),
                UniformValue::SignedInt(i) => self.gl.uniform_1_i32(location, i),
                UniformValue::Float(f) => self.gl.uniform_1_f32(location, f),
                UniformValue::Mat4(m) => self.gl.uniform_matrix_4_f32_slice(location, false, &m),
            }
        }
    }

    /// Raw handle, for handing to a renderer that drives the context
    /// directly.
    pub fn native(&self) -> NativeProgram {
        self.program
    }

    unsafe fn build(
        gl: &GlowContext,
        vertex: &str,
        fragment: &str,
    ) -> Result<(NativeProgram, Vec<ProgramError>), ProgramError> {
        let mut diagnostics = Vec::new();
        let vertex = Self::compile_stage(gl, ShaderStage::Vertex, vertex, &mut diagnostics)?;
        let fragment =
            match Self::compile_stage(gl, ShaderStage::Fragment, fragment, &mut diagnostics) {
                Ok(shader) => shader,
                Err(error) => {
                    gl.delete_shader(vertex);
                    return Err(error);
                }
            };

        let program = match gl.create_program() {
            Ok(program) => program,
            Err(message) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(ProgramError::Allocate("program", message));
            }
        };
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            diagnostics.push(ProgramError::Link {
                log: clip_log(gl.get_program_info_log(program)),
            });
        }

        // The shader objects are not needed once linking has been
        // attempted, whatever its outcome.
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        Ok((program, diagnostics))
    }

    /// Compiles one stage. A failed compile still yields the shader
    /// object (the driver keeps it alive so its info log can be read);
    /// the failure is recorded in `diagnostics` for the caller to
    /// surface or log.
    unsafe fn compile_stage(
        gl: &GlowContext,
        stage: ShaderStage,
        source: &str,
        diagnostics: &mut Vec<ProgramError>,
    ) -> Result<NativeShader, ProgramError> {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|message| ProgramError::Allocate(stage.object_name(), message))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            diagnostics.push(ProgramError::Compile {
                stage,
                log: clip_log(gl.get_shader_info_log(shader)),
            });
        }
        Ok(shader)
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.program);
        }
    }
}

fn clip_log(mut log: String) -> String {
    if log.len() > MAX_LOG_LEN {
        let mut end = MAX_LOG_LEN;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}
