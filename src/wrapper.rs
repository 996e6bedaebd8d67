use glow::{HasContext, NativeProgram, NativeShader, NativeUniformLocation};

/// Thin newtype over [`glow::Context`] exposing only the entry points the
/// program wrapper needs, so the whole driver surface can be faked in tests.
///
/// Every method must run on the thread that owns the underlying context;
/// the wrapper is neither `Send` nor `Sync` and is expected to be shared
/// through an `Rc`.
#[cfg_attr(test, faux::create)]
#[derive(Debug)]
pub struct GlowContext(glow::Context);

#[cfg_attr(test, faux::methods)]
impl From<glow::Context> for GlowContext {
    fn from(gl: glow::Context) -> Self {
        Self(gl)
    }
}

#[cfg_attr(test, faux::methods)]
impl GlowContext {
    #[inline(always)]
    pub unsafe fn create_shader(&self, shader_type: u32) -> Result<NativeShader, String> {
        self.0.create_shader(shader_type)
    }

    #[inline(always)]
    pub unsafe fn shader_source(&self, shader: NativeShader, source: &str) {
        self.0.shader_source(shader, source)
    }

    #[inline(always)]
    pub unsafe fn compile_shader(&self, shader: NativeShader) {
        self.0.compile_shader(shader)
    }

    #[inline(always)]
    pub unsafe fn get_shader_compile_status(&self, shader: NativeShader) -> bool {
        self.0.get_shader_compile_status(shader)
    }

    #[inline(always)]
    pub unsafe fn get_shader_info_log(&self, shader: NativeShader) -> String {
        self.0.get_shader_info_log(shader)
    }

    #[inline(always)]
    pub unsafe fn delete_shader(&self, shader: NativeShader) {
        self.0.delete_shader(shader)
    }

    #[inline(always)]
    pub unsafe fn create_program(&self) -> Result<NativeProgram, String> {
        self.0.create_program()
    }

    #[inline(always)]
    pub unsafe fn attach_shader(&self, program: NativeProgram, shader: NativeShader) {
        self.0.attach_shader(program, shader)
    }

    #[inline(always)]
    pub unsafe fn link_program(&self, program: NativeProgram) {
        self.0.link_program(program)
    }

    #[inline(always)]
    pub unsafe fn get_program_link_status(&self, program: NativeProgram) -> bool {
        self.0.get_program_link_status(program)
    }

    #[inline(always)]
    pub unsafe fn get_program_info_log(&self, program: NativeProgram) -> String {
        self.0.get_program_info_log(program)
    }

    #[inline(always)]
    pub unsafe fn delete_program(&self, program: NativeProgram) {
        self.0.delete_program(program)
    }

    #[inline(always)]
    pub unsafe fn use_program(&self, program: Option<NativeProgram>) {
        self.0.use_program(program)
    }

    #[inline(always)]
    pub unsafe fn get_uniform_location(
        &self,
        program: NativeProgram,
        name: &str,
    ) -> Option<NativeUniformLocation> {
        self.0.get_uniform_location(program, name)
    }

    #[inline(always)]
    pub unsafe fn uniform_1_i32(&self, location: Option<&NativeUniformLocation>, x: i32) {
        self.0.uniform_1_i32(location, x)
    }

    #[inline(always)]
    pub unsafe fn uniform_1_f32(&self, location: Option<&NativeUniformLocation>, x: f32) {
        self.0.uniform_1_f32(location, x)
    }

    #[inline(always)]
    pub unsafe fn uniform_matrix_4_f32_slice(
        &self,
        location: Option<&NativeUniformLocation>,
        transpose: bool,
        v: &[f32],
    ) {
        self.0.uniform_matrix_4_f32_slice(location, transpose, v)
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroU32;

    use faux::when;
    use glow::{NativeProgram, NativeShader, NativeUniformLocation};

    use super::GlowContext;

    /// Context fake where everything compiles, links and resolves.
    /// Tests exercising a failure path re-stub the relevant method.
    pub fn mocked_gl() -> GlowContext {
        let mut gl = GlowContext::faux();
        when!(gl.create_shader).then_return(Ok(NativeShader(NonZeroU32::new(1).unwrap())));
        when!(gl.shader_source).then_return(());
        when!(gl.compile_shader).then_return(());
        when!(gl.get_shader_compile_status).then_return(true);
        when!(gl.delete_shader).then_return(());
        when!(gl.create_program).then_return(Ok(NativeProgram(NonZeroU32::new(1).unwrap())));
        when!(gl.attach_shader).then_return(());
        when!(gl.link_program).then_return(());
        when!(gl.get_program_link_status).then_return(true);
        when!(gl.delete_program).then_return(());
        when!(gl.use_program).then_return(());
        when!(gl.get_uniform_location).then_return(Some(NativeUniformLocation(0)));
        when!(gl.uniform_1_i32).then_return(());
        when!(gl.uniform_1_f32).then_return(());
        when!(gl.uniform_matrix_4_f32_slice).then_return(());
        gl
    }
}

#[cfg(test)]
pub use test::mocked_gl;
