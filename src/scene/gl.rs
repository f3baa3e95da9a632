// Minimal WebGL 1 box renderer for scene mode.
use glam::{Mat4, Vec3};
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as Gl, WebGlShader,
    WebGlUniformLocation,
};

use super::SceneError;
use super::camera::OrbitCamera;
use crate::model::LabelEntry;
use crate::state::HoverState;

const VERTEX_SHADER: &str = r#"
attribute vec3 a_position;
attribute vec3 a_normal;
uniform mat4 u_model;
uniform mat4 u_view_proj;
varying vec3 v_normal;
varying vec3 v_world;
void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    // model is translation and axis scale only, so face normals are unchanged
    v_normal = a_normal;
    gl_Position = u_view_proj * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform vec3 u_color;
uniform float u_emissive;
uniform vec3 u_light;
varying vec3 v_normal;
varying vec3 v_world;
void main() {
    float diffuse = max(dot(normalize(v_normal), normalize(u_light - v_world)), 0.0);
    vec3 lit = u_color * (0.5 + diffuse) + u_color * u_emissive;
    gl_FragColor = vec4(min(lit, vec3(1.0)), 1.0);
}
"#;

const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const BACKGROUND: [f32; 3] = [5.0 / 255.0, 2.0 / 255.0, 23.0 / 255.0];
const CUBE_VERTICES: i32 = 36;

struct Uniforms {
    model: WebGlUniformLocation,
    view_proj: WebGlUniformLocation,
    color: WebGlUniformLocation,
    emissive: WebGlUniformLocation,
    light: WebGlUniformLocation,
}

pub struct SceneRenderer {
    gl: Gl,
    program: WebGlProgram,
    cube: WebGlBuffer,
    position_attr: u32,
    normal_attr: u32,
    uniforms: Uniforms,
}

impl SceneRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, SceneError> {
        let gl = canvas
            .get_context("webgl")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<Gl>().ok())
            .ok_or(SceneError::NoContext)?;
        let vs = compile(&gl, Gl::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile(&gl, Gl::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link(&gl, &vs, &fs)?;

        let cube = gl.create_buffer().ok_or(SceneError::Buffer)?;
        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&cube));
        let data = js_sys::Float32Array::from(&cube_vertices()[..]);
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &data, Gl::STATIC_DRAW);

        let attr = |name: &'static str| {
            u32::try_from(gl.get_attrib_location(&program, name))
                .map_err(|_| SceneError::Missing(name))
        };
        let uniform = |name: &'static str| {
            gl.get_uniform_location(&program, name)
                .ok_or(SceneError::Missing(name))
        };
        let position_attr = attr("a_position")?;
        let normal_attr = attr("a_normal")?;
        let uniforms = Uniforms {
            model: uniform("u_model")?,
            view_proj: uniform("u_view_proj")?,
            color: uniform("u_color")?,
            emissive: uniform("u_emissive")?,
            light: uniform("u_light")?,
        };

        Ok(Self {
            gl,
            program,
            cube,
            position_attr,
            normal_attr,
            uniforms,
        })
    }

    /// Draws one frame. `width`/`height` are backing-store pixels.
    pub fn draw(
        &self,
        camera: &OrbitCamera,
        labels: &[LabelEntry],
        hovered: Option<usize>,
        width: u32,
        height: u32,
    ) {
        let gl = &self.gl;
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 1.0);
        gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
        gl.enable(Gl::DEPTH_TEST);
        gl.use_program(Some(&self.program));

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&self.cube));
        let stride = 6 * 4;
        gl.enable_vertex_attrib_array(self.position_attr);
        gl.vertex_attrib_pointer_with_i32(self.position_attr, 3, Gl::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(self.normal_attr);
        gl.vertex_attrib_pointer_with_i32(self.normal_attr, 3, Gl::FLOAT, false, stride, 3 * 4);

        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(
            Some(&u.view_proj),
            false,
            &camera.view_proj().to_cols_array(),
        );
        gl.uniform3f(Some(&u.light), LIGHT_POSITION.x, LIGHT_POSITION.y, LIGHT_POSITION.z);

        for (i, label) in labels.iter().enumerate() {
            let hover = if hovered == Some(i) {
                HoverState::Hovered
            } else {
                HoverState::Idle
            };
            let model = Mat4::from_translation(label.spatial.to_vec3())
                * Mat4::from_scale(label.box_extent() * hover.scale() as f32);
            let [r, g, b] = label.color.to_rgb_f32();
            gl.uniform_matrix4fv_with_f32_array(Some(&u.model), false, &model.to_cols_array());
            gl.uniform3f(Some(&u.color), r, g, b);
            gl.uniform1f(Some(&u.emissive), hover.emissive());
            gl.draw_arrays(Gl::TRIANGLES, 0, CUBE_VERTICES);
        }
    }
}

impl Drop for SceneRenderer {
    fn drop(&mut self) {
        self.gl.delete_buffer(Some(&self.cube));
        self.gl.delete_program(Some(&self.program));
    }
}

fn compile(gl: &Gl, kind: u32, source: &str) -> Result<WebGlShader, SceneError> {
    let shader = gl.create_shader(kind).ok_or(SceneError::Buffer)?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SceneError::Compile(log))
    }
}

fn link(gl: &Gl, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, SceneError> {
    let program = gl.create_program().ok_or(SceneError::Buffer)?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(SceneError::Link(log))
    }
}

/// Unit cube centred on the origin, interleaved position + normal.
fn cube_vertices() -> Vec<f32> {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let mut out = Vec::with_capacity(CUBE_VERTICES as usize * 6);
    for (n, u, v) in FACES {
        let (n, u, v) = (Vec3::from(n), Vec3::from(u), Vec3::from(v));
        let corner = |su: f32, sv: f32| n * 0.5 + u * (0.5 * su) + v * (0.5 * sv);
        let quad = [
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ];
        for p in quad {
            out.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_vertices_on_unit_bounds() {
        let v = cube_vertices();
        assert_eq!(v.len(), 36 * 6);
        for chunk in v.chunks(6) {
            for c in &chunk[..3] {
                assert!((c.abs() - 0.5).abs() < 1e-6);
            }
            let normal = Vec3::new(chunk[3], chunk[4], chunk[5]);
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }
}
