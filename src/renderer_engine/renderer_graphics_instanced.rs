use anyhow::{ensure, Result};
use log::{debug, info};

use crate::cstr;
use crate::renderer_engine::config::RendererConfig;
use crate::renderer_engine::shader::ShaderProgram;
use crate::renderer_engine::tools::check_gl_error;
use crate::renderer_engine::types::{AsteroidGPU, FrameCamera};
use crate::renderer_engine::utils::texture::{load_texture_array, TextureArray};

/// Rendu instancié des astéroïdes : un quad unité (triangle strip) dessiné
/// une fois par `AsteroidGPU`, orienté face caméra dans le vertex shader.
pub struct RendererGraphicsInstanced {
    vao: u32,
    vbo_instances: u32,
    vbo_quad: u32,

    shader: ShaderProgram,
    loc_view_projection: i32,
    loc_camera_right: i32,
    loc_camera_up: i32,
    loc_textures: i32,

    textures: TextureArray,

    max_instances_on_gpu: usize,
}

impl RendererGraphicsInstanced {
    pub fn new(max_instances_on_gpu: usize, config: &RendererConfig) -> Result<Self> {
        let shader = unsafe {
            ShaderProgram::from_files(&config.vertex_shader, &config.fragment_shader)?
        };
        let (loc_view_projection, loc_camera_right, loc_camera_up, loc_textures) =
            unsafe { Self::uniform_locations(&shader) };

        let mut rng = rand::rng();
        let textures = unsafe {
            load_texture_array(
                &config.texture_paths,
                config.texture_size,
                config.procedural_layers,
                &mut rng,
            )?
        };

        unsafe {
            let (vao, vbo_quad, vbo_instances) = Self::setup_gpu_buffers(max_instances_on_gpu);
            check_gl_error("instanced renderer setup")?;

            Ok(Self {
                vao,
                vbo_instances,
                vbo_quad,
                shader,
                loc_view_projection,
                loc_camera_right,
                loc_camera_up,
                loc_textures,
                textures,
                max_instances_on_gpu,
            })
        }
    }

    unsafe fn uniform_locations(shader: &ShaderProgram) -> (i32, i32, i32, i32) {
        (
            shader.uniform_location(cstr!("uViewProjection")),
            shader.uniform_location(cstr!("uCameraRight")),
            shader.uniform_location(cstr!("uCameraUp")),
            shader.uniform_location(cstr!("uTextures")),
        )
    }

    #[inline]
    pub fn max_instances(&self) -> usize {
        self.max_instances_on_gpu
    }

    #[inline]
    pub fn texture_layers(&self) -> u32 {
        self.textures.layers
    }

    /// Recompile le programme à partir des fichiers. En cas d'échec, l'ancien
    /// programme reste actif.
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn reload_shaders(&mut self, config: &RendererConfig) -> Result<()> {
        let shader = ShaderProgram::from_files(&config.vertex_shader, &config.fragment_shader)?;
        self.shader.delete();
        self.shader = shader;
        let (vp, right, up, tex) = Self::uniform_locations(&self.shader);
        self.loc_view_projection = vp;
        self.loc_camera_right = right;
        self.loc_camera_up = up;
        self.loc_textures = tex;
        Ok(())
    }

    /// Recrée les buffers GPU avec une nouvelle taille maximale.
    /// Les anciens buffers sont libérés.
    ///
    /// Si le driver refuse l'allocation, les buffers sont supprimés et la
    /// capacité retombe à 0 : tout upload ultérieur est alors refusé au lieu
    /// d'écrire hors du stockage réel.
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn recreate_buffers(&mut self, new_max: usize) -> Result<()> {
        self.delete_buffers();
        self.max_instances_on_gpu = 0;

        let (vao, vbo_quad, vbo_instances) = Self::setup_gpu_buffers(new_max);
        self.vao = vao;
        self.vbo_instances = vbo_instances;
        self.vbo_quad = vbo_quad;

        if let Err(e) = check_gl_error("instance buffer reallocation") {
            self.delete_buffers();
            return Err(e);
        }
        self.max_instances_on_gpu = new_max;
        Ok(())
    }

    /// Remplace le contenu du buffer d'instances.
    ///
    /// Le buffer est d'abord "orphelin" (`glBufferData` avec un pointeur nul) :
    /// le driver peut allouer un nouveau stockage sans attendre que le GPU ait
    /// fini de lire celui de la frame précédente. Puis `glBufferSubData` copie
    /// les instances au début du buffer.
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn upload(&mut self, instances: &[AsteroidGPU]) -> Result<usize> {
        ensure!(
            instances.len() <= self.max_instances_on_gpu,
            "Instance upload overflow: {} instances for a buffer of {}",
            instances.len(),
            self.max_instances_on_gpu
        );

        let capacity_bytes = (self.max_instances_on_gpu * std::mem::size_of::<AsteroidGPU>()) as isize;
        gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo_instances);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            capacity_bytes,
            std::ptr::null(),
            gl::STREAM_DRAW,
        );
        if !instances.is_empty() {
            let bytes: &[u8] = bytemuck::cast_slice(instances);
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                0,
                bytes.len() as isize,
                bytes.as_ptr() as *const _,
            );
        }
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        check_gl_error("instance upload")?;
        Ok(instances.len())
    }

    /// Dessine les `count` premières instances du buffer.
    ///
    /// # Paramètres
    /// - `count`: nombre d'instances envoyées par le dernier `upload`.
    ///   Si `count` vaut 0, aucun appel de dessin n'est émis.
    /// - `camera`: matrices de la frame ; l'axe droite est extrait de la vue,
    ///   l'axe haut est celui fourni par l'appelant.
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn draw(&self, count: usize, camera: &FrameCamera) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        ensure!(
            count <= self.max_instances_on_gpu,
            "Cannot draw {} instances from a buffer of {}",
            count,
            self.max_instances_on_gpu
        );

        self.shader.bind();

        let view_projection = camera.view_projection().to_cols_array();
        gl::UniformMatrix4fv(
            self.loc_view_projection,
            1,
            gl::FALSE,
            view_projection.as_ptr(),
        );
        let right = camera.right();
        gl::Uniform3f(self.loc_camera_right, right.x, right.y, right.z);
        let up = camera.up.normalize_or_zero();
        gl::Uniform3f(self.loc_camera_up, up.x, up.y, up.z);

        gl::ActiveTexture(gl::TEXTURE0);
        gl::BindTexture(gl::TEXTURE_2D_ARRAY, self.textures.id);
        gl::Uniform1i(self.loc_textures, 0);

        gl::BindVertexArray(self.vao);
        gl::DrawArraysInstanced(gl::TRIANGLE_STRIP, 0, 4, count as i32);
        gl::BindVertexArray(0);

        check_gl_error("instanced draw")
    }

    unsafe fn delete_buffers(&mut self) {
        if self.vbo_instances != 0 {
            gl::DeleteBuffers(1, &self.vbo_instances);
            self.vbo_instances = 0;
        }
        if self.vbo_quad != 0 {
            gl::DeleteBuffers(1, &self.vbo_quad);
            self.vbo_quad = 0;
        }
        if self.vao != 0 {
            gl::DeleteVertexArrays(1, &self.vao);
            self.vao = 0;
        }
    }

    /// Libère les ressources GPU (buffers, programme, textures).
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn close(&mut self) {
        self.delete_buffers();
        self.shader.delete();
        self.textures.delete();
        debug!("Instanced asteroid renderer closed and reset.");
    }

    unsafe fn setup_gpu_buffers(max_instances_on_gpu: usize) -> (u32, u32, u32) {
        let (mut vao, mut vbo_quad, mut vbo_instances) = (0u32, 0u32, 0u32);

        gl::GenVertexArrays(1, &mut vao);
        gl::BindVertexArray(vao);

        // === 1️⃣ Quad unité statique, centré sur l'origine ===
        const QUAD_CORNERS: [f32; 8] = [
            -0.5, -0.5, // bottom-left
            0.5, -0.5, // bottom-right
            -0.5, 0.5, // top-left
            0.5, 0.5, // top-right
        ];

        gl::GenBuffers(1, &mut vbo_quad);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo_quad);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            std::mem::size_of_val(&QUAD_CORNERS) as isize,
            QUAD_CORNERS.as_ptr() as *const _,
            gl::STATIC_DRAW,
        );

        // layout(location = 0): coins du quad
        gl::EnableVertexAttribArray(0);
        gl::VertexAttribPointer(
            0,
            2,
            gl::FLOAT,
            gl::FALSE,
            2 * std::mem::size_of::<f32>() as i32,
            std::ptr::null(),
        );
        gl::VertexAttribDivisor(0, 0); // par sommet

        // === 2️⃣ Instances ===
        gl::GenBuffers(1, &mut vbo_instances);
        gl::BindBuffer(gl::ARRAY_BUFFER, vbo_instances);

        let buffer_size = (max_instances_on_gpu * std::mem::size_of::<AsteroidGPU>()) as isize;
        info!(
            "🎮 Allocating instance buffer: {} asteroids → {} bytes",
            max_instances_on_gpu, buffer_size
        );
        gl::BufferData(
            gl::ARRAY_BUFFER,
            buffer_size,
            std::ptr::null(),
            gl::STREAM_DRAW,
        );

        AsteroidGPU::setup_vertex_attribs_for_instanced_quad();

        gl::BindVertexArray(0);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        (vao, vbo_quad, vbo_instances)
    }
}
