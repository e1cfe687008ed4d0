use anyhow::{anyhow, Context, Result};
use gl::types::*;
use log::info;
use regex::Regex;
use std::{ffi::CString, path::Path, ptr};

lazy_static::lazy_static! {
    /// Formats de log GLSL supportés :
    /// - "0:12(105): ..."       (Mesa/Intel)
    /// - "0(12) : error ..."    (NVIDIA)
    /// - "ERROR: 0:12: ..."     (AMD/ATI)
    static ref GLSL_ERROR_LINE: Regex =
        Regex::new(r"\d+:(\d+)\(\d+\)|\d+\((\d+)\)\s*:|:\s*\d+:(\d+):")
            .expect("valid GLSL error regex");
}

/// Programme GLSL compilé et lié.
#[derive(Debug)]
pub struct ShaderProgram {
    id: u32,
}

impl ShaderProgram {
    /// Compile un programme à partir de fichiers GLSL.
    ///
    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn from_files<P: AsRef<Path>>(vertex_path: P, fragment_path: P) -> Result<Self> {
        let (vertex_path, fragment_path) = (vertex_path.as_ref(), fragment_path.as_ref());
        let vertex_src = std::fs::read_to_string(vertex_path)
            .with_context(|| format!("Failed to load vertex shader '{}'", vertex_path.display()))?;
        let fragment_src = std::fs::read_to_string(fragment_path).with_context(|| {
            format!(
                "Failed to load fragment shader '{}'",
                fragment_path.display()
            )
        })?;

        let program = Self::from_sources(&vertex_src, &fragment_src)?;
        info!(
            "✅ Shader program {} compiled from '{}' + '{}'",
            program.id,
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(program)
    }

    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn from_sources(vertex_src: &str, fragment_src: &str) -> Result<Self> {
        let vs = compile_shader(vertex_src, gl::VERTEX_SHADER)?;
        let fs = match compile_shader(fragment_src, gl::FRAGMENT_SHADER) {
            Ok(fs) => fs,
            Err(e) => {
                gl::DeleteShader(vs);
                return Err(e);
            }
        };

        let program = gl::CreateProgram();
        gl::AttachShader(program, vs);
        gl::AttachShader(program, fs);
        gl::LinkProgram(program);
        gl::DeleteShader(vs);
        gl::DeleteShader(fs);

        let mut success = gl::FALSE as GLint;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        if success != gl::TRUE as GLint {
            let mut len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let log = read_info_log(len, |len, buf| {
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf)
            });
            gl::DeleteProgram(program);
            return Err(anyhow!("Shader link failed:\n{}", log));
        }

        Ok(Self { id: program })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn bind(&self) {
        gl::UseProgram(self.id);
    }

    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn uniform_location(&self, name: *const GLchar) -> GLint {
        gl::GetUniformLocation(self.id, name)
    }

    /// # Safety
    /// Le contexte OpenGL doit être actif.
    pub unsafe fn delete(&mut self) {
        if self.id != 0 {
            gl::DeleteProgram(self.id);
            self.id = 0;
        }
    }
}

unsafe fn read_info_log(len: GLint, fetch: impl FnOnce(GLsizei, *mut GLchar)) -> String {
    let mut buf = vec![0u8; len.max(1) as usize];
    fetch(len, buf.as_mut_ptr() as *mut GLchar);
    String::from_utf8_lossy(&buf)
        .trim_matches(char::from(0))
        .to_string()
}

unsafe fn compile_shader(src: &str, ty: GLenum) -> Result<u32> {
    let shader = gl::CreateShader(ty);
    let c_str = CString::new(src).map_err(|e| anyhow!("CString error: {}", e))?;

    gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut success = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success == gl::TRUE as GLint {
        return Ok(shader);
    }

    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    let log = read_info_log(len, |len, buf| {
        gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf)
    });
    gl::DeleteShader(shader);

    let mut message = format!("Shader compilation failed:\n{}", log);
    if let Some(line) = parse_glsl_error_line(&log) {
        message.push_str(&format_glsl_error_context(src, line));
    }
    Err(anyhow!(message))
}

/// Extrait le numéro de ligne de la première erreur d'un log GLSL.
fn parse_glsl_error_line(log: &str) -> Option<usize> {
    let captures = GLSL_ERROR_LINE.captures(log)?;
    (1..=3)
        .find_map(|group| captures.get(group))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extrait du code GLSL autour de la ligne fautive (2 lignes avant/après).
fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    const CONTEXT: usize = 2;

    let lines: Vec<&str> = src.lines().collect();
    if line_number == 0 || line_number > lines.len() {
        return String::new();
    }

    let start = line_number.saturating_sub(1 + CONTEXT);
    let end = (line_number + CONTEXT).min(lines.len());

    let mut output = format!("\n🔍 Error context (line {}):\n", line_number);
    for (current, line) in (start + 1..).zip(&lines[start..end]) {
        let marker = if current == line_number { '>' } else { ' ' };
        output.push_str(&format!("{} {:>3} | {}\n", marker, current, line));
    }
    output
}
