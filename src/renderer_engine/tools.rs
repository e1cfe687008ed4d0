use anyhow::{bail, Result};
use gl::types::*;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGED_IDS: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[macro_export]
macro_rules! cstr {
    ($s:expr) => {
        concat!($s, "\0").as_ptr() as *const gl::types::GLchar
    };
}

unsafe fn gl_string(name: GLenum) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        return "Unknown".into();
    }
    CStr::from_ptr(ptr as *const GLchar)
        .to_string_lossy()
        .into_owned()
}

/// Affiche les informations OpenGL / GPU du contexte actuel
///
/// # Safety
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn show_opengl_context_info() {
    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", gl_string(gl::VENDOR));
    info!("  Renderer : {}", gl_string(gl::RENDERER));
    info!("  OpenGL   : {}", gl_string(gl::VERSION));
    info!("  GLSL     : {}", gl_string(gl::SHADING_LANGUAGE_VERSION));

    let mut num_ext = 0;
    gl::GetIntegerv(gl::NUM_EXTENSIONS, &mut num_ext);
    debug!("  Extensions: {} extensions detected", num_ext);

    // Consommer le glerror si nécessaire
    let err = gl::GetError();
    if err != gl::NO_ERROR {
        warn!("glerror consumed after getting context info: 0x{:X}", err);
    }
}

fn debug_source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

fn debug_type_name(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "Other",
    }
}

/// Callback OpenGL debug : chaque id n'est logué qu'une seule fois.
extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if severity == gl::DEBUG_SEVERITY_NOTIFICATION || message.is_null() {
        return;
    }

    let first_time = LOGGED_IDS
        .lock()
        .map(|mut logged| logged.insert(id))
        .unwrap_or(false);
    if !first_time {
        return;
    }

    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };
    warn!(
        "[OpenGL Debug] id: {:X}, source: {}, type: {}, message: {}",
        id,
        debug_source_name(source),
        debug_type_name(type_),
        msg
    );
}

/// Configure le debug OpenGL via `glDebugMessageCallback` (si disponible :
/// OpenGL 4.3 ou `KHR_debug`).
///
/// # Safety
/// Le contexte OpenGL doit être actif.
pub unsafe fn setup_opengl_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        info!("OpenGL debug output not available on this context");
        return;
    }
    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS); // important pour que le callback soit synchrone
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
}

pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

/// Vide la file d'erreurs OpenGL et échoue si au moins une erreur était présente.
///
/// # Safety
/// Le contexte OpenGL doit être actif.
pub unsafe fn check_gl_error(context: &str) -> Result<()> {
    let mut errors = Vec::new();
    loop {
        let code = gl::GetError();
        if code == gl::NO_ERROR {
            break;
        }
        errors.push(format!("{} (0x{:X})", gl_error_name(code), code));
        // un contexte perdu peut renvoyer la même erreur indéfiniment
        if errors.len() >= 8 {
            break;
        }
    }
    if !errors.is_empty() {
        bail!("OpenGL error during {}: {}", context, errors.join(", "));
    }
    Ok(())
}
