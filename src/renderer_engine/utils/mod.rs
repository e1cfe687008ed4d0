pub mod texture;
pub use self::texture::{load_texture_array, TextureArray};
