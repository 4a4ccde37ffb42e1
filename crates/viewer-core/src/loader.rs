use crate::error::LoadError;
use crate::scene::Scene;
use crate::texture::Texture;
use std::future::Future;

pub trait AssetLoader {
    fn load_model(&self, url: &str) -> impl Future<Output = Result<Scene, LoadError>>;

    fn load_texture(&self, url: &str) -> impl Future<Output = Result<Texture, LoadError>>;
}
