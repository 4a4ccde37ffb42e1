use std::future::Future;
use viewer_core::{decode_texture, import_glb, AssetLoader, LoadError, Scene, Texture};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Fetches assets with the browser `fetch` API and decodes them in Rust.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebAssetLoader;

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| LoadError::fetch(url, "no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| LoadError::fetch(url, format!("{:?}", e)))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|e| LoadError::fetch(url, format!("{:?}", e)))?;
    if !response.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let body = response
        .array_buffer()
        .map_err(|e| LoadError::fetch(url, format!("{:?}", e)))?;
    let buffer = JsFuture::from(body)
        .await
        .map_err(|e| LoadError::fetch(url, format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

impl AssetLoader for WebAssetLoader {
    fn load_model(&self, url: &str) -> impl Future<Output = Result<Scene, LoadError>> {
        let url = url.to_string();
        async move {
            let bytes = fetch_bytes(&url).await?;
            log::info!("[model] fetched {} bytes from {}", bytes.len(), url);
            import_glb(&bytes, &url)
        }
    }

    fn load_texture(&self, url: &str) -> impl Future<Output = Result<Texture, LoadError>> {
        let url = url.to_string();
        async move {
            let bytes = fetch_bytes(&url).await?;
            decode_texture(&bytes, &url)
        }
    }
}
