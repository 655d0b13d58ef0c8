//! Image and log overlays, each fetched on demand and never stored.

use client_core::{AssetError, ImageAsset};
use image::GenericImageView;
use shared::{domain::AssetKind, protocol::AssetRequest};

use crate::controller::events::{UiError, UiErrorContext};

/// Decoded RGBA pixels ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub name: String,
    pub alt_text: String,
    pub data_uri: String,
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    pub fn decode(asset: &ImageAsset) -> Result<Self, AssetError> {
        let decoded =
            image::load_from_memory(&asset.bytes).map_err(|err| AssetError::InvalidImageData {
                name: asset.name.clone(),
                message: err.to_string(),
            })?;
        let (width, height) = decoded.dimensions();
        Ok(Self {
            name: asset.name.clone(),
            alt_text: asset.alt_text(),
            data_uri: asset.data_uri(),
            size: [width as usize, height as usize],
            rgba: decoded.to_rgba8().into_raw(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody<T> {
    Ready(T),
    Failed(String),
}

#[derive(Debug)]
pub struct AssetModal<T> {
    open: bool,
    requested: Option<String>,
    shown_name: Option<String>,
    body: Option<ModalBody<T>>,
    generation: u64,
}

impl<T> Default for AssetModal<T> {
    fn default() -> Self {
        Self {
            open: false,
            requested: None,
            shown_name: None,
            body: None,
            generation: 0,
        }
    }
}

impl<T> AssetModal<T> {
    fn begin(&mut self, name: &str) {
        self.requested = Some(name.to_string());
    }

    /// Opens the overlay with the outcome. Results for anything other than the
    /// latest request are dropped.
    fn finish(&mut self, name: &str, result: Result<T, UiError>) -> bool {
        if self.requested.as_deref() != Some(name) {
            tracing::debug!(name, "dropping stale asset result");
            return false;
        }
        self.requested = None;
        self.shown_name = Some(name.to_string());
        self.body = Some(match result {
            Ok(value) => ModalBody::Ready(value),
            Err(err) => ModalBody::Failed(err.message().to_string()),
        });
        self.generation = self.generation.wrapping_add(1);
        self.open = true;
        true
    }

    /// Hides the overlay; the loaded content stays until the next open replaces it.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self, name: &str) -> bool {
        self.requested.as_deref() == Some(name)
    }

    pub fn shown_name(&self) -> Option<&str> {
        self.shown_name.as_deref()
    }

    pub fn body(&self) -> Option<&ModalBody<T>> {
        self.body.as_ref()
    }

    /// Bumped on every completed load; the renderer keys its texture cache on it.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct AssetModalController {
    pub image: AssetModal<LoadedImage>,
    pub log: AssetModal<String>,
}

impl AssetModalController {
    pub fn request(&mut self, kind: AssetKind, name: &str) -> Result<AssetRequest, UiError> {
        let request = AssetRequest::new(kind, name)
            .map_err(|err| UiError::validation(UiErrorContext::Asset, &err))?;
        match kind {
            AssetKind::Image => self.image.begin(&request.name),
            AssetKind::Log => self.log.begin(&request.name),
        }
        Ok(request)
    }

    pub fn show_image(&mut self, name: &str, result: Result<LoadedImage, UiError>) -> bool {
        self.image.finish(name, result)
    }

    pub fn show_log(&mut self, name: &str, result: Result<String, UiError>) -> bool {
        self.log.finish(name, result)
    }

    /// Routes a failure that happened before any response, e.g. a dead command queue.
    pub fn fail(&mut self, request: &AssetRequest, err: UiError) {
        match request.kind {
            AssetKind::Image => {
                self.image.finish(&request.name, Err(err));
            }
            AssetKind::Log => {
                self.log.finish(&request.name, Err(err));
            }
        }
    }

    pub fn close_image(&mut self) {
        self.image.close();
    }

    pub fn close_log(&mut self) {
        self.log.close();
    }
}
