use std::fmt;

use image::RgbaImage;

/// How a fetched payload is decoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    /// Decoded into a [`Drawable`].
    Image,
    /// Kept as UTF-8 text (shader sources).
    Text,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => f.write_str("image"),
            ResourceKind::Text => f.write_str("text"),
        }
    }
}

/// One fetch: a URL or path plus the decode rule.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceRequest {
    url: String,
    kind: ResourceKind,
}

impl ResourceRequest {
    pub fn image(url: impl Into<String>) -> Self {
        Self { url: url.into(), kind: ResourceKind::Image }
    }

    pub fn text(url: impl Into<String>) -> Self {
        Self { url: url.into(), kind: ResourceKind::Text }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl fmt::Display for ResourceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.url)
    }
}

/// Decoded image ready for texture upload (RGBA8, row-major).
#[derive(Clone, PartialEq, Eq)]
pub struct Drawable {
    image: RgbaImage,
}

impl Drawable {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// A resolved payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Image(Drawable),
    Text(String),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Image(_) => ResourceKind::Image,
            Resource::Text(_) => ResourceKind::Text,
        }
    }

    pub fn into_image(self) -> Option<Drawable> {
        match self {
            Resource::Image(d) => Some(d),
            Resource::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Resource::Text(t) => Some(t),
            Resource::Image(_) => None,
        }
    }
}

/// Every payload of a successful `load_all`, in request order.
///
/// Only constructed once all requests have resolved, so a bundle is never
/// partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    payloads: Vec<Resource>,
}

impl ResourceBundle {
    pub(crate) fn new(payloads: Vec<Resource>) -> Self {
        Self { payloads }
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    /// Payload for `requests[index]`.
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.payloads.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.payloads.iter()
    }

    pub fn into_payloads(self) -> Vec<Resource> {
        self.payloads
    }
}

impl IntoIterator for ResourceBundle {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.payloads.into_iter()
    }
}
