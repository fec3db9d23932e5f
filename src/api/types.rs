use serde::Deserialize;

/// One page of the curated feed as Pexels returns it.
#[derive(Debug, Deserialize)]
pub struct CuratedPage {
    #[allow(dead_code)]
    pub page: Option<u64>,
    #[allow(dead_code)]
    pub per_page: Option<u64>,
    #[serde(default)]
    pub photos: Vec<WirePhoto>,
    pub total_results: Option<u64>,
    pub next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhoto {
    pub id: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub url: Option<String>,
    pub photographer: Option<String>,
    pub alt: Option<String>,
    pub src: Option<PhotoSrc>,
}

/// Renditions of a photo at various sizes.
#[derive(Debug, Deserialize)]
pub struct PhotoSrc {
    pub original: Option<String>,
    pub large: Option<String>,
    pub medium: Option<String>,
    pub small: Option<String>,
    pub tiny: Option<String>,
}

impl PhotoSrc {
    /// Picks the rendition best suited for display, medium first.
    fn best(&self) -> Option<String> {
        self.medium
            .clone()
            .or_else(|| self.large.clone())
            .or_else(|| self.small.clone())
            .or_else(|| self.original.clone())
            .or_else(|| self.tiny.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Photo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub photographer: String,
    pub alt: String,
    pub image_url: String,
}

impl Photo {
    /// Builds a display record from a wire record. A photo needs an id and at
    /// least one image URL; every other field degrades to a placeholder.
    pub fn from_wire(wire: WirePhoto) -> Option<Self> {
        let image_url = wire.src.as_ref().and_then(PhotoSrc::best)?;
        Some(Photo {
            id: wire.id,
            width: wire.width.unwrap_or(0),
            height: wire.height.unwrap_or(0),
            url: wire
                .url
                .unwrap_or_else(|| format!("https://www.pexels.com/photo/{}/", wire.id)),
            photographer: wire
                .photographer
                .unwrap_or_else(|| "[unknown]".to_string()),
            alt: wire.alt.unwrap_or_default(),
            image_url,
        })
    }

    /// One-line description for list rendering: the alt text when present,
    /// otherwise the image URL.
    pub fn caption(&self) -> &str {
        if self.alt.is_empty() {
            &self.image_url
        } else {
            &self.alt
        }
    }
}
