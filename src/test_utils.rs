//! Test data builders for app and view testing.

use std::time::Instant;

use crate::api::{Client, Photo};
use crate::app::{App, LoadState};
use crate::theme::Theme;

/// Unroutable endpoint: any fetch a test accidentally spawns fails fast
/// instead of reaching the real provider.
const TEST_BASE_URL: &str = "http://127.0.0.1:9";

#[allow(dead_code)]
pub struct PhotoBuilder {
    id: u64,
    width: u32,
    height: u32,
    url: String,
    photographer: String,
    alt: String,
    image_url: String,
}

impl Default for PhotoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl PhotoBuilder {
    pub fn new() -> Self {
        Self {
            id: 1,
            width: 4000,
            height: 6000,
            url: "https://www.pexels.com/photo/1/".to_string(),
            photographer: "Test Photographer".to_string(),
            alt: "A test photo".to_string(),
            image_url: "https://images.pexels.com/1/medium.jpg".to_string(),
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = id;
        self.url = format!("https://www.pexels.com/photo/{id}/");
        self.image_url = format!("https://images.pexels.com/{id}/medium.jpg");
        self
    }

    pub fn photographer(mut self, name: &str) -> Self {
        self.photographer = name.to_string();
        self
    }

    pub fn alt(mut self, alt: &str) -> Self {
        self.alt = alt.to_string();
        self
    }

    pub fn dims(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn build(self) -> Photo {
        Photo {
            id: self.id,
            width: self.width,
            height: self.height,
            url: self.url,
            photographer: self.photographer,
            alt: self.alt,
            image_url: self.image_url,
        }
    }
}

#[allow(dead_code)]
pub struct TestAppBuilder {
    photos: Vec<Photo>,
    selected_index: usize,
    in_flight: bool,
    has_more: bool,
    error: Option<String>,
    show_help: bool,
    scroll_offset: usize,
    viewport_height: Option<u16>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            selected_index: 0,
            in_flight: false,
            has_more: true,
            error: None,
            show_help: false,
            scroll_offset: 0,
            viewport_height: None,
        }
    }

    pub fn with_photos(mut self, photos: Vec<Photo>) -> Self {
        self.photos = photos;
        self
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn in_flight(mut self) -> Self {
        self.in_flight = true;
        self
    }

    pub fn has_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn error(mut self, msg: &str) -> Self {
        self.error = Some(msg.to_string());
        self
    }

    pub fn show_help(mut self) -> Self {
        self.show_help = true;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    pub fn viewport_height(mut self, height: u16) -> Self {
        self.viewport_height = Some(height);
        self
    }

    pub fn build(self) -> App {
        let client = Client::with_base_url("test-key".to_string(), TEST_BASE_URL.to_string());
        let mut app = App::new(Theme::dark(), client);

        app.photos = self.photos;
        app.selected_index = self.selected_index;
        app.scroll_offset = self.scroll_offset;
        app.show_help = self.show_help;
        app.viewport_height = self.viewport_height;
        app.load = LoadState {
            in_flight: self.in_flight,
            loading_start: if self.in_flight {
                Some(Instant::now())
            } else {
                None
            },
            has_more: self.has_more,
            error: self.error,
        };
        app
    }
}

pub fn sample_photos() -> Vec<Photo> {
    vec![
        PhotoBuilder::new()
            .id(101)
            .photographer("Lukas Reyes")
            .alt("Fog rolling over a pine ridge")
            .dims(5472, 3648)
            .build(),
        PhotoBuilder::new()
            .id(102)
            .photographer("Mira Chen")
            .alt("Street market at dusk")
            .dims(4000, 6000)
            .build(),
        PhotoBuilder::new()
            .id(103)
            .photographer("Tomás Vela")
            .alt("Surfer under a breaking wave")
            .dims(6016, 4016)
            .build(),
        PhotoBuilder::new()
            .id(104)
            .photographer("Ada Okafor")
            .alt("Stacked ceramic bowls")
            .dims(3456, 5184)
            .build(),
        PhotoBuilder::new()
            .id(105)
            .photographer("Jon Brandt")
            .alt("Old tram crossing a bridge")
            .dims(5760, 3840)
            .build(),
        PhotoBuilder::new()
            .id(106)
            .photographer("Sofia Marques")
            .alt("")
            .dims(4480, 6720)
            .build(),
    ]
}
