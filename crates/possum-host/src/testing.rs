//! Test doubles shared by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::poll_fn;
use std::io::Cursor;
use std::task::Poll;

use anyhow::{anyhow, Result};

use crate::assets::{Drawable, Fetch, FetchError};
use crate::engine::Engine;
use crate::frame::FrameScheduler;
use crate::input::InputEvent;
use crate::surface::{SurfaceDimensions, SurfaceHost};

/// One recorded engine contract call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Shader { vertex: String, fragment: String },
    Texture { slot: u32, width: u32, height: u32 },
    Dimensions(u32, u32),
    InitGameData,
    InitRenderData,
    Event(InputEvent),
    Events(Vec<InputEvent>),
    Update(f32),
    Render,
}

/// Engine that records every call in order.
///
/// `fail_updates` / `fail_renders` make the next N calls return an error.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub fail_updates: u32,
    pub fail_renders: u32,
}

impl RecordingEngine {
    pub fn updates(&self) -> Vec<f32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Update(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl Engine for RecordingEngine {
    fn load_shader(&mut self, vertex_source: &str, fragment_source: &str) {
        self.calls.push(Call::Shader {
            vertex: vertex_source.to_string(),
            fragment: fragment_source.to_string(),
        });
    }

    fn load_texture(&mut self, slot: u32, image: Drawable) {
        self.calls.push(Call::Texture {
            slot,
            width: image.width(),
            height: image.height(),
        });
    }

    fn set_canvas_dimensions(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Dimensions(width, height));
    }

    fn init_game_data(&mut self) {
        self.calls.push(Call::InitGameData);
    }

    fn init_render_data(&mut self) {
        self.calls.push(Call::InitRenderData);
    }

    fn process_event(&mut self, event: &InputEvent) {
        self.calls.push(Call::Event(event.clone()));
    }

    fn process_events(&mut self, events: &[InputEvent]) {
        self.calls.push(Call::Events(events.to_vec()));
    }

    fn update(&mut self, delta_ms: f32) -> Result<()> {
        self.calls.push(Call::Update(delta_ms));
        if self.fail_updates > 0 {
            self.fail_updates -= 1;
            return Err(anyhow!("update failed"));
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.calls.push(Call::Render);
        if self.fail_renders > 0 {
            self.fail_renders -= 1;
            return Err(anyhow!("render failed"));
        }
        Ok(())
    }
}

/// Surface host with a settable container size.
#[derive(Debug)]
pub struct FakeSurface {
    pub container: (i64, i64),
    pub applied: Vec<SurfaceDimensions>,
}

impl FakeSurface {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            container: (width, height),
            applied: Vec::new(),
        }
    }
}

impl SurfaceHost for FakeSurface {
    fn container_size(&self) -> (i64, i64) {
        self.container
    }

    fn set_surface_size(&mut self, dims: SurfaceDimensions) {
        self.applied.push(dims);
    }
}

/// Counts frame requests.
#[derive(Debug, Default)]
pub struct FakeScheduler {
    pub requests: usize,
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

/// In-memory fetcher where each entry settles after a fixed number of polls.
///
/// Unknown URLs fail with `NotFound` after zero polls.
#[derive(Debug, Default)]
pub struct MapFetcher {
    entries: HashMap<String, (Vec<u8>, usize)>,
    completed: RefCell<Vec<String>>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, bytes: &[u8], polls: usize) -> Self {
        self.entries.insert(url.to_string(), (bytes.to_vec(), polls));
        self
    }

    /// URLs in the order their fetches settled.
    pub fn completion_order(&self) -> Vec<String> {
        self.completed.borrow().clone()
    }
}

impl Fetch for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let entry = self.entries.get(url).cloned();
        let mut remaining = entry.as_ref().map_or(0, |(_, polls)| *polls);

        poll_fn(|cx| {
            if remaining == 0 {
                Poll::Ready(())
            } else {
                remaining -= 1;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        })
        .await;

        self.completed.borrow_mut().push(url.to_string());
        entry.map(|(bytes, _)| bytes).ok_or(FetchError::NotFound)
    }
}

/// Encodes a solid `width`x`height` PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 120, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
