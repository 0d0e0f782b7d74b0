//! Frame driver: pixel buffer management and whole-image tracing.

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{tracer, Color, Scene};
use glint_core::{load_scene, ConfigError, LoadResult, TraceConfig};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Buffer width chosen when a scene is loaded.
pub const DEFAULT_BUFFER_WIDTH: u32 = 256;

/// Normalized image coordinates of pixel `(i, j)`.
#[inline]
pub fn pixel_coordinates(i: u32, j: u32, width: u32, height: u32) -> (f32, f32) {
    (i as f32 / width as f32, j as f32 / height as f32)
}

/// Convert a color to 8-bit RGB, `floor(255 * c)` per clamped channel.
pub fn quantize(color: Color) -> [u8; 3] {
    let c = (color.clamp(Color::ZERO, Color::ONE) * 255.0).floor();
    [c.x as u8, c.y as u8, c.z as u8]
}

/// 8-bit RGB pixel buffer, row-major.
///
/// Row 0 holds `y = 0`, the bottom of the image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, `width * height * 3` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Reallocate as a black `width` x `height` buffer.
    ///
    /// Keeps the current contents and returns false when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    /// Fill with black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Get the pixel at column `i`, row `j`.
    pub fn get(&self, i: u32, j: u32) -> Option<[u8; 3]> {
        let offset = self.offset(i, j)?;
        Some([self.data[offset], self.data[offset + 1], self.data[offset + 2]])
    }

    /// Set the pixel at column `i`, row `j`. Out-of-range writes are ignored.
    pub fn set(&mut self, i: u32, j: u32, rgb: [u8; 3]) {
        if let Some(offset) = self.offset(i, j) {
            self.data[offset..offset + 3].copy_from_slice(&rgb);
        }
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (k, rgb) in result.pixels.iter().enumerate() {
            let k = k as u32;
            self.set(bucket.x + k % bucket.width, bucket.y + k / bucket.width, *rgb);
        }
    }

    /// Scanlines `start..stop` as mutable byte slices, in parallel.
    fn rows_mut(&mut self, start: u32, stop: u32) -> rayon::slice::ChunksMut<'_, u8> {
        let row = self.width as usize * 3;
        self.data[start as usize * row..stop as usize * row].par_chunks_mut(row)
    }

    fn offset(&self, i: u32, j: u32) -> Option<usize> {
        if i >= self.width || j >= self.height {
            return None;
        }
        Some((j as usize * self.width as usize + i as usize) * 3)
    }
}

/// Owns the loaded scene, the trace configuration and the output buffer.
///
/// Every tracing entry point does nothing until a scene is loaded.
#[derive(Default)]
pub struct RayTracer {
    scene: Option<Scene>,
    config: TraceConfig,
    buffer: ImageBuffer,
}

impl RayTracer {
    /// Create a tracer with no scene, validating `config` the same way
    /// [`RayTracer::set_config`] does.
    pub fn new(config: TraceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scene: None,
            config,
            buffer: ImageBuffer::default(),
        })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Replace the trace configuration. Invalid settings are rejected and
    /// the current ones kept.
    pub fn set_config(&mut self, config: TraceConfig) -> Result<(), ConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("Rejected trace configuration: {}", e);
            return Err(e);
        }
        self.config = config;
        Ok(())
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_loaded(&self) -> bool {
        self.scene.is_some()
    }

    /// Load and build a scene file.
    ///
    /// On failure the previous scene and buffer are left untouched.
    pub fn load_scene<P: AsRef<Path>>(&mut self, path: P) -> LoadResult<()> {
        let description = load_scene(path)?;
        let scene = Scene::from_description(&description)?;
        self.set_scene(scene);
        Ok(())
    }

    /// Install a scene and size the buffer to its aspect ratio.
    pub fn set_scene(&mut self, scene: Scene) {
        let aspect = scene.camera().aspect_ratio();
        let height = if aspect.is_finite() && aspect > 0.0 {
            ((DEFAULT_BUFFER_WIDTH as f32 / aspect + 0.5) as u32).max(1)
        } else {
            DEFAULT_BUFFER_WIDTH
        };

        log::info!(
            "Scene '{}' ready, buffer {}x{}",
            scene.name(),
            DEFAULT_BUFFER_WIDTH,
            height
        );
        self.scene = Some(scene);
        self.trace_setup(DEFAULT_BUFFER_WIDTH, height);
    }

    /// Aspect ratio of the loaded scene's camera, 1 without a scene.
    pub fn aspect_ratio(&self) -> f32 {
        self.scene
            .as_ref()
            .map_or(1.0, |scene| scene.camera().aspect_ratio())
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// Size the output buffer, clearing it only if the size changes.
    pub fn trace_setup(&mut self, width: u32, height: u32) {
        if self.buffer.resize(width, height) {
            log::debug!("Reallocated buffer at {}x{}", width, height);
        }
    }

    /// Color through normalized image coordinates, if a scene is loaded.
    pub fn trace(&self, x: f32, y: f32) -> Option<Color> {
        let scene = self.scene.as_ref()?;
        Some(tracer::trace(scene, x, y, &self.config))
    }

    /// Trace and store one pixel.
    pub fn trace_pixel(&mut self, i: u32, j: u32) {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        if i >= width || j >= height {
            return;
        }
        let (x, y) = pixel_coordinates(i, j, width, height);
        if let Some(color) = self.trace(x, y) {
            self.buffer.set(i, j, quantize(color));
        }
    }

    /// Trace scanlines `start..stop` in parallel. `stop` is clamped to the
    /// buffer height.
    pub fn trace_lines(&mut self, start: u32, stop: u32) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let (width, height) = (self.buffer.width(), self.buffer.height());
        let stop = stop.min(height);
        if width == 0 || start >= stop {
            return;
        }

        let config = &self.config;
        self.buffer
            .rows_mut(start, stop)
            .enumerate()
            .for_each(|(k, row)| {
                let j = start + k as u32;
                for (i, rgb) in row.chunks_exact_mut(3).enumerate() {
                    let (x, y) = pixel_coordinates(i as u32, j, width, height);
                    rgb.copy_from_slice(&quantize(tracer::trace(scene, x, y, config)));
                }
            });
    }

    /// Trace the whole frame as buckets spiraling out from the center.
    pub fn render(&mut self, bucket_size: u32) {
        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let (width, height) = (self.buffer.width(), self.buffer.height());
        let buckets = generate_buckets(width, height, bucket_size);
        if buckets.is_empty() {
            return;
        }

        let start = Instant::now();
        let config = &self.config;
        let results: Vec<BucketResult> = buckets
            .par_iter()
            .map(|bucket| {
                let pixels = render_bucket(bucket, scene, width, height, config);
                log::debug!("Bucket {} done ({} pixels)", bucket.index, pixels.len());
                BucketResult::new(*bucket, pixels)
            })
            .collect();

        for result in &results {
            self.buffer.write_bucket(result);
        }

        log::info!(
            "Rendered {}x{} in {} buckets in {:?}",
            width,
            height,
            results.len(),
            start.elapsed()
        );
    }
}
