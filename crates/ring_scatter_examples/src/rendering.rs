use std::path::Path;

use glam::Vec2;
use image::{Rgb, RgbImage};
use ring_scatter::prelude::*;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Filled circle drawn for every placed point of one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleStyle {
    pub color: [u8; 3],
    /// Radius in pixels.
    pub radius: i32,
}

/// Image size, world window and colors used by [`render_session_to_png`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World-space point drawn at the image center.
    pub view_center: Vec2,
    /// World units from the image center to its left and right edges.
    pub view_half_width: f32,
    pub background: [u8; 3],
    pub ring_color: [u8; 3],
    pub token: CircleStyle,
    pub obstacle: CircleStyle,
}

impl RenderConfig {
    /// Frames `region` with a small margin.
    pub fn new(image_size: (u32, u32), region: &SpawnRegion) -> Self {
        Self {
            image_size,
            view_center: region.center,
            view_half_width: region.max_radius * 1.1,
            background: [26, 26, 26],
            ring_color: [90, 90, 90],
            token: CircleStyle {
                color: [235, 200, 60],
                radius: 4,
            },
            obstacle: CircleStyle {
                color: [200, 70, 70],
                radius: 6,
            },
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_token_style(mut self, style: CircleStyle) -> Self {
        self.token = style;
        self
    }

    pub fn with_obstacle_style(mut self, style: CircleStyle) -> Self {
        self.obstacle = style;
        self
    }

    fn pixels_per_unit(&self) -> f32 {
        self.image_size.0 as f32 / (2.0 * self.view_half_width)
    }

    /// Maps a world position to pixel coordinates, y pointing up in world space.
    fn to_pixel(&self, p: Vec2) -> (i32, i32) {
        let scale = self.pixels_per_unit();
        let (w, h) = self.image_size;
        let d = (p - self.view_center) * scale;
        let x = w as f32 * 0.5 + d.x;
        let y = h as f32 * 0.5 - d.y;
        (x.floor() as i32, y.floor() as i32)
    }

    fn to_world(&self, x: u32, y: u32) -> Vec2 {
        let scale = self.pixels_per_unit();
        let (w, h) = self.image_size;
        let dx = (x as f32 + 0.5 - w as f32 * 0.5) / scale;
        let dy = (h as f32 * 0.5 - (y as f32 + 0.5)) / scale;
        self.view_center + Vec2::new(dx, dy)
    }
}

/// Renders the ring outline and every placement to a PNG file.
pub fn render_session_to_png<'a, I>(
    region: &SpawnRegion,
    points: I,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a PlacedPoint>,
{
    let image = render_session(region, points, rc);
    image.save(path.as_ref())?;
    tracing::info!("Wrote {}", path.as_ref().display());
    Ok(())
}

fn render_session<'a, I>(region: &SpawnRegion, points: I, rc: &RenderConfig) -> RgbImage
where
    I: IntoIterator<Item = &'a PlacedPoint>,
{
    let (w, h) = rc.image_size;
    let mut image = RgbImage::from_pixel(w, h, Rgb(rc.background));

    // One pixel wide rims.
    let rim = 1.0 / rc.pixels_per_unit();
    for y in 0..h {
        for x in 0..w {
            let r = (rc.to_world(x, y) - region.center).length();
            if (r - region.min_radius).abs() <= rim || (r - region.max_radius).abs() <= rim {
                image.put_pixel(x, y, Rgb(rc.ring_color));
            }
        }
    }

    for point in points {
        let style = match point.category {
            Category::Token => rc.token,
            Category::Obstacle => rc.obstacle,
        };
        fill_circle(&mut image, rc.to_pixel(point.position), style);
    }

    image
}

fn fill_circle(image: &mut RgbImage, (cx, cy): (i32, i32), style: CircleStyle) {
    let (w, h) = image.dimensions();
    let r = style.radius;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                image.put_pixel(x as u32, y as u32, Rgb(style.color));
            }
        }
    }
}
