/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! rendering of daily hotspot maps. Each frame is the background map of the analysis region with
//! the grid, the hotspot positions, the non-zero cell counts and a title showing date and daily total

use std::{fs, path::{Path,PathBuf}};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut, text_size};
use ab_glyph::{Font, FontVec, PxScale};
use serde::{Serialize,Deserialize};
use tracing::{debug,warn};

use odin_common::{datetime::iso_date_string, fs::ensure_writable_dir};
use crate::{
    driver::{DayFrame, DaySink}, grid::Grid, pixel::PixelSpace, region::AnalysisParameters,
    errors::{rendering_error, Result}
};

/// where we look for a label font if none is configured
pub const DEFAULT_FONT_PATHS: [&'static str;3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
];

const DASH_LEN: f32 = 6.0;
const GAP_LEN: f32 = 4.0;

/// parse a `rrggbb` hex color spec (with optional leading '#')
pub fn get_hex_rgb (hex_color: &str)->Result<[u8;3]> {
    let s = hex_color.trim().trim_start_matches('#');
    if s.len() != 6 {
        return Err( rendering_error!("invalid hex color spec '{}'", hex_color))
    }
    let v = u32::from_str_radix( s, 16).map_err( |_| rendering_error!("invalid hex color spec '{}'", hex_color))?;

    let r = (v >> 16) as u8;
    let g = (v >> 8 & 0xff) as u8;
    let b = (v & 0xff) as u8;

    Ok([r, g, b])
}

fn rgba (hex_color: &str)->Result<Rgba<u8>> {
    let [r,g,b] = get_hex_rgb( hex_color)?;
    Ok( Rgba([r,g,b,255]) )
}

/// the persistence abstraction for rendered frames
pub trait ImageWriter {
    fn write_image (&self, img: &RgbaImage, path: &Path)->Result<()>;
}

pub struct PngImageWriter;

impl ImageWriter for PngImageWriter {
    fn write_image (&self, img: &RgbaImage, path: &Path)->Result<()> {
        img.save_with_format( path, ImageFormat::Png).map_err( |e| rendering_error!("failed to save {:?}: {}", path, e))
    }
}

fn default_count_color()->String { "ffffff".to_string() }
fn default_point_color()->String { "ff0000".to_string() }
fn default_grid_color()->String { "000000".to_string() }
fn default_point_radius()->i32 { 3 }
fn default_font_size()->f32 { 12.0 }

/// configurable appearance of daily maps
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RenderStyle {
    #[serde(default="default_count_color")]
    pub count_color: String,
    #[serde(default="default_point_color")]
    pub point_color: String,
    #[serde(default="default_grid_color")]
    pub grid_color: String,
    #[serde(default="default_point_radius")]
    pub point_radius: i32,
    #[serde(default="default_font_size")]
    pub font_size: f32, // in pt
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl Default for RenderStyle {
    fn default()->Self {
        RenderStyle {
            count_color: default_count_color(),
            point_color: default_point_color(),
            grid_color: default_grid_color(),
            point_radius: default_point_radius(),
            font_size: default_font_size(),
            font_path: None,
        }
    }
}

struct Colors {
    count: Rgba<u8>,
    point: Rgba<u8>,
    grid: Rgba<u8>,
}

struct Label {
    font: FontVec,
    scale: PxScale,
}

fn load_label_font (style: &RenderStyle)->Result<Option<Label>> {
    let path = match &style.font_path {
        Some(path) => Some( path.clone()),
        None => DEFAULT_FONT_PATHS.iter().map( PathBuf::from).find( |p| p.is_file())
    };

    if let Some(path) = path {
        let data = fs::read( &path).map_err( |e| rendering_error!("cannot read font {:?}: {}", path, e))?;
        let font = FontVec::try_from_vec( data).map_err( |e| rendering_error!("invalid font {:?}: {}", path, e))?;
        let scale = font.pt_to_px_scale( style.font_size).ok_or( rendering_error!("invalid font size {}", style.font_size))?;
        debug!("using label font {:?}", path);
        Ok( Some( Label { font, scale }) )
    } else {
        warn!("no label font found, rendering maps without text");
        Ok(None)
    }
}

/// renders [`DayFrame`]s onto a background map and saves them as `<frames_dir>/<YYYY-MM-DD>.png`.
///
/// Pixel coordinates grow northwards, image rows grow southwards. The renderer resolves this once
/// when it is created by computing the row positions of all grid edges, and converts hotspot and cell
/// positions with the same row mapping
pub struct MapRenderer {
    background: RgbaImage,
    pixels: PixelSpace,
    grid: Grid,
    edge_cols: Vec<f32>,
    edge_rows: Vec<f32>,
    colors: Colors,
    point_radius: i32,
    label: Option<Label>,
    frames_dir: PathBuf,
    writer: Box<dyn ImageWriter>,
    frames: Vec<PathBuf>,
}

impl MapRenderer {
    /// create a renderer for the background map `<graphics_dir>/<map_name>` of the region
    pub fn open (params: &AnalysisParameters, map_name: &str, style: &RenderStyle)->Result<Self> {
        let path = params.background_path( map_name);
        let img = image::open( &path).map_err( |e| rendering_error!("cannot load background map {:?}: {}", path, e))?;
        debug!("loaded background map {:?} ({}x{})", path, img.width(), img.height());

        Self::new( img.to_rgba8(), params, style, params.frames_dir())
    }

    pub fn new (background: RgbaImage, params: &AnalysisParameters, style: &RenderStyle, frames_dir: impl AsRef<Path>)->Result<Self> {
        let (width,height) = background.dimensions();
        if width == 0 || height == 0 {
            return Err( rendering_error!("empty background image"))
        }

        let pixels = PixelSpace::for_params( params, width, height)?;
        let grid = Grid::for_params( params)?;
        let (lon_px, lat_px) = pixels.edges_to_pixels( &grid);
        let edge_cols: Vec<f32> = lon_px.iter().map( |x| *x as f32).collect();
        let edge_rows: Vec<f32> = lat_px.iter().map( |y| to_row( height, *y)).collect();

        let colors = Colors {
            count: rgba( &style.count_color)?,
            point: rgba( &style.point_color)?,
            grid: rgba( &style.grid_color)?,
        };
        let label = load_label_font( style)?;

        let frames_dir = frames_dir.as_ref().to_path_buf();
        ensure_writable_dir( &frames_dir)?;

        Ok( MapRenderer {
            background, pixels, grid, edge_cols, edge_rows, colors,
            point_radius: style.point_radius,
            label, frames_dir,
            writer: Box::new( PngImageWriter),
            frames: Vec::new()
        })
    }

    pub fn with_writer (mut self, writer: Box<dyn ImageWriter>)->Self {
        self.writer = writer;
        self
    }

    /// the pixel space of the background map, which is what the [`crate::driver::DailyCounter`] needs
    pub fn pixel_space (&self)->PixelSpace { self.pixels }

    pub fn frames_dir (&self)->&Path { &self.frames_dir }

    /// the frames rendered so far, in rendering order
    pub fn frames (&self)->&[PathBuf] { &self.frames }

    pub fn frame_path (&self, frame: &DayFrame<'_>)->PathBuf {
        self.frames_dir.join( format!("{}.png", iso_date_string( &frame.date)))
    }

    /// render and save one frame, returning the path of the saved image
    pub fn render_day (&self, frame: &DayFrame<'_>)->Result<PathBuf> {
        if frame.lon_px.len() != frame.lat_px.len() {
            return Err( rendering_error!("mismatched pixel coordinates for {}", frame.date))
        }

        let mut canvas = Canvas::new( self);
        canvas.draw_grid();
        canvas.draw_hotspots( &frame.lon_px, &frame.lat_px);
        canvas.draw_counts( frame);
        canvas.draw_title( frame);

        let path = self.frame_path( frame);
        canvas.save( &path)?;
        Ok(path)
    }
}

impl DaySink for MapRenderer {
    fn accept_day (&mut self, frame: &DayFrame<'_>)->Result<()> {
        let path = self.render_day( frame)?;
        debug!("saved frame {:?}", path);
        self.frames.push( path);
        Ok(())
    }
}

#[inline]
fn to_row (height: u32, y_px: f64)->f32 {
    (height as f64 - y_px) as f32
}

/// the drawing surface of a single frame. It owns a copy of the background which is dropped with the
/// canvas, on success and failure alike
struct Canvas<'a> {
    img: RgbaImage,
    renderer: &'a MapRenderer,
}

impl<'a> Canvas<'a> {
    fn new (renderer: &'a MapRenderer)->Self {
        Canvas { img: renderer.background.clone(), renderer }
    }

    fn height (&self)->u32 { self.img.height() }

    fn draw_grid (&mut self) {
        let r = self.renderer;
        let color = r.colors.grid;
        let (x0, x1) = (r.edge_cols[0], r.edge_cols[r.edge_cols.len()-1]);
        let (y0, y1) = (r.edge_rows[0], r.edge_rows[r.edge_rows.len()-1]);

        for x in &r.edge_cols {
            draw_dashed_line( &mut self.img, (*x, y0), (*x, y1), color);
        }
        for y in &r.edge_rows {
            draw_dashed_line( &mut self.img, (x0, *y), (x1, *y), color);
        }
    }

    fn draw_hotspots (&mut self, lon_px: &[f64], lat_px: &[f64]) {
        let h = self.height();
        let color = self.renderer.colors.point;
        let radius = self.renderer.point_radius;

        for (x,y) in lon_px.iter().zip( lat_px.iter()) {
            let center = (x.round() as i32, to_row( h, *y).round() as i32);
            draw_filled_circle_mut( &mut self.img, center, radius, color);
        }
    }

    fn draw_counts (&mut self, frame: &DayFrame<'_>) {
        let r = self.renderer;
        let Some(label) = &r.label else { return };
        let h = self.height();

        for ((i,j),count) in frame.counts.indexed_iter() {
            if *count == 0 { continue }

            let (lon,lat) = r.grid.cell_center( i, j);
            let (x,y) = r.pixels.to_pixel( lon, lat);
            let text = count.to_string();
            let (tw,th) = text_size( label.scale, &label.font, &text);

            let tx = x.round() as i32 - (tw as i32 / 2);
            let ty = to_row( h, y).round() as i32 - (th as i32 / 2);
            draw_text_mut( &mut self.img, r.colors.count, tx, ty, label.scale, &label.font, &text);
        }
    }

    fn draw_title (&mut self, frame: &DayFrame<'_>) {
        let r = self.renderer;
        let Some(label) = &r.label else { return };

        let text = format!("{}   total hotspots: {}", iso_date_string( &frame.date), frame.total);
        draw_text_mut( &mut self.img, r.colors.grid, 5, 5, label.scale, &label.font, &text);
    }

    fn save (self, path: &Path)->Result<()> {
        self.renderer.writer.write_image( &self.img, path)
    }
}

fn draw_dashed_line (img: &mut RgbaImage, start: (f32,f32), end: (f32,f32), color: Rgba<u8>) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let len = (dx*dx + dy*dy).sqrt();
    if len == 0.0 { return }

    let (ux, uy) = (dx / len, dy / len);
    let mut d = 0.0;
    while d < len {
        let e = (d + DASH_LEN).min( len);
        draw_line_segment_mut( img, (start.0 + ux*d, start.1 + uy*d), (start.0 + ux*e, start.1 + uy*e), color);
        d += DASH_LEN + GAP_LEN;
    }
}

