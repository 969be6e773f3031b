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
#![allow(unused)]

//! daily hotspot counts over regular lon/lat grids.
//!
//! An analysis run takes a named region (period, bounding box, grid step), selects the satellite
//! hotspot detections of that region from a FIRMS CSV export, counts them per grid cell for each
//! day of the period and produces
//!   - a summary ledger with the daily totals (`<data_dir>/NI.csv`)
//!   - optional per-day exports of the selected detections (`<data_dir>/Dates_data/<date>.csv`)
//!   - a rendered map for each day (`<graphics_dir>/Movie/<date>.png`)
//!   - an animation of all daily maps (`<graphics_dir>/<name>.gif`)

use std::path::{Path,PathBuf};
use serde::{Serialize,Deserialize};
use tracing::info;

use odin_common::fs::filepath_contents_as_string;

pub mod errors;
pub mod region;
pub mod observation;
pub mod grid;
pub mod pixel;
pub mod driver;
pub mod render;
pub mod animation;

pub use errors::{OdinFireCountError, Result};
pub use region::{AnalysisParameters, RegionRegistry};
pub use observation::{Confidence, Observation, ObservationSet};
pub use grid::{CountMatrix, Grid, total_for_day};
pub use pixel::{PixelMapper, PixelSpace, to_pixel_space};
pub use driver::{DailyCounter, DayFrame, DaySink, NoOutput, SummaryLedger, analysis_days};
pub use render::{ImageWriter, MapRenderer, PngImageWriter, RenderStyle};
pub use animation::{GifVideoEncoder, VideoEncoder, animate_frames_dir, create_animation};

pub const DEFAULT_MAP_NAME: &'static str = "map.png";

fn default_true()->bool { true }
fn default_map_name()->String { DEFAULT_MAP_NAME.to_string() }
fn default_fps()->u32 { animation::DEFAULT_FPS }
fn default_animation_name()->String { animation::DEFAULT_ANIMATION_NAME.to_string() }

/// what an analysis run produces, and how
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RunOptions {
    /// only count detections with nominal confidence
    #[serde(default="default_true")]
    pub nominal_only: bool,

    /// write the selected detections of each day to the day data dir
    #[serde(default="default_true")]
    pub export_days: bool,

    #[serde(default="default_true")]
    pub render: bool,

    /// file name of the background map within the graphics dir
    #[serde(default="default_map_name")]
    pub map_name: String,

    #[serde(default)]
    pub style: RenderStyle,

    #[serde(default="default_true")]
    pub animate: bool,

    #[serde(default="default_fps")]
    pub fps: u32,

    #[serde(default="default_animation_name")]
    pub animation_name: String,

    /// remove the daily frames once they are compiled into the animation
    #[serde(default="default_true")]
    pub delete_frames: bool,
}

impl Default for RunOptions {
    fn default()->Self {
        RunOptions {
            nominal_only: true,
            export_days: true,
            render: true,
            map_name: default_map_name(),
            style: RenderStyle::default(),
            animate: true,
            fps: default_fps(),
            animation_name: default_animation_name(),
            delete_frames: true,
        }
    }
}

impl RunOptions {
    pub fn from_ron_str (src: &str)->Result<Self> {
        Ok( ron::from_str(src)? )
    }

    pub fn from_ron_file (path: impl AsRef<Path>)->Result<Self> {
        let src = filepath_contents_as_string( &path.as_ref())?;
        Self::from_ron_str( &src)
    }

    /// check option values that would only fail at the end of a run
    pub fn validate (&self)->Result<()> {
        if self.render && self.animate && self.fps == 0 {
            return Err( OdinFireCountError::AnimationError( "frame rate has to be positive".to_string()))
        }
        Ok(())
    }
}

/// the results of an analysis run
#[derive(Debug)]
pub struct RunSummary {
    pub ledger: SummaryLedger,
    pub ledger_path: PathBuf,
    pub frames: Vec<PathBuf>,
    pub animation: Option<PathBuf>,
}

/// the nominal pixel space we count in if there is no background map to render onto
pub const DEFAULT_PIXEL_EXTENT: u32 = 1000;

/// execute a complete analysis run for the given region parameters
pub fn run_analysis (params: &AnalysisParameters, opts: &RunOptions)->Result<RunSummary> {
    params.validate()?;
    opts.validate()?;
    let observations = ObservationSet::prepare( params, opts.nominal_only)?;

    let mut renderer = if opts.render {
        Some( MapRenderer::open( params, &opts.map_name, &opts.style)?)
    } else {
        None
    };

    let pixels = match &renderer {
        Some(r) => r.pixel_space(),
        None => PixelSpace::for_params( params, DEFAULT_PIXEL_EXTENT, DEFAULT_PIXEL_EXTENT)?
    };

    let mut counter = DailyCounter::new( params, pixels)?;
    if opts.export_days {
        counter = counter.with_day_export( params.day_data_dir());
    }

    let ledger = match &mut renderer {
        Some(r) => counter.run( &observations, r)?,
        None => counter.run( &observations, &mut NoOutput)?
    };

    let mut frames: Vec<PathBuf> = renderer.map( |r| r.frames().to_vec()).unwrap_or_default();
    let mut animation = None;
    if opts.animate && !frames.is_empty() {
        let encoder = GifVideoEncoder::default();
        let path = create_animation( &frames, &params.graphics_dir, &opts.animation_name, opts.fps, opts.delete_frames, &encoder)?;
        if opts.delete_frames { frames.clear() }
        animation = Some(path);
    }

    // commit the summary last so that failed runs leave none
    let ledger_path = params.summary_path();
    ledger.write_csv( &ledger_path)?;

    info!("analysis of {} days done", ledger.len());
    Ok( RunSummary { ledger, ledger_path, frames, animation } )
}
