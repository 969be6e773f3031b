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

//! compiling daily frames into an animation

use std::path::{Path,PathBuf};
use image::{Delay, Frame, codecs::gif::{GifEncoder, Repeat}};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info,debug};

use odin_common::fs::{ensure_writable_dir, filename, matching_files_in_dir, remove_files, set_filepath_contents};
use crate::errors::{OdinFireCountError, Result};

pub const DEFAULT_FPS: u32 = 3;
pub const DEFAULT_ANIMATION_NAME: &'static str = "Fire_Count";

lazy_static! {
    // frames are named by their ISO date, which makes lexicographic order chronological
    static ref FRAME_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}\.png$").unwrap();
}

macro_rules! animation_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinFireCountError::AnimationError( format!( $fmt $(, $arg)* ))
    };
}

/// the abstraction for turning an ordered sequence of still images into an animation
pub trait VideoEncoder {
    /// file extension (without '.') of what we produce
    fn extension (&self)->&str;

    fn compile (&self, frames: &[PathBuf], fps: u32)->Result<Vec<u8>>;
}

/// infinitely looping GIF animations
pub struct GifVideoEncoder {
    pub speed: i32, // 1 (best quality) ..= 30 (fastest)
}

impl Default for GifVideoEncoder {
    fn default()->Self { GifVideoEncoder { speed: 10 } }
}

impl VideoEncoder for GifVideoEncoder {
    fn extension (&self)->&str { "gif" }

    fn compile (&self, frames: &[PathBuf], fps: u32)->Result<Vec<u8>> {
        if fps == 0 {
            return Err( animation_error!("frame rate has to be positive"))
        }
        let delay = Delay::from_numer_denom_ms( 1000, fps);

        let mut buf: Vec<u8> = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed( &mut buf, self.speed);
            encoder.set_repeat( Repeat::Infinite).map_err( |e| animation_error!("{}", e))?;

            for path in frames {
                let img = image::open( path).map_err( |e| animation_error!("cannot read frame {:?}: {}", path, e))?;
                encoder.encode_frame( Frame::from_parts( img.to_rgba8(), 0, 0, delay))
                    .map_err( |e| animation_error!("cannot encode frame {:?}: {}", path, e))?;
            }
        }
        Ok(buf)
    }
}

/// the daily frames in `frames_dir`, in chronological order
pub fn frame_files (frames_dir: impl AsRef<Path>)->Result<Vec<PathBuf>> {
    Ok( matching_files_in_dir( &frames_dir.as_ref(), &FRAME_RE)? )
}

/// compile the given frames (in this order) into `<output_dir>/<name>.<ext>`, optionally removing
/// the frames afterwards. Frames are only removed if the animation was written
pub fn create_animation (frames: &[PathBuf], output_dir: impl AsRef<Path>, name: &str, fps: u32,
                         delete_frames: bool, encoder: &dyn VideoEncoder)->Result<PathBuf> {
    if frames.is_empty() {
        return Err( animation_error!("no frames to compile"))
    }
    debug!("compiling {} frames ({:?} .. {:?}) at {} fps", frames.len(),
           filename( &frames[0]), filename( &frames[frames.len()-1]), fps);

    let data = encoder.compile( frames, fps)?;

    let output_dir = output_dir.as_ref();
    ensure_writable_dir( output_dir)?;
    let path = output_dir.join( format!("{}.{}", name, encoder.extension()));
    set_filepath_contents( &path, &data)?;
    info!("saved animation of {} frames to {:?}", frames.len(), path);

    if delete_frames {
        let n = remove_files( frames)?;
        debug!("removed {} frames", n);
    }

    Ok(path)
}

/// compile all daily frames found in `frames_dir`, in chronological order
pub fn animate_frames_dir (frames_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>, name: &str, fps: u32,
                           delete_frames: bool, encoder: &dyn VideoEncoder)->Result<PathBuf> {
    let frames_dir = frames_dir.as_ref();
    let frames = frame_files( frames_dir)?;
    if frames.is_empty() {
        return Err( animation_error!("no frames in {:?}", frames_dir))
    }
    create_animation( &frames, output_dir, name, fps, delete_frames, encoder)
}
