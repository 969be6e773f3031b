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

use std::path::{Path,PathBuf};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use odin_common::{define_cli, check_cli};
use odin_firecount::{RegionRegistry, RunOptions, run_analysis};

define_cli! { ARGS [about="count daily satellite hotspots per grid cell of a region and render daily maps"] =
    regions: Option<String> [help="RON file with region definitions (default is builtin regions)", long],
    options: Option<String> [help="RON file with run options", long],
    data_dir: Option<String> [help="directory of the hotspot data file", long],
    data_file: Option<String> [help="name of the hotspot data file within the data dir", long],
    graphics_dir: Option<String> [help="directory of the background map and generated graphics", long],
    all_confidence: bool [help="count all detections, not only nominal confidence", long],
    no_export: bool [help="do not export the selected detections of each day", long],
    no_render: bool [help="only compute counts, do not render maps", long],
    no_animation: bool [help="do not compile daily maps into an animation", long],
    keep_frames: bool [help="keep daily maps after compiling the animation", long],
    fps: Option<u32> [help="animation frames per second", long],
    map: Option<String> [help="file name of the background map within the graphics dir", long],
    font: Option<String> [help="path of TTF font to use for map labels", long],
    color: Option<String> [help="hex color of cell count labels", long],
    name: Option<String> [help="name of animation file (without extension)", long],
    list: bool [help="list known region ids and exit", long],
    region: Option<String> [help="id of region to analyze"]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let registry = match &ARGS.regions {
        Some(path) => RegionRegistry::from_ron_file( path)?,
        None => RegionRegistry::builtin()
    };

    if ARGS.list {
        for id in registry.region_ids() { println!("{}", id) }
        return Ok(())
    }

    let Some(region) = &ARGS.region else {
        anyhow::bail!("no region id given, use --list to show known regions")
    };

    let params = registry.lookup( region)?.with_locations(
        ARGS.data_dir.as_ref().map( Path::new),
        ARGS.data_file.as_deref(),
        ARGS.graphics_dir.as_ref().map( Path::new)
    );

    let opts = run_options()?;
    let summary = run_analysis( &params, &opts)?;

    println!("{} days processed, daily totals in {:?}", summary.ledger.len(), summary.ledger_path);
    if let Some(path) = &summary.animation {
        println!("animation saved to {:?}", path);
    }

    Ok(())
}

fn run_options ()->Result<RunOptions> {
    let mut opts = match &ARGS.options {
        Some(path) => RunOptions::from_ron_file( path)?,
        None => RunOptions::default()
    };

    if ARGS.all_confidence { opts.nominal_only = false }
    if ARGS.no_export { opts.export_days = false }
    if ARGS.no_render { opts.render = false }
    if ARGS.no_animation { opts.animate = false }
    if ARGS.keep_frames { opts.delete_frames = false }
    if let Some(fps) = ARGS.fps { opts.fps = fps }
    if let Some(map) = &ARGS.map { opts.map_name = map.clone() }
    if let Some(font) = &ARGS.font { opts.style.font_path = Some( PathBuf::from(font)) }
    if let Some(color) = &ARGS.color { opts.style.count_color = color.clone() }
    if let Some(name) = &ARGS.name { opts.animation_name = name.clone() }

    Ok(opts)
}
