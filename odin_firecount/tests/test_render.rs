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

use std::{fs, io::Cursor, path::Path};
use chrono::NaiveDate;
use image::{AnimationDecoder, Rgba, RgbaImage, codecs::gif::GifDecoder};
use odin_firecount::{
    AnalysisParameters, Confidence, DailyCounter, GifVideoEncoder, MapRenderer, Observation, ObservationSet,
    OdinFireCountError, RenderStyle, RunOptions, animate_frames_dir, create_animation, run_analysis
};
use odin_firecount::render::get_hex_rgb;
use odin_firecount::animation::frame_files;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 128, 0, 255]);

fn ymd (y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

fn background () -> RgbaImage { RgbaImage::from_pixel( 100, 100, GREEN) }

fn unit_params (start: NaiveDate, end: NaiveDate) -> AnalysisParameters {
    AnalysisParameters::new( start, end, [0.0, 1.0], [0.0, 1.0], 1.0)
}

#[test]
fn test_hex_colors() {
    assert_eq!( get_hex_rgb( "ff0000").unwrap(), [255, 0, 0]);
    assert_eq!( get_hex_rgb( "#00ff7f").unwrap(), [0, 255, 127]);
    assert!( matches!( get_hex_rgb( "red"), Err(OdinFireCountError::RenderingError(_))));
}

#[test]
fn test_render_frames() {
    let dir = tempfile::tempdir().unwrap();
    let d = ymd(2021,1,1);
    let params = unit_params( d, ymd(2021,1,2));
    let set = ObservationSet::from_observations( vec![
        Observation::new( d, 0.5, 0.25, Confidence::Nominal), // southern half
        Observation::new( d, 0.2, 0.6, Confidence::Nominal),  // northern half
    ]);

    let frames_dir = dir.path().join("Movie");
    let mut renderer = MapRenderer::new( background(), &params, &RenderStyle::default(), &frames_dir).unwrap();
    let counter = DailyCounter::new( &params, renderer.pixel_space()).unwrap();
    let ledger = counter.run( &set, &mut renderer).unwrap();
    assert_eq!( ledger.len(), 2);

    assert_eq!( renderer.frames().len(), 2);
    assert_eq!( renderer.frames()[0], frames_dir.join("2021-01-01.png"));
    assert_eq!( renderer.frames()[1], frames_dir.join("2021-01-02.png"));

    let img = image::open( &renderer.frames()[0]).unwrap().to_rgba8();
    assert_eq!( img.dimensions(), (100, 100));
    assert_eq!( *img.get_pixel( 50, 75), RED); // north is up
    assert_eq!( *img.get_pixel( 20, 40), RED);
    assert_eq!( *img.get_pixel( 90, 90), GREEN);

    // days without observations still get the background
    let img = image::open( &renderer.frames()[1]).unwrap().to_rgba8();
    assert_eq!( *img.get_pixel( 50, 75), GREEN);
}

#[test]
fn test_missing_background() {
    let dir = tempfile::tempdir().unwrap();
    let mut params = unit_params( ymd(2021,1,1), ymd(2021,1,1));
    params.graphics_dir = dir.path().to_path_buf();

    let res = MapRenderer::open( &params, "map.png", &RenderStyle::default());
    assert!( matches!( res, Err(OdinFireCountError::RenderingError(_))));
}

#[test]
fn test_invalid_style() {
    let dir = tempfile::tempdir().unwrap();
    let params = unit_params( ymd(2021,1,1), ymd(2021,1,1));
    let style = RenderStyle { count_color: "white".to_string(), ..RenderStyle::default() };

    let res = MapRenderer::new( background(), &params, &style, dir.path());
    assert!( matches!( res, Err(OdinFireCountError::RenderingError(_))));
}

fn write_frames (dir: &Path, n: u32) {
    fs::create_dir_all( dir).unwrap();
    for i in 0..n {
        let img = RgbaImage::from_pixel( 20, 10, Rgba([(i * 60) as u8, 0, 0, 255]));
        img.save( dir.join( format!("2020-06-0{}.png", i+1))).unwrap();
    }
    fs::write( dir.join("notes.txt"), "not a frame").unwrap();
}

#[test]
fn test_animation() {
    let dir = tempfile::tempdir().unwrap();
    let frames_dir = dir.path().join("Movie");
    write_frames( &frames_dir, 3);
    assert_eq!( frame_files( &frames_dir).unwrap().len(), 3);

    let path = animate_frames_dir( &frames_dir, dir.path(), "test", 3, true, &GifVideoEncoder::default()).unwrap();
    assert_eq!( path, dir.path().join("test.gif"));

    let data = fs::read( &path).unwrap();
    assert!( data.starts_with( b"GIF89a"));
    let decoder = GifDecoder::new( Cursor::new( data)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!( frames.len(), 3);

    // frames are gone, other files are not
    assert!( frame_files( &frames_dir).unwrap().is_empty());
    assert!( frames_dir.join("notes.txt").is_file());
}

#[test]
fn test_animation_keeps_frames() {
    let dir = tempfile::tempdir().unwrap();
    let frames_dir = dir.path().join("Movie");
    write_frames( &frames_dir, 2);

    animate_frames_dir( &frames_dir, dir.path(), "test", 3, false, &GifVideoEncoder::default()).unwrap();
    assert_eq!( frame_files( &frames_dir).unwrap().len(), 2);
}

#[test]
fn test_animation_of_given_frames() {
    let dir = tempfile::tempdir().unwrap();
    let frames_dir = dir.path().join("Movie");
    write_frames( &frames_dir, 3);

    // only the listed frames are compiled and removed
    let frames = vec![ frames_dir.join("2020-06-02.png"), frames_dir.join("2020-06-03.png")];
    let path = create_animation( &frames, dir.path(), "test", 3, true, &GifVideoEncoder::default()).unwrap();

    let decoder = GifDecoder::new( Cursor::new( fs::read( &path).unwrap())).unwrap();
    assert_eq!( decoder.into_frames().collect_frames().unwrap().len(), 2);
    assert_eq!( frame_files( &frames_dir).unwrap(), vec![ frames_dir.join("2020-06-01.png")]);
}

#[test]
fn test_animation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let frames_dir = dir.path().join("Movie");

    let res = animate_frames_dir( &frames_dir, dir.path(), "test", 3, true, &GifVideoEncoder::default());
    assert!( matches!( res, Err(OdinFireCountError::AnimationError(_))));

    let res = create_animation( &[], dir.path(), "test", 3, true, &GifVideoEncoder::default());
    assert!( matches!( res, Err(OdinFireCountError::AnimationError(_))));

    write_frames( &frames_dir, 1);
    let res = animate_frames_dir( &frames_dir, dir.path(), "test", 0, true, &GifVideoEncoder::default());
    assert!( matches!( res, Err(OdinFireCountError::AnimationError(_))));
    assert_eq!( frame_files( &frames_dir).unwrap().len(), 1); // not removed on failure
}

#[test]
fn test_run_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("Data");
    let graphics_dir = dir.path().join("Graphics");
    fs::create_dir_all( &data_dir).unwrap();
    fs::create_dir_all( &graphics_dir).unwrap();
    fs::copy( "tests/hotspots.csv", data_dir.join("data.csv")).unwrap();
    RgbaImage::from_pixel( 200, 200, GREEN).save( graphics_dir.join("map.png")).unwrap();

    let params = AnalysisParameters::new( ymd(2020,6,3), ymd(2020,6,5), [-61.0, -60.0], [-33.5, -32.5], 0.25)
        .with_locations( Some( &data_dir), None, Some( &graphics_dir));
    let opts = RunOptions { animation_name: "Parana".to_string(), ..RunOptions::default() };

    let summary = run_analysis( &params, &opts).unwrap();

    assert_eq!( summary.ledger_path, data_dir.join("NI.csv"));
    assert_eq!( fs::read_to_string( &summary.ledger_path).unwrap(), "Dates,NI\n2020-06-03,2\n2020-06-04,1\n2020-06-05,2\n");

    for day in ["2020-06-03", "2020-06-04", "2020-06-05"] {
        assert!( data_dir.join("Dates_data").join( format!("{day}.csv")).is_file());
    }

    assert_eq!( summary.animation, Some( graphics_dir.join("Parana.gif")));
    assert!( graphics_dir.join("Parana.gif").is_file());
    assert!( summary.frames.is_empty());
    assert!( frame_files( graphics_dir.join("Movie")).unwrap().is_empty());
}

#[test]
fn test_run_analysis_counts_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy( "tests/hotspots.csv", dir.path().join("data.csv")).unwrap();

    let params = AnalysisParameters::new( ymd(2020,6,3), ymd(2020,6,5), [-61.0, -60.0], [-33.5, -32.5], 0.25)
        .with_locations( Some( dir.path()), None, Some( dir.path()));
    let opts = RunOptions { nominal_only: false, export_days: false, render: false, ..RunOptions::default() };

    let summary = run_analysis( &params, &opts).unwrap();
    assert_eq!( summary.ledger.total_for( ymd(2020,6,3)), Some(4));
    assert!( summary.animation.is_none());
    assert!( !dir.path().join("Dates_data").exists());
}

fn setup_run (root: &Path) -> AnalysisParameters {
    let data_dir = root.join("Data");
    let graphics_dir = root.join("Graphics");
    fs::create_dir_all( &data_dir).unwrap();
    fs::create_dir_all( &graphics_dir).unwrap();
    fs::copy( "tests/hotspots.csv", data_dir.join("data.csv")).unwrap();
    RgbaImage::from_pixel( 200, 200, GREEN).save( graphics_dir.join("map.png")).unwrap();

    AnalysisParameters::new( ymd(2020,6,3), ymd(2020,6,5), [-61.0, -60.0], [-33.5, -32.5], 0.25)
        .with_locations( Some( &data_dir), None, Some( &graphics_dir))
}

#[test]
fn test_run_ignores_frames_of_other_runs() {
    let dir = tempfile::tempdir().unwrap();
    let params = setup_run( dir.path());

    // left over from an earlier run with kept frames
    let old_frame = params.frames_dir().join("2019-01-01.png");
    fs::create_dir_all( params.frames_dir()).unwrap();
    RgbaImage::from_pixel( 200, 200, RED).save( &old_frame).unwrap();

    let summary = run_analysis( &params, &RunOptions::default()).unwrap();
    assert_eq!( summary.ledger.len(), 3);

    let gif = summary.animation.unwrap();
    let decoder = GifDecoder::new( Cursor::new( fs::read( &gif).unwrap())).unwrap();
    assert_eq!( decoder.into_frames().collect_frames().unwrap().len(), 3);

    assert!( old_frame.is_file());
    assert_eq!( frame_files( params.frames_dir()).unwrap(), vec![ old_frame]);
}

#[test]
fn test_failed_run_leaves_no_summary() {
    let dir = tempfile::tempdir().unwrap();
    let params = setup_run( dir.path());
    let opts = RunOptions { fps: 0, ..RunOptions::default() };

    let res = run_analysis( &params, &opts);
    assert!( matches!( res, Err(OdinFireCountError::AnimationError(_))));
    assert!( !params.summary_path().exists());

    // without animation the frame rate does not matter
    let opts = RunOptions { fps: 0, animate: false, ..RunOptions::default() };
    assert!( run_analysis( &params, &opts).is_ok());
    assert!( params.summary_path().is_file());
}
