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

//! registry of named analysis regions. Each region defines the period, the bounding box and the grid
//! resolution of one analysis run, plus where to find input data and where to put generated graphics

use std::{collections::HashMap, path::{Path,PathBuf}};
use chrono::NaiveDate;
use serde::{Serialize,Deserialize};
use lazy_static::lazy_static;

use odin_common::fs::filepath_contents_as_string;
use crate::errors::{OdinFireCountError, Result};

pub const DEFAULT_DATA_DIR: &'static str = "../Data/";
pub const DEFAULT_DATA_FILE: &'static str = "data.csv";
pub const DEFAULT_GRAPHICS_DIR: &'static str = "../Graphics/";

/// sub directory of the graphics dir that receives the daily frames
pub const FRAMES_SUBDIR: &'static str = "Movie";
/// sub directory of the data dir that receives the per-day observation exports
pub const DAY_DATA_SUBDIR: &'static str = "Dates_data";
/// name of the summary ledger (date, daily total) within the data dir
pub const SUMMARY_FILE: &'static str = "NI.csv";

fn default_data_dir()->PathBuf { PathBuf::from(DEFAULT_DATA_DIR) }
fn default_data_file()->String { DEFAULT_DATA_FILE.to_string() }
fn default_graphics_dir()->PathBuf { PathBuf::from(DEFAULT_GRAPHICS_DIR) }

/// immutable configuration of one analysis run
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct AnalysisParameters {
    pub period_start: NaiveDate, // inclusive
    pub period_end: NaiveDate,   // inclusive
    pub lon_range: [f64;2],      // [west,east] in degrees
    pub lat_range: [f64;2],      // [south,north] in degrees
    pub grid_step: f64,          // cell width and height in degrees

    #[serde(default="default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default="default_data_file")]
    pub data_file: String,
    #[serde(default="default_graphics_dir")]
    pub graphics_dir: PathBuf,
}

impl AnalysisParameters {
    pub fn new (period_start: NaiveDate, period_end: NaiveDate, lon_range: [f64;2], lat_range: [f64;2], grid_step: f64)->Self {
        AnalysisParameters {
            period_start, period_end, lon_range, lat_range, grid_step,
            data_dir: default_data_dir(),
            data_file: default_data_file(),
            graphics_dir: default_graphics_dir()
        }
    }

    /// check the invariants of a parameter set. This is not enforced at construction so that
    /// configs can be deserialized and then reported with all their context
    pub fn validate (&self)->Result<()> {
        if self.period_start > self.period_end {
            return Err( invalid( format!("period start {} after end {}", self.period_start, self.period_end)))
        }
        check_range( "longitude", &self.lon_range)?;
        check_range( "latitude", &self.lat_range)?;
        if !(self.grid_step.is_finite() && self.grid_step > 0.0) {
            return Err( invalid( format!("grid step has to be positive: {}", self.grid_step)))
        }
        Ok(())
    }

    /// override configured locations (e.g. from command line options)
    pub fn with_locations (mut self, data_dir: Option<&Path>, data_file: Option<&str>, graphics_dir: Option<&Path>)->Self {
        if let Some(dir) = data_dir { self.data_dir = dir.to_path_buf() }
        if let Some(file) = data_file { self.data_file = file.to_string() }
        if let Some(dir) = graphics_dir { self.graphics_dir = dir.to_path_buf() }
        self
    }

    pub fn data_path (&self)->PathBuf { self.data_dir.join( &self.data_file) }

    pub fn frames_dir (&self)->PathBuf { self.graphics_dir.join( FRAMES_SUBDIR) }

    pub fn day_data_dir (&self)->PathBuf { self.data_dir.join( DAY_DATA_SUBDIR) }

    pub fn summary_path (&self)->PathBuf { self.data_dir.join( SUMMARY_FILE) }

    pub fn background_path (&self, map_name: &str)->PathBuf { self.graphics_dir.join( map_name) }
}

fn invalid (msg: String)->OdinFireCountError { OdinFireCountError::InvalidParameters(msg) }

fn check_range (axis: &str, range: &[f64;2])->Result<()> {
    if !(range[0].is_finite() && range[1].is_finite()) {
        Err( invalid( format!("non-finite {} range {:?}", axis, range)))
    } else if range[0] >= range[1] {
        Err( invalid( format!("empty {} range {:?}", axis, range)))
    } else {
        Ok(())
    }
}

/* #region registry ***************************************************************************************/

fn day (y: i32, m: u32, d: u32)->NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid builtin region date")
}

lazy_static! {
    static ref BUILTIN_REGIONS: HashMap<String,AnalysisParameters> = {
        let mut map = HashMap::new();
        map.insert( "Parana_2020".to_string(),
            AnalysisParameters::new( day(2020,6,3), day(2020,9,28), [-61.0, -60.0], [-33.5, -32.5], 0.25));
        map.insert( "Parana_2021_May".to_string(),
            AnalysisParameters::new( day(2021,5,1), day(2021,6,1), [-60.75, -60.0], [-33.25, -32.5], 0.25));
        map.insert( "Parana_2021_Jun".to_string(),
            AnalysisParameters::new( day(2021,6,10), day(2021,6,17), [-60.25, -60.0], [-33.25, -33.0], 0.05));
        map.insert( "Nuevo_Leon".to_string(),
            AnalysisParameters::new( day(2021,3,1), day(2021,4,30), [-100.5, -99.5], [24.5, 25.5], 0.25));
        map
    };
}

/// the lookup table for named regions
#[derive(Debug,Clone,Default)]
pub struct RegionRegistry {
    regions: HashMap<String,AnalysisParameters>
}

impl RegionRegistry {
    /// the regions we know about without external configuration
    pub fn builtin ()->Self {
        RegionRegistry { regions: BUILTIN_REGIONS.clone() }
    }

    /// parse a RON map of region ids to [`AnalysisParameters`], e.g.
    /// ```text
    /// {
    ///   "Parana_2020": ( period_start: "2020-06-03", period_end: "2020-09-28",
    ///                    lon_range: (-61.0, -60.0), lat_range: (-33.5, -32.5), grid_step: 0.25 ),
    /// }
    /// ```
    pub fn from_ron_str (src: &str)->Result<Self> {
        let regions: HashMap<String,AnalysisParameters> = ron::from_str(src)?;
        Ok( RegionRegistry { regions } )
    }

    pub fn from_ron_file (path: impl AsRef<Path>)->Result<Self> {
        let src = filepath_contents_as_string( &path.as_ref())?;
        Self::from_ron_str( &src)
    }

    /// get a copy of the parameters for a given region id. Fails if the id is unknown
    pub fn lookup (&self, id: &str)->Result<AnalysisParameters> {
        self.regions.get(id).cloned().ok_or_else( || OdinFireCountError::UnknownRegion( id.to_string()))
    }

    pub fn region_ids (&self)->Vec<&str> {
        let mut ids: Vec<&str> = self.regions.keys().map( |k| k.as_str()).collect();
        ids.sort();
        ids
    }

    pub fn len (&self)->usize { self.regions.len() }
}

/// lookup in the builtin registry
pub fn lookup (id: &str)->Result<AnalysisParameters> {
    RegionRegistry::builtin().lookup(id)
}

/* #endregion registry */
