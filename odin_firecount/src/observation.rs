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

//! the hotspot observation store. Observations are read from FIRMS CSV exports (VIIRS or MODIS), which
//! we only access by column name. See https://firms.modaps.eosdis.nasa.gov/ for the data products

use std::{fmt, io, path::Path};
use chrono::NaiveDate;
use serde::{Serialize,Serializer,Deserialize};
use tracing::{info,debug};

use odin_common::{datetime::{de_day, is_between_inclusive, iso_date_string}, fs::existing_file, is_within_closed};
use crate::{region::AnalysisParameters, errors::{data_source_error, Result}};

/// the columns we need from a hotspot CSV file. Column order does not matter, other columns are ignored
pub const REQUIRED_COLUMNS: [&'static str;4] = ["latitude", "longitude", "acq_date", "confidence"];

/// FIRMS detection confidence. VIIRS uses the single char codes below, MODIS uses percentages which
/// we keep as `Other`
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub enum Confidence {
    Nominal,
    High,
    Low,
    Other(String)
}

impl Confidence {
    pub fn from_code (s: &str)->Self {
        match s.trim() {
            "n" => Confidence::Nominal,
            "h" => Confidence::High,
            "l" => Confidence::Low,
            other => Confidence::Other( other.to_string())
        }
    }

    pub fn code (&self)->&str {
        match self {
            Confidence::Nominal => "n",
            Confidence::High => "h",
            Confidence::Low => "l",
            Confidence::Other(s) => s.as_str()
        }
    }

    #[inline] pub fn is_nominal (&self)->bool { *self == Confidence::Nominal }
}

impl fmt::Display for Confidence {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{}", self.code())
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer> (&self, s: S)->std::result::Result<S::Ok, S::Error> {
        s.serialize_str( self.code())
    }
}

/// a single hotspot detection, truncated to day resolution
#[derive(Debug,Clone,PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub longitude: f64,
    pub latitude: f64,
    pub confidence: Confidence,
}

impl Observation {
    pub fn new (date: NaiveDate, longitude: f64, latitude: f64, confidence: Confidence)->Self {
        Observation { date, longitude, latitude, confidence }
    }
}

// raw record as it comes from the CSV file
#[derive(Deserialize,Debug)]
struct RawHotspot {
    latitude: f64,
    longitude: f64,
    #[serde(deserialize_with="de_day")]
    acq_date: NaiveDate,
    confidence: String,
}

// what we write to the per-day export files
#[derive(Serialize)]
struct DayRecord<'a> {
    latitude: f64,
    longitude: f64,
    acq_date: String,
    confidence: &'a Confidence,
}

/// an ordered set of observations. The set is kept sorted by date (stable, i.e. observations of the
/// same day keep their input order) so that we can look up days by binary search.
/// Filters consume and narrow the set in place
#[derive(Debug,Clone,Default,PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>
}

impl ObservationSet {
    pub fn from_observations (mut observations: Vec<Observation>)->Self {
        observations.sort_by_key( |o| o.date);
        ObservationSet { observations }
    }

    /// load the unfiltered data file configured in the parameters
    pub fn load (params: &AnalysisParameters)->Result<Self> {
        Self::from_path( params.data_path())
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let file = existing_file(path).map_err( |e| data_source_error!("cannot open {:?}: {}", path, e))?;
        let set = Self::from_reader( file)?;
        info!("loaded {} hotspots from {:?}", set.len(), path);
        Ok(set)
    }

    pub fn from_reader (reader: impl io::Read)->Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim( csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err( |e| data_source_error!("cannot read header: {}", e))?.clone();
        for col in REQUIRED_COLUMNS {
            if !headers.iter().any( |h| h == col) {
                return Err( data_source_error!("missing column '{}'", col))
            }
        }

        let mut observations: Vec<Observation> = Vec::new();
        for (i,res) in csv_reader.deserialize::<RawHotspot>().enumerate() {
            let raw = res.map_err( |e| data_source_error!("malformed record {}: {}", i+1, e))?;
            observations.push( Observation::new( raw.acq_date, raw.longitude, raw.latitude, Confidence::from_code( &raw.confidence)));
        }

        Ok( Self::from_observations( observations) )
    }

    /// the load pipeline of an analysis run: read the configured data file, narrow it to the
    /// analysis period and bounding box and (optionally) to nominal confidence detections
    pub fn prepare (params: &AnalysisParameters, nominal_only: bool)->Result<Self> {
        let set = Self::load(params)?
            .filter_by_period( params.period_start, params.period_end);
        debug!("{} hotspots within period", set.len());

        let set = set.filter_by_bounds( &params.lon_range, &params.lat_range);
        debug!("{} hotspots within bounds", set.len());

        let set = set.filter_by_confidence( nominal_only);
        info!("{} hotspots selected for {} .. {}", set.len(), params.period_start, params.period_end);
        Ok(set)
    }

    /// retain observations with `start <= date <= end`
    pub fn filter_by_period (mut self, start: NaiveDate, end: NaiveDate)->Self {
        self.observations.retain( |o| is_between_inclusive( &o.date, &start, &end));
        self
    }

    /// retain observations within the closed lon and lat intervals
    pub fn filter_by_bounds (mut self, lon_range: &[f64;2], lat_range: &[f64;2])->Self {
        self.observations.retain( |o| {
            is_within_closed( o.longitude, lon_range[0], lon_range[1]) && is_within_closed( o.latitude, lat_range[0], lat_range[1])
        });
        self
    }

    /// retain only nominal confidence observations if `nominal_only` is set
    pub fn filter_by_confidence (mut self, nominal_only: bool)->Self {
        if nominal_only {
            self.observations.retain( |o| o.confidence.is_nominal());
        }
        self
    }

    /// the observations of a given day as a new set
    pub fn select_by_day (&self, day: NaiveDate)->ObservationSet {
        ObservationSet { observations: self.day_slice(day).to_vec() }
    }

    /// the observations of a given day, without copying
    pub fn day_slice (&self, day: NaiveDate)->&[Observation] {
        let lo = self.observations.partition_point( |o| o.date < day);
        let hi = self.observations.partition_point( |o| o.date <= day);
        &self.observations[lo..hi]
    }

    pub fn iter (&self)->impl Iterator<Item=&Observation> { self.observations.iter() }
    pub fn as_slice (&self)->&[Observation] { self.observations.as_slice() }
    pub fn len (&self)->usize { self.observations.len() }
    pub fn is_empty (&self)->bool { self.observations.is_empty() }
}

/// write observations (usually of one day) as CSV. We always write the header so that empty days
/// still produce a well formed file
pub fn write_day_csv (observations: &[Observation], path: impl AsRef<Path>)->Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path( path.as_ref())?;

    writer.write_record( &REQUIRED_COLUMNS)?;
    for o in observations {
        writer.serialize( DayRecord {
            latitude: o.latitude,
            longitude: o.longitude,
            acq_date: iso_date_string( &o.date),
            confidence: &o.confidence
        })?;
    }
    writer.flush()?;
    Ok(())
}
