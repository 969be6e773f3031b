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

//! the daily iteration over an analysis period. For each calendar day we select the observations,
//! count them per grid cell, hand the result to a [`DaySink`] (usually the map renderer) and record
//! the daily total in a [`SummaryLedger`]

use std::path::{Path,PathBuf};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info,debug};

use odin_common::{MinMaxAvg, datetime::{DayRange, days_inclusive, iso_date_string, ser_iso_date}, fs::{ensure_dir, ensure_writable_dir, set_filepath_contents}};
use crate::{
    grid::{CountMatrix, Grid, total_for_day}, observation::{Observation, ObservationSet, write_day_csv},
    pixel::PixelSpace, region::AnalysisParameters, errors::{op_failed, Result}
};

/// all calendar days of the closed interval `[start,end]`, in order. Empty if `end < start`
pub fn analysis_days (start: NaiveDate, end: NaiveDate)->Vec<NaiveDate> {
    DayRange::new( start, end).collect()
}

/// everything we know about one day of the analysis period
#[derive(Debug)]
pub struct DayFrame<'a> {
    pub date: NaiveDate,
    pub observations: &'a [Observation],
    pub counts: &'a CountMatrix,
    pub total: u64,
    /// observation longitudes in pixel space, parallel to `observations`
    pub lon_px: Vec<f64>,
    /// observation latitudes in pixel space, parallel to `observations`
    pub lat_px: Vec<f64>,
}

/// the receiver of daily results
pub trait DaySink {
    fn accept_day (&mut self, frame: &DayFrame<'_>)->Result<()>;
}

/// a sink that ignores all days (counting only)
pub struct NoOutput;

impl DaySink for NoOutput {
    fn accept_day (&mut self, _frame: &DayFrame<'_>)->Result<()> { Ok(()) }
}

#[derive(Serialize)]
struct LedgerRow {
    #[serde(rename="Dates", serialize_with="ser_iso_date")]
    date: NaiveDate,
    #[serde(rename="NI")]
    total: u64,
}

/// the ordered (date, daily total) rows of an analysis run, one per calendar day of the period
#[derive(Debug,Clone,Default,PartialEq)]
pub struct SummaryLedger {
    rows: Vec<(NaiveDate,u64)>
}

impl SummaryLedger {
    pub fn new ()->Self { SummaryLedger { rows: Vec::new() } }

    pub fn push (&mut self, date: NaiveDate, total: u64) {
        self.rows.push( (date,total))
    }

    pub fn rows (&self)->&[(NaiveDate,u64)] { &self.rows }
    pub fn len (&self)->usize { self.rows.len() }
    pub fn is_empty (&self)->bool { self.rows.is_empty() }

    pub fn total_for (&self, date: NaiveDate)->Option<u64> {
        self.rows.iter().find( |(d,_)| *d == date).map( |(_,t)| *t)
    }

    /// the ledger as CSV with a `Dates,NI` header row
    pub fn to_csv_bytes (&self)->Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer( Vec::new());
        if self.rows.is_empty() {
            writer.write_record( &["Dates","NI"])?;
        }
        for (date,total) in &self.rows {
            writer.serialize( LedgerRow { date: *date, total: *total })?;
        }
        writer.into_inner().map_err( |e| op_failed!("failed to flush summary ledger: {}", e))
    }

    /// write the ledger to `path`. The file only becomes visible once it is complete
    pub fn write_csv (&self, path: impl AsRef<Path>)->Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() { ensure_dir( dir)? }
        set_filepath_contents( path, &self.to_csv_bytes()?)?;
        info!("saved summary of {} days to {:?}", self.rows.len(), path);
        Ok(())
    }
}

/// the driver of an analysis run
pub struct DailyCounter {
    params: AnalysisParameters,
    grid: Grid,
    pixels: PixelSpace,
    day_data_dir: Option<PathBuf>,
}

impl DailyCounter {
    pub fn new (params: &AnalysisParameters, pixels: PixelSpace)->Result<Self> {
        params.validate()?;
        let grid = Grid::for_params( params)?;
        debug!("grid with {}x{} cells", grid.n_lon_cells(), grid.n_lat_cells());

        Ok( DailyCounter { params: params.clone(), grid, pixels, day_data_dir: None } )
    }

    /// also write the observations of each day as `<dir>/<YYYY-MM-DD>.csv`
    pub fn with_day_export (mut self, dir: impl AsRef<Path>)->Self {
        self.day_data_dir = Some( dir.as_ref().to_path_buf());
        self
    }

    pub fn grid (&self)->&Grid { &self.grid }
    pub fn pixel_space (&self)->&PixelSpace { &self.pixels }
    pub fn params (&self)->&AnalysisParameters { &self.params }

    /// iterate over all days of the analysis period. Days without observations still produce
    /// a frame (and a ledger row with total 0). Any sink or export failure aborts the run
    pub fn run (&self, observations: &ObservationSet, sink: &mut dyn DaySink)->Result<SummaryLedger> {
        if let Some(dir) = &self.day_data_dir {
            ensure_writable_dir( dir)?;
        }

        let n_days = days_inclusive( self.params.period_start, self.params.period_end);
        info!("counting {} hotspots over {} days", observations.len(), n_days);

        let mut ledger = SummaryLedger { rows: Vec::with_capacity( n_days) };
        let mut stats = MinMaxAvg::new();

        for date in DayRange::new( self.params.period_start, self.params.period_end) {
            let day_obs = observations.day_slice( date);

            if let Some(dir) = &self.day_data_dir {
                write_day_csv( day_obs, dir.join( format!("{}.csv", iso_date_string(&date))))?;
            }

            let counts = self.grid.count_per_cell( day_obs);
            let total = total_for_day( &counts);

            let lons: Vec<f64> = day_obs.iter().map( |o| o.longitude).collect();
            let lats: Vec<f64> = day_obs.iter().map( |o| o.latitude).collect();
            let frame = DayFrame {
                date,
                observations: day_obs,
                counts: &counts,
                total,
                lon_px: self.pixels.lon.to_pixels( &lons),
                lat_px: self.pixels.lat.to_pixels( &lats),
            };
            sink.accept_day( &frame)?;

            debug!("{}: {} hotspots, total count {}", date, day_obs.len(), total);
            ledger.push( date, total);
            stats.add( total as f64);
        }

        info!("processed {} days, daily totals min: {}, max: {}, avg: {:.1}", stats.n, stats.min, stats.max, stats.avg);
        Ok(ledger)
    }
}
