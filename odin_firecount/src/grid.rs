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

//! regular lon/lat grids and per-cell hotspot counts
//!
//! Cells are closed intervals on both axes, i.e. an observation that lies exactly on an edge is
//! counted in every cell that shares this edge (two cells for a plain edge, four cells for a
//! grid corner). Daily totals therefore can exceed the number of observations if points are on
//! edges. This is a known property of the counts we produce and has to be kept in mind when
//! comparing totals.

use std::ops::Range;
use ndarray::Array2;

use odin_common::round_to_decimals;
use crate::{observation::Observation, region::AnalysisParameters, errors::{OdinFireCountError, Result}};

/// decimals we round computed edge coordinates to
pub const EDGE_DECIMALS: i32 = 3;

/// upper bound for the number of edges of one grid axis
pub const MAX_EDGES: usize = 100_000;

/// per cell counts, indexed as `[lon_cell, lat_cell]`. The shape is the number of cells (not edges)
pub type CountMatrix = Array2<u32>;

/// compute the edges of one grid axis. This starts at `min` and adds `step` increments up to but
/// excluding `max + step`, rounding each value to [`EDGE_DECIMALS`]. The extra step ensures we do not
/// lose the last cell to floating point truncation of the span, which means the last edge can lie
/// (slightly) beyond `max`
pub fn grid_edges (min: f64, max: f64, step: f64)->Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        return Err( OdinFireCountError::EmptyGrid( format!("invalid grid step {}", step)))
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err( OdinFireCountError::EmptyGrid( format!("invalid grid bounds [{},{}]", min, max)))
    }
    // smaller steps cannot produce distinct edges after rounding
    if step < 0.5 * 10f64.powi( -EDGE_DECIMALS) {
        return Err( OdinFireCountError::EmptyGrid( format!("step {} below edge resolution", step)))
    }

    let stop = max + step;
    let n = ((stop - min) / step).ceil();
    if n > MAX_EDGES as f64 {
        return Err( OdinFireCountError::EmptyGrid( format!("more than {} edges for [{},{}] with step {}", MAX_EDGES, min, max, step)))
    }
    let n = if n > 0.0 { n as usize } else { 0 };

    let edges: Vec<f64> = (0..n).map( |i| round_to_decimals( min + (i as f64) * step, EDGE_DECIMALS)).collect();

    if edges.len() < 2 {
        return Err( OdinFireCountError::EmptyGrid( format!("less than 2 edges for [{},{}] with step {}", min, max, step)))
    }
    if edges.windows(2).any( |w| w[1] <= w[0]) {
        return Err( OdinFireCountError::EmptyGrid( format!("step {} below edge resolution for [{},{}]", step, min, max)))
    }

    Ok(edges)
}

/// the indices of all cells of an axis whose closed interval `[edges[i],edges[i+1]]` contains `v`.
/// This is empty if `v` is outside of the edges (or NaN), has one element if `v` is between edges
/// and two elements if `v` lies exactly on an inner edge
pub fn covering_cells (edges: &[f64], v: f64)->Range<usize> {
    let n = edges.len();
    if n < 2 { return 0..0 }

    let lo = edges[1..].partition_point( |e| *e < v);
    let hi = edges[..n-1].partition_point( |e| *e <= v);
    if lo < hi { lo..hi } else { 0..0 }
}

/// a regular lon/lat grid
#[derive(Debug,Clone,PartialEq)]
pub struct Grid {
    lon_edges: Vec<f64>,
    lat_edges: Vec<f64>,
}

impl Grid {
    pub fn new (lon_range: &[f64;2], lat_range: &[f64;2], step: f64)->Result<Self> {
        let lon_edges = grid_edges( lon_range[0], lon_range[1], step)?;
        let lat_edges = grid_edges( lat_range[0], lat_range[1], step)?;
        Ok( Grid { lon_edges, lat_edges } )
    }

    pub fn for_params (params: &AnalysisParameters)->Result<Self> {
        Self::new( &params.lon_range, &params.lat_range, params.grid_step)
    }

    /// build a grid from explicit edges, which have to be strictly increasing with at least 2 values per axis
    pub fn from_edges (lon_edges: Vec<f64>, lat_edges: Vec<f64>)->Result<Self> {
        for (axis,edges) in [("longitude", &lon_edges), ("latitude", &lat_edges)] {
            if edges.len() < 2 || edges.windows(2).any( |w| !(w[1] > w[0])) {
                return Err( OdinFireCountError::EmptyGrid( format!("invalid {} edges {:?}", axis, edges)))
            }
        }
        Ok( Grid { lon_edges, lat_edges } )
    }

    #[inline] pub fn lon_edges (&self)->&[f64] { &self.lon_edges }
    #[inline] pub fn lat_edges (&self)->&[f64] { &self.lat_edges }

    #[inline] pub fn n_lon_cells (&self)->usize { self.lon_edges.len() - 1 }
    #[inline] pub fn n_lat_cells (&self)->usize { self.lat_edges.len() - 1 }

    /// geographic center (lon,lat) of cell [i,j]
    pub fn cell_center (&self, i: usize, j: usize)->(f64,f64) {
        ( (self.lon_edges[i] + self.lon_edges[i+1]) / 2.0, (self.lat_edges[j] + self.lat_edges[j+1]) / 2.0 )
    }

    /// is the point within the closed outer bounds of the grid
    pub fn covers (&self, lon: f64, lat: f64)->bool {
        !covering_cells( &self.lon_edges, lon).is_empty() && !covering_cells( &self.lat_edges, lat).is_empty()
    }

    pub fn empty_counts (&self)->CountMatrix {
        CountMatrix::zeros( (self.n_lon_cells(), self.n_lat_cells()))
    }

    /// count the observations per cell. Each observation is bucketed once, into all cells whose closed
    /// intervals contain it
    pub fn count_per_cell (&self, observations: &[Observation])->CountMatrix {
        let mut counts = self.empty_counts();

        for o in observations {
            let lat_cells = covering_cells( &self.lat_edges, o.latitude);
            if lat_cells.is_empty() { continue }

            for i in covering_cells( &self.lon_edges, o.longitude) {
                for j in lat_cells.clone() {
                    counts[[i,j]] += 1;
                }
            }
        }

        counts
    }
}

/// the sum of all cell counts of a day
pub fn total_for_day (counts: &CountMatrix)->u64 {
    counts.iter().map( |c| *c as u64).sum()
}
