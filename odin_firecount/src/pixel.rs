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

//! linear mapping of geographic coordinates into the pixel space of a background image.
//! Pixel coordinates are fractional and axis orientation is preserved, i.e. latitude pixels grow
//! northwards. Flipping into image row order is up to the renderer

use crate::{grid::Grid, region::AnalysisParameters, errors::{OdinFireCountError, Result}};

/// maps one geographic axis `[min,max]` onto `[0,extent]`
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PixelMapper {
    min: f64,
    span: f64,
    extent: f64,
}

impl PixelMapper {
    pub fn new (geo_range: &[f64;2], extent: f64)->Result<Self> {
        let span = geo_range[1] - geo_range[0];
        if span == 0.0 || !span.is_finite() || !extent.is_finite() {
            return Err( OdinFireCountError::DegenerateRange( format!("cannot map {:?} onto {} pixels", geo_range, extent)))
        }
        Ok( PixelMapper { min: geo_range[0], span, extent } )
    }

    /// note we compute the fraction first so that both range ends map exactly onto 0 and extent
    #[inline]
    pub fn to_pixel (&self, v: f64)->f64 {
        ((v - self.min) / self.span) * self.extent
    }

    pub fn to_pixels (&self, values: &[f64])->Vec<f64> {
        values.iter().map( |v| self.to_pixel(*v)).collect()
    }

    #[inline] pub fn extent (&self)->f64 { self.extent }
}

/// translate `values` from `geo_range` into `[0,pixel_extent]`
pub fn to_pixel_space (values: &[f64], geo_range: &[f64;2], pixel_extent: f64)->Result<Vec<f64>> {
    Ok( PixelMapper::new( geo_range, pixel_extent)?.to_pixels( values) )
}

/// the pixel space of a background image covering the analysis bounding box, with longitude mapped
/// onto the image width and latitude onto the image height
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct PixelSpace {
    pub lon: PixelMapper,
    pub lat: PixelMapper,
}

impl PixelSpace {
    pub fn new (lon_range: &[f64;2], lat_range: &[f64;2], width: u32, height: u32)->Result<Self> {
        Ok( PixelSpace {
            lon: PixelMapper::new( lon_range, width as f64)?,
            lat: PixelMapper::new( lat_range, height as f64)?
        })
    }

    pub fn for_params (params: &AnalysisParameters, width: u32, height: u32)->Result<Self> {
        Self::new( &params.lon_range, &params.lat_range, width, height)
    }

    pub fn to_pixel (&self, lon: f64, lat: f64)->(f64,f64) {
        (self.lon.to_pixel(lon), self.lat.to_pixel(lat))
    }

    /// the (lon,lat) grid edges in pixel coordinates
    pub fn edges_to_pixels (&self, grid: &Grid)->(Vec<f64>,Vec<f64>) {
        (self.lon.to_pixels( grid.lon_edges()), self.lat.to_pixels( grid.lat_edges()))
    }
}
