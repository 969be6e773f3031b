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

use chrono::NaiveDate;
use odin_firecount::{Confidence, Grid, Observation, OdinFireCountError, total_for_day};
use odin_firecount::grid::{grid_edges, covering_cells};

fn ymd (y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

fn obs (lon: f64, lat: f64) -> Observation {
    Observation::new( ymd(2020,6,3), lon, lat, Confidence::Nominal)
}

#[test]
fn test_unit_edges() {
    let edges = grid_edges( 0.0, 1.0, 0.25).unwrap();
    assert_eq!( edges, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

    let grid = Grid::new( &[0.0,1.0], &[0.0,1.0], 0.25).unwrap();
    assert_eq!( grid.n_lon_cells(), 4);
    assert_eq!( grid.n_lat_cells(), 4);
    assert_eq!( grid.empty_counts().dim(), (4,4));
}

#[test]
fn test_fine_edges() {
    // 0.05 steps accumulate floating point errors which have to be rounded away
    let lon = grid_edges( -60.25, -60.0, 0.05).unwrap();
    assert_eq!( lon, vec![-60.25, -60.2, -60.15, -60.1, -60.05, -60.0]);

    let lat = grid_edges( -33.25, -33.0, 0.05).unwrap();
    assert_eq!( lat, vec![-33.25, -33.2, -33.15, -33.1, -33.05, -33.0]);
}

#[test]
fn test_edges_past_max() {
    // a step that does not divide the span produces a last edge beyond max
    let edges = grid_edges( 0.0, 1.0, 0.3).unwrap();
    assert_eq!( edges, vec![0.0, 0.3, 0.6, 0.9, 1.2]);

    let edges = grid_edges( 0.0, 1.0, 2.0).unwrap();
    assert_eq!( edges, vec![0.0, 2.0]);
}

#[test]
fn test_empty_grid() {
    assert!( matches!( grid_edges( 0.0, 1.0, 0.0), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( grid_edges( 0.0, 1.0, -0.25), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( grid_edges( 1.0, 0.0, 0.25), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( grid_edges( 0.0, 1.0, 0.0001), Err(OdinFireCountError::EmptyGrid(_)))); // below edge resolution
    assert!( matches!( grid_edges( 0.0, 1.0, 1e-12), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( grid_edges( -1e9, 1e9, 0.25), Err(OdinFireCountError::EmptyGrid(_)))); // too many edges
    assert!( matches!( Grid::new( &[0.0,1.0], &[0.0,1.0], 1e-12), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( Grid::from_edges( vec![0.0], vec![0.0,1.0]), Err(OdinFireCountError::EmptyGrid(_))));
    assert!( matches!( Grid::from_edges( vec![0.0,1.0,1.0], vec![0.0,1.0]), Err(OdinFireCountError::EmptyGrid(_))));
}

#[test]
fn test_covering_cells() {
    let edges = [0.0, 1.0, 2.0, 3.0];
    assert_eq!( covering_cells( &edges, 0.5), 0..1);
    assert_eq!( covering_cells( &edges, 1.0), 0..2); // shared edge
    assert_eq!( covering_cells( &edges, 0.0), 0..1); // outer edges are inclusive
    assert_eq!( covering_cells( &edges, 3.0), 2..3);
    assert!( covering_cells( &edges, -0.1).is_empty());
    assert!( covering_cells( &edges, 3.1).is_empty());
    assert!( covering_cells( &edges, f64::NAN).is_empty());
}

#[test]
fn test_single_cell_count() {
    let grid = Grid::new( &[0.0,1.0], &[0.0,1.0], 0.25).unwrap();
    let counts = grid.count_per_cell( &[obs(0.1, 0.6)]);

    assert_eq!( counts[[0,2]], 1);
    assert_eq!( total_for_day( &counts), 1);
}

#[test]
fn test_shared_edge_double_counting() {
    let grid = Grid::new( &[0.0,1.0], &[0.0,1.0], 0.25).unwrap();

    // on a lon edge between two cells
    let counts = grid.count_per_cell( &[obs(0.5, 0.1)]);
    assert_eq!( counts[[1,0]], 1);
    assert_eq!( counts[[2,0]], 1);
    assert_eq!( total_for_day( &counts), 2);

    // on an inner grid corner
    let counts = grid.count_per_cell( &[obs(0.5, 0.5)]);
    for (i,j) in [(1,1),(1,2),(2,1),(2,2)] {
        assert_eq!( counts[[i,j]], 1);
    }
    assert_eq!( total_for_day( &counts), 4);

    // on the outer corner only one cell is touched
    let counts = grid.count_per_cell( &[obs(1.0, 1.0)]);
    assert_eq!( counts[[3,3]], 1);
    assert_eq!( total_for_day( &counts), 1);
}

#[test]
fn test_outside_points_are_ignored() {
    let grid = Grid::new( &[0.0,1.0], &[0.0,1.0], 0.25).unwrap();
    let counts = grid.count_per_cell( &[obs(-0.5, 0.5), obs(0.5, 1.5)]);
    assert_eq!( total_for_day( &counts), 0);
    assert!( !grid.covers( -0.5, 0.5));
    assert!( grid.covers( 0.0, 1.0));
}

#[test]
fn test_counts_match_cell_scan() {
    let grid = Grid::new( &[-61.0,-60.0], &[-33.5,-32.5], 0.25).unwrap();

    // deterministic pseudo random points, with some on edges
    let mut pts: Vec<Observation> = Vec::new();
    let mut seed: u64 = 42;
    for _ in 0..500 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let u = (seed >> 11) as f64 / (1u64 << 53) as f64;
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let v = (seed >> 11) as f64 / (1u64 << 53) as f64;
        pts.push( obs( -61.0 + u, -33.5 + v));
    }
    pts.push( obs( -60.5, -33.0));
    pts.push( obs( -60.75, -32.8));

    let counts = grid.count_per_cell( &pts);

    let lon = grid.lon_edges();
    let lat = grid.lat_edges();
    for i in 0..grid.n_lon_cells() {
        for j in 0..grid.n_lat_cells() {
            let n = pts.iter().filter( |o| {
                o.longitude >= lon[i] && o.longitude <= lon[i+1] && o.latitude >= lat[j] && o.latitude <= lat[j+1]
            }).count() as u32;
            assert_eq!( counts[[i,j]], n, "cell [{},{}]", i, j);
        }
    }

    // without edge points every observation is counted exactly once
    let inner: Vec<Observation> = pts.iter().filter( |o| {
        !lon.contains( &o.longitude) && !lat.contains( &o.latitude)
    }).cloned().collect();
    assert_eq!( total_for_day( &grid.count_per_cell( &inner)), inner.len() as u64);
}

#[test]
fn test_cell_center() {
    let grid = Grid::new( &[0.0,1.0], &[0.0,1.0], 0.25).unwrap();
    assert_eq!( grid.cell_center( 0, 3), (0.125, 0.875));
}
