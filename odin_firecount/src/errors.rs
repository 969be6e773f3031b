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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinFireCountError>;

#[derive(Error,Debug)]
pub enum OdinFireCountError {

    #[error("unknown region {0}")]
    UnknownRegion( String ),

    #[error("invalid analysis parameters {0}")]
    InvalidParameters( String ),

    #[error("data source error {0}")]
    DataSourceError( String ),

    #[error("empty grid {0}")]
    EmptyGrid( String ),

    #[error("degenerate range {0}")]
    DegenerateRange( String ),

    #[error("rendering error {0}")]
    RenderingError( String ),

    #[error("animation error {0}")]
    AnimationError( String ),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("csv error {0}")]
    CsvError( #[from] csv::Error),

    #[error("config RON error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("operation failed {0}")]
    OpFailedError(String),
}

macro_rules! data_source_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinFireCountError::DataSourceError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use data_source_error;

macro_rules! rendering_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinFireCountError::RenderingError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use rendering_error;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinFireCountError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;
