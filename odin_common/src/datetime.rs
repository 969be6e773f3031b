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

use chrono::NaiveDate;
use serde::{Serializer,Deserialize,Deserializer,de::{Error as DeError}};

pub const ISO_DATE_FORMAT: &'static str = "%Y-%m-%d";

#[inline]
pub fn is_between_inclusive (d: &NaiveDate, d_start: &NaiveDate, d_end: &NaiveDate) -> bool {
    d >= d_start && d <= d_end
}

/// number of calendar days in the closed interval [start,end] (0 if end is before start)
pub fn days_inclusive (start: NaiveDate, end: NaiveDate) -> usize {
    let n = (end - start).num_days();
    if n < 0 { 0 } else { n as usize + 1 }
}

/// iterator over consecutive calendar days of a closed date interval
#[derive(Debug,Clone)]
pub struct DayRange {
    next: Option<NaiveDate>,
    last: NaiveDate
}

impl DayRange {
    pub fn new (first: NaiveDate, last: NaiveDate) -> Self {
        let next = if first <= last { Some(first) } else { None };
        DayRange { next, last }
    }
}

impl Iterator for DayRange {
    type Item = NaiveDate;

    fn next (&mut self) -> Option<NaiveDate> {
        let d = self.next?;
        self.next = if d < self.last { d.succ_opt() } else { None };
        Some(d)
    }
}

/// parse a calendar day from either a plain `YYYY-MM-DD` spec or from anything that starts with one
/// (e.g. `2020-06-03 14:22` or `2020-06-03T14:22:00Z`). Time parts are truncated
pub fn parse_day (s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str( s, ISO_DATE_FORMAT) {
        return Some(d)
    }

    if s.len() > 10 && s.is_char_boundary(10) {
        let (day,rest) = s.split_at(10);
        if rest.starts_with(|c: char| c == 'T' || c == ' ') {
            return NaiveDate::parse_from_str( day, ISO_DATE_FORMAT).ok()
        }
    }

    None
}

pub fn iso_date_string (d: &NaiveDate) -> String {
    d.format(ISO_DATE_FORMAT).to_string()
}

//--- support for serde

pub fn ser_iso_date<S: Serializer> (d: &NaiveDate, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_str( &iso_date_string(d))
}

pub fn de_day <'a,D>(deserializer: D) -> Result<NaiveDate,D::Error> where D: Deserializer<'a> {
    let s = String::deserialize(deserializer)?;
    parse_day( &s).ok_or_else( || DeError::custom( format!("not a valid date: '{s}'")))
}
