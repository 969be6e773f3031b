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
use serde::Deserialize;
use odin_common::datetime::{days_inclusive, parse_day, iso_date_string, de_day, DayRange};

fn ymd (y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y,m,d).unwrap() }

#[test]
fn test_day_range() {
    let days: Vec<NaiveDate> = DayRange::new( ymd(2020,6,3), ymd(2020,6,5)).collect();
    assert_eq!( days, vec![ymd(2020,6,3), ymd(2020,6,4), ymd(2020,6,5)]);
    assert_eq!( days_inclusive( ymd(2020,6,3), ymd(2020,6,5)), 3);

    // month and leap day boundaries
    let days: Vec<NaiveDate> = DayRange::new( ymd(2020,2,28), ymd(2020,3,1)).collect();
    assert_eq!( days.len(), 3);
    assert_eq!( days[1], ymd(2020,2,29));
}

#[test]
fn test_degenerate_day_range() {
    assert_eq!( DayRange::new( ymd(2021,5,1), ymd(2021,5,1)).count(), 1);
    assert_eq!( DayRange::new( ymd(2021,5,2), ymd(2021,5,1)).count(), 0);
    assert_eq!( days_inclusive( ymd(2021,5,2), ymd(2021,5,1)), 0);
}

#[test]
fn test_parse_day() {
    assert_eq!( parse_day("2020-06-03"), Some(ymd(2020,6,3)));
    assert_eq!( parse_day(" 2020-06-03 "), Some(ymd(2020,6,3)));
    assert_eq!( parse_day("2020-06-03 14:22"), Some(ymd(2020,6,3)));
    assert_eq!( parse_day("2020-06-03T14:22:00Z"), Some(ymd(2020,6,3)));
    assert_eq!( parse_day("2020-13-03"), None);
    assert_eq!( parse_day("06/03/2020"), None);
    assert_eq!( iso_date_string( &ymd(2021,6,1)), "2021-06-01");
}

#[derive(Deserialize)]
struct Dated {
    #[serde(deserialize_with="de_day")]
    date: NaiveDate
}

#[test]
fn test_de_day() {
    let d: Dated = serde_json::from_str(r#"{"date":"2021-03-01 10:00"}"#).unwrap();
    assert_eq!( d.date, ymd(2021,3,1));
    assert!( serde_json::from_str::<Dated>(r#"{"date":"yesterday"}"#).is_err());
}
