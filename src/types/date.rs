// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::NaiveDate;
use serde::Serialize;
use serde::Serializer;

use crate::error::Fallible;

const FORMAT: &str = "%Y-%m-%d";

/// A calendar day, with no time of day or offset attached.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// The day before this one. `None` only at the start of chrono's range.
    pub fn yesterday(self) -> Option<Date> {
        self.0.pred_opt().map(Date)
    }

    pub fn parse(s: &str) -> Fallible<Self> {
        let date = NaiveDate::parse_from_str(s.trim(), FORMAT)?;
        Ok(Self(date))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let date = ymd(2024, 3, 9);
        assert_eq!(date.to_string(), "2024-03-09");
        assert_eq!(Date::parse("2024-03-09")?, date);
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Date::parse("Sat Mar 09 2024").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn test_yesterday_crosses_month_and_year() {
        assert_eq!(ymd(2024, 3, 1).yesterday(), Some(ymd(2024, 2, 29)));
        assert_eq!(ymd(2025, 1, 1).yesterday(), Some(ymd(2024, 12, 31)));
    }

    /// Days around a daylight-saving change are still exactly one apart.
    #[test]
    fn test_yesterday_across_dst_change() {
        assert_eq!(ymd(2024, 3, 11).yesterday(), Some(ymd(2024, 3, 10)));
        assert_eq!(ymd(2024, 10, 28).yesterday(), Some(ymd(2024, 10, 27)));
    }
}
