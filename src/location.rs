/*
MIT License
Copyright (c) the clearsky contributors
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::turbidity::TurbidityGrid;
use crate::Float;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A Location
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// The name of the site (e.g., the city)
    pub name: String,

    /// The Latitude in Degrees.
    ///
    /// South is negative, North is Positive.
    pub latitude: Float,

    /// The Longitude in Degrees.
    ///
    /// West is Negative, East is Positive
    pub longitude: Float,

    /// The Timezone of the location (GMT)
    pub timezone: i8,

    /// The altitude of the site, in meters
    pub altitude: Float,
}

impl Location {
    /// Builds a new [`Location`], checking that latitude and longitude are
    /// within range.
    pub fn new(
        name: String,
        latitude: Float,
        longitude: Float,
        timezone: i8,
        altitude: Float,
    ) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!(
                "latitude should be between -90 and 90 degrees... found {}",
                latitude
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!(
                "longitude should be between -180 and 180 degrees... found {}",
                longitude
            ));
        }
        Ok(Self {
            name,
            latitude,
            longitude,
            timezone,
            altitude,
        })
    }

    /// Linke turbidity at this location, for each timestamp.
    pub fn lookup_turbidity(
        &self,
        grid: &TurbidityGrid,
        times: &[NaiveDateTime],
        interp: bool,
    ) -> Result<Vec<Float>, String> {
        grid.lookup(times, self.latitude, self.longitude, interp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert!(Location::new("x".into(), -33.4, -70.6, -4, 520.).is_ok());
        assert!(Location::new("x".into(), -91., 0., 0, 0.).is_err());
        assert!(Location::new("x".into(), 0., 200., 0, 0.).is_err());
    }

    #[test]
    fn test_lookup_turbidity() {
        let grid = TurbidityGrid::new(vec![3.0; 2 * 2 * 12], 2, 2).unwrap();
        let loc = Location::new("x".into(), 45., 10., 1, 0.).unwrap();
        let times = [chrono::NaiveDate::from_ymd_opt(2023, 7, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()];
        let tl = loc.lookup_turbidity(&grid, &times, true).unwrap();
        assert_eq!(tl, vec![3.0]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let loc = Location::new("Santiago".into(), -33.4, -70.6, -4, 520.).unwrap();
        let json = serde_json::to_string(&loc).unwrap();
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, back);
    }
}
