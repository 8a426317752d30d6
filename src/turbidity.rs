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

//! Monthly Linke turbidity climatology.
//!
//! The grid is a plain value injected at construction. Dates are reduced to
//! (month, day) on a fixed 365-day calendar, so a lookup gives the same
//! answer in a leap year as in any other year.

use crate::Float;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Days accumulated before each month on the fixed 365-day calendar.
const CUMULATED_DAYS_BEFORE_MONTH: [u16; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Days in each month on the fixed 365-day calendar.
const DAYS_IN_MONTH: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A global (or regional) grid of monthly Linke turbidity values.
///
/// Rows run from latitude +90 (north) down to -90; columns from longitude
/// -180 (west) to +180 (east); each cell holds the 12 monthly values,
/// January first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurbidityGrid {
    values: Vec<Float>,
    n_lat: usize,
    n_lon: usize,
}

impl TurbidityGrid {
    /// Builds a grid from row-major cell data (`n_lat * n_lon * 12` values,
    /// the 12 monthly values of each cell stored contiguously).
    pub fn new(values: Vec<Float>, n_lat: usize, n_lon: usize) -> Result<Self, String> {
        if n_lat < 2 || n_lon < 2 {
            return Err(format!(
                "a turbidity grid needs at least 2x2 cells... found {}x{}",
                n_lat, n_lon
            ));
        }
        let expected = n_lat * n_lon * 12;
        if values.len() != expected {
            return Err(format!(
                "a {}x{} turbidity grid needs {} values (12 per cell)... found {}",
                n_lat, n_lon, expected, values.len()
            ));
        }
        Ok(Self {
            values,
            n_lat,
            n_lon,
        })
    }

    /// The 12 monthly values of the grid cell nearest to a position.
    pub fn monthly(&self, latitude: Float, longitude: Float) -> Result<[Float; 12], String> {
        let base = self.cell_index(latitude, longitude)? * 12;
        let mut out = [0.0; 12];
        out.copy_from_slice(&self.values[base..base + 12]);
        Ok(out)
    }

    /// Linke turbidity for each timestamp at a position.
    ///
    /// With `interp = false` every timestamp simply gets its month's value.
    /// With `interp = true` the value is interpolated linearly between the
    /// mid-month anchor points of the two surrounding months, wrapping
    /// around new year. Either way the answer depends only on (month, day):
    /// it does not change within a day nor across years.
    pub fn lookup(
        &self,
        times: &[NaiveDateTime],
        latitude: Float,
        longitude: Float,
        interp: bool,
    ) -> Result<Vec<Float>, String> {
        let monthly = self.monthly(latitude, longitude)?;

        Ok(times
            .iter()
            .map(|t| {
                let month = t.month0() as usize;
                if interp {
                    interpolate_day(&monthly, month.min(11), t.day0() as u16)
                } else {
                    monthly[month.min(11)]
                }
            })
            .collect())
    }

    fn cell_index(&self, latitude: Float, longitude: Float) -> Result<usize, String> {
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
        let lat_idx = ((90. - latitude) / 180. * (self.n_lat - 1) as Float).round() as usize;
        let lon_idx = ((longitude + 180.) / 360. * (self.n_lon - 1) as Float).round() as usize;
        let lat_idx = lat_idx.min(self.n_lat - 1);
        let lon_idx = lon_idx.min(self.n_lon - 1);
        Ok(lat_idx * self.n_lon + lon_idx)
    }
}

/// Mid-month anchor of a month, as a 0-based day of the 365-day year.
fn month_anchor(month: usize) -> Float {
    CUMULATED_DAYS_BEFORE_MONTH[month] as Float + DAYS_IN_MONTH[month] as Float / 2.
}

/// Linear interpolation between the two mid-month anchors surrounding a
/// (month, 0-based day-of-month) date, wrapping December into January.
fn interpolate_day(monthly: &[Float; 12], month: usize, day0: u16) -> Float {
    let doy = (CUMULATED_DAYS_BEFORE_MONTH[month] + day0.min(DAYS_IN_MONTH[month] - 1)) as Float;

    let (x0, y0, x1, y1) = if doy < month_anchor(0) {
        (month_anchor(11) - 365., monthly[11], month_anchor(0), monthly[0])
    } else if doy >= month_anchor(11) {
        (month_anchor(11), monthly[11], month_anchor(0) + 365., monthly[0])
    } else {
        // months whose anchors bracket doy
        let m = (0..11)
            .find(|m| doy >= month_anchor(*m) && doy < month_anchor(m + 1))
            .unwrap_or(10);
        (month_anchor(m), monthly[m], month_anchor(m + 1), monthly[m + 1])
    };

    y0 + (y1 - y0) * (doy - x0) / (x1 - x0)
}
