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

use crate::{Float, PI};

/// Haurwitz clear-sky model.
///
/// The simplest model in the library: global horizontal irradiance as a
/// function of the apparent solar zenith (in degrees) alone,
/// `1098 cos(z) exp(-0.059 / cos(z))`. Sun at or below the horizon gives 0.
///
/// Based on Haurwitz, B. "Insolation in Relation to Cloudiness and Cloud
/// Density", Journal of Meteorology 2 (1945), with the coefficients of the
/// 1946 follow-up.
pub fn haurwitz(apparent_zenith: Float) -> Float {
    if apparent_zenith.is_nan() {
        return Float::NAN;
    }
    let cos_zenith = (apparent_zenith * PI / 180.).cos();
    if cos_zenith <= 0.0 {
        return 0.0;
    }
    (1098. * cos_zenith * (-0.059 / cos_zenith).exp()).max(0.0)
}

/// Elementwise [`haurwitz`] over a zenith series.
pub fn haurwitz_series(apparent_zenith: &[Float]) -> Vec<Float> {
    apparent_zenith.iter().map(|z| haurwitz(*z)).collect()
}
