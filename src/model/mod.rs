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

//! The clear-sky irradiance models.
//!
//! All models are pure and elementwise. A `NaN` among the inputs of a sample
//! produces `NaN` outputs for that sample; it is never an error. Sun below
//! the horizon produces zeros.

use crate::Float;
use serde::{Deserialize, Serialize};

mod ineichen;
pub use ineichen::{ineichen, ineichen_series};

mod haurwitz;
pub use haurwitz::{haurwitz, haurwitz_series};

mod solis;
pub use solis::{
    simplified_solis, simplified_solis_series, simplified_solis_varying, SolisConditions,
};

mod bird;
pub use bird::{bird, bird_series, BirdAtmosphere};

/// The three broadband irradiance components on which the models agree.
///
/// All values in W/m².
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Irradiance {
    /// Global Horizontal Irradiance
    pub ghi: Float,

    /// Direct Normal Irradiance
    pub dni: Float,

    /// Diffuse Horizontal Irradiance
    pub dhi: Float,
}

impl Irradiance {
    /// An all-`NaN` sample, returned when any input of a sample is `NaN`.
    pub(crate) fn nan() -> Self {
        Self {
            ghi: Float::NAN,
            dni: Float::NAN,
            dhi: Float::NAN,
        }
    }
}

/// The Bird model also reports the direct component projected on the
/// horizontal plane, so it gets its own output type.
///
/// All values in W/m².
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BirdIrradiance {
    /// Direct Normal Irradiance
    pub dni: Float,

    /// Direct irradiance projected on the horizontal plane
    pub direct_horizontal: Float,

    /// Global Horizontal Irradiance
    pub ghi: Float,

    /// Diffuse Horizontal Irradiance
    pub dhi: Float,
}

impl BirdIrradiance {
    pub(crate) fn nan() -> Self {
        Self {
            dni: Float::NAN,
            direct_horizontal: Float::NAN,
            ghi: Float::NAN,
            dhi: Float::NAN,
        }
    }
}

/// Checks that a set of aligned input series all have the same length,
/// reporting the offending one otherwise.
pub(crate) fn check_same_length(lengths: &[(&str, usize)]) -> Result<(), String> {
    let (first_name, n) = lengths[0];
    for (name, len) in lengths.iter().skip(1) {
        if *len != n {
            return Err(format!(
                "mismatched series lengths: '{}' has {} samples but '{}' has {}",
                first_name, n, name, len
            ));
        }
    }
    Ok(())
}
