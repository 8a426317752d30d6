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

#![deny(missing_docs)]

//! Clear-sky solar irradiance library: published clear-sky models
//! (Ineichen-Perez, Haurwitz, Simplified Solis, Bird), a Linke turbidity
//! climatology lookup, and a statistical detector that classifies which
//! samples of a measured irradiance series were taken under clear sky.
//!
//! Solar position and airmass are inputs, not outputs: every function here
//! takes zenith/elevation angles (in degrees) and airmass values computed
//! elsewhere.

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

#[cfg(feature = "float")]
const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
const PI: Float = std::f64::consts::PI;

/// Clear-sky irradiance models
pub mod model;
pub use crate::model::{
    bird, bird_series, haurwitz, haurwitz_series, ineichen, ineichen_series, simplified_solis,
    simplified_solis_series, simplified_solis_varying, BirdAtmosphere, BirdIrradiance, Irradiance,
    SolisConditions,
};

/// Data associated to a specific Location
pub mod location;
pub use crate::location::Location;

/// Monthly Linke turbidity climatology
pub mod turbidity;
pub use crate::turbidity::TurbidityGrid;

/// Statistical clear-sky detection
pub mod detect;
pub use crate::detect::{detect_clearsky, ClearSkyDetection, ClearSkyDetector, DetectionComponents};
