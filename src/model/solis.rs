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

use super::{check_same_length, Irradiance};
use crate::{Float, PI};
use serde::{Deserialize, Serialize};

/// Standard pressure at sea level, in Pa.
const P0: Float = 101325.;

/// Atmospheric conditions for the Simplified Solis model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolisConditions {
    /// Aerosol optical depth at 700 nm
    pub aod700: Float,

    /// Precipitable water column, in cm. Values below 0.2 cm are outside
    /// the fit and get raised to 0.2.
    pub precipitable_water: Float,

    /// Surface pressure, in Pa
    pub pressure: Float,

    /// Extraterrestrial normal irradiance, in W/m²
    pub dni_extra: Float,
}

impl Default for SolisConditions {
    fn default() -> Self {
        Self {
            aod700: 0.1,
            precipitable_water: 1.0,
            pressure: P0,
            dni_extra: 1364.,
        }
    }
}

/// Simplified Solis clear-sky model.
///
/// Broadband fit to the spectral Solis radiative-transfer model. Inputs are
/// the apparent solar elevation (in degrees) and the atmospheric
/// [`SolisConditions`].
///
/// Based on Ineichen, P. "A broadband simplified version of the Solis clear
/// sky model", Solar Energy 82(8) (2008).
pub fn simplified_solis(apparent_elevation: Float, conditions: &SolisConditions) -> Irradiance {
    let SolisConditions {
        aod700,
        precipitable_water,
        pressure,
        dni_extra,
    } = *conditions;

    if apparent_elevation.is_nan()
        || aod700.is_nan()
        || precipitable_water.is_nan()
        || pressure.is_nan()
        || dni_extra.is_nan()
    {
        return Irradiance::nan();
    }

    let w = precipitable_water.max(0.2);
    let lw = w.ln();
    let lp = (pressure / P0).ln();

    // Elevations at or below the horizon decay to zero through this floor.
    let sin_elev = (apparent_elevation * PI / 180.).sin().max(1e-30);

    // Enhanced extraterrestrial irradiance
    let i0p = 1.08 * w.powf(0.0051);
    let i1p = 0.97 * w.powf(0.032);
    let i2p = 0.12 * w.powf(0.56);
    let io_prime = dni_extra * (i2p * aod700 * aod700 + i1p * aod700 + i0p + 0.071 * lp);

    // Beam optical depth and fit exponent
    let tb1 = 1.82 + 0.056 * lw + 0.0071 * lw * lw;
    let tb0 = 0.33 + 0.045 * lw + 0.0096 * lw * lw;
    let tbp = 0.0089 * w + 0.13;
    let taub = tb1 * aod700 + tb0 + tbp * lp;
    let b1 = 0.00925 * aod700 * aod700 + 0.0148 * aod700 - 0.0172;
    let b0 = -0.7565 * aod700 * aod700 + 0.5057 * aod700 + 0.4557;
    let b = b1 * lw + b0;
    let dni = io_prime * (-taub / sin_elev.powf(b)).exp();

    // Global optical depth and fit exponent
    let tg1 = 1.24 + 0.047 * lw + 0.0061 * lw * lw;
    let tg0 = 0.27 + 0.043 * lw + 0.0090 * lw * lw;
    let tgp = 0.0079 * w + 0.1;
    let taug = tg1 * aod700 + tg0 + tgp * lp;
    let g = -0.0147 * lw - 0.3079 * aod700 * aod700 + 0.2846 * aod700 + 0.3798;
    let ghi = io_prime * (-taug / sin_elev.powf(g)).exp() * sin_elev;

    // Diffuse optical depth, with separate fits below and above aod700 = 0.05
    let (td4, td3, td2, td1, td0, tdp) = if aod700 < 0.05 {
        (
            86. * w - 13800.,
            -3.11 * w + 79.4,
            -0.23 * w + 74.8,
            0.092 * w - 8.86,
            0.0042 * w + 3.12,
            -0.83 * (1. + aod700).powf(-17.2),
        )
    } else {
        (
            -0.21 * w + 11.6,
            0.27 * w - 20.7,
            -0.134 * w + 15.5,
            0.0554 * w - 5.71,
            0.0057 * w + 2.94,
            -(0.71 * aod700 + 0.099),
        )
    };
    let a2 = aod700 * aod700;
    let taud = td4 * a2 * a2 + td3 * a2 * aod700 + td2 * a2 + td1 * aod700 + td0 + tdp * lp;
    let d = -0.337 * a2 + 0.63 * aod700 + 0.116 + lp / (18. + 152. * aod700);
    let dhi = io_prime * (-taud / sin_elev.powf(d)).exp();

    Irradiance { ghi, dni, dhi }
}

/// Elementwise [`simplified_solis`] over an elevation series under fixed
/// atmospheric conditions.
pub fn simplified_solis_series(
    apparent_elevation: &[Float],
    conditions: &SolisConditions,
) -> Vec<Irradiance> {
    apparent_elevation
        .iter()
        .map(|el| simplified_solis(*el, conditions))
        .collect()
}

/// Elementwise Simplified Solis when the water column and pressure vary
/// sample to sample (e.g. coming from a weather record).
pub fn simplified_solis_varying(
    apparent_elevation: &[Float],
    aod700: &[Float],
    precipitable_water: &[Float],
    pressure: &[Float],
    dni_extra: Float,
) -> Result<Vec<Irradiance>, String> {
    check_same_length(&[
        ("apparent_elevation", apparent_elevation.len()),
        ("aod700", aod700.len()),
        ("precipitable_water", precipitable_water.len()),
        ("pressure", pressure.len()),
    ])?;

    Ok(apparent_elevation
        .iter()
        .enumerate()
        .map(|(i, el)| {
            simplified_solis(
                *el,
                &SolisConditions {
                    aod700: aod700[i],
                    precipitable_water: precipitable_water[i],
                    pressure: pressure[i],
                    dni_extra,
                },
            )
        })
        .collect())
}
