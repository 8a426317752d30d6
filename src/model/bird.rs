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

use super::{check_same_length, BirdIrradiance};
use crate::{Float, PI};
use serde::{Deserialize, Serialize};

/// Atmospheric conditions for the Bird model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BirdAtmosphere {
    /// Aerosol optical depth at 380 nm
    pub aod380: Float,

    /// Aerosol optical depth at 500 nm
    pub aod500: Float,

    /// Precipitable water column, in cm
    pub precipitable_water: Float,

    /// Ozone column, in atm-cm
    pub ozone: Float,

    /// Surface pressure, in Pa
    pub pressure: Float,

    /// Extraterrestrial normal irradiance, in W/m²
    pub dni_extra: Float,

    /// Aerosol forward-scattering asymmetry factor
    pub asymmetry: Float,

    /// Ground albedo
    pub albedo: Float,
}

impl Default for BirdAtmosphere {
    fn default() -> Self {
        Self {
            aod380: 0.15,
            aod500: 0.1,
            precipitable_water: 1.5,
            ozone: 0.3,
            pressure: 101325.,
            dni_extra: 1364.,
            asymmetry: 0.85,
            albedo: 0.2,
        }
    }
}

/// Bird clear-sky model.
///
/// Broadband transmittance product over Rayleigh scattering, ozone, uniformly
/// mixed gases, water vapor and aerosol, with a single ground/sky
/// backscattering bounce for the global component. Inputs are the solar
/// zenith (in degrees), the relative (not pressure-corrected) airmass and
/// the atmospheric [`BirdAtmosphere`]; the broadband aerosol optical depth
/// is built from aod380/aod500 with the Bird-Hulstrom approximation.
///
/// Based on Bird, R. E. and Hulstrom, R. L. "A Simplified Clear Sky Model
/// for Direct and Diffuse Insolation on Horizontal Surfaces", SERI
/// TR-642-761 (1981).
pub fn bird(zenith: Float, airmass_relative: Float, atmosphere: &BirdAtmosphere) -> BirdIrradiance {
    let BirdAtmosphere {
        aod380,
        aod500,
        precipitable_water,
        ozone,
        pressure,
        dni_extra,
        asymmetry,
        albedo,
    } = *atmosphere;

    if zenith.is_nan()
        || airmass_relative.is_nan()
        || aod380.is_nan()
        || aod500.is_nan()
        || precipitable_water.is_nan()
        || ozone.is_nan()
        || pressure.is_nan()
        || dni_extra.is_nan()
        || asymmetry.is_nan()
        || albedo.is_nan()
    {
        return BirdIrradiance::nan();
    }

    let airmass = airmass_relative;
    let am_press = airmass * pressure / 101325.;

    let t_rayleigh = (-0.0903 * am_press.powf(0.84) * (1. + am_press - am_press.powf(1.01))).exp();

    let am_o3 = ozone * airmass;
    let t_ozone = 1.
        - 0.1611 * am_o3 * (1. + 139.48 * am_o3).powf(-0.3034)
        - 0.002715 * am_o3 / (1. + 0.044 * am_o3 + 0.0003 * am_o3 * am_o3);

    let t_gases = (-0.0127 * am_press.powf(0.26)).exp();

    let am_h2o = airmass * precipitable_water;
    let t_water = 1. - 2.4959 * am_h2o / ((1. + 79.034 * am_h2o).powf(0.6828) + 6.385 * am_h2o);

    // Broadband aerosol optical depth, Bird-Hulstrom approximation
    let aod_bb = 0.27583 * aod380 + 0.35 * aod500;
    let t_aerosol =
        (-aod_bb.powf(0.873) * (1. + aod_bb - aod_bb.powf(0.7088)) * airmass.powf(0.9108)).exp();
    let taa = 1. - 0.1 * (1. - airmass + airmass.powf(1.06)) * (1. - t_aerosol);
    let rs = 0.0685 + (1. - asymmetry) * (1. - t_aerosol / taa);

    let dni = 0.9662 * dni_extra * t_aerosol * t_water * t_gases * t_ozone * t_rayleigh;

    let cos_zenith = if zenith < 90. {
        (zenith * PI / 180.).cos()
    } else {
        0.0
    };
    let direct_horizontal = dni * cos_zenith;

    let ias = dni_extra
        * cos_zenith
        * 0.79
        * t_ozone
        * t_gases
        * t_water
        * taa
        * (0.5 * (1. - t_rayleigh) + asymmetry * (1. - t_aerosol / taa))
        / (1. - airmass + airmass.powf(1.02));

    let ghi = (direct_horizontal + ias) / (1. - albedo * rs);
    let dhi = ghi - direct_horizontal;

    BirdIrradiance {
        dni,
        direct_horizontal,
        ghi,
        dhi,
    }
}

/// Elementwise [`bird`] over aligned zenith and airmass series under fixed
/// atmospheric conditions.
pub fn bird_series(
    zenith: &[Float],
    airmass_relative: &[Float],
    atmosphere: &BirdAtmosphere,
) -> Result<Vec<BirdIrradiance>, String> {
    check_same_length(&[
        ("zenith", zenith.len()),
        ("airmass_relative", airmass_relative.len()),
    ])?;

    Ok(zenith
        .iter()
        .zip(airmass_relative.iter())
        .map(|(z, am)| bird(*z, *am, atmosphere))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Float, b: Float, tol: Float) {
        assert!((a - b).abs() < tol, "{} vs {}", a, b);
    }

    fn mountain_atmosphere() -> BirdAtmosphere {
        BirdAtmosphere {
            pressure: 84000.,
            ..BirdAtmosphere::default()
        }
    }

    #[test]
    fn test_bird_morning() {
        // secant airmass at 30 degrees
        let r = bird(30., 1.1547005383792515, &mountain_atmosphere());
        assert_close(r.dni, 935.4559399438784, 1e-6);
        assert_close(r.direct_horizontal, 810.128608112449, 1e-6);
        assert_close(r.ghi, 922.8471307273095, 1e-6);
        assert_close(r.dhi, 112.71852261486049, 1e-6);
    }

    #[test]
    fn test_bird_midmorning() {
        let r = bird(60., 1.9942928525954514, &mountain_atmosphere());
        assert_close(r.dni, 807.0875482411565, 1e-6);
        assert_close(r.direct_horizontal, 403.54377412057835, 1e-6);
        assert_close(r.ghi, 495.8046025121875, 1e-6);
        assert_close(r.dhi, 92.26082839160915, 1e-6);
    }

    #[test]
    fn test_bird_low_sun() {
        let r = bird(85., 10.323879332053287, &mountain_atmosphere());
        assert_close(r.dni, 277.6514981144196, 1e-6);
        assert_close(r.direct_horizontal, 24.198922543162244, 1e-6);
        assert_close(r.ghi, 49.203197462251005, 1e-6);
        assert_close(r.dhi, 25.00427491908876, 1e-6);
    }

    #[test]
    fn test_bird_horizon() {
        // at and past the horizon the horizontal components vanish
        let r = bird(90., 38., &mountain_atmosphere());
        assert_eq!(r.direct_horizontal, 0.0);
        assert_eq!(r.ghi, 0.0);
        assert_eq!(r.dhi, 0.0);
    }

    #[test]
    fn test_bird_nan() {
        let r = bird(Float::NAN, 1.5, &BirdAtmosphere::default());
        assert!(r.dni.is_nan() && r.ghi.is_nan() && r.dhi.is_nan());

        let r = bird(
            30.,
            1.5,
            &BirdAtmosphere {
                aod500: Float::NAN,
                ..BirdAtmosphere::default()
            },
        );
        assert!(r.dni.is_nan() && r.ghi.is_nan() && r.dhi.is_nan());
    }

    #[test]
    fn test_bird_series_agrees_with_scalar() {
        let zenith = [30., 60., 85.];
        let airmass = [1.1547005383792515, 1.9942928525954514, 10.323879332053287];
        let out = bird_series(&zenith, &airmass, &mountain_atmosphere()).unwrap();
        assert_eq!(out.len(), 3);
        for (i, r) in out.iter().enumerate() {
            assert_eq!(*r, bird(zenith[i], airmass[i], &mountain_atmosphere()));
        }
        assert!(bird_series(&zenith, &airmass[..2], &mountain_atmosphere()).is_err());
    }
}
