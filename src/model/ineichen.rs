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

/// Ineichen and Perez clear-sky model.
///
/// Determines clear-sky GHI, DNI and DHI from the apparent solar zenith
/// (in degrees), the pressure-adjusted (absolute) airmass, the Linke
/// turbidity, the altitude of the site in meters and the extraterrestrial
/// normal irradiance in W/m².
///
/// Based on Ineichen, P. and Perez, R. "A new airmass independent
/// formulation for the Linke turbidity coefficient", Solar Energy 73(3)
/// (2002), including the global-irradiance enhancement term of Perez et al.
/// "A New Operational Model for Satellite-Derived Irradiances", Solar
/// Energy 73(5) (2002), and the "SE 73" correction limiting the beam
/// component.
pub fn ineichen(
    apparent_zenith: Float,
    airmass_absolute: Float,
    linke_turbidity: Float,
    altitude: Float,
    dni_extra: Float,
) -> Irradiance {
    if apparent_zenith.is_nan()
        || airmass_absolute.is_nan()
        || linke_turbidity.is_nan()
        || altitude.is_nan()
        || dni_extra.is_nan()
    {
        return Irradiance::nan();
    }

    let cos_zenith = (apparent_zenith * PI / 180.).cos();
    if cos_zenith <= 0.0 {
        return Irradiance::default();
    }

    let tl = linke_turbidity;
    let fh1 = (-altitude / 8000.).exp();
    let fh2 = (-altitude / 1250.).exp();
    let cg1 = 5.09e-5 * altitude + 0.868;
    let cg2 = 3.92e-5 * altitude + 0.0387;

    let mut ghi = (-cg2 * airmass_absolute * (fh1 + fh2 * (tl - 1.))).exp();
    ghi *= (0.01 * airmass_absolute.powf(1.8)).exp(); // Perez enhancement
    ghi = (cg1 * dni_extra * cos_zenith * ghi).max(0.0);

    let b = 0.664 + 0.163 / fh1;
    let bnci = b * (-0.09 * airmass_absolute * (tl - 1.)).exp() * dni_extra;
    let bnci_2 = ghi * (1. - (0.1 - 0.2 * (-tl).exp()) / (0.1 + 0.882 / fh1)) / cos_zenith;
    let dni = bnci.min(bnci_2).max(0.0);

    let dhi = ghi - dni * cos_zenith;

    Irradiance { ghi, dni, dhi }
}

/// Elementwise [`ineichen`] over aligned series. Altitude and `dni_extra`
/// are properties of the site, not of the sample, so they stay scalar.
pub fn ineichen_series(
    apparent_zenith: &[Float],
    airmass_absolute: &[Float],
    linke_turbidity: &[Float],
    altitude: Float,
    dni_extra: Float,
) -> Result<Vec<Irradiance>, String> {
    check_same_length(&[
        ("apparent_zenith", apparent_zenith.len()),
        ("airmass_absolute", airmass_absolute.len()),
        ("linke_turbidity", linke_turbidity.len()),
    ])?;

    Ok(apparent_zenith
        .iter()
        .zip(airmass_absolute.iter())
        .zip(linke_turbidity.iter())
        .map(|((z, am), tl)| ineichen(*z, *am, *tl, altitude, dni_extra))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Float, b: Float, tol: Float) {
        assert!((a - b).abs() < tol, "{} vs {}", a, b);
    }

    #[test]
    fn test_ineichen_reference_point() {
        // zenith 10 deg, airmass 1, turbidity 3, sea level
        let r = ineichen(10., 1., 3., 0., 1364.);
        assert_close(r.ghi, 1048.592893113678, 1e-6);
        assert_close(r.dni, 942.2081860378344, 1e-6);
        assert_close(r.dhi, 120.6989665520498, 1e-6);
    }

    #[test]
    fn test_ineichen_dni_extra() {
        let r = ineichen(10., 1., 3., 0., 1370.);
        assert_close(r.ghi, 1053.20547182, 1e-6);
        assert_close(r.dni, 946.35279683, 1e-6);
        assert_close(r.dhi, 121.22990042, 1e-6);
    }

    #[test]
    fn test_ineichen_altitude() {
        let r = ineichen(10., 1., 3., 2000., 1364.);
        assert_close(r.ghi, 1145.64245696, 1e-6);
        assert_close(r.dni, 994.95377835, 1e-6);
        assert_close(r.dhi, 165.80426215, 1e-6);
    }

    #[test]
    fn test_ineichen_series() {
        let zenith = [0., 40., 80.];
        let airmass = [1., 5.5, 10.];
        let turbidity = [2., 3., 4.];
        let out = ineichen_series(&zenith, &airmass, &turbidity, 0., 1364.).unwrap();
        assert_eq!(out.len(), 3);

        assert_close(out[0].ghi, 1106.78342709, 1e-6);
        assert_close(out[0].dni, 1024.58284359, 1e-6);
        assert_close(out[0].dhi, 82.20058349, 1e-6);

        assert_close(out[1].ghi, 593.86637713, 1e-6);

        assert_close(out[2].ghi, 82.17463061, 1e-6);
        assert_close(out[2].dni, 75.80970012, 1e-6);
        assert_close(out[2].dhi, 69.01041434, 1e-6);

        // scalar and series forms agree
        for (i, r) in out.iter().enumerate() {
            let s = ineichen(zenith[i], airmass[i], turbidity[i], 0., 1364.);
            assert_eq!(*r, s);
        }
    }

    #[test]
    fn test_ineichen_night() {
        let r = ineichen(100., 30., 3., 0., 1364.);
        assert_eq!(r.ghi, 0.0);
        assert_eq!(r.dni, 0.0);
        assert_eq!(r.dhi, 0.0);
    }

    #[test]
    fn test_ineichen_nan() {
        let r = ineichen(Float::NAN, 1., 3., 0., 1364.);
        assert!(r.ghi.is_nan() && r.dni.is_nan() && r.dhi.is_nan());

        let r = ineichen(10., 1., Float::NAN, 0., 1364.);
        assert!(r.ghi.is_nan() && r.dni.is_nan() && r.dhi.is_nan());
    }

    #[test]
    fn test_ineichen_series_length_mismatch() {
        assert!(ineichen_series(&[10., 20.], &[1.], &[3., 3.], 0., 1364.).is_err());
    }
}
