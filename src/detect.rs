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

//! Statistical clear-sky detection.
//!
//! Compares a measured irradiance series against a modeled clear-sky series
//! over fixed-length windows. A window is called clear when five statistics
//! (mean difference, max pointwise difference, line-length deviation,
//! variance of slope differences and max slope deviation) all stay within
//! their thresholds. The modeled series is scaled by a factor alpha that is
//! re-fitted to the samples called clear, and the classification is repeated
//! until it stops changing.

use crate::Float;
use chrono::NaiveDateTime;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// The windowed clear-sky classifier.
///
/// Build one with [`ClearSkyDetector::new`] and tune the public thresholds
/// as needed; the defaults are meant for GHI series in W/m² sampled every
/// few minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearSkyDetector {
    /// Samples per window
    window_length: usize,

    /// Threshold on |mean(measured) - mean(scaled modeled)| within a
    /// window, in W/m²
    pub mean_diff: Float,

    /// Threshold on the max pointwise |measured - scaled modeled| within a
    /// window, in W/m²
    pub max_diff: Float,

    /// Lower bound of the accepted line-length deviation. The band is
    /// asymmetric on purpose: measured curves shorter than the model are
    /// tolerated less than longer ones.
    pub lower_line_length: Float,

    /// Upper bound of the accepted line-length deviation
    pub upper_line_length: Float,

    /// Threshold on the sample variance of the slope differences, in
    /// (W/m²/min)²
    pub var_diff: Float,

    /// Threshold on the max deviation of a slope difference from the window
    /// mean, in W/m²/min
    pub slope_dev: Float,

    /// Maximum number of classifications before giving up on the alpha
    /// fixed point
    pub max_iterations: usize,
}

/// Which of the five window statistics passed, per sample.
///
/// A sample gets `true` for a statistic when at least one of the windows
/// covering it passed that statistic. Windows invalidated by the guards
/// (non-finite data, zero modeled mean) fail all five.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionComponents {
    /// Mean-difference test
    pub mean_diff: Vec<bool>,

    /// Max pointwise difference test
    pub max_diff: Vec<bool>,

    /// Line-length deviation test
    pub line_length: Vec<bool>,

    /// Slope-difference variance test
    pub slope_var: Vec<bool>,

    /// Max slope deviation test
    pub slope_dev: Vec<bool>,
}

/// The outcome of a detection run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearSkyDetection {
    /// Clear-sky flag for each input sample
    pub clear: Vec<bool>,

    /// The per-statistic flags behind `clear`
    pub components: DetectionComponents,

    /// The fitted scaling factor applied to the modeled series
    pub alpha: Float,

    /// Number of classifications performed
    pub iterations: usize,

    /// Whether the flags reached a fixed point within `max_iterations`
    pub converged: bool,
}

/// Per-window test results, before broadcasting to samples.
#[derive(Clone, Copy)]
struct WindowTests {
    mean_ok: bool,
    max_ok: bool,
    line_ok: bool,
    var_ok: bool,
    dev_ok: bool,
}

impl WindowTests {
    /// A window the guards refused to evaluate.
    fn opaque() -> Self {
        Self {
            mean_ok: false,
            max_ok: false,
            line_ok: false,
            var_ok: false,
            dev_ok: false,
        }
    }

    fn clear(&self) -> bool {
        self.mean_ok && self.max_ok && self.line_ok && self.var_ok && self.dev_ok
    }
}

impl ClearSkyDetector {
    /// Builds a detector with the default thresholds over windows of
    /// `window_length` samples (at least 2).
    pub fn new(window_length: usize) -> Result<Self, String> {
        if window_length < 2 {
            return Err(format!(
                "a clear-sky detection window needs at least 2 samples... found {}",
                window_length
            ));
        }
        Ok(Self {
            window_length,
            mean_diff: 75.,
            max_diff: 75.,
            lower_line_length: -5.,
            upper_line_length: 10.,
            var_diff: 0.005,
            slope_dev: 8.,
            max_iterations: 20,
        })
    }

    /// Samples per window.
    pub fn window_length(&self) -> usize {
        self.window_length
    }

    /// Classifies each sample of `measured` as clear or not clear, given
    /// the clear-sky `modeled` series and the (regularly spaced) sample
    /// `times`.
    pub fn detect(
        &self,
        measured: &[Float],
        modeled: &[Float],
        times: &[NaiveDateTime],
    ) -> Result<ClearSkyDetection, String> {
        // The constructor checks this too, but a detector can also arrive
        // through deserialization
        if self.window_length < 2 {
            return Err(format!(
                "a clear-sky detection window needs at least 2 samples... found {}",
                self.window_length
            ));
        }
        let n = measured.len();
        if modeled.len() != n || times.len() != n {
            return Err(format!(
                "measured ({}), modeled ({}) and times ({}) should all have the same length",
                n,
                modeled.len(),
                times.len()
            ));
        }
        if n < self.window_length {
            return Err(format!(
                "the series has {} samples, not enough for a window of {}",
                n, self.window_length
            ));
        }
        let interval = uniform_interval_minutes(times)?;
        let starts = window_starts(n, self.window_length);

        let mut alpha: Float = 1.0;
        let mut iterations = 0;
        let mut converged = false;
        let mut prev_flags: Option<Vec<bool>> = None;

        let (clear, components) = loop {
            iterations += 1;
            let (clear, components) = self.classify(measured, modeled, &starts, interval, alpha);

            if prev_flags.as_deref() == Some(&clear[..]) {
                converged = true;
                break (clear, components);
            }
            if iterations >= self.max_iterations {
                break (clear, components);
            }

            // Re-fit alpha to the samples currently called clear. An empty
            // clear set or a zero denominator keeps the previous alpha.
            let mut num = 0.0;
            let mut den = 0.0;
            for i in 0..n {
                if clear[i] {
                    num += measured[i];
                    den += modeled[i];
                }
            }
            if den != 0.0 {
                let next = num / den;
                if !next.is_finite() {
                    return Err(format!(
                        "the clear-sky scaling factor became non-finite ({})",
                        next
                    ));
                }
                if next > 0.0 {
                    alpha = next;
                }
            }

            prev_flags = Some(clear);
        };

        if !converged {
            tracing::warn!(
                iterations,
                alpha,
                "clear-sky detection did not reach a fixed point; returning the last classification"
            );
        }

        Ok(ClearSkyDetection {
            clear,
            components,
            alpha,
            iterations,
            converged,
        })
    }

    /// One classification pass at a fixed alpha.
    fn classify(
        &self,
        measured: &[Float],
        modeled: &[Float],
        starts: &[usize],
        interval: Float,
        alpha: Float,
    ) -> (Vec<bool>, DetectionComponents) {
        let w = self.window_length;

        let eval = |s: &usize| -> WindowTests {
            self.eval_window(&measured[*s..*s + w], &modeled[*s..*s + w], interval, alpha)
        };

        #[cfg(not(feature = "parallel"))]
        let verdicts: Vec<WindowTests> = starts.iter().map(eval).collect();
        #[cfg(feature = "parallel")]
        let verdicts: Vec<WindowTests> = starts.par_iter().map(eval).collect();

        let n = measured.len();
        let mut clear = vec![false; n];
        let mut components = DetectionComponents {
            mean_diff: vec![false; n],
            max_diff: vec![false; n],
            line_length: vec![false; n],
            slope_var: vec![false; n],
            slope_dev: vec![false; n],
        };

        // Union over the windows covering each sample
        for (s, tests) in starts.iter().zip(verdicts.iter()) {
            for i in *s..*s + w {
                clear[i] |= tests.clear();
                components.mean_diff[i] |= tests.mean_ok;
                components.max_diff[i] |= tests.max_ok;
                components.line_length[i] |= tests.line_ok;
                components.slope_var[i] |= tests.var_ok;
                components.slope_dev[i] |= tests.dev_ok;
            }
        }

        (clear, components)
    }

    fn eval_window(
        &self,
        measured: &[Float],
        modeled: &[Float],
        interval: Float,
        alpha: Float,
    ) -> WindowTests {
        let w = measured.len();
        let scaled: Vec<Float> = modeled.iter().map(|m| alpha * m).collect();

        // Guards: bad data never makes a window clear, and never a fault
        if measured.iter().chain(scaled.iter()).any(|v| !v.is_finite()) {
            return WindowTests::opaque();
        }
        if mean(modeled) == 0.0 {
            return WindowTests::opaque();
        }

        let mean_ok = (mean(measured) - mean(&scaled)).abs() <= self.mean_diff;

        let max_ok = measured
            .iter()
            .zip(scaled.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0 as Float, Float::max)
            <= self.max_diff;

        let duration = (w - 1) as Float * interval;
        let line_diff =
            line_length(measured) / duration - (1. + self.var_diff) * line_length(&scaled) / duration;
        let line_ok = line_diff >= self.lower_line_length && line_diff <= self.upper_line_length;

        // Per-minute slope differences between the two curves
        let d: Vec<Float> = (0..w - 1)
            .map(|i| ((measured[i + 1] - measured[i]) - (scaled[i + 1] - scaled[i])) / interval)
            .collect();
        let d_mean = mean(&d);

        // Sample variance needs at least two slopes; a window of 2 cannot
        // pass this test.
        let var_ok = if d.len() < 2 {
            false
        } else {
            d.iter().map(|x| (x - d_mean) * (x - d_mean)).sum::<Float>() / (d.len() - 1) as Float
                <= self.var_diff
        };

        let dev_ok = d
            .iter()
            .map(|x| (x - d_mean).abs())
            .fold(0.0 as Float, Float::max)
            <= self.slope_dev;

        WindowTests {
            mean_ok,
            max_ok,
            line_ok,
            var_ok,
            dev_ok,
        }
    }
}

/// Classifies a series with the default thresholds, returning just the
/// clear-sky flags.
pub fn detect_clearsky(
    measured: &[Float],
    modeled: &[Float],
    times: &[NaiveDateTime],
    window_length: usize,
) -> Result<Vec<bool>, String> {
    let detection = ClearSkyDetector::new(window_length)?.detect(measured, modeled, times)?;
    Ok(detection.clear)
}

/// Start indices of the windows tiling `n` samples. When the length is not
/// a multiple of the window, the last window ends at the last sample and
/// overlaps the previous one.
fn window_starts(n: usize, w: usize) -> Vec<usize> {
    let mut starts: Vec<usize> = (0..n / w).map(|k| k * w).collect();
    if n % w != 0 {
        starts.push(n - w);
    }
    starts
}

/// The sampling interval in minutes, after checking it is uniform.
fn uniform_interval_minutes(times: &[NaiveDateTime]) -> Result<Float, String> {
    if times.len() < 2 {
        return Err("at least 2 timestamps are needed to establish a sampling interval".into());
    }
    let first = (times[1] - times[0]).num_milliseconds();
    if first <= 0 {
        return Err("timestamps should be strictly increasing".into());
    }
    for i in 2..times.len() {
        let delta = (times[i] - times[i - 1]).num_milliseconds();
        if delta != first {
            return Err(format!(
                "irregular sampling is not supported: the interval between samples {} and {} is {} ms, but the series started at {} ms",
                i - 1,
                i,
                delta,
                first
            ));
        }
    }
    Ok(first as Float / 60_000.)
}

fn mean(x: &[Float]) -> Float {
    x.iter().sum::<Float>() / x.len() as Float
}

/// Total vertical travel of a curve, before normalizing by duration.
fn line_length(x: &[Float]) -> Float {
    x.windows(2).map(|p| (p[1] - p[0]).abs()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn times(n: usize, step_min: i64) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2023, 6, 21)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::minutes(step_min * i as i64))
            .collect()
    }

    #[test]
    fn test_window_starts() {
        assert_eq!(window_starts(30, 10), vec![0, 10, 20]);
        assert_eq!(window_starts(25, 10), vec![0, 10, 15]);
        assert_eq!(window_starts(25, 3), vec![0, 3, 6, 9, 12, 15, 18, 21, 22]);
        assert_eq!(window_starts(10, 10), vec![0]);
    }

    #[test]
    fn test_uniform_interval() {
        let t = times(5, 10);
        assert!((uniform_interval_minutes(&t).unwrap() - 10.).abs() < 1e-12);

        let mut crooked = times(5, 10);
        crooked[3] = crooked[3] + chrono::Duration::seconds(1);
        assert!(uniform_interval_minutes(&crooked).is_err());

        let mut backwards = times(5, 10);
        backwards.swap(0, 1);
        assert!(uniform_interval_minutes(&backwards).is_err());
    }

    #[test]
    fn test_new_rejects_tiny_window() {
        assert!(ClearSkyDetector::new(1).is_err());
        assert!(ClearSkyDetector::new(0).is_err());
        assert!(ClearSkyDetector::new(2).is_ok());
    }

    #[test]
    fn test_deserialized_window_is_validated() {
        // a hand-written config can smuggle in a window the constructor
        // would have rejected; detect() must refuse it rather than fault
        let json = r#"{
            "window_length": 0,
            "mean_diff": 75.0,
            "max_diff": 75.0,
            "lower_line_length": -5.0,
            "upper_line_length": 10.0,
            "var_diff": 0.005,
            "slope_dev": 8.0,
            "max_iterations": 20
        }"#;
        let detector: ClearSkyDetector = serde_json::from_str(json).unwrap();
        let t = times(20, 10);
        assert!(detector.detect(&[1.0; 20], &[1.0; 20], &t).is_err());
    }

    #[test]
    fn test_shape_errors() {
        let detector = ClearSkyDetector::new(10).unwrap();
        let t = times(20, 10);
        assert!(detector.detect(&[1.0; 19], &[1.0; 20], &t).is_err());
        assert!(detector.detect(&[1.0; 20], &[1.0; 20], &t[..19]).is_err());
        // shorter than one window
        assert!(detector
            .detect(&[1.0; 5], &[1.0; 5], &times(5, 10))
            .is_err());
    }

    #[test]
    fn test_scaled_series_recovers_alpha() {
        // measured is exactly 95% of the model: everything is clear and
        // alpha converges to 0.95
        let modeled: Vec<Float> = (0..30).map(|i| 100. + 10. * i as Float).collect();
        let measured: Vec<Float> = modeled.iter().map(|m| 0.95 * m).collect();
        let t = times(30, 10);

        let detection = ClearSkyDetector::new(10)
            .unwrap()
            .detect(&measured, &modeled, &t)
            .unwrap();

        assert!(detection.clear.iter().all(|c| *c));
        assert!(detection.converged);
        assert!((detection.alpha - 0.95).abs() < 1e-9, "{}", detection.alpha);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let modeled: Vec<Float> = (0..30).map(|i| 100. + 10. * i as Float).collect();
        let measured: Vec<Float> = modeled.iter().map(|m| 1.3 * m).collect();
        let t = times(30, 10);
        let detector = ClearSkyDetector::new(10).unwrap();

        let a = detector.detect(&measured, &modeled, &t).unwrap();
        let b = detector.detect(&measured, &modeled, &t).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_window_of_two_is_never_clear() {
        let modeled: Vec<Float> = (0..10).map(|i| 100. + 10. * i as Float).collect();
        let t = times(10, 10);
        let detection = ClearSkyDetector::new(2)
            .unwrap()
            .detect(&modeled.clone(), &modeled, &t)
            .unwrap();
        // a single slope difference has no sample variance
        assert!(detection.clear.iter().all(|c| !*c));
        assert!(detection.components.slope_var.iter().all(|v| !*v));
        // the other statistics pass on identical curves
        assert!(detection.components.mean_diff.iter().all(|v| *v));
        assert!(detection.components.max_diff.iter().all(|v| *v));
    }

    #[test]
    fn test_zero_model_window_is_not_clear() {
        // night at the head of the series
        let mut modeled = vec![0.0; 10];
        modeled.extend((0..20).map(|i| 100. + 10. * i as Float));
        let measured = modeled.clone();
        let t = times(30, 10);

        let detection = ClearSkyDetector::new(10)
            .unwrap()
            .detect(&measured, &modeled, &t)
            .unwrap();

        assert!(detection.clear[..10].iter().all(|c| !*c));
        assert!(detection.clear[10..].iter().all(|c| *c));
        assert!(detection.converged);
    }

    #[test]
    fn test_nan_window_is_not_clear() {
        let modeled: Vec<Float> = (0..30).map(|i| 100. + 10. * i as Float).collect();
        let mut measured = modeled.clone();
        measured[25] = Float::NAN;
        let t = times(30, 10);

        let detection = ClearSkyDetector::new(10)
            .unwrap()
            .detect(&measured, &modeled, &t)
            .unwrap();

        assert!(detection.clear[..20].iter().all(|c| *c));
        assert!(detection.clear[20..].iter().all(|c| !*c));
        assert!((detection.alpha - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convenience_wrapper_alignment() {
        let modeled: Vec<Float> = (0..30).map(|i| 100. + 10. * i as Float).collect();
        let t = times(30, 10);
        let flags = detect_clearsky(&modeled.clone(), &modeled, &t, 10).unwrap();
        assert_eq!(flags.len(), modeled.len());
        assert!(flags.iter().all(|c| *c));
    }
}
