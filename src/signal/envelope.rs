//! Analytic-signal envelopes via the Hilbert transform.

use rustfft::{num_complex::Complex64, FftPlanner};

/// Compute the envelope of a real-valued signal.
///
/// Builds the analytic signal through the frequency domain (forward FFT,
/// zero the negative frequencies, double the positive ones, inverse FFT) and
/// returns its magnitude. The envelope traces the smooth amplitude of the
/// oscillation while ignoring phase.
///
/// # Arguments
/// * `signal` - Input time series (real values)
///
/// # Returns
/// Per-sample envelope amplitudes, same length as the input
pub fn envelope(signal: &[f64]) -> Vec<f64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![signal[0].abs()];
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let forward = planner.plan_fft_forward(n);
    forward.process(&mut buffer);

    // Analytic-signal spectrum: keep DC (and Nyquist for even n) as-is,
    // double the positive frequencies, zero the negative ones.
    let half = n / 2;
    for (k, value) in buffer.iter_mut().enumerate() {
        if k == 0 || (n % 2 == 0 && k == half) {
            continue;
        } else if k < half || (n % 2 == 1 && k == half) {
            *value *= 2.0;
        } else {
            *value = Complex64::new(0.0, 0.0);
        }
    }

    let inverse = planner.plan_fft_inverse(n);
    inverse.process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| (c * scale).norm()).collect()
}
