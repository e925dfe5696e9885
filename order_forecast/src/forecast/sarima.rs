//! Seasonal ARIMA model.
//!
//! A SARIMA(p,d,q)(P,D,Q,s) model combines the classical ARIMA components with
//! their seasonal counterparts at lag `s`:
//!
//! - seasonal and non-seasonal differencing achieve stationarity,
//! - AR terms regress on past values at lags 1..p and s..P*s,
//! - MA terms regress on past forecast errors at the same lags.
//!
//! Coefficients are estimated by the method of moments: Yule-Walker equations
//! solved with Levinson-Durbin for the AR side, residual autocorrelations for
//! the MA side. Interior gaps (NaN) in the input are bridged by linear
//! interpolation before differencing; the caller's series itself is never
//! mutated.

use crate::forecast::{ForecastError, Predictor};

/// SARIMA model for daily series with a weekly (or any fixed) season.
#[derive(Debug, Clone)]
pub struct Sarima {
    p: usize,
    d: usize,
    q: usize,
    seasonal_p: usize,
    seasonal_d: usize,
    seasonal_q: usize,
    s: usize,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    sar_coeffs: Vec<f64>,
    sma_coeffs: Vec<f64>,
    constant: f64,
    /// Differencing pipeline: `stages[0]` is the (gap-bridged) input, each
    /// following entry is the result of one differencing pass with `lags[i]`.
    stages: Vec<Vec<f64>>,
    lags: Vec<usize>,
    residuals: Vec<f64>,
    fitted: bool,
}

impl Sarima {
    /// Create an unfitted model with non-seasonal order `(p, d, q)` and
    /// seasonal order `(P, D, Q, s)`.
    pub fn new(
        order: (usize, usize, usize),
        seasonal_order: (usize, usize, usize, usize),
    ) -> Result<Self, ForecastError> {
        let (p, d, q) = order;
        let (seasonal_p, seasonal_d, seasonal_q, s) = seasonal_order;

        if p > 10 || q > 10 {
            return Err(ForecastError::InvalidParameter {
                name: if p > 10 { "p" } else { "q" }.to_string(),
                reason: "AR/MA order must be <= 10".to_string(),
            });
        }
        if d > 2 || seasonal_d > 2 {
            return Err(ForecastError::InvalidParameter {
                name: if d > 2 { "d" } else { "D" }.to_string(),
                reason: "Differencing order must be <= 2".to_string(),
            });
        }
        if seasonal_p > 4 || seasonal_q > 4 {
            return Err(ForecastError::InvalidParameter {
                name: if seasonal_p > 4 { "P" } else { "Q" }.to_string(),
                reason: "Seasonal AR/MA order must be <= 4".to_string(),
            });
        }
        if (seasonal_p > 0 || seasonal_d > 0 || seasonal_q > 0) && s < 2 {
            return Err(ForecastError::InvalidParameter {
                name: "s".to_string(),
                reason: "Seasonal period must be >= 2 when seasonal orders are set".to_string(),
            });
        }

        Ok(Self {
            p,
            d,
            q,
            seasonal_p,
            seasonal_d,
            seasonal_q,
            s,
            ar_coeffs: vec![0.0; p],
            ma_coeffs: vec![0.0; q],
            sar_coeffs: vec![0.0; seasonal_p],
            sma_coeffs: vec![0.0; seasonal_q],
            constant: 0.0,
            stages: Vec::new(),
            lags: Vec::new(),
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Non-seasonal and seasonal orders as `((p,d,q), (P,D,Q,s))`.
    pub fn orders(&self) -> ((usize, usize, usize), (usize, usize, usize, usize)) {
        (
            (self.p, self.d, self.q),
            (self.seasonal_p, self.seasonal_d, self.seasonal_q, self.s),
        )
    }

    fn min_observations(&self) -> usize {
        self.p
            + self.d
            + self.q
            + self.s * (self.seasonal_p + self.seasonal_d + self.seasonal_q)
            + 10
    }

    /// Replaces interior NaNs with linear interpolation between the nearest
    /// observed values; leading/trailing NaNs take the nearest observation.
    fn bridge_gaps(data: &[f64]) -> Result<Vec<f64>, ForecastError> {
        if data.iter().any(|x| x.is_infinite()) {
            return Err(ForecastError::InvalidData(
                "Data contains infinite values".to_string(),
            ));
        }

        let known: Vec<usize> = (0..data.len()).filter(|&i| data[i].is_finite()).collect();
        let (Some(&first), Some(&last)) = (known.first(), known.last()) else {
            return Err(ForecastError::InvalidData(
                "Data contains no observed values".to_string(),
            ));
        };

        let mut out = data.to_vec();
        for i in 0..first {
            out[i] = out[first];
        }
        for i in (last + 1)..out.len() {
            out[i] = out[last];
        }
        for pair in known.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if b > a + 1 {
                let step = (out[b] - out[a]) / (b - a) as f64;
                for i in (a + 1)..b {
                    out[i] = out[a] + step * (i - a) as f64;
                }
            }
        }
        Ok(out)
    }

    /// One differencing pass at `lag`.
    fn difference(data: &[f64], lag: usize) -> Vec<f64> {
        if data.len() <= lag {
            return Vec::new();
        }
        (lag..data.len()).map(|i| data[i] - data[i - lag]).collect()
    }

    /// Reverses one differencing pass: `prev` is the series the pass was
    /// applied to, `diffs` are future values on the differenced scale.
    fn integrate(prev: &[f64], lag: usize, diffs: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(diffs.len());
        for (i, &dv) in diffs.iter().enumerate() {
            let base = if i < lag {
                prev[prev.len() - lag + i]
            } else {
                out[i - lag]
            };
            out.push(dv + base);
        }
        out
    }

    /// Autocovariances of the centered series at lags `0, stride, 2*stride, ..`.
    fn autocovariances(centered: &[f64], max_order: usize, stride: usize) -> Vec<f64> {
        let n = centered.len();
        let mut autocov = vec![0.0; max_order + 1];
        for (k, slot) in autocov.iter_mut().enumerate() {
            let lag = k * stride;
            let mut sum = 0.0;
            for i in lag..n {
                sum += centered[i] * centered[i - lag];
            }
            *slot = sum / n as f64;
        }
        autocov
    }

    /// Solves the Yule-Walker equations with the Levinson-Durbin recursion.
    fn levinson_durbin(autocov: &[f64], order: usize) -> Vec<f64> {
        if order == 0 {
            return Vec::new();
        }

        let mut coeffs = vec![0.0; order];
        if autocov[0].abs() > 1e-10 {
            coeffs[0] = autocov[1] / autocov[0];

            for k in 1..order {
                let mut sum = autocov[k + 1];
                for j in 0..k {
                    sum -= coeffs[j] * autocov[k - j];
                }

                let mut denom = autocov[0];
                for j in 0..k {
                    denom -= coeffs[j] * autocov[j + 1];
                }

                if denom.abs() > 1e-10 {
                    let new_coeff = sum / denom;
                    let old_coeffs = coeffs.clone();
                    coeffs[k] = new_coeff;
                    for j in 0..k {
                        coeffs[j] = old_coeffs[j] - new_coeff * old_coeffs[k - 1 - j];
                    }
                }
            }
        }
        coeffs
    }

    /// Estimates MA-style coefficients from residual autocorrelations at lags
    /// `stride, 2*stride, ..`, clamped for stability.
    fn ma_from_residuals(residuals: &[f64], order: usize, stride: usize) -> Vec<f64> {
        if order == 0 || residuals.is_empty() {
            return vec![0.0; order];
        }

        let n = residuals.len();
        let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();
        let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

        let mut coeffs = vec![0.0; order];
        if var.abs() > 1e-10 {
            for (k, slot) in coeffs.iter_mut().enumerate() {
                let lag = (k + 1) * stride;
                if lag >= n {
                    break;
                }
                let mut sum = 0.0;
                for i in lag..n {
                    sum += centered[i] * centered[i - lag];
                }
                *slot = ((sum / n as f64) / var).clamp(-0.99, 0.99);
            }
        }
        coeffs
    }

    /// One-step value on the differenced scale given history `w` and residual
    /// history `e` aligned to `w`.
    fn step(&self, w: &[f64], e: &[f64]) -> f64 {
        let mut value = self.constant;
        for (j, &c) in self.ar_coeffs.iter().enumerate() {
            value += c * (w[w.len() - 1 - j] - self.constant);
        }
        for (k, &c) in self.sar_coeffs.iter().enumerate() {
            let lag = (k + 1) * self.s;
            if w.len() >= lag {
                value += c * (w[w.len() - lag] - self.constant);
            }
        }
        for (j, &c) in self.ma_coeffs.iter().enumerate() {
            if e.len() > j {
                value += c * e[e.len() - 1 - j];
            }
        }
        for (k, &c) in self.sma_coeffs.iter().enumerate() {
            let lag = (k + 1) * self.s;
            if e.len() >= lag {
                value += c * e[e.len() - lag];
            }
        }
        value
    }
}

impl Predictor for Sarima {
    fn fit(&mut self, data: &[f64]) -> Result<(), ForecastError> {
        let min_required = self.min_observations();
        if data.len() < min_required {
            return Err(ForecastError::InsufficientData {
                required: min_required,
                actual: data.len(),
            });
        }

        let bridged = Self::bridge_gaps(data)?;

        // Seasonal differencing first, then non-seasonal, keeping every
        // intermediate series so forecasts can be integrated back.
        let mut stages = vec![bridged];
        let mut lags = Vec::with_capacity(self.seasonal_d + self.d);
        for _ in 0..self.seasonal_d {
            lags.push(self.s);
        }
        for _ in 0..self.d {
            lags.push(1);
        }
        for &lag in &lags {
            let prev = stages.last().map(Vec::as_slice).unwrap_or_default();
            let next = Self::difference(prev, lag);
            if next.is_empty() {
                return Err(ForecastError::InsufficientData {
                    required: min_required,
                    actual: data.len(),
                });
            }
            stages.push(next);
        }

        let w = stages.last().map(Vec::as_slice).unwrap_or_default();
        let n = w.len();
        let mean: f64 = w.iter().sum::<f64>() / n as f64;
        self.constant = mean;

        let centered: Vec<f64> = w.iter().map(|x| x - mean).collect();
        self.ar_coeffs = if self.p > 0 {
            Self::levinson_durbin(&Self::autocovariances(&centered, self.p, 1), self.p)
        } else {
            Vec::new()
        };
        self.sar_coeffs = if self.seasonal_p > 0 && n > self.seasonal_p * self.s {
            Self::levinson_durbin(
                &Self::autocovariances(&centered, self.seasonal_p, self.s),
                self.seasonal_p,
            )
        } else {
            vec![0.0; self.seasonal_p]
        };

        // In-sample one-step residuals from the AR side only; the MA side is
        // then estimated from their autocorrelations.
        let start = self.p.max(self.seasonal_p * self.s);
        let mut residuals = vec![0.0; n];
        for t in start..n {
            let mut prediction = mean;
            for (j, &c) in self.ar_coeffs.iter().enumerate() {
                prediction += c * (w[t - 1 - j] - mean);
            }
            for (k, &c) in self.sar_coeffs.iter().enumerate() {
                prediction += c * (w[t - (k + 1) * self.s] - mean);
            }
            residuals[t] = w[t] - prediction;
        }
        self.ma_coeffs = Self::ma_from_residuals(&residuals, self.q, 1);
        self.sma_coeffs = Self::ma_from_residuals(&residuals, self.seasonal_q, self.s);

        self.residuals = residuals;
        self.stages = stages;
        self.lags = lags;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>, ForecastError> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }
        if steps == 0 {
            return Ok(Vec::new());
        }

        let w = self.stages.last().map(Vec::as_slice).unwrap_or_default();
        let n = w.len();
        let mut extended = w.to_vec();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let value = self.step(&extended, &extended_residuals);
            extended.push(value);
            // Future shocks are their expectation, zero.
            extended_residuals.push(0.0);
        }

        // Integrate back through the differencing pipeline in reverse order.
        let mut forecasts = extended[n..].to_vec();
        for i in (0..self.lags.len()).rev() {
            forecasts = Self::integrate(&self.stages[i], self.lags[i], &forecasts);
        }
        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
