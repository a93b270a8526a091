//! Price-versus-score regression and relative value.
//!
//! Fits `price = slope * score + intercept` by ordinary least squares over
//! priced, scored rows, then rates each row by how far its price sits below
//! (undervalued) or above the fitted line.

/// Running least-squares accumulator.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    n: usize,
    sum_x: f64,
    sum_y: f64,
    sum_xx: f64,
    sum_xy: f64,
    sum_yy: f64,
}

/// Result of a linear fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in price per score point.
    pub slope: f64,
    /// Price at score zero.
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Number of points fitted.
    pub points: usize,
}

/// Relative value of one row against a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeValue {
    /// Price predicted from the score.
    pub predicted_price: f64,
    /// Price actually used.
    pub actual_price: f64,
    /// `(predicted - actual) / predicted * 100`.
    pub relative_value: f64,
    /// Priced below the line.
    pub is_undervalued: bool,
    /// Absolute relative value.
    pub value_score: f64,
}

impl LinearRegression {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an `(x, y)` observation. Non-finite values are ignored.
    pub fn add_point(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xx += x * x;
        self.sum_xy += x * y;
        self.sum_yy += y * y;
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether no observations were added.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Fit the line. `None` with fewer than two points or when every `x` is equal.
    pub fn fit(&self) -> Option<LinearFit> {
        if self.n < 2 {
            return None;
        }
        let n = self.n as f64;
        let sxx = n * self.sum_xx - self.sum_x * self.sum_x;
        let sxy = n * self.sum_xy - self.sum_x * self.sum_y;
        let syy = n * self.sum_yy - self.sum_y * self.sum_y;

        if sxx.abs() < f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        let intercept = (self.sum_y - slope * self.sum_x) / n;
        let r_squared = if syy.abs() < f64::EPSILON {
            1.0
        } else {
            (sxy * sxy) / (sxx * syy)
        };

        Some(LinearFit {
            slope,
            intercept,
            r_squared,
            points: self.n,
        })
    }
}

impl LinearFit {
    /// Price predicted for a score.
    #[inline]
    pub fn predict(&self, score: f64) -> f64 {
        self.slope * score + self.intercept
    }

    /// Human-readable equation, e.g. `y = 12.5000x + -1000.0000`.
    pub fn equation(&self) -> String {
        format!("y = {:.4}x + {:.4}", self.slope, self.intercept)
    }

    /// Rate a row's price against the fitted line.
    ///
    /// `None` when the predicted price is zero or not finite.
    pub fn relative_value(&self, price: f64, score: f64) -> Option<RelativeValue> {
        let predicted_price = self.predict(score);
        if !predicted_price.is_finite() || predicted_price == 0.0 {
            return None;
        }
        let relative_value = (predicted_price - price) / predicted_price * 100.0;
        Some(RelativeValue {
            predicted_price,
            actual_price: price,
            relative_value,
            is_undervalued: relative_value > 0.0,
            value_score: relative_value.abs(),
        })
    }
}
