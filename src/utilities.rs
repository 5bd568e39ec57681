/// Grid interpolation helpers for tabulated radial profiles.
///
/// Given arrays of x and y values, interpolate to find the y value at x_new.
/// Outside the tabulated range the first or last y value is returned.
pub fn interpolate_linear(x: &[f64], y: &[f64], x_new: f64) -> f64 {
    // Edge cases
    if x.is_empty() {
        return f64::NAN;
    }
    if x.len() == 1 {
        return y[0];
    }
    if x_new <= x[0] {
        return y[0];
    }
    if x_new >= x[x.len() - 1] {
        return y[y.len() - 1];
    }

    // Binary search for the interval: largest i with x[i] <= x_new
    let mut low = 0usize;
    let mut high = x.len() - 1;
    while high - low > 1 {
        let mid = (low + high) >> 1;
        if x[mid] <= x_new {
            low = mid;
        } else {
            high = mid;
        }
    }
    let x1 = x[low];
    let x2 = x[low + 1];
    let y1 = y[low];
    let y2 = y[low + 1];
    y1 + (x_new - x1) * (y2 - y1) / (x2 - x1)
}
