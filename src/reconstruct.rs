use crate::compressor::{Sample, Value};

/// Reads a compressed series back as a piecewise-linear function.
///
/// Returns the reconstructed value at time `t`, or `None` when the series
/// carries no information there: before the first point, after the last,
/// or anywhere a gap marker separates `t` from real data. A timestamp that
/// hits a retained point exactly returns that point's stored value.
///
/// # Example
/// ```
/// use swingdoor::{value_at, Sample};
///
/// let series = [Sample::new(0.0, 0.0), Sample::new(10.0, 5.0)];
/// assert_eq!(value_at(&series, 4.0), Some(2.0));
/// assert_eq!(value_at(&series, 11.0), None);
/// ```
pub fn value_at(points: &[Sample], t: f64) -> Option<f64> {
    // Index of the first point strictly past `t`; the point before it (if
    // any) is the left end of the bracketing segment.
    let idx = points.partition_point(|p| p.timestamp <= t);
    if idx == 0 {
        return None;
    }
    let left = points[idx - 1];
    let lv = match left.value {
        Value::Present(v) => v,
        // Left neighbour is a gap marker: `t` falls in a hole.
        Value::Absent => return None,
    };
    if left.timestamp == t {
        return Some(lv);
    }
    let right = points.get(idx)?;
    let rv = match right.value {
        Value::Present(v) => v,
        Value::Absent => return None,
    };
    let frac = (t - left.timestamp) / (right.timestamp - left.timestamp);
    Some(lv + (rv - lv) * frac)
}
