use serde_derive::{Deserialize, Serialize};

/// Descriptive statistics over one speed history.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpeedStats {
    pub count: usize,
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub median: f32,
}

/// Reduces a speed history to descriptive statistics.
///
/// `None` means no samples were available (e.g. a track matched only once),
/// which is a normal outcome, not an error. The median of an even-length
/// history is the mean of the two central values; the mean accumulates in
/// f64 to keep long histories stable.
pub fn summarize(samples: &[f32]) -> Option<SpeedStats> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    let mean = (sorted.iter().map(|&v| v as f64).sum::<f64>() / n as f64) as f32;

    Some(SpeedStats {
        count: n,
        min: sorted[0],
        max: sorted[n - 1],
        mean,
        median,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_history() {
        let stats = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn single_sample() {
        let stats = summarize(&[5.0]).unwrap();

        assert_eq!(stats.count, 1);
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn empty_history_is_no_data() {
        assert_eq!(summarize(&[]), None);
    }

    #[test]
    fn odd_history_takes_central_value() {
        let stats = summarize(&[9.0, 1.0, 4.0]).unwrap();

        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = summarize(&[3.0, 1.0, 2.0, 4.0]).unwrap();
        let b = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(a, b);
    }
}
