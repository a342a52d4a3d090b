use std::io::{self, Write};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistogramError {
    #[error("the number of intervals must be at least 1")]
    NoIntervals,
    #[error("no samples to count")]
    NoSamples,
}

/// Counts of samples in equal-width intervals over `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: i64,
    pub max: i64,
    pub width: f64,
    pub counts: Vec<u64>,
    pub k_max_count: usize, // Index of the most populated interval
}

/// One interval of a histogram with its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl Histogram {
    /// Value `x` goes to the smallest interval `k` with `x <= min + (k+1)*width`,
    /// and to the last interval if there is none. If all samples are equal the
    /// width is zero and every sample lands in interval 0.
    pub fn from_samples(samples: &[i64], n_intervals: usize) -> Result<Self, HistogramError> {
        if n_intervals == 0 {
            return Err(HistogramError::NoIntervals);
        }
        let (&first, rest) = samples.split_first().ok_or(HistogramError::NoSamples)?;

        let mut min = first;
        let mut max = first;
        for &x in rest {
            if x < min {
                min = x;
            } else if x > max {
                max = x;
            }
        }

        let mut hist = Histogram {
            min,
            max,
            width: (max as f64 - min as f64) / n_intervals as f64,
            counts: vec![0; n_intervals],
            k_max_count: 0,
        };

        for &x in samples {
            let k = hist.interval_of(x);
            hist.counts[k] += 1;
            if hist.counts[k] > hist.counts[hist.k_max_count] {
                hist.k_max_count = k;
            }
        }
        Ok(hist)
    }

    pub fn n_intervals(&self) -> usize {
        self.counts.len()
    }

    pub fn interval_of(&self, x: i64) -> usize {
        let n = self.n_intervals();
        let mut k = 1;
        while k < n && x as f64 > self.lower_bound(k) {
            k += 1;
        }
        k - 1
    }

    pub fn lower_bound(&self, k: usize) -> f64 {
        self.min as f64 + k as f64 * self.width
    }

    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.counts.iter().enumerate().map(move |(k, &count)| Interval {
            index: k,
            lower: self.lower_bound(k),
            upper: self.lower_bound(k + 1),
            count,
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Writes each interval's lower bound followed by a bar of '#' characters.
/// The most populated interval gets a 40 character bar.
pub fn print_histogram(hist: &Histogram, out: &mut impl Write) -> io::Result<()> {
    const BAR_WIDTH: f64 = 40.0;
    let peak = hist.counts[hist.k_max_count].max(1) as f64;
    for interval in hist.intervals() {
        let bar_len = (interval.count as f64 * BAR_WIDTH / peak) as usize;
        writeln!(out, "{}\t{}", interval.lower, "#".repeat(bar_len))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_intervals_boundary() {
        let samples: Vec<i64> = (1..=10).collect();
        let hist = Histogram::from_samples(&samples, 2).unwrap();
        assert_eq!(hist.width, 4.5);
        assert_eq!(hist.interval_of(5), 0); // 5 <= 5.5
        assert_eq!(hist.interval_of(6), 1);
        assert_eq!(hist.counts, vec![5, 5]);
        assert_eq!(hist.k_max_count, 0); // Ties keep the first interval
    }

    #[test]
    fn test_value_on_boundary_goes_left() {
        // Width 2: boundaries at 2, 4, 6
        let hist = Histogram::from_samples(&[0, 2, 4, 6, 8], 4).unwrap();
        assert_eq!(hist.counts, vec![2, 1, 1, 1]);
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn test_most_populated() {
        let hist = Histogram::from_samples(&[0, 9, 9, 9, 1, 10], 5).unwrap();
        assert_eq!(hist.counts, vec![2, 0, 0, 0, 4]);
        assert_eq!(hist.k_max_count, 4);
    }

    #[test]
    fn test_all_equal_samples() {
        let hist = Histogram::from_samples(&[3, 3, 3], 4).unwrap();
        assert_eq!(hist.width, 0.0);
        assert_eq!(hist.counts, vec![3, 0, 0, 0]);
        assert!(hist.intervals().all(|i| i.lower == 3.0 && i.upper == 3.0));
    }

    #[test]
    fn test_full_i64_range() {
        let hist = Histogram::from_samples(&[i64::MIN, 0, i64::MAX], 2).unwrap();
        assert!(hist.width > 0.0);
        assert_eq!(hist.lower_bound(1), 0.0);
        assert_eq!(hist.counts, vec![2, 1]);
        assert_eq!(hist.interval_of(i64::MAX), 1);
    }

    #[test]
    fn test_errors() {
        assert_eq!(Histogram::from_samples(&[1, 2], 0), Err(HistogramError::NoIntervals));
        assert_eq!(Histogram::from_samples(&[], 3), Err(HistogramError::NoSamples));
    }

    #[test]
    fn test_print_histogram() {
        let hist = Histogram::from_samples(&[0, 0, 10], 2).unwrap();
        let mut out = Vec::<u8>::new();
        print_histogram(&hist, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("0\t{}", "#".repeat(40)));
        assert_eq!(lines[1], format!("5\t{}", "#".repeat(20)));
    }
}
