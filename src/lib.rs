pub mod chart;
pub mod cli;
pub mod fileapi;
pub mod fill;
pub mod histogram;
pub mod interactive;
pub mod prompt;
pub mod sorting;

use std::io::{self, Write};
use std::path::Path;

use indicatif::ProgressBar;
use log::{info, warn};
use rand::Rng;

use fileapi::{FileApiError, FileHandle, FileTable};
use sorting::QuickSorter;

// Number files at least this long get a progress bar while being written.
const PROGRESS_BAR_MIN_COUNT: usize = 100_000;

fn read_ints(files: &mut FileTable, handle: FileHandle, max_numbers: usize) -> Result<Vec<i64>, FileApiError> {
    let mut numbers = Vec::new();
    while numbers.len() < max_numbers && !files.is_eof(handle)? {
        match files.read_int(handle) {
            Ok(x) => numbers.push(x),
            Err(FileApiError::EndOfInput) => break, // Only whitespace was left
            Err(e) => return Err(e),
        }
    }
    Ok(numbers)
}

/// Reads up to `max_numbers` whitespace-separated integers from a file.
/// The file is closed in any case.
pub fn read_numbers<P: AsRef<Path>>(path: P, max_numbers: usize) -> Result<Vec<i64>, FileApiError> {
    let mut files = FileTable::new();
    let handle = files.open(path.as_ref())?;
    let result = read_ints(&mut files, handle, max_numbers);
    let closed = files.close(handle);
    let numbers = result?;
    closed?;
    info!("read {} numbers from {}", numbers.len(), path.as_ref().display());
    Ok(numbers)
}

/// Writes `count` random integers from `[min_val, max_val]` to a file, one per
/// line. Returns the number of values written.
pub fn generate_random_number_file<P: AsRef<Path>, R: Rng + ?Sized>(
    path: P,
    count: usize,
    min_val: i64,
    max_val: i64,
    rng: &mut R,
) -> Result<usize, FileApiError> {
    let (lo, hi) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        warn!("swapping the bounds {} and {}", min_val, max_val);
        (max_val, min_val)
    };

    let mut files = FileTable::new();
    let handle = files.create(path.as_ref())?;

    let progress = if count >= PROGRESS_BAR_MIN_COUNT {
        ProgressBar::new(count as u64)
    } else {
        ProgressBar::hidden()
    };
    for _ in 0..count {
        let number = rng.random_range(lo..=hi);
        files.write_line(handle, &number)?;
        progress.inc(1);
    }
    progress.finish_and_clear();

    files.close(handle)?;
    info!("wrote {} numbers to {}", count, path.as_ref().display());
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub sum: f64,
    pub average: f64,
}

// None if there are no values
pub fn compute_sum(values: &[i64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&x| x as f64).sum();
    Some(Summary {
        sum,
        average: sum / values.len() as f64,
    })
}

pub fn print_summary(summary: Option<Summary>, out: &mut impl Write) -> io::Result<()> {
    match summary {
        Some(s) => {
            writeln!(out, "sum = {}", s.sum)?;
            writeln!(out, "average = {}", s.average)
        }
        None => writeln!(out, "No numbers read."),
    }
}

/// The outputs of bubble sort, quicksort and heap sort on copies of the same array.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub sorted: [Vec<i64>; 3],
    pub is_sorted: [bool; 3],
}

impl Comparison {
    pub fn all_sorted(&self) -> bool {
        self.is_sorted.iter().all(|&ok| ok)
    }

    // Indices where the three outputs do not agree
    pub fn differences(&self) -> Vec<usize> {
        let [a, b, c] = &self.sorted;
        (0..a.len()).filter(|&i| a[i] != b[i] || a[i] != c[i]).collect()
    }
}

/// Sorts three copies of `values` concurrently, one per algorithm.
pub fn compare_sorters(values: &[i64], sorter: &QuickSorter) -> Comparison {
    let mut bubble = values.to_vec();
    let mut quick = values.to_vec();
    let mut heap = values.to_vec();

    rayon::join(
        || sorting::bubble_sort(&mut bubble),
        || {
            rayon::join(
                || sorter.sort(&mut quick),
                || sorting::heap_sort(&mut heap),
            )
        },
    );

    let is_sorted = [
        sorting::test_sorted(&bubble),
        sorting::test_sorted(&quick),
        sorting::test_sorted(&heap),
    ];
    info!("compared sorters on {} values, sorted: {:?}", values.len(), is_sorted);
    Comparison {
        sorted: [bubble, quick, heap],
        is_sorted,
    }
}

pub fn print_comparison(cmp: &Comparison, show_arrays: bool, out: &mut impl Write) -> io::Result<()> {
    let [a, b, c] = &cmp.sorted;
    if !cmp.all_sorted() {
        for i in cmp.differences() {
            writeln!(out, "Difference at [{}]: {} <-> {} <-> {}", i, a[i], b[i], c[i])?;
        }
    }
    if show_arrays {
        for i in 0..a.len() {
            writeln!(out, "[{}]:\t{}\t{}\t{}", i, a[i], b[i], c[i])?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_sum() {
        assert_eq!(compute_sum(&[]), None);
        let s = compute_sum(&[1, 2, 3, 4]).unwrap();
        assert_eq!(s.sum, 10.0);
        assert_eq!(s.average, 2.5);
    }

    #[test]
    fn test_compare_sorters() {
        let values: Vec<i64> = (0..500).map(|i| (i * 37) % 101).collect();
        let cmp = compare_sorters(&values, &QuickSorter::default());
        assert!(cmp.all_sorted());
        assert!(cmp.differences().is_empty());
        assert_eq!(cmp.sorted[0].len(), 500);
    }

    #[test]
    fn test_print_comparison() {
        let cmp = Comparison {
            sorted: [vec![1, 2], vec![2, 1], vec![1, 2]],
            is_sorted: [true, false, true],
        };
        let mut out = Vec::<u8>::new();
        print_comparison(&cmp, true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Difference at [0]: 1 <-> 2 <-> 1"));
        assert!(text.contains("Difference at [1]: 2 <-> 1 <-> 2"));
        assert!(text.contains("[1]:\t2\t1\t2"));
    }

    #[test]
    fn test_print_summary() {
        let mut out = Vec::<u8>::new();
        print_summary(compute_sum(&[1, 2]), &mut out).unwrap();
        print_summary(None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "sum = 3\naverage = 1.5\nNo numbers read.\n");
    }
}
