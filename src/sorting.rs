use std::str::FromStr;

use log::debug;
use rand::Rng;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Quicksort ranges shorter than this are sorted on the current thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bubble,
    Quick,
    Heap,
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bubble" => Ok(Algorithm::Bubble),
            "quick" => Ok(Algorithm::Quick),
            "heap" => Ok(Algorithm::Heap),
            _ => Err(format!("unknown sorting algorithm: {}", s)),
        }
    }
}

impl Algorithm {
    pub fn sort<T: PartialOrd + Send>(self, values: &mut [T], sorter: &QuickSorter) {
        match self {
            Algorithm::Bubble => bubble_sort(values),
            Algorithm::Quick => sorter.sort(values),
            Algorithm::Heap => heap_sort(values),
        }
    }
}

// Compares neighbouring elements and swaps inversions. After each pass the
// elements behind the last swap are in their final places.
pub fn bubble_sort<T: PartialOrd>(values: &mut [T]) {
    if values.len() < 2 {
        return;
    }
    let mut end = values.len() - 2; // Last index compared with its successor
    loop {
        let mut last_swap: Option<usize> = None;
        for i in 0..=end {
            if values[i] > values[i + 1] {
                values.swap(i, i + 1);
                last_swap = Some(i);
            }
        }
        match last_swap {
            None | Some(0) => break,
            Some(pos) => end = pos - 1,
        }
    }
}

/// Partitions `values[start..stop]` around the element initially at index `p`.
/// Returns the final index `q` of the pivot: everything in `[start, q)` is
/// `<=` the pivot and everything in `(q, stop)` is `>` the pivot.
pub fn partition<T: PartialOrd>(values: &mut [T], start: usize, stop: usize, p: usize) -> usize {
    assert!(start <= p && p < stop && stop <= values.len(), "pivot index out of range");

    values.swap(p, start);
    let mut p = start;
    // Undiscovered range is [lo, hi)
    let mut lo = start + 1;
    let mut hi = stop;
    // Invariant: values[p] is the pivot and p == lo - 1
    while lo < hi {
        if values[lo] <= values[p] {
            values.swap(p, lo);
            p += 1;
            lo += 1;
        } else {
            hi -= 1;
            values.swap(lo, hi);
        }
    }
    p
}

/// Randomized quicksort that splits large ranges across a bounded thread pool.
pub struct QuickSorter {
    pool: Option<ThreadPool>, // None = rayon's global pool
    parallel_threshold: usize,
}

impl Default for QuickSorter {
    fn default() -> Self {
        QuickSorter {
            pool: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl QuickSorter {
    // threads == 0 lets rayon pick one thread per core.
    pub fn new(threads: usize, parallel_threshold: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("quicksort-{}", i))
            .build()?;
        Ok(QuickSorter {
            pool: Some(pool),
            parallel_threshold: parallel_threshold.max(2),
        })
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn sort<T: PartialOrd + Send>(&self, values: &mut [T]) {
        let threshold = self.parallel_threshold;
        match &self.pool {
            Some(pool) => pool.install(|| sort_range(values, threshold)),
            None => sort_range(values, threshold),
        }
    }

    /// Sorts `values[start..stop]`.
    pub fn sort_range<T: PartialOrd + Send>(&self, values: &mut [T], start: usize, stop: usize) {
        self.sort(&mut values[start..stop]);
    }
}

fn sort_range<T: PartialOrd + Send>(mut values: &mut [T], threshold: usize) {
    while values.len() >= 2 {
        let len = values.len();
        let pivot = rand::rng().random_range(0..len);
        let q = partition(values, 0, len, pivot);

        let (lower, rest) = std::mem::take(&mut values).split_at_mut(q);
        let upper = &mut rest[1..];

        if len >= threshold {
            debug!("parallel split of {} elements into {} + {}", len, lower.len(), upper.len());
            rayon::join(|| sort_range(lower, threshold), || sort_range(upper, threshold));
            return;
        }

        // Recurse into the smaller part and loop on the larger one to bound the stack depth
        if lower.len() < upper.len() {
            sort_range(lower, threshold);
            values = upper;
        } else {
            sort_range(upper, threshold);
            values = lower;
        }
    }
}

/// Sorts `values[start..stop]` on rayon's global pool.
pub fn quick_sort<T: PartialOrd + Send>(values: &mut [T], start: usize, stop: usize) {
    if stop >= start + 2 {
        sort_range(&mut values[start..stop], DEFAULT_PARALLEL_THRESHOLD);
    }
}

/// Restores the max-heap property for the subtree rooted at `i`, looking only
/// at indices below `range`.
pub fn max_heapify<T: PartialOrd>(heap: &mut [T], mut i: usize, range: usize) {
    loop {
        let left = 2 * i + 1;
        let right = left + 1;
        let mut max = i;
        if left < range && heap[left] > heap[max] {
            max = left;
        }
        if right < range && heap[right] > heap[max] {
            max = right;
        }
        if max == i {
            return;
        }
        heap.swap(i, max);
        i = max;
    }
}

// Bottom-up, starting from the last node that has a child.
pub fn build_max_heap<T: PartialOrd>(heap: &mut [T]) {
    let len = heap.len();
    for k in (0..len / 2).rev() {
        max_heapify(heap, k, len);
    }
}

pub fn heap_sort<T: PartialOrd>(values: &mut [T]) {
    build_max_heap(values);
    for heap_end in (1..values.len()).rev() {
        // Move the current maximum behind the shrinking heap
        values.swap(0, heap_end);
        max_heapify(values, 0, heap_end);
    }
}

/// True iff no element is greater than its successor.
pub fn test_sorted<T: PartialOrd>(values: &[T]) -> bool {
    for pair in values.windows(2) {
        if pair[0] > pair[1] {
            return false;
        }
    }
    true
}
