// The question-and-answer sessions of the interactive programs. They read
// answers from any BufRead and write to any Write so they can be replayed.

use std::io::{BufRead, Write};

use log::warn;
use rand::Rng;

use crate::chart::{self, Turtle};
use crate::fileapi::FileTable;
use crate::fill::{fill_values, FillMode};
use crate::histogram::Histogram;
use crate::prompt::{PromptError, Prompter};
use crate::sorting::QuickSorter;
use crate::{compare_sorters, compute_sum, print_comparison, print_summary, read_numbers};

pub const HISTOGRAM_MAX_NUMBERS: usize = 10000;
pub const SUM_MAX_NUMBERS: usize = 1000;

const FILE_QUESTION: &str = "Name/path of the number file";

/// Fills an array, sorts three copies with different algorithms and reports
/// where the results disagree.
pub fn sorting_test<R: BufRead, W: Write, G: Rng + ?Sized>(
    prompter: &mut Prompter<R, W>,
    sorter: &QuickSorter,
    rng: &mut G,
) -> Result<(), PromptError> {
    let count = prompter.ask_int_at_least("elementCount", 1)?;
    let mode = prompter.ask_until("Filling: 1 = random, 2 = increasing, 3 = decreasing", |answer| {
        answer.parse::<i64>().ok().and_then(FillMode::from_code)
    })?;

    let values = fill_values(mode, count as usize, rng);
    let cmp = compare_sorters(&values, sorter);
    print_comparison(&cmp, false, prompter.output())?;

    let show = prompter.ask_choice("Show arrays (yes/no)?", &["yes", "no"])?;
    if show == "yes" {
        print_comparison(&cmp, true, prompter.output())?;
    }
    Ok(())
}

/// Reads a number file chosen by the user and prints (and draws) its histogram.
/// Returns None if the user gave an empty file name or no numbers could be read.
pub fn draw_random_histogram<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    turtle: &mut impl Turtle,
) -> Result<Option<Histogram>, PromptError> {
    let file_name = loop {
        let name = prompter.ask(FILE_QUESTION)?;
        if name.is_empty() {
            return Ok(None);
        }
        let mut files = FileTable::new();
        match files.open(&name) {
            Ok(handle) => {
                if let Err(e) = files.close(handle) {
                    warn!("{}", e);
                }
                break name;
            }
            Err(e) => warn!("{}", e),
        }
    };

    let n_intervals = prompter.ask_int_at_least("number of intervals", 1)? as usize;

    let numbers = match read_numbers(&file_name, HISTOGRAM_MAX_NUMBERS) {
        Ok(numbers) => numbers,
        Err(e) => {
            writeln!(prompter.output(), "{}", e)?;
            Vec::new()
        }
    };

    let hist = match Histogram::from_samples(&numbers, n_intervals) {
        Ok(hist) => hist,
        Err(_) => {
            writeln!(prompter.output(), "No numbers read.")?;
            return Ok(None);
        }
    };

    let heights: Vec<f64> = hist.counts.iter().map(|&c| c as f64).collect();
    if let Err(e) = chart::draw_bar_chart(&heights, turtle) {
        warn!("{}", e);
    }

    let out = prompter.output();
    writeln!(
        out,
        "Interval with max count: {} ({})",
        hist.k_max_count, hist.counts[hist.k_max_count]
    )?;
    for interval in hist.intervals() {
        writeln!(
            out,
            "{} numbers in interval {} ({} ... {})",
            interval.count, interval.index, interval.lower, interval.upper
        )?;
    }
    Ok(Some(hist))
}

/// Prints the sum and average of the numbers in a file chosen by the user.
pub fn compute_sum_session<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<(), PromptError> {
    let file_name = prompter.ask(FILE_QUESTION)?;
    let numbers = match read_numbers(&file_name, SUM_MAX_NUMBERS) {
        Ok(numbers) => numbers,
        Err(e) => {
            writeln!(prompter.output(), "{}", e)?;
            Vec::new()
        }
    };
    print_summary(compute_sum(&numbers), prompter.output())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::SvgTurtle;
    use crate::fill::make_rng;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn prompter(input: String) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_sorting_test_session() {
        let mut p = prompter("0\n3\n9\n3\nmaybe\nyes\n".to_owned());
        sorting_test(&mut p, &QuickSorter::default(), &mut make_rng(Some(7))).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("[0]:\t-2\t-2\t-2"));
        assert!(out.contains("[2]:\t0\t0\t0"));
        assert!(!out.contains("Difference"));
    }

    #[test]
    fn test_histogram_session() {
        let file = temp_file("1 2 3 4 5\n6 7 8 9 10\n");
        let input = format!("/nonexistent/numbers.txt\n{}\n2\n", file.path().display());
        let mut p = prompter(input);
        let mut turtle = SvgTurtle::new();
        let hist = draw_random_histogram(&mut p, &mut turtle).unwrap().unwrap();
        assert_eq!(hist.counts, vec![5, 5]);
        assert!(!turtle.segments().is_empty());

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("Interval with max count: 0 (5)"));
        assert!(out.contains("5 numbers in interval 0 (1 ... 5.5)"));
        assert!(out.contains("5 numbers in interval 1 (5.5 ... 10)"));
    }

    #[test]
    fn test_histogram_session_empty_name() {
        let mut p = prompter("\n".to_owned());
        let mut turtle = SvgTurtle::new();
        assert!(draw_random_histogram(&mut p, &mut turtle).unwrap().is_none());
    }

    #[test]
    fn test_histogram_session_no_numbers() {
        let file = temp_file("  \n");
        let mut p = prompter(format!("{}\n3\n", file.path().display()));
        let mut turtle = SvgTurtle::new();
        assert!(draw_random_histogram(&mut p, &mut turtle).unwrap().is_none());
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("No numbers read."));
    }

    #[test]
    fn test_compute_sum_session() {
        let file = temp_file("1\n2\n3\n4\n");
        let mut p = prompter(format!("{}\n", file.path().display()));
        compute_sum_session(&mut p).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("sum = 10"));
        assert!(out.contains("average = 2.5"));
    }

    #[test]
    fn test_compute_sum_session_bad_token() {
        let file = temp_file("1 2 x 4\n");
        let mut p = prompter(format!("{}\n", file.path().display()));
        compute_sum_session(&mut p).unwrap();
        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.contains("cannot read \"x\" as integer"));
        assert!(out.contains("No numbers read."));
    }
}
