use algo_tools::chart::{self, SvgTurtle};
use algo_tools::cli::build_cli;
use algo_tools::fileapi::FileTable;
use algo_tools::fill::{fill_values, make_rng, FillMode};
use algo_tools::histogram::{print_histogram, Histogram};
use algo_tools::sorting::{Algorithm, QuickSorter};
use algo_tools::*;

use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use clap::ArgMatches;

fn run_sort(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let threads = *args.get_one::<usize>("threads").unwrap_or(&0);
    let input = args.get_one::<String>("input").ok_or("missing input")?;
    let algorithm: Algorithm = args
        .get_one::<String>("algorithm")
        .ok_or("missing algorithm")?
        .parse()?;
    let max = *args.get_one::<usize>("max").unwrap_or(&10000);

    let mut values = read_numbers(input, max)?;
    let sorter = QuickSorter::new(threads, sorting::DEFAULT_PARALLEL_THRESHOLD)?;
    algorithm.sort(&mut values, &sorter);

    match args.get_one::<String>("output") {
        Some(outfile) => {
            let mut files = FileTable::new();
            let handle = files.create(outfile)?;
            for x in values.iter() {
                files.write_line(handle, x)?;
            }
            files.close(handle)?;
        }
        None => {
            let mut out = BufWriter::new(io::stdout());
            for x in values.iter() {
                writeln!(out, "{}", x)?;
            }
            out.flush()?;
        }
    }
    Ok(())
}

fn run_compare(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let threads = *args.get_one::<usize>("threads").unwrap_or(&0);
    let count = *args.get_one::<usize>("count").ok_or("missing count")?;
    let mode: FillMode = args
        .get_one::<String>("fill")
        .ok_or("missing fill mode")?
        .parse()?;
    let threshold = *args.get_one::<usize>("threshold").unwrap_or(&sorting::DEFAULT_PARALLEL_THRESHOLD);
    let show = args.get_flag("show");

    let mut rng = make_rng(args.get_one::<u64>("seed").copied());
    let values = fill_values(mode, count, &mut rng);
    let sorter = QuickSorter::new(threads, threshold)?;
    let cmp = compare_sorters(&values, &sorter);

    let mut out = BufWriter::new(io::stdout());
    print_comparison(&cmp, show, &mut out)?;
    if cmp.all_sorted() {
        writeln!(out, "All {} values sorted correctly by all three algorithms.", count)?;
    }
    out.flush()?;
    Ok(())
}

fn run_histogram(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input = args.get_one::<String>("input").ok_or("missing input")?;
    let n_intervals = *args.get_one::<usize>("intervals").unwrap_or(&10);
    let max = *args.get_one::<usize>("max").unwrap_or(&10000);

    let numbers = read_numbers(input, max)?;
    let hist = Histogram::from_samples(&numbers, n_intervals)?;

    let mut out = BufWriter::new(io::stdout());
    writeln!(
        out,
        "Interval with max count: {} ({})",
        hist.k_max_count, hist.counts[hist.k_max_count]
    )?;
    print_histogram(&hist, &mut out)?;
    out.flush()?;

    if let Some(svg) = args.get_one::<String>("svg") {
        let heights: Vec<f64> = hist.counts.iter().map(|&c| c as f64).collect();
        let mut turtle = SvgTurtle::new();
        chart::draw_bar_chart(&heights, &mut turtle)?;
        turtle.save(Path::new(svg))?;
    }
    Ok(())
}

fn run_generate(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let output = args.get_one::<String>("output").ok_or("missing output")?;
    let count = *args.get_one::<usize>("count").ok_or("missing count")?;
    let min = *args.get_one::<i64>("min").unwrap_or(&0);
    let max = *args.get_one::<i64>("max").unwrap_or(&9999);

    let mut rng = make_rng(args.get_one::<u64>("seed").copied());
    generate_random_number_file(output, count, min, max, &mut rng)?;
    eprintln!("Wrote {} numbers to {}", count, output);
    Ok(())
}

fn run_sum(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let input = args.get_one::<String>("input").ok_or("missing input")?;
    let max = *args.get_one::<usize>("max").unwrap_or(&1000);

    let numbers = read_numbers(input, max)?;
    print_summary(compute_sum(&numbers), &mut io::stdout())?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("sort", sub_matches)) => run_sort(sub_matches),
        Some(("compare", sub_matches)) => run_compare(sub_matches),
        Some(("histogram", sub_matches)) => run_histogram(sub_matches),
        Some(("generate", sub_matches)) => run_generate(sub_matches),
        Some(("sum", sub_matches)) => run_sum(sub_matches),
        _ => Ok(()), // clap requires a subcommand
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
