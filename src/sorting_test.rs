use algo_tools::fill::make_rng;
use algo_tools::interactive::sorting_test;
use algo_tools::prompt::Prompter;
use algo_tools::sorting::{QuickSorter, DEFAULT_PARALLEL_THRESHOLD};

use std::env;
use std::error::Error;
use std::io;
use std::process;

// Usage: sorting_test [threads]
fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let threads: usize = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => 0,
    };

    let sorter = QuickSorter::new(threads, DEFAULT_PARALLEL_THRESHOLD)?;
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    sorting_test(&mut prompter, &sorter, &mut make_rng(None))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
