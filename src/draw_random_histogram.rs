use algo_tools::chart::SvgTurtle;
use algo_tools::interactive::draw_random_histogram;
use algo_tools::prompt::Prompter;

use std::env;
use std::error::Error;
use std::io;
use std::process;
use std::path::Path;

// Usage: draw_random_histogram [chart.svg]
fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let svg_path = args.get(1);

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let mut turtle = SvgTurtle::new();
    let hist = draw_random_histogram(&mut prompter, &mut turtle)?;

    if let (Some(_), Some(path)) = (hist, svg_path) {
        turtle.save(Path::new(path))?;
        eprintln!("Bar chart written to {}", path);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
