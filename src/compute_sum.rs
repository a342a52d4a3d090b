use algo_tools::interactive::compute_sum_session;
use algo_tools::prompt::Prompter;

use std::error::Error;
use std::io;
use std::process;

fn run() -> Result<(), Box<dyn Error>> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    compute_sum_session(&mut prompter)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
