use clap::{value_parser, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("algotools")
        .version("0.1.0")
        .about("Sorting, histogram and number-file tools")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .value_parser(value_parser!(usize))
                .default_value("0")
                .help("Worker threads for parallel sorting (0 = one per core)")
                .global(true),
        )
        .subcommand(
            Command::new("sort")
                .about("Sort the integers of a number file.")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .required(true)
                        .help("Input number file"),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Output filename (default: stdout)"),
                )
                .arg(
                    Arg::new("algorithm")
                        .short('a')
                        .long("algorithm")
                        .value_parser(["bubble", "quick", "heap"])
                        .default_value("quick")
                        .help("Sorting algorithm"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(usize))
                        .default_value("10000")
                        .help("Maximum number of values to read"),
                ),
        )
        .subcommand(
            Command::new("compare")
                .about("Sort three copies of a generated array with bubble, quick and heap sort and compare the results.")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Number of elements"),
                )
                .arg(
                    Arg::new("fill")
                        .short('f')
                        .long("fill")
                        .value_parser(["random", "increasing", "decreasing"])
                        .default_value("random")
                        .help("Filling mode"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Seed for the random filling"),
                )
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_parser(value_parser!(usize))
                        .default_value("4096")
                        .help("Quicksort ranges below this size are sorted sequentially"),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .action(ArgAction::SetTrue)
                        .help("Print the three sorted arrays"),
                ),
        )
        .subcommand(
            Command::new("histogram")
                .about("Bucket the integers of a number file into equal-width intervals.")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .required(true)
                        .help("Input number file"),
                )
                .arg(
                    Arg::new("intervals")
                        .short('k')
                        .long("intervals")
                        .value_parser(value_parser!(usize))
                        .default_value("10")
                        .help("Number of intervals"),
                )
                .arg(
                    Arg::new("svg")
                        .long("svg")
                        .help("Also draw the bar chart into this SVG file"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(usize))
                        .default_value("10000")
                        .help("Maximum number of values to read"),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Write random integers to a number file, one per line.")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .required(true)
                        .help("Output filename (.gz for gzipped output)"),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Number of values"),
                )
                .arg(
                    Arg::new("min")
                        .long("min")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .default_value("0")
                        .help("Smallest possible value"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(i64))
                        .allow_negative_numbers(true)
                        .default_value("9999")
                        .help("Largest possible value"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed"),
                ),
        )
        .subcommand(
            Command::new("sum")
                .about("Print the sum and average of the integers of a number file.")
                .arg_required_else_help(true)
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .required(true)
                        .help("Input number file"),
                )
                .arg(
                    Arg::new("max")
                        .long("max")
                        .value_parser(value_parser!(usize))
                        .default_value("1000")
                        .help("Maximum number of values to read"),
                ),
        )
}
