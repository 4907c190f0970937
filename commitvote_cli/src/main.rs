use clap::{App, Arg, SubCommand};

mod command_commitment;
mod command_run;
mod config;

use command_commitment::command_commitment;
use command_run::command_run;
use config::Config;

fn main() {
    let matches = App::new("commitvote")
        .version("0.1")
        .about("Commit-reveal voting: build commitments and replay operation transcripts")
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .arg(
            Arg::with_name("open-eligibility")
                .long("open-eligibility")
                .help("Allow voters to be added in any phase - can also be set with COMMITVOTE_OPEN_ELIGIBILITY"),
        )
        .subcommand(
            SubCommand::with_name("commitment")
                .about("Compute the commitment for a candidate and secret")
                .arg(
                    Arg::with_name("CANDIDATE")
                        .index(1)
                        .required(true)
                        .help("Candidate name, or number with --index"),
                )
                .arg(
                    Arg::with_name("SECRET")
                        .index(2)
                        .required(false)
                        .help("Secret salt. A random one is generated when omitted"),
                )
                .arg(
                    Arg::with_name("index")
                        .long("index")
                        .help("Treat CANDIDATE as a candidate number"),
                ),
        )
        .subcommand(
            SubCommand::with_name("run")
                .about("Apply a transcript of operations to a fresh engine")
                .arg(
                    Arg::with_name("INPUT")
                        .index(1)
                        .required(true)
                        .help("Transcript file in JSON or CBOR format"),
                )
                .arg(
                    Arg::with_name("keep-going")
                        .long("keep-going")
                        .help("Continue after a rejected operation"),
                ),
        )
        .get_matches();

    let level = match matches.occurrences_of("v") {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::from_env();
    if matches.is_present("open-eligibility") {
        config.open_eligibility = true;
    }

    // Subcommands
    if let Some(matches) = matches.subcommand_matches("commitment") {
        command_commitment(matches);
        std::process::exit(0);
    }

    if let Some(matches) = matches.subcommand_matches("run") {
        command_run(matches, &config);
        std::process::exit(0);
    }

    eprintln!("{}", matches.usage());
    std::process::exit(1);
}

pub fn expand(filename: &str) -> String {
    shellexpand::full(filename)
        .map(|expanded| expanded.into_owned())
        .unwrap_or_else(|e| {
            eprintln!("commitvote: unable to expand {}: {}", filename, e);
            std::process::exit(1);
        })
}
