use super::expand;
use crate::config::Config;
use commitvote::{Engine, Operation};
use log::info;

pub fn command_run(matches: &clap::ArgMatches, config: &Config) {
    let filename = expand(matches.value_of("INPUT").unwrap());
    let keep_going = matches.is_present("keep-going");

    let file_bytes = match std::fs::read(&filename) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("commitvote run: unable to read {}: {}", &filename, e);
            std::process::exit(1);
        }
    };

    // A transcript is normally a list, but a single operation is accepted too
    let operations = Operation::list_from_bytes(&file_bytes)
        .or_else(|e| Operation::from_bytes(&file_bytes).map(|op| vec![op]).map_err(|_| e))
        .unwrap_or_else(|e| {
            eprintln!("commitvote run: unable to decode {}: {}", &filename, e);
            std::process::exit(1);
        });
    info!("{}: {} operations", filename, operations.len());

    let engine = Engine::new(config.engine_config());
    let mut rejected = 0;

    for (i, operation) in operations.iter().enumerate() {
        match engine.apply(operation) {
            Ok(outcome) => {
                let outcome = serde_json::to_string(&outcome).unwrap();
                println!(
                    "{} {} {}: {}",
                    i,
                    operation.name(),
                    operation.election(),
                    outcome
                );
            }
            Err(e) => {
                rejected += 1;
                println!(
                    "{} {} {}: rejected: {}",
                    i,
                    operation.name(),
                    operation.election(),
                    e
                );
                if !keep_going {
                    eprintln!("commitvote run: stopping at operation {}", i);
                    std::process::exit(1);
                }
            }
        }
    }

    for id in engine.elections() {
        let report = serde_json::json!({
            "election": id,
            "stats": engine.get_stats(&id).ok(),
            "results": engine.results(&id).ok(),
            "events": engine.events(&id).ok(),
        });
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    }

    if rejected != 0 {
        eprintln!("commitvote run: {} operations rejected", rejected);
    }
}
