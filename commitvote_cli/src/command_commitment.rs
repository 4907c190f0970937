use commitvote::{compute_commitment, CandidateId};
use rand::Rng;

pub fn command_commitment(matches: &clap::ArgMatches) {
    let candidate = matches.value_of("CANDIDATE").unwrap();

    let candidate = if matches.is_present("index") {
        let index: u64 = candidate.parse().unwrap_or_else(|e| {
            eprintln!(
                "commitvote commitment: {} is not a candidate number: {}",
                candidate, e
            );
            std::process::exit(1);
        });
        CandidateId::Index(index)
    } else {
        CandidateId::from(candidate)
    };

    let secret = match matches.value_of("SECRET") {
        Some(secret) => secret.to_owned(),
        None => {
            let bytes: [u8; 32] = rand::thread_rng().gen();
            hex::encode(bytes)
        }
    };

    let commitment = compute_commitment(&candidate, secret.as_bytes());

    println!("candidate: {}", candidate);
    println!("secret: {}", secret);
    println!("commitment: {}", commitment);
}
