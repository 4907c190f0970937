use commitvote::EngineConfig;
use std::env::var;

pub struct Config {
    pub open_eligibility: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let open_eligibility = match var("COMMITVOTE_OPEN_ELIGIBILITY") {
            Ok(val) => matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_e) => false,
        };

        Config { open_eligibility }
    }

    pub fn engine_config(&self) -> EngineConfig {
        if self.open_eligibility {
            EngineConfig::open_eligibility()
        } else {
            EngineConfig::default()
        }
    }
}
