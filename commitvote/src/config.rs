/// Engine policy knobs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Only accept eligibility changes during the Registration phase.
    ///
    /// When disabled the admin may add voters in any phase.
    pub registration_only_eligibility: bool,
}

impl EngineConfig {
    /// Allow voters to be added in any phase
    pub fn open_eligibility() -> Self {
        EngineConfig {
            registration_only_eligibility: false,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            registration_only_eligibility: true,
        }
    }
}
