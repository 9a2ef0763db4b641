#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
    /// Used when a predict call does not say whether to jitter.
    pub default_with_uncertainty: bool,
    /// Fixed seed for reproducible jitter; random when unset.
    pub uncertainty_seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_with_uncertainty = lookup("WQI_WITH_UNCERTAINTY")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);
        let uncertainty_seed = lookup("WQI_UNCERTAINTY_SEED")
            .and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            default_with_uncertainty,
            uncertainty_seed,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
