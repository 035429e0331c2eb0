use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;

pub const DEFAULT_FAMILY_ID: &str = "demo-family";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;
const DEFAULT_POLL_SECONDS: u64 = 5;
/// How long views wait on the readiness gate before showing whatever has
/// arrived.
pub const READINESS_WAIT: Duration = Duration::from_secs(1);

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn load() -> Self {
        match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    /// File values win; anything missing falls back to the environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned().or_else(|| env::var(key).ok())
    }

    pub fn family_id(&self) -> String {
        self.get("FAMILY_ID")
            .unwrap_or_else(|| DEFAULT_FAMILY_ID.to_string())
    }

    pub fn timezone(&self) -> Tz {
        self.get("FAMILY_TZ")
            .and_then(|tz| tz.parse().ok())
            .unwrap_or(DEFAULT_TIMEZONE)
    }

    pub fn poll_interval(&self) -> Duration {
        let seconds = self
            .get("SYNC_POLL_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_POLL_SECONDS);
        Duration::from_secs(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_and_exported_lines() {
        let dir = env::temp_dir().join(format!("familyhub_cfg_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.env");
        fs::write(
            &path,
            "# comment\nFAMILY_ID=smith-family\nexport FAMILY_TZ=\"Europe/Berlin\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.family_id(), "smith-family");
        assert_eq!(config.timezone(), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn bad_timezone_falls_back_to_default() {
        let config = AppConfig::default();
        assert_eq!(config.timezone(), DEFAULT_TIMEZONE);
    }
}
