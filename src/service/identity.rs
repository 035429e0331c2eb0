use std::env;
use std::fs;
use std::io;
use std::path::Path;

// Where the device's current-user id lives. Defaults to a file under the
// shared "./data" directory.
pub fn get_identity_location() -> String {
    if let Ok(path) = env::var("LOCAL_USER_FILE") {
        return path;
    }
    let base = env::var("DB_LOCATION").unwrap_or("./data".to_string());
    format!("{}/current_user", base)
}

/// The single identity token, read once at startup. Missing or blank files
/// both mean "not onboarded yet".
pub fn load_local_user_id(path: &str) -> Option<String> {
    let id = fs::read_to_string(path).ok()?;
    let id = id.trim().to_string();
    if id.is_empty() { None } else { Some(id) }
}

/// Written exactly once, when onboarding completes.
pub fn store_local_user_id(path: &str, id: &str) -> io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, id)
}
