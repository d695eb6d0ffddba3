use dirs_next::home_dir;
use std::path::PathBuf;

/// Expands a leading `~` (followed by either separator) to the user's home
/// directory. Without a home directory the `~` is kept literally.
pub fn expand_tilde(path: &str) -> PathBuf {
    let trimmed = path.trim();
    let Some(rest) = trimmed.strip_prefix('~') else {
        return PathBuf::from(trimmed);
    };
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if rest.is_empty() {
        return home();
    }
    match rest.strip_prefix(['/', '\\']) {
        Some(relative) => home().join(relative),
        // `~user` style paths are left untouched.
        None => PathBuf::from(trimmed),
    }
}
