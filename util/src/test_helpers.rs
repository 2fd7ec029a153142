use std::env;
use std::fs;
use tempfile::TempDir;

/// Sets the variables `AppConfig::from_env` cannot default, unless the
/// environment already provides them.
pub fn setup_test_env() {
    for (key, value) in [
        ("DATABASE_PATH", "sqlite::memory:"),
        ("ENCRYPTION_KEY", "test-key"),
    ] {
        if env::var_os(key).is_none() {
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

/// Creates a unique temporary templates directory containing a single
/// `{template_id}.hbs` file with the given source.
///
/// Keep the returned `TempDir` in scope for as long as you need the files.
pub fn setup_test_templates(template_id: &str, source: &str) -> TempDir {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let path = crate::paths::template_path_in(tmp.path(), template_id);
    fs::write(&path, source).expect("failed to write test template");
    tmp
}
