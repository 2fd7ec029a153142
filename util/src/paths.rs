use crate::config;
use std::path::{Path, PathBuf};

/// Template directory (absolute), from `config::templates_dir()`.
/// If relative in env, resolve against current_dir().
pub fn templates_root() -> PathBuf {
    let p = PathBuf::from(config::templates_dir());
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Path of a template file:  {TEMPLATES_DIR}/{template_id}.hbs
pub fn template_path_in<P: AsRef<Path>>(dir: P, template_id: &str) -> PathBuf {
    dir.as_ref().join(format!("{template_id}.hbs"))
}

/// Path of the configured transcript template.
pub fn transcript_template_path() -> PathBuf {
    template_path_in(templates_root(), &config::transcript_template())
}
