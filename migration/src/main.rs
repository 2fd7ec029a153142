use std::{env, fs, path::Path};

mod runner;

#[tokio::main]
async fn main() {
    let db_path = util::config::database_path();
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&db_path);
        }
        Some("fresh") => {
            remove_db_file(&db_path);
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
        _ => {
            create_db_dir(&db_path);
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: &str) {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: &str) {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_db_dir_makes_missing_parents() {
        let tmp = std::env::temp_dir().join(format!("migration-dirs-{}", std::process::id()));
        let db_path = tmp.join("nested/data/tickets.db");

        create_db_dir(&db_path.to_string_lossy());

        assert!(db_path.parent().unwrap().is_dir());
        fs::remove_dir_all(&tmp).unwrap();
    }

    #[test]
    fn remove_db_file_deletes_only_the_database() {
        let tmp = std::env::temp_dir().join(format!("migration-clean-{}", std::process::id()));
        fs::create_dir_all(&tmp).unwrap();
        let db_path = tmp.join("tickets.db");
        fs::write(&db_path, b"").unwrap();

        remove_db_file(&db_path.to_string_lossy());
        remove_db_file(&db_path.to_string_lossy());

        assert!(!db_path.exists());
        assert!(tmp.is_dir());
        fs::remove_dir_all(&tmp).unwrap();
    }
}
