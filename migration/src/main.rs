use std::{fs, path::Path};
use util::{config, paths};

mod runner;

#[tokio::main]
async fn main() {
    let database = config::database_path();
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(&database);
            remove_media_root();
        }
        Some("fresh") => {
            remove_db_file(&database);
            remove_media_root();
            runner::run_all_migrations(&paths::database_url(&database)).await;
        }
        _ => {
            runner::run_all_migrations(&paths::database_url(&database)).await;
        }
    }
}

fn remove_db_file(database: &str) {
    let Some(file) = paths::sqlite_file_path(database) else {
        println!("No database file to delete for {database}");
        return;
    };
    let db_path = Path::new(&file);
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

/// Local recording backups are only meaningful alongside the rows that reference them.
fn remove_media_root() {
    let media_root = paths::media_storage_root();
    if media_root.exists() {
        fs::remove_dir_all(&media_root).expect("Failed to delete media backups");
        println!("Deleted media backups: {}", media_root.display());
    } else {
        println!("Media storage does not exist: {}", media_root.display());
    }
}
