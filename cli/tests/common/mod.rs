use rand::{distributions::Alphanumeric, Rng};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Resolve the keys-cli binary path from env or common target dirs.
pub fn resolve_binary_path() -> String {
    if let Some(p) = option_env!("CARGO_BIN_EXE_keys-cli") {
        return p.to_string();
    }

    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest.parent().unwrap_or(&manifest).to_path_buf();
    let candidates = [
        workspace_root.join("target/debug/keys-cli"),
        workspace_root.join("target/release/keys-cli"),
    ];
    for cand in candidates.iter() {
        if Path::new(&cand).exists() {
            return cand.to_string_lossy().to_string();
        }
    }

    "keys-cli".to_string()
}

/// Fresh directory under the system temp dir
pub fn scratch_dir() -> PathBuf {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    let dir = std::env::temp_dir().join(format!("keys_cli_{}", suffix));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Run `migration:unsigned_keys` unattended against a config file
pub fn run_migration(config: &Path) -> Output {
    Command::new(resolve_binary_path())
        .arg("migration:unsigned_keys")
        .arg("--no-interaction")
        .arg("--config")
        .arg(config)
        .env_remove("DATABASE_URL")
        .env_remove("KEYS_CONFIG")
        .env("RUST_LOG", "info")
        .output()
        .expect("spawn keys-cli")
}
