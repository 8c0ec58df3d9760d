//! JSON-file credential store.
//!
//! The whole record set is read and rewritten on every access. Operations
//! are serialized behind one async mutex, and each save goes through a
//! temporary sibling file that is renamed into place, so readers only ever
//! see a complete file. A corrupt file found after startup is moved aside
//! to a `.corrupt-<id>` sibling and the seed records are written in its
//! place; a missing file is simply reseeded.

use std::collections::HashMap;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use mediashare_core::error::{AppError, ErrorKind};
use mediashare_core::result::AppResult;

/// Username → plaintext password mapping.
pub type Credentials = HashMap<String, String>;

/// Durable credential record set backed by a single JSON file.
#[derive(Debug)]
pub struct CredentialStore {
    /// Location of the JSON record set.
    path: PathBuf,
    /// Records written when the file is created or reseeded.
    seed: Credentials,
    /// Serializes read-modify-write cycles and recovery.
    write_lock: Mutex<()>,
}

impl CredentialStore {
    /// Open the store at `path`, seeding it with the administrator record if
    /// the file does not exist yet.
    ///
    /// Fails with `StoreUnavailable` if the file cannot be created or the
    /// existing file cannot be parsed.
    pub async fn open(
        path: impl Into<PathBuf>,
        admin_username: &str,
        admin_password: &str,
    ) -> AppResult<Self> {
        let path = path.into();
        let seed = Credentials::from([(admin_username.to_string(), admin_password.to_string())]);
        let store = Self {
            path,
            seed,
            write_lock: Mutex::new(()),
        };

        if fs::metadata(&store.path).await.is_err() {
            info!(path = %store.path.display(), "Seeding credential store");
            store.persist(&store.seed).await?;
        }

        let users = store.load().await?;
        debug!(path = %store.path.display(), users = users.len(), "Credential store opened");
        Ok(store)
    }

    /// Read the full record set.
    pub async fn load(&self) -> AppResult<Credentials> {
        let raw = fs::read(&self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Cannot read credential store {}", self.path.display()),
                e,
            )
        })?;

        serde_json::from_slice(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Credential store {} is corrupt", self.path.display()),
                e,
            )
        })
    }

    /// Overwrite the full record set.
    pub async fn save(&self, users: &Credentials) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(users).await
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords both yield the same
    /// `Authentication` error.
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let users = self.load_or_reseed().await?;
        match users.get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => Err(AppError::authentication("Invalid username or password.")),
        }
    }

    /// Whether the username already has a record.
    pub async fn contains(&self, username: &str) -> AppResult<bool> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load_or_reseed().await?.contains_key(username))
    }

    /// Create a new record. Fails with `Conflict` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load_or_reseed().await?;
        if users.contains_key(username) {
            return Err(AppError::conflict("Username is already taken."));
        }
        users.insert(username.to_string(), password.to_string());
        self.persist(&users).await?;
        info!(username, "Registered user");
        Ok(())
    }

    /// Replace a user's password after checking the current one.
    ///
    /// Fails with `Authorization` if `current` does not match.
    pub async fn change_password(
        &self,
        username: &str,
        current: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load_or_reseed().await?;
        match users.get_mut(username) {
            Some(stored) if stored == current => {
                *stored = new_password.to_string();
            }
            _ => {
                warn!(username, "Password change rejected");
                return Err(AppError::authorization("Current password is incorrect."));
            }
        }
        self.persist(&users).await?;
        info!(username, "Password changed");
        Ok(())
    }

    /// Replace an unreadable record set with the seed records.
    pub async fn reseed(&self) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        warn!(path = %self.path.display(), "Reseeding credential store");
        self.restore_seed().await
    }

    /// Load the record set, rewriting the seed records first if the file is
    /// missing or corrupt. Callers must hold `write_lock`.
    async fn load_or_reseed(&self) -> AppResult<Credentials> {
        match self.load().await {
            Ok(users) => Ok(users),
            Err(e) if e.is(ErrorKind::StoreUnavailable) => {
                warn!(error = %e, "Credential store unreadable; restoring seed records");
                self.restore_seed().await?;
                Ok(self.seed.clone())
            }
            Err(e) => Err(e),
        }
    }

    /// Move any existing unreadable file aside, then write the seed records.
    /// Callers must hold `write_lock`.
    async fn restore_seed(&self) -> AppResult<()> {
        let backup = self
            .path
            .with_file_name(format!("{}.corrupt-{}", self.file_name(), Uuid::new_v4().simple()));
        match fs::rename(&self.path, &backup).await {
            Ok(()) => {
                error!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    "Moved unreadable credential store aside"
                );
            }
            Err(e) if e.kind() == IoErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    format!("Cannot back up credential store {}", self.path.display()),
                    e,
                ));
            }
        }
        self.persist(&self.seed).await
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "users.json".to_string())
    }

    /// Write `users` to a temporary sibling and rename it over the target.
    /// Callers must hold `write_lock`, except during `open`.
    async fn persist(&self, users: &Credentials) -> AppResult<()> {
        let unavailable = |what: &str, e: std::io::Error| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Cannot {what} credential store {}", self.path.display()),
                e,
            )
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| unavailable("create directory for", e))?;
        }

        let body = serde_json::to_vec(users)?;
        let tmp_path = self
            .path
            .with_file_name(format!(".{}.{}.tmp", self.file_name(), Uuid::new_v4().simple()));

        let mut file = fs::File::create(&tmp_path)
            .await
            .map_err(|e| unavailable("write", e))?;
        file.write_all(&body)
            .await
            .map_err(|e| unavailable("write", e))?;
        file.sync_all().await.map_err(|e| unavailable("sync", e))?;
        drop(file);

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(unavailable("replace", e));
        }
        Ok(())
    }
}
