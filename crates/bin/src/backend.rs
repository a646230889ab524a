//! Profile loading and saving.
//!
//! A profile is one data directory holding `sitebuilder.json`. Every command
//! loads it whole, works in memory and writes it back.

use std::path::{Path, PathBuf};

use sitebuilder::{Instance, Session, store::InMemory, user::AdminSeed};

use crate::cli::ProfileArgs;

/// File name of the persisted store inside the data directory.
pub const STORE_FILE: &str = "sitebuilder.json";

/// A loaded profile: the instance and where to save it.
pub struct Profile {
    instance: Instance,
    path: PathBuf,
}

impl Profile {
    /// Load the profile described by `args` and seed the administrator.
    pub async fn open(args: &ProfileArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let data_dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let path = data_dir.join(STORE_FILE);
        let store = InMemory::load_from_file(&path)?;
        tracing::debug!("Loaded profile from {}", path.display());

        let instance = Instance::open(Box::new(store));
        let seed = args.admin_password.as_deref().map(AdminSeed::new);
        if instance.ensure_admin(seed.as_ref())? {
            tracing::info!("Created administrator account");
        }

        Ok(Self { instance, path })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The session left by the last `login`.
    pub fn session(&self) -> Result<Session, Box<dyn std::error::Error>> {
        Ok(self.instance.restore_session()?)
    }

    /// Write the profile back to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        save_instance(&self.instance, &self.path)
    }
}

/// Save `instance` to `path` when it is backed by an in-memory store.
pub fn save_instance(instance: &Instance, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match instance.store().as_any().downcast_ref::<InMemory>() {
        Some(store) => {
            store.save_to_file(path)?;
            tracing::debug!("Saved profile to {}", path.display());
            Ok(())
        }
        None => Err("profile store cannot be saved to a file".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_directory_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let args = ProfileArgs {
            data_dir: Some(data_dir.clone()),
            admin_password: Some("seed".to_string()),
        };

        let profile = Profile::open(&args).await.unwrap();
        assert!(data_dir.is_dir());
        assert!(!profile.session().unwrap().is_authenticated());
        profile.save().unwrap();
        assert!(profile.path().exists());

        // The seeded admin survives a reload without the seed
        let reloaded = Profile::open(&ProfileArgs {
            data_dir: Some(data_dir),
            admin_password: None,
        })
        .await
        .unwrap();
        assert!(
            reloaded
                .instance()
                .authenticate(sitebuilder::constants::ADMIN_EMAIL, "seed")
                .is_ok()
        );
    }
}
