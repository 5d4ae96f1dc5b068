// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value store backed by a single JSON file.
//!
//! The file is read once when the store is opened. Every write rewrites the
//! whole file first and only then updates the in-memory record, so a failed
//! write leaves both unchanged. Records that fail to parse are reported as
//! absent rather than as errors.

use crate::db::keys;
use crate::error::AppError;
use anyhow::Context;
use crate::models::{Credential, Settings};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Local JSON key-value store.
#[derive(Clone)]
pub struct LocalStore {
    /// `None` keeps everything in memory (tests).
    path: Option<PathBuf>,
    records: Arc<Mutex<Map<String, Value>>>,
}

impl LocalStore {
    /// Open the store at `path`, loading any existing records.
    ///
    /// A missing file starts empty. An unreadable or malformed file also
    /// starts empty (and is overwritten on the next write).
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = load_records(&path).await;

        tracing::info!(path = %path.display(), records = records.len(), "Local store opened");

        Self {
            path: Some(path),
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Create an in-memory store for testing (nothing touches disk).
    pub fn new_mock() -> Self {
        Self {
            path: None,
            records: Arc::new(Mutex::new(Map::new())),
        }
    }

    // ─── Credential ──────────────────────────────────────────────

    /// Get the persisted credential, if any.
    pub async fn get_token(&self) -> Option<Credential> {
        self.get_record(keys::TOKEN).await
    }

    /// Persist a credential, replacing any previous one.
    pub async fn set_token(&self, credential: &Credential) -> Result<(), AppError> {
        self.set_record(keys::TOKEN, credential).await
    }

    /// Forget the persisted credential.
    pub async fn delete_token(&self) -> Result<(), AppError> {
        self.delete_record(keys::TOKEN).await
    }

    // ─── Settings ────────────────────────────────────────────────

    /// Get persisted preferences, if any.
    pub async fn get_settings(&self) -> Option<Settings> {
        self.get_record(keys::SETTINGS).await
    }

    /// Persist preferences.
    pub async fn set_settings(&self, settings: &Settings) -> Result<(), AppError> {
        self.set_record(keys::SETTINGS, settings).await
    }

    // ─── Generic records ─────────────────────────────────────────

    async fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let records = self.records.lock().await;
        let value = records.get(key)?;

        match serde_json::from_value(value.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring malformed storage record");
                None
            }
        }
    }

    async fn set_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(record)
            .map_err(|e| AppError::Storage(format!("Failed to encode {}: {}", key, e)))?;

        let mut records = self.records.lock().await;
        let mut updated = records.clone();
        updated.insert(key.to_string(), value);

        self.persist(&updated).await?;
        *records = updated;
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<(), AppError> {
        let mut records = self.records.lock().await;
        if !records.contains_key(key) {
            return Ok(());
        }

        let mut updated = records.clone();
        updated.remove(key);

        self.persist(&updated).await?;
        *records = updated;
        Ok(())
    }

    /// Rewrite the backing file. Called with the records lock held so
    /// writes land in the same order they were applied.
    async fn persist(&self, records: &Map<String, Value>) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        write_records(path, records)
            .await
            .map_err(|e| AppError::Storage(format!("{:#}", e)))
    }
}

async fn write_records(path: &Path, records: &Map<String, Value>) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let payload = serde_json::to_vec_pretty(records).context("Failed to encode store")?;

    tokio::fs::write(path, payload)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

async fn load_records(path: &Path) -> Map<String, Value> {
    match tokio::fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Map<String, Value>>(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Storage file is malformed, starting empty");
                Map::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read storage file, starting empty");
            Map::new()
        }
    }
}
