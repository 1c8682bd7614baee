// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem config store against a temp directory.

use std::error::Error;

use avsc_app_core::config::{ConfigError, ConfigService, ConfigStore, STYLE_KEY};
use avsc_config_fs::FsConfigStore;
use serde::{Deserialize, Serialize};

type TestResult = Result<(), Box<dyn Error>>;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Sample {
    min_font_size: u32,
    root_font_color: String,
}

#[test]
fn missing_file_is_not_found() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FsConfigStore::at(dir.path())?;
    assert!(matches!(store.load_raw("absent"), Err(ConfigError::NotFound)));
    Ok(())
}

#[test]
fn values_persist_as_json_files() -> TestResult {
    let dir = tempfile::tempdir()?;
    let base = dir.path().join("nested");
    let svc = ConfigService::new(FsConfigStore::at(&base)?);

    let sample = Sample {
        min_font_size: 12,
        root_font_color: "orange".into(),
    };
    svc.save(STYLE_KEY, &sample)?;

    let on_disk = std::fs::read_to_string(base.join("style.json"))?;
    assert!(on_disk.contains("\"orange\""));

    let reopened = ConfigService::new(FsConfigStore::at(&base)?);
    assert_eq!(reopened.load::<Sample>(STYLE_KEY)?, Some(sample));
    Ok(())
}
