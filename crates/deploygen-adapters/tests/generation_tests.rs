//! End-to-end generation against real adapters.

use std::fs;
use std::path::Path;

use deploygen_adapters::{BuiltinCatalogStore, LocalFilesystem, MemoryFilesystem, PlaceholderRenderer};
use deploygen_core::domain::placeholders_in;
use deploygen_core::prelude::*;
use tempfile::TempDir;

fn raw(root: &Path) -> RawParameters {
    RawParameters::new()
        .with("discovery", "127.0.0.1:2181")
        .with("redis_ip", "10.0.0.2")
        .with("redis_pass", "redis-pw")
        .with("mongo_ip", "10.0.0.3")
        .with("mongo_user", "cc")
        .with("mongo_pass", "mongo-pw")
        .with("blueking_cmdb_url", "http://cmdb.example.com")
        .with("deploy_root", root.display().to_string())
}

fn config_service(fs: impl Filesystem + 'static) -> ConfigService {
    ConfigService::new(
        Box::new(BuiltinCatalogStore::with_builtin().unwrap()),
        Box::new(PlaceholderRenderer::new()),
        Box::new(fs),
    )
}

#[test]
fn expansion_produces_six_fully_resolved_artifacts() {
    for format in ["ini", "yaml"] {
        let params =
            Validator::validate(&raw(Path::new("/deploy")).with("config_format", format)).unwrap();
        let artifacts = config_service(MemoryFilesystem::new()).expand(&params).unwrap();
        assert_eq!(artifacts.len(), 6);
        for artifact in artifacts.iter() {
            assert!(
                placeholders_in(&artifact.content).is_empty(),
                "{}",
                artifact.path.display()
            );
        }
    }
}

#[test]
fn yaml_credentials_with_indicators_stay_one_scalar() {
    let input = raw(Path::new("/deploy"))
        .with("config_format", "yaml")
        .with("redis_pass", "#s3cret")
        .with("mongo_pass", r#"p: "w"\"#);
    let params = Validator::validate(&input).unwrap();
    let artifacts = config_service(MemoryFilesystem::new()).expand(&params).unwrap();

    let redis = artifacts
        .get("cmdb_adminserver/configures/redis.yaml")
        .unwrap();
    assert!(redis.content.contains("  pwd: \"#s3cret\"\n"));
    let mongo = artifacts
        .get("cmdb_adminserver/configures/mongodb.yaml")
        .unwrap();
    assert!(mongo.content.contains("  pwd: \"p: \\\"w\\\"\\\\\"\n"));
    assert!(mongo.content.contains("  port: 27017\n"));
}

#[test]
fn crypto_values_land_only_in_the_crypto_artifact() {
    let values = [
        ("secret_key_url", "https://kms.example.com/key"),
        ("secrets_addrs", "kms-1:8200,kms-2:8200"),
        ("secrets_token", "tok-123"),
        ("secrets_project", "cmdb-prod"),
        ("secrets_env", "production"),
    ];
    let mut input = raw(Path::new("/deploy")).with("crypto_enabled", "true");
    for (key, value) in values {
        input.set(key, value);
    }
    let params = Validator::validate(&input).unwrap();
    let artifacts = config_service(MemoryFilesystem::new()).expand(&params).unwrap();

    let crypto = artifacts
        .get("cmdb_adminserver/configures/crypto.conf")
        .unwrap();
    for (_, value) in values {
        assert!(crypto.content.contains(value), "{value}");
    }
    for artifact in artifacts.iter().filter(|a| a.path != crypto.path) {
        for (_, value) in values {
            assert!(!artifact.content.contains(value));
        }
    }
}

#[test]
fn log_level_is_rendered_verbatim_into_start_scripts() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("cmdb_procserver");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("template.sh.start"), "--v=log_level_placeholder\n").unwrap();

    let params = Validator::validate(&raw(tmp.path()).with("log_level", "7")).unwrap();
    let report = StartupScriptPatcher::new(Box::new(LocalFilesystem::new()))
        .patch_all(&params)
        .unwrap();
    assert!(report.is_success());
    assert_eq!(fs::read_to_string(dir.join("start.sh")).unwrap(), "--v=7\n");
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("cmdb_webserver");
    fs::create_dir(&dir).unwrap();
    fs::write(
        dir.join("template.sh.start"),
        "./cmdb-name-placeholder --port=cmdb-port-placeholder extend_flag_placeholder\n",
    )
    .unwrap();

    let params = Validator::validate(&raw(tmp.path()).with("listen_port", "9001")).unwrap();
    let snapshot = || {
        config_service(LocalFilesystem::new())
            .generate(&params)
            .unwrap();
        StartupScriptPatcher::new(Box::new(LocalFilesystem::new()))
            .patch_all(&params)
            .unwrap();
        let mut files: Vec<_> = walk(tmp.path());
        files.sort();
        files
            .into_iter()
            .map(|p| (p.clone(), fs::read(&p).unwrap()))
            .collect::<Vec<_>>()
    };

    let first = snapshot();
    let second = snapshot();
    assert_eq!(first, second);

    let script = fs::read_to_string(dir.join("start.sh")).unwrap();
    assert_eq!(script, "./cmdb_webserver --port=9001 \n");
}

fn walk(root: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}
