#![deny(rust_2018_idioms)]

use berthplan_sync::settings::Settings;
use config::{Config, ConfigBuilder, File, builder::DefaultState};

pub mod archive;
pub mod cycle;
pub mod helper;

fn with_secrets(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    [
        ("berth_plan.url", "https://terminal/berth-plan"),
        ("berth_plan.consumer_key", "test"),
        ("berth_plan.oauth.client_id", "test"),
        ("berth_plan.oauth.client_secret", "test"),
        ("berth_plan.oauth.scope", "test"),
        ("berth_plan.oauth.token_url", "https://terminal/token"),
        ("berth_plan_delivery.url", "https://port/berth-plan"),
        ("berth_plan_delivery.username", "test"),
        ("berth_plan_delivery.password", "test"),
        ("etc_delivery.url", "https://port/etc"),
        ("etc_delivery.username", "test"),
        ("etc_delivery.password", "test"),
        ("etc_database.host", "tos-db"),
        ("etc_database.username", "test"),
        ("etc_database.password", "test"),
    ]
    .into_iter()
    .fold(builder, |builder, (key, value)| {
        builder.set_override(key, value).unwrap()
    })
}

#[test]
fn test_local_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/local.yml").required(true))
        .set_override("environment", "Local")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert!(settings.etc_database.is_some());
}

#[test]
fn test_development_settings_are_valid() {
    with_secrets(
        Config::builder().add_source(File::with_name("config/development.yml").required(true)),
    )
    .set_override("environment", "Development")
    .unwrap()
    .build()
    .unwrap()
    .try_deserialize::<Settings>()
    .unwrap();
}

#[test]
fn test_production_settings_are_valid() {
    let settings = with_secrets(
        Config::builder().add_source(File::with_name("config/production.yml").required(true)),
    )
    .set_override("environment", "Production")
    .unwrap()
    .build()
    .unwrap()
    .try_deserialize::<Settings>()
    .unwrap();

    assert_eq!(settings.terminal.days_back, 8);
    assert_eq!(settings.terminal.days_ahead, 40);
    assert_eq!(settings.etc_database.unwrap().port, 1433);
}

#[test]
fn test_test_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/test.yml").required(true))
        .set_override("environment", "Test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert!(settings.etc_database.is_none());
    assert_eq!(settings.terminal.code, "MAPTMTM");
}
