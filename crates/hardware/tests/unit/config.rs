//! Configuration Tests.
//!
//! Each invalid field is rejected with its own error, and partial JSON fills
//! the rest from defaults.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasulo_core::common::ConfigError;
use tomasulo_core::config::Config;
use tomasulo_core::core::Core;

fn with(edit: impl FnOnce(&mut Config)) -> Config {
    let mut config = Config::default();
    edit(&mut config);
    config
}

#[rstest]
#[case(with(|c| c.pipeline.rs_entries = 0), ConfigError::EmptyReservationStation)]
#[case(with(|c| c.pipeline.rob_entries = 1), ConfigError::ReorderBufferTooSmall(1))]
#[case(with(|c| c.pipeline.tag_bits = 0), ConfigError::TagBits(0))]
#[case(with(|c| c.pipeline.tag_bits = 17), ConfigError::TagBits(17))]
#[case(
    with(|c| c.pipeline.tag_bits = 4),
    ConfigError::TagWindow { in_flight: 31, window: 8, bits: 4 }
)]
#[case(with(|c| c.branch_predictor.initial_state = 4), ConfigError::PredictorState(4))]
fn invalid_configs_are_rejected(#[case] config: Config, #[case] expected: ConfigError) {
    assert_eq!(config.validate(), Err(expected.clone()));
    assert_eq!(Core::new(&config).err(), Some(expected));
}

#[test]
fn partial_json_uses_defaults() {
    let config: Config = serde_json::from_str(
        r#"{ "general": { "max_cycles": 12 }, "branch_predictor": { "initial_state": 2 } }"#,
    )
    .unwrap();
    assert_eq!(config.general.max_cycles, 12);
    assert!(!config.general.trace);
    assert_eq!(config.pipeline.rs_entries, 4);
    assert_eq!(config.pipeline.rob_entries, 32);
    assert_eq!(config.branch_predictor.initial_state, 2);

    let core = Core::new(&config).unwrap();
    assert_eq!(core.predictor().state(), 2);
}

#[test]
fn smallest_working_core() {
    let config = with(|c| {
        c.pipeline.rs_entries = 1;
        c.pipeline.rob_entries = 2;
        c.pipeline.tag_bits = 1;
    });
    assert_eq!(config.validate(), Ok(()));
}
