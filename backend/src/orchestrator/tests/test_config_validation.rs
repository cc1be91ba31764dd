// Config validation happens in Orchestrator::new, before any worker exists.

use crate::orchestrator::engine::{BurnConfig, BurnError, Orchestrator, MAX_THREADS};

fn assert_invalid(config: BurnConfig, expected: &str) {
    match Orchestrator::new(config) {
        Err(BurnError::InvalidConfig(msg)) => assert!(
            msg.contains(expected),
            "message {:?} should mention {:?}",
            msg,
            expected
        ),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
fn test_default_config_is_valid() {
    let orchestrator = Orchestrator::new(BurnConfig::default()).unwrap();
    assert_eq!(orchestrator.schedule().period_us(), 100_000);
    assert_eq!(orchestrator.schedule().busy_us(), 100_000);
    assert_eq!(orchestrator.schedule().idle_us(), 0);
}

#[test]
fn test_zero_duration_rejected() {
    assert_invalid(
        BurnConfig {
            duration_secs: 0,
            ..Default::default()
        },
        "Positive time",
    );
}

#[test]
fn test_utilization_over_100_rejected() {
    assert_invalid(
        BurnConfig {
            utilization: 101,
            ..Default::default()
        },
        "invalid CPU utilization value: 101",
    );
}

#[test]
fn test_zero_threads_rejected() {
    assert_invalid(
        BurnConfig {
            threads: 0,
            ..Default::default()
        },
        "at least one thread",
    );
}

#[test]
fn test_too_many_threads_rejected() {
    assert_invalid(
        BurnConfig {
            threads: MAX_THREADS + 1,
            ..Default::default()
        },
        "no more than 32 threads",
    );
}

#[test]
fn test_max_threads_accepted() {
    let config = BurnConfig {
        threads: MAX_THREADS,
        ..Default::default()
    };
    assert!(Orchestrator::new(config).is_ok());
}

#[test]
fn test_zero_batch_size_rejected() {
    assert_invalid(
        BurnConfig {
            batch_size: 0,
            ..Default::default()
        },
        "batch_size",
    );
}

#[test]
fn test_frequency_out_of_range_rejected() {
    assert_invalid(
        BurnConfig {
            frequency_hz: 0,
            ..Default::default()
        },
        "frequency_hz",
    );
    assert_invalid(
        BurnConfig {
            frequency_hz: 2_000_000,
            ..Default::default()
        },
        "frequency_hz",
    );
}

#[test]
fn test_boundary_utilizations_accepted() {
    for utilization in [0, 100] {
        let config = BurnConfig {
            utilization,
            ..Default::default()
        };
        assert!(Orchestrator::new(config).is_ok());
    }
}
