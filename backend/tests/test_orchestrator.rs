//! End-to-end orchestrator runs
//!
//! These tests spawn real threads and sleep for whole seconds.

use cpuburn_core::models::report::startup_line;
use cpuburn_core::{BurnConfig, BurnError, Orchestrator, MAX_THREADS};

#[test]
fn test_two_thread_half_load_run() {
    let config = BurnConfig {
        duration_secs: 2,
        utilization: 50,
        threads: 2,
        ..Default::default()
    };

    let report = Orchestrator::new(config).unwrap().run().unwrap();

    let elapsed = report.elapsed_secs();
    assert!(elapsed >= 2.0, "run ended early: {}s", elapsed);
    assert!(elapsed < 3.0, "run overshot: {}s", elapsed);

    assert_eq!(report.thread_stats.len(), 2);
    assert_eq!(report.thread_stats[0].index, 0);
    assert_eq!(report.thread_stats[1].index, 1);
    for stat in &report.thread_stats {
        assert!(stat.bursts > 0, "worker {} never completed a burst", stat.index);
    }

    let sum: u64 = report.thread_stats.iter().map(|s| s.bursts).sum();
    assert_eq!(report.total_bursts, sum);

    let expected = report.total_bursts as f64 * 1000.0 / report.elapsed_us as f64;
    assert!((report.throughput_kbursts_per_sec - expected).abs() < 1e-9);
}

#[test]
fn test_zero_utilization_one_batch_per_period() {
    let config = BurnConfig {
        duration_secs: 1,
        utilization: 0,
        threads: 1,
        ..Default::default()
    };

    let report = Orchestrator::new(config).unwrap().run().unwrap();

    // 10 Hz with an empty busy budget: one batch then a 100ms sleep
    let bursts = report.thread_stats[0].bursts;
    assert!(
        (1..=12).contains(&bursts),
        "expected about 10 bursts, got {}",
        bursts
    );
}

#[test]
fn test_full_utilization_outpaces_idle_schedule() {
    let busy = BurnConfig {
        duration_secs: 1,
        utilization: 100,
        threads: 1,
        ..Default::default()
    };
    let idle = BurnConfig {
        utilization: 0,
        ..busy.clone()
    };

    let busy_report = Orchestrator::new(busy).unwrap().run().unwrap();
    let idle_report = Orchestrator::new(idle).unwrap().run().unwrap();

    assert!(busy_report.total_bursts > idle_report.total_bursts);
}

#[test]
fn test_too_many_threads_fails_before_spawning() {
    let config = BurnConfig {
        threads: MAX_THREADS + 1,
        ..Default::default()
    };

    // Validation fails in new(), so there is nothing to run
    let err = Orchestrator::new(config).unwrap_err();
    assert!(matches!(err, BurnError::InvalidConfig(_)));
    assert_eq!(
        err.to_string(),
        "Invalid config: no more than 32 threads supported"
    );
}

#[test]
fn test_report_echoes_config() {
    let config = BurnConfig {
        duration_secs: 1,
        utilization: 30,
        threads: 3,
        batch_size: 1_000,
        ..Default::default()
    };

    let report = Orchestrator::new(config).unwrap().run().unwrap();

    assert_eq!(report.duration_secs, 1);
    assert_eq!(report.utilization, 30);
    assert_eq!(report.threads, 3);
    assert_eq!(report.thread_stats.len(), 3);
    assert_eq!(
        startup_line(report.duration_secs, report.threads, report.utilization),
        "Starting CPU burner for 1 seconds, 3 core(s), with 30% CPU utilization"
    );
}
