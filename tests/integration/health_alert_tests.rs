//! Health check and alerting integration tests
//!
//! Every health check ends with rule evaluation, so these tests drive traffic and
//! database activity into a monitoring system and inspect the alerts that result.

#[cfg(test)]
mod tests {
    use crate::common::{FixedReader, RecordingNotifier, monitoring_with, monitoring_with_notifier};
    use async_trait::async_trait;
    use inventory_telemetry::config::{AlertingConfig, HealthConfig, MonitoringConfig};
    use inventory_telemetry::monitoring::alerts::{AlertManager, AlertType};
    use inventory_telemetry::monitoring::health::{
        HealthMonitor, HealthProbe, ProbeDetails, ProbeReport,
    };
    use inventory_telemetry::monitoring::metrics::RequestSample;
    use inventory_telemetry::{AlertSeverity, HealthStatus, MonitoringSystem, TelemetryError};
    use std::sync::Arc;
    use std::time::Duration;

    async fn run_operations(monitoring: &MonitoringSystem, ok: usize, failed: usize) {
        for _ in 0..ok {
            monitoring
                .database()
                .timed("items", "find", || async { Ok::<_, TelemetryError>(()) })
                .await
                .unwrap();
        }
        for _ in 0..failed {
            let _ = monitoring
                .database()
                .timed("items", "update", || async {
                    Err::<(), _>(TelemetryError::internal("write conflict"))
                })
                .await;
        }
    }

    #[tokio::test]
    async fn test_idle_system_is_healthy() {
        let (monitoring, notifier) =
            monitoring_with(&MonitoringConfig::default(), FixedReader::idle());

        let health = monitoring.perform_health_check(Some("idle-check")).await;

        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.summary.total, 4);
        assert_eq!(health.summary.healthy, 4);
        let services: Vec<&str> = health.checks.iter().map(|c| c.service.as_str()).collect();
        assert_eq!(services, vec!["database", "metrics", "system", "memory"]);
        assert!(monitoring.alerts().get_all_alerts().is_empty());
        assert_eq!(notifier.count(), 0);
        assert!(monitoring.health().last_health().is_some());
    }

    #[tokio::test]
    async fn test_memory_pressure_raises_high_alert() {
        let (monitoring, notifier) =
            monitoring_with(&MonitoringConfig::default(), FixedReader::with_memory(90));

        let health = monitoring.perform_health_check(Some("mem-check")).await;
        assert_eq!(health.status, HealthStatus::Warning);
        assert_eq!(health.check("memory").unwrap().status, HealthStatus::Warning);

        let alerts = monitoring.alerts().get_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::MemoryUsage);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert_eq!(alerts[0].correlation_id.as_deref(), Some("mem-check"));
        assert_eq!(alerts[0].details.threshold, Some(85.0));
        assert!(notifier.wait_for(1).await);
    }

    #[tokio::test]
    async fn test_database_errors_raise_failure_and_error_alerts() {
        let (monitoring, _notifier) =
            monitoring_with(&MonitoringConfig::default(), FixedReader::idle());
        run_operations(&monitoring, 7, 3).await;

        let health = monitoring.perform_health_check(None).await;
        assert_eq!(health.status, HealthStatus::Critical);

        let database = health.check("database").unwrap();
        assert_eq!(database.status, HealthStatus::Critical);
        match &database.details {
            ProbeDetails::Database { error_rate, errors, .. } => {
                assert!((error_rate - 30.0).abs() < 1e-9);
                assert_eq!(*errors, 3);
            }
            other => panic!("unexpected details: {:?}", other),
        }

        let mut types: Vec<AlertType> = monitoring
            .alerts()
            .get_alerts()
            .iter()
            .map(|a| a.alert_type)
            .collect();
        types.sort();
        assert_eq!(types, vec![AlertType::SystemFailure, AlertType::DatabaseError]);

        let stats = monitoring.alerts().stats();
        assert_eq!(stats.total_alerts, 2);
        assert_eq!(stats.alerts_by_severity.get(&AlertSeverity::Critical), Some(&1));
        assert_eq!(stats.alerts_by_severity.get(&AlertSeverity::High), Some(&1));
    }

    #[tokio::test]
    async fn test_slow_traffic_raises_response_time_alert() {
        let (monitoring, _notifier) =
            monitoring_with(&MonitoringConfig::default(), FixedReader::idle());
        for _ in 0..20 {
            monitoring.metrics().record_request(RequestSample::with_duration_ms(
                "GET",
                "/inventory/report",
                200,
                2500.0,
            ));
        }

        let health = monitoring.perform_health_check(None).await;
        assert_eq!(health.check("metrics").unwrap().status, HealthStatus::Healthy);

        let alerts = monitoring.alerts().get_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, AlertType::HighResponseTime);
        assert_eq!(alerts[0].severity, AlertSeverity::Medium);
        assert_eq!(alerts[0].details.value, Some(2500.0));
    }

    #[tokio::test]
    async fn test_every_check_raises_again_and_resolve_is_one_way() {
        let (monitoring, _notifier) =
            monitoring_with(&MonitoringConfig::default(), FixedReader::with_memory(88));

        monitoring.perform_health_check(None).await;
        monitoring.perform_health_check(None).await;

        let alerts = monitoring.alerts().get_alerts();
        assert_eq!(alerts.len(), 2);
        assert!(alerts[0].timestamp >= alerts[1].timestamp);
        assert_ne!(alerts[0].id, alerts[1].id);

        let id = alerts[1].id.clone();
        assert!(monitoring.alerts().resolve_alert(&id));
        assert!(!monitoring.alerts().resolve_alert(&id));
        assert!(!monitoring.alerts().resolve_alert("memory_usage-0-999"));

        assert_eq!(monitoring.alerts().active_count(), 1);
        assert_eq!(monitoring.alerts().get_all_alerts().len(), 2);
        let resolved = monitoring.alerts().get_alert(&id).unwrap();
        assert!(resolved.resolved);
        assert!(resolved.resolved_at.is_some());
        assert_eq!(monitoring.alerts().stats().resolved_alerts, 1);
    }

    #[tokio::test]
    async fn test_notification_cooldown() {
        let config = MonitoringConfig {
            alerting: AlertingConfig {
                notify_cooldown_secs: 300,
                ..AlertingConfig::default()
            },
            ..MonitoringConfig::default()
        };
        let (monitoring, notifier) = monitoring_with(&config, FixedReader::with_memory(88));

        monitoring.perform_health_check(None).await;
        monitoring.perform_health_check(None).await;

        assert_eq!(monitoring.alerts().get_alerts().len(), 2);
        assert_eq!(monitoring.alerts().stats().suppressed_notifications, 1);
        assert!(notifier.wait_for(1).await);
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_slow_notifier_does_not_stall_health_checks() {
        let config = MonitoringConfig {
            health: HealthConfig {
                probe_timeout_ms: 100,
                ..HealthConfig::default()
            },
            ..MonitoringConfig::default()
        };
        let (monitoring, notifier) = monitoring_with_notifier(
            &config,
            FixedReader::with_memory(96),
            RecordingNotifier::slow(Duration::from_secs(3)),
        );
        run_operations(&monitoring, 0, 2).await;

        let started = std::time::Instant::now();
        let health = monitoring.perform_health_check(Some("slow-notify")).await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(health.status, HealthStatus::Critical);
        let raised = monitoring.alerts().get_alerts().len();
        assert!(raised >= 2);
        assert!(notifier.wait_for(raised).await);
    }

    #[derive(Debug)]
    struct WarehouseProbe {
        reachable: bool,
    }

    #[async_trait]
    impl HealthProbe for WarehouseProbe {
        fn name(&self) -> &str {
            "warehouse-sync"
        }

        async fn check(&self) -> inventory_telemetry::Result<ProbeReport> {
            if self.reachable {
                Ok(ProbeReport::new(
                    HealthStatus::Healthy,
                    "Warehouse sync reachable",
                    ProbeDetails::Custom {
                        data: serde_json::json!({ "lagSecs": 2 }),
                    },
                ))
            } else {
                Err(TelemetryError::monitoring("warehouse sync unreachable"))
            }
        }
    }

    #[tokio::test]
    async fn test_custom_probe_failure_is_critical() {
        let alerts = Arc::new(AlertManager::new(&AlertingConfig::default()));
        let probes: Vec<Arc<dyn HealthProbe>> = vec![
            Arc::new(WarehouseProbe { reachable: true }),
            Arc::new(WarehouseProbe { reachable: false }),
        ];
        let monitor = HealthMonitor::new(&HealthConfig::default(), probes, Arc::clone(&alerts));

        let health = monitor.perform_health_check(Some("custom")).await;
        assert_eq!(health.status, HealthStatus::Critical);
        assert_eq!(health.summary.healthy, 1);
        assert_eq!(health.summary.critical, 1);
        assert!(health.checks[1].message.contains("unreachable"));

        let raised = alerts.get_alerts();
        assert_eq!(raised.len(), 1);
        assert_eq!(raised[0].alert_type, AlertType::SystemFailure);
        assert_eq!(raised[0].details.service, "warehouse-sync");
    }

    #[tokio::test]
    async fn test_background_checks_run_until_stopped() {
        let config = MonitoringConfig {
            health: HealthConfig {
                check_interval_secs: 1,
                ..HealthConfig::default()
            },
            ..MonitoringConfig::default()
        };
        let (monitoring, _notifier) = monitoring_with(&config, FixedReader::idle());

        monitoring.start();
        monitoring.start();
        assert!(monitoring.is_active());

        let mut ran = false;
        for _ in 0..30 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if monitoring.health().last_health().is_some() {
                ran = true;
                break;
            }
        }
        assert!(ran, "background health check never ran");

        monitoring.stop();
        monitoring.stop();
        assert!(!monitoring.is_active());
    }
}
