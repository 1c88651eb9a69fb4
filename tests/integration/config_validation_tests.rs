//! Configuration validation integration tests
//!
//! Tests loading configuration from YAML files and environment lookups, and that
//! invalid values are rejected before anything starts.

#[cfg(test)]
mod tests {
    use inventory_telemetry::config::{Config, Validate};
    use inventory_telemetry::utils::error::TelemetryError;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ==================== File Loading ====================

    #[tokio::test]
    async fn test_load_full_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
server:
  host: 127.0.0.1
  port: 9100
  workers: 2
monitoring:
  metrics:
    sample_capacity: 500
    top_endpoints: 5
  database:
    slow_threshold_ms: 250
  health:
    probe_timeout_ms: 1000
    check_interval_secs: 0
  alerting:
    notify_cooldown_secs: 60
    max_alerts: 50
  correlation:
    header: x-request-trace
logging:
  level: debug
  json: true
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:9100");
        assert_eq!(config.server.worker_count(), 2);
        assert_eq!(config.monitoring.metrics.sample_capacity, 500);
        assert_eq!(config.monitoring.metrics.top_endpoints, 5);
        assert_eq!(config.monitoring.database.slow_threshold_ms, 250);
        assert!(config.monitoring.health.check_interval().is_none());
        assert_eq!(config.monitoring.alerting.max_alerts, 50);
        assert_eq!(config.monitoring.correlation.header, "x-request-trace");
        assert!(config.logging.json);
    }

    #[tokio::test]
    async fn test_partial_config_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 8081").unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.monitoring.metrics.sample_capacity, 1000);
        assert_eq!(config.monitoring.database.slow_threshold_ms, 1000);
        assert_eq!(config.monitoring.correlation.header, "x-correlation-id");
    }

    #[tokio::test]
    async fn test_missing_config_file() {
        let err = Config::from_file("/nonexistent/telemetry.yaml")
            .await
            .unwrap_err();
        assert!(matches!(err, TelemetryError::Config(_)));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(Config::from_yaml("server: 12").is_err());
    }

    #[test]
    fn test_yaml_with_invalid_values_rejected() {
        let err = Config::from_yaml("monitoring:\n  metrics:\n    sample_capacity: 0\n")
            .unwrap_err();
        assert!(err.to_string().contains("sample capacity"));
    }

    // ==================== Environment Overrides ====================

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(env(&[
                ("TELEMETRY_PORT", "9200"),
                ("TELEMETRY_SLOW_QUERY_MS", "50"),
                ("TELEMETRY_HEALTH_INTERVAL_SECS", "10"),
                ("TELEMETRY_LOG_LEVEL", "warn"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 9200);
        assert_eq!(config.monitoring.database.slow_threshold_ms, 50);
        assert_eq!(config.monitoring.health.check_interval_secs, 10);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override_parse_error() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(env(&[("TELEMETRY_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("TELEMETRY_PORT"));
    }

    // ==================== Component Validation ====================

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_correlation_header() {
        let mut config = Config::default();
        config.monitoring.correlation.header = "bad header".to_string();

        let result = config.monitoring.correlation.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("header"));
    }

    #[test]
    fn test_zero_probe_timeout() {
        let mut config = Config::default();
        config.monitoring.health.probe_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_workers() {
        let mut config = Config::default();
        config.server.workers = Some(0);
        let result = config.server.validate();
        assert!(result.unwrap_err().contains("Worker"));
    }
}
