//! Request metrics integration tests

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::common::assertions::assert_has_sample;
    use inventory_telemetry::config::MetricsConfig;
    use inventory_telemetry::monitoring::metrics::{MetricsCollector, RequestSample};
    use std::sync::Arc;

    fn collector(sample_capacity: usize) -> Arc<MetricsCollector> {
        Arc::new(MetricsCollector::new(&MetricsConfig {
            sample_capacity,
            ..MetricsConfig::default()
        }))
    }

    #[test]
    fn test_percentiles_over_traffic() {
        let collector = collector(1000);
        for ms in 1..=100 {
            collector.record_request(RequestSample::with_duration_ms(
                "GET",
                "/inventory/items",
                200,
                ms as f64,
            ));
        }

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, 100);
        assert_approx_eq!(snapshot.response_time_p95, 95.0);
        assert_approx_eq!(snapshot.response_time_p99, 99.0);
        assert_approx_eq!(snapshot.average_response_time, 50.5);
        assert_approx_eq!(snapshot.error_rate, 0.0);
    }

    #[test]
    fn test_window_bounds_percentiles_not_totals() {
        let collector = collector(10);
        for _ in 0..5 {
            collector.record_request(RequestSample::with_duration_ms("GET", "/slow", 200, 5000.0));
        }
        for _ in 0..10 {
            collector.record_request(RequestSample::with_duration_ms("GET", "/fast", 200, 10.0));
        }

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, 15);
        assert_eq!(snapshot.sample_count, 10);
        assert_approx_eq!(snapshot.response_time_p95, 10.0);
        assert_eq!(snapshot.top_endpoints[0].path, "/fast");
        assert_eq!(snapshot.top_endpoints[1].path, "/slow");
        assert_approx_eq!(snapshot.top_endpoints[1].avg_response_time, 5000.0);
    }

    #[test]
    fn test_error_rate_and_status_distribution() {
        let collector = collector(100);
        for status in [200, 200, 201, 404, 500] {
            collector.record_request(RequestSample::with_duration_ms(
                "POST",
                "/inventory/movements",
                status,
                12.0,
            ));
        }

        let snapshot = collector.snapshot();
        assert_approx_eq!(snapshot.error_rate, 40.0);
        let codes: Vec<(u16, u64)> = snapshot
            .status_code_distribution
            .iter()
            .map(|entry| (entry.status_code, entry.count))
            .collect();
        assert_eq!(codes, vec![(200, 2), (201, 1), (404, 1), (500, 1)]);
    }

    #[test]
    fn test_active_request_guards() {
        let collector = collector(100);
        let first = collector.begin_request();
        let second = collector.begin_request();
        assert_eq!(collector.snapshot().active_requests, 2);

        drop(first);
        assert_eq!(collector.active_requests(), 1);
        drop(second);
        assert_eq!(collector.active_requests(), 0);
    }

    #[test]
    fn test_prometheus_exposition() {
        let collector = collector(100);
        collector.record_request(RequestSample::with_duration_ms("GET", "/health", 200, 4.0));
        collector.record_request(RequestSample::with_duration_ms("GET", "/health", 503, 8.0));

        let text = collector.to_prometheus_text();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert_has_sample(&text, "http_requests_total 2");
        assert_has_sample(&text, "http_request_errors_total 1");
        assert_has_sample(
            &text,
            "http_requests_by_route_total{method=\"GET\",route=\"/health\"} 2",
        );
        assert_has_sample(&text, "http_responses_by_status_total{status=\"503\"} 1");
    }

    #[test]
    fn test_reset_clears_everything_but_active() {
        let collector = collector(100);
        let _guard = collector.begin_request();
        collector.record_request(RequestSample::with_duration_ms("GET", "/", 200, 1.0));

        collector.reset();

        let snapshot = collector.snapshot();
        assert_eq!(snapshot.total_requests, 0);
        assert_eq!(snapshot.sample_count, 0);
        assert!(snapshot.top_endpoints.is_empty());
        assert_eq!(snapshot.active_requests, 1);
    }
}
