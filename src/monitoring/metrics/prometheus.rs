//! Prometheus text exposition

use super::collector::MetricsCollector;
use std::fmt::Write;

/// Minimal writer for the Prometheus text exposition format
#[derive(Debug, Default)]
pub(crate) struct PrometheusText {
    buffer: String,
}

impl PrometheusText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the `# HELP` and `# TYPE` header of a metric family
    pub fn family(&mut self, name: &str, help: &str, kind: &str) -> &mut Self {
        let _ = writeln!(self.buffer, "# HELP {} {}", name, help);
        let _ = writeln!(self.buffer, "# TYPE {} {}", name, kind);
        self
    }

    /// Write one unlabeled sample
    pub fn value(&mut self, name: &str, value: f64) -> &mut Self {
        self.sample(name, &[], value)
    }

    /// Write one sample with labels
    pub fn sample(&mut self, name: &str, labels: &[(&str, &str)], value: f64) -> &mut Self {
        self.buffer.push_str(name);
        if !labels.is_empty() {
            self.buffer.push('{');
            for (i, (key, val)) in labels.iter().enumerate() {
                if i > 0 {
                    self.buffer.push(',');
                }
                let _ = write!(self.buffer, "{}=\"{}\"", key, escape_label(val));
            }
            self.buffer.push('}');
        }
        let _ = writeln!(self.buffer, " {}", format_value(value));
        self
    }

    /// Single-sample family, the common case for counters and gauges
    pub fn single(&mut self, name: &str, help: &str, kind: &str, value: f64) -> &mut Self {
        self.family(name, help, kind).value(name, value)
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Escape a label value: backslash, double quote and line feed
pub(crate) fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

impl MetricsCollector {
    /// Render the HTTP request metrics in Prometheus text format
    pub fn to_prometheus_text(&self) -> String {
        let mut out = PrometheusText::new();
        self.write_prometheus(&mut out);
        out.finish()
    }

    pub(crate) fn write_prometheus(&self, out: &mut PrometheusText) {
        let snapshot = self.snapshot();

        out.single(
            "http_requests_total",
            "Total number of HTTP requests recorded",
            "counter",
            snapshot.total_requests as f64,
        )
        .single(
            "http_requests_active",
            "Number of HTTP requests currently in flight",
            "gauge",
            snapshot.active_requests as f64,
        )
        .single(
            "http_request_errors_total",
            "Total number of HTTP responses with status >= 400",
            "counter",
            self.total_errors() as f64,
        )
        .single(
            "http_error_rate_percent",
            "Percentage of HTTP requests that failed",
            "gauge",
            snapshot.error_rate,
        )
        .single(
            "http_response_time_p95_ms",
            "95th percentile response time over recent samples",
            "gauge",
            snapshot.response_time_p95,
        )
        .single(
            "http_response_time_p99_ms",
            "99th percentile response time over recent samples",
            "gauge",
            snapshot.response_time_p99,
        );

        let mut endpoints: Vec<_> = {
            let storage = self.storage.read();
            storage
                .endpoints
                .values()
                .map(|stat| (stat.method.clone(), stat.path.clone(), stat.count, stat.average()))
                .collect()
        };
        endpoints.sort_by(|a, b| (&a.1, &a.0).cmp(&(&b.1, &b.0)));

        out.family(
            "http_requests_by_route_total",
            "HTTP requests per method and route",
            "counter",
        );
        for (method, route, count, _) in &endpoints {
            out.sample(
                "http_requests_by_route_total",
                &[("method", method.as_str()), ("route", route.as_str())],
                *count as f64,
            );
        }

        out.family(
            "http_route_avg_response_time_ms",
            "Average response time per method and route",
            "gauge",
        );
        for (method, route, _, avg) in &endpoints {
            out.sample(
                "http_route_avg_response_time_ms",
                &[("method", method.as_str()), ("route", route.as_str())],
                *avg,
            );
        }

        out.family(
            "http_responses_by_status_total",
            "HTTP responses per status code",
            "counter",
        );
        for entry in &snapshot.status_code_distribution {
            let status = entry.status_code.to_string();
            out.sample(
                "http_responses_by_status_total",
                &[("status", status.as_str())],
                entry.count as f64,
            );
        }
    }
}
