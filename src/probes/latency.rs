//! Sequential HTTP GET latency against the target URL

use crate::client::{build_client, status_text};
use crate::models::ProbeReport;
use crate::types::ProbeKind;
use std::time::{Duration, Instant};

pub const HEADERS: [&str; 3] = ["Request #", "Response Time (ms)", "Status"];

/// Outcome of one GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Elapsed milliseconds (body drained) and `"<code> <reason>"`
    Completed { millis: u64, status: String },
    Failed,
}

impl Attempt {
    fn row(&self, index: usize) -> Vec<String> {
        match self {
            Attempt::Completed { millis, status } => {
                vec![index.to_string(), millis.to_string(), status.clone()]
            }
            Attempt::Failed => vec![index.to_string(), "N/A".to_string(), "Failed".to_string()],
        }
    }
}

/// Mean of completed attempts, `None` when none completed
pub fn mean_millis(attempts: &[Attempt]) -> Option<f64> {
    let completed: Vec<u64> = attempts
        .iter()
        .filter_map(|attempt| match attempt {
            Attempt::Completed { millis, .. } => Some(*millis),
            Attempt::Failed => None,
        })
        .collect();

    if completed.is_empty() {
        return None;
    }
    Some(completed.iter().sum::<u64>() as f64 / completed.len() as f64)
}

/// Assemble the latency table and summary line
pub fn build_report(attempts: &[Attempt]) -> ProbeReport {
    let mut report = ProbeReport::new(ProbeKind::Latency);
    let rows = attempts
        .iter()
        .enumerate()
        .map(|(i, attempt)| attempt.row(i + 1))
        .collect();
    report.table(&HEADERS, rows);

    match mean_millis(attempts) {
        Some(mean) => report.line(format!("Average response time: {:.2} ms", mean)),
        None => report.warn("Could not measure latency - all requests failed"),
    }
    report
}

pub async fn run(url: &str, count: u32, timeout: Duration) -> ProbeReport {
    let client = match build_client(timeout) {
        Ok(client) => client,
        Err(e) => return ProbeReport::failed(ProbeKind::Latency, format!("Latency check failed: {}", e)),
    };

    let mut attempts = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let start = Instant::now();
        let attempt = match client.get(url).send().await {
            Ok(response) => {
                let status = status_text(response.status());
                // Timing includes the body so slow transfers show up.
                let _ = response.bytes().await;
                Attempt::Completed {
                    millis: start.elapsed().as_millis() as u64,
                    status,
                }
            }
            Err(_) => Attempt::Failed,
        };
        attempts.push(attempt);
    }

    build_report(&attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportBlock;
    use crate::types::ProbeStatus;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completed(millis: u64) -> Attempt {
        Attempt::Completed {
            millis,
            status: "200 OK".to_string(),
        }
    }

    #[test]
    fn test_mean_ignores_failures() {
        let attempts = vec![completed(10), Attempt::Failed, completed(21)];
        assert_eq!(mean_millis(&attempts), Some(15.5));
    }

    #[test]
    fn test_all_failed_cannot_be_measured() {
        let attempts = vec![Attempt::Failed, Attempt::Failed, Attempt::Failed];
        assert_eq!(mean_millis(&attempts), None);

        let report = build_report(&attempts);
        assert_eq!(report.status, ProbeStatus::Failed);
        assert_eq!(
            report.text_lines(),
            vec!["Could not measure latency - all requests failed"]
        );
        assert!(!report.text_lines()[0].contains("NaN"));
        assert_eq!(report.table_rows()[2], &vec!["3", "N/A", "Failed"]);
    }

    #[test]
    fn test_report_rows_and_average() {
        let report = build_report(&[completed(12), completed(13)]);
        match &report.blocks[0] {
            ReportBlock::Table { headers, rows } => {
                assert_eq!(headers, &HEADERS);
                assert_eq!(rows[0], vec!["1", "12", "200 OK"]);
            }
            other => panic!("expected table, got {:?}", other),
        }
        assert_eq!(report.text_lines(), vec!["Average response time: 12.50 ms"]);
    }

    #[tokio::test]
    async fn test_run_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(204))
            .expect(3)
            .mount(&server)
            .await;

        let report = run(&format!("{}/", server.uri()), 3, Duration::from_secs(5)).await;
        assert_eq!(report.status, ProbeStatus::Succeeded);
        let rows = report.table_rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row[2] == "204 No Content"));
    }

    #[tokio::test]
    async fn test_run_unreachable() {
        // Port 9 on localhost is the discard port and is normally closed.
        let report = run("http://127.0.0.1:9/", 3, Duration::from_secs(2)).await;
        assert_eq!(report.status, ProbeStatus::Failed);
        assert_eq!(report.table_rows().len(), 3);
    }
}
