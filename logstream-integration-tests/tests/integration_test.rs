use std::collections::HashMap;
use std::io::Write;
use std::num::NonZeroUsize;

use logstream_analyzer::{percentile, Analyzer};
use logstream_cli::config::RunConfig;
use logstream_cli::parser::parse_file;
use logstream_cli::run;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

const SERVICES: [&str; 4] = ["auth", "payment", "db", "search"];
const LEVELS: [&str; 4] = ["INFO", "WARN", "ERROR", "DEBUG"];

/// One generated line plus what it should contribute to the stats.
struct Line {
    text: String,
    valid: bool,
    is_error: bool,
    sample: Option<(&'static str, f64)>,
}

fn generate(rng: &mut StdRng, count: usize) -> Vec<Line> {
    (0..count)
        .map(|i| {
            let roll: u32 = rng.gen_range(0..100);
            if roll < 3 {
                return Line { text: format!("{{\"timestamp\": \"t{i}\", \"lev"), valid: false, is_error: false, sample: None };
            }
            if roll < 5 {
                return Line {
                    text: format!(r#"{{"timestamp": "t{i}", "level": "ERROR"}}"#),
                    valid: false,
                    is_error: false,
                    sample: None,
                };
            }
            let service = *SERVICES.choose(rng).unwrap();
            let level = *LEVELS.choose(rng).unwrap();
            let latency = rng.gen_range(0..5_000) as f64 / 4.0;
            let (latency_json, sample) = match roll {
                5..=6 => ("null".to_string(), None),
                7 => ("\"slow\"".to_string(), None),
                _ => (latency.to_string(), Some((service, latency))),
            };
            Line {
                text: format!(
                    r#"{{"timestamp": "t{i}", "level": "{level}", "service": "{service}", "latency_ms": {latency_json}, "msg": "generated"}}"#
                ),
                valid: true,
                is_error: level == "ERROR",
                sample,
            }
        })
        .collect()
}

fn write_lines(lines: &[Line]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line.text).unwrap();
    }
    file.flush().unwrap();
    file
}

fn expected_samples<'a>(lines: impl Iterator<Item = &'a Line>) -> HashMap<&'static str, Vec<f64>> {
    let mut by_service: HashMap<&'static str, Vec<f64>> = HashMap::new();
    for line in lines {
        if let Some((service, latency)) = line.sample {
            by_service.entry(service).or_default().push(latency);
        }
    }
    by_service
}

#[test]
fn test_generated_stream_end_to_end() {
    let mut rng = StdRng::seed_from_u64(20250115);
    let lines = generate(&mut rng, 5_000);
    let input = write_lines(&lines);
    let out_dir = tempfile::tempdir().unwrap();
    let config = RunConfig { output: out_dir.path().join("report.html"), ..RunConfig::new(input.path()) };

    let stats = run(&config).expect("run failed");

    let valid: Vec<&Line> = lines.iter().filter(|l| l.valid).collect();
    let errors = valid.iter().filter(|l| l.is_error).count() as u64;
    assert_eq!(stats.total_logs, valid.len() as u64);
    assert_eq!(stats.error_count, errors);
    let expected_rate = ((errors as f64 / valid.len() as f64 * 100.0) * 100.0).round_ties_even() / 100.0;
    assert_eq!(stats.error_rate, expected_rate);

    let samples = expected_samples(valid.iter().copied());
    assert_eq!(stats.services.len(), samples.len());
    for (service, latencies) in &samples {
        let s = &stats.services[*service];
        assert_eq!(s.count, latencies.len() as u64, "{service} count");
        assert_eq!(s.p50, percentile(latencies, 50.0), "{service} p50");
        assert_eq!(s.p99, percentile(latencies, 99.0), "{service} p99");
        assert!(s.min <= s.p50 && s.p50 <= s.p99 && s.p99 <= s.max, "{service} ordering");
    }

    let html = std::fs::read_to_string(&config.output).unwrap();
    for service in stats.services.keys() {
        assert!(html.contains(&format!("<strong>{service}</strong>")));
    }
}

#[test]
fn test_window_matches_tail_of_valid_records() {
    let mut rng = StdRng::seed_from_u64(7);
    let lines = generate(&mut rng, 2_000);
    let input = write_lines(&lines);
    let out_dir = tempfile::tempdir().unwrap();
    let window = 250;
    let config = RunConfig {
        output: out_dir.path().join("report.html"),
        window_size: NonZeroUsize::new(window),
        ..RunConfig::new(input.path())
    };

    let stats = run(&config).unwrap();

    let valid: Vec<&Line> = lines.iter().filter(|l| l.valid).collect();
    let tail = &valid[valid.len() - window..];
    assert_eq!(stats.total_logs, window as u64);
    assert_eq!(stats.error_count, tail.iter().filter(|l| l.is_error).count() as u64);

    let samples = expected_samples(tail.iter().copied());
    for (service, latencies) in &samples {
        assert_eq!(stats.services[*service].count, latencies.len() as u64);
        assert_eq!(stats.services[*service].p99, percentile(latencies, 99.0));
    }
}

#[test]
fn test_file_order_does_not_change_percentiles() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut lines = generate(&mut rng, 1_000);
    let first = write_lines(&lines);
    lines.shuffle(&mut rng);
    let second = write_lines(&lines);

    let analyze = |file: &NamedTempFile| {
        let mut analyzer = Analyzer::new();
        analyzer.extend(&parse_file(file.path()).unwrap());
        analyzer.get_stats()
    };

    assert_eq!(analyze(&first), analyze(&second));
}

#[test]
fn test_snapshot_json_shape() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, r#"{{"timestamp": "t1", "level": "ERROR", "service": "auth", "latency_ms": 10, "msg": "a"}}"#).unwrap();
    writeln!(input, r#"{{"timestamp": "t2", "level": "INFO", "service": "auth", "latency_ms": 30, "msg": "b"}}"#).unwrap();
    writeln!(input, r#"{{"timestamp": "t3", "level": "INFO", "service": null, "latency_ms": 99, "msg": "c"}}"#).unwrap();
    writeln!(input, r#"{{"timestamp": "t4", "level": "INFO", "service": "auth", "latency_ms": 20, "msg": "d"}}"#).unwrap();
    input.flush().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let config = RunConfig { output: out_dir.path().join("r.html"), ..RunConfig::new(input.path()) };

    let stats = run(&config).unwrap();
    let mut json = serde_json::to_value(&stats).unwrap();

    let p99 = json["services"]["auth"]["p99"].take().as_f64().unwrap();
    assert!((p99 - 29.8).abs() < 1e-9, "p99={p99}");
    assert_eq!(
        json,
        serde_json::json!({
            "total_logs": 4,
            "error_count": 1,
            "error_rate": 25.0,
            "services": {
                "auth": { "count": 3, "p50": 20.0, "p99": null, "min": 10.0, "max": 30.0 }
            }
        })
    );
}
