//! The structured export boundary.
//!
//! Everything that leaves the core — timeline events, per-process
//! summaries, run metrics — is serialized here and nowhere else, as
//! JSON-lines with a `type` tag so a consumer can multiplex the three
//! record kinds over one stream.

use std::io::Write;

use anyhow::Result;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;

use crate::metrics::SimMetrics;
use crate::process::Process;
use crate::timeline::Timeline;

fn tagged(tag: &str, value: Value) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(tag.to_string()));
    if let Value::Object(fields) = value {
        obj.extend(fields);
    }
    Value::Object(obj)
}

/// Write every timeline event as a `{"type": "event", ...}` line.
pub fn write_timeline<W: Write>(w: &mut W, timeline: &Timeline) -> Result<()> {
    for ev in timeline.events() {
        writeln!(w, "{}", tagged("event", serde_json::to_value(ev)?))?;
    }
    Ok(())
}

/// Write one `{"type": "process", ...}` summary line per record, including
/// consumed vs requested work so omitted processes report their shortfall.
pub fn write_process_summary<W: Write>(w: &mut W, procs: &[Process]) -> Result<()> {
    for p in procs {
        let row = json!({
            "type": "process",
            "pid": p.pid,
            "burst": p.burst,
            "consumed": p.consumed(),
            "arrival": p.arrival,
            "priority": p.priority,
            "start": p.start,
            "finish": p.finish,
            "waited": p.waited,
            "state": p.state,
        });
        writeln!(w, "{row}")?;
    }
    Ok(())
}

/// Write the run averages as a single `{"type": "metrics", ...}` line.
pub fn write_metrics<W: Write>(w: &mut W, metrics: &SimMetrics) -> Result<()> {
    writeln!(w, "{}", tagged("metrics", serde_json::to_value(metrics)?))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::config::SchedAlgorithm;
    use crate::config::SchedConfig;
    use crate::metrics::compute_metrics;
    use crate::metrics::MetricsScope;
    use crate::sched::run_schedule;

    fn sample_run() -> (Vec<Process>, Timeline) {
        let mut procs = vec![
            Process::new("P1", 2, 0, 1).unwrap(),
            Process::new("P2", 1, 1, 2).unwrap(),
        ];
        let timeline = run_schedule(&mut procs, &SchedConfig::new(SchedAlgorithm::Fifo)).unwrap();
        (procs, timeline)
    }

    #[test]
    fn test_event_lines_parse_back() {
        let (_, timeline) = sample_run();
        let mut buf = Vec::new();
        write_timeline(&mut buf, &timeline).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), timeline.len());
        for line in lines {
            let row: Value = serde_json::from_str(line).unwrap();
            assert_eq!(row["type"], "event");
            assert!(row["pid"].is_string());
            assert!(row["start_cycle"].is_u64());
        }
    }

    #[test]
    fn test_process_summary_reports_shortfall() {
        let (procs, _) = sample_run();
        let mut buf = Vec::new();
        write_process_summary(&mut buf, &procs).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for line in text.lines() {
            let row: Value = serde_json::from_str(line).unwrap();
            assert_eq!(row["type"], "process");
            assert_eq!(row["consumed"], row["burst"], "both processes ran to completion");
            assert_eq!(row["state"], "TERMINATED");
        }
    }

    #[test]
    fn test_metrics_line_round_trips_through_file() {
        let (procs, _) = sample_run();
        let metrics = compute_metrics(&procs, MetricsScope::All);

        let mut file = tempfile::tempfile().unwrap();
        write_metrics(&mut file, &metrics).unwrap();

        use std::io::Seek;
        file.rewind().unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        let row: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(row["type"], "metrics");
        assert_eq!(row["avg_waiting"].as_f64().unwrap(), metrics.avg_waiting);
    }
}
