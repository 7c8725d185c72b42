// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Reveal events land on thread 0 and counter events on thread 1. Counter
//! animations become async slices keyed by their token, so superseded
//! animations show up as slices cut short.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use feminova_core::time::HostTime;
use feminova_core::trace::AnimationPhase;

use crate::recorder::{RecordedEvent, decode};

const REVEAL_TID: u32 = 0;
const COUNTER_TID: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = us(recorded.at());
        match recorded {
            RecordedEvent::RevealStart(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "RevealStart",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": REVEAL_TID,
                    "s": "g",
                    "args": {
                        "targets": e.targets,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::TargetObserved(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Observe",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": REVEAL_TID,
                    "s": "t",
                    "args": { "target": e.target.0 }
                }));
            }
            RecordedEvent::ObserveFailed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "ObserveFailed",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": REVEAL_TID,
                    "s": "t",
                    "args": { "target": e.target.0 }
                }));
            }
            RecordedEvent::TargetRevealed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Reveal",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": REVEAL_TID,
                    "s": "t",
                    "args": {
                        "target": e.target.0,
                        "role": format!("{:?}", e.role),
                        "children": e.children,
                    }
                }));
            }
            RecordedEvent::ChildRevealed(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "RevealChild",
                    "cat": "Reveal",
                    "ts": ts,
                    "pid": 0,
                    "tid": REVEAL_TID,
                    "s": "t",
                    "args": {
                        "target": e.target.0,
                        "child_index": e.child_index,
                        "scheduled_us": us(e.scheduled_for),
                    }
                }));
            }
            RecordedEvent::CounterGrowth(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "CounterValue",
                    "cat": "Counter",
                    "ts": ts,
                    "pid": 0,
                    "tid": COUNTER_TID,
                    "args": { "value": e.new_value }
                }));
            }
            RecordedEvent::CounterToggle(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Toggle",
                    "cat": "Counter",
                    "ts": ts,
                    "pid": 0,
                    "tid": COUNTER_TID,
                    "s": "t",
                    "args": {
                        "expanded": e.expanded,
                        "value": e.value,
                    }
                }));
            }
            RecordedEvent::Animation(e) => {
                let ph = match e.phase {
                    AnimationPhase::Start => "b",
                    AnimationPhase::Finish | AnimationPhase::Superseded => "e",
                };
                events.push(json!({
                    "ph": ph,
                    "name": "Animation",
                    "cat": "Counter",
                    "id": e.token,
                    "ts": ts,
                    "pid": 0,
                    "tid": COUNTER_TID,
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "superseded": e.phase == AnimationPhase::Superseded,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn us(t: HostTime) -> u64 {
    t.ticks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use feminova_core::trace::{AnimationEvent, CounterGrowthEvent, TraceSink};
    use feminova_core::time::Duration;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_counter_growth(&CounterGrowthEvent {
            at: HostTime(4_000_000),
            old_value: 1_000,
            new_value: 1_012,
            elapsed: Duration::from_millis(4_000),
        });
        rec.on_animation(&AnimationEvent {
            at: HostTime(4_000_000),
            token: 1,
            phase: AnimationPhase::Start,
            from: 1_000,
            to: 1_012,
        });
        rec.on_animation(&AnimationEvent {
            at: HostTime(5_200_000),
            token: 1,
            phase: AnimationPhase::Finish,
            from: 1_000,
            to: 1_012,
        });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "C");
        assert_eq!(parsed[0]["args"]["value"], 1_012);

        assert_eq!(parsed[1]["ph"], "b");
        assert_eq!(parsed[1]["id"], 1);
        assert_eq!(parsed[2]["ph"], "e");
        assert_eq!(parsed[2]["ts"], 5_200_000);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
