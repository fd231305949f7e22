//! Recorded page timelines for the CLI.
//!
//! A timeline is a list of frames, one per user action or executed task,
//! each carrying a snapshot of the flash message container.

use std::fmt::Write as _;
use std::time::Duration;

use serde::Serialize;

use crate::page::Page;
use crate::services::timers::STEP_LIMIT;
use crate::styles::flash;

/// One point on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Virtual time in milliseconds.
    pub at_ms: u64,
    /// What happened: a user action or a task label.
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// HTML of the flash message container (empty if there is none).
    pub flash: String,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    frames: Vec<Frame>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Snapshot the page after `event`.
    pub fn record(&mut self, page: &Page, event: impl Into<String>, detail: Option<String>) {
        self.frames.push(Frame {
            at_ms: millis(page.now()),
            event: event.into(),
            detail,
            flash: flash_html(page),
        });
    }

    /// Run tasks due by `t`, one frame per task, then move the clock to `t`.
    pub fn run_until(&mut self, page: &mut Page, t: Duration) {
        let mut steps = 0;
        while steps < STEP_LIMIT && page.next_due().is_some_and(|due| due <= t) {
            let Some(step) = page.run_next() else {
                break;
            };
            self.record(page, step.task.label(), None);
            steps += 1;
        }
        page.advance_to(t);
    }

    /// Run every pending task, one frame per task.
    pub fn run_to_quiescence(&mut self, page: &mut Page) {
        for _ in 0..STEP_LIMIT {
            let Some(step) = page.run_next() else {
                return;
            };
            self.record(page, step.task.label(), None);
        }
    }

    /// Plain-text rendering, one block per frame.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            let _ = writeln!(out, "[{:>6}ms] {}", frame.at_ms, frame.event);
            if let Some(detail) = &frame.detail {
                let _ = writeln!(out, "           {detail}");
            }
            if !frame.flash.is_empty() {
                let _ = writeln!(out, "           {}", frame.flash);
            }
        }
        out
    }

    /// One JSON object per line.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for frame in &self.frames {
            out.push_str(&serde_json::to_string(frame)?);
            out.push('\n');
        }
        Ok(out)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// HTML of the page's flash message container, or an empty string.
pub fn flash_html(page: &Page) -> String {
    let doc = page.document();
    page.notifications()
        .container()
        .filter(|node| doc.is_connected(*node))
        .or_else(|| doc.query_selector(flash::CONTAINER_SELECTOR))
        .map(|node| doc.render_html(node))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::widgets::Kind;
    use pageflash_core::Config;

    fn loaded_demo() -> Page {
        let (doc, _) = demo::demo_document();
        let mut page = Page::with_seed(doc, Config::default(), 5).unwrap();
        page.load();
        page
    }

    #[test]
    fn test_run_until_records_each_task() {
        let mut page = loaded_demo();
        let mut timeline = Timeline::new();
        page.show_notification("Saved", Kind::Success);
        timeline.record(&page, "show", None);
        timeline.run_until(&mut page, Duration::from_millis(10));

        let frames = timeline.frames();
        assert_eq!(frames[0].event, "show");
        assert!(frames[0].flash.contains("Saved"));
        assert_eq!(frames.last().unwrap().at_ms, 10);
        assert!(frames.iter().any(|f| f.event.ends_with("enter")));
        assert_eq!(page.now(), Duration::from_millis(10));
    }

    #[test]
    fn test_run_to_quiescence_clears_flash() {
        let mut page = loaded_demo();
        let mut timeline = Timeline::new();
        page.show_notification("Saved", Kind::Success);
        timeline.run_to_quiescence(&mut page);
        assert_eq!(page.pending_tasks(), 0);
        let last = timeline.frames().last().unwrap();
        assert_eq!(last.flash, r#"<div class="flash-messages"></div>"#);
    }

    #[test]
    fn test_json_lines() {
        let page = loaded_demo();
        let mut timeline = Timeline::new();
        timeline.record(&page, "load", Some("ready".into()));
        let json = timeline.to_json_lines().unwrap();
        let value: serde_json::Value = serde_json::from_str(json.trim()).unwrap();
        assert_eq!(value["event"], "load");
        assert_eq!(value["detail"], "ready");
        assert_eq!(value["at_ms"], 0);
    }

    #[test]
    fn test_render_text() {
        let page = loaded_demo();
        let mut timeline = Timeline::new();
        timeline.record(&page, "load", None);
        let text = timeline.render_text();
        assert!(text.starts_with("[     0ms] load"));
        assert!(text.contains("flash-messages"));
    }
}
