#![forbid(unsafe_code)]

//! Span and event capture for history notifications.
//!
//! Run:
//!   cargo test -p retrace-runtime --test tracing_history_changed

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use retrace_harness::Session;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    parent_span_name: Option<String>,
}

#[derive(Default, Clone)]
struct Captured {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
    span_index: Arc<Mutex<HashMap<u64, usize>>>,
}

impl Captured {
    fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Captured
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        for field in attrs.metadata().fields() {
            fields.entry(field.name().to_string()).or_default();
        }

        let mut spans = self.spans.lock().unwrap();
        self.span_index
            .lock()
            .unwrap()
            .insert(id.into_u64(), spans.len());
        spans.push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields,
        });
    }

    fn on_record(
        &self,
        id: &tracing::span::Id,
        values: &tracing::span::Record<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        values.record(&mut visitor);
        let Some(&idx) = self.span_index.lock().unwrap().get(&id.into_u64()) else {
            return;
        };
        if let Some(span) = self.spans.lock().unwrap().get_mut(idx) {
            span.fields.extend(visitor.0);
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            parent_span_name,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Captured {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(captured.clone());
    tracing::subscriber::with_default(subscriber, f);
    captured
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn history_changed_span_carries_revision_and_duration() {
    let captured = with_captured(|| {
        let mut s = Session::new(2);
        let _sub = s.navigator_mut().subscribe(|_| {
            tracing::debug!("observer ran");
        });
        s.click(0);
        s.click(1);
    });

    let spans = captured.spans_named("retrace.history_changed");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].fields.get("revision").map(String::as_str), Some("1"));
    assert_eq!(spans[1].fields.get("revision").map(String::as_str), Some("2"));
    for span in &spans {
        assert_eq!(span.fields.get("subscribers").map(String::as_str), Some("1"));
        assert!(
            span.fields.get("duration_us").is_some_and(|v| !v.is_empty()),
            "duration recorded: {span:?}"
        );
    }

    let observer_events: Vec<_> = captured
        .events()
        .into_iter()
        .filter(|e| e.message == "observer ran")
        .collect();
    assert_eq!(observer_events.len(), 2);
    assert!(
        observer_events
            .iter()
            .all(|e| e.parent_span_name.as_deref() == Some("retrace.history_changed"))
    );
}

#[test]
fn no_span_without_subscribers() {
    let captured = with_captured(|| {
        let mut s = Session::new(1);
        s.click(0);
    });
    assert!(captured.spans_named("retrace.history_changed").is_empty());
}

#[test]
fn consumed_suppression_is_logged_at_debug() {
    let captured = with_captured(|| {
        let mut s = Session::new(2);
        s.click(0);
        s.click(1);
        s.back();
    });
    assert!(
        captured
            .events()
            .iter()
            .any(|e| e.level == tracing::Level::DEBUG && e.message == "focus change suppressed")
    );
}

#[test]
fn prune_reports_removed_count() {
    let captured = with_captured(|| {
        let mut s = Session::new(3);
        for id in 0..3 {
            s.click(id);
        }
        s.delete(1);
        s.back();
    });
    assert!(
        captured
            .events()
            .iter()
            .any(|e| e.message == "pruned empty entries")
    );
}
