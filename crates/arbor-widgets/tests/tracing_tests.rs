#![forbid(unsafe_code)]

//! Tracing span instrumentation tests.
//!
//! List box spans enabled:
//!   cargo test -p arbor-widgets --features tracing --test tracing_tests
//!
//! Without the feature only the no-op check runs:
//!   cargo test -p arbor-widgets --test tracing_tests -- noop

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use arbor_core::event::{KeyCode, KeyEvent};
use arbor_core::geometry::Size;
use arbor_tree::SimpleListWalker;
use arbor_widgets::{ListBox, Text};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Span recorder
// ============================================================================

/// One span as seen when it was opened.
#[derive(Debug, Clone)]
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
struct Opened {
    name: &'static str,
    fields: BTreeMap<&'static str, String>,
    parent: Option<&'static str>,
}

#[derive(Default)]
struct Fields(BTreeMap<&'static str, String>);

impl Visit for Fields {
    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name(), format!("{value:?}"));
    }
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Opened>>>);

impl<S> Layer<S> for Recorder
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        let parent = ctx.lookup_current().map(|span| span.name());
        self.0.lock().unwrap().push(Opened {
            name: attrs.metadata().name(),
            fields: fields.0,
            parent,
        });
    }
}

fn record(f: impl FnOnce()) -> Vec<Opened> {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    let opened = recorder.0.lock().unwrap().clone();
    opened
}

fn sample() -> ListBox<SimpleListWalker<Text>> {
    ListBox::new(
        (0..20)
            .map(|i| Text::new(format!("line {i}")).with_selectable(i % 2 == 0))
            .collect(),
    )
}

// ============================================================================
// Spans (tracing feature)
// ============================================================================

#[cfg(feature = "tracing")]
#[test]
fn render_emits_nested_layout_span() {
    let spans = record(|| {
        let mut lb = sample();
        lb.render(Size::new(10, 4), true).unwrap();
    });
    let render = spans
        .iter()
        .find(|s| s.name == "listbox_render")
        .expect("listbox_render span");
    assert_eq!(render.fields.get("width").map(String::as_str), Some("10"));
    assert_eq!(render.fields.get("height").map(String::as_str), Some("4"));
    assert!(spans.iter().any(|s| s.name == "listbox_calculate_visible"
        && s.parent == Some("listbox_render")));
}

#[cfg(feature = "tracing")]
#[test]
fn paging_emits_page_spans_under_keypress() {
    let spans = record(|| {
        let mut lb = sample();
        let size = Size::new(10, 4);
        lb.keypress(size, KeyEvent::new(KeyCode::PageDown)).unwrap();
        lb.keypress(size, KeyEvent::new(KeyCode::PageUp)).unwrap();
    });
    for name in ["listbox_page_down", "listbox_page_up"] {
        let span = spans
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("missing {name}"));
        assert_eq!(span.parent, Some("listbox_keypress"));
    }
}

// ============================================================================
// No-op path
// ============================================================================

#[cfg(not(feature = "tracing"))]
#[test]
fn noop_without_feature_emits_no_spans() {
    let spans = record(|| {
        let mut lb = sample();
        let size = Size::new(10, 4);
        lb.render(size, true).unwrap();
        lb.keypress(size, KeyEvent::new(KeyCode::PageDown)).unwrap();
    });
    assert!(spans.iter().all(|s| !s.name.starts_with("listbox_")));
}
