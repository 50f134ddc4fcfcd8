use relationship_view::prelude::*;
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Whether the harness reads the view as a bare value or as a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Value,
    Document,
}

pub const MODES: [Mode; 2] = [Mode::Value, Mode::Document];

/// A tiny "template" bound to one view
///
/// Renders names joined as `Name|Name|`, or `empty_text` when the value is
/// empty, and re-renders whenever the view invalidates it.
pub struct Harness {
    pub view: RelationshipView<MemoryRecord, MemoryChangeNotifier, ChannelHost>,
    signals: UnboundedReceiver<HostSignal>,
    record: Rc<MemoryRecord>,
    relationship: String,
    mode: Mode,
    empty_text: &'static str,
    text: String,
    pub renders: usize,
    pub failures: Vec<anyhow::Error>,
}

impl Harness {
    pub fn render(
        store: &MemoryStore,
        record: &Rc<MemoryRecord>,
        relationship: &str,
        mode: Mode,
        empty_text: &'static str,
    ) -> Self {
        let (host, signals) = ChannelHost::new();
        let mut harness = Self {
            view: RelationshipView::new(store.notifier(), host),
            signals,
            record: Rc::clone(record),
            relationship: relationship.to_string(),
            mode,
            empty_text,
            text: String::new(),
            renders: 0,
            failures: Vec::new(),
        };
        harness.rerender();
        harness
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lets local tasks run, then handles every queued signal
    pub async fn settled(&mut self) {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }

        let mut invalidated = false;
        while let Ok(signal) = self.signals.try_recv() {
            match signal {
                HostSignal::Invalidated => invalidated = true,
                HostSignal::Failed(error) => self.failures.push(error),
            }
        }
        if invalidated {
            self.rerender();
        }
    }

    fn rerender(&mut self) {
        let value = match self.mode {
            Mode::Value => self.view.compute(&self.record, &self.relationship),
            Mode::Document => self
                .view
                .compute_document(&self.record, &self.relationship)
                .map(|document| document.data),
        }
        .expect("relationship should resolve");

        let labels: Vec<String> = value.entities().iter().map(|e| e.label()).collect();
        self.text = if labels.is_empty() {
            self.empty_text.to_string()
        } else if value.as_many().is_some() {
            labels.iter().map(|l| format!("{}|", l)).collect()
        } else {
            labels.concat()
        };
        self.renders += 1;
    }
}

pub fn id(s: &str) -> RecordIdentifier {
    s.parse().unwrap()
}

pub fn named(identifier: &str, name: &str) -> RecordData {
    RecordData::new(id(identifier)).with_attribute("name", name)
}
