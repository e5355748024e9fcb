//! Discovery pass: hand every resource URL in a document to a sink.

use serde_json::Value;

use super::{resource_url, walk, Visitor, Walk};

/// Receives each discovered resource URL, in document order.
///
/// The pipeline's implementation fetches, validates, sanitizes and persists
/// the resource and records it in the mirror store; URLs already in the
/// store are skipped there.
pub trait ResourceSink {
    fn on_resource(&mut self, url: &str);
}

/// Walks `value` depth-first and reports every `url` field whose string value
/// starts with `http`. The value under a reported field is not descended
/// into; every other field is. `value` itself is never modified.
pub fn crawl<S: ResourceSink + ?Sized>(value: &Value, sink: &mut S) {
    let mut crawler = Crawler { sink };
    walk(value, &mut crawler);
}

struct Crawler<'a, S: ?Sized> {
    sink: &'a mut S,
}

impl<S: ResourceSink + ?Sized> Visitor for Crawler<'_, S> {
    fn visit_field(&mut self, key: &str, value: &Value) -> Walk {
        match resource_url(key, value) {
            Some(url) => {
                self.sink.on_resource(url);
                Walk::Skip
            }
            None => Walk::Descend,
        }
    }
}
