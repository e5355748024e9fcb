//! Rewrite pass: substitute source URLs with their mirror addresses.

use serde_json::Value;

use super::{is_url_container, walk_mut, VisitorMut, Walk, URL_KEY};
use crate::mirror_store::MirrorStore;

/// Replaces every source URL known to `store` with its mirror URL, in place.
///
/// A `url` field holding a mapped string is replaced. A container field
/// (`url`, `remote_data`, `related`, `share` with an object value) has its own
/// `url` replaced one level down and is not walked further. Everything else
/// is descended into.
///
/// The pipeline runs this over the root document after the crawl. Mirrored
/// resources keep their source URLs unless `rewrite_resources` is enabled,
/// in which case each resource written during the run is passed through this
/// function as well.
pub fn rewrite(value: &mut Value, store: &MirrorStore) -> usize {
    let mut rewriter = Rewriter { store, replaced: 0 };
    walk_mut(value, &mut rewriter);
    rewriter.replaced
}

struct Rewriter<'a> {
    store: &'a MirrorStore,
    replaced: usize,
}

impl Rewriter<'_> {
    fn replace(&mut self, slot: &mut Value) {
        let mirror = match slot.as_str().and_then(|url| self.store.get(url)) {
            Some(m) => m.to_string(),
            None => return,
        };
        *slot = Value::String(mirror);
        self.replaced += 1;
    }
}

impl VisitorMut for Rewriter<'_> {
    fn visit_field_mut(&mut self, key: &str, value: &mut Value) -> Walk {
        if is_url_container(key, value) {
            if let Some(inner) = value.get_mut(URL_KEY) {
                self.replace(inner);
            }
            return Walk::Skip;
        }
        if key == URL_KEY && value.is_string() {
            self.replace(value);
            return Walk::Skip;
        }
        Walk::Descend
    }
}
