//! Recursive walks over JSON document trees.
//!
//! [`walk`] and [`walk_mut`] descend depth-first through objects and arrays and
//! hand every object field to a visitor, which decides whether to descend into
//! the field's value. The field predicates below are the only places that know
//! which keys carry resource URLs.

mod crawl;
mod rewrite;
mod sanitize;

pub use crawl::{crawl, ResourceSink};
pub use rewrite::rewrite;
pub use sanitize::sanitize;

use serde_json::Value;

/// Key that holds a resource URL.
pub const URL_KEY: &str = "url";

/// Keys whose object value may hold one nested `url` to rewrite.
pub const URL_CONTAINER_KEYS: [&str; 4] = ["url", "remote_data", "related", "share"];

/// What the walker does after a visitor has seen a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Descend,
    Skip,
}

pub trait Visitor {
    fn visit_field(&mut self, key: &str, value: &Value) -> Walk;
}

pub trait VisitorMut {
    fn visit_field_mut(&mut self, key: &str, value: &mut Value) -> Walk;
}

pub fn walk<V: Visitor + ?Sized>(value: &Value, visitor: &mut V) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if visitor.visit_field(key, child) == Walk::Descend {
                    walk(child, visitor);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

pub fn walk_mut<V: VisitorMut + ?Sized>(value: &mut Value, visitor: &mut V) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if visitor.visit_field_mut(key, child) == Walk::Descend {
                    walk_mut(child, visitor);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                walk_mut(item, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// A discoverable resource: key `url` holding a string that starts with `http`.
pub fn resource_url<'a>(key: &str, value: &'a Value) -> Option<&'a str> {
    if key != URL_KEY {
        return None;
    }
    value.as_str().filter(|s| s.starts_with("http"))
}

/// A container field: one of [`URL_CONTAINER_KEYS`] whose value is an object.
pub fn is_url_container(key: &str, value: &Value) -> bool {
    value.is_object() && URL_CONTAINER_KEYS.contains(&key)
}
