//! Sample recordings and the bundle files the CLI reads.
//!
//! A bundle is one JSON document: `{ "recording", "metadata", "sources" }`.
//! The recording lists its calls flat, parents first, each pointing at its
//! parent by id. Each source names the class path entry it was found under.

use crate::builders::{call, values};
use anyhow::Result;
use recview_types::{CallRecord, Method, ProcessMetadata, Recording};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

pub const APP_CLASSES: &str = "/app/classes";
pub const VENDOR_CLASSES: &str = "/opt/vendor/classes";

pub const CART_SOURCE: &str = r#"package com.example.shop;

public class Cart {
    public boolean add(String item, int count) {
        return items.add(item, count);
    }

    public int total() {
        return prices.sum();
    }
}
"#;

/// A small shop run: build a cart, fill it, total it and fail to pay.
///
/// ```text
/// App.main()
/// ├── new Cart()
/// ├── Cart.add("apple", 3) -> true
/// ├── Cart.total() -> 7
/// │   └── PriceList.prices() -> [2, 5, 10 more...]
/// └── Checkout.pay(7) !! IllegalStateException: "card declined"
/// ```
pub fn sample_recording() -> Recording {
    call(1, "com.example.shop.App", "main")
        .static_method()
        .child(call(2, "com.example.shop.Cart", "<init>").constructor())
        .child(
            call(3, "com.example.shop.Cart", "add")
                .arg(values::string("apple"))
                .arg(values::int(3))
                .returns(values::boolean(true)),
        )
        .child(
            call(4, "com.example.shop.Cart", "total")
                .returns(values::int(7))
                .child(
                    call(5, "com.example.shop.PriceList", "prices").returns(values::array(
                        12,
                        vec![values::int(2), values::int(5)],
                    )),
                ),
        )
        .child(
            call(6, "com.example.shop.Checkout", "pay")
                .arg(values::int(7))
                .throws(values::throwable(
                    "java.lang.IllegalStateException",
                    "card declined",
                )),
        )
        .recording(42)
}

pub fn sample_metadata() -> ProcessMetadata {
    let mut metadata = ProcessMetadata::with_class_path([APP_CLASSES]);
    metadata.main_class = Some("com.example.shop.App".to_string());
    metadata.pid = Some(4242);
    metadata
}

/// Bundle for [`sample_recording`]. `Cart` is on the recorded class path,
/// `Checkout` only under a vendor directory the process never loaded from.
pub fn sample_bundle() -> Result<Value> {
    bundle(&sample_recording(), &sample_metadata(), &[
        (APP_CLASSES, "com.example.shop.Cart", CART_SOURCE),
        (
            VENDOR_CLASSES,
            "com.example.shop.Checkout",
            "public class Checkout { void pay(int amount) {} }\n",
        ),
    ])
}

pub fn bundle(
    recording: &Recording,
    metadata: &ProcessMetadata,
    sources: &[(&str, &str, &str)],
) -> Result<Value> {
    let sources: Vec<Value> = sources
        .iter()
        .map(|(origin, type_name, text)| {
            json!({
                "origin": origin,
                "source": { "type_name": type_name, "text": text },
            })
        })
        .collect();

    Ok(json!({
        "recording": flat_recording(recording)?,
        "metadata": serde_json::to_value(metadata)?,
        "sources": sources,
    }))
}

/// The bundle layout of a recording: `{ "id", "calls" }` with every call
/// carrying its parent's id.
pub fn flat_recording(recording: &Recording) -> Result<Value> {
    let mut calls = Vec::with_capacity(recording.call_count());
    let mut stack = vec![(&recording.root, None::<u64>)];
    while let Some((call, parent)) = stack.pop() {
        let mut entry = json!({
            "id": call.id.0,
            "method": serde_json::to_value(&call.method)?,
            "arguments": serde_json::to_value(&call.arguments)?,
            "thrown": call.thrown,
        });
        if let Some(parent) = parent {
            entry["parent"] = json!(parent);
        }
        if let Some(value) = &call.return_value {
            entry["return_value"] = serde_json::to_value(value)?;
        }
        calls.push(entry);
        stack.extend(call.children.iter().rev().map(|child| (child, Some(call.id.0))));
    }
    Ok(json!({ "id": recording.id.0, "calls": calls }))
}

/// A single chain of `depth` nested calls, ids 1 (outermost) to `depth`.
pub fn deep_recording(recording_id: u64, depth: u64) -> Recording {
    let mut innermost = CallRecord::new(depth, Method::new("com.example.Walker", "descend"));
    for id in (1..depth).rev() {
        let mut outer = CallRecord::new(id, Method::new("com.example.Walker", "descend"));
        outer.children.push(innermost);
        innermost = outer;
    }
    Recording::new(recording_id, innermost)
}

pub fn write_json(dir: &Path, name: &str, value: &Value) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value)?)?;
    Ok(path)
}
