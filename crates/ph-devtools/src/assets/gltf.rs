// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rewriting texture references inside glTF documents.

use super::classify::KTX2_EXTENSION;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const URI_KEY: &str = "uri";
const TEXTURE_MARKERS: &[&str] = &["normal", "basecolor"];

/// Calls `visit` with every `(key, string value)` entry of every object in
/// the tree, descending through objects and arrays.
pub fn visit_keyed_strings<F>(value: &mut Value, visit: &mut F)
where
    F: FnMut(&str, &mut String),
{
    match value {
        Value::Object(map) => visit_object(map, visit),
        Value::Array(items) => {
            for item in items {
                visit_keyed_strings(item, visit);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn visit_object<F>(map: &mut Map<String, Value>, visit: &mut F)
where
    F: FnMut(&str, &mut String),
{
    for (key, child) in map.iter_mut() {
        match child {
            Value::String(text) => visit(key, text),
            other => visit_keyed_strings(other, visit),
        }
    }
}

/// Whether a `uri` value points at a texture the converter transcodes.
pub fn is_texture_reference(uri: &str) -> bool {
    let lower = uri.to_lowercase();
    TEXTURE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Replaces the extension of the last path component of `uri`.
///
/// Both `/` and `\` separate components. A name without extension gets one
/// appended; a leading dot does not start an extension.
pub fn replace_extension(uri: &str, extension: &str) -> String {
    let name_start = uri.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let (dir, name) = uri.split_at(name_start);
    if name.is_empty() {
        return uri.to_string();
    }
    let stem = match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    };
    format!("{dir}{stem}.{extension}")
}

/// Points every texture `uri` in `document` at its KTX2 counterpart.
///
/// Returns the number of references rewritten.
pub fn rewrite_texture_uris(document: &mut Value) -> usize {
    let mut rewritten = 0;
    let mut rewrite = |key: &str, value: &mut String| {
        if key == URI_KEY && is_texture_reference(value) {
            *value = replace_extension(value.as_str(), KTX2_EXTENSION);
            rewritten += 1;
        }
    };
    visit_keyed_strings(document, &mut rewrite);
    rewritten
}

/// Serializes `document` with four-space indentation.
pub fn to_pretty_string(document: &Value) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reads the glTF document at `source`, rewrites its texture references and
/// writes it to `dest`. Returns the number of references rewritten.
pub fn convert_document(source: &Path, dest: &Path) -> Result<usize> {
    let text = fs::read_to_string(source).map_err(|e| Error::io(source, e))?;
    let mut document: Value = serde_json::from_str(&text).map_err(|source_err| Error::Json {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let rewritten = rewrite_texture_uris(&mut document);

    let output = to_pretty_string(&document).map_err(|e| Error::Json {
        path: dest.to_path_buf(),
        source: e,
    })?;
    fs::write(dest, output).map_err(|e| Error::io(dest, e))?;
    Ok(rewritten)
}
