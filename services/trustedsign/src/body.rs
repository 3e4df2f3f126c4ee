//! Request parameters and their wire encodings.

use std::fmt::{Debug, Formatter};

use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use serde_json::{Map, Value};
use trustedsign_core::{Context, Error, Result};

use super::constants::*;

/// A file to upload as one part of a `multipart/form-data` body.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    filename: String,
    content: Bytes,
    content_type: String,
}

impl UploadFile {
    /// Create an upload from in-memory content.
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: CONTENT_TYPE_OCTET_STREAM.to_string(),
        }
    }

    /// Load an upload from disk through the context's file reader.
    ///
    /// The filename is the last component of `path`.
    pub async fn from_path(ctx: &Context, path: &str) -> Result<Self> {
        let content = ctx.file_read(path).await?;
        let filename = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::request_invalid(format!("upload path {path} has no filename")))?;

        Ok(Self::new(filename, content))
    }

    /// Set the content type of this part.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Declared filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// File content.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Content type of this part.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

impl Debug for UploadFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// A single request parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A JSON value.
    Value(Value),
    /// A file handle, always sent as a multipart part.
    File(UploadFile),
}

/// Ordered request parameters.
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Param)>,
}

impl Params {
    /// Create empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a param.
    pub fn insert(&mut self, key: impl Into<String>, param: Param) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = param,
            None => self.entries.push((key, param)),
        }
    }

    /// Add a JSON value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Param::Value(value.into()));
        self
    }

    /// Add a file.
    pub fn with_file(mut self, key: impl Into<String>, file: UploadFile) -> Self {
        self.insert(key, Param::File(file));
        self
    }

    /// Get a param by key.
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of params.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no params.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over params in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Check if any param is a file.
    pub fn has_files(&self) -> bool {
        self.entries.iter().any(|(_, v)| matches!(v, Param::File(_)))
    }

    /// Move every file param out, leaving only JSON values behind.
    pub fn take_files(&mut self) -> Vec<(String, UploadFile)> {
        let mut files = Vec::new();
        let mut values = Vec::with_capacity(self.entries.len());
        for (k, v) in self.entries.drain(..) {
            match v {
                Param::File(f) => files.push((k, f)),
                v => values.push((k, v)),
            }
        }
        self.entries = values;
        files
    }

    fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Param::Value(v) => Some((k.as_str(), v)),
            Param::File(_) => None,
        })
    }

    fn files(&self) -> impl Iterator<Item = (&str, &UploadFile)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Param::File(f) => Some((k.as_str(), f)),
            Param::Value(_) => None,
        })
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().map(|(k, v)| (k, Param::Value(v))).collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Param)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, Param)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// The wire form of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBody {
    /// `application/json`
    Json(String),
    /// `application/x-www-form-urlencoded`
    UrlEncoded(String),
    /// `multipart/form-data; boundary=...`
    Multipart {
        /// Boundary token separating parts.
        boundary: String,
        /// Encoded parts.
        payload: Bytes,
    },
}

impl EncodedBody {
    /// The `Content-Type` header value matching this body.
    pub fn content_type(&self) -> String {
        match self {
            EncodedBody::Json(_) => CONTENT_TYPE_JSON.to_string(),
            EncodedBody::UrlEncoded(_) => CONTENT_TYPE_FORM.to_string(),
            EncodedBody::Multipart { boundary, .. } => {
                format!("{CONTENT_TYPE_MULTIPART}; boundary={boundary}")
            }
        }
    }

    /// Multipart boundary, if any.
    pub fn boundary(&self) -> Option<&str> {
        match self {
            EncodedBody::Multipart { boundary, .. } => Some(boundary),
            _ => None,
        }
    }

    /// Take the body bytes.
    pub fn into_bytes(self) -> Bytes {
        match self {
            EncodedBody::Json(s) | EncodedBody::UrlEncoded(s) => Bytes::from(s),
            EncodedBody::Multipart { payload, .. } => payload,
        }
    }
}

/// BodyEncoder picks exactly one wire encoding for a request's params.
///
/// Selection order:
///
/// 1. any file present: `multipart/form-data`
/// 2. JSON mode (the default): `application/json`
/// 3. otherwise: `application/x-www-form-urlencoded`
#[derive(Debug, Clone, Copy)]
pub struct BodyEncoder {
    use_json: bool,
}

impl Default for BodyEncoder {
    fn default() -> Self {
        Self { use_json: true }
    }
}

impl BodyEncoder {
    /// Create an encoder. `use_json` selects JSON over form encoding for
    /// bodies without files.
    pub fn new(use_json: bool) -> Self {
        Self { use_json }
    }

    /// Encode `params` and `files` into a single body.
    ///
    /// File params still inside `params` count as files.
    pub fn encode(
        &self,
        params: Option<&Params>,
        files: &[(String, UploadFile)],
    ) -> Result<EncodedBody> {
        let mut all_files: Vec<(&str, &UploadFile)> =
            files.iter().map(|(k, f)| (k.as_str(), f)).collect();
        if let Some(params) = params {
            all_files.extend(params.files());
        }

        if !all_files.is_empty() {
            let fields = params.map(flatten_params).unwrap_or_default();
            let body = encode_multipart(&fields, &all_files, random_boundary);
            debug!(
                "encoded multipart body with {} fields and {} files",
                fields.len(),
                all_files.len()
            );
            return Ok(body);
        }

        if self.use_json {
            let value = match params {
                None => Value::Null,
                Some(params) => Value::Object(
                    params
                        .values()
                        .map(|(k, v)| (k.to_string(), v.clone()))
                        .collect(),
                ),
            };
            let s = serde_json::to_string(&value).map_err(|e| {
                Error::request_invalid("failed to serialize params as json").with_source(e)
            })?;
            return Ok(EncodedBody::Json(s));
        }

        let fields = params.map(flatten_params).unwrap_or_default();
        let s = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        Ok(EncodedBody::UrlEncoded(s))
    }
}

/// Flatten params into form fields.
///
/// Nested values use bracket keys: `tags[0]`, `signer[email]`.
fn flatten_params(params: &Params) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (k, v) in params.values() {
        flatten_value(k.to_string(), v, &mut out);
    }
    out
}

fn flatten_value(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => out.push((key, String::new())),
        Value::Bool(b) => out.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s.clone())),
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                flatten_value(format!("{key}[{idx}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (k, item) in map {
                flatten_value(format!("{key}[{k}]"), item, out);
            }
        }
    }
}

fn random_boundary() -> String {
    format!(
        "----TrustedSignBoundary{}",
        hex::encode(rand::random::<[u8; 16]>())
    )
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

/// Quote a name or filename for a `Content-Disposition` header.
fn escape_quoted(s: &str) -> String {
    s.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn encode_multipart(
    fields: &[(String, String)],
    files: &[(&str, &UploadFile)],
    mut next_boundary: impl FnMut() -> String,
) -> EncodedBody {
    let boundary = loop {
        let candidate = next_boundary();
        let collides = fields.iter().any(|(k, v)| {
            contains(k.as_bytes(), candidate.as_bytes())
                || contains(v.as_bytes(), candidate.as_bytes())
        }) || files.iter().any(|(k, f)| {
            contains(k.as_bytes(), candidate.as_bytes())
                || contains(f.filename().as_bytes(), candidate.as_bytes())
                || contains(f.content(), candidate.as_bytes())
        });
        if !collides {
            break candidate;
        }
        debug!("multipart boundary collides with content, regenerating");
    };

    let mut buf = BytesMut::new();
    for (name, value) in fields {
        buf.put_slice(format!("--{boundary}\r\n").as_bytes());
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quoted(name)
            )
            .as_bytes(),
        );
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }
    for (name, file) in files {
        buf.put_slice(format!("--{boundary}\r\n").as_bytes());
        buf.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(name),
                escape_quoted(file.filename())
            )
            .as_bytes(),
        );
        buf.put_slice(format!("Content-Type: {}\r\n\r\n", file.content_type()).as_bytes());
        buf.put_slice(file.content());
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(format!("--{boundary}--\r\n").as_bytes());

    EncodedBody::Multipart {
        boundary,
        payload: buf.freeze(),
    }
}
