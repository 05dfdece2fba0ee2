//! Stock transforms and their declarative (TOML) form.

use std::io::{Cursor, Read};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::registry::Priority;
use crate::transform::{ByteStream, Transform};
use crate::url_model::{replace_path_prefix, request_path};

/// Appends `separator` + `param` to every URL, verbatim.
#[derive(Debug, Clone)]
pub struct QueryAppend {
    pub param: String,
    pub separator: String,
}

impl QueryAppend {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            separator: "?".to_string(),
        }
    }
}

impl Transform for QueryAppend {
    fn rewrite_url(&self, url: &str) -> String {
        format!("{url}{}{}", self.separator, self.param)
    }

    fn name(&self) -> &str {
        "query_append"
    }
}

/// Moves requests under one path prefix to another (e.g. `/app/` -> `/`).
#[derive(Debug, Clone)]
pub struct PathPrefix {
    pub from: String,
    pub to: String,
}

impl Transform for PathPrefix {
    fn rewrite_url(&self, url: &str) -> String {
        replace_path_prefix(url, &self.from, &self.to).unwrap_or_else(|| url.to_string())
    }

    fn name(&self) -> &str {
        "path_prefix"
    }
}

/// Surrounds the response body with fixed bytes.
///
/// With `match_suffix` set, only responses whose URL path ends with it are
/// wrapped.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
    pub match_suffix: Option<String>,
}

impl Envelope {
    fn applies_to(&self, url: &str) -> bool {
        match &self.match_suffix {
            None => true,
            Some(suffix) => request_path(url).is_some_and(|path| path.ends_with(suffix.as_str())),
        }
    }
}

impl Transform for Envelope {
    fn wrap_stream(&self, url: &str, stream: ByteStream) -> ByteStream {
        if !self.applies_to(url) {
            return stream;
        }
        Box::new(
            Cursor::new(self.prefix.clone())
                .chain(stream)
                .chain(Cursor::new(self.suffix.clone())),
        )
    }

    fn name(&self) -> &str {
        "envelope"
    }
}

/// A stock transform as written in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSpec {
    QueryAppend {
        param: String,
        #[serde(default = "default_separator")]
        separator: String,
    },
    PathPrefix {
        from: String,
        to: String,
    },
    Envelope {
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        suffix: String,
        #[serde(default)]
        match_suffix: Option<String>,
    },
}

fn default_separator() -> String {
    "?".to_string()
}

impl TransformSpec {
    pub fn build(&self) -> Arc<dyn Transform> {
        match self {
            TransformSpec::QueryAppend { param, separator } => Arc::new(QueryAppend {
                param: param.clone(),
                separator: separator.clone(),
            }),
            TransformSpec::PathPrefix { from, to } => Arc::new(PathPrefix {
                from: from.clone(),
                to: to.clone(),
            }),
            TransformSpec::Envelope {
                prefix,
                suffix,
                match_suffix,
            } => Arc::new(Envelope {
                prefix: prefix.clone().into_bytes(),
                suffix: suffix.clone().into_bytes(),
                match_suffix: match_suffix.clone(),
            }),
        }
    }

    /// Short human-readable description for listings.
    pub fn describe(&self) -> String {
        match self {
            TransformSpec::QueryAppend { param, separator } => {
                format!("query_append {separator}{param}")
            }
            TransformSpec::PathPrefix { from, to } => format!("path_prefix {from} -> {to}"),
            TransformSpec::Envelope { match_suffix, .. } => match match_suffix {
                Some(suffix) => format!("envelope (*{suffix})"),
                None => "envelope".to_string(),
            },
        }
    }
}

/// A `[[transforms]]` entry: a stock transform and the slot it claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformEntry {
    pub priority: Priority,
    #[serde(flatten)]
    pub spec: TransformSpec,
}
