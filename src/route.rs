//! Route table input model.
//!
//! A route table is the serialized form of a web framework's already
//! registered routes: one entry per path/method pair, carrying the
//! JSON-Schema-shaped body/query/response metadata the framework collected at
//! registration time. The schemas stay as raw [`serde_json::Value`]s here;
//! the [`schema`](crate::schema) module normalizes them when something needs
//! to reason about their structure.

use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A complete registered route table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTable {
    /// All registered routes, in registration order
    pub routes: Vec<Route>,
}

/// A single registered route with its schema metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// The HTTP method for this route
    pub method: HttpMethod,
    /// The URL path pattern (e.g., "/users/:id")
    pub path: String,
    /// Request body schema, if the route declared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Query string schema, if the route declared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    /// Response schema, if the route declared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Documentation tags attached at registration time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// HTTP methods recognized in route tables.
///
/// Frameworks differ on casing, so both `"GET"` and `"get"` deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[serde(alias = "get")]
    Get,
    #[serde(alias = "post")]
    Post,
    #[serde(alias = "put")]
    Put,
    #[serde(alias = "delete")]
    Delete,
    #[serde(alias = "patch")]
    Patch,
    #[serde(alias = "options")]
    Options,
    #[serde(alias = "head")]
    Head,
}

impl HttpMethod {
    /// Get the HTTP method as an uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl Route {
    /// Create a new Route with no schema metadata
    pub fn new(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path,
            body: None,
            query: None,
            response: None,
            tags: None,
        }
    }
}

impl RouteTable {
    /// Load a route table from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading route table from {}", path.display());
        let content = fs::read_to_string(path)?;
        let table: RouteTable =
            serde_json::from_str(&content).map_err(|e| Error::RouteTableError {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!("Loaded {} routes", table.routes.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_deserialize_route_table() {
        let table: RouteTable = serde_json::from_value(json!({
            "routes": [
                {
                    "method": "GET",
                    "path": "/users",
                    "response": { "type": "object", "properties": {} }
                },
                {
                    "method": "POST",
                    "path": "/users",
                    "body": { "type": "object" },
                    "tags": ["Users"]
                }
            ]
        }))
        .unwrap();

        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.routes[0].method, HttpMethod::Get);
        assert_eq!(table.routes[0].path, "/users");
        assert!(table.routes[0].response.is_some());
        assert!(table.routes[0].body.is_none());
        assert_eq!(table.routes[1].tags, Some(vec!["Users".to_string()]));
    }

    #[test]
    fn test_lowercase_method_names() {
        let table: RouteTable = serde_json::from_value(json!({
            "routes": [
                { "method": "get", "path": "/" },
                { "method": "delete", "path": "/item" }
            ]
        }))
        .unwrap();

        assert_eq!(table.routes[0].method, HttpMethod::Get);
        assert_eq!(table.routes[1].method, HttpMethod::Delete);
    }

    #[test]
    fn test_method_as_str() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.json");
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(br#"{ "routes": [{ "method": "GET", "path": "/health" }] }"#)
            .unwrap();

        let table = RouteTable::from_file(&file_path).unwrap();
        assert_eq!(table.routes.len(), 1);
        assert_eq!(table.routes[0].path, "/health");
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = RouteTable::from_file(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.json");
        fs::write(&file_path, "not json").unwrap();

        let result = RouteTable::from_file(&file_path);
        assert!(matches!(result, Err(Error::RouteTableError { .. })));
    }
}
