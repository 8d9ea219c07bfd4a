//! OpenAPI from Routes - OpenAPI 3.1 documentation from a registered route table.
//!
//! This library derives an OpenAPI 3.1 document from the serialized route table of a
//! web framework: one entry per registered route, carrying the JSON-Schema-shaped
//! body/query/response metadata the framework collected at registration time. No
//! assumption is made about which schema-definition library produced those schemas,
//! only that they follow the JSON Schema shape.
//!
//! # Architecture
//!
//! The library is organized into several modules that work together:
//!
//! 1. [`route`] - Deserializes the route table input
//! 2. [`schema`] - Normalizes raw JSON-Schema-shaped values into a canonical node tree,
//!    resolving field optionality (required-list membership or the `x-optional` marker)
//!    into a single flag at construction time
//! 3. [`translator`] - Renders a schema node as a human-readable structural type
//!    expression (e.g. `{\n  id: number;\n  name?: string;\n}`)
//! 4. [`openapi_builder`] - Assembles the complete OpenAPI document from routes
//! 5. [`serializer`] - Serializes the document to YAML or JSON
//!
//! # Example Usage
//!
//! ```
//! use openapi_from_routes::{
//!     openapi_builder::OpenApiBuilder,
//!     route::RouteTable,
//!     serializer::serialize_yaml,
//! };
//! use serde_json::json;
//!
//! let table: RouteTable = serde_json::from_value(json!({
//!     "routes": [
//!         {
//!             "method": "GET",
//!             "path": "/users/:id",
//!             "response": {
//!                 "type": "object",
//!                 "properties": { "id": { "type": "number" } },
//!                 "required": ["id"]
//!             }
//!         }
//!     ]
//! }))
//! .unwrap();
//!
//! let mut builder = OpenApiBuilder::new();
//! for route in &table.routes {
//!     builder.add_route(route);
//! }
//! let document = builder.build();
//!
//! let yaml = serialize_yaml(&document).unwrap();
//! assert!(yaml.contains("/users/{id}"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete CLI application.

pub mod cli;
pub mod error;
pub mod openapi_builder;
pub mod route;
pub mod schema;
pub mod serializer;
pub mod translator;
