//! OpenAPI 3.1 document assembly from a route table.
//!
//! The builder is an explicit value owned by the caller: routes are added one
//! by one and [`OpenApiBuilder::build`] consumes the builder into the final
//! document. Nothing here touches process-global state, so two documents can
//! be assembled independently in the same process.

use crate::route::{HttpMethod, Route};
use crate::schema::{example_for, SchemaKind, SchemaNode, FILES_MARKER};
use crate::translator::type_expression;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A single security requirement (scheme name to scopes)
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Paths collection (URL path -> PathItem), in insertion order
    paths: IndexMap<String, PathItem>,
    /// Components section (security schemes)
    components: Components,
    /// Document-level security requirements
    security: Vec<SecurityRequirement>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// OpenAPI PathItem object - represents all operations for a single path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// PUT operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// DELETE operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// PATCH operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// OPTIONS operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
}

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Operation description (structural rendering of the response type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documentation tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Parameters (path, query)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    /// Request body
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses by status code
    pub responses: IndexMap<String, Response>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter location (path, query)
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required
    pub required: bool,
    /// Parameter schema, carried through from the route table
    pub schema: Value,
    /// Example value for the parameter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Structural rendering of the body type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the request body is required
    pub required: bool,
    /// Content types and their schemas
    pub content: IndexMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type
    pub schema: Value,
}

/// OpenAPI Response object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Response description
    pub description: String,
    /// Response content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// OpenAPI SecurityScheme object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Scheme type (e.g., "apiKey")
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Where the credential is carried (header, cookie)
    #[serde(rename = "in")]
    pub location: String,
    /// Name of the header or cookie
    pub name: String,
    /// HTTP auth scheme, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

/// OpenAPI Components object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Components {
    /// Security scheme definitions
    #[serde(rename = "securitySchemes", skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<IndexMap<String, SecurityScheme>>,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// API paths
    pub paths: IndexMap<String, PathItem>,
    /// Components (security schemes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    /// Document-level security requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder with default info and security schemes
    pub fn new() -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            info: Info {
                title: "Generated API".to_string(),
                version: "1.0.0".to_string(),
                description: Some(
                    "API documentation generated from the registered route table".to_string(),
                ),
            },
            paths: IndexMap::new(),
            components: Components {
                security_schemes: Some(Self::default_security_schemes()),
            },
            security: vec![Self::bearer_requirement()],
        }
    }

    /// Set custom info for the API
    pub fn with_info(mut self, title: String, version: String, description: Option<String>) -> Self {
        self.info = Info {
            title,
            version,
            description,
        };
        self
    }

    fn default_security_schemes() -> IndexMap<String, SecurityScheme> {
        let mut schemes = IndexMap::new();
        schemes.insert(
            "Cookie".to_string(),
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                location: "cookie".to_string(),
                name: "accessToken".to_string(),
                scheme: None,
            },
        );
        schemes.insert(
            "Bearer".to_string(),
            SecurityScheme {
                scheme_type: "apiKey".to_string(),
                location: "header".to_string(),
                name: "Authorization".to_string(),
                scheme: Some("bearer".to_string()),
            },
        );
        schemes
    }

    fn bearer_requirement() -> SecurityRequirement {
        let mut requirement = IndexMap::new();
        requirement.insert("Bearer".to_string(), Vec::new());
        requirement
    }

    /// Add a route to the OpenAPI document
    pub fn add_route(&mut self, route: &Route) {
        debug!("Adding route: {} {}", route.method.as_str(), route.path);

        // Convert path parameters from :param to {param} format
        let openapi_path = Self::convert_path_format(&route.path);

        let mut parameters = Vec::new();
        if let Some(query) = &route.query {
            parameters.extend(Self::query_parameters(query));
        }
        parameters.extend(Self::path_parameters(&openapi_path));

        let request_body = route.body.as_ref().and_then(Self::request_body);

        // Surface the structural type of the response for human readers
        let description = route
            .response
            .as_ref()
            .map(|response| format!("Response type: {}", type_expression(&SchemaNode::from_value(response))));

        let mut responses = IndexMap::new();
        responses.insert(
            "200".to_string(),
            Self::response_for(route.response.as_ref()),
        );

        let operation = Operation {
            summary: Some(format!("{} {}", route.method.as_str(), route.path)),
            description,
            tags: route.tags.clone(),
            parameters: if parameters.is_empty() {
                None
            } else {
                Some(parameters)
            },
            request_body,
            responses,
        };

        // Add operation to the appropriate path and method
        let path_item = self
            .paths
            .entry(openapi_path)
            .or_insert_with(PathItem::default);

        match route.method {
            HttpMethod::Get => path_item.get = Some(operation),
            HttpMethod::Post => path_item.post = Some(operation),
            HttpMethod::Put => path_item.put = Some(operation),
            HttpMethod::Delete => path_item.delete = Some(operation),
            HttpMethod::Patch => path_item.patch = Some(operation),
            HttpMethod::Options => path_item.options = Some(operation),
            HttpMethod::Head => path_item.head = Some(operation),
        }
    }

    /// Convert path format from :param to OpenAPI {param} format.
    ///
    /// A parameter name is the run of word characters after the colon, so
    /// `/export/:id.json` becomes `/export/{id}.json`. A colon not followed
    /// by a word character is kept literally.
    fn convert_path_format(path: &str) -> String {
        let mut converted = String::with_capacity(path.len());
        let mut chars = path.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ':' && chars.peek().is_some_and(|n| Self::is_word_char(*n)) {
                converted.push('{');
                while let Some(&n) = chars.peek() {
                    if !Self::is_word_char(n) {
                        break;
                    }
                    converted.push(n);
                    chars.next();
                }
                converted.push('}');
            } else {
                converted.push(c);
            }
        }

        converted
    }

    fn is_word_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Build query parameters from an object-typed query schema.
    ///
    /// Anything that is not an object schema with a property table yields no
    /// parameters; the route simply documents none.
    fn query_parameters(query: &Value) -> Vec<Parameter> {
        let node = SchemaNode::from_value(query);
        let properties = match node.kind {
            SchemaKind::Object {
                properties: Some(properties),
            } => properties,
            _ => return Vec::new(),
        };
        let raw_properties = query.get("properties").and_then(Value::as_object);

        properties
            .iter()
            .map(|(name, child)| {
                let raw = raw_properties.and_then(|map| map.get(name.as_str()));
                let mut schema = Map::new();
                if let Some(type_tag) = raw.and_then(|v| v.get("type")) {
                    schema.insert("type".to_string(), type_tag.clone());
                }
                Parameter {
                    name: name.clone(),
                    location: "query".to_string(),
                    required: !child.optional,
                    schema: Value::Object(schema),
                    example: raw.and_then(example_for),
                }
            })
            .collect()
    }

    /// Build one required path parameter per `{param}` group.
    ///
    /// Groups may sit mid-segment (`/export/{id}.json` yields `id`); a brace
    /// group holding anything other than word characters is not a parameter.
    fn path_parameters(openapi_path: &str) -> Vec<Parameter> {
        let mut parameters = Vec::new();
        let bytes = openapi_path.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'{' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && Self::is_word_char(bytes[end] as char) {
                    end += 1;
                }
                if end > start && end < bytes.len() && bytes[end] == b'}' {
                    parameters.push(Parameter {
                        name: openapi_path[start..end].to_string(),
                        location: "path".to_string(),
                        required: true,
                        schema: json!({ "type": "string" }),
                        example: None,
                    });
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }

        parameters
    }

    /// Build the request body for a route.
    ///
    /// Object bodies are embedded as inline schemas; a property holding a
    /// binary string (or an array of binary strings, or one carrying the
    /// multi-file upload marker) switches the content type to
    /// `multipart/form-data` and normalizes the property schema. String
    /// bodies become `text/plain`, array bodies `application/json`. Other
    /// body types document no request body.
    fn request_body(body: &Value) -> Option<RequestBody> {
        let node = SchemaNode::from_value(body);
        let description = Some(type_expression(&node));

        match &node.kind {
            SchemaKind::Object { .. } => {
                let mut content_type = "application/json";
                let mut properties = body
                    .get("properties")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();

                let names: Vec<String> = properties.keys().cloned().collect();
                for name in names {
                    let property = &properties[&name];
                    let property_node = SchemaNode::from_value(property);
                    let is_files = property_node.is_binary_array()
                        || matches!(property.get(FILES_MARKER), Some(Value::Bool(true)));

                    if property_node.is_binary() {
                        properties.insert(name, json!({ "type": "string", "format": "binary" }));
                        content_type = "multipart/form-data";
                    } else if is_files {
                        properties.insert(
                            name,
                            json!({
                                "type": "array",
                                "items": { "type": "string", "format": "binary" }
                            }),
                        );
                        content_type = "multipart/form-data";
                    }
                }

                let schema = json!({ "type": "object", "properties": properties });
                Some(RequestBody {
                    description,
                    required: true,
                    content: Self::content(content_type, schema),
                })
            }
            SchemaKind::String { .. } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("string"));
                if let Some(examples) = body.get("examples") {
                    schema.insert("examples".to_string(), examples.clone());
                }
                Some(RequestBody {
                    description,
                    required: true,
                    content: Self::content("text/plain", Value::Object(schema)),
                })
            }
            SchemaKind::Array { .. } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("array"));
                if let Some(items) = body.get("items") {
                    schema.insert("items".to_string(), items.clone());
                }
                Some(RequestBody {
                    description,
                    required: true,
                    content: Self::content("application/json", Value::Object(schema)),
                })
            }
            _ => None,
        }
    }

    /// Build the 200 response for a route
    fn response_for(response: Option<&Value>) -> Response {
        let response = match response {
            Some(response) => response,
            None => {
                return Response {
                    description: "Successful response".to_string(),
                    content: None,
                }
            }
        };

        let node = SchemaNode::from_value(response);
        match &node.kind {
            SchemaKind::Object { .. } => {
                let schema = json!({
                    "type": "object",
                    "properties": response.get("properties").cloned().unwrap_or_else(|| json!({}))
                });
                Response {
                    description: "Returns a JSON object".to_string(),
                    content: Some(Self::content("application/json", schema)),
                }
            }
            SchemaKind::String { .. } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("string"));
                // `examples` may be a list or a single scalar; take the first
                let example = match response.get("examples") {
                    Some(Value::Array(list)) => list.first().cloned(),
                    Some(other) => Some(other.clone()),
                    None => None,
                };
                if let Some(example) = example {
                    schema.insert("example".to_string(), example);
                }
                Response {
                    description: "Returns a string".to_string(),
                    content: Some(Self::content("text/plain", Value::Object(schema))),
                }
            }
            SchemaKind::Array { .. } => {
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("array"));
                if let Some(items) = response.get("items") {
                    schema.insert("items".to_string(), items.clone());
                }
                Response {
                    description: "Returns a JSON array".to_string(),
                    content: Some(Self::content("application/json", Value::Object(schema))),
                }
            }
            _ => Response {
                description: "Successful response".to_string(),
                content: None,
            },
        }
    }

    fn content(content_type: &str, schema: Value) -> IndexMap<String, MediaType> {
        let mut content = IndexMap::new();
        content.insert(content_type.to_string(), MediaType { schema });
        content
    }

    /// Build the final OpenAPI document
    pub fn build(self) -> OpenApiDocument {
        debug!("Building final OpenAPI document");

        OpenApiDocument {
            openapi: "3.1.0".to_string(),
            info: self.info,
            paths: self.paths,
            components: Some(self.components),
            security: Some(self.security),
        }
    }
}

impl Default for OpenApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}
