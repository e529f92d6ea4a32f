//! Generated API documentation.
//!
//! `GET /api/docs/openapi.json` serves an OpenAPI 3 document for the relay;
//! `GET /api/docs` renders the same document as a plain HTML page.

use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use crate::config::FeatureFlags;

/// Creates the docs router. Stateless, so it merges into any router.
pub fn docs_router(features: &FeatureFlags) -> Router {
    let document = openapi_document(features);
    let page = render_page(&document);

    Router::new()
        .route(
            "/api/docs",
            get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        .route(
            "/api/docs/openapi.json",
            get(move || {
                let document = document.clone();
                async move { Json(document).into_response() }
            }),
        )
}

/// OpenAPI document for the mounted relay endpoints.
pub fn openapi_document(features: &FeatureFlags) -> Value {
    let error = json!({
        "description": "Relay error",
        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ProxyError"}}}
    });

    let mut paths = Map::new();
    paths.insert(
        "/health".to_string(),
        json!({
            "get": {
                "summary": "Relay liveness",
                "responses": {"200": {"description": "Relay is running"}}
            }
        }),
    );
    paths.insert(
        "/api/status".to_string(),
        json!({
            "get": {
                "summary": "Dialogue engine status passthrough",
                "responses": {
                    "200": {"description": "Engine status payload"},
                    "503": error.clone()
                }
            }
        }),
    );
    paths.insert(
        "/api/chat".to_string(),
        json!({
            "post": {
                "summary": "Relay a chat message",
                "requestBody": {
                    "required": true,
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/ChatRequest"}}}
                },
                "responses": {
                    "200": {
                        "description": "Reply fragments in engine order",
                        "content": {"application/json": {"schema": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/ReplyFragment"}
                        }}}
                    },
                    "400": error.clone(),
                    "500": error.clone(),
                    "503": error.clone(),
                    "504": error.clone()
                }
            }
        }),
    );
    if features.enable_tracker {
        paths.insert(
            "/api/conversations/{sender}/tracker".to_string(),
            json!({
                "get": {
                    "summary": "Conversation tracker passthrough",
                    "parameters": [{
                        "name": "sender",
                        "in": "path",
                        "required": true,
                        "schema": {"type": "string"}
                    }],
                    "responses": {
                        "200": {"description": "Tracker payload"},
                        "500": error
                    }
                }
            }),
        );
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Chat Relay API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": paths,
        "components": {
            "schemas": {
                "ChatRequest": {
                    "type": "object",
                    "required": ["sender", "message"],
                    "properties": {
                        "sender": {"type": "string"},
                        "message": {"type": "string"}
                    }
                },
                "ReplyFragment": {
                    "type": "object",
                    "properties": {
                        "text": {"type": "string"},
                        "image": {"type": "string"},
                        "buttons": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "title": {"type": "string"},
                                    "payload": {"type": "string"}
                                }
                            }
                        },
                        "custom": {"type": "object"}
                    }
                },
                "ProxyError": {
                    "type": "object",
                    "required": ["kind", "error"],
                    "properties": {
                        "kind": {
                            "type": "string",
                            "enum": [
                                "invalid_request",
                                "upstream_unavailable",
                                "upstream_timeout",
                                "upstream_error",
                                "relay_failure"
                            ]
                        },
                        "error": {"type": "string"},
                        "details": {}
                    }
                }
            }
        }
    })
}

fn render_page(document: &Value) -> String {
    let mut rows = String::new();
    if let Some(paths) = document["paths"].as_object() {
        for (path, operations) in paths {
            let Some(operations) = operations.as_object() else {
                continue;
            };
            for (method, operation) in operations {
                rows.push_str(&format!(
                    "<tr><td><code>{}</code></td><td><code>{}</code></td><td>{}</td></tr>\n",
                    method.to_uppercase(),
                    escape(path),
                    escape(operation["summary"].as_str().unwrap_or_default()),
                ));
            }
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
<p>Version {version}. Machine-readable document: <a href="/api/docs/openapi.json">openapi.json</a></p>
<table>
<thead><tr><th>Method</th><th>Path</th><th>Summary</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</body>
</html>
"#,
        title = escape(document["info"]["title"].as_str().unwrap_or_default()),
        version = escape(document["info"]["version"].as_str().unwrap_or_default()),
        rows = rows,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
