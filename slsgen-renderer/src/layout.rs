//! Function layouts — the runtime-conditional half of the descriptor.
//!
//! The legacy runtime gets a python-requirements build plugin and plain HTTP
//! handlers; every other runtime gets the websocket/stream wiring instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use slsgen_core::{Runtime, DEFAULT_RUNTIME};

use crate::descriptor::{CfnRef, EVENTS_TABLE_RESOURCE};

pub const LEGACY_PLUGIN: &str = "serverless-python-requirements";

const GRAPHQL_HANDLER: &str = "graphqlServer.handler";
const GRAPHQL_LEGACY_HANDLER: &str = "graphqlServer.graphqlHandler";
const PLAYGROUND_HANDLER: &str = "playgroundServer.playgroundHandler";

// ---------------------------------------------------------------------------
// Function definitions and events
// ---------------------------------------------------------------------------

/// One function entry under `functions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// `<file>.<export>` — resolved by the serverless packager.
    pub handler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    pub events: Vec<FunctionEvent>,
}

/// One event binding on a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionEvent {
    Http(HttpEvent),
    Websocket(WebsocketEvent),
    Stream(StreamEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpEvent {
    pub path: String,
    pub method: String,
    pub cors: bool,
}

impl HttpEvent {
    fn graphql(method: &str) -> FunctionEvent {
        FunctionEvent::Http(HttpEvent {
            path: "graphql".to_owned(),
            method: method.to_owned(),
            cors: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsocketEvent {
    pub route: String,
}

impl WebsocketEvent {
    fn route(route: &str) -> FunctionEvent {
        FunctionEvent::Websocket(WebsocketEvent {
            route: route.to_owned(),
        })
    }
}

/// Change-stream trigger — invokes the function on new change-log records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub arn: CfnRef,
}

impl StreamEvent {
    fn events_table() -> FunctionEvent {
        FunctionEvent::Stream(StreamEvent {
            kind: "dynamodb".to_owned(),
            arn: CfnRef::get_att(EVENTS_TABLE_RESOURCE, "StreamArn"),
        })
    }
}

// ---------------------------------------------------------------------------
// Custom section (legacy layout only)
// ---------------------------------------------------------------------------

/// `custom` block carrying the python-requirements plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    pub python_requirements: PythonRequirements,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonRequirements {
    pub dockerize_pip: String,
}

impl CustomSection {
    fn python_requirements() -> Self {
        CustomSection {
            python_requirements: PythonRequirements {
                dockerize_pip: "non-linux".to_owned(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FunctionLayout
// ---------------------------------------------------------------------------

/// Which function-deployment layout the descriptor carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionLayout {
    /// Legacy runtime: HTTP handlers only, python-requirements build plugin.
    Legacy,
    /// Default path: HTTP handlers plus websocket routes and the
    /// change-stream trigger on the events table.
    Standard,
}

impl FunctionLayout {
    pub fn for_runtime(runtime: &Runtime) -> Self {
        if runtime.is_legacy() {
            FunctionLayout::Legacy
        } else {
            FunctionLayout::Standard
        }
    }

    /// Function map for this layout, in emission order.
    pub fn functions(&self) -> IndexMap<String, FunctionDef> {
        let mut functions = IndexMap::new();
        match self {
            FunctionLayout::Legacy => {
                functions.insert(
                    "graphql".to_owned(),
                    FunctionDef {
                        handler: GRAPHQL_LEGACY_HANDLER.to_owned(),
                        runtime: None,
                        events: vec![HttpEvent::graphql("post")],
                    },
                );
                functions.insert("playground".to_owned(), playground());
            }
            FunctionLayout::Standard => {
                functions.insert(
                    "graphqlHttp".to_owned(),
                    FunctionDef {
                        handler: GRAPHQL_HANDLER.to_owned(),
                        runtime: Some(DEFAULT_RUNTIME.to_owned()),
                        events: vec![HttpEvent::graphql("post")],
                    },
                );
                functions.insert("playground".to_owned(), playground());
                functions.insert(
                    "graphqlSocket".to_owned(),
                    FunctionDef {
                        handler: GRAPHQL_HANDLER.to_owned(),
                        runtime: None,
                        events: vec![
                            WebsocketEvent::route("$connect"),
                            WebsocketEvent::route("$disconnect"),
                            WebsocketEvent::route("$default"),
                            StreamEvent::events_table(),
                        ],
                    },
                );
            }
        }
        functions
    }

    /// Build plugins, legacy layout only.
    pub fn plugins(&self) -> Option<Vec<String>> {
        match self {
            FunctionLayout::Legacy => Some(vec![LEGACY_PLUGIN.to_owned()]),
            FunctionLayout::Standard => None,
        }
    }

    /// `custom` block, legacy layout only.
    pub fn custom(&self) -> Option<CustomSection> {
        match self {
            FunctionLayout::Legacy => Some(CustomSection::python_requirements()),
            FunctionLayout::Standard => None,
        }
    }
}

/// The playground function is identical in both layouts; it always runs on
/// the node runtime regardless of the provider runtime.
fn playground() -> FunctionDef {
    FunctionDef {
        handler: PLAYGROUND_HANDLER.to_owned(),
        runtime: Some(DEFAULT_RUNTIME.to_owned()),
        events: vec![HttpEvent::graphql("get")],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
