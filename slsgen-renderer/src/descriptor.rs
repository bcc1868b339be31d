//! Typed serverless descriptor — the document emitted by the generator.
//!
//! Field order in these structs is the emission order. All CloudFormation
//! attribute references use the `Fn::GetAtt` intrinsic map form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use slsgen_core::GeneratorConfig;

use crate::layout::{CustomSection, FunctionDef, FunctionLayout};

// ---------------------------------------------------------------------------
// Logical resource ids and table-name suffixes
// ---------------------------------------------------------------------------

pub const CONNECTIONS_TABLE_RESOURCE: &str = "ConnectionsDynamoDBTable";
pub const EVENTS_TABLE_RESOURCE: &str = "EventsDynamoDBTable";
pub const SUBSCRIPTIONS_TABLE_RESOURCE: &str = "SubscriptionsDynamoDBTable";
pub const SUBSCRIPTION_OPERATIONS_TABLE_RESOURCE: &str = "SubscriptionOperationsDynamoDBTable";

pub const CONNECTIONS_TABLE_SUFFIX: &str = "Connections";
pub const EVENTS_TABLE_SUFFIX: &str = "Events";
pub const SUBSCRIPTIONS_TABLE_SUFFIX: &str = "Subscriptions";
pub const SUBSCRIPTION_OPERATIONS_TABLE_SUFFIX: &str = "SubscriptionOperations";

/// `${self:provider.environment.<KEY>}` — serverless variable referencing
/// an environment entry declared in the same document.
fn self_env_ref(key: &str) -> String {
    format!("${{self:provider.environment.{key}}}")
}

// ---------------------------------------------------------------------------
// CloudFormation values
// ---------------------------------------------------------------------------

/// A value that is either a literal ARN string or a `Fn::GetAtt` intrinsic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CfnRef {
    /// Literal ARN.
    Arn(String),
    /// `Fn::GetAtt: [<logical id>, <attribute>]`.
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        get_att: (String, String),
    },
}

impl CfnRef {
    pub fn arn(arn: &str) -> Self {
        CfnRef::Arn(arn.to_owned())
    }

    pub fn get_att(logical_id: &str, attribute: &str) -> Self {
        CfnRef::GetAtt {
            get_att: (logical_id.to_owned(), attribute.to_owned()),
        }
    }
}

// ---------------------------------------------------------------------------
// Document root
// ---------------------------------------------------------------------------

/// Root of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerlessDescriptor {
    pub service: String,
    pub provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomSection>,
    pub functions: IndexMap<String, FunctionDef>,
    pub resources: ResourcesSection,
}

/// `provider` block — cloud provider, stage, runtime, environment, IAM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub stage: String,
    pub runtime: String,
    pub environment: ProviderEnvironment,
    #[serde(rename = "iamRoleStatements")]
    pub iam_role_statements: Vec<IamStatement>,
}

/// Environment variables injected into every deployed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ProviderEnvironment {
    pub db_host: String,
    pub db_port: String,
    pub db_name: String,
    pub db_username: String,
    pub db_password: String,
    pub connections_table: String,
    pub events_table: String,
    pub subscriptions_table: String,
    pub subscription_operations_table: String,
}

/// One IAM role statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IamStatement {
    pub effect: String,
    pub action: Vec<String>,
    pub resource: CfnRef,
}

impl IamStatement {
    fn allow(actions: &[&str], resource: CfnRef) -> Self {
        IamStatement {
            effect: "Allow".to_owned(),
            action: actions.iter().map(|a| (*a).to_owned()).collect(),
            resource,
        }
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// `resources` block — CloudFormation resource declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcesSection {
    #[serde(rename = "Resources")]
    pub resources: IndexMap<String, TableResource>,
}

/// One `AWS::DynamoDB::Table` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableResource {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Properties")]
    pub properties: TableProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableProperties {
    pub table_name: String,
    pub attribute_definitions: Vec<AttributeDefinition>,
    pub billing_mode: BillingMode,
    pub key_schema: Vec<KeySchemaElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_specification: Option<StreamSpecification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    pub attribute_name: String,
    pub attribute_type: AttributeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "S")]
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    pub attribute_name: String,
    pub key_type: KeyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingMode {
    PayPerRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpecification {
    pub stream_view_type: StreamViewType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    NewImage,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

impl ProviderEnvironment {
    fn from_config(config: &GeneratorConfig) -> Self {
        let app = &config.app_id;
        ProviderEnvironment {
            db_host: config.database.host.clone(),
            db_port: config.database.port.clone(),
            db_name: config.database.name.clone(),
            db_username: config.database.username.clone(),
            db_password: config.database.password.clone(),
            connections_table: app.table_name(CONNECTIONS_TABLE_SUFFIX),
            events_table: app.table_name(EVENTS_TABLE_SUFFIX),
            subscriptions_table: app.table_name(SUBSCRIPTIONS_TABLE_SUFFIX),
            subscription_operations_table: app.table_name(SUBSCRIPTION_OPERATIONS_TABLE_SUFFIX),
        }
    }
}

/// The six IAM statements every rendered descriptor carries.
fn iam_role_statements() -> Vec<IamStatement> {
    vec![
        IamStatement::allow(
            &["execute-api:ManageConnections"],
            CfnRef::arn("arn:aws:execute-api:*:*:*/development/POST/@connections/*"),
        ),
        IamStatement::allow(
            &[
                "dynamodb:DeleteItem",
                "dynamodb:GetItem",
                "dynamodb:PutItem",
                "dynamodb:UpdateItem",
            ],
            CfnRef::get_att(CONNECTIONS_TABLE_RESOURCE, "Arn"),
        ),
        IamStatement::allow(
            &[
                "dynamodb:DescribeStream",
                "dynamodb:GetRecords",
                "dynamodb:GetShardIterator",
                "dynamodb:ListStreams",
            ],
            CfnRef::get_att(EVENTS_TABLE_RESOURCE, "StreamArn"),
        ),
        IamStatement::allow(
            &["dynamodb:PutItem"],
            CfnRef::get_att(EVENTS_TABLE_RESOURCE, "Arn"),
        ),
        IamStatement::allow(
            &[
                "dynamodb:BatchWriteItem",
                "dynamodb:DeleteItem",
                "dynamodb:GetItem",
                "dynamodb:PutItem",
                "dynamodb:Query",
                "dynamodb:Scan",
            ],
            CfnRef::get_att(SUBSCRIPTIONS_TABLE_RESOURCE, "Arn"),
        ),
        IamStatement::allow(
            &[
                "dynamodb:BatchWriteItem",
                "dynamodb:DeleteItem",
                "dynamodb:GetItem",
                "dynamodb:PutItem",
            ],
            CfnRef::get_att(SUBSCRIPTION_OPERATIONS_TABLE_RESOURCE, "Arn"),
        ),
    ]
}

fn simple_hash_table(env_key: &str, key_attribute: &str) -> TableProperties {
    TableProperties {
        table_name: self_env_ref(env_key),
        attribute_definitions: vec![AttributeDefinition {
            attribute_name: key_attribute.to_owned(),
            attribute_type: AttributeType::String,
        }],
        billing_mode: BillingMode::PayPerRequest,
        key_schema: vec![KeySchemaElement {
            attribute_name: key_attribute.to_owned(),
            key_type: KeyType::Hash,
        }],
        stream_specification: None,
    }
}

fn dynamodb_table(properties: TableProperties) -> TableResource {
    TableResource {
        kind: "AWS::DynamoDB::Table".to_owned(),
        properties,
    }
}

/// The four DynamoDB table declarations, emitted for every runtime.
fn table_resources() -> ResourcesSection {
    let mut resources = IndexMap::new();

    resources.insert(
        CONNECTIONS_TABLE_RESOURCE.to_owned(),
        dynamodb_table(simple_hash_table("CONNECTIONS_TABLE", "id")),
    );

    resources.insert(
        SUBSCRIPTIONS_TABLE_RESOURCE.to_owned(),
        dynamodb_table(TableProperties {
            table_name: self_env_ref("SUBSCRIPTIONS_TABLE"),
            attribute_definitions: vec![
                AttributeDefinition {
                    attribute_name: "event".to_owned(),
                    attribute_type: AttributeType::String,
                },
                AttributeDefinition {
                    attribute_name: "subscriptionId".to_owned(),
                    attribute_type: AttributeType::String,
                },
            ],
            billing_mode: BillingMode::PayPerRequest,
            key_schema: vec![
                KeySchemaElement {
                    attribute_name: "event".to_owned(),
                    key_type: KeyType::Hash,
                },
                KeySchemaElement {
                    attribute_name: "subscriptionId".to_owned(),
                    key_type: KeyType::Range,
                },
            ],
            stream_specification: None,
        }),
    );

    resources.insert(
        SUBSCRIPTION_OPERATIONS_TABLE_RESOURCE.to_owned(),
        dynamodb_table(simple_hash_table(
            "SUBSCRIPTION_OPERATIONS_TABLE",
            "subscriptionId",
        )),
    );

    resources.insert(
        EVENTS_TABLE_RESOURCE.to_owned(),
        dynamodb_table(TableProperties {
            stream_specification: Some(StreamSpecification {
                stream_view_type: StreamViewType::NewImage,
            }),
            ..simple_hash_table("EVENTS_TABLE", "id")
        }),
    );

    ResourcesSection { resources }
}

impl ServerlessDescriptor {
    /// Assemble the full document for a validated configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let layout = FunctionLayout::for_runtime(&config.runtime);
        ServerlessDescriptor {
            service: config.app_id.to_string(),
            provider: Provider {
                name: "aws".to_owned(),
                stage: "dev".to_owned(),
                runtime: config.runtime.to_string(),
                environment: ProviderEnvironment::from_config(config),
                iam_role_statements: iam_role_statements(),
            },
            plugins: layout.plugins(),
            custom: layout.custom(),
            functions: layout.functions(),
            resources: table_resources(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use slsgen_core::{AppId, DatabaseConfig, Runtime};
    use std::path::PathBuf;

    fn config(runtime: &str) -> GeneratorConfig {
        GeneratorConfig {
            app_id: AppId::from("Demo"),
            runtime: Runtime::from(runtime),
            database: DatabaseConfig {
                host: "h".into(),
                port: "5432".into(),
                name: "db".into(),
                username: "u".into(),
                password: "pw".into(),
            },
            output_path: PathBuf::from("out.yaml"),
        }
    }

    #[test]
    fn environment_table_names_use_app_id_prefix() {
        let env = ProviderEnvironment::from_config(&config("nodejs10.x"));
        assert_eq!(env.connections_table, "Demo_Connections");
        assert_eq!(env.events_table, "Demo_Events");
        assert_eq!(env.subscriptions_table, "Demo_Subscriptions");
        assert_eq!(
            env.subscription_operations_table,
            "Demo_SubscriptionOperations"
        );
    }

    #[test]
    fn iam_statements_cover_all_four_tables() {
        let statements = iam_role_statements();
        assert_eq!(statements.len(), 6);
        for id in [
            CONNECTIONS_TABLE_RESOURCE,
            EVENTS_TABLE_RESOURCE,
            SUBSCRIPTIONS_TABLE_RESOURCE,
            SUBSCRIPTION_OPERATIONS_TABLE_RESOURCE,
        ] {
            assert!(
                statements.iter().any(|s| matches!(
                    &s.resource,
                    CfnRef::GetAtt { get_att } if get_att.0 == id
                )),
                "no statement references {id}"
            );
        }
    }

    #[test]
    fn events_table_declares_a_new_image_stream() {
        let section = table_resources();
        let events = &section.resources[EVENTS_TABLE_RESOURCE];
        assert_eq!(
            events.properties.stream_specification,
            Some(StreamSpecification {
                stream_view_type: StreamViewType::NewImage,
            })
        );
        for id in [
            CONNECTIONS_TABLE_RESOURCE,
            SUBSCRIPTIONS_TABLE_RESOURCE,
            SUBSCRIPTION_OPERATIONS_TABLE_RESOURCE,
        ] {
            assert!(section.resources[id].properties.stream_specification.is_none());
        }
    }

    #[test]
    fn subscriptions_table_has_composite_key() {
        let section = table_resources();
        let subs = &section.resources[SUBSCRIPTIONS_TABLE_RESOURCE];
        let key_types: Vec<_> = subs
            .properties
            .key_schema
            .iter()
            .map(|k| (k.attribute_name.as_str(), k.key_type))
            .collect();
        assert_eq!(
            key_types,
            vec![("event", KeyType::Hash), ("subscriptionId", KeyType::Range)]
        );
    }

    #[test]
    fn table_names_reference_provider_environment() {
        let section = table_resources();
        assert_eq!(
            section.resources[CONNECTIONS_TABLE_RESOURCE].properties.table_name,
            "${self:provider.environment.CONNECTIONS_TABLE}"
        );
    }

    #[test]
    fn legacy_config_carries_plugins_standard_does_not() {
        let legacy = ServerlessDescriptor::from_config(&config("python3.6"));
        assert!(legacy.plugins.is_some());
        assert!(legacy.custom.is_some());

        let standard = ServerlessDescriptor::from_config(&config("nodejs10.x"));
        assert!(standard.plugins.is_none());
        assert!(standard.custom.is_none());
    }
}
