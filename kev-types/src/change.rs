use crate::document::{ServiceConfig, VolumeConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What a change does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Create,
    Update,
    Delete,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Create => "create",
            ChangeType::Update => "update",
            ChangeType::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-path of the addressed record a change is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parent {
    /// The record itself.
    #[default]
    #[serde(rename = "")]
    Unscoped,
    Labels,
    Environment,
    Extensions,
}

impl Parent {
    pub fn as_str(self) -> &'static str {
        match self {
            Parent::Unscoped => "",
            Parent::Labels => "labels",
            Parent::Environment => "environment",
            Parent::Extensions => "extensions",
        }
    }
}

/// Reference into the addressed collection.
///
/// Services are addressed by position, volumes by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeIndex {
    Service(usize),
    Volume(String),
}

impl fmt::Display for ChangeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeIndex::Service(pos) => write!(f, "service #{pos}"),
            ChangeIndex::Volume(name) => write!(f, "volume {name}"),
        }
    }
}

/// Discriminant of a [`ChangeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    None,
    String,
    Service,
    Volume,
    Map,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::None => "none",
            ValueKind::String => "string",
            ValueKind::Service => "service",
            ValueKind::Volume => "volume",
            ValueKind::Map => "map",
        };
        f.write_str(s)
    }
}

/// Payload carried by a change. Its expected shape depends on the change type and parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ChangeValue {
    #[default]
    None,
    String(String),
    Service(ServiceConfig),
    Volume(VolumeConfig),
    Map(serde_json::Map<String, serde_json::Value>),
}

/// A payload was not of the kind the operation requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected payload kind: expected {expected}, found {found}")]
pub struct UnexpectedPayload {
    pub expected: ValueKind,
    pub found: ValueKind,
}

impl ChangeValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            ChangeValue::None => ValueKind::None,
            ChangeValue::String(_) => ValueKind::String,
            ChangeValue::Service(_) => ValueKind::Service,
            ChangeValue::Volume(_) => ValueKind::Volume,
            ChangeValue::Map(_) => ValueKind::Map,
        }
    }

    fn mismatch(&self, expected: ValueKind) -> UnexpectedPayload {
        UnexpectedPayload {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_string(&self) -> Result<&str, UnexpectedPayload> {
        match self {
            ChangeValue::String(s) => Ok(s),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    pub fn as_map(&self) -> Result<&serde_json::Map<String, serde_json::Value>, UnexpectedPayload> {
        match self {
            ChangeValue::Map(m) => Ok(m),
            other => Err(other.mismatch(ValueKind::Map)),
        }
    }

    pub fn into_service(self) -> Result<ServiceConfig, UnexpectedPayload> {
        match self {
            ChangeValue::Service(svc) => Ok(svc),
            other => Err(other.mismatch(ValueKind::Service)),
        }
    }

    pub fn into_volume(self) -> Result<VolumeConfig, UnexpectedPayload> {
        match self {
            ChangeValue::Volume(vol) => Ok(vol),
            other => Err(other.mismatch(ValueKind::Volume)),
        }
    }
}

impl From<&str> for ChangeValue {
    fn from(s: &str) -> Self {
        ChangeValue::String(s.to_string())
    }
}

impl From<String> for ChangeValue {
    fn from(s: String) -> Self {
        ChangeValue::String(s)
    }
}

impl From<ServiceConfig> for ChangeValue {
    fn from(svc: ServiceConfig) -> Self {
        ChangeValue::Service(svc)
    }
}

impl From<VolumeConfig> for ChangeValue {
    fn from(vol: VolumeConfig) -> Self {
        ChangeValue::Volume(vol)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for ChangeValue {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        ChangeValue::Map(map)
    }
}

/// One atomic operation against the override document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "type")]
    pub change_type: ChangeType,

    #[serde(default)]
    pub parent: Parent,

    /// Key name for label, environment and extension operations.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<ChangeIndex>,

    #[serde(default)]
    pub value: ChangeValue,
}

impl Change {
    pub fn new(change_type: ChangeType, parent: Parent) -> Self {
        Self {
            change_type,
            parent,
            target: String::new(),
            index: None,
            value: ChangeValue::None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_index(mut self, index: ChangeIndex) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_value(mut self, value: impl Into<ChangeValue>) -> Self {
        self.value = value.into();
        self
    }

    pub fn version_update(version: impl Into<String>) -> Self {
        Self::new(ChangeType::Update, Parent::Unscoped).with_value(version.into())
    }

    pub fn service_create(service: ServiceConfig) -> Self {
        Self::new(ChangeType::Create, Parent::Unscoped).with_value(service)
    }

    pub fn service_delete(position: usize) -> Self {
        Self::new(ChangeType::Delete, Parent::Unscoped).with_index(ChangeIndex::Service(position))
    }

    pub fn service_env_delete(position: usize, key: impl Into<String>) -> Self {
        Self::new(ChangeType::Delete, Parent::Environment)
            .with_index(ChangeIndex::Service(position))
            .with_target(key)
    }

    pub fn service_label_update(
        position: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(ChangeType::Update, Parent::Labels)
            .with_index(ChangeIndex::Service(position))
            .with_target(key)
            .with_value(value.into())
    }

    pub fn service_extensions_update(
        position: usize,
        value: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self::new(ChangeType::Update, Parent::Extensions)
            .with_index(ChangeIndex::Service(position))
            .with_value(value)
    }

    pub fn volume_create(name: impl Into<String>, volume: VolumeConfig) -> Self {
        Self::new(ChangeType::Create, Parent::Unscoped)
            .with_index(ChangeIndex::Volume(name.into()))
            .with_value(volume)
    }

    pub fn volume_delete(name: impl Into<String>) -> Self {
        Self::new(ChangeType::Delete, Parent::Unscoped).with_index(ChangeIndex::Volume(name.into()))
    }

    pub fn volume_update(name: impl Into<String>, value: impl Into<ChangeValue>) -> Self {
        Self::new(ChangeType::Update, Parent::Unscoped)
            .with_index(ChangeIndex::Volume(name.into()))
            .with_value(value)
    }
}
