use crate::quantity::format_memory_quantity;
use crate::tables::keys;
use kev_types::{ServiceConfig, VolumeConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The parts of a source compose service that label defaults are derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceService {
    pub name: String,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy: Option<DeployConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default)]
    pub resources: Resources,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_config: Option<UpdateConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservations: Option<ResourceSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// CPU count as written in the source, e.g. `"0.5"`.
    #[serde(default)]
    pub cpus: String,

    #[serde(default)]
    pub memory_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceVolume {
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// Build the override record for a source service: its labels, workload defaults, and
/// deployment-derived labels.
pub fn service_from_source(source: &SourceService) -> ServiceConfig {
    let mut target = ServiceConfig::new(source.name.clone());
    target.labels = source.labels.clone();
    set_default_labels(&mut target);
    extract_deployment_labels(source, &mut target);
    target
}

/// Sets workload defaults that every service gets regardless of its source.
pub fn set_default_labels(target: &mut ServiceConfig) {
    target.labels.insert(
        keys::WORKLOAD_IMAGE_PULL_POLICY.to_string(),
        keys::DEFAULT_IMAGE_PULL_POLICY.to_string(),
    );
    target.labels.insert(
        keys::WORKLOAD_SERVICE_ACCOUNT_NAME.to_string(),
        keys::DEFAULT_SERVICE_ACCOUNT_NAME.to_string(),
    );
}

/// Derives resource request/limit and rolling update labels from a source deploy block.
pub fn extract_deployment_labels(source: &SourceService, target: &mut ServiceConfig) {
    let Some(deploy) = &source.deploy else {
        return;
    };

    if let Some(reservations) = &deploy.resources.reservations {
        set_resource_labels(target, reservations, keys::WORKLOAD_CPU, keys::WORKLOAD_MEMORY);
    }

    if let Some(limits) = &deploy.resources.limits {
        set_resource_labels(
            target,
            limits,
            keys::WORKLOAD_MAX_CPU,
            keys::WORKLOAD_MAX_MEMORY,
        );
    }

    if let Some(parallelism) = deploy.update_config.as_ref().and_then(|u| u.parallelism) {
        target.labels.insert(
            keys::WORKLOAD_ROLLING_UPDATE_MAX_SURGE.to_string(),
            parallelism.to_string(),
        );
    }
}

fn set_resource_labels(
    target: &mut ServiceConfig,
    spec: &ResourceSpec,
    cpu_key: &str,
    memory_key: &str,
) {
    target
        .labels
        .insert(cpu_key.to_string(), spec.cpus.clone());
    target.labels.insert(
        memory_key.to_string(),
        format_memory_quantity(spec.memory_bytes),
    );
}

/// Storage class and size labels for each source volume. Source labels win over defaults.
pub fn extract_volume_labels(
    volumes: &BTreeMap<String, SourceVolume>,
) -> BTreeMap<String, VolumeConfig> {
    volumes
        .iter()
        .map(|(name, vol)| {
            let mut labels = BTreeMap::new();
            for (key, default) in [
                (keys::VOLUME_STORAGE_CLASS, keys::DEFAULT_VOLUME_STORAGE_CLASS),
                (keys::VOLUME_SIZE, keys::DEFAULT_VOLUME_SIZE),
            ] {
                let value = vol.labels.get(key).map_or(default, String::as_str);
                labels.insert(key.to_string(), value.to_string());
            }
            (name.clone(), VolumeConfig { labels })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label<'a>(svc: &'a ServiceConfig, key: &str) -> Option<&'a str> {
        svc.labels.get(key).map(String::as_str)
    }

    #[test]
    fn service_without_deploy_gets_only_workload_defaults() {
        let source = SourceService {
            name: "web".to_string(),
            labels: BTreeMap::from([("team".to_string(), "core".to_string())]),
            deploy: None,
        };
        let svc = service_from_source(&source);

        assert_eq!(svc.name, "web");
        assert_eq!(label(&svc, "team"), Some("core"));
        assert_eq!(
            label(&svc, keys::WORKLOAD_IMAGE_PULL_POLICY),
            Some("IfNotPresent")
        );
        assert_eq!(label(&svc, keys::WORKLOAD_SERVICE_ACCOUNT_NAME), Some("default"));
        assert_eq!(label(&svc, keys::WORKLOAD_CPU), None);
        assert_eq!(label(&svc, keys::WORKLOAD_ROLLING_UPDATE_MAX_SURGE), None);
    }

    #[test]
    fn deploy_block_maps_to_resource_labels() {
        let source = SourceService {
            name: "api".to_string(),
            labels: BTreeMap::new(),
            deploy: Some(DeployConfig {
                resources: Resources {
                    reservations: Some(ResourceSpec {
                        cpus: "0.25".to_string(),
                        memory_bytes: 64 * 1024 * 1024,
                    }),
                    limits: Some(ResourceSpec {
                        cpus: "1".to_string(),
                        memory_bytes: 1536 * 1024 * 1024,
                    }),
                },
                update_config: Some(UpdateConfig {
                    parallelism: Some(2),
                }),
            }),
        };
        let svc = service_from_source(&source);

        assert_eq!(label(&svc, keys::WORKLOAD_CPU), Some("0.25"));
        assert_eq!(label(&svc, keys::WORKLOAD_MEMORY), Some("64Mi"));
        assert_eq!(label(&svc, keys::WORKLOAD_MAX_CPU), Some("1"));
        assert_eq!(label(&svc, keys::WORKLOAD_MAX_MEMORY), Some("1.5Gi"));
        assert_eq!(label(&svc, keys::WORKLOAD_ROLLING_UPDATE_MAX_SURGE), Some("2"));
    }

    #[test]
    fn update_config_without_parallelism_is_ignored() {
        let source = SourceService {
            name: "worker".to_string(),
            labels: BTreeMap::new(),
            deploy: Some(DeployConfig {
                resources: Resources::default(),
                update_config: Some(UpdateConfig { parallelism: None }),
            }),
        };
        let mut svc = ServiceConfig::new("worker");
        extract_deployment_labels(&source, &mut svc);
        assert!(svc.labels.is_empty());
    }

    #[test]
    fn volume_labels_prefer_source_values() {
        let volumes = BTreeMap::from([
            (
                "db".to_string(),
                SourceVolume {
                    labels: BTreeMap::from([(keys::VOLUME_SIZE.to_string(), "10Gi".to_string())]),
                },
            ),
            ("cache".to_string(), SourceVolume::default()),
        ]);

        let out = extract_volume_labels(&volumes);

        let db = &out["db"].labels;
        assert_eq!(db[keys::VOLUME_SIZE], "10Gi");
        assert_eq!(db[keys::VOLUME_STORAGE_CLASS], "standard");
        let cache = &out["cache"].labels;
        assert_eq!(cache[keys::VOLUME_SIZE], "100Mi");
    }
}
