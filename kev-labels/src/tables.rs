use std::collections::BTreeMap;

/// Label keys and their default values.
pub mod keys {
    pub const WORKLOAD_TYPE: &str = "kev.workload.type";
    pub const WORKLOAD_REPLICAS: &str = "kev.workload.replicas";
    pub const WORKLOAD_RESTART_POLICY: &str = "kev.workload.restart-policy";
    pub const WORKLOAD_IMAGE_PULL_POLICY: &str = "kev.workload.image-pull-policy";
    pub const WORKLOAD_SERVICE_ACCOUNT_NAME: &str = "kev.workload.service-account-name";
    pub const WORKLOAD_ROLLING_UPDATE_MAX_SURGE: &str = "kev.workload.rolling-update-max-surge";
    pub const WORKLOAD_CPU: &str = "kev.workload.cpu";
    pub const WORKLOAD_MEMORY: &str = "kev.workload.memory";
    pub const WORKLOAD_MAX_CPU: &str = "kev.workload.max-cpu";
    pub const WORKLOAD_MAX_MEMORY: &str = "kev.workload.max-memory";
    pub const SERVICE_TYPE: &str = "kev.service.type";
    pub const VOLUME_STORAGE_CLASS: &str = "kev.volume.storage-class";
    pub const VOLUME_SIZE: &str = "kev.volume.size";

    pub const DEFAULT_WORKLOAD_TYPE: &str = "Deployment";
    pub const DEFAULT_REPLICAS: &str = "1";
    pub const DEFAULT_RESTART_POLICY: &str = "Always";
    pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";
    pub const DEFAULT_SERVICE_ACCOUNT_NAME: &str = "default";
    pub const DEFAULT_SERVICE_TYPE: &str = "None";
    pub const DEFAULT_VOLUME_STORAGE_CLASS: &str = "standard";
    pub const DEFAULT_VOLUME_SIZE: &str = "100Mi";
}

/// Canonical default labels for newly created records, one table per record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTables {
    pub service: BTreeMap<String, String>,
    pub volume: BTreeMap<String, String>,
}

impl Default for LabelTables {
    fn default() -> Self {
        let service = [
            (keys::WORKLOAD_TYPE, keys::DEFAULT_WORKLOAD_TYPE),
            (keys::WORKLOAD_REPLICAS, keys::DEFAULT_REPLICAS),
            (keys::WORKLOAD_RESTART_POLICY, keys::DEFAULT_RESTART_POLICY),
            (keys::SERVICE_TYPE, keys::DEFAULT_SERVICE_TYPE),
        ];
        let volume = [
            (keys::VOLUME_STORAGE_CLASS, keys::DEFAULT_VOLUME_STORAGE_CLASS),
            (keys::VOLUME_SIZE, keys::DEFAULT_VOLUME_SIZE),
        ];
        Self {
            service: to_owned_map(&service),
            volume: to_owned_map(&volume),
        }
    }
}

impl LabelTables {
    /// Tables with no defaults at all; condensation becomes the identity.
    pub fn empty() -> Self {
        Self {
            service: BTreeMap::new(),
            volume: BTreeMap::new(),
        }
    }
}

fn to_owned_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Merge `current` labels with `base` defaults. Keys already in `current` keep their values.
pub fn condense_labels(
    current: &BTreeMap<String, String>,
    base: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut out = current.clone();
    for (key, default) in base {
        out.entry(key.clone()).or_insert_with(|| default.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        to_owned_map(pairs)
    }

    #[test]
    fn condense_adds_missing_defaults() {
        let out = condense_labels(&BTreeMap::new(), &map(&[("a", "x")]));
        assert_eq!(out, map(&[("a", "x")]));
    }

    #[test]
    fn condense_keeps_explicit_values() {
        let out = condense_labels(
            &map(&[("a", "custom"), ("extra", "1")]),
            &map(&[("a", "x"), ("b", "y")]),
        );
        assert_eq!(out, map(&[("a", "custom"), ("b", "y"), ("extra", "1")]));
    }

    #[test]
    fn default_tables_cover_both_kinds() {
        let tables = LabelTables::default();
        assert_eq!(
            tables.service.get(keys::WORKLOAD_REPLICAS).map(String::as_str),
            Some("1")
        );
        assert_eq!(
            tables.volume.get(keys::VOLUME_SIZE).map(String::as_str),
            Some("100Mi")
        );
        assert!(LabelTables::empty().service.is_empty());
    }
}
