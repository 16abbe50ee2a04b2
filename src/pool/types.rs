use serde::{Deserialize, Serialize};

use super::{GenericPool, GROUP, VERSION};

/// Desired state of an IP address pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Addresses that can be handed out. Each entry is a single IP, a
    /// hyphenated range, or a CIDR block, and entries may be non-contiguous
    #[serde(default)]
    pub addresses: Vec<String>,

    /// Network prefix length of the pool's subnet
    #[serde(default)]
    pub prefix: i64,

    /// Optional gateway address. Empty when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gateway: String,
}

/// Observed state of an IP address pool. Currently empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {}

/// The subset of object metadata needed to identify a pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

fn default_api_version() -> String {
    format!("{GROUP}/{VERSION}")
}

/// Declares one pool shape. Both shapes share every field and only differ in kind and scope
macro_rules! pool_kind {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            #[serde(default = "default_api_version")]
            pub api_version: String,
            #[serde(default)]
            pub metadata: ObjectMeta,
            #[serde(default)]
            pub spec: PoolSpec,
            #[serde(default)]
            pub status: PoolStatus,
        }

        impl $name {
            /// Construct a new pool with the given name and spec
            #[must_use]
            pub fn new(name: &str, spec: PoolSpec) -> Self {
                Self {
                    api_version: default_api_version(),
                    metadata: ObjectMeta {
                        name: name.to_owned(),
                        namespace: None,
                    },
                    spec,
                    status: PoolStatus::default(),
                }
            }
        }

        impl GenericPool for $name {
            fn pool_spec(&self) -> &PoolSpec {
                &self.spec
            }

            fn name(&self) -> &str {
                &self.metadata.name
            }

            fn kind(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

pool_kind!(
    /// A namespace-scoped IP address pool
    InClusterIPPool
);

pool_kind!(
    /// A cluster-scoped IP address pool. Claims from any namespace may reference it
    GlobalInClusterIPPool
);
