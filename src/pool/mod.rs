//! IP address pool objects as they arrive at the admission boundary
//!
//! Two shapes of pool exist: the namespace-scoped [`InClusterIPPool`] and the
//! cluster-scoped [`GlobalInClusterIPPool`]. Both carry the same [`PoolSpec`],
//! and validation only ever sees them through the [`GenericPool`] trait.

mod types;
pub use types::{GlobalInClusterIPPool, InClusterIPPool, ObjectMeta, PoolSpec, PoolStatus};

/// API group of all pool kinds
pub const GROUP: &str = "ipam.cluster.x-k8s.io";

/// API version of all pool kinds
pub const VERSION: &str = "v1alpha2";

/// Anything that exposes an IP address pool specification
pub trait GenericPool {
    /// The pool specification to validate
    fn pool_spec(&self) -> &PoolSpec;

    /// Object name, used when reporting errors
    fn name(&self) -> &str;

    /// Object kind, used when reporting errors
    fn kind(&self) -> &'static str;
}

/// Either pool shape, decoded from a manifest by its `kind` field
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum PoolObject {
    InClusterIPPool(InClusterIPPool),
    GlobalInClusterIPPool(GlobalInClusterIPPool),
}

impl PoolObject {
    /// Decode a pool from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Decode a pool from a JSON reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Borrow the underlying pool as a [`GenericPool`]
    #[must_use]
    pub fn as_generic(&self) -> &dyn GenericPool {
        match self {
            Self::InClusterIPPool(pool) => pool,
            Self::GlobalInClusterIPPool(pool) => pool,
        }
    }
}

impl GenericPool for PoolObject {
    fn pool_spec(&self) -> &PoolSpec {
        self.as_generic().pool_spec()
    }

    fn name(&self) -> &str {
        self.as_generic().name()
    }

    fn kind(&self) -> &'static str {
        self.as_generic().kind()
    }
}

impl From<InClusterIPPool> for PoolObject {
    fn from(pool: InClusterIPPool) -> Self {
        Self::InClusterIPPool(pool)
    }
}

impl From<GlobalInClusterIPPool> for PoolObject {
    fn from(pool: GlobalInClusterIPPool) -> Self {
        Self::GlobalInClusterIPPool(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_namespaced_pool() {
        let pool = PoolObject::from_json(
            r#"{
                "apiVersion": "ipam.cluster.x-k8s.io/v1alpha2",
                "kind": "InClusterIPPool",
                "metadata": { "name": "workers", "namespace": "default" },
                "spec": {
                    "addresses": ["10.0.0.10-10.0.0.20", "10.0.0.30"],
                    "prefix": 24,
                    "gateway": "10.0.0.1"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(pool.kind(), "InClusterIPPool");
        assert_eq!(pool.name(), "workers");
        assert_eq!(
            pool.pool_spec(),
            &PoolSpec {
                addresses: vec!["10.0.0.10-10.0.0.20".to_owned(), "10.0.0.30".to_owned()],
                prefix: 24,
                gateway: "10.0.0.1".to_owned(),
            }
        );
        match pool {
            PoolObject::InClusterIPPool(pool) => {
                assert_eq!(pool.metadata.namespace.as_deref(), Some("default"));
            }
            PoolObject::GlobalInClusterIPPool(_) => panic!("decoded the wrong pool kind"),
        }
    }

    #[test]
    fn test_decode_global_pool_with_missing_fields() {
        let pool = PoolObject::from_json(
            r#"{"kind": "GlobalInClusterIPPool", "metadata": {"name": "shared"}, "spec": {}}"#,
        )
        .unwrap();

        assert_eq!(pool.kind(), "GlobalInClusterIPPool");
        assert_eq!(pool.name(), "shared");
        assert!(pool.pool_spec().addresses.is_empty());
        assert_eq!(pool.pool_spec().prefix, 0);
        assert!(pool.pool_spec().gateway.is_empty());
    }

    #[test]
    fn test_decode_unknown_kind() {
        assert!(PoolObject::from_json(r#"{"kind": "IPAddressClaim", "spec": {}}"#).is_err());
        assert!(PoolObject::from_json(r#"{"spec": {}}"#).is_err());
    }

    #[test]
    fn test_encode_omits_empty_gateway() {
        let pool = PoolObject::from(GlobalInClusterIPPool::new(
            "shared",
            PoolSpec {
                addresses: vec!["fd00::/120".to_owned()],
                prefix: 120,
                gateway: String::new(),
            },
        ));
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["kind"], "GlobalInClusterIPPool");
        assert_eq!(json["apiVersion"], "ipam.cluster.x-k8s.io/v1alpha2");
        assert_eq!(json["spec"]["prefix"], 120);
        assert!(json["spec"].get("gateway").is_none());
    }
}
