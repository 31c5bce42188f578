//! Kubernetes client setup and the dynamic resource operations used by hellok8s

use std::fmt;
use std::path::Path;

use kube::{
    api::{Api, ListParams, PostParams},
    config::{KubeConfigOptions, Kubeconfig},
    core::{ApiResource, DynamicObject},
    Client, ResourceExt,
};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};

/// Addresses a resource collection independently of any compiled-in type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupVersionResource {
    /// API group, empty for the core group
    pub group: String,
    pub version: String,
    /// Plural resource name as used in URLs
    pub resource: String,
}

impl GroupVersionResource {
    pub fn gvr(group: &str, version: &str, resource: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            resource: resource.to_string(),
        }
    }

    /// Core v1 pods
    pub fn pods() -> Self {
        Self::gvr("", "v1", "pods")
    }

    /// `v1` for the core group, `group/version` otherwise
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Build the kube resource descriptor for this collection.
    ///
    /// The kind never appears in request URLs, so it is taken from the object
    /// being sent where there is one.
    pub fn to_api_resource(&self, kind: &str) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: kind.to_string(),
            plural: self.resource.clone(),
        }
    }
}

impl fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}.{}", self.resource, self.version)
        } else {
            write!(f, "{}.{}.{}", self.resource, self.version, self.group)
        }
    }
}

/// Create and list untyped objects in a namespaced collection
#[allow(async_fn_in_trait)]
pub trait DynamicResourceClient {
    async fn create(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject>;

    async fn list(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<DynamicObject>>;
}

/// Read a kubeconfig file and turn its current context into a client config.
///
/// An empty path is an error; there is no in-cluster or environment fallback.
pub async fn load_client_config(path: &Path) -> Result<kube::Config> {
    if path.as_os_str().is_empty() {
        return Err(Error::MissingKubeconfig);
    }

    let kubeconfig_error = |source: kube::config::KubeconfigError| Error::Kubeconfig {
        path: path.to_path_buf(),
        source,
    };

    let kubeconfig = Kubeconfig::read_from(path).map_err(kubeconfig_error)?;
    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(kubeconfig_error)?;

    debug!(cluster_url = %config.cluster_url, "Loaded kubeconfig");
    Ok(config)
}

/// Wrapper around kube::Client that talks to arbitrary resource collections
#[derive(Clone)]
pub struct ClusterClient {
    client: Client,
}

impl ClusterClient {
    /// Build a client from the kubeconfig at `path`
    #[instrument(skip_all, fields(kubeconfig = %path.display()))]
    pub async fn connect(path: &Path) -> Result<Self> {
        let config = load_client_config(path).await?;
        let client = Client::try_from(config).map_err(Error::Client)?;

        info!("Kubernetes client ready");

        Ok(Self { client })
    }

    fn api(&self, gvr: &GroupVersionResource, namespace: &str, kind: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &gvr.to_api_resource(kind))
    }
}

impl DynamicResourceClient for ClusterClient {
    #[instrument(skip(self, gvr, obj), fields(gvr = %gvr, name = %obj.name_any()))]
    async fn create(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        let kind = obj.types.as_ref().map(|t| t.kind.as_str()).unwrap_or_default();
        let created = self
            .api(gvr, namespace, kind)
            .create(&PostParams::default(), obj)
            .await
            .map_err(Error::Api)?;
        info!("Created object");
        Ok(created)
    }

    #[instrument(skip(self, gvr), fields(gvr = %gvr))]
    async fn list(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<DynamicObject>> {
        let lp = ListParams::default().labels(label_selector);
        let list = self.api(gvr, namespace, "").list(&lp).await.map_err(Error::Api)?;
        info!(count = list.items.len(), "Listed objects");
        Ok(list.items)
    }
}
