//! The hellok8s Pod manifest
//!
//! The pod is described once as a typed `k8s_openapi` object and converted to
//! the untyped form the dynamic API expects in a single serialization step.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Container, EnvVar, ExecAction, Lifecycle, LifecycleHandler, Pod, PodSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::DynamicObject;

use crate::error::Result;

pub const POD_NAME: &str = "hellok8s";
pub const DEFAULT_NAMESPACE: &str = "default";
pub const IMAGE: &str = "levinhne/hellok8s:v1";
pub const INIT_CONTAINER_NAME: &str = "hellok8s-init-container";
pub const CONTAINER_NAME: &str = "hellok8s-container";

/// Labels attached to the pod
pub fn pod_labels() -> BTreeMap<String, String> {
    [("ok".to_string(), "1".to_string())].into_iter().collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Build the hellok8s pod: one init container that dumps its environment and
/// one main container with a port variable and a postStart hook.
pub fn hellok8s_pod() -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(POD_NAME.to_string()),
            namespace: Some(DEFAULT_NAMESPACE.to_string()),
            labels: Some(pod_labels()),
            ..Default::default()
        },
        spec: Some(PodSpec {
            init_containers: Some(vec![Container {
                name: INIT_CONTAINER_NAME.to_string(),
                image: Some(IMAGE.to_string()),
                command: Some(strings(&["env"])),
                ..Default::default()
            }]),
            containers: vec![Container {
                name: CONTAINER_NAME.to_string(),
                image: Some(IMAGE.to_string()),
                env: Some(vec![EnvVar {
                    name: "port".to_string(),
                    value: Some("3000".to_string()),
                    ..Default::default()
                }]),
                lifecycle: Some(Lifecycle {
                    post_start: Some(LifecycleHandler {
                        exec: Some(ExecAction {
                            command: Some(strings(&["echo", "PostStart"])),
                        }),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Convert a typed pod into the untyped object submitted through the dynamic API
pub fn to_dynamic(pod: &Pod) -> Result<DynamicObject> {
    let value = serde_json::to_value(pod)?;
    Ok(serde_json::from_value(value)?)
}
