//! Tests for the create / prompt / list sequence
//!
//! These tests drive `hellok8s::run` against an in-memory API server that
//! enforces name uniqueness and label-selector filtering.

use std::collections::BTreeMap;
use std::sync::Mutex;

use kube::core::DynamicObject;
use kube::error::ErrorResponse;
use kube::ResourceExt;
use tokio::io::BufReader;

use hellok8s::config::Config;
use hellok8s::prompt::PROMPT;
use hellok8s::{DynamicResourceClient, Error, GroupVersionResource, Result};

#[derive(Default)]
struct FakeCluster {
    objects: Mutex<BTreeMap<(String, String, String), DynamicObject>>,
    fail_list: bool,
}

impl FakeCluster {
    fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::default()
        }
    }

    fn names_in(&self, namespace: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(_, ns, _)| ns == namespace)
            .map(|(_, _, name)| name.clone())
            .collect()
    }

    fn api_error(code: u16, reason: &str, message: String) -> Error {
        Error::Api(kube::Error::Api(ErrorResponse {
            status: "Failure".to_string(),
            message,
            reason: reason.to_string(),
            code,
        }))
    }
}

fn matches_selector(obj: &DynamicObject, selector: &str) -> bool {
    selector
        .split(',')
        .filter(|term| !term.is_empty())
        .all(|term| match term.split_once('=') {
            Some((key, value)) => obj.labels().get(key).map(String::as_str) == Some(value),
            None => obj.labels().contains_key(term),
        })
}

impl DynamicResourceClient for FakeCluster {
    async fn create(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        let name = obj.name_any();
        let key = (gvr.resource.clone(), namespace.to_string(), name.clone());
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&key) {
            return Err(Self::api_error(
                409,
                "AlreadyExists",
                format!("{} \"{}\" already exists", gvr.resource, name),
            ));
        }
        let mut stored = obj.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        objects.insert(key, stored.clone());
        Ok(stored)
    }

    async fn list(
        &self,
        gvr: &GroupVersionResource,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<DynamicObject>> {
        if self.fail_list {
            return Err(Self::api_error(403, "Forbidden", "list is forbidden".to_string()));
        }
        Ok(self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|((resource, ns, _), _)| resource == &gvr.resource && ns == namespace)
            .filter(|(_, obj)| matches_selector(obj, label_selector))
            .map(|(_, obj)| obj.clone())
            .collect())
    }
}

fn return_key() -> BufReader<tokio_test::io::Mock> {
    BufReader::new(tokio_test::io::Builder::new().read(b"\n").build())
}

#[tokio::test]
async fn test_run_creates_single_pod_and_lists_nothing() {
    let cluster = FakeCluster::default();
    let mut stdout = Vec::new();

    let names = hellok8s::run(&cluster, &Config::default(), &mut return_key(), &mut stdout)
        .await
        .unwrap();

    assert_eq!(cluster.names_in("default"), vec!["hellok8s".to_string()]);
    // The pod carries ok=1 and the default selector is ok=2
    assert!(names.is_empty());
    assert_eq!(String::from_utf8(stdout).unwrap(), format!("{}\n", PROMPT));
}

#[tokio::test]
async fn test_submitted_pod_content() {
    let cluster = FakeCluster::default();
    let mut stdout = Vec::new();

    hellok8s::run(&cluster, &Config::default(), &mut return_key(), &mut stdout)
        .await
        .unwrap();

    let objects = cluster.objects.lock().unwrap();
    let pod = objects.values().next().unwrap();
    let types = pod.types.as_ref().unwrap();
    assert_eq!(types.api_version, "v1");
    assert_eq!(types.kind, "Pod");
    assert_eq!(pod.labels().get("ok"), Some(&"1".to_string()));
    assert_eq!(pod.data["spec"]["initContainers"][0]["name"], "hellok8s-init-container");
    assert_eq!(pod.data["spec"]["containers"][0]["name"], "hellok8s-container");
}

#[tokio::test]
async fn test_second_run_conflicts() {
    let cluster = FakeCluster::default();
    let config = Config::default();

    let mut first_out = Vec::new();
    hellok8s::run(&cluster, &config, &mut return_key(), &mut first_out)
        .await
        .unwrap();

    // No console interaction expected: the run stops before the prompt
    let mut stdin = BufReader::new(tokio_test::io::Builder::new().build());
    let mut second_out = Vec::new();
    let err = hellok8s::run(&cluster, &config, &mut stdin, &mut second_out)
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(second_out.is_empty());
    assert_eq!(cluster.names_in("default").len(), 1);
}

#[tokio::test]
async fn test_matching_selector_prints_names() {
    let cluster = FakeCluster::default();
    let config = Config {
        label_selector: "ok=1".to_string(),
        ..Config::default()
    };
    let mut stdout = Vec::new();

    let names = hellok8s::run(&cluster, &config, &mut return_key(), &mut stdout)
        .await
        .unwrap();

    assert_eq!(names, vec!["hellok8s".to_string()]);
    assert_eq!(
        String::from_utf8(stdout).unwrap(),
        format!("{}\nhellok8s\n", PROMPT)
    );
}

#[tokio::test]
async fn test_closed_stdin_still_lists() {
    let cluster = FakeCluster::default();
    let config = Config {
        label_selector: "ok=1".to_string(),
        ..Config::default()
    };
    let mut stdin = BufReader::new(tokio_test::io::Builder::new().build());
    let mut stdout = Vec::new();

    let names = hellok8s::run(&cluster, &config, &mut stdin, &mut stdout)
        .await
        .unwrap();

    assert_eq!(names, vec!["hellok8s".to_string()]);
}

#[tokio::test]
async fn test_list_failure_keeps_created_pod() {
    let cluster = FakeCluster::failing_list();
    let mut stdout = Vec::new();

    let err = hellok8s::run(&cluster, &Config::default(), &mut return_key(), &mut stdout)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(403));
    assert_eq!(cluster.names_in("default"), vec!["hellok8s".to_string()]);
}

#[tokio::test]
async fn test_configured_namespace() {
    let cluster = FakeCluster::default();
    let config = Config {
        namespace: "sandbox".to_string(),
        ..Config::default()
    };
    let mut stdout = Vec::new();

    hellok8s::run(&cluster, &config, &mut return_key(), &mut stdout)
        .await
        .unwrap();

    assert!(cluster.names_in("default").is_empty());
    assert_eq!(cluster.names_in("sandbox"), vec!["hellok8s".to_string()]);
    let objects = cluster.objects.lock().unwrap();
    assert_eq!(
        objects.values().next().unwrap().namespace(),
        Some("sandbox".to_string())
    );
}

#[tokio::test]
async fn test_non_utf8_keypress_still_lists() {
    let cluster = FakeCluster::default();
    let config = Config {
        label_selector: "ok=1".to_string(),
        ..Config::default()
    };
    let mut stdin = BufReader::new(tokio_test::io::Builder::new().read(b"\xe9\n").build());
    let mut stdout = Vec::new();

    let names = hellok8s::run(&cluster, &config, &mut stdin, &mut stdout)
        .await
        .unwrap();

    assert_eq!(names, vec!["hellok8s".to_string()]);
}
