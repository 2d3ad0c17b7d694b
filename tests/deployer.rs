// ABOUTME: Integration tests for the deployment orchestrator.
// ABOUTME: Drives every mode against a scripted executor and checks callbacks and call order.

mod support;

use shiftdeploy::deploy::{DeployErrorKind, DeployOutcome, Deployer, DeploymentMode};
use shiftdeploy::oc::OcOptions;
use shiftdeploy::types::{KubeContext, UNSET_VALUE};
use support::{Event, Fixture, Line, RecordingListener, Reply};

const IMAGE: &str = "acme/web:1.0";
const REGISTRY: &str = "default-route-openshift-image-registry.apps-crc.testing";

const INSPECT_WITH_PORTS: &str = r#"[{"Id":"sha256:01","Config":{"ExposedPorts":{"8080/tcp":{}}}}]"#;
const INSPECT_WITHOUT_PORTS: &str = r#"[{"Id":"sha256:01","Config":{"ExposedPorts":null}}]"#;
const DESCRIBE_ROUTE: &str = "Name:\t\t\tweb\nNamespace:\t\tdev\nRequested Host:\t\tweb-dev.apps-crc.testing\n";

fn context() -> KubeContext {
    KubeContext {
        name: Some("dev/api-crc-testing:6443/developer".to_string()),
        project: Some("dev".to_string()),
        cluster_url: Some("https://api.crc.testing:6443".to_string()),
        user: Some("developer".to_string()),
    }
}

fn exposable(fixture: &Fixture) {
    fixture
        .executor
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITH_PORTS))
        .on("oc", &["expose"], Reply::ok("route.route.openshift.io/web exposed"))
        .on("oc", &["describe", "route"], Reply::ok(DESCRIBE_ROUTE));
}

#[tokio::test]
async fn deploy_failure_is_reported_once_and_stops() {
    support::init_tracing();
    let fixture = Fixture::new();
    fixture.executor.on(
        "oc",
        &["new-app"],
        Reply::fail("error: unable to locate any images", 1),
    );
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert_eq!(outcome, DeployOutcome::Failed(DeployErrorKind::Deploy));
    let failures = listener.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Failed to deploy acme/web:1.0");
    assert!(failures[0].1.contains("Failed to create app for `acme/web:1.0`"));
    assert_eq!(listener.not_exposed_count(), 0);
    assert!(listener.routes().is_empty());
    assert!(
        !fixture
            .executor
            .call_lines()
            .iter()
            .any(|c| c.starts_with("docker image inspect")),
        "nothing runs after a failed deploy"
    );
}

#[tokio::test]
async fn image_without_ports_is_not_exposed() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITHOUT_PORTS));
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert_eq!(outcome, DeployOutcome::NotExposed);
    assert_eq!(listener.not_exposed_count(), 1);
    assert!(listener.routes().is_empty());
    assert!(listener.failures().is_empty());
    assert!(listener.events().contains(&Event::NotExposed(
        "No exposed ports found, so no route is created for acme/web:1.0".to_string()
    )));
}

#[tokio::test]
async fn failed_inspection_counts_as_no_ports() {
    let fixture = Fixture::new();
    fixture.executor.on(
        "docker",
        &["image", "inspect"],
        Reply::fail("Error: No such image: acme/web:1.0", 1),
    );
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert_eq!(outcome, DeployOutcome::NotExposed);
    assert_eq!(listener.not_exposed_count(), 1);
}

#[tokio::test]
async fn exposed_image_gets_a_route_with_a_message_per_phase() {
    support::init_tracing();
    let fixture = Fixture::new();
    fixture.executor.on(
        "oc",
        &["new-app"],
        Reply::lines(
            vec![
                Line::Out("--> Found container image 1a2b3c (2 days old) for \"acme/web:1.0\"".into()),
                Line::Err("W0101 warning: image runs as root".into()),
                Line::Out("--> Success".into()),
            ],
            0,
        ),
    );
    exposable(&fixture);
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert_eq!(
        outcome,
        DeployOutcome::Routed(Some("http://web-dev.apps-crc.testing".to_string()))
    );
    assert_eq!(
        listener.routes(),
        vec![Some("http://web-dev.apps-crc.testing".to_string())]
    );

    let deploying = listener.position("Deploying acme/web:1.0 to OpenShift...").unwrap();
    let found = listener.position("--> Found container image").unwrap();
    let warning = listener.position("warning: image runs as root").unwrap();
    let success = listener.position("--> Success").unwrap();
    let ports = listener.position("Found exposed port(s) 8080/tcp").unwrap();
    let exposed = listener.position("route.route.openshift.io/web exposed").unwrap();
    let routed = listener
        .position("Application web exposed at http://web-dev.apps-crc.testing")
        .unwrap();
    assert!(deploying < found && found < warning && warning < success);
    assert!(success < ports && ports < exposed && exposed < routed);
    assert_eq!(listener.events().last(), Some(&Event::Route(Some(
        "http://web-dev.apps-crc.testing".to_string()
    ))));

    assert_eq!(
        fixture.executor.call_lines(),
        vec![
            "oc new-app acme/web:1.0",
            "docker image inspect acme/web:1.0",
            "oc expose service/web",
            "oc describe route web",
        ]
    );
}

#[tokio::test]
async fn expose_failure_is_reported_but_route_lookup_still_runs() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on(
            "oc",
            &["expose"],
            Reply::fail(
                "Error from server (AlreadyExists): routes.route.openshift.io \"web\" already exists",
                1,
            ),
        )
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITH_PORTS))
        .on("oc", &["describe", "route"], Reply::ok(DESCRIBE_ROUTE));
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert!(!outcome.is_failure());
    assert_eq!(outcome.route(), Some("http://web-dev.apps-crc.testing"));
    let failures = listener.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "Failed to expose web for acme/web:1.0");
    assert_eq!(listener.routes().len(), 1);
}

#[tokio::test]
async fn route_lookup_failure_yields_absent_route() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITH_PORTS))
        .on(
            "oc",
            &["describe", "route"],
            Reply::fail("Error from server (NotFound): routes.route.openshift.io \"web\" not found", 1),
        );
    let listener = RecordingListener::default();

    let outcome = Deployer::new(fixture.clients(), DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    assert_eq!(outcome, DeployOutcome::Routed(None));
    assert_eq!(listener.routes(), vec![None]);
    assert!(listener.position("exposed at").is_none());
}

#[tokio::test]
async fn push_to_openshift_without_registry_fails_before_any_process() {
    let fixture = Fixture::new();
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), None)
    .await;

    assert_eq!(outcome, DeployOutcome::Failed(DeployErrorKind::Precondition));
    assert!(fixture.executor.calls().is_empty());
    let failures = listener.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].1, "No OpenShift registry is available");
    assert!(listener.routes().is_empty());
}

#[tokio::test]
async fn push_to_openshift_without_project_fails_before_any_process() {
    let fixture = Fixture::new();
    let listener = RecordingListener::default();
    let context = KubeContext {
        project: Some(UNSET_VALUE.to_string()),
        ..context()
    };

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context, Some(REGISTRY))
    .await;

    assert_eq!(outcome, DeployOutcome::Failed(DeployErrorKind::Precondition));
    assert!(fixture.executor.calls().is_empty());
    assert_eq!(listener.failures().len(), 1);
}

#[tokio::test]
async fn push_to_openshift_tags_pushes_and_untags_before_deploying_the_stream() {
    support::init_tracing();
    let fixture = Fixture::new();
    fixture
        .executor
        .on("oc", &["registry", "login"], Reply::ok("info: Using registry public hostname"))
        .on(
            "docker",
            &["push"],
            Reply::ok("The push refers to repository\n1.0: digest: sha256:abc size: 1234"),
        );
    exposable(&fixture);
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), Some(REGISTRY))
    .await;

    assert!(!outcome.is_failure());
    let tag = format!("{REGISTRY}/dev/web:1.0");
    assert_eq!(
        fixture.executor.call_lines(),
        vec![
            "oc registry login".to_string(),
            "oc create imagestream web".to_string(),
            format!("docker tag acme/web:1.0 {tag}"),
            format!("docker push {tag}"),
            format!("docker rmi {tag}"),
            "oc new-app web".to_string(),
            "docker image inspect acme/web:1.0".to_string(),
            "oc expose service/web".to_string(),
            "oc describe route web".to_string(),
        ]
    );

    let streamed: Vec<bool> = fixture.executor.calls().iter().map(|c| c.streamed).collect();
    assert_eq!(
        streamed,
        vec![true, false, false, true, false, true, false, false, false]
    );

    let messages = listener.messages();
    let expected = [
        format!("Logging to {REGISTRY}..."),
        "Creating image stream web...".to_string(),
        format!("Tagging  {tag}..."),
        format!("Pushing {tag} to remote registry..."),
        "1.0: digest: sha256:abc size: 1234".to_string(),
        format!("Removing tag {tag}"),
        "Deploying acme/web:1.0 to OpenShift...".to_string(),
    ];
    let positions: Vec<usize> = expected
        .iter()
        .map(|m| messages.iter().position(|x| x == m).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{messages:#?}");
}

#[tokio::test]
async fn existing_image_stream_is_tolerated() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on(
            "oc",
            &["create", "imagestream"],
            Reply::fail(
                "Error from server (AlreadyExists): imagestreams.image.openshift.io \"web\" already exists",
                1,
            ),
        )
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITHOUT_PORTS));
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), Some(REGISTRY))
    .await;

    assert_eq!(outcome, DeployOutcome::NotExposed);
    assert!(listener.failures().is_empty());
    assert!(
        listener
            .position("Image stream web already exists, proceeding...")
            .is_some()
    );
    assert!(fixture.executor.call_lines().contains(&"oc new-app web".to_string()));
}

#[tokio::test]
async fn other_image_stream_errors_are_terminal() {
    let fixture = Fixture::new();
    fixture.executor.on(
        "oc",
        &["create", "imagestream"],
        Reply::fail("Error from server (Forbidden): imagestreams are forbidden", 1),
    );
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), Some(REGISTRY))
    .await;

    assert_eq!(outcome, DeployOutcome::Failed(DeployErrorKind::Push));
    assert_eq!(listener.failures().len(), 1);
    assert!(
        !fixture
            .executor
            .call_lines()
            .iter()
            .any(|c| c.starts_with("docker") || c.starts_with("oc new-app"))
    );
}

#[tokio::test]
async fn failed_untag_does_not_stop_the_deployment() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on("docker", &["rmi"], Reply::fail("Error: conflict: unable to remove", 1))
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITHOUT_PORTS));
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToOpenShiftAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), Some(REGISTRY))
    .await;

    assert_eq!(outcome, DeployOutcome::NotExposed);
    assert!(listener.position("Failed to remove tag").is_some());
}

#[tokio::test]
async fn push_to_hub_pushes_original_image_then_deploys_it() {
    let fixture = Fixture::new();
    fixture
        .executor
        .on(
            "docker",
            &["push"],
            Reply::lines(
                vec![
                    Line::Out("5f70bf18a086: Pushed".into()),
                    Line::Out("1.0: digest: sha256:abc size: 528".into()),
                ],
                0,
            ),
        )
        .on("docker", &["image", "inspect"], Reply::ok(INSPECT_WITHOUT_PORTS));
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToHubAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), None)
    .await;

    assert_eq!(outcome, DeployOutcome::NotExposed);
    assert_eq!(
        &fixture.executor.call_lines()[..2],
        &["docker push acme/web:1.0", "oc new-app acme/web:1.0"]
    );
    let messages = listener.messages();
    assert_eq!(
        &messages[..4],
        &[
            "Pushing acme/web:1.0 to Docker Hub...",
            "5f70bf18a086: Pushed",
            "1.0: digest: sha256:abc size: 528",
            "Image acme/web:1.0 pushed successfully",
        ]
    );
}

#[tokio::test]
async fn failed_hub_push_never_deploys() {
    let fixture = Fixture::new();
    fixture.executor.on(
        "docker",
        &["push"],
        Reply::fail("denied: requested access to the resource is denied", 1),
    );
    let listener = RecordingListener::default();

    let outcome = Deployer::new(
        fixture.clients(),
        DeploymentMode::PushToHubAndDeploy,
        &listener,
    )
    .deploy(IMAGE, &context(), None)
    .await;

    assert_eq!(outcome, DeployOutcome::Failed(DeployErrorKind::Push));
    assert_eq!(fixture.executor.call_lines(), vec!["docker push acme/web:1.0"]);
    assert_eq!(
        listener.failures()[0].0,
        "Failed to prepare acme/web:1.0 for deployment"
    );
}

#[tokio::test]
async fn skip_tls_flag_reaches_every_oc_command_only() {
    let fixture = Fixture::new();
    exposable(&fixture);
    let listener = RecordingListener::default();
    let mut clients = fixture.clients();
    clients.options = OcOptions {
        skip_tls_verify: true,
    };

    Deployer::new(clients, DeploymentMode::Deploy, &listener)
        .deploy(IMAGE, &context(), None)
        .await;

    for call in fixture.executor.calls() {
        let flagged = call.args.last().map(String::as_str) == Some("--insecure-skip-tls-verify");
        assert_eq!(flagged, call.program == "oc", "{}", call.line());
    }
}
