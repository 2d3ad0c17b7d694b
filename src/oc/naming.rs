// ABOUTME: Pure helpers deriving names and routes from image references and oc output.
// ABOUTME: Also isolates the fragile "already exists" error match.

use super::OcError;

const REQUESTED_HOST: &str = "Requested Host:";

/// Short application name for an image reference.
///
/// Everything from the first `:` is dropped, then the last `/` segment is
/// kept: `registry.io/ns/my-app:latest` becomes `my-app`.
pub fn app_name(image: &str) -> &str {
    let without_tag = image.split(':').next().unwrap_or(image);
    without_tag.rsplit('/').next().unwrap_or(without_tag)
}

/// Extract the route URL from `oc describe route` output.
///
/// Routes are always rendered as `http://<host>`.
pub fn parse_route(describe_output: &str) -> Option<String> {
    describe_output
        .lines()
        .find_map(|line| line.strip_prefix(REQUESTED_HOST))
        .map(|host| format!("http://{}", host.trim()))
}

/// Whether a creation failed only because the resource already exists.
///
/// oc reports this as `Error from server (AlreadyExists): ... already exists`;
/// there is no exit code to tell it apart, so the message is matched here and
/// nowhere else.
pub fn is_already_exists(err: &OcError) -> bool {
    err.stderr()
        .is_some_and(|s| s.contains("(AlreadyExists)") || s.contains("already exists"))
}
