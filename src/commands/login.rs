// ABOUTME: Login command implementation.
// ABOUTME: Logs into a cluster with a password or a token.

use shiftdeploy::error::{Error, Result};
use shiftdeploy::exec::ProcessExecutor;
use shiftdeploy::output::Output;
use shiftdeploy::session::Session;

/// How to authenticate against the cluster.
pub enum Credentials {
    Password { username: String, password: String },
    Token(String),
}

impl Credentials {
    pub fn from_args(
        username: Option<String>,
        password: Option<String>,
        token: Option<String>,
    ) -> Result<Self> {
        match (username, password, token) {
            (_, _, Some(token)) => Ok(Credentials::Token(token)),
            (Some(username), Some(password), None) => Ok(Credentials::Password { username, password }),
            _ => Err(Error::InvalidConfig {
                message: "either --token or --username with --password is required".to_string(),
            }),
        }
    }
}

pub async fn login<E: ProcessExecutor>(
    session: &Session<E>,
    cluster: &str,
    credentials: Credentials,
    output: &Output,
) -> Result<()> {
    let oc = session.oc();
    let options = session.options();

    output.progress(&format!("Logging into {cluster}..."));
    match &credentials {
        Credentials::Password { username, password } => {
            oc.login(options, cluster, username, password).await?
        }
        Credentials::Token(token) => oc.login_with_token(options, cluster, token).await?,
    }

    let context = session.context().await?;
    if !oc.is_openshift(options).await? {
        output.warning(&format!("{cluster} does not serve the OpenShift apps API"));
    }
    output.success(&format!("Logged in: {context}"));
    Ok(())
}
