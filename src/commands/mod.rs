// ABOUTME: Command module aggregator for the shiftdeploy CLI.
// ABOUTME: Re-exports one handler per subcommand.

mod cluster;
mod context;
mod deploy;
mod images;
mod login;
mod project;
mod wait;

pub use cluster::cluster_info;
pub use context::context;
pub use deploy::deploy;
pub use images::images;
pub use login::{Credentials, login};
pub use project::project;
pub use wait::wait;
