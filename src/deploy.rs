//! Remote deployment over rsync.
//!
//! Synchronizes the finished output tree to `server:remote_path`,
//! mirroring deletions. The remote path is a template that may carry a
//! `{site_name}` placeholder. rsync's exit status is the source of
//! truth: a failed synchronization is an error, never a silent success.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("failed to run rsync: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("rsync exited with {0}")]
    Rsync(std::process::ExitStatus),
}

/// Fill the `{site_name}` placeholder in a remote path template.
pub fn resolve_remote_path(template: &str, site_name: &str) -> String {
    template.replace("{site_name}", site_name)
}

/// Mirror `output_dir` to `server:remote_path` with `rsync -avz --delete`.
pub fn deploy(output_dir: &Path, server: &str, remote_path: &str) -> Result<(), DeployError> {
    println!("Deploying to {server}:{remote_path}...");
    let status = Command::new("rsync")
        .arg("-avz")
        .arg("--delete")
        .arg(format!("{}/", output_dir.display()))
        .arg(format!("{server}:{remote_path}/"))
        .status()?;

    if !status.success() {
        return Err(DeployError::Rsync(status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_replaced() {
        assert_eq!(
            resolve_remote_path("/var/www/{site_name}", "lux.example.net"),
            "/var/www/lux.example.net"
        );
    }

    #[test]
    fn template_without_placeholder_unchanged() {
        assert_eq!(
            resolve_remote_path("/srv/static", "lux.example.net"),
            "/srv/static"
        );
    }
}
