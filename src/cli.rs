use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Create the hellok8s pod, wait for Return, then list pods by label
#[derive(Debug, Parser)]
#[command(name = "hellok8s", version, about)]
pub struct Cli {
    /// (optional) absolute path to the kubeconfig file, defaults to ~/.kube/config
    #[arg(long, value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Arguments after the first non-flag argument; accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Parse the process arguments, accepting `-kubeconfig` as well as `--kubeconfig`
    pub fn parse_from_env() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}

/// Rewrite single-dash long flags (`-kubeconfig`, `-kubeconfig=PATH`) to the
/// double-dash form clap understands. Flag values and other args pass through.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut takes_value = false;

    for arg in args {
        if std::mem::take(&mut takes_value) {
            normalized.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("-kubeconfig") => {
                takes_value = true;
                normalized.push(OsString::from("--kubeconfig"));
            }
            Some("--kubeconfig") => {
                takes_value = true;
                normalized.push(arg);
            }
            Some(s) if s.starts_with("-kubeconfig=") => {
                normalized.push(OsString::from(format!("-{}", s)));
            }
            _ => normalized.push(arg),
        }
    }
    normalized
}
