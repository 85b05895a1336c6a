use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

const USAGE: &str =
    "usage: alignment-engine [--config <path>] --request <path> [--history <path>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub request_path: PathBuf,
    /// JSON file of prior decision records; read for history and appended to.
    pub history_path: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::parse(env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();
        let mut config_path = None;
        let mut request_path = None;
        let mut history_path = None;

        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut config_path,
                "--request" => &mut request_path,
                "--history" => &mut history_path,
                other => return Err(anyhow!("unknown argument: {other}. {USAGE}")),
            };
            let value = args
                .next()
                .ok_or_else(|| anyhow!("missing value for {arg}"))?;
            *slot = Some(PathBuf::from(value));
        }

        Ok(Self {
            config_path: config_path.unwrap_or_else(|| PathBuf::from("./alignment.jsonc")),
            request_path: request_path.ok_or_else(|| anyhow!("--request is required. {USAGE}"))?,
            history_path,
        })
    }
}
