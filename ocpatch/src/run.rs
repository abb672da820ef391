use std::{path::PathBuf, process::exit, time::Duration};

use anyhow::{bail, Context, Result};
use ocpatch_core::{Invocation, Params};
use ocpatch_http::{HttpTransport, HttpTransportConfig};
use serde_json::{Map, Value};
use tracing::debug;

use crate::application;

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// A JSON file with the invocation parameters
    ///
    /// The file holds an object with the keys `token`, `host`, `port`,
    /// `namespace` and `object`, where `object` has the keys `name`, `type`,
    /// `operation`, `path`, `value` and `from`. Flags override the file.
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Bearer token used to authenticate (`oc whoami -t`)
    #[arg(long, env = "OCPATCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Host name or address of the API server
    #[arg(long)]
    pub host: Option<String>,

    /// Port of the API server [default: 443]
    #[arg(long)]
    pub port: Option<u16>,

    /// Namespace of the object
    #[arg(long)]
    pub namespace: Option<String>,

    /// Name of the object
    #[arg(long("name"))]
    pub resource_name: Option<String>,

    /// Kind of the object, e.g. `configmap`
    #[arg(long("type"))]
    pub resource_type: Option<String>,

    /// One of get, replace, add, remove, move, test
    #[arg(long)]
    pub operation: Option<String>,

    /// Path to the value of interest, e.g. `/data/key`
    #[arg(long)]
    pub path: Option<String>,

    /// The value, in JSON format
    #[arg(long, conflicts_with = "value_str")]
    pub value_json: Option<String>,

    /// The value, as a raw string
    ///
    /// This is equivalent to `--value-json JSON` if JSON is the JSON string formatting of STR.
    #[arg(long)]
    pub value_str: Option<String>,

    /// Source path for the move operation
    #[arg(long("from"))]
    pub from_path: Option<String>,

    /// Do not verify the server's TLS certificate
    #[arg(long, default_value_t = false)]
    pub insecure: bool,

    /// Give up on a request after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// Run the `run` command.
pub(crate) fn run(args: &Args) -> Result<()> {
    let params = load_params(args)?;
    debug!(?params, "loaded parameters");
    let invocation = Invocation::from_params(params)?;

    let transport = HttpTransport::new(&HttpTransportConfig {
        verify_tls: !args.insecure,
        timeout: args.timeout.map(Duration::from_secs),
    })?;

    let outcome = application::runtime().block_on(ocpatch_core::run(&transport, &invocation))?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if outcome.is_failure() {
        exit(1);
    }
    Ok(())
}

/// Combine the params file, if any, with the flags.
fn load_params(args: &Args) -> Result<Params> {
    let mut params: Map<String, Value> = match &args.params {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse {} as a JSON object", path.display()))?
        }
        None => Map::new(),
    };

    let value = match (&args.value_json, &args.value_str) {
        (Some(json), _) => Some(
            serde_json::from_str(json).with_context(|| "failed to parse value of --value-json")?,
        ),
        (None, Some(s)) => Some(Value::String(s.clone())),
        (None, None) => None,
    };

    override_with(&mut params, "token", args.token.clone().map(Value::String));
    override_with(&mut params, "host", args.host.clone().map(Value::String));
    override_with(&mut params, "port", args.port.map(Value::from));
    override_with(&mut params, "namespace", args.namespace.clone().map(Value::String));

    let object = params
        .entry("object")
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(object) = object else {
        bail!("parameter `object` must be a JSON object");
    };
    override_with(object, "name", args.resource_name.clone().map(Value::String));
    override_with(object, "type", args.resource_type.clone().map(Value::String));
    override_with(object, "operation", args.operation.clone().map(Value::String));
    override_with(object, "path", args.path.clone().map(Value::String));
    override_with(object, "value", value);
    override_with(object, "from", args.from_path.clone().map(Value::String));

    serde_json::from_value(Value::Object(params))
        .with_context(|| "incomplete or invalid parameters (see `ocpatch run --help`)")
}

fn override_with(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}
