//! Subscriber setup shared by the native clients. Output is bunyan formatted
//! JSON lines so client traces can be read with the same tools as the server's

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Folder (relative to the working directory) that trace files are written to
pub const TRACE_FOLDER: &str = "traces";

/// Filter used when `RUST_LOG` is not set. Keeps the client crates at debug
/// and everything else (reqwest, hyper, ...) at info
pub const DEFAULT_FILTER_DIRECTIVE: &str = "ops_client_core=debug,ops_admin_cli=debug,info";

/// Builds the bunyan subscriber writing to `sink`
///
/// `RUST_LOG` takes precedence over `default_env_filter_directive`, see
/// <https://docs.rs/tracing-subscriber/0.3.19/tracing_subscriber/filter/struct.EnvFilter.html#directives>
pub fn get_subscriber<Sink>(
    app_name: &str,
    default_env_filter_directive: &str,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_env_filter_directive));
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(app_name.to_string(), sink))
}

/// Installs `subscriber` as the global default and routes `log` records into
/// it. Fails if called a second time
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("failed to set logger")?;
    set_global_default(subscriber).context("failed to set subscriber")?;
    Ok(())
}

fn trace_file_path(folder: &Path, app_name: &str) -> PathBuf {
    folder.join(format!(
        "{}_{app_name}.log",
        chrono::Local::now().format("%Y-%m-%dT%H-%M-%S")
    ))
}

/// Creates a new time stamped trace file in [`TRACE_FOLDER`]
pub fn create_trace_file(app_name: &str) -> anyhow::Result<(File, PathBuf)> {
    let folder = Path::new(TRACE_FOLDER);
    create_dir_all(folder)
        .with_context(|| format!("failed to create trace folder: {folder:?}"))?;
    let path = trace_file_path(folder, app_name);
    let file =
        File::create(&path).with_context(|| format!("failed to create trace file: {path:?}"))?;
    Ok((file, path))
}
