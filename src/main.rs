//! Quilt meta generator
//!
//! Runs one aggregation pass and publishes the v3/versions tree either to a
//! directory or to an HTTP endpoint.
//!
//! Usage:
//!   quilt-meta --output-dir ./public
//!   quilt-meta --upload-url https://meta.example/bucket --group org.quiltmc

use std::path::PathBuf;

use clap::Parser;
use quilt_meta::core::config::DEFAULT_UPLOAD_CONCURRENCY;
use quilt_meta::core::http::{build_http_client, APP_USER_AGENT};
use quilt_meta::core::maven::QUILT_MAVEN;
use quilt_meta::core::version::MANIFEST_URL;
use quilt_meta::{
    init_tracing, DirectorySink, DocumentSink, HttpPutSink, MetaConfig, MetaResult, Pipeline,
};

#[derive(Parser)]
#[command(name = "quilt-meta")]
#[command(about = "Aggregate loader, mappings and installer versions into v3/versions")]
struct Cli {
    /// Maven repository the artifacts are read from
    #[arg(long, env = "META_MAVEN_URL", default_value_t = format!("{}/", QUILT_MAVEN))]
    maven_url: String,

    /// Group id shared by all four artifacts
    #[arg(long, env = "META_GROUP", default_value = "org.quiltmc")]
    group: String,

    #[arg(long, env = "META_MAPPINGS", default_value = "yarn")]
    mappings: String,

    #[arg(long, env = "META_INTERMEDIARY", default_value = "intermediary")]
    intermediary: String,

    #[arg(long, env = "META_LOADER", default_value = "quilt-loader")]
    loader: String,

    #[arg(long, env = "META_INSTALLER", default_value = "quilt-installer")]
    installer: String,

    /// Prefix of launch profile ids
    #[arg(long, env = "META_TOOLCHAIN", default_value = "quilt")]
    toolchain: String,

    #[arg(long, env = "META_MANIFEST_URL", default_value = MANIFEST_URL)]
    manifest_url: String,

    /// Write documents as <dir>/<path>/index.json
    #[arg(long, env = "META_OUTPUT_DIR", conflicts_with = "upload_url", required_unless_present = "upload_url")]
    output_dir: Option<PathBuf>,

    /// PUT documents to <url>/<path>
    #[arg(long, env = "META_UPLOAD_URL")]
    upload_url: Option<String>,

    /// User agent sent on every request, reads and uploads alike
    #[arg(long, env = "META_USER_AGENT", default_value = APP_USER_AGENT)]
    user_agent: String,

    /// Documents uploaded at once
    #[arg(long, env = "META_UPLOAD_CONCURRENCY", default_value_t = DEFAULT_UPLOAD_CONCURRENCY)]
    upload_concurrency: usize,
}

impl Cli {
    fn config(&self) -> MetaConfig {
        MetaConfig {
            maven_url: self.maven_url.clone(),
            group: self.group.clone(),
            mappings_artifact: self.mappings.clone(),
            intermediary_artifact: self.intermediary.clone(),
            loader_artifact: self.loader.clone(),
            installer_artifact: self.installer.clone(),
            toolchain: self.toolchain.clone(),
            manifest_url: self.manifest_url.clone(),
            user_agent: self.user_agent.clone(),
            upload_concurrency: self.upload_concurrency,
        }
    }

    fn sink(&self, config: &MetaConfig) -> MetaResult<Box<dyn DocumentSink>> {
        match (&self.output_dir, &self.upload_url) {
            (Some(dir), _) => Ok(Box::new(DirectorySink::new(dir))),
            (None, Some(url)) => {
                let client = build_http_client(&config.user_agent)?;
                Ok(Box::new(HttpPutSink::new(url, client)))
            }
            (None, None) => Err(quilt_meta::MetaError::Config(
                "either --output-dir or --upload-url is required".into(),
            )),
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let response = match run(&cli).await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", response.body);
    if !response.is_success() {
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> MetaResult<quilt_meta::InvocationResponse> {
    let config = cli.config();
    let sink = cli.sink(&config)?;
    let pipeline = Pipeline::from_config(config)?;
    Ok(pipeline.invoke(sink.as_ref()).await)
}
