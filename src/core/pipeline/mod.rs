// ─── Aggregation Pipeline ───
//
//   mapping versions ─┐
//   mappings ─────────┤
//   installer ────────┼── join ── matrix ── v3/versions ── publish (≤50 at once)
//   intermediary+game ┤
//   loader ─▶ launcher metadata fan-out ─┘
//
// The five branches run concurrently. The first failure drops every other
// branch and the run's context, so a failed run publishes nothing.
//
// `try_join!` interleaves the branches on the invoking task rather than
// spawning them. Every branch is waiting on HTTP, and the only CPU work
// (normalizing and serializing) happens between awaits.

mod context;
mod response;

pub use context::{ResultsTable, RunContext};
pub use response::{ErrorEnvelope, InvocationResponse};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::core::collectors::{
    CollectContext, Collector, InstallerCollector, IntermediaryCollector, LoaderCollector,
    MappingVersionsCollector, MappingsCollector,
};
use crate::core::config::MetaConfig;
use crate::core::error::MetaResult;
use crate::core::http::build_http_client;
use crate::core::launcher_meta;
use crate::core::matrix::{self, MatrixInputs};
use crate::core::maven::MavenRepository;
use crate::core::publish::{put_many, Document, DocumentSink};
use crate::core::source::{ArtifactSource, DescriptorSource, ManifestSource};
use crate::core::version::MojangManifest;

/// Timestamp format of launch profiles (`2022-07-01T12:00:00+0000`).
const PROFILE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Everything a successful run produced, not yet published.
#[derive(Debug)]
pub struct RunOutput {
    /// Pretty-printed `v3/versions` document.
    pub index: String,
    pub documents: BTreeMap<String, Document>,
}

pub struct Pipeline {
    config: MetaConfig,
    artifacts: Arc<dyn ArtifactSource>,
    descriptors: Arc<dyn DescriptorSource>,
    manifest: Arc<dyn ManifestSource>,
}

impl Pipeline {
    pub fn new(
        config: MetaConfig,
        artifacts: Arc<dyn ArtifactSource>,
        descriptors: Arc<dyn DescriptorSource>,
        manifest: Arc<dyn ManifestSource>,
    ) -> Self {
        Self {
            config,
            artifacts,
            descriptors,
            manifest,
        }
    }

    /// Pipeline backed by the configured Maven repository and game manifest.
    pub fn from_config(config: MetaConfig) -> MetaResult<Self> {
        config.validate()?;

        let client = build_http_client(&config.user_agent)?;
        let repository = Arc::new(MavenRepository::new(&config.maven_url, client.clone()));
        let manifest = Arc::new(MojangManifest::new(&config.manifest_url, client));

        Ok(Self::new(config, repository.clone(), repository, manifest))
    }

    pub fn config(&self) -> &MetaConfig {
        &self.config
    }

    /// Compute every document for one run without publishing anything.
    pub async fn run(&self, started_at: DateTime<Utc>) -> MetaResult<RunOutput> {
        self.config.validate()?;

        let run = RunContext::new();
        let ctx = CollectContext {
            artifacts: self.artifacts.as_ref(),
            manifest: self.manifest.as_ref(),
            run: &run,
        };

        let mapping_versions = MappingVersionsCollector::new(self.config.mappings());
        let mappings = MappingsCollector::new(self.config.mappings());
        let installer = InstallerCollector::new(self.config.installer());
        let intermediary = IntermediaryCollector::new(self.config.intermediary());
        let loader = LoaderCollector::new(self.config.loader());

        let loader_chain = async {
            let stage = loader.collect(ctx).await?;
            launcher_meta::fetch_all(
                self.descriptors.as_ref(),
                &stage,
                self.artifacts.repository_url(),
            )
            .await
        };

        let ((), (), (), (), launcher_meta) = tokio::try_join!(
            mapping_versions.collect(ctx),
            mappings.collect(ctx),
            installer.collect(ctx),
            intermediary.collect(ctx),
            loader_chain,
        )?;

        info!("Building loader matrix");

        let timestamp = started_at.format(PROFILE_TIME_FORMAT).to_string();
        let results = &run.results;
        matrix::join(
            &MatrixInputs {
                game: results.game()?,
                intermediary: results.intermediary()?,
                loader: results.loader()?,
                launcher_meta: &launcher_meta,
                toolchain: &self.config.toolchain,
                repository_url: self.artifacts.repository_url(),
                timestamp: &timestamp,
            },
            &run.tree,
        )?;

        let versions = results.versions_index()?;
        run.tree.put_json("v3/versions", &versions)?;
        run.tree.put_json("v3/versions/game", versions.game)?;
        let index = serde_json::to_string_pretty(&versions)?;

        info!("Run produced {} documents", run.tree.len());
        Ok(RunOutput {
            index,
            documents: run.into_documents(),
        })
    }

    /// Run and publish to `sink`.
    pub async fn publish(&self, sink: &dyn DocumentSink) -> MetaResult<String> {
        let output = self.run(Utc::now()).await?;
        put_many(sink, &output.documents, self.config.upload_concurrency).await?;
        Ok(output.index)
    }

    /// One request-response invocation: the `v3/versions` document on
    /// success, a `{"message": ...}` envelope on failure.
    pub async fn invoke(&self, sink: &dyn DocumentSink) -> InvocationResponse {
        let run_id = Uuid::new_v4();
        let span = info_span!("run", run_id = %run_id);

        async {
            info!("Starting metadata run");
            match self.publish(sink).await {
                Ok(index) => {
                    info!("Done updating files");
                    InvocationResponse::ok(index)
                }
                Err(e) => {
                    error!("Run failed: {}", e);
                    InvocationResponse::failure(&e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use chrono::TimeZone;
    use serde_json::{json, Value};

    use super::*;
    use crate::core::publish::testing::MemorySink;
    use crate::core::source::testing::{FakeManifest, FakeRepository};

    fn repository() -> FakeRepository {
        FakeRepository::default()
            .with_versions("yarn", &["1.19+build.2", "1.19+build.1", "1.18+build.7"])
            .with_versions("intermediary", &["1.19", "1.18"])
            .with_versions("quilt-loader", &["0.17.1", "0.17.0"])
            .with_versions("quilt-installer", &["0.4.1"])
            .with_descriptor(
                "org.quiltmc:quilt-loader:0.17.1",
                json!({
                    "version": 1,
                    "libraries": {"common": [{"name": "org.ow2.asm:asm:9.3"}], "client": [], "server": []},
                    "mainClass": {"client": "KnotClient", "server": "KnotServer"}
                }),
            )
            .with_descriptor(
                "org.quiltmc:quilt-loader:0.17.0",
                json!({
                    "version": 1,
                    "libraries": {"common": []},
                    "mainClass": "KnotClient"
                }),
            )
    }

    fn manifest() -> FakeManifest {
        FakeManifest::of(&[("1.20", "release"), ("1.19", "release"), ("1.18", "snapshot")])
    }

    fn pipeline(repo: FakeRepository) -> (Pipeline, Arc<FakeRepository>) {
        let repo = Arc::new(repo);
        let pipeline = Pipeline::new(
            MetaConfig::default(),
            repo.clone(),
            repo.clone(),
            Arc::new(manifest()),
        );
        (pipeline, repo)
    }

    fn started_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 7, 1, 12, 30, 0).unwrap()
    }

    fn json_doc(output: &RunOutput, path: &str) -> Value {
        serde_json::from_slice(&output.documents[path].bytes).unwrap()
    }

    #[tokio::test]
    async fn full_run_produces_the_document_tree() {
        let (pipeline, repo) = pipeline(repository());

        let output = pipeline.run(started_at()).await.unwrap();

        let expected_paths = [
            "v3/versions",
            "v3/versions/game",
            "v3/versions/game/yarn",
            "v3/versions/game/intermediary",
            "v3/versions/yarn",
            "v3/versions/yarn/1.19",
            "v3/versions/yarn/1.18",
            "v3/versions/intermediary",
            "v3/versions/intermediary/1.19",
            "v3/versions/intermediary/1.18",
            "v3/versions/loader",
            "v3/versions/installer",
            "v3/versions/loader/1.19",
            "v3/versions/loader/1.18",
            "v3/versions/loader/1.19/0.17.1",
            "v3/versions/loader/1.19/0.17.0",
            "v3/versions/loader/1.18/0.17.1",
            "v3/versions/loader/1.18/0.17.0",
            "v3/versions/loader/1.19/0.17.1/profile/json",
            "v3/versions/loader/1.19/0.17.1/server/json",
            "v3/versions/loader/1.19/0.17.0/profile/json",
            "v3/versions/loader/1.19/0.17.0/server/json",
            "v3/versions/loader/1.18/0.17.1/profile/json",
            "v3/versions/loader/1.18/0.17.1/server/json",
            "v3/versions/loader/1.18/0.17.0/profile/json",
            "v3/versions/loader/1.18/0.17.0/server/json",
        ];
        for path in expected_paths {
            assert!(output.documents.contains_key(path), "missing {path}");
        }
        assert_eq!(output.documents.len(), expected_paths.len());
        assert_eq!(repo.descriptor_fetches.load(Ordering::SeqCst), 2);

        let index: Value = serde_json::from_str(&output.index).unwrap();
        let keys: Vec<_> = index.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["game", "mappings", "intermediary", "loader", "installer"]);
        assert_eq!(index, json_doc(&output, "v3/versions"));
        assert_eq!(index["game"], json_doc(&output, "v3/versions/game"));
        assert_eq!(index["mappings"][0]["gameVersion"], "1.19");

        let profile = json_doc(&output, "v3/versions/loader/1.19/0.17.1/profile/json");
        assert_eq!(profile["id"], "quilt-loader-0.17.1-1.19");
        assert_eq!(profile["time"], "2022-07-01T12:30:00+0000");
        assert_eq!(profile["mainClass"], "KnotClient");

        let single_main = json_doc(&output, "v3/versions/loader/1.19/0.17.0/server/json");
        assert!(single_main.get("mainClass").is_none());
    }

    #[tokio::test]
    async fn documents_are_pretty_printed_json() {
        let (pipeline, _) = pipeline(repository());
        let output = pipeline.run(started_at()).await.unwrap();

        let doc = &output.documents["v3/versions/game"];
        assert_eq!(doc.content_type, "application/json");
        assert_eq!(
            String::from_utf8(doc.bytes.clone()).unwrap(),
            "[\n  {\n    \"version\": \"1.19\",\n    \"stable\": true\n  },\n  {\n    \"version\": \"1.18\",\n    \"stable\": false\n  }\n]"
        );
    }

    #[tokio::test]
    async fn reruns_are_identical_apart_from_timestamps() {
        let (pipeline, _) = pipeline(repository());

        let first = pipeline.run(started_at()).await.unwrap();
        let second = pipeline.run(started_at()).await.unwrap();
        assert_eq!(first.documents, second.documents);

        let later = pipeline
            .run(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
            .await
            .unwrap();
        for (path, doc) in &first.documents {
            if path.ends_with("/json") {
                assert_ne!(doc, &later.documents[path]);
            } else {
                assert_eq!(doc, &later.documents[path], "{path} changed");
            }
        }
    }

    #[tokio::test]
    async fn descriptor_failure_publishes_nothing() {
        let mut repo = repository();
        repo.descriptors.remove("org.quiltmc:quilt-loader:0.17.0");
        let (pipeline, _) = pipeline(repo);
        let sink = MemorySink::default();

        let response = pipeline.invoke(&sink).await;

        assert_eq!(response.status, 500);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("org.quiltmc:quilt-loader:0.17.0"));
        assert!(sink.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn incomplete_main_class_aborts_the_run() {
        let repo = repository().with_descriptor(
            "org.quiltmc:quilt-loader:0.17.1",
            json!({
                "libraries": {"common": []},
                "mainClass": {"client": "KnotClient"}
            }),
        );
        let (pipeline, _) = pipeline(repo);
        let sink = MemorySink::default();

        let response = pipeline.invoke(&sink).await;

        assert_eq!(response.status, 500);
        assert!(response.body.contains("mainClass.server"));
        assert!(sink.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unavailable_source_aborts_the_run() {
        let (pipeline, _) = pipeline(repository().unavailable("quilt-installer"));
        let sink = MemorySink::default();

        let response = pipeline.invoke(&sink).await;

        assert_eq!(response.status, 500);
        assert!(response.body.contains("Failed to load"));
        assert!(sink.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn successful_invocation_publishes_everything() {
        let (pipeline, _) = pipeline(repository());
        let sink = MemorySink::default();

        let response = pipeline.invoke(&sink).await;

        assert_eq!(response.status, 200);
        let stored = sink.stored.lock().unwrap();
        assert_eq!(stored.len(), 26);
        let index: Value = serde_json::from_slice(&stored["v3/versions"].bytes).unwrap();
        assert_eq!(index, serde_json::from_str::<Value>(&response.body).unwrap());
    }

    #[tokio::test]
    async fn publish_failure_is_reported() {
        let (pipeline, _) = pipeline(repository());
        let sink = MemorySink {
            reject: vec!["v3/versions/installer".into()],
            ..MemorySink::default()
        };

        let response = pipeline.invoke(&sink).await;

        assert_eq!(response.status, 500);
        assert!(response.body.contains("v3/versions/installer"));
    }
}
