// ─── Quilt Meta Core ───
// Version-matrix aggregation: reads the Maven listings and the game manifest,
// joins them, and publishes the v3/versions document tree.
//
// Architecture:
//   core/
//     maven/         — Coordinates, maven-metadata.xml, repository client
//     version/       — Game manifest + version string normalization
//     source         — Collaborator traits (artifacts, descriptors, manifest)
//     records        — Published record shapes + v3/versions index
//     collectors/    — One collector per category, run concurrently
//     launcher_meta/ — Loader descriptor fan-out
//     matrix/        — Game × loader join + launch profiles
//     publish/       — Artifact tree, directory and HTTP sinks
//     pipeline/      — Run orchestration + invocation response
//     config, http, error

pub mod collectors;
pub mod config;
pub mod error;
pub mod http;
pub mod launcher_meta;
pub mod matrix;
pub mod maven;
pub mod pipeline;
pub mod publish;
pub mod records;
pub mod source;
pub mod version;
