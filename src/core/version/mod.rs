pub mod manifest;
pub mod normalize;

pub use manifest::{ManifestEntry, MojangManifest, VersionManifest, MANIFEST_URL};
pub use normalize::{NormalizedVersion, BUILD_SEPARATOR};
