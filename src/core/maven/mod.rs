mod artifact;
mod metadata;
mod repository;

pub use artifact::{Coordinate, MavenArtifact};
pub use metadata::MavenMetadata;
pub use repository::MavenRepository;

/// Public Quilt release repository.
pub const QUILT_MAVEN: &str = "https://maven.quiltmc.org/repository/release";
