use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// A texture or panorama could not be fetched or decoded.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load resource {url}: {reason}")]
pub struct ResourceLoadError {
    pub url: String,
    pub reason: String,
}

impl ResourceLoadError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// The base shading program does not have the shape the augmentor expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShaderAugmentationError {
    #[error("shader template is missing anchor `{0}`")]
    MissingAnchor(String),

    #[error("shader template declares anchor `{0}` more than once")]
    DuplicateAnchor(String),

    #[error("shader template region `{0}` is not terminated")]
    UnterminatedRegion(String),

    #[error("shader template version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
}

#[derive(Debug, thiserror::Error)]
pub enum MarbleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ResourceLoad(#[from] ResourceLoadError),

    #[error(transparent)]
    ShaderAugmentation(#[from] ShaderAugmentationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ValidationError("render.iterations = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: render.iterations = 0"
        );
    }

    #[test]
    fn resource_load_error_carries_url() {
        let err = ResourceLoadError::new("https://example.com/height.jpeg", "HTTP 404");
        assert_eq!(err.url, "https://example.com/height.jpeg");
        assert_eq!(
            err.to_string(),
            "failed to load resource https://example.com/height.jpeg: HTTP 404"
        );
    }

    #[test]
    fn shader_augmentation_error_display() {
        let err = ShaderAugmentationError::MissingAnchor("slot:uniforms".into());
        assert_eq!(
            err.to_string(),
            "shader template is missing anchor `slot:uniforms`"
        );

        let err = ShaderAugmentationError::VersionMismatch {
            expected: "standard-pbr v1".into(),
            found: "standard-pbr v2".into(),
        };
        assert!(err.to_string().contains("standard-pbr v2"));
    }

    #[test]
    fn marble_error_from_variants() {
        let err: MarbleError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, MarbleError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err: MarbleError = ResourceLoadError::new("a.png", "missing").into();
        assert!(matches!(err, MarbleError::ResourceLoad(_)));

        let err: MarbleError = ShaderAugmentationError::DuplicateAnchor("x".into()).into();
        assert!(matches!(err, MarbleError::ShaderAugmentation(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MarbleError = io_err.into();
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn marble_error_renderer_display() {
        let err = MarbleError::Renderer("gpu not found".into());
        assert_eq!(err.to_string(), "renderer error: gpu not found");
    }
}
