//! Config Service - template expansion and artifact writing.
//!
//! Workflow:
//! 1. Load the catalog for the requested format
//! 2. Render every template against one `RenderContext`, in memory
//! 3. Write the artifact set under the deployment root
//!
//! Nothing touches the filesystem until every template has rendered, so a
//! catalog/context mismatch never leaves a half-written configures directory.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CatalogStore, Filesystem, TemplateRenderer},
    },
    domain::{
        ArtifactSet, DeploymentParameters, GeneratedArtifact, RenderContext, SERVICE_REGISTRY,
        configures_dir,
    },
    error::DeployResult,
};

/// Renders the configuration catalog and writes the artifacts.
pub struct ConfigService {
    store: Box<dyn CatalogStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ConfigService {
    pub fn new(
        store: Box<dyn CatalogStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Expand and write. Returns what was written.
    pub fn generate(&self, params: &DeploymentParameters) -> DeployResult<ArtifactSet> {
        let artifacts = self.expand(params)?;
        self.write(&artifacts)?;
        Ok(artifacts)
    }

    /// Render every catalog template for the selected format.
    ///
    /// Artifacts are ordered by owning service, then by the order the
    /// service lists its templates.
    #[instrument(
        skip_all,
        fields(format = %params.format(), root = %params.deploy_root().display())
    )]
    pub fn expand(&self, params: &DeploymentParameters) -> DeployResult<ArtifactSet> {
        let catalog = self.store.catalog(params.format())?;
        catalog.validate()?;

        let context = RenderContext::from_parameters(params);
        let output_dir = configures_dir();
        let mut artifacts = ArtifactSet::new(params.deploy_root());

        for service in SERVICE_REGISTRY {
            for template in catalog.for_service(service) {
                let content = self.renderer.render(template, &context)?;
                debug!(
                    template = %template.filename(),
                    owner = service.name,
                    bytes = content.len(),
                    "Template rendered"
                );
                artifacts.push(GeneratedArtifact::new(
                    output_dir.join(template.filename()),
                    content,
                ));
            }
        }

        artifacts.validate()?;
        info!(artifacts = artifacts.len(), "Catalog expanded");
        Ok(artifacts)
    }

    /// Write an expanded artifact set, overwriting existing files.
    #[instrument(skip_all, fields(root = %artifacts.root().display()))]
    pub fn write(&self, artifacts: &ArtifactSet) -> DeployResult<()> {
        let root = artifacts.root();
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::DeployRootMissing {
                path: root.to_path_buf(),
            }
            .into());
        }

        for artifact in artifacts.iter() {
            let path = root.join(&artifact.path);
            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &artifact.content)?;
            debug!(path = %path.display(), "Artifact written");
        }

        info!(artifacts = artifacts.len(), "Artifacts written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use mockall::predicate::*;

    use super::*;
    use crate::application::ports::{MockCatalogStore, MockFilesystem, MockTemplateRenderer};
    use crate::application::services::fixtures;
    use crate::domain::{ConfigFormat, DomainError, Validator};
    use crate::error::DeployError;

    fn store_for(format: ConfigFormat) -> Box<MockCatalogStore> {
        let mut store = MockCatalogStore::new();
        store
            .expect_catalog()
            .returning(move |_| Ok(fixtures::catalog(format)));
        Box::new(store)
    }

    fn substituting_renderer() -> Box<MockTemplateRenderer> {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|template, context| {
            Ok(context.render(template)?)
        });
        Box::new(renderer)
    }

    #[test]
    fn expand_renders_all_six_templates_without_io() {
        let params = Validator::validate(&fixtures::raw("/deploy")).unwrap();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let service = ConfigService::new(
            store_for(ConfigFormat::Ini),
            substituting_renderer(),
            Box::new(fs),
        );
        let artifacts = service.expand(&params).unwrap();

        let paths: Vec<_> = artifacts.iter().map(|a| a.path.clone()).collect();
        let dir = PathBuf::from("cmdb_adminserver/configures");
        assert_eq!(
            paths,
            [
                dir.join("redis.conf"),
                dir.join("mongodb.conf"),
                dir.join("common.conf"),
                dir.join("extra.conf"),
                dir.join("migrate.conf"),
                dir.join("crypto.conf"),
            ]
        );
        let redis = artifacts.get(dir.join("redis.conf")).unwrap();
        assert_eq!(redis.content, "host = 10.0.0.2:6379\n");
    }

    #[test]
    fn yaml_catalog_uses_yaml_extension() {
        let raw = fixtures::raw("/deploy").with("config_format", "yaml");
        let params = Validator::validate(&raw).unwrap();
        let service = ConfigService::new(
            store_for(ConfigFormat::Yaml),
            substituting_renderer(),
            Box::new(MockFilesystem::new()),
        );
        let artifacts = service.expand(&params).unwrap();
        assert!(
            artifacts
                .iter()
                .all(|a| a.path.extension().is_some_and(|ext| ext == "yaml"))
        );
    }

    #[test]
    fn render_failure_aborts_before_any_write() {
        let params = Validator::validate(&fixtures::raw("/deploy")).unwrap();
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|template, _| {
            Err(DomainError::UnresolvedPlaceholder {
                template: template.filename(),
                placeholder: "REDIS_ADDR".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_is_dir().returning(|_| true);

        let service =
            ConfigService::new(store_for(ConfigFormat::Ini), Box::new(renderer), Box::new(fs));
        let err = service.generate(&params).unwrap_err();
        assert!(matches!(
            err,
            DeployError::Domain(DomainError::UnresolvedPlaceholder { .. })
        ));
    }

    #[test]
    fn write_creates_configures_dir_and_overwrites() {
        let params = Validator::validate(&fixtures::raw("/deploy")).unwrap();
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .with(eq(Path::new("/deploy")))
            .returning(|_| true);
        fs.expect_create_dir_all()
            .with(eq(Path::new("/deploy/cmdb_adminserver/configures")))
            .times(6)
            .returning(|_| Ok(()));
        fs.expect_write_file().times(6).returning(|_, _| Ok(()));
        fs.expect_set_permissions().never();

        let service = ConfigService::new(
            store_for(ConfigFormat::Ini),
            substituting_renderer(),
            Box::new(fs),
        );
        let written = service.generate(&params).unwrap();
        assert_eq!(written.len(), 6);
    }

    #[test]
    fn missing_deploy_root_is_reported() {
        let params = Validator::validate(&fixtures::raw("/nowhere")).unwrap();
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_write_file().never();

        let service = ConfigService::new(
            store_for(ConfigFormat::Ini),
            substituting_renderer(),
            Box::new(fs),
        );
        let err = service.generate(&params).unwrap_err();
        assert!(matches!(
            err,
            DeployError::Application(ApplicationError::DeployRootMissing { .. })
        ));
    }

    #[test]
    fn write_error_is_fatal() {
        let params = Validator::validate(&fixtures::raw("/deploy")).unwrap();
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

        let service = ConfigService::new(
            store_for(ConfigFormat::Ini),
            substituting_renderer(),
            Box::new(fs),
        );
        assert!(service.generate(&params).is_err());
    }
}
