use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    assets::decode::{PreparedImage, decode_image, decode_mask},
    catalog::{
        product::ProductKind,
        template::{ClipSpec, TemplateCatalog, TemplateSpec},
    },
    clip::strategy::{ClipStrategy, Coverage},
    foundation::error::{MockupError, MockupResult},
    render::raster::Rasterizer,
};

/// Where the user's design comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// Read and decode the user's design. Any failure is an image-load error.
#[tracing::instrument(level = "debug", skip(source))]
pub fn load_source(source: &ImageSource) -> MockupResult<Arc<PreparedImage>> {
    let image = match source {
        ImageSource::Bytes(bytes) => decode_image(bytes)?,
        ImageSource::Path(path) => {
            let bytes = read_file(path)?;
            decode_image(&bytes)?
        }
    };
    tracing::debug!(
        width = image.width,
        height = image.height,
        "loaded source image"
    );
    Ok(Arc::new(image))
}

fn read_file(path: &Path) -> MockupResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| MockupError::image_load(format!("read '{}': {e}", path.display())))
}

/// A template with its background decoded and its clip coverage already rasterized.
#[derive(Clone, Debug)]
pub struct PreparedTemplate {
    pub spec: TemplateSpec,
    pub background: PreparedImage,
    pub clip: ClipStrategy,
    pub coverage: Coverage,
}

impl PreparedTemplate {
    pub fn new(
        spec: TemplateSpec,
        background: PreparedImage,
        mask: Option<PreparedImage>,
    ) -> MockupResult<Self> {
        spec.validate()?;
        let clip = ClipStrategy::for_template(&spec, mask)?;
        let coverage = clip.coverage(spec.canvas, &mut Rasterizer::default())?;
        Ok(Self {
            spec,
            background,
            clip,
            coverage,
        })
    }

    pub fn product(&self) -> ProductKind {
        self.spec.product
    }
}

/// Decoded template assets for every product, loaded once up front so rendering does no IO.
#[derive(Clone, Debug)]
pub struct TemplateAssetStore {
    root: PathBuf,
    templates: BTreeMap<ProductKind, Arc<PreparedTemplate>>,
}

impl TemplateAssetStore {
    /// Load backgrounds and masks for every template in `catalog`, resolving paths under `root`.
    #[tracing::instrument(level = "info", skip(catalog, root))]
    pub fn prepare(catalog: &TemplateCatalog, root: impl Into<PathBuf>) -> MockupResult<Self> {
        let root = root.into();
        catalog.validate()?;

        let mut templates = BTreeMap::new();
        for (kind, spec) in catalog.iter() {
            let bg_path = resolve(&root, &spec.background)?;
            let background = decode_image(&read_file(&bg_path)?).map_err(|e| {
                MockupError::image_load(format!("{kind} background '{}': {e}", spec.background))
            })?;

            let mask = match &spec.clip {
                ClipSpec::Mask { source, .. } => {
                    let bytes = read_file(&resolve(&root, source)?)?;
                    Some(decode_mask(&bytes, spec.canvas)?)
                }
                ClipSpec::Polygon { .. } => None,
            };

            let prepared = PreparedTemplate::new(spec.clone(), background, mask)?;
            tracing::debug!(product = %kind, "prepared template");
            templates.insert(kind, Arc::new(prepared));
        }

        Ok(Self { root, templates })
    }

    /// Build a store from in-memory templates; the root is left empty.
    pub fn from_parts(templates: impl IntoIterator<Item = PreparedTemplate>) -> Self {
        Self {
            root: PathBuf::new(),
            templates: templates
                .into_iter()
                .map(|t| (t.product(), Arc::new(t)))
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, kind: ProductKind) -> MockupResult<&PreparedTemplate> {
        self.templates
            .get(&kind)
            .map(Arc::as_ref)
            .ok_or_else(|| MockupError::validation(format!("no template prepared for {kind}")))
    }

    pub fn products(&self) -> impl Iterator<Item = ProductKind> + '_ {
        self.templates.keys().copied()
    }
}

fn resolve(root: &Path, rel: &str) -> MockupResult<PathBuf> {
    let norm = normalize_rel_path(rel)?;
    Ok(root.join(Path::new(&norm)))
}

/// Normalize a template-relative asset path to `a/b/c` form.
///
/// Rejects absolute paths, `..` segments, and paths with no file name.
pub fn normalize_rel_path(source: &str) -> MockupResult<String> {
    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(MockupError::validation("template asset path must be non-empty"));
    }
    if s.starts_with('/') {
        return Err(MockupError::validation(format!(
            "template asset path '{source}' must be relative"
        )));
    }

    let parts = s
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .map(|part| {
            if part == ".." {
                Err(MockupError::validation(format!(
                    "template asset path '{source}' must not contain '..'"
                )))
            } else {
                Ok(part)
            }
        })
        .collect::<MockupResult<Vec<_>>>()?;

    if parts.is_empty() {
        return Err(MockupError::validation(format!(
            "template asset path '{source}' must contain a file name"
        )));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
