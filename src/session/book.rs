use std::collections::BTreeMap;

use crate::{
    catalog::{product::ProductKind, template::TemplateCatalog},
    foundation::core::{ImageSize, Placement},
    foundation::error::{MockupError, MockupResult},
    layout::{
        autofit::EditorNudge,
        gesture::{Gesture, apply_user_transform},
    },
};

/// Per-product placements for one editing session.
///
/// Each product owns an independent entry; adjusting one never touches another.
#[derive(Clone, Debug, Default)]
pub struct PlacementBook {
    source: Option<ImageSize>,
    nudge: EditorNudge,
    active: ProductKind,
    placements: BTreeMap<ProductKind, Placement>,
}

impl PlacementBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with a new source image. Prior fits were computed for other pixels and are
    /// dropped.
    pub fn set_source(&mut self, size: ImageSize) -> MockupResult<()> {
        size.aspect()?;
        self.source = Some(size);
        self.placements.clear();
        Ok(())
    }

    pub fn source(&self) -> Option<ImageSize> {
        self.source
    }

    /// Editor offset applied to placements auto-fitted from now on.
    pub fn set_nudge(&mut self, nudge: EditorNudge) {
        self.nudge = nudge;
    }

    pub fn nudge(&self) -> EditorNudge {
        self.nudge
    }

    pub fn select(&mut self, kind: ProductKind) {
        self.active = kind;
    }

    pub fn active(&self) -> ProductKind {
        self.active
    }

    pub fn get(&self, kind: ProductKind) -> Option<&Placement> {
        self.placements.get(&kind)
    }

    /// Stored placement for `kind`, auto-fitting it on first access.
    pub fn ensure(&mut self, catalog: &TemplateCatalog, kind: ProductKind) -> MockupResult<Placement> {
        if let Some(p) = self.placements.get(&kind) {
            return Ok(*p);
        }
        let source = self
            .source
            .ok_or_else(|| MockupError::validation("no source image loaded"))?;
        let fitted = catalog.get(kind).auto_fit(source, self.nudge)?;
        self.placements.insert(kind, fitted);
        Ok(fitted)
    }

    pub fn adjust(
        &mut self,
        catalog: &TemplateCatalog,
        kind: ProductKind,
        gesture: Gesture,
    ) -> MockupResult<Placement> {
        let current = self.ensure(catalog, kind)?;
        let next = apply_user_transform(current, gesture);
        next.validate()?;
        self.placements.insert(kind, next);
        Ok(next)
    }

    pub fn adjust_active(
        &mut self,
        catalog: &TemplateCatalog,
        gesture: Gesture,
    ) -> MockupResult<Placement> {
        self.adjust(catalog, self.active, gesture)
    }

    /// Forget the stored placement so the next access auto-fits again.
    pub fn reset(&mut self, kind: ProductKind) -> Option<Placement> {
        self.placements.remove(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductKind, &Placement)> {
        self.placements.iter().map(|(k, v)| (*k, v))
    }

    /// Placements for every product, auto-fitting the ones never touched.
    pub fn snapshot_all(
        &mut self,
        catalog: &TemplateCatalog,
    ) -> MockupResult<BTreeMap<ProductKind, Placement>> {
        let mut out = BTreeMap::new();
        for kind in ProductKind::ALL {
            out.insert(kind, self.ensure(catalog, kind)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/book.rs"]
mod tests;
