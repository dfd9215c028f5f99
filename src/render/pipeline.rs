use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    assets::{decode::PreparedImage, store::TemplateAssetStore},
    catalog::{config::ExportSettings, product::ProductKind},
    encode::raster::{ExportFormat, encode_frame},
    foundation::core::Placement,
    foundation::error::{MockupError, MockupResult},
    render::compositor::Compositor,
    session::supersede::{LatestFrames, RenderTickets, Ticket},
};

/// Composite and encode one product.
pub fn render_product(
    store: &TemplateAssetStore,
    source: &PreparedImage,
    kind: ProductKind,
    placement: &Placement,
    format: ExportFormat,
) -> MockupResult<Vec<u8>> {
    render_with(&mut Compositor::new(), store, source, kind, placement, format)
}

fn render_with(
    compositor: &mut Compositor,
    store: &TemplateAssetStore,
    source: &PreparedImage,
    kind: ProductKind,
    placement: &Placement,
    format: ExportFormat,
) -> MockupResult<Vec<u8>> {
    let template = store.get(kind)?;
    let frame = compositor.composite(template, source, placement)?;
    encode_frame(&frame, format)
}

/// Render every product in `placements` in parallel, one compositor per worker.
///
/// Fails on the first product that fails; nothing is returned partially.
#[tracing::instrument(level = "info", skip_all, fields(products = placements.len()))]
pub fn render_all(
    store: &TemplateAssetStore,
    source: &PreparedImage,
    placements: &BTreeMap<ProductKind, Placement>,
    settings: &ExportSettings,
) -> MockupResult<BTreeMap<ProductKind, Vec<u8>>> {
    settings.validate()?;
    let pool = build_thread_pool(settings.threads)?;
    let jobs: Vec<(ProductKind, &Placement)> = placements.iter().map(|(k, p)| (*k, p)).collect();

    let rendered = pool.install(|| {
        jobs.par_iter()
            .map_init(Compositor::new, |compositor, (kind, placement)| {
                render_with(compositor, store, source, *kind, placement, settings.format)
                    .map(|bytes| (*kind, bytes))
            })
            .collect::<Vec<_>>()
    });

    let out = rendered.into_iter().collect::<MockupResult<BTreeMap<_, _>>>()?;
    tracing::info!(products = out.len(), "exported mockups");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> MockupResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MockupError::validation(
            "export 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MockupError::render(format!("failed to build rayon thread pool: {e}")))
}

/// Result of an interactive preview render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Encoded bytes, also stored in the [`LatestFrames`] slot for the product.
    Ready(Vec<u8>),
    /// A newer request for the same product was issued while this one was in flight.
    Superseded,
}

/// Render a preview for `ticket`, bailing out as soon as a newer ticket exists.
///
/// The ticket is checked before compositing, before encoding, and once more when the result is
/// offered to `latest`, so a stale raster is never stored.
pub fn render_preview(
    tickets: &RenderTickets,
    latest: &LatestFrames,
    ticket: Ticket,
    store: &TemplateAssetStore,
    source: &PreparedImage,
    placement: &Placement,
    format: ExportFormat,
) -> MockupResult<PreviewOutcome> {
    if !tickets.is_current(&ticket) {
        return Ok(superseded(&ticket));
    }
    let template = store.get(ticket.kind)?;
    let frame = Compositor::new().composite(template, source, placement)?;

    if !tickets.is_current(&ticket) {
        return Ok(superseded(&ticket));
    }
    let bytes = encode_frame(&frame, format)?;

    if latest.offer(tickets, ticket, bytes.clone()) {
        Ok(PreviewOutcome::Ready(bytes))
    } else {
        Ok(superseded(&ticket))
    }
}

fn superseded(ticket: &Ticket) -> PreviewOutcome {
    tracing::debug!(
        product = %ticket.kind,
        generation = ticket.generation,
        "preview superseded"
    );
    PreviewOutcome::Superseded
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
