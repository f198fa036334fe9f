// batch.rs
use crate::domain::{Locale, Property};
use crate::linear::RawListing;
use crate::mapper::LinearMapper;
use crate::normalize::{slug_base, SlugRegistry};
use crate::TARGET_MAPPER;
use std::collections::HashSet;
use std::thread;
use tracing::{debug, info};

/// Map a batch on `workers` threads.
///
/// Each worker maps one contiguous chunk with its own mapper seeded from
/// `registry`. The records are then walked in input order and every slug is
/// adopted into the merged registry; a slug already used earlier in the batch
/// or held by another listing is re-issued. The result keeps the batch-wide
/// uniqueness of sequential mapping. Returns the records in input order
/// together with the merged registry.
pub fn map_parallel(
    listings: &[RawListing],
    locale: Locale,
    workers: usize,
    registry: SlugRegistry,
) -> (Vec<Property>, SlugRegistry) {
    if workers <= 1 || listings.len() <= 1 {
        let mut mapper = LinearMapper::with_registry(registry);
        let properties = mapper.map_all(listings, locale);
        return (properties, mapper.into_registry());
    }

    let chunk_size = listings.len().div_ceil(workers);
    info!(
        target: TARGET_MAPPER,
        "Mapping {} listings on {} workers ({} per chunk)",
        listings.len(),
        workers,
        chunk_size
    );

    let mut properties: Vec<Property> = thread::scope(|scope| {
        let handles: Vec<_> = listings
            .chunks(chunk_size)
            .map(|chunk| {
                let seed = registry.clone();
                scope.spawn(move || LinearMapper::with_registry(seed).map_all(chunk, locale))
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut merged = registry;
    let mut used = HashSet::with_capacity(properties.len());

    for (position, property) in properties.iter_mut().enumerate() {
        let base = slug_base(&property.address);
        let postal = Some(property.postal_code.as_str()).filter(|p| !p.is_empty());

        let kept = !used.contains(&property.slug)
            && merged.adopt(&property.id, &property.slug, &base, postal);
        if !kept {
            let slug = merged.reserve_new(&property.id, &base, postal);
            debug!(
                target: TARGET_MAPPER,
                position,
                id = %property.id,
                from = %property.slug,
                to = %slug,
                "Slug reassigned after merge"
            );
            property.slug = slug;
        }
        used.insert(property.slug.clone());
    }

    (properties, merged)
}
