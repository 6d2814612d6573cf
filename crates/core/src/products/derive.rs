//! Product Derivation

use tracing::debug;

use crate::{
    pricing::tier_price,
    products::{
        Product, ProductDraft, ProductPatch, WeightTier,
        images::primary_image,
        validation::{ValidationError, ValidationErrors, validate},
    },
};

/// Validate a draft and compute every derived field.
///
/// # Errors
///
/// Returns [`ValidationErrors`] listing every rejected field. Nothing is derived when any rule
/// fails.
pub fn derive(draft: ProductDraft) -> Result<Product, ValidationErrors> {
    let valid = validate(draft)?;

    let tiers: Vec<WeightTier> = valid
        .tiers
        .iter()
        .map(|&(weight, stock)| {
            WeightTier::new(weight, tier_price(valid.price_per_kilo, weight), stock)
        })
        .collect();

    let total_stock = tiers.iter().map(|tier| u64::from(tier.stock())).sum();

    let primary_image_url = primary_image(&valid.images)
        .map(|image| image.url.clone())
        .ok_or(ValidationError::NoImages)?;

    let category = valid
        .categories
        .first()
        .cloned()
        .ok_or(ValidationError::MissingCategory)?;

    debug!(
        name = %valid.name,
        price_per_kilo = valid.price_per_kilo,
        total_stock,
        tiers = tiers.len(),
        "derived product"
    );

    Ok(Product {
        name: valid.name,
        description: valid.description,
        price_per_kilo: valid.price_per_kilo,
        tiers,
        total_stock,
        images: valid.images,
        primary_image_url,
        discount: valid.discount,
        category,
        categories: valid.categories,
    })
}

/// Overlay a patch on an existing product, producing the draft to derive from.
///
/// Derived fields of `existing` are discarded; they are recomputed from the merged inputs. A
/// patch that sets `category` without `categories` replaces the memberships with that single
/// category.
pub fn merge(existing: &Product, patch: ProductPatch) -> ProductDraft {
    let mut draft = ProductDraft::from(existing);

    let ProductPatch {
        name,
        description,
        price_per_kilo,
        tiers,
        images,
        discount,
        category,
        categories,
    } = patch;

    if let Some(name) = name {
        draft.name = name;
    }

    if let Some(description) = description {
        draft.description = description;
    }

    if let Some(price_per_kilo) = price_per_kilo {
        draft.price_per_kilo = price_per_kilo;
    }

    if let Some(tiers) = tiers {
        draft.tiers = tiers;
    }

    if let Some(images) = images {
        draft.images = images;
    }

    if let Some(discount) = discount {
        draft.discount = discount;
    }

    match (category, categories) {
        (category, Some(categories)) => {
            if let Some(category) = category {
                draft.category = category;
            }

            draft.categories = Some(categories);
        }
        (Some(category), None) => {
            draft.category = category;
            draft.categories = None;
        }
        (None, None) => {}
    }

    draft
}

/// Apply a partial update: merge the patch over `existing`, then derive the result.
///
/// # Errors
///
/// Returns [`ValidationErrors`] when the merged product breaks any product rule.
pub fn update(existing: &Product, patch: ProductPatch) -> Result<Product, ValidationErrors> {
    derive(merge(existing, patch))
}
