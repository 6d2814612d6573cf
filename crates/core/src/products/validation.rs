//! Product Validation
//!
//! Every rule is checked and every failure collected, so an admin form can highlight all the
//! offending fields at once. Messages are user-facing and in Spanish.

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    products::{
        ProductDraft,
        categories::{Categories, normalize},
        images::{MAX_IMAGES, ProductImage},
    },
    weights::Weight,
};

/// The product field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    /// `name`
    Name,

    /// `description`
    Description,

    /// `pricePerKilo`
    PricePerKilo,

    /// `tiers`
    Tiers,

    /// `tiers[i].weight`
    TierWeight(usize),

    /// `tiers[i].stock`
    TierStock(usize),

    /// `images`
    Images,

    /// `discount`
    Discount,

    /// `category`
    Category,

    /// `categories`
    Categories,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductField::Name => f.write_str("name"),
            ProductField::Description => f.write_str("description"),
            ProductField::PricePerKilo => f.write_str("pricePerKilo"),
            ProductField::Tiers => f.write_str("tiers"),
            ProductField::TierWeight(index) => write!(f, "tiers[{index}].weight"),
            ProductField::TierStock(index) => write!(f, "tiers[{index}].stock"),
            ProductField::Images => f.write_str("images"),
            ProductField::Discount => f.write_str("discount"),
            ProductField::Category => f.write_str("category"),
            ProductField::Categories => f.write_str("categories"),
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is blank.
    #[error("El nombre es obligatorio")]
    MissingName,

    /// Description is blank.
    #[error("La descripción es obligatoria")]
    MissingDescription,

    /// Price per kilo is zero or negative.
    #[error("El precio por kilo debe ser mayor a 0")]
    InvalidPricePerKilo(i64),

    /// No tiers were submitted.
    #[error("Debe agregar al menos un formato de peso")]
    NoTiers,

    /// The same weight appears more than once.
    #[error("El formato de {weight} está repetido")]
    DuplicateWeight {
        /// Position of the repeated tier
        index: usize,
        /// The repeated weight
        weight: Weight,
    },

    /// A tier's stock is negative or too large.
    #[error("El stock del formato {} no es válido: {stock}", .index + 1)]
    InvalidStock {
        /// Position of the tier
        index: usize,
        /// Submitted stock
        stock: i64,
    },

    /// No tier has stock.
    #[error("Al menos un formato debe tener stock disponible")]
    NoStock,

    /// No images were submitted.
    #[error("Debe subir al menos una imagen")]
    NoImages,

    /// More than [`MAX_IMAGES`] images were submitted.
    #[error("Se permite un máximo de {max} imágenes (se recibieron {0})", max = MAX_IMAGES)]
    TooManyImages(usize),

    /// Discount outside `0..=100`.
    #[error("El descuento debe estar entre 0 y 100")]
    InvalidDiscount(i64),

    /// No canonical category and no category list.
    #[error("La categoría es obligatoria")]
    MissingCategory,

    /// A category list was sent but it is empty.
    #[error("Debe seleccionar al menos una categoría")]
    EmptyCategories,

    /// A category list entry is blank.
    #[error("Las categorías no pueden estar vacías")]
    BlankCategory(usize),
}

impl ValidationError {
    /// Field the failure refers to.
    pub fn field(&self) -> ProductField {
        match self {
            ValidationError::MissingName => ProductField::Name,
            ValidationError::MissingDescription => ProductField::Description,
            ValidationError::InvalidPricePerKilo(_) => ProductField::PricePerKilo,
            ValidationError::NoTiers | ValidationError::NoStock => ProductField::Tiers,
            ValidationError::DuplicateWeight { index, .. } => ProductField::TierWeight(*index),
            ValidationError::InvalidStock { index, .. } => ProductField::TierStock(*index),
            ValidationError::NoImages | ValidationError::TooManyImages(_) => ProductField::Images,
            ValidationError::InvalidDiscount(_) => ProductField::Discount,
            ValidationError::MissingCategory => ProductField::Category,
            ValidationError::EmptyCategories | ValidationError::BlankCategory(_) => {
                ProductField::Categories
            }
        }
    }
}

/// Every failure found in a product submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(SmallVec<[ValidationError; 4]>);

impl ValidationErrors {
    /// Individual failures, in the order the fields were checked.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// `(field, message)` pairs for form display.
    pub fn field_messages(&self) -> Vec<(ProductField, String)> {
        self.0
            .iter()
            .map(|error| (error.field(), error.to_string()))
            .collect()
    }

    /// Whether a failure of the given kind was reported.
    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    /// Whether any failure refers to `field`.
    pub fn has_field(&self, field: ProductField) -> bool {
        self.0.iter().any(|error| error.field() == field)
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no failures were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(smallvec::smallvec![error])
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {error}", error.field()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A draft that passed validation, with every value in its stored type.
#[derive(Debug, Clone)]
pub(crate) struct ValidDraft {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) price_per_kilo: u64,
    pub(crate) tiers: SmallVec<[(Weight, u32); 4]>,
    pub(crate) images: Vec<ProductImage>,
    pub(crate) discount: u8,
    pub(crate) categories: Categories,
}

/// Check a draft against every product rule.
pub(crate) fn validate(draft: ProductDraft) -> Result<ValidDraft, ValidationErrors> {
    let mut errors = SmallVec::<[ValidationError; 4]>::new();

    let ProductDraft {
        name,
        description,
        price_per_kilo,
        tiers,
        images,
        discount,
        category,
        categories,
    } = draft;

    if name.trim().is_empty() {
        errors.push(ValidationError::MissingName);
    }

    if description.trim().is_empty() {
        errors.push(ValidationError::MissingDescription);
    }

    let price_per_kilo = match u64::try_from(price_per_kilo) {
        Ok(price) if price > 0 => price,
        _ => {
            errors.push(ValidationError::InvalidPricePerKilo(price_per_kilo));
            0
        }
    };

    let mut valid_tiers = SmallVec::<[(Weight, u32); 4]>::new();
    let mut seen = FxHashSet::default();

    if tiers.is_empty() {
        errors.push(ValidationError::NoTiers);
    }

    for (index, tier) in tiers.iter().enumerate() {
        if !seen.insert(tier.weight) {
            errors.push(ValidationError::DuplicateWeight {
                index,
                weight: tier.weight,
            });
        }

        match u32::try_from(tier.stock) {
            Ok(stock) => valid_tiers.push((tier.weight, stock)),
            Err(_) => errors.push(ValidationError::InvalidStock {
                index,
                stock: tier.stock,
            }),
        }
    }

    if !tiers.is_empty() && !valid_tiers.iter().any(|(_, stock)| *stock > 0) {
        errors.push(ValidationError::NoStock);
    }

    if images.is_empty() {
        errors.push(ValidationError::NoImages);
    } else if images.len() > MAX_IMAGES {
        errors.push(ValidationError::TooManyImages(images.len()));
    }

    let discount = match u8::try_from(discount) {
        Ok(discount) if discount <= 100 => discount,
        _ => {
            errors.push(ValidationError::InvalidDiscount(discount));
            0
        }
    };

    let categories = match categories {
        Some(list) if list.is_empty() => {
            errors.push(ValidationError::EmptyCategories);
            Categories::new()
        }
        Some(list) => {
            for (index, entry) in list.iter().enumerate() {
                if entry.trim().is_empty() {
                    errors.push(ValidationError::BlankCategory(index));
                }
            }

            normalize(&list)
        }
        None if category.trim().is_empty() => {
            errors.push(ValidationError::MissingCategory);
            Categories::new()
        }
        None => normalize([category]),
    };

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(ValidDraft {
        name: name.trim().to_string(),
        description: description.trim().to_string(),
        price_per_kilo,
        tiers: valid_tiers,
        images,
        discount,
        categories,
    })
}
