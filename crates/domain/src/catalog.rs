//! Catalog model: categories, products and their purchasable variations.

use common::{LineKey, ProductId, VariationId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A product category shown in catalog navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// URL-safe slug, e.g. `"fruit-veg"`.
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One purchasable form of a product, with its own price and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,

    /// Unit shown next to the price, e.g. `"kg"` or `"6 pack"`.
    pub unit_label: String,

    pub price: Money,

    /// Units available to sell.
    pub inventory: u32,

    #[serde(default)]
    pub image: Option<String>,
}

impl Variation {
    pub fn new(
        id: impl Into<VariationId>,
        unit_label: impl Into<String>,
        price: Money,
        inventory: u32,
    ) -> Self {
        Self {
            id: id.into(),
            unit_label: unit_label.into(),
            price,
            inventory,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,

    /// Slug of the owning [`Category`].
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Variations in display order. The first one is the default.
    pub variations: Vec<Variation>,

    /// Unpublished products are hidden from the storefront and cannot be ordered.
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
            variations: Vec::new(),
            published: true,
        }
    }

    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns the variation listed first.
    pub fn default_variation(&self) -> Option<&Variation> {
        self.variations.first()
    }

    pub fn variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| &v.id == id)
    }

    pub fn variation_mut(&mut self, id: &VariationId) -> Option<&mut Variation> {
        self.variations.iter_mut().find(|v| &v.id == id)
    }

    /// Returns true if the product is published and any variation has stock.
    pub fn is_available(&self) -> bool {
        self.published && self.variations.iter().any(Variation::in_stock)
    }

    /// Builds the cart input for one of this product's variations.
    pub fn cart_ref(&self, variation_id: &VariationId) -> Option<ProductRef> {
        self.variation(variation_id)
            .map(|variation| ProductRef::from_catalog(self, variation))
    }
}

/// What the cart needs to know about a product when adding it.
///
/// A read-only copy of catalog data at the time of the add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub product_id: ProductId,
    pub variation_id: VariationId,
    pub name: String,
    pub unit_price: Money,
    pub unit_label: String,

    /// Inventory ceiling for the cart line.
    pub inventory: u32,

    pub image: Option<String>,
}

impl ProductRef {
    /// Creates a reference with unit label `"each"` and no image.
    pub fn new(
        product_id: impl Into<ProductId>,
        variation_id: impl Into<VariationId>,
        name: impl Into<String>,
        unit_price: Money,
        inventory: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            variation_id: variation_id.into(),
            name: name.into(),
            unit_price,
            unit_label: "each".to_string(),
            inventory,
            image: None,
        }
    }

    pub fn from_catalog(product: &Product, variation: &Variation) -> Self {
        Self {
            product_id: product.id.clone(),
            variation_id: variation.id.clone(),
            name: product.name.clone(),
            unit_price: variation.price,
            unit_label: variation.unit_label.clone(),
            inventory: variation.inventory,
            image: variation.image.clone(),
        }
    }

    pub fn with_unit(mut self, unit_label: impl Into<String>) -> Self {
        self.unit_label = unit_label.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.variation_id.clone())
    }
}
