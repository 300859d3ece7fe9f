//! Product business logic - registration, edits, deletion, and queries.
//!
//! All operations validate their input before touching the state, so a
//! rejected call leaves the aggregate exactly as it was. Duplicate names are
//! deliberately accepted by the engine; [`InventoryEngine::is_name_taken`]
//! exposes duplicate detection so adapters can warn and let the operator
//! decide.

use chrono::Utc;

use crate::{
    core::InventoryEngine,
    entities::product,
    errors::{Error, Result},
};

/// Maximum accepted length of a product name, in characters.
const MAX_NAME_LEN: usize = 100;

/// Requested changes for [`InventoryEngine::edit_product`]. Unset fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    /// New product name
    pub name: Option<String>,
    /// New purchase price per unit
    pub cost_price: Option<f64>,
    /// New selling price per unit
    pub sale_price: Option<f64>,
}

impl ProductUpdate {
    /// Update that only renames the product.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update that only changes the cost price.
    #[must_use]
    pub fn cost_price(value: f64) -> Self {
        Self {
            cost_price: Some(value),
            ..Self::default()
        }
    }

    /// Update that only changes the sale price.
    #[must_use]
    pub fn sale_price(value: f64) -> Self {
        Self {
            sale_price: Some(value),
            ..Self::default()
        }
    }
}

/// Validates a product name, returning the trimmed form.
fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "product name cannot be empty".to_string(),
        });
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Error::Validation {
            message: format!("product name cannot exceed {MAX_NAME_LEN} characters"),
        });
    }
    Ok(trimmed.to_string())
}

/// Validates a cost/sale price pair. The pair is checked as a whole so an
/// edit that changes both prices cannot sneak an inverted pair through
/// field-by-field validation.
fn validate_prices(cost_price: f64, sale_price: f64) -> Result<()> {
    if !cost_price.is_finite() || cost_price < 0.0 {
        return Err(Error::Validation {
            message: format!("cost price must be a non-negative number, got {cost_price}"),
        });
    }
    if !sale_price.is_finite() || sale_price <= cost_price {
        return Err(Error::Validation {
            message: format!(
                "sale price must exceed cost price ({sale_price} vs {cost_price})"
            ),
        });
    }
    Ok(())
}

impl InventoryEngine {
    /// Registers a new product and returns it.
    ///
    /// The id is allocated from the persisted counter (post-increment) and
    /// `registered_at` is stamped with the current time. Duplicate names are
    /// accepted; callers that want to warn should probe
    /// [`is_name_taken`](Self::is_name_taken) first.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the name is empty or too long, the
    /// initial quantity is negative, the cost price is negative or not
    /// finite, or the sale price does not exceed the cost price.
    pub fn register_product(
        &mut self,
        name: &str,
        quantity: i64,
        cost_price: f64,
        sale_price: f64,
    ) -> Result<product::Model> {
        let name = validate_name(name)?;
        if quantity < 0 {
            return Err(Error::Validation {
                message: format!("initial quantity cannot be negative, got {quantity}"),
            });
        }
        validate_prices(cost_price, sale_price)?;

        let state = self.state_mut();
        let id = state.next_product_id;
        state.next_product_id += 1;

        let model = product::Model {
            id,
            name,
            stock_quantity: quantity,
            cost_price,
            sale_price,
            registered_at: Utc::now(),
        };
        state.products.insert(id, model.clone());
        Ok(model)
    }

    /// Applies the requested field changes to a product and returns the
    /// updated model.
    ///
    /// The update is atomic: the resulting cost/sale pair is validated
    /// together after all requested changes are applied, and nothing is
    /// written unless the whole update passes.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] if the id is unknown, or
    /// [`Error::Validation`] if the new name or resulting price pair is
    /// invalid.
    pub fn edit_product(&mut self, id: i64, update: ProductUpdate) -> Result<product::Model> {
        let current = self
            .state()
            .products
            .get(&id)
            .ok_or(Error::ProductNotFound { id })?;

        let name = match update.name {
            Some(ref new_name) => validate_name(new_name)?,
            None => current.name.clone(),
        };
        let cost_price = update.cost_price.unwrap_or(current.cost_price);
        let sale_price = update.sale_price.unwrap_or(current.sale_price);
        validate_prices(cost_price, sale_price)?;

        let state = self.state_mut();
        let product = state
            .products
            .get_mut(&id)
            .ok_or(Error::ProductNotFound { id })?;
        product.name = name;
        product.cost_price = cost_price;
        product.sale_price = sale_price;
        Ok(product.clone())
    }

    /// Removes a product and returns it.
    ///
    /// Historical transactions referencing the product remain untouched, as
    /// does the cumulative profit. The returned model lets adapters warn when
    /// stock was still on hand at deletion time.
    ///
    /// # Errors
    /// Returns [`Error::ProductNotFound`] if the id is unknown.
    pub fn delete_product(&mut self, id: i64) -> Result<product::Model> {
        self.state_mut()
            .products
            .remove(&id)
            .ok_or(Error::ProductNotFound { id })
    }

    /// Looks up a product by id.
    #[must_use]
    pub fn product(&self, id: i64) -> Option<&product::Model> {
        self.state().products.get(&id)
    }

    /// All products ordered by id.
    #[must_use]
    pub fn list_products(&self) -> Vec<product::Model> {
        self.state().products.values().cloned().collect()
    }

    /// Products whose name contains the given term, case-insensitively.
    #[must_use]
    pub fn find_products(&self, term: &str) -> Vec<product::Model> {
        let needle = term.trim().to_lowercase();
        self.state()
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Whether any product already carries this name, case-insensitively.
    /// Duplicates are allowed; this only supports adapter-side warnings.
    #[must_use]
    pub fn is_name_taken(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.state()
            .products
            .values()
            .any(|p| p.name.to_lowercase() == needle)
    }
}
