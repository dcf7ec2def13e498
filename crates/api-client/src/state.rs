//! Catalog state guarded by generation tickets.
//!
//! Every fetch round takes a [`FetchTicket`] before its requests go out.
//! Responses are applied per slot (products, best sellers, promotions); a
//! slot refuses any ticket older than the newest one it already applied, so a
//! slow response from an earlier round cannot overwrite fresher data.

use crate::error::{ApiError, ApiResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use storefront_search::{
    BestSellerEntry, FuzzyMode, Product, Promotion, ReferenceList, SmartSearch, apply_promotions,
};

/// Identifies one fetch round; later rounds carry larger generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Generation number
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Slot<T> {
    value: Arc<T>,
    generation: u64,
}

impl<T> Slot<T> {
    fn apply(&mut self, ticket: FetchTicket, value: T) -> ApiResult<()> {
        if ticket.0 < self.generation {
            return Err(ApiError::StaleResponse {
                ticket: ticket.0,
                newest: self.generation,
            });
        }
        self.value = Arc::new(value);
        self.generation = ticket.0;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Slots {
    products: Slot<Vec<Product>>,
    best_sellers: Slot<ReferenceList>,
    promotions: Slot<Vec<Promotion>>,
}

/// Products, best-seller ranking and promotions shown by the catalog.
#[derive(Debug, Default)]
pub struct CatalogState {
    next_generation: AtomicU64,
    slots: RwLock<Slots>,
}

impl CatalogState {
    /// Empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Slots> {
        self.slots.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Slots> {
        self.slots.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Start a fetch round.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.next_generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store a product list.
    ///
    /// # Errors
    /// [`ApiError::StaleResponse`] when a newer product list was applied.
    pub fn apply_products(&self, ticket: FetchTicket, products: Vec<Product>) -> ApiResult<()> {
        let count = products.len();
        self.write().products.apply(ticket, products)?;
        tracing::debug!(generation = ticket.0, count, "products applied");
        Ok(())
    }

    /// Store the best-seller report (ascending sales order, as served).
    ///
    /// # Errors
    /// [`ApiError::StaleResponse`] when a newer list was applied.
    pub fn apply_best_sellers(&self, ticket: FetchTicket, entries: &[BestSellerEntry]) -> ApiResult<()> {
        let reference = ReferenceList::from_entries(entries);
        let count = reference.len();
        self.write().best_sellers.apply(ticket, reference)?;
        tracing::debug!(generation = ticket.0, count, "best sellers applied");
        Ok(())
    }

    /// Store the promotion list.
    ///
    /// # Errors
    /// [`ApiError::StaleResponse`] when a newer list was applied.
    pub fn apply_promotions(&self, ticket: FetchTicket, promotions: Vec<Promotion>) -> ApiResult<()> {
        let count = promotions.len();
        self.write().promotions.apply(ticket, promotions)?;
        tracing::debug!(generation = ticket.0, count, "promotions applied");
        Ok(())
    }

    /// Raw product list as fetched
    #[must_use]
    pub fn products(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.read().products.value)
    }

    /// Products with current promotions applied
    #[must_use]
    pub fn priced_products(&self) -> Vec<Product> {
        let slots = self.read();
        apply_promotions(&slots.products.value, &slots.promotions.value)
    }

    /// Best-seller ranking
    #[must_use]
    pub fn reference(&self) -> Arc<ReferenceList> {
        Arc::clone(&self.read().best_sellers.value)
    }

    /// Promotions as fetched
    #[must_use]
    pub fn promotions(&self) -> Arc<Vec<Promotion>> {
        Arc::clone(&self.read().promotions.value)
    }

    /// A searcher ranking with the current best-seller list
    #[must_use]
    pub fn searcher(&self, fuzzy: FuzzyMode) -> SmartSearch {
        SmartSearch::new(self.reference().as_ref().clone()).with_fuzzy(fuzzy)
    }

    /// Newest generation applied to each slot (products, best sellers, promotions)
    #[must_use]
    pub fn generations(&self) -> (u64, u64, u64) {
        let slots = self.read();
        (
            slots.products.generation,
            slots.best_sellers.generation,
            slots.promotions.generation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id, name, "Mercearia", 10.0)
    }

    #[test]
    fn test_tickets_increase() {
        let state = CatalogState::new();
        let a = state.begin();
        let b = state.begin();
        assert!(b > a);
        assert_eq!(a.generation(), 1);
    }

    #[test]
    fn test_stale_response_rejected() {
        let state = CatalogState::new();
        let old = state.begin();
        let new = state.begin();

        state.apply_products(new, vec![product("2", "Novo")]).unwrap();
        let err = state.apply_products(old, vec![product("1", "Velho")]).unwrap_err();

        assert!(matches!(err, ApiError::StaleResponse { ticket: 1, newest: 2 }));
        assert_eq!(state.products()[0].id, "2");
    }

    #[test]
    fn test_slots_are_independent() {
        let state = CatalogState::new();
        let old = state.begin();
        let new = state.begin();

        state.apply_products(new, vec![product("2", "Novo")]).unwrap();
        // The older round may still fill a slot nobody newer has touched
        state
            .apply_best_sellers(old, &[BestSellerEntry::new("Novo")])
            .unwrap();
        assert_eq!(state.generations(), (2, 1, 0));
    }

    #[test]
    fn test_same_ticket_reapplies() {
        let state = CatalogState::new();
        let ticket = state.begin();
        state.apply_products(ticket, vec![]).unwrap();
        state.apply_products(ticket, vec![product("1", "Sal")]).unwrap();
        assert_eq!(state.products().len(), 1);
    }

    #[test]
    fn test_searcher_uses_reference() {
        let state = CatalogState::new();
        let ticket = state.begin();
        state
            .apply_products(ticket, vec![product("1", "Arroz Branco"), product("2", "Arroz Integral")])
            .unwrap();
        state
            .apply_best_sellers(ticket, &[BestSellerEntry::new("ARROZ INTEGRAL")])
            .unwrap();

        let products = state.products();
        let results = state.searcher(FuzzyMode::default()).search("arroz", &products);
        assert_eq!(results[0].id, "2");
    }

    #[test]
    fn test_priced_products() {
        let state = CatalogState::new();
        let ticket = state.begin();
        state.apply_products(ticket, vec![product("1", "Azeite")]).unwrap();
        let promo: Promotion = serde_json::from_str(
            r#"{"productId": "1", "newPrice": 7.5, "originalPrice": 10.0, "isActive": true}"#,
        )
        .unwrap();
        state.apply_promotions(ticket, vec![promo]).unwrap();

        let priced = state.priced_products();
        assert_eq!(priced[0].price, 7.5);
        assert!(priced[0].is_on_sale());
        assert_eq!(state.products()[0].price, 10.0);
    }
}
