//! Cart Session
//!
//! Owns the cart state for one shopper and writes the line list back to storage after every
//! transition. Concurrent sessions over the same storage are last-write-wins.

use frutos::cart::{CART_STORAGE_KEY, CartAction, CartState, LineKey, controls, reduce};
use tracing::{debug, info};

use crate::domain::carts::{errors::CartsStorageError, storage::CartStorage};

#[derive(Debug)]
pub struct CartSession<S> {
    storage: S,
    state: CartState,
}

impl<S: CartStorage> CartSession<S> {
    /// Restore the persisted cart, or start an empty one.
    ///
    /// Returns the session and the number of stored entries that were dropped as malformed.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage cannot be read.
    pub async fn load(storage: S) -> Result<(Self, usize), CartsStorageError> {
        let (state, dropped) = match storage.read(CART_STORAGE_KEY).await? {
            Some(raw) => CartState::load(&raw),
            None => (CartState::new(), 0),
        };

        if dropped > 0 {
            info!(dropped, "restored cart with malformed entries removed");
        }

        Ok((Self { storage, state }, dropped))
    }

    /// Current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply an action and persist the resulting lines.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be written back. The session then keeps the state it
    /// had before the action.
    pub async fn dispatch(&mut self, action: CartAction) -> Result<&CartState, CartsStorageError> {
        self.commit(|state| reduce(state, action)).await
    }

    /// Add one pack to a line, up to its stock ceiling.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be written back.
    pub async fn increment(&mut self, key: &LineKey) -> Result<&CartState, CartsStorageError> {
        self.commit(|state| controls::increment(state, key)).await
    }

    /// Take one pack off a line, never going below one.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be written back.
    pub async fn decrement(&mut self, key: &LineKey) -> Result<&CartState, CartsStorageError> {
        self.commit(|state| controls::decrement(state, key)).await
    }

    async fn commit(
        &mut self,
        transition: impl FnOnce(CartState) -> CartState,
    ) -> Result<&CartState, CartsStorageError> {
        let next = transition(self.state.clone());

        self.storage.write(CART_STORAGE_KEY, next.to_json()?).await?;

        debug!(
            lines = next.items().len(),
            total = next.total_amount(),
            "persisted cart"
        );

        self.state = next;

        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use frutos::{cart::CartItem, weights::Weight};
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::carts::storage::{MemoryCartStorage, MockCartStorage},
        test::helpers::catalog_product,
    };

    use super::*;

    fn almendras(quantity: u32) -> Result<CartItem, Box<dyn std::error::Error>> {
        let product = catalog_product("almendras")?;

        Ok(CartItem::from_product("almendras", &product, Weight::Grams500, quantity)
            .ok_or("almendras should sell 500g")?)
    }

    #[tokio::test]
    async fn empty_storage_starts_empty_cart() -> TestResult {
        let (session, dropped) = CartSession::load(MemoryCartStorage::new()).await?;

        assert!(session.state().is_empty());
        assert_eq!(dropped, 0);

        Ok(())
    }

    #[tokio::test]
    async fn dispatch_persists_after_every_change() -> TestResult {
        let (mut session, _) = CartSession::load(MemoryCartStorage::new()).await?;

        session.dispatch(CartAction::Add(almendras(2)?)).await?;

        let raw = session
            .storage
            .read(CART_STORAGE_KEY)
            .await?
            .ok_or("cart should be persisted")?;

        let (restored, dropped) = CartState::load(&raw);

        assert_eq!(dropped, 0);
        assert_eq!(&restored, session.state());
        assert_eq!(restored.total_amount(), 15_000);

        session.dispatch(CartAction::Clear).await?;

        assert_eq!(
            session.storage.read(CART_STORAGE_KEY).await?.as_deref(),
            Some("[]")
        );

        Ok(())
    }

    #[tokio::test]
    async fn controls_respect_stock_snapshot() -> TestResult {
        let (mut session, _) = CartSession::load(MemoryCartStorage::new()).await?;
        let item = almendras(2)?;
        let key = item.key();

        session.dispatch(CartAction::Add(item)).await?;

        // 500g of almendras has 3 packs in stock.
        session.increment(&key).await?;
        let state = session.increment(&key).await?;

        assert_eq!(state.total_items(), 3);

        session.decrement(&key).await?;
        session.decrement(&key).await?;
        let state = session.decrement(&key).await?;

        assert_eq!(state.total_items(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn load_reports_dropped_entries() -> TestResult {
        let storage = MemoryCartStorage::new();

        storage
            .write(
                CART_STORAGE_KEY,
                r#"[{"productId":"a","name":"A","price":100,"weight":250,"quantity":1,"image":""},{"productId":"b"}]"#
                    .to_string(),
            )
            .await?;

        let (session, dropped) = CartSession::load(storage).await?;

        assert_eq!(dropped, 1);
        assert_eq!(session.state().items().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn write_failures_keep_previous_state() -> TestResult {
        let mut storage = MockCartStorage::new();
        let item = almendras(2)?;
        let key = item.key();
        let mut sequence = mockall::Sequence::new();

        storage
            .expect_read()
            .with(eq(CART_STORAGE_KEY))
            .returning(|_| Ok(None));

        storage
            .expect_write()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(()));

        storage
            .expect_write()
            .times(2)
            .in_sequence(&mut sequence)
            .returning(|_, _| Err(CartsStorageError::Io(std::io::Error::other("quota"))));

        let (mut session, _) = CartSession::load(storage).await?;

        session.dispatch(CartAction::Add(item)).await?;

        let before = session.state().clone();

        let result = session.dispatch(CartAction::Clear).await;
        assert!(matches!(result, Err(CartsStorageError::Io(_))));
        assert_eq!(session.state(), &before);

        let result = session.increment(&key).await;
        assert!(matches!(result, Err(CartsStorageError::Io(_))));
        assert_eq!(session.state().line(&key).map(|line| line.quantity()), Some(2));

        Ok(())
    }
}
