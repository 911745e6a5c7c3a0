//! Cart surfaces: consumers of the shared store.
//!
//! A surface holds no cart data of its own; it borrows the store's current
//! snapshot on every render and is woken by the store's change channel.
//! Because the sidebar widget and the cart page are both surfaces over the
//! same store, they can never disagree on contents or total.

use tokio::sync::watch;

use starfruit_core::Cart;

use crate::store::CartStore;
use crate::view::CartView;

/// A mounted consumer of the cart store.
///
/// The sidebar additionally carries a visibility flag; opening or closing
/// it is a toggle only and never mutates cart contents.
#[derive(Debug)]
pub struct CartSurface {
    rx: watch::Receiver<Cart>,
    open: bool,
}

impl CartSurface {
    /// Mount a surface on a store.
    #[must_use]
    pub fn new(store: &CartStore) -> Self {
        Self {
            rx: store.subscribe(),
            open: false,
        }
    }

    /// Render the current shared snapshot.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView::from(&*self.rx.borrow())
    }

    /// Wait for the next cart change and render it.
    ///
    /// Returns `None` once the store is gone, so a result arriving after
    /// the owning session is torn down is safely ignorable.
    pub async fn changed(&mut self) -> Option<CartView> {
        self.rx.changed().await.ok()?;
        Some(self.view())
    }

    /// Show the surface.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the surface.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Flip visibility.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Whether the surface is currently shown.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }
}
