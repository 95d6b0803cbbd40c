//! Stores and the shared seating pool.

use cs_core::{CafeteriaConfig, StoreId, VisitorId};
use cs_engine::Resource;

use crate::{FacilityError, FacilityResult, Stage};

// ── Store ─────────────────────────────────────────────────────────────────────

/// One food store: an ordering counter, a till, and a live queue counter.
///
/// `queue_len` counts visitors committed to this store from the moment they
/// select it until their payment completes.  It is maintained by the visitor
/// process, not derived from resource occupancy, and it is the only signal a
/// [`StoreSelector`][crate::StoreSelector] looks at.
#[derive(Debug)]
pub struct Store {
    pub id:      StoreId,
    pub servers: Resource<VisitorId>,
    pub cashier: Resource<VisitorId>,
    queue_len:   u32,
}

impl Store {
    pub fn new(id: StoreId, servers: u32, cashiers: u32) -> FacilityResult<Self> {
        Ok(Self {
            id,
            servers: Resource::new(format!("store {} servers", id.0), servers)?,
            cashier: Resource::new(format!("store {} cashier", id.0), cashiers)?,
            queue_len: 0,
        })
    }

    #[inline]
    pub fn queue_len(&self) -> u32 {
        self.queue_len
    }

    /// A visitor has committed to this store.
    pub fn join(&mut self) {
        self.queue_len += 1;
    }

    /// A committed visitor has finished paying.
    pub fn leave(&mut self) -> FacilityResult<()> {
        self.queue_len = self
            .queue_len
            .checked_sub(1)
            .ok_or(FacilityError::CounterUnderflow(self.id))?;
        Ok(())
    }
}

// ── Facility ──────────────────────────────────────────────────────────────────

/// All stores plus the seating pool they share.
///
/// Built once at simulation start; the store list is never resized.
#[derive(Debug)]
pub struct Facility {
    stores:      Vec<Store>,
    pub seating: Resource<VisitorId>,
}

impl Facility {
    /// Build `stores` identical stores and one seating pool.
    ///
    /// Every count must be positive.
    pub fn new(
        stores:             u32,
        servers_per_store:  u32,
        cashiers_per_store: u32,
        seating_capacity:   u32,
    ) -> FacilityResult<Self> {
        if stores == 0 {
            return Err(FacilityError::Config("a facility needs at least one store".into()));
        }
        let stores = (0..stores)
            .map(|i| Store::new(StoreId(i), servers_per_store, cashiers_per_store))
            .collect::<FacilityResult<Vec<_>>>()?;
        Ok(Self {
            stores,
            seating: Resource::new("seating", seating_capacity)?,
        })
    }

    pub fn from_config(config: &CafeteriaConfig) -> FacilityResult<Self> {
        Self::new(
            config.stores,
            config.servers_per_store,
            config.cashiers_per_store,
            config.seating_capacity,
        )
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    pub fn store(&self, id: StoreId) -> FacilityResult<&Store> {
        self.stores.get(id.index()).ok_or(FacilityError::UnknownStore(id))
    }

    pub fn store_mut(&mut self, id: StoreId) -> FacilityResult<&mut Store> {
        self.stores.get_mut(id.index()).ok_or(FacilityError::UnknownStore(id))
    }

    /// Snapshot of every store's queue counter, in store order.
    pub fn queue_lens(&self) -> Vec<u32> {
        self.stores.iter().map(Store::queue_len).collect()
    }

    /// The resource a visitor at `stage` in `store` contends for.
    ///
    /// `Arrived` and `Departed` hold nothing.
    pub fn resource_mut(
        &mut self,
        stage: Stage,
        store: StoreId,
    ) -> FacilityResult<&mut Resource<VisitorId>> {
        match stage {
            Stage::Ordering => Ok(&mut self.store_mut(store)?.servers),
            Stage::Paying   => Ok(&mut self.store_mut(store)?.cashier),
            Stage::Seating  => Ok(&mut self.seating),
            Stage::Arrived | Stage::Departed => Err(FacilityError::NoResource(stage)),
        }
    }
}
