//! Catalog Cache
//!
//! Session-owned, in-memory copy of the car catalog plus a filtered view.
//! Mutations go through the backend first and are applied to the cache
//! only once the response succeeds, so a failed call never half-applies.
//!
//! Every recompute of the visible view is pushed to all subscribers, in
//! subscription order, as the full sequence.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::ApiResult;
use crate::http::CarBackend;
use crate::models::{Car, CarDraft, CarId};

const MSG_LOAD_FAILED: &str = "Failed to fetch cars";
const MSG_GET_FAILED: &str = "Failed to fetch car";
const MSG_CREATE_FAILED: &str = "Failed to create car";
const MSG_UPDATE_FAILED: &str = "Failed to update car";
const MSG_DELETE_FAILED: &str = "Failed to delete car";

/// Handle returned by [`CatalogCache::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&[Car])>;

#[derive(Default)]
struct CacheState {
    /// Fetch order, then append order
    all: Vec<Car>,
    /// id -> index into `all`
    positions: HashMap<CarId, usize>,
    /// Last applied query, as typed
    query: String,
    visible: Vec<Car>,
}

impl CacheState {
    fn reindex(&mut self) {
        self.positions = self.all.iter().enumerate().map(|(i, car)| (car.id, i)).collect();
    }

    fn recompute(&mut self) {
        let needle = self.query.to_lowercase();
        self.visible = if needle.is_empty() {
            self.all.clone()
        } else {
            self.all.iter().filter(|car| car.matches(&needle)).cloned().collect()
        };
    }
}

/// In-memory catalog kept in sync with the backend
pub struct CatalogCache<B> {
    backend: B,
    state: RefCell<CacheState>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl<B: CarBackend> CatalogCache<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: RefCell::new(CacheState::default()),
            observers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ========================
    // Backend Operations
    // ========================

    /// Fetch the full catalog, replace the cache and clear the filter.
    /// On failure the previous cache is kept.
    pub async fn load(&self) -> ApiResult<Vec<Car>> {
        let cars = self
            .backend
            .list_cars()
            .await
            .and_then(|resp| resp.into_data(MSG_LOAD_FAILED))
            .inspect_err(|e| log::error!("[CATALOG] Load failed: {}", e))?;

        log::info!("[CATALOG] Loaded {} cars", cars.len());
        {
            let mut state = self.state.borrow_mut();
            state.all = cars.clone();
            state.reindex();
            state.query.clear();
            state.recompute();
        }
        self.emit();
        Ok(cars)
    }

    /// Fetch one car straight from the backend.
    /// Detail payloads are richer than list payloads, so the cache is not consulted.
    pub async fn get_by_id(&self, id: CarId) -> ApiResult<Car> {
        self.backend
            .get_car(id)
            .await
            .and_then(|resp| resp.into_data(MSG_GET_FAILED))
            .inspect_err(|e| log::error!("[CATALOG] Get car {} failed: {}", id, e))
    }

    /// Create a car; the backend assigns the id. Appends on success.
    pub async fn create(&self, draft: &CarDraft) -> ApiResult<Car> {
        let car = self
            .backend
            .create_car(draft)
            .await
            .and_then(|resp| resp.into_data(MSG_CREATE_FAILED))
            .inspect_err(|e| log::error!("[CATALOG] Create failed: {}", e))?;

        log::info!("[CATALOG] Created car {}", car.id);
        {
            let mut state = self.state.borrow_mut();
            if let Some(&existing) = state.positions.get(&car.id) {
                log::warn!("[CATALOG] Backend returned duplicate id {} on create, replacing", car.id);
                state.all[existing] = car.clone();
            } else {
                let index = state.all.len();
                state.positions.insert(car.id, index);
                state.all.push(car.clone());
            }
            state.recompute();
        }
        self.emit();
        Ok(car)
    }

    /// Replace a car by id with the backend's response.
    ///
    /// If the id is not cached the cache is left untouched and nothing is
    /// emitted; that means the list and backend disagree, which is logged.
    pub async fn update(&self, car: &Car) -> ApiResult<Car> {
        let updated = self
            .backend
            .update_car(car)
            .await
            .and_then(|resp| resp.into_data(MSG_UPDATE_FAILED))
            .inspect_err(|e| log::error!("[CATALOG] Update of car {} failed: {}", car.id, e))?;

        let replaced = {
            let mut state = self.state.borrow_mut();
            match state.positions.get(&updated.id).copied() {
                Some(index) => {
                    state.all[index] = updated.clone();
                    state.recompute();
                    true
                }
                None => false,
            }
        };

        if replaced {
            log::info!("[CATALOG] Updated car {}", updated.id);
            self.emit();
        } else {
            log::warn!("[CATALOG] Updated car {} is not in the cache; cache left unchanged", updated.id);
        }
        Ok(updated)
    }

    /// Delete a car by id. Removes it from the cache on success.
    pub async fn delete(&self, id: CarId) -> ApiResult<()> {
        self.backend
            .delete_car(id)
            .await
            .and_then(|resp| resp.into_unit(MSG_DELETE_FAILED))
            .inspect_err(|e| log::error!("[CATALOG] Delete of car {} failed: {}", id, e))?;

        {
            let mut state = self.state.borrow_mut();
            match state.positions.get(&id).copied() {
                Some(index) => {
                    state.all.remove(index);
                    state.reindex();
                }
                None => log::warn!("[CATALOG] Deleted car {} was not in the cache", id),
            }
            state.recompute();
        }
        log::info!("[CATALOG] Deleted car {}", id);
        self.emit();
        Ok(())
    }

    // ========================
    // Local Operations
    // ========================

    /// Case-insensitive substring match on brand or model. Empty shows everything.
    pub fn filter(&self, query: &str) {
        {
            let mut state = self.state.borrow_mut();
            state.query = query.to_string();
            state.recompute();
        }
        log::debug!("[CATALOG] Filter {:?}", query);
        self.emit();
    }

    /// Register an observer. It receives the current view immediately and
    /// then every recomputed view.
    pub fn subscribe(&self, observer: impl Fn(&[Car]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);

        let observer: Observer = Rc::new(observer);
        self.observers.borrow_mut().push((id, observer.clone()));

        let current = self.visible_items();
        observer(&current);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    pub fn visible_items(&self) -> Vec<Car> {
        self.state.borrow().visible.clone()
    }

    pub fn all_items(&self) -> Vec<Car> {
        self.state.borrow().all.clone()
    }

    pub fn query(&self) -> String {
        self.state.borrow().query.clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push the current view to every observer.
    /// Borrows are released first so observers may call back into the cache.
    fn emit(&self) {
        let snapshot = self.visible_items();
        let observers: Vec<Observer> = self.observers.borrow().iter().map(|(_, o)| o.clone()).collect();
        for observer in observers {
            observer(&snapshot);
        }
    }
}
