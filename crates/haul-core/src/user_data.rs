//! Opaque payload slot carried by nodes, edges, parcels and trucks.
//!
//! Managers use it to hang their own bookkeeping off board objects (a
//! planned route, a claim marker) without the kernel knowing the type.  The
//! payload is stored as `Arc<dyn Any + Send + Sync>` and recovered with
//! [`UserData::get`], which downcasts.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

type Payload = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct UserData {
    slot: Mutex<Option<Payload>>,
}

impl UserData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any previous payload.
    pub fn set<T: Any + Send + Sync>(&self, value: T) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(value));
    }

    /// The payload if one is set and it is a `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let payload = self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()?;
        payload.downcast::<T>().ok()
    }

    /// Remove and drop the payload.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_set(&self) -> bool {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserData").field("set", &self.is_set()).finish()
    }
}
