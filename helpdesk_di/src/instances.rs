use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// The services a provider has built so far, at most one per type.
#[derive(Debug, Default)]
pub struct Instances {
    by_type: HashMap<TypeId, Box<dyn Any>>,
}

impl Instances {
    /// Returns a clone of the `T` built earlier, if there is one.
    pub fn cloned<T: Clone + 'static>(&self) -> Option<T> {
        self.by_type
            .get(&TypeId::of::<T>())?
            .downcast_ref::<T>()
            .cloned()
    }

    /// Keeps `instance` for later lookups, replacing a previous `T`.
    pub fn remember<T: 'static>(&mut self, instance: T) {
        self.by_type.insert(TypeId::of::<T>(), Box::new(instance));
    }
}
