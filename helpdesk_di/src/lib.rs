extern crate self as helpdesk_di;

pub use helpdesk_di_derive::Build;
pub use instances::Instances;

mod instances;
mod macros;

/// Builds services and shares one instance of each between its dependents.
pub trait Provider: Sized {
    fn instances(&mut self) -> &mut Instances;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provides for P {}
