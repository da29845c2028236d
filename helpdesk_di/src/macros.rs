/// Declares a provider struct.
///
/// Every `field: Type` is handed out by cloning it. A `..field: Base { A, B, }`
/// entry delegates building `A` and `B` to the nested provider `Base`. Anything
/// else is built through its own [`Build`](crate::Build) impl, which usually
/// comes from `#[derive(Build)]`.
///
/// The generated struct has an extra `_instances` field. Initialize it with
/// `Default::default()`.
#[macro_export]
macro_rules! provider {
    ($(#[doc=$doc:literal])* $vis:vis $name:ident {
        $( $field:ident: $field_ty:ty, )*
        $( .. $nested:ident: $nested_ty:ty { $($delegated:ty,)* $(,)? } )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $name {
            _instances: $crate::Instances,
            $( $field: $field_ty, )*
            $( $nested: $nested_ty, )*
        }

        impl $crate::Provider for $name {
            fn instances(&mut self) -> &mut $crate::Instances {
                &mut self._instances
            }
        }

        $(
            impl $crate::Build<$name> for $field_ty {
                fn build(provider: &mut $name) -> Self {
                    ::core::clone::Clone::clone(&provider.$field)
                }
            }
        )*

        $($(
            impl $crate::Build<$name> for $delegated {
                fn build(provider: &mut $name) -> Self {
                    $crate::Provides::provide(&mut provider.$nested)
                }
            }
        )*)*
    };
}
