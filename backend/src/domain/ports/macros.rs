//! `define_port_error!` declares a port error enum together with snake_case
//! constructors.
//!
//! Each `Variant { field: Type } => "format"` line becomes a `thiserror`
//! variant and a `variant(field: impl Into<Type>) -> Self` constructor. Unit
//! variants get a nullary constructor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),+ $(,)? } )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),+ } )?,
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!(
                        "Build [`", stringify!($name), "::", stringify!($variant), "`]."
                    )]
                    pub fn [<$variant:snake>]($( $($field: impl Into<$ty>),+ )?) -> Self {
                        Self::$variant $( { $($field: $field.into()),+ } )?
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
