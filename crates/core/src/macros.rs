// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros for reducing boilerplate.
//!
//! - [`simple_display!`] — `Display` impl mapping enum variants to string literals
//! - [`setters!`] — setter methods for production builder/config structs
//! - [`flags!`] — typed flag methods for [`CommandBuilder`](crate::CommandBuilder)

/// Generate a `Display` impl that maps enum variants to string literals.
///
/// Unit variants match directly; data-carrying variants use `(..)` to ignore fields.
///
/// ```ignore
/// crate::simple_display! {
///     MyEnum {
///         Foo => "foo",
///         Bar(..) => "bar",
///     }
/// }
/// ```
#[macro_export]
macro_rules! simple_display {
    ($enum:ty { $( $variant:ident $(( $($ignore:tt)* ))? => $str:expr ),+ $(,)? }) => {
        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(match self {
                    $( Self::$variant $(( $($ignore)* ))? => $str, )+
                })
            }
        }
    };
}

/// Generate setter methods inside an existing `impl` block.
///
/// ```ignore
/// impl MyOptions {
///     btp_core::setters! {
///         into { name: String }
///         set { count: u32 }
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    (
        $(into {
            $( $into_field:ident : $into_ty:ty ),* $(,)?
        })?
        $(set {
            $( $set_field:ident : $set_ty:ty ),* $(,)?
        })?
    ) => {
        $($(
            pub fn $into_field(mut self, v: impl Into<$into_ty>) -> Self {
                self.$into_field = v.into();
                self
            }
        )*)?

        $($(
            pub fn $set_field(mut self, v: $set_ty) -> Self {
                self.$set_field = v;
                self
            }
        )*)?
    };
}

/// Generate flag methods on a command builder that exposes
/// `fn flag(self, name: &str, value: impl Into<String>) -> Self`.
///
/// - `value { method => "--flag" }` — appends `--flag <value>`
/// - `switch { method => "--flag" }` — appends `--flag <true|false>`
///
/// ```ignore
/// impl CommandBuilder {
///     crate::flags! {
///         value { name => "--name" }
///         switch { show_parameters => "--show-parameters" }
///     }
/// }
/// ```
#[macro_export]
macro_rules! flags {
    (
        $(value {
            $( $(#[$vmeta:meta])* $vname:ident => $vflag:literal ),* $(,)?
        })?
        $(switch {
            $( $(#[$smeta:meta])* $sname:ident => $sflag:literal ),* $(,)?
        })?
    ) => {
        $($(
            $(#[$vmeta])*
            pub fn $vname(self, value: impl Into<String>) -> Self {
                self.flag($vflag, value)
            }
        )*)?

        $($(
            $(#[$smeta])*
            pub fn $sname(self, value: bool) -> Self {
                self.flag($sflag, value.to_string())
            }
        )*)?
    };
}
