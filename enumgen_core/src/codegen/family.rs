use super::hex_literal;
use crate::ident::sanitize_label;
use crate::types::{EnumFamilySpec, IntRepr};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::trace;

/// Emits the type, lookup tables, constants and trait impls of one family.
pub(super) fn family_tokens(family: &EnumFamilySpec, repr: IntRepr) -> TokenStream {
    let family_name = family.name();
    trace!(
        "Emitting family {} with {} members",
        family_name,
        family.len()
    );

    let ty = format_ident!("{}", family_name);
    let int = format_ident!("{}", repr.type_name());
    let fallback = format!("{family_name}_0x{{:X}}");
    let members = family.members();

    let constants: Vec<proc_macro2::Ident> = members
        .iter()
        .map(|member| format_ident!("{}_{}", family_name, sanitize_label(&member.label)))
        .collect();

    let names_entries = members.iter().map(|member| {
        let value = hex_literal(member.value);
        let label = &member.label;
        quote! { (#ty(#value), #label) }
    });

    let values_entries = members.iter().map(|member| {
        let value = hex_literal(member.value);
        let label = &member.label;
        quote! { (#label, #ty(#value)) }
    });

    // Members are sorted by (value, label); the last label of a value wins.
    let name_arms = members
        .iter()
        .enumerate()
        .filter(|&(i, member)| {
            members
                .get(i + 1)
                .is_none_or(|next| next.value != member.value)
        })
        .map(|(_, member)| {
            let value = hex_literal(member.value);
            let label = &member.label;
            quote! { #value => ::core::option::Option::Some(#label), }
        })
        .collect::<Vec<_>>();

    let from_name_arms = members.iter().zip(&constants).map(|(member, constant)| {
        let label = &member.label;
        quote! { #label => ::core::option::Option::Some(#constant), }
    });

    let constant_decls = members.iter().zip(&constants).map(|(member, constant)| {
        let value = hex_literal(member.value);
        quote! {
            #[allow(non_upper_case_globals)]
            pub const #constant: #ty = #ty(#value);
        }
    });

    quote! {
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[repr(transparent)]
        pub struct #ty(pub #int);

        impl #ty {
            /// Declared members as `(value, label)`, in ascending value order.
            pub const NAMES: &'static [(#ty, &'static str)] = &[#(#names_entries),*];

            /// Declared members as `(label, value)`, in ascending value order.
            pub const VALUES: &'static [(&'static str, #ty)] = &[#(#values_entries),*];

            pub const fn new(value: #int) -> Self {
                Self(value)
            }

            pub const fn value(self) -> #int {
                self.0
            }

            /// Declared label of this value, if any.
            pub fn name(self) -> ::core::option::Option<&'static str> {
                match self.0 {
                    #(#name_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            /// Value declared for `name`, if any.
            pub fn from_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#from_name_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            /// Renders the value as a JSON string.
            pub fn to_json(self) -> ::std::string::String {
                let label = ::serde_json::Value::String(::std::string::ToString::to_string(&self));
                ::std::string::ToString::to_string(&label)
            }

            /// Parses a JSON string holding a declared label.
            pub fn from_json(text: &str) -> ::core::result::Result<Self, EnumTextError> {
                let label: ::std::string::String =
                    ::serde_json::from_str(text).map_err(EnumTextError::MalformedInput)?;
                match Self::from_name(&label) {
                    ::core::option::Option::Some(value) => ::core::result::Result::Ok(value),
                    ::core::option::Option::None => ::core::result::Result::Err(
                        EnumTextError::UnknownLabel { family: #family_name, label },
                    ),
                }
            }
        }

        #(#constant_decls)*

        impl fmt::Display for #ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.name() {
                    ::core::option::Option::Some(name) => f.pad(name),
                    ::core::option::Option::None => write!(f, #fallback, self.0),
                }
            }
        }

        impl ::core::str::FromStr for #ty {
            type Err = EnumTextError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match Self::from_name(s) {
                    ::core::option::Option::Some(value) => ::core::result::Result::Ok(value),
                    ::core::option::Option::None => ::core::result::Result::Err(
                        EnumTextError::UnknownLabel {
                            family: #family_name,
                            label: ::std::string::String::from(s),
                        },
                    ),
                }
            }
        }

        impl ::core::convert::From<#int> for #ty {
            fn from(value: #int) -> Self {
                Self(value)
            }
        }

        impl ::core::convert::From<#ty> for #int {
            fn from(value: #ty) -> Self {
                value.0
            }
        }

        impl Serialize for #ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for #ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> ::core::result::Result<Self, D::Error> {
                let label = <::std::string::String as Deserialize<'de>>::deserialize(deserializer)?;
                match Self::from_name(&label) {
                    ::core::option::Option::Some(value) => ::core::result::Result::Ok(value),
                    ::core::option::Option::None => ::core::result::Result::Err(
                        <D::Error as de::Error>::custom(EnumTextError::UnknownLabel {
                            family: #family_name,
                            label,
                        }),
                    ),
                }
            }
        }
    }
}
