use proc_macro2::TokenStream;
use quote::quote;

/// Comment placed at the top of every generated file.
pub const HEADER: &str = "// @generated by enumgen. Do not edit by hand: change the enum table and regenerate.\n\n";

/// Imports and the error type shared by every generated family.
pub(super) fn preamble_tokens() -> TokenStream {
    quote! {
        use ::std::fmt;
        use ::serde::{de, Deserialize, Deserializer, Serialize, Serializer};

        /// Error returned when an enum value cannot be parsed from its text form.
        #[derive(Debug)]
        pub enum EnumTextError {
            /// The input was not a JSON string.
            MalformedInput(::serde_json::Error),
            /// The string is not a declared label of the family.
            UnknownLabel {
                family: &'static str,
                label: ::std::string::String,
            },
        }

        impl EnumTextError {
            /// Family named by an unknown-label error.
            pub fn family(&self) -> ::core::option::Option<&'static str> {
                match self {
                    EnumTextError::UnknownLabel { family, .. } => ::core::option::Option::Some(*family),
                    EnumTextError::MalformedInput(_) => ::core::option::Option::None,
                }
            }

            /// Label carried by an unknown-label error.
            pub fn label(&self) -> ::core::option::Option<&str> {
                match self {
                    EnumTextError::UnknownLabel { label, .. } => ::core::option::Option::Some(label.as_str()),
                    EnumTextError::MalformedInput(_) => ::core::option::Option::None,
                }
            }
        }

        impl fmt::Display for EnumTextError {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    EnumTextError::MalformedInput(err) => write!(f, "malformed enum text: {}", err),
                    EnumTextError::UnknownLabel { family, label } => write!(f, "unknown {} {}", family, label),
                }
            }
        }

        impl ::std::error::Error for EnumTextError {
            fn source(&self) -> ::core::option::Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    EnumTextError::MalformedInput(err) => ::core::option::Option::Some(err),
                    EnumTextError::UnknownLabel { .. } => ::core::option::Option::None,
                }
            }
        }
    }
}
