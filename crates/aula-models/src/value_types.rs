//! Choice types stored as short text codes.
//!
//! The school data model restricts several columns to a fixed set of codes
//! (course year, division and shift, grade values). Each set is a Rust enum
//! that serializes as its code, parses from it, and maps to a `VARCHAR`
//! column through sqlx.
//!
//! ```ignore
//! use aula_models::courses::Year;
//!
//! let year: Year = "THI".parse()?;
//! assert_eq!(year.code(), "THI");
//! assert_eq!(year.label(), "Tercer Año");
//! ```

/// An unknown code was given for a choice type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not a valid {kind}; expected one of: {expected}")]
pub struct ChoiceError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Declares a choice enum with its codes and display labels.
///
/// Besides `code`, `label` and `ALL`, the enum gets `Display` and `FromStr`
/// over its codes, serde and OpenAPI schemas as a string enum, and sqlx
/// `Type`/`Encode`/`Decode` for Postgres text columns.
#[macro_export]
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.code())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::value_types::ChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::value_types::ChoiceError {
                        kind: $kind,
                        value: s.to_string(),
                        expected: concat!($($code, " "),+),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::value_types::ChoiceError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> String {
                value.code().to_string()
            }
        }

        impl ::utoipa::PartialSchema for $name {
            fn schema() -> ::utoipa::openapi::RefOr<::utoipa::openapi::schema::Schema> {
                ::utoipa::openapi::ObjectBuilder::new()
                    .schema_type(::utoipa::openapi::schema::Type::String)
                    .enum_values(Some([$($code,)+]))
                    .into()
            }
        }

        impl ::utoipa::ToSchema for $name {}

        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> ::sqlx::Encode<'q, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <::sqlx::Postgres as ::sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <&str as ::sqlx::Encode<'q, ::sqlx::Postgres>>::encode(self.code(), buf)
            }
        }

        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: <::sqlx::Postgres as ::sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, ::sqlx::error::BoxDynError> {
                let s = <&str as ::sqlx::Decode<'r, ::sqlx::Postgres>>::decode(value)?;
                Ok(s.parse::<$name>()?)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::choice_enum! {
        pub enum Light ("light") {
            Red => "R", "Stop";
            Green => "G", "Go";
        }
    }

    #[test]
    fn test_parse_and_display() {
        let light: Light = "G".parse().unwrap();
        assert_eq!(light, Light::Green);
        assert_eq!(light.to_string(), "G");
        assert_eq!(light.label(), "Go");
        assert_eq!(Light::ALL.len(), 2);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let err = "Y".parse::<Light>().unwrap_err();
        assert_eq!(err.kind, "light");
        assert_eq!(err.value, "Y");
        assert!(err.to_string().contains("expected one of: R G"));
    }

    #[test]
    fn test_serde_goes_through_codes() {
        assert_eq!(serde_json::to_string(&Light::Red).unwrap(), r#""R""#);
        assert_eq!(serde_json::from_str::<Light>(r#""R""#).unwrap(), Light::Red);
        assert!(serde_json::from_str::<Light>(r#""Red""#).is_err());
    }
}
