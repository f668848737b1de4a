/// Implements `Display`, `FromStr`, and serde support for an enum whose
/// variants are identified by a fixed, case-sensitive name and that has an
/// `Other(String)` catch-all variant.
macro_rules! impl_named_registry {
    ($T:ty, [
        $($name:literal => $val:expr; $valp:pat,)*
    ]) => {
        impl core::fmt::Display for $T {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match &self {
                    $($valp => write!(f, "{}", $name),)*
                    Self::Other(other) => write!(f, "{}", other),
                }
            }
        }

        impl core::str::FromStr for $T {
            type Err = core::convert::Infallible;

            fn from_str(name: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_str_without_other(name)
                    .unwrap_or_else(|| Self::Other(alloc::string::String::from(name))))
            }
        }

        #[allow(unused_qualifications)]
        impl<'de> serde::Deserialize<'de> for $T {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let name = <alloc::borrow::Cow<'_, str> as serde::Deserialize>::deserialize(deserializer)?;

                Ok(Self::from_str_without_other(&name).unwrap_or_else(|| {
                    Self::Other(name.into_owned())
                }))
            }
        }

        #[allow(unused_qualifications)]
        impl serde::Serialize for $T {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let name = match self {
                    $($valp => $name,)*
                    Self::Other(custom) => custom.as_str(),
                };
                <&str as serde::Serialize>::serialize(&name, serializer)
            }
        }

        impl $T {
            /// Tries to parse the given name into a variant, and returns `None`
            /// if no variant matched.
            pub(crate) fn from_str_without_other(name: &str) -> Option<Self> {
                match name {
                    $($name => Some($val),)*
                    _ => None,
                }
            }
        }
    };
}
