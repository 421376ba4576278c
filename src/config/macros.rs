/// Configuration macros
///
/// `config_struct!` defines a configuration section with its defaults inline.

/// Define a configuration struct with embedded defaults
///
/// Generates:
/// - the struct with public fields
/// - a `Default` implementation built from the inline values
/// - serde support with `#[serde(default)]`, so partial TOML tables work
/// - `FIELDS`, the list of accepted keys (used to warn about typos in config files)
///
/// # Example
/// ```
/// tokenscope::config_struct! {
///     pub struct CacheSection {
///         ttl_secs: u64 = 300,
///         enabled: bool = true,
///     }
/// }
///
/// let section = CacheSection::default();
/// assert_eq!(section.ttl_secs, 300);
/// assert_eq!(CacheSection::FIELDS, &["ttl_secs", "enabled"]);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl $name {
            /// Keys accepted in this section
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field_name)),*];
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
