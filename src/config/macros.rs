//! Configuration macros
//!
//! `config_struct!` defines a configuration section with embedded defaults
//! in a single declaration.

/// Define a configuration struct with embedded defaults
///
/// Each field is declared as `name: Type = default`. The macro generates:
/// - The struct with public fields
/// - The Default implementation from the listed values
/// - Serde support with `#[serde(default)]`, so a TOML file only needs the
///   keys it wants to override
///
/// # Example
/// ```
/// movepump_watcher::config_struct! {
///     pub struct FilterConfig {
///         progress_threshold: f64 = 80.0,
///     }
/// }
///
/// assert_eq!(FilterConfig::default().progress_threshold, 80.0);
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
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
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
