/// Implement [`Record`](crate::Record) for a struct with a cached schema.
///
/// Each entry names the field as it should be looked up in the config,
/// followed by the struct field it fills. `field` entries take scalars and
/// slices; `section` entries take a nested record.
///
/// ```
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     workers: u8,
/// }
///
/// sectconf::record!(Server {
///     field "Host" => host,
///     field "Workers" => workers,
/// });
///
/// let mut conf: sectconf::Conf = "host: localhost\nworkers: 4".parse().unwrap();
/// let server: Server = sectconf::load_new(&mut conf).unwrap();
/// assert_eq!(server.workers, 4);
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($kind:ident $name:literal => $field:ident),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$ty>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::Schema::<$ty>::builder()
                        $(.$kind($name, |record| &mut record.$field))*
                        .build()
                })
            }
        }
    };
}
