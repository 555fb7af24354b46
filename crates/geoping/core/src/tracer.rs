use std::{env, ffi::OsStr};

#[cfg(feature = "otlp")]
use opentelemetry_otlp as otlp;
use tracing::{dispatcher, Subscriber};
use tracing_subscriber::{
    layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer, Registry,
};

fn init_once_opentelemetry(export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // Set default service name
    {
        const SERVICE_NAME_KEY: &str = "OTEL_SERVICE_NAME";
        const SERVICE_NAME_VALUE: &str = "geoping";

        if env::var_os(SERVICE_NAME_KEY).is_none() {
            env::set_var(SERVICE_NAME_KEY, SERVICE_NAME_VALUE);
        }
    }

    fn init_layer_env_filter<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        ::tracing_subscriber::EnvFilter::from_default_env()
    }

    fn init_layer_stdfmt<S>() -> impl Layer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        ::tracing_subscriber::fmt::layer().with_writer(::std::io::stderr)
    }

    #[cfg(feature = "trace")]
    fn init_layer_otlp_tracer<S>() -> Option<impl Layer<S>>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        use opentelemetry_sdk::runtime::Tokio as Runtime;

        match otlp::new_pipeline()
            .tracing()
            .with_exporter(otlp::new_exporter().tonic())
            .install_batch(Runtime)
        {
            Ok(tracer) => Some(::tracing_opentelemetry::OpenTelemetryLayer::new(tracer)),
            Err(error) => {
                eprintln!("failed to init a tracer: {error}");
                None
            }
        }
    }

    let layer = Registry::default()
        .with(init_layer_env_filter())
        .with(init_layer_stdfmt());

    if export {
        #[cfg(feature = "trace")]
        let layer = layer.with(init_layer_otlp_tracer());

        layer.init()
    } else {
        layer.init()
    }
}

pub fn init_once() {
    init_once_with_default(true)
}

pub fn init_once_with(level: impl AsRef<OsStr>, export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // set custom tracing level
    ::std::env::set_var(KEY, level);

    init_once_opentelemetry(export)
}

pub fn init_once_with_default(export: bool) {
    // Skip init if has been set
    if dispatcher::has_been_set() {
        return;
    }

    // set default tracing level
    if ::std::env::var_os(KEY).is_none() {
        ::std::env::set_var(KEY, "INFO");
    }

    init_once_opentelemetry(export)
}

pub fn init_once_with_level_int(level: u8, export: bool) {
    init_once_with(level_name(level), export)
}

/// Maps a `-d` flag count into a `RUST_LOG` level.
///
/// Counts above 3 saturate to `TRACE`.
pub const fn level_name(level: u8) -> &'static str {
    match level {
        0 => "WARN",
        1 => "INFO",
        2 => "DEBUG",
        _ => "TRACE",
    }
}

const KEY: &str = "RUST_LOG";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_name_follows_flag_count() {
        assert_eq!(level_name(0), "WARN");
        assert_eq!(level_name(1), "INFO");
        assert_eq!(level_name(2), "DEBUG");
        assert_eq!(level_name(3), "TRACE");
        assert_eq!(level_name(9), "TRACE");
    }
}
