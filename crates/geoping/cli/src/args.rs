use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{value_parser, ArgAction, Parser};
use geoping_api::{coordinate::Coordinate, provider::GeolocationProvider};
use geoping_reporter::LocationReporter;
use geoping_transport::HttpTransport;
use strum::{Display, EnumString};
use tracing::{debug, instrument, Level};
use url::Url;

type BoxProvider = Box<dyn GeolocationProvider + 'static + Send + Sync>;

/// Report the current geolocation to a server endpoint, once.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Turn debugging information on
    #[arg(short, long, global = true, env = "GEOPING_DEBUG", action = ArgAction::Count)]
    #[arg(value_parser = value_parser!(u8).range(..=3))]
    debug: u8,

    /// Endpoint receiving the `POST` with the location headers
    #[arg(long, env = "GEOPING_ENDPOINT", value_name = "URL")]
    endpoint: Url,

    /// Which geolocation provider to use
    #[arg(long, env = "GEOPING_PROVIDER", default_value_t = Provider::Fixed)]
    provider: Provider,

    /// Position reported by the fixed provider
    #[arg(
        long,
        env = "GEOPING_POSITION",
        value_name = "LATITUDE,LONGITUDE",
        allow_hyphen_values = true
    )]
    position: Option<Coordinate>,

    /// JSON lookup service queried by the http provider
    #[arg(long, env = "GEOPING_LOOKUP_URL", value_name = "URL")]
    lookup_url: Option<Url>,

    /// Bound on both position acquisition and the outbound request
    #[arg(long, env = "GEOPING_TIMEOUT_MS", value_name = "MILLISECONDS")]
    timeout_ms: Option<u64>,
}

impl Args {
    pub(crate) async fn run(self) -> Result<()> {
        self.init_logger();

        let reporter = self.init_reporter()?;
        debug!("reporting to {}", reporter.endpoint());

        // the outcome has already been logged; it never fails the process
        reporter.report().await;
        Ok(())
    }

    fn init_logger(&self) {
        ::geoping_core::tracer::init_once_with_level_int(self.debug, true)
    }

    #[instrument(level = Level::INFO, skip(self), err(Display))]
    fn init_reporter(&self) -> Result<LocationReporter<BoxProvider, HttpTransport>> {
        let timeout = self.timeout_ms.map(Duration::from_millis);

        let provider = self.provider.init_provider(self, timeout)?;
        let transport = HttpTransport::try_new(timeout)?;

        let reporter = LocationReporter::new(provider, transport, self.endpoint.clone());
        Ok(match timeout {
            Some(timeout) => reporter.with_acquisition_timeout(timeout),
            None => reporter,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub(crate) enum Provider {
    Fixed,
    #[cfg(feature = "provider-http")]
    Http,
    Unsupported,
}

impl Provider {
    #[cfg_attr(not(feature = "provider-http"), allow(unused_variables))]
    fn init_provider(&self, args: &Args, timeout: Option<Duration>) -> Result<BoxProvider> {
        match self {
            Self::Fixed => args
                .position
                .ok_or_else(|| anyhow!("the fixed provider requires a position (--position)"))
                .map(|position| {
                    Box::new(::geoping_provider::FixedProvider::new(position)) as BoxProvider
                }),
            #[cfg(feature = "provider-http")]
            Self::Http => args
                .lookup_url
                .clone()
                .ok_or_else(|| anyhow!("the http provider requires a lookup url (--lookup-url)"))
                .and_then(|url| ::geoping_provider::HttpProvider::try_new(url, timeout))
                .map(|provider| Box::new(provider) as BoxProvider),
            Self::Unsupported => {
                Ok(Box::new(::geoping_provider::UnsupportedProvider) as BoxProvider)
            }
        }
    }
}
