use crate::repl::events::ScalarField;
use crate::repl::models::{FormError, SimulationDraft};
use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile to read the simulation server from. Default is 'default'.
    /// If the profile is not configured, the local development server is used.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 's', long, help = "simulation server base URL (overrides the profile)")]
    server: Option<String>,

    #[clap(long, help = "submit once without the interactive form and print the results")]
    once: bool,

    #[clap(long, help = "arrival rate (λ)")]
    lambda: Option<String>,

    #[clap(
        long = "service-rate",
        help = "service rate of a station, repeat once per station"
    )]
    service_rates: Vec<String>,

    #[clap(long = "servers", help = "server count of a station, repeat once per station")]
    server_counts: Vec<String>,

    #[clap(long, help = "simulation duration")]
    time: Option<String>,

    #[clap(long = "chart-json", help = "write the chart description as JSON to this path")]
    chart_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    server: Option<String>,
    once: bool,
    lambda: Option<String>,
    service_rates: Vec<String>,
    server_counts: Vec<String>,
    time: Option<String>,
    chart_json: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            server: args.server,
            once: args.once,
            lambda: args.lambda,
            service_rates: args.service_rates,
            server_counts: args.server_counts,
            time: args.time,
            chart_json: args.chart_json,
        }
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn server(&self) -> Option<&str> {
        self.server.as_deref()
    }

    pub fn once(&self) -> bool {
        self.once
    }

    pub fn lambda(&self) -> Option<&str> {
        self.lambda.as_deref()
    }

    pub fn service_rates(&self) -> &[String] {
        &self.service_rates
    }

    pub fn server_counts(&self) -> &[String] {
        &self.server_counts
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn chart_json(&self) -> Option<&str> {
        self.chart_json.as_deref()
    }

    /// The default form with any simulation parameters given on the command line
    ///
    /// Unparsable values are kept in the draft and reported on submit.
    pub fn initial_draft(&self) -> Result<SimulationDraft, FormError> {
        let mut draft = SimulationDraft::new();

        if let Some(lambda) = self.lambda() {
            let _ = draft.update_scalar_field(ScalarField::ArrivalRate, lambda);
        }
        if let Some(time) = self.time() {
            let _ = draft.update_scalar_field(ScalarField::SimulationTime, time);
        }
        if !self.service_rates.is_empty() || !self.server_counts.is_empty() {
            draft.replace_stations(&self.service_rates, &self.server_counts)?;
        }

        Ok(draft)
    }
}
