use chargenav_core::config::{parse_limit, CliConfigOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Chargenav - Nearest charging stations for electric vehicles
#[derive(Parser, Debug)]
#[command(name = "chargenav")]
#[command(about = "Nearest charging station ranking and trip estimation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./chargenav.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub vehicle: VehicleArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the vehicle profile and data sources
#[derive(Args, Debug, Default)]
pub struct VehicleArgs {
    /// Battery capacity in kWh
    #[arg(long, global = true, value_name = "KWH")]
    pub battery: Option<f64>,

    /// Current state of charge in percent
    #[arg(long, global = true, value_name = "PERCENT")]
    pub charge: Option<f64>,

    /// Average consumption in kWh per 100 km
    #[arg(long, global = true, value_name = "KWH")]
    pub consumption: Option<f64>,

    /// Energy price per kWh
    #[arg(long, global = true)]
    pub price: Option<f64>,

    /// Number of stations to list
    #[arg(long, global = true, value_parser = parse_limit_arg)]
    pub limit: Option<usize>,

    /// Routing service base URL (OSRM compatible)
    #[arg(long, global = true, value_name = "URL")]
    pub router_url: Option<String>,

    /// Station list: an http(s) URL or a JSON file
    #[arg(long, global = true, value_name = "SOURCE")]
    pub stations: Option<String>,
}

impl VehicleArgs {
    pub fn to_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            battery_capacity_kwh: self.battery,
            current_charge_percent: self.charge,
            average_consumption_per_100km: self.consumption,
            unit_energy_price: self.price,
            nearest_limit: self.limit,
            router_url: self.router_url.clone(),
            stations: self.stations.clone(),
        }
    }
}

fn parse_limit_arg(s: &str) -> Result<usize, String> {
    parse_limit(s).map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the nearest charging stations
    Nearby(NearbyArgs),

    /// Fetch the driving route to a station
    Route(RouteArgs),

    /// Estimate energy, cost and travel time for a distance
    Estimate(EstimateArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

/// User position; the configured default location is used when omitted
#[derive(Args, Debug, Default)]
pub struct PositionArgs {
    /// Latitude in degrees
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Reported position accuracy in meters
    #[arg(long, value_name = "METERS")]
    pub accuracy: Option<f64>,

    /// Read geolocation events as JSON lines from a file, or `-` for stdin
    ///
    /// The first event decides the position; if none arrives within
    /// `location_timeout_secs` the default location is used.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["lat", "lng"])]
    pub position_stream: Option<String>,
}

#[derive(Parser, Debug)]
pub struct NearbyArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Only stations with a free connector of a shown type
    #[arg(long)]
    pub only_available: bool,

    /// Hide DC stations
    #[arg(long)]
    pub no_dc: bool,

    /// Hide AC stations
    #[arg(long)]
    pub no_ac: bool,

    /// Include map marker descriptors in the output
    #[arg(long)]
    pub markers: bool,
}

#[derive(Parser, Debug)]
pub struct RouteArgs {
    /// Station identifier
    pub station_id: String,

    #[command(flatten)]
    pub position: PositionArgs,
}

#[derive(Parser, Debug)]
pub struct EstimateArgs {
    /// Trip distance in kilometers
    pub distance_km: f64,

    /// Departure hour (0-23); defaults to the current local hour
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from(["chargenav", "nearby", "--charge", "25", "--limit", "3"]);
        let overrides = cli.vehicle.to_overrides();
        assert_eq!(overrides.current_charge_percent, Some(25.0));
        assert_eq!(overrides.nearest_limit, Some(3));
        assert_eq!(overrides.battery_capacity_kwh, None);
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        assert!(Cli::try_parse_from(["chargenav", "nearby", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_latitude_requires_longitude() {
        assert!(Cli::try_parse_from(["chargenav", "nearby", "--lat", "39.9"]).is_err());

        let cli = Cli::parse_from(["chargenav", "route", "3", "--lat", "39.9", "--lng", "-32.8"]);
        match cli.command {
            Commands::Route(args) => {
                assert_eq!(args.station_id, "3");
                assert_eq!(args.position.lng, Some(-32.8));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_hour_range() {
        assert!(Cli::try_parse_from(["chargenav", "estimate", "20", "--hour", "24"]).is_err());
        assert!(Cli::try_parse_from(["chargenav", "estimate", "20", "--hour", "23"]).is_ok());
    }
}
