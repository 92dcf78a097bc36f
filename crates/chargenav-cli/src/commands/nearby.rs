//! Nearby command implementation

use super::show_notices;
use crate::cli::NearbyArgs;
use crate::output::OutputWriter;
use crate::output_types::{MarkersOutput, NearbyOutput, OriginOutput};
use crate::session;
use anyhow::Result;
use chargenav_core::config::LayeredConfig;
use chargenav_core::models::{LocationQuality, RankedStation, StationFilter};
use chargenav_ranking::energy::range_km;
use tabled::Tabled;

pub async fn execute(
    args: NearbyArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let filter = StationFilter::new()
        .only_available(args.only_available)
        .show_dc(!args.no_dc)
        .show_ac(!args.no_ac);

    let session = session::load(config, &args.position, filter).await?;
    let state = &session.state;

    let origin = state
        .location()
        .coordinate()
        .zip(state.location().quality())
        .map(|(coordinate, quality)| OriginOutput { coordinate, quality });

    if output.is_json() {
        let markers = args.markers.then(|| MarkersOutput {
            user: state.user_marker(),
            stations: state.markers(),
        });
        output.result(NearbyOutput {
            origin,
            source: session.source.clone(),
            range_km: range_km(&state.profile),
            stations: state.ranking.stations().to_vec(),
            markers,
            notices: state.notices.clone(),
        })?;
        return Ok(());
    }

    show_notices(&state.notices, output);

    output.section("Nearest Charging Stations");
    if let Some(origin) = &origin {
        let label = match origin.quality {
            LocationQuality::Live => "",
            LocationQuality::Fallback => " (default location)",
        };
        output.kv("From", format!("{}{}", origin.coordinate, label));
    }
    output.kv("Stations", &session.source);
    output.kv("Range", format!("{:.1} km", range_km(&state.profile)));

    let rows: Vec<StationRow> = state.ranking.stations().iter().map(StationRow::from).collect();
    output.table(rows);

    if args.markers {
        output.section("Markers");
        for marker in state.markers() {
            let bearing = marker
                .bearing_degrees
                .map(|b| format!(" bearing {:.0}°", b))
                .unwrap_or_default();
            output.kv(&marker.station_id, format!("{:?} {}{}", marker.icon, marker.label, bearing));
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct StationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "ETA")]
    eta: String,
    #[tabled(rename = "DC")]
    dc: String,
    #[tabled(rename = "AC")]
    ac: String,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Charge on arrival")]
    arrival_charge: String,
}

impl From<&RankedStation> for StationRow {
    fn from(ranked: &RankedStation) -> Self {
        let station = &ranked.station;
        let arrival_charge = if ranked.is_within_range {
            format!("{:.1}%", ranked.display_arrival_charge_percent())
        } else {
            "out of range".to_string()
        };

        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            distance: format!("{:.1} km", ranked.distance_km),
            eta: format!("{} min ({})", ranked.estimated_duration_minutes, ranked.arrival_clock()),
            dc: format!("{}/{}", station.available_dc, station.connector_count),
            ac: format!("{}/{}", station.available_ac, station.ac_connector_count),
            energy: format!("{:.2} kWh", ranked.consumption_kwh),
            cost: format!("{:.2}", ranked.cost_estimate),
            arrival_charge,
        }
    }
}
