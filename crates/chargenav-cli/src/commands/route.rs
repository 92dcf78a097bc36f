//! Route command implementation

use super::show_notices;
use crate::cli::RouteArgs;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{RouteOutput, RouteSummary};
use crate::session;
use anyhow::Result;
use chargenav_core::config::LayeredConfig;
use chargenav_core::models::{StationFilter, StationId};
use chargenav_ranking::annotate;
use chargenav_routing::{directions_url, OsrmRouter, RouteCoordinator, RouteOutcome, Router};
use chargenav_session::{Action, RouteFailure};

pub async fn execute(
    args: RouteArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
) -> Result<()> {
    let session = session::load(config, &args.position, StationFilter::default()).await?;
    let station_id = StationId::new(args.station_id.as_str());

    let station = session
        .state
        .stations
        .iter()
        .find(|s| s.id == station_id)
        .cloned()
        .ok_or_else(|| errors::station_not_found(station_id.as_str(), &session.source))?;

    let Some(origin) = session.state.location().coordinate() else {
        anyhow::bail!("No position to route from");
    };

    let router = OsrmRouter::new(config.router_url.value.as_str());
    tracing::debug!("Routing to station {} via {}", station_id, router.name());
    let coordinator = RouteCoordinator::new(router);

    let session = session.dispatch(Action::StationSelected { station_id: station_id.clone() });
    let session = match coordinator.fetch_route(origin, &station).await {
        Ok(RouteOutcome::Applied(route)) => session.dispatch(Action::RouteLoaded { route }),
        Ok(RouteOutcome::Superseded) => session,
        Err(e) => session.dispatch(Action::RouteFailed {
            station_id: station_id.clone(),
            failure: RouteFailure::from_error(&e),
        }),
    };

    let state = &session.state;
    // Stations outside the nearest `limit` are not in the ranking
    let ranked = state.selected_station().cloned().unwrap_or_else(|| {
        let annotated = annotate(&station, &origin, &state.profile, session.now);
        match &state.route {
            Some(route) => annotated.with_route(route),
            None => annotated,
        }
    });
    let result = RouteOutput {
        station_id: station_id.clone(),
        station: ranked,
        route: state.route.as_ref().map(|route| RouteSummary {
            real_distance_km: route.real_distance_km,
            real_duration_minutes: route.real_duration_minutes(),
            path: route.path.clone(),
        }),
        directions_url: directions_url(&origin, &station.coordinate),
        notices: state.notices.clone(),
    };

    if output.is_json() {
        output.result(result)?;
        return Ok(());
    }

    show_notices(&state.notices, output);

    output.section(format!("Route to {}", station.name));
    if !station.address.is_empty() {
        output.kv("Address", &station.address);
    }
    let ranked = &result.station;
    output.kv("Straight line", format!("{:.1} km", ranked.distance_km));
    output.kv(
        "Estimate",
        format!(
            "{} min, arriving {}",
            ranked.estimated_duration_minutes,
            ranked.arrival_clock()
        ),
    );
    if ranked.is_within_range {
        output.kv("Charge on arrival", format!("{:.1}%", ranked.display_arrival_charge_percent()));
    } else {
        output.kv("Charge on arrival", "out of range");
    }
    match &result.route {
        Some(route) => {
            output.kv("Road distance", format!("{:.1} km", route.real_distance_km));
            output.kv("Driving time", format!("{} min", route.real_duration_minutes));
            output.kv("Path points", route.path.len());
        }
        None => output.info("No road route available; showing straight-line figures only"),
    }
    output.kv("Directions", &result.directions_url);

    Ok(())
}
