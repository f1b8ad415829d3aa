//! Plain-text rendering of command results

use std::fmt::Write as _;

use application::{RouteBatch, RouteView, format_distance_km, format_duration_minutes};
use domain::{CandidateRoute, Destination};

/// One line per route, stops indented below
#[must_use]
pub fn render_batch(batch: &RouteBatch) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Routes from {} (generation {}):",
        batch.origin, batch.generation
    );
    for route in &batch.routes {
        out.push_str(&render_route(route));
    }
    if let Some(stats) = &batch.statistics {
        let _ = writeln!(
            out,
            "Optimizer: {} generations, {:.1}% improvement",
            stats.total_generations, stats.improvement_percentage
        );
    }
    out
}

/// Route header line plus numbered stops
#[must_use]
pub fn render_route(route: &CandidateRoute) -> String {
    let mut out = String::new();
    let duration = route
        .estimated_duration_minutes()
        .map_or_else(|| "durasi tidak tersedia".to_string(), format_duration_minutes);
    let marker = if route.reconciliation().is_reconciled() {
        ""
    } else {
        " (jarak garis lurus)"
    };
    let _ = writeln!(
        out,
        "#{} {}, {}{marker}",
        route.rank(),
        format_distance_km(route.total_distance_km()),
        duration
    );
    for (index, destination) in route.destinations().iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", index + 1, destination.name);
    }
    out
}

/// Summary of a drawn route
#[must_use]
pub fn render_view(view: &RouteView) -> String {
    let figures = view
        .summary()
        .unwrap_or_else(|| "rute jalan tidak tersedia, garis lurus ditampilkan".to_string());
    format!(
        "Route #{} ({}): {} [{} vertices]",
        view.rank,
        view.mode.label(),
        figures,
        view.geometry.len()
    )
}

/// One line per destination
#[must_use]
pub fn render_destinations(destinations: &[Destination]) -> String {
    let mut out = String::new();
    for destination in destinations {
        let _ = writeln!(
            out,
            "{:<12} {:<40} {:<24} {}",
            destination.place_id.as_deref().unwrap_or("-"),
            destination.name,
            destination.categories.join(","),
            destination.coordinates
        );
    }
    let _ = writeln!(out, "{} destination(s)", destinations.len());
    out
}

#[cfg(test)]
mod tests {
    use application::RenderKind;
    use domain::{ReconciliationOutcome, TransportMode, Waypoint};

    use super::*;

    fn batch(routes: Vec<CandidateRoute>) -> RouteBatch {
        RouteBatch {
            generation: 3,
            origin: Waypoint::surabaya(),
            routes,
            statistics: None,
            generated_at: chrono::Utc::now(),
        }
    }

    fn route(rank: u32, km: f64) -> CandidateRoute {
        let stops = vec![
            Destination::new("Tugu Pahlawan", Waypoint::new(-7.2459, 112.7378).unwrap()),
            Destination::new("House of Sampoerna", Waypoint::new(-7.2307, 112.7342).unwrap()),
        ];
        CandidateRoute::new(rank, stops, km).unwrap()
    }

    #[test]
    fn unreconciled_route_is_marked() {
        let text = render_route(&route(1, 4.26));
        assert!(text.starts_with("#1 4.3 km, durasi tidak tersedia (jarak garis lurus)"));
        assert!(text.contains("    2. House of Sampoerna"));
    }

    #[test]
    fn reconciled_route_shows_duration() {
        let mut r = route(1, 4.0);
        r.apply_outcome(&ReconciliationOutcome::Reconciled {
            distance_km: 6.5,
            duration_minutes: 75.0,
        });
        let text = render_route(&r);
        assert!(text.starts_with("#1 6.5 km, 1 jam 15 menit\n"));
    }

    #[test]
    fn batch_lists_every_route() {
        let text = render_batch(&batch(vec![route(1, 2.0), route(2, 3.0)]));
        assert!(text.contains("generation 3"));
        assert!(text.contains("#1 2.0 km"));
        assert!(text.contains("#2 3.0 km"));
    }

    #[test]
    fn fallback_view_says_so() {
        let view = RouteView {
            rank: 2,
            mode: TransportMode::Walking,
            kind: RenderKind::StraightLine,
            geometry: vec![Waypoint::surabaya(), Waypoint::surabaya_center()],
            distance_km: None,
            duration_minutes: None,
        };
        let text = render_view(&view);
        assert!(text.contains("Jalan Kaki"));
        assert!(text.contains("garis lurus"));
        assert!(text.ends_with("[2 vertices]"));
    }

    #[test]
    fn destinations_have_a_count() {
        let text = render_destinations(&[Destination::new("Taman Bungkul", Waypoint::surabaya())]);
        assert!(text.contains("Taman Bungkul"));
        assert!(text.ends_with("1 destination(s)\n"));
    }
}
