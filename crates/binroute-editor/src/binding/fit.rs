//! Fit-to-content target selection.

use binroute_core::Point;

use crate::session::EditSession;

/// What the viewport was fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitTarget {
    SelectedBin,
    /// The route leg starting at this point index
    ActiveSegment(usize),
    Route,
    Boundary,
    /// Every bin and anchor
    Markers,
}

/// Picks the geometry to fit, most specific first: selected bin, current
/// edit segment, full route, boundary, then all markers.
///
/// Returns `None` when the session has nothing to show.
pub fn fit_points(session: &EditSession, active_segment: Option<usize>) -> Option<(FitTarget, Vec<Point>)> {
    if let Some(bin) = session.selected_marker() {
        return Some((FitTarget::SelectedBin, vec![bin.location]));
    }

    let route = session.route_points();
    if let Some(index) = active_segment {
        if let Some(leg) = route.get(index..).and_then(|rest| rest.get(..2)) {
            return Some((FitTarget::ActiveSegment(index), leg.to_vec()));
        }
    }

    if !route.is_empty() {
        return Some((FitTarget::Route, route.to_vec()));
    }

    if let Some(boundary) = &session.boundary {
        return Some((FitTarget::Boundary, boundary.ring().to_vec()));
    }

    let markers: Vec<Point> = session
        .bins
        .iter()
        .map(|bin| bin.location)
        .chain(session.start)
        .chain(session.end)
        .collect();
    (!markers.is_empty()).then_some((FitTarget::Markers, markers))
}
