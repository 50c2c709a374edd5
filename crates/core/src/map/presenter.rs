use geo::Point;

use crate::{
    map::{
        MapCenter, Region,
        overlay::{OverlayStyle, RouteOverlay},
    },
    route::Route,
    ui::{UiCommand, UiQueue},
};

/// Owns what the map shows: the viewport, the user dot and the route overlay.
#[derive(Debug)]
pub struct MapPresenter {
    ui: UiQueue,
    viewport: Region,
    style: OverlayStyle,
}

impl MapPresenter {
    pub fn new(ui: UiQueue, viewport: Region, style: OverlayStyle) -> Self {
        Self {
            ui,
            viewport,
            style,
        }
    }

    pub fn show_user_location(&self) {
        self.ui.post(UiCommand::ShowUserLocation(true));
    }

    pub fn center_on(&mut self, location: Point, span_meters: f64) {
        let region = Region::square(location, span_meters);
        self.viewport = region;
        self.ui.post(UiCommand::SetRegion {
            region,
            animated: true,
        });
    }

    pub fn current_center(&self) -> MapCenter {
        self.viewport.center
    }

    pub fn viewport(&self) -> Region {
        self.viewport
    }

    /// Record the viewport the platform reports after a gesture settles.
    /// A region without a finite centre is ignored and `false` returned.
    pub fn viewport_settled(&mut self, region: Region) -> bool {
        let (x, y) = region.center.x_y();
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }

        self.viewport = region;
        true
    }

    pub fn clear_route(&self) {
        self.ui.post(UiCommand::RemoveAllOverlays);
    }

    /// Replace the drawn route with `routes`, fitting the view to the last one.
    pub fn show_route(&mut self, routes: &[Route]) {
        self.clear_route();

        let mut fit = None;
        for route in routes {
            self.ui.post(UiCommand::AddOverlay(RouteOverlay::new(
                route.polyline.clone(),
                self.style,
            )));
            fit = route.bounding_rect().or(fit);
        }

        if let Some(rect) = fit {
            self.viewport = Region::from_rect(rect);
            self.ui.post(UiCommand::SetVisibleRect {
                rect,
                animated: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use geo::line_string;

    use super::*;
    use crate::ui::ui_queue;

    fn presenter() -> (MapPresenter, crate::ui::UiReceiver) {
        let (ui, receiver) = ui_queue();
        let presenter = MapPresenter::new(
            ui,
            Region::square(Point::new(0.0, 0.0), 1_000.0),
            OverlayStyle::default(),
        );
        (presenter, receiver)
    }

    #[test]
    fn test_center_on_moves_current_center() {
        let (mut presenter, mut receiver) = presenter();
        let home = Point::new(-0.1585, 51.5238);

        presenter.center_on(home, 10_000.0);

        assert_eq!(presenter.current_center(), home);
        assert_eq!(
            receiver.drain(),
            vec![UiCommand::SetRegion {
                region: Region::square(home, 10_000.0),
                animated: true
            }]
        );
    }

    #[test]
    fn test_show_route_clears_before_drawing_and_fits_last() {
        let (mut presenter, mut receiver) = presenter();
        let first = Route::new(
            line_string![(x: 0.0, y: 0.0), (x: 0.01, y: 0.01)],
            1_500.0,
            Duration::from_secs(180),
        );
        let second = Route::new(
            line_string![(x: 0.0, y: 0.0), (x: -0.02, y: 0.005)],
            2_300.0,
            Duration::from_secs(240),
        );

        presenter.show_route(&[first.clone(), second.clone()]);

        let commands = receiver.drain();
        assert_eq!(commands.len(), 4);
        assert_eq!(commands[0], UiCommand::RemoveAllOverlays);
        assert!(matches!(&commands[1], UiCommand::AddOverlay(o) if o.polyline == first.polyline));
        assert!(matches!(&commands[2], UiCommand::AddOverlay(o) if o.polyline == second.polyline));
        assert_eq!(
            commands[3],
            UiCommand::SetVisibleRect {
                rect: second.bounding_rect().unwrap(),
                animated: true
            }
        );
    }

    #[test]
    fn test_empty_route_set_only_clears() {
        let (mut presenter, mut receiver) = presenter();
        let before = presenter.viewport();

        presenter.show_route(&[]);

        assert_eq!(receiver.drain(), vec![UiCommand::RemoveAllOverlays]);
        assert_eq!(presenter.viewport(), before);
    }

    #[test]
    fn test_settle_rejects_non_finite_center() {
        let (mut presenter, mut receiver) = presenter();
        let before = presenter.viewport();

        assert!(!presenter.viewport_settled(Region::new(Point::new(f64::NAN, 0.0), 0.01, 0.01)));
        assert_eq!(presenter.viewport(), before);

        let moved = Region::new(Point::new(0.5, 0.5), 0.01, 0.01);
        assert!(presenter.viewport_settled(moved));
        assert_eq!(presenter.current_center(), moved.center);
        assert!(receiver.drain().is_empty());
    }
}
