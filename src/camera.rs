use serde::Serialize;
use thiserror::Error;

// Web-mercator world tile size at zoom 0, Mapbox convention.
const WORLD_TILE_PX: f64 = 512.0;
const MAX_MERCATOR_LAT_DEG: f64 = 85.051_128_78;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("camera transform not ready")]
    NotReady,
}

/// A geographic coordinate, WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A point in view-space pixels, relative to the top-left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenOffset {
    pub x: f32,
    pub y: f32,
}

/// Projection through the map camera as it is at call time. The camera may
/// move between samples, so results are never cached across calls.
pub trait CameraTransform: Send + Sync {
    fn project(&self, point: GeoPoint) -> Result<ScreenOffset, ProjectionError>;
}

/// Web-mercator camera over a fixed viewport, standing in for the mapping
/// SDK's own projector.
#[derive(Debug, Clone)]
pub struct MercatorCamera {
    center: GeoPoint,
    zoom: f64,
    width_px: f32,
    height_px: f32,
}

impl MercatorCamera {
    pub fn new(center: GeoPoint, zoom: f64, width_px: f32, height_px: f32) -> Self {
        Self {
            center,
            zoom,
            width_px,
            height_px,
        }
    }

    fn world_size(&self) -> f64 {
        WORLD_TILE_PX * 2f64.powf(self.zoom)
    }

    fn world_point(&self, point: GeoPoint) -> (f64, f64) {
        let lat = point
            .latitude
            .clamp(-MAX_MERCATOR_LAT_DEG, MAX_MERCATOR_LAT_DEG);
        let sin = lat.to_radians().sin();
        let x = (point.longitude / 360.0 + 0.5) * self.world_size();
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI))
            * self.world_size();
        (x, y)
    }
}

impl CameraTransform for MercatorCamera {
    fn project(&self, point: GeoPoint) -> Result<ScreenOffset, ProjectionError> {
        if self.width_px <= 0.0 || self.height_px <= 0.0 {
            // View not laid out yet; callers retry on the next sample.
            return Err(ProjectionError::NotReady);
        }

        let (x, y) = self.world_point(point);
        let (cx, cy) = self.world_point(self.center);

        Ok(ScreenOffset {
            x: ((x - cx) + f64::from(self.width_px) / 2.0) as f32,
            y: ((y - cy) + f64::from(self.height_px) / 2.0) as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> MercatorCamera {
        MercatorCamera::new(GeoPoint::new(7.64506, 45.06069), 12.0, 400.0, 300.0)
    }

    #[test]
    fn center_lands_at_viewport_midpoint() {
        let projected = camera().project(GeoPoint::new(7.64506, 45.06069)).unwrap();
        assert!((projected.x - 200.0).abs() < 1e-3);
        assert!((projected.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn axes_point_east_and_south() {
        let cam = camera();
        let east = cam.project(GeoPoint::new(7.7, 45.06069)).unwrap();
        assert!(east.x > 200.0);

        let north = cam.project(GeoPoint::new(7.64506, 45.1)).unwrap();
        assert!(north.y < 150.0);
    }

    #[test]
    fn zooming_in_doubles_pixel_distance() {
        let near = MercatorCamera::new(GeoPoint::new(7.64506, 45.06069), 13.0, 400.0, 300.0);
        let far = camera();

        let point = GeoPoint::new(7.7, 45.06069);
        let dx_far = far.project(point).unwrap().x - 200.0;
        let dx_near = near.project(point).unwrap().x - 200.0;
        assert!((dx_near / dx_far - 2.0).abs() < 1e-3);
    }

    #[test]
    fn zero_sized_viewport_is_not_ready() {
        let cam = MercatorCamera::new(GeoPoint::new(7.64506, 45.06069), 12.0, 0.0, 0.0);
        assert!(matches!(
            cam.project(GeoPoint::new(7.64506, 45.06069)),
            Err(ProjectionError::NotReady)
        ));
    }
}
