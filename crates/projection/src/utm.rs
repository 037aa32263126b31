//! Universal Transverse Mercator on the WGS84 ellipsoid.
//!
//! Forward and inverse mappings use the USGS series expansion, accurate to
//! millimeters within a zone's normal extent.

/// WGS84 semi-major axis, meters.
const WGS84_A: f64 = 6_378_137.0;

/// WGS84 inverse flattening.
const WGS84_INV_F: f64 = 298.257_223_563;

/// Scale factor on the central meridian.
const K0: f64 = 0.9996;

/// False easting applied to every zone, meters.
const FALSE_EASTING: f64 = 500_000.0;

/// False northing for the southern hemisphere, meters.
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// One UTM zone on WGS84.
///
/// Derived ellipsoid constants are computed once at construction and reused
/// by every conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmZone {
    zone: u8,
    north: bool,
    central_meridian: f64,
    e2: f64,
    ep2: f64,
    e1: f64,
    c0: f64,
    c2: f64,
    c4: f64,
    c6: f64,
}

impl UtmZone {
    /// Zone 1..=60, `north` selects the hemisphere.
    pub fn new(zone: u8, north: bool) -> Self {
        let f = 1.0 / WGS84_INV_F;
        let e2 = f * (2.0 - f);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let sqrt_one_minus_e2 = (1.0 - e2).sqrt();

        Self {
            zone,
            north,
            central_meridian: f64::from(zone) * 6.0 - 183.0,
            e2,
            ep2: e2 / (1.0 - e2),
            e1: (1.0 - sqrt_one_minus_e2) / (1.0 + sqrt_one_minus_e2),
            c0: 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0,
            c2: 3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0,
            c4: 15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0,
            c6: 35.0 * e6 / 3072.0,
        }
    }

    /// Zone 31 north, covering 0°E to 6°E.
    pub fn zone_31_north() -> Self {
        Self::new(31, true)
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn is_north(&self) -> bool {
        self.north
    }

    /// Central meridian longitude, degrees.
    pub fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    fn false_northing(&self) -> f64 {
        if self.north {
            0.0
        } else {
            FALSE_NORTHING_SOUTH
        }
    }

    /// Meridian arc length from the equator, meters. `lat` in radians.
    fn meridian_arc(&self, lat: f64) -> f64 {
        WGS84_A
            * (self.c0 * lat - self.c2 * (2.0 * lat).sin() + self.c4 * (4.0 * lat).sin()
                - self.c6 * (6.0 * lat).sin())
    }

    /// Geographic (lon, lat) degrees to (easting, northing) meters.
    pub fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let mut dlon = lon - self.central_meridian;
        while dlon > 180.0 {
            dlon -= 360.0;
        }
        while dlon < -180.0 {
            dlon += 360.0;
        }
        let dlam = dlon.to_radians();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = WGS84_A / (1.0 - self.e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = self.ep2 * cos_phi * cos_phi;
        let a = cos_phi * dlam;
        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a2 * a2;
        let a5 = a4 * a;
        let a6 = a4 * a2;

        let easting = FALSE_EASTING
            + K0 * n
                * (a + (1.0 - t + c) * a3 / 6.0
                    + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * self.ep2) * a5 / 120.0);

        let northing = self.false_northing()
            + K0 * (self.meridian_arc(phi)
                + n * tan_phi
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * self.ep2) * a6
                            / 720.0));

        (easting, northing)
    }

    /// (easting, northing) meters to geographic (lon, lat) degrees.
    pub fn inverse(&self, easting: f64, northing: f64) -> (f64, f64) {
        let x = easting - FALSE_EASTING;
        let y = northing - self.false_northing();

        let mu = y / K0 / (WGS84_A * self.c0);

        let e1 = self.e1;
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_2 * e1_2;

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let c1 = self.ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let denom = 1.0 - self.e2 * sin_phi1 * sin_phi1;
        let n1 = WGS84_A / denom.sqrt();
        let r1 = WGS84_A * (1.0 - self.e2) / (denom * denom.sqrt());
        let d = x / (n1 * K0);
        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d2 * d2;
        let d5 = d4 * d;
        let d6 = d4 * d2;

        let lat = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * self.ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * self.ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lon = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * self.ep2 + 24.0 * t1 * t1)
                * d5
                / 120.0)
            / cos_phi1;

        (self.central_meridian + lon.to_degrees(), lat.to_degrees())
    }
}

impl Default for UtmZone {
    fn default() -> Self {
        Self::zone_31_north()
    }
}
