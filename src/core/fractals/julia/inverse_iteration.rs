use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::errors::InvalidArgument;
use crate::core::util::pixel_mapping::PixelMapping;
use rand::Rng;

pub const DEFAULT_TRANSIENT: usize = 10_000;
pub const DEFAULT_POINT_COUNT: usize = 25_000;

/// Traces a Julia set with the inverse map `z -> ±√(z - c)`.
///
/// Backward orbits are attracted to the Julia set, so after a transient every
/// emitted point lies on (or very near) it. The branch is picked at random on
/// every step so both preimages get explored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseIteration {
    c: Complex,
    transient: usize,
    count: usize,
}

impl InverseIteration {
    pub fn new(c: Complex) -> Result<Self, InvalidArgument> {
        if !c.is_finite() {
            return Err(InvalidArgument::NonFiniteInput {
                name: "c",
                real: c.real,
                imag: c.imag,
            });
        }

        Ok(Self {
            c,
            transient: DEFAULT_TRANSIENT,
            count: DEFAULT_POINT_COUNT,
        })
    }

    #[must_use]
    pub fn with_transient(self, transient: usize) -> Self {
        Self { transient, ..self }
    }

    #[must_use]
    pub fn with_count(self, count: usize) -> Self {
        Self { count, ..self }
    }

    /// Traces from a random far-away start using the thread-local generator.
    #[must_use]
    pub fn trace(&self) -> Vec<Complex> {
        let mut rng = rand::thread_rng();
        let start = Complex::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0));

        self.trace_from(start, &mut rng)
    }

    /// Discards `transient` points from `start`, then returns the next `count`.
    pub fn trace_from<R: Rng + ?Sized>(&self, start: Complex, rng: &mut R) -> Vec<Complex> {
        let mut z = start;

        for _ in 0..self.transient {
            z = self.inverse_step(z, rng);
        }

        (0..self.count)
            .map(|_| {
                let point = z;
                z = self.inverse_step(z, rng);
                point
            })
            .collect()
    }

    fn inverse_step<R: Rng + ?Sized>(&self, z: Complex, rng: &mut R) -> Complex {
        let root = (z - self.c).sqrt();

        if rng.gen_bool(0.5) { root } else { -root }
    }
}

/// Hit counts of traced points over a pixel grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointRaster {
    width: u32,
    height: u32,
    hits: Vec<u32>,
}

impl PointRaster {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn hits(&self, pixel: Point) -> u32 {
        if pixel.x < 0 || pixel.y < 0 || pixel.x as u32 >= self.width || pixel.y as u32 >= self.height
        {
            return 0;
        }

        self.hits[pixel.y as usize * self.width as usize + pixel.x as usize]
    }

    /// Number of pixels hit at least once.
    #[must_use]
    pub fn lit_pixels(&self) -> usize {
        self.hits.iter().filter(|&&hits| hits > 0).count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.hits.chunks(self.width as usize)
    }
}

/// Bins `points` into the nearest pixels of `mapping`. Points off the grid
/// are dropped.
#[must_use]
pub fn rasterize_points(points: &[Complex], mapping: &PixelMapping) -> PointRaster {
    let width = mapping.width();
    let height = mapping.height();
    let mut hits = vec![0; width as usize * height as usize];

    for pixel in points
        .iter()
        .filter_map(|&point| mapping.complex_to_nearest_pixel(point))
    {
        hits[pixel.y as usize * width as usize + pixel.x as usize] += 1;
    }

    PointRaster {
        width,
        height,
        hits,
    }
}
