pub mod iteration;
pub mod julia;
pub mod mandelbrot;
pub mod period;
pub mod render_mode;
