use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::point::Point;
use crate::core::fractals::julia::inverse_iteration::PointRaster;

/// Light to dark. Dark pixels (the set interior) print densest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

fn luminance(colour: Colour) -> f64 {
    0.2126 * f64::from(colour.r) + 0.7152 * f64::from(colour.g) + 0.0722 * f64::from(colour.b)
}

fn ramp_char(darkness: f64) -> char {
    let last = RAMP.len() - 1;
    let index = (darkness.clamp(0.0, 1.0) * last as f64).round() as usize;

    char::from(RAMP[index.min(last)])
}

fn preview_rows(width: u32, height: u32, columns: u32) -> u32 {
    let rows = f64::from(columns) * f64::from(height) / f64::from(width) / CELL_ASPECT;

    (rows.round() as u32).max(1)
}

/// Nearest-sample downscale of a coloured frame to `columns` characters wide.
#[must_use]
pub fn ascii_preview(buffer: &PixelBuffer, columns: u32) -> String {
    let rect = buffer.pixel_rect();
    let (width, height) = (rect.width(), rect.height());
    let columns = columns.clamp(1, width);
    let rows = preview_rows(width, height, columns).min(height);

    let mut out = String::with_capacity(((columns + 1) * rows) as usize);

    for row in 0..rows {
        let y = (u64::from(row) * u64::from(height) / u64::from(rows)) as i32;

        for col in 0..columns {
            let x = (u64::from(col) * u64::from(width) / u64::from(columns)) as i32;
            let point = Point {
                x: rect.top_left().x + x,
                y: rect.top_left().y + y,
            };

            out.push(
                buffer
                    .pixel(point)
                    .map_or(' ', |colour| ramp_char(1.0 - luminance(colour) / 255.0)),
            );
        }

        out.push('\n');
    }

    out
}

/// Downscale of an inverse-iteration hit raster; any hit inside a character
/// cell marks it.
#[must_use]
pub fn raster_preview(raster: &PointRaster, columns: u32) -> String {
    let (width, height) = (raster.width(), raster.height());
    let columns = columns.clamp(1, width);
    let rows = preview_rows(width, height, columns).min(height);

    let mut cells = vec![0u32; (columns * rows) as usize];

    for (y, row) in raster.rows().enumerate() {
        let cell_row = (y as u64 * u64::from(rows) / u64::from(height)) as usize;

        for (x, &hits) in row.iter().enumerate() {
            let cell_col = (x as u64 * u64::from(columns) / u64::from(width)) as usize;
            cells[cell_row * columns as usize + cell_col] += hits;
        }
    }

    let peak = cells.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::with_capacity(((columns + 1) * rows) as usize);

    for row in cells.chunks(columns as usize) {
        for &hits in row {
            out.push(if hits == 0 {
                ' '
            } else {
                ramp_char(0.25 + 0.75 * f64::from(hits) / f64::from(peak))
            });
        }

        out.push('\n');
    }

    out
}
