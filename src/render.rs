use std::io;

use thiserror::Error;
use tracing::warn;

use crate::CellOffset;
use crate::grid::Grid;

/// How far the fill quad of a cell sits inside its border, in pixels
pub const FILL_INSET: u32 = 2;

/// RGB color with channels in `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to bytes
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let f = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;

        (f(self.r), f(self.g), f(self.b))
    }
}

/// A point in screen pixels, `y` growing upwards
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Four points forming a convex polygon, all wound the same way
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Axis aligned square with its bottom left corner at `(x, y)`
    pub fn square(x: f32, y: f32, side: f32) -> Self {
        Quad([
            Point::new(x, y),
            Point::new(x, y + side),
            Point::new(x + side, y + side),
            Point::new(x + side, y),
        ])
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error while presenting: {0}")]
    Io(#[from] io::Error),

    #[error("Rendering context could not be reacquired")]
    ContextLost,
}

/// Something quads can be drawn on, then shown
pub trait Canvas {
    /// Fill the whole canvas with `color`
    fn clear(&mut self, color: Color);

    /// Fill `quad` with a single `color`
    fn draw_quad(&mut self, quad: &Quad, color: Color);

    /// Show everything drawn since the last `present`
    fn present(&mut self) -> Result<(), RenderError>;

    /// Whether the canvas can still be drawn on
    fn is_current(&self) -> bool;

    fn make_current(&mut self) -> Result<(), RenderError>;
}

/// Draws a [`Grid`] as one bordered square per cell.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    cell_size: u32,
    inset: u32,
}

impl Renderer {
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size,
            inset: FILL_INSET,
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Draw every cell of `grid` and present the result.
    ///
    /// A canvas that lost its context is reacquired first.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, grid: &Grid) -> Result<(), RenderError> {
        if !canvas.is_current() {
            warn!("rendering context lost, reacquiring");
            canvas.make_current()?;

            if !canvas.is_current() {
                return Err(RenderError::ContextLost);
            }
        }

        canvas.clear(Color::BLACK);

        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let alive = grid.get(x as CellOffset, y as CellOffset);
                self.draw_cell(canvas, x, y, alive);
            }
        }

        canvas.present()
    }

    fn draw_cell<C: Canvas + ?Sized>(&self, canvas: &mut C, x: usize, y: usize, alive: bool) {
        let side = self.cell_size as f32;
        let inset = self.inset as f32;
        let (x, y) = (x as f32 * side, y as f32 * side);

        canvas.draw_quad(&Quad::square(x, y, side), Color::GREY);

        let fill = if alive { Color::WHITE } else { Color::BLACK };
        canvas.draw_quad(&Quad::square(x + inset, y + inset, side - 2.0 * inset), fill);
    }
}

/// Software rasteriser. Pixel `(x, y)` has its bottom left corner at `(x, y)`.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    pixels: Vec<Color>,
    width: usize,
    height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width, "x is out of bounds");
        assert!(y < self.height, "y is out of bounds");

        self.pixels[y * self.width + x]
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fill every pixel whose centre lies inside `quad`
    pub fn fill_quad(&mut self, quad: &Quad, color: Color) {
        let Quad(points) = quad;

        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let clamp = |v: f32, hi: usize| (v.max(0.0) as usize).min(hi);
        let (x0, x1) = (clamp(min_x.floor(), self.width), clamp(max_x.ceil(), self.width));
        let (y0, y1) = (clamp(min_y.floor(), self.height), clamp(max_y.ceil(), self.height));

        for y in y0..y1 {
            for x in x0..x1 {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);

                if contains(points, centre) {
                    self.pixels[y * self.width + x] = color;
                }
            }
        }
    }
}

/// Whether `p` is inside the convex polygon `points`, whichever way it is wound
fn contains(points: &[Point; 4], p: Point) -> bool {
    let (mut pos, mut neg) = (false, false);

    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);

        pos |= cross > 0.0;
        neg |= cross < 0.0;
    }

    !(pos && neg)
}

impl Canvas for Framebuffer {
    fn clear(&mut self, color: Color) {
        self.fill(color);
    }

    fn draw_quad(&mut self, quad: &Quad, color: Color) {
        self.fill_quad(quad, color);
    }

    fn present(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    fn is_current(&self) -> bool {
        true
    }

    fn make_current(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn square_fills_exactly_its_pixels() {
        let mut fb = Framebuffer::new(8, 8);

        fb.fill_quad(&Quad::square(2.0, 3.0, 2.0), Color::WHITE);

        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..4).contains(&x) && (3..5).contains(&y);
                let want = if inside { Color::WHITE } else { Color::BLACK };

                assert_eq!(fb.pixel(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn winding_does_not_matter() {
        let mut fb = Framebuffer::new(4, 4);
        let Quad([a, b, c, d]) = Quad::square(0.0, 0.0, 4.0);

        fb.fill_quad(&Quad([d, c, b, a]), Color::GREY);

        assert_eq!(fb.pixel(0, 0), Color::GREY);
        assert_eq!(fb.pixel(3, 3), Color::GREY);
    }

    #[test]
    fn quads_are_clipped() {
        let mut fb = Framebuffer::new(4, 4);

        fb.fill_quad(&Quad::square(-2.0, 2.0, 10.0), Color::WHITE);

        assert_eq!(fb.pixel(0, 1), Color::BLACK);
        assert_eq!(fb.pixel(0, 2), Color::WHITE);
        assert_eq!(fb.pixel(3, 3), Color::WHITE);
    }

    #[test]
    fn cells_have_grey_border_and_fill() {
        let grid = Grid::with_cells(2, 1, [(1, 0)]);
        let mut fb = Framebuffer::new(12, 6);

        Renderer::new(6).draw(&mut fb, &grid).unwrap();

        // dead cell: border, then black inside
        assert_eq!(fb.pixel(0, 0), Color::GREY);
        assert_eq!(fb.pixel(1, 1), Color::GREY);
        assert_eq!(fb.pixel(2, 2), Color::BLACK);
        assert_eq!(fb.pixel(3, 3), Color::BLACK);
        assert_eq!(fb.pixel(4, 4), Color::GREY);

        // live cell
        assert_eq!(fb.pixel(6, 0), Color::GREY);
        assert_eq!(fb.pixel(8, 2), Color::WHITE);
        assert_eq!(fb.pixel(9, 3), Color::WHITE);
        assert_eq!(fb.pixel(10, 3), Color::GREY);
    }

    #[test]
    fn rgb8() {
        assert_eq!(Color::GREY.to_rgb8(), (128, 128, 128));
        assert_eq!(Color::WHITE.to_rgb8(), (255, 255, 255));
    }
}
