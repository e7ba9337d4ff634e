//! Minimal content stream interpreter.
//!
//! Tracks just enough graphics and text state to know where text was drawn,
//! in which fill color, and which filled rectangles lie underneath. Glyph
//! widths are estimated from the font size since font programs are not read.

use draftmatch_core::RawColor;
use lopdf::content::Operation;
use lopdf::Object;

/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.5;
/// Descender and ascender as fractions of the font size
const DESCENT: f32 = 0.2;
const ASCENT: f32 = 0.8;

/// Axis-aligned rectangle in user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Rectangle spanning the given points
    pub fn bounding(points: &[(f32, f32)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut rect = Rect {
            x0: first.0,
            y0: first.1,
            x1: first.0,
            y1: first.1,
        };
        for &(x, y) in rest {
            rect.x0 = rect.x0.min(x);
            rect.y0 = rect.y0.min(y);
            rect.x1 = rect.x1.max(x);
            rect.y1 = rect.y1.max(y);
        }
        Some(rect)
    }

    pub fn area(&self) -> f32 {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// Affine transform `[a b c d e f]`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translate(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self` applied first, then `other`
    fn then(&self, other: &Matrix) -> Matrix {
        let [a, b, c, d, e, f] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a * a2 + b * c2,
            a * b2 + b * d2,
            c * a2 + d * c2,
            c * b2 + d * d2,
            e * a2 + f * c2 + e2,
            e * b2 + f * d2 + f2,
        ])
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }
}

/// A piece of text drawn with one fill color
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bbox: Rect,
    /// Fill color, `None` when drawn in a color space that is not read
    pub fill: Option<RawColor>,
}

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilledShape {
    pub rect: Rect,
    pub fill: Option<RawColor>,
}

/// Text runs and filled shapes of one page, in drawing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub runs: Vec<TextRun>,
    pub shapes: Vec<FilledShape>,
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    ctm: Matrix,
    fill: Option<RawColor>,
    /// Fill color space is DeviceGray, DeviceRGB or DeviceCMYK
    device_fill: bool,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            fill: Some(RawColor::Gray(0.0)),
            device_fill: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

/// Collects text runs and filled shapes from page operations
#[derive(Debug, Default)]
pub struct Interpreter {
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    text: TextState,
    pending: Vec<Rect>,
    layout: PageLayout,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret all operations of one page
    pub fn run(mut self, operations: &[Operation]) -> PageLayout {
        for operation in operations {
            self.step(operation);
        }
        self.layout
    }

    fn step(&mut self, op: &Operation) {
        let nums = numbers(&op.operands);
        match op.operator.as_str() {
            "q" => self.stack.push(self.state),
            "Q" => {
                if let Some(state) = self.stack.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = matrix(&nums) {
                    self.state.ctm = m.then(&self.state.ctm);
                }
            }
            "g" | "rg" | "k" => {
                if let Some(color) = RawColor::from_components(&nums) {
                    self.state.fill = Some(color);
                    self.state.device_fill = true;
                }
            }
            "cs" => {
                let initial = match op.operands.first() {
                    Some(Object::Name(name)) => device_initial_color(name),
                    _ => None,
                };
                self.state.device_fill = initial.is_some();
                self.state.fill = initial;
            }
            // Separation, Indexed, Pattern and named spaces have tints or
            // indices as operands, not device components.
            "sc" | "scn" => {
                self.state.fill = if self.state.device_fill {
                    RawColor::from_components(&nums)
                } else {
                    None
                };
            }
            "BT" => {
                self.text.matrix = Matrix::IDENTITY;
                self.text.line_matrix = Matrix::IDENTITY;
            }
            "Tf" => {
                if let Some(&size) = nums.last() {
                    self.text.font_size = size;
                }
            }
            "TL" => {
                if let Some(&leading) = nums.first() {
                    self.text.leading = leading;
                }
            }
            "Td" => {
                if let [tx, ty] = nums[..] {
                    self.next_line(tx, ty);
                }
            }
            "TD" => {
                if let [tx, ty] = nums[..] {
                    self.text.leading = -ty;
                    self.next_line(tx, ty);
                }
            }
            "Tm" => {
                if let Some(m) = matrix(&nums) {
                    self.text.matrix = m;
                    self.text.line_matrix = m;
                }
            }
            "T*" => self.next_line(0.0, -self.text.leading),
            "Tj" => {
                if let Some(text) = op.operands.first().and_then(decode_string) {
                    self.show(&text);
                }
            }
            "'" | "\"" => {
                self.next_line(0.0, -self.text.leading);
                if let Some(text) = op.operands.last().and_then(decode_string) {
                    self.show(&text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "re" => {
                if let [x, y, w, h] = nums[..] {
                    let ctm = self.state.ctm;
                    let corners = [
                        ctm.apply(x, y),
                        ctm.apply(x + w, y),
                        ctm.apply(x, y + h),
                        ctm.apply(x + w, y + h),
                    ];
                    if let Some(rect) = Rect::bounding(&corners) {
                        self.pending.push(rect);
                    }
                }
            }
            "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                let fill = self.state.fill;
                self.layout.shapes.extend(
                    self.pending
                        .drain(..)
                        .map(|rect| FilledShape { rect, fill }),
                );
            }
            "n" | "S" | "s" => self.pending.clear(),
            _ => {}
        }
    }

    fn next_line(&mut self, tx: f32, ty: f32) {
        self.text.line_matrix = Matrix::translate(tx, ty).then(&self.text.line_matrix);
        self.text.matrix = self.text.line_matrix;
    }

    fn advance(&mut self, distance: f32) {
        self.text.matrix = Matrix::translate(distance, 0.0).then(&self.text.matrix);
    }

    fn show(&mut self, text: &str) {
        let size = self.text.font_size;
        let width = text.chars().count() as f32 * GLYPH_WIDTH * size;

        let to_user = self.text.matrix.then(&self.state.ctm);
        let corners = [
            to_user.apply(0.0, -DESCENT * size),
            to_user.apply(width, -DESCENT * size),
            to_user.apply(0.0, ASCENT * size),
            to_user.apply(width, ASCENT * size),
        ];

        if let Some(bbox) = Rect::bounding(&corners) {
            if !text.trim().is_empty() {
                self.layout.runs.push(TextRun {
                    text: text.to_string(),
                    bbox,
                    fill: self.state.fill,
                });
            }
        }
        self.advance(width);
    }

    fn show_array(&mut self, items: &[Object]) {
        let mut text = String::new();
        let mut kerning = 0.0;
        for item in items {
            match item {
                Object::Integer(n) => kerning += *n as f32,
                Object::Real(n) => kerning += *n,
                other => {
                    if let Some(piece) = decode_string(other) {
                        // Large negative adjustments stand in for spaces.
                        if kerning < -200.0 && !text.is_empty() && !text.ends_with(' ') {
                            text.push(' ');
                        }
                        kerning = 0.0;
                        text.push_str(&piece);
                    }
                }
            }
        }
        self.show(&text);
    }
}

/// Initial color of a device color space, `None` for any other space
fn device_initial_color(name: &[u8]) -> Option<RawColor> {
    match name {
        b"DeviceGray" => Some(RawColor::Gray(0.0)),
        b"DeviceRGB" => Some(RawColor::Rgb(0.0, 0.0, 0.0)),
        b"DeviceCMYK" => Some(RawColor::Cmyk(0.0, 0.0, 0.0, 1.0)),
        _ => None,
    }
}

fn numbers(operands: &[Object]) -> Vec<f32> {
    operands
        .iter()
        .filter_map(|operand| match operand {
            Object::Integer(n) => Some(*n as f32),
            Object::Real(n) => Some(*n),
            _ => None,
        })
        .collect()
}

fn matrix(nums: &[f32]) -> Option<Matrix> {
    match *nums {
        [a, b, c, d, e, f] => Some(Matrix([a, b, c, d, e, f])),
        _ => None,
    }
}

/// Decode a PDF string operand, UTF-16 with byte order mark or single byte
fn decode_string(object: &Object) -> Option<String> {
    let Object::String(bytes, _) = object else {
        return None;
    };

    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&units));
    }

    Some(bytes.iter().map(|&b| char::from(b)).collect())
}
